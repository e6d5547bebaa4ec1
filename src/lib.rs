pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use crate::services::{
    email_service::EmailService, embed_service::EmbedService, question_service::QuestionService,
    retrieval_service::RetrievalService, scoring_service::ScoringService,
    session_store::SessionStore,
};
use reqwest::Client;

#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub question_service: QuestionService,
    pub scoring_service: ScoringService,
    pub retrieval_service: RetrievalService,
    pub email_service: EmailService,
}

impl AppState {
    pub fn new() -> Self {
        let config = crate::config::get_config();
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .unwrap();

        let question_service = QuestionService::new(
            config.openai_api_key.clone(),
            config.chat_model.clone(),
            http_client.clone(),
        );
        let embed_service = EmbedService::new(
            config.openai_api_key.clone(),
            config.embedding_model.clone(),
            http_client.clone(),
        );
        let scoring_service = ScoringService::new(embed_service.clone());
        let retrieval_service = RetrievalService::new(
            config.openai_api_key.clone(),
            config.chat_model.clone(),
            config.indexes_dir.clone(),
            embed_service,
            http_client,
        );
        let email_service = EmailService::new(
            config.smtp_server.clone(),
            config.smtp_port,
            config.email_address.clone(),
            config.email_password.clone(),
        );

        Self {
            sessions: SessionStore::new(),
            question_service,
            scoring_service,
            retrieval_service,
            email_service,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
