pub mod email_service;
pub mod embed_service;
pub mod question_service;
pub mod retrieval_service;
pub mod scoring_service;
pub mod scrape_service;
pub mod session_store;
