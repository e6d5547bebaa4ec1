use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub openai_api_key: String,
    pub chat_model: String,
    pub embedding_model: String,
    pub public_rps: u32,
    pub indexes_dir: String,
    pub docs_dir: String,
    pub smtp_server: String,
    pub smtp_port: u16,
    pub email_address: Option<String>,
    pub email_password: Option<String>,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            openai_api_key: get_env("OPENAI_API_KEY")?,
            chat_model: get_env_or("CHAT_MODEL", "gpt-3.5-turbo"),
            embedding_model: get_env_or("EMBEDDING_MODEL", "text-embedding-ada-002"),
            public_rps: get_env_parse_or("PUBLIC_RPS", 100)?,
            indexes_dir: get_env_or("INDEXES_DIR", "indexes"),
            docs_dir: get_env_or("DOCS_DIR", "docs"),
            smtp_server: get_env_or("SMTP_SERVER", "smtp.gmail.com"),
            smtp_port: get_env_parse_or("SMTP_PORT", 587)?,
            email_address: env::var("EMAIL_ADDRESS").ok(),
            email_password: env::var("EMAIL_PASSWORD").ok(),
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
