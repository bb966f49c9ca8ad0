use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub max_search_results: usize,
    pub search_timeout: Duration,
    pub ollama_enabled: bool,
    pub ollama_host: String,
    pub ollama_model: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            max_search_results: env::var("MAX_SEARCH_RESULTS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),
            search_timeout: Duration::from_secs(
                env::var("SEARCH_TIMEOUT")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .unwrap_or(10),
            ),
            ollama_enabled: env::var("OLLAMA_ENABLED")
                .unwrap_or_else(|_| "false".to_string())
                .to_lowercase()
                == "true",
            ollama_host: env::var("OLLAMA_HOST")
                .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            ollama_model: env::var("OLLAMA_MODEL").unwrap_or_else(|_| "gpt-oss:20b".to_string()),
        }
    }
}
