use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Generation backend error: {0}")]
    Backend(String),
}

/// Boundary to the text-generation backend. Takes a fully formatted prompt
/// and returns generated text. Real backends may fail on network or API
/// errors; callers own the recovery policy.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
    pub done: bool,
}

/// Text generation backed by a local Ollama server.
#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    host: String,
    model: String,
}

impl OllamaClient {
    pub fn new(host: String, model: String) -> Self {
        Self {
            client: Client::new(),
            host,
            model,
        }
    }

    pub async fn is_available(&self) -> bool {
        let url = format!("{}/api/tags", self.host);
        self.client.get(&url).send().await.is_ok()
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let url = format!("{}/api/generate", self.host);
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await?
            .json::<GenerateResponse>()
            .await?;

        Ok(response.response)
    }
}

/// Deterministic generator for running without any model backend. Responses
/// are keyed purely by prompt content: the answer template's source-document
/// section is checked before the summary template's search-results section,
/// so the two prompt shapes cannot collide.
pub struct CannedLlm;

const FALLBACK_RESPONSE: &str =
    "I do not have enough context to respond to this prompt.";

#[async_trait]
impl TextGenerator for CannedLlm {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        if prompt.contains("Source documents:") {
            let query = line_after(prompt, "following query: ")
                .unwrap_or_else(|| "the original query".to_string());
            Ok(canned_answer(&query))
        } else if prompt.contains("Search Results:") {
            let query = line_after(prompt, "Search Query: ")
                .unwrap_or_else(|| "the original query".to_string());
            Ok(canned_summary(&query))
        } else {
            Ok(FALLBACK_RESPONSE.to_string())
        }
    }
}

/// The remainder of the line following `marker`, if present and non-empty.
fn line_after(prompt: &str, marker: &str) -> Option<String> {
    let rest = prompt.split(marker).nth(1)?;
    let line = rest.lines().next().unwrap_or("").trim();
    if line.is_empty() {
        None
    } else {
        Some(line.to_string())
    }
}

fn canned_summary(query: &str) -> String {
    format!(
        "Based on the search results, here are the key findings about {query}:\n\
         \n\
         1. The retrieved pages consistently address the query and agree on the main points.\n\
         \n\
         2. Several sources report recent, concrete developments rather than background material.\n\
         \n\
         3. Coverage overlaps enough to cross-check the central claims.\n\
         \n\
         4. A few details appear in only one source and should be weighed accordingly.\n\
         \n\
         Overall, the results contain enough relevant material to answer the query, \
         with the usual caution about claims that rest on a single source."
    )
}

fn canned_answer(query: &str) -> String {
    format!(
        "# {query}\n\
         \n\
         ## Overview\n\
         \n\
         The available sources broadly agree on the current state of {query}. The most \
         substantive coverage comes from the first source, which outlines the main \
         developments in this area [Source 1].\n\
         \n\
         ## Key Findings\n\
         \n\
         - Recent reporting describes steady, measurable progress rather than a single \
         breakthrough [Source 1].\n\
         - Independent coverage corroborates the central claims and adds practical \
         context [Source 2].\n\
         - Open problems are acknowledged across the material reviewed, so the picture \
         is not one-sided [Source 1].\n\
         \n\
         ## Conclusion\n\
         \n\
         Taken together, the sources give a consistent answer to the query, though \
         deeper primary material would strengthen several of the claims [Source 2]."
    )
}
