use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::fetch::truncate_chars;
use crate::llm::{GenerateError, TextGenerator};
use crate::output;
use crate::prompts;
use crate::search::{SearchHit, SearchProvider};

/// Characters of source content included per source when rendering the
/// summarization prompt.
const PROMPT_CONTENT_CHARS: usize = 1_000;

/// Normalized, citation-ready representation of one search hit.
///
/// `score` carries no ranking meaning; it is kept for shape compatibility
/// with downstream consumers of the source list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    pub title: String,
    pub url: String,
    pub content: String,
    pub score: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchResult {
    pub query: String,
    pub sources: Vec<SourceRecord>,
    pub summary: String,
}

/// First pipeline stage: search the web, normalize hits into source
/// records, and summarize them.
pub struct ResearchAgent {
    search: Box<dyn SearchProvider>,
    llm: Arc<dyn TextGenerator>,
    max_results: usize,
}

impl ResearchAgent {
    pub fn new(search: Box<dyn SearchProvider>, llm: Arc<dyn TextGenerator>, max_results: usize) -> Self {
        Self {
            search,
            llm,
            max_results,
        }
    }

    /// Run the research stage. A summary-generation failure propagates to
    /// the caller; search failures have already degraded to zero hits by
    /// the time they reach this stage.
    pub async fn research(&self, query: &str) -> Result<ResearchResult, GenerateError> {
        output::status(&format!("Starting research for query: {}", query));

        let hits = self.search.search(query, self.max_results).await;
        output::info(&format!("Found {} search results", hits.len()));

        if hits.is_empty() {
            // The answer stage always receives at least one source to cite
            // or explicitly acknowledge.
            return Ok(ResearchResult {
                query: query.to_string(),
                sources: vec![SourceRecord {
                    title: "No results found".to_string(),
                    url: String::new(),
                    content: "No search results were found for this query.".to_string(),
                    score: "0.0".to_string(),
                }],
                summary: "No relevant information was found for the query.".to_string(),
            });
        }

        let sources: Vec<SourceRecord> = hits.into_iter().map(normalize_hit).collect();

        let prompt = prompts::summary_prompt(query, &render_sources(&sources));
        let summary = self.llm.generate(&prompt).await?;

        Ok(ResearchResult {
            query: query.to_string(),
            sources,
            summary,
        })
    }
}

fn normalize_hit(hit: SearchHit) -> SourceRecord {
    let title = if hit.title.is_empty() {
        "Untitled".to_string()
    } else {
        hit.title
    };

    // Prefer the fetched full text over the short search snippet.
    let content = hit.content.unwrap_or(hit.snippet);

    SourceRecord {
        title,
        url: hit.url,
        content,
        score: "1.0".to_string(),
    }
}

fn render_sources(sources: &[SourceRecord]) -> String {
    sources
        .iter()
        .enumerate()
        .map(|(i, source)| {
            let mut content = source.content.clone();
            truncate_chars(&mut content, PROMPT_CONTENT_CHARS);
            format!(
                "SOURCE {}:\nTitle: {}\nURL: {}\nContent: {}...",
                i + 1,
                source.title,
                source.url,
                content
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
