use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::llm::TextGenerator;
use crate::output;
use crate::prompts;
use crate::research::{ResearchResult, SourceRecord};

/// Terminal output of one query: the cited answer plus the sources it drew
/// on, in their original order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedAnswer {
    pub answer: String,
    pub sources: Vec<SourceRecord>,
}

/// Second pipeline stage: format research results into a cited answer.
pub struct AnswerAgent {
    llm: Arc<dyn TextGenerator>,
}

impl AnswerAgent {
    pub fn new(llm: Arc<dyn TextGenerator>) -> Self {
        Self { llm }
    }

    /// Produce the final answer. Every failure mode here is recovered
    /// locally: a missing research result yields a fixed degraded answer,
    /// and a generation failure falls back to the research summary.
    pub async fn create_answer(&self, research: Option<&ResearchResult>) -> FormattedAnswer {
        output::status("Creating answer from research results...");

        let research = match research {
            Some(research) => research,
            None => {
                return FormattedAnswer {
                    answer: "Unable to generate an answer due to missing research results."
                        .to_string(),
                    sources: Vec::new(),
                };
            }
        };

        let prompt = prompts::answer_prompt(
            &research.query,
            &research.summary,
            &render_sources(&research.sources),
        );

        let answer = match self.llm.generate(&prompt).await {
            Ok(answer) => answer,
            Err(e) => {
                output::warn(&format!("Error generating answer: {}", e));
                format!(
                    "Error generating a proper answer. Summary of findings: {}",
                    research.summary
                )
            }
        };

        FormattedAnswer {
            answer,
            sources: research.sources.clone(),
        }
    }
}

fn render_sources(sources: &[SourceRecord]) -> String {
    if sources.is_empty() {
        return "No sources available.".to_string();
    }

    sources
        .iter()
        .enumerate()
        .map(|(i, source)| format!("SOURCE {}:\nTitle: {}\nURL: {}", i + 1, source.title, source.url))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_sources_with_numbering() {
        let sources = vec![
            SourceRecord {
                title: "First".to_string(),
                url: "https://example.com/1".to_string(),
                content: String::new(),
                score: "1.0".to_string(),
            },
            SourceRecord {
                title: "Second".to_string(),
                url: "https://example.com/2".to_string(),
                content: String::new(),
                score: "1.0".to_string(),
            },
        ];

        let rendered = render_sources(&sources);
        assert!(rendered.contains("SOURCE 1:\nTitle: First"));
        assert!(rendered.contains("SOURCE 2:\nTitle: Second"));
    }

    #[test]
    fn renders_placeholder_when_empty() {
        assert_eq!(render_sources(&[]), "No sources available.");
    }
}
