use std::sync::Arc;

use crate::answer::{AnswerAgent, FormattedAnswer};
use crate::config::Config;
use crate::llm::{CannedLlm, OllamaClient, TextGenerator};
use crate::research::{ResearchAgent, ResearchResult};
use crate::search::{SearchClient, SearchProvider};

/// Pipeline stages. `Research` and `AnswerGeneration` both side-transition
/// to `Done` when the state carries an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    Research,
    AnswerGeneration,
    Done,
}

/// State owned by a single query invocation. Each stage writes its own
/// field; nothing is shared across queries.
#[derive(Debug, Clone)]
pub struct PipelineState {
    pub query: String,
    pub research: Option<ResearchResult>,
    pub answer: Option<FormattedAnswer>,
    pub error: Option<String>,
}

impl PipelineState {
    fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
            research: None,
            answer: None,
            error: None,
        }
    }
}

/// Transition table, keyed on the current stage and the single
/// error-present predicate. Total over both inputs.
fn next_stage(stage: Stage, error_present: bool) -> Stage {
    match (stage, error_present) {
        (Stage::Start, _) => Stage::Research,
        (Stage::Research, false) => Stage::AnswerGeneration,
        (Stage::Research, true) => Stage::Done,
        (Stage::AnswerGeneration, _) => Stage::Done,
        (Stage::Done, _) => Stage::Done,
    }
}

/// Sequences the research and answer stages over one shared state,
/// short-circuiting to `Done` once an error is recorded.
pub struct Pipeline {
    researcher: ResearchAgent,
    answerer: AnswerAgent,
}

impl Pipeline {
    /// Wire the pipeline with the real search client and the generator
    /// selected by configuration.
    pub fn new(config: &Config) -> Self {
        let llm: Arc<dyn TextGenerator> = if config.ollama_enabled {
            Arc::new(OllamaClient::new(
                config.ollama_host.clone(),
                config.ollama_model.clone(),
            ))
        } else {
            Arc::new(CannedLlm)
        };

        let search: Box<dyn SearchProvider> = Box::new(SearchClient::new(config));

        Self::with_components(search, llm, config.max_search_results)
    }

    /// Wire the pipeline with explicit collaborators.
    pub fn with_components(
        search: Box<dyn SearchProvider>,
        llm: Arc<dyn TextGenerator>,
        max_results: usize,
    ) -> Self {
        Self {
            researcher: ResearchAgent::new(search, llm.clone(), max_results),
            answerer: AnswerAgent::new(llm),
        }
    }

    /// Drive the state machine to `Done` and return the terminal state. At
    /// most one of `answer` and `error` is populated on return.
    pub async fn process_query(&self, query: &str) -> PipelineState {
        let mut state = PipelineState::new(query);
        let mut stage = Stage::Start;

        while stage != Stage::Done {
            stage = next_stage(stage, state.error.is_some());
            match stage {
                Stage::Research => self.run_research(&mut state).await,
                Stage::AnswerGeneration => self.run_answer_generation(&mut state).await,
                Stage::Start | Stage::Done => {}
            }
        }

        state
    }

    async fn run_research(&self, state: &mut PipelineState) {
        match self.researcher.research(&state.query).await {
            Ok(research) => state.research = Some(research),
            Err(e) => state.error = Some(format!("Research error: {}", e)),
        }
    }

    async fn run_answer_generation(&self, state: &mut PipelineState) {
        let answer = self.answerer.create_answer(state.research.as_ref()).await;
        state.answer = Some(answer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_always_enters_research() {
        assert_eq!(next_stage(Stage::Start, false), Stage::Research);
        assert_eq!(next_stage(Stage::Start, true), Stage::Research);
    }

    #[test]
    fn research_error_skips_answer_generation() {
        assert_eq!(next_stage(Stage::Research, true), Stage::Done);
        assert_eq!(next_stage(Stage::Research, false), Stage::AnswerGeneration);
    }

    #[test]
    fn answer_generation_always_terminates() {
        assert_eq!(next_stage(Stage::AnswerGeneration, false), Stage::Done);
        assert_eq!(next_stage(Stage::AnswerGeneration, true), Stage::Done);
    }

    #[test]
    fn done_is_terminal() {
        assert_eq!(next_stage(Stage::Done, false), Stage::Done);
        assert_eq!(next_stage(Stage::Done, true), Stage::Done);
    }
}
