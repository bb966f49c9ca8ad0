use std::path::Path;

use thiserror::Error;
use tokio::fs;

use crate::answer::FormattedAnswer;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to write file: {0}")]
    Io(#[from] std::io::Error),
}

/// Render the saved-report form of an answer: a query heading, the answer
/// body, then a numbered source list.
pub fn render_report(query: &str, answer: &FormattedAnswer) -> String {
    let mut report = format!("# Research: {}\n\n", query);
    report.push_str(&answer.answer);
    report.push_str("\n\n## Sources\n\n");

    for (i, source) in answer.sources.iter().enumerate() {
        report.push_str(&format!("[{}] {}\n", i + 1, source.title));
        report.push_str(&format!("    URL: {}\n\n", source.url));
    }

    report
}

pub async fn save_report(
    path: &Path,
    query: &str,
    answer: &FormattedAnswer,
) -> Result<(), ReportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }

    fs::write(path, render_report(query, answer)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::research::SourceRecord;

    fn sample_answer() -> FormattedAnswer {
        FormattedAnswer {
            answer: "Body text".to_string(),
            sources: vec![SourceRecord {
                title: "T".to_string(),
                url: "U".to_string(),
                content: String::new(),
                score: "1.0".to_string(),
            }],
        }
    }

    #[test]
    fn report_format_is_exact() {
        let report = render_report("q", &sample_answer());
        assert_eq!(
            report,
            "# Research: q\n\nBody text\n\n## Sources\n\n[1] T\n    URL: U\n\n"
        );
    }

    #[test]
    fn report_without_sources_has_empty_source_list() {
        let answer = FormattedAnswer {
            answer: "Body".to_string(),
            sources: Vec::new(),
        };
        let report = render_report("q", &answer);
        assert_eq!(report, "# Research: q\n\nBody\n\n## Sources\n\n");
    }

    #[tokio::test]
    async fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/report.md");

        save_report(&path, "q", &sample_answer()).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, render_report("q", &sample_answer()));
    }
}
