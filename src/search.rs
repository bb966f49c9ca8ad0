use async_trait::async_trait;
use percent_encoding::percent_decode_str;
use reqwest::Client;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;
use crate::fetch::PageFetcher;
use crate::output;

const DDG_HTML_URL: &str = "https://html.duckduckgo.com/html/";

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Search provider returned status {0}")]
    Status(reqwest::StatusCode),
}

/// One raw result from the search provider, before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub snippet: String,
    /// Full page text fetched after the search, when available.
    pub content: Option<String>,
}

/// Boundary to the web search provider. Implementations must degrade to an
/// empty hit list on provider failure rather than returning an error.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, max_results: usize) -> Vec<SearchHit>;
}

/// DuckDuckGo-backed search client. Each hit is enriched with fetched page
/// text; a failed fetch leaves that hit's content empty but keeps the hit.
pub struct SearchClient {
    client: Client,
    fetcher: PageFetcher,
}

impl SearchClient {
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(config.search_timeout)
            .build()
            .unwrap_or_default();

        Self {
            client,
            fetcher: PageFetcher::new(config.search_timeout),
        }
    }

    async fn try_search(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, SearchError> {
        let response = self
            .client
            .post(DDG_HTML_URL)
            .form(&[("q", query)])
            .header("Accept", "text/html")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status));
        }

        let body = response.text().await?;
        Ok(parse_results(&body, max_results))
    }
}

#[async_trait]
impl SearchProvider for SearchClient {
    async fn search(&self, query: &str, max_results: usize) -> Vec<SearchHit> {
        let mut hits = match self.try_search(query, max_results).await {
            Ok(hits) => hits,
            Err(e) => {
                output::warn(&format!("DuckDuckGo search error: {}", e));
                return Vec::new();
            }
        };

        // Hits are enriched in result order; ordering must survive into the
        // final source list.
        for hit in &mut hits {
            let content = self.fetcher.fetch_text(&hit.url).await;
            if !content.is_empty() {
                hit.content = Some(content);
            }
        }

        hits
    }
}

/// Parse the DuckDuckGo HTML results page. `Html` is `!Send`, so parsing is
/// kept synchronous and never held across an await point.
fn parse_results(body: &str, max_results: usize) -> Vec<SearchHit> {
    let doc = Html::parse_document(body);

    let result_sel = Selector::parse(".result").unwrap();
    let link_sel = Selector::parse("a.result__a").unwrap();
    let snippet_sel = Selector::parse("a.result__snippet, .result__snippet").unwrap();

    let mut hits = Vec::new();
    for result in doc.select(&result_sel) {
        if hits.len() >= max_results {
            break;
        }

        let title = result
            .select(&link_sel)
            .next()
            .map(|el| el.text().collect::<String>())
            .unwrap_or_default()
            .trim()
            .to_string();

        let url = result
            .select(&link_sel)
            .next()
            .and_then(|el| el.value().attr("href"))
            .map(extract_ddg_url)
            .unwrap_or_default();

        let snippet = result
            .select(&snippet_sel)
            .next()
            .map(|el| el.text().collect::<String>())
            .unwrap_or_default()
            .trim()
            .to_string();

        if title.is_empty() && url.is_empty() {
            continue;
        }

        hits.push(SearchHit {
            title,
            url,
            snippet,
            content: None,
        });
    }

    hits
}

/// DuckDuckGo wraps result URLs in redirect links like
/// `//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com&rut=...`.
/// Extract and percent-decode the actual destination.
fn extract_ddg_url(href: &str) -> String {
    if let Some(pos) = href.find("uddg=") {
        let start = pos + 5;
        let end = href[start..].find('&').map(|i| start + i).unwrap_or(href.len());
        let encoded = &href[start..end];
        if !encoded.is_empty() {
            return percent_decode_str(encoded).decode_utf8_lossy().into_owned();
        }
    }
    href.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS_PAGE: &str = r#"
    <html><body>
      <div class="result">
        <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Fone&rut=abc">First Result</a>
        <a class="result__snippet">Snippet one.</a>
      </div>
      <div class="result">
        <a class="result__a" href="https://example.com/two">Second Result</a>
        <div class="result__snippet">Snippet two.</div>
      </div>
      <div class="result">
        <a class="result__a" href=""></a>
      </div>
    </body></html>
    "#;

    #[test]
    fn parses_results_in_order() {
        let hits = parse_results(RESULTS_PAGE, 5);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "First Result");
        assert_eq!(hits[0].url, "https://example.com/one");
        assert_eq!(hits[0].snippet, "Snippet one.");
        assert_eq!(hits[1].title, "Second Result");
        assert_eq!(hits[1].url, "https://example.com/two");
    }

    #[test]
    fn respects_max_results() {
        let hits = parse_results(RESULTS_PAGE, 1);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "First Result");
    }

    #[test]
    fn decodes_redirect_urls() {
        assert_eq!(
            extract_ddg_url("//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Fpage&rut=xyz"),
            "https://example.com/page"
        );
        assert_eq!(
            extract_ddg_url("https://example.com/direct"),
            "https://example.com/direct"
        );
    }
}
