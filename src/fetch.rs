use std::time::Duration;

use reqwest::Client;
use scraper::{Html, Selector};
use thiserror::Error;

use crate::output;

/// Maximum characters of extracted text kept per page.
pub const MAX_CONTENT_CHARS: usize = 10_000;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP error status: {0}")]
    Status(reqwest::StatusCode),
}

/// Fetches web pages and extracts their visible text.
#[derive(Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();

        Self { client }
    }

    /// Fetch a page and return its extracted text, truncated to
    /// [`MAX_CONTENT_CHARS`]. Returns an empty string on any failure;
    /// fetch problems are never fatal to the caller.
    pub async fn fetch_text(&self, url: &str) -> String {
        match self.try_fetch(url).await {
            Ok(text) => text,
            Err(e) => {
                output::warn(&format!("Error fetching {}: {}", url, e));
                String::new()
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        let mut text = html_to_text(&body);
        truncate_chars(&mut text, MAX_CONTENT_CHARS);
        Ok(text)
    }
}

/// Extract readable text from HTML, skipping script, style, and other
/// non-visible subtrees, then collapse whitespace.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let skip_tags = ["script", "style", "noscript", "svg"];

    let body_selector = Selector::parse("body").unwrap();
    let parts = match document.select(&body_selector).next() {
        Some(body) => collect_element_text(body, &skip_tags),
        None => collect_element_text(document.root_element(), &skip_tags),
    };

    clean_whitespace(&parts.join(" "))
}

fn collect_element_text(element: scraper::ElementRef, skip_tags: &[&str]) -> Vec<String> {
    if skip_tags.contains(&element.value().name()) {
        return Vec::new();
    }

    let mut parts = Vec::new();
    for child in element.children() {
        match child.value() {
            scraper::Node::Text(text) => {
                let t = text.trim();
                if !t.is_empty() {
                    parts.push(t.to_string());
                }
            }
            scraper::Node::Element(_) => {
                if let Some(child_el) = scraper::ElementRef::wrap(child) {
                    parts.extend(collect_element_text(child_el, skip_tags));
                }
            }
            _ => {}
        }
    }

    parts
}

fn clean_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut prev_was_whitespace = false;

    for ch in text.chars() {
        if ch.is_whitespace() {
            if !prev_was_whitespace {
                result.push(' ');
            }
            prev_was_whitespace = true;
        } else {
            result.push(ch);
            prev_was_whitespace = false;
        }
    }

    result.trim().to_string()
}

/// Truncate a string in place to at most `max` characters, on a char
/// boundary.
pub fn truncate_chars(text: &mut String, max: usize) {
    if let Some((idx, _)) = text.char_indices().nth(max) {
        text.truncate(idx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_visible_text() {
        let html = "<html><body><h1>Hello</h1><p>World</p></body></html>";
        let text = html_to_text(html);
        assert!(text.contains("Hello"));
        assert!(text.contains("World"));
    }

    #[test]
    fn strips_script_and_style() {
        let html = r#"
        <html><body>
            <script>var x = 1;</script>
            <style>.foo { color: red; }</style>
            <p>Visible text</p>
            <noscript>No JS</noscript>
        </body></html>
        "#;
        let text = html_to_text(html);
        assert!(text.contains("Visible text"));
        assert!(!text.contains("var x = 1"));
        assert!(!text.contains("color: red"));
        assert!(!text.contains("No JS"));
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(clean_whitespace("  hello   world  "), "hello world");
        assert_eq!(clean_whitespace("a\n\n\t b"), "a b");
    }

    #[test]
    fn truncates_on_char_boundary() {
        let mut s = "héllo wörld".to_string();
        truncate_chars(&mut s, 4);
        assert_eq!(s, "héll");

        let mut short = "abc".to_string();
        truncate_chars(&mut short, 10);
        assert_eq!(short, "abc");
    }
}
