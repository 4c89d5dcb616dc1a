//! Best-effort page enrichment: title and favicon scraped from the target
//! page plus a summary from an external summarization endpoint. Every
//! outbound call is bounded by the configured timeout, and every failure
//! degrades to a defaulted field instead of failing bookmark creation.

use std::time::Duration;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;
use url::Url;

use crate::config::EnrichConfig;

/// Fields attached to a bookmark at creation time.
#[derive(Debug, Clone)]
pub struct Enrichment {
    pub title: String,
    pub favicon: String,
    pub summary: String,
}

pub struct Enricher {
    client: reqwest::Client,
    summarizer_url: String,
}

impl Enricher {
    pub fn new(config: &EnrichConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            summarizer_url: config.summarizer_url.clone(),
        })
    }

    /// Never fails: a dead host, a timeout or a garbage page all fall back
    /// to `title = url`, `favicon = <origin>/favicon.ico`, `summary = ""`.
    pub async fn enrich(&self, url: &str) -> Enrichment {
        let html = match self.fetch_html(url).await {
            Ok(body) => Some(body),
            Err(e) => {
                warn!(error = %e, url, "page fetch failed; using defaults");
                None
            }
        };

        let title = html
            .as_deref()
            .and_then(extract_title)
            .unwrap_or_else(|| url.to_string());

        let favicon = html
            .as_deref()
            .and_then(extract_favicon)
            .or_else(|| default_favicon(url))
            .unwrap_or_default();

        let summary = match self.summarize(url).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, url, "summarization failed; using empty summary");
                String::new()
            }
        };

        Enrichment {
            title,
            favicon,
            summary,
        }
    }

    async fn fetch_html(&self, url: &str) -> anyhow::Result<String> {
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(body)
    }

    async fn summarize(&self, url: &str) -> anyhow::Result<String> {
        let text = self
            .client
            .post(&self.summarizer_url)
            .json(&serde_json::json!({ "url": url }))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(text)
    }
}

fn extract_title(html: &str) -> Option<String> {
    lazy_static! {
        static ref TITLE_RE: Regex = Regex::new(r"(?is)<title>(.*?)</title>").unwrap();
    }
    TITLE_RE
        .captures(html)
        .map(|c| c[1].trim().to_string())
        .filter(|t| !t.is_empty())
}

fn extract_favicon(html: &str) -> Option<String> {
    lazy_static! {
        static ref ICON_RE: Regex =
            Regex::new(r#"(?i)<link[^>]*rel=["']icon["'][^>]*href=["']([^"']+)["']"#).unwrap();
    }
    ICON_RE.captures(html).map(|c| c[1].to_string())
}

/// `/favicon.ico` resolved against the bookmarked url; needs no network, so
/// it applies even when the page fetch itself failed.
fn default_favicon(url: &str) -> Option<String> {
    let base = Url::parse(url).ok()?;
    base.join("/favicon.ico").ok().map(|u| u.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_title() {
        let html = "<html><head><title>Example Domain</title></head></html>";
        assert_eq!(extract_title(html).as_deref(), Some("Example Domain"));
    }

    #[test]
    fn title_matching_is_case_insensitive_and_spans_lines() {
        let html = "<HTML><TITLE>\n  Spread Out\n</TITLE></HTML>";
        assert_eq!(extract_title(html).as_deref(), Some("Spread Out"));
    }

    #[test]
    fn empty_title_falls_through() {
        assert_eq!(extract_title("<title>   </title>"), None);
        assert_eq!(extract_title("<body>no title here</body>"), None);
    }

    #[test]
    fn extracts_icon_link_href() {
        let html = r#"<link rel="icon" href="/static/fav.png" type="image/png">"#;
        assert_eq!(extract_favicon(html).as_deref(), Some("/static/fav.png"));
    }

    #[test]
    fn icon_matching_accepts_single_quotes() {
        let html = "<link rel='icon' href='https://cdn.example.com/i.ico'>";
        assert_eq!(
            extract_favicon(html).as_deref(),
            Some("https://cdn.example.com/i.ico")
        );
    }

    #[test]
    fn no_icon_link_falls_through() {
        assert_eq!(extract_favicon("<link rel=\"stylesheet\" href=\"a.css\">"), None);
    }

    #[test]
    fn default_favicon_resolves_against_origin() {
        assert_eq!(
            default_favicon("https://example.com/some/deep/page?q=1").as_deref(),
            Some("https://example.com/favicon.ico")
        );
    }

    #[test]
    fn default_favicon_empty_for_unparseable_url() {
        assert_eq!(default_favicon("not a url"), None);
    }

    #[tokio::test]
    async fn enrich_degrades_when_host_is_unreachable() {
        let enricher = Enricher::new(&EnrichConfig {
            summarizer_url: "http://127.0.0.1:1/".into(),
            fetch_timeout_secs: 1,
        })
        .expect("enricher");

        // Port 1 refuses connections, so both outbound calls fail fast.
        let url = "http://127.0.0.1:1/page";
        let enrichment = enricher.enrich(url).await;
        assert_eq!(enrichment.title, url);
        assert_eq!(enrichment.favicon, "http://127.0.0.1:1/favicon.ico");
        assert_eq!(enrichment.summary, "");
    }
}
