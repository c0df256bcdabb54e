//! Page fetching and report enrichment
//!
//! Fetches the target page, hands the body to [`pagescan::inspect`], then
//! enriches the report: image URLs are resolved against the page origin
//! and external stylesheet bodies are fetched best-effort and appended to
//! the inline CSS. A stylesheet that fails to download is logged and
//! skipped — partial results beat total failure here.

use pagescan::PageReport;
use url::Url;

use crate::error::ApiError;

/// Default the scheme to https when the caller omitted it.
pub fn normalize_url(raw: &str) -> String {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("https://{}", raw)
    }
}

/// Resolve a possibly-relative reference against the page URL.
fn resolve(base: &Url, reference: &str) -> Option<String> {
    base.join(reference).ok().map(|resolved| resolved.to_string())
}

fn upstream_error(url: &Url, err: reqwest::Error) -> ApiError {
    ApiError::UpstreamFetch {
        url: url.to_string(),
        reason: err.to_string(),
    }
}

async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String, reqwest::Error> {
    client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await
}

/// Fetch a page and build the enriched report for it.
pub async fn fetch_report(
    client: &reqwest::Client,
    raw_url: &str,
) -> Result<PageReport, ApiError> {
    let url_str = normalize_url(raw_url);
    let base = Url::parse(&url_str).map_err(|e| ApiError::UpstreamFetch {
        url: url_str.clone(),
        reason: e.to_string(),
    })?;

    log::info!("Fetching {}", base);
    let response = client
        .get(base.clone())
        .send()
        .await
        .map_err(|e| upstream_error(&base, e))?
        .error_for_status()
        .map_err(|e| upstream_error(&base, e))?;
    let body = response.text().await.map_err(|e| upstream_error(&base, e))?;

    let mut report = pagescan::inspect(&body);

    // Relative image URLs become absolute against the page origin
    let images = std::mem::take(&mut report.images);
    report.images = images
        .iter()
        .filter_map(|src| resolve(&base, src))
        .collect();

    // Best-effort external stylesheet bodies
    let mut css_bodies = Vec::new();
    for href in &report.styles {
        let Some(style_url) = resolve(&base, href) else {
            continue;
        };
        match fetch_text(client, &style_url).await {
            Ok(css) => css_bodies.push(css),
            Err(err) => log::debug!("Skipping stylesheet {}: {}", style_url, err),
        }
    }
    if !css_bodies.is_empty() {
        report.css.push_str("\n\n/* External CSS Files */\n\n");
        report.css.push_str(&css_bodies.join("\n\n"));
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_adds_https() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
    }

    #[test]
    fn test_normalize_keeps_existing_scheme() {
        assert_eq!(normalize_url("http://example.com"), "http://example.com");
        assert_eq!(normalize_url("https://example.com"), "https://example.com");
    }

    #[test]
    fn test_resolve_relative_path() {
        let base = Url::parse("https://example.com/blog/post").unwrap();
        assert_eq!(
            resolve(&base, "/img/logo.png").as_deref(),
            Some("https://example.com/img/logo.png")
        );
        assert_eq!(
            resolve(&base, "pic.jpg").as_deref(),
            Some("https://example.com/blog/pic.jpg")
        );
    }

    #[test]
    fn test_resolve_keeps_absolute_urls() {
        let base = Url::parse("https://example.com/").unwrap();
        assert_eq!(
            resolve(&base, "https://cdn.example.net/a.css").as_deref(),
            Some("https://cdn.example.net/a.css")
        );
    }
}
