//! Listing page parsing
//!
//! The dataset index exposes one paginated listing, driven by `skip`/`take`
//! query parameters. Each page carries anchors of the form
//! `/dataset/<id>/<slug>` pointing at detail pages; anything else under
//! `/dataset/` (section anchors, fragments) is ignored.

use crate::config::IndexConfig;
use scraper::{Html, Selector};
use url::Url;

/// Builds the URL of one listing page for the given pagination offset
pub fn listing_page_url(config: &IndexConfig, skip: u32) -> Result<Url, url::ParseError> {
    let base = Url::parse(&config.base_url)?;
    let mut url = base.join(&config.listing_path)?;
    url.set_query(Some(&format!(
        "skip={}&take={}&{}",
        skip, config.page_size, config.listing_query
    )));
    Ok(url)
}

/// Extracts detail-page links from one listing page
///
/// Returns absolute URLs in page order, deduplicated within the page. A link
/// qualifies when its path is exactly `dataset/<id>/<slug>` (three segments).
pub fn extract_detail_links(html: &str, base_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);

    let selector = match Selector::parse(r#"a[href^="/dataset/"]"#) {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    let mut links = Vec::new();
    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let segments: Vec<&str> = href.split('/').filter(|s| !s.is_empty()).collect();
        if segments.len() != 3 || segments[0] != "dataset" {
            continue;
        }

        if let Ok(absolute) = base_url.join(href) {
            let absolute = absolute.to_string();
            if !links.contains(&absolute) {
                links.push(absolute);
            }
        }
    }

    links
}
