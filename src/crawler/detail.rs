//! Detail page parsing
//!
//! Extracts a [`DatasetRecord`] from one dataset detail page. The extraction
//! rules are coupled to the index site's markup and are the part of this
//! crate most likely to need revisiting when the site changes:
//!
//! - name: first `<h1>` (a page without one is unusable and is skipped)
//! - description: `<p>` following the `<h1>`, or the site's `p.pb-6` block
//! - labelled fields: `<dt>`/`<dd>` pairs inside the first `<dl>` only
//! - download links: `a[href*="/static/public/"]`, falling back to the
//!   `a[href*="/api/v1/datasets/"]` endpoint links
//!
//! A missing label leaves its field empty; only a missing name is an error.

use crate::record::DatasetRecord;
use scraper::{Html, Selector};
use url::Url;

/// Parses a dataset detail page into a record
///
/// # Arguments
///
/// * `html` - The detail page markup
/// * `url` - The detail page URL (stored in the record)
/// * `base_url` - Base for resolving relative download links
///
/// # Returns
///
/// * `Ok(DatasetRecord)` - Record with every field the page provided
/// * `Err(String)` - Page had no usable dataset name
pub fn parse_detail_page(
    html: &str,
    url: &str,
    base_url: &Url,
) -> Result<DatasetRecord, String> {
    let document = Html::parse_document(html);

    let name = extract_name(&document).ok_or_else(|| "no <h1> dataset name".to_string())?;

    let mut record = DatasetRecord::new(name, url);
    record.description = extract_description(&document).unwrap_or_default();
    extract_labelled_fields(&document, &mut record);
    record.download_urls = extract_download_links(&document, base_url);

    Ok(record)
}

fn extract_name(document: &Html) -> Option<String> {
    let selector = Selector::parse("h1").ok()?;
    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn extract_description(document: &Html) -> Option<String> {
    // The description paragraph sits right after the heading in the current
    // layout; older layouts carry it in a p.pb-6 block.
    for selector_str in ["h1 + p", "p.pb-6"] {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(element) = document.select(&selector).next() {
                let text = element.text().collect::<String>().trim().to_string();
                if !text.is_empty() {
                    return Some(text);
                }
            }
        }
    }
    None
}

/// Walks the `<dt>`/`<dd>` pairs of the page's first definition list
///
/// Only the first `<dl>` holds the dataset characteristics; a later list
/// (citations, related links) must not shift the label/value pairing.
/// Values consisting only of the `-` placeholder are treated as absent.
fn extract_labelled_fields(document: &Html, record: &mut DatasetRecord) {
    let (Ok(dl_selector), Ok(dt_selector), Ok(dd_selector)) = (
        Selector::parse("dl"),
        Selector::parse("dt"),
        Selector::parse("dd"),
    ) else {
        return;
    };

    let Some(dl) = document.select(&dl_selector).next() else {
        return;
    };

    let labels = dl.select(&dt_selector);
    let values = dl.select(&dd_selector);

    for (dt, dd) in labels.zip(values) {
        let label = dt.text().collect::<String>().trim().to_string();
        let value = dd.text().collect::<String>().trim().to_string();

        if label.is_empty() || value.is_empty() || value == "-" {
            continue;
        }

        record.set_field(&label, &value);
    }
}

fn extract_download_links(document: &Html, base_url: &Url) -> Vec<String> {
    // Direct static file links first; the API endpoint form is a fallback
    for selector_str in [
        r#"a[href*="/static/public/"]"#,
        r#"a[href*="/api/v1/datasets/"]"#,
    ] {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };

        let mut links = Vec::new();
        for element in document.select(&selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            if let Ok(absolute) = base_url.join(href) {
                let absolute = absolute.to_string();
                if !links.contains(&absolute) {
                    links.push(absolute);
                }
            }
        }

        if !links.is_empty() {
            return links;
        }
    }

    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://archive.example.com").unwrap()
    }

    const DETAIL_URL: &str = "https://archive.example.com/dataset/53/iris";

    fn full_page() -> &'static str {
        r#"
        <html><body>
            <div>
                <h1>Iris</h1>
                <p>A small classic dataset of flower measurements.</p>
            </div>
            <dl>
                <dt>Dataset Characteristics</dt><dd>Multivariate</dd>
                <dt>Subject Area</dt><dd>Biology</dd>
                <dt>Associated Tasks</dt><dd>Classification</dd>
                <dt>Feature Type</dt><dd>Real</dd>
                <dt># Instances</dt><dd>150</dd>
                <dt># Features</dt><dd>4</dd>
            </dl>
            <a href="/static/public/53/iris.zip">Download</a>
        </body></html>
        "#
    }

    #[test]
    fn test_parse_full_page() {
        let record = parse_detail_page(full_page(), DETAIL_URL, &base()).unwrap();
        assert_eq!(record.name, "Iris");
        assert_eq!(record.url, DETAIL_URL);
        assert_eq!(
            record.description,
            "A small classic dataset of flower measurements."
        );
        assert_eq!(record.characteristics, "Multivariate");
        assert_eq!(record.subject_area, "Biology");
        assert_eq!(record.associated_tasks, "Classification");
        assert_eq!(record.feature_types, "Real");
        assert_eq!(record.instances, "150");
        assert_eq!(record.features, "4");
        assert_eq!(
            record.download_urls,
            vec!["https://archive.example.com/static/public/53/iris.zip"]
        );
    }

    #[test]
    fn test_missing_name_is_error() {
        let html = "<html><body><p>No heading here</p></body></html>";
        assert!(parse_detail_page(html, DETAIL_URL, &base()).is_err());
    }

    #[test]
    fn test_empty_name_is_error() {
        let html = "<html><body><h1>   </h1></body></html>";
        assert!(parse_detail_page(html, DETAIL_URL, &base()).is_err());
    }

    #[test]
    fn test_missing_labels_leave_fields_empty() {
        let html = "<html><body><h1>Sparse</h1></body></html>";
        let record = parse_detail_page(html, DETAIL_URL, &base()).unwrap();
        assert_eq!(record.name, "Sparse");
        assert_eq!(record.description, "");
        assert_eq!(record.subject_area, "");
        assert!(record.download_urls.is_empty());
    }

    #[test]
    fn test_placeholder_dash_ignored() {
        let html = r#"
        <html><body>
            <h1>Partial</h1>
            <dl>
                <dt>Subject Area</dt><dd>-</dd>
                <dt>Feature Type</dt><dd>Integer</dd>
            </dl>
        </body></html>
        "#;
        let record = parse_detail_page(html, DETAIL_URL, &base()).unwrap();
        assert_eq!(record.subject_area, "");
        assert_eq!(record.feature_types, "Integer");
    }

    #[test]
    fn test_second_definition_list_does_not_shift_pairing() {
        // The citation block below carries an unbalanced <dl>; its dt must
        // not be zipped against the characteristics values
        let html = r#"
        <html><body>
            <h1>Iris</h1>
            <dl>
                <dt>Subject Area</dt><dd>Biology</dd>
                <dt># Instances</dt><dd>150</dd>
            </dl>
            <dl>
                <dt>Feature Type</dt>
                <dt>Associated Tasks</dt><dd>Wrong</dd>
            </dl>
        </body></html>
        "#;
        let record = parse_detail_page(html, DETAIL_URL, &base()).unwrap();
        assert_eq!(record.subject_area, "Biology");
        assert_eq!(record.instances, "150");
        assert_eq!(record.feature_types, "");
        assert_eq!(record.associated_tasks, "");
    }

    #[test]
    fn test_description_fallback_class() {
        let html = r#"
        <html><body>
            <h1>Iris</h1>
            <div><p class="pb-6">Fallback description block.</p></div>
        </body></html>
        "#;
        let record = parse_detail_page(html, DETAIL_URL, &base()).unwrap();
        assert_eq!(record.description, "Fallback description block.");
    }

    #[test]
    fn test_multiple_download_links_in_page_order() {
        let html = r#"
        <html><body>
            <h1>Wine Quality</h1>
            <a href="/static/public/186/red.csv">Red</a>
            <a href="/static/public/186/white.csv">White</a>
            <a href="/static/public/186/red.csv">Red again</a>
        </body></html>
        "#;
        let record = parse_detail_page(html, DETAIL_URL, &base()).unwrap();
        assert_eq!(
            record.download_urls,
            vec![
                "https://archive.example.com/static/public/186/red.csv",
                "https://archive.example.com/static/public/186/white.csv",
            ]
        );
    }

    #[test]
    fn test_api_fallback_used_when_no_static_link() {
        let html = r#"
        <html><body>
            <h1>Iris</h1>
            <a href="/api/v1/datasets/53/download">Download</a>
        </body></html>
        "#;
        let record = parse_detail_page(html, DETAIL_URL, &base()).unwrap();
        assert_eq!(
            record.download_urls,
            vec!["https://archive.example.com/api/v1/datasets/53/download"]
        );
    }

    #[test]
    fn test_absolute_download_link_kept() {
        let html = r#"
        <html><body>
            <h1>Iris</h1>
            <a href="https://cdn.example.com/static/public/53/iris.zip">Download</a>
        </body></html>
        "#;
        let record = parse_detail_page(html, DETAIL_URL, &base()).unwrap();
        assert_eq!(
            record.download_urls,
            vec!["https://cdn.example.com/static/public/53/iris.zip"]
        );
    }
}
