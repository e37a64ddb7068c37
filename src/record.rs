//! Dataset metadata records
//!
//! One [`DatasetRecord`] is produced per dataset detail page during the crawl
//! and becomes one row in the metadata CSV. Descriptive fields are free-form
//! strings; a label missing from the page leaves the field empty rather than
//! failing the record.

/// Metadata extracted from one dataset detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetRecord {
    /// Dataset name, from the page's `<h1>`. Never empty for a kept record.
    pub name: String,

    /// URL of the detail page the record was extracted from
    pub url: String,

    /// Free-form description paragraph
    pub description: String,

    /// "Dataset Characteristics" label (e.g. "Multivariate")
    pub characteristics: String,

    /// "Subject Area" label (e.g. "Biology")
    pub subject_area: String,

    /// "Associated Tasks" label (e.g. "Classification")
    pub associated_tasks: String,

    /// "Feature Type" label (e.g. "Real")
    pub feature_types: String,

    /// "# Instances" count, kept as a string since pages are inconsistent
    pub instances: String,

    /// "# Features" count, kept as a string
    pub features: String,

    /// Direct file download URLs found on the detail page, in page order
    pub download_urls: Vec<String>,
}

impl DatasetRecord {
    /// Creates an empty record for the given detail page URL
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            description: String::new(),
            characteristics: String::new(),
            subject_area: String::new(),
            associated_tasks: String::new(),
            feature_types: String::new(),
            instances: String::new(),
            features: String::new(),
            download_urls: Vec::new(),
        }
    }

    /// Assigns a labelled value extracted from the detail page to its field
    ///
    /// Labels are matched after stripping any `# ` prefix the page uses on
    /// count fields. Unrecognized labels are ignored.
    pub fn set_field(&mut self, label: &str, value: &str) {
        let label = label.strip_prefix("# ").unwrap_or(label);
        let value = value.trim();

        match label {
            "Dataset Characteristics" => self.characteristics = value.to_string(),
            "Subject Area" => self.subject_area = value.to_string(),
            "Associated Tasks" => self.associated_tasks = value.to_string(),
            "Feature Type" => self.feature_types = value.to_string(),
            "Instances" => self.instances = value.to_string(),
            "Features" => self.features = value.to_string(),
            _ => {}
        }
    }
}
