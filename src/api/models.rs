use serde::Deserialize;

/// One page of the object search endpoint.
///
/// Both fields are optional on purpose: pagination stops as soon as either
/// one is missing from a response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPage {
    pub records: Option<Vec<RawArtifactRecord>>,
    pub info: Option<PageInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageInfo {
    pub totalrecords: Option<u64>,
    pub next: Option<String>,
}

impl SearchPage {
    /// True when the server advertises another page after this one.
    pub fn has_next(&self) -> bool {
        self.info
            .as_ref()
            .and_then(|info| info.next.as_deref())
            .map(|next| !next.is_empty())
            .unwrap_or(false)
    }

    pub fn total_records(&self) -> Option<u64> {
        self.info.as_ref().and_then(|info| info.totalrecords)
    }
}

/// An artifact exactly as the API returns it. Every field except `id` may
/// be absent; unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawArtifactRecord {
    pub id: i64,
    pub title: Option<String>,
    pub culture: Option<String>,
    pub period: Option<String>,
    pub century: Option<String>,
    pub medium: Option<String>,
    pub dimensions: Option<String>,
    pub description: Option<String>,
    pub department: Option<String>,
    pub classification: Option<String>,
    pub accessionyear: Option<i64>,
    pub accessionmethod: Option<String>,

    pub imagecount: Option<i64>,
    pub mediacount: Option<i64>,
    pub colorcount: Option<i64>,
    pub rank: Option<i64>,
    pub datebegin: Option<i64>,
    pub dateend: Option<i64>,

    pub colors: Option<Vec<RawColor>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawColor {
    pub color: Option<String>,
    pub spectrum: Option<String>,
    pub hue: Option<String>,
    pub percent: Option<f64>,
    pub css3: Option<String>,
}
