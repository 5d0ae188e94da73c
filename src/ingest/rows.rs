use rusqlite::types::Value;

use crate::export::table::{integer, real, text, TableRow};

/// Descriptive fields of one artifact; `id` is the primary key.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataRow {
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
}

/// Image and media statistics; exactly one per artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaRow {
    pub objectid: i64,
    pub imagecount: Option<i64>,
    pub mediacount: Option<i64>,
    pub colorcount: Option<i64>,
    pub ranknum: Option<i64>,
    pub datebegin: Option<i64>,
    pub dateend: Option<i64>,
}

/// One color annotation of an artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorRow {
    pub objectid: i64,
    pub color: Option<String>,
    pub spectrum: Option<String>,
    pub hue: Option<String>,
    pub percent: Option<f64>,
    pub css3: Option<String>,
}

impl TableRow for MetadataRow {
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "title",
        "culture",
        "period",
        "century",
        "medium",
        "dimensions",
        "description",
        "department",
        "classification",
        "accessionyear",
        "accessionmethod",
    ];

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Integer(self.id),
            text(&self.title),
            text(&self.culture),
            text(&self.period),
            text(&self.century),
            text(&self.medium),
            text(&self.dimensions),
            text(&self.description),
            text(&self.department),
            text(&self.classification),
            integer(self.accessionyear),
            text(&self.accessionmethod),
        ]
    }
}

impl TableRow for MediaRow {
    const COLUMNS: &'static [&'static str] = &[
        "objectid",
        "imagecount",
        "mediacount",
        "colorcount",
        "ranknum",
        "datebegin",
        "dateend",
    ];

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Integer(self.objectid),
            integer(self.imagecount),
            integer(self.mediacount),
            integer(self.colorcount),
            integer(self.ranknum),
            integer(self.datebegin),
            integer(self.dateend),
        ]
    }
}

impl TableRow for ColorRow {
    const COLUMNS: &'static [&'static str] =
        &["objectid", "color", "spectrum", "hue", "percent", "css3"];

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Integer(self.objectid),
            text(&self.color),
            text(&self.spectrum),
            text(&self.hue),
            real(self.percent),
            text(&self.css3),
        ]
    }
}
