use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::{json, Value};

use crate::api::client::PageSource;
use crate::api::error::FetchError;
use crate::api::models::SearchPage;

/// In-memory page source serving canned JSON bodies, page 1 first.
/// Pages past the end answer with an empty object.
pub struct FakePageSource {
    pages: Vec<Value>,
    failures: HashMap<u32, u16>,
    requests: RefCell<Vec<(String, u32)>>,
}

impl FakePageSource {
    pub fn new(pages: Vec<Value>) -> Self {
        Self {
            pages,
            failures: HashMap::new(),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Answer `page` with the given HTTP status instead of a body.
    pub fn fail_on_page(mut self, page: u32, status: u16) -> Self {
        self.failures.insert(page, status);
        self
    }

    pub fn requested_pages(&self) -> Vec<u32> {
        self.requests.borrow().iter().map(|(_, page)| *page).collect()
    }

    pub fn requested_classifications(&self) -> Vec<String> {
        self.requests.borrow().iter().map(|(c, _)| c.clone()).collect()
    }
}

impl PageSource for FakePageSource {
    fn fetch_page(&self, classification: &str, page: u32) -> Result<SearchPage, FetchError> {
        self.requests
            .borrow_mut()
            .push((classification.to_string(), page));

        if let Some(status) = self.failures.get(&page) {
            return Err(FetchError::Status {
                page,
                status: *status,
            });
        }

        let body = self
            .pages
            .get(page as usize - 1)
            .cloned()
            .unwrap_or_else(|| json!({}));

        serde_json::from_value(body).map_err(|source| FetchError::Decode { page, source })
    }
}

/// A search response body wrapping `records`.
pub fn page_json(records: Vec<Value>, has_next: bool) -> Value {
    let next = if has_next {
        json!("https://api.example.org/object?page=next")
    } else {
        Value::Null
    };
    json!({
        "info": { "next": next },
        "records": records,
    })
}

/// A raw artifact with `color_count` color entries. `None` culture leaves the
/// field out of the document entirely.
pub fn artifact_json(
    id: i64,
    classification: &str,
    culture: Option<&str>,
    color_count: usize,
) -> Value {
    let colors: Vec<Value> = (0..color_count)
        .map(|i| {
            let hue = if i % 2 == 0 { "Grey" } else { "Brown" };
            let percent = 10.0 + i as f64;
            json!({
                "color": format!("#{:06x}", i * 1111),
                "spectrum": "#1eb264",
                "hue": hue,
                "percent": percent,
                "css3": "#808080",
            })
        })
        .collect();

    let mut record = json!({
        "id": id,
        "title": format!("Artifact {id}"),
        "period": "Archaic",
        "century": "11th century",
        "medium": "Bronze",
        "department": "Department of Ancient and Byzantine Art & Numismatics",
        "classification": classification,
        "accessionyear": 1900 + (id % 100),
        "accessionmethod": "Gift",
        "imagecount": 2,
        "mediacount": 1,
        "colorcount": color_count,
        "rank": id,
        "datebegin": 1500,
        "dateend": 1600,
        "colors": colors,
    });

    if let (Some(culture), Some(map)) = (culture, record.as_object_mut()) {
        map.insert("culture".to_string(), json!(culture));
    }
    record
}
