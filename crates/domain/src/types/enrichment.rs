//! Summarizer request/response types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body posted to the summarization endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub name: String,
    pub title: String,
    pub description: String,
}

/// Document links returned by the summarizer. Unknown keys are preserved so
/// they can be echoed back to the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docx: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SummaryLinks {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.docx.is_none() && self.json.is_none() && self.extra.is_empty()
    }

    /// Preferred retrieval link: the document, else the JSON export.
    #[must_use]
    pub fn rag_url(&self) -> Option<&str> {
        self.docx.as_deref().or(self.json.as_deref())
    }
}

/// Advisory result of a summarization call. `Default` is the "not
/// configured" value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Enrichment {
    pub links: SummaryLinks,
    pub rag_url: Option<String>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub raw: Value,
}

impl Enrichment {
    /// Build from a raw summarizer response.
    #[must_use]
    pub fn from_response(raw: Value) -> Self {
        let links: SummaryLinks = raw
            .get("links")
            .filter(|l| l.is_object())
            .and_then(|l| serde_json::from_value(l.clone()).ok())
            .unwrap_or_default();
        let rag_url = links.rag_url().map(str::to_string);
        Self { links, rag_url, raw }
    }

    /// Nothing worth writing back to the job.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rag_url.is_none() && self.links.is_empty()
    }
}
