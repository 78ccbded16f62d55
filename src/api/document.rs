//! JSON form of a bullet graph document.
//!
//! The shape mirrors the markup documents bullet graphs are traditionally
//! described with: a root carrying `top`/`left`/`right`/`title`, a repeated
//! `bdata` row element and a repeated `note` element.
//!
//! ```json
//! {
//!   "title": "2024 Sales",
//!   "left": 250,
//!   "bdata": [
//!     { "title": "Revenue", "subtitle": "USD(1000)", "scale": "0,300,50",
//!       "qmeasure": "150,225", "cmeasure": 250, "measure": 275 }
//!   ],
//!   "note": ["Source: finance"]
//! }
//! ```

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::core::ChartDefinition;
use crate::error::{BulletGraphError, BulletGraphResult};

use super::engine::BulletGraph;
use super::options::{MarginPolicy, RenderOptions};

/// A note line; accepts either a bare string or `{ "text": "..." }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NoteEntry {
    Text(String),
    Element { text: String },
}

impl NoteEntry {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Text(text) | Self::Element { text } => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BulletGraphDocument {
    /// Root margins. `0` means "default", as in the markup format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<u32>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default)]
    pub options: Option<RenderOptions>,
    #[serde(default, rename = "bdata")]
    pub charts: Vec<ChartDefinition>,
    #[serde(default, rename = "note")]
    pub notes: Vec<NoteEntry>,
}

impl BulletGraphDocument {
    pub fn from_json_str(input: &str) -> BulletGraphResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| BulletGraphError::Document(format!("invalid bullet graph json: {e}")))
    }

    pub fn from_reader<R: Read>(reader: R) -> BulletGraphResult<Self> {
        serde_json::from_reader(reader)
            .map_err(|e| BulletGraphError::Document(format!("invalid bullet graph json: {e}")))
    }

    pub fn to_json_pretty(&self) -> BulletGraphResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            BulletGraphError::Document(format!("failed to serialize bullet graph json: {e}"))
        })
    }

    /// Builds the renderable graph. Root attributes override the embedded
    /// options, and root margins follow [`MarginPolicy::ZeroMeansDefault`].
    #[must_use]
    pub fn into_bullet_graph(self) -> BulletGraph {
        let mut options = self.options.unwrap_or_default();
        let root_has_margins = self.top.is_some() || self.left.is_some() || self.right.is_some();
        if root_has_margins {
            options.margin_policy = MarginPolicy::ZeroMeansDefault;
        }
        if self.top.is_some() {
            options.margins.top = self.top;
        }
        if self.left.is_some() {
            options.margins.left = self.left;
        }
        if self.right.is_some() {
            options.margins.right = self.right;
        }
        if !self.title.is_empty() {
            options.title = self.title;
        }

        BulletGraph {
            options,
            charts: self.charts,
            notes: self
                .notes
                .into_iter()
                .map(|note| match note {
                    NoteEntry::Text(text) | NoteEntry::Element { text } => text,
                })
                .collect(),
        }
    }
}

impl From<&BulletGraph> for BulletGraphDocument {
    fn from(graph: &BulletGraph) -> Self {
        Self {
            top: None,
            left: None,
            right: None,
            title: String::new(),
            options: Some(graph.options.clone()),
            charts: graph.charts.clone(),
            notes: graph.notes.iter().cloned().map(NoteEntry::Text).collect(),
        }
    }
}
