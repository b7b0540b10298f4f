//! Node palette: searchable registry listing and drag payloads.

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use wfc_core::registry::{self, Category, NodeType, NodeTypeInfo};

/// Drag-data key under which the palette stores a node-type string.
pub const NODE_TYPE_MIME: &str = "application/reactflow";

// ─── Drag payload ────────────────────────────────────────────────────────

/// Drag data of an external drop, keyed by MIME type like a browser
/// `DataTransfer`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragPayload {
    entries: Vec<(String, String)>,
}

impl DragPayload {
    /// Payload the palette attaches when a node type is dragged out.
    pub fn node(kind: NodeType) -> Self {
        let mut payload = Self::default();
        payload.set(NODE_TYPE_MIME, kind.as_str());
        payload
    }

    pub fn set(&mut self, mime: &str, data: &str) {
        match self.entries.iter_mut().find(|(m, _)| m == mime) {
            Some((_, d)) => *d = data.to_owned(),
            None => self.entries.push((mime.to_owned(), data.to_owned())),
        }
    }

    pub fn get(&self, mime: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(m, _)| m == mime)
            .map(|(_, d)| d.as_str())
    }

    /// The dragged node type, if the payload carries a known one.
    pub fn node_type(&self) -> Option<NodeType> {
        let raw = self.get(NODE_TYPE_MIME)?;
        match raw.parse() {
            Ok(kind) => Some(kind),
            Err(err) => {
                log::debug!("ignoring drop: {err}");
                None
            }
        }
    }
}

// ─── Search ──────────────────────────────────────────────────────────────

pub struct Palette {
    matcher: SkimMatcherV2,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

impl Palette {
    pub fn new() -> Self {
        Self {
            matcher: SkimMatcherV2::default(),
        }
    }

    /// Node types matching `query`, best match first. Label matches count
    /// double. A blank query lists everything in palette order.
    pub fn search(&self, query: &str) -> Vec<&'static NodeTypeInfo> {
        let query = query.trim();
        if query.is_empty() {
            return NodeType::ALL.iter().map(|t| t.info()).collect();
        }
        let mut scored: Vec<(i64, &'static NodeTypeInfo)> = NodeType::ALL
            .iter()
            .map(|t| t.info())
            .filter_map(|info| self.score(info, query).map(|s| (s, info)))
            .collect();
        // Stable: ties keep palette order.
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().map(|(_, info)| info).collect()
    }

    fn score(&self, info: &NodeTypeInfo, query: &str) -> Option<i64> {
        let label = fuzzy_match_score(&self.matcher, info.label, query).map(|s| s * 2);
        let description = fuzzy_match_score(&self.matcher, info.description, query);
        let tags = info
            .tags
            .iter()
            .filter_map(|tag| fuzzy_match_score(&self.matcher, tag, query))
            .max();
        [label, description, tags].into_iter().flatten().max()
    }

    /// Registry grouped by category, for the sectioned palette view.
    pub fn by_category(&self) -> Vec<(Category, Vec<&'static NodeTypeInfo>)> {
        Category::ALL
            .iter()
            .map(|c| (*c, registry::types_in(*c).collect()))
            .collect()
    }
}

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}
