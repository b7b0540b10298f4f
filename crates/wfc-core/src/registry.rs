//! Static node-type registry.
//!
//! Every node type is a variant of the closed [`NodeType`] enum; the display
//! metadata and configuration-field schema live in a lookup table keyed by
//! that variant. Adding a type means adding a variant and a table entry,
//! never touching interaction code.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ─── Node types ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Trigger,
    Webhook,
    Schedule,
    Http,
    Email,
    Database,
    Code,
    Filter,
    Merge,
}

impl NodeType {
    /// Palette order.
    pub const ALL: [NodeType; 9] = [
        NodeType::Trigger,
        NodeType::Webhook,
        NodeType::Schedule,
        NodeType::Http,
        NodeType::Email,
        NodeType::Database,
        NodeType::Code,
        NodeType::Filter,
        NodeType::Merge,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Trigger => "trigger",
            NodeType::Webhook => "webhook",
            NodeType::Schedule => "schedule",
            NodeType::Http => "http",
            NodeType::Email => "email",
            NodeType::Database => "database",
            NodeType::Code => "code",
            NodeType::Filter => "filter",
            NodeType::Merge => "merge",
        }
    }

    pub fn info(&self) -> &'static NodeTypeInfo {
        &REGISTRY[*self as usize]
    }

    /// Whether connections may target this type. Triggers start a workflow
    /// and have no input pin.
    pub fn accepts_input(&self) -> bool {
        self.info().has_input
    }

    /// Initial parameter map, one entry per field that declares a default.
    pub fn default_parameters(&self) -> Map<String, Value> {
        self.info()
            .fields
            .iter()
            .filter_map(|f| f.default.map(|d| (f.name.to_owned(), Value::from(d))))
            .collect()
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown node type `{0}`")]
pub struct UnknownNodeType(pub String);

impl FromStr for NodeType {
    type Err = UnknownNodeType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownNodeType(s.to_owned()))
    }
}

// ─── Metadata ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Triggers,
    Actions,
    Logic,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Triggers, Category::Actions, Category::Logic];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Triggers => "Triggers",
            Category::Actions => "Actions",
            Category::Logic => "Logic",
        }
    }
}

/// Widget kind used by a property editor to render a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Textarea,
    Select,
    Switch,
    Code,
    Secret,
}

/// Which panel section a field is shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldSection {
    Basic,
    Advanced,
    Credentials,
}

/// One configurable parameter of a node type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Key into `NodeData::parameters`.
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    /// Choices for `Select` fields; empty otherwise.
    pub options: &'static [&'static str],
    pub required: bool,
    pub default: Option<&'static str>,
    pub section: FieldSection,
}

/// Display metadata and field schema of one node type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeTypeInfo {
    pub kind: NodeType,
    /// Default label for new nodes and palette entry title.
    pub label: &'static str,
    pub description: &'static str,
    /// Icon identifier understood by the host UI.
    pub icon: &'static str,
    /// Accent color as `#RRGGBB`.
    pub color: &'static str,
    pub category: Category,
    /// Extra search terms for the palette.
    pub tags: &'static [&'static str],
    pub has_input: bool,
    pub fields: &'static [FieldSpec],
}

impl NodeTypeInfo {
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

// ─── Table ───────────────────────────────────────────────────────────────

const HTTP_METHODS: &[&str] = &["GET", "POST", "PUT", "DELETE"];

const fn field(
    name: &'static str,
    label: &'static str,
    kind: FieldKind,
    required: bool,
    section: FieldSection,
) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind,
        options: &[],
        required,
        default: None,
        section,
    }
}

const fn select(
    name: &'static str,
    label: &'static str,
    options: &'static [&'static str],
    default: &'static str,
) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind: FieldKind::Select,
        options,
        required: true,
        default: Some(default),
        section: FieldSection::Basic,
    }
}

/// Indexed by `NodeType as usize`; order must match the enum.
static REGISTRY: [NodeTypeInfo; 9] = [
    NodeTypeInfo {
        kind: NodeType::Trigger,
        label: "Trigger",
        description: "Start workflow",
        icon: "zap",
        color: "#22c55e",
        category: Category::Triggers,
        tags: &["start", "manual", "begin"],
        has_input: false,
        fields: &[],
    },
    NodeTypeInfo {
        kind: NodeType::Webhook,
        label: "Webhook",
        description: "HTTP webhook",
        icon: "webhook",
        color: "#3b82f6",
        category: Category::Triggers,
        tags: &["http", "callback", "listen"],
        has_input: true,
        fields: &[
            field("url", "Webhook URL", FieldKind::Text, true, FieldSection::Basic),
            select("method", "HTTP Method", HTTP_METHODS, "POST"),
        ],
    },
    NodeTypeInfo {
        kind: NodeType::Schedule,
        label: "Schedule",
        description: "Time-based trigger",
        icon: "calendar",
        color: "#a855f7",
        category: Category::Triggers,
        tags: &["cron", "timer", "interval"],
        has_input: true,
        fields: &[
            field("cron", "Cron Expression", FieldKind::Text, true, FieldSection::Basic),
            FieldSpec {
                default: Some("UTC"),
                ..field("timezone", "Timezone", FieldKind::Text, false, FieldSection::Advanced)
            },
        ],
    },
    NodeTypeInfo {
        kind: NodeType::Http,
        label: "HTTP Request",
        description: "Make HTTP calls",
        icon: "globe",
        color: "#f97316",
        category: Category::Actions,
        tags: &["api", "rest", "fetch", "request"],
        has_input: true,
        fields: &[
            field("url", "URL", FieldKind::Text, true, FieldSection::Basic),
            select("method", "Method", HTTP_METHODS, "GET"),
            field("headers", "Headers (JSON)", FieldKind::Textarea, false, FieldSection::Advanced),
        ],
    },
    NodeTypeInfo {
        kind: NodeType::Email,
        label: "Email",
        description: "Send emails",
        icon: "mail",
        color: "#ef4444",
        category: Category::Actions,
        tags: &["smtp", "mail", "notify"],
        has_input: true,
        fields: &[
            field("to", "To Email", FieldKind::Text, true, FieldSection::Basic),
            field("subject", "Subject", FieldKind::Text, false, FieldSection::Basic),
            field("body", "Email Body", FieldKind::Textarea, false, FieldSection::Basic),
        ],
    },
    NodeTypeInfo {
        kind: NodeType::Database,
        label: "Database",
        description: "Database operations",
        icon: "database",
        color: "#6366f1",
        category: Category::Actions,
        tags: &["sql", "query", "postgres", "mysql"],
        has_input: true,
        fields: &[
            field("query", "SQL Query", FieldKind::Textarea, true, FieldSection::Basic),
            field(
                "connection",
                "Connection String",
                FieldKind::Secret,
                false,
                FieldSection::Credentials,
            ),
        ],
    },
    NodeTypeInfo {
        kind: NodeType::Code,
        label: "Code",
        description: "Execute code",
        icon: "code",
        color: "#ca8a04",
        category: Category::Actions,
        tags: &["script", "javascript", "python", "function"],
        has_input: true,
        fields: &[
            select("language", "Language", &["javascript", "python"], "javascript"),
            field("code", "Code", FieldKind::Code, true, FieldSection::Basic),
        ],
    },
    NodeTypeInfo {
        kind: NodeType::Filter,
        label: "Filter",
        description: "Filter data",
        icon: "filter",
        color: "#14b8a6",
        category: Category::Logic,
        tags: &["condition", "if", "where"],
        has_input: true,
        fields: &[field(
            "condition",
            "Filter Condition",
            FieldKind::Text,
            true,
            FieldSection::Basic,
        )],
    },
    NodeTypeInfo {
        kind: NodeType::Merge,
        label: "Merge",
        description: "Merge data",
        icon: "git-merge",
        color: "#ec4899",
        category: Category::Logic,
        tags: &["join", "combine"],
        has_input: true,
        fields: &[],
    },
];

/// Registry entries of one category, in palette order.
pub fn types_in(category: Category) -> impl Iterator<Item = &'static NodeTypeInfo> {
    REGISTRY.iter().filter(move |info| info.category == category)
}
