pub mod document;
pub mod geometry;
pub mod id;
pub mod lint;
pub mod model;
pub mod ops;
pub mod registry;

pub use document::{DocumentError, DocumentMetadata, WorkflowDocument};
pub use geometry::{Point, Rect, Size, Viewport, ZoomLimits};
pub use id::{ConnectionId, GroupId, NodeId};
pub use lint::{LintDiagnostic, LintSeverity, lint_workflow};
pub use model::*;
pub use ops::{AlignDirection, ConnectRejection, NodeUpdate};
pub use registry::{Category, FieldKind, FieldSection, FieldSpec, NodeType, NodeTypeInfo};
