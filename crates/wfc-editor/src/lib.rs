pub mod config;
pub mod editor;
pub mod hit;
pub mod history;
pub mod input;
pub mod interaction;
pub mod minimap;
pub mod palette;
pub mod shortcuts;

pub use config::{ConfigError, EditorConfig};
pub use editor::WorkflowEditor;
pub use hit::{Hit, PinKind};
pub use history::History;
pub use input::{InputEvent, Modifiers};
pub use interaction::{CanvasEffect, CanvasMode, CanvasTool, Gesture, Interaction};
pub use minimap::{MinimapMarker, MinimapProjection};
pub use palette::{DragPayload, NODE_TYPE_MIME, Palette};
pub use shortcuts::{ShortcutAction, ShortcutMap};
