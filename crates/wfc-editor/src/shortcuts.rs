//! Canvas key bindings.
//!
//! The host forwards raw key events; [`ShortcutMap::resolve`] turns a key
//! plus modifiers into a [`ShortcutAction`] the editor runs.

use crate::input::Modifiers;

/// Editor commands reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── Tools ──
    ToolSelect,
    ToolPan,

    // ── Graph ──
    Undo,
    Redo,
    /// Delete the selected nodes.
    Delete,
    SelectAll,
    /// Group the current selection.
    Group,
    /// Clear selection and abandon any gesture in progress.
    Cancel,

    // ── Viewport ──
    ZoomIn,
    ZoomOut,
    ZoomToFit,
}

/// Stateless key binding table.
///
/// Command combos accept either Ctrl or ⌘ so one table serves every
/// platform.
pub struct ShortcutMap;

impl ShortcutMap {
    /// `key` is a `KeyboardEvent.key` value such as `"g"` or `"Escape"`.
    /// Unbound combos give `None`.
    pub fn resolve(key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        let key = if key.chars().count() == 1 {
            key.to_ascii_lowercase()
        } else {
            key.to_owned()
        };

        if modifiers.command() {
            return match (key.as_str(), modifiers.shift) {
                ("z", true) => Some(ShortcutAction::Redo),
                ("z", false) => Some(ShortcutAction::Undo),
                ("y", false) => Some(ShortcutAction::Redo),
                ("a", false) => Some(ShortcutAction::SelectAll),
                ("g", false) => Some(ShortcutAction::Group),
                ("=" | "+", _) => Some(ShortcutAction::ZoomIn),
                ("-", false) => Some(ShortcutAction::ZoomOut),
                ("0", false) => Some(ShortcutAction::ZoomToFit),
                _ => None,
            };
        }

        let plain = !modifiers.shift && !modifiers.alt;
        match key.as_str() {
            "Delete" | "Backspace" => Some(ShortcutAction::Delete),
            "Escape" => Some(ShortcutAction::Cancel),
            "v" if plain => Some(ShortcutAction::ToolSelect),
            "h" if plain => Some(ShortcutAction::ToolPan),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ShortcutAction::*;

    const CMD: Modifiers = Modifiers {
        meta: true,
        ..Modifiers::NONE
    };

    const CMD_SHIFT: Modifiers = Modifiers {
        meta: true,
        shift: true,
        ..Modifiers::NONE
    };

    const CTRL_SHIFT: Modifiers = Modifiers {
        ctrl: true,
        shift: true,
        ..Modifiers::NONE
    };

    #[test]
    fn bound_combos() {
        let cases = [
            ("v", Modifiers::NONE, ToolSelect),
            ("h", Modifiers::NONE, ToolPan),
            ("z", Modifiers::CTRL, Undo),
            ("z", CMD, Undo),
            // Browsers report the shifted letter in upper case.
            ("Z", CMD_SHIFT, Redo),
            ("z", CTRL_SHIFT, Redo),
            ("y", Modifiers::CTRL, Redo),
            ("a", CMD, SelectAll),
            ("g", Modifiers::CTRL, Group),
            ("Delete", Modifiers::NONE, Delete),
            ("Backspace", Modifiers::NONE, Delete),
            ("Escape", Modifiers::NONE, Cancel),
            ("=", CMD, ZoomIn),
            ("+", CMD_SHIFT, ZoomIn),
            ("-", Modifiers::CTRL, ZoomOut),
            ("0", CMD, ZoomToFit),
        ];
        for (key, modifiers, action) in cases {
            assert_eq!(
                ShortcutMap::resolve(key, modifiers),
                Some(action),
                "{key} with {modifiers:?}"
            );
        }
    }

    #[test]
    fn unbound_combos() {
        for (key, modifiers) in [
            ("q", Modifiers::NONE),
            ("a", Modifiers::NONE),
            ("g", CMD_SHIFT),
            ("V", Modifiers::SHIFT),
            ("0", Modifiers::NONE),
        ] {
            assert_eq!(ShortcutMap::resolve(key, modifiers), None, "{key}");
        }
    }
}
