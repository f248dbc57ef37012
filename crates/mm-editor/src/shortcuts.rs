//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s. Node actions
//! only apply when a node is selected and no text edit is active; the
//! session enforces that.

use crate::input::Modifiers;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── Node ──
    Delete,
    EditText,
    Duplicate,
    /// Start a connection from the selected node.
    StartConnect,

    // ── View ──
    ZoomIn,
    ZoomOut,
    ResetView,

    // ── UI ──
    /// Clear the selection and cancel any in-progress connection.
    Deselect,
}

/// Resolves key events into shortcut actions.
///
/// Uses platform-aware modifier detection: on macOS `meta` is ⌘,
/// on other platforms `ctrl` serves the same role.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"d"`, `"Delete"`).
    /// Returns `None` if the key combo has no binding.
    pub fn resolve(key: &str, modifiers: &Modifiers) -> Option<ShortcutAction> {
        if modifiers.command() {
            return match key {
                "d" | "D" => Some(ShortcutAction::Duplicate),
                "=" | "+" => Some(ShortcutAction::ZoomIn),
                "-" => Some(ShortcutAction::ZoomOut),
                "0" => Some(ShortcutAction::ResetView),
                _ => None,
            };
        }

        match key {
            "Delete" | "Backspace" => Some(ShortcutAction::Delete),
            "Enter" => Some(ShortcutAction::EditText),
            "Escape" => Some(ShortcutAction::Deselect),
            "l" | "L" if !modifiers.alt => Some(ShortcutAction::StartConnect),
            _ => None,
        }
    }
}
