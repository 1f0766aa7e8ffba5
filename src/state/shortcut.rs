//! Keyboard shortcut mapping

use serde::Serialize;

/// Action bound to a keyboard shortcut
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Shortcut {
    ToggleRunning,
    Reset,
    Skip,
    /// The client opens its task editor; nothing changes server side
    EditTask,
}

impl Shortcut {
    /// Map a `KeyboardEvent.code` value; all shortcuts are suppressed while a
    /// text field has focus.
    pub fn from_key(code: &str, input_focused: bool) -> Option<Self> {
        if input_focused {
            return None;
        }
        match code {
            "Space" => Some(Shortcut::ToggleRunning),
            "KeyR" => Some(Shortcut::Reset),
            "KeyS" => Some(Shortcut::Skip),
            "KeyT" => Some(Shortcut::EditTask),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_bound_keys() {
        assert_eq!(Shortcut::from_key("Space", false), Some(Shortcut::ToggleRunning));
        assert_eq!(Shortcut::from_key("KeyR", false), Some(Shortcut::Reset));
        assert_eq!(Shortcut::from_key("KeyS", false), Some(Shortcut::Skip));
        assert_eq!(Shortcut::from_key("KeyT", false), Some(Shortcut::EditTask));
        assert_eq!(Shortcut::from_key("KeyQ", false), None);
    }

    #[test]
    fn suppressed_while_typing() {
        assert_eq!(Shortcut::from_key("Space", true), None);
        assert_eq!(Shortcut::from_key("KeyS", true), None);
    }
}
