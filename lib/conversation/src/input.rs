//! Input gate and composer behavior.
//!
//! Decides whether typed text may be dispatched, what the Enter key does,
//! and how tall the composer should be.

use crate::error::InputRejected;

/// Trims `raw` and checks it may be dispatched.
///
/// # Errors
///
/// Returns [`InputRejected::Empty`] for blank input and
/// [`InputRejected::Pending`] while a query is in flight.
pub fn gate(raw: &str, pending: bool) -> Result<&str, InputRejected> {
    let query = raw.trim();
    if query.is_empty() {
        return Err(InputRejected::Empty);
    }
    if pending {
        return Err(InputRejected::Pending);
    }
    Ok(query)
}

/// Modifier keys held during a key press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// No modifier held.
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Shift only.
    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
        alt: false,
        meta: false,
    };

    #[must_use]
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

/// What the composer does with a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Submit the current input.
    Submit,
    /// Insert a line break.
    NewLine,
    /// Not the gate's business.
    Ignore,
}

/// Maps a key press to a composer action.
///
/// `key` uses DOM `KeyboardEvent.key` naming.
#[must_use]
pub fn key_action(key: &str, modifiers: Modifiers) -> KeyAction {
    match key {
        "Enter" if modifiers.any() => KeyAction::NewLine,
        "Enter" => KeyAction::Submit,
        _ => KeyAction::Ignore,
    }
}

/// Height policy for the auto-growing composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputSizing {
    /// Smallest height in pixels, one line.
    pub min_px: u32,
    /// Largest height in pixels; the composer scrolls beyond it.
    pub max_px: u32,
}

impl Default for InputSizing {
    fn default() -> Self {
        Self {
            min_px: 44,
            max_px: 128,
        }
    }
}

impl InputSizing {
    /// Returns the composer height for the given content height.
    #[must_use]
    pub fn height_for(&self, content_px: u32) -> u32 {
        content_px.clamp(self.min_px, self.max_px.max(self.min_px))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_trims_input() {
        assert_eq!(gate("  What changed?\n", false), Ok("What changed?"));
    }

    #[test]
    fn gate_rejects_blank_input() {
        assert_eq!(gate("", false), Err(InputRejected::Empty));
        assert_eq!(gate(" \t\n ", false), Err(InputRejected::Empty));
    }

    #[test]
    fn gate_rejects_while_pending() {
        assert_eq!(gate("hello", true), Err(InputRejected::Pending));
    }

    #[test]
    fn enter_submits_only_without_modifiers() {
        assert_eq!(key_action("Enter", Modifiers::NONE), KeyAction::Submit);
        assert_eq!(key_action("Enter", Modifiers::SHIFT), KeyAction::NewLine);
        for modifiers in [
            Modifiers {
                ctrl: true,
                ..Modifiers::NONE
            },
            Modifiers {
                alt: true,
                ..Modifiers::NONE
            },
            Modifiers {
                meta: true,
                ..Modifiers::NONE
            },
        ] {
            assert_eq!(key_action("Enter", modifiers), KeyAction::NewLine);
        }
    }

    #[test]
    fn other_keys_are_ignored() {
        assert_eq!(key_action("a", Modifiers::NONE), KeyAction::Ignore);
        assert_eq!(key_action("Tab", Modifiers::SHIFT), KeyAction::Ignore);
    }

    #[test]
    fn sizing_clamps_height() {
        let sizing = InputSizing::default();
        assert_eq!(sizing.height_for(0), 44);
        assert_eq!(sizing.height_for(80), 80);
        assert_eq!(sizing.height_for(500), 128);
    }
}
