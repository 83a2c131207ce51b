//! Fixed vocabulary of trigger keys
//!
//! The config file stores keys as short string identifiers (`alt_l`, `esc`,
//! ...). This module maps those identifiers to evdev key codes and to the
//! human-readable labels used by the settings window.

use evdev::Key;
use tracing::warn;

/// A key the user may bind as start or exit trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKey {
    AltLeft,
    AltRight,
    CtrlLeft,
    CtrlRight,
    ShiftLeft,
    ShiftRight,
    Escape,
    Space,
    Enter,
}

/// Keys offered by the start-key dropdown
pub const START_CHOICES: &[TriggerKey] = &[
    TriggerKey::AltLeft,
    TriggerKey::AltRight,
    TriggerKey::CtrlLeft,
    TriggerKey::CtrlRight,
    TriggerKey::ShiftLeft,
    TriggerKey::ShiftRight,
    TriggerKey::Space,
    TriggerKey::Enter,
];

/// Keys offered by the exit-key dropdown
pub const EXIT_CHOICES: &[TriggerKey] = &[TriggerKey::Escape, TriggerKey::Space, TriggerKey::Enter];

impl TriggerKey {
    /// Parse a config identifier. Returns None for names outside the vocabulary.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "alt_l" => Some(Self::AltLeft),
            "alt_r" => Some(Self::AltRight),
            "ctrl_l" => Some(Self::CtrlLeft),
            "ctrl_r" => Some(Self::CtrlRight),
            "shift_l" => Some(Self::ShiftLeft),
            "shift_r" => Some(Self::ShiftRight),
            "esc" | "escape" => Some(Self::Escape),
            "space" => Some(Self::Space),
            "enter" | "return" => Some(Self::Enter),
            _ => None,
        }
    }

    /// Parse a config identifier, falling back to the given default for
    /// unknown names (the original tool's behavior).
    pub fn from_name_or(name: &str, fallback: Self) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            warn!(key = %name, fallback = %fallback.name(), "Unknown key name in config, using fallback");
            fallback
        })
    }

    /// Canonical config identifier
    pub fn name(&self) -> &'static str {
        match self {
            Self::AltLeft => "alt_l",
            Self::AltRight => "alt_r",
            Self::CtrlLeft => "ctrl_l",
            Self::CtrlRight => "ctrl_r",
            Self::ShiftLeft => "shift_l",
            Self::ShiftRight => "shift_r",
            Self::Escape => "esc",
            Self::Space => "space",
            Self::Enter => "enter",
        }
    }

    /// Label shown in the settings dropdowns
    pub fn label(&self) -> &'static str {
        match self {
            Self::AltLeft => "Alt L",
            Self::AltRight => "Alt R",
            Self::CtrlLeft => "Ctrl L",
            Self::CtrlRight => "Ctrl R",
            Self::ShiftLeft => "Shift L",
            Self::ShiftRight => "Shift R",
            Self::Escape => "Esc",
            Self::Space => "Space",
            Self::Enter => "Enter",
        }
    }

    /// Matching evdev key code
    pub fn key(&self) -> Key {
        match self {
            Self::AltLeft => Key::KEY_LEFTALT,
            Self::AltRight => Key::KEY_RIGHTALT,
            Self::CtrlLeft => Key::KEY_LEFTCTRL,
            Self::CtrlRight => Key::KEY_RIGHTCTRL,
            Self::ShiftLeft => Key::KEY_LEFTSHIFT,
            Self::ShiftRight => Key::KEY_RIGHTSHIFT,
            Self::Escape => Key::KEY_ESC,
            Self::Space => Key::KEY_SPACE,
            Self::Enter => Key::KEY_ENTER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_names() {
        assert_eq!(TriggerKey::from_name("alt_l"), Some(TriggerKey::AltLeft));
        assert_eq!(TriggerKey::from_name("shift_r"), Some(TriggerKey::ShiftRight));
        assert_eq!(TriggerKey::from_name("esc"), Some(TriggerKey::Escape));
        assert_eq!(TriggerKey::from_name("space"), Some(TriggerKey::Space));
    }

    #[test]
    fn test_parse_aliases_and_whitespace() {
        // escape/return aliases and sloppy input from hand-edited configs
        assert_eq!(TriggerKey::from_name("escape"), Some(TriggerKey::Escape));
        assert_eq!(TriggerKey::from_name("return"), Some(TriggerKey::Enter));
        assert_eq!(TriggerKey::from_name("  ALT_L "), Some(TriggerKey::AltLeft));
    }

    #[test]
    fn test_parse_unknown_returns_none() {
        assert_eq!(TriggerKey::from_name("q"), None);
        assert_eq!(TriggerKey::from_name(""), None);
        assert_eq!(TriggerKey::from_name("alt"), None);
    }

    #[test]
    fn test_fallback_for_unknown() {
        assert_eq!(
            TriggerKey::from_name_or("not_a_key", TriggerKey::AltLeft),
            TriggerKey::AltLeft
        );
        assert_eq!(
            TriggerKey::from_name_or("ctrl_r", TriggerKey::AltLeft),
            TriggerKey::CtrlRight
        );
    }

    #[test]
    fn test_name_roundtrip() {
        for key in START_CHOICES.iter().chain(EXIT_CHOICES) {
            assert_eq!(TriggerKey::from_name(key.name()), Some(*key));
        }
    }

    #[test]
    fn test_evdev_mapping() {
        assert_eq!(TriggerKey::AltLeft.key(), Key::KEY_LEFTALT);
        assert_eq!(TriggerKey::Escape.key(), Key::KEY_ESC);
        assert_eq!(TriggerKey::Enter.key(), Key::KEY_ENTER);
    }
}
