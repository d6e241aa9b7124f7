//! Keyboard input types passed through to drivers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A key for keyboard events: either a character or a raw key code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Printable character
    Char(char),
    /// Numeric key code
    Code(u32),
}

impl Key {
    /// Create a character key
    #[must_use]
    pub const fn char(c: char) -> Self {
        Self::Char(c)
    }

    /// Create a key-code key
    #[must_use]
    pub const fn code(code: u32) -> Self {
        Self::Code(code)
    }
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}

impl From<u32> for Key {
    fn from(code: u32) -> Self {
        Self::Code(code)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{c}"),
            Self::Code(code) => write!(f, "#{code}"),
        }
    }
}

/// Modifier held while a key event is dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyModifier {
    /// Control
    Ctrl,
    /// Alt / Option
    Alt,
    /// Shift
    Shift,
    /// Meta / Command
    Meta,
}

impl KeyModifier {
    /// Get the modifier name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ctrl => "ctrl",
            Self::Alt => "alt",
            Self::Shift => "shift",
            Self::Meta => "meta",
        }
    }
}

impl fmt::Display for KeyModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
