//! ANSI color codes for terminal output.
//!
//! Four semantic colors with orthogonal dim modifier:
//! - Blue: transducer/effector/field names
//! - Green: string and byte-literal content
//! - Dim: structure, ordinals, metadata
//! - Reset: return to default

/// ANSI color palette for CLI output (`decompile`, `map`).
///
/// Uses only standard 16-color ANSI codes (no RGB), so it reads the same in
/// light and dark terminal themes.
#[derive(Clone, Copy, Debug)]
pub struct Colors {
    pub blue: &'static str,
    pub green: &'static str,
    pub dim: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    /// Colors enabled (ANSI escape codes).
    pub const ON: Self = Self {
        blue: "\x1b[34m",
        green: "\x1b[32m",
        dim: "\x1b[2m",
        reset: "\x1b[0m",
    };

    /// Colors disabled (empty strings).
    pub const OFF: Self = Self {
        blue: "",
        green: "",
        dim: "",
        reset: "",
    };

    /// Create colors based on an enabled flag.
    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    /// Check if colors are enabled.
    pub fn is_enabled(&self) -> bool {
        !self.blue.is_empty()
    }
}

#[cfg(test)]
mod colors_tests {
    use super::*;

    #[test]
    fn off_is_default() {
        assert!(!Colors::default().is_enabled());
    }

    #[test]
    fn new_toggles() {
        assert!(Colors::new(true).is_enabled());
        assert!(!Colors::new(false).is_enabled());
    }
}
