//! Terminal color sequences.

use owo_colors::{colors, Color};

use thiserror::Error;

/// Sequence that restores the default foreground color.
pub const COLOR_RESET: &[u8] = colors::Default::ANSI_FG.as_bytes();

/// Provider of the escape sequences that change and restore the foreground
/// color. The engine is written against this interface so it never has to
/// know how the sequences were obtained.
pub trait ColorScheme {
    /// The sequence that switches the foreground to the given xterm-256
    /// color index.
    fn foreground(&self, color: u8) -> &[u8];

    /// The sequence that resets the foreground to its default.
    fn reset(&self) -> &[u8];
}

#[derive(Debug, Error)]
pub enum SchemeError {
    #[error("cannot determine terminal color support; use --no-color")]
    NoColorSupport,
    #[error("colorizing requires a terminal with 256 colors; use --no-color")]
    TooFewColors,
}

/// Emits standard xterm-256 SGR sequences.
pub struct AnsiScheme {
    foreground: Vec<String>,
}

impl AnsiScheme {
    /// Builds the scheme without checking the terminal's capabilities.
    pub fn new() -> AnsiScheme {
        AnsiScheme {
            foreground: (0..=u8::MAX)
                .map(|n| format!("\u{1b}[38;5;{n}m"))
                .collect(),
        }
    }

    /// Builds the scheme for standard output, failing unless the terminal
    /// reports 256-color support. `FORCE_COLOR` overrides detection.
    pub fn for_stdout() -> Result<AnsiScheme, SchemeError> {
        match supports_color::on(supports_color::Stream::Stdout) {
            None => Err(SchemeError::NoColorSupport),
            Some(level) if !level.has_256 => Err(SchemeError::TooFewColors),
            Some(_) => Ok(AnsiScheme::new()),
        }
    }
}

impl Default for AnsiScheme {
    fn default() -> Self {
        AnsiScheme::new()
    }
}

impl ColorScheme for AnsiScheme {
    fn foreground(&self, color: u8) -> &[u8] {
        self.foreground[color as usize].as_bytes()
    }

    fn reset(&self) -> &[u8] {
        COLOR_RESET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn foreground_sequences_are_indexed_sgr() {
        let scheme = AnsiScheme::new();
        assert_eq!(scheme.foreground(8), b"\x1b[38;5;8m");
        assert_eq!(scheme.foreground(202), b"\x1b[38;5;202m");
    }

    #[test]
    fn reset_restores_default_foreground() {
        let scheme = AnsiScheme::new();
        assert_eq!(scheme.reset(), b"\x1b[39m");
    }
}
