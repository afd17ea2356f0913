use serde::Deserialize;

/// Options for writing CSV.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvOptions {
    /// Row terminator (default: the platform's native line ending)
    #[serde(default)]
    pub line_ending: LineEnding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    Lf,
    Crlf,
}

impl LineEnding {
    /// CRLF on Windows, LF everywhere else.
    pub fn native() -> Self {
        if cfg!(windows) { Self::Crlf } else { Self::Lf }
    }

    pub(crate) fn terminator(self) -> csv::Terminator {
        match self {
            Self::Lf => csv::Terminator::Any(b'\n'),
            Self::Crlf => csv::Terminator::CRLF,
        }
    }
}

impl Default for LineEnding {
    fn default() -> Self {
        Self::native()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_native() {
        let expected = if cfg!(windows) { LineEnding::Crlf } else { LineEnding::Lf };
        assert_eq!(CsvOptions::default().line_ending, expected);
    }

    #[test]
    fn test_terminators() {
        assert!(matches!(LineEnding::Lf.terminator(), csv::Terminator::Any(b'\n')));
        assert!(matches!(LineEnding::Crlf.terminator(), csv::Terminator::CRLF));
    }
}
