// src/error.rs

use std::path::PathBuf;

use thiserror::Error;

/// Terminal failures of a plotting run. None of these are retried.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("the file '{}' was not found", path.display())]
    FileNotFound { path: PathBuf },

    #[error("could not read '{}': {reason}", path.display())]
    Load { path: PathBuf, reason: String },

    #[error("no plot types selected, nothing to do")]
    EmptySelection,

    #[error("could not draw the figure: {reason}")]
    Render { reason: String },

    #[error("could not save the plot to '{}': {reason}", path.display())]
    Save { path: PathBuf, reason: String },
}

impl PlotError {
    pub(crate) fn load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        PlotError::Load {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Process exit code reported by the command line tool.
    pub fn exit_code(&self) -> u8 {
        match self {
            PlotError::EmptySelection => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_path() {
        let err = PlotError::FileNotFound {
            path: PathBuf::from("missing.csv"),
        };
        assert_eq!(err.to_string(), "the file 'missing.csv' was not found");

        let err = PlotError::load("log.csv", "row 3: bad timestamp");
        assert!(err.to_string().contains("log.csv"));
        assert!(err.to_string().contains("row 3"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(PlotError::EmptySelection.exit_code(), 2);
        assert_eq!(
            PlotError::Render {
                reason: "x".to_string()
            }
            .exit_code(),
            1
        );
    }
}
