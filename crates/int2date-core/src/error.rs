//! Error types for prompt validation and hover resolution.

use thiserror::Error;

/// Hint shown when prompt input is rejected.
pub const INPUT_HINT: &str = "input: serial date (2~99999)";

/// Rejection of a line of prompt input before any conversion is attempted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Input is not 1 to 5 ASCII digits.
    #[error("input: serial date (2~99999)")]
    Malformed { input: String },

    /// Input is well-formed but not greater than 1.
    #[error("input: serial date (2~99999)")]
    OutOfRange { value: u32 },
}

impl InputError {
    /// Fixed hint shown by the input widget, identical for every variant.
    pub fn hint(&self) -> &'static str {
        INPUT_HINT
    }
}

/// Reasons a hover provider declines to answer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HoverRejection {
    /// Hover preview is not active for the document kind.
    #[error("Hover preview is inactive for '{kind_tag}'")]
    Inactive { kind_tag: String },

    /// Cursor is not on a digit run of acceptable length.
    #[error("Target is not a serial date")]
    NoTarget,

    /// Digits were found but do not convert to a date.
    #[error("Fail to parse {serial} as a serial date.")]
    Unparseable { serial: u64 },
}

pub type Result<T> = std::result::Result<T, InputError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_display_is_fixed_hint() {
        let malformed = InputError::Malformed {
            input: "abc".into(),
        };
        let out_of_range = InputError::OutOfRange { value: 1 };

        assert_eq!(malformed.to_string(), INPUT_HINT);
        assert_eq!(out_of_range.to_string(), INPUT_HINT);
        assert_eq!(malformed.hint(), out_of_range.hint());
    }

    #[test]
    fn test_hover_rejection_display() {
        assert_eq!(
            HoverRejection::NoTarget.to_string(),
            "Target is not a serial date"
        );
        assert_eq!(
            HoverRejection::Unparseable { serial: 1 }.to_string(),
            "Fail to parse 1 as a serial date."
        );
        assert_eq!(
            HoverRejection::Inactive {
                kind_tag: "xml".into()
            }
            .to_string(),
            "Hover preview is inactive for 'xml'"
        );
    }
}
