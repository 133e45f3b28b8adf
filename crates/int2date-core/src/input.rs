//! Validation of free-text prompt input.

use crate::convert::SerialDate;
use crate::error::{InputError, Result};
use regex::Regex;
use std::sync::LazyLock;

static SERIAL_INPUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,5}$").expect("Invalid regex"));

/// Validates one line of prompt input.
///
/// Accepts 1 to 5 ASCII digits whose value is greater than 1. Leading zeros
/// are allowed (`"00041"` is serial 41). Surrounding whitespace is not
/// trimmed.
///
/// # Examples
///
/// ```
/// use int2date_core::validate_input;
///
/// assert_eq!(validate_input("99999").unwrap().get(), 99_999);
/// assert!(validate_input("1").is_err());
/// assert!(validate_input("100000").is_err());
/// ```
pub fn validate_input(input: &str) -> Result<SerialDate> {
    if !SERIAL_INPUT.is_match(input) {
        return Err(InputError::Malformed {
            input: input.to_string(),
        });
    }

    let value: u32 = input.parse().map_err(|_| InputError::Malformed {
        input: input.to_string(),
    })?;

    SerialDate::new(value).ok_or(InputError::OutOfRange { value })
}
