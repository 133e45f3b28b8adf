//! Hover target detection and preview text.
//!
//! Columns are measured in UTF-16 code units, the default LSP position
//! encoding. Digit runs are ASCII only, so a run's width in code units equals
//! its length in characters.

use crate::convert::{CalendarDate, serial_to_date};
use crate::error::HoverRejection;
use crate::registry::HoverRegistry;
use std::fmt;

/// Longest digit run that is treated as a serial date.
pub const MAX_TARGET_DIGITS: usize = 5;

/// Digit run under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverTarget {
    pub serial: u64,
    /// Start column, inclusive.
    pub start: u32,
    /// End column, exclusive.
    pub end: u32,
}

/// Successful hover preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverPreview {
    pub target: HoverTarget,
    pub date: CalendarDate,
}

impl fmt::Display for HoverPreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} as date: {}", self.target.serial, self.date)
    }
}

/// Finds the digit run touching `character` on `line`.
///
/// A run touches the cursor when `start <= character <= end`. A digit right
/// under the cursor wins over a run ending just before it. Runs longer than
/// [`MAX_TARGET_DIGITS`] are never targets, whichever part of them the
/// cursor is on.
pub fn find_target(line: &str, character: u32) -> Option<HoverTarget> {
    let mut chars = Vec::new();
    let mut column = 0u32;
    for ch in line.chars() {
        chars.push((column, ch));
        column += ch.len_utf16() as u32;
    }

    let cursor = chars.partition_point(|&(col, _)| col < character);
    let is_digit = |idx: usize| chars.get(idx).is_some_and(|&(_, ch)| ch.is_ascii_digit());

    let anchor = if is_digit(cursor) {
        cursor
    } else if cursor > 0 && is_digit(cursor - 1) {
        cursor - 1
    } else {
        return None;
    };

    let mut first = anchor;
    while first > 0 && is_digit(first - 1) {
        first -= 1;
    }
    let mut last = anchor;
    while is_digit(last + 1) {
        last += 1;
    }

    let len = last - first + 1;
    if len > MAX_TARGET_DIGITS {
        tracing::trace!(len, "digit run too long for a serial date");
        return None;
    }

    let serial = chars[first..=last]
        .iter()
        .fold(0u64, |acc, &(_, ch)| acc * 10 + u64::from(ch as u8 - b'0'));
    let start = chars[first].0;

    Some(HoverTarget {
        serial,
        start,
        end: start + len as u32,
    })
}

/// Builds the preview for the cursor position, ignoring activation state.
pub fn preview_at(line: &str, character: u32) -> Result<HoverPreview, HoverRejection> {
    let target = find_target(line, character).ok_or(HoverRejection::NoTarget)?;
    let serial = i64::try_from(target.serial).map_err(|_| HoverRejection::Unparseable {
        serial: target.serial,
    })?;
    let date = serial_to_date(serial).ok_or(HoverRejection::Unparseable {
        serial: target.serial,
    })?;
    Ok(HoverPreview { target, date })
}

/// Answers a hover query for a document of kind `kind_tag`.
///
/// Declines with [`HoverRejection::Inactive`] unless the registry has an
/// active entry for the kind.
pub fn resolve_hover(
    registry: &HoverRegistry,
    kind_tag: &str,
    line: &str,
    character: u32,
) -> Result<HoverPreview, HoverRejection> {
    if !registry.is_active(kind_tag) {
        return Err(HoverRejection::Inactive {
            kind_tag: kind_tag.to_string(),
        });
    }
    preview_at(line, character)
}
