//! Core logic for int2date: spreadsheet serial dates to calendar dates.
//!
//! This crate has no I/O. It provides:
//!
//! - [`serial_to_date`] and [`number_to_date`], the conversion itself
//! - [`validate_input`], the rule applied to prompt input
//! - [`HoverRegistry`], per-language hover activation state
//! - [`resolve_hover`], digit-run detection and preview text for hovers

pub mod convert;
pub mod error;
pub mod hover;
pub mod input;
pub mod registry;

pub use convert::{
    CalendarDate, MAX_SERIAL, MIN_SERIAL, SerialDate, number_to_date, serial_to_date,
};
pub use error::{HoverRejection, INPUT_HINT, InputError, Result};
pub use hover::{
    HoverPreview, HoverTarget, MAX_TARGET_DIGITS, find_target, preview_at, resolve_hover,
};
pub use input::validate_input;
pub use registry::{
    ActivationOutcome, ActivationReport, ActiveHovers, DeactivationReport, HoverActivation,
    HoverRegistry,
};
