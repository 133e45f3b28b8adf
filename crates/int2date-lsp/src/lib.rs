pub mod commands;
pub mod config;
pub mod document;
pub mod handlers;
pub mod server;

// Re-export from int2date-core
pub use int2date_core::{
    ActivationOutcome, CalendarDate, HoverRegistry, HoverRejection, InputError, serial_to_date,
    validate_input,
};

// Re-export server
pub use server::Backend;
