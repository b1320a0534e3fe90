//! CLI Exit Code Registry
//!
//! Single source of truth for `payverify` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                                    |
//! |------|------------------------------------------------------------|
//! | 0    | Success                                                    |
//! | 1    | General error (unspecified)                                |
//! | 2    | Usage error (bad args, missing config file)                |
//! | 3    | Configuration error, detected before any output is written |
//! | 4    | Runtime I/O error (unreadable input, unwritable output)    |
//! | 5    | `--strict`: unpaid or unresolved registrations found       |
//!
//! Configuration errors cover malformed TOML, failed validation, a bad
//! notification template, a missing or ambiguous payment column, and a
//! tier sheet with no price.

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing config file.
pub const EXIT_USAGE: u8 = 2;

/// Invalid configuration or form layout. No output files are written.
pub const EXIT_CONFIG: u8 = 3;

/// Runtime error - input unreadable, report unwritable.
pub const EXIT_RUNTIME: u8 = 4;

/// Strict mode found registrations that are not paid or not classified.
pub const EXIT_STRICT_MISMATCH: u8 = 5;
