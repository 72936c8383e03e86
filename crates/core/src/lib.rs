//! Core errors and constants for the `tarry` utilities.
//!
//! ## Key Components
//!
//! - **`errors`**: Defines the primary `Error` enum and `Result` type alias,
//!   covering probe failures, cancellation, try exhaustion, usage errors and
//!   the file system / encoding failures of the persistence helpers.
//! - **`constants`**: Shared defaults and environment variable names.

pub mod constants;
pub mod errors;

pub use self::{
    constants::*,
    errors::{BoxError, CancelReason, Error, Result, ResultExt},
};
