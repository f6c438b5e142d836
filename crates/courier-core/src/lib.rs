//! Shared primitives for Courier feature crates

mod error;

pub use error::{ErrorBody, HttpError};
