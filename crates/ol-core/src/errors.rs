//! Error types for optionlab.
//!
//! Every failure the pricing engines report is an invalid-argument style
//! condition raised synchronously to the caller: an exercise style the engine
//! does not support, a specification variant it does not accept, or a
//! configuration that cannot produce a result. Degenerate market inputs
//! (expired options, zero volatility) are *not* errors; engines answer them
//! with the intrinsic value.
//!
//! The `fail!` macro defined here raises [`Error::InvalidArgument`] with a
//! formatted message.

use thiserror::Error;

/// The top-level error type used throughout optionlab.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A generic invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The engine was invoked with an exercise style it does not price.
    #[error("invalid argument: {engine} requires {required} exercise")]
    UnsupportedExercise {
        /// Name of the engine that rejected the call.
        engine: &'static str,
        /// The exercise style the engine accepts.
        required: &'static str,
    },

    /// The engine was invoked with the wrong kind of option specification.
    #[error("invalid argument: {engine} requires a {expected}")]
    UnsupportedSpec {
        /// Name of the engine that rejected the call.
        engine: &'static str,
        /// The specification type the engine accepts.
        expected: &'static str,
    },

    /// Engine configuration cannot produce a result (zero steps, zero paths…).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl Error {
    /// Whether this is an invalid-argument style failure.
    ///
    /// Always `true`: the library has no other failure category, but callers
    /// that bridge into a wider error taxonomy can rely on this predicate.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Error::InvalidArgument(_)
                | Error::UnsupportedExercise { .. }
                | Error::UnsupportedSpec { .. }
                | Error::InvalidConfiguration(_)
        )
    }
}

/// Shorthand `Result` type used throughout optionlab.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return `Err(Error::InvalidArgument(...))` immediately.
///
/// # Example
/// ```
/// use ol_core::{fail, errors::Error};
/// fn always_err() -> ol_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::InvalidArgument(format!($($msg)*)))
    };
}
