//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! [`MarrowError`] only covers failures at the asset boundary: building a
//! keyframe track or an animation clip from malformed source data. Per-frame
//! evaluation (time advance, sampling, palette writes) is total and never
//! returns an error; out-of-range influences and unknown bones degrade
//! silently instead.
//!
//! All fallible public APIs return [`Result<T>`], an alias for
//! `std::result::Result<T, MarrowError>`.

use thiserror::Error;

/// The main error type for the crate.
#[derive(Error, Debug)]
pub enum MarrowError {
    /// A keyframe channel was built with no keys at all.
    ///
    /// Every channel needs at least one key; a single key makes the channel
    /// constant.
    #[error("keyframe channel '{channel}' has no keys")]
    EmptyTrack {
        /// Description of the offending channel
        channel: String,
    },

    /// Keyframe timestamps were not strictly increasing.
    #[error(
        "keyframe channel '{channel}' is not strictly increasing at key {index} \
         ({prev} >= {next})"
    )]
    NonMonotonicKeyframes {
        /// Description of the offending channel
        channel: String,
        /// Index of the first out-of-order key
        index: usize,
        /// Timestamp preceding the violation
        prev: f32,
        /// The violating timestamp
        next: f32,
    },

    /// A channel's timestamp and value arrays have different lengths.
    #[error(
        "keyframe channel '{channel}' has {times} timestamps but {values} values"
    )]
    KeyframeCountMismatch {
        /// Description of the offending channel
        channel: String,
        /// Number of timestamps supplied
        times: usize,
        /// Number of values supplied
        values: usize,
    },
}

/// Alias for `Result<T, MarrowError>`.
pub type Result<T> = std::result::Result<T, MarrowError>;
