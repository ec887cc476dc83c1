//! Core types for BER-TLV encoding
//!
//! This crate provides the error type and the bounds-checked buffer
//! abstraction the encoder writes through.

#![forbid(unsafe_code)]

pub mod error;
pub mod buffer;

pub use error::{BerError, BerResult};
pub use buffer::{BerBuffer, ByteView, OwnedBuffer, SliceBuffer};
