//! MI-23 frame decoding.
//!
//! The decoder follows a layered structure:
//! - `layout`: frame length, nibble offsets and bit masks (source of truth)
//! - `tables`: constant segment/prefix/unit/mode lookup tables
//! - `reader`: nibble access and digit-pair composition
//! - `parser`: domain-level decoding into a [`crate::Reading`]
//! - `error`: explicit errors for frame construction
//!
//! Decoding a [`Frame`] is total. The only fallible step is building a frame
//! from raw wire bytes, which the synchronizer does after it has seen a
//! terminator byte.

pub mod error;
pub mod frame;
pub mod layout;
pub mod parser;
pub mod reader;
pub mod tables;

pub use error::FrameError;
pub use frame::Frame;
pub use parser::decode;
pub use tables::{Mode, Unit, UnitPrefix};
