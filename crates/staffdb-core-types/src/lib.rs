//! Core types shared across staffdb facilities
//!
//! This crate holds the canonical schema constants used by both the error
//! facility and the logging facility, so every layer emits the same field keys.

pub mod schema;
