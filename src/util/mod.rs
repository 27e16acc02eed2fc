//! Shared helpers for the mipmap pipeline.
//!
//! Gamma transfer curves used by the downscaler and the base64 encoder used
//! for data URLs.

pub mod base64;
pub mod gamma;
