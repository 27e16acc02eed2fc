// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Gamma-correct mipmap pyramid generator.
//!
//! Mipgen takes a single PNG or JPEG image and builds the full chain of
//! half-resolution levels used for texture minification. Each reduction is
//! an alpha-weighted 2x2 box filter evaluated in (approximately) linear
//! light, so edges of translucent sprites do not pick up dark fringes.
//!
//! # Key entry points
//!
//! - [`mipmap::create_mipmap`] - decode a file and build the encoded pyramid
//! - [`downscale::downscale`] - a single half-resolution reduction
//! - [`raster::Raster`] - the owned RGBA8 buffer every stage operates on
//! - [`manifest::Manifest`] - JSON / JS-module description of a pyramid
//! - [`options::Options`] - TOML configuration
//!
//! # Architecture
//!
//! Level generation is inherently sequential (each level is derived from the
//! previous one), but encoding is not: once the pyramid exists every level is
//! PNG- and JPEG-encoded in parallel on the rayon pool and joined before
//! [`mipmap::create_mipmap`] returns. The first encode failure wins.

pub mod downscale;
pub mod encode;
pub mod error;
#[cfg(feature = "gpu")]
pub mod gpu;
pub mod manifest;
pub mod mipmap;
pub mod options;
pub mod raster;
pub mod util;

pub use error::{MipmapError, Result};
pub use mipmap::{create_mipmap, Mipmap, MipmapLevel};
pub use raster::Raster;
