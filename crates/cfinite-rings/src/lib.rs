//! # cfinite-rings
//!
//! Exact scalar arithmetic for C-finite sequence computations.
//!
//! This crate provides:
//! - The abstract traits `Ring` and `Field`
//! - The field of rational numbers `Q`, backed by `dashu`
//!
//! Every other crate in the workspace is generic over these traits and
//! instantiated at `Q`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod rationals;
pub mod traits;

#[cfg(test)]
mod proptests;

pub use rationals::{ParseRationalError, Q};
pub use traits::{Field, Ring};
