//! # cfinite-linalg
//!
//! Exact linear algebra for C-finite sequences.
//!
//! This crate provides:
//! - Dense row-major matrices with block assembly and binary powering
//! - Row reduction and echelonized kernels over a field
//! - Berlekamp-Massey for minimal linear recurrences
//! - LLL lattice reduction over Q

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod dense_matrix;
pub mod lll;

mod berlekamp_massey;

pub use berlekamp_massey::{berlekamp_massey, BerlekampMasseyResult};
pub use dense_matrix::DenseMatrix;
pub use lll::{lll_reduce, primitive_integer_vector, LllConfig, LllResult};
