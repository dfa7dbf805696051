//! # cfinite-poly
//!
//! Univariate polynomial machinery for C-finite sequences.
//!
//! This crate provides:
//! - Dense univariate polynomials with valuation and shift helpers
//! - Euclidean division and GCD over a field
//! - Rational functions P(x)/Q(x) kept in reduced form
//! - Truncated power and Laurent series expansion of P(x)/Q(x)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod algorithms;
pub mod dense;
pub mod series;

mod arithmetic;
mod rational_func;

#[cfg(test)]
mod proptests;

pub use dense::DensePoly;
pub use rational_func::RationalFunction;
pub use series::{expand_ratio, LaurentSeries};
