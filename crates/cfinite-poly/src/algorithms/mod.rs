//! Polynomial algorithms over a field.

pub mod gcd;

pub use gcd::{make_monic, poly_div_rem, poly_gcd};
