//! # cfinite
//!
//! C-finite sequences: sequences satisfying a homogeneous linear
//! recurrence with constant rational coefficients, held as their rational
//! ordinary generating function.
//!
//! ## Features
//!
//! - **Canonical form**: any o.g.f. is reduced to an offset, a recurrence
//!   and enough initial terms; equality compares generating functions
//! - **Fast terms**: `a(k)` in `O(d^3 log k)` through companion matrix powers,
//!   slices evaluated in parallel
//! - **Guessing**: recover a sequence from its first terms by Hankel kernel,
//!   lattice reduction or Berlekamp-Massey
//! - **Arithmetic**: `+ - * /` on generating functions
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cfinite::prelude::*;
//!
//! let fib: CFiniteSequence = "x/(1-x-x^2)".parse()?;
//! assert_eq!(fib.term(10), Q::from_integer(55));
//! println!("{}", fib.recurrence_repr());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod guess;
pub mod parse;
pub mod sequence;
pub mod term;

mod algebra;
mod canonical;
mod recurrence;

#[cfg(test)]
mod proptests;

pub use error::{CFiniteError, Result};
pub use guess::{GuessConfig, Guesser, LatticeOracle, LllOracle, Strategy};
pub use parse::{parse_rational_function, parse_rational_list};
pub use sequence::CFiniteSequence;
pub use term::{EvalConfig, Lookup, SeqKey};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{CFiniteError, CFiniteSequence, Guesser, Lookup, SeqKey, Strategy};
    pub use cfinite_poly::{DensePoly, RationalFunction};
    pub use cfinite_rings::{Field, Ring, Q};
}
