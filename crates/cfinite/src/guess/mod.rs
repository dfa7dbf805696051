//! Reconstructing a sequence from its first terms.
//!
//! Three strategies are available:
//! - [`Strategy::Kernel`]: kernel of a Hankel matrix, verified against all
//!   samples
//! - [`Strategy::Lattice`]: short integer relation from an LLL session,
//!   verified against all samples
//! - [`Strategy::BerlekampMassey`]: minimal linear recurrence, unverified
//!
//! Samples are taken to start at index 0. A strategy that finds nothing
//! returns `Ok(None)`; only too few samples or a failing lattice session
//! are errors.

mod berlekamp_massey;
mod kernel;
mod lattice;
pub mod oracle;

use std::fmt;
use std::str::FromStr;

use cfinite_linalg::LllConfig;
use cfinite_rings::rationals::Q;
use parking_lot::Mutex;
use tracing::debug;

pub use oracle::{LatticeOracle, LllOracle};

use crate::error::{CFiniteError, Result};
use crate::sequence::CFiniteSequence;

/// Guessing strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Hankel matrix kernel over Q. Needs at least 6 samples.
    #[default]
    Kernel,
    /// Integer relation from lattice reduction. Needs at least 6 samples.
    Lattice,
    /// Berlekamp-Massey. Needs at least 2 samples.
    BerlekampMassey,
}

impl Strategy {
    /// Returns the canonical name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Kernel => "kernel",
            Self::Lattice => "lattice",
            Self::BerlekampMassey => "berlekamp-massey",
        }
    }

    /// Returns the smallest number of samples the strategy accepts.
    #[must_use]
    pub fn min_samples(self) -> usize {
        match self {
            Self::Kernel | Self::Lattice => 6,
            Self::BerlekampMassey => 2,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = CFiniteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "kernel" | "sage" => Ok(Self::Kernel),
            "lattice" | "pari" => Ok(Self::Lattice),
            "berlekamp-massey" | "bm" => Ok(Self::BerlekampMassey),
            other => Err(CFiniteError::InvalidArgumentType(format!(
                "guessing strategy {other:?}"
            ))),
        }
    }
}

pub(crate) fn require(strategy: Strategy, actual: usize) -> Result<()> {
    let required = strategy.min_samples();
    if actual < required {
        return Err(CFiniteError::SampleTooShort {
            strategy: strategy.name(),
            required,
            actual,
        });
    }
    Ok(())
}

/// Configuration for guessing.
#[derive(Clone, Debug)]
pub struct GuessConfig {
    /// Lovász parameter of the default lattice session.
    pub lll_delta: Q,
}

impl Default for GuessConfig {
    fn default() -> Self {
        Self {
            lll_delta: Q::new(3, 4),
        }
    }
}

type OracleFactory = Box<dyn Fn() -> Result<Box<dyn LatticeOracle + Send>> + Send + Sync>;

/// Runs guessing strategies and owns the lattice session.
///
/// The session is created on the first lattice guess and reused until
/// [`Guesser::reset`]. Guessers can be shared between threads; lattice
/// guesses then take turns on the session.
pub struct Guesser {
    config: GuessConfig,
    factory: OracleFactory,
    session: Mutex<Option<Box<dyn LatticeOracle + Send>>>,
}

impl Guesser {
    /// Creates a guesser whose lattice session is an in-process [`LllOracle`].
    #[must_use]
    pub fn new(config: GuessConfig) -> Self {
        let lll = LllConfig {
            delta: config.lll_delta.clone(),
        };
        Self::with_oracle_factory(config, move || {
            Ok(Box::new(LllOracle::new(lll.clone())) as Box<dyn LatticeOracle + Send>)
        })
    }

    /// Creates a guesser that opens lattice sessions with `factory`.
    pub fn with_oracle_factory<F>(config: GuessConfig, factory: F) -> Self
    where
        F: Fn() -> Result<Box<dyn LatticeOracle + Send>> + Send + Sync + 'static,
    {
        Self {
            config,
            factory: Box::new(factory),
            session: Mutex::new(None),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &GuessConfig {
        &self.config
    }

    /// Guesses the sequence whose first terms are `samples`.
    ///
    /// # Errors
    ///
    /// - [`CFiniteError::SampleTooShort`] below the strategy's minimum
    /// - [`CFiniteError::Oracle`] if the lattice session fails
    pub fn guess(&self, samples: &[Q], strategy: Strategy) -> Result<Option<CFiniteSequence>> {
        let found = match strategy {
            Strategy::Kernel => kernel::guess(samples)?,
            Strategy::BerlekampMassey => berlekamp_massey::guess(samples)?,
            Strategy::Lattice => {
                require(strategy, samples.len())?;
                self.with_session(|oracle| lattice::guess(samples, oracle))?
            }
        };

        debug!(
            %strategy,
            samples = samples.len(),
            found = found.is_some(),
            "guess finished"
        );
        Ok(found)
    }

    fn with_session<T>(&self, f: impl FnOnce(&mut dyn LatticeOracle) -> Result<T>) -> Result<T> {
        let mut session = self.session.lock();
        if session.is_none() {
            debug!("opening lattice session");
            *session = Some((self.factory)()?);
        }

        match session.as_mut() {
            Some(oracle) => f(&mut **oracle),
            None => Err(CFiniteError::Oracle("no lattice session".to_string())),
        }
    }

    /// Closes the lattice session; the next lattice guess opens a new one.
    pub fn reset(&self) {
        if self.session.lock().take().is_some() {
            debug!("lattice session closed");
        }
    }

    /// Returns true while a lattice session is open.
    #[must_use]
    pub fn has_session(&self) -> bool {
        self.session.lock().is_some()
    }
}

impl Default for Guesser {
    fn default() -> Self {
        Self::new(GuessConfig::default())
    }
}

impl fmt::Debug for Guesser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guesser")
            .field("config", &self.config)
            .field("has_session", &self.has_session())
            .finish_non_exhaustive()
    }
}

impl CFiniteSequence {
    /// Guesses the sequence whose first terms, from index 0, are `samples`.
    ///
    /// Uses a fresh [`Guesser`]; keep one around to reuse a lattice session.
    ///
    /// # Errors
    ///
    /// See [`Guesser::guess`].
    pub fn guess(samples: &[Q], strategy: Strategy) -> Result<Option<Self>> {
        Guesser::default().guess(samples, strategy)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use cfinite_linalg::DenseMatrix;

    use super::*;

    fn ints(values: &[i64]) -> Vec<Q> {
        values.iter().map(|&v| Q::from_integer(v)).collect()
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!("sage".parse::<Strategy>(), Ok(Strategy::Kernel));
        assert_eq!("kernel".parse::<Strategy>(), Ok(Strategy::Kernel));
        assert_eq!("pari".parse::<Strategy>(), Ok(Strategy::Lattice));
        assert_eq!("bm".parse::<Strategy>(), Ok(Strategy::BerlekampMassey));
        assert_eq!(
            "berlekamp-massey".parse::<Strategy>(),
            Ok(Strategy::BerlekampMassey)
        );
        assert!(matches!(
            "newton".parse::<Strategy>(),
            Err(CFiniteError::InvalidArgumentType(_))
        ));
        assert_eq!(Strategy::default(), Strategy::Kernel);
    }

    #[test]
    fn test_all_strategies_agree() {
        let samples = ints(&[1, 2, 4, 8, 16, 32]);
        let guesser = Guesser::default();
        let expected = guesser.guess(&samples, Strategy::Kernel).unwrap();
        assert!(expected.is_some());

        for strategy in [Strategy::Lattice, Strategy::BerlekampMassey] {
            assert_eq!(guesser.guess(&samples, strategy).unwrap(), expected, "{strategy}");
        }
    }

    #[test]
    fn test_session_is_lazy_and_resettable() {
        let opened = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&opened);
        let guesser = Guesser::with_oracle_factory(GuessConfig::default(), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(LllOracle::default()) as Box<dyn LatticeOracle + Send>)
        });
        let samples = ints(&[0, 1, 1, 2, 3, 5, 8, 13]);

        guesser.guess(&samples, Strategy::Kernel).unwrap();
        assert!(!guesser.has_session());

        // too short: rejected before a session is opened
        assert!(guesser.guess(&samples[..4], Strategy::Lattice).is_err());
        assert!(!guesser.has_session());

        guesser.guess(&samples, Strategy::Lattice).unwrap();
        guesser.guess(&samples, Strategy::Lattice).unwrap();
        assert!(guesser.has_session());
        assert_eq!(opened.load(Ordering::SeqCst), 1);

        guesser.reset();
        assert!(!guesser.has_session());
        guesser.guess(&samples, Strategy::Lattice).unwrap();
        assert_eq!(opened.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_factory_failure() {
        let guesser = Guesser::with_oracle_factory(GuessConfig::default(), || {
            Err(CFiniteError::Oracle("cannot start".to_string()))
        });
        let samples = ints(&[1, 2, 4, 8, 16, 32]);
        assert_eq!(
            guesser.guess(&samples, Strategy::Lattice),
            Err(CFiniteError::Oracle("cannot start".to_string()))
        );
        assert!(!guesser.has_session());
    }

    struct Silent;

    impl LatticeOracle for Silent {
        fn integer_kernel(&mut self, _: &DenseMatrix<Q>) -> Result<Vec<Vec<Q>>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_injected_oracle() {
        let guesser = Guesser::with_oracle_factory(GuessConfig::default(), || {
            Ok(Box::new(Silent) as Box<dyn LatticeOracle + Send>)
        });
        let samples = ints(&[1, 2, 4, 8, 16, 32]);
        assert_eq!(guesser.guess(&samples, Strategy::Lattice).unwrap(), None);
    }

    #[test]
    fn test_convenience_guess() {
        let r = CFiniteSequence::guess(&ints(&[1, 2, 4, 8, 16, 32]), Strategy::Kernel)
            .unwrap()
            .unwrap();
        assert_eq!(r.to_string(), "C-finite sequence, generated by 1/(-2*x + 1)");
    }
}
