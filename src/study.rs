//! How a tree's shape degrades under random insert/delete (I/D) pairs.
//!
//! A random tree of `n` keys has an expected IPL of about `1.386·n·log2(n) − 2.846·n`. Each I/D
//! pair deletes a random key that is in the tree and inserts a fresh one, so the size stays at
//! `n`. After every pair the IPL is divided by the expected IPL. A value creeping above 1 means
//! the tree is getting worse than random.
//!
//! Two trees run side by side from the same keys. One deletes with [`Tree::delete`] (always the
//! successor) and the other with [`Tree::delete_symmetric`].
//!
//! # Examples
//!
//! ```
//! use bst_ipl::study::{self, StudyConfig};
//!
//! let config = StudyConfig {
//!     pairs: 50,
//!     ..StudyConfig::new(32)
//! };
//! let trace = study::run(&config).unwrap();
//!
//! assert_eq!(trace.asymmetric.len(), 51);
//! assert_eq!(trace.asymmetric[0], trace.symmetric[0]);
//! ```

use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::{debug, info};

use crate::tree::Tree;

/// Starting keys are drawn without repeats from `0..INITIAL_KEYS`.
const INITIAL_KEYS: usize = 10_000;

/// Keys inserted by I/D pairs are drawn from here, so they all land to the right of the start.
const FRESH_KEYS: RangeInclusive<u32> = 10_000..=20_000;

/// The expected IPL of a BST built from `n` keys inserted in random order. It is only positive
/// from `n = 5` on.
///
/// # Examples
///
/// ```
/// use bst_ipl::study::expected_ipl;
///
/// assert_eq!(expected_ipl(0), 0.0);
/// assert!((expected_ipl(64) - 350.08).abs() < 1e-9);
/// ```
pub fn expected_ipl(n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let n = n as f64;
    1.386 * n * n.log2() - 2.846 * n
}

/// Settings of an experiment that can't be run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StudyError {
    /// The expected IPL of a tree this small is zero or negative so nothing can be normalized.
    #[error("tree size {size} is too small to normalize, it needs at least 5 keys")]
    TreeTooSmall {
        /// The requested size.
        size: usize,
    },
    /// There are not enough distinct starting keys.
    #[error("tree size {size} is larger than the {max} distinct starting keys")]
    TreeTooLarge {
        /// The requested size.
        size: usize,
        /// How many starting keys there are.
        max: usize,
    },
    /// Zero trials leave nothing to average.
    #[error("at least one trial is needed")]
    NoTrials,
}

/// How to run the experiment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudyConfig {
    /// Number of keys in each tree, kept constant by the I/D pairs.
    pub tree_size: usize,
    /// I/D pairs per trial.
    pub pairs: usize,
    /// Trials to average over. Each starts from fresh random keys.
    pub trials: usize,
    /// Seed for the random keys, so runs can be repeated.
    pub seed: u64,
}

impl StudyConfig {
    /// A config for trees of `tree_size` keys with `100 · tree_size` pairs over 2 trials.
    pub fn new(tree_size: usize) -> Self {
        Self {
            tree_size,
            pairs: tree_size * 100,
            trials: 2,
            seed: 0,
        }
    }

    fn validate(&self) -> Result<(), StudyError> {
        if self.trials == 0 {
            return Err(StudyError::NoTrials);
        }
        if self.tree_size > INITIAL_KEYS {
            return Err(StudyError::TreeTooLarge {
                size: self.tree_size,
                max: INITIAL_KEYS,
            });
        }
        if expected_ipl(self.tree_size) <= 0.0 {
            return Err(StudyError::TreeTooSmall {
                size: self.tree_size,
            });
        }
        Ok(())
    }
}

/// Normalized IPL after each I/D pair, averaged over the trials. Index `i` is the value after `i`
/// pairs, so index 0 is the freshly built tree.
#[derive(Clone, Debug, PartialEq)]
pub struct IplTrace {
    /// Trees deleting with the successor only.
    pub asymmetric: Vec<f64>,
    /// Trees alternating successor and predecessor.
    pub symmetric: Vec<f64>,
}

/// Runs the experiment described by `config`.
pub fn run(config: &StudyConfig) -> Result<IplTrace, StudyError> {
    config.validate()?;
    info!(?config, "running IPL study");

    let expected = expected_ipl(config.tree_size);
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut trace = IplTrace {
        asymmetric: vec![0.0; config.pairs + 1],
        symmetric: vec![0.0; config.pairs + 1],
    };

    for trial in 0..config.trials {
        debug!(trial, "starting trial");
        run_trial(config, expected, &mut rng, &mut trace);
    }

    let trials = config.trials as f64;
    for x in trace.asymmetric.iter_mut().chain(trace.symmetric.iter_mut()) {
        *x /= trials;
    }
    Ok(trace)
}

/// Runs one trial and adds its normalized IPLs onto `trace`.
fn run_trial(config: &StudyConfig, expected: f64, rng: &mut StdRng, trace: &mut IplTrace) {
    let mut keys: Vec<u32> = rand::seq::index::sample(rng, INITIAL_KEYS, config.tree_size)
        .into_iter()
        .map(|k| k as u32)
        .collect();
    let mut asymmetric: Tree<u32> = keys.iter().copied().collect();
    let mut symmetric = asymmetric.clone();

    trace.asymmetric[0] += asymmetric.ipl() as f64 / expected;
    trace.symmetric[0] += symmetric.ipl() as f64 / expected;

    for pair in 1..=config.pairs {
        let victim = keys.swap_remove(rng.random_range(0..keys.len()));
        let deleted_asymmetric = asymmetric.delete(&victim);
        let deleted_symmetric = symmetric.delete_symmetric(&victim);
        debug_assert!(deleted_asymmetric && deleted_symmetric, "{} was not in the tree", victim);

        let fresh = rng.random_range(FRESH_KEYS);
        keys.push(fresh);
        asymmetric.insert(fresh);
        symmetric.insert(fresh);

        trace.asymmetric[pair] += asymmetric.ipl() as f64 / expected;
        trace.symmetric[pair] += symmetric.ipl() as f64 / expected;
    }
}
