//! Injectable sources of random selection.
//!
//! Every operation that picks an alternative or a pool value takes a
//! `&mut dyn Chooser`. Production callers use [`RandomChooser`]; tests use
//! a seeded [`RandomChooser`] or a [`ScriptedChooser`] to assert exact picks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Picks an index in `0..len`.
pub trait Chooser {
    /// Returns an index in `0..len`. Callers never pass `len == 0`.
    fn choose_index(&mut self, len: usize) -> usize;
}

impl<C: Chooser + ?Sized> Chooser for &mut C {
    fn choose_index(&mut self, len: usize) -> usize {
        (**self).choose_index(len)
    }
}

/// Picks one element of `items`, or `None` if it is empty.
pub fn choose<'a, T>(chooser: &mut dyn Chooser, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(chooser.choose_index(items.len()))
}

/// Uniform random selection backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomChooser<R = StdRng> {
    rng: R,
}

impl RandomChooser<StdRng> {
    /// A chooser seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// A reproducible chooser for a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomChooser<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl Default for RandomChooser<StdRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<R: Rng> Chooser for RandomChooser<R> {
    fn choose_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }
}

/// Replays a fixed sequence of picks.
///
/// Each pick is reduced modulo `len`. Once the script is exhausted every
/// further pick is `0`.
///
/// # Example
///
/// ```
/// use varia::{Chooser, ScriptedChooser};
///
/// let mut chooser = ScriptedChooser::new([2, 1]);
/// assert_eq!(chooser.choose_index(3), 2);
/// assert_eq!(chooser.choose_index(3), 1);
/// assert_eq!(chooser.choose_index(3), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedChooser {
    picks: Vec<usize>,
    cursor: usize,
}

impl ScriptedChooser {
    pub fn new(picks: impl IntoIterator<Item = usize>) -> Self {
        Self {
            picks: picks.into_iter().collect(),
            cursor: 0,
        }
    }

    /// Number of picks consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl Chooser for ScriptedChooser {
    fn choose_index(&mut self, len: usize) -> usize {
        let pick = self.picks.get(self.cursor).copied().unwrap_or(0);
        self.cursor += 1;
        if len == 0 { 0 } else { pick % len }
    }
}
