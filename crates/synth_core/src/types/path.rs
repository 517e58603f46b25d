//! Completed simulation paths.

use super::state::State;

/// Ordered sequence of states produced by one simulation run.
///
/// A path of `n` steps holds `n + 1` states, the first being the initial
/// state. Paths are read-only: they are assembled once by the path generator
/// and only borrowed afterwards.
///
/// # Examples
///
/// ```rust
/// use synth_core::types::{Path, State};
///
/// let path = Path::from_states(vec![
///     State::initial(100.0),
///     State::new(101.0, 1.0, 1),
/// ]);
///
/// assert_eq!(path.len(), 2);
/// assert_eq!(path.num_steps(), 1);
/// assert_eq!(path.prices().collect::<Vec<_>>(), vec![100.0, 101.0]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Path {
    states: Vec<State>,
}

impl Path {
    /// Wraps an ordered state sequence.
    #[inline]
    pub fn from_states(states: Vec<State>) -> Self {
        Self { states }
    }

    /// Number of states, including the initial one.
    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns `true` if the path holds no state at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Number of completed steps (`len() - 1`, saturating at zero).
    #[inline]
    pub fn num_steps(&self) -> usize {
        self.states.len().saturating_sub(1)
    }

    /// All states in step order.
    #[inline]
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Iterator over prices in step order.
    #[inline]
    pub fn prices(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.states.iter().map(|s| s.price)
    }

    /// The initial state, if any.
    #[inline]
    pub fn initial(&self) -> Option<&State> {
        self.states.first()
    }

    /// The last state, if any.
    #[inline]
    pub fn terminal(&self) -> Option<&State> {
        self.states.last()
    }

    /// Largest absolute single-step price change.
    pub fn max_abs_step(&self) -> f64 {
        self.states
            .windows(2)
            .map(|w| (w[1].price - w[0].price).abs())
            .fold(0.0, f64::max)
    }

    /// Smallest price on the path, `+inf` for an empty path.
    pub fn min_price(&self) -> f64 {
        self.prices().fold(f64::INFINITY, f64::min)
    }
}

impl std::ops::Index<usize> for Path {
    type Output = State;

    fn index(&self, index: usize) -> &State {
        &self.states[index]
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a State;
    type IntoIter = std::slice::Iter<'a, State>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_path() -> Path {
        Path::from_states(vec![
            State::initial(100.0),
            State::new(102.0, 2.0, 1),
            State::new(99.5, -2.5, 2),
        ])
    }

    #[test]
    fn test_accessors() {
        let path = sample_path();
        assert_eq!(path.len(), 3);
        assert_eq!(path.num_steps(), 2);
        assert!(!path.is_empty());
        assert_eq!(path.initial().unwrap().price, 100.0);
        assert_eq!(path.terminal().unwrap().price, 99.5);
        assert_eq!(path[1].momentum, 2.0);
    }

    #[test]
    fn test_max_abs_step_and_min_price() {
        let path = sample_path();
        assert_eq!(path.max_abs_step(), 2.5);
        assert_eq!(path.min_price(), 99.5);
    }

    #[test]
    fn test_empty_path() {
        let path = Path::default();
        assert!(path.is_empty());
        assert_eq!(path.num_steps(), 0);
        assert_eq!(path.max_abs_step(), 0.0);
        assert!(path.terminal().is_none());
    }
}
