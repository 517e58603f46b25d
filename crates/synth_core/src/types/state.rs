//! Per-step simulation state and random draw records.

/// Phase-space state of a simulated price at one time step.
///
/// The price moves only through its momentum, so the pair `(price, momentum)`
/// fully determines the next step together with one noise draw.
///
/// # Examples
///
/// ```rust
/// use synth_core::types::State;
///
/// let s0 = State::initial(100.0);
/// assert_eq!(s0.price, 100.0);
/// assert_eq!(s0.momentum, 0.0);
/// assert_eq!(s0.step_index, 0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct State {
    /// Price level.
    pub price: f64,
    /// Rate of change of price per unit time.
    pub momentum: f64,
    /// Step index, 0 for the initial state.
    pub step_index: usize,
}

impl State {
    /// Creates a state from its components.
    #[inline]
    pub fn new(price: f64, momentum: f64, step_index: usize) -> Self {
        Self {
            price,
            momentum,
            step_index,
        }
    }

    /// Creates the initial state of a path: momentum at rest, step 0.
    #[inline]
    pub fn initial(price: f64) -> Self {
        Self::new(price, 0.0, 0)
    }

    /// Returns `true` if both price and momentum are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.price.is_finite() && self.momentum.is_finite()
    }
}

/// A single draw from a deterministic random stream.
///
/// `index` is the zero-based position of the draw within its stream, so a
/// stream replayed from the same `(seed, path_index)` yields identical pairs.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RandomDraw {
    /// Position of the draw within the stream.
    pub index: u64,
    /// Drawn value.
    pub value: f64,
}
