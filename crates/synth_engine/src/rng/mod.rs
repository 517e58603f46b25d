//! # Deterministic Random Streams
//!
//! Random number generation for path simulation. Every simulated path owns
//! one [`DeterministicStream`]; nothing in the engine touches a global or
//! thread-local generator.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: the draw sequence depends only on `(seed, path_index)`
//! - **Independence**: each path index maps to a distinct generator seed via
//!   [`derive_path_seed`], so parallel paths never share generator state
//! - **Static dispatch**: no `Box<dyn RngCore>` in the step loop
//!
//! ## Usage Example
//!
//! ```rust
//! use synth_engine::rng::DeterministicStream;
//!
//! let mut path0 = DeterministicStream::new(42, 0);
//! let mut path1 = DeterministicStream::new(42, 1);
//!
//! let first0: Vec<f64> = (0..5).map(|_| path0.next_normal()).collect();
//! let first1: Vec<f64> = (0..5).map(|_| path1.next_normal()).collect();
//! assert_ne!(first0, first1);
//! ```
//!
//! ## Generator
//!
//! Streams wrap `rand::rngs::StdRng` seeded through `seed_from_u64`, with
//! normals drawn via `rand_distr::StandardNormal`. The generator algorithm is
//! fixed per `rand` release, so the lockfile pins the bit-level sequence.

mod stream;

// Public re-exports
pub use stream::{derive_path_seed, DeterministicStream};

#[cfg(test)]
mod tests;
