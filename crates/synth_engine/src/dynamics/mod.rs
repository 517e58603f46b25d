//! Price dynamics and guardrails.
//!
//! - [`SymplecticIntegrator`]: proposes State(t+1) from State(t) and one shock
//! - [`GuardrailEnforcer`]: clamps the proposal to plausibility bounds
//!
//! # Architecture
//!
//! ```text
//! State(t) ──► PriceDynamics::propose(z) ──► GuardrailEnforcer::enforce ──► State(t+1)
//!                     ▲                                  │
//!                     │                                  └── ClampKind (audit)
//!             DeterministicStream
//! ```

pub mod guardrail;
pub mod integrator;

pub use guardrail::{GuardrailEnforcer, GuardrailOutcome};
pub use integrator::{PriceDynamics, SymplecticIntegrator};
