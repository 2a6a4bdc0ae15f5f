//! Shoal World -- the interface boundary to an external aquarium simulation.
//!
//! The viewer in `shoal-viewer` owns no simulation logic. Whatever drives the
//! fish (neural networks, scripted paths, a replay file) lives behind the
//! [`Stepper`] trait defined here: one `step()` mutation, one `world()`
//! snapshot query. This crate carries only that boundary -- the snapshot
//! value types and the trait -- so simulations and viewers can depend on it
//! without pulling in windowing or GPU code.
//!
//! # Quick Start
//!
//! ```
//! use shoal_world::prelude::*;
//!
//! /// A stepper whose single agent swims in a circle.
//! struct Circler {
//!     angle: f32,
//! }
//!
//! impl Stepper for Circler {
//!     fn step(&mut self) {
//!         self.angle += 0.1;
//!     }
//!
//!     fn world(&self) -> WorldSnapshot {
//!         WorldSnapshot {
//!             agents: vec![Agent {
//!                 x: 0.5 + 0.25 * self.angle.cos(),
//!                 y: 0.5 + 0.25 * self.angle.sin(),
//!                 rotation: self.angle,
//!             }],
//!             foods: Vec::new(),
//!         }
//!     }
//! }
//!
//! let mut sim = Circler { angle: 0.0 };
//! sim.step();
//! assert_eq!(sim.world().agents.len(), 1);
//! ```

#![deny(unsafe_code)]

pub mod snapshot;
pub mod stepper;

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::snapshot::{Agent, Food, WorldSnapshot};
    pub use crate::stepper::Stepper;
}
