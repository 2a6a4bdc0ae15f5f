//! # Shoal Viewer
//!
//! A frame-paced viewer for [`shoal_world`] simulations. The crate is split
//! into a pure pacing-and-tessellation core and an optional GPU shell:
//!
//! - [`clock`]: drift-corrected frame pacing over a millisecond timeline.
//! - [`scheduler`]: couples a [`shoal_world::stepper::Stepper`] to the clock,
//!   advancing the world exactly once per due frame.
//! - [`geometry`]: the rotation transform and the agent silhouette.
//! - [`scene`]: snapshot tessellation into colored triangles.
//! - [`render`] (feature `renderer`): wgpu surface, pipeline, and the winit
//!   event loop runner.
//!
//! Everything outside [`render`] is headless and deterministic, so pacing and
//! tessellation can be tested without a window or a GPU.
//!
//! ## Quick Start
//!
//! ```rust
//! use shoal_viewer::prelude::*;
//!
//! struct Spinner {
//!     world: WorldSnapshot,
//! }
//!
//! impl Stepper for Spinner {
//!     fn step(&mut self) {
//!         for agent in &mut self.world.agents {
//!             agent.rotation += 0.1;
//!         }
//!     }
//!
//!     fn world(&self) -> WorldSnapshot {
//!         self.world.clone()
//!     }
//! }
//!
//! let world = WorldSnapshot {
//!     agents: vec![Agent { x: 0.5, y: 0.5, rotation: 0.0 }],
//!     foods: Vec::new(),
//! };
//! let mut scheduler = FrameScheduler::new(Spinner { world }, 30.0)?;
//!
//! // Notifications faster than the ~33.3 ms frame interval are skipped.
//! assert!(scheduler.poll_at(10.0).is_none());
//! let frame = scheduler.poll_at(34.0).unwrap();
//! assert!(frame.agents[0].rotation > 0.0);
//! # Ok::<(), shoal_viewer::SchedulerError>(())
//! ```
//!
//! With the `renderer` feature enabled, `render::app::run_windowed` opens a
//! window and drives the same scheduler from redraw notifications.

#![deny(unsafe_code)]

pub mod clock;
pub mod geometry;
pub mod render;
pub mod scene;
pub mod scheduler;

pub use shoal_world;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors produced while configuring the viewer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchedulerError {
    /// The requested frame rate cannot define a frame interval.
    #[error("invalid configuration: target frame rate must be positive and finite, got {target_fps}")]
    InvalidConfiguration {
        /// The rejected frames-per-second value.
        target_fps: f64,
    },
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Common imports for viewer applications.
pub mod prelude {
    pub use crate::clock::FrameClock;
    pub use crate::geometry::{fish_outline, rotate_about, FISH_OUTLINE, FISH_TRIANGLES};
    pub use crate::scene::{build_scene, SceneVertex, Viewport};
    pub use crate::scheduler::FrameScheduler;
    pub use crate::SchedulerError;
    pub use shoal_world::prelude::*;
}
