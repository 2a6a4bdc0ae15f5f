//! GPU rendering layer, enabled with the `renderer` feature.
//!
//! When the feature is not enabled, this module compiles to nothing. The
//! `renderer` submodule owns the wgpu surface and pipeline; the `app`
//! submodule owns the winit event loop and drives a
//! [`crate::scheduler::FrameScheduler`] from redraw notifications. Nothing
//! outside this module touches a GPU type, so the rest of the crate builds
//! and tests headless.

#[cfg(feature = "renderer")]
pub mod app;
#[cfg(feature = "renderer")]
pub mod renderer;

#[cfg(feature = "renderer")]
pub use app::{run_windowed, ViewerConfig};
#[cfg(feature = "renderer")]
pub use renderer::SceneRenderer;
