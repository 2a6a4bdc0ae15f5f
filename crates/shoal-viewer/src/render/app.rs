//! Windowed application runner.
//!
//! Provides [`run_windowed`], which takes ownership of a
//! [`FrameScheduler`] and drives it inside a winit event loop. Every
//! `RedrawRequested` event is one display notification: the scheduler
//! decides whether it becomes a frame, and the renderer presents the most
//! recent frame either way, so presentation stays paced by the display
//! while the world advances at the configured rate.
//!
//! This module is feature-gated behind `renderer`.

use std::sync::Arc;
use std::time::Instant;

use shoal_world::snapshot::WorldSnapshot;
use shoal_world::stepper::Stepper;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{WindowAttributes, WindowId};

use super::renderer::SceneRenderer;
use crate::scene::Viewport;
use crate::scheduler::FrameScheduler;

/// Window configuration for [`run_windowed`].
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Title for the OS window.
    pub title: String,
    /// Logical viewport width in surface units.
    pub viewport_width: f32,
    /// Logical viewport height in surface units.
    pub viewport_height: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "shoal".to_owned(),
            viewport_width: 800.0,
            viewport_height: 600.0,
        }
    }
}

/// Run a frame scheduler in a window.
///
/// Takes ownership of the scheduler and blocks until the window is closed
/// or the scheduler stops. The window is created at the configured logical
/// size and is not resizable; the surface picks up the monitor's scale
/// factor.
///
/// # Errors
///
/// Returns an error if the event loop cannot be created or if the window
/// or GPU renderer fails to initialize.
pub fn run_windowed<S: Stepper>(
    scheduler: FrameScheduler<S>,
    config: ViewerConfig,
) -> Result<(), anyhow::Error> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(winit::event_loop::ControlFlow::Poll);

    let mut app = App {
        state: AppState::Pending { scheduler, config },
        init_failed: false,
    };

    event_loop.run_app(&mut app)?;

    if app.init_failed {
        return Err(anyhow::anyhow!(
            "failed to initialize windowed viewer (see logs for details)"
        ));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Internal state machine
// ---------------------------------------------------------------------------

/// Internal state of the windowed app.
///
/// Winit 0.30 requires that window creation happens inside the
/// `ApplicationHandler::resumed` callback, so we use a two-phase state
/// machine: `Pending` (before window creation) and `Running` (window +
/// renderer are initialized).
enum AppState<S> {
    /// Waiting for `resumed` to create the window and renderer.
    Pending {
        scheduler: FrameScheduler<S>,
        config: ViewerConfig,
    },
    /// Window and renderer are initialized; notifications are flowing.
    Running {
        scheduler: FrameScheduler<S>,
        renderer: SceneRenderer,
        /// The most recently emitted frame, re-presented on notifications
        /// the scheduler skips.
        frame: WorldSnapshot,
    },
    /// Temporary placeholder used during state transitions.
    Transitioning,
}

/// The winit application handler that feeds notifications to the scheduler.
struct App<S> {
    state: AppState<S>,
    /// Set to `true` if initialization fails (window or renderer), so
    /// `run_windowed` can return an error after the event loop exits.
    init_failed: bool,
}

impl<S: Stepper> ApplicationHandler for App<S> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // Only transition from Pending -> Running.
        let state = std::mem::replace(&mut self.state, AppState::Transitioning);
        match state {
            AppState::Pending { scheduler, config } => {
                let window_attrs = WindowAttributes::default()
                    .with_title(config.title.clone())
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        f64::from(config.viewport_width),
                        f64::from(config.viewport_height),
                    ))
                    .with_resizable(false);

                match event_loop.create_window(window_attrs) {
                    Ok(window) => {
                        let window = Arc::new(window);
                        let viewport = Viewport::new(
                            config.viewport_width,
                            config.viewport_height,
                            window.scale_factor() as f32,
                        );
                        match pollster::block_on(SceneRenderer::new(window.clone(), viewport)) {
                            Ok(renderer) => {
                                tracing::info!(
                                    title = %config.title,
                                    width = config.viewport_width,
                                    height = config.viewport_height,
                                    "viewer window created successfully"
                                );
                                // Kick off the first notification so the loop
                                // starts even on backends that don't send an
                                // initial RedrawRequested event.
                                window.request_redraw();
                                let frame = scheduler.stepper().world();
                                self.state = AppState::Running {
                                    scheduler,
                                    renderer,
                                    frame,
                                };
                            }
                            Err(e) => {
                                tracing::error!(error = %e, "failed to initialize renderer -- exiting");
                                self.init_failed = true;
                                self.state = AppState::Pending { scheduler, config };
                                event_loop.exit();
                            }
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "failed to create window -- exiting");
                        self.init_failed = true;
                        self.state = AppState::Pending { scheduler, config };
                        event_loop.exit();
                    }
                }
            }
            AppState::Running {
                scheduler,
                renderer,
                frame,
            } => {
                // Already running; put state back.
                self.state = AppState::Running {
                    scheduler,
                    renderer,
                    frame,
                };
            }
            AppState::Transitioning => {
                // Should not happen; no-op.
                tracing::warn!("resumed called during state transition");
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match &mut self.state {
            AppState::Running {
                scheduler,
                renderer,
                frame,
            } => match event {
                WindowEvent::CloseRequested => {
                    tracing::info!(
                        frames = scheduler.clock().frames(),
                        notifications = scheduler.clock().notifications(),
                        "window close requested -- shutting down"
                    );
                    scheduler.stop();
                    event_loop.exit();
                }
                WindowEvent::Resized(new_size) => {
                    tracing::debug!(
                        width = new_size.width,
                        height = new_size.height,
                        "surface resized"
                    );
                    renderer.resize(new_size);
                }
                WindowEvent::RedrawRequested => {
                    // One notification: step the world if a frame is due.
                    if let Some(snapshot) = scheduler.poll(Instant::now()) {
                        *frame = snapshot;
                    }

                    // Present the latest frame either way. Presentation at
                    // display rate keeps notifications flowing at display
                    // rate under AutoVsync.
                    match renderer.render_snapshot(frame) {
                        Ok(()) => {}
                        Err(wgpu::SurfaceError::Lost) => {
                            // Reconfigure surface on loss.
                            let size = renderer.window().inner_size();
                            renderer.resize(size);
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            tracing::error!("GPU out of memory -- exiting");
                            scheduler.stop();
                            event_loop.exit();
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "surface error during render");
                        }
                    }

                    // Request the next notification, unless stopped.
                    if scheduler.is_stopped() {
                        event_loop.exit();
                    } else {
                        renderer.window().request_redraw();
                    }
                }
                _ => {}
            },
            _ => {
                // Not yet initialized; ignore window events.
            }
        }
    }
}
