//! The simulation collaborator trait.

use crate::snapshot::WorldSnapshot;

/// An external simulation the viewer can drive.
///
/// The viewer treats implementations as opaque: it calls [`step`](Self::step)
/// exactly once per emitted logical frame (never a variable number of times
/// proportional to elapsed wall-clock time -- the simulation has no concept
/// of a variable time step) and immediately queries [`world`](Self::world)
/// for the state to draw.
///
/// `step` is infallible from the viewer's perspective; a simulation that can
/// fail internally must handle that itself (e.g. by freezing its state).
pub trait Stepper {
    /// Advance internal state by exactly one discrete tick.
    fn step(&mut self);

    /// The current state as a fresh per-frame snapshot.
    fn world(&self) -> WorldSnapshot;
}
