// Projected-beam pointer: two-stage beam casting, contact-target
// tracking and the controller-driven state machine that ties them to the
// rendered curve.

pub mod beam;
pub mod bezier_pointer;
pub mod events;
pub mod tracker;

pub use beam::{AxisType, BeamConfig, BeamProjector, DownBeam, ForwardBeam};
pub use bezier_pointer::{BezierPointer, PointerConfig};
pub use events::{PointerEvent, PointerEvents, PointerListener};
pub use tracker::TargetTracker;

use thiserror::Error;

use crate::curve::CurveError;

/// Errors surfaced by per-frame pointer updates.
#[derive(Debug, Error)]
pub enum PointerError {
    #[error(transparent)]
    Curve(#[from] CurveError),
}
