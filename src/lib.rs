// Curved-beam destination pointer
//
// A controller-held pointer that projects a beam forward, drops a second
// beam from the forward beam's end onto whatever lies below, and bends a
// cubic Bezier curve from the controller to the landing point. Hosts
// supply the scene graph, ray queries, controller button edges and the
// screen fade; this crate owns the curve math, the beam projection, the
// target transition events and the teleport consumer.

pub mod curve;
pub mod host;
pub mod logging;
pub mod pointer;
pub mod teleport;

pub use curve::{BezierPath, CurveError, CurveVisualizer, TangentMode};
pub use host::{
    ControllerEdge, ControllerId, ControllerPose, EdgeKind, FadeEffect, MarkerDesc, MarkerId,
    MarkerShape, PlayerRig, RayHit, RayQuery, SceneService, SurfaceId,
};
pub use pointer::{
    AxisType, BeamConfig, BeamProjector, BezierPointer, PointerConfig, PointerError, PointerEvent,
    PointerEvents, TargetTracker,
};
pub use teleport::{BasicTeleport, BindState, TeleportConfig};
