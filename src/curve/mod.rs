// Bezier curve evaluation, editing and visualization.

pub mod bezier;
pub mod path;
pub mod visualizer;

pub use path::{BezierPath, CurveError, TangentMode};
pub use visualizer::CurveVisualizer;
