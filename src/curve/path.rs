use cgmath::{
    vec3, EuclideanSpace, InnerSpace, Matrix4, Point3, SquareMatrix, Transform, Vector3,
};
use thiserror::Error;

use super::bezier;

/// How a joint's two tangent handles relate when one of them is edited.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TangentMode {
    /// Handles move independently.
    Free,
    /// Handles stay collinear; each keeps its own length.
    Aligned,
    /// Handles stay collinear with equal lengths.
    Mirrored,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CurveError {
    #[error("control point count {count} is not 3k+1 for k >= 1")]
    InvalidControlPointCount { count: usize },
    #[error("{samples} curve samples for a marker pool of {pool}")]
    SampleCountMismatch { samples: usize, pool: usize },
}

/// A multi-segment cubic Bezier path.
///
/// Control points are stored as `3k+1` entries: every third point is a
/// joint lying on the curve, and the points either side of a joint are
/// its tangent handles. Editing a joint drags its handles along with it;
/// editing a handle re-enforces the joint's tangent mode. When the path
/// is looped the first and last joints are the same point and tangents
/// propagate across the seam.
pub struct BezierPath {
    points: Vec<Vector3<f32>>,
    modes: Vec<TangentMode>,
    looped: bool,
    local_to_world: Matrix4<f32>,
}

impl BezierPath {
    /// A single degenerate segment at the origin; callers replace it via
    /// `set_control_points`.
    pub fn new() -> Self {
        Self {
            points: vec![vec3(0.0, 0.0, 0.0); 4],
            modes: vec![TangentMode::Free; 2],
            looped: false,
            local_to_world: Matrix4::identity(),
        }
    }

    /// Transform applied to every evaluated point and tangent.
    pub fn set_local_to_world(&mut self, matrix: Matrix4<f32>) {
        self.local_to_world = matrix;
    }

    pub fn control_point_count(&self) -> usize {
        self.points.len()
    }

    pub fn control_points(&self) -> &[Vector3<f32>] {
        &self.points
    }

    pub fn control_point(&self, index: usize) -> Vector3<f32> {
        self.points[index]
    }

    pub fn curve_count(&self) -> usize {
        (self.points.len() - 1) / 3
    }

    pub fn joint_count(&self) -> usize {
        self.curve_count() + 1
    }

    pub fn is_joint(index: usize) -> bool {
        index % 3 == 0
    }

    pub fn looped(&self) -> bool {
        self.looped
    }

    /// Mode of the joint nearest the given control-point index.
    pub fn tangent_mode(&self, index: usize) -> TangentMode {
        self.modes[Self::mode_index(index)]
    }

    /// Indices of the handles either side of a joint, wrapping through
    /// the seam when looped; `None` past an open end.
    pub fn handle_indices_for(&self, joint: usize) -> (Option<usize>, Option<usize>) {
        let index = joint * 3;
        let last = self.points.len() - 1;
        let before = if index > 0 {
            Some(index - 1)
        } else if self.looped {
            Some(last - 1)
        } else {
            None
        };
        let after = if index < last {
            Some(index + 1)
        } else if self.looped {
            Some(1)
        } else {
            None
        };
        (before, after)
    }

    /// Replace the whole control-point sequence. Every joint's tangent
    /// mode resets to `Free`. Counts that are not `3k+1` (k >= 1) would
    /// leave a partial segment and are rejected outright.
    pub fn set_control_points(&mut self, points: Vec<Vector3<f32>>) -> Result<(), CurveError> {
        let count = points.len();
        if count < 4 || count % 3 != 1 {
            return Err(CurveError::InvalidControlPointCount { count });
        }
        self.points = points;
        self.modes = vec![TangentMode::Free; self.joint_count()];
        if self.looped {
            // re-identify the seam joints
            let first = self.points[0];
            self.set_control_point(0, first);
        }
        Ok(())
    }

    /// Move one control point. Moving a joint translates both adjacent
    /// handles by the same delta, keeping their tangent offsets; at the
    /// seam of a looped path the identified first/last joints move as
    /// one. Finishes by re-enforcing the affected joint's tangent mode.
    pub fn set_control_point(&mut self, index: usize, position: Vector3<f32>) {
        if Self::is_joint(index) {
            let delta = position - self.points[index];
            let last = self.points.len() - 1;
            if self.looped {
                if index == 0 {
                    self.points[1] += delta;
                    self.points[last - 1] += delta;
                    self.points[last] = position;
                } else if index == last {
                    self.points[0] = position;
                    self.points[1] += delta;
                    self.points[index - 1] += delta;
                } else {
                    self.points[index - 1] += delta;
                    self.points[index + 1] += delta;
                }
            } else {
                if index > 0 {
                    self.points[index - 1] += delta;
                }
                if index < last {
                    self.points[index + 1] += delta;
                }
            }
        }
        self.points[index] = position;
        self.enforce_mode(index);
    }

    /// Set the tangent mode of the joint nearest `index`. On a looped
    /// path the identified first/last joints share one mode.
    pub fn set_tangent_mode(&mut self, index: usize, mode: TangentMode) {
        let mode_index = Self::mode_index(index);
        self.modes[mode_index] = mode;
        if self.looped {
            let last = self.modes.len() - 1;
            if mode_index == 0 {
                self.modes[last] = mode;
            } else if mode_index == last {
                self.modes[0] = mode;
            }
        }
        self.enforce_mode(index);
    }

    /// Toggle looping. Enabling forces the last joint onto the first and
    /// propagates the first joint's mode across the seam.
    pub fn set_looped(&mut self, looped: bool) {
        self.looped = looped;
        if looped {
            let last = self.modes.len() - 1;
            self.modes[last] = self.modes[0];
            let first = self.points[0];
            self.set_control_point(0, first);
        }
    }

    /// Re-align the handle opposite the most recent edit around the
    /// joint nearest `index`. The joint itself is never moved; only the
    /// enforced handle is rewritten from the fixed handle and the joint.
    pub fn enforce_mode(&mut self, index: usize) {
        let mode_index = Self::mode_index(index);
        let mode = self.modes[mode_index];
        let endpoint = mode_index == 0 || mode_index == self.modes.len() - 1;
        if mode == TangentMode::Free || (!self.looped && endpoint) {
            return;
        }

        let joint = mode_index * 3;
        let last = self.points.len() - 1;
        // The edited side stays fixed and the opposite handle is
        // rewritten. Around the seam of a loop, the handle before joint 0
        // is the one before the last joint, and the handle after the last
        // joint is index 1.
        let (fixed, enforced) = if index <= joint {
            (
                if joint == 0 { last - 1 } else { joint - 1 },
                if joint == last { 1 } else { joint + 1 },
            )
        } else {
            (
                if joint == last { 1 } else { joint + 1 },
                if joint == 0 { last - 1 } else { joint - 1 },
            )
        };

        let middle = self.points[joint];
        let mut tangent = middle - self.points[fixed];
        if mode == TangentMode::Aligned && tangent.magnitude2() > f32::EPSILON {
            tangent = tangent.normalize() * (middle - self.points[enforced]).magnitude();
        }
        self.points[enforced] = middle + tangent;
    }

    /// World-space point at global `t` across all segments.
    pub fn point_at(&self, t: f32) -> Vector3<f32> {
        let (i, t) = self.segment_parameter(t);
        let local = bezier::cubic_point(
            self.points[i],
            self.points[i + 1],
            self.points[i + 2],
            self.points[i + 3],
            t,
        );
        self.local_to_world
            .transform_point(Point3::from_vec(local))
            .to_vec()
    }

    /// World-space tangent (unnormalized) at global `t`.
    pub fn velocity_at(&self, t: f32) -> Vector3<f32> {
        let (i, t) = self.segment_parameter(t);
        let local = bezier::cubic_derivative(
            self.points[i],
            self.points[i + 1],
            self.points[i + 2],
            self.points[i + 3],
            t,
        );
        self.local_to_world.transform_vector(local)
    }

    /// Normalized direction of travel at global `t`.
    pub fn direction_at(&self, t: f32) -> Vector3<f32> {
        self.velocity_at(t).normalize()
    }

    /// `n` evenly spaced world-space samples over the whole path. Open
    /// paths include both endpoints; looped paths stop one step short of
    /// the seam so the first sample is not duplicated.
    pub fn sample_even(&self, n: usize) -> Vec<Vector3<f32>> {
        let step = if self.looped || n == 1 {
            1.0 / n as f32
        } else {
            1.0 / (n - 1) as f32
        };
        (0..n).map(|i| self.point_at(i as f32 * step)).collect()
    }

    fn mode_index(index: usize) -> usize {
        (index + 1) / 3
    }

    // Global t maps to (first point of segment, local t); t >= 1 lands on
    // the last segment at t = 1 instead of running off the end.
    fn segment_parameter(&self, t: f32) -> (usize, f32) {
        if t >= 1.0 {
            (self.points.len() - 4, 1.0)
        } else {
            let scaled = t.max(0.0) * self.curve_count() as f32;
            let segment = scaled.floor() as usize;
            (segment * 3, scaled - segment as f32)
        }
    }
}

impl Default for BezierPath {
    fn default() -> Self {
        Self::new()
    }
}
