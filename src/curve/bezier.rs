//! Pure Bezier evaluation. `t` is clamped to [0, 1] rather than
//! rejected; out-of-range parameters are routine when a caller walks
//! slightly past a curve end.

use cgmath::Vector3;

/// Quadratic Bezier position at `t`.
pub fn quadratic_point(
    p0: Vector3<f32>,
    p1: Vector3<f32>,
    p2: Vector3<f32>,
    t: f32,
) -> Vector3<f32> {
    let t = t.clamp(0.0, 1.0);
    let u = 1.0 - t;
    p0 * (u * u) + p1 * (2.0 * u * t) + p2 * (t * t)
}

/// First derivative of the quadratic Bezier at `t` (unnormalized tangent).
pub fn quadratic_derivative(
    p0: Vector3<f32>,
    p1: Vector3<f32>,
    p2: Vector3<f32>,
    t: f32,
) -> Vector3<f32> {
    let t = t.clamp(0.0, 1.0);
    (p1 - p0) * (2.0 * (1.0 - t)) + (p2 - p1) * (2.0 * t)
}

/// Cubic Bezier position at `t`.
pub fn cubic_point(
    p0: Vector3<f32>,
    p1: Vector3<f32>,
    p2: Vector3<f32>,
    p3: Vector3<f32>,
    t: f32,
) -> Vector3<f32> {
    let t = t.clamp(0.0, 1.0);
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

/// First derivative of the cubic Bezier at `t` (unnormalized tangent).
pub fn cubic_derivative(
    p0: Vector3<f32>,
    p1: Vector3<f32>,
    p2: Vector3<f32>,
    p3: Vector3<f32>,
    t: f32,
) -> Vector3<f32> {
    let t = t.clamp(0.0, 1.0);
    let u = 1.0 - t;
    (p1 - p0) * (3.0 * u * u) + (p2 - p1) * (6.0 * u * t) + (p3 - p2) * (3.0 * t * t)
}
