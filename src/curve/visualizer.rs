use cgmath::{vec3, Vector3};

use crate::curve_log;
use crate::host::{MarkerDesc, MarkerId, MarkerShape, SceneService};

use super::CurveError;

/// Fixed pool of markers positioned along the sampled curve.
///
/// The pool is sized once and every frame each marker is snapped to the
/// matching curve sample, so showing the curve never allocates.
pub struct CurveVisualizer {
    markers: Vec<MarkerId>,
    visible: bool,
}

impl CurveVisualizer {
    pub fn new() -> Self {
        Self {
            markers: Vec::new(),
            visible: false,
        }
    }

    /// Create the marker pool: small detached spheres that rays pass
    /// through. Replaces any previously allocated pool.
    pub fn allocate(
        &mut self,
        scene: &mut dyn SceneService,
        count: usize,
        scale: f32,
        color: Vector3<f32>,
    ) {
        self.release(scene);
        self.markers = (0..count)
            .map(|_| {
                scene.create_marker(
                    MarkerDesc::new(MarkerShape::Sphere, vec3(scale, scale, scale))
                        .with_color(color),
                )
            })
            .collect();
        for &marker in &self.markers {
            scene.set_parent(marker, None);
            scene.set_visible(marker, self.visible);
        }
        curve_log!(DEBUG, "allocated {} curve markers", count);
    }

    pub fn pool_size(&self) -> usize {
        self.markers.len()
    }

    pub fn markers(&self) -> &[MarkerId] {
        &self.markers
    }

    /// Position marker `i` at `samples[i]`. The sample count must match
    /// the pool exactly; a mismatch would silently desynchronize curve
    /// and visuals, so it is rejected instead.
    pub fn update_from_samples(
        &mut self,
        scene: &mut dyn SceneService,
        samples: &[Vector3<f32>],
    ) -> Result<(), CurveError> {
        if samples.len() != self.markers.len() {
            return Err(CurveError::SampleCountMismatch {
                samples: samples.len(),
                pool: self.markers.len(),
            });
        }
        for (&marker, &sample) in self.markers.iter().zip(samples) {
            scene.set_local_position(marker, sample);
        }
        Ok(())
    }

    /// Batch show/hide. Idempotent, and a no-op while no pool exists.
    pub fn set_visible(&mut self, scene: &mut dyn SceneService, visible: bool) {
        self.visible = visible;
        for &marker in &self.markers {
            scene.set_visible(marker, visible);
        }
    }

    /// Destroy the pooled markers.
    pub fn release(&mut self, scene: &mut dyn SceneService) {
        for marker in self.markers.drain(..) {
            scene.destroy_marker(marker);
        }
    }
}

impl Default for CurveVisualizer {
    fn default() -> Self {
        Self::new()
    }
}
