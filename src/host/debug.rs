// In-memory host used by tests and headless experiments: a marker store
// with parent chains and a world made of infinite planes, the same way
// the debug scenes stand in for a full mission.

use std::collections::HashMap;

use cgmath::{InnerSpace, Quaternion, Vector3, Zero};

use super::{
    FadeEffect, MarkerDesc, MarkerId, PlayerRig, RayHit, RayQuery, SceneService, SurfaceId,
};

struct MarkerState {
    desc: MarkerDesc,
    parent: Option<MarkerId>,
    local_position: Vector3<f32>,
    rotation: Quaternion<f32>,
    scale: Vector3<f32>,
    visible: bool,
}

/// Marker store implementing `SceneService` without a renderer.
#[derive(Default)]
pub struct DebugScene {
    markers: HashMap<u64, MarkerState>,
    next_id: u64,
}

impl DebugScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn is_visible(&self, id: MarkerId) -> bool {
        self.markers.get(&id.0).is_some_and(|m| m.visible)
    }

    pub fn local_position(&self, id: MarkerId) -> Vector3<f32> {
        self.markers
            .get(&id.0)
            .map_or(Vector3::zero(), |m| m.local_position)
    }

    pub fn local_scale(&self, id: MarkerId) -> Vector3<f32> {
        self.markers.get(&id.0).map_or(Vector3::zero(), |m| m.scale)
    }

    pub fn descriptor(&self, id: MarkerId) -> Option<MarkerDesc> {
        self.markers.get(&id.0).map(|m| m.desc)
    }

    fn resolve(&self, id: MarkerId) -> (Vector3<f32>, Quaternion<f32>) {
        match self.markers.get(&id.0) {
            None => (Vector3::zero(), Quaternion::new(1.0, 0.0, 0.0, 0.0)),
            Some(marker) => match marker.parent {
                None => (marker.local_position, marker.rotation),
                Some(parent) => {
                    let (parent_position, parent_rotation) = self.resolve(parent);
                    (
                        parent_position + parent_rotation * marker.local_position,
                        parent_rotation * marker.rotation,
                    )
                }
            },
        }
    }
}

impl SceneService for DebugScene {
    fn create_marker(&mut self, desc: MarkerDesc) -> MarkerId {
        let id = MarkerId(self.next_id);
        self.next_id += 1;
        self.markers.insert(
            id.0,
            MarkerState {
                scale: desc.scale,
                desc,
                parent: None,
                local_position: Vector3::zero(),
                rotation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
                visible: true,
            },
        );
        id
    }

    fn destroy_marker(&mut self, id: MarkerId) {
        self.markers.remove(&id.0);
    }

    fn set_parent(&mut self, id: MarkerId, parent: Option<MarkerId>) {
        if let Some(marker) = self.markers.get_mut(&id.0) {
            marker.parent = parent;
        }
    }

    fn set_local_position(&mut self, id: MarkerId, position: Vector3<f32>) {
        if let Some(marker) = self.markers.get_mut(&id.0) {
            marker.local_position = position;
        }
    }

    fn set_rotation(&mut self, id: MarkerId, rotation: Quaternion<f32>) {
        if let Some(marker) = self.markers.get_mut(&id.0) {
            marker.rotation = rotation;
        }
    }

    fn set_local_scale(&mut self, id: MarkerId, scale: Vector3<f32>) {
        if let Some(marker) = self.markers.get_mut(&id.0) {
            marker.scale = scale;
        }
    }

    fn set_visible(&mut self, id: MarkerId, visible: bool) {
        if let Some(marker) = self.markers.get_mut(&id.0) {
            marker.visible = visible;
        }
    }

    fn world_position(&self, id: MarkerId) -> Vector3<f32> {
        self.resolve(id).0
    }
}

/// One infinite plane a ray can land on.
#[derive(Clone, Copy, Debug)]
pub struct DebugPlane {
    pub surface: SurfaceId,
    pub point: Vector3<f32>,
    pub normal: Vector3<f32>,
}

/// A world of planes answering nearest-hit ray queries.
#[derive(Default)]
pub struct DebugWorld {
    planes: Vec<DebugPlane>,
}

impl DebugWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// A world with a horizontal floor at the given height.
    pub fn with_floor(surface: SurfaceId, height: f32) -> Self {
        let mut world = Self::new();
        world.add_plane(
            surface,
            Vector3::new(0.0, height, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        );
        world
    }

    pub fn add_plane(&mut self, surface: SurfaceId, point: Vector3<f32>, normal: Vector3<f32>) {
        self.planes.push(DebugPlane {
            surface,
            point,
            normal: normal.normalize(),
        });
    }
}

impl RayQuery for DebugWorld {
    fn cast_ray(&self, origin: Vector3<f32>, direction: Vector3<f32>) -> Option<RayHit> {
        let direction = direction.normalize();
        let mut nearest: Option<RayHit> = None;
        for plane in &self.planes {
            let denom = plane.normal.dot(direction);
            if denom.abs() < 1e-6 {
                continue;
            }
            let t = (plane.point - origin).dot(plane.normal) / denom;
            if t < 0.0 {
                continue;
            }
            if nearest.map_or(true, |hit| t < hit.distance) {
                nearest = Some(RayHit {
                    distance: t,
                    point: origin + direction * t,
                    surface: plane.surface,
                });
            }
        }
        nearest
    }
}

/// Rig double recording where teleportation puts it.
pub struct DebugRig {
    position: Vector3<f32>,
    eye_offset: Vector3<f32>,
}

impl DebugRig {
    pub fn new(position: Vector3<f32>, eye_offset: Vector3<f32>) -> Self {
        Self {
            position,
            eye_offset,
        }
    }
}

impl PlayerRig for DebugRig {
    fn position(&self) -> Vector3<f32> {
        self.position
    }

    fn set_position(&mut self, position: Vector3<f32>) {
        self.position = position;
    }

    fn eye_local_position(&self) -> Vector3<f32> {
        self.eye_offset
    }
}

/// Records fade calls instead of rendering them.
#[derive(Default)]
pub struct DebugFade {
    pub fade_outs: Vec<f32>,
    pub fade_ins: Vec<f32>,
}

impl FadeEffect for DebugFade {
    fn fade_out(&mut self, seconds: f32) {
        self.fade_outs.push(seconds);
    }

    fn fade_in(&mut self, seconds: f32) {
        self.fade_ins.push(seconds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MarkerShape;
    use cgmath::{vec3, Deg, Rotation3};

    #[test]
    fn test_world_position_follows_parent_chain() {
        let mut scene = DebugScene::new();
        let root = scene.create_marker(MarkerDesc::new(MarkerShape::Group, vec3(1.0, 1.0, 1.0)));
        let child = scene.create_marker(MarkerDesc::new(MarkerShape::Cube, vec3(1.0, 1.0, 1.0)));
        scene.set_parent(child, Some(root));
        scene.set_local_position(root, vec3(1.0, 2.0, 3.0));
        scene.set_rotation(root, Quaternion::from_angle_y(Deg(90.0)));
        scene.set_local_position(child, vec3(0.0, 0.0, -1.0));

        let world = scene.world_position(child);
        // ninety degrees about Y turns -Z into -X
        assert!((world.x - 0.0).abs() < 1e-5);
        assert!((world.y - 2.0).abs() < 1e-5);
        assert!((world.z - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_nearest_plane_wins() {
        let mut world = DebugWorld::with_floor(SurfaceId(1), 0.0);
        world.add_plane(SurfaceId(2), vec3(0.0, 3.0, 0.0), vec3(0.0, 1.0, 0.0));

        let hit = world
            .cast_ray(vec3(0.0, 5.0, 0.0), vec3(0.0, -1.0, 0.0))
            .unwrap();
        assert_eq!(hit.surface, SurfaceId(2));
        assert!((hit.distance - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_ray_misses_plane_behind_origin() {
        let world = DebugWorld::with_floor(SurfaceId(1), 0.0);
        assert!(world
            .cast_ray(vec3(0.0, -1.0, 0.0), vec3(0.0, -1.0, 0.0))
            .is_none());
    }
}
