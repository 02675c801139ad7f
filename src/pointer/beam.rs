use cgmath::{vec3, Vector3};

use crate::host::{
    ControllerPose, MarkerDesc, MarkerId, MarkerShape, RayQuery, SceneService, SurfaceId,
};

/// Which local axis of the host's beam primitives runs along the beam;
/// controller models differ in which way their mesh points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisType {
    X,
    Z,
}

impl AxisType {
    fn along(self, length: f32) -> Vector3<f32> {
        match self {
            AxisType::X => vec3(length, 0.0, 0.0),
            AxisType::Z => vec3(0.0, 0.0, -length),
        }
    }

    fn stretched(self, length: f32, thickness: f32) -> Vector3<f32> {
        match self {
            AxisType::X => vec3(length, thickness, thickness),
            AxisType::Z => vec3(thickness, thickness, length),
        }
    }
}

/// Geometry and color of the beam segments.
#[derive(Clone, Copy, Debug)]
pub struct BeamConfig {
    pub max_length: f32,
    pub thickness: f32,
    pub joint_scale: f32,
    pub down_marker_scale: f32,
    pub facing_axis: AxisType,
    pub color: Vector3<f32>,
}

impl Default for BeamConfig {
    fn default() -> Self {
        Self {
            max_length: 10.0,
            thickness: 0.01,
            joint_scale: 0.01,
            down_marker_scale: 0.1,
            facing_axis: AxisType::Z,
            color: vec3(0.0, 0.8, 1.0),
        }
    }
}

/// Result of the forward stage.
#[derive(Clone, Copy, Debug)]
pub struct ForwardBeam {
    /// Length the beam renders at this frame.
    pub length: f32,
    pub surface: Option<SurfaceId>,
    /// Distance to the obstruction; 0 when unobstructed.
    pub distance: f32,
}

/// Result of the drop stage.
#[derive(Clone, Copy, Debug)]
pub struct DownBeam {
    pub surface: Option<SurfaceId>,
    /// World-space landing point; only meaningful when `surface` is set.
    pub landing: Vector3<f32>,
}

/// The two-stage projected beam: a stretched forward segment hanging off
/// the controller and a drop from the forward beam's end joint onto
/// whatever lies below it. All geometry is recomputed every active frame.
pub struct BeamProjector {
    config: BeamConfig,
    contact_distance: f32,
    root: MarkerId,
    forward: MarkerId,
    joint: MarkerId,
    down: MarkerId,
}

impl BeamProjector {
    pub fn new(scene: &mut dyn SceneService, config: BeamConfig) -> Self {
        let root = scene.create_marker(MarkerDesc::new(MarkerShape::Group, vec3(1.0, 1.0, 1.0)));
        let forward = scene.create_marker(
            MarkerDesc::new(
                MarkerShape::Cube,
                config.facing_axis.stretched(config.max_length, config.thickness),
            )
            .with_color(config.color),
        );
        let joint = scene.create_marker(
            MarkerDesc::new(
                MarkerShape::Cube,
                vec3(config.joint_scale, config.joint_scale, config.joint_scale),
            )
            .with_color(config.color),
        );
        let down = scene.create_marker(
            MarkerDesc::new(
                MarkerShape::Cube,
                vec3(
                    config.down_marker_scale,
                    config.down_marker_scale,
                    config.down_marker_scale,
                ),
            )
            .with_color(config.color),
        );
        scene.set_parent(forward, Some(root));
        scene.set_parent(joint, Some(root));
        // the down marker tracks the landing point in world space
        scene.set_parent(down, None);
        Self {
            config,
            contact_distance: 0.0,
            root,
            forward,
            joint,
            down,
        }
    }

    pub fn joint_marker(&self) -> MarkerId {
        self.joint
    }

    pub fn contact_distance(&self) -> f32 {
        self.contact_distance
    }

    /// Forward stage: cast along the controller's aim and restretch the
    /// forward segment. The running contact distance resets whenever the
    /// beam stops hitting, or hits something other than
    /// `previous_target`, so a beam leaving a surface never renders
    /// through it; unobstructed, the beam extends to its full length.
    pub fn project_forward(
        &mut self,
        scene: &mut dyn SceneService,
        rays: &dyn RayQuery,
        pose: &ControllerPose,
        previous_target: Option<SurfaceId>,
    ) -> ForwardBeam {
        let hit = rays.cast_ray(pose.position, pose.forward());

        let moved_off = match (hit, previous_target) {
            (Some(hit), Some(previous)) => hit.surface != previous,
            _ => false,
        };
        if hit.is_none() || moved_off {
            self.contact_distance = 0.0;
        }
        if let Some(hit) = hit {
            self.contact_distance = hit.distance;
        }

        let length = if hit.is_some() && self.contact_distance < self.config.max_length {
            self.contact_distance
        } else {
            self.config.max_length
        };

        let axis = self.config.facing_axis;
        scene.set_local_position(self.root, pose.position);
        scene.set_rotation(self.root, pose.rotation);
        scene.set_local_scale(self.forward, axis.stretched(length, self.config.thickness));
        scene.set_local_position(self.forward, axis.along(length / 2.0));
        // keep the joint cube just inside the beam end
        scene.set_local_position(
            self.joint,
            axis.along(length - self.config.joint_scale / 2.0),
        );

        ForwardBeam {
            length,
            surface: hit.map(|h| h.surface),
            distance: hit.map_or(0.0, |h| h.distance),
        }
    }

    /// Drop stage: cast straight down from the joint's world position and
    /// park the down marker on whatever the cast lands on.
    pub fn project_down(&mut self, scene: &mut dyn SceneService, rays: &dyn RayQuery) -> DownBeam {
        let joint = scene.world_position(self.joint);
        let hit = rays.cast_ray(joint, vec3(0.0, -1.0, 0.0));
        let landing = hit.map_or(joint, |h| vec3(joint.x, joint.y - h.distance, joint.z));
        scene.set_local_position(self.down, landing);
        DownBeam {
            surface: hit.map(|h| h.surface),
            landing,
        }
    }

    pub fn set_visible(&mut self, scene: &mut dyn SceneService, visible: bool) {
        scene.set_visible(self.forward, visible);
        scene.set_visible(self.joint, visible);
        scene.set_visible(self.down, visible);
    }

    pub fn release(&mut self, scene: &mut dyn SceneService) {
        for id in [self.down, self.joint, self.forward, self.root] {
            scene.destroy_marker(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::debug::{DebugScene, DebugWorld};
    use approx::assert_relative_eq;
    use cgmath::Quaternion;

    fn identity_pose(position: Vector3<f32>) -> ControllerPose {
        ControllerPose::new(position, Quaternion::new(1.0, 0.0, 0.0, 0.0))
    }

    #[test]
    fn test_unobstructed_beam_extends_to_max_length() {
        let mut scene = DebugScene::new();
        let world = DebugWorld::new();
        let mut beam = BeamProjector::new(&mut scene, BeamConfig::default());

        let result =
            beam.project_forward(&mut scene, &world, &identity_pose(vec3(0.0, 1.0, 0.0)), None);

        assert_relative_eq!(result.length, 10.0);
        assert_eq!(result.surface, None);
        assert_relative_eq!(result.distance, 0.0);
        assert_relative_eq!(beam.contact_distance(), 0.0);
    }

    #[test]
    fn test_obstruction_shortens_the_beam() {
        let mut scene = DebugScene::new();
        let mut world = DebugWorld::new();
        // wall 4 units ahead along -Z
        world.add_plane(SurfaceId(5), vec3(0.0, 0.0, -4.0), vec3(0.0, 0.0, 1.0));
        let mut beam = BeamProjector::new(&mut scene, BeamConfig::default());

        let result =
            beam.project_forward(&mut scene, &world, &identity_pose(vec3(0.0, 1.0, 0.0)), None);

        assert_relative_eq!(result.length, 4.0);
        assert_eq!(result.surface, Some(SurfaceId(5)));
        assert_relative_eq!(beam.contact_distance(), 4.0);
    }

    #[test]
    fn test_joint_sits_just_inside_the_beam_end() {
        let mut scene = DebugScene::new();
        let world = DebugWorld::new();
        let config = BeamConfig::default();
        let mut beam = BeamProjector::new(&mut scene, config);

        beam.project_forward(&mut scene, &world, &identity_pose(vec3(1.0, 2.0, 3.0)), None);

        let joint = scene.world_position(beam.joint_marker());
        assert_relative_eq!(joint.x, 1.0);
        assert_relative_eq!(joint.y, 2.0);
        assert_relative_eq!(
            joint.z,
            3.0 - (config.max_length - config.joint_scale / 2.0),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_x_axis_stretches_along_x() {
        let mut scene = DebugScene::new();
        let world = DebugWorld::new();
        let config = BeamConfig {
            facing_axis: AxisType::X,
            ..BeamConfig::default()
        };
        let mut beam = BeamProjector::new(&mut scene, config);

        beam.project_forward(&mut scene, &world, &identity_pose(vec3(0.0, 0.0, 0.0)), None);

        let joint = scene.world_position(beam.joint_marker());
        assert_relative_eq!(joint.x, config.max_length - config.joint_scale / 2.0);
        assert_relative_eq!(joint.z, 0.0);
    }

    #[test]
    fn test_down_cast_lands_on_floor() {
        let mut scene = DebugScene::new();
        let world = DebugWorld::with_floor(SurfaceId(7), 0.0);
        let mut beam = BeamProjector::new(&mut scene, BeamConfig::default());

        beam.project_forward(&mut scene, &world, &identity_pose(vec3(0.0, 5.0, 0.0)), None);
        let down = beam.project_down(&mut scene, &world);

        assert_eq!(down.surface, Some(SurfaceId(7)));
        assert_relative_eq!(down.landing.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(down.landing.x, 0.0);
    }

    #[test]
    fn test_down_cast_misses_below_world() {
        let mut scene = DebugScene::new();
        let world = DebugWorld::with_floor(SurfaceId(7), 0.0);
        let mut beam = BeamProjector::new(&mut scene, BeamConfig::default());

        beam.project_forward(
            &mut scene,
            &world,
            &identity_pose(vec3(0.0, -2.0, 0.0)),
            None,
        );
        let down = beam.project_down(&mut scene, &world);

        assert_eq!(down.surface, None);
        // the landing point stays at the joint when nothing is below
        let joint = scene.world_position(beam.joint_marker());
        assert_relative_eq!(down.landing, joint);
    }
}
