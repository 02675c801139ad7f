// Host collaborator contracts
//
// The pointer is an embedded component: the owning application supplies
// the scene graph, the physics ray queries, controller button edges and
// the screen fade. These traits are the entire surface the component
// consumes from its host.

pub mod debug;

use cgmath::{vec3, Quaternion, Vector3};

/// Identity of a surface reported by the host's ray queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u64);

/// Identity of the controller a pointer event is attributed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ControllerId(pub u32);

/// Handle to a host-owned visual marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MarkerId(pub u64);

/// Result of a single nearest-hit ray query.
#[derive(Clone, Copy, Debug)]
pub struct RayHit {
    pub distance: f32,
    pub point: Vector3<f32>,
    pub surface: SurfaceId,
}

/// Synchronous nearest-hit ray queries against the host's world.
pub trait RayQuery {
    fn cast_ray(&self, origin: Vector3<f32>, direction: Vector3<f32>) -> Option<RayHit>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerShape {
    /// Invisible grouping node for parenting.
    Group,
    Sphere,
    Cube,
    Cylinder,
}

/// Description of a marker to create. Markers are lightweight visuals;
/// `blocks_rays` stays false so the pointer never raycasts into its own
/// beam.
#[derive(Clone, Copy, Debug)]
pub struct MarkerDesc {
    pub shape: MarkerShape,
    pub scale: Vector3<f32>,
    pub color: Vector3<f32>,
    pub blocks_rays: bool,
}

impl MarkerDesc {
    pub fn new(shape: MarkerShape, scale: Vector3<f32>) -> Self {
        Self {
            shape,
            scale,
            color: vec3(1.0, 1.0, 1.0),
            blocks_rays: false,
        }
    }

    pub fn with_color(mut self, color: Vector3<f32>) -> Self {
        self.color = color;
        self
    }
}

/// Scene-graph service: marker lifecycle, parenting and transforms.
pub trait SceneService {
    fn create_marker(&mut self, desc: MarkerDesc) -> MarkerId;
    fn destroy_marker(&mut self, id: MarkerId);
    /// `None` detaches the marker; its local position becomes world space.
    fn set_parent(&mut self, id: MarkerId, parent: Option<MarkerId>);
    fn set_local_position(&mut self, id: MarkerId, position: Vector3<f32>);
    fn set_rotation(&mut self, id: MarkerId, rotation: Quaternion<f32>);
    fn set_local_scale(&mut self, id: MarkerId, scale: Vector3<f32>);
    fn set_visible(&mut self, id: MarkerId, visible: bool);
    /// World position of the marker's origin through its parent chain.
    fn world_position(&self, id: MarkerId) -> Vector3<f32>;
}

/// World pose of a controller for one frame.
#[derive(Clone, Copy, Debug)]
pub struct ControllerPose {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
}

impl ControllerPose {
    pub fn new(position: Vector3<f32>, rotation: Quaternion<f32>) -> Self {
        Self { position, rotation }
    }

    /// Aim direction (-Z in controller space).
    pub fn forward(&self) -> Vector3<f32> {
        self.rotation * vec3(0.0, 0.0, -1.0)
    }
}

/// Discrete button edge delivered by the host's input layer. The pointer
/// only reacts to edges; it never polls raw button state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeKind {
    Activated,
    Deactivated,
}

#[derive(Clone, Copy, Debug)]
pub struct ControllerEdge {
    pub controller: ControllerId,
    pub edge: EdgeKind,
}

/// Fire-and-forget screen fade used when a teleport lands.
pub trait FadeEffect {
    fn fade_out(&mut self, seconds: f32);
    fn fade_in(&mut self, seconds: f32);
}

/// The rig (play space) that teleportation relocates.
pub trait PlayerRig {
    fn position(&self) -> Vector3<f32>;
    fn set_position(&mut self, position: Vector3<f32>);
    /// Eye camera position local to the rig. Teleport compensates for it
    /// so the player's head, not the rig origin, lands on the target.
    fn eye_local_position(&self) -> Vector3<f32>;
}
