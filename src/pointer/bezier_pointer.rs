use cgmath::{vec3, Vector3};

use crate::curve::{BezierPath, CurveVisualizer};
use crate::host::{
    ControllerEdge, ControllerId, ControllerPose, EdgeKind, MarkerDesc, MarkerId, MarkerShape,
    RayQuery, SceneService, SurfaceId,
};
use crate::pointer_log;

use super::beam::{BeamConfig, BeamProjector};
use super::events::{PointerEvent, PointerEvents, PointerListener};
use super::tracker::TargetTracker;
use super::PointerError;

/// Tuning for a curved pointer.
#[derive(Clone, Copy, Debug)]
pub struct PointerConfig {
    pub beam: BeamConfig,
    /// Markers along the rendered curve.
    pub curve_pool_size: usize,
    pub curve_marker_scale: f32,
    pub curve_color: Vector3<f32>,
    pub show_cursor: bool,
    pub cursor_scale: Vector3<f32>,
    pub cursor_color: Vector3<f32>,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            beam: BeamConfig::default(),
            curve_pool_size: 10,
            curve_marker_scale: 0.1,
            curve_color: vec3(0.0, 0.8, 1.0),
            show_cursor: true,
            cursor_scale: vec3(0.5, 0.02, 0.5),
            cursor_color: vec3(0.1, 0.9, 1.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PointerState {
    Idle,
    Active,
}

/// Curved destination pointer driven by controller activate/deactivate
/// edges.
///
/// While active it projects the two-stage beam every frame, bends the
/// Bezier curve from the controller down to the landing point and
/// reports contact-target transitions; the deactivate edge selects
/// whatever the beam currently rests on as the destination. There is no
/// timeout: the deactivate edge is the only way out of the active state.
pub struct BezierPointer {
    config: PointerConfig,
    state: PointerState,
    controller: ControllerId,
    beam: BeamProjector,
    tracker: TargetTracker,
    path: BezierPath,
    curve: CurveVisualizer,
    cursor: MarkerId,
    landing: Vector3<f32>,
    events: PointerEvents,
}

impl BezierPointer {
    pub fn new(scene: &mut dyn SceneService, config: PointerConfig) -> Self {
        let beam = BeamProjector::new(scene, config.beam);
        let mut curve = CurveVisualizer::new();
        curve.allocate(
            scene,
            config.curve_pool_size,
            config.curve_marker_scale,
            config.curve_color,
        );
        let cursor = scene.create_marker(
            MarkerDesc::new(MarkerShape::Cylinder, config.cursor_scale)
                .with_color(config.cursor_color),
        );

        let mut pointer = Self {
            config,
            state: PointerState::Idle,
            controller: ControllerId(0),
            beam,
            tracker: TargetTracker::new(),
            path: BezierPath::new(),
            curve,
            cursor,
            landing: vec3(0.0, 0.0, 0.0),
            events: PointerEvents::new(),
        };
        pointer.toggle_visuals(scene, false);
        pointer
    }

    pub fn is_active(&self) -> bool {
        self.state == PointerState::Active
    }

    pub fn contact_target(&self) -> Option<SurfaceId> {
        self.tracker.contact_target()
    }

    /// Last landing point the down beam produced.
    pub fn landing_point(&self) -> Vector3<f32> {
        self.landing
    }

    pub fn cursor_marker(&self) -> MarkerId {
        self.cursor
    }

    pub fn on_target_enter(&mut self, listener: PointerListener) {
        self.events.on_target_enter(listener);
    }

    pub fn on_target_exit(&mut self, listener: PointerListener) {
        self.events.on_target_exit(listener);
    }

    pub fn on_destination_selected(&mut self, listener: PointerListener) {
        self.events.on_destination_selected(listener);
    }

    /// React to a controller button edge from the host input layer.
    ///
    /// Activation starts casting and shows the visuals; deactivation
    /// fires destination-selected with the current contact state (the
    /// target may be `None`) and hides everything again.
    pub fn handle_edge(&mut self, scene: &mut dyn SceneService, edge: ControllerEdge) {
        match edge.edge {
            EdgeKind::Activated => {
                self.controller = edge.controller;
                if self.state == PointerState::Idle {
                    self.state = PointerState::Active;
                    self.toggle_visuals(scene, true);
                    pointer_log!(DEBUG, "pointer activated by controller {}", edge.controller.0);
                }
            }
            EdgeKind::Deactivated => {
                if self.state == PointerState::Active {
                    self.controller = edge.controller;
                    self.state = PointerState::Idle;
                    let event = PointerEvent {
                        controller: self.controller,
                        distance: self.tracker.contact_distance(),
                        target: self.tracker.contact_target(),
                        world_position: self.landing,
                    };
                    self.events.emit_destination_selected(&event);
                    self.toggle_visuals(scene, false);
                    pointer_log!(
                        DEBUG,
                        "destination selected at {:?} (target {:?})",
                        event.world_position,
                        event.target
                    );
                }
            }
        }
    }

    /// Per-frame update while active; a no-op when idle.
    pub fn update(
        &mut self,
        scene: &mut dyn SceneService,
        rays: &dyn RayQuery,
        pose: &ControllerPose,
    ) -> Result<(), PointerError> {
        if self.state != PointerState::Active {
            return Ok(());
        }

        let forward = self.beam.project_forward(scene, rays, pose, self.tracker.contact_target());
        let down = self.beam.project_down(scene, rays);
        self.landing = down.landing;
        self.tracker.update(
            self.controller,
            down.surface,
            down.landing,
            forward.length,
            &mut self.events,
        );

        // Duplicating the landing point flattens the curve's terminal
        // tangent, so the curve settles onto the target instead of
        // overshooting it.
        let joint = scene.world_position(self.beam.joint_marker());
        self.path
            .set_control_points(vec![pose.position, joint, down.landing, down.landing])?;
        let samples = self.path.sample_even(self.curve.pool_size());
        self.curve.update_from_samples(scene, &samples)?;

        if self.tracker.contact_target().is_some() {
            scene.set_local_position(self.cursor, down.landing);
            scene.set_visible(self.cursor, self.config.show_cursor);
        } else {
            scene.set_visible(self.cursor, false);
        }

        Ok(())
    }

    /// Destroy every marker this pointer created.
    pub fn release(&mut self, scene: &mut dyn SceneService) {
        self.beam.release(scene);
        self.curve.release(scene);
        scene.destroy_marker(self.cursor);
    }

    fn toggle_visuals(&mut self, scene: &mut dyn SceneService, visible: bool) {
        self.beam.set_visible(scene, visible);
        self.curve.set_visible(scene, visible);
        scene.set_visible(self.cursor, visible && self.config.show_cursor);
    }
}
