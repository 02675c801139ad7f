use cgmath::Vector3;

use crate::host::{ControllerId, SurfaceId};

use super::events::{PointerEvent, PointerEvents};

/// Tracks which surface the down beam currently rests on and reports
/// transitions.
///
/// State only changes when the resolved surface identity changes
/// (`None -> X`, `X -> None`, `X -> Y`); frames that resolve to the same
/// surface touch nothing and emit nothing. A direct switch between two
/// surfaces emits exit for the old one before enter for the new one.
pub struct TargetTracker {
    contact_target: Option<SurfaceId>,
    contact_distance: f32,
}

impl TargetTracker {
    pub fn new() -> Self {
        Self {
            contact_target: None,
            contact_distance: 0.0,
        }
    }

    pub fn contact_target(&self) -> Option<SurfaceId> {
        self.contact_target
    }

    pub fn contact_distance(&self) -> f32 {
        self.contact_distance
    }

    /// Feed one frame's down-beam result. `beam_length` is the forward
    /// beam's rendered length this frame and becomes the contact
    /// distance of a newly entered target.
    pub fn update(
        &mut self,
        controller: ControllerId,
        surface: Option<SurfaceId>,
        world_position: Vector3<f32>,
        beam_length: f32,
        events: &mut PointerEvents,
    ) {
        if surface == self.contact_target {
            return;
        }

        if let Some(previous) = self.contact_target.take() {
            events.emit_target_exit(&PointerEvent {
                controller,
                distance: self.contact_distance,
                target: Some(previous),
                world_position,
            });
        }

        if let Some(current) = surface {
            self.contact_target = Some(current);
            self.contact_distance = beam_length;
            events.emit_target_enter(&PointerEvent {
                controller,
                distance: self.contact_distance,
                target: Some(current),
                world_position,
            });
        }
    }
}

impl Default for TargetTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::vec3;
    use std::cell::RefCell;
    use std::rc::Rc;

    type TransitionLog = Rc<RefCell<Vec<(&'static str, Option<SurfaceId>, f32)>>>;

    fn recording_events(log: &TransitionLog) -> PointerEvents {
        let mut events = PointerEvents::new();
        let enter = Rc::clone(log);
        events.on_target_enter(Box::new(move |e| {
            enter.borrow_mut().push(("enter", e.target, e.distance))
        }));
        let exit = Rc::clone(log);
        events.on_target_exit(Box::new(move |e| {
            exit.borrow_mut().push(("exit", e.target, e.distance))
        }));
        events
    }

    #[test]
    fn test_transition_sequence() {
        let log: TransitionLog = Rc::new(RefCell::new(Vec::new()));
        let mut events = recording_events(&log);
        let mut tracker = TargetTracker::new();
        let (a, b) = (SurfaceId(1), SurfaceId(2));

        for surface in [None, Some(a), Some(a), Some(b), None] {
            tracker.update(ControllerId(0), surface, vec3(0.0, 0.0, 0.0), 10.0, &mut events);
        }

        assert_eq!(
            *log.borrow(),
            vec![
                ("enter", Some(a), 10.0),
                ("exit", Some(a), 10.0),
                ("enter", Some(b), 10.0),
                ("exit", Some(b), 10.0),
            ]
        );
        assert_eq!(tracker.contact_target(), None);
    }

    #[test]
    fn test_unchanged_surface_emits_nothing() {
        let log: TransitionLog = Rc::new(RefCell::new(Vec::new()));
        let mut events = recording_events(&log);
        let mut tracker = TargetTracker::new();

        for _ in 0..5 {
            tracker.update(
                ControllerId(0),
                Some(SurfaceId(4)),
                vec3(0.0, 0.0, 0.0),
                6.0,
                &mut events,
            );
        }

        assert_eq!(log.borrow().len(), 1);
        assert_eq!(tracker.contact_target(), Some(SurfaceId(4)));
        assert_eq!(tracker.contact_distance(), 6.0);
    }

    #[test]
    fn test_contact_distance_fixed_at_enter() {
        let log: TransitionLog = Rc::new(RefCell::new(Vec::new()));
        let mut events = recording_events(&log);
        let mut tracker = TargetTracker::new();
        let surface = Some(SurfaceId(1));

        tracker.update(ControllerId(0), surface, vec3(0.0, 0.0, 0.0), 3.0, &mut events);
        // later frames with a different beam length do not rewrite it
        tracker.update(ControllerId(0), surface, vec3(0.0, 0.0, 0.0), 9.0, &mut events);
        assert_eq!(tracker.contact_distance(), 3.0);

        // the exit reports the distance the target was entered at
        tracker.update(ControllerId(0), None, vec3(0.0, 0.0, 0.0), 9.0, &mut events);
        assert_eq!(*log.borrow().last().unwrap(), ("exit", Some(SurfaceId(1)), 3.0));
    }

    #[test]
    fn test_initial_none_is_silent() {
        let log: TransitionLog = Rc::new(RefCell::new(Vec::new()));
        let mut events = recording_events(&log);
        let mut tracker = TargetTracker::new();

        tracker.update(ControllerId(0), None, vec3(0.0, 0.0, 0.0), 10.0, &mut events);
        assert!(log.borrow().is_empty());
    }
}
