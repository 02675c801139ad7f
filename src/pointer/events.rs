use std::panic::{catch_unwind, AssertUnwindSafe};

use cgmath::Vector3;

use crate::host::{ControllerId, SurfaceId};
use crate::pointer_log;

/// Immutable payload delivered to pointer listeners. `target` is `None`
/// when the down beam rests on nothing.
#[derive(Clone, Copy, Debug)]
pub struct PointerEvent {
    pub controller: ControllerId,
    pub distance: f32,
    pub target: Option<SurfaceId>,
    pub world_position: Vector3<f32>,
}

pub type PointerListener = Box<dyn FnMut(&PointerEvent)>;

/// Listener registries for the three pointer event kinds.
///
/// Listeners run synchronously in registration order. Delivery is
/// best-effort: a panicking listener is caught and logged, and the
/// remaining listeners still run.
#[derive(Default)]
pub struct PointerEvents {
    target_enter: Vec<PointerListener>,
    target_exit: Vec<PointerListener>,
    destination_selected: Vec<PointerListener>,
}

impl PointerEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_target_enter(&mut self, listener: PointerListener) {
        self.target_enter.push(listener);
    }

    pub fn on_target_exit(&mut self, listener: PointerListener) {
        self.target_exit.push(listener);
    }

    pub fn on_destination_selected(&mut self, listener: PointerListener) {
        self.destination_selected.push(listener);
    }

    pub(crate) fn emit_target_enter(&mut self, event: &PointerEvent) {
        Self::dispatch(&mut self.target_enter, "target_enter", event);
    }

    pub(crate) fn emit_target_exit(&mut self, event: &PointerEvent) {
        Self::dispatch(&mut self.target_exit, "target_exit", event);
    }

    pub(crate) fn emit_destination_selected(&mut self, event: &PointerEvent) {
        Self::dispatch(&mut self.destination_selected, "destination_selected", event);
    }

    fn dispatch(listeners: &mut [PointerListener], kind: &str, event: &PointerEvent) {
        for listener in listeners.iter_mut() {
            if catch_unwind(AssertUnwindSafe(|| listener(event))).is_err() {
                pointer_log!(
                    ERROR,
                    "{kind} listener panicked; remaining listeners still run"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::vec3;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn event() -> PointerEvent {
        PointerEvent {
            controller: ControllerId(3),
            distance: 4.5,
            target: Some(SurfaceId(9)),
            world_position: vec3(1.0, 0.0, 2.0),
        }
    }

    #[test]
    fn test_listeners_run_in_registration_order() {
        let order: Rc<RefCell<Vec<u32>>> = Rc::new(RefCell::new(Vec::new()));
        let mut events = PointerEvents::new();
        for tag in [1, 2, 3] {
            let order = Rc::clone(&order);
            events.on_target_enter(Box::new(move |_| order.borrow_mut().push(tag)));
        }

        events.emit_target_enter(&event());
        assert_eq!(*order.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn test_panicking_listener_does_not_block_later_listeners() {
        let reached: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));
        let mut events = PointerEvents::new();
        events.on_destination_selected(Box::new(|_| panic!("listener failure")));
        let log = Rc::clone(&reached);
        events.on_destination_selected(Box::new(move |e| {
            log.borrow_mut().push(if e.target.is_some() { "hit" } else { "miss" })
        }));

        events.emit_destination_selected(&event());
        assert_eq!(*reached.borrow(), vec!["hit"]);
    }

    #[test]
    fn test_event_kinds_are_independent() {
        let count: Rc<RefCell<u32>> = Rc::new(RefCell::new(0));
        let mut events = PointerEvents::new();
        let counter = Rc::clone(&count);
        events.on_target_exit(Box::new(move |_| *counter.borrow_mut() += 1));

        events.emit_target_enter(&event());
        events.emit_destination_selected(&event());
        assert_eq!(*count.borrow(), 0);

        events.emit_target_exit(&event());
        assert_eq!(*count.borrow(), 1);
    }
}
