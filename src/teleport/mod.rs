// Rig relocation driven by pointer destination events.
//
// Pointers usually come up after the rig does (they hang off the
// controllers), so binding retries on the frame clock for a bounded
// number of attempts before giving up and disabling itself.

use std::cell::RefCell;
use std::rc::Rc;

use cgmath::vec3;

use crate::host::{FadeEffect, PlayerRig};
use crate::pointer::{BezierPointer, PointerEvent};
use crate::teleport_log;

#[derive(Clone, Copy, Debug)]
pub struct TeleportConfig {
    /// Seconds for the fade back in after the instant blink out.
    pub blink_transition_seconds: f32,
    /// Binding attempts before teleport disables itself.
    pub bind_attempts: u32,
    /// Seconds between binding attempts.
    pub bind_retry_seconds: f32,
}

impl Default for TeleportConfig {
    fn default() -> Self {
        Self {
            blink_transition_seconds: 0.6,
            bind_attempts: 5,
            bind_retry_seconds: 0.25,
        }
    }
}

/// Where pointer binding currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindState {
    /// Still looking for pointers to subscribe to.
    Pending,
    Bound,
    /// Retry attempts exhausted; teleport is disabled.
    Failed,
}

/// Moves the player rig to a selected destination, blinking the screen
/// over the jump. Destinations without a target are ignored.
pub struct BasicTeleport {
    config: TeleportConfig,
    rig: Rc<RefCell<dyn PlayerRig>>,
    fade: Rc<RefCell<dyn FadeEffect>>,
    state: BindState,
    attempts_left: u32,
    retry_timer: f32,
}

impl BasicTeleport {
    pub fn new(
        rig: Rc<RefCell<dyn PlayerRig>>,
        fade: Rc<RefCell<dyn FadeEffect>>,
        config: TeleportConfig,
    ) -> Self {
        Self {
            rig,
            fade,
            state: BindState::Pending,
            attempts_left: config.bind_attempts,
            retry_timer: 0.0,
            config,
        }
    }

    pub fn bind_state(&self) -> BindState {
        self.state
    }

    /// Advance binding on the frame clock. Call once per frame until
    /// `bind_state()` reports `Bound`; afterwards the registered
    /// listeners do all the work.
    pub fn update(&mut self, dt_seconds: f32, pointers: &mut [BezierPointer]) {
        if self.state != BindState::Pending {
            return;
        }
        self.retry_timer -= dt_seconds;
        if self.retry_timer > 0.0 {
            return;
        }
        self.retry_timer = self.config.bind_retry_seconds;

        if pointers.is_empty() {
            self.attempts_left = self.attempts_left.saturating_sub(1);
            if self.attempts_left == 0 {
                teleport_log!(
                    ERROR,
                    "no destination pointers found after {} attempts; teleport disabled",
                    self.config.bind_attempts
                );
                self.state = BindState::Failed;
            } else {
                teleport_log!(
                    DEBUG,
                    "no destination pointers yet, retrying ({} attempts left)",
                    self.attempts_left
                );
            }
            return;
        }

        for pointer in pointers.iter_mut() {
            let rig = Rc::clone(&self.rig);
            let fade = Rc::clone(&self.fade);
            let blink_seconds = self.config.blink_transition_seconds;
            pointer.on_destination_selected(Box::new(move |event| {
                Self::teleport(&rig, &fade, blink_seconds, event);
            }));
        }
        teleport_log!(INFO, "bound to {} destination pointer(s)", pointers.len());
        self.state = BindState::Bound;
    }

    fn teleport(
        rig: &Rc<RefCell<dyn PlayerRig>>,
        fade: &Rc<RefCell<dyn FadeEffect>>,
        blink_seconds: f32,
        event: &PointerEvent,
    ) {
        // releasing the beam over nothing selects no destination
        if event.target.is_none() {
            return;
        }

        {
            let mut fade = fade.borrow_mut();
            fade.fade_out(0.0);
            fade.fade_in(blink_seconds);
        }

        let mut rig = rig.borrow_mut();
        let eye = rig.eye_local_position();
        let current = rig.position();
        // land the head, not the rig origin, on the tip; height is kept
        rig.set_position(vec3(
            event.world_position.x - eye.x,
            current.y,
            event.world_position.z - eye.z,
        ));
    }
}
