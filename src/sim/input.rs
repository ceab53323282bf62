use bitflags::bitflags;

use crate::world::Camera;

pub const MOVE_SPEED: f32 = 3.0; // map-units / second
pub const TURN_RATE: f32 = std::f32::consts::PI; // rad / second (180°/s)

bitflags! {
    /// Movement/turn actions held down this frame.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct Actions: u8 {
        const TURN_LEFT    = 0x01;
        const TURN_RIGHT   = 0x02;
        const FORWARD      = 0x04;
        const BACK         = 0x08;
        const STRAFE_LEFT  = 0x10;
        const STRAFE_RIGHT = 0x20;
    }
}

/// Snapshot handed to the core once per frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameInput {
    pub actions: Actions,
    /// Seconds since the previous frame.
    pub dt: f32,
}

impl FrameInput {
    pub fn new(actions: Actions, dt: f32) -> Self {
        Self { actions, dt }
    }

    /// `(forward, strafe, turn)` in –1 … +1; opposing actions cancel.
    pub fn axes(&self) -> (f32, f32, f32) {
        let axis = |pos: Actions, neg: Actions| {
            self.actions.contains(pos) as i32 as f32 - self.actions.contains(neg) as i32 as f32
        };
        (
            axis(Actions::FORWARD, Actions::BACK),
            axis(Actions::STRAFE_RIGHT, Actions::STRAFE_LEFT),
            axis(Actions::TURN_LEFT, Actions::TURN_RIGHT),
        )
    }
}

/// Integrate yaw and position at fixed linear rates scaled by `dt`.
///
/// Turning is applied first so the step follows the new heading.
pub fn apply_input(camera: &mut Camera, input: &FrameInput) {
    let (forward, strafe, turn) = input.axes();
    if turn != 0.0 {
        camera.turn(turn * TURN_RATE * input.dt);
    }
    if forward != 0.0 || strafe != 0.0 {
        let d = MOVE_SPEED * input.dt;
        camera.step(forward * d, strafe * d);
    }
}
