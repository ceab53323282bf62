mod input;

pub use input::{Actions, FrameInput, MOVE_SPEED, TURN_RATE, apply_input};
