//! Control state for one tick, written by the embedder and read once by
//! the physics step.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub down: bool,
}

impl InputState {
    pub const IDLE: InputState = InputState {
        left: false,
        right: false,
        jump: false,
        down: false,
    };
}
