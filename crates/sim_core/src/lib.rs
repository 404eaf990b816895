//! sim_core: the time-driven half of the world. Feature overlays
//! (teleporter, elevator, raft/water, laser, floater), the avatar physics
//! state machine and the fixed 25 Hz tick that strings them together.

pub mod avatar;
pub mod elevator;
pub mod floater;
pub mod input;
pub mod laser;
pub mod player;
pub mod raft;
pub mod teleporter;
pub mod tick;

pub use avatar::Avatar;
pub use input::InputState;
pub use tick::{DeathEvent, Sim, SPAWN_POS, TICK_MS};
