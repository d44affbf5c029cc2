pub mod keymap;
pub mod machine;
pub mod state;

pub use keymap::Keymap;
pub use machine::{InputOutcome, StateMachine};
pub use state::GameState;
