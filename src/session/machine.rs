use rand::Rng;

use crate::engine::Model;
use crate::session::keymap::Keymap;
use crate::session::state::GameState;
use crate::ui::screen::OutputSink;

pub const WRONG_INPUT: &str = "Wrong input";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputOutcome {
    Accepted,
    Rejected,
}

/// Drives the screens: validates each key against the current state, applies
/// the transition and re-renders.
pub struct StateMachine<R: Rng, S: OutputSink> {
    state: GameState,
    model: Model<R>,
    keymap: Keymap,
    sink: S,
}

impl<R: Rng, S: OutputSink> StateMachine<R, S> {
    pub fn new(model: Model<R>, keymap: Keymap, sink: S) -> Self {
        let mut machine = Self {
            state: GameState::Initial,
            model,
            keymap,
            sink,
        };
        machine.render();
        machine
    }

    pub fn handle_input(&mut self, key: char) -> InputOutcome {
        let accepted = self.state.accepted_keys(&self.model, &self.keymap);
        if !accepted.is_empty() && !accepted.contains(&key) {
            log::debug!("rejected '{key}' in {} state", self.state.name());
            self.sink.notify(WRONG_INPUT);
            return InputOutcome::Rejected;
        }

        let previous = self.state;
        self.state = previous.transition(key, &mut self.model, &self.keymap);
        if previous != self.state {
            log::debug!("{} -> {}", previous.name(), self.state.name());
        }
        self.render();
        InputOutcome::Accepted
    }

    fn render(&mut self) {
        self.sink.clear();
        self.state.render(&self.model, &self.keymap, &mut self.sink);
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn model(&self) -> &Model<R> {
        &self.model
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
