use std::collections::BTreeSet;

use rand::Rng;

use crate::engine::{Feature, MAX_ATTEMPTS, Model};
use crate::session::keymap::Keymap;
use crate::ui::screen::OutputSink;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameState {
    Initial,
    Processing,
    Statistics,
}

impl GameState {
    /// Keys this screen reacts to. Empty means any key is accepted.
    pub fn accepted_keys<R: Rng>(&self, model: &Model<R>, keymap: &Keymap) -> BTreeSet<char> {
        match self {
            GameState::Initial => BTreeSet::from([keymap.start, keymap.stats]),
            GameState::Processing => model
                .available_features()
                .into_iter()
                .map(|f| keymap.feature_key(f))
                .collect(),
            GameState::Statistics => BTreeSet::new(),
        }
    }

    pub fn render<R: Rng>(&self, model: &Model<R>, keymap: &Keymap, out: &mut dyn OutputSink) {
        match self {
            GameState::Initial => render_initial(model, keymap, out),
            GameState::Processing => render_processing(model, keymap, out),
            GameState::Statistics => render_statistics(model, out),
        }
    }

    pub fn transition<R: Rng>(self, key: char, model: &mut Model<R>, keymap: &Keymap) -> GameState {
        match self {
            GameState::Initial if key == keymap.start => GameState::Processing,
            GameState::Initial if key == keymap.stats => GameState::Statistics,
            GameState::Initial => GameState::Initial,
            GameState::Processing => process_key(key, model, keymap),
            GameState::Statistics => GameState::Initial,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GameState::Initial => "initial",
            GameState::Processing => "processing",
            GameState::Statistics => "statistics",
        }
    }
}

// The attempt lands before the completion check, so the 30th valid key
// finishes the round and goes straight back to Initial.
fn process_key<R: Rng>(key: char, model: &mut Model<R>, keymap: &Keymap) -> GameState {
    if !model.is_round_complete()
        && let Some(feature) = keymap.feature_for(key)
        && let Err(err) = model.attempt(feature)
    {
        log::warn!("ignoring key '{key}': {err}");
    }

    if model.is_round_complete() {
        // reset_round records the outcome again; the tally counts it twice.
        model.record_round_outcome();
        model.reset_round();
        GameState::Initial
    } else {
        GameState::Processing
    }
}

fn render_initial<R: Rng>(model: &Model<R>, keymap: &Keymap, out: &mut dyn OutputSink) {
    out.write_line("Stone Cutting");
    out.write_line("");
    if let Some(last) = model.last_outcome() {
        let summary: Vec<String> = Feature::ALL
            .iter()
            .map(|&f| format!("{f}: {}", last.get(f)))
            .collect();
        out.write_line(&format!("Last stone  {}", summary.join("  ")));
        out.write_line("");
    }
    out.write_line(&format!("[{}] Cut a new stone", keymap.start));
    out.write_line(&format!("[{}] Show statistics", keymap.stats));
}

fn render_processing<R: Rng>(model: &Model<R>, keymap: &Keymap, out: &mut dyn OutputSink) {
    out.write_line("Cutting");
    out.write_line("");
    for f in Feature::ALL {
        let attempts = model.attempts(f);
        let marker = if attempts < MAX_ATTEMPTS {
            format!("[{}]", keymap.feature_key(f))
        } else {
            "   ".to_string()
        };
        out.write_line(&format!(
            "{marker} Feature {f}  attempts {attempts:>2}/{MAX_ATTEMPTS}  successes {:>2}",
            model.successes(f)
        ));
    }
    out.write_line("");
    out.write_line(&format!("Success chance: {}", model.chance()));
}

fn render_statistics<R: Rng>(model: &Model<R>, out: &mut dyn OutputSink) {
    out.write_line("Results (A, B): repeats");
    out.write_line("");
    for ((a, b), count) in model.statistics().rows() {
        out.write_line(&format!("({a:>2}, {b:>2}): {count}"));
    }
    out.write_line("");
    out.write_line("Press any key to return");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::screen::ScreenBuffer;
    use rand::rngs::mock::StepRng;

    fn model() -> Model<StepRng> {
        Model::new(StepRng::new(0, 0))
    }

    #[test]
    fn test_initial_accepts_start_and_stats() {
        let keymap = Keymap::default();
        let keys = GameState::Initial.accepted_keys(&model(), &keymap);
        assert_eq!(keys, BTreeSet::from(['s', 't']));
    }

    #[test]
    fn test_initial_transitions() {
        let keymap = Keymap::default();
        let mut m = model();
        assert_eq!(
            GameState::Initial.transition('s', &mut m, &keymap),
            GameState::Processing
        );
        assert_eq!(
            GameState::Initial.transition('t', &mut m, &keymap),
            GameState::Statistics
        );
    }

    #[test]
    fn test_processing_accepts_available_features() {
        let keymap = Keymap::default();
        let mut m = model();
        for _ in 0..MAX_ATTEMPTS {
            m.attempt(Feature::B).unwrap();
        }
        let keys = GameState::Processing.accepted_keys(&m, &keymap);
        assert_eq!(keys, BTreeSet::from(['a', 'c']));
    }

    #[test]
    fn test_processing_attempts_feature() {
        let keymap = Keymap::default();
        let mut m = model();
        let next = GameState::Processing.transition('c', &mut m, &keymap);
        assert_eq!(next, GameState::Processing);
        assert_eq!(m.attempts(Feature::C), 1);
        assert_eq!(m.successes(Feature::C), 1);
    }

    #[test]
    fn test_statistics_accepts_anything_and_returns() {
        let keymap = Keymap::default();
        let mut m = model();
        assert!(GameState::Statistics.accepted_keys(&m, &keymap).is_empty());
        assert_eq!(
            GameState::Statistics.transition('z', &mut m, &keymap),
            GameState::Initial
        );
    }

    #[test]
    fn test_empty_statistics_render() {
        let mut screen = ScreenBuffer::default();
        GameState::Statistics.render(&model(), &Keymap::default(), &mut screen);
        assert!(screen.contains("Results"));
        assert!(screen.contains("Press any key to return"));
        assert!(!screen.lines().iter().any(|l| l.starts_with('(')));
    }

    #[test]
    fn test_processing_render_shows_counts_and_chance() {
        let mut m = model();
        m.attempt(Feature::A).unwrap();
        let mut screen = ScreenBuffer::default();
        GameState::Processing.render(&m, &Keymap::default(), &mut screen);
        assert!(screen.contains("Feature A  attempts  1/10  successes  1"));
        assert!(screen.contains("Success chance: 65%"));
    }
}
