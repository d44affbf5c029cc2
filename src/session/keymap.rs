use crate::engine::Feature;

/// Which character drives which action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Keymap {
    pub start: char,
    pub stats: char,
    pub quit: char,
    pub features: [char; 3],
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            start: 's',
            stats: 't',
            quit: 'q',
            features: ['a', 'b', 'c'],
        }
    }
}

impl Keymap {
    pub fn feature_key(&self, feature: Feature) -> char {
        self.features[feature.index()]
    }

    pub fn feature_for(&self, key: char) -> Option<Feature> {
        Feature::ALL
            .into_iter()
            .find(|&f| self.feature_key(f) == key)
    }
}
