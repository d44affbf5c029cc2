use std::fmt;

/// One of the three facets of the stone that can be cut.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Feature {
    A,
    B,
    C,
}

impl Feature {
    pub const ALL: [Feature; 3] = [Feature::A, Feature::B, Feature::C];

    pub fn index(self) -> usize {
        match self {
            Feature::A => 0,
            Feature::B => 1,
            Feature::C => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Feature::A => "A",
            Feature::B => "B",
            Feature::C => "C",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
