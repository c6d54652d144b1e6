use serde::{Deserialize, Serialize};

/// Runtime behavior switches, handed to the field when it is created.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Keep chord-revealing every cell a chord reveal opened, until nothing else qualifies.
    pub recursive_chord: bool,
}

impl Options {
    pub const fn with_recursive_chord(self, recursive_chord: bool) -> Self {
        Self { recursive_chord }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            recursive_chord: true,
        }
    }
}
