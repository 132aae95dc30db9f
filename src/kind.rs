//! The two action kinds exposed as commands.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Which command produced an activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReliefKind {
    Pee,
    Poo,
}

impl ReliefKind {
    pub const ALL: [ReliefKind; 2] = [ReliefKind::Pee, ReliefKind::Poo];

    /// Command name and config section suffix.
    pub fn name(self) -> &'static str {
        match self {
            ReliefKind::Pee => "pee",
            ReliefKind::Poo => "poo",
        }
    }
}

impl fmt::Display for ReliefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReliefKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pee" => Ok(ReliefKind::Pee),
            "poo" => Ok(ReliefKind::Poo),
            other => Err(format!("unknown command '{}'", other)),
        }
    }
}
