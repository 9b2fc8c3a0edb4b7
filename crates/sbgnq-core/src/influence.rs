use crate::model::SpeciesHandle;
use serde::{Deserialize, Serialize};

/// Sign of a derived influence arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sign::Positive => "+",
            Sign::Negative => "-",
        }
    }
}

/// A signed arc between two species, produced only by the Abstracter.
/// Influences are a derived view over surviving reactions and need
/// not survive into export formats unchanged; they are kept
/// handle-addressed like reactions so the Pruner can walk them without
/// re-resolving ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Influence {
    pub source: SpeciesHandle,
    pub target: SpeciesHandle,
    pub sign: Sign,
}

impl Influence {
    pub fn new(source: SpeciesHandle, target: SpeciesHandle, sign: Sign) -> Self {
        Self { source, target, sign }
    }
}

/// The string-keyed rendering of an [`Influence`], used by writers
/// (e.g. the SIF emitter's `source sign target` lines).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedInfluence {
    pub source: String,
    pub target: String,
    pub sign: Sign,
}
