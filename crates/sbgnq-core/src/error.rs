use thiserror::Error;

/// Errors raised by the core data model and compilation passes.
///
/// `MalformedInput` and `Writer` are
/// surfaced by the I/O boundary crates, `DanglingReference` signals an
/// invariant violation inside the core itself, and `OverrideUnresolved`/
/// `EmptyModel` are never raised as errors — they are collected as
/// [`Warning`]s instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("dangling reference: reaction {reaction} references unknown species {species:?}")]
    DanglingReference { reaction: String, species: Vec<String> },

    #[error("writer error: {0}")]
    Writer(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Non-fatal conditions accumulated while running a pass. The CLI logs
/// these rather than aborting the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A fixed-overrides row named a species absent after pruning.
    OverrideUnresolved { name: String },
    /// All stages ran but no species survived.
    EmptyModel,
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::OverrideUnresolved { name } => {
                write!(f, "override species not found, skipped: {name}")
            }
            Warning::EmptyModel => write!(f, "no species remain after compilation"),
        }
    }
}
