//! Handle-to-name resolution shared by every writer.
//!
//! Every writer needs the same answer to "what do I call this species in
//! the exported file": the Namer's `public_name` if naming has run, falling
//! back to the biological `name` for a model compiled without the Namer
//! (e.g. in a unit test that only runs the Rule Builder).

use sbgnq_core::{Influence, Model, NamedInfluence, SpeciesHandle};

pub fn display_name(model: &Model, handle: SpeciesHandle) -> String {
    model
        .species(handle)
        .map(|s| s.public_name.clone().unwrap_or_else(|| s.name.clone()))
        .unwrap_or_else(|| format!("#{}", handle.raw()))
}

pub fn export_id(model: &Model, handle: SpeciesHandle) -> String {
    model
        .species(handle)
        .map(|s| s.export_id.clone().unwrap_or_else(|| s.id.clone()))
        .unwrap_or_else(|| format!("s{}", handle.raw()))
}

/// Resolve a handle-addressed influence list into the string-keyed form
/// writers emit, in the order given (callers sort upstream if a
/// particular output order is required).
pub fn named_influences(model: &Model, influences: &[Influence]) -> Vec<NamedInfluence> {
    influences
        .iter()
        .map(|i| NamedInfluence {
            source: export_id(model, i.source),
            target: export_id(model, i.target),
            sign: i.sign,
        })
        .collect()
}
