//! # sbgnq-compile
//!
//! The compilation pipeline that turns a reaction hypergraph
//! ([`sbgnq_core::Model`]) into an executable Boolean logical model:
//! reduction, abstraction, rule synthesis, pruning, naming, fixed
//! overrides and simplification, run in that order.
//!
//! Each stage is a free function operating on `&mut Model` (or
//! producing a derived view, for the Abstracter); [`compile`] wires
//! them into the one pipeline the CLI drives end to end.

pub mod abstracter;
pub mod namer;
pub mod overrides;
pub mod pruner;
pub mod reducer;
pub mod rules;
pub mod simplify;

pub use abstracter::abstract_influences;
pub use namer::{name_species, NamerOptions};
pub use overrides::apply_overrides;
pub use pruner::{prune, PruneParams};
pub use reducer::reduce;
pub use rules::build_rules;
pub use simplify::simplify_model;

use sbgnq_core::{Influence, Model, Warning};

/// Parameters threaded through [`compile`], one field per core-facing
/// CLI flag (writer-only flags like `-b`/`-g`/`-i`/`-C` live in
/// `sbgnq-io` instead).
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    pub prune: PruneParams,
    pub namer: NamerOptions,
    /// Parsed rows from the `-f/--fixed` overrides file.
    pub overrides: Vec<(String, bool)>,
}

/// Result of a full compile: the transformed model, the influence
/// graph the Abstracter derived (useful to SIF/CSV writers without
/// recomputing it), and any warnings accumulated along the way.
pub struct CompileOutput {
    pub influences: Vec<Influence>,
    pub warnings: Vec<Warning>,
}

/// Run the full pipeline over `model` in place.
pub fn compile(model: &mut Model, options: &CompileOptions) -> CompileOutput {
    reduce(model);
    let influences = abstract_influences(model);
    build_rules(model);
    prune(model, &influences, &options.prune);
    name_species(model, &options.namer);

    let mut warnings = apply_overrides(model, &options.overrides);
    simplify_model(model);

    if model.species_count() == 0 {
        warnings.push(Warning::EmptyModel);
    }

    CompileOutput { influences, warnings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sbgnq_core::fixtures;

    #[test]
    fn full_pipeline_runs_end_to_end_on_catalysis() {
        let mut m = fixtures::catalysis_with_inhibitor();
        let output = compile(&mut m, &CompileOptions::default());
        assert!(output.warnings.is_empty());

        let p = m.species_handle("P").unwrap();
        let formula = m.species(p).unwrap().function.clone().unwrap();
        let e = m.species_handle("E").unwrap();
        let s = m.species_handle("S").unwrap();
        let i = m.species_handle("I").unwrap();

        let mut assign = std::collections::HashMap::new();
        assign.insert(e, true);
        assign.insert(s, true);
        assign.insert(i, false);
        assert!(formula.eval(&assign));
    }

    #[test]
    fn empty_model_warns_but_does_not_panic() {
        let mut m = Model::new();
        let output = compile(&mut m, &CompileOptions::default());
        assert!(output.warnings.contains(&Warning::EmptyModel));
    }

    #[test]
    fn overrides_pin_constant_through_full_pipeline() {
        let mut m = fixtures::catalysis();
        let options = CompileOptions {
            overrides: vec![("E".to_string(), false)],
            ..Default::default()
        };
        let output = compile(&mut m, &options);
        assert!(output.warnings.is_empty());
        let e = m.species_handle("E").unwrap();
        assert_eq!(m.species(e).unwrap().fixed_value, Some(false));
    }
}
