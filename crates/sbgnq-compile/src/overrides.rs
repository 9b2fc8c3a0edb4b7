//! Fixed Overrides: pin a species' formula to a Boolean constant
//! from a user-supplied (name, value) table. Parsing the two-column
//! file itself is an I/O concern (`sbgnq-io`); this module only
//! applies already-parsed rows to a model.
//!
//! Matching against biological name or exported id is ambiguous on
//! its own, so this pipeline runs Overrides after the Namer and
//! matches rows against the Namer's `public_name`, falling back to
//! the biological name for any species the Namer has not touched yet
//! (e.g. in tests that apply overrides standalone). See DESIGN.md.

use log::{info, warn};
use sbgnq_core::{Expr, Model, SpeciesHandle, Warning};
use std::collections::HashMap;

/// Apply every row, returning a warning for each name that matches no
/// surviving species. `OverrideUnresolved` is non-fatal: skip and
/// continue.
pub fn apply_overrides(model: &mut Model, rows: &[(String, bool)]) -> Vec<Warning> {
    let by_name = index_by_display_name(model);
    let mut warnings = Vec::new();

    for (name, value) in rows {
        match by_name.get(name) {
            Some(&h) => {
                if let Some(s) = model.species_mut(h) {
                    s.fixed_value = Some(*value);
                    s.function = Some(Expr::Const(*value));
                }
                info!("override: {name} fixed to {value}");
            }
            None => {
                warn!("override species not found, skipped: {name}");
                warnings.push(Warning::OverrideUnresolved { name: name.clone() });
            }
        }
    }
    warnings
}

fn index_by_display_name(model: &Model) -> HashMap<String, SpeciesHandle> {
    model
        .iter_species()
        .map(|(h, s)| (s.public_name.clone().unwrap_or_else(|| s.name.clone()), h))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sbgnq_core::fixtures;

    #[test]
    fn matched_row_pins_constant_formula() {
        let mut m = fixtures::catalysis();
        let warnings = apply_overrides(&mut m, &[("E".to_string(), false)]);
        assert!(warnings.is_empty());
        let e = m.species_handle("E").unwrap();
        assert_eq!(m.species(e).unwrap().fixed_value, Some(false));
        assert_eq!(m.species(e).unwrap().function, Some(Expr::Const(false)));
    }

    #[test]
    fn unmatched_row_warns_and_does_not_abort() {
        let mut m = fixtures::catalysis();
        let warnings = apply_overrides(&mut m, &[("Ghost".to_string(), true)]);
        assert_eq!(warnings, vec![Warning::OverrideUnresolved { name: "Ghost".to_string() }]);
    }

    #[test]
    fn matches_against_namer_public_name_when_present() {
        use crate::namer::{name_species, NamerOptions};
        let mut m = fixtures::catalysis();
        name_species(&mut m, &NamerOptions::default());
        let e = m.species_handle("E").unwrap();
        let public_name = m.species(e).unwrap().public_name.clone().unwrap();

        let warnings = apply_overrides(&mut m, &[(public_name, true)]);
        assert!(warnings.is_empty());
        assert_eq!(m.species(e).unwrap().fixed_value, Some(true));
    }
}
