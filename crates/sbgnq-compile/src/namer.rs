//! Namer: assigns a unique, informative public name and a valid
//! SBML SId export id to every surviving species.
//!
//! By default `export_id` is the sanitized, uniquified form of
//! `public_name`, and both disambiguate from the biological `name`.
//! With `--names` the roles swap: `export_id` disambiguates from the
//! biological name directly (the "preferred id") while `public_name`
//! (the display name) disambiguates from the source `id` instead. See
//! DESIGN.md.

use log::debug;
use sbgnq_core::{Model, SpeciesHandle};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default)]
pub struct NamerOptions {
    /// `--names`: swap which field feeds the id slot vs the name slot.
    pub prefer_biological_name_as_id: bool,
}

pub fn name_species(model: &mut Model, opts: &NamerOptions) {
    let mut order: Vec<SpeciesHandle> = model.iter_species().map(|(h, _)| h).collect();
    order.sort();

    let name_base: HashMap<SpeciesHandle, String> = order
        .iter()
        .map(|&h| (h, model.species(h).unwrap().name.clone()))
        .collect();
    let id_base: HashMap<SpeciesHandle, String> = order
        .iter()
        .map(|&h| (h, model.species(h).unwrap().id.clone()))
        .collect();

    let (name_slot_base, id_slot_base) = if opts.prefer_biological_name_as_id {
        (id_base, name_base)
    } else {
        (name_base, id_base)
    };

    let public_names = disambiguate(model, &order, &name_slot_base);

    // Export id is always the sanitized public name (`name_slot_base`'s
    // disambiguation), except under --names: there `name_slot_base` has
    // already been swapped to the source id (feeding the display name),
    // so the id instead needs its own pass over `id_slot_base`, which
    // holds the biological name in that branch.
    let export_bases = if opts.prefer_biological_name_as_id {
        disambiguate(model, &order, &id_slot_base)
    } else {
        public_names.clone()
    };

    let mut sanitized: HashMap<SpeciesHandle, String> =
        export_bases.iter().map(|(h, n)| (*h, sanitize_sid(n))).collect();
    uniquify_numeric(&order, &mut sanitized);

    for &h in &order {
        if let Some(s) = model.species_mut(h) {
            s.public_name = Some(public_names[&h].clone());
            s.export_id = Some(sanitized[&h].clone());
        }
    }
    debug!("namer: assigned names/ids to {} species", order.len());
}

/// Group by base string, then progressively append type, modification
/// and compartment suffixes to any group that still has more than one
/// member, and finally fall back to a numeric suffix by ascending
/// handle for whatever remains tied.
fn disambiguate(model: &Model, order: &[SpeciesHandle], base: &HashMap<SpeciesHandle, String>) -> HashMap<SpeciesHandle, String> {
    let mut current: HashMap<SpeciesHandle, String> = base.clone();

    for stage in 0..3 {
        let mut groups: HashMap<String, Vec<SpeciesHandle>> = HashMap::new();
        for &h in order {
            groups.entry(current[&h].clone()).or_default().push(h);
        }
        for (_, members) in groups {
            if members.len() <= 1 {
                continue;
            }
            for h in members {
                let species = model.species(h).unwrap();
                let suffix = match stage {
                    0 => Some(species.species_type.suffix().to_string()),
                    1 => species.modifications.first().map(|m| m.suffix().to_string()),
                    _ => Some(species.compartment.clone()),
                };
                if let Some(suffix) = suffix {
                    let entry = current.get_mut(&h).unwrap();
                    entry.push('_');
                    entry.push_str(&suffix);
                }
            }
        }
    }

    uniquify_numeric(order, &mut current);
    current
}

/// Final fallback: any remaining tie is broken by a numeric suffix
/// assigned deterministically in ascending handle order.
fn uniquify_numeric(order: &[SpeciesHandle], names: &mut HashMap<SpeciesHandle, String>) {
    let mut groups: HashMap<String, Vec<SpeciesHandle>> = HashMap::new();
    for &h in order {
        groups.entry(names[&h].clone()).or_default().push(h);
    }
    for (base, mut members) in groups {
        if members.len() <= 1 {
            continue;
        }
        members.sort();
        for (i, h) in members.into_iter().enumerate() {
            names.insert(h, format!("{base}_{}", i + 1));
        }
    }
}

/// Replace anything outside `[A-Za-z0-9_]` with `_`, then prefix with
/// `_` if the result would start with a digit, per the SBML SId
/// grammar.
fn sanitize_sid(raw: &str) -> String {
    let mut out: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if out.chars().next().map(|c| c.is_ascii_digit()).unwrap_or(true) {
        out.insert(0, '_');
    }
    if out.is_empty() {
        out.push('_');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sbgnq_core::{Species, SpeciesType};

    #[test]
    fn unique_names_pass_through_unchanged() {
        let mut m = Model::new();
        m.add_species(Species::new("s1", "Alpha", "c", SpeciesType::Protein));
        m.add_species(Species::new("s2", "Beta", "c", SpeciesType::Protein));
        name_species(&mut m, &NamerOptions::default());

        let h1 = m.species_handle("s1").unwrap();
        assert_eq!(m.species(h1).unwrap().public_name.as_deref(), Some("Alpha"));
    }

    #[test]
    fn colliding_names_disambiguate_by_type_then_numeric() {
        let mut m = Model::new();
        m.add_species(Species::new("s1", "X", "c", SpeciesType::Protein));
        m.add_species(Species::new("s2", "X", "c", SpeciesType::Rna));
        name_species(&mut m, &NamerOptions::default());

        let h1 = m.species_handle("s1").unwrap();
        let h2 = m.species_handle("s2").unwrap();
        let n1 = m.species(h1).unwrap().public_name.clone().unwrap();
        let n2 = m.species(h2).unwrap().public_name.clone().unwrap();
        assert_ne!(n1, n2);
        assert!(n1.contains("protein"));
        assert!(n2.contains("rna"));
    }

    #[test]
    fn sanitize_replaces_invalid_characters_and_leading_digit() {
        assert_eq!(sanitize_sid("2-oxo-glutarate"), "_2_oxo_glutarate");
        assert_eq!(sanitize_sid("H2O"), "H2O");
        assert_eq!(sanitize_sid(""), "_");
    }

    #[test]
    fn default_export_id_comes_from_the_public_name_not_the_source_id() {
        let mut m = Model::new();
        m.add_species(Species::new("sa17", "EGFR", "c", SpeciesType::Protein));
        name_species(&mut m, &NamerOptions::default());

        let h = m.species_handle("sa17").unwrap();
        let species = m.species(h).unwrap();
        assert_eq!(species.public_name.as_deref(), Some("EGFR"));
        assert_eq!(species.export_id.as_deref(), Some("EGFR"));
    }

    #[test]
    fn names_flag_derives_export_id_from_biological_name_and_display_from_source_id() {
        let mut m = Model::new();
        m.add_species(Species::new("sa17", "EGFR", "c", SpeciesType::Protein));
        name_species(&mut m, &NamerOptions { prefer_biological_name_as_id: true });

        let h = m.species_handle("sa17").unwrap();
        let species = m.species(h).unwrap();
        assert_eq!(species.public_name.as_deref(), Some("sa17"));
        assert_eq!(species.export_id.as_deref(), Some("EGFR"));
    }

    #[test]
    fn export_id_is_a_valid_sid_even_with_punctuation_in_name() {
        let mut m = Model::new();
        m.add_species(Species::new("id-1", "ATP:Mg2+", "c", SpeciesType::SimpleMolecule));
        name_species(&mut m, &NamerOptions::default());
        let h = m.species_handle("id-1").unwrap();
        let id = m.species(h).unwrap().export_id.clone().unwrap();
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
        assert!(!id.chars().next().unwrap().is_ascii_digit());
    }
}
