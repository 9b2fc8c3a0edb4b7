//! Reducer: four confluent rewrite rules that collapse redundant
//! species. Each rule runs once, in fixed order, over a *snapshot* of
//! reactions taken before the rule starts — reactions created or
//! rewired mid-rule are not re-examined in the same pass. Running each
//! rule exactly once over a fixed candidate set is what makes the
//! reducer deterministic, confluent, and O(|R|) per rule.

use log::debug;
use sbgnq_core::{DeletePolicy, Model, ReactionHandle, ReactionType, SpeciesHandle, SpeciesType};

/// Runs R1 through R4 once each, in order.
pub fn reduce(model: &mut Model) {
    let before = model.species_count();
    apply_r1(model);
    apply_r2(model);
    apply_r3(model);
    apply_r4(model);
    debug!(
        "reducer: {} species before, {} after",
        before,
        model.species_count()
    );
}

/// A species "appears only as reactant in `reaction`" when the
/// *entire model* mentions it exactly once, as a reactant of that one
/// reaction.
fn occurs_only_as_reactant_in(model: &Model, species: SpeciesHandle, reaction: ReactionHandle) -> bool {
    for (h, r) in model.iter_reactions() {
        let in_reactants = r.reactants.iter().any(|s| model.find(*s) == species);
        let in_products = r.products.iter().any(|s| model.find(*s) == species);
        let in_modifiers = r.modifiers.iter().any(|(s, _)| model.find(*s) == species);
        if h == reaction {
            if !in_reactants || in_products || in_modifiers {
                return false;
            }
        } else if in_reactants || in_products || in_modifiers {
            return false;
        }
    }
    true
}

/// Species `b` "appears nowhere else as reactant or modifier" outside
/// of `reaction` — it may still be a product elsewhere, unlike R1's
/// stricter condition.
fn occurs_nowhere_else_as_reactant_or_modifier(model: &Model, species: SpeciesHandle, reaction: ReactionHandle) -> bool {
    for (h, r) in model.iter_reactions() {
        if h == reaction {
            continue;
        }
        let in_reactants = r.reactants.iter().any(|s| model.find(*s) == species);
        let in_modifiers = r.modifiers.iter().any(|(s, _)| model.find(*s) == species);
        if in_reactants || in_modifiers {
            return false;
        }
    }
    true
}

/// R1: receptor-association collapse.
fn apply_r1(model: &mut Model) {
    for rh in model.reaction_snapshot() {
        let Some((receptor, target)) = r1_match(model, rh) else { continue };

        model
            .transfer_annotations(receptor, target)
            .expect("R1 target cannot have been merged away before the reducer runs");
        model.delete_species(receptor, DeletePolicy::LeaveIncidentReactions);
        if let Some(r) = model.reaction_mut(rh) {
            r.reactants.retain(|s| *s != receptor);
        }
    }
}

fn r1_match(model: &Model, rh: ReactionHandle) -> Option<(SpeciesHandle, SpeciesHandle)> {
    let r = model.reaction(rh)?;
    if r.reaction_type != ReactionType::HeterodimerAssociation {
        return None;
    }
    if r.reactants.len() != 2 || r.products.len() != 1 || !r.modifiers.is_empty() {
        return None;
    }
    let a = model.find(r.reactants[0]);
    let b = model.find(r.reactants[1]);
    let p = model.find(r.products[0]);

    let is_receptor = |h: SpeciesHandle| model.species(h).map(|s| s.species_type == SpeciesType::Receptor).unwrap_or(false);
    let (receptor, other) = match (is_receptor(a), is_receptor(b)) {
        (true, false) => (a, b),
        (false, true) => (b, a),
        _ => return None,
    };

    if !occurs_only_as_reactant_in(model, receptor, rh) || !occurs_only_as_reactant_in(model, other, rh) {
        return None;
    }
    Some((receptor, p))
}

/// R2: complex formation.
fn apply_r2(model: &mut Model) {
    for rh in model.reaction_snapshot() {
        let Some((a, b, p)) = r2_match(model, rh) else { continue };

        // Rewire any reaction whose products mention a or b to p
        // *before* merging, so the merge's annotation transfer target
        // (p) is never itself one of the species being replaced.
        model.rewire_products(a, p);
        model.rewire_products(b, p);

        if a != p {
            model.merge_species(a, p).expect("p has not been merged away");
        }
        if b != p {
            model.merge_species(b, p).expect("p has not been merged away");
        }
    }
}

fn r2_match(model: &Model, rh: ReactionHandle) -> Option<(SpeciesHandle, SpeciesHandle, SpeciesHandle)> {
    let r = model.reaction(rh)?;
    if r.reaction_type != ReactionType::HeterodimerAssociation {
        return None;
    }
    if r.reactants.len() != 2 || r.products.len() != 1 || !r.modifiers.is_empty() {
        return None;
    }
    let a = model.find(r.reactants[0]);
    let b = model.find(r.reactants[1]);
    let p = model.find(r.products[0]);

    let is_receptor = |h: SpeciesHandle| model.species(h).map(|s| s.species_type == SpeciesType::Receptor).unwrap_or(false);
    if is_receptor(a) || is_receptor(b) {
        return None;
    }
    if !occurs_nowhere_else_as_reactant_or_modifier(model, a, rh) || !occurs_nowhere_else_as_reactant_or_modifier(model, b, rh) {
        return None;
    }
    Some((a, b, p))
}

/// R3: same-name passthrough delete.
fn apply_r3(model: &mut Model) {
    for rh in model.reaction_snapshot() {
        let Some((a, p)) = r3_match(model, rh) else { continue };

        model
            .transfer_annotations(a, p)
            .expect("R3 target cannot have been merged away before the reducer runs");
        model.delete_species(a, DeletePolicy::LeaveIncidentReactions);
        model.delete_reaction(rh);
    }
}

fn r3_match(model: &Model, rh: ReactionHandle) -> Option<(SpeciesHandle, SpeciesHandle)> {
    let r = model.reaction(rh)?;
    if r.reactants.len() != 1 || r.products.len() != 1 {
        return None;
    }
    let a = model.find(r.reactants[0]);
    let p = model.find(r.products[0]);
    if !occurs_only_as_reactant_in(model, a, rh) {
        return None;
    }
    let a_name = &model.species(a)?.name;
    let p_name = &model.species(p)?.name;
    if a_name != p_name {
        return None;
    }
    Some((a, p))
}

/// R4: transport merge.
fn apply_r4(model: &mut Model) {
    for rh in model.reaction_snapshot() {
        let Some((a, p)) = r4_match(model, rh) else { continue };

        model.rewire_products(a, p);
        model
            .merge_species(a, p)
            .expect("R4 target cannot have been merged away before the reducer runs");
        model.delete_reaction(rh);
    }
}

fn r4_match(model: &Model, rh: ReactionHandle) -> Option<(SpeciesHandle, SpeciesHandle)> {
    let r = model.reaction(rh)?;
    if r.reaction_type != ReactionType::Transport {
        return None;
    }
    if r.reactants.len() != 1 || r.products.len() != 1 {
        return None;
    }
    let a = model.find(r.reactants[0]);
    let p = model.find(r.products[0]);
    if a == p {
        return None;
    }
    // "it may be produced by other reactions" — unlike R1/R3,
    // R4 only requires `a` to appear as reactant *only in this
    // reaction*, not that it appears nowhere else at all.
    let only_reactant_here = model.iter_reactions().all(|(h, other)| {
        if h == rh {
            return true;
        }
        !other.reactants.iter().any(|s| model.find(*s) == a)
    });
    if !only_reactant_here {
        return None;
    }
    let a_name = &model.species(a)?.name;
    let p_name = &model.species(p)?.name;
    if a_name != p_name {
        return None;
    }
    Some((a, p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sbgnq_core::fixtures;

    #[test]
    fn r2_collapses_minimal_heterodimer() {
        let mut m = fixtures::minimal_heterodimer();
        reduce(&mut m);
        assert_eq!(m.species_count(), 1);
        let c = m.species_handle("C").unwrap();
        assert!(m.species(c).is_some());
    }

    #[test]
    fn r1_collapses_receptor_keeps_ligand() {
        let mut m = fixtures::receptor_collapse();
        reduce(&mut m);
        assert_eq!(m.species_count(), 2);
        let l = m.species_handle("L").unwrap();
        let lr = m.species_handle("LR").unwrap();
        assert!(m.species(l).is_some());
        assert!(m.species(lr).is_some());
        assert!(m.species_handle("Recv").is_none());
    }

    #[test]
    fn reduce_is_idempotent_on_its_own_output() {
        let mut m = fixtures::minimal_heterodimer();
        reduce(&mut m);
        let count_after_first = m.species_count();
        reduce(&mut m);
        assert_eq!(m.species_count(), count_after_first);
    }

    #[test]
    fn r3_deletes_same_name_passthrough() {
        use sbgnq_core::{Reaction, Species};
        let mut m = Model::new();
        let a = m.add_species(Species::new("a_compartment1", "glucose", "c1", SpeciesType::SimpleMolecule));
        let p = m.add_species(Species::new("a_compartment2", "glucose", "c2", SpeciesType::SimpleMolecule));
        let r = Reaction::new("r1", ReactionType::StateTransition).with_reactants([a]).with_products([p]);
        m.add_reaction(r).unwrap();

        reduce(&mut m);

        assert_eq!(m.species_count(), 1);
        assert!(m.species(p).is_some());
        assert!(m.iter_reactions().next().is_none());
    }

    #[test]
    fn r4_merges_transport_by_name() {
        use sbgnq_core::{Reaction, Species};
        let mut m = Model::new();
        let cytosol = m.add_species(Species::new("prot_cyt", "Kinase", "cytosol", SpeciesType::Protein));
        let nucleus = m.add_species(Species::new("prot_nuc", "Kinase", "nucleus", SpeciesType::Protein));
        let r = Reaction::new("transport1", ReactionType::Transport)
            .with_reactants([cytosol])
            .with_products([nucleus]);
        m.add_reaction(r).unwrap();

        reduce(&mut m);

        assert_eq!(m.species_count(), 1);
        assert!(m.species(nucleus).is_some());
        assert_eq!(m.find(cytosol), nucleus);
    }
}
