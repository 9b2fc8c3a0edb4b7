//! Small worked-example reaction maps, the direct analogue of
//! `copasi-rs::models::{michaelis_menten, lotka_volterra, repressilator}`
//! in the crate this workspace grew from. Used by `sbgnq-compile`'s
//! scenario tests and available to any crate that wants a
//! minimal map without writing a reader.

use crate::model::Model;
use crate::reaction::{ModifierKind, Reaction, ReactionType};
use crate::species::{Species, SpeciesType};

/// heterodimer association with no receptor.
/// A + B -> C. After reduction, only C survives with `function = TRUE`.
pub fn minimal_heterodimer() -> Model {
    let mut m = Model::new();
    let a = m.add_species(Species::new("A", "A", "default", SpeciesType::Protein));
    let b = m.add_species(Species::new("B", "B", "default", SpeciesType::Protein));
    let c = m.add_species(Species::new("C", "C", "default", SpeciesType::Protein));
    let r = Reaction::new("R", ReactionType::HeterodimerAssociation)
        .with_reactants([a, b])
        .with_products([c]);
    m.add_reaction(r).expect("fixture reaction is well-formed");
    m
}

/// receptor collapse. L + Recv -> LR where Recv is a
/// receptor appearing nowhere else.
pub fn receptor_collapse() -> Model {
    let mut m = Model::new();
    let l = m.add_species(Species::new("L", "L", "default", SpeciesType::Protein));
    let recv = m.add_species(Species::new("Recv", "Recv", "default", SpeciesType::Receptor));
    let lr = m.add_species(Species::new("LR", "LR", "default", SpeciesType::Complex));
    let r = Reaction::new("R", ReactionType::HeterodimerAssociation)
        .with_reactants([l, recv])
        .with_products([lr]);
    m.add_reaction(r).expect("fixture reaction is well-formed");
    m
}

/// catalysis. S -> P with catalyst E.
pub fn catalysis() -> Model {
    let mut m = Model::new();
    let e = m.add_species(Species::new("E", "E", "default", SpeciesType::Protein));
    let s = m.add_species(Species::new("S", "S", "default", SpeciesType::SimpleMolecule));
    let p = m.add_species(Species::new("P", "P", "default", SpeciesType::SimpleMolecule));
    let r = Reaction::new("R", ReactionType::StateTransition)
        .with_reactants([s])
        .with_products([p])
        .with_modifier(e, ModifierKind::Catalyst);
    m.add_reaction(r).expect("fixture reaction is well-formed");
    m
}

/// the same catalysis reaction with an added
/// inhibitor modifier I.
pub fn catalysis_with_inhibitor() -> Model {
    let mut m = Model::new();
    let e = m.add_species(Species::new("E", "E", "default", SpeciesType::Protein));
    let s = m.add_species(Species::new("S", "S", "default", SpeciesType::SimpleMolecule));
    let p = m.add_species(Species::new("P", "P", "default", SpeciesType::SimpleMolecule));
    let i = m.add_species(Species::new("I", "I", "default", SpeciesType::Protein));
    let r = Reaction::new("R", ReactionType::StateTransition)
        .with_reactants([s])
        .with_products([p])
        .with_modifier(e, ModifierKind::Catalyst)
        .with_modifier(i, ModifierKind::Inhibitor);
    m.add_reaction(r).expect("fixture reaction is well-formed");
    m
}

/// two independent reactions producing P, each gated by
/// a distinct catalyst.
pub fn multiple_activators() -> Model {
    let mut m = Model::new();
    let e1 = m.add_species(Species::new("E1", "E1", "default", SpeciesType::Protein));
    let e2 = m.add_species(Species::new("E2", "E2", "default", SpeciesType::Protein));
    let s = m.add_species(Species::new("S", "S", "default", SpeciesType::SimpleMolecule));
    let p = m.add_species(Species::new("P", "P", "default", SpeciesType::SimpleMolecule));
    let r1 = Reaction::new("R1", ReactionType::StateTransition)
        .with_reactants([s])
        .with_products([p])
        .with_modifier(e1, ModifierKind::Catalyst);
    let r2 = Reaction::new("R2", ReactionType::StateTransition)
        .with_reactants([s])
        .with_products([p])
        .with_modifier(e2, ModifierKind::Catalyst);
    m.add_reaction(r1).expect("fixture reaction is well-formed");
    m.add_reaction(r2).expect("fixture reaction is well-formed");
    m
}

/// two influence components, one of 5 nodes chained
/// A1->A2->A3->A4->A5, one of 2 nodes B1->B2.
pub fn two_components() -> Model {
    let mut m = Model::new();
    let chain: Vec<_> = (1..=5)
        .map(|i| m.add_species(Species::new(format!("A{i}"), format!("A{i}"), "default", SpeciesType::Protein)))
        .collect();
    for w in chain.windows(2) {
        let r = Reaction::new(format!("rA{}", w[0].raw()), ReactionType::StateTransition)
            .with_reactants([w[0]])
            .with_products([w[1]]);
        m.add_reaction(r).expect("fixture reaction is well-formed");
    }

    let b1 = m.add_species(Species::new("B1", "B1", "default", SpeciesType::Protein));
    let b2 = m.add_species(Species::new("B2", "B2", "default", SpeciesType::Protein));
    let rb = Reaction::new("rB", ReactionType::StateTransition).with_reactants([b1]).with_products([b2]);
    m.add_reaction(rb).expect("fixture reaction is well-formed");
    m
}

/// a degradation reaction with no products: S is consumed but
/// nothing is synthesized. Legal in SBGN-PD; the reaction must not
/// attach a formula to anything.
pub fn degradation_with_no_products() -> Model {
    let mut m = Model::new();
    let s = m.add_species(Species::new("S", "S", "default", SpeciesType::SimpleMolecule));
    let r = Reaction::new("R", ReactionType::StateTransition).with_reactants([s]).with_products([]);
    m.add_reaction(r).expect("fixture reaction is well-formed");
    m
}

/// influence chain A->B->C->D plus isolated X->Y.
pub fn upstream_chain() -> Model {
    let mut m = Model::new();
    let a = m.add_species(Species::new("A", "A", "default", SpeciesType::Protein));
    let b = m.add_species(Species::new("B", "B", "default", SpeciesType::Protein));
    let c = m.add_species(Species::new("C", "C", "default", SpeciesType::Protein));
    let d = m.add_species(Species::new("D", "D", "default", SpeciesType::Protein));
    let x = m.add_species(Species::new("X", "X", "default", SpeciesType::Protein));
    let y = m.add_species(Species::new("Y", "Y", "default", SpeciesType::Protein));

    for (from, to, id) in [(a, b, "rAB"), (b, c, "rBC"), (c, d, "rCD"), (x, y, "rXY")] {
        let r = Reaction::new(id, ReactionType::StateTransition).with_reactants([from]).with_products([to]);
        m.add_reaction(r).expect("fixture reaction is well-formed");
    }
    m
}
