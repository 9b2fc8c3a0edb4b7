//! Rule Builder: synthesizes a Boolean formula per species from
//! the reactions that produce it. Catalysts (positive modifiers)
//! behave as any-one-suffices activators; reactants are all-required
//! co-substrates — this mirrors the informal semantics of reaction
//! catalysis.

use log::debug;
use sbgnq_core::{Expr, Model, SpeciesHandle};

/// Attach a synthesized formula to every species that is the product
/// of at least one surviving reaction. A species with no producing
/// reaction is a free input and is left with `function = None`.
///
/// After R2/R4 merge a reactant into its own product (e.g. minimal
/// heterodimer A+B->C once A and B have both been folded into C), the
/// stored reactant/modifier handles resolve to the product itself; a
/// reaction can't require its own product as an input, so those
/// handles are excluded per product rather than treated as a self-loop.
pub fn build_rules(model: &mut Model) {
    let mut clauses: std::collections::HashMap<SpeciesHandle, Vec<Expr>> = std::collections::HashMap::new();

    for (_, r) in model.iter_reactions() {
        let pos_all: Vec<SpeciesHandle> = r.positive_modifiers().map(|s| model.find(s)).collect();
        let reactants_all: Vec<SpeciesHandle> = r.reactants.iter().map(|s| model.find(*s)).collect();
        let neg_all: Vec<SpeciesHandle> = r.negative_modifiers().map(|s| model.find(s)).collect();

        for product in r.products.iter().map(|s| model.find(*s)) {
            let pos: Vec<Expr> = pos_all.iter().filter(|&&h| h != product).map(|&h| Expr::var(h)).collect();
            let reactants: Vec<Expr> = reactants_all.iter().filter(|&&h| h != product).map(|&h| Expr::var(h)).collect();
            let neg: Vec<Expr> = neg_all.iter().filter(|&&h| h != product).map(|&h| Expr::not(Expr::var(h))).collect();

            let pos_term = if pos.is_empty() { Expr::TRUE } else { Expr::or(pos) };
            let in_term = if reactants.is_empty() { Expr::TRUE } else { Expr::and(reactants) };
            let neg_term = if neg.is_empty() { Expr::TRUE } else { Expr::and(neg) };

            let clause = Expr::and([pos_term, in_term, neg_term]);
            clauses.entry(product).or_default().push(clause);
        }
    }

    let assigned = clauses.len();
    for (species, reaction_clauses) in clauses {
        let formula = if reaction_clauses.len() == 1 {
            reaction_clauses.into_iter().next().unwrap()
        } else {
            Expr::or(reaction_clauses)
        };
        if let Some(s) = model.species_mut(species) {
            s.function = Some(formula);
        }
    }
    debug!("rule builder: synthesized formulae for {assigned} species");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sbgnq_core::fixtures;
    use std::collections::HashMap;

    #[test]
    fn catalysis_produces_catalyst_and_substrate() {
        let mut m = fixtures::catalysis();
        build_rules(&mut m);
        let e = m.species_handle("E").unwrap();
        let s = m.species_handle("S").unwrap();
        let p = m.species_handle("P").unwrap();

        let formula = m.species(p).unwrap().function.clone().unwrap();
        let mut assign = HashMap::new();
        assign.insert(e, true);
        assign.insert(s, true);
        assert!(formula.eval(&assign));
        assign.insert(e, false);
        assert!(!formula.eval(&assign));
    }

    #[test]
    fn inhibitor_blocks_production() {
        let mut m = fixtures::catalysis_with_inhibitor();
        build_rules(&mut m);
        let e = m.species_handle("E").unwrap();
        let s = m.species_handle("S").unwrap();
        let i = m.species_handle("I").unwrap();
        let p = m.species_handle("P").unwrap();

        let formula = m.species(p).unwrap().function.clone().unwrap();
        let mut assign = HashMap::new();
        assign.insert(e, true);
        assign.insert(s, true);
        assign.insert(i, false);
        assert!(formula.eval(&assign));
        assign.insert(i, true);
        assert!(!formula.eval(&assign));
    }

    #[test]
    fn multiple_activators_become_disjunction_of_clauses() {
        let mut m = fixtures::multiple_activators();
        build_rules(&mut m);
        let e1 = m.species_handle("E1").unwrap();
        let e2 = m.species_handle("E2").unwrap();
        let s = m.species_handle("S").unwrap();
        let p = m.species_handle("P").unwrap();

        let formula = m.species(p).unwrap().function.clone().unwrap();
        let all = [e1, e2, s];
        for combo in 0u8..8 {
            let mut assign = HashMap::new();
            for (i, h) in all.iter().enumerate() {
                assign.insert(*h, (combo >> i) & 1 == 1);
            }
            let e1v = assign[&e1];
            let e2v = assign[&e2];
            let sv = assign[&s];
            let expected = (e1v && sv) || (e2v && sv);
            assert_eq!(formula.eval(&assign), expected);
        }
    }

    #[test]
    fn free_input_has_no_formula() {
        let m = fixtures::catalysis();
        let e = m.species_handle("E").unwrap();
        assert!(m.species(e).unwrap().function.is_none());
    }

    #[test]
    fn reaction_with_no_products_is_a_no_op() {
        let mut m = fixtures::degradation_with_no_products();
        build_rules(&mut m);
        let s = m.species_handle("S").unwrap();
        assert!(m.species(s).unwrap().function.is_none());
    }

    #[test]
    fn merged_heterodimer_product_formula_is_true_not_a_self_loop() {
        use crate::reducer::reduce;
        use crate::simplify::simplify;
        let mut m = fixtures::minimal_heterodimer();
        reduce(&mut m);
        build_rules(&mut m);

        let c = m.species_handle("C").unwrap();
        let formula = m.species(c).unwrap().function.clone().unwrap();
        assert!(formula.eval(&HashMap::new()));
        assert_eq!(simplify(&formula), Expr::Const(true));
    }
}
