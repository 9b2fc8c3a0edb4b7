//! Abstracter: derives the signed influence graph from surviving
//! reactions. Mutual inhibition between co-reactants is deliberately
//! *not* generated — only reactant/positive-modifier -> product (+)
//! and negative-modifier -> product (-) arcs exist.

use log::debug;
use sbgnq_core::{Influence, Model, Sign};
use std::collections::HashSet;

/// Produce the deduplicated influence set for the whole model.
/// Arcs are deduplicated per (source, target, sign) — a reaction that
/// lists the same reactant twice, or two reactions that happen to
/// induce the same arc, still contribute one arc.
pub fn abstract_influences(model: &Model) -> Vec<Influence> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for (_, r) in model.iter_reactions() {
        let positives: Vec<_> = r.reactants.iter().map(|s| model.find(*s)).chain(r.positive_modifiers().map(|s| model.find(s))).collect();
        let negatives: Vec<_> = r.negative_modifiers().map(|s| model.find(s)).collect();

        for product in r.products.iter().map(|s| model.find(*s)) {
            for &source in &positives {
                let arc = Influence::new(source, product, Sign::Positive);
                if seen.insert(arc) {
                    out.push(arc);
                }
            }
            for &source in &negatives {
                let arc = Influence::new(source, product, Sign::Negative);
                if seen.insert(arc) {
                    out.push(arc);
                }
            }
        }
    }

    debug!("abstracter: derived {} influence arcs", out.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sbgnq_core::fixtures;

    #[test]
    fn catalysis_yields_reactant_and_catalyst_arcs_not_mutual_inhibition() {
        let m = fixtures::catalysis();
        let arcs = abstract_influences(&m);
        let s = m.species_handle("S").unwrap();
        let e = m.species_handle("E").unwrap();
        let p = m.species_handle("P").unwrap();

        assert!(arcs.contains(&Influence::new(s, p, Sign::Positive)));
        assert!(arcs.contains(&Influence::new(e, p, Sign::Positive)));
        // no S<->E arc: co-reactants/modifiers never get an arc between them
        assert!(!arcs.iter().any(|a| (a.source == s && a.target == e) || (a.source == e && a.target == s)));
    }

    #[test]
    fn inhibitor_yields_negative_arc() {
        let m = fixtures::catalysis_with_inhibitor();
        let arcs = abstract_influences(&m);
        let i = m.species_handle("I").unwrap();
        let p = m.species_handle("P").unwrap();
        assert!(arcs.contains(&Influence::new(i, p, Sign::Negative)));
    }
}
