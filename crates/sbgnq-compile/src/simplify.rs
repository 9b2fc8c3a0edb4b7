//! Rule Simplifier: rewrites a formula to fixpoint using standard
//! Boolean identities. Runs last, after the Pruner has folded any
//! dropped reference to `FALSE` and Overrides has pinned constants.

use log::debug;
use sbgnq_core::{Expr, Model};

/// Simplify every species' formula in place, to fixpoint.
pub fn simplify_model(model: &mut Model) {
    let handles: Vec<_> = model.iter_species().map(|(h, _)| h).collect();
    for h in handles {
        if let Some(s) = model.species_mut(h) {
            if let Some(f) = s.function.take() {
                s.function = Some(simplify(&f));
            }
        }
    }
    debug!("simplifier: normalized {} formulae", handles.len());
}

/// Rewrite `expr` to a fixpoint of standard Boolean identities. Each pass
/// simplifies children first, then the node itself; repeats until a
/// pass produces no change.
pub fn simplify(expr: &Expr) -> Expr {
    let mut current = expr.clone();
    loop {
        let next = simplify_once(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

fn simplify_once(expr: &Expr) -> Expr {
    match expr {
        Expr::Const(b) => Expr::Const(*b),
        Expr::Var(h) => Expr::Var(*h),
        Expr::Not(inner) => match simplify_once(inner) {
            Expr::Const(true) => Expr::Const(false),
            Expr::Const(false) => Expr::Const(true),
            Expr::Not(doubly) => *doubly,
            other => Expr::not(other),
        },
        Expr::And(parts) => simplify_chain(parts, true),
        Expr::Or(parts) => simplify_chain(parts, false),
    }
}

/// Shared logic for `And`/`Or`: flatten same-operator children,
/// drop the identity constant, short-circuit on the absorbing
/// constant, and deduplicate operands.
fn simplify_chain(parts: &[Expr], is_and: bool) -> Expr {
    let identity = Expr::Const(is_and);
    let absorbing = Expr::Const(!is_and);

    let mut flat: Vec<Expr> = Vec::new();
    for p in parts {
        let p = simplify_once(p);
        match (&p, is_and) {
            (Expr::And(inner), true) => flat.extend(inner.iter().cloned()),
            (Expr::Or(inner), false) => flat.extend(inner.iter().cloned()),
            _ => flat.push(p),
        }
    }

    if flat.iter().any(|p| *p == absorbing) {
        return absorbing;
    }
    flat.retain(|p| *p != identity);

    let mut dedup: Vec<Expr> = Vec::new();
    for p in flat {
        if !dedup.contains(&p) {
            dedup.push(p);
        }
    }

    match dedup.len() {
        0 => identity,
        1 => dedup.into_iter().next().unwrap(),
        _ if is_and => Expr::And(dedup),
        _ => Expr::Or(dedup),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sbgnq_core::SpeciesHandle;
    use std::collections::HashMap;

    fn h(i: u32) -> SpeciesHandle {
        SpeciesHandle::from_raw(i)
    }

    #[test]
    fn and_true_collapses_to_operand() {
        let e = Expr::and([Expr::var(h(0)), Expr::TRUE]);
        assert_eq!(simplify(&e), Expr::var(h(0)));
    }

    #[test]
    fn and_false_short_circuits() {
        let e = Expr::and([Expr::var(h(0)), Expr::FALSE]);
        assert_eq!(simplify(&e), Expr::FALSE);
    }

    #[test]
    fn or_true_short_circuits() {
        let e = Expr::or([Expr::var(h(0)), Expr::TRUE]);
        assert_eq!(simplify(&e), Expr::TRUE);
    }

    #[test]
    fn double_negation_cancels() {
        let e = Expr::not(Expr::not(Expr::var(h(0))));
        assert_eq!(simplify(&e), Expr::var(h(0)));
    }

    #[test]
    fn nested_and_flattens() {
        let e = Expr::and([Expr::And(vec![Expr::var(h(0)), Expr::var(h(1))]), Expr::var(h(2))]);
        assert_eq!(simplify(&e), Expr::And(vec![Expr::var(h(0)), Expr::var(h(1)), Expr::var(h(2))]));
    }

    #[test]
    fn duplicate_operands_dedup() {
        let e = Expr::or([Expr::var(h(0)), Expr::var(h(0))]);
        assert_eq!(simplify(&e), Expr::var(h(0)));
    }

    #[test]
    fn simplify_is_idempotent() {
        let e = Expr::and([Expr::or([Expr::var(h(0)), Expr::FALSE]), Expr::TRUE, Expr::not(Expr::not(Expr::var(h(1))))]);
        let once = simplify(&e);
        let twice = simplify(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn simplify_preserves_semantics() {
        let e = Expr::and([Expr::or([Expr::var(h(0)), Expr::FALSE]), Expr::not(Expr::not(Expr::var(h(1))))]);
        let simplified = simplify(&e);
        for a in [false, true] {
            for b in [false, true] {
                let mut assign = HashMap::new();
                assign.insert(h(0), a);
                assign.insert(h(1), b);
                assert_eq!(e.eval(&assign), simplified.eval(&assign));
            }
        }
    }
}
