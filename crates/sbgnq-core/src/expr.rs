use crate::model::SpeciesHandle;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A Boolean formula over species.
///
/// A tagged variant tree with owned children: formulae never cycle,
/// so plain ownership is enough, no arena, no `Rc`.
/// Variables reference species by [`SpeciesHandle`] rather than by id
/// string: a formula survives the Namer relabeling a species without
/// any rewrite, and pruning drops a variable by handle equality
/// without needing to re-resolve forwarded ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    Const(bool),
    Var(SpeciesHandle),
    Not(Box<Expr>),
    And(Vec<Expr>),
    Or(Vec<Expr>),
}

impl Expr {
    pub const TRUE: Expr = Expr::Const(true);
    pub const FALSE: Expr = Expr::Const(false);

    pub fn var(handle: SpeciesHandle) -> Expr {
        Expr::Var(handle)
    }

    pub fn not(e: Expr) -> Expr {
        Expr::Not(Box::new(e))
    }

    pub fn and(parts: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::And(parts.into_iter().collect())
    }

    pub fn or(parts: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::Or(parts.into_iter().collect())
    }

    /// Evaluate under a total assignment. A variable absent from
    /// `assignment` evaluates to `false` (conservative default, also
    /// used when pruning drops a referenced species).
    pub fn eval(&self, assignment: &HashMap<SpeciesHandle, bool>) -> bool {
        match self {
            Expr::Const(b) => *b,
            Expr::Var(h) => *assignment.get(h).unwrap_or(&false),
            Expr::Not(e) => !e.eval(assignment),
            Expr::And(parts) => parts.iter().all(|p| p.eval(assignment)),
            Expr::Or(parts) => parts.iter().any(|p| p.eval(assignment)),
        }
    }

    /// All species handles mentioned in the formula, in first-appearance order.
    pub fn variables(&self) -> Vec<SpeciesHandle> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        self.collect_variables(&mut seen, &mut out);
        out
    }

    fn collect_variables(&self, seen: &mut HashSet<SpeciesHandle>, out: &mut Vec<SpeciesHandle>) {
        match self {
            Expr::Const(_) => {}
            Expr::Var(h) => {
                if seen.insert(*h) {
                    out.push(*h);
                }
            }
            Expr::Not(e) => e.collect_variables(seen, out),
            Expr::And(parts) | Expr::Or(parts) => {
                for p in parts {
                    p.collect_variables(seen, out);
                }
            }
        }
    }

    /// Replace every occurrence of `handle` with `replacement`, recursively.
    /// Used by the Pruner to fold a dropped upstream into `FALSE`.
    pub fn substitute(&self, handle: SpeciesHandle, replacement: &Expr) -> Expr {
        match self {
            Expr::Const(b) => Expr::Const(*b),
            Expr::Var(h) if *h == handle => replacement.clone(),
            Expr::Var(h) => Expr::Var(*h),
            Expr::Not(e) => Expr::not(e.substitute(handle, replacement)),
            Expr::And(parts) => Expr::And(parts.iter().map(|p| p.substitute(handle, replacement)).collect()),
            Expr::Or(parts) => Expr::Or(parts.iter().map(|p| p.substitute(handle, replacement)).collect()),
        }
    }

    /// Render the formula using a caller-supplied handle-to-name
    /// resolver, so writers can print export ids or biological names
    /// without `Expr` itself needing model access.
    pub fn render(&self, name_of: &dyn Fn(SpeciesHandle) -> String) -> String {
        match self {
            Expr::Const(true) => "TRUE".to_string(),
            Expr::Const(false) => "FALSE".to_string(),
            Expr::Var(h) => name_of(*h),
            Expr::Not(e) => format!("!({})", e.render(name_of)),
            Expr::And(parts) => {
                if parts.is_empty() {
                    return "TRUE".to_string();
                }
                let joined: Vec<String> = parts.iter().map(|p| p.render(name_of)).collect();
                format!("({})", joined.join(" & "))
            }
            Expr::Or(parts) => {
                if parts.is_empty() {
                    return "FALSE".to_string();
                }
                let joined: Vec<String> = parts.iter().map(|p| p.render(name_of)).collect();
                format!("({})", joined.join(" | "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SpeciesHandle;

    fn h(i: u32) -> SpeciesHandle {
        SpeciesHandle::from_raw(i)
    }

    #[test]
    fn eval_and_or_not() {
        let a = h(0);
        let b = h(1);
        let e = Expr::and([Expr::var(a), Expr::not(Expr::var(b))]);
        let mut assign = HashMap::new();
        assign.insert(a, true);
        assign.insert(b, false);
        assert!(e.eval(&assign));
        assign.insert(b, true);
        assert!(!e.eval(&assign));
    }

    #[test]
    fn missing_variable_defaults_false() {
        let e = Expr::var(h(42));
        assert!(!e.eval(&HashMap::new()));
    }

    #[test]
    fn variables_dedup_first_seen_order() {
        let b = h(1);
        let a = h(0);
        let e = Expr::or([Expr::var(b), Expr::and([Expr::var(a), Expr::var(b)])]);
        assert_eq!(e.variables(), vec![b, a]);
    }

    #[test]
    fn render_uses_supplied_names() {
        let e = Expr::and([Expr::var(h(0)), Expr::not(Expr::var(h(1)))]);
        let rendered = e.render(&|handle| format!("S{}", handle.raw()));
        assert_eq!(rendered, "(S0 & !(S1))");
    }
}
