//! BNet writer: `targets, factors` header followed by one `id, formula`
//! row per surviving species, in the conventional BoolNet syntax. A free
//! input (no formula, no fixed value) is written as `id, id` — the
//! standard BoolNet idiom for "this node's next state is its own current
//! state, i.e. it is an external input left to the caller".

use sbgnq_core::{Expr, Model};
use std::io::Write;

use crate::error::Result;
use crate::names::export_id;

pub fn write<W: Write>(model: &Model, mut out: W) -> Result<()> {
    writeln!(out, "targets, factors")?;

    let mut species: Vec<_> = model.iter_species().collect();
    species.sort_by_key(|(h, _)| h.raw());

    for (h, s) in species {
        let id = export_id(model, h);
        let formula = s
            .fixed_value
            .map(Expr::Const)
            .or_else(|| s.function.clone())
            .map(|f| f.render(&|v| export_id(model, v)))
            .unwrap_or_else(|| id.clone());
        writeln!(out, "{id}, {formula}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sbgnq_compile::{build_rules, name_species, NamerOptions};
    use sbgnq_core::fixtures::catalysis;

    #[test]
    fn free_input_factors_as_itself() {
        let mut model = catalysis();
        build_rules(&mut model);
        name_species(&mut model, &NamerOptions::default());

        let mut out = Vec::new();
        write(&model, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.lines().any(|l| {
            let mut parts = l.splitn(2, ", ");
            matches!((parts.next(), parts.next()), (Some(a), Some(b)) if a == b)
        }));
    }
}
