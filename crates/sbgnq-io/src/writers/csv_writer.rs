//! CSV writer: `id,name,formula,alias` rows, one per surviving species.
//! `id` is the sanitized export id, `name` the disambiguated public name,
//! `formula` the rendered Boolean expression, `alias` the source
//! diagram's original species id (useful for tracing an exported row
//! back to the input map after the Namer has renamed it).

use sbgnq_core::{Expr, Model};
use std::io::Write;

use crate::error::Result;
use crate::names::export_id;

pub fn write<W: Write>(model: &Model, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["id", "name", "formula", "alias"])?;

    let mut species: Vec<_> = model.iter_species().collect();
    species.sort_by_key(|(h, _)| h.raw());

    for (h, s) in species {
        let id = export_id(model, h);
        let name = s.public_name.clone().unwrap_or_else(|| s.name.clone());
        let formula = s
            .fixed_value
            .map(Expr::Const)
            .or_else(|| s.function.clone())
            .map(|f| f.render(&|v| export_id(model, v)))
            .unwrap_or_else(|| "FREE".to_string());
        writer.write_record([&id, &name, &formula, &s.id])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sbgnq_compile::{build_rules, name_species, NamerOptions};
    use sbgnq_core::fixtures::catalysis;

    #[test]
    fn writes_header_then_one_row_per_species() {
        let mut model = catalysis();
        build_rules(&mut model);
        name_species(&mut model, &NamerOptions::default());

        let mut out = Vec::new();
        write(&model, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("id,name,formula,alias"));
        assert_eq!(lines.count(), 3);
    }

    #[test]
    fn free_input_is_marked_free() {
        let mut model = catalysis();
        build_rules(&mut model);
        name_species(&mut model, &NamerOptions::default());

        let mut out = Vec::new();
        write(&model, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(",FREE,"));
    }
}
