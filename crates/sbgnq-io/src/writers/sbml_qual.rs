//! SBML-Qual writer: one `qualitativeSpecies` per surviving species, its
//! synthesized formula rendered as MathML content markup inside a single
//! `functionTerm` (result value `1`); species with no formula and no fixed
//! value are exported as free inputs with `constant="false"` and no
//! transition at all.

use sbgnq_core::{Expr, Model};
use std::io::Write;

use crate::error::Result;
use crate::names::export_id;

pub fn write<W: Write>(model: &Model, mut out: W) -> Result<()> {
    writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        out,
        r#"<sbml xmlns="http://www.sbml.org/sbml/level3/version1/core" level="3" version="1">"#
    )?;
    writeln!(out, r#"  <model id="compiled_model">"#)?;
    writeln!(
        out,
        r#"    <qual:listOfQualitativeSpecies xmlns:qual="http://www.sbml.org/sbml/level3/version1/qual/version1">"#
    )?;

    let mut species: Vec<_> = model.iter_species().collect();
    species.sort_by_key(|(h, _)| h.raw());

    for (h, s) in &species {
        let id = export_id(model, *h);
        let name = escape_attr(s.public_name.as_deref().unwrap_or(&s.name));
        let compartment = escape_attr(&s.compartment);
        let constant = if s.function.is_some() || s.fixed_value.is_some() { "false" } else { "true" };
        writeln!(
            out,
            r#"      <qual:qualitativeSpecies qual:id="{id}" qual:name="{name}" qual:compartment="{compartment}" qual:constant="{constant}" qual:maxLevel="1"/>"#
        )?;
    }
    writeln!(out, "    </qual:listOfQualitativeSpecies>")?;

    writeln!(out, "    <qual:listOfTransitions>")?;
    for (h, s) in &species {
        let Some(formula) = effective_formula(s) else { continue };
        let id = export_id(model, *h);
        writeln!(out, r#"      <qual:transition qual:id="tr_{id}">"#)?;
        writeln!(out, "        <qual:listOfOutputs>")?;
        writeln!(
            out,
            r#"          <qual:output qual:qualitativeSpecies="{id}" qual:transitionEffect="assignmentLevel"/>"#
        )?;
        writeln!(out, "        </qual:listOfOutputs>")?;
        writeln!(out, "        <qual:listOfFunctionTerms>")?;
        writeln!(out, r#"          <qual:defaultTerm qual:resultLevel="0"/>"#)?;
        writeln!(out, r#"          <qual:functionTerm qual:resultLevel="1">"#)?;
        writeln!(out, r#"            <math xmlns="http://www.w3.org/1998/Math/MathML">"#)?;
        write_mathml(&mut out, model, &formula, 14)?;
        writeln!(out, "            </math>")?;
        writeln!(out, "          </qual:functionTerm>")?;
        writeln!(out, "        </qual:listOfFunctionTerms>")?;
        writeln!(out, "      </qual:transition>")?;
    }
    writeln!(out, "    </qual:listOfTransitions>")?;

    writeln!(out, "  </model>")?;
    writeln!(out, "</sbml>")?;
    Ok(())
}

fn escape_attr(raw: &str) -> String {
    raw.replace('&', "&amp;").replace('"', "&quot;").replace('<', "&lt;").replace('>', "&gt;")
}

fn effective_formula(s: &sbgnq_core::Species) -> Option<Expr> {
    if let Some(v) = s.fixed_value {
        Some(Expr::Const(v))
    } else {
        s.function.clone()
    }
}

fn write_mathml<W: Write>(out: &mut W, model: &Model, expr: &Expr, indent: usize) -> Result<()> {
    let pad = " ".repeat(indent);
    match expr {
        Expr::Const(true) => writeln!(out, "{pad}<true/>")?,
        Expr::Const(false) => writeln!(out, "{pad}<false/>")?,
        Expr::Var(h) => writeln!(out, "{pad}<ci>{}</ci>", export_id(model, *h))?,
        Expr::Not(inner) => {
            writeln!(out, "{pad}<apply>")?;
            writeln!(out, "{pad}  <not/>")?;
            write_mathml(out, model, inner, indent + 2)?;
            writeln!(out, "{pad}</apply>")?;
        }
        Expr::And(parts) => write_nary(out, model, "and", parts, indent)?,
        Expr::Or(parts) => write_nary(out, model, "or", parts, indent)?,
    }
    Ok(())
}

fn write_nary<W: Write>(out: &mut W, model: &Model, op: &str, parts: &[Expr], indent: usize) -> Result<()> {
    let pad = " ".repeat(indent);
    if parts.is_empty() {
        let fallback = if op == "and" { Expr::TRUE } else { Expr::FALSE };
        return write_mathml(out, model, &fallback, indent);
    }
    writeln!(out, "{pad}<apply>")?;
    writeln!(out, "{pad}  <{op}/>")?;
    for part in parts {
        write_mathml(out, model, part, indent + 2)?;
    }
    writeln!(out, "{pad}</apply>")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sbgnq_core::fixtures::catalysis;
    use sbgnq_compile::{build_rules, name_species, NamerOptions};

    #[test]
    fn emits_one_qualitative_species_per_surviving_species() {
        let mut model = catalysis();
        build_rules(&mut model);
        name_species(&mut model, &NamerOptions::default());

        let mut out = Vec::new();
        write(&model, &mut out).unwrap();
        let xml = String::from_utf8(out).unwrap();

        assert_eq!(xml.matches("qualitativeSpecies qual:id").count(), 3);
        assert!(xml.contains("<and/>"));
    }
}
