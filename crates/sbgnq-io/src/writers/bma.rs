//! BMA-JSON writer: the Boolean Model Analyzer's variable/relationship
//! graph format. Out of scope for the core compiler itself, but its
//! writer-level parameters (`-g/--granularity`, `-i/--input`,
//! `-C/--colourConstant`) are CLI concerns that must reach this writer
//! bit-exact, so they are collected into [`BmaWriterConfig`] rather than
//! threaded through the pipeline.

use serde::Serialize;
use sbgnq_core::Model;
use std::io::Write;

use crate::error::Result;
use crate::names::export_id;

#[derive(Debug, Clone)]
pub struct BmaWriterConfig {
    /// Number of discrete levels a variable ranges over, `0..granularity`.
    pub granularity: u32,
    /// Default range value assigned to a free input with no formula.
    pub default_input: u32,
    /// Whether to emit a constant per-variable color instead of one
    /// derived from its name (BMA's layout hint, purely cosmetic).
    pub colour_constant: bool,
}

impl Default for BmaWriterConfig {
    fn default() -> Self {
        Self { granularity: 2, default_input: 0, colour_constant: false }
    }
}

#[derive(Serialize)]
struct BmaModel {
    #[serde(rename = "Model")]
    model: BmaModelBody,
    #[serde(rename = "Layout")]
    layout: BmaLayout,
}

#[derive(Serialize)]
struct BmaModelBody {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Variables")]
    variables: Vec<BmaVariable>,
    #[serde(rename = "Relationships")]
    relationships: Vec<BmaRelationship>,
}

#[derive(Serialize)]
struct BmaVariable {
    #[serde(rename = "Id")]
    id: u32,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "RangeFrom")]
    range_from: u32,
    #[serde(rename = "RangeTo")]
    range_to: u32,
    #[serde(rename = "Formula")]
    formula: String,
}

#[derive(Serialize)]
struct BmaRelationship {
    #[serde(rename = "Id")]
    id: u32,
    #[serde(rename = "FromVariable")]
    from_variable: u32,
    #[serde(rename = "ToVariable")]
    to_variable: u32,
    #[serde(rename = "Type")]
    kind: &'static str,
}

#[derive(Serialize)]
struct BmaLayout {
    #[serde(rename = "Variables")]
    variables: Vec<BmaLayoutVariable>,
}

#[derive(Serialize)]
struct BmaLayoutVariable {
    #[serde(rename = "Id")]
    id: u32,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "PositionX")]
    x: f64,
    #[serde(rename = "PositionY")]
    y: f64,
    #[serde(rename = "Fill")]
    fill: &'static str,
}

pub fn write<W: Write>(model: &Model, config: &BmaWriterConfig, out: W) -> Result<()> {
    let mut species: Vec<_> = model.iter_species().collect();
    species.sort_by_key(|(h, _)| h.raw());

    let mut variables = Vec::new();
    let mut layout_variables = Vec::new();
    let mut relationships = Vec::new();
    let mut next_relationship_id = species.len() as u32;

    for (h, s) in &species {
        let id = h.raw();
        let name = s.public_name.clone().unwrap_or_else(|| s.name.clone());
        let formula = s
            .fixed_value
            .map(|v| (v as u32).to_string())
            .or_else(|| s.function.as_ref().map(|f| f.render(&|v| export_id(model, v))))
            .unwrap_or_else(|| config.default_input.to_string());

        variables.push(BmaVariable {
            id,
            name: name.clone(),
            range_from: 0,
            range_to: config.granularity.saturating_sub(1),
            formula,
        });
        layout_variables.push(BmaLayoutVariable {
            id,
            name,
            x: s.layout.x,
            y: s.layout.y,
            fill: if config.colour_constant { "#888888" } else { "#4a90d9" },
        });

        if let Some(f) = &s.function {
            for target in f.variables() {
                relationships.push(BmaRelationship {
                    id: next_relationship_id,
                    from_variable: model.find(target).raw(),
                    to_variable: id,
                    kind: "Activator",
                });
                next_relationship_id += 1;
            }
        }
    }

    let bma = BmaModel {
        model: BmaModelBody { name: "compiled_model".to_string(), variables, relationships },
        layout: BmaLayout { variables: layout_variables },
    };
    serde_json::to_writer_pretty(out, &bma)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sbgnq_compile::{build_rules, name_species, NamerOptions};
    use sbgnq_core::fixtures::catalysis;

    #[test]
    fn granularity_controls_range_to() {
        let mut model = catalysis();
        build_rules(&mut model);
        name_species(&mut model, &NamerOptions::default());

        let mut out = Vec::new();
        write(&model, &BmaWriterConfig { granularity: 3, ..Default::default() }, &mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let vars = json["Model"]["Variables"].as_array().unwrap();
        assert!(vars.iter().all(|v| v["RangeTo"] == 2));
    }
}
