//! CellDesigner/SBGN-ML reader: walks the annotated SBML tree CellDesigner
//! emits and produces an entry [`sbgnq_core::Model`]. Contains no biological
//! semantics of its own — species types, modifications, reaction types and
//! modifier kinds are read verbatim from the source vocabulary via
//! [`crate::vocab`] and handed to the core unchanged.
//!
//! CellDesigner annotates plain SBML with a `celldesigner:` extension
//! namespace carrying the information this reader actually needs (species
//! class/state, reaction type, base reactants/products, modifiers); MIRIAM
//! annotations live in the standard `bqbiol:`/`rdf:li` block. This reader
//! ignores namespace prefixes and matches on local element names, tracking
//! an explicit stack of open elements to disambiguate a bare
//! `speciesReference` as a reactant or a product.

use quick_xml::events::{BytesStart, BytesEnd, Event};
use quick_xml::Reader;
use sbgnq_core::{Layout, MiriamQualifier, Model, Reaction, ReactionType, Species};
use std::io::BufRead;

use crate::error::{IoError, Result};
use crate::vocab::{modifier_kind_from_str, qualifier_from_str, reaction_type_from_str, species_type_from_str};

/// Parse a CellDesigner/SBGN-ML document from an in-memory string.
pub fn read_str(xml: &str) -> Result<Model> {
    read(Reader::from_str(xml))
}

/// Parse a CellDesigner/SBGN-ML document from any buffered reader.
pub fn read_reader<R: BufRead>(inner: R) -> Result<Model> {
    read(Reader::from_reader(inner))
}

fn local_name_start(e: &BytesStart) -> String {
    let full = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    full.rsplit(':').next().unwrap_or(&full).to_string()
}

fn local_name_end(e: &BytesEnd) -> String {
    let full = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    full.rsplit(':').next().unwrap_or(&full).to_string()
}

fn attr(e: &BytesStart, key: &str) -> Option<String> {
    e.attributes().flatten().find_map(|a| {
        let full = String::from_utf8_lossy(a.key.as_ref()).into_owned();
        let local = full.rsplit(':').next().unwrap_or(&full);
        (local == key).then(|| String::from_utf8_lossy(&a.value).into_owned())
    })
}

#[derive(Default)]
struct PendingSpecies {
    id: String,
    name: String,
    compartment: String,
    class: Option<String>,
    state: Option<String>,
    layout: Layout,
    annotations: Vec<(MiriamQualifier, String)>,
}

#[derive(Default)]
struct PendingReaction {
    id: String,
    kind: Option<String>,
    reactants: Vec<String>,
    products: Vec<String>,
    modifiers: Vec<(String, String)>,
}

enum Open {
    None,
    Species(PendingSpecies),
    Reaction(PendingReaction),
}

fn malformed(msg: impl Into<String>) -> IoError {
    IoError::Core(sbgnq_core::Error::MalformedInput(msg.into()))
}

fn read<R: BufRead>(mut xml: Reader<R>) -> Result<Model> {
    let mut model = Model::new();
    let mut buf = Vec::new();
    let mut stack: Vec<String> = Vec::new();
    let mut open = Open::None;
    let mut qualifier: Option<MiriamQualifier> = None;

    loop {
        match xml.read_event_into(&mut buf).map_err(IoError::from)? {
            Event::Eof => break,
            Event::Start(e) => {
                let name = local_name_start(&e);
                handle_start(&mut open, &mut qualifier, &stack, &name, &e)?;
                stack.push(name);
            }
            Event::Empty(e) => {
                let name = local_name_start(&e);
                handle_start(&mut open, &mut qualifier, &stack, &name, &e)?;
                handle_end(&mut model, &mut open, &mut qualifier, &name)?;
            }
            Event::End(e) => {
                let name = local_name_end(&e);
                stack.pop();
                handle_end(&mut model, &mut open, &mut qualifier, &name)?;
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(model)
}

fn handle_start(
    open: &mut Open,
    qualifier: &mut Option<MiriamQualifier>,
    stack: &[String],
    name: &str,
    e: &BytesStart,
) -> Result<()> {
    match name {
        "species" => {
            let id = attr(e, "id").ok_or_else(|| malformed("species missing id"))?;
            let species_name = attr(e, "name").unwrap_or_else(|| id.clone());
            let compartment = attr(e, "compartment").unwrap_or_default();
            *open = Open::Species(PendingSpecies { id, name: species_name, compartment, ..Default::default() });
        }
        "reaction" => {
            let id = attr(e, "id").ok_or_else(|| malformed("reaction missing id"))?;
            let kind = attr(e, "reactionType");
            *open = Open::Reaction(PendingReaction { id, kind, ..Default::default() });
        }
        "class" => {
            if let Open::Species(s) = open {
                s.class = attr(e, "value");
            }
        }
        "state" => {
            if let Open::Species(s) = open {
                s.state = attr(e, "value");
            }
        }
        "bounds" => {
            if let Open::Species(s) = open {
                s.layout = Layout {
                    x: attr(e, "x").and_then(|v| v.parse().ok()).unwrap_or(0.0),
                    y: attr(e, "y").and_then(|v| v.parse().ok()).unwrap_or(0.0),
                    w: attr(e, "w").and_then(|v| v.parse().ok()).unwrap_or(0.0),
                    h: attr(e, "h").and_then(|v| v.parse().ok()).unwrap_or(0.0),
                    color: attr(e, "color").and_then(|v| u32::from_str_radix(v.trim_start_matches('#'), 16).ok()),
                };
            }
        }
        "speciesReference" => {
            if let (Some(sref), Open::Reaction(r)) = (attr(e, "species"), open) {
                if stack.last().map(String::as_str) == Some("listOfProducts") {
                    r.products.push(sref);
                } else {
                    r.reactants.push(sref);
                }
            }
        }
        "modifierSpeciesReference" => {
            if let Open::Reaction(r) = open {
                let sref = attr(e, "species");
                let role = attr(e, "modifierType").or_else(|| attr(e, "type"));
                if let (Some(sref), Some(role)) = (sref, role) {
                    r.modifiers.push((sref, role));
                }
            }
        }
        "is" | "isDescribedBy" | "isVersionOf" | "hasVersion" | "isHomologTo" | "isPartOf" | "hasPart" | "occursIn" => {
            *qualifier = Some(qualifier_from_str(name));
        }
        "li" => {
            if let (Some(q), Some(uri), Open::Species(s)) = (*qualifier, attr(e, "resource"), open) {
                s.annotations.push((q, uri));
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_end(model: &mut Model, open: &mut Open, qualifier: &mut Option<MiriamQualifier>, name: &str) -> Result<()> {
    match name {
        "species" => {
            if let Open::Species(s) = std::mem::replace(open, Open::None) {
                finish_species(model, s)?;
            }
        }
        "reaction" => {
            if let Open::Reaction(r) = std::mem::replace(open, Open::None) {
                finish_reaction(model, r)?;
            }
        }
        "is" | "isDescribedBy" | "isVersionOf" | "hasVersion" | "isHomologTo" | "isPartOf" | "hasPart" | "occursIn" => {
            *qualifier = None;
        }
        _ => {}
    }
    Ok(())
}

fn finish_species(model: &mut Model, s: PendingSpecies) -> Result<()> {
    let species_type = s.class.as_deref().map(species_type_from_str).unwrap_or(sbgnq_core::SpeciesType::Unknown);
    let mut species = Species::new(s.id, s.name, s.compartment, species_type);
    species.layout = s.layout;
    if let Some(state) = &s.state {
        if let Some(m) = crate::vocab::modification_from_str(state) {
            species.modifications.push(m);
        }
    }
    for (qualifier, uri) in s.annotations {
        species.annotations.insert(qualifier, uri);
    }
    model.add_species(species);
    Ok(())
}

fn finish_reaction(model: &mut Model, r: PendingReaction) -> Result<()> {
    let reaction_type = r.kind.as_deref().map(reaction_type_from_str).unwrap_or(ReactionType::Unknown);
    let mut reaction = Reaction::new(r.id, reaction_type);
    for sid in &r.reactants {
        let handle = model.species_handle(sid).ok_or_else(|| malformed(format!("reaction references unknown reactant {sid}")))?;
        reaction.reactants.push(handle);
    }
    for sid in &r.products {
        let handle = model.species_handle(sid).ok_or_else(|| malformed(format!("reaction references unknown product {sid}")))?;
        reaction.products.push(handle);
    }
    for (sid, role) in &r.modifiers {
        let handle = model.species_handle(sid).ok_or_else(|| malformed(format!("reaction references unknown modifier {sid}")))?;
        let kind = modifier_kind_from_str(role).ok_or_else(|| malformed(format!("unrecognized modifier kind {role}")))?;
        reaction.modifiers.push((handle, kind));
    }
    model.add_reaction(reaction).map_err(IoError::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALYSIS_XML: &str = r#"
        <sbml>
          <model id="m1">
            <listOfCompartments>
              <compartment id="default" name="default"/>
            </listOfCompartments>
            <listOfSpecies>
              <species id="s_E" name="E" compartment="default">
                <annotation><celldesigner:class value="PROTEIN"/></annotation>
              </species>
              <species id="s_S" name="S" compartment="default">
                <annotation><celldesigner:class value="SIMPLE_MOLECULE"/></annotation>
              </species>
              <species id="s_P" name="P" compartment="default">
                <annotation><celldesigner:class value="SIMPLE_MOLECULE"/></annotation>
              </species>
            </listOfSpecies>
            <listOfReactions>
              <reaction id="r1" reactionType="STATE_TRANSITION">
                <listOfReactants>
                  <speciesReference species="s_S"/>
                </listOfReactants>
                <listOfProducts>
                  <speciesReference species="s_P"/>
                </listOfProducts>
                <listOfModifiers>
                  <modifierSpeciesReference species="s_E" modifierType="CATALYSIS"/>
                </listOfModifiers>
              </reaction>
            </listOfReactions>
          </model>
        </sbml>
    "#;

    #[test]
    fn reads_species_and_catalysis_reaction() {
        let model = read_str(CATALYSIS_XML).unwrap();
        assert_eq!(model.species_count(), 3);
        let e = model.species_handle("s_E").unwrap();
        let s = model.species_handle("s_S").unwrap();
        let p = model.species_handle("s_P").unwrap();

        let (_, r) = model.iter_reactions().next().unwrap();
        assert_eq!(r.reactants, vec![s]);
        assert_eq!(r.products, vec![p]);
        assert_eq!(r.modifiers, vec![(e, sbgnq_core::ModifierKind::Catalyst)]);
    }

    #[test]
    fn dangling_reactant_reference_is_malformed_input() {
        let xml = r#"
            <sbml><model id="m1">
              <listOfSpecies>
                <species id="s_A" name="A" compartment="default"/>
              </listOfSpecies>
              <listOfReactions>
                <reaction id="r1" reactionType="STATE_TRANSITION">
                  <listOfReactants><speciesReference species="s_GHOST"/></listOfReactants>
                  <listOfProducts><speciesReference species="s_A"/></listOfProducts>
                </reaction>
              </listOfReactions>
            </model></sbml>
        "#;
        assert!(matches!(read_str(xml), Err(IoError::Core(sbgnq_core::Error::MalformedInput(_)))));
    }
}
