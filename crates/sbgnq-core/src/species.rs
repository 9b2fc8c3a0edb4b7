use crate::annotation::AnnotationBag;
use crate::expr::Expr;
use serde::{Deserialize, Serialize};

/// Closed vocabulary of CellDesigner/SBGN-PD species types, the classes
/// CellDesigner itself emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpeciesType {
    Protein,
    Receptor,
    Rna,
    Gene,
    AntisenseRna,
    SimpleMolecule,
    Ion,
    Complex,
    Degraded,
    Phenotype,
    Drug,
    Unknown,
}

impl SpeciesType {
    /// Namer suffix fragment used during disambiguation.
    pub fn suffix(&self) -> &'static str {
        match self {
            SpeciesType::Protein => "protein",
            SpeciesType::Receptor => "receptor",
            SpeciesType::Rna => "rna",
            SpeciesType::Gene => "gene",
            SpeciesType::AntisenseRna => "antisense_rna",
            SpeciesType::SimpleMolecule => "molecule",
            SpeciesType::Ion => "ion",
            SpeciesType::Complex => "complex",
            SpeciesType::Degraded => "degraded",
            SpeciesType::Phenotype => "phenotype",
            SpeciesType::Drug => "drug",
            SpeciesType::Unknown => "unknown",
        }
    }
}

/// Closed vocabulary of post-translational / state modifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Modification {
    Phosphorylated,
    Active,
    Inactive,
    Glycosylated,
    Ubiquitinated,
    Methylated,
    Acetylated,
    Myristoylated,
    Sulfated,
    Hydroxylated,
    Palmitoylated,
    Empty,
}

impl Modification {
    pub fn suffix(&self) -> &'static str {
        match self {
            Modification::Phosphorylated => "phosphorylated",
            Modification::Active => "active",
            Modification::Inactive => "inactive",
            Modification::Glycosylated => "glycosylated",
            Modification::Ubiquitinated => "ubiquitinated",
            Modification::Methylated => "methylated",
            Modification::Acetylated => "acetylated",
            Modification::Myristoylated => "myristoylated",
            Modification::Sulfated => "sulfated",
            Modification::Hydroxylated => "hydroxylated",
            Modification::Palmitoylated => "palmitoylated",
            Modification::Empty => "empty",
        }
    }
}

/// Copied verbatim from the source diagram: position, size and an
/// optional display color. No layout computation happens here, only
/// pass-through.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub color: Option<u32>,
}

impl Default for Layout {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, w: 0.0, h: 0.0, color: None }
    }
}

/// A biochemical entity in the source map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Species {
    /// Stable opaque id from the source diagram. Never reused as a
    /// Rust-level identity; the model looks species up by this id.
    pub id: String,
    pub name: String,
    pub compartment: String,
    pub species_type: SpeciesType,
    pub modifications: Vec<Modification>,
    pub layout: Layout,
    /// The synthesized Boolean formula, absent until the Rule
    /// Builder runs, and absent forever for a free input.
    pub function: Option<Expr>,
    pub annotations: AnnotationBag,
    /// Set once a fixed-value override is applied.
    pub fixed_value: Option<bool>,
    /// Public export name assigned by the Namer; `None` until
    /// naming runs.
    pub public_name: Option<String>,
    /// Export id sanitized to a valid SBML SId; `None` until
    /// naming runs.
    pub export_id: Option<String>,
}

impl Species {
    pub fn new(id: impl Into<String>, name: impl Into<String>, compartment: impl Into<String>, species_type: SpeciesType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            compartment: compartment.into(),
            species_type,
            modifications: Vec::new(),
            layout: Layout::default(),
            function: None,
            annotations: AnnotationBag::new(),
            fixed_value: None,
            public_name: None,
            export_id: None,
        }
    }

    /// `true` once rule synthesis attached a formula or an override pinned a constant.
    pub fn has_function(&self) -> bool {
        self.function.is_some() || self.fixed_value.is_some()
    }
}
