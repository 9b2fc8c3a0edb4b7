//! String<->enum mappings for the closed species/reaction/modifier
//! vocabularies. The strings match the CellDesigner/SBGN-PD dialect
//! these models are read from and written back to.

use sbgnq_core::{MiriamQualifier, ModifierKind, Modification, ReactionType, SpeciesType};

pub fn species_type_from_str(s: &str) -> SpeciesType {
    match s {
        "PROTEIN" => SpeciesType::Protein,
        "RECEPTOR" => SpeciesType::Receptor,
        "RNA" => SpeciesType::Rna,
        "GENE" => SpeciesType::Gene,
        "ANTISENSE_RNA" => SpeciesType::AntisenseRna,
        "SIMPLE_MOLECULE" => SpeciesType::SimpleMolecule,
        "ION" => SpeciesType::Ion,
        "COMPLEX" => SpeciesType::Complex,
        "DEGRADED" => SpeciesType::Degraded,
        "PHENOTYPE" => SpeciesType::Phenotype,
        "DRUG" => SpeciesType::Drug,
        _ => SpeciesType::Unknown,
    }
}

pub fn species_type_to_str(t: SpeciesType) -> &'static str {
    match t {
        SpeciesType::Protein => "PROTEIN",
        SpeciesType::Receptor => "RECEPTOR",
        SpeciesType::Rna => "RNA",
        SpeciesType::Gene => "GENE",
        SpeciesType::AntisenseRna => "ANTISENSE_RNA",
        SpeciesType::SimpleMolecule => "SIMPLE_MOLECULE",
        SpeciesType::Ion => "ION",
        SpeciesType::Complex => "COMPLEX",
        SpeciesType::Degraded => "DEGRADED",
        SpeciesType::Phenotype => "PHENOTYPE",
        SpeciesType::Drug => "DRUG",
        SpeciesType::Unknown => "UNKNOWN",
    }
}

pub fn modification_from_str(s: &str) -> Option<Modification> {
    Some(match s {
        "phosphorylated" => Modification::Phosphorylated,
        "active" => Modification::Active,
        "inactive" => Modification::Inactive,
        "glycosylated" => Modification::Glycosylated,
        "ubiquitinated" => Modification::Ubiquitinated,
        "methylated" => Modification::Methylated,
        "acetylated" => Modification::Acetylated,
        "myristoylated" => Modification::Myristoylated,
        "sulfated" => Modification::Sulfated,
        "hydroxylated" => Modification::Hydroxylated,
        "palmitoylated" => Modification::Palmitoylated,
        "empty" => Modification::Empty,
        _ => return None,
    })
}

pub fn reaction_type_from_str(s: &str) -> ReactionType {
    match s {
        "STATE_TRANSITION" => ReactionType::StateTransition,
        "HETERODIMER_ASSOCIATION" => ReactionType::HeterodimerAssociation,
        "DISSOCIATION" => ReactionType::Dissociation,
        "TRANSPORT" => ReactionType::Transport,
        "TRANSCRIPTION" => ReactionType::Transcription,
        "TRANSLATION" => ReactionType::Translation,
        "TRUE_POSITIVE_INFLUENCE" => ReactionType::TruePositiveInfluence,
        "TRUE_NEGATIVE_INFLUENCE" => ReactionType::TrueNegativeInfluence,
        "UNKNOWN_POSITIVE_INFLUENCE" => ReactionType::UnknownPositiveInfluence,
        "UNKNOWN_NEGATIVE_INFLUENCE" => ReactionType::UnknownNegativeInfluence,
        "REDUCED_PHYSICAL_STIMULATION" => ReactionType::ReducedPhysicalStimulation,
        "REDUCED_MODULATION" => ReactionType::ReducedModulation,
        "REDUCED_INHIBITION" => ReactionType::ReducedInhibition,
        "REDUCED_TRIGGER" => ReactionType::ReducedTrigger,
        _ => ReactionType::Unknown,
    }
}

pub fn modifier_kind_from_str(s: &str) -> Option<ModifierKind> {
    Some(match s {
        "CATALYSIS" => ModifierKind::Catalyst,
        "TRANSCRIPTIONAL_ACTIVATION" => ModifierKind::TranscriptionalActivator,
        "PHYSICAL_STIMULATION" => ModifierKind::PhysicalStimulation,
        "UNKNOWN_POSITIVE_INFLUENCE" => ModifierKind::UnknownPositive,
        "MODULATION" => ModifierKind::Modulator,
        "TRIGGER" => ModifierKind::Trigger,
        "INHIBITION" => ModifierKind::Inhibitor,
        "UNKNOWN_INHIBITION" => ModifierKind::UnknownNegative,
        "TRANSCRIPTIONAL_INHIBITION" => ModifierKind::TranscriptionalInhibitor,
        _ => return None,
    })
}

pub fn qualifier_from_str(s: &str) -> MiriamQualifier {
    match s {
        "is" => MiriamQualifier::Is,
        "isDescribedBy" => MiriamQualifier::IsDescribedBy,
        "isVersionOf" => MiriamQualifier::IsVersionOf,
        "hasVersion" => MiriamQualifier::HasVersion,
        "isHomologTo" => MiriamQualifier::IsHomologTo,
        "isPartOf" => MiriamQualifier::IsPartOf,
        "hasPart" => MiriamQualifier::HasPart,
        "occursIn" => MiriamQualifier::OccursIn,
        _ => MiriamQualifier::BiologicalQualifierUnknown,
    }
}
