use crate::model::SpeciesHandle;
use serde::{Deserialize, Serialize};

/// Closed vocabulary of CellDesigner/SBGN-PD reaction types.
/// The `Reduced*` variants are synthetic: they never come from the
/// reader, only from rewrite bookkeeping that wants to mark a
/// reaction's provenance for diagnostics (the reducer does not
/// currently emit them, but the vocabulary is reserved so a future
/// reducer rule can record that a reaction was born from a collapse
/// rather than read verbatim).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReactionType {
    StateTransition,
    HeterodimerAssociation,
    Dissociation,
    Transport,
    Transcription,
    Translation,
    TruePositiveInfluence,
    TrueNegativeInfluence,
    UnknownPositiveInfluence,
    UnknownNegativeInfluence,
    ReducedPhysicalStimulation,
    ReducedModulation,
    ReducedInhibition,
    ReducedTrigger,
    Unknown,
}

impl ReactionType {
    pub fn is_heterodimer_association(&self) -> bool {
        matches!(self, ReactionType::HeterodimerAssociation)
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ReactionType::Transport)
    }
}

/// The role a modifier plays in a reaction. Polarity classification:
/// catalyst/transcriptional_activator/physical_stimulation/
/// unknown_positive/modulator/trigger are positive; inhibitor/
/// unknown_negative/transcriptional_inhibitor are negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierKind {
    Catalyst,
    TranscriptionalActivator,
    PhysicalStimulation,
    UnknownPositive,
    Modulator,
    Trigger,
    Inhibitor,
    UnknownNegative,
    TranscriptionalInhibitor,
}

/// Sign implied by a modifier's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Polarity {
    Positive,
    Negative,
}

impl ModifierKind {
    pub fn polarity(&self) -> Polarity {
        match self {
            ModifierKind::Catalyst
            | ModifierKind::TranscriptionalActivator
            | ModifierKind::PhysicalStimulation
            | ModifierKind::UnknownPositive
            | ModifierKind::Modulator
            | ModifierKind::Trigger => Polarity::Positive,
            ModifierKind::Inhibitor
            | ModifierKind::UnknownNegative
            | ModifierKind::TranscriptionalInhibitor => Polarity::Negative,
        }
    }
}

/// A hyperedge connecting reactant, product and modifier species.
/// Species are referenced by [`SpeciesHandle`], not by id string, so
/// rewiring after a merge is an O(1) redirect-map update rather than a
/// string-keyed rewrite of every reaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reaction {
    pub id: String,
    pub reaction_type: ReactionType,
    pub reactants: Vec<SpeciesHandle>,
    pub products: Vec<SpeciesHandle>,
    pub modifiers: Vec<(SpeciesHandle, ModifierKind)>,
}

impl Reaction {
    pub fn new(id: impl Into<String>, reaction_type: ReactionType) -> Self {
        Self {
            id: id.into(),
            reaction_type,
            reactants: Vec::new(),
            products: Vec::new(),
            modifiers: Vec::new(),
        }
    }

    pub fn with_reactants(mut self, reactants: impl IntoIterator<Item = SpeciesHandle>) -> Self {
        self.reactants = reactants.into_iter().collect();
        self
    }

    pub fn with_products(mut self, products: impl IntoIterator<Item = SpeciesHandle>) -> Self {
        self.products = products.into_iter().collect();
        self
    }

    pub fn with_modifier(mut self, species: SpeciesHandle, kind: ModifierKind) -> Self {
        self.modifiers.push((species, kind));
        self
    }

    /// Modifiers whose kind classifies as [`Polarity::Positive`].
    pub fn positive_modifiers(&self) -> impl Iterator<Item = SpeciesHandle> + '_ {
        self.modifiers
            .iter()
            .filter(|(_, k)| k.polarity() == Polarity::Positive)
            .map(|(s, _)| *s)
    }

    /// Modifiers whose kind classifies as [`Polarity::Negative`].
    pub fn negative_modifiers(&self) -> impl Iterator<Item = SpeciesHandle> + '_ {
        self.modifiers
            .iter()
            .filter(|(_, k)| k.polarity() == Polarity::Negative)
            .map(|(s, _)| *s)
    }

    /// All species handles referenced by this reaction, in
    /// reactants-then-products-then-modifiers order (used by the
    /// model's reaction invariant checks).
    pub fn referenced_species(&self) -> impl Iterator<Item = SpeciesHandle> + '_ {
        self.reactants
            .iter()
            .copied()
            .chain(self.products.iter().copied())
            .chain(self.modifiers.iter().map(|(s, _)| *s))
    }
}
