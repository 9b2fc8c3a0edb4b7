use crate::annotation::AnnotationBag;
use crate::error::{Error, Result};
use crate::reaction::Reaction;
use crate::species::Species;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Opaque handle to a species slot. Cheap to copy, ordered so ascending
/// iteration is just a sorted scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpeciesHandle(u32);

impl SpeciesHandle {
    /// Only for tests and fixtures that need to construct a handle
    /// without going through [`Model::add_species`].
    pub fn from_raw(raw: u32) -> Self {
        SpeciesHandle(raw)
    }

    pub fn raw(&self) -> u32 {
        self.0
    }
}

/// Opaque handle to a reaction slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReactionHandle(u32);

impl ReactionHandle {
    pub fn from_raw(raw: u32) -> Self {
        ReactionHandle(raw)
    }

    pub fn raw(&self) -> u32 {
        self.0
    }
}

/// Whether deleting a species also drops the reactions that reference
/// it, or leaves them for the caller to rewire — callers must pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletePolicy {
    DropIncidentReactions,
    LeaveIncidentReactions,
}

/// The in-memory reaction hypergraph.
///
/// Species and reactions live in two flat arrays indexed by small
/// integer handles. A union-find-style
/// redirect map lets a merge retire a handle in
/// O(1) instead of rewriting every reaction that mentions it; any
/// handle is resolved through [`Model::find`] before use.
#[derive(Debug, Default)]
pub struct Model {
    species: Vec<Option<Species>>,
    species_by_id: HashMap<String, SpeciesHandle>,
    species_redirect: Vec<Option<SpeciesHandle>>,
    reactions: Vec<Option<Reaction>>,
    reactions_by_id: HashMap<String, ReactionHandle>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    // -- species ----------------------------------------------------

    pub fn add_species(&mut self, species: Species) -> SpeciesHandle {
        let handle = SpeciesHandle(self.species.len() as u32);
        self.species_by_id.insert(species.id.clone(), handle);
        self.species.push(Some(species));
        self.species_redirect.push(None);
        handle
    }

    pub fn species_handle(&self, id: &str) -> Option<SpeciesHandle> {
        self.species_by_id.get(id).map(|h| self.find(*h))
    }

    /// Resolve `handle` to the handle of the species that currently
    /// holds its data, following merge redirects. A root handle
    /// resolves to itself.
    pub fn find(&self, handle: SpeciesHandle) -> SpeciesHandle {
        let mut current = handle;
        while let Some(Some(parent)) = self.species_redirect.get(current.0 as usize) {
            current = *parent;
        }
        current
    }

    pub fn species(&self, handle: SpeciesHandle) -> Option<&Species> {
        self.species.get(self.find(handle).0 as usize).and_then(|s| s.as_ref())
    }

    pub fn species_mut(&mut self, handle: SpeciesHandle) -> Option<&mut Species> {
        let root = self.find(handle);
        self.species.get_mut(root.0 as usize).and_then(|s| s.as_mut())
    }

    /// Surviving species in ascending handle order.
    pub fn iter_species(&self) -> impl Iterator<Item = (SpeciesHandle, &Species)> {
        self.species.iter().enumerate().filter_map(|(i, slot)| {
            let handle = SpeciesHandle(i as u32);
            // Only yield roots: a merged-away handle's slot is `None`.
            slot.as_ref().map(|s| (handle, s))
        })
    }

    pub fn species_count(&self) -> usize {
        self.species.iter().filter(|s| s.is_some()).count()
    }

    /// Remove a species outright (no transfer, no redirect — for
    /// merges that keep a successor alive use [`Model::merge_species`]
    /// instead). The caller decides whether reactions that still
    /// reference it are dropped too.
    pub fn delete_species(&mut self, handle: SpeciesHandle, policy: DeletePolicy) {
        let root = self.find(handle);
        self.species[root.0 as usize] = None;

        if policy == DeletePolicy::DropIncidentReactions {
            let incident: Vec<ReactionHandle> = self
                .iter_reactions()
                .filter(|(_, r)| r.referenced_species().any(|s| self.find(s) == root))
                .map(|(h, _)| h)
                .collect();
            for h in incident {
                self.delete_reaction(h);
            }
        }
    }

    /// Merge `from` into `into`: transfers `from`'s annotations onto
    /// `into`, then redirects `from` so any later [`Model::find`]
    /// resolves to `into`. Fails if `into` has itself already been
    /// merged away — the caller must chase forwardings first.
    pub fn merge_species(&mut self, from: SpeciesHandle, into: SpeciesHandle) -> Result<()> {
        if self.species_redirect[into.0 as usize].is_some() {
            let into_id = self.species[into.0 as usize]
                .as_ref()
                .map(|s| s.id.clone())
                .unwrap_or_else(|| format!("#{}", into.0));
            return Err(Error::MalformedInput(format!(
                "merge target {into_id} has already been merged away; chase forwardings first"
            )));
        }

        self.transfer_annotations(from, into)?;

        let from_root = self.find(from);
        if from_root != into {
            self.species[from_root.0 as usize] = None;
            self.species_redirect[from_root.0 as usize] = Some(into);
        }
        Ok(())
    }

    /// Merge `from`'s annotation bag into `into`'s, without redirecting
    /// `from` (used by rules that delete `from` outright rather than
    /// forward it, e.g. R1's receptor collapse).
    pub fn transfer_annotations(&mut self, from: SpeciesHandle, into: SpeciesHandle) -> Result<()> {
        if self.species_redirect[into.0 as usize].is_some() {
            return Err(Error::MalformedInput(
                "transfer target has already been merged away; chase forwardings first".into(),
            ));
        }
        let bag = self.species[self.find(from).0 as usize]
            .as_ref()
            .map(|s| s.annotations.clone())
            .unwrap_or_default();
        if let Some(target) = self.species[into.0 as usize].as_mut() {
            target.annotations.merge(&bag);
        }
        Ok(())
    }

    // -- reactions ----------------------------------------------------

    /// Validates that every referenced species resolves before storing.
    pub fn add_reaction(&mut self, reaction: Reaction) -> Result<ReactionHandle> {
        let dangling: Vec<String> = reaction
            .referenced_species()
            .filter(|s| self.species(*s).is_none())
            .map(|s| format!("#{}", s.0))
            .collect();
        if !dangling.is_empty() {
            return Err(Error::DanglingReference { reaction: reaction.id.clone(), species: dangling });
        }

        let handle = ReactionHandle(self.reactions.len() as u32);
        self.reactions_by_id.insert(reaction.id.clone(), handle);
        self.reactions.push(Some(reaction));
        Ok(handle)
    }

    pub fn reaction(&self, handle: ReactionHandle) -> Option<&Reaction> {
        self.reactions[handle.0 as usize].as_ref()
    }

    pub fn reaction_mut(&mut self, handle: ReactionHandle) -> Option<&mut Reaction> {
        self.reactions[handle.0 as usize].as_mut()
    }

    pub fn iter_reactions(&self) -> impl Iterator<Item = (ReactionHandle, &Reaction)> {
        self.reactions
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|r| (ReactionHandle(i as u32), r)))
    }

    pub fn delete_reaction(&mut self, handle: ReactionHandle) {
        self.reactions[handle.0 as usize] = None;
    }

    /// A snapshot of currently-surviving reaction handles, ascending.
    /// The Reducer takes this once per rule so that reactions
    /// created or rewritten mid-pass are not re-examined in the same
    /// pass, which is what keeps each rule terminating and confluent.
    pub fn reaction_snapshot(&self) -> Vec<ReactionHandle> {
        self.iter_reactions().map(|(h, _)| h).collect()
    }

    /// Replace every occurrence of `target` in any surviving
    /// reaction's product list with `replacement`, deduplicating.
    /// Used by R2/R4 to rewire producers of a merged-away species.
    pub fn rewire_products(&mut self, target: SpeciesHandle, replacement: SpeciesHandle) {
        let handles: Vec<ReactionHandle> = self.iter_reactions().map(|(h, _)| h).collect();
        for h in handles {
            if let Some(r) = self.reactions[h.0 as usize].as_mut() {
                let mut changed = false;
                for p in r.products.iter_mut() {
                    if *p == target {
                        *p = replacement;
                        changed = true;
                    }
                }
                if changed {
                    r.products.sort_by_key(|h| h.raw());
                    r.products.dedup();
                }
            }
        }
    }

    // -- invariant checks ----------------------------------

    /// Checks that every reference resolves, and that the three role
    /// sets of a reaction are pairwise disjoint.
    pub fn check_reaction_invariants(&self, handle: ReactionHandle) -> Result<()> {
        let Some(r) = self.reaction(handle) else { return Ok(()) };
        let mut dangling = Vec::new();
        for s in r.referenced_species() {
            if self.species(s).is_none() {
                dangling.push(format!("#{}", s.raw()));
            }
        }
        if !dangling.is_empty() {
            return Err(Error::DanglingReference { reaction: r.id.clone(), species: dangling });
        }

        let reactants: std::collections::HashSet<_> = r.reactants.iter().map(|s| self.find(*s)).collect();
        let products: std::collections::HashSet<_> = r.products.iter().map(|s| self.find(*s)).collect();
        let modifiers: std::collections::HashSet<_> = r.modifiers.iter().map(|(s, _)| self.find(*s)).collect();
        if !reactants.is_disjoint(&products) || !reactants.is_disjoint(&modifiers) || !products.is_disjoint(&modifiers) {
            return Err(Error::MalformedInput(format!(
                "reaction {} has overlapping reactant/product/modifier roles",
                r.id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reaction::ReactionType;
    use crate::species::SpeciesType;

    fn species(id: &str) -> Species {
        Species::new(id, id, "default", SpeciesType::Protein)
    }

    #[test]
    fn add_and_lookup_species() {
        let mut m = Model::new();
        let h = m.add_species(species("A"));
        assert_eq!(m.species_handle("A"), Some(h));
        assert_eq!(m.species(h).unwrap().id, "A");
    }

    #[test]
    fn merge_transfers_annotations_and_redirects() {
        let mut m = Model::new();
        let a = m.add_species(species("A"));
        let b = m.add_species(species("B"));
        m.species_mut(a).unwrap().annotations.insert(crate::annotation::MiriamQualifier::Is, "urn:a");

        m.merge_species(a, b).unwrap();

        assert!(m.species(a).is_none() == false); // resolves through find
        assert_eq!(m.find(a), b);
        assert_eq!(m.species(a).unwrap().id, "B");
        assert_eq!(m.species(b).unwrap().annotations.get(crate::annotation::MiriamQualifier::Is), &["urn:a"]);
    }

    #[test]
    fn merge_into_already_merged_target_fails() {
        let mut m = Model::new();
        let a = m.add_species(species("A"));
        let b = m.add_species(species("B"));
        let c = m.add_species(species("C"));
        m.merge_species(a, b).unwrap();
        assert!(m.merge_species(c, a).is_err());
    }

    #[test]
    fn add_reaction_validates_dangling_reference() {
        let mut m = Model::new();
        let a = m.add_species(species("A"));
        let ghost = SpeciesHandle::from_raw(99);
        let r = Reaction::new("r1", ReactionType::StateTransition)
            .with_reactants([a])
            .with_products([ghost]);
        assert!(m.add_reaction(r).is_err());
    }

    #[test]
    fn rewire_products_dedupes() {
        let mut m = Model::new();
        let a = m.add_species(species("A"));
        let b = m.add_species(species("B"));
        let target = m.add_species(species("T"));
        let r1 = Reaction::new("r1", ReactionType::StateTransition)
            .with_reactants([a])
            .with_products([target]);
        let r2 = Reaction::new("r2", ReactionType::StateTransition)
            .with_reactants([b])
            .with_products([target]);
        let h1 = m.add_reaction(r1).unwrap();
        let h2 = m.add_reaction(r2).unwrap();

        let replacement = m.add_species(species("P"));
        m.rewire_products(target, replacement);

        assert_eq!(m.reaction(h1).unwrap().products, vec![replacement]);
        assert_eq!(m.reaction(h2).unwrap().products, vec![replacement]);
    }
}
