use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// MIRIAM qualifiers used to tag annotation URIs on a species: the
/// qualifiers CellDesigner and SBML-Qual exporters actually emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MiriamQualifier {
    Is,
    IsDescribedBy,
    IsVersionOf,
    HasVersion,
    IsHomologTo,
    IsPartOf,
    HasPart,
    OccursIn,
    BiologicalQualifierUnknown,
}

/// A mapping from MIRIAM qualifier to an insertion-ordered,
/// deduplicated list of annotation URIs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnotationBag {
    entries: HashMap<MiriamQualifier, Vec<String>>,
}

impl AnnotationBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, qualifier: MiriamQualifier, uri: impl Into<String>) {
        let uri = uri.into();
        let list = self.entries.entry(qualifier).or_default();
        if !list.contains(&uri) {
            list.push(uri);
        }
    }

    pub fn get(&self, qualifier: MiriamQualifier) -> &[String] {
        self.entries.get(&qualifier).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.entries.values().all(|v| v.is_empty())
    }

    pub fn qualifiers(&self) -> impl Iterator<Item = &MiriamQualifier> {
        self.entries.keys()
    }

    /// Merge `other` into `self`, unioning URI lists per qualifier and
    /// preserving first-seen order. Commutative in the resulting set
    /// of URIs per qualifier (not in list order when both sides
    /// already hold entries, since `self`'s entries come first) and
    /// idempotent: merging the same bag twice adds nothing new.
    pub fn merge(&mut self, other: &AnnotationBag) {
        for (qualifier, uris) in &other.entries {
            for uri in uris {
                self.insert(*qualifier, uri.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_dedups_and_preserves_order() {
        let mut a = AnnotationBag::new();
        a.insert(MiriamQualifier::Is, "urn:a");
        a.insert(MiriamQualifier::Is, "urn:b");

        let mut b = AnnotationBag::new();
        b.insert(MiriamQualifier::Is, "urn:b");
        b.insert(MiriamQualifier::Is, "urn:c");

        a.merge(&b);
        assert_eq!(a.get(MiriamQualifier::Is), &["urn:a", "urn:b", "urn:c"]);
    }

    #[test]
    fn merge_is_idempotent() {
        let mut a = AnnotationBag::new();
        a.insert(MiriamQualifier::IsDescribedBy, "urn:x");
        let snapshot = a.clone();
        a.merge(&snapshot);
        assert_eq!(a.get(MiriamQualifier::IsDescribedBy), &["urn:x"]);
    }
}
