//! Pruner: optional connected-component filter and upstream/
//! downstream influence-cone selection. Runs after the Rule Builder,
//! so a dropped species' remaining reference inside a surviving
//! formula is replaced by `FALSE` — an upstream that is no longer
//! modelled cannot activate anything — rather than left dangling.

use log::{debug, info};
use sbgnq_core::{DeletePolicy, Expr, Influence, Model, SpeciesHandle};
use std::collections::{HashMap, HashSet};

/// Parameters accepted by [`prune`], mirroring the CLI's `-r`, `-u`,
/// `-d` flags one-to-one.
#[derive(Debug, Clone, Default)]
pub struct PruneParams {
    /// `0` disables the filter, `>0` is a minimum component size,
    /// `<0` keeps the `|S|` largest components.
    pub component_threshold: i64,
    /// Target species names for the upstream cone.
    pub upstream: Vec<String>,
    /// Target species names for the downstream cone.
    pub downstream: Vec<String>,
}

impl PruneParams {
    pub fn is_noop(&self) -> bool {
        self.component_threshold == 0 && self.upstream.is_empty() && self.downstream.is_empty()
    }
}

/// Apply the pruner in place. `influences` is the Abstracter's output
/// for the model as it stands before pruning.
pub fn prune(model: &mut Model, influences: &[Influence], params: &PruneParams) {
    if params.is_noop() {
        debug!("pruner: no-op (threshold 0, no cones requested)");
        return;
    }

    let all: HashSet<SpeciesHandle> = model.iter_species().map(|(h, _)| h).collect();
    let survivors = component_filter(model, &all, influences, params.component_threshold);
    let survivors = cone_filter(model, &survivors, influences, &params.upstream, &params.downstream);

    let dropped: HashSet<SpeciesHandle> = all.difference(&survivors).copied().collect();
    if dropped.is_empty() {
        debug!("pruner: all species survived");
        return;
    }

    let handles: Vec<SpeciesHandle> = model.iter_species().map(|(h, _)| h).collect();
    for h in handles {
        if survivors.contains(&h) {
            if let Some(s) = model.species_mut(h) {
                if let Some(formula) = s.function.take() {
                    s.function = Some(fold_dropped(&formula, &dropped));
                }
            }
        }
    }

    for h in dropped.iter().copied() {
        model.delete_species(h, DeletePolicy::DropIncidentReactions);
    }
    info!(
        "pruner: dropped {} of {} species ({} survive)",
        dropped.len(),
        all.len(),
        survivors.len()
    );
}

fn fold_dropped(expr: &Expr, dropped: &HashSet<SpeciesHandle>) -> Expr {
    let mut out = expr.clone();
    for h in dropped {
        out = out.substitute(*h, &Expr::FALSE);
    }
    out
}

/// Weakly-connected components of the species graph induced by
/// influences (signs ignored), filtered by `threshold`.
fn component_filter(
    model: &Model,
    all: &HashSet<SpeciesHandle>,
    influences: &[Influence],
    threshold: i64,
) -> HashSet<SpeciesHandle> {
    if threshold == 0 {
        return all.clone();
    }

    let mut adjacency: HashMap<SpeciesHandle, Vec<SpeciesHandle>> = HashMap::new();
    for h in all {
        adjacency.entry(*h).or_default();
    }
    for inf in influences {
        let a = model.find(inf.source);
        let b = model.find(inf.target);
        if all.contains(&a) && all.contains(&b) {
            adjacency.entry(a).or_default().push(b);
            adjacency.entry(b).or_default().push(a);
        }
    }

    let mut visited: HashSet<SpeciesHandle> = HashSet::new();
    let mut components: Vec<Vec<SpeciesHandle>> = Vec::new();
    let mut ids_sorted: Vec<SpeciesHandle> = all.iter().copied().collect();
    ids_sorted.sort();

    for &start in &ids_sorted {
        if visited.contains(&start) {
            continue;
        }
        let mut stack = vec![start];
        let mut component = Vec::new();
        visited.insert(start);
        while let Some(node) = stack.pop() {
            component.push(node);
            if let Some(neighbors) = adjacency.get(&node) {
                for &n in neighbors {
                    if visited.insert(n) {
                        stack.push(n);
                    }
                }
            }
        }
        component.sort();
        components.push(component);
    }

    // Deterministic ordering: by ascending minimum-handle-as-id. Handle
    // order already proxies ascending original species id, but we
    // sort explicitly on the min member to make the tie-break rule
    // legible.
    components.sort_by_key(|c| {
        c.iter()
            .map(|h| model.species(*h).map(|s| s.id.clone()).unwrap_or_default())
            .min()
            .unwrap_or_default()
    });

    let kept: Vec<Vec<SpeciesHandle>> = if threshold > 0 {
        components.into_iter().filter(|c| c.len() as i64 >= threshold).collect()
    } else {
        let keep_n = (-threshold) as usize;
        let mut by_size = components;
        by_size.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| {
            let a_min = a.iter().map(|h| model.species(*h).map(|s| s.id.clone()).unwrap_or_default()).min();
            let b_min = b.iter().map(|h| model.species(*h).map(|s| s.id.clone()).unwrap_or_default()).min();
            a_min.cmp(&b_min)
        }));
        by_size.into_iter().take(keep_n).collect()
    };

    kept.into_iter().flatten().collect()
}

/// Upstream and downstream cones over the surviving set.
fn cone_filter(
    model: &Model,
    survivors: &HashSet<SpeciesHandle>,
    influences: &[Influence],
    upstream: &[String],
    downstream: &[String],
) -> HashSet<SpeciesHandle> {
    if upstream.is_empty() && downstream.is_empty() {
        return survivors.clone();
    }

    let mut forward: HashMap<SpeciesHandle, Vec<SpeciesHandle>> = HashMap::new();
    let mut backward: HashMap<SpeciesHandle, Vec<SpeciesHandle>> = HashMap::new();
    for inf in influences {
        let a = model.find(inf.source);
        let b = model.find(inf.target);
        if survivors.contains(&a) && survivors.contains(&b) {
            forward.entry(a).or_default().push(b);
            backward.entry(b).or_default().push(a);
        }
    }

    let resolve = |names: &[String]| -> HashSet<SpeciesHandle> {
        names
            .iter()
            .filter_map(|name| model.iter_species().find(|(h, s)| survivors.contains(h) && &s.name == name).map(|(h, _)| h))
            .collect()
    };

    let mut cone = HashSet::new();
    if !upstream.is_empty() {
        let targets = resolve(upstream);
        cone.extend(reachable(&backward, &targets));
    }
    if !downstream.is_empty() {
        let targets = resolve(downstream);
        cone.extend(reachable(&forward, &targets));
    }

    survivors.intersection(&cone).copied().collect()
}

fn reachable(adjacency: &HashMap<SpeciesHandle, Vec<SpeciesHandle>>, seeds: &HashSet<SpeciesHandle>) -> HashSet<SpeciesHandle> {
    let mut seen: HashSet<SpeciesHandle> = seeds.clone();
    let mut stack: Vec<SpeciesHandle> = seeds.iter().copied().collect();
    while let Some(node) = stack.pop() {
        if let Some(neighbors) = adjacency.get(&node) {
            for &n in neighbors {
                if seen.insert(n) {
                    stack.push(n);
                }
            }
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstracter::abstract_influences;
    use sbgnq_core::fixtures;

    #[test]
    fn threshold_keeps_only_large_component() {
        let m = fixtures::two_components();
        let influences = abstract_influences(&m);
        let mut m = m;
        prune(&mut m, &influences, &PruneParams { component_threshold: 3, ..Default::default() });
        assert_eq!(m.species_count(), 5);
        assert!(m.species_handle("B1").is_none());
    }

    #[test]
    fn negative_threshold_keeps_n_largest() {
        let m = fixtures::two_components();
        let influences = abstract_influences(&m);
        let mut m = m;
        prune(&mut m, &influences, &PruneParams { component_threshold: -1, ..Default::default() });
        assert_eq!(m.species_count(), 5);
    }

    #[test]
    fn zero_threshold_keeps_everything() {
        let m = fixtures::two_components();
        let influences = abstract_influences(&m);
        let mut m = m;
        prune(&mut m, &influences, &PruneParams::default());
        assert_eq!(m.species_count(), 7);
    }

    #[test]
    fn upstream_cone_keeps_ancestors_only() {
        let m = fixtures::upstream_chain();
        let influences = abstract_influences(&m);
        let mut m = m;
        prune(
            &mut m,
            &influences,
            &PruneParams { upstream: vec!["D".to_string()], ..Default::default() },
        );
        assert!(m.species_handle("A").is_some());
        assert!(m.species_handle("B").is_some());
        assert!(m.species_handle("C").is_some());
        assert!(m.species_handle("D").is_some());
        assert!(m.species_handle("X").is_none());
        assert!(m.species_handle("Y").is_none());
    }

    #[test]
    fn dropped_reference_in_formula_folds_to_false() {
        let m = fixtures::upstream_chain();
        let influences = abstract_influences(&m);
        let mut m = m;
        crate::rules::build_rules(&mut m);
        prune(
            &mut m,
            &influences,
            &PruneParams { upstream: vec!["D".to_string()], ..Default::default() },
        );
        // X is dropped; nothing in the surviving chain referenced it,
        // but this exercises the fold path without panicking.
        assert!(m.species_handle("X").is_none());
    }
}
