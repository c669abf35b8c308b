use crate::error::{self, Result};
use crate::Addon;
use std::collections::BTreeMap;
use std::sync::Arc;
use topological_sort::TopologicalSort;

/// Sort `addons` into waves. Every addon in a wave only depends on addons from earlier waves, so
/// the addons of one wave can be installed together. Addons within a wave are ordered by name.
///
/// Fails if two addons share a name, if an addon depends on an addon that is not in `addons`, or
/// if the dependencies form a cycle.
pub fn install_order(addons: &[Arc<dyn Addon>]) -> Result<Vec<Vec<Arc<dyn Addon>>>> {
    let mut by_name = BTreeMap::new();
    for addon in addons {
        let name = addon.identity().name.clone();
        if by_name.insert(name.clone(), addon.clone()).is_some() {
            return error::DuplicateAddonSnafu { name }.fail();
        }
    }

    let mut topo_sort = TopologicalSort::<String>::new();
    for (name, addon) in &by_name {
        topo_sort.insert(name.clone());
        for dependency in addon.depends_on() {
            if !by_name.contains_key(&dependency) {
                return error::MissingDependencySnafu {
                    addon: name.clone(),
                    dependency,
                }
                .fail();
            }
            // The dependency is installed first.
            topo_sort.add_dependency(dependency, name.clone());
        }
    }

    let mut waves = Vec::new();
    while !topo_sort.is_empty() {
        let mut wave = topo_sort.pop_all();
        if wave.is_empty() {
            // Whatever has not been placed in a wave is part of, or waits on, a cycle.
            let placed: Vec<&String> = waves.iter().flatten().collect();
            let addons: Vec<String> = by_name
                .keys()
                .filter(|name| !placed.contains(name))
                .cloned()
                .collect();
            return error::DependencyCycleSnafu { addons }.fail();
        }
        wave.sort();
        waves.push(wave);
    }

    Ok(waves
        .into_iter()
        .map(|wave| {
            wave.iter()
                .filter_map(|name| by_name.get(name).cloned())
                .collect()
        })
        .collect())
}
