//! Plugin ordering.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use log::{trace, warn};

use super::Plugin;
use crate::error::TableError;

/// Order plugins so that every plugin runs after the plugins named in its
/// [`after`](Plugin::after) list.
///
/// Among the plugins whose dependencies are satisfied, the one registered
/// first is placed first, so plugins without constraints keep registration
/// order. Dependencies on plugins that are not registered are ignored.
///
/// Fails with [`TableError::PluginCycle`] if the constraints cannot be met,
/// and with [`TableError::DuplicatePlugin`] if a name is registered twice.
pub fn sort_plugins(plugins: Vec<Arc<dyn Plugin>>) -> Result<Vec<Arc<dyn Plugin>>, TableError> {
    let mut positions: HashMap<&'static str, usize> = HashMap::new();
    for (i, plugin) in plugins.iter().enumerate() {
        if positions.insert(plugin.name(), i).is_some() {
            return Err(TableError::DuplicatePlugin(plugin.name().to_string()));
        }
    }

    let dependencies: Vec<Vec<usize>> = plugins
        .iter()
        .map(|plugin| {
            plugin
                .after()
                .iter()
                .filter_map(|dep| {
                    let found = positions.get(dep).copied();
                    if found.is_none() {
                        warn!(
                            "Plugin '{}' runs after unregistered plugin '{}', ignoring",
                            plugin.name(),
                            dep
                        );
                    }
                    found
                })
                .collect()
        })
        .collect();

    let mut placed: HashSet<usize> = HashSet::new();
    let mut remaining: Vec<usize> = (0..plugins.len()).collect();
    let mut order = Vec::with_capacity(plugins.len());

    while !remaining.is_empty() {
        let ready = remaining
            .iter()
            .position(|&i| dependencies[i].iter().all(|dep| placed.contains(dep)));

        let Some(pos) = ready else {
            return Err(TableError::PluginCycle {
                plugins: remaining
                    .iter()
                    .map(|&i| plugins[i].name().to_string())
                    .collect(),
            });
        };

        let next = remaining.remove(pos);
        placed.insert(next);
        order.push(next);
    }

    let mut slots: Vec<Option<Arc<dyn Plugin>>> = plugins.into_iter().map(Some).collect();
    let sorted: Vec<Arc<dyn Plugin>> = order.iter().filter_map(|&i| slots[i].take()).collect();

    trace!(
        "Plugin order: {:?}",
        sorted.iter().map(|p| p.name()).collect::<Vec<_>>()
    );

    Ok(sorted)
}
