use std::collections::HashMap;

use docsite_config::PluginSpec;
use docsite_sidebar::ValidatedSidebars;
use serde::Serialize;
use strsim::normalized_levenshtein;

use crate::paths::{join_base, normalize_route};

/// One internal page produced by a docs plugin.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Route {
    pub path: String,
    pub plugin_id: String,
    pub doc_id: String,
}

/// A doc whose route is already served by an earlier doc.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RouteCollision {
    pub path: String,
    pub plugin_id: String,
    pub doc_id: String,
    /// The route that keeps the path.
    pub existing: Route,
}

/// Every route known to the site, in plugin then sidebar order.
#[derive(Clone, Debug, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
    by_path: HashMap<String, usize>,
}

impl RouteTable {
    /// Register the docs reachable from `sidebars` under `plugin`. The first
    /// doc to claim a path keeps it; later claimants are returned.
    pub(crate) fn add_plugin(
        &mut self,
        base_url: &str,
        plugin: &PluginSpec,
        sidebars: &ValidatedSidebars,
    ) -> Vec<RouteCollision> {
        let mut collisions = Vec::new();
        for doc_id in sidebars.doc_ids() {
            let path = join_base(base_url, &plugin.route_for(doc_id));
            let key = normalize_route(&path);
            if let Some(&index) = self.by_path.get(&key) {
                collisions.push(RouteCollision {
                    path,
                    plugin_id: plugin.id.clone(),
                    doc_id: doc_id.to_string(),
                    existing: self.routes[index].clone(),
                });
                continue;
            }
            self.by_path.insert(key, self.routes.len());
            self.routes.push(Route {
                path,
                plugin_id: plugin.id.clone(),
                doc_id: doc_id.to_string(),
            });
        }
        collisions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Route serving `path`, ignoring a trailing slash.
    pub fn get(&self, path: &str) -> Option<&Route> {
        self.by_path
            .get(&normalize_route(path))
            .map(|&index| &self.routes[index])
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Closest known route to `path`, if any is reasonably similar.
    pub fn suggest(&self, path: &str) -> Option<&str> {
        let wanted = normalize_route(path);
        self.routes
            .iter()
            .map(|route| {
                let score = normalized_levenshtein(&wanted, &normalize_route(&route.path));
                (route.path.as_str(), score)
            })
            .filter(|(_, score)| *score > 0.6)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(path, _)| path)
    }
}
