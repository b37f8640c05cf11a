//! Named waypoints and the spoken-alias resolution table.

use std::collections::HashMap;

/// A named world-coordinate anchor.
#[derive(Clone, Debug, PartialEq)]
pub struct Waypoint {
    pub canonical_name: String,
    pub x: f32,
    pub y: f32,
}

/// Static configuration: the waypoint list plus a many-to-one alias map
/// into canonical waypoint names.
#[derive(Clone, Debug, Default)]
pub struct WaypointTable {
    waypoints: Vec<Waypoint>,
    aliases: HashMap<String, String>,
}

impl WaypointTable {
    pub fn new(waypoints: Vec<Waypoint>, aliases: HashMap<String, String>) -> Self {
        Self { waypoints, aliases }
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn by_name(&self, canonical_name: &str) -> Option<&Waypoint> {
        self.waypoints.iter().find(|w| w.canonical_name == canonical_name)
    }

    /// Resolve a spoken landmark name to `(canonical_name, (x, y))`.
    ///
    /// Exact alias match first; then substring match against waypoint
    /// names in either direction (the spoken text contains the waypoint
    /// name, or the waypoint name contains the spoken text).
    pub fn resolve(&self, spoken: &str) -> Option<(String, (f32, f32))> {
        let needle = spoken.to_lowercase();
        let needle = needle.trim();

        if let Some(canonical) = self.aliases.get(needle) {
            let wp = self.by_name(canonical)?;
            return Some((wp.canonical_name.clone(), (wp.x, wp.y)));
        }

        for wp in &self.waypoints {
            let lower = wp.canonical_name.to_lowercase();
            if lower.contains(needle) || needle.contains(lower.as_str()) {
                return Some((wp.canonical_name.clone(), (wp.x, wp.y)));
            }
        }

        None
    }
}
