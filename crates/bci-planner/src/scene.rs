//! The factory floor's default scene: obstacle geometry, map bounds, and
//! the named-waypoint/alias table.

use std::collections::HashMap;

use crate::grid::{MapBounds, Obstacle};
use crate::waypoint::{Waypoint, WaypointTable};

/// Map boundaries in meters, matching the floor's physical extents.
pub const FACTORY_BOUNDS: MapBounds =
    MapBounds { min_x: -7.5, max_x: 7.5, min_y: -5.5, max_y: 7.5 };

/// Obstacle rectangles (center, half-extents) for the default factory
/// scene: pillars, bollards, two shelving units, conveyor, table, pallets,
/// boundary walls, charging station, tool cabinet, storage rack, and the
/// inspection table.
pub fn factory_obstacles() -> Vec<Obstacle> {
    vec![
        Obstacle::new(-4.0, -4.0, 0.15, 0.15),
        Obstacle::new(4.0, -4.0, 0.15, 0.15),
        Obstacle::new(-2.0, 0.5, 0.06, 0.06),
        Obstacle::new(-2.0, -0.5, 0.06, 0.06),
        Obstacle::new(2.0, 0.5, 0.06, 0.06),
        Obstacle::new(2.0, -0.5, 0.06, 0.06),
        // Shelf A uprights and surfaces
        Obstacle::new(-4.1, -1.7, 0.03, 0.03),
        Obstacle::new(-2.9, -1.7, 0.03, 0.03),
        Obstacle::new(-4.1, -2.3, 0.03, 0.03),
        Obstacle::new(-2.9, -2.3, 0.03, 0.03),
        Obstacle::new(-3.5, -2.0, 0.65, 0.35),
        Obstacle::new(-3.5, -2.0, 0.65, 0.35),
        // Shelf B uprights and surfaces
        Obstacle::new(2.9, -1.7, 0.03, 0.03),
        Obstacle::new(4.1, -1.7, 0.03, 0.03),
        Obstacle::new(2.9, -2.3, 0.03, 0.03),
        Obstacle::new(4.1, -2.3, 0.03, 0.03),
        Obstacle::new(3.5, -2.0, 0.65, 0.35),
        Obstacle::new(3.5, -2.0, 0.65, 0.35),
        Obstacle::new(0.0, -3.5, 1.6, 0.3),
        Obstacle::new(2.0, 1.5, 0.5, 0.35),
        Obstacle::new(-1.5, 1.0, 0.5, 0.4),
        Obstacle::new(1.5, 1.0, 0.5, 0.4),
        Obstacle::new(0.0, 7.5, 8.0, 0.1),
        Obstacle::new(0.0, -5.5, 8.0, 0.1),
        Obstacle::new(7.5, 1.0, 0.1, 6.5),
        Obstacle::new(-7.5, 1.0, 0.1, 6.5),
        Obstacle::new(-5.5, 3.5, 0.6, 0.6),
        Obstacle::new(-5.5, 4.1, 0.04, 0.04),
        Obstacle::new(5.5, -0.5, 0.4, 0.25),
        Obstacle::new(-5.0, -3.5, 0.8, 0.4),
        Obstacle::new(0.0, 4.5, 0.6, 0.4),
    ]
}

/// The default named waypoints, at the center of their corresponding
/// obstacle.
pub fn factory_waypoint_table() -> WaypointTable {
    let waypoints = vec![
        Waypoint { canonical_name: "Shelf A".into(), x: -3.5, y: -2.0 },
        Waypoint { canonical_name: "Shelf B".into(), x: 3.5, y: -2.0 },
        Waypoint { canonical_name: "Conveyor".into(), x: 0.0, y: -3.5 },
        Waypoint { canonical_name: "Table".into(), x: 2.0, y: 1.5 },
        Waypoint { canonical_name: "Pallet 1".into(), x: -1.5, y: 1.0 },
        Waypoint { canonical_name: "Pallet 2".into(), x: 1.5, y: 1.0 },
        Waypoint { canonical_name: "Charging Station".into(), x: -5.5, y: 3.5 },
        Waypoint { canonical_name: "Tool Cabinet".into(), x: 5.5, y: -0.5 },
        Waypoint { canonical_name: "Storage Area".into(), x: -5.0, y: -3.5 },
        Waypoint { canonical_name: "Inspection Zone".into(), x: 0.0, y: 4.5 },
    ];

    let pairs: &[(&str, &str)] = &[
        ("shelf a", "Shelf A"),
        ("shelf 1", "Shelf A"),
        ("shelve a", "Shelf A"),
        ("shelf b", "Shelf B"),
        ("shelf 2", "Shelf B"),
        ("shelve b", "Shelf B"),
        ("conveyor", "Conveyor"),
        ("conveyor belt", "Conveyor"),
        ("the conveyor", "Conveyor"),
        ("belt", "Conveyor"),
        ("table", "Table"),
        ("the table", "Table"),
        ("work table", "Table"),
        ("pallet 1", "Pallet 1"),
        ("pallet one", "Pallet 1"),
        ("source pallet", "Pallet 1"),
        ("first pallet", "Pallet 1"),
        ("palette 1", "Pallet 1"),
        ("palette one", "Pallet 1"),
        ("pallet 2", "Pallet 2"),
        ("pallet two", "Pallet 2"),
        ("destination pallet", "Pallet 2"),
        ("second pallet", "Pallet 2"),
        ("palette 2", "Pallet 2"),
        ("palette two", "Pallet 2"),
        ("pallet", "Pallet 2"),
        ("palette", "Pallet 2"),
        ("the pallet", "Pallet 2"),
        ("the palette", "Pallet 2"),
        ("pallet to", "Pallet 2"),
        ("palette to", "Pallet 2"),
        ("shelf to", "Shelf B"),
        ("shelve to", "Shelf B"),
        ("charging station", "Charging Station"),
        ("charging", "Charging Station"),
        ("charger", "Charging Station"),
        ("charge", "Charging Station"),
        ("tool cabinet", "Tool Cabinet"),
        ("tools", "Tool Cabinet"),
        ("cabinet", "Tool Cabinet"),
        ("tool box", "Tool Cabinet"),
        ("storage area", "Storage Area"),
        ("storage", "Storage Area"),
        ("storage rack", "Storage Area"),
        ("inspection zone", "Inspection Zone"),
        ("inspection", "Inspection Zone"),
        ("inspect", "Inspection Zone"),
        ("qc", "Inspection Zone"),
    ];
    let aliases: HashMap<String, String> =
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();

    WaypointTable::new(waypoints, aliases)
}
