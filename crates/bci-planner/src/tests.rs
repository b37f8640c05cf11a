#[cfg(test)]
mod grid {
    use crate::grid::{MapBounds, Obstacle, OccupancyGrid};

    fn bounds() -> MapBounds {
        MapBounds { min_x: -5.0, max_x: 5.0, min_y: -5.0, max_y: 5.0 }
    }

    #[test]
    fn inflated_obstacle_blocks_its_own_center() {
        let grid = OccupancyGrid::build(bounds(), 0.25, 0.3, &[Obstacle::new(0.0, 0.0, 0.5, 0.5)]);
        assert!(grid.is_occupied(0.0, 0.0));
        assert!(!grid.is_occupied(4.0, 4.0));
    }
}

#[cfg(test)]
mod find_path {
    use crate::grid::{MapBounds, Obstacle};
    use crate::planner::{GridAStarPlanner, PathPlanner};

    fn bounds() -> MapBounds {
        MapBounds { min_x: -5.0, max_x: 5.0, min_y: -5.0, max_y: 5.0 }
    }

    /// Scenario E: path around a single obstacle never enters the inflated
    /// AABB.
    #[test]
    fn path_goes_around_a_central_obstacle() {
        let obstacles = [Obstacle::new(0.0, 0.0, 0.5, 0.5)];
        let planner = GridAStarPlanner::new(0.25, 0.3, bounds(), &obstacles);

        let path = planner.find_path((-2.0, 0.0), (2.0, 0.0));
        assert!(!path.is_empty());

        let inflated = 0.5 + 0.3;
        for &(x, y) in &path {
            let inside_x = x > -inflated && x < inflated;
            let inside_y = y > -inflated && y < inflated;
            assert!(!(inside_x && inside_y), "path point ({x}, {y}) enters the inflated obstacle");
        }
    }

    #[test]
    fn no_path_through_a_sealed_room_returns_empty() {
        // A 0.25m-wide ring of fully-covering walls around the origin with
        // no gap: nothing inside can reach anything outside.
        let obstacles = [
            Obstacle::new(0.0, 2.0, 5.0, 0.2),
            Obstacle::new(0.0, -2.0, 5.0, 0.2),
            Obstacle::new(2.0, 0.0, 0.2, 5.0),
            Obstacle::new(-2.0, 0.0, 0.2, 5.0),
        ];
        let planner = GridAStarPlanner::new(0.25, 0.05, bounds(), &obstacles);
        let path = planner.find_path((0.0, 0.0), (4.5, 4.5));
        assert!(path.is_empty());
    }

    #[test]
    fn trivial_same_cell_returns_the_goal() {
        let planner = GridAStarPlanner::new(0.25, 0.3, bounds(), &[]);
        let path = planner.find_path((0.0, 0.0), (0.05, 0.05));
        assert_eq!(path, vec![(0.05, 0.05)]);
    }
}

#[cfg(test)]
mod smoothing_never_lengthens {
    use crate::astar::find_path_cells;
    use crate::grid::{MapBounds, Obstacle, OccupancyGrid};
    use crate::smoothing::smooth_path;

    fn euclid_len(grid: &OccupancyGrid, path: &[(usize, usize)]) -> f32 {
        path.windows(2)
            .map(|w| {
                let (x1, y1) = grid.cell_to_world(w[0].0, w[0].1);
                let (x2, y2) = grid.cell_to_world(w[1].0, w[1].1);
                ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt()
            })
            .sum()
    }

    #[test]
    fn smoothed_path_is_no_longer_than_the_raw_grid_path() {
        let bounds = MapBounds { min_x: -5.0, max_x: 5.0, min_y: -5.0, max_y: 5.0 };
        let obstacles = [Obstacle::new(0.0, 0.0, 0.6, 0.6)];
        let grid = OccupancyGrid::build(bounds, 0.25, 0.2, &obstacles);

        let start = grid.world_to_cell(-3.0, 0.1);
        let goal = grid.world_to_cell(3.0, -0.1);
        let raw = find_path_cells(&grid, start, goal).expect("path exists");
        let smoothed = smooth_path(&grid, &raw);

        assert!(euclid_len(&grid, &smoothed) <= euclid_len(&grid, &raw) + 1e-4);
    }
}

#[cfg(test)]
mod waypoints {
    use crate::scene::factory_waypoint_table;

    #[test]
    fn exact_alias_resolves() {
        let table = factory_waypoint_table();
        let (name, _) = table.resolve("shelf a").unwrap();
        assert_eq!(name, "Shelf A");
    }

    #[test]
    fn substring_against_waypoint_name_resolves() {
        let table = factory_waypoint_table();
        let (name, _) = table.resolve("over by the table please").unwrap();
        assert_eq!(name, "Table");
    }

    #[test]
    fn unresolved_landmark_is_none() {
        let table = factory_waypoint_table();
        assert!(table.resolve("the moon").is_none());
    }
}
