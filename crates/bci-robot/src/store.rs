//! `RobotStore` — Structure-of-Arrays storage for every robot on the floor.
//!
//! Every `Vec` field has exactly `count` elements; `RobotId` is the index
//! into all of them. The robot population is small (a handful of robots)
//! and fully known at construction, so there is no pluggable per-application
//! component system here, just a fixed set of fields every robot always has.

use bci_core::RobotId;

use crate::gear_state::GearStateMachine;
use crate::manager::RobotTask;

/// Structure-of-Arrays storage for all robot state.
pub struct RobotStore {
    pub count: usize,

    pub position_x: Vec<f32>,
    pub position_y: Vec<f32>,
    pub position_z: Vec<f32>,
    pub orientation: Vec<f32>,
    pub holding_item: Vec<bool>,
    pub color: Vec<String>,
    pub task: Vec<Option<RobotTask>>,

    /// Each robot exclusively owns its gear state machine.
    pub state_machines: Vec<GearStateMachine>,
}

impl RobotStore {
    pub(crate) fn new(
        positions: Vec<(f32, f32, f32)>,
        orientations: Vec<f32>,
        colors: Vec<String>,
    ) -> Self {
        let count = positions.len();
        assert_eq!(orientations.len(), count);
        assert_eq!(colors.len(), count);

        let mut position_x = Vec::with_capacity(count);
        let mut position_y = Vec::with_capacity(count);
        let mut position_z = Vec::with_capacity(count);
        for (x, y, z) in positions {
            position_x.push(x);
            position_y.push(y);
            position_z.push(z);
        }

        Self {
            count,
            position_x,
            position_y,
            position_z,
            orientation: orientations,
            holding_item: vec![false; count],
            color: colors,
            task: vec![None; count],
            state_machines: (0..count).map(|_| GearStateMachine::new()).collect(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `RobotId`s in ascending index order.
    pub fn robot_ids(&self) -> impl Iterator<Item = RobotId> + '_ {
        (0..self.count as u16).map(RobotId)
    }

    #[inline]
    pub fn position(&self, id: RobotId) -> (f32, f32, f32) {
        let i = id.index();
        (self.position_x[i], self.position_y[i], self.position_z[i])
    }

    #[inline]
    pub fn position_xy(&self, id: RobotId) -> (f32, f32) {
        let i = id.index();
        (self.position_x[i], self.position_y[i])
    }

    #[inline]
    pub fn set_pose(&mut self, id: RobotId, position: (f32, f32, f32), orientation: f32) {
        let i = id.index();
        self.position_x[i] = position.0;
        self.position_y[i] = position.1;
        self.position_z[i] = position.2;
        self.orientation[i] = orientation;
    }

    #[inline]
    pub fn gear_sm(&self, id: RobotId) -> &GearStateMachine {
        &self.state_machines[id.index()]
    }

    #[inline]
    pub fn gear_sm_mut(&mut self, id: RobotId) -> &mut GearStateMachine {
        &mut self.state_machines[id.index()]
    }
}
