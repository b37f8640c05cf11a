//! Per-robot autopilot slots.

use bci_core::RobotId;

use crate::autopilot::Autopilot;

/// Holds at most one active [`Autopilot`] per robot.
pub struct AutopilotStore {
    slots: Vec<Option<Autopilot>>,
}

impl AutopilotStore {
    pub fn new(robot_count: usize) -> Self {
        Self { slots: (0..robot_count).map(|_| None).collect() }
    }

    pub fn set(&mut self, robot: RobotId, autopilot: Autopilot) {
        self.slots[robot.index()] = Some(autopilot);
    }

    pub fn get(&self, robot: RobotId) -> Option<&Autopilot> {
        self.slots[robot.index()].as_ref()
    }

    pub fn get_mut(&mut self, robot: RobotId) -> Option<&mut Autopilot> {
        self.slots[robot.index()].as_mut()
    }

    pub fn is_active(&self, robot: RobotId) -> bool {
        self.slots[robot.index()].as_ref().is_some_and(Autopilot::active)
    }

    pub fn cancel(&mut self, robot: RobotId) {
        if let Some(autopilot) = self.slots[robot.index()].as_mut() {
            autopilot.cancel();
        }
    }

    /// Cancel every active autopilot (the double-clench cancel-confirm protocol).
    pub fn cancel_all(&mut self) {
        for slot in self.slots.iter_mut().flatten() {
            slot.cancel();
        }
    }

    pub fn any_active(&self) -> bool {
        self.slots.iter().flatten().any(Autopilot::active)
    }

    pub fn active_robot_ids(&self) -> Vec<RobotId> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, a)| a.as_ref().is_some_and(Autopilot::active))
            .map(|(i, _)| RobotId(i as u16))
            .collect()
    }

    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
    }
}
