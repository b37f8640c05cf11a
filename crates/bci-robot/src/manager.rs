//! `RobotManager` — multi-robot selection, default roster, and
//! orchestration task dispatch.

use std::collections::{BTreeSet, VecDeque};

use bci_core::{Gear, RobotAction, RobotId};

use crate::orchestration::{OrchestrationAction, OrchestrationTask};
use crate::store::RobotStore;

/// Default starting roster: three robots, matching the factory floor's
/// fixed starting layout (one primary, two secondaries flanking it).
const DEFAULT_ROBOTS: &[(f32, f32, f32, &str)] = &[
    (0.0, 0.0, 0.0, "#3b82f6"),
    (-3.0, 3.0, core::f32::consts::FRAC_PI_2, "#22c55e"),
    (3.0, 3.0, -core::f32::consts::FRAC_PI_2, "#f97316"),
];

/// A confirmed orchestration task, pending or in-flight for one robot.
#[derive(Clone, Debug, PartialEq)]
pub struct RobotTask {
    pub action: OrchestrationAction,
    pub landmark_index: usize,
}

/// Which direction to step the selection cursor.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SelectDirection {
    Left,
    Right,
}

/// How a confirmed orchestration task should be carried out across the
/// active robot set.
#[derive(Clone, Debug, PartialEq)]
pub enum DispatchPlan {
    /// SELECT_ROBOT: active set updated, no actuator action.
    SelectionChanged,
    /// BACKFLIP: fires immediately on every robot in `robots`.
    Immediate { action: RobotAction, robots: Vec<RobotId> },
    /// Non-logistics navigation, or logistics with at most one active robot:
    /// every robot in `robots` starts the task this tick.
    Simultaneous { robots: Vec<RobotId> },
    /// Logistics task (CARRY_TO/STACK_TO) with more than one active robot:
    /// robots are queued and started one at a time as each finishes.
    Sequential,
}

/// Read-only per-robot snapshot for broadcast.
#[derive(Clone, Debug)]
pub struct RobotSnapshot {
    pub id: RobotId,
    pub position: (f32, f32, f32),
    pub orientation: f32,
    pub gear: Gear,
    pub holding_item: bool,
    pub selected: bool,
    pub color: String,
    pub toggled_action: Option<RobotAction>,
    pub task: Option<RobotTask>,
}

pub struct RobotManager {
    pub store: RobotStore,
    selected_index: usize,
    active_set: BTreeSet<RobotId>,
    /// Robots awaiting sequential logistics dispatch, in order.
    sequential_queue: VecDeque<RobotId>,
}

impl RobotManager {
    /// Build the manager with the default three-robot roster.
    pub fn new() -> Self {
        let positions = DEFAULT_ROBOTS.iter().map(|(x, y, _, _)| (*x, *y, 0.0)).collect();
        let orientations = DEFAULT_ROBOTS.iter().map(|(_, _, o, _)| *o).collect();
        let colors = DEFAULT_ROBOTS.iter().map(|(_, _, _, c)| c.to_string()).collect();
        let store = RobotStore::new(positions, orientations, colors);
        let active_set = store.robot_ids().collect();
        Self { store, selected_index: 0, active_set, sequential_queue: VecDeque::new() }
    }

    #[inline]
    pub fn selected_robot(&self) -> RobotId {
        RobotId(self.selected_index as u16)
    }

    pub fn selected_sm(&self) -> &crate::gear_state::GearStateMachine {
        self.store.gear_sm(self.selected_robot())
    }

    pub fn selected_sm_mut(&mut self) -> &mut crate::gear_state::GearStateMachine {
        let id = self.selected_robot();
        self.store.gear_sm_mut(id)
    }

    /// Step the selection cursor modularly: right -> next index, left ->
    /// previous index.
    pub fn select_by_direction(&mut self, direction: SelectDirection) {
        let n = self.store.count;
        self.selected_index = match direction {
            SelectDirection::Right => (self.selected_index + 1) % n,
            SelectDirection::Left => (self.selected_index + n - 1) % n,
        };
    }

    pub fn select_by_id(&mut self, id: RobotId) -> bool {
        if id.index() < self.store.count {
            self.selected_index = id.index();
            true
        } else {
            false
        }
    }

    pub fn set_active_robots(&mut self, ids: impl IntoIterator<Item = RobotId>) {
        self.active_set = ids.into_iter().collect();
    }

    pub fn active_robots(&self) -> impl Iterator<Item = RobotId> + '_ {
        self.active_set.iter().copied()
    }

    pub fn update_robot_state(&mut self, id: RobotId, position: (f32, f32, f32), orientation: f32) {
        if id.index() < self.store.count {
            self.store.set_pose(id, position, orientation);
        }
    }

    pub fn get_all_states(&self) -> Vec<RobotSnapshot> {
        self.store
            .robot_ids()
            .map(|id| {
                let sm = self.store.gear_sm(id);
                RobotSnapshot {
                    id,
                    position: self.store.position(id),
                    orientation: self.store.orientation[id.index()],
                    gear: sm.gear,
                    holding_item: self.store.holding_item[id.index()],
                    selected: id == self.selected_robot(),
                    color: self.store.color[id.index()].clone(),
                    toggled_action: sm.toggled_action,
                    task: self.store.task[id.index()].clone(),
                }
            })
            .collect()
    }

    /// Dispatch rules for a confirmed orchestration task (§4.8):
    /// SELECT_ROBOT updates the active set; BACKFLIP fires immediately on
    /// every active robot; MOVE_TO and other non-logistics tasks dispatch
    /// simultaneously; logistics tasks (CARRY_TO/STACK_TO) dispatch
    /// sequentially once more than one robot is active.
    pub fn dispatch_orchestration_task(&mut self, task: OrchestrationTask) -> DispatchPlan {
        match task.action {
            OrchestrationAction::SelectRobot => {
                if let Some(&picked) =
                    self.store.robot_ids().collect::<Vec<_>>().get(task.landmark_index % self.store.count.max(1))
                {
                    if self.active_set.contains(&picked) {
                        self.active_set.remove(&picked);
                    } else {
                        self.active_set.insert(picked);
                    }
                }
                DispatchPlan::SelectionChanged
            }
            OrchestrationAction::Backflip => {
                DispatchPlan::Immediate {
                    action: RobotAction::Backflip,
                    robots: self.active_robots().collect(),
                }
            }
            OrchestrationAction::MoveTo => {
                DispatchPlan::Simultaneous { robots: self.active_robots().collect() }
            }
            OrchestrationAction::CarryTo | OrchestrationAction::StackTo => {
                let robots: Vec<RobotId> = self.active_robots().collect();
                if robots.len() <= 1 {
                    DispatchPlan::Simultaneous { robots }
                } else {
                    self.sequential_queue = robots.into_iter().collect();
                    DispatchPlan::Sequential
                }
            }
        }
    }

    /// `true` if the head-of-queue robot has no pending task dispatched to
    /// it (used by the loop to know when to pop and start the next one).
    pub fn sequential_queue_head(&self) -> Option<RobotId> {
        self.sequential_queue.front().copied()
    }

    pub fn pop_sequential_queue(&mut self) -> Option<RobotId> {
        self.sequential_queue.pop_front()
    }

    /// Drop any pending sequential dispatch without touching robot poses,
    /// gears, or selection — used when cancelling in-flight tasks.
    pub fn clear_sequential_queue(&mut self) {
        self.sequential_queue.clear();
    }

    pub fn set_task(&mut self, id: RobotId, task: Option<RobotTask>) {
        if id.index() < self.store.count {
            self.store.task[id.index()] = task;
        }
    }

    /// Reset every robot to its default pose and gear state, clear
    /// selection back to robot 0, and drop any pending sequential dispatch.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for RobotManager {
    fn default() -> Self {
        Self::new()
    }
}
