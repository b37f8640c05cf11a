//! The fixed-rate tick loop: fuses brain, voice, and autopilot input into a
//! single actuator command per robot per tick.
//!
//! Named `supervisory` rather than `loop` — `loop` is a reserved word.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;

use bci_autopilot::{Autopilot, AutopilotStore, RobotPose, SimBackend};
use bci_core::{
    BrainClass, CommandAction, CommandSequence, ControlClock, ControlConfig, Gear, GestureEvent,
    GestureKind, ParsedCommand, RobotAction, RobotId, SelectDirection as GestureSelectDirection,
    Tick,
};
use bci_fusion::{CommandFusion, CommandParser, FusionSource, FusionThresholds};
use bci_gesture::{ActionQueue, GestureThresholds};
use bci_planner::{PathPlanner, WaypointTable};
use bci_robot::{
    DispatchPlan, OrchestrationAction, OrchestrationEvent, OrchestrationTask, RobotManager,
    RobotTask, SelectDirection as RobotSelectDirection,
};

use crate::brain_source::BrainSource;
use crate::inbound::{InboundCommand, ManualCommand};
use crate::snapshot::{
    ActionQueueStatus, ActionSource, CommandLogEntry, LogSource, LoopSnapshot, SpeakRequest,
    TickReport,
};

const LATENCY_HISTORY: usize = 100;

/// Pending double-clench cancel-confirm outcome raised outside `tick`'s own
/// gesture path (a manual-control double-clench).
enum CancelSignal {
    Prompt(String),
    Confirmed,
}

/// Owns every subsystem the tick loop drives: the clock, the robot roster,
/// per-robot autopilots, command fusion, and the voice/action queues.
pub struct SupervisoryLoop {
    clock: ControlClock,
    config: ControlConfig,
    cancel_confirm_timeout_ticks: u64,

    planner: Arc<dyn PathPlanner>,
    waypoints: WaypointTable,
    parser: CommandParser,

    robots: RobotManager,
    poses: Vec<RobotPose>,
    sim: Box<dyn SimBackend>,
    autopilots: AutopilotStore,
    /// The orchestration task a sequential dispatch is carrying out — the
    /// robot manager only tracks *which* robots are queued, not *what* they
    /// were dispatched to do.
    sequential_task: Option<OrchestrationTask>,

    fusion: CommandFusion,
    gesture_th: GestureThresholds,
    fusion_th: FusionThresholds,

    action_queue: ActionQueue,
    voice_queue: VecDeque<ParsedCommand>,
    pending_manual: VecDeque<ManualCommand>,
    pending_voice: VecDeque<(String, f32)>,

    brain_source: Box<dyn BrainSource>,
    brain_enabled: bool,
    voice_enabled: bool,
    test_mode: bool,
    sim_brain_class: Option<BrainClass>,

    cancel_confirm_pending: bool,
    cancel_confirm_tick: Option<Tick>,

    tick_count: u64,
    latencies: VecDeque<f32>,
}

impl SupervisoryLoop {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: ControlConfig,
        planner: Arc<dyn PathPlanner>,
        waypoints: WaypointTable,
        robots: RobotManager,
        sim: Box<dyn SimBackend>,
        brain_source: Box<dyn BrainSource>,
        start_unix_secs: i64,
    ) -> Self {
        let clock = config.make_clock(start_unix_secs);
        let gesture_th = GestureThresholds::from_config(&config);
        let fusion_th = FusionThresholds::from_config(&config);
        let cancel_confirm_timeout_ticks = clock.ticks_for_secs(config.cancel_confirm_timeout_s);
        let autopilots = AutopilotStore::new(robots.store.count);
        let poses = (0..robots.store.count)
            .map(|i| {
                RobotPose::standing(robots.store.position_x[i], robots.store.position_y[i], robots.store.orientation[i])
            })
            .collect();
        let parser = CommandParser::new(waypoints.clone());

        Self {
            clock,
            config,
            cancel_confirm_timeout_ticks,
            planner,
            waypoints,
            parser,
            robots,
            poses,
            sim,
            autopilots,
            sequential_task: None,
            fusion: CommandFusion::new(),
            gesture_th,
            fusion_th,
            action_queue: ActionQueue::new(),
            voice_queue: VecDeque::new(),
            pending_manual: VecDeque::new(),
            pending_voice: VecDeque::new(),
            brain_source,
            brain_enabled: true,
            voice_enabled: true,
            test_mode: false,
            sim_brain_class: None,
            cancel_confirm_pending: false,
            cancel_confirm_tick: None,
            tick_count: 0,
            latencies: VecDeque::new(),
        }
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn avg_latency_ms(&self) -> f32 {
        if self.latencies.is_empty() {
            0.0
        } else {
            self.latencies.iter().sum::<f32>() / self.latencies.len() as f32
        }
    }

    pub fn run_ticks(&mut self, n: u64) -> Vec<TickReport> {
        (0..n).map(|_| self.tick()).collect()
    }

    pub fn brain_enabled(&self) -> bool {
        self.brain_enabled
    }

    pub fn voice_enabled(&self) -> bool {
        self.voice_enabled
    }

    pub fn test_mode(&self) -> bool {
        self.test_mode
    }

    pub fn selected_robot(&self) -> RobotId {
        self.robots.selected_robot()
    }

    /// The tick clock, for converting a [`TickReport`]'s tick into a
    /// wall-clock Unix timestamp (e.g. for outbound broadcast messages).
    pub fn clock(&self) -> &ControlClock {
        &self.clock
    }

    /// Voice transcripts and manual commands are queued and drained at the
    /// start of the next tick, so their command-log/speech effects land in
    /// that tick's `TickReport` rather than floating outside the tick
    /// boundary. Everything else here (resets, toggles, direct nav control)
    /// applies immediately.
    pub fn handle_inbound(&mut self, cmd: InboundCommand) {
        match cmd {
            InboundCommand::VoiceTranscript { transcript, confidence } => {
                self.pending_voice.push_back((transcript, confidence));
            }
            InboundCommand::Manual(manual) => self.pending_manual.push_back(manual),
            InboundCommand::Reset => self.robots.selected_sm_mut().reset(),
            InboundCommand::FullReset => self.full_reset(),
            InboundCommand::ToggleBrain(enabled) => self.brain_enabled = enabled,
            InboundCommand::ToggleVoice(enabled) => self.voice_enabled = enabled,
            InboundCommand::ToggleTestMode(enabled) => self.test_mode = enabled,
            InboundCommand::SetGear(gear) => self.robots.selected_sm_mut().set_gear(gear),
            InboundCommand::SimulateBrain(class) => self.sim_brain_class = class,
            InboundCommand::StartNav { target, robot } => {
                let robot = robot.unwrap_or_else(|| self.robots.selected_robot());
                self.start_nav(&target, robot);
            }
            InboundCommand::CancelNav { robot } => {
                let robot = robot.unwrap_or_else(|| self.robots.selected_robot());
                self.cancel_nav(robot);
            }
        }
    }

    pub fn full_reset(&mut self) {
        self.robots.reset();
        self.fusion.reset();
        self.sim.reset();
        self.voice_queue.clear();
        self.action_queue.clear();
        self.autopilots.reset();
        self.sequential_task = None;
        self.cancel_confirm_pending = false;
        self.cancel_confirm_tick = None;
        self.brain_source.reset();
        self.sim_brain_class = None;
        self.brain_enabled = true;
        self.voice_enabled = true;
        self.latencies.clear();
        self.tick_count = 0;
        self.poses = (0..self.robots.store.count)
            .map(|i| {
                RobotPose::standing(
                    self.robots.store.position_x[i],
                    self.robots.store.position_y[i],
                    self.robots.store.orientation[i],
                )
            })
            .collect();
    }

    // ── The tick ─────────────────────────────────────────────────────────

    pub fn tick(&mut self) -> TickReport {
        let tick_start = Instant::now();
        let now = self.clock.current_tick;
        let mut command_logs = Vec::new();
        let mut speak_requests = Vec::new();
        let mut cancel_confirm_prompt = None;
        let mut cancel_confirmed = false;
        let mut cancel_confirm_dismissed = false;

        self.drain_pending_inbound(now, &mut command_logs, &mut speak_requests, &mut cancel_confirm_prompt, &mut cancel_confirmed);

        let selected = self.robots.selected_robot();

        // 1. Brain classification for this tick.
        let brain_class = if self.brain_enabled {
            self.sim_brain_class.or_else(|| self.brain_source.sample())
        } else {
            None
        };

        // 2. Pop at most one voice command; drop the queue entirely while disabled.
        let mut voice_command = if self.voice_enabled {
            self.voice_queue.pop_front()
        } else {
            self.voice_queue.clear();
            None
        };

        // 3. NAVIGATE is routed to the autopilot and never reaches fusion;
        //    STOP/CANCEL_NAV cancel any active autopilot but still flow
        //    through to fusion so the robot visibly stops via the voice path.
        if let Some(cmd) = &voice_command {
            match &cmd.action {
                CommandAction::Navigate { target_raw } => {
                    let target_raw = target_raw.clone();
                    let raw_text = cmd.raw_text.clone();
                    if let Some(canonical) = self.start_nav(&target_raw, selected) {
                        command_logs.push(CommandLogEntry {
                            source: LogSource::Voice,
                            action: format!("NAV -> {canonical}"),
                            text: Some(raw_text),
                            tick: now,
                        });
                    }
                    voice_command = None;
                }
                CommandAction::Direct(RobotAction::Stop)
                | CommandAction::Direct(RobotAction::EmergencyStop)
                | CommandAction::CancelNav => {
                    if self.autopilots.is_active(selected) {
                        self.cancel_nav(selected);
                        command_logs.push(CommandLogEntry {
                            source: LogSource::Voice,
                            action: "NAV CANCELLED".into(),
                            text: Some(cmd.raw_text.clone()),
                            tick: now,
                        });
                    }
                    self.action_queue.clear();
                }
                _ => {}
            }
        }
        let voice_raw_text = voice_command.as_ref().map(|c| c.raw_text.clone());

        // 4. Advance the action queue for non-navigation steps.
        if self.action_queue.is_active() && !self.action_queue.waiting_for_arrival() {
            self.advance_action_queue(now, &mut command_logs);
        }

        // 5. Fusion runs every tick so gesture recognition never misses a
        //    tick of brain signal, even while an autopilot is driving.
        let waypoint_count = self.waypoints.waypoints().len();
        let outcome = {
            let sm = self.robots.selected_sm_mut();
            self.fusion.update(voice_command.as_ref(), brain_class, sm, waypoint_count, now, &self.gesture_th, &self.fusion_th)
        };

        // SELECT_SEQUENCE reselects the active robot at any time.
        if let Some(direction) = outcome.select_direction {
            self.robots.select_by_direction(match direction {
                GestureSelectDirection::Left => RobotSelectDirection::Left,
                GestureSelectDirection::Right => RobotSelectDirection::Right,
            });
        }

        // 6. Cancel-confirmation protocol: a DOUBLE_CLENCH Both Fists during
        //    an active autopilot (or while a confirm is already pending)
        //    either raises the prompt or, on the second occurrence, cancels
        //    everything — independent of which fusion tier won this tick.
        let is_double_clench_both = outcome
            .completed_gesture
            .is_some_and(|g| g.kind == GestureKind::DoubleClench && g.brain_class == BrainClass::BothFists);
        let has_active_nav = self.autopilots.any_active();
        let mut cancel_handled = false;

        if is_double_clench_both && (has_active_nav || self.cancel_confirm_pending) {
            cancel_handled = true;
            if self.cancel_confirm_pending {
                self.cancel_active_tasks(now, &mut speak_requests);
                self.cancel_confirm_pending = false;
                cancel_confirmed = true;
                command_logs.push(CommandLogEntry {
                    source: LogSource::System,
                    action: "NAV CANCELLED (brain)".into(),
                    text: None,
                    tick: now,
                });
            } else {
                self.cancel_confirm_pending = true;
                self.cancel_confirm_tick = Some(now);
                cancel_confirm_prompt = Some(self.active_nav_description());
            }
        }

        if self.cancel_confirm_pending {
            if let Some(started) = self.cancel_confirm_tick {
                if now.since(started) > self.cancel_confirm_timeout_ticks {
                    self.cancel_confirm_pending = false;
                    cancel_confirm_dismissed = true;
                }
            }
        }

        // 7. An active autopilot overrides fusion's action entirely.
        let (action, action_source) = if self.autopilots.is_active(selected) {
            let (rx, ry) = self.robots.store.position_xy(selected);
            let yaw = self.robots.store.orientation[selected.index()];
            let arrival_dist = self.config.waypoint_arrival_dist;
            let align_threshold = self.config.waypoint_align_threshold;
            let ap = self.autopilots.get_mut(selected).expect("checked active");
            let action = ap.update((rx, ry), yaw, arrival_dist, align_threshold);

            if ap.arrived() {
                let target_name = ap.status().target_name;
                self.cancel_confirm_pending = false;
                command_logs.push(CommandLogEntry {
                    source: LogSource::System,
                    action: format!("ARRIVED at {target_name}"),
                    text: None,
                    tick: now,
                });
                speak_requests.push(SpeakRequest {
                    text: format!("{selected} arrived at {target_name}"),
                    event_type: "nav_arrive",
                    tick: now,
                });
                if self.action_queue.waiting_for_arrival() {
                    self.action_queue.advance();
                    self.advance_action_queue(now, &mut command_logs);
                }
            }
            (action, ActionSource::Autopilot)
        } else {
            let action = outcome.action;
            let source = map_fusion_source(outcome.source);

            if !cancel_handled && outcome.orchestration_event == Some(OrchestrationEvent::Cancel) {
                self.cancel_active_tasks(now, &mut speak_requests);
                command_logs.push(CommandLogEntry { source: LogSource::System, action: "ORCH CANCEL".into(), text: None, tick: now });
            }
            if let Some(task) = outcome.orchestration_task {
                self.dispatch_orchestration_task(task, now, &mut command_logs, &mut speak_requests);
            }
            (action, source)
        };

        // 8. Execute on the selected robot and fold back the authoritative pose.
        let pose_before = self.poses[selected.index()];
        let pose_after = self.sim.execute(action, pose_before);
        self.poses[selected.index()] = pose_after;
        self.robots.selected_sm_mut().holding_item = pose_after.holding_item;
        self.robots.store.holding_item[selected.index()] = pose_after.holding_item;
        self.robots.update_robot_state(selected, (pose_after.x, pose_after.y, pose_after.pelvis_z), pose_after.yaw);

        // Only fusion-sourced actions reach the command log — autopilot and
        // idle ticks stay silent.
        if action_source.is_loggable() {
            command_logs.push(CommandLogEntry {
                source: match action_source {
                    ActionSource::Voice | ActionSource::VoiceHold => LogSource::Voice,
                    _ => LogSource::Brain,
                },
                action: action.to_string(),
                text: if matches!(action_source, ActionSource::Voice) { voice_raw_text } else { None },
                tick: now,
            });
        }

        // 9. Latency, capped to the last LATENCY_HISTORY ticks.
        let latency_ms = tick_start.elapsed().as_secs_f32() * 1000.0;
        self.latencies.push_back(latency_ms);
        if self.latencies.len() > LATENCY_HISTORY {
            self.latencies.pop_front();
        }

        // 10. Snapshot.
        let nav_status = self.autopilots.get(selected).map(Autopilot::status);
        let action_queue_status = (self.action_queue.total() > 0).then(|| ActionQueueStatus {
            label: self.action_queue.label().to_string(),
            remaining: self.action_queue.total().saturating_sub(self.action_queue.step_number().saturating_sub(1)),
            total: self.action_queue.total(),
            step: self.action_queue.step_number(),
        });
        let sm = self.robots.selected_sm();
        let snapshot = LoopSnapshot {
            tick: now,
            selected_robot: selected,
            gear: sm.gear,
            action,
            action_source,
            brain_class,
            holding_item: sm.holding_item,
            toggled_action: sm.toggled_action,
            orchestration: sm.orchestration,
            robots: self.robots.get_all_states(),
            nav_status,
            action_queue: action_queue_status,
            latency_ms,
        };

        // 11. Advance the sequential dispatch queue once the head robot's
        //     autopilot has gone idle.
        if let Some(head) = self.robots.sequential_queue_head() {
            if !self.autopilots.is_active(head) {
                self.robots.pop_sequential_queue();
                if let Some(task) = self.sequential_task {
                    let landmark_name = self.landmark_name(task.landmark_index);
                    if self.start_nav(&landmark_name, head).is_some() {
                        self.robots.set_task(head, Some(RobotTask { action: task.action, landmark_index: task.landmark_index }));
                        command_logs.push(CommandLogEntry {
                            source: LogSource::System,
                            action: format!("SEQ: {head} -> {landmark_name}"),
                            text: None,
                            tick: now,
                        });
                    }
                }
                if self.robots.sequential_queue_head().is_none() {
                    self.sequential_task = None;
                }
            }
        }

        self.tick_count += 1;
        self.clock.advance();

        TickReport { snapshot, command_logs, speak_requests, cancel_confirm_prompt, cancel_confirmed, cancel_confirm_dismissed }
    }

    // ── Helpers ──────────────────────────────────────────────────────────

    fn drain_pending_inbound(
        &mut self,
        now: Tick,
        logs: &mut Vec<CommandLogEntry>,
        speaks: &mut Vec<SpeakRequest>,
        cancel_prompt: &mut Option<String>,
        cancel_confirmed: &mut bool,
    ) {
        while let Some((transcript, confidence)) = self.pending_voice.pop_front() {
            self.push_voice_transcript(&transcript, confidence, now, logs, speaks);
        }
        while let Some(manual) = self.pending_manual.pop_front() {
            if let Some(signal) = self.push_manual_command(manual, now, logs, speaks) {
                match signal {
                    CancelSignal::Prompt(desc) => *cancel_prompt = Some(desc),
                    CancelSignal::Confirmed => *cancel_confirmed = true,
                }
            }
        }
    }

    fn push_voice_transcript(
        &mut self,
        transcript: &str,
        confidence: f32,
        now: Tick,
        logs: &mut Vec<CommandLogEntry>,
        speaks: &mut Vec<SpeakRequest>,
    ) {
        let Some(sequence) = self.parser.parse_sequence(transcript, confidence) else { return };

        if sequence.len() > 1 {
            self.load_action_queue(sequence, now, logs, speaks);
            return;
        }

        let Some(cmd) = sequence.current().cloned() else { return };
        match &cmd.action {
            CommandAction::Navigate { target_raw } => {
                speaks.push(SpeakRequest { text: format!("Navigating to {target_raw}"), event_type: "voice_ack", tick: now });
            }
            CommandAction::Direct(action @ (RobotAction::Grab | RobotAction::Release | RobotAction::Stop | RobotAction::EmergencyStop)) => {
                speaks.push(SpeakRequest { text: format!("Command received: {action}"), event_type: "voice_ack", tick: now });
            }
            _ => {}
        }
        self.voice_queue.push_back(cmd);
    }

    fn load_action_queue(&mut self, sequence: CommandSequence, now: Tick, logs: &mut Vec<CommandLogEntry>, speaks: &mut Vec<SpeakRequest>) {
        let raw_text = sequence.current().map(|c| c.raw_text.clone()).unwrap_or_default();
        let total = sequence.len();
        self.action_queue.load(sequence, raw_text.clone());
        logs.push(CommandLogEntry {
            source: LogSource::Voice,
            action: format!("SEQUENCE ({total} steps)"),
            text: Some(raw_text.clone()),
            tick: now,
        });
        speaks.push(SpeakRequest { text: format!("Executing {total} step sequence: {raw_text}"), event_type: "voice_ack", tick: now });
        self.advance_action_queue(now, logs);
    }

    fn push_manual_command(
        &mut self,
        manual: ManualCommand,
        now: Tick,
        logs: &mut Vec<CommandLogEntry>,
        speaks: &mut Vec<SpeakRequest>,
    ) -> Option<CancelSignal> {
        let selected = self.robots.selected_robot();
        let waypoint_count = self.waypoints.waypoints().len();

        let synthetic = match manual {
            ManualCommand::RotateLeftBci => Some((BrainClass::LeftFist, GestureKind::QuickClench, 0.5)),
            ManualCommand::RotateRightBci => Some((BrainClass::RightFist, GestureKind::QuickClench, 0.5)),
            ManualCommand::BothFistsBci => Some((BrainClass::BothFists, GestureKind::QuickClench, 0.5)),
            ManualCommand::ShiftGearBci => Some((BrainClass::TongueTap, GestureKind::QuickClench, 0.5)),
            ManualCommand::OrchConfirm => Some((BrainClass::BothFists, GestureKind::HoldMedium, 2.5)),
            ManualCommand::OrchCancel => Some((BrainClass::BothFists, GestureKind::DoubleClench, 0.5)),
            ManualCommand::StopOrRelax | ManualCommand::Direct(_) => None,
        };

        let Some((class, kind, duration)) = synthetic else {
            match manual {
                ManualCommand::StopOrRelax => {
                    let sm = self.robots.selected_sm_mut();
                    sm.toggled_action = None;
                    sm.toggled_class = None;
                }
                ManualCommand::Direct(action) => {
                    let pose = self.poses[selected.index()];
                    let pose_after = self.sim.execute(action, pose);
                    self.poses[selected.index()] = pose_after;
                    self.robots.selected_sm_mut().holding_item = pose_after.holding_item;
                    self.robots.store.holding_item[selected.index()] = pose_after.holding_item;
                }
                _ => unreachable!("handled above"),
            }
            return None;
        };

        let has_active_nav = self.autopilots.any_active();
        if kind == GestureKind::DoubleClench && class == BrainClass::BothFists && (has_active_nav || self.cancel_confirm_pending) {
            return Some(if self.cancel_confirm_pending {
                self.cancel_active_tasks(now, speaks);
                self.cancel_confirm_pending = false;
                CancelSignal::Confirmed
            } else {
                self.cancel_confirm_pending = true;
                self.cancel_confirm_tick = Some(now);
                CancelSignal::Prompt(self.active_nav_description())
            });
        }

        let event = GestureEvent::new(kind, class, duration);
        let outcome = self.robots.selected_sm_mut().apply_gesture(event, waypoint_count);
        if let Some(task) = outcome.orchestration_task {
            self.dispatch_orchestration_task(task, now, logs, speaks);
        }
        if outcome.orchestration_event == Some(OrchestrationEvent::Cancel) {
            self.cancel_active_tasks(now, speaks);
        }
        None
    }

    fn advance_action_queue(&mut self, now: Tick, logs: &mut Vec<CommandLogEntry>) {
        if !self.action_queue.is_active() {
            return;
        }
        let Some(step) = self.action_queue.current().cloned() else { return };
        let step_num = self.action_queue.step_number();
        let total = self.action_queue.total();
        let selected = self.robots.selected_robot();

        match step.action {
            CommandAction::Navigate { target_raw } => {
                if let Some(canonical) = self.start_nav(&target_raw, selected) {
                    self.action_queue.set_waiting_for_arrival(true);
                    logs.push(CommandLogEntry {
                        source: LogSource::System,
                        action: format!("SEQ {step_num}/{total}: NAV -> {canonical}"),
                        text: None,
                        tick: now,
                    });
                } else {
                    self.action_queue.advance();
                    self.advance_action_queue(now, logs);
                }
            }
            CommandAction::Direct(action @ (RobotAction::Grab | RobotAction::Release | RobotAction::Stop)) => {
                let pose = self.poses[selected.index()];
                let pose_after = self.sim.execute(action, pose);
                self.poses[selected.index()] = pose_after;
                self.robots.selected_sm_mut().holding_item = pose_after.holding_item;
                self.robots.store.holding_item[selected.index()] = pose_after.holding_item;
                logs.push(CommandLogEntry {
                    source: LogSource::System,
                    action: format!("SEQ {step_num}/{total}: {action}"),
                    text: None,
                    tick: now,
                });
                self.action_queue.advance();
            }
            _ => {
                self.action_queue.advance();
                self.advance_action_queue(now, logs);
            }
        }
    }

    fn start_nav(&mut self, target: &str, robot: RobotId) -> Option<String> {
        let (canonical, (tx, ty)) = self.waypoints.resolve(target)?;
        let start_xy = self.robots.store.position_xy(robot);
        let autopilot = Autopilot::new(self.planner.as_ref(), canonical.clone(), (tx, ty), start_xy);
        self.autopilots.set(robot, autopilot);
        self.robots.store.gear_sm_mut(robot).set_gear(Gear::Forward);
        Some(canonical)
    }

    fn cancel_nav(&mut self, robot: RobotId) {
        self.autopilots.cancel(robot);
        let pose = self.poses[robot.index()];
        self.poses[robot.index()] = self.sim.execute(RobotAction::Idle, pose);
        let sm = self.robots.store.gear_sm_mut(robot);
        sm.toggled_action = None;
        sm.toggled_class = None;
    }

    fn cancel_active_tasks(&mut self, now: Tick, speaks: &mut Vec<SpeakRequest>) {
        let cancelled = self.autopilots.active_robot_ids();
        self.autopilots.cancel_all();
        self.robots.clear_sequential_queue();
        self.sequential_task = None;

        let ids: Vec<RobotId> = self.robots.store.robot_ids().collect();
        for id in ids {
            self.robots.set_task(id, None);
        }
        for &id in &cancelled {
            let pose = self.poses[id.index()];
            self.poses[id.index()] = self.sim.execute(RobotAction::Idle, pose);
            let sm = self.robots.store.gear_sm_mut(id);
            sm.toggled_action = None;
            sm.toggled_class = None;
        }
        self.fusion.reset();

        if !cancelled.is_empty() {
            let names: Vec<String> = cancelled.iter().map(|id| id.to_string()).collect();
            speaks.push(SpeakRequest { text: format!("Tasks cancelled for {}", names.join(", ")), event_type: "nav_cancel", tick: now });
        }
    }

    fn dispatch_orchestration_task(
        &mut self,
        task: OrchestrationTask,
        now: Tick,
        logs: &mut Vec<CommandLogEntry>,
        speaks: &mut Vec<SpeakRequest>,
    ) {
        let landmark_name = self.landmark_name(task.landmark_index);

        match self.robots.dispatch_orchestration_task(task) {
            DispatchPlan::SelectionChanged => {
                let names: Vec<String> = self.robots.active_robots().map(|id| id.to_string()).collect();
                let label = if names.is_empty() { "none".to_string() } else { names.join(", ") };
                logs.push(CommandLogEntry { source: LogSource::System, action: format!("ROBOTS: {label}"), text: None, tick: now });
            }
            DispatchPlan::Immediate { action, robots } => {
                for id in &robots {
                    let pose = self.poses[id.index()];
                    self.poses[id.index()] = self.sim.execute(action, pose);
                }
                logs.push(CommandLogEntry {
                    source: LogSource::System,
                    action: format!("ORCH: {} ({} robots)", orch_label(task.action), robots.len()),
                    text: None,
                    tick: now,
                });
                speaks.push(SpeakRequest { text: "Backflip!".into(), event_type: "general", tick: now });
            }
            DispatchPlan::Simultaneous { robots } => {
                let n = robots.len();
                for id in robots {
                    if self.start_nav(&landmark_name, id).is_some() {
                        self.robots.set_task(id, Some(RobotTask { action: task.action, landmark_index: task.landmark_index }));
                    }
                }
                logs.push(CommandLogEntry {
                    source: LogSource::System,
                    action: format!("ORCH: {} -> {landmark_name} ({n} robots)", orch_label(task.action)),
                    text: None,
                    tick: now,
                });
                speaks.push(SpeakRequest {
                    text: format!("Dispatching {} to {landmark_name}, {n} robots", orch_label(task.action)),
                    event_type: "orch_dispatch",
                    tick: now,
                });
            }
            DispatchPlan::Sequential => {
                let n = self.robots.active_robots().count();
                self.sequential_task = Some(task);
                if let Some(first) = self.robots.pop_sequential_queue() {
                    if self.start_nav(&landmark_name, first).is_some() {
                        self.robots.set_task(first, Some(RobotTask { action: task.action, landmark_index: task.landmark_index }));
                    }
                }
                logs.push(CommandLogEntry {
                    source: LogSource::System,
                    action: format!("ORCH: {} -> {landmark_name} ({n} robots, sequential)", orch_label(task.action)),
                    text: None,
                    tick: now,
                });
                speaks.push(SpeakRequest {
                    text: format!("Dispatching {} to {landmark_name}, {n} robots sequentially", orch_label(task.action)),
                    event_type: "orch_dispatch",
                    tick: now,
                });
            }
        }
    }

    fn landmark_name(&self, index: usize) -> String {
        self.waypoints.waypoints().get(index).map(|w| w.canonical_name.clone()).unwrap_or_default()
    }

    fn active_nav_description(&self) -> String {
        let descs: Vec<String> = self
            .autopilots
            .active_robot_ids()
            .iter()
            .filter_map(|&id| self.autopilots.get(id))
            .map(|ap| format!("NAV to {}", ap.status().target_name))
            .collect();
        if descs.is_empty() { "active task".to_string() } else { descs.join("; ") }
    }
}

fn map_fusion_source(source: Option<FusionSource>) -> ActionSource {
    match source {
        Some(FusionSource::Voice) | Some(FusionSource::CancelNav) => ActionSource::Voice,
        Some(FusionSource::VoiceHold) => ActionSource::VoiceHold,
        Some(FusionSource::BrainGesture) => ActionSource::BrainGesture,
        Some(FusionSource::BrainToggle) => ActionSource::BrainToggle,
        Some(FusionSource::Navigate) | Some(FusionSource::Idle) | None => ActionSource::Idle,
    }
}

fn orch_label(action: OrchestrationAction) -> &'static str {
    match action {
        OrchestrationAction::MoveTo => "MOVE_TO",
        OrchestrationAction::CarryTo => "CARRY_TO",
        OrchestrationAction::StackTo => "STACK_TO",
        OrchestrationAction::SelectRobot => "SELECT_ROBOT",
        OrchestrationAction::Backflip => "BACKFLIP",
    }
}
