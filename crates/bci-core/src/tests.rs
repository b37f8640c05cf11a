//! Unit tests for bci-core primitives.

#[cfg(test)]
mod ids {
    use crate::RobotId;

    #[test]
    fn index_roundtrip() {
        let id = RobotId(7);
        assert_eq!(id.index(), 7);
        assert_eq!(RobotId::try_from(7usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(RobotId(0) < RobotId(1));
    }

    #[test]
    fn invalid_sentinel_is_max() {
        assert_eq!(RobotId::INVALID.0, u16::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(RobotId(3).to_string(), "RobotId(3)");
    }
}

#[cfg(test)]
mod time {
    use crate::{ControlClock, ControlConfig, Tick};

    #[test]
    fn clock_advances_one_tick_at_a_time() {
        let mut clock = ControlClock::new(0, 10);
        assert_eq!(clock.current_tick, Tick::ZERO);
        clock.advance();
        clock.advance();
        assert_eq!(clock.current_tick, Tick(2));
        assert!((clock.elapsed_secs() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn ticks_for_secs_rounds_up() {
        let clock = ControlClock::new(0, 10);
        assert_eq!(clock.ticks_for_secs(1.5), 15);
        assert_eq!(clock.ticks_for_secs(0.01), 1);
    }

    #[test]
    fn tick_since_is_the_delta() {
        assert_eq!(Tick(10).since(Tick(4)), 6);
    }

    #[test]
    fn default_config_matches_factory_defaults() {
        let cfg = ControlConfig::default();
        assert_eq!(cfg.control_hz, 10);
        assert!((cfg.voice_override_hold_s - 2.0).abs() < 1e-6);
        assert!((cfg.cancel_confirm_timeout_s - 5.0).abs() < 1e-6);
    }
}

#[cfg(test)]
mod brain {
    use crate::BrainClass;

    #[test]
    fn normalizes_documented_typos() {
        assert_eq!(BrainClass::normalize("Left First"), Some(BrainClass::LeftFist));
        assert_eq!(BrainClass::normalize("Both Firsts"), Some(BrainClass::BothFists));
        assert_eq!(BrainClass::normalize("Left Fist"), Some(BrainClass::LeftFist));
    }

    #[test]
    fn relax_is_not_active() {
        assert!(!BrainClass::Relax.is_active());
        assert!(BrainClass::LeftFist.is_active());
    }

    #[test]
    fn unknown_label_is_none() {
        assert_eq!(BrainClass::normalize("Wiggle Ears"), None);
    }
}

#[cfg(test)]
mod action {
    use crate::{Gear, RobotAction};

    #[test]
    fn gear_cycles_through_the_full_ring() {
        let forward = Gear::Neutral.cycled();
        let reverse = forward.cycled();
        let orchestrate = reverse.cycled();
        let back_to_neutral = orchestrate.cycled();
        assert_eq!(forward, Gear::Forward);
        assert_eq!(reverse, Gear::Reverse);
        assert_eq!(orchestrate, Gear::Orchestrate);
        assert_eq!(back_to_neutral, Gear::Neutral);
    }

    #[test]
    fn fire_once_actions_are_not_sustainable() {
        assert!(!RobotAction::Grab.is_sustainable());
        assert!(!RobotAction::Backflip.is_sustainable());
        assert!(RobotAction::MoveForward.is_sustainable());
    }
}

#[cfg(test)]
mod command {
    use crate::command::{CommandAction, CommandOrigin, CommandSequence, ParsedCommand};
    use crate::RobotAction;

    fn step(action: CommandAction) -> ParsedCommand {
        ParsedCommand {
            kind: CommandOrigin::DirectOverride,
            action,
            robot_id: None,
            target: None,
            item: None,
            raw_text: String::new(),
            confidence: 1.0,
            timestamp: 0.0,
        }
    }

    #[test]
    fn empty_sequence_is_rejected() {
        assert!(CommandSequence::new(vec![]).is_none());
    }

    #[test]
    fn sequence_advances_and_reports_done() {
        let mut seq = CommandSequence::new(vec![
            step(CommandAction::Navigate { target_raw: "shelf a".into() }),
            step(CommandAction::Direct(RobotAction::Release)),
        ])
        .unwrap();
        assert!(!seq.is_done());
        seq.advance();
        assert!(matches!(seq.current().unwrap().action, CommandAction::Direct(RobotAction::Release)));
        seq.advance();
        assert!(seq.is_done());
        assert!(seq.current().is_none());
        seq.advance();
        assert!(seq.is_done());
    }
}
