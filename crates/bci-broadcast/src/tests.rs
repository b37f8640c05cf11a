use std::sync::Arc;
use std::time::Duration;

use bci_loop::{InboundCommand, SupervisoryLoopBuilder};

use crate::hub::BroadcastHub;
use crate::message::{messages_for_tick, Message};
use crate::tts::{NoopTtsBackend, TtsWorker};

fn test_loop() -> bci_loop::SupervisoryLoop {
    SupervisoryLoopBuilder::new().start_unix_secs(1_700_000_000).build()
}

#[test]
fn idle_tick_produces_only_a_state_update() {
    let mut sl = test_loop();
    let report = sl.tick();
    let messages = messages_for_tick(&report, sl.clock());

    assert_eq!(messages.len(), 1);
    assert!(matches!(messages[0], Message::StateUpdate(_)));
}

#[test]
fn voice_stop_pairs_a_command_log_with_a_state_update() {
    let mut sl = test_loop();
    sl.handle_inbound(InboundCommand::VoiceTranscript { transcript: "stop".to_string(), confidence: 0.9 });
    let report = sl.tick();
    let messages = messages_for_tick(&report, sl.clock());

    assert!(messages.iter().any(|m| matches!(m, Message::StateUpdate(_))));
    assert!(messages.iter().any(|m| matches!(m, Message::CommandLog { action, .. } if action.contains("STOP"))));
}

#[test]
fn state_update_timestamp_tracks_the_clock() {
    let mut sl = test_loop();
    let start = sl.clock().unix_time(sl.clock().current_tick);
    let report = sl.tick();
    let messages = messages_for_tick(&report, sl.clock());

    let Message::StateUpdate(update) = &messages[0] else { panic!("expected a state update") };
    assert!(update.timestamp >= start);
}

#[test]
fn hub_delivers_published_messages_to_subscribers() {
    let hub = BroadcastHub::new(8);
    let rx = hub.subscribe();

    hub.publish(Message::CancelConfirmed { timestamp: 0.0 });

    let received = rx.try_recv().expect("message should be waiting");
    assert!(matches!(received, Message::CancelConfirmed { .. }));
}

#[test]
fn hub_drops_messages_once_a_subscriber_queue_is_full() {
    let hub = BroadcastHub::new(1);
    let rx = hub.subscribe();

    hub.publish(Message::CancelConfirmed { timestamp: 1.0 });
    hub.publish(Message::CancelConfirmDismiss { timestamp: 2.0 });

    let first = rx.try_recv().expect("first message should be queued");
    assert!(matches!(first, Message::CancelConfirmed { .. }));
    assert!(rx.try_recv().is_err(), "second message should have been dropped, not queued behind the first");
}

#[test]
fn hub_prunes_subscribers_whose_receiver_was_dropped() {
    let hub = BroadcastHub::new(4);
    let rx = hub.subscribe();
    assert_eq!(hub.subscriber_count(), 1);
    drop(rx);

    hub.publish(Message::CancelConfirmed { timestamp: 0.0 });
    assert_eq!(hub.subscriber_count(), 0);
}

#[test]
fn tts_worker_delivers_a_synthesis_result() {
    let (worker, rx) = TtsWorker::new(Arc::new(NoopTtsBackend), 4, 8);
    assert!(worker.dispatch("arrived at the table".to_string(), "nav_arrive"));

    let result = rx.recv_timeout(Duration::from_secs(2)).expect("synthesis should complete");
    assert_eq!(result.text, "arrived at the table");
    assert_eq!(result.event_type, "nav_arrive");
}

#[test]
fn tts_worker_rejects_dispatch_once_at_capacity() {
    // The inflight counter is incremented synchronously in `dispatch`
    // before the job is handed to rayon, so the second call below is
    // guaranteed to see the first job still occupying the one slot.
    let (worker, _rx) = TtsWorker::new(Arc::new(SlowBackend), 1, 8);
    assert!(worker.dispatch("first".to_string(), "voice_ack"));
    assert!(!worker.dispatch("second".to_string(), "voice_ack"));
}

/// A backend slow enough that the capacity test above can't race past its
/// still-inflight first job.
struct SlowBackend;

impl crate::tts::TtsBackend for SlowBackend {
    fn synthesize(&self, _text: &str) -> Option<String> {
        std::thread::sleep(Duration::from_millis(200));
        None
    }
}
