//! Fire-and-forget TTS dispatch: synthesis must never
//! block the tick loop, and a bounded queue with drop-on-full is an
//! acceptable loss (the fusion layer's own cooldown already bounds how
//! often a given event type re-speaks).
//!
//! Built on `rayon`'s global thread pool rather than pulling in an async
//! runtime for one fire-and-forget call.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
use std::sync::Arc;

/// Synthesizes a line of text to audio. `NoopTtsBackend` is the default —
/// embedding a real synthesizer is out of scope for this crate.
pub trait TtsBackend: Send + Sync {
    /// Returns base64-encoded audio, or `None` if synthesis produced
    /// nothing playable.
    fn synthesize(&self, text: &str) -> Option<String>;
}

pub struct NoopTtsBackend;

impl TtsBackend for NoopTtsBackend {
    fn synthesize(&self, _text: &str) -> Option<String> {
        None
    }
}

/// A completed (or attempted) synthesis, delivered asynchronously.
#[derive(Clone, Debug)]
pub struct SynthesizedSpeech {
    pub text: String,
    pub event_type: &'static str,
    pub audio_base64: Option<String>,
}

/// Dispatches synthesis jobs to `rayon::spawn`, capped at `max_inflight`
/// concurrent jobs. A request submitted while at capacity is dropped
/// rather than queued indefinitely.
pub struct TtsWorker {
    backend: Arc<dyn TtsBackend>,
    inflight: Arc<AtomicUsize>,
    max_inflight: usize,
    results_tx: SyncSender<SynthesizedSpeech>,
}

impl TtsWorker {
    /// `queue_capacity` bounds the results channel; `max_inflight` bounds
    /// concurrently running synthesis jobs. Returns the worker and the
    /// receiving end of completed syntheses — the loop never blocks on it.
    pub fn new(backend: Arc<dyn TtsBackend>, max_inflight: usize, queue_capacity: usize) -> (Self, Receiver<SynthesizedSpeech>) {
        let (results_tx, results_rx) = sync_channel(queue_capacity.max(1));
        let worker = Self { backend, inflight: Arc::new(AtomicUsize::new(0)), max_inflight: max_inflight.max(1), results_tx };
        (worker, results_rx)
    }

    /// `true` if the job was accepted for background synthesis. Returns
    /// `false` (and drops the request) if the worker is already at
    /// `max_inflight` capacity.
    pub fn dispatch(&self, text: String, event_type: &'static str) -> bool {
        let inflight = self.inflight.clone();
        if inflight.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| (n < self.max_inflight).then_some(n + 1)).is_err() {
            return false;
        }

        let backend = self.backend.clone();
        let results_tx = self.results_tx.clone();
        rayon::spawn(move || {
            let audio_base64 = backend.synthesize(&text);
            let _ = results_tx.try_send(SynthesizedSpeech { text, event_type, audio_base64 });
            inflight.fetch_sub(1, Ordering::SeqCst);
        });
        true
    }
}
