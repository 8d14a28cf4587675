//! Background playback thread.
//!
//! Wraps a [`Playback`] loop in a worker thread.  The handle exposes the
//! stop flag and a non-blocking drain of step events, so a frontend can
//! report progress without owning the loop.

use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use hand_pose::ServoChannel;

use crate::playback::{LoopState, Playback, PlaybackError, StepEvent, StopFlag};

/// Handle to the playback thread.
pub struct Player {
    stop: StopFlag,
    event_rx: Receiver<StepEvent>,
    handle: JoinHandle<(LoopState, Result<(), PlaybackError>)>,
}

impl Player {
    /// Spawn the playback thread.  `playback` and the channel are consumed
    /// by the thread; events flow back through the returned handle.
    pub fn spawn(mut playback: Playback, mut channel: Box<dyn ServoChannel>) -> Self {
        let stop = StopFlag::new();
        let (event_tx, event_rx) = mpsc::channel::<StepEvent>();

        let flag = stop.clone();
        let handle = thread::spawn(move || {
            let result = playback.run(channel.as_mut(), &flag, |ev| {
                let _ = event_tx.send(ev);
            });
            if let Err(ref e) = result {
                eprintln!("[playback] faulted: {}", e);
            }
            (playback.state(), result)
        });

        Player { stop, event_rx, handle }
    }

    /// Request a stop; the loop finishes its current step first.
    pub fn stop(&self) {
        self.stop.stop();
    }

    /// True once the loop has exited (stopped or faulted).
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Drain any pending step events (non-blocking).
    pub fn drain_events(&self) -> Vec<StepEvent> {
        let mut out = Vec::new();
        while let Ok(ev) = self.event_rx.try_recv() {
            out.push(ev);
        }
        out
    }

    /// Wait for the thread and return the loop's final state and result.
    pub fn join(self) -> (LoopState, Result<(), PlaybackError>) {
        self.handle.join().expect("playback thread panicked")
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
