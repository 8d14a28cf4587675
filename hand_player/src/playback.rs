//! The playback loop — cyclic, fail-stop, stoppable at step boundaries.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use hand_gesture::{GestureError, Program};
use hand_pose::{
    issue, AddressTable, CalibrationProfile, ChannelError, PoseError, ServoChannel, TorqueMode,
};

// ════════════════════════════════════════════════════════════════════════════
// LoopState / StopFlag / StepEvent / PlaybackError
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    /// Terminal: a channel or resolution failure halted motion issuance.
    Faulted,
}

/// External stop signal, observed before each step is issued — never
/// mid-step, so a pose always completes or is never started.
#[derive(Clone, Debug, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    pub fn new() -> Self {
        StopFlag::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Emitted after each step is issued, for status display.
#[derive(Clone, Debug)]
pub struct StepEvent {
    pub gesture: String,
    /// Step index within the gesture's flattened sequence.
    pub step: usize,
    /// Number of servo command pairs in the step.
    pub commands: usize,
    pub hold: Duration,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlaybackError {
    #[error(transparent)]
    Pose(#[from] PoseError),

    #[error(transparent)]
    Channel(#[from] ChannelError),

    #[error(transparent)]
    Gesture(#[from] GestureError),

    /// The instance faulted earlier; build a fresh `Playback` to run again.
    #[error("playback has faulted and cannot be run again")]
    Faulted,
}

// ════════════════════════════════════════════════════════════════════════════
// Playback
// ════════════════════════════════════════════════════════════════════════════

/// Owns a validated program and drives it through a channel.
pub struct Playback {
    program: Program,
    table: AddressTable,
    cal: CalibrationProfile,
    state: LoopState,
}

impl Playback {
    /// Build a playback loop, dry-resolving the whole program first so
    /// configuration mismatches abort before any motion.
    pub fn new(
        program: Program,
        table: AddressTable,
        cal: CalibrationProfile,
    ) -> Result<Self, PoseError> {
        program.validate(&table, &cal)?;
        Ok(Playback { program, table, cal, state: LoopState::Idle })
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Run the loop until `stop` is observed or a write fails.
    ///
    /// Enables torque on every registered servo, then cycles the program:
    /// gesture by gesture, wrapping to the first after the last,
    /// indefinitely.  `on_step` is called after each issued step.
    ///
    /// Returns `Ok(())` on a clean stop (state `Idle`); any error faults
    /// the loop (state `Faulted`) and halts issuance immediately — the
    /// hand is left where it is, never guessed to a "safe" pose.  A
    /// faulted instance stays faulted: further `run` calls issue nothing
    /// and return [`PlaybackError::Faulted`].
    pub fn run<F>(
        &mut self,
        channel: &mut dyn ServoChannel,
        stop: &StopFlag,
        mut on_step: F,
    ) -> Result<(), PlaybackError>
    where
        F: FnMut(StepEvent),
    {
        if self.state == LoopState::Faulted {
            return Err(PlaybackError::Faulted);
        }
        self.state = LoopState::Running;
        let result = drive(&self.program, &self.table, &self.cal, channel, stop, &mut on_step);
        self.state = if result.is_ok() { LoopState::Idle } else { LoopState::Faulted };
        result
    }
}

fn drive(
    program: &Program,
    table: &AddressTable,
    cal: &CalibrationProfile,
    channel: &mut dyn ServoChannel,
    stop: &StopFlag,
    on_step: &mut dyn FnMut(StepEvent),
) -> Result<(), PlaybackError> {
    for servo in table.servo_ids() {
        channel.enable_torque(servo, TorqueMode::On)?;
    }

    let mut idx = 0;
    loop {
        let gesture = &program.gestures()[idx];
        for (step_no, step) in gesture.sequence(table, cal).enumerate() {
            if stop.is_stopped() {
                return Ok(());
            }
            let step = step?;
            issue(channel, &step.commands)?;
            on_step(StepEvent {
                gesture: gesture.name().to_string(),
                step: step_no,
                commands: step.commands.len(),
                hold: step.hold,
            });
            if !step.hold.is_zero() {
                thread::sleep(step.hold);
            }
        }
        idx = (idx + 1) % program.len();
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
