//! Gesture data model and builder.

use std::time::Duration;

use hand_pose::Pose;

// ════════════════════════════════════════════════════════════════════════════
// Step / Gesture
// ════════════════════════════════════════════════════════════════════════════

/// One step of a gesture.
#[derive(Clone, Debug)]
pub enum Step {
    /// Issue `pose`, then wait `hold` before the next step.
    Pose { pose: Pose, hold: Duration },
    /// Inline another gesture's steps, preserving its internal delays.
    Sub(Gesture),
    /// Inline `body`'s steps `times` times.  `times == 0` emits nothing.
    Repeat { times: u32, body: Gesture },
}

/// A named, non-empty ordered sequence of steps.  Immutable value data:
/// gestures are composed, cloned, and replayed, never edited in place.
#[derive(Clone, Debug)]
pub struct Gesture {
    name: String,
    steps: Vec<Step>,
}

impl Gesture {
    pub fn builder(name: &str) -> GestureBuilder {
        GestureBuilder { name: name.to_string(), steps: Vec::new() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of pose steps this gesture emits when sequenced, with all
    /// sub-gestures and repeats expanded.
    pub fn pose_steps(&self) -> usize {
        self.steps
            .iter()
            .map(|s| match s {
                Step::Pose { .. } => 1,
                Step::Sub(g) => g.pose_steps(),
                Step::Repeat { times, body } => *times as usize * body.pose_steps(),
            })
            .sum()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// GestureBuilder
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GestureError {
    /// A gesture with no steps would stall playback silently.
    #[error("gesture `{0}` has no steps")]
    EmptyGesture(String),

    /// A program with no gestures has nothing to cycle.
    #[error("gesture program has no gestures")]
    EmptyProgram,
}

pub struct GestureBuilder {
    name: String,
    steps: Vec<Step>,
}

impl GestureBuilder {
    /// Append a pose step with its hold duration.
    pub fn pose(mut self, pose: Pose, hold: Duration) -> Self {
        self.steps.push(Step::Pose { pose, hold });
        self
    }

    /// Append a sub-gesture step.
    pub fn sub(mut self, gesture: Gesture) -> Self {
        self.steps.push(Step::Sub(gesture));
        self
    }

    /// Append a repeated sub-gesture step.
    pub fn repeat(mut self, times: u32, body: Gesture) -> Self {
        self.steps.push(Step::Repeat { times, body });
        self
    }

    pub fn build(self) -> Result<Gesture, GestureError> {
        if self.steps.is_empty() {
            return Err(GestureError::EmptyGesture(self.name));
        }
        Ok(Gesture { name: self.name, steps: self.steps })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
