//! Gesture programs — the only "script" surface.
//!
//! A program is an ordered list of gestures cycled by the playback loop.
//! It is created whole from static data and never mutated during
//! playback, only replaced.

use hand_pose::{AddressTable, CalibrationProfile, PoseError};

use crate::gesture::{Gesture, GestureError};

/// Ordered, non-empty list of gestures, replayed cyclically.
#[derive(Clone, Debug)]
pub struct Program {
    gestures: Vec<Gesture>,
}

impl Program {
    pub fn new(gestures: Vec<Gesture>) -> Result<Self, GestureError> {
        if gestures.is_empty() {
            return Err(GestureError::EmptyProgram);
        }
        Ok(Program { gestures })
    }

    pub fn gestures(&self) -> &[Gesture] {
        &self.gestures
    }

    pub fn len(&self) -> usize {
        self.gestures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gestures.is_empty()
    }

    /// Dry-resolve every pose of every gesture.
    ///
    /// Run at startup so configuration mismatches abort before any motion
    /// is commanded, not halfway through a gesture.
    pub fn validate(
        &self,
        table: &AddressTable,
        cal: &CalibrationProfile,
    ) -> Result<(), PoseError> {
        for gesture in &self.gestures {
            for step in gesture.sequence(table, cal) {
                step?;
            }
        }
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
