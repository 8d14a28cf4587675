//! Per-deployment middle-position calibration.
//!
//! Every servo has a mechanical "middle" offset, in degrees, measured once
//! per build of the hand.  Pose deltas are relative to these offsets:
//! `effective = middle + delta`.  The profile is loaded at startup and
//! read-only thereafter.

use crate::joint::{Finger, Hand, JointId, Slot, JOINTS_PER_HAND};

/// Middle-position offsets for both hands, in canonical joint order
/// (index, middle, ring, thumb — proximal before distal), degrees.
#[derive(Clone, Debug, PartialEq)]
pub struct CalibrationProfile {
    right: [f32; JOINTS_PER_HAND],
    left: [f32; JOINTS_PER_HAND],
}

impl CalibrationProfile {
    pub fn new(right: [f32; JOINTS_PER_HAND], left: [f32; JOINTS_PER_HAND]) -> Self {
        CalibrationProfile { right, left }
    }

    /// Offsets from the reference build of the hand.  Every deployment
    /// should measure and supply its own values; these are only a usable
    /// starting point for the stock hardware.
    pub fn demo() -> Self {
        CalibrationProfile {
            right: [3.0, 0.0, -8.0, -13.0, 2.0, -5.0, -12.0, -5.0],
            left: [3.0, -3.0, -1.0, -10.0, 5.0, 2.0, -7.0, 3.0],
        }
    }

    pub fn offsets(&self, hand: Hand) -> &[f32; JOINTS_PER_HAND] {
        match hand {
            Hand::Right => &self.right,
            Hand::Left => &self.left,
        }
    }

    /// Calibrated middle position of one joint, degrees.
    pub fn middle_angle(&self, hand: Hand, finger: Finger, slot: Slot) -> f32 {
        self.offsets(hand)[JointId::new(hand, finger, slot).canonical_index()]
    }

    /// Absolute target angle for a delta from the middle position, degrees.
    pub fn effective_angle(&self, hand: Hand, finger: Finger, slot: Slot, delta: f32) -> f32 {
        self.middle_angle(hand, finger, slot) + delta
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
