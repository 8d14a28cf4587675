//! Pose descriptors and their resolution into servo commands.
//!
//! A [`Pose`] is a simultaneous target across a set of joints: each entry
//! carries an angle delta from the calibrated middle position (degrees)
//! and a motion speed.  Entry order is fixed at construction time and
//! preserved through resolution — on this hardware the thumb must be
//! commanded after the index during closing moves, so ordering is part of
//! the data, never implicit.

use crate::calib::CalibrationProfile;
use crate::error::PoseError;
use crate::joint::{AddressTable, Finger, Hand, JointId, ServoId, Slot};

/// Upper bound of the goal-speed range the SCS0009 controller accepts.
/// Speeds must be finite and in `(0, SPEED_MAX]`.
pub const SPEED_MAX: f32 = 15.0;

// ════════════════════════════════════════════════════════════════════════════
// PoseEntry / Pose
// ════════════════════════════════════════════════════════════════════════════

/// One joint's target within a pose.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoseEntry {
    pub joint: JointId,
    /// Angle delta from the calibrated middle position, degrees.
    pub delta_deg: f32,
    /// Goal speed, unitless controller rate in `(0, SPEED_MAX]`.
    pub speed: f32,
}

/// A validated, ordered set of joint targets.
#[derive(Clone, Debug, PartialEq)]
pub struct Pose {
    entries: Vec<PoseEntry>,
}

impl Pose {
    pub fn builder() -> PoseBuilder {
        PoseBuilder { entries: Vec::new() }
    }

    /// Entries in construction order.
    pub fn entries(&self) -> &[PoseEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve every entry to a servo command, in entry order.
    ///
    /// `position_rad = radians(middle_angle + delta)`.  Pure: the same
    /// pose, table, and calibration always produce the same commands.
    pub fn resolve(
        &self,
        table: &AddressTable,
        cal: &CalibrationProfile,
    ) -> Result<Vec<ResolvedCommand>, PoseError> {
        let mut out = Vec::with_capacity(self.entries.len());
        for e in &self.entries {
            let servo = table.resolve(e.joint)?;
            let degrees =
                cal.effective_angle(e.joint.hand, e.joint.finger, e.joint.slot, e.delta_deg);
            out.push(ResolvedCommand {
                joint: e.joint,
                servo,
                position_rad: degrees.to_radians(),
                speed: e.speed,
            });
        }
        Ok(out)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// PoseBuilder
// ════════════════════════════════════════════════════════════════════════════

/// Builder for [`Pose`].  Joints are emitted in the order they are added.
pub struct PoseBuilder {
    entries: Vec<PoseEntry>,
}

impl PoseBuilder {
    /// Add a single joint target.
    pub fn joint(mut self, joint: JointId, delta_deg: f32, speed: f32) -> Self {
        self.entries.push(PoseEntry { joint, delta_deg, speed });
        self
    }

    /// Add both joints of one finger (proximal first), sharing one speed.
    pub fn finger(
        self,
        hand: Hand,
        finger: Finger,
        proximal_deg: f32,
        distal_deg: f32,
        speed: f32,
    ) -> Self {
        self.joint(JointId::new(hand, finger, Slot::Proximal), proximal_deg, speed)
            .joint(JointId::new(hand, finger, Slot::Distal), distal_deg, speed)
    }

    /// Validate and finish: the pose must be non-empty, every joint
    /// distinct, every speed finite and in `(0, SPEED_MAX]`.
    pub fn build(self) -> Result<Pose, PoseError> {
        if self.entries.is_empty() {
            return Err(PoseError::EmptyPose);
        }
        for (i, e) in self.entries.iter().enumerate() {
            if !(e.speed.is_finite() && e.speed > 0.0 && e.speed <= SPEED_MAX) {
                return Err(PoseError::SpeedOutOfRange { joint: e.joint, speed: e.speed });
            }
            if self.entries[..i].iter().any(|prev| prev.joint == e.joint) {
                return Err(PoseError::DuplicateJoint(e.joint));
            }
        }
        Ok(Pose { entries: self.entries })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ResolvedCommand
// ════════════════════════════════════════════════════════════════════════════

/// One servo write pair, fully resolved: absolute position and speed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedCommand {
    pub joint: JointId,
    pub servo: ServoId,
    /// Absolute goal position, radians.
    pub position_rad: f32,
    pub speed: f32,
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
