//! The servo command channel — the external collaborator boundary.
//!
//! Everything below this trait is bus territory: protocol framing,
//! retries, and the micro-delays needed between consecutive writes so the
//! transport can settle all belong to channel implementations, never to
//! the sequencer.  The core treats a channel as opaque and does not retry
//! on its behalf.

use std::time::Duration;

use crate::joint::ServoId;
use crate::pose::ResolvedCommand;

// ════════════════════════════════════════════════════════════════════════════
// TorqueMode / ChannelError
// ════════════════════════════════════════════════════════════════════════════

/// Torque state of one servo.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TorqueMode {
    On,
    Off,
    /// Torque released; the joint can be moved by hand.
    Free,
}

/// Transport-level failure.  Surfaced to the playback loop, which halts
/// motion issuance immediately — transient-error retry, if any, lives
/// below this interface where write order can be preserved.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChannelError {
    #[error("failed to open bus: {0}")]
    Open(String),

    #[error("write to servo {servo} failed: {reason}")]
    Write { servo: ServoId, reason: String },

    #[error("servo {servo} did not answer within {timeout:?}")]
    Timeout { servo: ServoId, timeout: Duration },

    #[error("bus disconnected")]
    Disconnected,
}

// ════════════════════════════════════════════════════════════════════════════
// ServoChannel
// ════════════════════════════════════════════════════════════════════════════

/// Abstract sink for per-servo speed/position writes.
///
/// Contract: for any joint, its goal speed must be written before its goal
/// position, so no servo ever moves at a stale speed.  [`issue`] upholds
/// this; implementations only have to make each write atomic.
pub trait ServoChannel: Send {
    fn set_speed(&mut self, servo: ServoId, speed: f32) -> Result<(), ChannelError>;
    fn set_position(&mut self, servo: ServoId, radians: f32) -> Result<(), ChannelError>;
    fn enable_torque(&mut self, servo: ServoId, mode: TorqueMode) -> Result<(), ChannelError>;
}

/// Issue one resolved pose step over a channel.
///
/// Commands are grouped into runs of consecutive entries that share a
/// `(hand, finger)`.  Within each run all speeds are written first, then
/// all positions — the observed firmware-safe pattern (speed, speed,
/// position, position per finger).  Runs are issued in pose order, so a
/// pose that lists the thumb last commands it last.
///
/// Stops at the first failure; no further writes are attempted.
pub fn issue(
    channel: &mut dyn ServoChannel,
    commands: &[ResolvedCommand],
) -> Result<(), ChannelError> {
    let mut i = 0;
    while i < commands.len() {
        let finger = (commands[i].joint.hand, commands[i].joint.finger);
        let mut j = i + 1;
        while j < commands.len() && (commands[j].joint.hand, commands[j].joint.finger) == finger {
            j += 1;
        }
        for c in &commands[i..j] {
            channel.set_speed(c.servo, c.speed)?;
        }
        for c in &commands[i..j] {
            channel.set_position(c.servo, c.position_rad)?;
        }
        i = j;
    }
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calib::CalibrationProfile;
    use crate::joint::{AddressTable, Finger, Hand};
    use crate::pose::Pose;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Speed(u8),
        Position(u8),
    }

    /// Records every write; optionally fails after `fail_after` writes.
    struct Recorder {
        ops: Vec<Op>,
        fail_after: Option<usize>,
    }

    impl Recorder {
        fn new() -> Self {
            Recorder { ops: Vec::new(), fail_after: None }
        }

        fn failing_after(n: usize) -> Self {
            Recorder { ops: Vec::new(), fail_after: Some(n) }
        }

        fn check(&mut self, servo: ServoId) -> Result<(), ChannelError> {
            if let Some(n) = self.fail_after {
                if self.ops.len() >= n {
                    return Err(ChannelError::Write {
                        servo,
                        reason: "injected".to_string(),
                    });
                }
            }
            Ok(())
        }
    }

    impl ServoChannel for Recorder {
        fn set_speed(&mut self, servo: ServoId, _speed: f32) -> Result<(), ChannelError> {
            self.check(servo)?;
            self.ops.push(Op::Speed(servo.0));
            Ok(())
        }
        fn set_position(&mut self, servo: ServoId, _radians: f32) -> Result<(), ChannelError> {
            self.check(servo)?;
            self.ops.push(Op::Position(servo.0));
            Ok(())
        }
        fn enable_torque(&mut self, _servo: ServoId, _mode: TorqueMode) -> Result<(), ChannelError> {
            Ok(())
        }
    }

    fn two_finger_pose() -> Vec<ResolvedCommand> {
        let table = AddressTable::amazing_hand();
        let cal = CalibrationProfile::demo();
        Pose::builder()
            .finger(Hand::Right, Finger::Index, -35.0, 35.0, 7.0)
            .finger(Hand::Right, Finger::Middle, -35.0, 35.0, 7.0)
            .build()
            .unwrap()
            .resolve(&table, &cal)
            .unwrap()
    }

    #[test]
    fn speeds_precede_positions_within_each_finger() {
        let mut ch = Recorder::new();
        issue(&mut ch, &two_finger_pose()).unwrap();
        assert_eq!(
            ch.ops,
            vec![
                Op::Speed(1),
                Op::Speed(2),
                Op::Position(1),
                Op::Position(2),
                Op::Speed(3),
                Op::Speed(4),
                Op::Position(3),
                Op::Position(4),
            ]
        );
    }

    #[test]
    fn failure_stops_all_further_writes() {
        let mut ch = Recorder::failing_after(3);
        let err = issue(&mut ch, &two_finger_pose());
        assert!(matches!(err, Err(ChannelError::Write { .. })));
        assert_eq!(ch.ops.len(), 3);
    }

    #[test]
    fn single_joint_run_is_speed_then_position() {
        let table = AddressTable::amazing_hand();
        let cal = CalibrationProfile::demo();
        let commands = Pose::builder()
            .joint(
                crate::joint::JointId::new(Hand::Right, Finger::Ring, crate::joint::Slot::Distal),
                10.0,
                5.0,
            )
            .build()
            .unwrap()
            .resolve(&table, &cal)
            .unwrap();

        let mut ch = Recorder::new();
        issue(&mut ch, &commands).unwrap();
        assert_eq!(ch.ops, vec![Op::Speed(6), Op::Position(6)]);
    }

    #[test]
    fn empty_command_list_writes_nothing() {
        let mut ch = Recorder::new();
        issue(&mut ch, &[]).unwrap();
        assert!(ch.ops.is_empty());
    }
}
