//! Lazy, restartable sequencing of a gesture into resolved steps.
//!
//! Sequencing flattens nested gestures depth-first with an explicit frame
//! stack — no recursion at iteration time, no pre-expansion of repeats —
//! and resolves each pose through the address table and calibration as it
//! is reached.  Channel-level concerns (bus settling, retries) do not
//! appear here; a sequence is pure data until something issues it.

use std::time::Duration;

use hand_pose::{AddressTable, CalibrationProfile, PoseError, ResolvedCommand};

use crate::gesture::{Gesture, Step};

// ════════════════════════════════════════════════════════════════════════════
// ResolvedStep
// ════════════════════════════════════════════════════════════════════════════

/// "Commands to issue now, then wait `hold` before the next step."
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedStep {
    /// Per-servo commands in the pose's fixed joint order.
    pub commands: Vec<ResolvedCommand>,
    pub hold: Duration,
}

// ════════════════════════════════════════════════════════════════════════════
// Sequence
// ════════════════════════════════════════════════════════════════════════════

struct Frame<'a> {
    steps: &'a [Step],
    next: usize,
    /// Rounds left for this frame, including the current one.
    rounds: u32,
}

/// Iterator over a gesture's resolved steps.
///
/// Yields `Err` once and then fuses if a pose cannot be resolved; channel
/// failures never originate here.  [`Sequence::restart`] rewinds to the
/// first step.
pub struct Sequence<'a> {
    table: &'a AddressTable,
    cal: &'a CalibrationProfile,
    root: &'a [Step],
    stack: Vec<Frame<'a>>,
}

impl Gesture {
    /// Begin sequencing this gesture against a table and calibration.
    pub fn sequence<'a>(
        &'a self,
        table: &'a AddressTable,
        cal: &'a CalibrationProfile,
    ) -> Sequence<'a> {
        Sequence {
            table,
            cal,
            root: self.steps(),
            stack: vec![Frame { steps: self.steps(), next: 0, rounds: 1 }],
        }
    }
}

impl<'a> Sequence<'a> {
    /// Rewind to the first step.
    pub fn restart(&mut self) {
        self.stack.clear();
        self.stack.push(Frame { steps: self.root, next: 0, rounds: 1 });
    }
}

impl<'a> Iterator for Sequence<'a> {
    type Item = Result<ResolvedStep, PoseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;

            if frame.next == frame.steps.len() {
                if frame.rounds > 1 {
                    frame.rounds -= 1;
                    frame.next = 0;
                } else {
                    self.stack.pop();
                }
                continue;
            }

            let steps = frame.steps;
            let step = &steps[frame.next];
            frame.next += 1;

            match step {
                Step::Pose { pose, hold } => {
                    return Some(match pose.resolve(self.table, self.cal) {
                        Ok(commands) => Ok(ResolvedStep { commands, hold: *hold }),
                        Err(e) => {
                            self.stack.clear();
                            Err(e)
                        }
                    });
                }
                Step::Sub(g) => {
                    self.stack.push(Frame { steps: g.steps(), next: 0, rounds: 1 });
                }
                Step::Repeat { times, body } => {
                    if *times > 0 {
                        self.stack.push(Frame { steps: body.steps(), next: 0, rounds: *times });
                    }
                }
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use hand_pose::{Finger, Hand, JointId, Pose, ServoId, Slot};

    fn table() -> AddressTable {
        AddressTable::amazing_hand()
    }

    fn cal() -> CalibrationProfile {
        CalibrationProfile::demo()
    }

    fn finger_pose(finger: Finger, delta: f32) -> Pose {
        Pose::builder()
            .finger(Hand::Right, finger, delta, -delta, 7.0)
            .build()
            .unwrap()
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn collect(g: &Gesture) -> Vec<ResolvedStep> {
        g.sequence(&table(), &cal()).map(|s| s.unwrap()).collect()
    }

    #[test]
    fn flat_gesture_emits_steps_in_order_with_holds() {
        let g = Gesture::builder("flat")
            .pose(finger_pose(Finger::Index, 10.0), ms(100))
            .pose(finger_pose(Finger::Middle, 20.0), ms(300))
            .build()
            .unwrap();

        let steps = collect(&g);
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].hold, ms(100));
        assert_eq!(steps[1].hold, ms(300));
        assert_eq!(steps[0].commands[0].servo, ServoId(1));
        assert_eq!(steps[1].commands[0].servo, ServoId(3));
    }

    #[test]
    fn nested_gesture_equals_inlined_steps() {
        let inner = Gesture::builder("inner")
            .pose(finger_pose(Finger::Middle, 5.0), ms(150))
            .pose(finger_pose(Finger::Ring, 5.0), ms(250))
            .build()
            .unwrap();

        let nested = Gesture::builder("outer")
            .pose(finger_pose(Finger::Index, 1.0), ms(50))
            .sub(inner.clone())
            .pose(finger_pose(Finger::Thumb, 1.0), ms(50))
            .build()
            .unwrap();

        let inlined = Gesture::builder("outer_inlined")
            .pose(finger_pose(Finger::Index, 1.0), ms(50))
            .pose(finger_pose(Finger::Middle, 5.0), ms(150))
            .pose(finger_pose(Finger::Ring, 5.0), ms(250))
            .pose(finger_pose(Finger::Thumb, 1.0), ms(50))
            .build()
            .unwrap();

        assert_eq!(collect(&nested), collect(&inlined));
    }

    #[test]
    fn deeply_nested_flattening_is_depth_first() {
        let leaf = Gesture::builder("leaf")
            .pose(finger_pose(Finger::Ring, 2.0), ms(10))
            .build()
            .unwrap();
        let mid = Gesture::builder("mid")
            .sub(leaf)
            .pose(finger_pose(Finger::Middle, 2.0), ms(20))
            .build()
            .unwrap();
        let top = Gesture::builder("top")
            .sub(mid)
            .pose(finger_pose(Finger::Index, 2.0), ms(30))
            .build()
            .unwrap();

        let servos: Vec<u8> =
            collect(&top).iter().map(|s| s.commands[0].servo.0).collect();
        // leaf ring (5), mid middle (3), top index (1)
        assert_eq!(servos, vec![5, 3, 1]);
    }

    #[test]
    fn repeat_emits_n_identical_copies() {
        let body = Gesture::builder("wiggle")
            .pose(finger_pose(Finger::Index, -10.0), ms(200))
            .pose(finger_pose(Finger::Index, 10.0), ms(200))
            .build()
            .unwrap();
        let g = Gesture::builder("rep").repeat(3, body.clone()).build().unwrap();

        let steps = collect(&g);
        let one_round = collect(&body);
        assert_eq!(steps.len(), 6);
        assert_eq!(&steps[0..2], &one_round[..]);
        assert_eq!(&steps[2..4], &one_round[..]);
        assert_eq!(&steps[4..6], &one_round[..]);
    }

    #[test]
    fn repeat_zero_emits_nothing() {
        let body = Gesture::builder("body")
            .pose(finger_pose(Finger::Index, 1.0), ms(10))
            .build()
            .unwrap();
        let g = Gesture::builder("rep0")
            .repeat(0, body)
            .pose(finger_pose(Finger::Thumb, 1.0), ms(10))
            .build()
            .unwrap();

        let steps = collect(&g);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].commands[0].servo, ServoId(7));
    }

    #[test]
    fn sequence_is_restartable() {
        let g = Gesture::builder("g")
            .pose(finger_pose(Finger::Index, 1.0), ms(10))
            .pose(finger_pose(Finger::Middle, 1.0), ms(10))
            .build()
            .unwrap();

        let t = table();
        let c = cal();
        let mut seq = g.sequence(&t, &c);
        let first = seq.next().unwrap().unwrap();
        let _ = seq.next();
        assert!(seq.next().is_none());

        seq.restart();
        let again = seq.next().unwrap().unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn two_independent_sequences_agree() {
        let g = Gesture::builder("g")
            .pose(finger_pose(Finger::Index, 1.0), ms(10))
            .build()
            .unwrap();
        assert_eq!(collect(&g), collect(&g));
    }

    #[test]
    fn unresolved_joint_yields_error_then_fuses() {
        // Table with only one right-index joint registered.
        let j = JointId::new(Hand::Right, Finger::Index, Slot::Proximal);
        let partial = AddressTable::from_entries([(j, ServoId(1))]).unwrap();
        let c = cal();

        let g = Gesture::builder("bad")
            .pose(finger_pose(Finger::Ring, 1.0), ms(10))
            .pose(finger_pose(Finger::Index, 1.0), ms(10))
            .build()
            .unwrap();

        let mut seq = g.sequence(&partial, &c);
        assert!(matches!(seq.next(), Some(Err(PoseError::UnknownJoint(_)))));
        assert!(seq.next().is_none());
    }
}
