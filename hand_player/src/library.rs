//! Stock gesture library — the AmazingHand demo set, expressed as data.
//!
//! Each constructor takes a `settle` duration: the hold after the
//! gesture's final pose, before whatever comes next in the program.
//! Deltas are degrees from the calibrated middle position, per hand;
//! asymmetric gestures simply list different numbers for each hand.
//!
//! Ordering matters and is kept explicit: fingers are listed index,
//! middle, ring, thumb, so the thumb is always commanded last — on this
//! mechanism the thumb has to pass under the index when closing.

use std::time::Duration;

use hand_gesture::{Gesture, Program};
use hand_pose::{Finger, Hand, Pose, PoseBuilder};

/// Default motion speed.
pub const MAX_SPEED: f32 = 7.0;
/// Slower speed for closing moves.
pub const CLOSE_SPEED: f32 = 3.0;
/// Extra thumb speed during closes, so the thumb clears the index.
pub const THUMB_BOOST: f32 = 4.0;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Add one finger on both hands: right deltas, then left deltas.
fn both(
    b: PoseBuilder,
    finger: Finger,
    right: (f32, f32),
    left: (f32, f32),
    speed: f32,
) -> PoseBuilder {
    b.finger(Hand::Right, finger, right.0, right.1, speed)
        .finger(Hand::Left, finger, left.0, left.1, speed)
}

/// Same deltas on both hands.
fn mirrored(b: PoseBuilder, finger: Finger, deltas: (f32, f32), speed: f32) -> PoseBuilder {
    both(b, finger, deltas, deltas, speed)
}

fn single_pose(name: &str, pose: Pose, settle: Duration) -> Gesture {
    Gesture::builder(name)
        .pose(pose, settle)
        .build()
        .expect("gesture has steps")
}

// ════════════════════════════════════════════════════════════════════════════
// Basic shapes
// ════════════════════════════════════════════════════════════════════════════

/// All fingers open.
pub fn open_hand(settle: Duration) -> Gesture {
    let mut b = Pose::builder();
    for finger in Finger::ALL {
        b = mirrored(b, finger, (-35.0, 35.0), MAX_SPEED);
    }
    single_pose("open_hand", b.build().expect("pose is valid"), settle)
}

/// Fist.  The thumb runs faster than the fingers so it passes under the
/// index before the fist closes on it.
pub fn close_hand(settle: Duration) -> Gesture {
    let mut b = Pose::builder();
    for finger in [Finger::Index, Finger::Middle, Finger::Ring] {
        b = mirrored(b, finger, (90.0, -90.0), CLOSE_SPEED);
    }
    b = mirrored(b, Finger::Thumb, (90.0, -90.0), CLOSE_SPEED + THUMB_BOOST);
    single_pose("close_hand", b.build().expect("pose is valid"), settle)
}

/// Open one finger at a time, index to thumb, 200 ms apart.
pub fn open_progressive(settle: Duration) -> Gesture {
    let mut g = Gesture::builder("open_progressive");
    let fingers = Finger::ALL;
    for (i, finger) in fingers.into_iter().enumerate() {
        let pose = mirrored(Pose::builder(), finger, (-35.0, 35.0), MAX_SPEED - 2.0)
            .build()
            .expect("pose is valid");
        let hold = if i + 1 == fingers.len() { settle } else { ms(200) };
        g = g.pose(pose, hold);
    }
    g.build().expect("gesture has steps")
}

/// Fingers fanned apart.
pub fn spread(settle: Duration) -> Gesture {
    let b = Pose::builder();
    let b = both(b, Finger::Index, (4.0, 90.0), (-90.0, 0.0), MAX_SPEED);
    let b = both(b, Finger::Middle, (-32.0, 32.0), (-32.0, 32.0), MAX_SPEED);
    let b = both(b, Finger::Ring, (-90.0, -4.0), (-4.0, 90.0), MAX_SPEED);
    let b = both(b, Finger::Thumb, (-90.0, -4.0), (-4.0, 90.0), MAX_SPEED);
    single_pose("spread", b.build().expect("pose is valid"), settle)
}

/// Fingers drawn back together from a spread.
pub fn clench(settle: Duration) -> Gesture {
    let b = Pose::builder();
    let b = both(b, Finger::Index, (-60.0, 0.0), (0.0, 60.0), MAX_SPEED);
    let b = both(b, Finger::Middle, (-35.0, 35.0), (-35.0, 35.0), MAX_SPEED);
    let b = both(b, Finger::Ring, (0.0, 70.0), (-70.0, 0.0), MAX_SPEED);
    let b = both(b, Finger::Thumb, (-4.0, 90.0), (-90.0, -4.0), MAX_SPEED);
    single_pose("clench", b.build().expect("pose is valid"), settle)
}

/// Index extended, everything else curled.
pub fn index_pointing(settle: Duration) -> Gesture {
    single_pose("index_pointing", pointing_pose(), settle)
}

fn pointing_pose() -> Pose {
    let b = Pose::builder();
    let b = mirrored(b, Finger::Index, (-40.0, 40.0), MAX_SPEED);
    let b = mirrored(b, Finger::Middle, (90.0, -90.0), MAX_SPEED);
    let b = mirrored(b, Finger::Ring, (90.0, -90.0), MAX_SPEED);
    let b = mirrored(b, Finger::Thumb, (90.0, -90.0), MAX_SPEED);
    b.build().expect("pose is valid")
}

/// OK sign: index curled onto the thumb.
pub fn perfect(settle: Duration) -> Gesture {
    let b = Pose::builder();
    let b = mirrored(b, Finger::Index, (55.0, -55.0), MAX_SPEED - 3.0);
    let b = mirrored(b, Finger::Middle, (0.0, 0.0), MAX_SPEED);
    let b = mirrored(b, Finger::Ring, (-20.0, 20.0), MAX_SPEED);
    let b = both(b, Finger::Thumb, (85.0, 10.0), (-10.0, -85.0), MAX_SPEED);
    single_pose("perfect", b.build().expect("pose is valid"), settle)
}

/// V sign.
pub fn victory(settle: Duration) -> Gesture {
    single_pose("victory", victory_pose(), settle)
}

fn victory_pose() -> Pose {
    let b = Pose::builder();
    let b = both(b, Finger::Index, (-15.0, 65.0), (-65.0, 15.0), MAX_SPEED);
    let b = both(b, Finger::Middle, (-65.0, 15.0), (-15.0, 65.0), MAX_SPEED);
    let b = mirrored(b, Finger::Ring, (90.0, -90.0), MAX_SPEED);
    let b = mirrored(b, Finger::Thumb, (90.0, -90.0), MAX_SPEED);
    b.build().expect("pose is valid")
}

/// Thumb and fingertips pinched together.
pub fn pinched(settle: Duration) -> Gesture {
    let b = Pose::builder();
    let b = mirrored(b, Finger::Index, (90.0, -90.0), MAX_SPEED);
    let b = mirrored(b, Finger::Middle, (90.0, -90.0), MAX_SPEED);
    let b = mirrored(b, Finger::Ring, (90.0, -90.0), MAX_SPEED);
    let b = both(b, Finger::Thumb, (5.0, -75.0), (75.0, -5.0), MAX_SPEED);
    single_pose("pinched", b.build().expect("pose is valid"), settle)
}

/// The bird.
pub fn middle_finger(settle: Duration) -> Gesture {
    let b = Pose::builder();
    let b = mirrored(b, Finger::Index, (90.0, -90.0), MAX_SPEED);
    let b = mirrored(b, Finger::Middle, (-35.0, 35.0), MAX_SPEED);
    let b = mirrored(b, Finger::Ring, (90.0, -90.0), MAX_SPEED);
    let b = both(b, Finger::Thumb, (5.0, -75.0), (75.0, -5.0), MAX_SPEED);
    single_pose("middle_finger", b.build().expect("pose is valid"), settle)
}

// ════════════════════════════════════════════════════════════════════════════
// Composed gestures
// ════════════════════════════════════════════════════════════════════════════

/// Finger-wag: point, wiggle the index three times, return to open.
pub fn nonono(settle: Duration) -> Gesture {
    let wiggle = Gesture::builder("nonono_wiggle")
        .pose(
            mirrored(Pose::builder(), Finger::Index, (-10.0, 80.0), MAX_SPEED)
                .build()
                .expect("pose is valid"),
            ms(200),
        )
        .pose(
            mirrored(Pose::builder(), Finger::Index, (-80.0, 10.0), MAX_SPEED)
                .build()
                .expect("pose is valid"),
            ms(200),
        )
        .build()
        .expect("gesture has steps");

    Gesture::builder("nonono")
        .pose(pointing_pose(), ms(200))
        .repeat(3, wiggle)
        .pose(
            mirrored(Pose::builder(), Finger::Index, (-35.0, 35.0), MAX_SPEED)
                .build()
                .expect("pose is valid"),
            ms(400) + settle,
        )
        .build()
        .expect("gesture has steps")
}

/// One scissor pose.  Unlike the rest of the library, snips go hand by
/// hand: both right fingers, then both left, so each blade pair moves as
/// a unit.
fn snip_pose(index: (f32, f32), middle: (f32, f32)) -> Pose {
    Pose::builder()
        .finger(Hand::Right, Finger::Index, index.0, index.1, MAX_SPEED)
        .finger(Hand::Right, Finger::Middle, middle.0, middle.1, MAX_SPEED)
        .finger(Hand::Left, Finger::Index, -index.1, -index.0, MAX_SPEED)
        .finger(Hand::Left, Finger::Middle, -middle.1, -middle.0, MAX_SPEED)
        .build()
        .expect("pose is valid")
}

/// V sign snipping open and shut three times.
pub fn scissors(settle: Duration) -> Gesture {
    let snip_shut = snip_pose((-50.0, 20.0), (-20.0, 50.0));
    let snip_open = snip_pose((-15.0, 65.0), (-65.0, 15.0));

    let snip = Gesture::builder("scissors_snip")
        .pose(snip_shut.clone(), ms(200))
        .pose(snip_open.clone(), ms(200))
        .build()
        .expect("gesture has steps");

    // The last snip round is spelled out so the settle can ride on its
    // final pose.
    Gesture::builder("scissors")
        .pose(victory_pose(), ms(200))
        .repeat(2, snip)
        .pose(snip_shut, ms(200))
        .pose(snip_open, ms(200) + settle)
        .build()
        .expect("gesture has steps")
}

// ════════════════════════════════════════════════════════════════════════════
// The demo program
// ════════════════════════════════════════════════════════════════════════════

/// The reference demo routine: the full gesture set in its original order
/// and timing.
pub fn demo_program() -> Program {
    Program::new(vec![
        open_hand(ms(500)),
        close_hand(ms(4000)),
        open_progressive(ms(500)),
        spread(ms(600)),
        clench(ms(600)),
        open_hand(ms(200)),
        index_pointing(ms(400)),
        nonono(ms(500)),
        open_hand(ms(300)),
        perfect(ms(800)),
        open_hand(ms(400)),
        victory(ms(500)),
        scissors(ms(500)),
        open_hand(ms(400)),
        pinched(ms(1500)),
        middle_finger(ms(800)),
    ])
    .expect("demo program is non-empty")
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use hand_pose::{AddressTable, CalibrationProfile, Slot};

    #[test]
    fn open_hand_commands_all_sixteen_joints_thumb_last() {
        let g = open_hand(ms(0));
        let steps: Vec<_> = g
            .sequence(&AddressTable::amazing_hand(), &CalibrationProfile::demo())
            .map(|s| s.unwrap())
            .collect();
        assert_eq!(steps.len(), 1);
        let commands = &steps[0].commands;
        assert_eq!(commands.len(), 16);
        assert_eq!(commands[0].joint.finger, Finger::Index);
        assert_eq!(commands[15].joint.finger, Finger::Thumb);
        assert_eq!(commands[15].joint.hand, Hand::Left);
        assert_eq!(commands[15].joint.slot, Slot::Distal);
    }

    #[test]
    fn close_hand_boosts_thumb_speed() {
        let g = close_hand(ms(0));
        let steps: Vec<_> = g
            .sequence(&AddressTable::amazing_hand(), &CalibrationProfile::demo())
            .map(|s| s.unwrap())
            .collect();
        let commands = &steps[0].commands;
        for c in commands {
            let expected = if c.joint.finger == Finger::Thumb {
                CLOSE_SPEED + THUMB_BOOST
            } else {
                CLOSE_SPEED
            };
            assert_eq!(c.speed, expected, "joint {}", c.joint);
        }
    }

    #[test]
    fn nonono_flattens_to_eight_pose_steps() {
        assert_eq!(nonono(ms(500)).pose_steps(), 1 + 6 + 1);
    }

    #[test]
    fn scissors_flattens_to_seven_pose_steps() {
        assert_eq!(scissors(ms(500)).pose_steps(), 1 + 6);
    }

    #[test]
    fn scissors_snips_command_right_hand_before_left() {
        let g = scissors(ms(0));
        let steps: Vec<_> = g
            .sequence(&AddressTable::amazing_hand(), &CalibrationProfile::demo())
            .map(|s| s.unwrap())
            .collect();
        // Step 0 is the V sign; step 1 is the first snip.
        let order: Vec<_> = steps[1]
            .commands
            .iter()
            .map(|c| (c.joint.hand, c.joint.finger))
            .collect();
        assert_eq!(
            order,
            vec![
                (Hand::Right, Finger::Index),
                (Hand::Right, Finger::Index),
                (Hand::Right, Finger::Middle),
                (Hand::Right, Finger::Middle),
                (Hand::Left, Finger::Index),
                (Hand::Left, Finger::Index),
                (Hand::Left, Finger::Middle),
                (Hand::Left, Finger::Middle),
            ]
        );
    }

    #[test]
    fn open_progressive_staggers_finger_holds() {
        let g = open_progressive(ms(500));
        let steps: Vec<_> = g
            .sequence(&AddressTable::amazing_hand(), &CalibrationProfile::demo())
            .map(|s| s.unwrap())
            .collect();
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[0].hold, ms(200));
        assert_eq!(steps[2].hold, ms(200));
        assert_eq!(steps[3].hold, ms(500));
    }

    #[test]
    fn demo_program_resolves_against_stock_hardware() {
        let program = demo_program();
        assert_eq!(program.len(), 16);
        assert!(program
            .validate(&AddressTable::amazing_hand(), &CalibrationProfile::demo())
            .is_ok());
    }
}
