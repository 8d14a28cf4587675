//! Joint identity and the joint → servo address table.
//!
//! A joint is one rotational degree of freedom of one finger, identified by
//! `(hand, finger, slot)`.  The [`AddressTable`] maps each joint to the
//! physical bus ID of its servo.  It is built once from configuration data
//! and never mutated afterwards.

use std::fmt;

use crate::error::PoseError;

// ════════════════════════════════════════════════════════════════════════════
// Hand / Finger / Slot
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    pub const ALL: [Hand; 2] = [Hand::Right, Hand::Left];

    pub fn name(self) -> &'static str {
        match self {
            Hand::Left => "left",
            Hand::Right => "right",
        }
    }

    fn index(self) -> usize {
        match self {
            Hand::Right => 0,
            Hand::Left => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Finger {
    Index,
    Middle,
    Ring,
    Thumb,
}

impl Finger {
    /// Canonical finger order.  Thumb is deliberately last: during closing
    /// gestures the thumb command must be issued after the index so it can
    /// clear it.
    pub const ALL: [Finger; 4] = [Finger::Index, Finger::Middle, Finger::Ring, Finger::Thumb];

    pub fn name(self) -> &'static str {
        match self {
            Finger::Index => "index",
            Finger::Middle => "middle",
            Finger::Ring => "ring",
            Finger::Thumb => "thumb",
        }
    }

    fn index(self) -> usize {
        match self {
            Finger::Index => 0,
            Finger::Middle => 1,
            Finger::Ring => 2,
            Finger::Thumb => 3,
        }
    }
}

/// Which of a finger's two servos a joint refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    Proximal,
    Distal,
}

impl Slot {
    pub const ALL: [Slot; 2] = [Slot::Proximal, Slot::Distal];

    pub fn name(self) -> &'static str {
        match self {
            Slot::Proximal => "proximal",
            Slot::Distal => "distal",
        }
    }

    fn index(self) -> usize {
        match self {
            Slot::Proximal => 0,
            Slot::Distal => 1,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// JointId
// ════════════════════════════════════════════════════════════════════════════

/// Identity of one joint: `(hand, finger, slot)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct JointId {
    pub hand: Hand,
    pub finger: Finger,
    pub slot: Slot,
}

/// Joints per hand.
pub const JOINTS_PER_HAND: usize = 8;

impl JointId {
    pub const fn new(hand: Hand, finger: Finger, slot: Slot) -> Self {
        JointId { hand, finger, slot }
    }

    /// Position of this joint in the canonical per-hand order:
    /// index, middle, ring, thumb — proximal before distal (0–7).
    pub fn canonical_index(self) -> usize {
        self.finger.index() * 2 + self.slot.index()
    }

    /// All eight joints of one hand, in canonical order.
    pub fn hand_joints(hand: Hand) -> [JointId; JOINTS_PER_HAND] {
        let mut out = [JointId::new(hand, Finger::Index, Slot::Proximal); JOINTS_PER_HAND];
        let mut i = 0;
        for finger in Finger::ALL {
            for slot in Slot::ALL {
                out[i] = JointId::new(hand, finger, slot);
                i += 1;
            }
        }
        out
    }
}

impl fmt::Display for JointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.hand.name(), self.finger.name(), self.slot.name())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ServoId
// ════════════════════════════════════════════════════════════════════════════

/// Physical bus ID of one servo.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServoId(pub u8);

impl fmt::Display for ServoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// AddressTable
// ════════════════════════════════════════════════════════════════════════════

/// Stock layout: right hand on bus IDs 1–8, in canonical joint order.
const RIGHT_SERVOS: [u8; JOINTS_PER_HAND] = [1, 2, 3, 4, 5, 6, 7, 8];
/// Stock layout: left hand on bus IDs 11–18.
const LEFT_SERVOS: [u8; JOINTS_PER_HAND] = [11, 12, 13, 14, 15, 16, 17, 18];

/// Immutable map from [`JointId`] to [`ServoId`], built once at startup.
pub struct AddressTable {
    // [hand][canonical joint index]
    slots: [[Option<ServoId>; JOINTS_PER_HAND]; 2],
}

impl AddressTable {
    /// Build a table from explicit `(joint, servo)` pairs.
    ///
    /// Fails if a joint is registered twice or a servo ID is assigned to
    /// more than one joint — both are configuration mistakes that must
    /// abort startup before any motion.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (JointId, ServoId)>,
    ) -> Result<Self, PoseError> {
        let mut slots = [[None; JOINTS_PER_HAND]; 2];
        let mut seen: Vec<ServoId> = Vec::new();

        for (joint, servo) in entries {
            let cell = &mut slots[joint.hand.index()][joint.canonical_index()];
            if cell.is_some() {
                return Err(PoseError::DuplicateJoint(joint));
            }
            if seen.contains(&servo) {
                return Err(PoseError::ServoReused(servo));
            }
            seen.push(servo);
            *cell = Some(servo);
        }

        Ok(AddressTable { slots })
    }

    /// The stock AmazingHand layout: right hand 1–8, left hand 11–18.
    pub fn amazing_hand() -> Self {
        let mut entries = Vec::with_capacity(2 * JOINTS_PER_HAND);
        for (hand, ids) in [(Hand::Right, RIGHT_SERVOS), (Hand::Left, LEFT_SERVOS)] {
            for (i, joint) in JointId::hand_joints(hand).into_iter().enumerate() {
                entries.push((joint, ServoId(ids[i])));
            }
        }
        AddressTable::from_entries(entries).expect("stock layout is well-formed")
    }

    /// Resolve a joint to its servo bus ID.
    pub fn resolve(&self, joint: JointId) -> Result<ServoId, PoseError> {
        self.slots[joint.hand.index()][joint.canonical_index()]
            .ok_or(PoseError::UnknownJoint(joint))
    }

    /// All registered servo IDs, right hand first, in canonical joint order.
    pub fn servo_ids(&self) -> impl Iterator<Item = ServoId> + '_ {
        self.slots.iter().flatten().filter_map(|s| *s)
    }

    /// Number of registered joints.
    pub fn len(&self) -> usize {
        self.servo_ids().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_index_spans_zero_to_seven() {
        assert_eq!(JointId::new(Hand::Right, Finger::Index, Slot::Proximal).canonical_index(), 0);
        assert_eq!(JointId::new(Hand::Right, Finger::Index, Slot::Distal).canonical_index(), 1);
        assert_eq!(JointId::new(Hand::Left, Finger::Ring, Slot::Proximal).canonical_index(), 4);
        assert_eq!(JointId::new(Hand::Left, Finger::Thumb, Slot::Distal).canonical_index(), 7);
    }

    #[test]
    fn hand_joints_order_is_thumb_last() {
        let joints = JointId::hand_joints(Hand::Right);
        assert_eq!(joints[0].finger, Finger::Index);
        assert_eq!(joints[0].slot, Slot::Proximal);
        assert_eq!(joints[6].finger, Finger::Thumb);
        assert_eq!(joints[7].slot, Slot::Distal);
    }

    #[test]
    fn stock_layout_right_hand_ids() {
        let table = AddressTable::amazing_hand();
        let j = JointId::new(Hand::Right, Finger::Index, Slot::Proximal);
        assert_eq!(table.resolve(j).unwrap(), ServoId(1));
        let j = JointId::new(Hand::Right, Finger::Thumb, Slot::Distal);
        assert_eq!(table.resolve(j).unwrap(), ServoId(8));
    }

    #[test]
    fn stock_layout_left_hand_ids() {
        let table = AddressTable::amazing_hand();
        let j = JointId::new(Hand::Left, Finger::Index, Slot::Proximal);
        assert_eq!(table.resolve(j).unwrap(), ServoId(11));
        let j = JointId::new(Hand::Left, Finger::Thumb, Slot::Distal);
        assert_eq!(table.resolve(j).unwrap(), ServoId(18));
    }

    #[test]
    fn unregistered_joint_is_an_error() {
        // Only one joint registered.
        let j = JointId::new(Hand::Right, Finger::Index, Slot::Proximal);
        let table = AddressTable::from_entries([(j, ServoId(1))]).unwrap();

        let missing = JointId::new(Hand::Left, Finger::Thumb, Slot::Distal);
        match table.resolve(missing) {
            Err(PoseError::UnknownJoint(joint)) => assert_eq!(joint, missing),
            other => panic!("expected UnknownJoint, got {:?}", other),
        }
    }

    #[test]
    fn duplicate_joint_rejected() {
        let j = JointId::new(Hand::Right, Finger::Index, Slot::Proximal);
        let result = AddressTable::from_entries([(j, ServoId(1)), (j, ServoId(2))]);
        assert!(matches!(result, Err(PoseError::DuplicateJoint(_))));
    }

    #[test]
    fn reused_servo_id_rejected() {
        let a = JointId::new(Hand::Right, Finger::Index, Slot::Proximal);
        let b = JointId::new(Hand::Right, Finger::Index, Slot::Distal);
        let result = AddressTable::from_entries([(a, ServoId(1)), (b, ServoId(1))]);
        assert!(matches!(result, Err(PoseError::ServoReused(ServoId(1)))));
    }

    #[test]
    fn servo_ids_cover_both_hands() {
        let table = AddressTable::amazing_hand();
        let ids: Vec<u8> = table.servo_ids().map(|s| s.0).collect();
        assert_eq!(ids.len(), 16);
        assert_eq!(&ids[..8], &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(&ids[8..], &[11, 12, 13, 14, 15, 16, 17, 18]);
    }

    #[test]
    fn joint_display_reads_naturally() {
        let j = JointId::new(Hand::Left, Finger::Middle, Slot::Distal);
        assert_eq!(j.to_string(), "left middle distal");
    }
}
