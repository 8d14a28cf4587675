//! # hand_pose
//!
//! Joint addressing, calibration, and pose resolution for a two-handed
//! serial-bus servo gripper (16 SCS0009 servos, 8 per hand).
//!
//! A [`Pose`] names target angle deltas and a speed for a set of joints.
//! Resolving it through an [`AddressTable`] and a [`CalibrationProfile`]
//! yields per-servo `(position, speed)` commands ready for a
//! [`ServoChannel`] — the abstract boundary behind which the real bus
//! transport lives.
//!
//! ## Servo layout
//!
//! Joints are identified by `(hand, finger, slot)`.  The stock layout maps
//! them to bus IDs as data, not logic:
//!
//! | Finger | Right (prox, dist) | Left (prox, dist) |
//! |---|---|---|
//! | Index  | 1, 2 | 11, 12 |
//! | Middle | 3, 4 | 13, 14 |
//! | Ring   | 5, 6 | 15, 16 |
//! | Thumb  | 7, 8 | 17, 18 |

pub mod calib;
pub mod channel;
pub mod error;
pub mod joint;
pub mod pose;

pub use calib::CalibrationProfile;
pub use channel::{issue, ChannelError, ServoChannel, TorqueMode};
pub use error::PoseError;
pub use joint::{AddressTable, Finger, Hand, JointId, ServoId, Slot};
pub use pose::{Pose, PoseBuilder, PoseEntry, ResolvedCommand, SPEED_MAX};
