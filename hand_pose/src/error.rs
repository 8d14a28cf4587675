//! Configuration and pose-validation errors.
//!
//! All of these are fatal at startup: a program whose poses cannot be
//! resolved must fail fast, before any motion is commanded.

use crate::joint::{JointId, ServoId};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PoseError {
    /// The joint is not registered in the address table.
    #[error("joint `{0}` is not registered in the address table")]
    UnknownJoint(JointId),

    /// The same joint appears twice in a pose or address table.
    #[error("joint `{0}` registered more than once")]
    DuplicateJoint(JointId),

    /// One servo ID assigned to two different joints.
    #[error("servo ID {0} assigned to more than one joint")]
    ServoReused(ServoId),

    /// Speed outside the controller's accepted range (see
    /// [`crate::pose::SPEED_MAX`]).
    #[error("speed {speed} for joint `{joint}` is outside the accepted range")]
    SpeedOutOfRange { joint: JointId, speed: f32 },

    /// A pose with no joints commands nothing and is almost certainly a
    /// scripting mistake.
    #[error("pose has no joints")]
    EmptyPose,
}
