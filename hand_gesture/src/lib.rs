//! # hand_gesture
//!
//! Gestures as data: named, timed sequences of [`hand_pose::Pose`] steps,
//! composable from sub-gestures and repetition, sequenced lazily into
//! resolved servo command batches.
//!
//! A gesture step is one of:
//!
//! | Step | Meaning |
//! |---|---|
//! | pose + hold | issue the pose, then wait `hold` |
//! | sub-gesture | inline another gesture's steps, keeping its delays |
//! | repeat(n, g) | inline `g`'s steps n times (n = 0 emits nothing) |
//!
//! [`Gesture::sequence`] flattens this depth-first into an iterator of
//! [`ResolvedStep`]s — "commands to issue now, then wait" — restartable
//! and free of side effects, so the same gesture can be replayed or
//! inspected without touching hardware.

pub mod gesture;
pub mod program;
pub mod sequence;

pub use gesture::{Gesture, GestureBuilder, GestureError, Step};
pub use program::Program;
pub use sequence::{ResolvedStep, Sequence};
