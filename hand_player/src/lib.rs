//! # hand_player
//!
//! Playback of [`hand_gesture::Program`]s on a two-handed gripper.
//!
//! The [`playback::Playback`] loop cycles a program's gestures forever,
//! issuing each resolved step through a [`hand_pose::ServoChannel`] and
//! sleeping the step's hold duration, until an external stop flag is
//! observed (at step boundaries only — a pose is never abandoned
//! mid-issue) or a channel error faults the loop.
//!
//! ## State machine
//!
//! `Idle -> Running -> (Idle | Faulted)` — `Faulted` is terminal for the
//! loop instance; recovery means re-initializing the hardware (torque
//! re-enable, re-homing) and building a fresh loop.
//!
//! ## Feature flags
//!
//! * (default) — **Dry-run mode**: every write is printed, none reaches
//!   hardware.
//! * `scs` — **Hardware mode**: drives the SCS0009 bus over a serial port
//!   via `rustypot`.

pub mod channels;
pub mod config;
pub mod library;
pub mod playback;
pub mod player;

#[cfg(feature = "scs")]
pub mod scs;

pub use channels::DryRunChannel;
pub use playback::{LoopState, Playback, PlaybackError, StepEvent, StopFlag};
pub use player::Player;
