//! SCS0009 serial-bus backend (feature = "scs").
//!
//! Thin adapter from [`ServoChannel`] to the `rustypot` controller over a
//! `serialport` handle.  The micro-delay between consecutive writes that
//! lets the half-duplex transport settle lives here, as a channel
//! concern — the sequencer never knows about it.

use std::thread;
use std::time::Duration;

use rustypot::device::scs0009;
use rustypot::DynamixelSerialIO;

use hand_pose::{ChannelError, ServoChannel, ServoId, TorqueMode};

/// Settle gap between consecutive bus writes.
const WRITE_SETTLE: Duration = Duration::from_micros(200);

/// Default read timeout for bus replies.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(50);

pub const DEFAULT_BAUD: u32 = 1_000_000;

/// Real hardware channel: SCS0009 servos on a half-duplex serial bus.
pub struct ScsChannel {
    io: DynamixelSerialIO,
    port: Box<dyn serialport::SerialPort>,
}

impl ScsChannel {
    /// Open the bus on `port_name` (e.g. `/dev/ttyUSB0`, `COM5`).
    pub fn open(port_name: &str, baud: u32, timeout: Duration) -> Result<Self, ChannelError> {
        let port = serialport::new(port_name, baud)
            .timeout(timeout)
            .open()
            .map_err(|e| ChannelError::Open(format!("{}: {}", port_name, e)))?;
        Ok(ScsChannel { io: DynamixelSerialIO::feetech(), port })
    }

    fn settle(&self) {
        thread::sleep(WRITE_SETTLE);
    }
}

// Register values per the vendor controller: 1 = on, 2 = off, 3 = free.
fn torque_value(mode: TorqueMode) -> u8 {
    match mode {
        TorqueMode::On => 1,
        TorqueMode::Off => 2,
        TorqueMode::Free => 3,
    }
}

impl ServoChannel for ScsChannel {
    fn set_speed(&mut self, servo: ServoId, speed: f32) -> Result<(), ChannelError> {
        scs0009::write_goal_speed(&self.io, self.port.as_mut(), servo.0, speed as f64)
            .map_err(|e| ChannelError::Write { servo, reason: e.to_string() })?;
        self.settle();
        Ok(())
    }

    fn set_position(&mut self, servo: ServoId, radians: f32) -> Result<(), ChannelError> {
        scs0009::write_goal_position(&self.io, self.port.as_mut(), servo.0, radians as f64)
            .map_err(|e| ChannelError::Write { servo, reason: e.to_string() })?;
        self.settle();
        Ok(())
    }

    fn enable_torque(&mut self, servo: ServoId, mode: TorqueMode) -> Result<(), ChannelError> {
        scs0009::write_torque_enable(&self.io, self.port.as_mut(), servo.0, torque_value(mode))
            .map_err(|e| ChannelError::Write { servo, reason: e.to_string() })?;
        self.settle();
        Ok(())
    }
}
