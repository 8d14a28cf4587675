//! Channel backends that need no hardware.

use hand_pose::{ChannelError, ServoChannel, ServoId, TorqueMode};

/// Prints every write instead of touching a bus.  Default mode of the
/// launcher, and handy for inspecting what a program would command.
#[derive(Debug, Default)]
pub struct DryRunChannel {
    writes: usize,
}

impl DryRunChannel {
    pub fn new() -> Self {
        DryRunChannel::default()
    }

    /// Total speed/position writes issued so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ServoChannel for DryRunChannel {
    fn set_speed(&mut self, servo: ServoId, speed: f32) -> Result<(), ChannelError> {
        self.writes += 1;
        println!("[dry] servo {:>2}  speed    {:>6.1}", servo, speed);
        Ok(())
    }

    fn set_position(&mut self, servo: ServoId, radians: f32) -> Result<(), ChannelError> {
        self.writes += 1;
        println!("[dry] servo {:>2}  position {:>6.3} rad", servo, radians);
        Ok(())
    }

    fn enable_torque(&mut self, servo: ServoId, mode: TorqueMode) -> Result<(), ChannelError> {
        println!("[dry] servo {:>2}  torque   {:?}", servo, mode);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dry_run_counts_writes() {
        let mut ch = DryRunChannel::new();
        ch.set_speed(ServoId(1), 7.0).unwrap();
        ch.set_position(ServoId(1), 0.5).unwrap();
        ch.enable_torque(ServoId(1), TorqueMode::On).unwrap();
        assert_eq!(ch.writes(), 2);
    }
}
