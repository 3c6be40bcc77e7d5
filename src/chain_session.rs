//! Control session of a single kinematic chain.

use tracing::{info, warn};
use crate::chain_traits::{ChainDriver, ChainError, InteractionMode, JointControlMode, Pid};
use crate::utils::{degrees_to_radians, radians_to_degrees};

/// Control type of the whole chain. All joints of the chain are controlled the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMode {
    Idle,
    /// Position control with trajectory interpolation
    Position,
    /// Position set points without interpolation
    PositionDirect,
    Torque,
    /// Compliant position direct control with joint stiffness and damping
    Impedance,
}

impl ControlMode {
    /// Settings the joint controllers need for this mode. Interaction mode is None
    /// if the mode does not care.
    pub fn hardware_setting(self) -> (JointControlMode, Option<InteractionMode>) {
        match self {
            ControlMode::Idle => (JointControlMode::Idle, None),
            ControlMode::Position => (JointControlMode::Position, Some(InteractionMode::Stiff)),
            ControlMode::PositionDirect => (JointControlMode::PositionDirect, Some(InteractionMode::Stiff)),
            ControlMode::Torque => (JointControlMode::Torque, None),
            ControlMode::Impedance => (JointControlMode::PositionDirect, Some(InteractionMode::Compliant)),
        }
    }

    /// Interpret what the joint controller reports. Torque control ignores the interaction
    /// mode; any other mode with compliant interaction is impedance control.
    pub fn from_hardware(control: JointControlMode, interaction: InteractionMode) -> Option<Self> {
        if control == JointControlMode::Torque {
            return Some(ControlMode::Torque);
        }
        if interaction == InteractionMode::Compliant {
            return Some(ControlMode::Impedance);
        }
        match control {
            JointControlMode::Idle => Some(ControlMode::Idle),
            JointControlMode::Position => Some(ControlMode::Position),
            JointControlMode::PositionDirect => Some(ControlMode::PositionDirect),
            JointControlMode::Torque => Some(ControlMode::Torque),
            JointControlMode::Other => None,
        }
    }
}

/// Session over one kinematic chain of the robot. It owns the driver and remembers the
/// control mode it has set, which decides how `move_to` commands are sent.
///
/// If `use_si` is set, positions are in radians and velocities in radians per second,
/// otherwise in degrees as the hardware uses them. Torques are always in Nm.
pub struct ChainSession<D: ChainDriver> {
    name: String,
    driver: D,
    use_si: bool,
    mode: ControlMode,
    joints: usize,
}

impl<D: ChainDriver> ChainSession<D> {
    /// Open the session. If the initial mode is given, it is applied to all joints,
    /// otherwise the mode currently reported by the hardware is adopted.
    pub fn new(
        name: &str,
        driver: D,
        use_si: bool,
        initial_mode: Option<ControlMode>,
    ) -> Result<Self, ChainError> {
        let joints = driver.axes();
        if joints == 0 {
            return Err(ChainError::DriverError(format!("Chain {} has no joints", name)));
        }
        let mut session = ChainSession {
            name: name.to_string(),
            driver,
            use_si,
            mode: ControlMode::Idle,
            joints,
        };

        match initial_mode {
            Some(mode) => {
                info!("Initializing {} with {:?}", session.name, mode);
                session.set_mode(mode)?;
            }
            None => {
                session.mode = session.hardware_mode()?.ok_or_else(|| {
                    ChainError::DriverError(format!("{} reports unknown control mode", session.name))
                })?;
            }
        }
        Ok(session)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn joints(&self) -> usize {
        self.joints
    }

    pub fn use_si(&self) -> bool {
        self.use_si
    }

    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    pub fn is_in(&self, mode: ControlMode) -> bool {
        self.mode == mode
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Direct access to the driver. Changing control modes through it makes the next
    /// `move_to` panic.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Switch all joints of the chain to the given mode. The mode of the session only
    /// changes if all joints accepted it.
    pub fn set_mode(&mut self, mode: ControlMode) -> Result<(), ChainError> {
        let (control, interaction) = mode.hardware_setting();
        let result: Result<(), ChainError> = (0..self.joints).try_for_each(|joint| {
            self.driver.set_control_mode(joint, control)?;
            if let Some(interaction) = interaction {
                self.driver.set_interaction_mode(joint, interaction)?;
            }
            Ok(())
        });

        match result {
            Ok(()) => {
                self.mode = mode;
                info!("Setting {} to {:?} mode", self.name, mode);
                Ok(())
            }
            Err(err) => {
                warn!("Failed to set {} to {:?} mode: {}", self.name, mode, err);
                Err(err)
            }
        }
    }

    /// Mode as reported by the first joint of the chain.
    pub fn hardware_mode(&self) -> Result<Option<ControlMode>, ChainError> {
        let control = self.driver.control_mode(0)?;
        let interaction = self.driver.interaction_mode(0)?;
        Ok(ControlMode::from_hardware(control, interaction))
    }

    /// Joint positions, radians if SI units are used, degrees otherwise.
    pub fn sense_position(&self) -> Result<Vec<f64>, ChainError> {
        let q = self.driver.encoders()?;
        Ok(self.from_hardware_units(q))
    }

    /// Joint velocities, radians/s if SI units are used, degrees/s otherwise.
    pub fn sense_velocity(&self) -> Result<Vec<f64>, ChainError> {
        let qdot = self.driver.encoder_speeds()?;
        Ok(self.from_hardware_units(qdot))
    }

    /// Joint torques in Nm
    pub fn sense_torque(&self) -> Result<Vec<f64>, ChainError> {
        self.driver.torques()
    }

    /// Send the command to all joints of the chain. Positions for position, position
    /// direct and impedance modes, torques for torque mode. Nothing can be sent in idle
    /// mode.
    ///
    /// # Panics
    /// If the hardware reports a different control mode than this session has set.
    pub fn move_to(&mut self, command: &[f64]) -> Result<(), ChainError> {
        self.check_length(command.len())?;
        let reported = self.hardware_mode()?;
        assert_eq!(
            reported, Some(self.mode),
            "Chain {} is in {:?} mode on hardware but {:?} in session", self.name, reported, self.mode
        );

        match self.mode {
            ControlMode::PositionDirect | ControlMode::Impedance => {
                let targets = self.to_hardware_units(command);
                self.driver.set_positions(&targets)
            }
            ControlMode::Position => {
                let targets = self.to_hardware_units(command);
                self.driver.position_move(&targets)
            }
            ControlMode::Torque => self.driver.set_reference_torques(command),
            ControlMode::Idle => Err(self.wrong_mode("move")),
        }
    }

    /// Maximal speed for every joint when moving in position mode.
    pub fn set_reference_speeds(&mut self, speeds: &[f64]) -> Result<(), ChainError> {
        self.check_length(speeds.len())?;
        if self.mode != ControlMode::Position {
            return Err(self.wrong_mode("set reference speed"));
        }
        let speeds = self.to_hardware_units(speeds);
        for (joint, speed) in speeds.iter().enumerate() {
            self.driver.set_reference_speed(joint, *speed)?;
        }
        Ok(())
    }

    /// Same maximal speed for all joints when moving in position mode.
    pub fn set_reference_speed(&mut self, speed: f64) -> Result<(), ChainError> {
        let speeds = vec![speed; self.joints];
        self.set_reference_speeds(&speeds)
    }

    /// Stiffness and damping for every joint (impedance mode only). With SI units the
    /// gains are scaled by 180/PI before they are sent, the same way joint commands are.
    pub fn set_impedance(&mut self, stiffness: &[f64], damping: &[f64]) -> Result<(), ChainError> {
        self.check_length(stiffness.len())?;
        self.check_length(damping.len())?;
        if self.mode != ControlMode::Impedance {
            return Err(self.wrong_mode("set impedance"));
        }
        for joint in 0..self.joints {
            let (k, d) = if self.use_si {
                (stiffness[joint].to_degrees(), damping[joint].to_degrees())
            } else {
                (stiffness[joint], damping[joint])
            };
            self.driver.set_impedance(joint, k, d)?;
        }
        Ok(())
    }

    /// Stiffness and damping of all joints (impedance mode only), units as in `set_impedance`.
    pub fn impedance(&self) -> Result<(Vec<f64>, Vec<f64>), ChainError> {
        if self.mode != ControlMode::Impedance {
            return Err(self.wrong_mode("read impedance"));
        }
        let mut stiffness = Vec::with_capacity(self.joints);
        let mut damping = Vec::with_capacity(self.joints);
        for joint in 0..self.joints {
            let (k, d) = self.driver.impedance(joint)?;
            if self.use_si {
                stiffness.push(k.to_radians());
                damping.push(d.to_radians());
            } else {
                stiffness.push(k);
                damping.push(d);
            }
        }
        Ok((stiffness, damping))
    }

    pub fn pid_gains(&self) -> Result<Vec<Pid>, ChainError> {
        (0..self.joints).map(|joint| self.driver.pid(joint)).collect()
    }

    pub fn set_pid_gain(&mut self, joint: usize, pid: &Pid) -> Result<(), ChainError> {
        self.check_joint(joint)?;
        self.driver.set_pid(joint, pid)
    }

    pub fn set_pid_gains(&mut self, pids: &[Pid]) -> Result<(), ChainError> {
        self.check_length(pids.len())?;
        for (joint, pid) in pids.iter().enumerate() {
            self.driver.set_pid(joint, pid)?;
        }
        Ok(())
    }

    /// Controller output of every joint, mV
    pub fn voltage(&self) -> Result<Vec<f64>, ChainError> {
        (0..self.joints).map(|joint| self.driver.output(joint)).collect()
    }

    pub fn set_voltage(&mut self, voltage: &[f64]) -> Result<(), ChainError> {
        self.check_length(voltage.len())?;
        for (joint, v) in voltage.iter().enumerate() {
            self.driver.set_offset(joint, *v)?;
        }
        Ok(())
    }

    pub fn set_joint_voltage(&mut self, joint: usize, voltage: f64) -> Result<(), ChainError> {
        self.check_joint(joint)?;
        self.driver.set_offset(joint, voltage)
    }

    fn check_length(&self, found: usize) -> Result<(), ChainError> {
        if found != self.joints {
            return Err(ChainError::InvalidLength { expected: self.joints, found });
        }
        Ok(())
    }

    fn check_joint(&self, joint: usize) -> Result<(), ChainError> {
        if joint >= self.joints {
            return Err(ChainError::InvalidJoint(joint));
        }
        Ok(())
    }

    fn wrong_mode(&self, operation: &str) -> ChainError {
        warn!("Cannot {} on {} in {:?} mode", operation, self.name, self.mode);
        ChainError::WrongMode {
            chain: self.name.clone(),
            operation: operation.to_string(),
        }
    }

    fn to_hardware_units(&self, values: &[f64]) -> Vec<f64> {
        if self.use_si {
            radians_to_degrees(values)
        } else {
            values.to_vec()
        }
    }

    fn from_hardware_units(&self, values: Vec<f64>) -> Vec<f64> {
        if self.use_si {
            degrees_to_radians(&values)
        } else {
            values
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_mapping_round_trip() {
        for mode in [ControlMode::Idle, ControlMode::Position, ControlMode::PositionDirect,
            ControlMode::Torque, ControlMode::Impedance] {
            let (control, interaction) = mode.hardware_setting();
            let reported = ControlMode::from_hardware(
                control, interaction.unwrap_or(InteractionMode::Stiff));
            assert_eq!(reported, Some(mode));
        }
    }

    #[test]
    fn test_torque_ignores_interaction() {
        assert_eq!(
            ControlMode::from_hardware(JointControlMode::Torque, InteractionMode::Compliant),
            Some(ControlMode::Torque));
        assert_eq!(
            ControlMode::from_hardware(JointControlMode::Other, InteractionMode::Stiff), None);
    }
}
