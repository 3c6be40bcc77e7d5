//! Hardware abstraction of a kinematic chain (arm, leg, torso) as seen by `ChainSession`.

/// Control mode as understood by the joint controller of the hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JointControlMode {
    Idle,
    /// Position control with trajectory generation
    Position,
    /// Position control streaming set points directly
    PositionDirect,
    Torque,
    /// Any other mode the hardware may report (velocity, current, fault)
    Other,
}

/// How stiff the joint position control is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionMode {
    Stiff,
    Compliant,
}

/// PID gains of a joint controller.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pid {
    pub kp: f64,
    pub kd: f64,
    pub ki: f64,
    pub max_int: f64,
    pub scale: f64,
    pub max_output: f64,
    pub offset: f64,
}

/// Error reported by chain operations.
#[derive(Debug, Clone, PartialEq)]
pub enum ChainError {
    /// The hardware rejected or failed the request
    DriverError(String),
    /// The operation is not possible in the current control mode
    WrongMode { chain: String, operation: String },
    InvalidLength { expected: usize, found: usize },
    /// Joint index outside the chain
    InvalidJoint(usize),
}

impl std::fmt::Display for ChainError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            ChainError::DriverError(ref msg) =>
                write!(f, "Driver Error: {}", msg),
            ChainError::WrongMode { ref chain, ref operation } =>
                write!(f, "Cannot {} on chain {} in its current control mode", operation, chain),
            ChainError::InvalidLength { expected, found } =>
                write!(f, "Invalid Length: expected {}, found {}", expected, found),
            ChainError::InvalidJoint(joint) =>
                write!(f, "Invalid Joint: {}", joint),
        }
    }
}

impl std::error::Error for ChainError {}

/// Device driver of one kinematic chain. Positions are in degrees, velocities in degrees
/// per second, torques in Nm, as the hardware uses them. All joint-indexed calls use
/// indices inside the chain.
pub trait ChainDriver {
    /// Number of joints (axes) in the chain
    fn axes(&self) -> usize;

    fn encoders(&self) -> Result<Vec<f64>, ChainError>;
    fn encoder_speeds(&self) -> Result<Vec<f64>, ChainError>;
    fn torques(&self) -> Result<Vec<f64>, ChainError>;

    fn control_mode(&self, joint: usize) -> Result<JointControlMode, ChainError>;
    fn set_control_mode(&mut self, joint: usize, mode: JointControlMode) -> Result<(), ChainError>;
    fn interaction_mode(&self, joint: usize) -> Result<InteractionMode, ChainError>;
    fn set_interaction_mode(&mut self, joint: usize, mode: InteractionMode) -> Result<(), ChainError>;

    /// Move with trajectory generation (position mode)
    fn position_move(&mut self, targets: &[f64]) -> Result<(), ChainError>;
    /// Stream set points directly (position direct and impedance modes)
    fn set_positions(&mut self, targets: &[f64]) -> Result<(), ChainError>;
    fn set_reference_torques(&mut self, torques: &[f64]) -> Result<(), ChainError>;
    fn set_reference_speed(&mut self, joint: usize, speed: f64) -> Result<(), ChainError>;

    fn impedance(&self, joint: usize) -> Result<(f64, f64), ChainError>;
    fn set_impedance(&mut self, joint: usize, stiffness: f64, damping: f64) -> Result<(), ChainError>;

    fn pid(&self, joint: usize) -> Result<Pid, ChainError>;
    fn set_pid(&mut self, joint: usize, pid: &Pid) -> Result<(), ChainError>;
    /// Current PID output (voltage, mV)
    fn output(&self, joint: usize) -> Result<f64, ChainError>;
    /// PID offset (voltage, mV)
    fn set_offset(&mut self, joint: usize, offset: f64) -> Result<(), ChainError>;
}
