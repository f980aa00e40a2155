pub mod sim;

use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use tracing::{info, trace};

use crate::math::Bounds;
use crate::motion::{Setpoint, SplineProfile, Trajectory};
use crate::CONTROL_PERIOD;

/// Open-loop command for a differential drivetrain, both axes normalized
/// into [-1, 1].
#[derive(Deserialize, Serialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct DriveCommand {
    pub forward: f64,
    pub rotation: f64,
}

/// Physical description of the drivetrain, used to scale setpoints into
/// normalized commands.
#[derive(Deserialize, Serialize, Clone, Copy, Debug)]
pub struct DriveLimits {
    pub max_wheel_velocity: f64,
    pub max_acceleration: f64,
    pub track_width: f64,
}

impl DriveLimits {
    /// Open-loop mixing from a setpoint to an arcade command: velocity
    /// scaled against the wheel limit, rotation from the wheel-speed split
    /// the commanded curvature demands. No feedback against measured state
    /// happens anywhere in this crate.
    pub fn feedforward(&self, setpoint: &Setpoint) -> DriveCommand {
        let normalized = Bounds::new(-1.0, 1.0);
        let split = setpoint.velocity * setpoint.curvature * 0.5 * self.track_width;

        DriveCommand {
            forward: normalized.clamp(setpoint.velocity / self.max_wheel_velocity),
            rotation: normalized.clamp(split / self.max_wheel_velocity),
        }
    }
}

/// Boundary to the actual robot. The core only produces numeric commands;
/// implementors own the hardware (or a simulator).
pub trait Drivetrain<E: Debug> {
    async fn arcade_drive(&mut self, command: DriveCommand) -> Result<(), E>;
    async fn close(self) -> Result<(), E>;
}

/// Drives a one-dimensional trajectory on the forward axis: queries the
/// already-built profile with an advancing clock every control period and
/// pushes the command into the drivetrain, ending at rest once the profile
/// runs out.
pub async fn follow_trajectory<T, D, E>(
    trajectory: &T,
    drivetrain: &mut D,
    limits: &DriveLimits,
) -> Result<(), E>
where
    T: Trajectory,
    D: Drivetrain<E>,
    E: Debug,
{
    info!("following trajectory for {:.3}s", trajectory.duration());

    let mut interval = tokio::time::interval(CONTROL_PERIOD);
    let start = tokio::time::Instant::now();
    loop {
        interval.tick().await; // first tick fires immediately

        let elapsed = start.elapsed().as_secs_f64();
        let setpoint = Setpoint {
            position: trajectory.position(elapsed),
            velocity: trajectory.velocity(elapsed),
            acceleration: trajectory.acceleration(elapsed),
            curvature: 0.0,
            heading: 0.0,
        };
        let command = limits.feedforward(&setpoint);
        trace!("t={:.3} command={:?}", elapsed, command);
        drivetrain.arcade_drive(command).await?;

        if elapsed >= trajectory.duration() {
            break;
        }
    }

    drivetrain.arcade_drive(DriveCommand::default()).await
}

/// Drives a curvature-aware path profile the same way, forwarding the
/// profile's own curvature and heading into the mixing.
pub async fn follow_path<D, E>(
    profile: &SplineProfile,
    drivetrain: &mut D,
    limits: &DriveLimits,
) -> Result<(), E>
where
    D: Drivetrain<E>,
    E: Debug,
{
    info!("following path for {:.3}s", profile.length());

    let mut interval = tokio::time::interval(CONTROL_PERIOD);
    let start = tokio::time::Instant::now();
    loop {
        interval.tick().await;

        let elapsed = start.elapsed().as_secs_f64();
        let command = limits.feedforward(&profile.setpoint_at_time(elapsed));
        trace!("t={:.3} command={:?}", elapsed, command);
        drivetrain.arcade_drive(command).await?;

        if elapsed >= profile.length() {
            break;
        }
    }

    drivetrain.arcade_drive(DriveCommand::default()).await
}
