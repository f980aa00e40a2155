use std::convert::Infallible;

use tracing::debug;

use super::{DriveCommand, Drivetrain};

/// In-process drivetrain stand-in that records every command it receives.
/// Used by the demo binary and the tests; a real robot implements
/// [`Drivetrain`] over its motor controllers instead.
#[derive(Debug, Default)]
pub struct SimDrivetrain {
    commands: Vec<DriveCommand>,
}

impl SimDrivetrain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DriveCommand] {
        &self.commands
    }

    pub fn last_command(&self) -> Option<DriveCommand> {
        self.commands.last().copied()
    }
}

impl Drivetrain<Infallible> for SimDrivetrain {
    async fn arcade_drive(&mut self, command: DriveCommand) -> Result<(), Infallible> {
        self.commands.push(command);
        Ok(())
    }

    async fn close(self) -> Result<(), Infallible> {
        debug!("sim drivetrain closed after {} commands", self.commands.len());
        Ok(())
    }
}
