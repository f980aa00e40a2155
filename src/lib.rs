#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(async_fn_in_trait)]
pub mod drive;
pub mod error;
pub mod math;
pub mod motion;
pub mod spline;

use std::time::Duration;

pub use error::TrajectoryError;

/// Period of the reference-following control loop. Profiles are built once
/// per commanded move and re-queried every tick with an advancing time.
pub const CONTROL_PERIOD: Duration = Duration::from_millis(20);
