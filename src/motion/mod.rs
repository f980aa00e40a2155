pub mod chunk;
pub mod setpoint;
pub mod spline_profile;
pub mod static_profile;

pub use chunk::Chunk;
pub use setpoint::Setpoint;
pub use spline_profile::SplineProfile;
pub use static_profile::StaticProfile;

/// Time-indexed motion reference for a single degree of freedom. Queries
/// outside `[0, duration]` hold the boundary state instead of failing, so a
/// control loop that runs long keeps receiving the final reference.
pub trait Trajectory {
    fn position(&self, time: f64) -> f64;
    fn velocity(&self, time: f64) -> f64;
    fn acceleration(&self, time: f64) -> f64;
    fn duration(&self) -> f64;
}
