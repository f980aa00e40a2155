use tracing::info;
use tracing_subscriber::EnvFilter;

use trajgen::drive::{follow_path, follow_trajectory, sim::SimDrivetrain, DriveLimits, Drivetrain};
use trajgen::math::{Point, Vector};
use trajgen::motion::{SplineProfile, StaticProfile, Trajectory};
use trajgen::spline::Spline;

/// Builds one straight-line profile and one curved path profile, follows
/// both on the sim drivetrain, and streams the sampled setpoints as JSON
/// lines for plotting.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let limits = DriveLimits {
        max_wheel_velocity: 3.0,
        max_acceleration: 2.0,
        track_width: 0.7,
    };

    let profile = StaticProfile::new(0.0, 0.0, 16.0, 3.0, 2.0, 1.0)
        .expect("static profile inputs are valid");
    info!("straight move takes {:.2}s", profile.duration());

    let mut drivetrain = SimDrivetrain::new();
    follow_trajectory(&profile, &mut drivetrain, &limits)
        .await
        .expect("sim drivetrain never fails");
    info!("straight move done after {} commands", drivetrain.commands().len());

    // gentle S-curve: 10 ahead with a 2 sideways swerve
    let spline = Spline::new(
        vec![0.0, 1.0, 2.0],
        vec![Point::origin(), Point::new(5.0, 2.0), Point::new(10.0, 0.0)],
        vec![
            Vector::new(5.0, 0.0),
            Vector::new(5.0, 0.0),
            Vector::new(5.0, 0.0),
        ],
        vec![Vector::zero(); 3],
    )
    .expect("spline inputs are valid");
    let path = SplineProfile::new(&spline, 0.05, limits.max_wheel_velocity, limits.max_acceleration, limits.track_width)
        .expect("path profile inputs are valid");
    info!("curved path takes {:.2}s", path.length());

    let mut drivetrain = SimDrivetrain::new();
    follow_path(&path, &mut drivetrain, &limits)
        .await
        .expect("sim drivetrain never fails");
    info!("curved path done after {} commands", drivetrain.commands().len());
    drivetrain.close().await.expect("sim drivetrain never fails");

    // sampled setpoint stream for plotting
    let samples = 200;
    for i in 0..=samples {
        let time = path.length() * i as f64 / samples as f64;
        let setpoint = path.setpoint_at_time(time);
        match serde_json::to_string(&setpoint) {
            Ok(line) => println!("{line}"),
            Err(err) => {
                eprintln!("couldn't serialize setpoint: {err}");
                break;
            }
        }
    }
}
