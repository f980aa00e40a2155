use tracing::debug;

use crate::error::TrajectoryError;
use crate::math::{binary_search, Bounds};
use crate::spline::{PathSample, Spline};

use super::chunk::Chunk;
use super::setpoint::Setpoint;

/// Curvature below this magnitude is treated as a straight path.
const STRAIGHT_CURVATURE: f64 = 1e-4;

/// Times a spline path for a differential drivetrain. The spline is sampled
/// into uniform arc-length chunks, each chunk boundary gets the highest
/// speed its curvature and the robot's acceleration allow, and the result is
/// queried by time like any other profile.
///
/// Built once per commanded path; queries are read-only.
#[derive(Clone, Debug)]
pub struct SplineProfile {
    chunks: Vec<Chunk>,
    times: Vec<f64>,
    samples: Vec<PathSample>,
    chunk_length: f64,
}

impl SplineProfile {
    pub fn new(
        spline: &Spline,
        chunk_length: f64,
        max_wheel_velocity: f64,
        max_acceleration: f64,
        track_width: f64,
    ) -> Result<Self, TrajectoryError> {
        if chunk_length <= 0.0 {
            return Err(TrajectoryError::NonPositiveLimit("chunk length"));
        }
        if max_wheel_velocity <= 0.0 {
            return Err(TrajectoryError::NonPositiveLimit("max wheel velocity"));
        }
        if max_acceleration <= 0.0 {
            return Err(TrajectoryError::NonPositiveLimit("max acceleration"));
        }
        if track_width < 0.0 {
            return Err(TrajectoryError::NonPositiveLimit("track width"));
        }

        let samples = spline.chunk_samples(chunk_length);
        if samples.len() < 3 {
            return Err(TrajectoryError::Degenerate(
                "path must cover at least two chunks",
            ));
        }

        // Forward pass: every boundary speed is bounded by what its
        // curvature allows and by accelerating flat out across the chunk
        // behind it. The path starts and ends at rest.
        let count = samples.len();
        let mut velocities = vec![0.0f64; count];
        for i in 1..count - 1 {
            let cap = curvature_speed_cap(samples[i].curvature, max_wheel_velocity, track_width);
            let reachable =
                (velocities[i - 1].powi(2) + 2.0 * max_acceleration * chunk_length).sqrt();
            velocities[i] = cap.min(reachable);
        }

        // Backward pass: cap each boundary by what the robot can still brake
        // away from, so slowing for tight curvature or the final stop is
        // always possible.
        for i in (0..count - 1).rev() {
            let reachable =
                (velocities[i + 1].powi(2) + 2.0 * max_acceleration * chunk_length).sqrt();
            velocities[i] = velocities[i].min(reachable);
        }

        // Retime each boundary-to-boundary interval as a fixed-distance
        // chunk and accumulate the cumulative time array.
        let mut chunks = Vec::with_capacity(count - 1);
        let mut times = Vec::with_capacity(count);
        times.push(0.0);
        for pair in velocities.windows(2) {
            let chunk = Chunk::velocity_distance(chunk_length, pair[0], pair[1])?;
            times.push(times[times.len() - 1] + chunk.duration());
            chunks.push(chunk);
        }

        debug!(
            "spline profile: {} chunks of {:.4} over {:.4}s",
            chunks.len(),
            chunk_length,
            times[times.len() - 1]
        );

        Ok(Self {
            chunks,
            times,
            samples,
            chunk_length,
        })
    }

    /// Total time the path takes.
    pub fn length(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    /// The reference state at `time`, clamped into the profile. Position,
    /// velocity and acceleration are evaluated inside the containing chunk;
    /// curvature and heading are piecewise constant per chunk.
    pub fn setpoint_at_time(&self, time: f64) -> Setpoint {
        let time = Bounds::new(0.0, self.length()).clamp(time);
        let index = binary_search(&self.times, time);

        let sample = &self.samples[index];
        Setpoint::from_chunk(
            &self.chunks[index],
            time - self.times[index],
            index as f64 * self.chunk_length,
            sample.curvature,
            sample.heading,
        )
    }
}

/// The outer wheel is what the wheel-speed limit actually bounds: on a turn
/// of radius `r` the center may only go `max_wheel_velocity · r / (r + w/2)`.
fn curvature_speed_cap(curvature: f64, max_wheel_velocity: f64, track_width: f64) -> f64 {
    if curvature.abs() < STRAIGHT_CURVATURE {
        return max_wheel_velocity;
    }

    let radius = 1.0 / curvature.abs();
    let outer_radius = radius + 0.5 * track_width;

    max_wheel_velocity * (radius / outer_radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{almost_equals, almost_equals_within, Point, Vector};
    use std::f64::consts::FRAC_PI_2;

    /// 10.0 of straight path along +y.
    fn straight_profile() -> SplineProfile {
        let spline = Spline::new(
            vec![0.0, 1.0, 2.0],
            vec![Point::origin(), Point::new(0.0, 5.0), Point::new(0.0, 10.0)],
            vec![Vector::new(0.0, 5.0); 3],
            vec![Vector::zero(); 3],
        )
        .unwrap();
        SplineProfile::new(&spline, 0.1, 3.0, 2.0, 0.7).unwrap()
    }

    #[test]
    fn straight_path_accelerates_cruises_and_brakes() {
        let profile = straight_profile();

        // accelerating
        let sp = profile.setpoint_at_time(1.4);
        assert!(almost_equals_within(sp.position, 1.9600, 1e-3));
        assert!(almost_equals_within(sp.velocity, 2.8000, 1e-3));
        assert!(almost_equals_within(sp.acceleration, 2.0, 1e-3));
        assert!(almost_equals(sp.curvature, 0.0));
        assert!(almost_equals_within(sp.heading, FRAC_PI_2, 1e-3));

        // cruising at the wheel limit
        let sp = profile.setpoint_at_time(2.4);
        assert!(almost_equals_within(sp.position, 4.9500, 1e-3));
        assert!(almost_equals_within(sp.velocity, 3.0000, 1e-3));
        assert!(almost_equals_within(sp.acceleration, 0.0, 1e-3));

        // braking for the end of the path
        let sp = profile.setpoint_at_time(4.0);
        assert!(almost_equals_within(sp.position, 9.3052, 1e-3));
        assert!(almost_equals_within(sp.velocity, 1.6670, 1e-3));
        assert!(almost_equals_within(sp.acceleration, -2.0, 1e-3));
    }

    #[test]
    fn endpoints_are_at_rest() {
        let profile = straight_profile();

        let start = profile.setpoint_at_time(0.0);
        assert!(almost_equals(start.position, 0.0));
        assert!(almost_equals(start.velocity, 0.0));

        let end = profile.setpoint_at_time(profile.length());
        assert!(almost_equals_within(end.position, 10.0, 1e-2));
        assert!(almost_equals_within(end.velocity, 0.0, 1e-6));
    }

    #[test]
    fn queries_clamp_into_the_profile() {
        let profile = straight_profile();

        assert_eq!(profile.setpoint_at_time(-5.0), profile.setpoint_at_time(0.0));
        assert_eq!(
            profile.setpoint_at_time(profile.length() + 5.0),
            profile.setpoint_at_time(profile.length())
        );
    }

    #[test]
    fn curvature_caps_the_center_speed() {
        // straight
        assert!(almost_equals(curvature_speed_cap(0.0, 3.0, 0.7), 3.0));
        assert!(almost_equals(curvature_speed_cap(5e-5, 3.0, 0.7), 3.0));

        // radius 1.0 turn, outer track at 1.35
        let cap = curvature_speed_cap(1.0, 3.0, 0.7);
        assert!(almost_equals(cap, 3.0 / 1.35));
        // sign of the turn does not matter
        assert!(almost_equals(curvature_speed_cap(-1.0, 3.0, 0.7), cap));
        // zero track width leaves the limit untouched
        assert!(almost_equals(curvature_speed_cap(1.0, 3.0, 0.0), 3.0));
    }

    #[test]
    fn velocity_never_exceeds_the_curvature_cap() {
        // a tight half-circle of radius 2
        let spline = Spline::new(
            vec![0.0, 1.0, 2.0],
            vec![Point::new(2.0, 0.0), Point::new(0.0, 2.0), Point::new(-2.0, 0.0)],
            vec![
                Vector::new(0.0, std::f64::consts::PI),
                Vector::new(-std::f64::consts::PI, 0.0),
                Vector::new(0.0, -std::f64::consts::PI),
            ],
            vec![
                Vector::new(-2.0, 0.0),
                Vector::new(0.0, -2.0),
                Vector::new(2.0, 0.0),
            ],
        )
        .unwrap();
        let profile = SplineProfile::new(&spline, 0.05, 3.0, 2.0, 0.7).unwrap();

        let mut time = 0.0;
        while time < profile.length() {
            let sp = profile.setpoint_at_time(time);
            let cap = curvature_speed_cap(sp.curvature, 3.0, 0.7);
            assert!(sp.velocity.abs() <= cap + 0.2);
            time += 0.01;
        }
    }

    #[test]
    fn rejects_degenerate_inputs() {
        let spline = Spline::new(
            vec![0.0, 1.0],
            vec![Point::origin(), Point::new(1.0, 0.0)],
            vec![Vector::new(1.0, 0.0); 2],
            vec![Vector::zero(); 2],
        )
        .unwrap();

        assert!(SplineProfile::new(&spline, 0.0, 3.0, 2.0, 0.7).is_err());
        assert!(SplineProfile::new(&spline, 0.1, 0.0, 2.0, 0.7).is_err());
        assert!(SplineProfile::new(&spline, 0.1, 3.0, -1.0, 0.7).is_err());
        assert!(SplineProfile::new(&spline, 0.1, 3.0, 2.0, -0.1).is_err());
        // the whole path is shorter than a chunk
        assert!(SplineProfile::new(&spline, 5.0, 3.0, 2.0, 0.7).is_err());
    }
}
