//! End-to-end checks across the public API: a control loop builds a profile
//! once and re-queries it every tick, so the reference traces have to be
//! deterministic, continuous and clamped at both ends.

use trajgen::math::{almost_equals, almost_equals_within, Point, Vector};
use trajgen::motion::{SplineProfile, StaticProfile, Trajectory};
use trajgen::spline::Spline;

fn swerve_path() -> SplineProfile {
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
    .unwrap();
    SplineProfile::new(&spline, 0.05, 3.0, 2.0, 0.7).unwrap()
}

#[test]
fn repeated_queries_are_bit_identical() {
    let profile = StaticProfile::new(-1.0, 0.5, 16.0, 4.0, 2.0, 1.0).unwrap();
    let path = swerve_path();

    for i in 0..50 {
        let time = profile.duration() * i as f64 / 49.0;
        assert_eq!(profile.position(time), profile.position(time));
        assert_eq!(profile.velocity(time), profile.velocity(time));

        let t = path.length() * i as f64 / 49.0;
        assert_eq!(path.setpoint_at_time(t), path.setpoint_at_time(t));
    }
}

#[test]
fn profile_traces_are_continuous() {
    let profile = StaticProfile::new(0.0, 0.0, 16.0, 4.0, 2.0, 1.0).unwrap();

    let step = 1e-4;
    let mut time = 0.0;
    while time < profile.duration() {
        let dv = profile.velocity(time + step) - profile.velocity(time);
        let dp = profile.position(time + step) - profile.position(time);
        // bounded by the acceleration and velocity limits
        assert!(dv.abs() <= 2.0 * step + 1e-9);
        assert!(dp.abs() <= 4.0 * step + 1e-9);
        time += step;
    }
}

#[test]
fn path_setpoints_advance_monotonically_and_end_at_rest() {
    let path = swerve_path();

    let mut previous = path.setpoint_at_time(0.0);
    assert!(almost_equals(previous.position, 0.0));
    assert!(almost_equals(previous.velocity, 0.0));

    let samples = 500;
    for i in 1..=samples {
        let setpoint = path.setpoint_at_time(path.length() * i as f64 / samples as f64);
        assert!(setpoint.position >= previous.position - 1e-9);
        assert!(setpoint.velocity >= 0.0);
        assert!(setpoint.velocity <= 3.0 + 1e-6);
        previous = setpoint;
    }

    assert!(almost_equals_within(previous.velocity, 0.0, 1e-6));
    // the dropped partial chunk leaves the final position just short of the
    // full 10.5-ish arc length
    assert!(previous.position > 10.0);
}

#[test]
fn every_query_surface_clamps_the_same_way() {
    let profile = StaticProfile::new(0.0, 0.0, 16.0, 4.0, 2.0, 1.0).unwrap();
    let path = swerve_path();
    let spline = Spline::new(
        vec![0.0, 1.0],
        vec![Point::origin(), Point::new(0.0, 5.0)],
        vec![Vector::new(0.0, 5.0); 2],
        vec![Vector::zero(); 2],
    )
    .unwrap();

    assert_eq!(profile.position(-1.0), profile.position(0.0));
    assert_eq!(profile.position(1e6), profile.position(profile.duration()));

    assert_eq!(path.setpoint_at_time(-1.0), path.setpoint_at_time(0.0));
    assert_eq!(path.setpoint_at_time(1e6), path.setpoint_at_time(path.length()));

    assert_eq!(spline.position(-1.0), spline.position(0.0));
    assert_eq!(spline.position(1e6), spline.position(1.0));
}

#[test]
fn reversal_still_lands_on_the_target() {
    let profile = StaticProfile::new(-1.0, 0.5, 16.0, 4.0, 2.0, 1.0).unwrap();

    assert!(almost_equals(profile.velocity(0.0), -1.0));
    assert!(almost_equals(profile.velocity(1.0), 0.0));
    assert!(almost_equals(profile.position(profile.duration()), 16.0));
    assert!(almost_equals(profile.velocity(profile.duration()), 0.0));
}

#[test]
fn spline_round_trips_its_control_points() {
    let knots = vec![0.0, 3.0, 7.0];
    let points = vec![Point::new(1.0, 1.0), Point::new(4.0, -2.0), Point::new(6.0, 0.0)];
    let spline = Spline::new(
        knots.clone(),
        points.clone(),
        vec![Vector::new(1.0, 0.0); 3],
        vec![Vector::zero(); 3],
    )
    .unwrap();

    for (knot, point) in knots.iter().zip(&points) {
        assert_eq!(spline.position(*knot), *point);
    }
    assert_eq!(spline.control_points(), &points[..]);
}
