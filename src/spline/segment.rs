use crate::math::{Point, Vector, EPSILON};

use super::PathSample;

/// One quintic-Hermite piece of a spline, between two control points with
/// first- and second-derivative boundary conditions already scaled into the
/// segment's local parameter `s` in `[0, 1]`.
///
/// The six boundary conditions exactly determine the six polynomial
/// coefficients per axis, solved in closed form at construction. Arc length
/// is integrated numerically once and cached.
#[derive(Clone, Debug)]
pub struct QuinticSegment {
    start: Point,
    end: Point,
    x_coefs: [f64; 6],
    y_coefs: [f64; 6],
    arc_length: f64,
}

impl QuinticSegment {
    pub(crate) fn new(
        start: Point,
        end: Point,
        start_derivative: Vector,
        end_derivative: Vector,
        start_second_derivative: Vector,
        end_second_derivative: Vector,
    ) -> Self {
        let x_coefs = axis_coefficients(
            start.x,
            end.x,
            start_derivative.x,
            end_derivative.x,
            start_second_derivative.x,
            end_second_derivative.x,
        );
        let y_coefs = axis_coefficients(
            start.y,
            end.y,
            start_derivative.y,
            end_derivative.y,
            start_second_derivative.y,
            end_second_derivative.y,
        );

        let mut segment = Self {
            start,
            end,
            x_coefs,
            y_coefs,
            arc_length: 0.0,
        };
        segment.arc_length = segment.integrate_arc_length();
        segment
    }

    pub fn position(&self, s: f64) -> Point {
        let mut x = 0.0;
        let mut y = 0.0;
        for exponent in (0..6).rev() {
            x = x * s + self.x_coefs[exponent];
            y = y * s + self.y_coefs[exponent];
        }
        Point::new(x, y)
    }

    /// Derivative with respect to the local parameter.
    pub fn derivative(&self, s: f64) -> Vector {
        let mut x = 0.0;
        let mut y = 0.0;
        for exponent in (1..6).rev() {
            x = x * s + exponent as f64 * self.x_coefs[exponent];
            y = y * s + exponent as f64 * self.y_coefs[exponent];
        }
        Vector::new(x, y)
    }

    /// Second derivative with respect to the local parameter.
    pub fn second_derivative(&self, s: f64) -> Vector {
        let mut x = 0.0;
        let mut y = 0.0;
        for exponent in (2..6).rev() {
            let scale = (exponent * (exponent - 1)) as f64;
            x = x * s + scale * self.x_coefs[exponent];
            y = y * s + scale * self.y_coefs[exponent];
        }
        Vector::new(x, y)
    }

    /// Signed curvature, invariant under re-parameterization.
    pub fn curvature(&self, s: f64) -> f64 {
        let first = self.derivative(s);
        let second = self.second_derivative(s);

        let dividend = first.x * second.y - first.y * second.x;
        let divisor = (first.x * first.x + first.y * first.y).powf(1.5);

        dividend / divisor
    }

    /// Direction of travel in radians.
    pub fn heading(&self, s: f64) -> f64 {
        self.derivative(s).angle()
    }

    /// Where a wheel mounted `width_offset` to the side and `length_offset`
    /// ahead of the robot's center sits while the center tracks the segment.
    pub fn wheel(&self, s: f64, width_offset: f64, length_offset: f64) -> Point {
        let center = self.position(s);
        let offset = Vector::new(length_offset, -width_offset).rotate(self.heading(s));
        center + offset
    }

    pub fn arc_length(&self) -> f64 {
        self.arc_length
    }

    /// Sums position deltas over a sampling resolution proportional to the
    /// chord length, so longer segments get more samples.
    fn integrate_arc_length(&self) -> f64 {
        let chord_length = (self.end - self.start).norm();
        let iterations = ((200.0 * chord_length) as usize).max(1);

        let mut arc_length = 0.0;
        let mut previous = self.start;
        for i in 0..=iterations {
            let s = i as f64 / iterations as f64;
            let current = self.position(s);
            arc_length += (current - previous).norm();
            previous = current;
        }

        arc_length
    }

    /// Walks the segment in steps of roughly a hundredth of a chunk of arc
    /// length, recording curvature and heading each time the accumulated arc
    /// crosses `chunk_length`. `carry` is the leftover arc from the previous
    /// segment, and the new leftover is returned, keeping chunk boundaries
    /// uniform across the whole chain.
    pub(crate) fn sample_chunks(
        &self,
        chunk_length: f64,
        carry: f64,
        samples: &mut Vec<PathSample>,
    ) -> f64 {
        let step = chunk_length / (100.0 * self.arc_length);

        let mut since_last = carry;
        let mut s = 0.0;
        while s <= 1.0 {
            since_last += step * self.derivative(s).norm();
            if since_last > chunk_length - EPSILON {
                samples.push(PathSample {
                    curvature: self.curvature(s),
                    heading: self.heading(s),
                });
                since_last -= chunk_length;
            }
            s += step;
        }

        since_last
    }
}

/// Closed-form quintic-Hermite coefficients for one axis from the endpoint
/// values and their span-scaled first and second derivatives.
fn axis_coefficients(p0: f64, p1: f64, d0: f64, d1: f64, dd0: f64, dd1: f64) -> [f64; 6] {
    [
        p0,
        d0,
        0.5 * dd0,
        -10.0 * p0 + 10.0 * p1 - 6.0 * d0 - 4.0 * d1 - 1.5 * dd0 + 0.5 * dd1,
        15.0 * p0 - 15.0 * p1 + 8.0 * d0 + 7.0 * d1 + 1.5 * dd0 - dd1,
        -6.0 * p0 + 6.0 * p1 - 3.0 * d0 - 3.0 * d1 - 0.5 * dd0 + 0.5 * dd1,
    ]
}
