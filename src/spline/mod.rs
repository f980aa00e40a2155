pub mod segment;

pub use segment::QuinticSegment;

use crate::error::TrajectoryError;
use crate::math::{lerp, Bounds, Point, Vector, EPSILON};

/// Curvature and heading at one chunk boundary along a path, sampled at
/// (approximately) uniform arc-length intervals.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathSample {
    pub curvature: f64,
    pub heading: f64,
}

/// A chain of quintic-Hermite segments indexed by a strictly increasing knot
/// sequence: `knots[i]..knots[i + 1]` bounds segment `i` in the global
/// parameter.
///
/// The control derivatives are given with respect to the global parameter;
/// construction folds the knot span into each segment (span per derivative
/// order), and global-parameter queries unscale the same way.
#[derive(Clone, Debug)]
pub struct Spline {
    knots: Vec<f64>,
    segments: Vec<QuinticSegment>,
    points: Vec<Point>,
    derivatives: Vec<Vector>,
    second_derivatives: Vec<Vector>,
}

impl Spline {
    pub fn new(
        knots: Vec<f64>,
        points: Vec<Point>,
        derivatives: Vec<Vector>,
        second_derivatives: Vec<Vector>,
    ) -> Result<Self, TrajectoryError> {
        if points.len() < 2 {
            return Err(TrajectoryError::TooFewPoints(points.len()));
        }
        if knots.len() != points.len()
            || derivatives.len() != points.len()
            || second_derivatives.len() != points.len()
        {
            return Err(TrajectoryError::MismatchedInputs);
        }
        if !knots.windows(2).all(|pair| pair[1] > pair[0]) {
            return Err(TrajectoryError::UnorderedKnots);
        }

        let segments = (0..points.len() - 1)
            .map(|i| {
                let span = knots[i + 1] - knots[i];
                QuinticSegment::new(
                    points[i],
                    points[i + 1],
                    derivatives[i] * span,
                    derivatives[i + 1] * span,
                    second_derivatives[i] * span * span,
                    second_derivatives[i + 1] * span * span,
                )
            })
            .collect();

        Ok(Self {
            knots,
            segments,
            points,
            derivatives,
            second_derivatives,
        })
    }

    /// The final knot, i.e. the maximum global parameter value.
    pub fn length(&self) -> f64 {
        self.knots[self.knots.len() - 1]
    }

    pub fn control_points(&self) -> &[Point] {
        &self.points
    }

    /// The same control data re-expressed on a new knot spacing. Produces a
    /// new value so a published spline is never mutated under a concurrent
    /// reader.
    pub fn reparameterized(&self, knots: Vec<f64>) -> Result<Self, TrajectoryError> {
        Self::new(
            knots,
            self.points.clone(),
            self.derivatives.clone(),
            self.second_derivatives.clone(),
        )
    }

    pub fn position(&self, t: f64) -> Point {
        let (index, s) = self.locate(t);
        self.segments[index].position(s)
    }

    /// Derivative with respect to the global parameter.
    pub fn derivative(&self, t: f64) -> Vector {
        let (index, s) = self.locate(t);
        self.segments[index].derivative(s) / self.span(index)
    }

    /// Second derivative with respect to the global parameter.
    pub fn second_derivative(&self, t: f64) -> Vector {
        let (index, s) = self.locate(t);
        let span = self.span(index);
        self.segments[index].second_derivative(s) / (span * span)
    }

    pub fn curvature(&self, t: f64) -> f64 {
        let (index, s) = self.locate(t);
        self.segments[index].curvature(s)
    }

    pub fn heading(&self, t: f64) -> f64 {
        let (index, s) = self.locate(t);
        self.segments[index].heading(s)
    }

    /// Position of a wheel offset from the robot's center as the center
    /// tracks the spline.
    pub fn wheel(&self, t: f64, width_offset: f64, length_offset: f64) -> Point {
        let (index, s) = self.locate(t);
        self.segments[index].wheel(s, width_offset, length_offset)
    }

    /// Curvature and heading at the path start plus every crossing of a
    /// `chunk_length` arc-length boundary, carrying leftover arc across
    /// segments so boundaries stay globally uniform. The trailing partial
    /// chunk is dropped.
    pub fn chunk_samples(&self, chunk_length: f64) -> Vec<PathSample> {
        let first = &self.segments[0];
        let mut samples = vec![PathSample {
            curvature: first.curvature(0.0),
            heading: first.heading(0.0),
        }];

        let mut carry = 0.0;
        for segment in &self.segments {
            if segment.arc_length() < EPSILON {
                continue;
            }
            carry = segment.sample_chunks(chunk_length, carry, &mut samples);
        }

        samples
    }

    /// Maps a clamped global parameter to its segment index and local
    /// parameter.
    fn locate(&self, t: f64) -> (usize, f64) {
        let t = Bounds::new(self.knots[0], self.length()).clamp(t);
        let index = self.segment_index(t);
        let s = lerp(t, self.knots[index], self.knots[index + 1], 0.0, 1.0);
        (index, s)
    }

    /// Index of the last knot at or before `t`.
    fn segment_index(&self, t: f64) -> usize {
        for i in 1..self.knots.len() {
            if t < self.knots[i] {
                return i - 1;
            }
        }
        self.knots.len() - 2
    }

    fn span(&self, index: usize) -> f64 {
        self.knots[index + 1] - self.knots[index]
    }
}
