use serde::{Deserialize, Serialize};

use super::chunk::Chunk;

/// Instantaneous commanded reference: where the tracked degree of freedom
/// should be and how fast it should be moving right now. Built fresh for
/// every query, never stored.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq)]
pub struct Setpoint {
    pub position: f64,
    pub velocity: f64,
    pub acceleration: f64,
    /// Signed inverse turning radius; zero on straight-line profiles.
    pub curvature: f64,
    /// Path heading in radians; zero on straight-line profiles.
    pub heading: f64,
}

impl Setpoint {
    /// Evaluates `chunk` at `time` seconds past its start, offset by the
    /// absolute distance covered before the chunk.
    pub(crate) fn from_chunk(
        chunk: &Chunk,
        time: f64,
        previous_distance: f64,
        curvature: f64,
        heading: f64,
    ) -> Self {
        Self {
            position: chunk.position(time) + previous_distance,
            velocity: chunk.velocity(time),
            acceleration: chunk.acceleration(),
            curvature,
            heading,
        }
    }
}
