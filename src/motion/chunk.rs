use crate::error::TrajectoryError;

/// One constant-acceleration phase of motion: a signed distance covered
/// while velocity ramps linearly from `start_velocity` to `end_velocity`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Chunk {
    distance: f64,
    start_velocity: f64,
    end_velocity: f64,
    duration: f64,
    acceleration: f64,
}

impl Chunk {
    fn new(
        distance: f64,
        start_velocity: f64,
        end_velocity: f64,
        duration: f64,
    ) -> Result<Self, TrajectoryError> {
        // A zero or infinite duration means some input divided to nothing; a
        // zero-length chunk must never be constructed.
        if !duration.is_finite() || duration <= 0.0 {
            return Err(TrajectoryError::Degenerate(
                "chunk duration must be positive and finite",
            ));
        }

        Ok(Self {
            distance,
            start_velocity,
            end_velocity,
            duration,
            acceleration: (end_velocity - start_velocity) / duration,
        })
    }

    /// A chunk that holds `velocity` over `distance`.
    pub fn constant_velocity(velocity: f64, distance: f64) -> Result<Self, TrajectoryError> {
        Self::new(distance, velocity, velocity, distance / velocity)
    }

    /// A chunk that ramps between two velocities as fast as the acceleration
    /// limits allow; the covered distance falls out of the ramp time.
    pub fn velocity_transition(
        start_velocity: f64,
        end_velocity: f64,
        max_accel: f64,
        max_decel: f64,
    ) -> Result<Self, TrajectoryError> {
        let average_velocity = 0.5 * (start_velocity + end_velocity);
        let delta_velocity = end_velocity - start_velocity;

        // Speeding up is bounded by the acceleration limit, slowing down by
        // the deceleration limit.
        let duration = if end_velocity.abs() > start_velocity.abs() {
            delta_velocity.abs() / max_accel
        } else {
            delta_velocity.abs() / max_decel
        };

        Self::new(average_velocity * duration, start_velocity, end_velocity, duration)
    }

    /// A chunk that ramps between two velocities over a fixed, known
    /// distance. Used to retime path chunks of uniform arc length.
    pub fn velocity_distance(
        distance: f64,
        start_velocity: f64,
        end_velocity: f64,
    ) -> Result<Self, TrajectoryError> {
        let average_velocity = 0.5 * (start_velocity + end_velocity);
        Self::new(distance, start_velocity, end_velocity, distance / average_velocity)
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn total_distance(&self) -> f64 {
        self.distance
    }

    pub fn start_velocity(&self) -> f64 {
        self.start_velocity
    }

    pub fn end_velocity(&self) -> f64 {
        self.end_velocity
    }

    pub fn acceleration(&self) -> f64 {
        self.acceleration
    }

    /// Velocity `time` seconds into the chunk. Callers clamp `time` into
    /// `[0, duration]`.
    pub fn velocity(&self, time: f64) -> f64 {
        self.start_velocity + self.acceleration * time
    }

    /// Distance covered `time` seconds into the chunk, the exact integral of
    /// the linear velocity ramp.
    pub fn position(&self, time: f64) -> f64 {
        0.5 * (self.start_velocity + self.velocity(time)) * time
    }
}
