use tracing::debug;

use crate::error::TrajectoryError;
use crate::math::{sign, Bounds, EPSILON};

use super::chunk::Chunk;
use super::Trajectory;

/// Straight-line motion profile for one degree of freedom: drives from the
/// current state to a target position under velocity, acceleration and
/// deceleration limits, ending at rest on the target.
///
/// Segmentation happens once at construction; the profile is immutable
/// afterwards and cheap enough to re-query every control tick.
#[derive(Clone, Debug)]
pub struct StaticProfile {
    chunks: Vec<Chunk>,
    starting_position: f64,
    duration: f64,
}

struct Moment {
    chunk: Chunk,
    time: f64,
    previous_distance: f64,
}

struct Limits {
    max_velocity: f64,
    max_accel: f64,
    max_decel: f64,
}

impl StaticProfile {
    pub fn new(
        current_velocity: f64,
        current_position: f64,
        target_distance: f64,
        max_velocity: f64,
        max_accel: f64,
        max_decel: f64,
    ) -> Result<Self, TrajectoryError> {
        if max_velocity <= 0.0 {
            return Err(TrajectoryError::NonPositiveLimit("max velocity"));
        }
        if max_accel <= 0.0 {
            return Err(TrajectoryError::NonPositiveLimit("max acceleration"));
        }
        if max_decel <= 0.0 {
            return Err(TrajectoryError::NonPositiveLimit("max deceleration"));
        }

        let limits = Limits {
            max_velocity,
            max_accel,
            max_decel,
        };
        let displacement = target_distance - current_position;
        let chunks = limits.compute_chunks(current_velocity, displacement)?;
        let duration = chunks.iter().map(Chunk::duration).sum();

        debug!(
            "static profile: {} chunks covering {:.4} over {:.4}s",
            chunks.len(),
            displacement,
            duration
        );

        Ok(Self {
            chunks,
            starting_position: current_position,
            duration,
        })
    }

    /// Locates the chunk whose time window contains `time`, clamped into the
    /// profile. `None` only for the empty zero-displacement profile.
    fn moment(&self, time: f64) -> Option<Moment> {
        let last = self.chunks.last()?;
        let time = Bounds::new(0.0, self.duration).clamp(time);

        let mut chunk_start_time = 0.0;
        let mut previous_distance = self.starting_position;
        for chunk in &self.chunks {
            let chunk_end_time = chunk_start_time + chunk.duration();
            if time <= chunk_end_time {
                return Some(Moment {
                    chunk: *chunk,
                    time: time - chunk_start_time,
                    previous_distance,
                });
            }
            chunk_start_time = chunk_end_time;
            previous_distance += chunk.total_distance();
        }

        // accumulated rounding put the clamped time just past the final
        // chunk; hold its end state
        Some(Moment {
            chunk: *last,
            time: last.duration(),
            previous_distance: previous_distance - last.total_distance(),
        })
    }
}

impl Trajectory for StaticProfile {
    fn position(&self, time: f64) -> f64 {
        match self.moment(time) {
            Some(moment) => moment.chunk.position(moment.time) + moment.previous_distance,
            None => self.starting_position,
        }
    }

    fn velocity(&self, time: f64) -> f64 {
        match self.moment(time) {
            Some(moment) => moment.chunk.velocity(moment.time),
            None => 0.0,
        }
    }

    fn acceleration(&self, time: f64) -> f64 {
        match self.moment(time) {
            Some(moment) => moment.chunk.acceleration(),
            None => 0.0,
        }
    }

    fn duration(&self) -> f64 {
        self.duration
    }
}

impl Limits {
    /// Splits the displacement into an ordered run of constant-acceleration
    /// chunks by iterative append, with the overshoot correction as an
    /// explicit rewind-and-replace of the chunk that reached cruise speed.
    fn compute_chunks(
        &self,
        start_velocity: f64,
        displacement: f64,
    ) -> Result<Vec<Chunk>, TrajectoryError> {
        let mut chunks: Vec<Chunk> = Vec::new();
        let mut velocity = start_velocity;
        let mut remaining = displacement;

        // already on target and at rest
        if remaining.abs() <= EPSILON && velocity.abs() <= EPSILON {
            return Ok(chunks);
        }

        let mut first = true;
        loop {
            let direction = sign(remaining);
            let cruise = self.max_velocity * direction;

            let chunk = if first && velocity != 0.0 && sign(velocity) != direction {
                // moving away from the target: come to rest before anything
                Chunk::velocity_transition(velocity, 0.0, self.max_accel, self.max_decel)?
            } else if first && self.stopping_distance(velocity).abs() > remaining.abs() + EPSILON {
                // too close to stop on target; bleed off all speed and let
                // the later steps back up over the overshoot
                Chunk::velocity_transition(velocity, 0.0, self.max_accel, self.max_decel)?
            } else if (velocity - cruise).abs() > EPSILON {
                if velocity.abs() < self.max_velocity {
                    let to_cruise =
                        Chunk::velocity_transition(velocity, cruise, self.max_accel, self.max_decel)?;
                    let braking = self.stopping_distance(cruise);
                    if (to_cruise.total_distance() + braking).abs() <= remaining.abs() + EPSILON {
                        to_cruise
                    } else {
                        // cruise speed is unreachable in the remaining
                        // distance; finish with a triangular peak
                        self.final_approach(&mut chunks, velocity, remaining)?;
                        break;
                    }
                } else {
                    // over the cruise limit: drop down to it
                    Chunk::velocity_transition(velocity, cruise, self.max_accel, self.max_decel)?
                }
            } else {
                let stop =
                    Chunk::velocity_transition(velocity, 0.0, self.max_accel, self.max_decel)?;
                if stop.total_distance().abs() < remaining.abs() - EPSILON {
                    // cruise over the slack the stop will not cover
                    Chunk::constant_velocity(cruise, remaining - stop.total_distance())?
                } else if (stop.total_distance() - remaining).abs() <= EPSILON {
                    stop
                } else {
                    // stopping from cruise overshoots: rewind the chunk that
                    // reached cruise and retime the approach from before it
                    match chunks.pop() {
                        Some(reached_cruise) => {
                            remaining += reached_cruise.total_distance();
                            self.final_approach(
                                &mut chunks,
                                reached_cruise.start_velocity(),
                                remaining,
                            )?;
                            break;
                        }
                        // entered the profile at cruise with nothing to
                        // rewind; stop and let the backtracking recover
                        None => stop,
                    }
                }
            };

            remaining -= chunk.total_distance();
            velocity = chunk.end_velocity();
            chunks.push(chunk);

            if remaining.abs() <= EPSILON {
                break;
            }
            first = false;
        }

        Ok(chunks)
    }

    /// Distance covered while braking from `velocity` to rest, signed like
    /// the velocity.
    fn stopping_distance(&self, velocity: f64) -> f64 {
        0.5 * velocity.abs() * velocity / self.max_decel
    }

    /// Finishes the profile exactly: ramps to the peak speed whose
    /// acceleration and braking areas add up to `remaining`, clipping the
    /// peak to the cruise limit with a constant chunk over the slack.
    fn final_approach(
        &self,
        chunks: &mut Vec<Chunk>,
        velocity: f64,
        remaining: f64,
    ) -> Result<(), TrajectoryError> {
        let direction = sign(remaining);
        let (accel, decel) = (self.max_accel, self.max_decel);

        // (peak² − v²) / 2a ramp area plus peak² / 2d braking area must
        // equal the remaining distance
        let peak_squared =
            decel * (2.0 * accel * remaining.abs() + velocity * velocity) / (accel + decel);
        let peak = direction * peak_squared.sqrt().min(self.max_velocity);

        let mut slack = remaining;
        if (peak - velocity).abs() > EPSILON {
            let ramp = Chunk::velocity_transition(velocity, peak, accel, decel)?;
            slack -= ramp.total_distance();
            chunks.push(ramp);
        }

        let stop = Chunk::velocity_transition(peak, 0.0, accel, decel)?;
        slack -= stop.total_distance();
        if slack.abs() > EPSILON {
            // the peak was clipped; hold it over the leftover distance
            chunks.push(Chunk::constant_velocity(peak, slack)?);
        }
        chunks.push(stop);
        Ok(())
    }
}
