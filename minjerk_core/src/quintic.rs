//! Quintic polynomial boundary-value solutions.
//
// A quintic has six coefficients, enough to pin position, velocity and
// acceleration at both ends of a move. Time is local to the segment:
// t = 0 is the start state and t = T the goal state.

/// Position, velocity and acceleration of one axis at a segment boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundaryState {
    pub position: f64,
    pub velocity: f64,
    pub acceleration: f64,
}

impl BoundaryState {
    pub fn new(position: f64, velocity: f64, acceleration: f64) -> Self {
        Self {
            position,
            velocity,
            acceleration,
        }
    }

    /// Zero velocity and acceleration.
    pub fn at_rest(position: f64) -> Self {
        Self::new(position, 0.0, 0.0)
    }
}

/// `x(t) = a[0] + a[1] t + a[2] t^2 + a[3] t^3 + a[4] t^4 + a[5] t^5`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QuinticCoefficients {
    pub a: [f64; 6],
}

impl QuinticCoefficients {
    /// Solves for the quintic joining `start` at t = 0 to `goal` at t = `duration`.
    ///
    /// `duration` must be positive; a non-positive duration yields the
    /// constant polynomial at `start.position`.
    pub fn solve(start: BoundaryState, goal: BoundaryState, duration: f64) -> Self {
        let (x0, v0, acc0) = (start.position, start.velocity, start.acceleration);
        let (x1, v1, acc1) = (goal.position, goal.velocity, goal.acceleration);
        if duration <= 0.0 {
            return Self {
                a: [x0, 0.0, 0.0, 0.0, 0.0, 0.0],
            };
        }

        let t = duration;
        let t2 = t * t;
        let t3 = t2 * t;
        let t4 = t3 * t;
        let t5 = t4 * t;
        let h = x1 - x0;

        Self {
            a: [
                x0,
                v0,
                acc0 / 2.0,
                (20.0 * h - (8.0 * v1 + 12.0 * v0) * t - (3.0 * acc0 - acc1) * t2) / (2.0 * t3),
                (-30.0 * h + (14.0 * v1 + 16.0 * v0) * t + (3.0 * acc0 - 2.0 * acc1) * t2) / (2.0 * t4),
                (12.0 * h - 6.0 * (v1 + v0) * t + (acc1 - acc0) * t2) / (2.0 * t5),
            ],
        }
    }

    /// Rest-to-rest move: zero velocity and acceleration at both ends.
    ///
    /// This is the minimum-jerk profile. The velocity and acceleration
    /// coefficients vanish and the rest depend only on the travel and duration:
    /// `a3 = 10 h / T^3`, `a4 = -15 h / T^4`, `a5 = 6 h / T^5`.
    pub fn minimum_jerk(start: f64, goal: f64, duration: f64) -> Self {
        Self::solve(BoundaryState::at_rest(start), BoundaryState::at_rest(goal), duration)
    }

    pub fn position(&self, t: f64) -> f64 {
        let a = &self.a;
        a[0] + t * (a[1] + t * (a[2] + t * (a[3] + t * (a[4] + t * a[5]))))
    }

    pub fn velocity(&self, t: f64) -> f64 {
        let a = &self.a;
        a[1] + t * (2.0 * a[2] + t * (3.0 * a[3] + t * (4.0 * a[4] + t * 5.0 * a[5])))
    }

    pub fn acceleration(&self, t: f64) -> f64 {
        let a = &self.a;
        2.0 * a[2] + t * (6.0 * a[3] + t * (12.0 * a[4] + t * 20.0 * a[5]))
    }

    pub fn jerk(&self, t: f64) -> f64 {
        let a = &self.a;
        6.0 * a[3] + t * (24.0 * a[4] + t * 60.0 * a[5])
    }

    pub fn state(&self, t: f64) -> BoundaryState {
        BoundaryState::new(self.position(t), self.velocity(t), self.acceleration(t))
    }
}
