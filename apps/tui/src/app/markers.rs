use std::time::Duration;

use crate::geo::scale::{bounce_out, cubic_in_out};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    CubicInOut,
    BounceOut,
}

impl Easing {
    fn apply(self, t: f64) -> f64 {
        match self {
            Self::CubicInOut => cubic_in_out(t),
            Self::BounceOut => bounce_out(t),
        }
    }
}

/// In-flight radius change on one marker. Fire-and-forget: the frame loop
/// advances it and nothing awaits completion.
#[derive(Debug, Clone)]
struct Transition {
    from: f64,
    to: f64,
    delay: Duration,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
}

/// One circle bound 1:1 to one station by dataset index. Markers are created
/// on the first render and only ever updated in place afterwards; they are
/// never destroyed, so the index join stays stable for the whole session.
#[derive(Debug, Clone)]
pub struct Marker {
    /// Projected center; `None` when the station is unplaceable.
    pub center: Option<(f64, f64)>,
    pub radius: f64,
    pub hidden: bool,
    pub active: bool,
    transition: Option<Transition>,
}

impl Marker {
    /// Entering marker: appears at radius zero and grows to its scaled value.
    pub fn entering(center: Option<(f64, f64)>, target: f64, duration: Duration) -> Self {
        Self {
            center,
            radius: 0.0,
            hidden: false,
            active: false,
            transition: Some(Transition {
                from: 0.0,
                to: target,
                delay: Duration::ZERO,
                duration,
                elapsed: Duration::ZERO,
                easing: Easing::CubicInOut,
            }),
        }
    }

    /// Retargets the radius with a staggered delay and a bounce finish.
    pub fn retarget(&mut self, target: f64, delay: Duration, duration: Duration) {
        self.transition = Some(Transition {
            from: self.radius,
            to: target,
            delay,
            duration,
            elapsed: Duration::ZERO,
            easing: Easing::BounceOut,
        });
    }

    /// Advances the transition by one frame's worth of wall time.
    pub fn tick(&mut self, dt: Duration) {
        let Some(transition) = &mut self.transition else {
            return;
        };
        transition.elapsed += dt;
        if transition.elapsed <= transition.delay {
            return;
        }
        let run = transition.elapsed - transition.delay;
        if run >= transition.duration || transition.duration.is_zero() {
            self.radius = transition.to;
            self.transition = None;
            return;
        }
        let t = run.as_secs_f64() / transition.duration.as_secs_f64();
        let eased = transition.easing.apply(t);
        self.radius = (transition.to - transition.from).mul_add(eased, transition.from);
    }

    pub const fn settled(&self) -> bool {
        self.transition.is_none()
    }

    /// Center to draw at, when the marker is currently drawable at all.
    pub fn drawable(&self) -> Option<(f64, f64)> {
        if self.hidden || !(self.radius > 0.0) {
            return None;
        }
        self.center
    }
}
