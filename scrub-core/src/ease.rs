//! Easing curves used by caption transitions

use serde::{Deserialize, Serialize};

/// Maps linear tween progress onto an eased curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    Linear,
    /// Cubic ease-in, slow start
    Power3In,
    /// Cubic ease-out, slow finish
    Power3Out,
}

impl Ease {
    /// Applies the curve to `t`, clamped to `[0, 1]`
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Power3In => t * t * t,
            Self::Power3Out => 1.0 - (1.0 - t).powi(3),
        }
    }
}
