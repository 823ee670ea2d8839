//! Easing functions for animations

use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Easing function type
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseOutQuart,
    EaseOutExpo,
    /// Overshoots by `overshoot` then settles (bounce-settle entrances)
    BackOut(f32),
    /// Decaying oscillation around the goal (return-to-rest)
    ElasticOut { amplitude: f32, period: f32 },
}

impl Easing {
    /// Elastic out with the given amplitude (>= 1) and period (fraction of duration)
    pub const fn elastic(amplitude: f32, period: f32) -> Self {
        Easing::ElasticOut { amplitude, period }
    }

    pub const fn back(overshoot: f32) -> Self {
        Easing::BackOut(overshoot)
    }

    /// Whether the curve leaves the [0, 1] range before settling
    pub fn overshoots(&self) -> bool {
        matches!(self, Easing::BackOut(s) if *s > 0.0) || matches!(self, Easing::ElasticOut { .. })
    }

    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        // Endpoints are always exact
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match *self {
            Easing::Linear => t,
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::EaseInCubic => t * t * t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
            Easing::EaseOutExpo => 1.0 - 2f32.powf(-10.0 * t),
            Easing::BackOut(s) => {
                let u = t - 1.0;
                1.0 + (s + 1.0) * u * u * u + s * u * u
            }
            Easing::ElasticOut { amplitude, period } => elastic_out(t, amplitude, period),
        }
    }
}

/// `a * 2^(-10t) * sin((t - s) * 2π / p) + 1`, with `s` chosen so the curve
/// starts at exactly 0.
fn elastic_out(t: f32, amplitude: f32, period: f32) -> f32 {
    let period = period.max(0.01);
    let amplitude = amplitude.max(1.0);
    let shift = period / TAU * (1.0 / amplitude).asin();
    amplitude * 2f32.powf(-10.0 * t) * ((t - shift) * TAU / period).sin() + 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 11] = [
        Easing::Linear,
        Easing::EaseInQuad,
        Easing::EaseOutQuad,
        Easing::EaseInOutQuad,
        Easing::EaseInCubic,
        Easing::EaseOutCubic,
        Easing::EaseInOutCubic,
        Easing::EaseOutQuart,
        Easing::EaseOutExpo,
        Easing::BackOut(1.2),
        Easing::ElasticOut {
            amplitude: 1.0,
            period: 0.3,
        },
    ];

    fn samples(easing: Easing) -> Vec<f32> {
        (0..=200).map(|i| easing.apply(i as f32 / 200.0)).collect()
    }

    #[test]
    fn test_endpoints_are_exact() {
        for easing in ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?} at 0");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?} at 1");
            assert_eq!(easing.apply(-0.5), 0.0);
            assert_eq!(easing.apply(1.5), 1.0);
        }
    }

    #[test]
    fn test_elastic_starts_continuously_at_zero() {
        let e = Easing::elastic(1.0, 0.3);
        assert!(e.apply(0.001).abs() < 0.05);
    }

    #[test]
    fn test_tween_curves_are_monotonic() {
        for easing in ALL.iter().filter(|e| !e.overshoots()) {
            let values = samples(*easing);
            for pair in values.windows(2) {
                assert!(pair[1] >= pair[0] - 1e-6, "{easing:?} not monotonic");
            }
        }
    }

    #[test]
    fn test_elastic_overshoots_then_settles() {
        for (amplitude, period) in [(1.0, 0.3), (1.0, 0.4), (1.0, 0.5), (1.0, 0.7)] {
            let values = samples(Easing::elastic(amplitude, period));
            let peak = values.iter().copied().fold(f32::MIN, f32::max);
            assert!(peak > 1.0, "elastic({amplitude}, {period}) must overshoot");
            // Settled within a few percent over the last tenth of the curve
            for v in &values[180..] {
                assert!((v - 1.0).abs() < 0.03, "elastic tail {v}");
            }
        }
    }

    #[test]
    fn test_back_out_overshoots_once() {
        let values = samples(Easing::back(1.2));
        let peak = values.iter().copied().fold(f32::MIN, f32::max);
        assert!(peak > 1.0 && peak < 1.2);
        assert!(Easing::back(1.2).overshoots());
        assert!(!Easing::EaseOutCubic.overshoots());
    }
}
