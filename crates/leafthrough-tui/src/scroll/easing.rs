//! Easing curves for animated scrolling.
//!
//! Maps progress in [0, 1] to eased output in [0, 1]. The curve
//! variants live in leafthrough-core so they can sit in the config
//! file; the math lives here next to the animation.

pub use leafthrough_core::Easing;

/// Calculation methods for [`Easing`]
pub trait EasingExt {
    /// Apply the curve to a progress value in [0, 1]
    fn apply(&self, t: f64) -> f64;
}

impl EasingExt for Easing {
    #[inline]
    fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Cubic => polynomial_out(t, 3),
            Easing::Quint => polynomial_out(t, 5),
            Easing::Expo => exponential_out(t),
        }
    }
}

/// Polynomial ease-out: f(t) = 1 - (1-t)^power
#[inline]
fn polynomial_out(t: f64, power: i32) -> f64 {
    1.0 - (1.0 - t).powi(power)
}

/// Exponential ease-out: f(t) = 1 - 2^(-10t)
#[inline]
fn exponential_out(t: f64) -> f64 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f64.powf(-10.0 * t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 4] = [Easing::Linear, Easing::Cubic, Easing::Quint, Easing::Expo];

    #[test]
    fn test_boundaries() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 0.001, "{easing:?} at t=0");
            assert!((easing.apply(1.0) - 1.0).abs() < 0.001, "{easing:?} at t=1");
        }
    }

    #[test]
    fn test_monotonic() {
        for easing in ALL {
            let mut prev = 0.0;
            for i in 0..=20 {
                let t = i as f64 / 20.0;
                let v = easing.apply(t);
                assert!(v >= prev, "{easing:?} not monotonic at t={t}");
                prev = v;
            }
        }
    }

    #[test]
    fn test_out_curves_lead_linear() {
        // Ease-out means covering more ground early
        for easing in [Easing::Cubic, Easing::Quint, Easing::Expo] {
            assert!(easing.apply(0.3) > Easing::Linear.apply(0.3), "{easing:?}");
        }
    }

    #[test]
    fn test_clamps_out_of_range_input() {
        assert_eq!(Easing::Cubic.apply(-0.5), 0.0);
        assert_eq!(Easing::Cubic.apply(1.5), 1.0);
    }
}
