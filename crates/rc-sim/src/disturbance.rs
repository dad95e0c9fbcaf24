//! Disturbances applied on top of the nominal operating point.

use crate::error::{SimError, SimResult};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Extra condenser ΔT caused by door openings.
///
/// With probability `heavy_probability` a heavy burst adds U(heavy range);
/// with a further `moderate_probability` a moderate one adds U(moderate
/// range); otherwise nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorEvents {
    pub heavy_probability: f64,
    pub heavy_min_k: f64,
    pub heavy_max_k: f64,
    pub moderate_probability: f64,
    pub moderate_min_k: f64,
    pub moderate_max_k: f64,
}

impl Default for DoorEvents {
    fn default() -> Self {
        Self {
            heavy_probability: 0.05,
            heavy_min_k: 3.0,
            heavy_max_k: 8.0,
            moderate_probability: 0.15,
            moderate_min_k: 1.0,
            moderate_max_k: 3.0,
        }
    }
}

impl DoorEvents {
    pub fn validate(&self) -> SimResult<()> {
        let p = self.heavy_probability + self.moderate_probability;
        if !(0.0..=1.0).contains(&self.heavy_probability)
            || !(0.0..=1.0).contains(&self.moderate_probability)
            || !(0.0..=1.0).contains(&p)
        {
            return Err(SimError::config(
                "door event probabilities must lie in [0, 1] and sum to at most 1",
            ));
        }
        if !(self.heavy_min_k <= self.heavy_max_k && self.moderate_min_k <= self.moderate_max_k) {
            return Err(SimError::config("door event ranges must be ordered"));
        }
        Ok(())
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let roll = rng.gen_range(0.0..1.0);
        if roll < self.heavy_probability {
            rng.gen_range(self.heavy_min_k..=self.heavy_max_k)
        } else if roll < self.heavy_probability + self.moderate_probability {
            rng.gen_range(self.moderate_min_k..=self.moderate_max_k)
        } else {
            0.0
        }
    }
}

/// Progressive condenser fouling over the last days of the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoulingSchedule {
    pub degradation_days: u32,
    /// Relative ΔT growth per day past the onset.
    pub growth_per_day: f64,
}

impl Default for FoulingSchedule {
    fn default() -> Self {
        Self {
            degradation_days: 2,
            growth_per_day: 0.7,
        }
    }
}

impl FoulingSchedule {
    pub fn validate(&self) -> SimResult<()> {
        if !self.growth_per_day.is_finite() || self.growth_per_day < 0.0 {
            return Err(SimError::config("fouling growth must be non-negative"));
        }
        Ok(())
    }

    /// ΔT multiplier given the days left in the horizon, counting the
    /// current day (the first day of a 7-day run has 7 remaining).
    pub fn factor(&self, days_remaining: u32) -> f64 {
        if days_remaining <= self.degradation_days {
            1.0 + (self.degradation_days - days_remaining) as f64 * self.growth_per_day
        } else {
            1.0
        }
    }
}

/// Per-sample compressor isentropic efficiency: `base + U(low, high)`,
/// clamped to `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EfficiencyDrift {
    pub base: f64,
    pub low: f64,
    pub high: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for EfficiencyDrift {
    fn default() -> Self {
        Self {
            base: 0.75,
            low: -0.03,
            high: 0.02,
            min: 0.60,
            max: 0.85,
        }
    }
}

impl EfficiencyDrift {
    pub fn validate(&self) -> SimResult<()> {
        if !(self.min > 0.0 && self.min <= self.max && self.max <= 1.0) {
            return Err(SimError::config(
                "efficiency clamp must satisfy 0 < min <= max <= 1",
            ));
        }
        if !(self.low <= self.high) || !self.base.is_finite() {
            return Err(SimError::config("efficiency drift range must be ordered"));
        }
        Ok(())
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let drift = rng.gen_range(self.low..=self.high);
        (self.base + drift).clamp(self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn fouling_factor_ramps_on_last_days() {
        let f = FoulingSchedule::default();
        assert_eq!(f.factor(7), 1.0);
        assert_eq!(f.factor(3), 1.0);
        assert_eq!(f.factor(2), 1.0);
        assert!((f.factor(1) - 1.7).abs() < 1e-12);
        assert!((f.factor(0) - 2.4).abs() < 1e-12);
    }

    #[test]
    fn door_events_stay_in_range() {
        let doors = DoorEvents::default();
        let mut rng = StdRng::seed_from_u64(42);
        let draws: Vec<f64> = (0..2_000).map(|_| doors.sample(&mut rng)).collect();

        assert!(draws.iter().all(|&d| d == 0.0 || (1.0..=8.0).contains(&d)));
        let quiet = draws.iter().filter(|&&d| d == 0.0).count() as f64 / draws.len() as f64;
        // Nominally 80 % of samples see no door event.
        assert!(quiet > 0.7 && quiet < 0.9, "quiet fraction {quiet}");
    }

    #[test]
    fn no_doors_means_no_disturbance() {
        let doors = DoorEvents {
            heavy_probability: 0.0,
            moderate_probability: 0.0,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        assert!((0..100).all(|_| doors.sample(&mut rng) == 0.0));
    }

    #[test]
    fn certain_heavy_event_always_fires() {
        let doors = DoorEvents {
            heavy_probability: 1.0,
            moderate_probability: 0.0,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(11);
        assert!((0..200).all(|_| (3.0..=8.0).contains(&doors.sample(&mut rng))));
    }

    #[test]
    fn efficiency_is_clamped() {
        let drift = EfficiencyDrift::default();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..500 {
            let eta = drift.sample(&mut rng);
            assert!(eta > 0.72 - 1e-9 && eta < 0.77 + 1e-9, "eta {eta}");
        }

        let tight = EfficiencyDrift {
            base: 0.9,
            ..Default::default()
        };
        assert!(tight.sample(&mut rng) <= 0.85);
    }

    #[test]
    fn validation() {
        assert!(DoorEvents::default().validate().is_ok());
        assert!(
            DoorEvents {
                heavy_probability: 0.9,
                moderate_probability: 0.2,
                ..Default::default()
            }
            .validate()
            .is_err()
        );
        assert!(
            EfficiencyDrift {
                min: 0.0,
                ..Default::default()
            }
            .validate()
            .is_err()
        );
        assert!(
            FoulingSchedule {
                growth_per_day: -0.1,
                ..Default::default()
            }
            .validate()
            .is_err()
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    proptest! {
        #[test]
        fn fouling_never_improves_as_days_run_out(remaining in 1u32..30) {
            let f = FoulingSchedule::default();
            prop_assert!(f.factor(remaining) >= 1.0);
            prop_assert!(f.factor(remaining) >= f.factor(remaining + 1));
        }

        #[test]
        fn draws_stay_in_range(seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let doors = DoorEvents::default();
            let drift = EfficiencyDrift::default();
            for _ in 0..50 {
                let extra = doors.sample(&mut rng);
                prop_assert!((0.0..=8.0).contains(&extra));
                let eta = drift.sample(&mut rng);
                prop_assert!((drift.min..=drift.max).contains(&eta));
            }
        }
    }
}
