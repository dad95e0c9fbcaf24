//! Ambient temperature model.

use crate::error::{SimError, SimResult};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use rc_core::numeric::round_to;
use serde::{Deserialize, Serialize};

/// Day of year where the seasonal factor equals one half.
const SEASON_PIVOT_DAY: f64 = 172.0;

/// Seasonal plus diurnal ambient temperature with Gaussian noise.
///
/// Defaults describe a cold subpolar site: −5 °C winter mean, 10 °C summer
/// mean, 4 K diurnal swing peaking at 15:00.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientModel {
    pub winter_mean_c: f64,
    pub summer_mean_c: f64,
    pub diurnal_amplitude_k: f64,
    pub peak_hour: f64,
    pub noise_sigma_k: f64,
}

impl Default for AmbientModel {
    fn default() -> Self {
        Self {
            winter_mean_c: -5.0,
            summer_mean_c: 10.0,
            diurnal_amplitude_k: 4.0,
            peak_hour: 15.0,
            noise_sigma_k: 1.5,
        }
    }
}

impl AmbientModel {
    pub fn validate(&self) -> SimResult<()> {
        let values = [
            self.winter_mean_c,
            self.summer_mean_c,
            self.diurnal_amplitude_k,
            self.peak_hour,
            self.noise_sigma_k,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(SimError::config("ambient model values must be finite"));
        }
        if self.noise_sigma_k < 0.0 {
            return Err(SimError::config("ambient noise sigma must be non-negative"));
        }
        if !(0.0..24.0).contains(&self.peak_hour) {
            return Err(SimError::config("ambient peak hour must lie in [0, 24)"));
        }
        Ok(())
    }

    /// Seasonal factor `0.5·(1 + (doy − 172)/172)`.
    pub fn seasonal_factor(day_of_year: u32) -> f64 {
        0.5 * (1.0 + (day_of_year as f64 - SEASON_PIVOT_DAY) / SEASON_PIVOT_DAY)
    }

    /// Noise-free ambient temperature [°C].
    pub fn base_c(&self, hour: u32, day_of_year: u32) -> f64 {
        let seasonal = self.winter_mean_c
            + (self.summer_mean_c - self.winter_mean_c) * Self::seasonal_factor(day_of_year);
        let diurnal =
            self.diurnal_amplitude_k * (1.0 - (hour as f64 - self.peak_hour).abs() / 12.0);
        seasonal + diurnal
    }

    pub fn noise(&self) -> SimResult<Normal<f64>> {
        self.validate()?;
        Normal::new(0.0, self.noise_sigma_k)
            .map_err(|e| SimError::config(format!("ambient noise: {e}")))
    }

    /// One noisy reading, rounded to 0.1 °C.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        noise: &Normal<f64>,
        rng: &mut R,
        hour: u32,
        day_of_year: u32,
    ) -> f64 {
        round_to(self.base_c(hour, day_of_year) + noise.sample(rng), 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn seasonal_factor_pivot() {
        assert_eq!(AmbientModel::seasonal_factor(172), 0.5);
        assert_eq!(AmbientModel::seasonal_factor(0), 0.0);
    }

    #[test]
    fn base_temperature_formula() {
        let model = AmbientModel::default();
        // Day 172 at the diurnal peak: midpoint of means plus full swing.
        assert!((model.base_c(15, 172) - 6.5).abs() < 1e-12);
        // Day 0 at 03:00: winter mean and no diurnal contribution.
        assert!((model.base_c(3, 0) + 5.0).abs() < 1e-12);
    }

    #[test]
    fn zero_noise_is_deterministic() {
        let model = AmbientModel {
            noise_sigma_k: 0.0,
            ..Default::default()
        };
        let noise = model.noise().unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(model.sample(&noise, &mut rng, 15, 172), 6.5);
    }

    #[test]
    fn samples_are_rounded() {
        let model = AmbientModel::default();
        let noise = model.noise().unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for hour in 0..24 {
            let t = model.sample(&noise, &mut rng, hour, 100);
            assert!(((t * 10.0).round() - t * 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn rejects_negative_sigma() {
        let model = AmbientModel {
            noise_sigma_k: -1.0,
            ..Default::default()
        };
        assert!(model.validate().is_err());
        assert!(model.noise().is_err());
    }
}
