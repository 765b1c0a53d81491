use rand::{Rng, SeedableRng, rngs::StdRng};

use super::{DayForecast, ForecastSet};
use crate::error::DataError;

/// Days per seasonal cycle.
const YEAR_DAYS: f64 = 365.0;

/// Seeded generator of a plausible yearly forecast.
///
/// Production follows a seasonal cosine peaking at `peak_day`, prices add a
/// weekend discount on top of the same seasonal shape, and the maintenance
/// coefficient is lowest when demand is lowest. Gaussian noise is applied
/// to each series so that ties between days are rare.
#[derive(Debug, Clone)]
pub struct SyntheticForecast {
    /// Number of days to generate.
    pub days: usize,
    /// Random seed for reproducible noise.
    pub seed: u64,
    /// Mean capacity factor.
    pub production_mean: f64,
    /// Seasonal amplitude of the capacity factor.
    pub production_amp: f64,
    /// Mean electricity price.
    pub price_mean: f64,
    /// Seasonal amplitude of the price.
    pub price_amp: f64,
    /// Relative price drop applied on days 6 and 7 of each week.
    pub weekend_discount: f64,
    /// Day of peak demand (1-indexed).
    pub peak_day: usize,
    /// Relative noise standard deviation applied to every series.
    pub noise_std: f64,
}

impl Default for SyntheticForecast {
    fn default() -> Self {
        Self {
            days: 365,
            seed: 42,
            production_mean: 0.75,
            production_amp: 0.15,
            price_mean: 60.0,
            price_amp: 25.0,
            weekend_discount: 0.2,
            peak_day: 15,
            noise_std: 0.05,
        }
    }
}

impl SyntheticForecast {
    /// Generates the forecast.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::EmptyHorizon`] if `days` is zero.
    pub fn generate(&self) -> Result<ForecastSet, DataError> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let noise_std = self.noise_std.max(0.0);

        let days = (1..=self.days)
            .map(|day| {
                let season = self.season(day);
                let weekend = if day % 7 == 6 || day % 7 == 0 {
                    1.0 - self.weekend_discount
                } else {
                    1.0
                };

                let production = (self.production_mean + self.production_amp * season)
                    * (1.0 + gaussian_noise(&mut rng, noise_std));
                let price = (self.price_mean + self.price_amp * season)
                    * weekend
                    * (1.0 + gaussian_noise(&mut rng, noise_std));
                let maintenance_coeff =
                    (1.0 + 0.5 * season) * (1.0 + gaussian_noise(&mut rng, noise_std));

                DayForecast {
                    production: production.max(0.0),
                    price,
                    maintenance_coeff: maintenance_coeff.max(0.0),
                }
            })
            .collect();

        ForecastSet::from_days(days)
    }

    /// Seasonal shape in `[-1, 1]`, `1.0` at `peak_day`.
    fn season(&self, day: usize) -> f64 {
        let phase = (day as f64 - self.peak_day as f64) / YEAR_DAYS;
        (2.0 * std::f64::consts::PI * phase).cos()
    }
}

/// Gaussian noise with mean 0 via the Box-Muller transform.
fn gaussian_noise(rng: &mut StdRng, std_dev: f64) -> f64 {
    if std_dev <= 0.0 {
        return 0.0;
    }

    let u1: f64 = rng.random::<f64>().clamp(1e-12, 1.0);
    let u2: f64 = rng.random::<f64>();
    let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    z0 * std_dev
}
