use std::error::Error;
use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::config::constants::CONFIDENCE_DIVISOR;

/// Probability distribution over a scalar distance in kilometres.
///
/// Path-shaped clues (satellite arc, river) use a zero-mean normal whose
/// standard deviation encodes a 95% confidence half-width. Point landmarks use
/// a log-normal, since distance to a point is non-negative and right-skewed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DistanceDistribution {
    Normal { sigma: f64 },
    LogNormal { shape: f64, scale: f64 },
}

impl DistanceDistribution {
    /// Zero-mean normal from a 95% confidence half-width in kilometres.
    pub fn from_confidence_range(confidence_range_km: f64) -> Result<Self, Box<dyn Error + Send + Sync>> {
        if confidence_range_km <= 0.0 {
            return Err(format!(
                "confidence range must be positive, got {}",
                confidence_range_km
            )
            .into());
        }
        Ok(Self::Normal {
            sigma: confidence_range_km / CONFIDENCE_DIVISOR,
        })
    }

    /// Log-normal parameterized by the mean of ln(distance) and the mode of
    /// the distance itself: `scale = exp(mean)`, `shape = sqrt(ln(scale / mode))`.
    pub fn from_mean_mode(mean: f64, mode: f64) -> Result<Self, Box<dyn Error + Send + Sync>> {
        if mode <= 0.0 {
            return Err(format!("log-normal mode must be positive, got {}", mode).into());
        }
        let scale = mean.exp();
        let log_ratio = (scale / mode).ln();
        if log_ratio <= 0.0 {
            return Err(format!(
                "log-normal mode {} must be below exp(mean) = {}",
                mode, scale
            )
            .into());
        }
        Ok(Self::LogNormal {
            shape: log_ratio.sqrt(),
            scale,
        })
    }

    /// Probability density at distance `x` km. Total over all finite inputs;
    /// the log-normal density is 0 for non-positive distances.
    pub fn pdf(&self, x: f64) -> f64 {
        match self {
            Self::Normal { sigma } => {
                let z = x / sigma;
                (-0.5 * z * z).exp() / (sigma * (2.0 * PI).sqrt())
            }
            Self::LogNormal { shape, scale } => {
                if x <= 0.0 {
                    return 0.0;
                }
                let z = (x.ln() - scale.ln()) / shape;
                (-0.5 * z * z).exp() / (x * shape * (2.0 * PI).sqrt())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_sigma_follows_confidence_convention() {
        let dist = DistanceDistribution::from_confidence_range(1.96).unwrap();
        assert_eq!(dist, DistanceDistribution::Normal { sigma: 1.0 });
    }

    #[test]
    fn normal_pdf_peaks_at_zero() {
        let dist = DistanceDistribution::from_confidence_range(2.4).unwrap();
        assert!(dist.pdf(0.0) > dist.pdf(0.5));
        assert!(dist.pdf(0.5) > dist.pdf(5.0));
    }

    #[test]
    fn standard_normal_density_at_zero() {
        let dist = DistanceDistribution::Normal { sigma: 1.0 };
        assert!((dist.pdf(0.0) - 0.3989422804014327).abs() < 1e-12);
    }

    #[test]
    fn log_normal_mode_is_the_peak() {
        let dist = DistanceDistribution::from_mean_mode(4.7, 3.877).unwrap();
        let at_mode = dist.pdf(3.877);
        assert!(at_mode > dist.pdf(3.0));
        assert!(at_mode > dist.pdf(5.0));
    }

    #[test]
    fn log_normal_is_zero_for_non_positive_distance() {
        let dist = DistanceDistribution::from_mean_mode(1.0, 1.0_f64.exp() * 0.5).unwrap();
        assert_eq!(dist.pdf(0.0), 0.0);
        assert_eq!(dist.pdf(-1.0), 0.0);
    }

    #[test]
    fn non_positive_confidence_range_is_rejected() {
        assert!(DistanceDistribution::from_confidence_range(0.0).is_err());
        assert!(DistanceDistribution::from_confidence_range(-2.4).is_err());
    }

    #[test]
    fn invalid_mean_mode_pairs_are_rejected() {
        assert!(DistanceDistribution::from_mean_mode(4.7, 0.0).is_err());
        assert!(DistanceDistribution::from_mean_mode(4.7, -1.0).is_err());
        // Mode at or above exp(mean) has no real shape parameter.
        assert!(DistanceDistribution::from_mean_mode(1.0, 1.0_f64.exp()).is_err());
        assert!(DistanceDistribution::from_mean_mode(1.0, 10.0).is_err());
    }
}
