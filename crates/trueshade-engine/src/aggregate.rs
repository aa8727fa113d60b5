//! Skin sample aggregation.
//!
//! Drops pixels that are too dark or too bright to carry skin color
//! (shadow, specular highlights) and attaches the per-region weight used by
//! clustering.

use tracing::debug;
use trueshade_core::{Error, PixelSample, Result, WeightedSample};

use crate::config::SamplingConfig;

/// Filters and weights samples.
///
/// Fails with [`Error::InsufficientSample`] when fewer than
/// `config.min_samples` samples survive the luminance filter. The check runs
/// on the filtered count.
pub fn aggregate(samples: &[PixelSample], config: &SamplingConfig) -> Result<Vec<WeightedSample>> {
    let kept: Vec<WeightedSample> = samples
        .iter()
        .filter(|s| {
            let luma = s.luminance();
            luma >= config.luminance_min && luma <= config.luminance_max
        })
        .map(|s| WeightedSample::new(*s, config.region_weights.weight(s.region)))
        .collect();

    debug!(
        total = samples.len(),
        kept = kept.len(),
        required = config.min_samples,
        "aggregated samples"
    );

    if kept.len() < config.min_samples {
        return Err(Error::insufficient_sample(kept.len(), config.min_samples));
    }
    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use trueshade_core::Region;

    fn samples(rgb: [u8; 3], region: Region, n: usize) -> Vec<PixelSample> {
        vec![PixelSample::new(rgb, region); n]
    }

    #[test]
    fn test_filters_dark_and_bright() {
        let mut input = samples([200, 150, 120], Region::Forehead, 20);
        input.extend(samples([0, 0, 0], Region::Chin, 10));
        input.extend(samples([255, 255, 255], Region::NoseBridge, 10));

        let kept = aggregate(&input, &SamplingConfig::default()).unwrap();
        assert_eq!(kept.len(), 20);
        assert!(kept.iter().all(|w| w.sample.rgb == [200, 150, 120]));
    }

    #[test]
    fn test_bounds_near_edges() {
        let mut input = samples([6, 6, 6], Region::Forehead, 10);
        input.extend(samples([249, 249, 249], Region::Forehead, 10));
        input.extend(samples([4, 4, 4], Region::Forehead, 10));
        input.extend(samples([251, 251, 251], Region::Forehead, 10));
        let kept = aggregate(&input, &SamplingConfig::default()).unwrap();
        assert_eq!(kept.len(), 20);
    }

    #[test]
    fn test_insufficient_after_filtering() {
        let mut input = samples([200, 150, 120], Region::LeftCheek, 5);
        input.extend(samples([2, 2, 2], Region::LeftCheek, 40));
        let err = aggregate(&input, &SamplingConfig::default()).unwrap_err();
        match err {
            Error::InsufficientSample { valid, required } => {
                assert_eq!(valid, 5);
                assert_eq!(required, 20);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_region_weights() {
        let mut input = samples([200, 150, 120], Region::RightCheek, 10);
        input.extend(samples([190, 140, 110], Region::Chin, 10));
        let kept = aggregate(&input, &SamplingConfig::default()).unwrap();
        for w in &kept {
            let expected = match w.sample.region {
                Region::RightCheek => 1.5,
                Region::Chin => 1.0,
                _ => unreachable!(),
            };
            assert_eq!(w.weight, expected);
        }
    }

    #[test]
    fn test_empty_input() {
        let err = aggregate(&[], &SamplingConfig::default()).unwrap_err();
        assert!(err.is_sample_error());
    }
}
