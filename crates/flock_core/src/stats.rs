//! Descriptive statistics over sampled batches.

use serde::Serialize;

/// Summary of a batch of samples.
///
/// The mode is estimated as the centre of the fullest bin of an equal-width
/// histogram spanning the observed `[min, max]`.
///
/// # Examples
///
/// ```rust
/// use flock_core::stats::SampleSummary;
///
/// let summary = SampleSummary::from_samples(&[1.0, 2.0, 2.0, 3.0], 2).unwrap();
/// assert_eq!(summary.count, 4);
/// assert_eq!(summary.mean, 2.0);
/// assert_eq!(summary.min, 1.0);
/// assert_eq!(summary.max, 3.0);
///
/// assert!(SampleSummary::from_samples(&[], 10).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleSummary {
    /// Number of samples.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Population variance.
    pub variance: f64,
    /// Smallest sample.
    pub min: f64,
    /// Largest sample.
    pub max: f64,
    /// Histogram mode estimate.
    pub mode: f64,
    /// Bin counts from `min` to `max`.
    pub histogram: Vec<usize>,
}

impl SampleSummary {
    /// Summarises `samples` using `bins` histogram bins (at least one).
    ///
    /// Returns `None` for an empty batch.
    pub fn from_samples(samples: &[f64], bins: usize) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let bins = bins.max(1);

        let count = samples.len();
        let n = count as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let variance = samples.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / n;
        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let width = (max - min) / bins as f64;
        let mut histogram = vec![0usize; bins];
        for &x in samples {
            let index = if width > 0.0 {
                (((x - min) / width) as usize).min(bins - 1)
            } else {
                0
            };
            histogram[index] += 1;
        }

        let (fullest, _) = histogram
            .iter()
            .enumerate()
            .fold((0, 0), |best, (i, &c)| if c > best.1 { (i, c) } else { best });
        let mode = min + width * (fullest as f64 + 0.5);

        Some(Self {
            count,
            mean,
            variance,
            min,
            max,
            mode,
            histogram,
        })
    }

    /// Standard deviation.
    #[inline]
    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }
}
