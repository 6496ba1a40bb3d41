//! Quantile-based color-range estimation.
//!
//! Every frame the fragment stage deposits a per-pixel "escape depth" in the
//! depth buffer: `0.0` for background pixels (points that never escape) and a
//! value in `(0, 1]` scaled by how quickly the orbit diverged. The estimator
//! sorts the captured samples and picks four landmarks of the nonzero
//! distribution, which the shader uses as gradient breakpoints on the next
//! frame. Feeding the estimate back one frame late is deliberate: it keeps the
//! readback off the critical path and the palette stable under motion.

/// Gradient breakpoints handed to the fragment stage as a `vec4`.
///
/// Fields are ordered low to high; `from_samples` guarantees
/// `low <= mid <= high <= max` whenever a nonzero sample exists.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorRanges {
    /// Smallest nonzero escape depth.
    pub low: f32,
    /// Roughly the 75th percentile of nonzero samples.
    pub mid: f32,
    /// Roughly the 87.5th percentile of nonzero samples.
    pub high: f32,
    /// Largest sample.
    pub max: f32,
}

impl ColorRanges {
    /// Breakpoints used for the very first frame, before any capture exists.
    pub const STARTUP: Self = Self {
        low: 0.0001,
        mid: 0.33333,
        high: 0.66667,
        max: 1.0,
    };

    /// Degenerate breakpoints returned when no pixel escaped; the shader
    /// falls back to flat shading for these.
    pub const FLAT: Self = Self {
        low: 0.0,
        mid: 0.0,
        high: 0.0,
        max: 1.0,
    };

    /// Estimates breakpoints from one frame of depth samples.
    ///
    /// The input is copied and sorted; the slice itself is never mutated.
    /// Zeros are skipped, then the landmarks are read at integer-truncated
    /// quantile offsets into the nonzero tail. With fewer than two nonzero
    /// samples the quantile offsets collapse onto the smallest nonzero
    /// sample, so the function is total and the ordering invariant holds for
    /// every input.
    pub fn from_samples(samples: &[f32]) -> Self {
        let mut sorted = samples.to_vec();
        sorted.sort_unstable_by(f32::total_cmp);

        let lowest = match sorted.iter().position(|&sample| sample != 0.0) {
            Some(index) => index,
            None => return Self::FLAT,
        };
        let length = sorted.len() - lowest;

        Self {
            low: sorted[lowest],
            mid: sorted[lowest + (length * 3 / 4).saturating_sub(1)],
            high: sorted[lowest + (length * 7 / 8).saturating_sub(1)],
            max: sorted[sorted.len() - 1],
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.low, self.mid, self.high, self.max]
    }
}

impl Default for ColorRanges {
    fn default() -> Self {
        Self::STARTUP
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantiles_match_reference_distribution() {
        let samples = [0.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let ranges = ColorRanges::from_samples(&samples);
        assert_eq!(
            ranges,
            ColorRanges {
                low: 1.0,
                mid: 6.0,
                high: 7.0,
                max: 8.0,
            }
        );
    }

    #[test]
    fn all_zero_samples_fall_back_to_flat() {
        assert_eq!(ColorRanges::from_samples(&[0.0, 0.0, 0.0]), ColorRanges::FLAT);
    }

    #[test]
    fn empty_input_falls_back_to_flat() {
        assert_eq!(ColorRanges::from_samples(&[]), ColorRanges::FLAT);
    }

    #[test]
    fn single_nonzero_sample_collapses_breakpoints() {
        let ranges = ColorRanges::from_samples(&[0.0, 0.0, 0.5]);
        assert_eq!(ranges.low, 0.5);
        assert_eq!(ranges.mid, 0.5);
        assert_eq!(ranges.high, 0.5);
        assert_eq!(ranges.max, 0.5);
    }

    #[test]
    fn breakpoints_are_ordered_for_unsorted_input() {
        let samples = [0.7, 0.0, 0.12, 0.9, 0.33, 0.0, 0.33, 0.05, 0.61, 0.28];
        let ranges = ColorRanges::from_samples(&samples);
        assert!(ranges.low <= ranges.mid);
        assert!(ranges.mid <= ranges.high);
        assert!(ranges.high <= ranges.max);
        assert_eq!(ranges.max, 0.9);
        assert_eq!(ranges.low, 0.05);
    }

    #[test]
    fn input_slice_is_left_untouched() {
        let samples = vec![0.4, 0.0, 0.2, 0.9];
        let before = samples.clone();
        let _ = ColorRanges::from_samples(&samples);
        assert_eq!(samples, before);
    }
}
