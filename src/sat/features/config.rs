/// Threshold under which a squared-deviation sum or a mean counts as zero when
/// normalising standard deviations.
pub const DEFAULT_EPS: f64 = 1e-5;

/// Knobs for [`crate::sat::features::FeatureExtractor`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureConfig {
    /// Above zero, the extraction time is reported through `tracing` at info level.
    pub verbosity: u32,
    pub eps: f64,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            verbosity: 0,
            eps: DEFAULT_EPS,
        }
    }
}
