use thiserror::Error;

use super::constants::{
    DEFAULT_DIFF_BLUR_KERNEL, DEFAULT_DIFF_THRESHOLD, DEFAULT_EDGE_BLUR_KERNEL, DEFAULT_HISTORY,
    DEFAULT_INPAINT_RADIUS, DEFAULT_MORPH_KERNEL, DEFAULT_VAR_THRESHOLD,
};

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a positive odd integer, got {value}")]
    EvenKernel { name: &'static str, value: usize },
    #[error("background history must be positive")]
    ZeroHistory,
    #[error("variance threshold must be a positive finite number, got {0}")]
    VarThreshold(f32),
    #[error("inpaint radius must be positive")]
    ZeroInpaintRadius,
}

/// Tunable parameters of the cleaning pipeline.
///
/// Defaults reproduce the fixed recipe; nothing in the CLI changes them.
#[derive(Clone, Debug, PartialEq)]
pub struct CleanerConfig {
    /// Frames of history the background model averages over.
    pub history: usize,
    /// Squared Mahalanobis distance under which a pixel matches the background.
    pub var_threshold: f32,
    /// Grayscale difference above which a pixel counts as changed.
    pub diff_threshold: u8,
    /// Elliptical structuring element size (width, height).
    pub morph_kernel: (usize, usize),
    /// Gaussian kernel applied to the thresholded difference mask.
    pub diff_blur_kernel: usize,
    /// Gaussian kernel applied to each inpainted region's bounding box.
    pub edge_blur_kernel: usize,
    pub inpaint_radius: usize,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            history: DEFAULT_HISTORY,
            var_threshold: DEFAULT_VAR_THRESHOLD,
            diff_threshold: DEFAULT_DIFF_THRESHOLD,
            morph_kernel: DEFAULT_MORPH_KERNEL,
            diff_blur_kernel: DEFAULT_DIFF_BLUR_KERNEL,
            edge_blur_kernel: DEFAULT_EDGE_BLUR_KERNEL,
            inpaint_radius: DEFAULT_INPAINT_RADIUS,
        }
    }
}

impl CleanerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_odd("morph kernel width", self.morph_kernel.0)?;
        check_odd("morph kernel height", self.morph_kernel.1)?;
        check_odd("difference blur kernel", self.diff_blur_kernel)?;
        check_odd("edge blur kernel", self.edge_blur_kernel)?;
        if self.history == 0 {
            return Err(ConfigError::ZeroHistory);
        }
        if !(self.var_threshold.is_finite() && self.var_threshold > 0.0) {
            return Err(ConfigError::VarThreshold(self.var_threshold));
        }
        if self.inpaint_radius == 0 {
            return Err(ConfigError::ZeroInpaintRadius);
        }
        Ok(())
    }
}

fn check_odd(name: &'static str, value: usize) -> Result<(), ConfigError> {
    if value == 0 || value % 2 == 0 {
        return Err(ConfigError::EvenKernel { name, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_defaults_match_recipe() {
        let config = CleanerConfig::default();
        assert_eq!(config.history, 700);
        assert_eq!(config.var_threshold, 25.0);
        assert_eq!(config.diff_threshold, 25);
        assert_eq!(config.morph_kernel, (3, 3));
        assert_eq!(config.diff_blur_kernel, 5);
        assert_eq!(config.edge_blur_kernel, 21);
        assert_eq!(config.inpaint_radius, 7);
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(CleanerConfig::default().validate().is_ok());
    }

    #[rstest]
    #[case::even_edge_kernel(CleanerConfig { edge_blur_kernel: 20, ..CleanerConfig::default() })]
    #[case::zero_diff_kernel(CleanerConfig { diff_blur_kernel: 0, ..CleanerConfig::default() })]
    #[case::even_morph_kernel(CleanerConfig { morph_kernel: (3, 4), ..CleanerConfig::default() })]
    #[case::zero_history(CleanerConfig { history: 0, ..CleanerConfig::default() })]
    #[case::nan_threshold(CleanerConfig { var_threshold: f32::NAN, ..CleanerConfig::default() })]
    #[case::zero_radius(CleanerConfig { inpaint_radius: 0, ..CleanerConfig::default() })]
    fn test_invalid_configs_rejected(#[case] config: CleanerConfig) {
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_error_message_names_parameter() {
        let config = CleanerConfig {
            edge_blur_kernel: 20,
            ..CleanerConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "edge blur kernel must be a positive odd integer, got 20"
        );
    }
}
