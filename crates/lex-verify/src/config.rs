//! Configuration for the verification checks.
//!
//! The thresholds used by the checks are policy values rather than derived
//! constants, so they live here and can be tuned (or loaded from JSON)
//! without touching engine logic.

use serde::{Deserialize, Serialize};

/// Default missing-value token.
pub const DEFAULT_MISSING_MARKER: &str = "?";

/// Default name of the label column.
pub const DEFAULT_LABEL_COLUMN: &str = "class!";

/// Configuration shared by all checks.
///
/// Use [`CheckConfig::builder()`] to create a validated configuration.
///
/// # Example
///
/// ```rust,ignore
/// use lex_verify::config::CheckConfig;
///
/// let config = CheckConfig::builder()
///     .correlation_threshold(0.9)
///     .outlier_sigmas(2.5)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Raw value marking a field as absent.
    /// Default: "?"
    pub missing_marker: String,

    /// Name of the label (class) column.
    /// Default: "class!"
    pub label_column: String,

    /// Absolute Pearson correlation above which a column pair is reported.
    /// Default: 0.95
    pub correlation_threshold: f64,

    /// Number of standard deviations beyond which a value is an outlier.
    /// Default: 3.0
    pub outlier_sigmas: f64,

    /// Absolute tolerance for the eccentricity identity.
    /// Default: 0.01
    pub eccentricity_tolerance: f64,

    /// Absolute tolerance for the black-pixel ratio identities.
    /// Default: 0.001
    pub ratio_tolerance: f64,

    /// Smallest plausible label value.
    /// Default: 1
    pub label_min: i64,

    /// Largest plausible label value.
    /// Default: 5
    pub label_max: i64,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            missing_marker: DEFAULT_MISSING_MARKER.to_string(),
            label_column: DEFAULT_LABEL_COLUMN.to_string(),
            correlation_threshold: 0.95,
            outlier_sigmas: 3.0,
            eccentricity_tolerance: 0.01,
            ratio_tolerance: 0.001,
            label_min: 1,
            label_max: 5,
        }
    }
}

impl CheckConfig {
    /// Create a new configuration builder.
    pub fn builder() -> CheckConfigBuilder {
        CheckConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.missing_marker.is_empty() {
            return Err(ConfigValidationError::EmptyField("missing_marker".to_string()));
        }

        if self.label_column.is_empty() {
            return Err(ConfigValidationError::EmptyField("label_column".to_string()));
        }

        if !(0.0..=1.0).contains(&self.correlation_threshold) {
            return Err(ConfigValidationError::InvalidThreshold {
                field: "correlation_threshold".to_string(),
                value: self.correlation_threshold,
            });
        }

        if !self.outlier_sigmas.is_finite() || self.outlier_sigmas <= 0.0 {
            return Err(ConfigValidationError::InvalidSigmas(self.outlier_sigmas));
        }

        for (field, value) in [
            ("eccentricity_tolerance", self.eccentricity_tolerance),
            ("ratio_tolerance", self.ratio_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigValidationError::InvalidTolerance {
                    field: field.to_string(),
                    value,
                });
            }
        }

        if self.label_min > self.label_max {
            return Err(ConfigValidationError::InvalidLabelRange {
                min: self.label_min,
                max: self.label_max,
            });
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("'{0}' must not be empty")]
    EmptyField(String),

    #[error("Invalid threshold for '{field}': {value} (must be between 0.0 and 1.0)")]
    InvalidThreshold { field: String, value: f64 },

    #[error("Invalid outlier sigmas: {0} (must be a positive number)")]
    InvalidSigmas(f64),

    #[error("Invalid tolerance for '{field}': {value} (must be a non-negative number)")]
    InvalidTolerance { field: String, value: f64 },

    #[error("Invalid label range: {min}..={max}")]
    InvalidLabelRange { min: i64, max: i64 },
}

impl From<ConfigValidationError> for crate::error::VerifyError {
    fn from(err: ConfigValidationError) -> Self {
        crate::error::VerifyError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`CheckConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct CheckConfigBuilder {
    missing_marker: Option<String>,
    label_column: Option<String>,
    correlation_threshold: Option<f64>,
    outlier_sigmas: Option<f64>,
    eccentricity_tolerance: Option<f64>,
    ratio_tolerance: Option<f64>,
    label_range: Option<(i64, i64)>,
}

impl CheckConfigBuilder {
    /// Start from an existing configuration instead of the defaults.
    pub fn from_config(config: CheckConfig) -> Self {
        Self {
            missing_marker: Some(config.missing_marker),
            label_column: Some(config.label_column),
            correlation_threshold: Some(config.correlation_threshold),
            outlier_sigmas: Some(config.outlier_sigmas),
            eccentricity_tolerance: Some(config.eccentricity_tolerance),
            ratio_tolerance: Some(config.ratio_tolerance),
            label_range: Some((config.label_min, config.label_max)),
        }
    }

    /// Set the raw token that marks a missing value.
    pub fn missing_marker(mut self, marker: impl Into<String>) -> Self {
        self.missing_marker = Some(marker.into());
        self
    }

    /// Set the label column name.
    pub fn label_column(mut self, column: impl Into<String>) -> Self {
        self.label_column = Some(column.into());
        self
    }

    /// Set the absolute correlation threshold (0.0 - 1.0).
    pub fn correlation_threshold(mut self, threshold: f64) -> Self {
        self.correlation_threshold = Some(threshold);
        self
    }

    /// Set the outlier distance in standard deviations.
    pub fn outlier_sigmas(mut self, sigmas: f64) -> Self {
        self.outlier_sigmas = Some(sigmas);
        self
    }

    /// Set the eccentricity identity tolerance.
    pub fn eccentricity_tolerance(mut self, tolerance: f64) -> Self {
        self.eccentricity_tolerance = Some(tolerance);
        self
    }

    /// Set the black-pixel ratio identity tolerance.
    pub fn ratio_tolerance(mut self, tolerance: f64) -> Self {
        self.ratio_tolerance = Some(tolerance);
        self
    }

    /// Set the inclusive range of plausible label values.
    pub fn label_range(mut self, min: i64, max: i64) -> Self {
        self.label_range = Some((min, max));
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `CheckConfig` or an error if validation fails.
    pub fn build(self) -> Result<CheckConfig, ConfigValidationError> {
        let defaults = CheckConfig::default();
        let (label_min, label_max) = self
            .label_range
            .unwrap_or((defaults.label_min, defaults.label_max));

        let config = CheckConfig {
            missing_marker: self.missing_marker.unwrap_or(defaults.missing_marker),
            label_column: self.label_column.unwrap_or(defaults.label_column),
            correlation_threshold: self
                .correlation_threshold
                .unwrap_or(defaults.correlation_threshold),
            outlier_sigmas: self.outlier_sigmas.unwrap_or(defaults.outlier_sigmas),
            eccentricity_tolerance: self
                .eccentricity_tolerance
                .unwrap_or(defaults.eccentricity_tolerance),
            ratio_tolerance: self.ratio_tolerance.unwrap_or(defaults.ratio_tolerance),
            label_min,
            label_max,
        };

        config.validate()?;
        Ok(config)
    }
}
