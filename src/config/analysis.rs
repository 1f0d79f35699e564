//! Analysis configuration

use serde::Deserialize;

use super::error::ConfigValidationError;
use crate::domain::analysis::MAX_SENSITIVITY_STEPS;

/// Defaults and limits for decision analysis
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Relative weight perturbation swept in each direction
    #[serde(default = "default_sensitivity_span")]
    pub sensitivity_span: f64,

    /// Perturbation steps on each side of the baseline
    #[serde(default = "default_sensitivity_steps")]
    pub sensitivity_steps: usize,

    /// Largest number of alternatives accepted over HTTP
    #[serde(default = "default_max_alternatives")]
    pub max_alternatives: usize,

    /// Largest number of criteria accepted over HTTP
    #[serde(default = "default_max_criteria")]
    pub max_criteria: usize,
}

impl AnalysisConfig {
    /// Validate analysis configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let span = self.sensitivity_span;
        if !(span.is_finite() && span > 0.0 && span < 1.0) {
            return Err(ConfigValidationError::InvalidSensitivitySpan(span));
        }
        if !(1..=MAX_SENSITIVITY_STEPS).contains(&self.sensitivity_steps) {
            return Err(ConfigValidationError::InvalidSensitivitySteps(
                self.sensitivity_steps,
            ));
        }
        if self.max_alternatives == 0 {
            return Err(ConfigValidationError::InvalidRequestLimit("alternatives"));
        }
        if self.max_criteria == 0 {
            return Err(ConfigValidationError::InvalidRequestLimit("criteria"));
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sensitivity_span: default_sensitivity_span(),
            sensitivity_steps: default_sensitivity_steps(),
            max_alternatives: default_max_alternatives(),
            max_criteria: default_max_criteria(),
        }
    }
}

fn default_sensitivity_span() -> f64 {
    0.10
}

fn default_sensitivity_steps() -> usize {
    10
}

fn default_max_alternatives() -> usize {
    200
}

fn default_max_criteria() -> usize {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_config_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.sensitivity_span, 0.10);
        assert_eq!(config.sensitivity_steps, 10);
        assert_eq!(config.max_alternatives, 200);
        assert_eq!(config.max_criteria, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_span_must_be_a_fraction() {
        for span in [0.0, 1.0, -0.1, f64::NAN] {
            let config = AnalysisConfig {
                sensitivity_span: span,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigValidationError::InvalidSensitivitySpan(_))
            ));
        }
    }

    #[test]
    fn test_steps_bounds() {
        let config = AnalysisConfig {
            sensitivity_steps: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidSensitivitySteps(0))
        );

        let config = AnalysisConfig {
            sensitivity_steps: 1001,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_request_limits_must_be_positive() {
        let config = AnalysisConfig {
            max_criteria: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidRequestLimit("criteria"))
        );
    }
}
