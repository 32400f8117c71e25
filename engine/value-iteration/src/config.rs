//! Solver configuration parameters.

use std::fmt;
use std::str::FromStr;

use crate::error::SolveError;

/// How a sweep reads the utilities it is updating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SweepMode {
    /// Gauss-Seidel: each backup reads values already updated earlier in the
    /// same sweep.
    #[default]
    InPlace,
    /// Jacobi: each sweep reads only the previous sweep's values
    /// (double-buffered), matching textbook value iteration bit for bit.
    Synchronous,
}

impl fmt::Display for SweepMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SweepMode::InPlace => write!(f, "in_place"),
            SweepMode::Synchronous => write!(f, "synchronous"),
        }
    }
}

impl FromStr for SweepMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "in_place" | "in-place" | "gauss_seidel" | "gauss-seidel" => Ok(SweepMode::InPlace),
            "synchronous" | "sync" | "jacobi" => Ok(SweepMode::Synchronous),
            other => Err(format!(
                "unknown sweep mode '{}', expected in_place or synchronous",
                other
            )),
        }
    }
}

/// Configuration for value iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// Discount factor applied to successor utilities, in (0, 1].
    pub discount: f64,

    /// Sweeps stop once the largest per-state change drops below this.
    pub threshold: f64,

    /// Hard cap on sweeps; exceeding it is a convergence failure.
    pub max_sweeps: u32,

    /// How far a non-terminal transition's probability mass may drift
    /// from 1 before the model is rejected.
    pub probability_tolerance: f64,

    /// Gauss-Seidel or synchronous sweeps.
    pub sweep_mode: SweepMode,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            discount: 0.99,
            threshold: 0.01,
            max_sweeps: 10_000,
            probability_tolerance: 1e-9,
            sweep_mode: SweepMode::InPlace,
        }
    }
}

impl SolverConfig {
    /// Create a config with a small sweep cap for tests.
    pub fn for_testing() -> Self {
        Self {
            max_sweeps: 1_000,
            ..Self::default()
        }
    }

    /// Builder pattern: set discount factor.
    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = discount;
        self
    }

    /// Builder pattern: set convergence threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Builder pattern: set sweep cap.
    pub fn with_max_sweeps(mut self, max_sweeps: u32) -> Self {
        self.max_sweeps = max_sweeps;
        self
    }

    /// Builder pattern: set probability tolerance.
    pub fn with_probability_tolerance(mut self, tolerance: f64) -> Self {
        self.probability_tolerance = tolerance;
        self
    }

    /// Builder pattern: set sweep mode.
    pub fn with_sweep_mode(mut self, mode: SweepMode) -> Self {
        self.sweep_mode = mode;
        self
    }

    pub fn validate(&self) -> Result<(), SolveError> {
        if !(self.discount > 0.0 && self.discount <= 1.0) {
            return Err(SolveError::InvalidConfig(format!(
                "discount must be in (0, 1], got {}",
                self.discount
            )));
        }
        if !(self.threshold > 0.0 && self.threshold.is_finite()) {
            return Err(SolveError::InvalidConfig(format!(
                "threshold must be positive, got {}",
                self.threshold
            )));
        }
        if self.max_sweeps == 0 {
            return Err(SolveError::InvalidConfig(
                "max_sweeps must be greater than 0".to_string(),
            ));
        }
        if !(self.probability_tolerance >= 0.0 && self.probability_tolerance.is_finite()) {
            return Err(SolveError::InvalidConfig(format!(
                "probability_tolerance must be non-negative, got {}",
                self.probability_tolerance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SolverConfig::default();
        assert!((config.discount - 0.99).abs() < 1e-12);
        assert!((config.threshold - 0.01).abs() < 1e-12);
        assert_eq!(config.max_sweeps, 10_000);
        assert_eq!(config.sweep_mode, SweepMode::InPlace);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = SolverConfig::default()
            .with_discount(0.9)
            .with_threshold(1e-6)
            .with_max_sweeps(50)
            .with_sweep_mode(SweepMode::Synchronous);

        assert!((config.discount - 0.9).abs() < 1e-12);
        assert!((config.threshold - 1e-6).abs() < 1e-18);
        assert_eq!(config.max_sweeps, 50);
        assert_eq!(config.sweep_mode, SweepMode::Synchronous);
    }

    #[test]
    fn test_validate_rejects_bad_discount() {
        for discount in [0.0, -0.5, 1.01, f64::NAN] {
            let err = SolverConfig::default()
                .with_discount(discount)
                .validate()
                .unwrap_err();
            assert!(err.to_string().contains("discount"));
        }
        assert!(SolverConfig::default().with_discount(1.0).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_threshold() {
        for threshold in [0.0, -1.0, f64::INFINITY] {
            let err = SolverConfig::default()
                .with_threshold(threshold)
                .validate()
                .unwrap_err();
            assert!(err.to_string().contains("threshold"));
        }
    }

    #[test]
    fn test_validate_rejects_zero_sweeps() {
        let err = SolverConfig::default()
            .with_max_sweeps(0)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("max_sweeps"));
    }

    #[test]
    fn test_sweep_mode_parse() {
        assert_eq!("in_place".parse::<SweepMode>(), Ok(SweepMode::InPlace));
        assert_eq!("Gauss-Seidel".parse::<SweepMode>(), Ok(SweepMode::InPlace));
        assert_eq!(
            "synchronous".parse::<SweepMode>(),
            Ok(SweepMode::Synchronous)
        );
        assert!("bogus".parse::<SweepMode>().is_err());
        assert_eq!(SweepMode::Synchronous.to_string(), "synchronous");
    }
}
