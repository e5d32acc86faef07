//! Single-input form settings

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejection of a manually entered value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("years of experience must be a finite number")]
    NotFinite,

    #[error("years of experience must be between {min} and {max}, got {value}")]
    OutOfRange { value: f64, min: f64, max: f64 },

    #[error("years of experience must be a multiple of {step}, got {value}")]
    OffStep { value: f64, step: f64 },
}

/// Bounds of the numeric stepper and the trend curve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    /// Smallest accepted value
    #[serde(default = "default_min")]
    pub min: f64,

    /// Largest accepted value
    #[serde(default = "default_max")]
    pub max: f64,

    /// Stepper increment
    #[serde(default = "default_step")]
    pub step: f64,

    /// Initial stepper value
    #[serde(default = "default_value")]
    pub default: f64,

    /// Number of evenly spaced points on the trend curve
    #[serde(default = "default_curve_points")]
    pub curve_points: usize,
}

fn default_min() -> f64 {
    0.0
}

fn default_max() -> f64 {
    50.0
}

fn default_step() -> f64 {
    0.5
}

fn default_value() -> f64 {
    1.0
}

fn default_curve_points() -> usize {
    100
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            min: default_min(),
            max: default_max(),
            step: default_step(),
            default: default_value(),
            curve_points: default_curve_points(),
        }
    }
}

impl FormConfig {
    /// Check that the bounds describe a usable stepper
    pub fn validate(&self) -> Result<()> {
        if !(self.min.is_finite() && self.max.is_finite() && self.min < self.max) {
            return Err(anyhow!(
                "form bounds must be finite with min < max (got {}..{})",
                self.min,
                self.max
            ));
        }
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(anyhow!("form step must be positive (got {})", self.step));
        }
        if self.check(self.default).is_err() {
            return Err(anyhow!(
                "form default {} is not a valid stepper value",
                self.default
            ));
        }
        if self.curve_points < 2 {
            return Err(anyhow!(
                "trend curve needs at least 2 points (got {})",
                self.curve_points
            ));
        }
        Ok(())
    }

    /// Check a submitted value against the stepper constraints
    pub fn check(&self, value: f64) -> Result<f64, InputError> {
        if !value.is_finite() {
            return Err(InputError::NotFinite);
        }
        if value < self.min || value > self.max {
            return Err(InputError::OutOfRange {
                value,
                min: self.min,
                max: self.max,
            });
        }

        // Tolerate float noise from clients that accumulate steps
        let steps = (value - self.min) / self.step;
        if (steps - steps.round()).abs() > 1e-9 {
            return Err(InputError::OffStep {
                value,
                step: self.step,
            });
        }

        Ok(value)
    }

    /// Evenly spaced x values across [min, max], endpoints included
    pub fn curve_inputs(&self) -> Vec<f64> {
        linspace(self.min, self.max, self.curve_points)
    }
}

/// `n` evenly spaced values from `start` to `end` inclusive
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}
