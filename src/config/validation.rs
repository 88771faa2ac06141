//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (probability in [0,1], burst/delay ranges
//!   ordered, names non-empty)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SimConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::SimConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, PartialEq)]
pub enum ValidationError {
    InstanceNameEmpty,
    CounterPathEmpty,
    ErrorProbabilityOutOfRange(f64),
    BurstRangeInvalid { min: u32, max: u32 },
    StepDelayRangeInvalid { min_ms: u64, max_ms: u64 },
    MetricsAddressInvalid(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InstanceNameEmpty => write!(f, "instance.name must not be empty"),
            ValidationError::CounterPathEmpty => {
                write!(f, "sequence.counter_path must not be empty")
            }
            ValidationError::ErrorProbabilityOutOfRange(p) => {
                write!(f, "emitter.error_probability {} is outside [0, 1]", p)
            }
            ValidationError::BurstRangeInvalid { min, max } => {
                write!(f, "emitter burst range [{}, {}] is invalid", min, max)
            }
            ValidationError::StepDelayRangeInvalid { min_ms, max_ms } => {
                write!(
                    f,
                    "emitter step delay range [{} ms, {} ms] is invalid",
                    min_ms, max_ms
                )
            }
            ValidationError::MetricsAddressInvalid(addr) => {
                write!(f, "metrics.address {:?} is not a socket address", addr)
            }
        }
    }
}

/// Check a parsed configuration for semantic problems.
pub fn validate_config(config: &SimConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.instance.name.trim().is_empty() {
        errors.push(ValidationError::InstanceNameEmpty);
    }

    if config.sequence.counter_path.as_os_str().is_empty() {
        errors.push(ValidationError::CounterPathEmpty);
    }

    let probability = config.emitter.error_probability;
    if !(0.0..=1.0).contains(&probability) {
        errors.push(ValidationError::ErrorProbabilityOutOfRange(probability));
    }

    if config.emitter.burst_min == 0 || config.emitter.burst_min > config.emitter.burst_max {
        errors.push(ValidationError::BurstRangeInvalid {
            min: config.emitter.burst_min,
            max: config.emitter.burst_max,
        });
    }

    if config.emitter.step_delay_min_ms > config.emitter.step_delay_max_ms {
        errors.push(ValidationError::StepDelayRangeInvalid {
            min_ms: config.emitter.step_delay_min_ms,
            max_ms: config.emitter.step_delay_max_ms,
        });
    }

    if config.metrics.enabled && config.metrics.address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::MetricsAddressInvalid(
            config.metrics.address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
