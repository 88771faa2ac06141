//! Randomized error injection policy.

use rand::Rng;

/// Decides, per emitted event, whether the simulated step fails.
pub trait FailureInjector: Send + Sync {
    /// One independent Bernoulli trial. Stateless; no memory of past
    /// outcomes.
    fn should_fail(&self, probability: f64) -> bool;
}

/// Production policy: a fair random trial at the configured probability.
pub struct RandomFailure;

impl FailureInjector for RandomFailure {
    fn should_fail(&self, probability: f64) -> bool {
        rand::thread_rng().gen_bool(probability.clamp(0.0, 1.0))
    }
}

/// Every step fails. Used by soak runs and the error-path tests.
pub struct AlwaysFail;

impl FailureInjector for AlwaysFail {
    fn should_fail(&self, _probability: f64) -> bool {
        true
    }
}

/// No step ever fails.
pub struct NeverFail;

impl FailureInjector for NeverFail {
    fn should_fail(&self, _probability: f64) -> bool {
        false
    }
}
