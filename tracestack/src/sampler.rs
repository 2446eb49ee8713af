use std::fmt;

use rand::Rng;

/// Decides whether a new trace is observable.
///
/// The sampler is consulted exactly once per trace, at creation, and only
/// when no explicit observability preference was supplied to
/// [`init_trace`]. The decision is frozen for the trace's lifetime, so a
/// sampler swap never affects traces that already exist.
///
/// Implementations may consult any external policy (probability, rate
/// limits, feature flags) but must not block: sampling happens on the
/// span-open hot path.
///
/// [`init_trace`]: crate::tracer::init_trace
pub trait TraceSampler: Send + Sync + fmt::Debug {
    /// Returns `true` if the next trace should be observable.
    fn sample(&self) -> bool;
}

/// The default [`TraceSampler`]: every trace is observable.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysSampler;

impl TraceSampler for AlwaysSampler {
    fn sample(&self) -> bool {
        true
    }
}

/// Samples a given fraction of traces.
///
/// Rates >= 1 always sample, rates <= 0 never sample. The decision is
/// independent per trace; no state is kept between calls.
#[derive(Clone, Copy, Debug)]
pub struct ProbabilitySampler {
    rate: f64,
}

impl ProbabilitySampler {
    /// Creates a sampler observing roughly `rate` of all traces.
    pub fn new(rate: f64) -> Self {
        ProbabilitySampler { rate }
    }
}

impl TraceSampler for ProbabilitySampler {
    fn sample(&self) -> bool {
        if self.rate >= 1.0 {
            true
        } else if self.rate <= 0.0 {
            false
        } else {
            rand::rng().random::<f64>() < self.rate
        }
    }
}
