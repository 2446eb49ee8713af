use std::time::{Duration, Instant, SystemTime};

use crate::ids;

/// Classifies the kind of work a span represents.
///
/// Remote variants mark the client and server halves of a cross-process
/// call; everything else is [`SpanType::Local`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SpanType {
    /// In-process work. This is the default for new spans.
    #[default]
    Local,
    /// The client side of a remote call.
    RemoteClient,
    /// The server side of a remote call.
    RemoteServer,
}

/// A finalized, immutable span.
///
/// Produced by [`complete_span`] from the [`OpenSpan`] at the top of the
/// current trace's stack. Once constructed a `Span` never changes; observers
/// receive it by reference and may clone it freely.
///
/// [`complete_span`]: crate::tracer::complete_span
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span {
    trace_id: String,
    span_id: String,
    parent_span_id: Option<String>,
    operation: String,
    span_type: SpanType,
    start_time: SystemTime,
    duration: Duration,
}

impl Span {
    /// The identifier of the trace this span belongs to.
    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    /// The identifier of this span.
    pub fn span_id(&self) -> &str {
        &self.span_id
    }

    /// The identifier of the parent span, or `None` for root spans.
    pub fn parent_span_id(&self) -> Option<&str> {
        self.parent_span_id.as_deref()
    }

    /// The operation label given to [`start_span`].
    ///
    /// [`start_span`]: crate::tracer::start_span
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// The span classification.
    pub fn span_type(&self) -> SpanType {
        self.span_type
    }

    /// Wall-clock time at which the span was started.
    pub fn start_time(&self) -> SystemTime {
        self.start_time
    }

    /// Elapsed time between span start and completion.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Elapsed nanoseconds between span start and completion.
    pub fn duration_nanos(&self) -> u128 {
        self.duration.as_nanos()
    }
}

/// An in-progress span, alive only on a [`Trace`]'s stack.
///
/// Carries the same identity fields as [`Span`] plus a monotonic start
/// marker that is read exactly once, when the span is completed, to compute
/// the duration.
///
/// [`Trace`]: crate::Trace
#[derive(Clone, Debug)]
pub struct OpenSpan {
    trace_id: String,
    span_id: String,
    parent_span_id: Option<String>,
    operation: String,
    span_type: SpanType,
    start_time: SystemTime,
    started: Instant,
}

impl OpenSpan {
    /// Starts a span with a freshly generated span id. The start markers
    /// (wall clock and monotonic) are captured here.
    pub fn start(
        operation: impl Into<String>,
        span_type: SpanType,
        trace_id: impl Into<String>,
        parent_span_id: Option<String>,
    ) -> Self {
        OpenSpan {
            trace_id: trace_id.into(),
            span_id: ids::random_id(),
            parent_span_id,
            operation: operation.into(),
            span_type,
            start_time: SystemTime::now(),
            started: Instant::now(),
        }
    }

    /// The identifier of the trace this span belongs to.
    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    /// The identifier of this span.
    pub fn span_id(&self) -> &str {
        &self.span_id
    }

    /// The identifier of the parent span, or `None` for root spans.
    pub fn parent_span_id(&self) -> Option<&str> {
        self.parent_span_id.as_deref()
    }

    /// The operation label.
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// The span classification.
    pub fn span_type(&self) -> SpanType {
        self.span_type
    }

    /// Finalizes this span, computing its duration from the monotonic start
    /// marker. Duration is non-negative by construction.
    pub(crate) fn complete(self) -> Span {
        Span {
            duration: self.started.elapsed(),
            trace_id: self.trace_id,
            span_id: self.span_id,
            parent_span_id: self.parent_span_id,
            operation: self.operation,
            span_type: self.span_type,
            start_time: self.start_time,
        }
    }
}
