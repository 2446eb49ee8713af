//! The tracer facade.
//!
//! All operations act on the calling thread's current [`Trace`], created
//! lazily with a generated id and a sampler-derived observability flag the
//! first time it is needed. Trace state is thread-confined and never shared;
//! [`copy_trace`] and [`set_trace`] move independent values between threads.
//!
//! The observer registry and the sampler slot are process-wide and safe to
//! mutate from any thread at any time. A subscriber added or removed while
//! another thread is inside [`complete_span`]'s notification loop may or may
//! not see that span; visibility is best-effort.
//!
//! # Examples
//!
//! ```
//! use tracestack::tracer;
//!
//! tracer::init_trace(Some(true), "trace-1").unwrap();
//! tracer::start_span("handle_request");
//! // ... do work ...
//! let span = tracer::complete_span().expect("span was open");
//! assert_eq!(span.operation(), "handle_request");
//! ```

use std::cell::RefCell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{OnceLock, RwLock};

use dashmap::DashMap;

use crate::error::{TraceError, TraceResult};
use crate::ids;
use crate::observer::SpanObserver;
use crate::sampler::{AlwaysSampler, TraceSampler};
use crate::span::{OpenSpan, Span, SpanType};
use crate::trace::Trace;

thread_local! {
    static CURRENT_TRACE: RefCell<Option<Trace>> = const { RefCell::new(None) };
}

/// Process-wide observer registry, keyed by subscriber name.
static OBSERVERS: OnceLock<DashMap<String, Box<dyn SpanObserver>>> = OnceLock::new();

/// Process-wide sampler slot, read only when a trace is created without an
/// explicit observability preference.
static SAMPLER: OnceLock<RwLock<Box<dyn TraceSampler>>> = OnceLock::new();

#[inline]
fn observers() -> &'static DashMap<String, Box<dyn SpanObserver>> {
    OBSERVERS.get_or_init(DashMap::new)
}

#[inline]
fn sampler() -> &'static RwLock<Box<dyn TraceSampler>> {
    SAMPLER.get_or_init(|| RwLock::new(Box::new(AlwaysSampler)))
}

fn sample() -> bool {
    sampler().read().map(|s| s.sample()).unwrap_or(true)
}

/// Applies a function to the current thread's trace, creating one with a
/// generated id and a sampler-derived observability flag if none exists.
///
/// Note: this will panic if sampler or observer code reenters the tracer
/// while the thread-local slot is borrowed.
fn with_current<T>(f: impl FnOnce(&mut Trace) -> T) -> T {
    CURRENT_TRACE.with(|cell| {
        let mut slot = cell.borrow_mut();
        let trace = slot.get_or_insert_with(|| Trace::new(sample(), ids::random_id()));
        f(trace)
    })
}

/// Installs a brand-new trace for the current thread.
///
/// When `observable` is `None` the decision is made by the active sampler,
/// exactly once; either way it is frozen for the trace's lifetime.
///
/// Fails with [`TraceError::InvalidTraceId`] if `trace_id` is empty.
pub fn init_trace(observable: Option<bool>, trace_id: impl Into<String>) -> TraceResult<()> {
    let trace_id = trace_id.into();
    if trace_id.is_empty() {
        return Err(TraceError::InvalidTraceId(trace_id));
    }
    let observable = observable.unwrap_or_else(sample);
    set_trace(Trace::new(observable, trace_id));
    Ok(())
}

/// Opens a [`SpanType::Local`] span as a child of the current stack top (or
/// a root span if the stack is empty) and pushes it.
///
/// The push happens regardless of observability: non-observable traces still
/// track nesting so parent/child structure stays correct even though nothing
/// will be published.
pub fn start_span(operation: impl Into<String>) {
    start_span_with_type(operation, SpanType::Local)
}

/// Opens a span with an explicit [`SpanType`]. See [`start_span`].
pub fn start_span_with_type(operation: impl Into<String>, span_type: SpanType) {
    with_current(|trace| {
        let parent = trace.top().map(|open| open.span_id().to_string());
        let trace_id = trace.id().to_string();
        trace.push(OpenSpan::start(operation, span_type, trace_id, parent));
    })
}

/// Opens a span whose parent is specified externally, continuing a trace
/// that started in another process.
///
/// The new span carries `parent_trace_id` as its trace id and
/// `parent_span_id`, when given, as its parent.
///
/// Fails with [`TraceError::InvalidParentTraceId`] if `parent_trace_id` is
/// empty.
pub fn start_propagated_span(
    operation: impl Into<String>,
    parent_trace_id: &str,
    parent_span_id: Option<&str>,
) -> TraceResult<()> {
    if parent_trace_id.is_empty() {
        return Err(TraceError::InvalidParentTraceId(parent_trace_id.to_string()));
    }
    let span = OpenSpan::start(
        operation,
        SpanType::default(),
        parent_trace_id,
        parent_span_id.map(str::to_string),
    );
    with_current(|trace| trace.push(span));
    Ok(())
}

/// Pops the current thread's top open span and finalizes it.
///
/// Returns `None` when no span is open; that is a no-op, not an error. When
/// the current trace is observable the finalized span is delivered
/// synchronously to every registered observer before this returns; observer
/// order is unspecified. Non-observable traces skip delivery but the span is
/// still returned to the caller.
pub fn complete_span() -> Option<Span> {
    let (popped, observable) = with_current(|trace| (trace.pop(), trace.is_observable()));
    let span = popped?.complete();
    if observable {
        notify(&span);
    }
    Some(span)
}

/// Delivers a completed span to every registered observer. A panicking
/// observer is contained: the failure is logged and the remaining observers
/// are still notified. The span has already been popped, so the stack cannot
/// be corrupted here.
fn notify(span: &Span) {
    for entry in observers().iter() {
        if catch_unwind(AssertUnwindSafe(|| entry.value().consume(span))).is_err() {
            tracing::warn!(
                observer = entry.key().as_str(),
                trace_id = span.trace_id(),
                span_id = span.span_id(),
                "span observer panicked while consuming span"
            );
        }
    }
}

/// Registers `observer` under `name`, replacing and returning any observer
/// previously registered under that name.
pub fn subscribe<O>(name: impl Into<String>, observer: O) -> Option<Box<dyn SpanObserver>>
where
    O: SpanObserver + 'static,
{
    observers().insert(name.into(), Box::new(observer))
}

/// Removes and returns the observer registered under `name`, or `None` if
/// the name is unknown.
pub fn unsubscribe(name: &str) -> Option<Box<dyn SpanObserver>> {
    observers().remove(name).map(|(_, observer)| observer)
}

/// Replaces the process-wide sampler. Traces that already exist keep the
/// observability decision they were created with.
pub fn set_sampler<S>(sampler_impl: S)
where
    S: TraceSampler + 'static,
{
    let _ = sampler()
        .write()
        .map(|mut slot| *slot = Box::new(sampler_impl));
}

/// Replaces the current thread's trace wholesale, e.g. to restore a snapshot
/// captured with [`copy_trace`] when resuming work on another thread.
pub fn set_trace(trace: Trace) {
    CURRENT_TRACE.with(|cell| *cell.borrow_mut() = Some(trace));
}

/// Returns an independent snapshot of the current thread's trace. Mutating
/// the snapshot never affects the live trace, and vice versa.
pub fn copy_trace() -> Trace {
    with_current(|trace| trace.clone())
}

/// The current thread's trace id.
pub fn trace_id() -> String {
    with_current(|trace| trace.id().to_string())
}

/// Wraps a closure so that it runs under a snapshot of the current thread's
/// trace, taken at wrap time.
///
/// Intended for handing work to another thread or a pool while keeping it
/// attributed to the originating trace:
///
/// ```
/// use tracestack::tracer;
///
/// tracer::init_trace(Some(false), "job-trace").unwrap();
/// let job = tracer::wrap(|| tracer::trace_id());
/// let id = std::thread::spawn(job).join().unwrap();
/// assert_eq!(id, "job-trace");
/// ```
pub fn wrap<T, F>(f: F) -> impl FnOnce() -> T
where
    F: FnOnce() -> T,
{
    let trace = copy_trace();
    move || {
        set_trace(trace);
        f()
    }
}
