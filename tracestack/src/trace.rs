use crate::span::OpenSpan;

/// Per-thread trace state: a trace id, the observability decision frozen at
/// creation, and a strict LIFO stack of in-progress spans.
///
/// A `Trace` is owned exclusively by one execution context and is never
/// shared; [`copy_trace`]/[`set_trace`] move independent values between
/// contexts. Cloning performs a deep copy — the clone's stack is
/// structurally independent of the original.
///
/// [`copy_trace`]: crate::tracer::copy_trace
/// [`set_trace`]: crate::tracer::set_trace
#[derive(Clone, Debug)]
pub struct Trace {
    trace_id: String,
    observable: bool,
    stack: Vec<OpenSpan>,
}

impl Trace {
    /// Creates an empty trace. The observability flag is fixed for the
    /// lifetime of the trace.
    pub fn new(observable: bool, trace_id: impl Into<String>) -> Self {
        Trace {
            trace_id: trace_id.into(),
            observable,
            stack: Vec::new(),
        }
    }

    /// Pushes an in-progress span onto the tail of the stack.
    pub fn push(&mut self, span: OpenSpan) {
        self.stack.push(span);
    }

    /// Removes and returns the tail of the stack, or `None` when empty.
    pub fn pop(&mut self) -> Option<OpenSpan> {
        self.stack.pop()
    }

    /// The span currently at the tail of the stack, if any. New spans derive
    /// their parent from this element.
    pub fn top(&self) -> Option<&OpenSpan> {
        self.stack.last()
    }

    /// The trace identifier.
    pub fn id(&self) -> &str {
        &self.trace_id
    }

    /// Whether completed spans of this trace are delivered to observers.
    pub fn is_observable(&self) -> bool {
        self.observable
    }
}
