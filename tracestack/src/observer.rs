use crate::span::Span;

/// Receives every completed [`Span`] of every observable trace.
///
/// `consume` is invoked synchronously on the thread that completed the
/// span, so it should not block; hand the span off to a channel or queue if
/// consumption is expensive. A panicking observer is isolated: the failure
/// is logged and the remaining observers are still notified.
pub trait SpanObserver: Send + Sync {
    /// Consumes one completed span. Side-effecting only.
    fn consume(&self, span: &Span);
}

impl<F> SpanObserver for F
where
    F: Fn(&Span) + Send + Sync,
{
    fn consume(&self, span: &Span) {
        self(span)
    }
}
