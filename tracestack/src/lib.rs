//! In-process request tracing.
//!
//! This crate tracks nested units of work ("spans") per thread, decides once
//! per trace whether that trace is sampled for export, and fans completed
//! spans out to registered observers. It is the in-memory foundation a
//! service uses to produce distributed-tracing data; wire propagation,
//! storage, and transport are deliberately left to integrations built on top
//! of it.
//!
//! # Overview
//!
//! * Every thread owns at most one current [`Trace`]: a trace id, an
//!   observability flag frozen at creation, and a LIFO stack of open spans.
//! * The [`tracer`] module is the facade instrumented code calls:
//!   [`tracer::start_span`] pushes an [`OpenSpan`] derived from the current
//!   stack top, [`tracer::complete_span`] pops it, finalizes it into an
//!   immutable [`Span`], and — only for observable traces — delivers it to
//!   every registered [`SpanObserver`].
//! * A [`TraceSampler`] supplies the observability decision when a trace is
//!   created without an explicit preference. The default [`AlwaysSampler`]
//!   samples everything.
//!
//! # Examples
//!
//! ```
//! use tracestack::{tracer, Span};
//!
//! // Export completed spans somewhere (here: a logging observer).
//! tracer::subscribe("log", |span: &Span| {
//!     println!("{} took {:?}", span.operation(), span.duration());
//! });
//!
//! tracer::init_trace(None, tracestack::random_id()).unwrap();
//! tracer::start_span("load_user");
//! tracer::start_span("query");
//! tracer::complete_span();
//! tracer::complete_span();
//! # tracer::unsubscribe("log");
//! ```
#![warn(
    future_incompatible,
    missing_debug_implementations,
    missing_docs,
    nonstandard_style,
    rust_2018_idioms,
    unreachable_pub,
    unused
)]
#![cfg_attr(
    docsrs,
    feature(doc_cfg, doc_auto_cfg),
    deny(rustdoc::broken_intra_doc_links)
)]
#![cfg_attr(test, deny(warnings))]

mod error;
mod ids;
mod observer;
mod sampler;
mod span;
mod trace;
pub mod tracer;

pub use error::{TraceError, TraceResult};
pub use ids::random_id;
pub use observer::SpanObserver;
pub use sampler::{AlwaysSampler, ProbabilitySampler, TraceSampler};
pub use span::{OpenSpan, Span, SpanType};
pub use trace::Trace;
