//! Service error formatting with redacted remote payloads.
//!
//! A [`ServiceError`] carries a `{}`-placeholder message template whose
//! parameters are classified safe-to-log or sensitive ([`Param`]). The full
//! substituted message is logged locally together with a machine-generated
//! error id; the remote caller receives only that id (as a
//! [`SerializableError`] payload) and a pointer to the server logs, never
//! the parameter values.
//!
//! This crate is independent of the tracing core; the two share an
//! error-handling philosophy, nothing more.
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
mod params;

pub use error::{SerializableError, ServiceError};
pub use params::Param;
