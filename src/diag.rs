// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Diagnostics reported during resolution and synthesis.
//!
//! The resolution engine and node synthesis never abort on data found in the
//! graph: ambiguity and missing data degrade to a best-effort result plus a
//! [`Diagnostic`] delivered to a caller-supplied [`DiagnosticSink`]. Passing
//! the sink in explicitly keeps diagnostic emission deterministic and
//! testable; [`LogSink`] bridges it onto the `log` crate for production use.

use core::fmt;
use std::sync::Mutex;

/// How serious a diagnostic is.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Expected data was missing and a default was substituted.
    Debug,
    /// The graph was ambiguous and a first-found policy was applied.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Debug => write!(f, "debug"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A single diagnostic emitted during a translation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    severity: Severity,
    message: String,
}

impl Diagnostic {
    /// Creates a warning diagnostic.
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    /// Creates a debug diagnostic.
    #[must_use]
    pub fn debug(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Debug,
            message: message.into(),
        }
    }

    /// Returns the severity of this diagnostic.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the message of this diagnostic.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// A sink for diagnostics.
///
/// Reporting takes `&self` so one sink can be shared when a caller chooses to
/// translate components in parallel; implementations must tolerate concurrent
/// appends. Ordering is only guaranteed for the diagnostics of a single
/// component.
pub trait DiagnosticSink {
    /// Delivers one diagnostic to the sink.
    fn report(&self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to the `log` crate.
#[derive(Debug, Default, Copy, Clone)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, diagnostic: Diagnostic) {
        match diagnostic.severity() {
            Severity::Warning => log::warn!("{}", diagnostic.message()),
            Severity::Debug => log::debug!("{}", diagnostic.message()),
        }
    }
}

/// Collects diagnostics in memory, preserving emission order.
///
/// # Examples
///
/// ```
/// use soc_device_tree::diag::{CollectingSink, Diagnostic, DiagnosticSink, Severity};
///
/// let sink = CollectingSink::new();
/// sink.report(Diagnostic::warning("two masters on one irq port"));
/// let collected = sink.drain();
/// assert_eq!(collected.len(), 1);
/// assert_eq!(collected[0].severity(), Severity::Warning);
/// ```
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when nothing has been reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns the number of diagnostics collected so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Removes and returns every diagnostic collected so far.
    #[must_use]
    pub fn drain(&self) -> Vec<Diagnostic> {
        core::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Diagnostic>> {
        self.diagnostics
            .lock()
            .expect("diagnostics sink lock poisoned")
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: Diagnostic) {
        self.lock().push(diagnostic);
    }
}
