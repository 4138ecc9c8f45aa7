//! Diagnostic sinks
//!
//! Parsers never stop at the first problem. Everything they find is handed to
//! a [`DiagnosticSink`] and parsing resumes with a local recovery rule, so one
//! pass can report many problems.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::error::Error;

/// Receiver for problems found while tokenizing or parsing
///
/// A sink may be invoked zero or many times during one parse.
pub trait DiagnosticSink {
    fn report(&mut self, error: Error);
}

impl<F> DiagnosticSink for F
where
    F: FnMut(Error),
{
    fn report(&mut self, error: Error) {
        self(error);
    }
}

/// Ordered collection of reported problems
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Diagnostics {
    errors: Vec<Error>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns true if anything was reported
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn first(&self) -> Option<&Error> {
        self.errors.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Error> {
        self.errors.iter()
    }

    pub fn into_vec(self) -> Vec<Error> {
        self.errors
    }
}

impl DiagnosticSink for Diagnostics {
    fn report(&mut self, error: Error) {
        debug!(at = %error.position(), "{}", error.message());
        self.errors.push(error);
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Error;
    type IntoIter = std::slice::Iter<'a, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Error;
    type IntoIter = std::vec::IntoIter<Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

/// Thread-safe collector; clones report into the same list
///
/// Lets parses running on separate threads, each with its own parser, gather
/// their problems in one place.
#[derive(Clone, Debug, Default)]
pub struct SharedDiagnostics {
    errors: Arc<Mutex<Vec<Error>>>,
}

impl SharedDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.errors.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.lock().is_empty()
    }

    /// Copy of everything reported so far
    pub fn snapshot(&self) -> Vec<Error> {
        self.errors.lock().clone()
    }

    /// Removes and returns everything reported so far
    pub fn take(&self) -> Vec<Error> {
        std::mem::take(&mut *self.errors.lock())
    }
}

impl DiagnosticSink for SharedDiagnostics {
    fn report(&mut self, error: Error) {
        debug!(at = %error.position(), "{}", error.message());
        self.errors.lock().push(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, Pos};

    fn sample(offset: usize) -> Error {
        Error::at(ErrorKind::TrailingInput, Pos::new(offset, 1, 1))
    }

    #[test]
    fn test_collector_keeps_order() {
        let mut sink = Diagnostics::new();
        assert!(!sink.has_errors());
        sink.report(sample(3));
        sink.report(sample(1));
        assert_eq!(sink.len(), 2);
        let offsets: Vec<usize> = sink.iter().map(|e| e.position().offset).collect();
        assert_eq!(offsets, vec![3, 1]);
        assert_eq!(sink.first().map(|e| e.position().offset), Some(3));
    }

    #[test]
    fn test_closure_sink() {
        let mut seen = Vec::new();
        {
            let mut sink = |e: Error| seen.push(e.position().offset);
            sink.report(sample(7));
        }
        assert_eq!(seen, vec![7]);
    }

    #[test]
    fn test_shared_sink_clones_share_storage() {
        let shared = SharedDiagnostics::new();
        let mut a = shared.clone();
        let mut b = shared.clone();
        a.report(sample(1));
        b.report(sample(2));
        assert_eq!(shared.len(), 2);
        assert_eq!(shared.take().len(), 2);
        assert!(shared.is_empty());
    }
}
