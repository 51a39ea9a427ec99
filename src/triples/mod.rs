//! Read-only adapter over a set of (subject, predicate, object) facts
//!
//! The planner never sees the serialization the facts came from; whatever
//! parses them hands over plain [`Triple`] values and this module answers
//! pattern queries against them.

pub mod vocab;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// One semantic fact
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

impl Triple {
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}

/// Query pattern with zero or more positions fixed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriplePattern {
    subject: Option<String>,
    predicate: Option<String>,
    object: Option<String>,
}

impl TriplePattern {
    /// Pattern matching every triple in the store
    pub fn any() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    #[must_use]
    pub fn with_predicate(mut self, predicate: impl Into<String>) -> Self {
        self.predicate = Some(predicate.into());
        self
    }

    #[must_use]
    pub fn with_object(mut self, object: impl Into<String>) -> Self {
        self.object = Some(object.into());
        self
    }

    /// True when no position is fixed, i.e. the pattern is a full scan
    pub fn is_unconstrained(&self) -> bool {
        self.subject.is_none() && self.predicate.is_none() && self.object.is_none()
    }

    fn matches(&self, triple: &Triple) -> bool {
        fn position(fixed: Option<&String>, actual: &str) -> bool {
            fixed.is_none_or(|want| want.as_str() == actual)
        }

        position(self.subject.as_ref(), &triple.subject)
            && position(self.predicate.as_ref(), &triple.predicate)
            && position(self.object.as_ref(), &triple.object)
    }
}

/// In-memory fact set answering pattern queries
///
/// Insertion order is preserved; [`TripleStore::matching`] yields triples in
/// that order, which the graph builder relies on for deterministic
/// adjacency tie-breaking.
#[derive(Debug, Clone, Default)]
pub struct TripleStore {
    triples: Vec<Triple>,
    allow_full_scan: bool,
}

impl TripleStore {
    pub fn new() -> Self {
        Self {
            triples: Vec::new(),
            allow_full_scan: true,
        }
    }

    /// Reject [`TriplePattern::any`] queries made through [`TripleStore::query`]
    #[must_use]
    pub fn disallow_full_scan(mut self) -> Self {
        self.allow_full_scan = false;
        self
    }

    pub fn insert(&mut self, triple: Triple) {
        self.triples.push(triple);
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Lazy, restartable sequence of triples matching `pattern`
    pub fn matching<'a>(
        &'a self,
        pattern: &TriplePattern,
    ) -> impl Iterator<Item = &'a Triple> + use<'a> {
        let pattern = pattern.clone();
        self.triples.iter().filter(move |t| pattern.matches(t))
    }

    /// Like [`TripleStore::matching`], but honoring the full-scan policy
    pub fn query<'a>(
        &'a self,
        pattern: &TriplePattern,
    ) -> Result<impl Iterator<Item = &'a Triple> + use<'a>, QueryError> {
        if pattern.is_unconstrained() && !self.allow_full_scan {
            return Err(QueryError::FullScanDisallowed);
        }
        Ok(self.matching(pattern))
    }

    /// First object asserted for (subject, predicate), if any
    pub fn object_of<'a>(&'a self, subject: &str, predicate: &str) -> Option<&'a str> {
        self.matching(
            &TriplePattern::any()
                .with_subject(subject)
                .with_predicate(predicate),
        )
        .map(|t| t.object.as_str())
        .next()
    }

    /// All objects asserted for (subject, predicate), in insertion order
    pub fn objects_of<'a>(
        &'a self,
        subject: &str,
        predicate: &str,
    ) -> impl Iterator<Item = &'a str> + use<'a> {
        self.matching(
            &TriplePattern::any()
                .with_subject(subject)
                .with_predicate(predicate),
        )
        .map(|t| t.object.as_str())
    }

    /// All triples about `subject`, in insertion order
    pub fn about<'a>(&'a self, subject: &str) -> impl Iterator<Item = &'a Triple> + use<'a> {
        self.matching(&TriplePattern::any().with_subject(subject))
    }
}

impl FromIterator<Triple> for TripleStore {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        Self {
            triples: iter.into_iter().collect(),
            allow_full_scan: true,
        }
    }
}

impl FromIterator<(&'static str, &'static str, &'static str)> for TripleStore {
    fn from_iter<I: IntoIterator<Item = (&'static str, &'static str, &'static str)>>(
        iter: I,
    ) -> Self {
        iter.into_iter()
            .map(|(s, p, o)| Triple::new(s, p, o))
            .collect()
    }
}
