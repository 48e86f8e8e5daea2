//! Field-by-field comparison of live values against fixtures

use crate::error::{VerifyError, VerifyResult};
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::hash::Hash;

/// A specific difference between the fixture and the live entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Difference {
    pub category: DiffCategory,
    pub path: String,
    pub expected: String,
    pub actual: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffCategory {
    Value,
    Count,
    Missing,
    Extra,
    Empty,
}

impl fmt::Display for DiffCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffCategory::Value => write!(f, "VALUE"),
            DiffCategory::Count => write!(f, "COUNT"),
            DiffCategory::Missing => write!(f, "MISSING"),
            DiffCategory::Extra => write!(f, "EXTRA"),
            DiffCategory::Empty => write!(f, "EMPTY"),
        }
    }
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:>7}] {} : expected={} actual={}",
            self.category, self.path, self.expected, self.actual
        )
    }
}

/// Accumulates differences for one entity, then passes or fails as a whole
#[derive(Debug)]
pub struct FieldCheck {
    subject: String,
    differences: Vec<Difference>,
}

impl FieldCheck {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            differences: Vec::new(),
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn differences(&self) -> &[Difference] {
        &self.differences
    }

    pub fn passed(&self) -> bool {
        self.differences.is_empty()
    }

    fn push(&mut self, category: DiffCategory, path: &str, expected: String, actual: String) {
        self.differences.push(Difference {
            category,
            path: path.to_string(),
            expected,
            actual,
        });
    }

    /// Scalars: exact equality
    pub fn equal<T>(&mut self, path: &str, expected: &T, actual: &T) -> &mut Self
    where
        T: PartialEq + Debug + ?Sized,
    {
        if expected != actual {
            self.push(
                DiffCategory::Value,
                path,
                format!("{expected:?}"),
                format!("{actual:?}"),
            );
        }
        self
    }

    /// Fails when the live value is empty
    pub fn non_empty(&mut self, path: &str, actual: &str) -> &mut Self {
        if actual.is_empty() {
            self.push(
                DiffCategory::Empty,
                path,
                "(non-empty)".to_string(),
                "\"\"".to_string(),
            );
        }
        self
    }

    pub fn count(&mut self, path: &str, expected: usize, actual: usize) -> &mut Self {
        if expected != actual {
            self.push(
                DiffCategory::Count,
                &format!("{path}.length"),
                expected.to_string(),
                actual.to_string(),
            );
        }
        self
    }

    /// Order-sensitive collections: same length, equal at every position
    pub fn ordered<T>(&mut self, path: &str, expected: &[T], actual: &[T]) -> &mut Self
    where
        T: PartialEq + Debug,
    {
        self.count(path, expected.len(), actual.len());
        for (i, (e, a)) in expected.iter().zip(actual.iter()).enumerate() {
            self.equal(&format!("{path}[{i}]"), e, a);
        }
        self
    }

    /// Unordered collections: equal as multisets, position ignored
    pub fn unordered<T>(&mut self, path: &str, expected: &[T], actual: &[T]) -> &mut Self
    where
        T: Eq + Hash + Debug,
    {
        let mut balance: HashMap<&T, i64> = HashMap::new();
        for e in expected {
            *balance.entry(e).or_default() += 1;
        }
        for a in actual {
            *balance.entry(a).or_default() -= 1;
        }

        // Iterate in input order so reports are deterministic
        for e in expected {
            if let Some(n) = balance.get_mut(e) {
                while *n > 0 {
                    self.push(
                        DiffCategory::Missing,
                        path,
                        format!("{e:?}"),
                        "(missing)".to_string(),
                    );
                    *n -= 1;
                }
            }
        }
        for a in actual {
            if let Some(n) = balance.get_mut(a) {
                while *n < 0 {
                    self.push(
                        DiffCategory::Extra,
                        path,
                        "(not present)".to_string(),
                        format!("{a:?}"),
                    );
                    *n += 1;
                }
            }
        }
        self
    }

    /// Pass when no differences were recorded
    pub fn finish(self) -> VerifyResult<()> {
        if self.differences.is_empty() {
            Ok(())
        } else {
            Err(VerifyError::FieldMismatch {
                subject: self.subject,
                differences: self.differences,
            })
        }
    }
}
