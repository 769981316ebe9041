use crate::ScaffoldErr;
use serde::Serialize;
use std::fmt;

/// How much a diagnostic undermines the completeness of the model
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Severity {
    /// The model is complete, but some schema shape was not turned into an association
    Warning,
    /// Schema data is missing from the model
    Error,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticKind {
    ConnectionUnavailable,
    QueryExecutionFailure,
    CardinalityMismatch,
    Timeout,
    MissingPrimaryKey,
    JunctionTooFewKeys,
    UnresolvedJunctionTarget,
    UnsupportedJunctionShape,
}

/// A recorded, non-fatal problem met during a build
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    /// The table the problem was found on, if any
    pub table: Option<String>,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.table {
            Some(table) => write!(f, "[{:?}] {}: {}", self.kind, table, self.message),
            None => write!(f, "[{:?}] {}", self.kind, self.message),
        }
    }
}

/// Diagnostics collected over one build, in the order they were raised
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failed operation. Every error is also emitted through `tracing`.
    pub fn push_err(&mut self, table: Option<&str>, err: &ScaffoldErr) {
        let kind = match err {
            ScaffoldErr::ConnectionUnavailable(_) => DiagnosticKind::ConnectionUnavailable,
            ScaffoldErr::CardinalityMismatch { .. } => DiagnosticKind::CardinalityMismatch,
            ScaffoldErr::Timeout { .. } => DiagnosticKind::Timeout,
            ScaffoldErr::MissingPrimaryKey(_) => DiagnosticKind::MissingPrimaryKey,
            _ => DiagnosticKind::QueryExecutionFailure,
        };
        tracing::error!(table = table.unwrap_or_default(), "{}", err);
        self.items.push(Diagnostic {
            severity: Severity::Error,
            kind,
            table: table.map(ToOwned::to_owned),
            message: err.to_string(),
        });
    }

    pub fn push_warning<M>(&mut self, kind: DiagnosticKind, table: &str, message: M)
    where
        M: Into<String>,
    {
        let message = message.into();
        tracing::warn!(table, "{}", message);
        self.items.push(Diagnostic {
            severity: Severity::Warning,
            kind,
            table: Some(table.to_owned()),
            message,
        });
    }

    pub fn has_errors(&self) -> bool {
        self.items
            .iter()
            .any(|diagnostic| diagnostic.severity == Severity::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(move |diagnostic| diagnostic.kind == kind)
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
