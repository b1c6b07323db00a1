//! Per-call results of a batch.

use std::fmt;

use serde_json::Value;

use crate::error::InvokeError;

#[derive(Debug)]
pub enum CallStatus {
    /// State-changing call accepted by the chain.
    Submitted { transaction: String },
    /// Pre-executed call with its result payload.
    PreExecuted { result: Value },
    Failed(InvokeError),
    /// Not attempted because the batch was cancelled.
    Cancelled,
}

#[derive(Debug)]
pub struct CallOutcome {
    pub function: String,
    pub status: CallStatus,
}

impl CallOutcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self.status,
            CallStatus::Submitted { .. } | CallStatus::PreExecuted { .. }
        )
    }

    /// The outcome line. With `detail` a failure also carries the error's
    /// debug form.
    pub fn describe(&self, detail: bool) -> String {
        match &self.status {
            CallStatus::Failed(e) if detail => format!("{} ({:?})", self, e),
            _ => self.to_string(),
        }
    }

    pub fn error(&self) -> Option<&InvokeError> {
        match &self.status {
            CallStatus::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn transaction(&self) -> Option<&str> {
        match &self.status {
            CallStatus::Submitted { transaction } => Some(transaction),
            _ => None,
        }
    }
}

impl fmt::Display for CallOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            CallStatus::Submitted { transaction } => {
                write!(f, "{}: invocation was successful, transaction {}", self.function, transaction)
            }
            CallStatus::PreExecuted { result } => {
                write!(f, "{}: invocation was successful, result {}", self.function, result)
            }
            CallStatus::Failed(e) => write!(f, "{}: invocation failed, {}", self.function, e),
            CallStatus::Cancelled => write!(f, "{}: cancelled", self.function),
        }
    }
}

/// Outcomes in the order the calls were requested.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<CallOutcome>,
}

impl BatchReport {
    pub fn push(&mut self, function: impl Into<String>, status: CallStatus) {
        self.outcomes.push(CallOutcome {
            function: function.into(),
            status,
        });
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CallOutcome> {
        self.outcomes.iter()
    }

    pub fn successes(&self) -> impl Iterator<Item = &CallOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.is_success())
    }

    pub fn failures(&self) -> impl Iterator<Item = &CallOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.error().is_some())
    }

    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(CallOutcome::is_success)
    }

    /// One line per call, in request order.
    pub fn render(&self, detail: bool) -> String {
        self.outcomes
            .iter()
            .map(|outcome| outcome.describe(detail))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<'a> IntoIterator for &'a BatchReport {
    type Item = &'a CallOutcome;
    type IntoIter = std::slice::Iter<'a, CallOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.iter()
    }
}
