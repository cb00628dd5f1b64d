//! In-memory store for unit tests

use async_trait::async_trait;
use shared::models::Employee;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::db::{BoxError, EmployeeStore};
use crate::search::{MatchMode, SearchQuery};

/// `EmployeeStore` over a fixed row set, with the same match/order/limit
/// rules as the PostgreSQL query.
pub struct MemoryStore {
    rows: Vec<Employee>,
    calls: AtomicUsize,
    failing: AtomicBool,
    ignore_limit: bool,
}

impl MemoryStore {
    pub fn new(rows: Vec<Employee>) -> Self {
        Self {
            rows,
            calls: AtomicUsize::new(0),
            failing: AtomicBool::new(false),
            ignore_limit: false,
        }
    }

    /// Return every match, as a misbehaving backend would
    pub fn ignoring_limit(mut self) -> Self {
        self.ignore_limit = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

/// Case-insensitive substring test on the three searchable fields,
/// the in-memory counterpart of `ILIKE '%term%'`
pub fn contains_ci(emp: &Employee, term: &str) -> bool {
    let needle = term.to_lowercase();
    emp.internal_code.to_string().contains(&needle)
        || emp.employee_code.to_string().contains(&needle)
        || emp.name.to_lowercase().contains(&needle)
}

fn starts_with_ci(emp: &Employee, term: &str) -> bool {
    let needle = term.to_lowercase();
    emp.internal_code.to_string().starts_with(&needle)
        || emp.employee_code.to_string().starts_with(&needle)
        || emp.name.to_lowercase().starts_with(&needle)
}

#[async_trait]
impl EmployeeStore for MemoryStore {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Employee>, BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(
                "connection to server at \"10.0.0.7\" failed: password authentication failed for user \"dw\""
                    .into(),
            );
        }

        let mut hits: Vec<Employee> = self
            .rows
            .iter()
            .filter(|emp| match query.mode {
                MatchMode::Contains => contains_ci(emp, &query.term),
                MatchMode::Prefix => starts_with_ci(emp, &query.term),
            })
            .cloned()
            .collect();
        hits.sort_by(|a, b| a.name.cmp(&b.name));
        if !self.ignore_limit {
            hits.truncate(query.limit);
        }
        Ok(hits)
    }
}

pub fn sample_employees() -> Vec<Employee> {
    vec![
        Employee::new(30045, 1107, "ANA SOUZA"),
        Employee::new(150, 2210, "LUCAS SILVA"),
        Employee::new(10, 3007, "MARIA SILVA"),
        Employee::new(2718, 4100, "RICARDO LIMA"),
        Employee::new(0, 0, ""),
        Employee::new(77, 5005, "beatriz costa"),
    ]
}

mod tests {
    use super::*;

    #[test]
    fn test_contains_ci_codes_and_name() {
        let ana = Employee::new(30045, 7, "Ana Souza");
        let lucas = Employee::new(150, 8, "LUCAS");

        assert!(contains_ci(&ana, "30"));
        assert!(!contains_ci(&lucas, "30"));
        assert!(contains_ci(&ana, "souza"));
        assert!(contains_ci(&lucas, "cas"));
        assert!(contains_ci(&lucas, "8"));
        assert!(!contains_ci(&lucas, "9"));
    }

    #[test]
    fn test_starts_with_ci() {
        let lucas = Employee::new(150, 2210, "Lucas Silva");
        assert!(starts_with_ci(&lucas, "15"));
        assert!(starts_with_ci(&lucas, "luc"));
        assert!(!starts_with_ci(&lucas, "silva"));
        assert!(!starts_with_ci(&lucas, "50"));
    }
}
