use std::sync::{Mutex, PoisonError};

use vigil_core::Issue;

/// Mutex-guarded sink shared by concurrently running engines.
#[derive(Debug, Default)]
pub struct IssueCollector {
    issues: Mutex<Vec<Issue>>,
}

impl IssueCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collect(&self, issues: impl IntoIterator<Item = Issue>) {
        self.issues
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(issues);
    }

    /// A copy of everything collected so far. Later collection does not
    /// affect the returned vector.
    #[must_use]
    pub fn issues(&self) -> Vec<Issue> {
        self.issues
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn clear(&self) {
        self.issues
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_core::{Category, Priority, Severity};

    fn issue(id: &str) -> Issue {
        Issue::new(id, Category::Testing, Severity::Low, Priority::P3, id)
    }

    #[test]
    fn issues_returns_a_detached_copy() {
        let collector = IssueCollector::new();
        collector.collect([issue("a")]);
        let mut snapshot = collector.issues();
        snapshot.push(issue("injected"));
        snapshot[0].title = "mutated".into();

        collector.collect([issue("b")]);
        let current = collector.issues();
        assert_eq!(current.len(), 2);
        assert_eq!(current[0].title, "a");
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn concurrent_collect_keeps_everything() {
        let collector = std::sync::Arc::new(IssueCollector::new());
        let handles: Vec<_> = (0..8)
            .map(|n| {
                let c = std::sync::Arc::clone(&collector);
                std::thread::spawn(move || {
                    for i in 0..50 {
                        c.collect([issue(&format!("{n}-{i}"))]);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(collector.len(), 400);
    }
}
