//! Record of operations performed during a run

use crate::types::{Operation, OperationKind};
use indicatif::ProgressBar;
use std::sync::{Mutex, MutexGuard};
use tracing::info;

/// Append-only list of completed operations, in completion order
///
/// Shared by the walker and every track task of a batch.
#[derive(Default)]
pub struct Journal {
    operations: Mutex<Vec<Operation>>,
    progress: Option<ProgressBar>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Journal that also ticks a progress spinner
    pub fn with_progress(progress: ProgressBar) -> Self {
        Self {
            operations: Mutex::new(Vec::new()),
            progress: Some(progress),
        }
    }

    pub fn record(&self, operation: Operation) {
        info!("{}", operation);
        if let Some(ref pb) = self.progress {
            pb.inc(1);
            pb.set_message(
                operation
                    .destination
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .into_owned(),
            );
        }
        self.lock().push(operation);
    }

    pub fn count(&self, kind: OperationKind) -> usize {
        self.lock().iter().filter(|op| op.kind == kind).count()
    }

    pub fn into_operations(self) -> Vec<Operation> {
        self.operations
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn finish(&self, message: &'static str) {
        if let Some(ref pb) = self.progress {
            pb.finish_with_message(message);
        }
    }

    // A panicking task cannot leave the list half-pushed
    fn lock(&self) -> MutexGuard<'_, Vec<Operation>> {
        self.operations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_by_kind() {
        let journal = Journal::new();
        journal.record(Operation::new(OperationKind::Mkdir, "a", "out/a"));
        journal.record(Operation::new(OperationKind::Copy, "a/x.jpg", "out/a/x.jpg"));
        journal.record(Operation::new(OperationKind::Copy, "a/y.txt", "out/a/y.txt"));

        assert_eq!(journal.count(OperationKind::Copy), 2);
        assert_eq!(journal.count(OperationKind::Convert), 0);
        let kinds: Vec<_> = journal.into_operations().iter().map(|op| op.kind).collect();
        assert_eq!(kinds, [OperationKind::Mkdir, OperationKind::Copy, OperationKind::Copy]);
    }

    #[test]
    fn test_concurrent_records() {
        let journal = Journal::new();
        std::thread::scope(|scope| {
            for i in 0..16 {
                let journal = &journal;
                scope.spawn(move || {
                    journal.record(Operation::new(
                        OperationKind::CopyTrack,
                        format!("{i}.flac"),
                        format!("out/{i}.flac"),
                    ));
                });
            }
        });
        assert_eq!(journal.into_operations().len(), 16);
    }
}
