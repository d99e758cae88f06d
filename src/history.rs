use crate::models::{AnalysisRecord, RecentAnalysis};
use std::collections::VecDeque;
use std::sync::Mutex;

pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Storage for the most recently completed analyses.
pub trait HistoryStore {
    /// Adds a record as the most recent one, evicting the oldest beyond capacity.
    fn save(&self, record: AnalysisRecord);

    /// Most-recent-first listing with the tag maps stripped.
    fn recent(&self) -> Vec<RecentAnalysis>;
}

/// Process-lifetime history kept in memory.
#[derive(Debug)]
pub struct MemoryHistory {
    capacity: usize,
    records: Mutex<VecDeque<AnalysisRecord>>,
}

impl MemoryHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            records: Mutex::new(VecDeque::with_capacity(capacity + 1)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<AnalysisRecord>> {
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl HistoryStore for MemoryHistory {
    fn save(&self, record: AnalysisRecord) {
        let mut records = self.lock();
        records.push_front(record);
        records.truncate(self.capacity);
    }

    fn recent(&self) -> Vec<RecentAnalysis> {
        self.lock().iter().map(RecentAnalysis::from).collect()
    }
}
