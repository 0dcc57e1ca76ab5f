use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use crate::domain::report::Report;
use crate::render::RenderedArtifact;

/// In-memory report persistence shared across request handlers. Reports and
/// their rendered artifacts live for the whole process; there is no eviction,
/// TTL or cross-restart durability, which is the intended scope of this
/// store, not an oversight.
///
/// Distinct report ids never contend, but map mutation itself needs a lock
/// once handlers run on a multi-threaded runtime.
#[derive(Debug, Default)]
pub struct ReportStore {
    reports: RwLock<HashMap<Uuid, Report>>,
    artifacts: RwLock<HashMap<Uuid, RenderedArtifact>>,
}

impl ReportStore {
    pub fn insert(&self, report_id: Uuid, report: Report) {
        write_lock(&self.reports).insert(report_id, report);
    }

    pub fn get(&self, report_id: Uuid) -> Option<Report> {
        read_lock(&self.reports).get(&report_id).cloned()
    }

    pub fn put_artifact(&self, report_id: Uuid, artifact: RenderedArtifact) {
        write_lock(&self.artifacts).insert(report_id, artifact);
    }

    pub fn get_artifact(&self, report_id: Uuid) -> Option<RenderedArtifact> {
        read_lock(&self.artifacts).get(&report_id).cloned()
    }

    pub fn len(&self) -> usize {
        read_lock(&self.reports).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// A poisoned lock only means a writer panicked mid-insert; the map itself is
// still usable, so recover the guard instead of propagating the panic.
fn read_lock<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|e| e.into_inner())
}

fn write_lock<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|e| e.into_inner())
}
