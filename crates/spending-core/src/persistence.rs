//! Durable snapshot persistence plus the best-effort remote mirror.

use std::{
    collections::VecDeque,
    sync::atomic::{AtomicBool, Ordering},
};

use spending_domain::{Snapshot, Transaction};
use tracing::{debug, warn};

use crate::{
    remote::{RemoteOp, RemoteStore, SyncReport},
    storage::SnapshotSlot,
    CoreError,
};

/// Reads and writes the snapshot slot and mirrors transaction writes to an
/// optional remote store.
///
/// Local persistence is synchronous. Remote writes are queued in an outbox and
/// leave it when [`flush_remote`](Self::flush_remote) runs, which the tracker
/// does at the end of every commit; a failed op is logged and dropped, never
/// retried and never rolled back locally.
pub struct PersistenceGateway {
    slot: Box<dyn SnapshotSlot>,
    remote: Option<Box<dyn RemoteStore>>,
    remote_enabled: bool,
    outbox: VecDeque<RemoteOp>,
    pulling: AtomicBool,
}

impl PersistenceGateway {
    pub fn new(slot: Box<dyn SnapshotSlot>) -> Self {
        Self {
            slot,
            remote: None,
            remote_enabled: false,
            outbox: VecDeque::new(),
            pulling: AtomicBool::new(false),
        }
    }

    /// Attaches a remote mirror and enables it.
    pub fn with_remote(mut self, remote: Box<dyn RemoteStore>) -> Self {
        self.remote = Some(remote);
        self.remote_enabled = true;
        self
    }

    pub fn set_remote_enabled(&mut self, enabled: bool) {
        self.remote_enabled = enabled;
        if !enabled {
            self.outbox.clear();
        }
    }

    /// `true` when a remote is attached and the host reports it available.
    pub fn remote_active(&self) -> bool {
        self.remote_enabled && self.remote.is_some()
    }

    /// Serializes the whole snapshot over the slot. No partial merge.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), CoreError> {
        let payload = serde_json::to_string(snapshot)?;
        self.slot.write(&payload)
    }

    /// Reads the slot. Absent, unreadable, or malformed data yields the
    /// default empty snapshot.
    pub fn load(&self) -> Snapshot {
        let payload = match self.slot.read() {
            Ok(Some(payload)) => payload,
            Ok(None) => return Snapshot::default(),
            Err(err) => {
                warn!(error = %err, "snapshot slot unreadable, starting empty");
                return Snapshot::default();
            }
        };
        match serde_json::from_str(&payload) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(error = %err, "snapshot malformed, starting empty");
                Snapshot::default()
            }
        }
    }

    /// Removes the persisted snapshot; the next load yields defaults.
    pub fn clear_local(&self) -> Result<(), CoreError> {
        self.slot.clear()
    }

    /// Queues a mirror write of `transaction`.
    pub fn sync_remote(&mut self, transaction: &Transaction) {
        self.enqueue(RemoteOp::Put(transaction.clone()));
    }

    /// Queues a mirror delete of `id`.
    pub fn delete_remote(&mut self, id: i64) {
        self.enqueue(RemoteOp::Delete(id));
    }

    pub fn clear_remote(&mut self) {
        self.enqueue(RemoteOp::Clear);
    }

    fn enqueue(&mut self, op: RemoteOp) {
        if self.remote_active() {
            self.outbox.push_back(op);
        }
    }

    pub fn pending(&self) -> usize {
        self.outbox.len()
    }

    /// Drains the outbox against the remote, logging each failure.
    pub fn flush_remote(&mut self) -> SyncReport {
        let mut report = SyncReport::default();
        let Some(remote) = self.remote.as_deref().filter(|_| self.remote_enabled) else {
            self.outbox.clear();
            return report;
        };
        while let Some(op) = self.outbox.pop_front() {
            let result = match &op {
                RemoteOp::Put(txn) => remote.put(txn),
                RemoteOp::Delete(id) => remote.delete(*id),
                RemoteOp::Clear => remote.clear(),
            };
            match result {
                Ok(()) => {
                    debug!(op = %op.describe(), "remote mirror updated");
                    report.pushed += 1;
                }
                Err(err) => {
                    warn!(op = %op.describe(), error = %err, "remote mirror write failed");
                    report.failed += 1;
                }
            }
        }
        report
    }

    /// Fetches the remote transaction list.
    ///
    /// Returns `None` when the remote is inactive, empty, unreachable, or a
    /// pull is already in flight. A `Some` result is meant to replace the
    /// local list wholesale.
    pub fn pull_remote(&self) -> Option<Vec<Transaction>> {
        if !self.remote_active() {
            return None;
        }
        let Some(_guard) = PullGuard::acquire(&self.pulling) else {
            debug!("remote pull already in flight, skipping");
            return None;
        };
        let remote = self.remote.as_deref()?;
        match remote.fetch_all() {
            Ok(transactions) if transactions.is_empty() => None,
            Ok(transactions) => Some(transactions),
            Err(err) => {
                warn!(error = %err, "remote pull failed, keeping local data");
                None
            }
        }
    }

    pub fn is_pulling(&self) -> bool {
        self.pulling.load(Ordering::SeqCst)
    }
}

/// Holds the in-flight pull flag until dropped.
struct PullGuard<'a>(&'a AtomicBool);

impl<'a> PullGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| PullGuard(flag))
    }
}

impl Drop for PullGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
