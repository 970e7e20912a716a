//! Optional remote mirror of individual transactions.

use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};

use spending_domain::Transaction;

use crate::CoreError;

/// Document store keyed by transaction id.
pub trait RemoteStore: Send + Sync {
    fn put(&self, transaction: &Transaction) -> Result<(), CoreError>;
    fn delete(&self, id: i64) -> Result<(), CoreError>;
    fn fetch_all(&self) -> Result<Vec<Transaction>, CoreError>;
    fn clear(&self) -> Result<(), CoreError>;
}

/// A pending mirror write queued after a local mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteOp {
    Put(Transaction),
    Delete(i64),
    Clear,
}

impl RemoteOp {
    pub fn describe(&self) -> String {
        match self {
            RemoteOp::Put(txn) => format!("put {}", txn.id),
            RemoteOp::Delete(id) => format!("delete {}", id),
            RemoteOp::Clear => "clear".into(),
        }
    }
}

/// Outcome of draining the outbox.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub pushed: usize,
    pub failed: usize,
}

impl SyncReport {
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

/// In-process remote, with a switch to simulate an unreachable backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryRemote {
    documents: Arc<Mutex<BTreeMap<i64, Transaction>>>,
    offline: Arc<AtomicBool>,
}

impl MemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn seed(&self, transactions: impl IntoIterator<Item = Transaction>) {
        if let Ok(mut docs) = self.documents.lock() {
            for txn in transactions {
                docs.insert(txn.id, txn);
            }
        }
    }

    pub fn ids(&self) -> Vec<i64> {
        self.documents
            .lock()
            .map(|docs| docs.keys().copied().collect())
            .unwrap_or_default()
    }

    fn reachable(&self) -> Result<(), CoreError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(CoreError::Remote("remote store unreachable".into()))
        } else {
            Ok(())
        }
    }

    fn docs(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<i64, Transaction>>, CoreError> {
        self.documents
            .lock()
            .map_err(|_| CoreError::Remote("remote store poisoned".into()))
    }
}

impl RemoteStore for MemoryRemote {
    fn put(&self, transaction: &Transaction) -> Result<(), CoreError> {
        self.reachable()?;
        self.docs()?.insert(transaction.id, transaction.clone());
        Ok(())
    }

    fn delete(&self, id: i64) -> Result<(), CoreError> {
        self.reachable()?;
        self.docs()?.remove(&id);
        Ok(())
    }

    fn fetch_all(&self) -> Result<Vec<Transaction>, CoreError> {
        self.reachable()?;
        Ok(self.docs()?.values().cloned().collect())
    }

    fn clear(&self) -> Result<(), CoreError> {
        self.reachable()?;
        self.docs()?.clear();
        Ok(())
    }
}
