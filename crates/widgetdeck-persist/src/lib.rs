//! Stack persistence: one JSON snapshot in a durable key-value record.
//!
//! The snapshot holds each entry's widget id, label, and provider identity
//! (bound or pending), plus the cursor and the full-size flag. Loading
//! reconciles every entry against the live platform registry: widget ids are
//! not stable across provider reinstalls, so a persisted id must re-resolve
//! before it is presented as live. An entry that neither resolves nor has a
//! pending identity is dropped and counted, and the host surfaces the count
//! to the user instead of restoring silently.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use widgetdeck_core::{
    Binding, ProviderIdentity, ProviderRegistry, StackEntry, WidgetId, WidgetStack,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store read failed: {0}")]
    Read(String),
    #[error("store write failed: {0}")]
    Write(String),
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("snapshot is not valid JSON: {0}")]
    Codec(#[from] serde_json::Error),
}

/// Durable key-value record holding the snapshot document.
///
/// One document per `write` keeps the snapshot atomic: either the previous
/// stack or the new one is on disk, never a mix of keys.
pub trait StackStore {
    fn read(&self) -> Result<Option<String>, StoreError>;
    fn write(&mut self, snapshot: &str) -> Result<(), StoreError>;
    fn wipe(&mut self) -> Result<(), StoreError>;
    fn is_present(&self) -> bool;
}

/// In-memory store for tests and the headless demo.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: Option<String>,
}

impl StackStore for MemoryStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.snapshot.clone())
    }

    fn write(&mut self, snapshot: &str) -> Result<(), StoreError> {
        self.snapshot = Some(snapshot.to_string());
        Ok(())
    }

    fn wipe(&mut self) -> Result<(), StoreError> {
        self.snapshot = None;
        Ok(())
    }

    fn is_present(&self) -> bool {
        self.snapshot.is_some()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct EntryRecord {
    #[serde(rename = "widgetId")]
    widget_id: i64,
    label: String,
    #[serde(rename = "packageName", skip_serializing_if = "Option::is_none")]
    package_name: Option<String>,
    #[serde(rename = "className", skip_serializing_if = "Option::is_none")]
    class_name: Option<String>,
    #[serde(rename = "pendingPackageName", skip_serializing_if = "Option::is_none")]
    pending_package_name: Option<String>,
    #[serde(rename = "pendingClassName", skip_serializing_if = "Option::is_none")]
    pending_class_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StackRecord {
    widget_stack: Vec<EntryRecord>,
    current_index: usize,
    full_size_mode: bool,
}

impl EntryRecord {
    fn from_entry(entry: &StackEntry) -> Self {
        let (package_name, class_name) = match entry.descriptor() {
            Some(d) => (Some(d.identity.package.clone()), Some(d.identity.class.clone())),
            None => (None, None),
        };
        let (pending_package_name, pending_class_name) = match entry.pending_identity() {
            Some(c) => (Some(c.package.clone()), Some(c.class.clone())),
            None => (None, None),
        };
        Self {
            widget_id: entry.widget_id.0,
            label: entry.label.clone(),
            package_name,
            class_name,
            pending_package_name,
            pending_class_name,
        }
    }

    fn pending_identity(&self) -> Option<ProviderIdentity> {
        match (&self.pending_package_name, &self.pending_class_name) {
            (Some(package), Some(class)) => {
                Some(ProviderIdentity::new(package.clone(), class.clone()))
            }
            _ => None,
        }
    }
}

/// What a load reconstructed, before it is applied to a stack.
#[derive(Debug)]
pub struct RestoreOutcome {
    pub entries: Vec<StackEntry>,
    pub cursor: usize,
    pub full_size_mode: bool,
    /// Entries that neither re-resolved nor carried a pending identity.
    pub dropped: usize,
}

impl RestoreOutcome {
    pub fn apply_to(self, stack: &mut WidgetStack) -> usize {
        stack.clear();
        for entry in self.entries {
            stack.add(entry);
        }
        stack.set_cursor(self.cursor);
        stack.set_full_size_mode(self.full_size_mode);
        self.dropped
    }
}

/// Serialize the stack into the store as one atomic write.
pub fn save(stack: &WidgetStack, store: &mut dyn StackStore) -> Result<(), PersistError> {
    let record = StackRecord {
        widget_stack: stack.entries().iter().map(EntryRecord::from_entry).collect(),
        current_index: stack.cursor(),
        full_size_mode: stack.is_full_size_mode(),
    };
    let snapshot = serde_json::to_string(&record)?;
    store.write(&snapshot)?;
    log::debug!("saved widget stack snapshot: {} entries", record.widget_stack.len());
    Ok(())
}

/// Deserialize the store's snapshot and reconcile it against the registry.
///
/// Returns an empty outcome when no snapshot exists. The restored cursor is
/// kept only while it is still in range for the (possibly shrunk) entry
/// list; otherwise it resets to 0.
pub fn load(
    store: &dyn StackStore,
    registry: &dyn ProviderRegistry,
) -> Result<RestoreOutcome, PersistError> {
    let Some(snapshot) = store.read()? else {
        return Ok(RestoreOutcome {
            entries: Vec::new(),
            cursor: 0,
            full_size_mode: false,
            dropped: 0,
        });
    };
    let record: StackRecord = serde_json::from_str(&snapshot)?;

    let mut entries = Vec::new();
    let mut dropped = 0;
    for rec in &record.widget_stack {
        let widget_id = WidgetId(rec.widget_id);
        let resolved = if widget_id.is_bound() {
            registry.resolve_id(widget_id)
        } else {
            None
        };

        if let Some(descriptor) = resolved {
            entries.push(StackEntry {
                widget_id,
                label: rec.label.clone(),
                binding: Binding::Bound(descriptor),
            });
        } else if let Some(identity) = rec.pending_identity() {
            entries.push(StackEntry {
                widget_id,
                label: rec.label.clone(),
                binding: Binding::Pending(identity),
            });
        } else {
            log::warn!(
                "dropping persisted widget {} ({:?}): provider no longer resolves",
                widget_id,
                rec.label
            );
            dropped += 1;
        }
    }

    let cursor = if record.current_index < entries.len() {
        record.current_index
    } else {
        0
    };

    Ok(RestoreOutcome {
        entries,
        cursor,
        full_size_mode: record.full_size_mode,
        dropped,
    })
}

pub fn clear(store: &mut dyn StackStore) -> Result<(), PersistError> {
    store.wipe()?;
    Ok(())
}

pub fn has_snapshot(store: &dyn StackStore) -> bool {
    store.is_present()
}
