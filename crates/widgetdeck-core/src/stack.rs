//! The widget stack: an ordered sequence of hosted widget entries with a
//! single selection cursor. Pure ordering/cursor logic; views, sizing, and
//! persistence live elsewhere and observe this through the host.

use crate::provider::{ProviderDescriptor, ProviderIdentity};

/// Platform-assigned widget instance id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub i64);

impl WidgetId {
    /// Sentinel for "no platform id bound yet".
    pub const UNBOUND: WidgetId = WidgetId(-1);

    pub fn is_bound(&self) -> bool {
        *self != WidgetId::UNBOUND
    }
}

impl std::fmt::Display for WidgetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What an entry is bound to.
///
/// A pending bind/configure round-trip is data, not an in-flight task: a
/// process restart before the round-trip completes simply reloads the entry
/// still pending.
#[derive(Clone, Debug, PartialEq)]
pub enum Binding {
    /// Live, host-visible widget with a resolved provider descriptor.
    Bound(ProviderDescriptor),
    /// Awaiting a bind/configure round-trip; only the component is known.
    Pending(ProviderIdentity),
}

#[derive(Clone, Debug, PartialEq)]
pub struct StackEntry {
    pub widget_id: WidgetId,
    pub label: String,
    pub binding: Binding,
}

impl StackEntry {
    pub fn bound(widget_id: WidgetId, label: impl Into<String>, descriptor: ProviderDescriptor) -> Self {
        Self {
            widget_id,
            label: label.into(),
            binding: Binding::Bound(descriptor),
        }
    }

    pub fn pending(widget_id: WidgetId, label: impl Into<String>, identity: ProviderIdentity) -> Self {
        Self {
            widget_id,
            label: label.into(),
            binding: Binding::Pending(identity),
        }
    }

    pub fn descriptor(&self) -> Option<&ProviderDescriptor> {
        match &self.binding {
            Binding::Bound(d) => Some(d),
            Binding::Pending(_) => None,
        }
    }

    pub fn pending_identity(&self) -> Option<&ProviderIdentity> {
        match &self.binding {
            Binding::Bound(_) => None,
            Binding::Pending(c) => Some(c),
        }
    }
}

/// Ordered widget entries plus the selection cursor.
///
/// Invariant: the cursor is within `[0, len)` whenever the stack is
/// non-empty, and 0 when empty. All operations are total; out-of-range
/// input reports through `bool`/`Option` rather than panicking.
#[derive(Debug, Default)]
pub struct WidgetStack {
    entries: Vec<StackEntry>,
    cursor: usize,
    full_size_mode: bool,
}

impl WidgetStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: StackEntry) {
        self.entries.push(entry);
        // First entry becomes the selection.
        if self.entries.len() == 1 {
            self.cursor = 0;
        }
    }

    /// Remove and return the entry at `index`, rebasing the cursor onto the
    /// nearest surviving entry. The caller owns releasing any platform
    /// resources held by the returned entry.
    pub fn remove(&mut self, index: usize) -> Option<StackEntry> {
        if index >= self.entries.len() {
            return None;
        }
        let removed = self.entries.remove(index);
        if self.entries.is_empty() {
            self.cursor = 0;
        } else if index < self.cursor {
            self.cursor -= 1;
        } else if self.cursor >= self.entries.len() {
            self.cursor = self.entries.len() - 1;
        }
        Some(removed)
    }

    /// Reposition an entry. The cursor keeps pointing at the same logical
    /// entry: it follows the moved entry, or shifts to absorb the hole the
    /// move opened or filled around it.
    pub fn move_entry(&mut self, from: usize, to: usize) -> bool {
        let len = self.entries.len();
        if from >= len || to >= len {
            return false;
        }
        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);

        if self.cursor == from {
            self.cursor = to;
        } else if from < self.cursor && to >= self.cursor {
            self.cursor -= 1;
        } else if from > self.cursor && to <= self.cursor {
            self.cursor += 1;
        }
        true
    }

    /// Cyclically advance the cursor. No-op with fewer than two entries.
    pub fn navigate_next(&mut self) -> bool {
        if self.entries.len() <= 1 {
            return false;
        }
        self.cursor = (self.cursor + 1) % self.entries.len();
        true
    }

    /// Cyclically retreat the cursor. No-op with fewer than two entries.
    pub fn navigate_previous(&mut self) -> bool {
        if self.entries.len() <= 1 {
            return false;
        }
        self.cursor = if self.cursor == 0 {
            self.entries.len() - 1
        } else {
            self.cursor - 1
        };
        true
    }

    pub fn set_cursor(&mut self, index: usize) -> bool {
        if index >= self.entries.len() {
            return false;
        }
        self.cursor = index;
        true
    }

    pub fn current(&self) -> Option<&StackEntry> {
        self.entries.get(self.cursor)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[StackEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&StackEntry> {
        self.entries.get(index)
    }

    pub fn entry_mut(&mut self, index: usize) -> Option<&mut StackEntry> {
        self.entries.get_mut(index)
    }

    pub fn is_full_size_mode(&self) -> bool {
        self.full_size_mode
    }

    pub fn set_full_size_mode(&mut self, enabled: bool) {
        self.full_size_mode = enabled;
    }

    pub fn toggle_full_size_mode(&mut self) -> bool {
        self.full_size_mode = !self.full_size_mode;
        self.full_size_mode
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
        self.full_size_mode = false;
    }
}
