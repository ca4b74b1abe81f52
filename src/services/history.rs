use crate::models::decision::Decision;

/// One reversible transition: the decision an identity carried before the
/// change and where the cursor sat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub identity: String,
    pub before: Decision,
    pub cursor: usize,
}

/// Session-scoped LIFO undo stack; nothing here survives the process.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
