use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum NodeType {
    Exact,      // True value
    LowerBound, // Search failed high
    UpperBound, // Search failed low
}

/// Largest table [`TranspositionTable::new`] will allocate.
pub const MAX_TABLE_SIZE_MB: usize = 1024;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TranspositionEntry {
    pub hash: u64,           // Position hash
    pub depth: u32,          // Remaining depth when stored
    pub node_type: NodeType, // Bound kind
    pub value: i32,          // Score of position
    pub age: u8,             // Turn the entry was written in
}

/// Probe counters since the last [`TranspositionTable::clear`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TableStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
    pub overwrites: u64,
}

/// Fixed-size hash table of search results.
///
/// A slot is chosen by `hash % size`. Storing the same hash always replaces
/// the slot; a different hash takes the slot only when it was searched at
/// least as deep as the resident or the resident is from an earlier turn.
#[derive(Clone)]
pub struct TranspositionTable {
    table: Vec<Option<TranspositionEntry>>,
    size: usize,
    age: u8,
    stats: TableStats,
}

impl TranspositionTable {
    /// Table using about `size_mb` megabytes, capped at
    /// [`MAX_TABLE_SIZE_MB`].
    pub fn new(size_mb: usize) -> Self {
        Self::with_entries(slots_for(size_mb))
    }

    pub fn with_entries(entries: usize) -> Self {
        let size = entries.max(1);
        TranspositionTable {
            table: vec![None; size],
            size,
            age: 0,
            stats: TableStats::default(),
        }
    }

    pub fn store(&mut self, hash: u64, depth: u32, node_type: NodeType, value: i32) {
        let index = self.get_index(hash);
        let entry = TranspositionEntry {
            hash,
            depth,
            node_type,
            value,
            age: self.age,
        };

        let replace = match self.table[index] {
            None => true,
            Some(existing) if existing.hash == hash => true,
            Some(existing) => existing.depth <= depth || existing.age != self.age,
        };
        if replace {
            if self.table[index].is_some() {
                self.stats.overwrites += 1;
            }
            self.table[index] = Some(entry);
            self.stats.stores += 1;
        }
    }

    pub fn probe(&mut self, hash: u64) -> Option<TranspositionEntry> {
        self.stats.probes += 1;
        let index = self.get_index(hash);
        match self.table[index] {
            Some(entry) if entry.hash == hash => {
                self.stats.hits += 1;
                Some(entry)
            }
            _ => None,
        }
    }

    /// Marks the start of a new turn; entries from earlier turns become
    /// replaceable by shallower results.
    pub fn new_search(&mut self) {
        self.age = self.age.wrapping_add(1);
    }

    pub fn clear(&mut self) {
        self.table.fill(None);
        self.age = 0;
        self.stats = TableStats::default();
    }

    pub fn capacity(&self) -> usize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.table.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> TableStats {
        self.stats
    }

    fn get_index(&self, hash: u64) -> usize {
        (hash % self.size as u64) as usize
    }
}

// number of entries that fit in size_mb megabytes
fn slots_for(size_mb: usize) -> usize {
    let entry_size = std::mem::size_of::<Option<TranspositionEntry>>();
    size_mb.min(MAX_TABLE_SIZE_MB).saturating_mul(1024 * 1024) / entry_size
}
