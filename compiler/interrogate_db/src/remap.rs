//! Old-to-new index mapping produced by a renumbering pass.

use rustc_hash::FxHashMap;

use crate::Index;

/// Maps indices from before a remap to after it.
#[derive(Clone, Debug, Default)]
pub struct IndexRemapper {
    map: FxHashMap<Index, Index>,
}

impl IndexRemapper {
    pub fn new() -> Self {
        IndexRemapper::default()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn add_mapping(&mut self, from: Index, to: Index) {
        self.map.insert(from, to);
    }

    pub fn in_map(&self, from: Index) -> bool {
        self.map.contains_key(&from)
    }

    /// The new index for `from`. Indices the pass never saw, and
    /// [`Index::NONE`] itself, map to [`Index::NONE`].
    pub fn map_from(&self, from: Index) -> Index {
        self.map.get(&from).copied().unwrap_or(Index::NONE)
    }

    /// Map every index of a list in place.
    pub fn map_all(&self, indices: &mut [Index]) {
        for index in indices {
            *index = self.map_from(*index);
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests;
