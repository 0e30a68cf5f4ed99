use std::fmt;

use crate::world::component::component_kinds::NetId;

const WORD_BITS: usize = 64;

/// A set of Component net ids, stored as a growable bitset.
///
/// Iteration is always in ascending id order.
#[derive(Clone, Default)]
pub struct ComponentMask {
    words: Vec<u64>,
}

impl ComponentMask {
    pub fn new() -> Self {
        Self { words: Vec::new() }
    }

    pub fn from_ids(ids: &[NetId]) -> Self {
        let mut mask = Self::new();
        for id in ids {
            mask.insert(*id);
        }
        mask
    }

    /// Returns true if the id was not yet set
    pub fn insert(&mut self, id: NetId) -> bool {
        let (word, bit) = Self::locate(id);
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }
        let was_set = self.words[word] & bit != 0;
        self.words[word] |= bit;
        !was_set
    }

    /// Returns true if the id was set
    pub fn remove(&mut self, id: NetId) -> bool {
        let (word, bit) = Self::locate(id);
        let Some(slot) = self.words.get_mut(word) else {
            return false;
        };
        let was_set = *slot & bit != 0;
        *slot &= !bit;
        self.trim();
        was_set
    }

    pub fn contains(&self, id: NetId) -> bool {
        let (word, bit) = Self::locate(id);
        self.words.get(word).map_or(false, |w| w & bit != 0)
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn clear(&mut self) {
        self.words.clear();
    }

    pub fn union_with(&mut self, other: &ComponentMask) {
        if other.words.len() > self.words.len() {
            self.words.resize(other.words.len(), 0);
        }
        for (word, theirs) in self.words.iter_mut().zip(&other.words) {
            *word |= theirs;
        }
    }

    pub fn intersect_with(&mut self, other: &ComponentMask) {
        self.words.truncate(other.words.len());
        for (word, theirs) in self.words.iter_mut().zip(&other.words) {
            *word &= theirs;
        }
        self.trim();
    }

    pub fn difference_with(&mut self, other: &ComponentMask) {
        for (word, theirs) in self.words.iter_mut().zip(&other.words) {
            *word &= !theirs;
        }
        self.trim();
    }

    pub fn union(&self, other: &ComponentMask) -> ComponentMask {
        let mut output = self.clone();
        output.union_with(other);
        output
    }

    pub fn intersection(&self, other: &ComponentMask) -> ComponentMask {
        let mut output = self.clone();
        output.intersect_with(other);
        output
    }

    pub fn difference(&self, other: &ComponentMask) -> ComponentMask {
        let mut output = self.clone();
        output.difference_with(other);
        output
    }

    pub fn iter(&self) -> ComponentMaskIter<'_> {
        ComponentMaskIter {
            words: &self.words,
            index: 0,
            current: self.words.first().copied().unwrap_or(0),
        }
    }

    fn locate(id: NetId) -> (usize, u64) {
        let id = id as usize;
        (id / WORD_BITS, 1u64 << (id % WORD_BITS))
    }

    // keeps equality structural: no trailing zero words
    fn trim(&mut self) {
        while self.words.last() == Some(&0) {
            self.words.pop();
        }
    }
}

impl PartialEq for ComponentMask {
    fn eq(&self, other: &Self) -> bool {
        self.words == other.words
    }
}

impl Eq for ComponentMask {}

impl fmt::Debug for ComponentMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<NetId> for ComponentMask {
    fn from_iter<I: IntoIterator<Item = NetId>>(iter: I) -> Self {
        let mut mask = Self::new();
        for id in iter {
            mask.insert(id);
        }
        mask
    }
}

impl<'a> IntoIterator for &'a ComponentMask {
    type Item = NetId;
    type IntoIter = ComponentMaskIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct ComponentMaskIter<'a> {
    words: &'a [u64],
    index: usize,
    current: u64,
}

impl Iterator for ComponentMaskIter<'_> {
    type Item = NetId;

    fn next(&mut self) -> Option<NetId> {
        loop {
            if self.current != 0 {
                let bit = self.current.trailing_zeros() as usize;
                self.current &= self.current - 1;
                return Some((self.index * WORD_BITS + bit) as NetId);
            }
            self.index += 1;
            self.current = *self.words.get(self.index)?;
        }
    }
}
