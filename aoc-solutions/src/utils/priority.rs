//! Rucksack item priorities: `a..=z` → 1..=26, `A..=Z` → 27..=52

/// Priority of an item, or `None` for anything that is not an ASCII letter
pub fn priority(item: u8) -> Option<u32> {
    match item {
        b'a'..=b'z' => Some((item - b'a') as u32 + 1),
        b'A'..=b'Z' => Some((item - b'A') as u32 + 27),
        _ => None,
    }
}

/// Set of items as a 64-bit mask indexed by priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemSet(u64);

impl ItemSet {
    /// Collect the items of `bytes`, ignoring non-letters
    pub fn from_items(bytes: &[u8]) -> Self {
        Self(
            bytes
                .iter()
                .filter_map(|&b| priority(b))
                .fold(0, |mask, p| mask | 1 << p),
        )
    }

    pub fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Priority of the single item in the set, or `None` if it holds zero or
    /// several items
    pub fn single_priority(self) -> Option<u32> {
        (self.0.count_ones() == 1).then(|| self.0.trailing_zeros())
    }
}
