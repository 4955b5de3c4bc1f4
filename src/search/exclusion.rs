use bitvec::bitvec;
use bitvec::vec::BitVec;
use std::fmt;

/// Square bit matrix remembering block pairs that already failed to improve
///
/// Row and column indices are registry slots. Only the upper triangle (`i < j`) is
/// written by the swap pass, but clearing touches both so the matrix stays usable
/// from either side.
#[derive(Clone, Debug)]
pub struct ExclusionMatrix {
    bits: BitVec,
    size: usize,
}

impl ExclusionMatrix {
    /// Create a matrix with no excluded pairs
    pub fn new(size: usize) -> Self {
        Self {
            bits: bitvec![0; size * size],
            size,
        }
    }

    /// Number of rows and columns
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Mark a pair as excluded; out of range indices are ignored
    pub fn exclude(&mut self, i: usize, j: usize) {
        if let Some(index) = self.index(i, j) {
            self.bits.set(index, true);
        }
    }

    /// Test whether a pair is excluded
    pub fn is_excluded(&self, i: usize, j: usize) -> bool {
        self.index(i, j)
            .and_then(|index| self.bits.get(index).map(|bit| *bit))
            .unwrap_or(false)
    }

    /// Forget every exclusion involving `k`, as row or as column
    pub fn clear_index(&mut self, k: usize) {
        if k >= self.size {
            return;
        }
        for other in 0..self.size {
            if let Some(index) = self.index(k, other) {
                self.bits.set(index, false);
            }
            if let Some(index) = self.index(other, k) {
                self.bits.set(index, false);
            }
        }
    }

    /// Count excluded pairs
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    const fn index(&self, i: usize, j: usize) -> Option<usize> {
        if i < self.size && j < self.size {
            Some(i * self.size + j)
        } else {
            None
        }
    }
}

impl fmt::Display for ExclusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ExclusionMatrix({}x{}, {} excluded)",
            self.size,
            self.size,
            self.count()
        )
    }
}
