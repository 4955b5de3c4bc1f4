//! Block identifiers addressing nodes of the partition hierarchy
//!
//! Blocks created by cutting are named by the path of child slots taken from a
//! counter-allocated ancestor. Blocks allocated from the fresh-id counter (the root,
//! blocks of an initial configuration and merge results) carry only the counter value.

use crate::io::configuration::{MAX_PATH_DIGITS, POINT_CUT_CHILDREN};
use crate::io::error::{AlgorithmError, Result};
use std::fmt;
use std::str::FromStr;

/// Identifier of a block in the registry
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlockId {
    /// Block allocated from the fresh-id counter
    Counter(u64),
    /// Block reached from counter block `root` through base-4 child slots
    Path {
        /// Counter value of the ancestor the path starts at
        root: u64,
        /// Child slots, most significant first (never empty)
        digits: Vec<u8>,
    },
}

impl BlockId {
    /// Identifier of the implicit root block
    pub const ROOT: Self = Self::Counter(0);

    /// Number of child slots in the path (0 for counter ids)
    pub fn digit_count(&self) -> usize {
        match self {
            Self::Counter(_) => 0,
            Self::Path { digits, .. } => digits.len(),
        }
    }

    /// Counter value the path starts at
    pub const fn root(&self) -> u64 {
        match self {
            Self::Counter(root) | Self::Path { root, .. } => *root,
        }
    }

    /// Child slots of the path
    pub fn digits(&self) -> &[u8] {
        match self {
            Self::Counter(_) => &[],
            Self::Path { digits, .. } => digits,
        }
    }

    /// Identifier of the child in `slot`
    ///
    /// # Errors
    ///
    /// Returns an error if `slot` is not a base-4 digit or the path is already at
    /// its maximum length
    pub fn child(&self, slot: u8) -> Result<Self> {
        if slot >= POINT_CUT_CHILDREN {
            return Err(crate::io::error::invalid_parameter(
                "slot",
                &slot,
                &"child slots range over 0..=3",
            ));
        }
        if self.digit_count() >= MAX_PATH_DIGITS {
            return Err(AlgorithmError::IdentifierOverflow {
                id: self.to_string(),
                max_digits: MAX_PATH_DIGITS,
            });
        }

        let mut digits = self.digits().to_vec();
        digits.push(slot);
        Ok(Self::Path {
            root: self.root(),
            digits,
        })
    }

    /// Identifier of the block this one was cut from
    ///
    /// # Errors
    ///
    /// Returns an error for counter ids, which were never produced by a cut
    pub fn parent(&self) -> Result<Self> {
        match self {
            Self::Counter(_) => Err(AlgorithmError::NoParent {
                id: self.to_string(),
            }),
            Self::Path { root, digits } => {
                let prefix = digits.split_last().map_or(&[][..], |(_, rest)| rest);
                if prefix.is_empty() {
                    Ok(Self::Counter(*root))
                } else {
                    Ok(Self::Path {
                        root: *root,
                        digits: prefix.to_vec(),
                    })
                }
            }
        }
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root())?;
        for digit in self.digits() {
            write!(f, ".{digit}")?;
        }
        Ok(())
    }
}

impl FromStr for BlockId {
    type Err = AlgorithmError;

    fn from_str(text: &str) -> Result<Self> {
        let mut parts = text.trim().split('.');
        let root = parts
            .next()
            .and_then(|part| part.trim().parse::<u64>().ok())
            .ok_or_else(|| {
                crate::io::error::invalid_parameter("block id", &text, &"expected a decimal root")
            })?;

        let mut id = Self::Counter(root);
        for part in parts {
            let slot = part.trim().parse::<u8>().map_err(|e| {
                crate::io::error::invalid_parameter("block id", &text, &e.to_string())
            })?;
            id = id.child(slot)?;
        }
        Ok(id)
    }
}

