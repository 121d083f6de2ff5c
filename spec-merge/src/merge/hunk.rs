//! Aligned-region classification.

use std::ops::Range;

/// How an aligned region differs between the two sides, relative to the
/// ancestor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HunkKind {
    /// Neither side changed the region.
    Unchanged,
    /// Only the current side changed the region.
    OnlyCurrentChanged,
    /// Only the other side changed the region.
    OnlyOtherChanged,
    /// Both sides made the identical change; it is taken once.
    BothSameChange,
    /// Both sides changed the region differently.
    Conflict,
}

/// A maximal aligned region of the two edit scripts.
///
/// All three ranges index into their respective line sequences; any of
/// them may be empty (for insertions and deletions). Conflict hunks use
/// all three ranges for rendering; resolved hunks are read from the
/// side given by their kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    pub kind: HunkKind,
    pub base: Range<usize>,
    pub current: Range<usize>,
    pub other: Range<usize>,
}

impl Hunk {
    /// Creates a hunk with the given classification and ranges.
    pub fn new(
        kind: HunkKind,
        base: Range<usize>,
        current: Range<usize>,
        other: Range<usize>,
    ) -> Self {
        Hunk {
            kind,
            base,
            current,
            other,
        }
    }

    /// Returns true if this hunk renders as a conflict.
    pub fn is_conflict(&self) -> bool {
        self.kind == HunkKind::Conflict
    }
}
