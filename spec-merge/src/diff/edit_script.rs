//! Edit script representation.

use std::ops::Range;

/// A single edit operation over ancestor line positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    /// The ancestor line at `base` survives as the side line at `side`.
    Retain { base: usize, side: usize },
    /// The ancestor line at `base` is absent from the side.
    Delete { base: usize },
    /// The side line at `side` has no ancestor counterpart.
    Insert { side: usize },
}

/// An ordered edit script transforming the ancestor sequence into one
/// side's sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditScript {
    ops: Vec<EditOp>,
    base_len: usize,
    side_len: usize,
}

/// A maximal run of non-retained positions: the ancestor lines in
/// `base` were replaced by the side lines in `side`. Either range may
/// be empty (pure insertion or pure deletion).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeHunk {
    pub base: Range<usize>,
    pub side: Range<usize>,
}

impl EditScript {
    pub(crate) fn new(ops: Vec<EditOp>, base_len: usize, side_len: usize) -> Self {
        EditScript {
            ops,
            base_len,
            side_len,
        }
    }

    /// Returns the operations in order.
    pub fn ops(&self) -> &[EditOp] {
        &self.ops
    }

    /// Number of lines in the ancestor sequence.
    pub fn base_len(&self) -> usize {
        self.base_len
    }

    /// Number of lines in the side sequence.
    pub fn side_len(&self) -> usize {
        self.side_len
    }

    /// Returns true if the side is textually identical to the ancestor.
    pub fn is_identity(&self) -> bool {
        self.ops.iter().all(|op| matches!(op, EditOp::Retain { .. }))
    }

    /// Collapses the script into maximal change hunks. Hunks are
    /// separated by at least one retained line and appear in ancestor
    /// order.
    pub fn change_hunks(&self) -> Vec<ChangeHunk> {
        let mut hunks = Vec::new();
        let mut open: Option<ChangeHunk> = None;
        let mut base_pos = 0usize;
        let mut side_pos = 0usize;

        for op in &self.ops {
            match op {
                EditOp::Retain { .. } => {
                    if let Some(hunk) = open.take() {
                        hunks.push(hunk);
                    }
                    base_pos += 1;
                    side_pos += 1;
                }
                EditOp::Delete { .. } => {
                    let hunk = open.get_or_insert_with(|| ChangeHunk {
                        base: base_pos..base_pos,
                        side: side_pos..side_pos,
                    });
                    hunk.base.end += 1;
                    base_pos += 1;
                }
                EditOp::Insert { .. } => {
                    let hunk = open.get_or_insert_with(|| ChangeHunk {
                        base: base_pos..base_pos,
                        side: side_pos..side_pos,
                    });
                    hunk.side.end += 1;
                    side_pos += 1;
                }
            }
        }

        if let Some(hunk) = open.take() {
            hunks.push(hunk);
        }
        hunks
    }

    /// Maps each ancestor line index to its side index, or `None` for
    /// lines the side deleted.
    pub fn base_to_side(&self) -> Vec<Option<usize>> {
        let mut map = vec![None; self.base_len];
        for op in &self.ops {
            if let EditOp::Retain { base, side } = op {
                map[*base] = Some(*side);
            }
        }
        map
    }
}
