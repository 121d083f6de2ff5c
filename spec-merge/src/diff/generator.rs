//! LCS-based edit script generation.
//!
//! Produces a minimal edit script between the ancestor and one side.
//! Ties between equally minimal alignments are broken by retaining the
//! earliest possible matching lines, so output is deterministic and
//! matches conventional diff3 alignment.

use rustc_hash::FxHashMap;

use crate::line::LineSequence;

use super::{EditOp, EditScript};

/// Computes a minimal edit script transforming `ancestor` into `side`.
///
/// Pure function of its inputs; lines are compared by content only.
pub fn diff(ancestor: &LineSequence, side: &LineSequence) -> EditScript {
    let (a, b) = intern(ancestor, side);

    // Strip the common prefix and suffix before building the LCS table.
    let prefix = a
        .iter()
        .zip(b.iter())
        .take_while(|(x, y)| x == y)
        .count();
    let suffix = a[prefix..]
        .iter()
        .rev()
        .zip(b[prefix..].iter().rev())
        .take_while(|(x, y)| x == y)
        .count();

    let mut ops = Vec::with_capacity(a.len().max(b.len()));
    for i in 0..prefix {
        ops.push(EditOp::Retain { base: i, side: i });
    }

    middle_ops(
        &a[prefix..a.len() - suffix],
        &b[prefix..b.len() - suffix],
        prefix,
        &mut ops,
    );

    for i in 0..suffix {
        ops.push(EditOp::Retain {
            base: a.len() - suffix + i,
            side: b.len() - suffix + i,
        });
    }

    EditScript::new(ops, a.len(), b.len())
}

/// Emits the edit operations for the unmatched middle region.
///
/// `offset` is the index of `a[0]` and `b[0]` in their sequences; the
/// two offsets coincide because the stripped prefix retains lines
/// one-for-one.
fn middle_ops(a: &[u32], b: &[u32], offset: usize, ops: &mut Vec<EditOp>) {
    let n = a.len();
    let m = b.len();
    if n == 0 && m == 0 {
        return;
    }

    // lcs[i * (m + 1) + j] = length of the LCS of a[i..] and b[j..].
    let width = m + 1;
    let mut lcs = vec![0u32; (n + 1) * width];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i * width + j] = if a[i] == b[j] {
                lcs[(i + 1) * width + j + 1] + 1
            } else {
                lcs[(i + 1) * width + j].max(lcs[i * width + j + 1])
            };
        }
    }

    // Walk the table front to back. Matching lines are always retained
    // (the first match is part of some optimal alignment); on a tie the
    // deletion is taken first so replaced regions read delete-then-insert.
    let mut i = 0;
    let mut j = 0;
    while i < n && j < m {
        if a[i] == b[j] {
            ops.push(EditOp::Retain {
                base: offset + i,
                side: offset + j,
            });
            i += 1;
            j += 1;
        } else if lcs[(i + 1) * width + j] >= lcs[i * width + j + 1] {
            ops.push(EditOp::Delete { base: offset + i });
            i += 1;
        } else {
            ops.push(EditOp::Insert { side: offset + j });
            j += 1;
        }
    }
    while i < n {
        ops.push(EditOp::Delete { base: offset + i });
        i += 1;
    }
    while j < m {
        ops.push(EditOp::Insert { side: offset + j });
        j += 1;
    }
}

/// Interns both sequences so the LCS table compares small integers
/// instead of strings.
fn intern<'a>(a: &'a LineSequence, b: &'a LineSequence) -> (Vec<u32>, Vec<u32>) {
    let mut table: FxHashMap<&'a str, u32> = FxHashMap::default();
    let mut ids_for = |seq: &'a LineSequence, table: &mut FxHashMap<&'a str, u32>| {
        seq.lines()
            .iter()
            .map(|line| {
                let next = table.len() as u32;
                *table.entry(line.content()).or_insert(next)
            })
            .collect::<Vec<u32>>()
    };

    let ia = ids_for(a, &mut table);
    let ib = ids_for(b, &mut table);
    (ia, ib)
}
