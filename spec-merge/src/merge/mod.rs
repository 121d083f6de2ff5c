//! Three-way merge engine.
//!
//! Walks both edit scripts in lockstep over ancestor line positions and
//! classifies each aligned region:
//! 1. Collapse each script into maximal change hunks.
//! 2. Coalesce overlapping or adjacent hunks from the two sides into
//!    chunks, so neighbouring divergences produce one conflict block
//!    instead of many tiny ones.
//! 3. Classify each chunk: unchanged, one-sided, identical on both
//!    sides (taken once), or divergent.
//! 4. Divergent chunks are resolved by the policy of the section they
//!    fall in: plain diff3 conflicts by default, entry union inside the
//!    changelog.

mod changelog;
mod conflict;
mod hunk;
mod policy;

pub use changelog::{split_entries, ChangelogEntry};
pub use conflict::{render, MergeLabels, MergeResult};
pub use hunk::{Hunk, HunkKind};
pub use policy::{policy_for, ChangelogPolicy, Diff3Policy, MergeInputs, SectionPolicy};

use log::debug;

use crate::diff::EditScript;
use crate::error::{Error, Result};
use crate::line::LineSequence;
use crate::section::{Section, SectionKind};

/// The merge engine for one invocation.
pub struct Merge<'a> {
    inputs: MergeInputs<'a>,
    sections: &'a [Section],
}

impl<'a> Merge<'a> {
    /// Creates a merge over the three sequences and the classified
    /// ancestor sections.
    pub fn new(
        ancestor: &'a LineSequence,
        current: &'a LineSequence,
        other: &'a LineSequence,
        sections: &'a [Section],
    ) -> Self {
        Merge {
            inputs: MergeInputs {
                ancestor,
                current,
                other,
            },
            sections,
        }
    }

    /// Runs the merge, producing classified hunks in output order.
    ///
    /// Fails only on an internal invariant violation; well-formed edit
    /// scripts for the three sequences always merge (possibly with
    /// conflict hunks).
    pub fn run(&self, current: &EditScript, other: &EditScript) -> Result<Vec<Hunk>> {
        let base_len = self.inputs.ancestor.len();
        if current.base_len() != base_len || other.base_len() != base_len {
            return Err(Error::Internal(format!(
                "edit scripts disagree about the ancestor length: {} vs {} vs {}",
                base_len,
                current.base_len(),
                other.base_len()
            )));
        }

        let cur_hunks = current.change_hunks();
        let other_hunks = other.change_hunks();
        debug!(
            "merging: {} current hunks, {} other hunks over {} ancestor lines",
            cur_hunks.len(),
            other_hunks.len(),
            base_len
        );

        let mut hunks = Vec::new();
        let mut ci = 0usize;
        let mut oi = 0usize;
        let mut base_pos = 0usize;
        let mut cur_pos = 0usize;
        let mut other_pos = 0usize;

        loop {
            let next_cur = cur_hunks.get(ci).map(|h| h.base.start);
            let next_other = other_hunks.get(oi).map(|h| h.base.start);
            let start = match (next_cur, next_other) {
                (Some(c), Some(o)) => c.min(o),
                (Some(c), None) => c,
                (None, Some(o)) => o,
                (None, None) => {
                    // Trailing unchanged run.
                    if base_pos < base_len {
                        let len = base_len - base_pos;
                        hunks.push(Hunk::new(
                            HunkKind::Unchanged,
                            base_pos..base_len,
                            cur_pos..cur_pos + len,
                            other_pos..other_pos + len,
                        ));
                        cur_pos += len;
                        other_pos += len;
                    }
                    break;
                }
            };

            // Unchanged run up to the chunk.
            if start > base_pos {
                let len = start - base_pos;
                hunks.push(Hunk::new(
                    HunkKind::Unchanged,
                    base_pos..start,
                    cur_pos..cur_pos + len,
                    other_pos..other_pos + len,
                ));
                base_pos = start;
                cur_pos += len;
                other_pos += len;
            }

            // Coalesce overlapping or adjacent change hunks from both
            // sides into one maximal chunk.
            let chunk_ci = ci;
            let chunk_oi = oi;
            let mut end = start;
            loop {
                let mut grew = false;
                while ci < cur_hunks.len() && cur_hunks[ci].base.start <= end {
                    end = end.max(cur_hunks[ci].base.end);
                    ci += 1;
                    grew = true;
                }
                while oi < other_hunks.len() && other_hunks[oi].base.start <= end {
                    end = end.max(other_hunks[oi].base.end);
                    oi += 1;
                    grew = true;
                }
                if !grew {
                    break;
                }
            }

            let cur_range = side_range(cur_pos, start, end, &cur_hunks[chunk_ci..ci])?;
            let other_range = side_range(other_pos, start, end, &other_hunks[chunk_oi..oi])?;
            let chunk_base = start..end;

            let cur_changed = ci > chunk_ci;
            let other_changed = oi > chunk_oi;
            match (cur_changed, other_changed) {
                (true, false) => hunks.push(Hunk::new(
                    HunkKind::OnlyCurrentChanged,
                    chunk_base,
                    cur_range.clone(),
                    other_range.clone(),
                )),
                (false, true) => hunks.push(Hunk::new(
                    HunkKind::OnlyOtherChanged,
                    chunk_base,
                    cur_range.clone(),
                    other_range.clone(),
                )),
                (true, true) => {
                    let cur_lines = self.inputs.current.slice(cur_range.clone());
                    let other_lines = self.inputs.other.slice(other_range.clone());
                    if cur_lines == other_lines {
                        hunks.push(Hunk::new(
                            HunkKind::BothSameChange,
                            chunk_base,
                            cur_range.clone(),
                            other_range.clone(),
                        ));
                    } else {
                        let kind = self.section_kind_of(&chunk_base, base_len);
                        let policy = policy_for(kind);
                        hunks.extend(policy.resolve(
                            &self.inputs,
                            chunk_base,
                            cur_range.clone(),
                            other_range.clone(),
                        ));
                    }
                }
                (false, false) => {
                    return Err(Error::Internal(
                        "chunk without a contributing change hunk".to_string(),
                    ));
                }
            }

            base_pos = end;
            cur_pos = cur_range.end;
            other_pos = other_range.end;
        }

        if cur_pos != current.side_len() || other_pos != other.side_len() {
            return Err(Error::Internal(format!(
                "merge walk did not consume both sides: current {}/{}, other {}/{}",
                cur_pos,
                current.side_len(),
                other_pos,
                other.side_len()
            )));
        }
        Ok(hunks)
    }

    fn section_kind_of(&self, chunk_base: &std::ops::Range<usize>, base_len: usize) -> SectionKind {
        // The changelog claims insertion points on both of its
        // boundaries: entries appended at the very end of the section
        // land on the line it shares with whatever follows.
        self.sections
            .iter()
            .find(|s| s.kind() == SectionKind::Changelog && s.contains_chunk(chunk_base, base_len))
            .or_else(|| {
                self.sections
                    .iter()
                    .find(|s| s.contains_chunk(chunk_base, base_len))
            })
            .map_or(SectionKind::Preamble, Section::kind)
    }
}

/// Computes the side range corresponding to a chunk's base range: the
/// unchanged base lines map one-for-one, and each absorbed hunk trades
/// its base lines for its side lines.
fn side_range(
    side_start: usize,
    base_start: usize,
    base_end: usize,
    absorbed: &[crate::diff::ChangeHunk],
) -> Result<std::ops::Range<usize>> {
    let mut len = (base_end - base_start) as i64;
    for hunk in absorbed {
        len += hunk.side.len() as i64 - hunk.base.len() as i64;
    }
    let len = usize::try_from(len).map_err(|_| {
        Error::Internal(format!(
            "negative side extent for chunk {}..{}",
            base_start, base_end
        ))
    })?;
    Ok(side_start..side_start + len)
}
