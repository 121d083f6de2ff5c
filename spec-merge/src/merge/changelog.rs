//! Changelog reconciliation.
//!
//! Changelog entries are append-only and order-stable, so additions
//! from both sides are expected to coexist. A divergent changelog chunk
//! is therefore not a conflict per se: it is split into entries and the
//! entries are unioned. Only two entries competing for the same slot
//! (the same heading line with different bodies) conflict, scoped to
//! just that entry, so unrelated additions from the other side survive.

use std::ops::Range;

use log::debug;

use crate::constants::ENTRY_HEADING_PREFIX;
use crate::line::{Line, LineSequence};

use super::hunk::{Hunk, HunkKind};
use super::policy::MergeInputs;

/// One changelog entry: a heading line (`* ...`) plus its body lines.
///
/// Lines before the first heading form a single leading entry of their
/// own. The range is absolute within the owning sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogEntry {
    range: Range<usize>,
}

impl ChangelogEntry {
    /// Returns the absolute line range of this entry.
    pub fn range(&self) -> &Range<usize> {
        &self.range
    }
}

/// Splits the given region of a sequence into changelog entries.
pub fn split_entries(seq: &LineSequence, region: &Range<usize>) -> Vec<ChangelogEntry> {
    let lines = seq.slice(region.clone());
    let mut entries = Vec::new();
    let mut start = 0usize;
    for (i, line) in lines.iter().enumerate() {
        if i > 0 && is_heading(line) {
            entries.push(ChangelogEntry {
                range: region.start + start..region.start + i,
            });
            start = i;
        }
    }
    if !lines.is_empty() {
        entries.push(ChangelogEntry {
            range: region.start + start..region.start + lines.len(),
        });
    }
    entries
}

fn is_heading(line: &Line) -> bool {
    line.content().starts_with(ENTRY_HEADING_PREFIX)
}

/// Reconciles a divergent changelog chunk at entry granularity.
///
/// Output order: ancestor entries first (ancestor order, merged
/// three-way each), then the current side's new entries, then the other
/// side's new entries, each side keeping its internal ordering.
pub(super) fn reconcile(
    inputs: &MergeInputs<'_>,
    base: Range<usize>,
    current: Range<usize>,
    other: Range<usize>,
) -> Vec<Hunk> {
    let base_entries = split_entries(inputs.ancestor, &base);
    let cur_entries = split_entries(inputs.current, &current);
    let other_entries = split_entries(inputs.other, &other);

    let mut cur_used = vec![false; cur_entries.len()];
    let mut other_used = vec![false; other_entries.len()];
    let mut hunks = Vec::new();

    // Ancestor entries, merged three-way each. Entries are matched
    // across versions by their heading line.
    for base_entry in &base_entries {
        let key = heading_of(inputs.ancestor, base_entry);
        let ci = find_entry(inputs.current, &cur_entries, &cur_used, key);
        let oi = find_entry(inputs.other, &other_entries, &other_used, key);
        if let Some(i) = ci {
            cur_used[i] = true;
        }
        if let Some(i) = oi {
            other_used[i] = true;
        }

        let base_range = base_entry.range().clone();
        let base_lines = inputs.ancestor.slice(base_range.clone());
        let cur_range = ci.map(|i| cur_entries[i].range().clone());
        let other_range = oi.map(|i| other_entries[i].range().clone());
        let empty_cur = current.start..current.start;
        let empty_other = other.start..other.start;

        let hunk = match (cur_range, other_range) {
            (Some(c), Some(o)) => {
                let cur_changed = inputs.current.slice(c.clone()) != base_lines;
                let other_changed = inputs.other.slice(o.clone()) != base_lines;
                let kind = match (cur_changed, other_changed) {
                    (false, false) => HunkKind::Unchanged,
                    (true, false) => HunkKind::OnlyCurrentChanged,
                    (false, true) => HunkKind::OnlyOtherChanged,
                    (true, true) => {
                        if inputs.current.slice(c.clone()) == inputs.other.slice(o.clone()) {
                            HunkKind::BothSameChange
                        } else {
                            HunkKind::Conflict
                        }
                    }
                };
                Hunk::new(kind, base_range, c, o)
            }
            // Deleted by current; a clean drop unless the other side
            // also rewrote the entry.
            (None, Some(o)) => {
                if inputs.other.slice(o.clone()) == base_lines {
                    Hunk::new(HunkKind::OnlyCurrentChanged, base_range, empty_cur, o)
                } else {
                    Hunk::new(HunkKind::Conflict, base_range, empty_cur, o)
                }
            }
            (Some(c), None) => {
                if inputs.current.slice(c.clone()) == base_lines {
                    Hunk::new(HunkKind::OnlyOtherChanged, base_range, c, empty_other)
                } else {
                    Hunk::new(HunkKind::Conflict, base_range, c, empty_other)
                }
            }
            // Deleted on both sides: the same change, taken once.
            (None, None) => Hunk::new(HunkKind::BothSameChange, base_range, empty_cur, empty_other),
        };
        hunks.push(hunk);
    }

    // Current's new entries, then other's. A heading both sides added
    // is kept once when the bodies agree and conflicts, scoped to that
    // entry, when they do not.
    let empty_base = base.end..base.end;
    for (i, entry) in cur_entries.iter().enumerate() {
        if cur_used[i] {
            continue;
        }
        let key = heading_of(inputs.current, entry);
        let cur_range = entry.range().clone();
        match find_entry(inputs.other, &other_entries, &other_used, key) {
            Some(oi) => {
                other_used[oi] = true;
                let other_range = other_entries[oi].range().clone();
                let kind = if inputs.current.slice(cur_range.clone())
                    == inputs.other.slice(other_range.clone())
                {
                    HunkKind::BothSameChange
                } else {
                    HunkKind::Conflict
                };
                hunks.push(Hunk::new(kind, empty_base.clone(), cur_range, other_range));
            }
            None => {
                hunks.push(Hunk::new(
                    HunkKind::OnlyCurrentChanged,
                    empty_base.clone(),
                    cur_range,
                    other.start..other.start,
                ));
            }
        }
    }
    for (i, entry) in other_entries.iter().enumerate() {
        if other_used[i] {
            continue;
        }
        hunks.push(Hunk::new(
            HunkKind::OnlyOtherChanged,
            empty_base.clone(),
            current.start..current.start,
            entry.range().clone(),
        ));
    }

    debug!(
        "changelog chunk reconciled: {} ancestor, {} current, {} other entries -> {} hunks",
        base_entries.len(),
        cur_entries.len(),
        other_entries.len(),
        hunks.len()
    );
    hunks
}

fn heading_of<'a>(seq: &'a LineSequence, entry: &ChangelogEntry) -> &'a str {
    seq.line(entry.range().start)
        .map_or("", |line| line.content())
}

fn find_entry(
    seq: &LineSequence,
    entries: &[ChangelogEntry],
    used: &[bool],
    key: &str,
) -> Option<usize> {
    entries
        .iter()
        .enumerate()
        .find(|(i, entry)| !used[*i] && heading_of(seq, entry) == key)
        .map(|(i, _)| i)
}
