//! Conflict rendering.
//!
//! Unresolved hunks are rendered as diff3-style conflict blocks with
//! marker runs of the caller-supplied length, embedding the current,
//! ancestor and other content and the supplied identities.

use log::warn;

use crate::constants::{
    ANCESTOR_LABEL, ANCESTOR_MARKER_CHAR, CURRENT_MARKER_CHAR, OTHER_LABEL, OTHER_MARKER_CHAR,
    SEPARATOR_MARKER_CHAR,
};
use crate::line::{Line, LineSequence};

use super::hunk::{Hunk, HunkKind};

/// Identities embedded in conflict markers.
///
/// The git merge-driver contract supplies a single label (`%P`, the
/// merged file's path); it identifies the current side, while the
/// ancestor and incoming sides get fixed identities.
#[derive(Debug, Clone)]
pub struct MergeLabels {
    current: String,
    ancestor: String,
    other: String,
}

impl MergeLabels {
    /// Labels for a merge identified by the merged file's path.
    pub fn for_path(label: &str) -> Self {
        MergeLabels {
            current: label.to_string(),
            ancestor: ANCESTOR_LABEL.to_string(),
            other: OTHER_LABEL.to_string(),
        }
    }
}

/// Final output of one merge invocation: the merged sequence plus the
/// number of conflicts rendered into it.
#[derive(Debug)]
pub struct MergeResult {
    lines: LineSequence,
    conflicts: usize,
}

impl MergeResult {
    /// Returns the merged line sequence.
    pub fn lines(&self) -> &LineSequence {
        &self.lines
    }

    /// Returns true if at least one hunk rendered as a conflict.
    pub fn has_conflicts(&self) -> bool {
        self.conflicts > 0
    }

    /// Returns the number of rendered conflicts.
    pub fn conflict_count(&self) -> usize {
        self.conflicts
    }
}

/// Renders classified hunks into the merged sequence.
///
/// Resolved hunks contribute the content their kind selects; conflict
/// hunks are bracketed with marker runs of exactly `marker_length`
/// characters.
pub fn render(
    hunks: &[Hunk],
    ancestor: &LineSequence,
    current: &LineSequence,
    other: &LineSequence,
    marker_length: usize,
    labels: &MergeLabels,
) -> MergeResult {
    let mut lines = LineSequence::new();
    let mut conflicts = 0usize;

    for hunk in hunks {
        match hunk.kind {
            HunkKind::Unchanged => {
                lines.extend_from_slice(ancestor.slice(hunk.base.clone()));
            }
            HunkKind::OnlyCurrentChanged | HunkKind::BothSameChange => {
                lines.extend_from_slice(current.slice(hunk.current.clone()));
            }
            HunkKind::OnlyOtherChanged => {
                lines.extend_from_slice(other.slice(hunk.other.clone()));
            }
            HunkKind::Conflict => {
                warn!(
                    "conflict at ancestor lines {}..{}",
                    hunk.base.start, hunk.base.end
                );
                conflicts += 1;

                lines.push(marker_line(
                    CURRENT_MARKER_CHAR,
                    marker_length,
                    Some(&labels.current),
                ));
                lines.extend_from_slice(current.slice(hunk.current.clone()));
                lines.push(marker_line(
                    ANCESTOR_MARKER_CHAR,
                    marker_length,
                    Some(&labels.ancestor),
                ));
                lines.extend_from_slice(ancestor.slice(hunk.base.clone()));
                lines.push(marker_line(SEPARATOR_MARKER_CHAR, marker_length, None));
                lines.extend_from_slice(other.slice(hunk.other.clone()));
                lines.push(marker_line(
                    OTHER_MARKER_CHAR,
                    marker_length,
                    Some(&labels.other),
                ));
            }
        }
    }

    MergeResult { lines, conflicts }
}

fn marker_line(marker: char, length: usize, label: Option<&str>) -> Line {
    let mut content: String = std::iter::repeat(marker).take(length).collect();
    if let Some(label) = label {
        content.push(' ');
        content.push_str(label);
    }
    Line::new(content, true)
}
