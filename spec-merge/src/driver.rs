//! Driver entry point.
//!
//! Reads the three input files, runs the merge pipeline and rewrites
//! the current file in place, exactly as git's merge-driver mechanism
//! expects: a clean merge leaves the merged content in place of "ours",
//! a conflicted merge leaves conflict markers behind. Nothing is
//! written if reading or merging fails.

use std::fs;
use std::path::Path;

use log::debug;

use crate::diff::diff;
use crate::error::{Error, Result};
use crate::line::LineSequence;
use crate::merge::{render, Merge, MergeLabels};
use crate::section;

/// Outcome of a completed merge invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// No unresolved conflicts; the merged file is clean.
    Clean,
    /// The given number of conflict blocks were written.
    Conflicts(usize),
}

impl MergeOutcome {
    /// Returns true if the merge resolved without conflicts.
    pub fn is_clean(&self) -> bool {
        matches!(self, MergeOutcome::Clean)
    }
}

/// Merges three texts, returning the merged content and the outcome.
///
/// The merged text follows the current side's trailing-newline
/// convention (falling back to the other side, then the ancestor, when
/// the current text is empty).
pub fn merge_text(
    ancestor: &str,
    current: &str,
    other: &str,
    marker_length: usize,
    label: &str,
) -> Result<(String, MergeOutcome)> {
    if marker_length == 0 {
        return Err(Error::InvalidMarkerLength(marker_length));
    }

    let ancestor_seq = LineSequence::tokenize(ancestor);
    let current_seq = LineSequence::tokenize(current);
    let other_seq = LineSequence::tokenize(other);

    let current_script = diff(&ancestor_seq, &current_seq);
    let other_script = diff(&ancestor_seq, &other_seq);
    let sections = section::layout(&ancestor_seq, &current_script, &other_script);

    let hunks = Merge::new(&ancestor_seq, &current_seq, &other_seq, &sections)
        .run(&current_script, &other_script)?;

    let labels = MergeLabels::for_path(label);
    let result = render(
        &hunks,
        &ancestor_seq,
        &current_seq,
        &other_seq,
        marker_length,
        &labels,
    );

    let trailing = trailing_convention(&current_seq, &other_seq, &ancestor_seq);
    let outcome = if result.has_conflicts() {
        MergeOutcome::Conflicts(result.conflict_count())
    } else {
        MergeOutcome::Clean
    };
    Ok((result.lines().render(trailing), outcome))
}

/// Runs one full driver invocation over the three file paths.
///
/// The current file is overwritten in place with the merged content.
/// On error nothing is written, so a failed run leaves the work tree
/// untouched.
pub fn run(
    ancestor_path: &Path,
    current_path: &Path,
    other_path: &Path,
    marker_length: usize,
    label: &str,
) -> Result<MergeOutcome> {
    if marker_length == 0 {
        return Err(Error::InvalidMarkerLength(marker_length));
    }

    let ancestor = fs::read_to_string(ancestor_path)?;
    let current = fs::read_to_string(current_path)?;
    let other = fs::read_to_string(other_path)?;
    debug!(
        "merging {} ({} bytes ancestor, {} bytes current, {} bytes other)",
        label,
        ancestor.len(),
        current.len(),
        other.len()
    );

    let (merged, outcome) = merge_text(&ancestor, &current, &other, marker_length, label)?;
    fs::write(current_path, merged)?;
    Ok(outcome)
}

fn trailing_convention(
    current: &LineSequence,
    other: &LineSequence,
    ancestor: &LineSequence,
) -> bool {
    if !current.is_empty() {
        current.trailing_newline()
    } else if !other.is_empty() {
        other.trailing_newline()
    } else {
        ancestor.trailing_newline()
    }
}
