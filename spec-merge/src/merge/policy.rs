//! Per-section merge policies.
//!
//! The generic merge engine resolves one-sided and identical changes on
//! its own; a region both sides changed differently is handed to the
//! policy of the section it falls in. The default section uses plain
//! diff3 conflict rules; the changelog section overrides them with the
//! entry-union rules in [`super::changelog`].

use std::ops::Range;

use crate::line::LineSequence;
use crate::section::SectionKind;

use super::changelog;
use super::hunk::{Hunk, HunkKind};

/// The three line sequences of one merge invocation.
#[derive(Debug, Clone, Copy)]
pub struct MergeInputs<'a> {
    pub ancestor: &'a LineSequence,
    pub current: &'a LineSequence,
    pub other: &'a LineSequence,
}

/// Resolution strategy for a region that both sides changed differently.
pub trait SectionPolicy {
    /// Resolves one divergent chunk into hunks. The three ranges index
    /// into the respective sequences in `inputs`.
    fn resolve(
        &self,
        inputs: &MergeInputs<'_>,
        base: Range<usize>,
        current: Range<usize>,
        other: Range<usize>,
    ) -> Vec<Hunk>;
}

/// Plain diff3 rules: a divergent region is an unresolved conflict.
pub struct Diff3Policy;

impl SectionPolicy for Diff3Policy {
    fn resolve(
        &self,
        _inputs: &MergeInputs<'_>,
        base: Range<usize>,
        current: Range<usize>,
        other: Range<usize>,
    ) -> Vec<Hunk> {
        vec![Hunk::new(HunkKind::Conflict, base, current, other)]
    }
}

/// Entry-union rules for the changelog section.
pub struct ChangelogPolicy;

impl SectionPolicy for ChangelogPolicy {
    fn resolve(
        &self,
        inputs: &MergeInputs<'_>,
        base: Range<usize>,
        current: Range<usize>,
        other: Range<usize>,
    ) -> Vec<Hunk> {
        changelog::reconcile(inputs, base, current, other)
    }
}

/// Returns the policy for a section kind.
pub fn policy_for(kind: SectionKind) -> &'static dyn SectionPolicy {
    match kind {
        SectionKind::Changelog => &ChangelogPolicy,
        SectionKind::Preamble => &Diff3Policy,
    }
}
