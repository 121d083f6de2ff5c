//! Three-way merge engine for RPM spec files.
//!
//! Implements the text merge behind a git merge driver specialized for
//! structured, line-oriented spec files: a metadata preamble merged
//! with plain diff3 rules, and an appendable `%changelog` section where
//! entries added on both sides are unioned instead of conflicting.
//!
//! # Pipeline
//!
//! A single invocation flows left to right with no shared state:
//! 1. Tokenize the ancestor, current and other texts into line
//!    sequences ([`line`]).
//! 2. Diff ancestor against each side into minimal edit scripts
//!    ([`diff`]).
//! 3. Classify ancestor sections and project their boundaries into
//!    both sides ([`section`]).
//! 4. Walk the two scripts in lockstep, classifying aligned regions
//!    and applying per-section policies ([`merge`]).
//! 5. Render resolved content and conflict markers, then rewrite the
//!    current file in place ([`driver`]).

pub mod constants;
pub mod diff;
pub mod driver;
pub mod error;
pub mod line;
pub mod merge;
pub mod section;

pub use constants::DEFAULT_MARKER_LENGTH;
pub use diff::{diff, ChangeHunk, EditOp, EditScript};
pub use driver::{merge_text, run, MergeOutcome};
pub use error::{Error, Result};
pub use line::{Line, LineSequence};
pub use merge::{
    render, ChangelogEntry, Hunk, HunkKind, Merge, MergeLabels, MergeResult, SectionPolicy,
};
pub use section::{classify, layout, project_boundaries, Section, SectionKind};
