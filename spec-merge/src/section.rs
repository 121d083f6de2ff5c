//! Section classification and boundary projection.
//!
//! The ancestor is split into labeled, non-overlapping sections that
//! cover the whole sequence: everything outside the changelog is the
//! default `Preamble` section, and the region after a `%changelog`
//! directive (up to the next top-level directive or end of file) is the
//! `Changelog` section. Boundaries are then projected into each side by
//! anchoring on retained lines, so every section has a well-defined,
//! possibly empty, range on every side even under heavy edits.

use std::ops::Range;

use log::{debug, warn};

use crate::constants::{CHANGELOG_DIRECTIVE, SECTION_DIRECTIVES};
use crate::diff::EditScript;
use crate::line::LineSequence;

/// Kinds of sections recognized in a spec file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// The default section: header, metadata, scriptlets, file lists.
    Preamble,
    /// The appendable changelog body (lines after `%changelog`).
    Changelog,
}

/// A labeled contiguous range of ancestor lines plus the corresponding
/// mapped ranges in the current and other sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    kind: SectionKind,
    base: Range<usize>,
    current: Range<usize>,
    other: Range<usize>,
}

impl Section {
    /// Returns the section kind.
    pub fn kind(&self) -> SectionKind {
        self.kind
    }

    /// Returns the ancestor line range.
    pub fn base(&self) -> &Range<usize> {
        &self.base
    }

    /// Returns the projected range in the current sequence.
    pub fn current(&self) -> &Range<usize> {
        &self.current
    }

    /// Returns the projected range in the other sequence.
    pub fn other(&self) -> &Range<usize> {
        &self.other
    }

    /// Returns true if an aligned merge chunk covering `chunk_base`
    /// falls inside this section.
    ///
    /// A pure insertion (empty range) at a section's start boundary
    /// belongs to that section. End boundaries are claimed by the final
    /// section of the file and by the changelog, which is appendable at
    /// its end even when another section follows it.
    pub fn contains_chunk(&self, chunk_base: &Range<usize>, base_len: usize) -> bool {
        if chunk_base.start == chunk_base.end {
            let p = chunk_base.start;
            let claims_end = self.base.end == base_len || self.kind == SectionKind::Changelog;
            p >= self.base.start && (p < self.base.end || (p == self.base.end && claims_end))
        } else {
            chunk_base.start >= self.base.start && chunk_base.end <= self.base.end
        }
    }
}

/// Scans the ancestor and tags contiguous ranges with a section kind.
///
/// The returned ranges are non-overlapping and cover the entire
/// sequence. The `%changelog` directive line itself stays in the
/// preceding `Preamble` section so it remains a stable anchor.
pub fn classify(ancestor: &LineSequence) -> Vec<(SectionKind, Range<usize>)> {
    let len = ancestor.len();
    let marker = ancestor
        .lines()
        .iter()
        .position(|line| is_directive(line.content(), CHANGELOG_DIRECTIVE));

    let Some(idx) = marker else {
        return vec![(SectionKind::Preamble, 0..len)];
    };

    if ancestor
        .lines()
        .iter()
        .skip(idx + 1)
        .any(|line| is_directive(line.content(), CHANGELOG_DIRECTIVE))
    {
        warn!("multiple %changelog directives; treating the first as the changelog section");
    }

    let body_start = idx + 1;
    let body_end = ancestor
        .lines()
        .iter()
        .enumerate()
        .skip(body_start)
        .find(|(_, line)| is_section_directive(line.content()))
        .map_or(len, |(i, _)| i);

    let mut sections = vec![
        (SectionKind::Preamble, 0..body_start),
        (SectionKind::Changelog, body_start..body_end),
    ];
    if body_end < len {
        sections.push((SectionKind::Preamble, body_end..len));
    }
    sections
}

/// Projects classified ancestor sections into both sides.
///
/// Start boundaries collapse to the insertion point immediately after
/// the last retained predecessor line; end boundaries anchor on the
/// first retained line at or past the boundary. Lines a side inserted
/// at a boundary gap therefore land inside the section that follows
/// the gap's start anchor.
pub fn project_boundaries(
    sections: &[(SectionKind, Range<usize>)],
    current: &EditScript,
    other: &EditScript,
) -> Vec<Section> {
    let cur_map = current.base_to_side();
    let other_map = other.base_to_side();

    sections
        .iter()
        .map(|(kind, base)| {
            let section = Section {
                kind: *kind,
                base: base.clone(),
                current: project_range(base, &cur_map, current.side_len()),
                other: project_range(base, &other_map, other.side_len()),
            };
            debug!(
                "section {:?}: ancestor {:?} -> current {:?}, other {:?}",
                section.kind, section.base, section.current, section.other
            );
            section
        })
        .collect()
}

/// Classifies the ancestor and projects the result in one step.
pub fn layout(
    ancestor: &LineSequence,
    current: &EditScript,
    other: &EditScript,
) -> Vec<Section> {
    project_boundaries(&classify(ancestor), current, other)
}

fn project_range(base: &Range<usize>, map: &[Option<usize>], side_len: usize) -> Range<usize> {
    let start = map[..base.start.min(map.len())]
        .iter()
        .rev()
        .flatten()
        .next()
        .map_or(0, |side| side + 1);
    let end = map[base.end.min(map.len())..]
        .iter()
        .flatten()
        .next()
        .copied()
        .unwrap_or(side_len);
    start..end.max(start)
}

/// Returns true if the line content is the given directive, optionally
/// followed by arguments.
fn is_directive(content: &str, directive: &str) -> bool {
    let content = content.trim_end();
    content.starts_with(directive)
        && content[directive.len()..]
            .chars()
            .next()
            .is_none_or(char::is_whitespace)
}

/// Returns true if the line opens a new top-level section.
fn is_section_directive(content: &str) -> bool {
    SECTION_DIRECTIVES
        .iter()
        .any(|directive| is_directive(content, directive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::diff;

    fn seq(text: &str) -> LineSequence {
        LineSequence::tokenize(text)
    }

    #[test]
    fn no_changelog_is_one_preamble() {
        let sections = classify(&seq("Name: foo\nVersion: 1\n"));
        assert_eq!(sections, vec![(SectionKind::Preamble, 0..2)]);
    }

    #[test]
    fn changelog_at_end_of_file() {
        let sections = classify(&seq("Name: foo\n%changelog\n* entry\n- body\n"));
        assert_eq!(
            sections,
            vec![
                (SectionKind::Preamble, 0..2),
                (SectionKind::Changelog, 2..4),
            ]
        );
    }

    #[test]
    fn changelog_ends_at_next_directive() {
        let sections = classify(&seq("Name: foo\n%changelog\n* entry\n%files\n/usr/bin/foo\n"));
        assert_eq!(
            sections,
            vec![
                (SectionKind::Preamble, 0..2),
                (SectionKind::Changelog, 2..3),
                (SectionKind::Preamble, 3..5),
            ]
        );
    }

    #[test]
    fn directive_requires_word_boundary() {
        assert!(is_directive("%changelog", "%changelog"));
        assert!(is_directive("%changelog  ", "%changelog"));
        assert!(!is_directive("%changelogs", "%changelog"));
        assert!(!is_directive(" %changelog", "%changelog"));
    }

    #[test]
    fn projection_follows_insertions_after_marker() {
        let ancestor = seq("Name: foo\n%changelog\n* old\n");
        // Current inserts a new entry right after the marker.
        let current = seq("Name: foo\n%changelog\n* new\n* old\n");
        let cur_script = diff(&ancestor, &current);
        let other_script = diff(&ancestor, &ancestor);

        let sections = layout(&ancestor, &cur_script, &other_script);
        let changelog = &sections[1];
        assert_eq!(changelog.kind(), SectionKind::Changelog);
        assert_eq!(changelog.base(), &(2..3));
        // The inserted entry is inside the projected changelog range.
        assert_eq!(changelog.current(), &(2..4));
        assert_eq!(changelog.other(), &(2..3));
    }

    #[test]
    fn deleted_anchor_collapses_to_insertion_point() {
        let ancestor = seq("Name: foo\n%changelog\n* old\n");
        // Current deletes the whole changelog, marker included.
        let current = seq("Name: foo\n");
        let cur_script = diff(&ancestor, &current);
        let other_script = diff(&ancestor, &ancestor);

        let sections = layout(&ancestor, &cur_script, &other_script);
        let changelog = &sections[1];
        // Collapsed: an insertion point after the last retained line.
        assert_eq!(changelog.current(), &(1..1));
    }

    #[test]
    fn chunk_containment_at_boundaries() {
        let ancestor = seq("Name: foo\n%changelog\n* old\n");
        let script = diff(&ancestor, &ancestor);
        let sections = layout(&ancestor, &script, &script);
        let changelog = &sections[1];

        // Insertion right after the marker belongs to the changelog.
        assert!(changelog.contains_chunk(&(2..2), 3));
        // Insertion at end of file belongs to the final section.
        assert!(changelog.contains_chunk(&(3..3), 3));
        // The marker line itself does not.
        assert!(!changelog.contains_chunk(&(1..2), 3));
    }

    #[test]
    fn changelog_claims_its_end_boundary_mid_file() {
        let ancestor = seq("Name: foo\n%changelog\n* old\n- body\n%files\n/usr/bin/foo\n");
        let script = diff(&ancestor, &ancestor);
        let sections = layout(&ancestor, &script, &script);
        let changelog = &sections[1];
        assert_eq!(changelog.kind(), SectionKind::Changelog);
        assert_eq!(changelog.base(), &(2..4));
        // Appending right before %files lands on the shared boundary,
        // which the appendable changelog claims.
        assert!(changelog.contains_chunk(&(4..4), 6));
    }
}
