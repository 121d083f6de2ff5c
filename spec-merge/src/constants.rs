//! Constants used throughout the merge engine.

/// Conventional conflict marker length, as used by git when no
/// `conflict-marker-size` attribute is set.
pub const DEFAULT_MARKER_LENGTH: usize = 7;

/// Marker character opening the current side of a conflict block.
pub const CURRENT_MARKER_CHAR: char = '<';

/// Marker character opening the ancestor part of a conflict block.
pub const ANCESTOR_MARKER_CHAR: char = '|';

/// Marker character separating ancestor content from the other side.
pub const SEPARATOR_MARKER_CHAR: char = '=';

/// Marker character closing the other side of a conflict block.
pub const OTHER_MARKER_CHAR: char = '>';

/// Identity printed on the ancestor marker line.
pub const ANCESTOR_LABEL: &str = "ancestor";

/// Identity printed on the closing marker line for the incoming side.
pub const OTHER_LABEL: &str = "incoming";

/// Directive that opens the changelog section of a spec file.
pub const CHANGELOG_DIRECTIVE: &str = "%changelog";

/// First character of a changelog entry heading line.
pub const ENTRY_HEADING_PREFIX: char = '*';

/// Directives that open a new top-level section and therefore end the
/// preceding one.
pub const SECTION_DIRECTIVES: &[&str] = &[
    "%package",
    "%description",
    "%prep",
    "%generate_buildrequires",
    "%conf",
    "%build",
    "%install",
    "%check",
    "%files",
    "%pre",
    "%post",
    "%preun",
    "%postun",
    "%pretrans",
    "%posttrans",
    "%triggerin",
    "%triggerun",
    "%triggerpostun",
    "%changelog",
];
