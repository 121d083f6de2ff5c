//! Data-driven merge cases.
//!
//! Each case is a single string with five scissors-delimited parts:
//! the verdict (`OK` for a clean merge, `FAIL` for conflicts), the
//! ancestor, the current side, the other side and the expected merged
//! output. Every case runs with marker length 7 and the current side
//! labelled `test.spec`.

use spec_merge::merge_text;

const SCISSORS: &str = "-- 8< --";

fn parse(case: &str) -> (bool, Vec<String>) {
    let mut parts: Vec<String> = Vec::new();
    let mut buf = String::new();
    for line in case.lines() {
        if line.trim() == SCISSORS {
            parts.push(std::mem::take(&mut buf));
        } else {
            buf.push_str(line);
            buf.push('\n');
        }
    }
    parts.push(buf);
    assert_eq!(parts.len(), 5, "expected verdict plus four parts");

    let clean = match parts[0].trim() {
        "OK" => true,
        "FAIL" => false,
        other => panic!("bad verdict line: {other:?}"),
    };
    (clean, parts.split_off(1))
}

fn run_case(name: &str, case: &str) {
    let (clean, parts) = parse(case);
    let (merged, outcome) = merge_text(&parts[0], &parts[1], &parts[2], 7, "test.spec")
        .unwrap_or_else(|e| panic!("{name}: merge failed: {e}"));
    assert_eq!(merged, parts[3], "{name}: merged output differs");
    assert_eq!(outcome.is_clean(), clean, "{name}: outcome was {outcome:?}");
}

#[test]
fn identical_inputs() {
    run_case(
        "identical_inputs",
        "\
OK
-- 8< --
Name: foo
License: MIT
Version: 1
-- 8< --
Name: foo
License: MIT
Version: 1
-- 8< --
Name: foo
License: MIT
Version: 1
-- 8< --
Name: foo
License: MIT
Version: 1
",
    );
}

#[test]
fn only_current_changes() {
    run_case(
        "only_current_changes",
        "\
OK
-- 8< --
Name: foo
License: MIT
Version: 1
Release: 1
-- 8< --
Name: foo
License: MIT
Version: 2
Release: 1
-- 8< --
Name: foo
License: MIT
Version: 1
Release: 1
-- 8< --
Name: foo
License: MIT
Version: 2
Release: 1
",
    );
}

#[test]
fn convergent_change_taken_once() {
    run_case(
        "convergent_change_taken_once",
        "\
OK
-- 8< --
Name: foo
Version: 1
-- 8< --
Name: foo
Version: 2
-- 8< --
Name: foo
Version: 2
-- 8< --
Name: foo
Version: 2
",
    );
}

#[test]
fn divergent_change_conflicts() {
    run_case(
        "divergent_change_conflicts",
        "\
FAIL
-- 8< --
Name: foo
License: MIT
Version: 1
-- 8< --
Name: foo
License: MIT
Version: 2
-- 8< --
Name: foo
License: MIT
Version: 3
-- 8< --
Name: foo
License: MIT
<<<<<<< test.spec
Version: 2
||||||| ancestor
Version: 1
=======
Version: 3
>>>>>>> incoming
",
    );
}

#[test]
fn separated_edits_merge_cleanly() {
    run_case(
        "separated_edits_merge_cleanly",
        "\
OK
-- 8< --
Name: foo
License: MIT
Version: 1
Release: 1
-- 8< --
Name: foo
License: MIT
Version: 1
Release: 2
-- 8< --
Name: bar
License: MIT
Version: 1
Release: 1
-- 8< --
Name: bar
License: MIT
Version: 1
Release: 2
",
    );
}

#[test]
fn deletion_against_unchanged_side() {
    run_case(
        "deletion_against_unchanged_side",
        "\
OK
-- 8< --
Name: foo
License: MIT
Version: 1
-- 8< --
Name: foo
Version: 1
-- 8< --
Name: foo
License: MIT
Version: 1
-- 8< --
Name: foo
Version: 1
",
    );
}

#[test]
fn same_deletion_on_both_sides() {
    run_case(
        "same_deletion_on_both_sides",
        "\
OK
-- 8< --
Name: foo
License: MIT
Version: 1
-- 8< --
Name: foo
Version: 1
-- 8< --
Name: foo
Version: 1
-- 8< --
Name: foo
Version: 1
",
    );
}

#[test]
fn changelog_additions_union() {
    run_case(
        "changelog_additions_union",
        "\
OK
-- 8< --
Name: foo

%changelog
* Mon Jan 01 2020 Alice <alice@example.com> - 1.0-1
- initial package
-- 8< --
Name: foo

%changelog
* Tue Feb 04 2020 Bob <bob@example.com> - 1.0-2
- fix crash
* Mon Jan 01 2020 Alice <alice@example.com> - 1.0-1
- initial package
-- 8< --
Name: foo

%changelog
* Wed Mar 05 2020 Carol <carol@example.com> - 1.0-3
- add docs
* Mon Jan 01 2020 Alice <alice@example.com> - 1.0-1
- initial package
-- 8< --
Name: foo

%changelog
* Tue Feb 04 2020 Bob <bob@example.com> - 1.0-2
- fix crash
* Wed Mar 05 2020 Carol <carol@example.com> - 1.0-3
- add docs
* Mon Jan 01 2020 Alice <alice@example.com> - 1.0-1
- initial package
",
    );
}

#[test]
fn changelog_union_at_section_boundary() {
    run_case(
        "changelog_union_at_section_boundary",
        "\
OK
-- 8< --
Name: foo
%changelog
* Mon Jan 01 2020 Alice - 1.0-1
- initial
%files
/usr/bin/foo
-- 8< --
Name: foo
%changelog
* Mon Jan 01 2020 Alice - 1.0-1
- initial
* Tue Feb 04 2020 Bob - 1.0-2
- fix crash
%files
/usr/bin/foo
-- 8< --
Name: foo
%changelog
* Mon Jan 01 2020 Alice - 1.0-1
- initial
* Wed Mar 05 2020 Carol - 1.0-3
- add docs
%files
/usr/bin/foo
-- 8< --
Name: foo
%changelog
* Mon Jan 01 2020 Alice - 1.0-1
- initial
* Tue Feb 04 2020 Bob - 1.0-2
- fix crash
* Wed Mar 05 2020 Carol - 1.0-3
- add docs
%files
/usr/bin/foo
",
    );
}

#[test]
fn identical_changelog_addition_kept_once() {
    run_case(
        "identical_changelog_addition_kept_once",
        "\
OK
-- 8< --
%changelog
* Mon Jan 01 2020 Alice - 1.0-1
- initial
-- 8< --
%changelog
* Tue Feb 04 2020 Bob - 1.0-2
- fix crash
* Mon Jan 01 2020 Alice - 1.0-1
- initial
-- 8< --
%changelog
* Tue Feb 04 2020 Bob - 1.0-2
- fix crash
* Mon Jan 01 2020 Alice - 1.0-1
- initial
-- 8< --
%changelog
* Tue Feb 04 2020 Bob - 1.0-2
- fix crash
* Mon Jan 01 2020 Alice - 1.0-1
- initial
",
    );
}

#[test]
fn same_changelog_slot_conflicts_scoped_to_entry() {
    run_case(
        "same_changelog_slot_conflicts_scoped_to_entry",
        "\
FAIL
-- 8< --
%changelog
* Mon Jan 01 2020 Alice - 1.0-1
- initial
-- 8< --
%changelog
* Tue Feb 04 2020 Bob - 1.0-2
- fix crash
* Mon Jan 01 2020 Alice - 1.0-1
- initial
-- 8< --
%changelog
* Tue Feb 04 2020 Bob - 1.0-2
- fix crash harder
* Mon Jan 01 2020 Alice - 1.0-1
- initial
-- 8< --
%changelog
<<<<<<< test.spec
* Tue Feb 04 2020 Bob - 1.0-2
- fix crash
||||||| ancestor
=======
* Tue Feb 04 2020 Bob - 1.0-2
- fix crash harder
>>>>>>> incoming
* Mon Jan 01 2020 Alice - 1.0-1
- initial
",
    );
}

#[test]
fn preamble_edit_and_changelog_addition_do_not_interfere() {
    run_case(
        "preamble_edit_and_changelog_addition_do_not_interfere",
        "\
OK
-- 8< --
Name: foo
Version: 1

%changelog
* Mon Jan 01 2020 Alice - 1.0-1
- initial
-- 8< --
Name: foo
Version: 2

%changelog
* Mon Jan 01 2020 Alice - 1.0-1
- initial
-- 8< --
Name: foo
Version: 1

%changelog
* Tue Feb 04 2020 Bob - 1.0-2
- fix crash
* Mon Jan 01 2020 Alice - 1.0-1
- initial
-- 8< --
Name: foo
Version: 2

%changelog
* Tue Feb 04 2020 Bob - 1.0-2
- fix crash
* Mon Jan 01 2020 Alice - 1.0-1
- initial
",
    );
}

#[test]
fn adjacent_divergent_edits_conflict_as_one_block() {
    run_case(
        "adjacent_divergent_edits_conflict_as_one_block",
        "\
FAIL
-- 8< --
Name: foo
Version: 1
Release: 1
-- 8< --
Name: foo
Version: 2
Release: 1
-- 8< --
Name: foo
Version: 1
Release: 2
-- 8< --
Name: foo
<<<<<<< test.spec
Version: 2
Release: 1
||||||| ancestor
Version: 1
Release: 1
=======
Version: 1
Release: 2
>>>>>>> incoming
",
    );
}

#[test]
fn crlf_line_endings_survive_the_merge() {
    // A trailing \r is line content: identical CRLF lines still match
    // as unchanged and the \r is carried into the merged output.
    let base = "Name: foo\r\nLicense: MIT\r\nVersion: 1\r\n";
    let main = "Name: foo\r\nLicense: MIT\r\nVersion: 2\r\n";
    let new = "Name: foo\r\nLicense: MIT\r\nVersion: 1\r\n";

    let (merged, outcome) = merge_text(base, main, new, 7, "test.spec").unwrap();
    assert!(outcome.is_clean());
    assert_eq!(merged, "Name: foo\r\nLicense: MIT\r\nVersion: 2\r\n");
}

#[test]
fn clean_merge_is_idempotent() {
    let base = "Name: foo\n%changelog\n* Mon Jan 01 2020 Alice - 1.0-1\n- initial\n";
    let main = "Name: foo\n%changelog\n* Tue Feb 04 2020 Bob - 1.0-2\n- fix\n* Mon Jan 01 2020 Alice - 1.0-1\n- initial\n";
    let new = "Name: foo\n%changelog\n* Wed Mar 05 2020 Carol - 1.0-3\n- docs\n* Mon Jan 01 2020 Alice - 1.0-1\n- initial\n";

    let (merged, outcome) = merge_text(base, main, new, 7, "test.spec").unwrap();
    assert!(outcome.is_clean());
    let (again, outcome) = merge_text(&merged, &merged, &merged, 7, "test.spec").unwrap();
    assert!(outcome.is_clean());
    assert_eq!(again, merged);
}
