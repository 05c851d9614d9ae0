//! Inline snapshots of the one-line diagnostics users see. Kept as
//! snapshots so wording changes are deliberate.

use insta::assert_snapshot;
use intlist::from_str;

fn diagnostic(input: &str) -> String {
    match from_str(input) {
        Ok(value) => panic!("expected an error for {input:?}, parsed {value}"),
        Err(err) => err.to_string(),
    }
}

#[test]
fn snapshot_unbalanced_open() {
    assert_snapshot!(diagnostic("[1, 2"), @"syntax error: unexpected end of tokens at 1:6; expected ',' or ']'");
}

#[test]
fn snapshot_extra_close() {
    assert_snapshot!(diagnostic("[1, 2]]"), @"syntax error: unexpected token ']' at 1:7; expected ','");
}

#[test]
fn snapshot_missing_comma() {
    assert_snapshot!(diagnostic("[1 2]"), @"syntax error: unexpected token '2' at 1:4; expected ',' or ']'");
}

#[test]
fn snapshot_trailing_comma() {
    assert_snapshot!(diagnostic("[1,]"), @"syntax error: unexpected token ']' at 1:4; expected number or '['");
}

#[test]
fn snapshot_leading_comma() {
    assert_snapshot!(diagnostic("[,1]"), @"syntax error: unexpected token ',' at 1:2; expected number or '[' or ']'");
}

#[test]
fn snapshot_error_on_later_line() {
    assert_snapshot!(diagnostic("[1,\n  [2\n  3]]"), @"syntax error: unexpected token '3' at 3:3; expected ',' or ']'");
}

#[test]
fn snapshot_unexpected_symbol() {
    assert_snapshot!(diagnostic("[1,\n a]"), @"lexical error: unexpected symbol 'a' at 2:2");
}

#[test]
fn snapshot_control_character() {
    assert_snapshot!(diagnostic("[1,\t\u{7}]"), @r"lexical error: unexpected symbol '\u{0007}' at 1:5");
}

#[test]
fn snapshot_overflow() {
    assert_snapshot!(diagnostic("[18446744073709551616]"), @"lexical error: number 18446744073709551616 at 1:2 does not fit in 64 bits");
}
