use alloc::{string::ToString, vec, vec::Vec};

use super::*;

use Token::{Close, Comma, Number, Open};

fn scan_lines(lines: &[&str]) -> Result<Vec<Token>, LexicalError> {
    let mut s = Scanner::default();
    for line in lines {
        s.consume(line)?;
    }
    s.finish()
}

fn chunked() -> Scanner {
    Scanner::new(ScannerOptions {
        numbers_span_feeds: true,
        ..Default::default()
    })
}

#[test]
fn punctuation_and_numbers_in_order() {
    let tokens = scan_lines(&["[1, [23, 456], []]"]).unwrap();
    assert_eq!(
        tokens,
        vec![
            Open,
            Number(1),
            Comma,
            Open,
            Number(23),
            Comma,
            Number(456),
            Close,
            Comma,
            Open,
            Close,
            Close
        ]
    );
}

#[test]
fn character_ending_a_number_is_classified() {
    // No separator between the digits and the bracket.
    assert_eq!(
        scan_lines(&["[7]"]).unwrap(),
        vec![Open, Number(7), Close]
    );
    assert_eq!(
        scan_lines(&["7,8"]).unwrap(),
        vec![Number(7), Comma, Number(8)]
    );
}

#[test]
fn whitespace_is_skipped() {
    assert_eq!(
        scan_lines(&[" \t[ 1 ,\r\n 2 ]\n"]).unwrap(),
        vec![Open, Number(1), Comma, Number(2), Close]
    );
}

#[test]
fn whitespace_separates_numbers() {
    assert_eq!(scan_lines(&["1 2"]).unwrap(), vec![Number(1), Number(2)]);
}

#[test]
fn leading_zeros_are_accepted() {
    assert_eq!(scan_lines(&["007"]).unwrap(), vec![Number(7)]);
}

#[test]
fn number_at_end_of_line_is_flushed() {
    let mut s = Scanner::default();
    s.consume("[12").unwrap();
    assert_eq!(s.tokens(), &[Open, Number(12)]);
}

#[test]
fn line_contract_splits_number_across_calls() {
    assert_eq!(
        scan_lines(&["[12", "34]"]).unwrap(),
        vec![Open, Number(12), Number(34), Close]
    );
}

#[test]
fn chunk_contract_joins_number_across_calls() {
    let mut s = chunked();
    s.consume("[12").unwrap();
    assert_eq!(s.tokens(), &[Open]);
    s.consume("34]").unwrap();
    assert_eq!(s.tokens(), &[Open, Number(1234), Close]);
}

#[test]
fn chunk_contract_finish_flushes_last_number() {
    let mut s = chunked();
    s.consume("4").unwrap();
    s.consume("2").unwrap();
    assert!(s.tokens().is_empty());
    assert_eq!(s.finish().unwrap(), vec![Number(42)]);
}

#[test]
fn u64_max_fits() {
    assert_eq!(
        scan_lines(&["18446744073709551615"]).unwrap(),
        vec![Number(u64::MAX)]
    );
}

#[test]
fn overflow_is_reported_at_number_start() {
    let err = scan_lines(&["[1, 18446744073709551616]"]).unwrap_err();
    assert_eq!(
        err,
        LexicalError::NumberOverflow {
            digits: "18446744073709551616".into(),
            line: 1,
            column: 5,
        }
    );
}

#[test]
fn overflow_in_chunked_number_is_reported_by_finish() {
    let mut s = chunked();
    s.consume("9999999999").unwrap();
    s.consume("9999999999").unwrap();
    assert!(matches!(
        s.finish(),
        Err(LexicalError::NumberOverflow { line: 1, column: 1, .. })
    ));
}

#[test]
fn unexpected_character_reports_position() {
    let err = scan_lines(&["[1,\n", " 2, a]\n"]).unwrap_err();
    assert_eq!(
        err,
        LexicalError::UnexpectedCharacter {
            ch: 'a',
            line: 2,
            column: 5,
        }
    );
    assert_eq!(err.position(), (2, 5));
}

#[test]
fn sign_and_decimal_point_are_rejected() {
    for (input, ch) in [("[-1]", '-'), ("[1.5]", '.'), ("[+1]", '+')] {
        match scan_lines(&[input]) {
            Err(LexicalError::UnexpectedCharacter { ch: found, .. }) => assert_eq!(found, ch),
            other => panic!("expected lexical error for {input:?}, got {other:?}"),
        }
    }
}

#[test]
fn non_ascii_digits_are_rejected() {
    // Arabic-Indic digit one.
    assert!(matches!(
        scan_lines(&["[\u{0661}]"]),
        Err(LexicalError::UnexpectedCharacter { ch: '\u{0661}', .. })
    ));
}

#[test]
fn error_poisons_scanner() {
    let mut s = Scanner::default();
    let first = s.consume("[1, x").unwrap_err();
    assert_eq!(s.consume("2]").unwrap_err(), first);
    assert_eq!(s.finish().unwrap_err(), first);
}

#[test]
fn position_tracks_lines_and_columns() {
    let mut s = Scanner::default();
    s.consume("[1,\n").unwrap();
    s.consume("  2").unwrap();
    assert_eq!(s.position(), (2, 4));
}

#[test]
fn token_starts_follow_the_input() {
    let mut s = Scanner::default();
    s.consume("[12,\n").unwrap();
    s.consume(" 345]").unwrap();
    assert_eq!(s.token_starts(), &[(1, 1), (1, 2), (1, 4), (2, 2), (2, 5)]);
    assert_eq!(s.token_starts().len(), s.tokens().len());

    let (tokens, map) = s.finish_with_map().unwrap();
    assert_eq!(tokens.len(), 5);
    assert_eq!(map.token(3), Some((2, 2)));
    assert_eq!(map.token(5), None);
    assert_eq!(map.end(), (2, 6));
}

#[test]
fn chunked_number_starts_where_its_first_digit_was() {
    let mut s = chunked();
    s.consume("[\n9").unwrap();
    s.consume("9").unwrap();
    let (tokens, map) = s.finish_with_map().unwrap();
    assert_eq!(tokens, vec![Open, Number(99)]);
    assert_eq!(map.token(1), Some((2, 1)));
    assert_eq!(map.end(), (2, 3));
}

#[test]
fn token_display() {
    let rendered: Vec<_> = [Open, Number(10), Comma, Close]
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(rendered, vec!["[", "10", ",", "]"]);
}

#[test]
#[should_panic(expected = "unexpected symbol 'x' at 1:1")]
fn panic_on_error_panics() {
    let mut s = Scanner::new(ScannerOptions {
        panic_on_error: true,
        ..Default::default()
    });
    let _ = s.consume("x");
}

#[quickcheck_macros::quickcheck]
fn any_u64_scans_as_one_number(n: u64) -> bool {
    let text = alloc::format!("{n}");
    scan_lines(&[text.as_str()]) == Ok(vec![Number(n)])
}

#[quickcheck_macros::quickcheck]
fn padded_number_keeps_its_value(n: u64, zeros: u8) -> bool {
    let mut text: alloc::string::String = core::iter::repeat_n('0', usize::from(zeros % 8)).collect();
    text.push_str(&n.to_string());
    scan_lines(&[" ", text.as_str(), "\t"]) == Ok(vec![Number(n)])
}
