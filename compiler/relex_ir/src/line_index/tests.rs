use super::*;
use pretty_assertions::assert_eq;

#[test]
fn empty_text_has_one_line() {
    let index = LineIndex::new("");
    assert_eq!(index.line_count(), 1);
    assert!(index.is_empty());
    assert_eq!(index.position_at(0), Position::START);
    assert_eq!(index.offset_of(1, 0), Some(0));
    assert_eq!(index.offset_of(1, 1), None);
}

#[test]
fn trailing_newline_opens_a_line() {
    let index = LineIndex::new("a\nb\n");
    assert_eq!(index.line_count(), 3);
    assert_eq!(index.position_at(4), Position::new(3, 0, 4));
}

#[test]
fn position_at_line_starts_and_middles() {
    let text = "line1\nline2\nline3";
    let index = LineIndex::new(text);
    assert_eq!(index.position_at(0), Position::new(1, 0, 0));
    assert_eq!(index.position_at(5), Position::new(1, 5, 5)); // the '\n'
    assert_eq!(index.position_at(6), Position::new(2, 0, 6));
    assert_eq!(index.position_at(14), Position::new(3, 2, 14));
}

#[test]
fn position_at_clamps_past_end() {
    let index = LineIndex::new("ab\ncd");
    assert_eq!(index.position_at(500), Position::new(2, 2, 5));
}

#[test]
fn offset_of_rejects_missing_lines_and_long_columns() {
    let index = LineIndex::new("ab\ncd");
    assert_eq!(index.offset_of(0, 0), None);
    assert_eq!(index.offset_of(3, 0), None);
    assert_eq!(index.offset_of(1, 2), Some(2)); // newline byte
    assert_eq!(index.offset_of(1, 3), None);
    assert_eq!(index.offset_of(2, 2), Some(5)); // end of text
}

#[test]
fn resolve_fills_in_offset() {
    let index = LineIndex::new("x = 1\ny = 2\n");
    let synthetic = Position::synthetic(2, 4);
    assert_eq!(index.resolve(synthetic), Some(Position::new(2, 4, 10)));
    assert_eq!(index.resolve(Position::synthetic(9, 0)), None);
}

#[test]
fn agrees_with_position_advance() {
    let text = "fn a() {\n  b();\n}\n\nfn c() {}\n";
    let index = LineIndex::new(text);
    for offset in 0..=text.len() {
        let expected = Position::START.advanced(&text.as_bytes()[..offset]);
        let offset = u32::try_from(offset).unwrap_or(u32::MAX);
        assert_eq!(index.position_at(offset), expected, "offset {offset}");
    }
}

mod proptest_line_index {
    use super::super::LineIndex;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn offset_of_inverts_position_at(text in "[a-c\n]{0,48}", pick in 0u32..49) {
            let index = LineIndex::new(&text);
            let pos = index.position_at(pick);
            prop_assert_eq!(index.offset_of(pos.line(), pos.column()), Some(pos.offset()));
        }
    }
}
