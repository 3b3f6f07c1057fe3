use super::*;
use crate::ambient::with_document;
use crate::testing::{Word, WordLexer};
use pretty_assertions::assert_eq;
use relex_source::Refill;
use std::sync::Arc;

/// Apply `replacement` over `range` of `old`, relex, and check the result
/// against a full lex of the new text.
fn edit(
    old: &str,
    range: std::ops::Range<u32>,
    replacement: &str,
    config: RelexConfig,
) -> (String, Relexed<Word>) {
    let mut reprocessor = Reprocessor::new(WordLexer, config);
    let previous = reprocessor.lex(old);

    let (start, end) = (range.start as usize, range.end as usize);
    let new_text = format!("{}{}{}", &old[..start], replacement, &old[end..]);
    let change = TextChange::from_replacement(range, replacement);
    let relexed = reprocessor.relex(&previous, &change, &new_text);

    assert_eq!(relexed.units.to_vec(), reprocessor.lex(&new_text).to_vec());
    assert_eq!(relexed.units.focus_index(), relexed.stats.reused);
    (new_text, relexed)
}

#[test]
fn append_reuses_everything_before() {
    let (_, relexed) = edit("let x = 1", 9..9, " + 2", RelexConfig::default());
    // `1` ends where the insertion starts, so it is relexed with it.
    assert_eq!(relexed.stats, RelexStats { reused: 3, relexed: 3 });
    assert_eq!(relexed.resume, Position::new(1, 7, 7));
}

#[test]
fn middle_edit_relexes_suffix() {
    let (_, relexed) = edit("a b c d e", 4..5, "cc", RelexConfig::default());
    assert_eq!(relexed.stats, RelexStats { reused: 2, relexed: 3 });
    assert_eq!(
        relexed.units.current().map(|u| u.value.clone()),
        Some(Word::Ident("cc".into()))
    );
}

#[test]
fn deletion_merges_adjacent_units() {
    let (text, relexed) = edit("foo bar", 3..4, "", RelexConfig::default());
    assert_eq!(text, "foobar");
    assert_eq!(relexed.stats, RelexStats { reused: 0, relexed: 1 });
    assert_eq!(relexed.resume, Position::START);
    assert_eq!(
        relexed.units.current().map(|u| u.value.clone()),
        Some(Word::Ident("foobar".into()))
    );
}

#[test]
fn edit_at_start_reuses_nothing() {
    let (_, relexed) = edit("x y", 0..0, "w ", RelexConfig::default());
    assert_eq!(relexed.stats.reused, 0);
    assert_eq!(relexed.units.len(), 3);
}

#[test]
fn multiline_edit_keeps_line_numbers() {
    let (_, relexed) = edit("a\nb\nc\n", 2..3, "x\ny", RelexConfig::default());
    let lines: Vec<u32> = relexed.units.iter().map(|u| u.start.line()).collect();
    assert_eq!(lines, vec![1, 2, 3, 4]);
    assert_eq!(relexed.resume, Position::new(1, 1, 1));
}

#[test]
fn lookbehind_widens_damage() {
    let narrow = edit("a b c d", 6..7, "z", RelexConfig::default()).1;
    let wide = edit("a b c d", 6..7, "z", RelexConfig::new().with_lookbehind(2)).1;
    assert_eq!(narrow.stats.reused, 3);
    assert_eq!(wide.stats.reused, 2);
}

#[test]
fn small_chunks_give_same_result() {
    let (_, relexed) = edit(
        "fn f(a, b) { a + b }",
        13..14,
        "alpha",
        RelexConfig::new().with_chunk_size(1),
    );
    assert_eq!(relexed.stats.reused, 8);
}

/// One unit per byte, splitting multi-byte characters.
struct ByteLexer;

impl UnitLexer for ByteLexer {
    type Unit = u8;
    fn skip_trivia<R: Refill>(&mut self, _: &mut Scanner<R>) {}
    fn next_unit<R: Refill>(&mut self, scanner: &mut Scanner<R>) -> Option<u8> {
        scanner.bump()
    }
}

#[test]
fn resume_inside_a_character_falls_back_to_full_lex() {
    let mut reprocessor = Reprocessor::new(ByteLexer, RelexConfig::default());
    let previous = reprocessor.lex("aéb");
    assert_eq!(previous.len(), 4);

    let change = TextChange::from_replacement(3..4, "c");
    let relexed = reprocessor.relex(&previous, &change, "aéc");
    assert_eq!(relexed.stats, RelexStats { reused: 0, relexed: 4 });
    assert_eq!(relexed.units, reprocessor.lex("aéc"));
}

/// Records the current document each time it is asked for a unit.
#[derive(Default)]
struct Observer {
    seen: Vec<Option<Arc<str>>>,
}

impl UnitLexer for Observer {
    type Unit = ();
    fn skip_trivia<R: Refill>(&mut self, _: &mut Scanner<R>) {}
    fn next_unit<R: Refill>(&mut self, scanner: &mut Scanner<R>) -> Option<()> {
        self.seen.push(current_document());
        scanner.bump().map(|_| ())
    }
}

#[test]
fn lexer_sees_current_document() {
    let name: Arc<str> = Arc::from("lib.rl");
    let mut reprocessor = Reprocessor::new(Observer::default(), RelexConfig::default());
    let previous = reprocessor.lex("ab");

    let change = TextChange::insert(2, 1);
    with_document(&name, || reprocessor.relex(&previous, &change, "abc"));

    let seen = &reprocessor.lexer_mut().seen;
    assert_eq!(seen.len(), 4);
    assert_eq!(
        seen.as_slice(),
        &[None, None, Some(Arc::clone(&name)), Some(name)][..]
    );
}

#[test]
fn reuse_rate() {
    assert_eq!(RelexStats::default().reuse_rate(), 0.0);
    let stats = RelexStats { reused: 3, relexed: 1 };
    assert!((stats.reuse_rate() - 0.75).abs() < f64::EPSILON);
}

#[test]
fn reusable_prefix_ignores_focus() {
    let units = Reprocessor::new(WordLexer, RelexConfig::default()).lex("a b c d e f");
    let damage = DamageRegion::from_change(&TextChange::replace(6, 1, 1), 0);
    for focus in 0..=units.len() {
        assert_eq!(reusable_prefix(&units.seek_to(focus), &damage), 3, "focus {focus}");
    }

    let everything = DamageRegion::from_change(&TextChange::insert(11, 1), 0);
    let nothing = DamageRegion::from_change(&TextChange::insert(0, 1), 0);
    for focus in 0..=units.len() {
        let at = units.seek_to(focus);
        assert_eq!(reusable_prefix(&at, &everything), 5);
        assert_eq!(reusable_prefix(&at, &nothing), 0);
    }
}

#[test]
fn relex_from_cursor_focused_after_edit() {
    let mut reprocessor = Reprocessor::new(WordLexer, RelexConfig::default());
    let previous = reprocessor.lex("one two three four").seek_to(4);
    let change = TextChange::from_replacement(8..13, "3");
    let relexed = reprocessor.relex(&previous, &change, "one two 3 four");
    assert_eq!(relexed.stats, RelexStats { reused: 2, relexed: 2 });
    assert_eq!(relexed.units.to_vec(), reprocessor.lex("one two 3 four").to_vec());
}
