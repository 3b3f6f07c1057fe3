use super::*;
use crate::testing::{Word, WordLexer};
use pretty_assertions::assert_eq;

fn open(text: &str) -> DocumentSession<WordLexer> {
    DocumentSession::open("main.rl", text, WordLexer, RelexConfig::default())
}

fn words(session: &DocumentSession<WordLexer>) -> Vec<Word> {
    session.units().iter().map(|u| u.value.clone()).collect()
}

fn ident(s: &str) -> Word {
    Word::Ident(s.to_owned())
}

#[test]
fn open_lexes_whole_text() {
    let session = open("a + b");
    assert_eq!(session.name(), "main.rl");
    assert_eq!(session.version(), 0);
    assert_eq!(words(&session), vec![ident("a"), Word::Punct('+'), ident("b")]);
}

#[test]
fn apply_edits_text_and_units() {
    let mut session = open("let total = a + b");
    let stats = session.apply(12..13, "alpha");
    assert_eq!(stats, Ok(RelexStats { reused: 3, relexed: 3 }));
    assert_eq!(&**session.text(), "let total = alpha + b");
    assert_eq!(words(&session)[3], ident("alpha"));
    assert_eq!(session.version(), 1);
}

#[test]
fn successive_edits_match_fresh_open() {
    let mut session = open("fn f() {}\n");
    session.apply(8..8, "\n    x = 1\n").unwrap();
    session.apply(0..2, "def").unwrap();
    session.apply(14..15, "yy").unwrap();

    let fresh = open(session.text());
    assert_eq!(session.units().to_vec(), fresh.units().to_vec());
    assert_eq!(&**session.text(), "def f() {\n    yy = 1\n}\n");
}

#[test]
fn rejects_bad_ranges() {
    let mut session = open("héllo");
    assert_eq!(
        session.apply(3..1, ""),
        Err(SessionError::Reversed { start: 3, end: 1 })
    );
    assert_eq!(
        session.apply(2..9, ""),
        Err(SessionError::OutOfBounds { start: 2, end: 9, len: 6 })
    );
    assert_eq!(
        session.apply(2..3, "e"),
        Err(SessionError::NotCharBoundary { start: 2, end: 3 })
    );
    assert_eq!(&**session.text(), "héllo");
    assert_eq!(session.version(), 0);
}

#[test]
fn error_messages() {
    let err = SessionError::OutOfBounds { start: 1, end: 8, len: 4 };
    assert_eq!(
        err.to_string(),
        "edit range 1..8 is outside the document (4 bytes)"
    );
}

#[test]
fn cached_units_follow_current_snapshot() {
    let mut session = open("a b");
    let v0 = Arc::clone(session.text());
    assert_eq!(
        session.cached_units(&v0).map(|units| units.len()),
        Some(2)
    );

    session.apply(3..3, " c").unwrap();
    let v1 = Arc::clone(session.text());
    assert!(session.cached_units(&v0).is_none());
    assert_eq!(
        session.cached_units(&v1).map(|units| units.to_vec()),
        Some(session.units().to_vec())
    );

    // Same bytes, different snapshot.
    let copy: Arc<str> = Arc::from(&*v1);
    assert!(session.cached_units(&copy).is_none());
}

#[test]
fn superseded_text_is_released() {
    let mut session = open("x");
    let weak = Arc::downgrade(session.text());
    session.apply(1..1, "y").unwrap();
    assert!(weak.upgrade().is_none());
}

#[test]
fn replace_all_relexes_from_scratch() {
    let mut session = open("a b c");
    session.replace_all("1 2");
    assert_eq!(
        words(&session),
        vec![Word::Number("1".into()), Word::Number("2".into())]
    );
    assert_eq!(session.units().focus_index(), 0);
    assert_eq!(session.version(), 1);
}

#[test]
fn empty_document_accepts_insert() {
    let mut session = open("");
    assert!(session.units().is_empty());
    assert_eq!(session.apply(0..0, "z"), Ok(RelexStats { reused: 0, relexed: 1 }));
    assert_eq!(words(&session), vec![ident("z")]);
}
