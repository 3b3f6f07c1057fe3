use super::*;

#[test]
fn matches_original_immediately() {
    let text: Arc<str> = Arc::from("let x = 1");
    let token = StalenessToken::new(&text);
    assert!(token.matches(&text));
    assert!(token.matches(&Arc::clone(&text)));
    assert!(token.is_live());
}

#[test]
fn structurally_equal_value_does_not_match() {
    let a: Arc<str> = Arc::from("same");
    let b: Arc<str> = Arc::from("same");
    let token = StalenessToken::new(&a);
    assert_eq!(a, b);
    assert!(!token.matches(&b));
}

#[test]
fn token_does_not_keep_value_alive() {
    let buffer = Arc::new(String::from("old buffer"));
    let token = StalenessToken::new(&buffer);
    assert_eq!(Arc::strong_count(&buffer), 1);

    drop(buffer);
    assert!(!token.is_live());

    let replacement = Arc::new(String::from("old buffer"));
    assert!(!token.matches(&replacement));
}

#[test]
fn clones_share_identity() {
    let value = Arc::new(5u64);
    let token = StalenessToken::new(&value);
    let copy = token.clone();
    assert!(copy.matches(&value));
    drop(value);
    assert!(!token.is_live() && !copy.is_live());
}

#[test]
fn superseded_snapshot_is_stale() {
    let v1: Arc<Vec<u8>> = Arc::new(b"abc".to_vec());
    let token = StalenessToken::new(&v1);

    // An edit produces a new authoritative snapshot; the old one stays
    // alive for now because something else still holds it.
    let v2: Arc<Vec<u8>> = Arc::new(b"abcd".to_vec());
    assert!(token.is_live());
    assert!(!token.matches(&v2));
    assert!(token.matches(&v1));
}

#[test]
fn debug_reports_liveness() {
    let value = Arc::new(());
    let token = StalenessToken::new(&value);
    assert_eq!(format!("{token:?}"), "StalenessToken { live: true }");
}
