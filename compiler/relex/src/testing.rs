//! A small restartable lexer for tests and examples.
//!
//! Splits text into identifiers, decimal numbers and single-byte
//! punctuation; whitespace is trivia.

use relex_source::{Refill, Scanner};

use crate::UnitLexer;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Word {
    Ident(String),
    Number(String),
    Punct(char),
}

#[derive(Clone, Copy, Debug, Default)]
pub struct WordLexer;

fn is_ident_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || !byte.is_ascii()
}

impl UnitLexer for WordLexer {
    type Unit = Word;

    fn skip_trivia<R: Refill>(&mut self, scanner: &mut Scanner<R>) {
        scanner.eat_while(|b| b.is_ascii_whitespace());
    }

    fn next_unit<R: Refill>(&mut self, scanner: &mut Scanner<R>) -> Option<Word> {
        let first = scanner.peek()?;
        let word = if first.is_ascii_digit() {
            Word::Number(lossy(scanner.eat_while(|b| b.is_ascii_digit())))
        } else if is_ident_byte(first) {
            // Non-ASCII bytes only ever appear here, so multi-byte
            // characters are never split.
            Word::Ident(lossy(scanner.eat_while(is_ident_byte)))
        } else {
            scanner.bump();
            Word::Punct(char::from(first))
        };
        Some(word)
    }
}

fn lossy(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
}
