use std::collections::VecDeque;

use logos::Logos;

use crate::alias;
use crate::error::{CommandError, CommandResult};

/// Shell-style words: bare runs of text, or quoted strings kept whole.
#[derive(Logos, Debug, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
enum RawToken {
    #[regex(r#""([^"\\]|\\.)*""#)]
    DoubleQuoted,

    #[regex(r"'[^']*'")]
    SingleQuoted,

    #[regex(r#"[^ \t\r\n"']+"#)]
    Bare,
}

/// The words of one command, consumed front to back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens {
    words: VecDeque<String>,
}

impl Tokens {
    /// The next word, without consuming it.
    pub fn peek(&self) -> Option<&str> {
        self.words.front().map(String::as_str)
    }

    /// Whether the next word equals `word`, ignoring case.
    pub fn peek_is(&self, word: &str) -> bool {
        self.peek().is_some_and(|next| next.eq_ignore_ascii_case(word))
    }

    /// Consume the next word.
    pub fn pop(&mut self) -> Option<String> {
        self.words.pop_front()
    }

    /// Consume the next word if it equals `word`, ignoring case.
    pub fn pop_if(&mut self, word: &str) -> bool {
        let matched = self.peek_is(word);
        if matched {
            self.words.pop_front();
        }
        matched
    }

    /// Consume every remaining word.
    pub fn rest(&mut self) -> Vec<String> {
        self.words.drain(..).collect()
    }

    /// Whether every word has been consumed.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl FromIterator<String> for Tokens {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self {
            words: iter.into_iter().collect(),
        }
    }
}

/// Split a command line into words and substitute aliases.
///
/// Quoted strings become single words with their quotes removed and are
/// never aliased.
pub fn tokenize(line: &str) -> CommandResult<Tokens> {
    let mut words = VecDeque::new();
    let mut lexer = RawToken::lexer(line);

    while let Some(result) = lexer.next() {
        let slice = lexer.slice();
        let word = match result {
            Ok(RawToken::Bare) => alias::canonical(slice).to_string(),
            Ok(RawToken::DoubleQuoted) => unescape(&slice[1..slice.len() - 1]),
            Ok(RawToken::SingleQuoted) => slice[1..slice.len() - 1].to_string(),
            Err(()) => {
                let from = lexer.span().start;
                return Err(CommandError::Unbalanced(line[from..].trim().to_string()));
            }
        };
        words.push_back(word);
    }

    Ok(Tokens { words })
}

/// Process backslash escapes in a double-quoted string.
///
/// `\\`, `\"`, `\n` and `\t` are recognised. Unknown sequences are kept as-is.
fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
