//! Line tokenizer shared by both dialect scanners.
//!
//! Both grammars are line oriented: a statement never spans lines except
//! through brace nesting. Quoted strings are unquoted here and never
//! continue onto the next line.

/// A single token from a configuration line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A bare word.
    Word(String),
    /// A double-quoted string, with the quotes removed.
    Quoted(String),
    /// `{` (braced dialect only).
    Open,
    /// `}` (braced dialect only).
    Close,
    /// End of a source line (emitted by `tokenize_lines`).
    Newline,
}

impl Token {
    /// The text of a word or quoted string.
    pub fn text(&self) -> Option<&str> {
        match self {
            Token::Word(s) | Token::Quoted(s) => Some(s),
            _ => None,
        }
    }
}

/// Whether a trimmed line carries no statement.
pub fn is_blank_or_comment(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Split one line into tokens.
///
/// When `braces` is set, `{` and `}` outside quotes are emitted as their
/// own tokens even when attached to a word.
pub fn tokenize_line(line: &str, braces: bool) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word = String::new();
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                flush_word(&mut word, &mut tokens);
                tokens.push(Token::Quoted(read_quoted(&mut chars)));
            }
            '{' | '}' if braces => {
                flush_word(&mut word, &mut tokens);
                tokens.push(if c == '{' { Token::Open } else { Token::Close });
            }
            c if c.is_whitespace() => flush_word(&mut word, &mut tokens),
            c => word.push(c),
        }
    }
    flush_word(&mut word, &mut tokens);

    tokens
}

/// Tokenize several lines, separating them with `Token::Newline`.
pub fn tokenize_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<Token> {
    let mut tokens = Vec::new();
    for line in lines {
        if is_blank_or_comment(line) {
            continue;
        }
        tokens.extend(tokenize_line(line, true));
        tokens.push(Token::Newline);
    }
    tokens
}

/// Net change in brace depth across one line.
///
/// Every `{` and `}` counts, including those inside double quotes, the
/// way rule bodies count them. Only backslash-escaped braces are skipped.
pub fn brace_delta(line: &str) -> i64 {
    let mut delta = 0;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '{' => delta += 1,
            '}' => delta -= 1,
            _ => {}
        }
    }

    delta
}

fn flush_word(word: &mut String, tokens: &mut Vec<Token>) {
    if !word.is_empty() {
        tokens.push(Token::Word(std::mem::take(word)));
    }
}

/// Read up to the closing quote. `\"` and `\\` are unescaped; any other
/// escape sequence is kept verbatim.
fn read_quoted(chars: &mut std::str::Chars<'_>) -> String {
    let mut out = String::new();
    while let Some(c) = chars.next() {
        match c {
            '"' => break,
            '\\' => match chars.next() {
                Some(next @ ('"' | '\\')) => out.push(next),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push('\\'),
            },
            c => out.push(c),
        }
    }
    out
}
