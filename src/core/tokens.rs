// src/core/tokens.rs
// Tolerant HTML token stream over a whole document.
// Skips comments and processing instructions, keeps the doctype, reads
// script & style bodies raw and title & textarea bodies up to their close tag,
// lowercases tag + attribute names, decodes entities in text and attribute
// values. Malformed input never errors; stray '<' is text.

use super::html::{find_ci, is_raw_text, is_rcdata, next_byte, starts_with_ci};
use super::sanitize::decode_entities;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Open { name: String, attrs: Vec<(String, String)>, self_closing: bool },
    Close { name: String },
    Text(String),
    /// `<!DOCTYPE ...>`, inner text as written (e.g. `DOCTYPE html`).
    Doctype(String),
}

pub struct Tokens<'a> {
    s: &'a str,
    b: &'a [u8],
    i: usize,
    n: usize,
    // "</script" while inside a raw-text element; bool = decode entities
    raw_close: Option<(String, bool)>,
}

impl<'a> Tokens<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, b: s.as_bytes(), i: 0, n: s.len(), raw_close: None }
    }

    #[inline]
    fn skip_past(&mut self, pat: &[u8]) {
        self.i = match find_ci(self.b, self.i, pat) {
            Some(p) => p + pat.len(),
            None => self.n,
        };
    }

    fn text_until_tag(&mut self, from: usize) -> Token {
        let end = next_byte(self.b, from, b'<').unwrap_or(self.n);
        let text = decode_entities(&self.s[self.i..end]);
        self.i = end;
        Token::Text(text)
    }

    fn read_name(&mut self) -> String {
        let start = self.i;
        while self.i < self.n {
            match self.b[self.i] {
                b' ' | b'\t' | b'\r' | b'\n' | b'/' | b'>' | b'=' => break,
                _ => self.i += 1,
            }
        }
        self.s[start..self.i].to_ascii_lowercase()
    }

    #[inline]
    fn skip_ws(&mut self) {
        while self.i < self.n && self.b[self.i].is_ascii_whitespace() { self.i += 1; }
    }

    fn read_value(&mut self) -> String {
        self.skip_ws();
        let Some(&q) = self.b.get(self.i) else { return s!() };
        if q == b'"' || q == b'\'' {
            let start = self.i + 1;
            let end = next_byte(self.b, start, q).unwrap_or(self.n);
            self.i = (end + 1).min(self.n);
            decode_entities(&self.s[start..end])
        } else {
            let start = self.i;
            while self.i < self.n && !self.b[self.i].is_ascii_whitespace() && self.b[self.i] != b'>' {
                self.i += 1;
            }
            decode_entities(&self.s[start..self.i])
        }
    }

    /// Called with `i` on the first byte of the tag name.
    fn open_tag(&mut self) -> Token {
        let name = self.read_name();
        let mut attrs: Vec<(String, String)> = Vec::new();
        let mut self_closing = false;

        loop {
            self.skip_ws();
            match self.b.get(self.i) {
                None => break,
                Some(b'>') => { self.i += 1; break; }
                Some(b'/') => {
                    self.i += 1;
                    if self.b.get(self.i) == Some(&b'>') {
                        self.i += 1;
                        self_closing = true;
                        break;
                    }
                }
                Some(_) => {
                    let key = self.read_name();
                    if key.is_empty() {
                        // lone '=' or similar junk
                        self.i += 1;
                        continue;
                    }
                    self.skip_ws();
                    let value = if self.b.get(self.i) == Some(&b'=') {
                        self.i += 1;
                        self.read_value()
                    } else {
                        s!()
                    };
                    // first occurrence wins, as in browsers
                    if !attrs.iter().any(|(k, _)| *k == key) {
                        attrs.push((key, value));
                    }
                }
            }
        }

        if !self_closing && (is_raw_text(&name) || is_rcdata(&name)) {
            self.raw_close = Some((join!("</", &name), is_rcdata(&name)));
        }
        Token::Open { name, attrs, self_closing }
    }

    fn doctype(&mut self) -> Token {
        let start = self.i + 2; // "<!"
        let end = next_byte(self.b, start, b'>').unwrap_or(self.n);
        self.i = (end + 1).min(self.n);
        Token::Doctype(s!(self.s[start..end].trim()))
    }

    fn close_tag(&mut self) -> Token {
        self.i += 2; // "</"
        let name = self.read_name();
        self.i = next_byte(self.b, self.i, b'>').map_or(self.n, |p| p + 1);
        Token::Close { name }
    }
}

impl Iterator for Tokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if let Some((close, decode)) = self.raw_close.take() {
            let end = find_ci(self.b, self.i, close.as_bytes()).unwrap_or(self.n);
            let raw = &self.s[self.i..end];
            self.i = end;
            if !raw.is_empty() {
                let text = if decode { decode_entities(raw) } else { s!(raw) };
                return Some(Token::Text(text));
            }
        }

        while self.i < self.n {
            if self.b[self.i] != b'<' {
                return Some(self.text_until_tag(self.i));
            }
            if starts_with_ci(self.b, self.i, b"<!--") {
                self.skip_past(b"-->");
                continue;
            }
            match self.b.get(self.i + 1) {
                Some(b'!') if starts_with_ci(self.b, self.i, b"<!doctype") => return Some(self.doctype()),
                Some(b'!') | Some(b'?') => { self.skip_past(b">"); continue; }
                Some(b'/') => return Some(self.close_tag()),
                Some(c) if c.is_ascii_alphabetic() => {
                    self.i += 1;
                    return Some(self.open_tag());
                }
                // stray '<'
                _ => return Some(self.text_until_tag(self.i + 1)),
            }
        }
        None
    }
}
