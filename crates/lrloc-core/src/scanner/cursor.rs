//! Character cursor over a source document.
//!
//! The cursor tracks a byte offset into the text and only ever moves
//! forward or back to a position it has already visited, so every call
//! site is scanned in bounded time.

/// Forward-only character cursor
#[derive(Debug, Clone)]
pub(crate) struct Cursor<'t> {
    text: &'t str,
    pos: usize,
}

impl<'t> Cursor<'t> {
    pub(crate) fn new(text: &'t str) -> Self {
        Self { text, pos: 0 }
    }

    /// Current byte offset
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    /// Moves to a byte offset previously returned by [`Cursor::pos`]
    pub(crate) fn reset(&mut self, pos: usize) {
        debug_assert!(self.text.is_char_boundary(pos));
        self.pos = pos;
    }

    pub(crate) fn rest(&self) -> &'t str {
        &self.text[self.pos..]
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub(crate) fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consumes `c` if it is the next character
    pub(crate) fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consumes `s` if the remaining text starts with it
    pub(crate) fn eat_str(&mut self, s: &str) -> bool {
        if self.rest().starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    pub(crate) fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    /// Character immediately before the current position
    pub(crate) fn prev_char(&self) -> Option<char> {
        self.text[..self.pos].chars().next_back()
    }

    /// Resolves the escape sequence following a consumed backslash and
    /// appends it to `out`.
    ///
    /// Returns `false` when the document ends right after the backslash.
    pub(crate) fn push_escape(&mut self, out: &mut String) -> bool {
        match self.bump() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\'') => out.push('\''),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => return false,
        }
        true
    }
}

/// Returns true for characters that may appear in an identifier
pub(crate) fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Returns true for the two Lua short-string delimiters
pub(crate) fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}
