use crate::error::ParseError;

/// Deepest chain of nested atoms (groups, signs, function arguments) a single
/// parse accepts.
pub const MAX_DEPTH: usize = 256;

/// Scanning state for a single parse. Lives on the parser's stack frame, so
/// concurrent parses never share it.
#[derive(Debug, Clone)]
pub struct Cursor {
    chars: Vec<char>,
    /// `None` until the first `advance`.
    position: Option<usize>,
    current: Option<char>,
    depth: usize,
}

impl Cursor {
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            position: None,
            current: None,
            depth: 0,
        }
    }

    /// Moves one character forward. Past the end `current` stays `None`.
    pub fn advance(&mut self) {
        let next = self.position.map_or(0, |position| position + 1);
        let next = next.min(self.chars.len());
        self.position = Some(next);
        self.current = self.chars.get(next).copied();
    }

    /// Advances past `expected` if it is the current character.
    pub fn try_consume(&mut self, expected: char) -> bool {
        if self.current == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn current(&self) -> Option<char> {
        self.current
    }

    pub fn position(&self) -> usize {
        self.position.unwrap_or(0)
    }

    /// Enters one more level of nesting, failing past `MAX_DEPTH`.
    pub fn descend(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(ParseError::TooDeep {
                limit: MAX_DEPTH,
                position: self.position(),
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Text between `start` and the current position.
    pub fn slice_from(&self, start: usize) -> String {
        let end = self.position().min(self.chars.len());
        self.chars[start.min(end)..end].iter().collect()
    }
}
