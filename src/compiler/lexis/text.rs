use crate::constants::common::{FIRST_COLUMN, FIRST_LINE};

pub struct Reader {
    code: Vec<char>,
    position: usize,
    line: u32,
    column: u32,
}

impl Reader {
    #[must_use]
    pub fn new(code: &str) -> Reader {
        let code: Vec<_> = code.chars().collect();
        Reader {
            code,
            position: 0,
            line: FIRST_LINE,
            column: FIRST_COLUMN,
        }
    }

    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.code.get(self.position).copied()
    }

    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[must_use]
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Consuming a newline moves every later position to the next line.
    pub fn forward(&mut self) {
        let Some(c) = self.peek() else {
            return;
        };
        self.position += 1;
        if c == '\n' {
            self.line += 1;
            self.column = FIRST_COLUMN;
        } else {
            self.column += 1;
        }
    }

    pub fn skip_until(&mut self, stop: char) {
        while self.peek().is_some_and(|c| c != stop) {
            self.forward();
        }
    }
}
