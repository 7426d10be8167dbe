use crate::clock::Clock;
use crate::session::{LetterStatus, Session};

/// A letter of the reference text, ready to be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderedLetter {
    pub index: usize,
    pub char: char,
    pub status: LetterStatus,
}

/// Iterator over every letter of a session's text
pub struct Letters<'a, C: Clock> {
    session: &'a Session<C>,
    index: usize,
}

impl<'a, C: Clock> From<&'a Session<C>> for Letters<'a, C> {
    fn from(value: &'a Session<C>) -> Self {
        Self {
            session: value,
            index: 0,
        }
    }
}

impl<C: Clock> ExactSizeIterator for Letters<'_, C> {}

impl<C: Clock> std::iter::FusedIterator for Letters<'_, C> {}

impl<C: Clock> Iterator for Letters<'_, C> {
    type Item = RenderedLetter;

    fn next(&mut self) -> Option<Self::Item> {
        let char = *self.session.reference().get(self.index)?;

        let letter = RenderedLetter {
            index: self.index,
            char,
            status: self.session.letter_status(self.index),
        };

        self.index += 1;
        Some(letter)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.session.text_len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

/// A line of wrapped text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextLine {
    pub letters: Vec<RenderedLetter>,
}

impl TextLine {
    /// Returns true if the line holds the current letter
    pub fn has_cursor(&self) -> bool {
        self.letters
            .iter()
            .any(|letter| letter.status == LetterStatus::Current)
    }
}

/// A session's text wrapped into lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lines {
    pub lines: Vec<TextLine>,
    /// Index of the line holding the cursor. The last line once everything is typed
    pub cursor_line: usize,
}

impl<C: Clock> Session<C> {
    /// Wrap the text into lines of at most `width` letters, not counting the space a line ends on
    ///
    /// Lines break after the space preceding a word that would not fit, and after every newline.
    /// Words longer than a whole line are split. No letter is ever dropped, so every index of the
    /// text appears on exactly one line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use scribe::Session;
    ///
    /// let session = Session::new("hello world this is a test").unwrap();
    /// let lines: Vec<String> = session
    ///     .lines(11)
    ///     .lines
    ///     .iter()
    ///     .map(|line| line.letters.iter().map(|letter| letter.char).collect())
    ///     .collect();
    ///
    /// assert_eq!(lines, ["hello world ", "this is a ", "test"]);
    /// ```
    pub fn lines(&self, width: usize) -> Lines {
        let width = width.max(1);
        let reference = self.reference();

        let mut lines = Vec::new();
        let mut current = TextLine::default();
        let mut cursor_line = None;

        for letter in self.letters() {
            if letter.status == LetterStatus::Current {
                cursor_line = Some(lines.len());
            }

            // Break after newlines
            if letter.char == '\n' {
                current.letters.push(letter);
                lines.push(std::mem::take(&mut current));
                continue;
            }

            // Break after a space if the next word won't fit
            if letter.char.is_whitespace() && !current.letters.is_empty() {
                let next_word = reference[letter.index + 1..]
                    .iter()
                    .take_while(|char| !char.is_whitespace())
                    .count();

                if current.letters.len() + 1 + next_word > width {
                    current.letters.push(letter);
                    lines.push(std::mem::take(&mut current));
                    continue;
                }
            }

            // Split words that are longer than a line
            if current.letters.len() >= width {
                lines.push(std::mem::take(&mut current));
                if letter.status == LetterStatus::Current {
                    cursor_line = Some(lines.len());
                }
            }

            current.letters.push(letter);
        }

        if !current.letters.is_empty() {
            lines.push(current);
        }

        Lines {
            cursor_line: cursor_line.unwrap_or_else(|| lines.len().saturating_sub(1)),
            lines,
        }
    }
}
