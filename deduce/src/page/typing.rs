use std::cell::Cell;
use std::rc::Rc;

use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Position, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Clear, Padding, Paragraph},
};
use scribe::{LetterStatus, RenderedLetter, Session, SessionError, Statistics, Status};

use crate::{
    app::{Context, Message},
    challenges::{Challenge, TextProvider},
    page::Results,
    utils::{KeyEventHelper, ROUNDED_BLOCK, center},
};

/// Page: Typing
///
/// Runs a typing session on a challenge's passage
pub struct Typing {
    challenge: Challenge,
    session: Session,
    /// Set by the session's completion handler, taken by `poll`
    completed: Rc<Cell<Option<Statistics>>>,
    /// Asking whether to abandon the passage
    confirming: bool,
}

impl Typing {
    pub fn new(challenge: Challenge, context: &mut Context) -> Result<Self, SessionError> {
        let text = context.provider.text_for(&challenge);
        let completed = Rc::new(Cell::new(None));

        let handler = Rc::clone(&completed);
        let session = Session::new(&text)?
            .with_configuration(context.config.session_configuration())
            .on_complete(move |statistics| handler.set(Some(*statistics)));

        Ok(Self {
            challenge,
            session,
            completed,
            confirming: false,
        })
    }

    /// Start the same passage over
    fn retry(&mut self) {
        log::debug!("Retrying challenge '{}'", self.challenge.id);
        self.completed.set(None);
        self.session.reset();
    }

    /// Leaving now would throw away typed progress
    fn has_progress(&self) -> bool {
        self.session.status() == Status::Active && self.session.cursor() > 0
    }

    #[cfg(test)]
    pub fn cursor(&self) -> usize {
        self.session.cursor()
    }

    /// Esc stays on this page while it would abandon progress
    pub fn captures_escape(&self) -> bool {
        self.confirming || self.has_progress()
    }
}

// Rendering logic
impl Typing {
    pub fn render(&self, frame: &mut Frame, area: Rect, _context: &Context) {
        let area = center(area, Constraint::Percentage(80), Constraint::Percentage(80));
        let lines = self.session.lines(area.width.into());

        // Keep the cursor line on screen, with one line of context above it
        let height = usize::from(area.height).max(1);
        let first = lines
            .cursor_line
            .saturating_sub(1)
            .min(lines.lines.len().saturating_sub(height));

        let mut cursor = None;
        let rendered: Vec<Line> = lines
            .lines
            .iter()
            .enumerate()
            .skip(first)
            .take(height)
            .map(|(row, line)| {
                if let Some(column) = line
                    .letters
                    .iter()
                    .position(|letter| letter.status == LetterStatus::Current)
                {
                    cursor = Some((column, row - first));
                }
                line.letters.iter().map(letter_span).collect()
            })
            .collect();

        // Vertically center short texts
        let top = area
            .height
            .saturating_sub(rendered.len() as u16)
            .saturating_div(2);
        let paragraph = Paragraph::new(rendered).block(Block::new().padding(Padding::top(top)));
        frame.render_widget(paragraph, area);

        // A line may end on a space just past the edge, keep the cursor inside
        if let Some((column, row)) = cursor {
            frame.set_cursor_position(Position::new(
                area.x + (column as u16).min(area.width.saturating_sub(1)),
                area.y + top + row as u16,
            ));
        }

        if self.confirming {
            let popup = center(area, Constraint::Length(46), Constraint::Length(4));
            let dialog = Paragraph::new(vec![
                Line::raw("Your progress on this passage will be lost."),
                Line::raw("<Y> abandon | <N> keep typing").dim(),
            ])
            .centered()
            .block(ROUNDED_BLOCK.title("Abandon Investigation?".bold()));

            frame.render_widget(Clear, popup);
            frame.render_widget(dialog, popup);
        }
    }

    pub fn render_top(&self, _context: &Context) -> Option<Line<'_>> {
        let statistics = self.session.statistics();
        let status = match self.session.status() {
            _ if self.confirming => "Abandon? <Y>/<N>",
            Status::Idle => "Start typing",
            Status::Active => "<CTRL-R> retry",
            Status::Complete => "Done",
        };

        Some(Line::raw(format!(
            "{} | {} WPM | {}% | {}% done | {status}",
            self.session.formatted_elapsed(),
            statistics.wpm,
            statistics.accuracy,
            self.session.progress(),
        )))
    }

    pub fn handle_events(&mut self, event: &Event, _context: &mut Context) -> Option<Message> {
        let Event::Key(key) = event else {
            return None;
        };

        if !key.is_press() {
            return None;
        }

        if self.confirming {
            match key.code {
                KeyCode::Char('y' | 'Y') => return Some(Message::Reset),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => self.confirming = false,
                _ => (),
            }
            return None;
        }

        if key.code == KeyCode::Esc {
            // Without progress, Esc falls through to the global reset
            self.confirming = self.has_progress();
            return None;
        }

        if key.is_ctrl_press_char('r') {
            self.retry();
            return None;
        }

        self.session.handle_key(&key.to_scribe());

        None
    }

    pub fn poll(&mut self, context: &mut Context) -> Option<Message> {
        self.session.poll();

        let statistics = self.completed.take()?;
        log::info!(
            "Finished '{}' at {} wpm with {}% accuracy",
            self.challenge.id,
            statistics.wpm,
            statistics.accuracy
        );

        Some(Message::Show(
            Results::new(self.challenge.clone(), statistics, context).into(),
        ))
    }
}

fn letter_span(letter: &RenderedLetter) -> Span<'static> {
    let (char, is_space) = match letter.char {
        '\n' => ('↵', true),
        ' ' => (' ', true),
        char => (char, false),
    };

    let style = match letter.status {
        LetterStatus::Correct => Style::new().fg(Color::Green),
        LetterStatus::Incorrect if is_space => Style::new().bg(Color::Red),
        LetterStatus::Incorrect => Style::new().fg(Color::Red).add_modifier(Modifier::BOLD),
        LetterStatus::Current => Style::new().underlined(),
        LetterStatus::Pending => Style::new().dim(),
    };

    Span::styled(char.to_string(), style)
}
