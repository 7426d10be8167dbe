use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{List, Paragraph},
};
use scribe::{Input, Statistics};
use web_time::SystemTime;

use crate::{
    app::{self, Context, Message},
    challenges::Challenge,
    page::Leaderboard,
    scores::{HighScore, MAX_NAME_LENGTH, PlayerName},
    utils::{KeyEventHelper, ROUNDED_BLOCK, center},
};

#[derive(Debug)]
enum State {
    /// Asking for a name to save the score under
    EnterName { name: String, error: Option<String> },
    Saved,
    /// Saving is turned off
    Unsaved,
}

/// Page: Results
///
/// Final statistics of a finished challenge, and the challenge's high scores
#[derive(Debug)]
pub struct Results {
    challenge: Challenge,
    statistics: Statistics,
    state: State,
    scores: Vec<HighScore>,
}

impl Results {
    pub fn new(challenge: Challenge, statistics: Statistics, context: &Context) -> Self {
        let state = if context.config.settings.scores.save_enabled {
            State::EnterName {
                name: String::new(),
                error: None,
            }
        } else {
            State::Unsaved
        };

        let mut results = Self {
            challenge,
            statistics,
            state,
            scores: Vec::new(),
        };
        results.load_scores(context);
        results
    }

    fn load_scores(&mut self, context: &Context) {
        self.scores = context.scores.for_challenge(self.challenge.id);
        self.scores
            .truncate(context.config.settings.scores.leaderboard_size);
    }

    fn save(&mut self, context: &Context) -> Option<Message> {
        let State::EnterName { name, error } = &mut self.state else {
            return None;
        };

        let name = match PlayerName::parse(name) {
            Ok(name) => name,
            Err(reason) => {
                *error = Some(reason.to_string());
                return None;
            }
        };

        log::info!(
            "Saving a score of {} wpm for '{}'",
            self.statistics.wpm,
            name.as_str()
        );
        let score = HighScore::new(
            name,
            &self.statistics,
            self.challenge.id,
            SystemTime::now(),
        );
        if let Err(error) = context.scores.save(score) {
            return Some(Message::Error(Box::new(error)));
        }

        self.state = State::Saved;
        self.load_scores(context);
        None
    }
}

// Rendering logic
impl Results {
    pub fn render(&self, frame: &mut Frame, area: Rect, _context: &Context) {
        let area = center(area, Constraint::Percentage(80), Constraint::Percentage(80));
        let [stats_area, name_area, scores_area] = Layout::vertical([
            Constraint::Length(6),
            Constraint::Length(3),
            Constraint::Fill(1),
        ])
        .areas(area);

        let counters = self.statistics.counters;
        let duration = self
            .statistics
            .duration
            .map_or_else(|| "--:--".to_string(), scribe::format_elapsed);

        let stats = Paragraph::new(vec![
            Line::from(vec![
                Span::raw("WPM: "),
                Span::raw(self.statistics.wpm.to_string()).bold(),
            ]),
            Line::from(vec![
                Span::raw("Accuracy: "),
                Span::raw(format!("{}%", self.statistics.accuracy)).bold(),
            ]),
            Line::raw(format!("Time: {duration}")),
            Line::from(vec![
                Span::raw("Keystrokes: "),
                Span::styled(counters.correct.to_string(), Style::new().fg(Color::Green)),
                Span::raw(" / "),
                Span::styled(counters.incorrect.to_string(), Style::new().fg(Color::Red)),
                Span::raw(format!(" / {}", counters.total)),
            ]),
        ])
        .block(ROUNDED_BLOCK.title(self.challenge.title.bold()));
        frame.render_widget(stats, stats_area);

        let name_line = match &self.state {
            State::EnterName { name, error } => {
                let mut spans = vec![
                    Span::raw("Name: "),
                    Span::raw(name.clone()).bold(),
                    Span::raw("_").slow_blink(),
                ];
                if let Some(error) = error {
                    spans.push(Span::styled(
                        format!("  {error}"),
                        Style::new().fg(Color::Red),
                    ));
                }
                Line::from(spans)
            }
            State::Saved => Line::raw("Score saved").green(),
            State::Unsaved => Line::raw("Saving scores is turned off").dim(),
        };
        frame.render_widget(Paragraph::new(name_line).block(ROUNDED_BLOCK), name_area);

        let items = self.scores.iter().enumerate().map(|(rank, score)| {
            Line::raw(format!(
                "{:>2}. {:<20} {:>4} wpm {:>4}%",
                rank + 1,
                score.player_name,
                score.wpm,
                score.accuracy
            ))
        });
        let title = if self.scores.is_empty() {
            "No high scores yet"
        } else {
            "High scores"
        };
        frame.render_widget(
            List::new(items).block(ROUNDED_BLOCK.title(title)),
            scores_area,
        );
    }

    pub fn render_top(&self, _context: &Context) -> Option<Line<'_>> {
        let hint = match self.state {
            State::EnterName { .. } => "<Enter> save | <CTRL-R> retry | <ESC> menu",
            State::Saved | State::Unsaved => "<Enter> menu | <CTRL-R> retry | <S> all scores",
        };
        Some(Line::raw(hint))
    }

    pub fn handle_events(&mut self, event: &Event, context: &mut Context) -> Option<Message> {
        let Event::Key(key) = event else {
            return None;
        };

        if !key.is_press() {
            return None;
        }

        if key.is_ctrl_press_char('r') {
            return Some(Message::Show(app::start(self.challenge.clone(), context)));
        }

        if key.code == KeyCode::Enter {
            return match self.state {
                State::EnterName { .. } => self.save(context),
                State::Saved | State::Unsaved => Some(Message::Reset),
            };
        }

        let State::EnterName { name, error } = &mut self.state else {
            if key.code == KeyCode::Char('s') {
                let leaderboard = Leaderboard::new(context, Some(self.challenge.id.to_string()));
                return Some(Message::Show(leaderboard.into()));
            }
            return None;
        };

        match key.code {
            KeyCode::Backspace => {
                name.pop();
                *error = None;
            }
            KeyCode::Char(char) if key.to_scribe().classify() == Input::Char(char) => {
                if name.chars().count() < MAX_NAME_LENGTH {
                    name.push(char);
                }
                *error = None;
            }
            _ => (),
        }

        None
    }
}
