use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{List, Paragraph, Tabs, Wrap},
};

use crate::{
    app::{self, Context, Message},
    challenges::{Challenge, Difficulty, Level},
    page::Leaderboard,
    utils::{ROUNDED_BLOCK, center, select_next, select_previous},
};

/// Page: Main menu
///
/// Challenges grouped by level, one tab per level.
#[derive(Debug)]
pub struct Menu {
    levels: Vec<Level>,
    level_index: usize,
    challenges: Vec<Challenge>,
    challenge_index: usize,
}

impl Menu {
    /// Creates a new menu
    pub fn new(context: &Context) -> Self {
        let levels: Vec<Level> = context.catalog.levels().collect();
        let mut menu = Self {
            levels,
            level_index: 0,
            challenges: Vec::new(),
            challenge_index: 0,
        };
        menu.load_level(context);
        menu
    }

    fn level(&self) -> Option<Level> {
        self.levels.get(self.level_index).copied()
    }

    fn load_level(&mut self, context: &Context) {
        self.challenges = self
            .level()
            .map(|level| context.catalog.by_level(level).cloned().collect())
            .unwrap_or_default();
        self.challenge_index = 0;
    }

    fn selected(&self) -> Option<&Challenge> {
        self.challenges.get(self.challenge_index)
    }
}

// Rendering logic
impl Menu {
    pub fn render(&self, frame: &mut Frame, area: Rect, _context: &Context) {
        let area = center(area, Constraint::Percentage(80), Constraint::Percentage(80));
        let [tabs_area, list_area, detail_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Fill(1),
            Constraint::Length(5),
        ])
        .areas(area);

        let tabs = Tabs::new(self.levels.iter().map(|level| level.to_string()))
            .select(self.level_index)
            .highlight_style(Style::new().bold().reversed());
        frame.render_widget(tabs, tabs_area);

        let items = self.challenges.iter().enumerate().map(|(i, challenge)| {
            let mut selector = "  ";
            let style = if i == self.challenge_index {
                selector = "> ";
                Style::new().reversed()
            } else {
                Style::new()
            };

            Line::from(vec![
                Span::styled(format!("{selector}{:<28}", challenge.title), style),
                Span::styled(
                    format!(" {:<10}", challenge.difficulty),
                    Style::new().fg(difficulty_color(challenge.difficulty)),
                ),
                Span::raw(challenge.estimated_time).dim(),
            ])
        });
        frame.render_widget(List::new(items), list_area);

        if let Some(challenge) = self.selected() {
            let mut details = vec![Line::raw(challenge.description).italic()];
            if challenge.is_randomized() {
                details.push(Line::raw("A new passage is drawn every time").dim());
            }

            let paragraph = Paragraph::new(details)
                .wrap(Wrap { trim: true })
                .block(ROUNDED_BLOCK.title(challenge.title));
            frame.render_widget(paragraph, detail_area);
        }
    }

    pub fn render_top(&self, _context: &Context) -> Option<Line<'_>> {
        Some(Line::raw(
            "<Enter> start | <Tab> next level | <S> high scores",
        ))
    }

    pub fn handle_events(&mut self, event: &Event, context: &mut Context) -> Option<Message> {
        if let Event::Key(key) = event
            && key.is_press()
        {
            return self.handle_key(key, context);
        }

        None
    }
}

// Event handlers
impl Menu {
    fn handle_key(&mut self, key: &KeyEvent, context: &mut Context) -> Option<Message> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                select_previous(&mut self.challenge_index, self.challenges.len());
            }
            KeyCode::Down | KeyCode::Char('j') => {
                select_next(&mut self.challenge_index, self.challenges.len());
            }
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
                select_next(&mut self.level_index, self.levels.len());
                self.load_level(context);
            }
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                select_previous(&mut self.level_index, self.levels.len());
                self.load_level(context);
            }
            KeyCode::Char('s') => {
                return Some(Message::Show(Leaderboard::new(context, None).into()));
            }
            KeyCode::Enter => {
                let challenge = self.selected()?.clone();
                return Some(Message::Show(app::start(challenge, context)));
            }
            _ => (),
        };

        None
    }
}

pub const fn difficulty_color(difficulty: Difficulty) -> Color {
    match difficulty {
        Difficulty::Easy => Color::Green,
        Difficulty::Medium => Color::Yellow,
        Difficulty::Hard => Color::Red,
        Difficulty::Challenge => Color::Magenta,
    }
}
