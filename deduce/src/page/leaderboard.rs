use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, ToSpan},
    widgets::{List, Paragraph, Tabs},
};
use strum::{Display, EnumIter, IntoEnumIterator};
use web_time::SystemTime;

use crate::{
    app::{Context, Message},
    scores::{HighScore, KeyValueStore, ScoreBoard},
    utils::{ROUNDED_BLOCK, center, time_ago},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum View {
    Top,
    Recent,
}

/// Page: Leaderboard
///
/// Saved high scores, fastest or newest first
#[derive(Debug)]
pub struct Leaderboard {
    view: View,
    challenge_id: Option<String>,
    scores: Vec<HighScore>,
}

impl Leaderboard {
    /// A leaderboard over every challenge, or only the given one
    pub fn new(context: &Context, challenge_id: Option<String>) -> Self {
        let mut leaderboard = Self {
            view: View::Top,
            challenge_id,
            scores: Vec::new(),
        };
        leaderboard.load(context);
        leaderboard
    }

    fn load(&mut self, context: &Context) {
        let limit = context.config.settings.scores.leaderboard_size;
        self.scores = select(&context.scores, self.view, self.challenge_id.as_deref(), limit);
    }

    fn switch_view(&mut self, context: &Context) {
        self.view = match self.view {
            View::Top => View::Recent,
            View::Recent => View::Top,
        };
        self.load(context);
    }
}

/// The scores shown for a view, optionally limited to one challenge
pub fn select<S: KeyValueStore>(
    board: &ScoreBoard<S>,
    view: View,
    challenge_id: Option<&str>,
    limit: usize,
) -> Vec<HighScore> {
    let mut scores = match view {
        View::Top => board.top(usize::MAX),
        View::Recent => board.recent(usize::MAX),
    };

    if let Some(challenge_id) = challenge_id {
        scores.retain(|score| score.challenge_id == challenge_id);
    }

    scores.truncate(limit);
    scores
}

// Rendering logic
impl Leaderboard {
    pub fn render(&self, frame: &mut Frame, area: Rect, context: &Context) {
        let area = center(area, Constraint::Percentage(80), Constraint::Percentage(80));
        let [tabs_area, list_area] =
            Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).areas(area);

        let selected = View::iter().position(|view| view == self.view).unwrap_or(0);
        let tabs = Tabs::new(View::iter().map(|view| view.to_string()))
            .select(selected)
            .highlight_style(Style::new().bold().reversed());
        frame.render_widget(tabs, tabs_area);

        let title = match &self.challenge_id {
            Some(id) => format!("High scores for {}", challenge_title(context, id)),
            None => "High scores".to_string(),
        };

        if self.scores.is_empty() {
            let empty = Paragraph::new(
                "No high scores saved yet.\nComplete a challenge to see your scores here.",
            )
            .block(ROUNDED_BLOCK.title(title.to_span().bold()))
            .centered();
            frame.render_widget(empty, list_area);
            return;
        }

        let now = SystemTime::now();
        let items = self.scores.iter().enumerate().map(|(rank, score)| {
            Line::raw(format!(
                "{:>2}. {:<20} | {:>4} wpm | {:>3}% | {:<24} | {}",
                rank + 1,
                score.player_name,
                score.wpm,
                score.accuracy,
                challenge_title(context, &score.challenge_id),
                time_ago(score.timestamp(), now)
            ))
        });

        frame.render_widget(
            List::new(items).block(ROUNDED_BLOCK.title(title.to_span().bold())),
            list_area,
        );
    }

    pub fn render_top(&self, _context: &Context) -> Option<Line<'_>> {
        Some(Line::raw("<Tab> switch view | <ESC> menu"))
    }

    pub fn handle_events(&mut self, event: &Event, context: &mut Context) -> Option<Message> {
        if let Event::Key(key) = event
            && key.is_press()
            && matches!(
                key.code,
                KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right
            )
        {
            self.switch_view(context);
        }

        None
    }
}

fn challenge_title<'a>(context: &'a Context, id: &'a str) -> &'a str {
    context
        .catalog
        .get(id)
        .map_or(id, |challenge| challenge.title)
}
