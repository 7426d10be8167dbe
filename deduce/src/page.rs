use crossterm::event::Event;
use ratatui::{Frame, layout::Rect, text::Line};

pub mod error;
pub mod leaderboard;
pub mod menu;
pub mod results;
pub mod typing;

pub use error::Error;
pub use leaderboard::Leaderboard;
pub use menu::Menu;
pub use results::Results;
pub use typing::Typing;

use crate::app::{Context, Message};

macro_rules! make_page_enum {
    ($($t:tt),*) => {
        pub enum Page {
            $(
                $t(Box<$t>),
            )*
        }

        $(
            impl From<$t> for Page {
                fn from(value: $t) -> Page {
                    Page::$t(Box::new(value))
                }
            }
        )*
    };
}

make_page_enum!(Menu, Typing, Results, Leaderboard, Error);

impl Page {
    pub fn render(&mut self, frame: &mut Frame, area: Rect, context: &Context) {
        match self {
            Self::Menu(page) => page.render(frame, area, context),
            Self::Typing(page) => page.render(frame, area, context),
            Self::Results(page) => page.render(frame, area, context),
            Self::Leaderboard(page) => page.render(frame, area, context),
            Self::Error(page) => page.render(frame, area, context),
        }
    }

    pub fn render_top(&mut self, context: &Context) -> Option<Line<'_>> {
        match self {
            Self::Menu(page) => page.render_top(context),
            Self::Typing(page) => page.render_top(context),
            Self::Results(page) => page.render_top(context),
            Self::Leaderboard(page) => page.render_top(context),
            Self::Error(page) => page.render_top(context),
        }
    }

    pub fn handle_events(&mut self, event: &Event, context: &mut Context) -> Option<Message> {
        match self {
            Self::Menu(page) => page.handle_events(event, context),
            Self::Typing(page) => page.handle_events(event, context),
            Self::Results(page) => page.handle_events(event, context),
            Self::Leaderboard(page) => page.handle_events(event, context),
            Self::Error(page) => page.handle_events(event, context),
        }
    }

    /// Returns true if the page handles Esc itself instead of returning to the menu
    pub fn captures_escape(&self) -> bool {
        match self {
            Self::Typing(page) => page.captures_escape(),
            Self::Menu(_) | Self::Results(_) | Self::Leaderboard(_) | Self::Error(_) => false,
        }
    }

    pub fn poll(&mut self, context: &mut Context) -> Option<Message> {
        match self {
            Self::Typing(page) => page.poll(context),
            Self::Menu(_) | Self::Results(_) | Self::Leaderboard(_) | Self::Error(_) => None,
        }
    }
}
