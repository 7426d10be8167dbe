use std::io::stdout;

use crossterm::cursor::SetCursorStyle;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use ratatui::{Frame, style::Stylize, text::ToLine, widgets::Padding};
use web_time::Duration;

use crate::challenges::{Catalog, Challenge, PassagePool};
use crate::config::Config;
use crate::page;
use crate::scores::{FileStore, ScoreBoard, StoreError};
use crate::utils::ROUNDED_BLOCK;

/// How long to wait for input before polling the pages again
const FRAME_TIMEOUT: Duration = Duration::from_millis(16);

/// An app message
pub enum Message {
    /// An error occurred
    Error(Box<dyn std::error::Error + Send>),
    /// Show a specific page
    Show(page::Page),
    /// Reset to the main menu
    Reset,
    /// Quit the application
    Quit,
}

/// Everything the pages share
#[derive(Debug)]
pub struct Context {
    pub config: Config,
    pub catalog: Catalog,
    pub provider: PassagePool,
    pub scores: ScoreBoard<FileStore>,
}

impl Context {
    pub fn new(config: Config) -> Result<Self, StoreError> {
        let catalog = Catalog::builtin();
        let provider = PassagePool::new(&catalog, config.settings.challenge_pool);
        let scores = ScoreBoard::new(FileStore::new(config.scores_dir())?);

        Ok(Self {
            config,
            catalog,
            provider,
            scores,
        })
    }
}

/// The app itself
pub struct App {
    page: page::Page,
    context: Context,
}

impl App {
    /// Creates a new `App`, starting at the menu or directly at a challenge
    pub fn new(mut context: Context, challenge: Option<Challenge>) -> Self {
        let page = match challenge {
            Some(challenge) => start(challenge, &mut context),
            None => page::Menu::new(&context).into(),
        };
        Self { page, context }
    }

    /// Runs the app
    pub fn run(&mut self) -> std::io::Result<()> {
        let mut terminal = ratatui::init();

        execute!(stdout(), SetCursorStyle::SteadyBar)?;
        log::debug!("Terminal initialized");

        let result = self.event_loop(&mut terminal);

        ratatui::restore();
        log::debug!("Terminal restored");

        result
    }

    fn event_loop(&mut self, terminal: &mut ratatui::DefaultTerminal) -> std::io::Result<()> {
        loop {
            let event = event::poll(FRAME_TIMEOUT)?
                .then(event::read)
                .transpose()?;
            if let Some(message) = self.handle_events(event) {
                match message {
                    Message::Error(error) => {
                        log::error!("{error}");
                        self.page = page::Error::from(error).into();
                    }
                    Message::Show(page) => self.page = page,
                    Message::Reset => self.page = page::Menu::new(&self.context).into(),
                    Message::Quit => break,
                }
            }
            terminal.draw(|frame| self.draw(frame))?;
        }

        Ok(())
    }

    /// Draws the next frame
    fn draw(&mut self, frame: &mut Frame) {
        let mut block = ROUNDED_BLOCK
            .padding(Padding::new(1, 1, 0, 0))
            .title_top("DEDUCE".to_line().bold().centered())
            .title_top("<CTRL-Q> to exit".to_line().right_aligned());

        if let Some(top_msg) = self.page.render_top(&self.context) {
            block = block.title_top(top_msg);
        }

        let area = frame.area();
        let content = block.inner(area);

        frame.render_widget(block, area);

        self.page.render(frame, content, &self.context);
    }

    /// Global event handler
    fn handle_events(&mut self, event_opt: Option<Event>) -> Option<Message> {
        event_opt
            .and_then(|event| {
                self.page
                    .handle_events(&event, &mut self.context)
                    .or_else(|| match event {
                        Event::Key(key)
                            if key.code == KeyCode::Esc && self.page.captures_escape() =>
                        {
                            None
                        }
                        Event::Key(key) => Self::handle_key_event(key),
                        _ => None,
                    })
            })
            .or_else(|| self.page.poll(&mut self.context))
    }

    /// Global key events
    const fn handle_key_event(key: KeyEvent) -> Option<Message> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::CONTROL) => Some(Message::Quit),
            (KeyCode::Esc, KeyModifiers::NONE) => Some(Message::Reset),
            _ => None,
        }
    }
}

/// The typing page for a challenge, or an error page if it has nothing to type
pub fn start(challenge: Challenge, context: &mut Context) -> page::Page {
    log::info!("Starting challenge '{}'", challenge.id);
    match page::Typing::new(challenge, context) {
        Ok(typing) => typing.into(),
        Err(error) => page::Error::from(error).into(),
    }
}
