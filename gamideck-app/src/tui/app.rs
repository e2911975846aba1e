use crate::tui::{
    inputs::{map_event, Action},
    views::{self, RightPane, Status},
};
use crossterm::{
    event::{self},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use gamideck_core::{CoreError, Deck, RateOutcome, Rating, Repository, ReviewSession, StudyContext};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stdout, Stdout};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Decks,
    Review,
    Leaderboard,
}

pub struct TuiApp {
    pub repo: Arc<dyn Repository>,
    pub rt: Arc<Runtime>,
    ctx: StudyContext,
    decks: Vec<Deck>,
    sel: usize,
    session: Option<ReviewSession>,
    screen: Screen,
    // screen to return to when the leaderboard is closed
    prev: Screen,
    message: String,
}

impl TuiApp {
    pub fn new(repo: Arc<dyn Repository>, rt: Arc<Runtime>, ctx: StudyContext) -> Self {
        Self {
            repo,
            rt,
            ctx,
            decks: vec![],
            sel: 0,
            session: None,
            screen: Screen::Decks,
            prev: Screen::Decks,
            message: String::new(),
        }
    }

    fn load_decks(&mut self) {
        match self.rt.block_on(self.repo.list_decks()) {
            Ok(v) => self.decks = v,
            Err(e) => {
                warn!(error = %e, "listing decks failed");
                self.message = format!("could not load decks: {e}");
            }
        }
        self.sel = self.sel.min(self.decks.len().saturating_sub(1));
    }

    fn start_review(&mut self) {
        let Some(deck) = self.decks.get(self.sel) else { return };
        let cards = match self.rt.block_on(self.repo.list_cards(Some(deck.id))) {
            Ok(c) => c,
            Err(e) => {
                self.message = format!("could not load cards: {e}");
                return;
            }
        };
        match ReviewSession::new(cards) {
            Ok(s) => {
                self.message = format!("reviewing {}", deck.name);
                self.session = Some(s);
                self.screen = Screen::Review;
            }
            Err(e) => self.message = e.to_string(),
        }
    }

    fn rate(&mut self, rating: Rating) {
        let Some(session) = self.session.as_mut() else { return };
        match session.rate(rating) {
            Ok(RateOutcome::Ignored) => {}
            Ok(outcome) => {
                let credit = self.ctx.credit(rating);
                self.message = match outcome {
                    RateOutcome::Requeued { position } => format!("{rating}: back at position {}", position + 1),
                    _ => format!("{rating}: mastered, +{} pts", credit.points),
                };
                if credit.rank_up {
                    self.message.push_str("  You are now #1!");
                }
                if matches!(outcome, RateOutcome::Mastered | RateOutcome::Completed) && self.ctx.audio.should_play() {
                    print!("\x07");
                }
            }
            Err(CoreError::NotRevealed) => self.message = "reveal the answer first (space)".into(),
            Err(e) => self.message = e.to_string(),
        }
    }

    fn spin(&mut self) {
        self.message = match self.ctx.spin.spin(&mut rand::rng()) {
            Ok(res) => format!("Daily spin: {}x points!", res.reward),
            Err(e) => e.to_string(),
        };
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        self.load_decks();

        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = self.mainloop(&mut terminal);

        disable_raw_mode().ok();
        let mut out: Stdout = std::io::stdout();
        execute!(out, LeaveAlternateScreen).ok();
        terminal.show_cursor().ok();

        res
    }

    fn right_pane(&self) -> RightPane<'_> {
        match self.screen {
            Screen::Leaderboard => RightPane::Leaderboard(&self.ctx.leaderboard),
            Screen::Decks => {
                if self.decks.is_empty() {
                    RightPane::Empty("No decks yet. Add one with `gamideck deck add`.")
                } else {
                    RightPane::Idle
                }
            }
            Screen::Review => match &self.session {
                Some(s) if s.original().is_empty() => RightPane::Empty("This deck has no cards."),
                Some(s) if s.is_complete() => RightPane::Complete { tally: s.tally(), earned: self.ctx.earned() },
                Some(s) => RightPane::Review { snap: s.snapshot(), tally: s.tally() },
                None => RightPane::Idle,
            },
        }
    }

    fn mainloop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
        loop {
            terminal.draw(|f| {
                let status = Status {
                    message: &self.message,
                    earned: self.ctx.earned(),
                    multiplier: self.ctx.spin.multiplier(),
                    muted: self.ctx.audio.muted,
                    rank_up_badge: self.ctx.leaderboard.show_rank_up_badge(),
                };
                let area = f.size();
                views::draw_ui(f, area, &self.decks, self.sel, self.right_pane(), status);
            })?;

            if event::poll(std::time::Duration::from_millis(100))? {
                match map_event(event::read()?) {
                    Action::Quit => break,
                    Action::Back => match self.screen {
                        Screen::Decks => break,
                        Screen::Leaderboard => self.screen = self.prev,
                        Screen::Review => {
                            self.session = None;
                            self.screen = Screen::Decks;
                            self.message.clear();
                        }
                    },
                    Action::Up => {
                        if self.screen == Screen::Decks {
                            self.sel = self.sel.saturating_sub(1);
                        }
                    }
                    Action::Down => {
                        if self.screen == Screen::Decks && self.sel + 1 < self.decks.len() {
                            self.sel += 1;
                        }
                    }
                    Action::Enter => {
                        if self.screen == Screen::Decks {
                            self.start_review();
                        }
                    }
                    Action::Reveal => {
                        if let Some(s) = self.session.as_mut().filter(|_| self.screen == Screen::Review) {
                            s.reveal();
                        }
                    }
                    Action::Rate(r) => {
                        if self.screen == Screen::Review {
                            self.rate(r);
                        }
                    }
                    Action::Restart => {
                        if let Some(s) = self.session.as_mut().filter(|_| self.screen == Screen::Review) {
                            s.restart();
                            self.message = "restarted".into();
                        }
                    }
                    Action::Spin => self.spin(),
                    Action::ToggleMute => {
                        let muted = self.ctx.audio.toggle_mute();
                        self.message = if muted { "sound off".into() } else { "sound on".into() };
                    }
                    Action::ToggleLeaderboard => {
                        if self.screen == Screen::Leaderboard {
                            self.screen = self.prev;
                        } else {
                            self.prev = self.screen;
                            self.screen = Screen::Leaderboard;
                            self.ctx.leaderboard.set_show_rank_up_badge(false);
                        }
                    }
                    Action::None => {}
                }
            }
        }
        Ok(())
    }
}
