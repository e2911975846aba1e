use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use gamideck_core::Rating;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Back,
    Up,
    Down,
    Enter,
    Reveal,
    Rate(Rating),
    Restart,
    Spin,
    ToggleMute,
    ToggleLeaderboard,
    None,
}

pub fn map_event(ev: Event) -> Action {
    let Event::Key(KeyEvent { code, kind, .. }) = ev else {
        return Action::None;
    };
    if kind == KeyEventKind::Release {
        return Action::None;
    }
    match code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Esc => Action::Back,
        KeyCode::Up | KeyCode::Char('k') => Action::Up,
        KeyCode::Down | KeyCode::Char('j') => Action::Down,
        KeyCode::Enter => Action::Enter,
        KeyCode::Char(' ') => Action::Reveal,
        KeyCode::Char('1') => Action::Rate(Rating::Again),
        KeyCode::Char('2') => Action::Rate(Rating::Hard),
        KeyCode::Char('3') => Action::Rate(Rating::Good),
        KeyCode::Char('4') => Action::Rate(Rating::Easy),
        KeyCode::Char('r') => Action::Restart,
        KeyCode::Char('s') => Action::Spin,
        KeyCode::Char('m') => Action::ToggleMute,
        KeyCode::Tab => Action::ToggleLeaderboard,
        _ => Action::None,
    }
}
