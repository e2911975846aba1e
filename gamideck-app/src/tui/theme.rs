use ratatui::style::{Color, Style, Stylize};

pub fn title_style() -> Style { Style::default().fg(Color::Cyan).bold() }
pub fn hint_style() -> Style { Style::default().fg(Color::DarkGray) }
pub fn selected_style() -> Style { Style::default().fg(Color::Yellow).bold() }
pub fn footer_style() -> Style { Style::default().fg(Color::Gray) }
pub fn you_style() -> Style { Style::default().fg(Color::Green).bold() }
pub fn gauge_style() -> Style { Style::default().fg(Color::Green).bg(Color::Black) }
pub fn badge_style() -> Style { Style::default().fg(Color::Red).bold() }
