use crate::tui::theme::*;
use gamideck_core::{Deck, Leaderboard, SessionSnapshot, Totals, Trend};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub enum RightPane<'a> {
    Idle,
    Review { snap: SessionSnapshot, tally: &'a Totals },
    Complete { tally: &'a Totals, earned: u32 },
    Leaderboard(&'a Leaderboard),
    Empty(&'a str),
}

pub struct Status<'a> {
    pub message: &'a str,
    pub earned: u32,
    pub multiplier: f32,
    pub muted: bool,
    pub rank_up_badge: bool,
}

pub fn draw_ui(f: &mut Frame, area: Rect, decks: &[Deck], sel: usize, right: RightPane, status: Status) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1), Constraint::Length(1)])
        .split(area);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(rows[0]);
    draw_decks(f, chunks[0], decks, sel);
    draw_right(f, chunks[1], right);
    draw_status(f, rows[1], &status);

    let foot = Paragraph::new(Line::from(vec![
        Span::raw(" ↑/k ↓/j select "),
        Span::raw(" Enter start "),
        Span::raw(" space reveal "),
        Span::raw(" 1-4 rate "),
        Span::raw(" r restart "),
        Span::raw(" s spin "),
        Span::raw(" m mute "),
        Span::raw(" tab board "),
        Span::raw(" q quit "),
    ]))
    .style(footer_style());
    f.render_widget(foot, rows[2]);
}

fn draw_status(f: &mut Frame, area: Rect, s: &Status) {
    let mut spans = vec![
        Span::raw(format!(" {} pts ", s.earned)).style(title_style()),
        Span::raw(format!(" x{} ", s.multiplier)),
        Span::raw(if s.muted { " muted " } else { " sound on " }).style(hint_style()),
    ];
    if s.rank_up_badge {
        spans.push(Span::raw(" ● #1 ").style(badge_style()));
    }
    spans.push(Span::raw(format!(" {}", s.message)));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_decks(f: &mut Frame, area: Rect, decks: &[Deck], sel: usize) {
    let items: Vec<_> = decks
        .iter()
        .enumerate()
        .map(|(i, d)| {
            let s = if i == sel {
                Line::from(d.name.clone()).style(selected_style())
            } else {
                Line::from(d.name.clone())
            };
            ListItem::new(s)
        })
        .collect();

    let list = List::new(items).block(Block::default().title(Span::styled("Decks", title_style())).borders(Borders::ALL));
    f.render_widget(list, area);
}

fn draw_right(f: &mut Frame, area: Rect, pane: RightPane) {
    match pane {
        RightPane::Idle => {
            let p = Paragraph::new("Press Enter to start reviewing the selected deck.")
                .wrap(Wrap { trim: true })
                .block(Block::default().title("Review").borders(Borders::ALL));
            f.render_widget(p, area);
        }
        RightPane::Empty(msg) => {
            let p = Paragraph::new(msg)
                .wrap(Wrap { trim: true })
                .block(Block::default().title("Review").borders(Borders::ALL));
            f.render_widget(p, area);
        }
        RightPane::Review { snap, tally } => draw_review(f, area, &snap, tally),
        RightPane::Complete { tally, earned } => {
            let text = vec![
                Line::from(Span::raw("Deck complete!").style(title_style())),
                Line::from(""),
                Line::from(format!(
                    "{} ratings: again {}, hard {}, good {}, easy {}",
                    tally.total, tally.again, tally.hard, tally.good, tally.easy
                )),
                Line::from(format!("accuracy {:.0}%", tally.accuracy() * 100.0)),
                Line::from(format!("points earned {earned}")),
                Line::from(""),
                Line::from(Span::raw("r to review again, Esc to pick another deck").style(hint_style())),
            ];
            let p = Paragraph::new(text)
                .wrap(Wrap { trim: true })
                .block(Block::default().title("Review").borders(Borders::ALL));
            f.render_widget(p, area);
        }
        RightPane::Leaderboard(board) => draw_leaderboard(f, area, board),
    }
}

fn draw_review(f: &mut Frame, area: Rect, snap: &SessionSnapshot, tally: &Totals) {
    let block = Block::default().title("Review").borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    let gauge = Gauge::default()
        .gauge_style(gauge_style())
        .ratio(snap.progress.clamp(0.0, 1.0) as f64)
        .label(format!("{}/{} mastered", snap.mastered, snap.total));
    f.render_widget(gauge, parts[0]);

    let Some(card) = &snap.active else { return };
    let mut text = vec![Line::from(vec![
        Span::raw("Q: ").style(title_style()),
        Span::raw(card.front.as_str()),
    ])];
    if snap.revealed {
        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::raw("A: ").style(title_style()),
            Span::raw(card.back.as_str()),
        ]));
        text.push(Line::from(""));
        text.push(Line::from(Span::raw("1 again  2 hard  3 good  4 easy").style(hint_style())));
    } else {
        text.push(Line::from(""));
        text.push(Line::from(Span::raw("space to reveal").style(hint_style())));
    }
    if let Some(next) = &snap.next {
        if snap.revealed {
            text.push(Line::from(""));
            text.push(Line::from(Span::raw(format!("next: {}", next.front)).style(hint_style())));
        }
    }
    text.push(Line::from(Span::raw(format!("{} left, {} rated", snap.remaining, tally.total)).style(hint_style())));
    f.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), parts[2]);
}

fn draw_leaderboard(f: &mut Frame, area: Rect, board: &Leaderboard) {
    let items: Vec<_> = board
        .friends()
        .iter()
        .enumerate()
        .map(|(i, fr)| {
            let trend = match fr.trend {
                Trend::Up => "▲",
                Trend::Down => "▼",
                Trend::Same => "–",
            };
            let line = Line::from(format!(
                "{:>2}. {:<10} {:>5} pts  {:>2}d streak  {:>4} cards  {}",
                i + 1,
                fr.name,
                fr.points,
                fr.streak,
                fr.cards_completed,
                trend
            ));
            ListItem::new(if fr.is_you { line.style(you_style()) } else { line })
        })
        .collect();
    let list = List::new(items).block(Block::default().title("Leaderboard").borders(Borders::ALL));
    f.render_widget(list, area);
}
