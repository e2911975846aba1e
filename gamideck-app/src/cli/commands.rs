use crate::api::server as api_server;
use crate::cli::opts::*;
use crate::tui::app::TuiApp;

use anyhow::{anyhow, bail, Context, Result};
use gamideck_core::{
    ensure_deck, filter_by_text, resolve_deck, AudioSettings, Card, CoreError, Deck, RateOutcome,
    Rating, ReminderFrequency, Repository, ReviewSession, StudyContext,
};
use gamideck_json::paths::data_root;
use gamideck_json::JsonStore;
use std::io::{stdin, stdout, Write};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub async fn run_cli(args: Cli) -> Result<()> {
    let repo = open_repo(&args).await?;
    let audio = AudioSettings { muted: args.muted };
    match args.cmd {
        Command::Api(api) => {
            let addr: std::net::SocketAddr = api.addr.parse().context("invalid --addr")?;
            api_server::run(repo, StudyContext::new(audio), addr).await
        }
        Command::Tui => bail!("the TUI runs outside the async runtime"),
        Command::Deck(cmd) => deck_cmd(repo, cmd).await,
        Command::Card(cmd) => card_cmd(repo, cmd).await,
        Command::Review(cmd) => review_cmd(repo, cmd, audio).await,
        Command::Leaderboard => {
            print_leaderboard(&StudyContext::new(audio));
            Ok(())
        }
        Command::Reminder(cmd) => reminder_cmd(repo, cmd).await,
        Command::Export(cmd) => export_cmd(repo, cmd).await,
        Command::Import(cmd) => import_cmd(repo, cmd).await,
    }
}

pub fn run_tui(args: &Cli) -> Result<()> {
    let rt = Arc::new(tokio::runtime::Runtime::new()?);
    let repo = rt.block_on(open_repo(args))?;
    let mut app = TuiApp::new(repo, rt, StudyContext::new(AudioSettings { muted: args.muted }));
    app.run()
}

pub async fn open_repo(args: &Cli) -> Result<Arc<dyn Repository>> {
    let root = args.data_dir.clone().unwrap_or_else(data_root);
    let store = JsonStore::open_in(&root, args.max_backups)
        .await
        .with_context(|| format!("opening deck library in {}", root.display()))?;
    Ok(Arc::new(store))
}

async fn deck_cmd(repo: Arc<dyn Repository>, cmd: DeckCmd) -> Result<()> {
    match cmd {
        DeckCmd::Add { name } => {
            let d = repo.create_deck(&name).await?;
            println!("{}", d.id);
        }
        DeckCmd::List => {
            for d in repo.list_decks().await? {
                let n = repo.list_cards(Some(d.id)).await?.len();
                println!("{}\t{}\tcards={}", d.id, d.name, n);
            }
        }
        DeckCmd::Rm { deck } => {
            let d = resolve_deck(&*repo, &deck).await?;
            repo.delete_deck(d.id).await?;
            println!("ok");
        }
    }
    Ok(())
}

async fn card_cmd(repo: Arc<dyn Repository>, cmd: CardCmd) -> Result<()> {
    match cmd {
        CardCmd::Add(a) => {
            let deck = resolve_deck(&*repo, &a.deck).await?;
            let c = repo.add_card(deck.id, &a.front, &a.back).await?;
            println!("{}", c.id);
        }
        CardCmd::List { deck, query } => {
            let deck_id = match deck {
                Some(sel) => Some(resolve_deck(&*repo, &sel).await?.id),
                None => None,
            };
            let mut cards = repo.list_cards(deck_id).await?;
            if let Some(q) = query {
                cards = filter_by_text(&cards, &q);
            }
            for c in cards {
                println!("{}\t{}\t{}\tdeck={}", c.id, c.front, c.back, c.deck_id);
            }
        }
        CardCmd::Rm { card_id } => {
            repo.delete_card(parse_uuid(&card_id)?).await?;
            println!("ok");
        }
    }
    Ok(())
}

async fn review_cmd(repo: Arc<dyn Repository>, cmd: ReviewCmd, audio: AudioSettings) -> Result<()> {
    let deck = resolve_deck(&*repo, &cmd.deck).await?;
    let cards = repo.list_cards(Some(deck.id)).await?;
    if cards.is_empty() {
        println!("deck {} has no cards", deck.name);
        return Ok(());
    }
    let mut session = ReviewSession::new(cards)?;
    let mut ctx = StudyContext::new(audio);
    info!(deck = %deck.name, cards = session.len(), "review started");

    if cmd.spin {
        match ctx.spin.spin(&mut rand::rng()) {
            Ok(res) => println!("Daily spin: {}x points this session!", res.reward),
            Err(e) => println!("{e}"),
        }
    }

    loop {
        while let Some(card) = session.active_card().cloned() {
            let snap = session.snapshot();
            println!("\n[{}/{} mastered] {}", snap.mastered, snap.total, progress_bar(snap.progress, 20));
            println!("Q: {}", card.front);
            if !prompt_enter("[enter=show, q=quit] ")? {
                return finish(&session, &ctx);
            }
            session.reveal();
            println!("A: {}", card.back);
            println!("[1=Again, 2=Hard, 3=Good, 4=Easy, q=quit]");

            loop {
                let line = read_line("rate> ")?;
                let line = line.trim();
                if matches!(line, "q" | "quit") {
                    return finish(&session, &ctx);
                }
                match session.rate_str(line) {
                    Ok((rating, outcome)) => {
                        report(&mut ctx, rating, &outcome);
                        break;
                    }
                    Err(CoreError::InvalidRating(_)) => println!("enter 1/2/3/4 or again/hard/good/easy, q to quit"),
                    Err(e) => return Err(e.into()),
                }
            }
        }

        finish(&session, &ctx)?;
        let again = read_line("review this deck again? [y/N] ")?;
        if !matches!(again.trim().to_lowercase().as_str(), "y" | "yes") {
            return Ok(());
        }
        session.restart();
    }
}

fn report(ctx: &mut StudyContext, rating: Rating, outcome: &RateOutcome) {
    let credit = ctx.credit(rating);
    match outcome {
        RateOutcome::Requeued { position } => println!("→ back in the queue at position {}", position + 1),
        RateOutcome::Mastered | RateOutcome::Completed => {
            if ctx.audio.should_play() {
                print!("\x07");
            }
            println!("→ mastered");
        }
        RateOutcome::Ignored => {}
    }
    if credit.points > 0 {
        println!("+{} points", credit.points);
    }
    if credit.rank_up {
        println!("You are now #1 on the leaderboard!");
    }
}

fn finish(session: &ReviewSession, ctx: &StudyContext) -> Result<()> {
    let t = session.tally();
    println!(
        "\n{} ratings (again {}, hard {}, good {}, easy {}), accuracy {:.0}%",
        t.total,
        t.again,
        t.hard,
        t.good,
        t.easy,
        t.accuracy() * 100.0
    );
    println!(
        "mastered {}/{}, points earned {} (x{})",
        session.mastered().len(),
        session.original().len(),
        ctx.earned(),
        ctx.spin.multiplier()
    );
    if let Some(rank) = ctx.leaderboard.rank_of_you() {
        println!("leaderboard rank: #{rank}");
    }
    Ok(())
}

fn print_leaderboard(ctx: &StudyContext) {
    for (i, f) in ctx.leaderboard.friends().iter().enumerate() {
        let you = if f.is_you { " (you)" } else { "" };
        println!(
            "{:>2}. {:<10}{}\t{} pts\tstreak {}\tcards {}\t{:?}",
            i + 1,
            f.name,
            you,
            f.points,
            f.streak,
            f.cards_completed,
            f.trend
        );
    }
}

async fn reminder_cmd(repo: Arc<dyn Repository>, cmd: ReminderCmd) -> Result<()> {
    match cmd {
        ReminderCmd::Show { deck } => {
            let d = resolve_deck(&*repo, &deck).await?;
            let r = repo.get_reminder(d.id).await?;
            println!("enabled={}\tvacation={}\tfrequency={}", r.enabled, r.vacation, r.frequency);
            match r.deadline {
                Some(dl) => println!("deadline={dl}"),
                None => println!("deadline=-"),
            }
            let today = chrono::Local::now().date_naive();
            match r.next_reminder(today) {
                Some(next) => println!("next reminder: {next}"),
                None => println!("next reminder: none"),
            }
        }
        ReminderCmd::Set(s) => {
            let d = resolve_deck(&*repo, &s.deck).await?;
            let mut r = repo.get_reminder(d.id).await?;
            if s.on {
                r.enabled = true;
            } else if s.off {
                r.enabled = false;
            }
            if s.vacation {
                r.vacation = true;
            } else if s.no_vacation {
                r.vacation = false;
            }
            if s.clear_deadline {
                r.deadline = None;
            } else if let Some(dl) = s.deadline {
                r.deadline = Some(dl);
            }
            if let Some(f) = s.frequency {
                r.frequency = f.parse::<ReminderFrequency>()?;
            }
            repo.set_reminder(d.id, &r).await?;
            println!("ok");
        }
    }
    Ok(())
}

async fn export_cmd(repo: Arc<dyn Repository>, cmd: ExportCmd) -> Result<()> {
    match cmd {
        ExportCmd::Json { path } => {
            let decks = repo.list_decks().await?;
            let cards = repo.list_cards(None).await?;
            let bundle = ExportBundle { version: 1, decks, cards };
            std::fs::write(&path, serde_json::to_string_pretty(&bundle)?)?;
            println!("wrote {}", path.display());
        }
        ExportCmd::Csv { path, deck } => {
            let deck_id = match deck {
                Some(sel) => Some(resolve_deck(&*repo, &sel).await?.id),
                None => None,
            };
            let cards = repo.list_cards(deck_id).await?;
            let deck_name: std::collections::HashMap<Uuid, String> =
                repo.list_decks().await?.into_iter().map(|d| (d.id, d.name)).collect();

            let mut wtr = csv::Writer::from_path(&path)?;
            wtr.write_record(["deck", "front", "back"])?;
            for c in cards {
                let dn = deck_name.get(&c.deck_id).cloned().unwrap_or_else(|| c.deck_id.to_string());
                wtr.write_record([dn, c.front, c.back])?;
            }
            wtr.flush()?;
            println!("wrote {}", path.display());
        }
    }
    Ok(())
}

async fn import_cmd(repo: Arc<dyn Repository>, cmd: ImportCmd) -> Result<()> {
    let n = match cmd {
        ImportCmd::Json { path } => {
            let data = std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            let bundle: ExportBundle = serde_json::from_str(&data)?;
            import_bundle(&*repo, bundle).await?
        }
        ImportCmd::Csv { path, deck } => {
            let target = match deck {
                Some(sel) => Some(ensure_deck(&*repo, &sel).await?),
                None => None,
            };
            let mut rdr = csv::Reader::from_path(&path)?;
            let mut n = 0usize;
            for rec in rdr.records() {
                let rec = rec?;
                let deck_name = rec.get(0).unwrap_or("").trim();
                let front = rec.get(1).unwrap_or("");
                let back = rec.get(2).unwrap_or("");
                let deck = match &target {
                    Some(d) => d.clone(),
                    None if deck_name.is_empty() => bail!("row {} has no deck and no --deck given", n + 1),
                    None => ensure_deck(&*repo, deck_name).await?,
                };
                repo.add_card(deck.id, front, back).await?;
                n += 1;
            }
            n
        }
    };
    println!("imported {n} cards");
    Ok(())
}

/// Recreates decks by name and appends their cards in bundle order.
pub async fn import_bundle<R: Repository + ?Sized>(repo: &R, bundle: ExportBundle) -> Result<usize> {
    let mut by_id = std::collections::HashMap::new();
    for d in &bundle.decks {
        by_id.insert(d.id, ensure_deck(repo, &d.name).await?);
    }
    let mut n = 0;
    for c in bundle.cards {
        let deck = by_id
            .get(&c.deck_id)
            .ok_or_else(|| anyhow!("card {} refers to an unknown deck", c.id))?;
        repo.add_card(deck.id, &c.front, &c.back).await?;
        n += 1;
    }
    Ok(n)
}

fn progress_bar(ratio: f32, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * width as f32).round() as usize).min(width);
    format!("[{}{}] {:>3.0}%", "#".repeat(filled), "-".repeat(width - filled), ratio * 100.0)
}

fn parse_uuid(s: &str) -> Result<Uuid> {
    Uuid::parse_str(s).map_err(|_| anyhow!("invalid uuid"))
}

/// Returns false on quit.
fn prompt_enter(label: &str) -> Result<bool> {
    let s = read_line(label)?;
    Ok(!matches!(s.trim(), "q" | "quit"))
}

fn read_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    stdout().flush().ok();
    let mut s = String::new();
    if stdin().read_line(&mut s)? == 0 {
        // EOF behaves like quit
        return Ok("q".to_string());
    }
    Ok(s)
}

#[derive(serde::Serialize, serde::Deserialize)]
pub struct ExportBundle {
    pub version: u32,
    pub decks: Vec<Deck>,
    pub cards: Vec<Card>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamideck_core::memory::MemoryRepo;

    #[test]
    fn progress_bar_fills_proportionally() {
        assert_eq!(progress_bar(0.0, 4), "[----]   0%");
        assert_eq!(progress_bar(0.5, 4), "[##--]  50%");
        assert_eq!(progress_bar(1.0, 4), "[####] 100%");
    }

    #[tokio::test]
    async fn bundle_import_keeps_order_and_merges_decks() {
        let src = MemoryRepo::new();
        let deck = src.create_deck("Basic Korean").await.unwrap();
        src.add_card(deck.id, "hana", "one").await.unwrap();
        src.add_card(deck.id, "dul", "two").await.unwrap();
        let bundle = ExportBundle {
            version: 1,
            decks: src.list_decks().await.unwrap(),
            cards: src.list_cards(None).await.unwrap(),
        };

        let dst = MemoryRepo::new();
        dst.create_deck("basic korean").await.unwrap();
        assert_eq!(import_bundle(&dst, bundle).await.unwrap(), 2);

        let decks = dst.list_decks().await.unwrap();
        assert_eq!(decks.len(), 1);
        let fronts: Vec<_> = dst.list_cards(None).await.unwrap().into_iter().map(|c| c.front).collect();
        assert_eq!(fronts, ["hana", "dul"]);
    }
}
