//! Routine Advisor: pick products from a catalog and ask for a routine.

mod commands;
mod conversation;
mod display;
mod projector;
mod routine;
mod session;
mod tooltip;
mod utils;

use anyhow::Result;
use commands::{Command, HELP};
use conversation::{ChatError, TurnState};
use projector::SelectionView;
use providers::completion::HttpCompletionClient;
use services::persistence::SelectionPersistence;
use services::selection::ToggleOutcome;
use session::{RoutineOutcome, Session};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, BufReader};
use tooltip::{Rect, Size};
use tracing_subscriber::EnvFilter;

// Fixed terminal geometry for tooltip placement
const VIEWPORT: Size = Size {
    width: 1280.0,
    height: 800.0,
};
const CARD: Size = Size {
    width: 180.0,
    height: 240.0,
};
const TOOLTIP: Size = Size {
    width: 260.0,
    height: 90.0,
};
const CARDS_PER_ROW: usize = 6;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut settings = utils::load_or_init_settings();
    utils::apply_env_overrides(&mut settings, |k| std::env::var(k).ok());

    let timeout = Duration::from_secs(settings.request_timeout_secs);
    let catalog = providers::catalog::from_source(&settings.catalog_source, timeout);
    let completion = Arc::new(HttpCompletionClient::new(&settings.completion_url, timeout));
    tracing::info!(
        catalog = %catalog.source(),
        completion = %completion.endpoint(),
        "starting routine advisor"
    );
    let persistence = SelectionPersistence::new(utils::open_storage(&settings));
    let mut session = Session::new(catalog, completion, persistence, &settings.system_prompt);

    match session.show_category("all").await {
        Ok(_) => print_cards(&session),
        Err(e) => println!("Catalog unavailable: {}", e),
    }
    print_chips(&session);
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        session.tick(Instant::now());
        let cmd = match commands::parse(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(usage) => {
                println!("{}", usage);
                continue;
            }
        };
        if cmd == Command::Quit {
            break;
        }
        run(&mut session, cmd).await;
    }
    Ok(())
}

async fn run(session: &mut Session, cmd: Command) {
    match cmd {
        Command::Categories => match session.list_categories().await {
            Ok(cats) => println!("all, {}", cats.join(", ")),
            Err(e) => println!("Catalog unavailable: {}", e),
        },
        Command::Category(name) => match session.show_category(&name).await {
            Ok(_) => print_cards(session),
            Err(e) => println!("Catalog unavailable: {}", e),
        },
        Command::Cards => print_cards(session),
        Command::Toggle(id) => {
            if session.toggle(id) == ToggleOutcome::Unresolved {
                println!("Product {} is not on screen.", id);
            }
            print_chips(session);
        }
        Command::Remove(id) => {
            session.remove(id);
            print_chips(session);
        }
        Command::Hover(id) => {
            let card = card_rect(session, id);
            let name = session.displayed().find(id).map(|p| p.label());
            match (name, session.hover(id, card, TOOLTIP, VIEWPORT)) {
                (Some(name), Some(tip)) => println!("{}: {}", name, tip.text),
                _ => println!("Product {} is not on screen.", id),
            }
        }
        Command::Leave => {
            session.leave(Instant::now());
            tokio::time::sleep(tooltip::HIDE_GRACE).await;
            session.tick(Instant::now());
        }
        Command::Chips => print_chips(session),
        Command::Chat(text) => {
            tracing::debug!(phase = ?session.chat().phase(), "chat submitted");
            let result = session.send_chat(&text).await;
            report_chat(session, result.map(|_| ()));
        }
        Command::Routine => {
            let result = session.generate_routine().await;
            if let Ok(RoutineOutcome::Advised) = result {
                tracing::debug!("routine skipped, nothing selected");
            }
            report_chat(session, result.map(|_| ()));
        }
        Command::Log => {
            tracing::debug!(turns = session.chat().log().len(), "conversation log");
            for bubble in session.chat().transcript().bubbles() {
                let marker = if bubble.is_error() { "!" } else { "" };
                println!(
                    "[{}] {}{}: {}",
                    bubble.timestamp,
                    marker,
                    bubble.role.as_str(),
                    bubble.text()
                );
            }
        }
        Command::Help => println!("{}", HELP),
        Command::Quit => {}
    }
}

fn report_chat(session: &Session, result: Result<(), ChatError>) {
    match result {
        Ok(()) => {
            if let Some(bubble) = session.chat().transcript().last_assistant() {
                match &bubble.state {
                    TurnState::Failed(msg) => println!("! {}", msg),
                    _ => println!("advisor: {}", bubble.text()),
                }
            }
        }
        Err(ChatError::Empty) => {}
        Err(e) => println!("! {}", e),
    }
}

/// Position of a card in the grid, by display index
fn card_rect(session: &Session, id: shared::catalog::ProductId) -> Rect {
    let index = session
        .cards()
        .iter()
        .position(|c| c.id == id)
        .unwrap_or(0);
    let col = (index % CARDS_PER_ROW) as f32;
    let row = (index / CARDS_PER_ROW) as f32;
    Rect {
        x: 20.0 + col * (CARD.width + 20.0),
        y: 20.0 + row * (CARD.height + 20.0),
        width: CARD.width,
        height: CARD.height,
    }
}

fn print_cards(session: &Session) {
    println!("-- {} --", session.displayed().category());
    if session.cards().is_empty() {
        println!("(no products)");
    }
    for card in session.cards() {
        let mark = if card.selected { "[x]" } else { "[ ]" };
        println!(
            "{} {:>4}  {} {} ({})",
            mark, card.id, card.brand, card.name, card.category
        );
    }
}

fn print_chips(session: &Session) {
    match session.selection_view() {
        SelectionView::Placeholder(text) => println!("Selected: {}", text),
        SelectionView::Chips(chips) => {
            let labels: Vec<String> = chips
                .iter()
                .map(|c| {
                    let projector::ChipAction::Remove(id) = c.action;
                    format!("{} <{}> (remove {})", c.label, c.image, id)
                })
                .collect();
            println!("Selected: {}", labels.join(" | "));
        }
    }
}
