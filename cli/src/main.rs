//! Terminal front end for the category guessing game
//!
//! Thin presentation layer over the engine: reads guesses from stdin,
//! prints feedback, and shows past games from the history file.

use std::env;
use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use engine::{
    FileHistoryStore, GameOrchestrator, GuessOutcome, HistoryStore, IgnoredReason, Language,
    OpenAiJudge, SemanticJudge, Session, DUPLICATE_FEEDBACK, MAX_STRIKES, SUCCESS_FEEDBACK,
};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Category guessing game against a semantic judge")]
struct Args {
    /// Category to play (picked interactively if omitted)
    #[arg(long)]
    category: Option<String>,

    /// Interface language: en or sv
    #[arg(long, default_value = "en")]
    language: String,

    /// Judge model
    #[arg(long, default_value = "gpt-4o-mini")]
    model: String,

    /// Path of the session history file
    #[arg(long, default_value = "./history.json")]
    history_file: PathBuf,
}

type InputLines = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let args = Args::parse();

    let language = Language::from_str(&args.language)
        .ok_or_else(|| anyhow::anyhow!("unsupported language: {}", args.language))?;

    let api_key = match env::var("OPENAI_API_KEY") {
        Ok(key) => key,
        Err(_) => {
            eprintln!("Error: OPENAI_API_KEY must be set");
            std::process::exit(1);
        }
    };

    let judge = OpenAiJudge::new(api_key).with_model(args.model);
    let history = FileHistoryStore::new(args.history_file);

    print_history(&history).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let category = match args.category {
        Some(category) => category,
        None => match pick_category(&judge, language, &mut lines).await? {
            Some(category) => category,
            None => return Ok(()),
        },
    };

    loop {
        play_round(&category, language, judge.clone(), history.clone(), &mut lines).await?;

        println!();
        println!("Play \"{category}\" again? [y/N]");
        match lines.next_line().await? {
            Some(line) if line.trim().eq_ignore_ascii_case("y") => continue,
            _ => break,
        }
    }

    Ok(())
}

/// Show past games, most recent first
async fn print_history(history: &FileHistoryStore) {
    match history.list().await {
        Ok(records) if !records.is_empty() => {
            println!("Past games:");
            for record in records.iter().take(10) {
                println!(
                    "  {}  {}: {} correct",
                    record.started_at.format("%Y-%m-%d %H:%M"),
                    record.category,
                    record.score
                );
            }
            println!();
        }
        Ok(_) => {}
        Err(e) => tracing::warn!(error = %e, "could not read history"),
    }
}

/// Offer suggested categories and read the player's pick
async fn pick_category(
    judge: &OpenAiJudge,
    language: Language,
    lines: &mut InputLines,
) -> anyhow::Result<Option<String>> {
    let suggestions = judge.suggest_categories(&[language.as_str().to_string()]).await;

    println!("Pick a category (number, or type your own):");
    for (i, suggestion) in suggestions.iter().enumerate() {
        println!("  {}. {}", i + 1, suggestion);
    }

    loop {
        prompt()?;
        let Some(line) = lines.next_line().await? else {
            return Ok(None);
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if let Ok(index) = input.parse::<usize>() {
            if index >= 1 && index <= suggestions.len() {
                return Ok(Some(suggestions[index - 1].clone()));
            }
        }
        return Ok(Some(input.to_string()));
    }
}

/// Run one game session to completion
async fn play_round(
    category: &str,
    language: Language,
    judge: OpenAiJudge,
    history: FileHistoryStore,
    lines: &mut InputLines,
) -> anyhow::Result<()> {
    let (orchestrator, mut end_rx) = GameOrchestrator::new(category, language, judge, history)?;

    println!();
    println!("Category: {category}");
    println!("Name as many as you can. {MAX_STRIKES} strikes and the game is over; type 'quit' to give up.");

    loop {
        prompt()?;
        let Some(line) = lines.next_line().await? else {
            // stdin closed; treat as giving up
            if let Some(record) = orchestrator.give_up().await {
                print_summary(&record);
            }
            return Ok(());
        };

        let guess = line.trim();
        if guess.is_empty() {
            continue;
        }
        if guess.eq_ignore_ascii_case("quit") {
            if let Some(record) = orchestrator.give_up().await {
                print_summary(&record);
            }
            return Ok(());
        }

        match orchestrator.submit_guess(guess).await {
            GuessOutcome::Accepted { canonical, score } => {
                println!("✅ {SUCCESS_FEEDBACK} {canonical} (score: {score})");
            }
            GuessOutcome::Duplicate { canonical } => {
                println!("ℹ️  {DUPLICATE_FEEDBACK} ({canonical})");
            }
            GuessOutcome::Struck { reason, strikes, ending } => {
                println!("❌ {reason} (strikes: {strikes}/{MAX_STRIKES})");
                if ending {
                    if let Some(record) = end_rx.recv().await {
                        print_summary(&record);
                    }
                    return Ok(());
                }
            }
            GuessOutcome::Ignored(IgnoredReason::GuessInFlight) => {
                println!("⏳ Still checking the previous guess...");
            }
            GuessOutcome::Ignored(_) => {}
        }
    }
}

fn print_summary(record: &Session) {
    println!();
    println!(
        "Game over! {}: {} correct, {} strikes",
        record.category, record.score, record.strikes
    );
    if !record.accepted_items.is_empty() {
        println!("You named: {}", record.accepted_items.join(", "));
    }
}

fn prompt() -> std::io::Result<()> {
    print!("> ");
    std::io::stdout().flush()
}
