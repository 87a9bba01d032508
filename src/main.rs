//! # FaqMatch — fuzzy FAQ answering bot
//!
//! Usage:
//!   faqmatch                              # Interactive chat (faq.jsonl)
//!   faqmatch chat --kb support.jsonl -d   # Chat with candidate debug output
//!   faqmatch ask "reset password" --json  # One-shot answer as JSON
//!   faqmatch intents --file faq.json      # Keyword-overlap intent bot

use anyhow::Result;
use clap::{Parser, Subcommand};
use faqmatch_core::config::expand_path;
use faqmatch_core::{FaqConfig, MatchDecision, Strategy};
use faqmatch_intents::IntentSet;
use faqmatch_knowledge::{EngineHandle, FaqEngine, load_entries};
use std::path::Path;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "faqmatch", version, about = "💬 FaqMatch — fuzzy FAQ answering bot")]
struct Cli {
    /// Config file (default: ~/.faqmatch/config.toml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive chat against the FAQ knowledge base
    Chat {
        /// JSONL knowledge base (overrides config)
        #[arg(long)]
        kb: Option<String>,

        /// Print ranked candidates for every fuzzy decision
        #[arg(short, long)]
        debug: bool,
    },
    /// Answer a single question and exit
    Ask {
        query: String,

        /// JSONL knowledge base (overrides config)
        #[arg(long)]
        kb: Option<String>,

        /// Print the full decision as JSON
        #[arg(long)]
        json: bool,
    },
    /// Interactive keyword-overlap intent bot
    Intents {
        /// Intents JSON file (overrides config)
        #[arg(long)]
        file: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so `ask --json` output stays clean
    let filter = if cli.verbose {
        "faqmatch=debug,faqmatch_knowledge=debug,faqmatch_intents=debug"
    } else {
        "faqmatch=info,faqmatch_knowledge=info,faqmatch_intents=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => FaqConfig::load_from(&expand_path(path))?,
        None => FaqConfig::load()?,
    };
    tracing::debug!("Config: {:?}", config);

    match cli.command.unwrap_or(Command::Chat { kb: None, debug: false }) {
        Command::Chat { kb, debug } => {
            let kb_path = kb.map(|p| expand_path(&p)).unwrap_or_else(|| config.knowledge_file());
            run_chat(&config, &kb_path, debug).await
        }
        Command::Ask { query, kb, json } => {
            let kb_path = kb.map(|p| expand_path(&p)).unwrap_or_else(|| config.knowledge_file());
            let engine = build_engine(&config, &kb_path)?;
            let decision = engine.find_answer(&query);
            if json {
                println!("{}", serde_json::to_string_pretty(&decision)?);
            } else {
                print_decision(&decision);
            }
            Ok(())
        }
        Command::Intents { file } => {
            let path = file.map(|p| expand_path(&p)).unwrap_or_else(|| config.intents_file());
            run_intents(&config, &path).await
        }
    }
}

fn build_engine(config: &FaqConfig, kb_path: &Path) -> Result<FaqEngine> {
    let entries = load_entries(kb_path)?;
    Ok(FaqEngine::new(entries)
        .with_fallback_answer(&config.fallback_answer)
        .with_no_knowledge_answer(&config.no_knowledge_answer))
}

async fn run_chat(config: &FaqConfig, kb_path: &Path, debug: bool) -> Result<()> {
    let handle = EngineHandle::new(build_engine(config, kb_path)?);

    println!("💬 FaqMatch v{}", env!("CARGO_PKG_VERSION"));
    println!("   📚 Knowledge base: {} ({} entries)", kb_path.display(), handle.snapshot().len());
    println!("   Type a question, /reload to re-read the knowledge base, or quit to leave.");
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(input) = prompt(&mut lines).await? {
        if input.is_empty() {
            continue;
        }
        if config.is_exit_command(&input) {
            break;
        }
        if input == "/reload" {
            match build_engine(config, kb_path) {
                Ok(engine) => {
                    handle.replace(engine);
                    println!("🔄 Reloaded: {} entries", handle.snapshot().len());
                }
                Err(e) => println!("⚠️ Reload failed, keeping current knowledge base: {e}"),
            }
            continue;
        }

        let engine = handle.snapshot();
        let decision = engine.find_answer(&input);
        if debug {
            print_candidates(&engine, &input, config.debug_candidates);
        }
        print_decision(&decision);
    }
    Ok(())
}

async fn run_intents(config: &FaqConfig, path: &Path) -> Result<()> {
    let intents = IntentSet::load(path)?;
    let mut rng = rand::thread_rng();

    println!("💬 FaqMatch intents ({} intents from {})", intents.len(), path.display());
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(input) = prompt(&mut lines).await? {
        if input.is_empty() {
            continue;
        }
        if config.is_exit_command(&input) {
            println!("Bot: Goodbye!");
            break;
        }
        println!("Bot: {}", intents.respond(&input, &mut rng));
    }
    Ok(())
}

/// Print "You: " and read one trimmed line; `None` on end of input.
async fn prompt(lines: &mut Lines<BufReader<Stdin>>) -> Result<Option<String>> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(b"You: ").await?;
    stdout.flush().await?;
    Ok(lines.next_line().await?.map(|l| l.trim().to_string()))
}

fn print_decision(decision: &MatchDecision) {
    match (decision.strategy, decision.score) {
        (Strategy::EnhancedFuzzy, Some(score)) => {
            println!("Bot [score={score:.3}]: {}", decision.answer)
        }
        _ => println!("Bot: {}", decision.answer),
    }
}

fn print_candidates(engine: &FaqEngine, query: &str, limit: usize) {
    let candidates = engine.candidates(query);
    if candidates.is_empty() {
        return;
    }
    println!("[debug] candidates:");
    for c in candidates.iter().take(limit) {
        println!(
            "  idx={} score={:.3} fuzzy={:.3} char={:.3} q={:?}",
            c.entry_id,
            c.combined,
            c.fuzzy,
            c.char_score,
            engine.question(c.entry_id).unwrap_or_default()
        );
    }
}
