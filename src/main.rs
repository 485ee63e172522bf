//! Kidtalk - voice-driven learning games for kids
//!
//! Run `kidtalk play <game>` to start a game, `kidtalk games` to list
//! them, `kidtalk setup` to verify the voice model.

use clap::Parser;
use kidtalk::cli::{Cli, Commands};
use kidtalk::config::{self, Config};
use kidtalk::error::KidtalkError;
use kidtalk::game::{catalog, GameEngine, RoundPhase};
use kidtalk::grade::GradingResult;
use kidtalk::listen::{ListenEvent, Listener};
use kidtalk::recognize;
use std::io::Write;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let mut config = config::load_config(cli.config.as_deref())?;
    if let Some(secs) = cli.timeout {
        config.listen.timeout_secs = secs;
    }

    match cli.command {
        Some(Commands::Play { game }) => play(&config, &game).await,
        Some(Commands::Games) => {
            for (name, title) in catalog::game_names() {
                println!("{:<10} {}", name, title);
            }
            Ok(())
        }
        Some(Commands::Listen) => listen_once(&config).await,
        Some(Commands::Config) => {
            let rendered = toml::to_string_pretty(&config)
                .map_err(|e| KidtalkError::Config(e.to_string()))?;
            print!("{}", rendered);
            println!("# model dir: {:?}", config.model_dir());
            Ok(())
        }
        Some(Commands::Setup) => setup(&config),
        None => {
            for (name, title) in catalog::game_names() {
                println!("{:<10} {}", name, title);
            }
            println!("\nStart one with: kidtalk play <game>");
            Ok(())
        }
    }
}

/// Verify the model is present, extracting the archive if needed
fn setup(config: &Config) -> anyhow::Result<()> {
    config.ensure_directories()?;

    let model_dir = config.model_dir();
    match recognize::model::prepare_model_dir(&model_dir) {
        Ok(dir) => {
            println!("Voice model ready: {:?}", dir);
            Ok(())
        }
        Err(e) => {
            println!("Voice model not ready.\n{}", e);
            Err(e.into())
        }
    }
}

/// One bounded listen session, transcript printed - a microphone check
async fn listen_once(config: &Config) -> anyhow::Result<()> {
    // Fail loudly up front if the model cannot load; a silent empty
    // transcript would look like a microphone problem.
    recognize::model::shared_model(config)?;

    let listener = Listener::new(config);
    let timeout = listener.default_timeout();

    println!("Listening for {}s... speak now.", timeout.as_secs());
    let mut rx = listener.start_listen(timeout);

    while let Some(event) = rx.recv().await {
        match event {
            ListenEvent::Transcript(text) if text.is_empty() => {
                println!("Didn't catch anything.")
            }
            ListenEvent::Transcript(text) => println!("Heard: {:?}", text),
            ListenEvent::Finished => break,
        }
    }

    Ok(())
}

/// Terminal front end for the game engine: prints stimuli, waits for
/// Enter, runs the listen-and-grade round
async fn play(config: &Config, game: &str) -> anyhow::Result<()> {
    let provider = catalog::create_game(game)
        .ok_or_else(|| KidtalkError::UnknownGame(game.to_string()))?;

    // Load the model before the first round so a missing model is a
    // clear startup error instead of five seconds of silence per round.
    recognize::model::shared_model(config)?;

    let listener = Listener::new(config);
    let timeout = listener.default_timeout();
    let mut engine = GameEngine::new(provider, listener);

    println!("=== {} ===", engine.title());
    println!("Say your answer after pressing Enter. Type q to quit.\n");

    let mut stimulus = engine.next_stimulus();
    loop {
        println!("Score: {}  [{}]", engine.score(), engine.tier().label());
        if let Some(ref asset) = stimulus.asset {
            println!("  ({})", asset);
        }
        println!("{}", stimulus.prompt);

        print!("Press Enter to answer (q to quit): ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        std::io::stdin().read_line(&mut line)?;
        if line.trim().eq_ignore_ascii_case("q") {
            break;
        }

        println!("Listening...");
        let report = engine.answer(&stimulus, timeout).await;
        debug_assert_eq!(engine.phase(), RoundPhase::Answered);

        if !report.transcript.is_empty() {
            println!("You said: {:?}", report.transcript);
        }
        println!("{}", report.feedback);
        if let Some(hint) = report.hint {
            println!("{}", hint);
        }

        if report.result == GradingResult::NoAnswer {
            // Same stimulus again: no answer is never penalized
            println!();
            continue;
        }

        println!("Score: {}\n", report.score);
        stimulus = engine.next_stimulus();
    }

    println!("Final score: {}. Bye!", engine.score());
    Ok(())
}
