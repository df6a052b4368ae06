use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use userdesk::cli::{parse_command, render_state, Args, Command, CommandError, HELP};
use userdesk::config::Config;
use userdesk::images::FileImageStore;
use userdesk::logging::init_tracing;
use userdesk::repository::InMemoryUserRepository;
use userdesk::ui::users::{EffectStream, UserDispatcher};

/// Print every notice emitted so far, oldest first.
fn print_notices(effects: &mut EffectStream) {
    for effect in effects.drain() {
        println!("[notice] {effect}");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing();

    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    args.apply(&mut config);
    tracing::info!(mode = ?config.dispatch.mode, "Starting userdesk");

    let repository = Arc::new(InMemoryUserRepository::new(&config.repository));
    let images = Arc::new(FileImageStore::new(config.images.resolved_dir()));
    let (dispatcher, mut effects) = UserDispatcher::new(repository, images, &config.dispatch);

    println!("{HELP}");
    dispatcher.wait_idle().await;
    print_notices(&mut effects);
    print!("{}", render_state(&dispatcher.snapshot()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(CommandError::Empty) => continue,
            Err(err) => {
                eprintln!("{err}");
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
            Command::State => {
                println!("{}", serde_json::to_string_pretty(&dispatcher.snapshot())?);
            }
            command => match command.into_intent(&dispatcher.snapshot()) {
                Ok(Some(intent)) => {
                    dispatcher.handle(intent);
                    dispatcher.wait_idle().await;
                    print_notices(&mut effects);
                    print!("{}", render_state(&dispatcher.snapshot()));
                }
                Ok(None) => {}
                Err(err) => eprintln!("{err}"),
            },
        }
    }

    Ok(())
}
