//! Chess tournament client driver
//!
//! Builds the client, mounts it and reads commands from stdin, one per line:
//! `go <path>`, `login <token>`, `logout`, `back`, `forward`, `state`,
//! `routes`, `history`, `quit`.

mod commands;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use chess_core::{App, Config};
use commands::{execute, Command, CommandResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    chess_core::init_logging();

    let config = match std::env::args().nth(1) {
        Some(path) => Config::from_file(&path)
            .with_context(|| format!("failed to load config from {}", path))?,
        None => Config::from_env().context("invalid configuration")?,
    };

    let app = App::new(config)?;
    app.mount(&app.config().mount_point)?;

    let mut stdout = tokio::io::stdout();
    let initial = execute(&app, Command::Go(app.home_path())).await;
    write_reply(&mut stdout, &initial).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let reply = match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => execute(&app, command).await,
            Err(e) => CommandResult::err(e),
        };
        write_reply(&mut stdout, &reply).await?;
    }

    tracing::info!("Client shut down");
    Ok(())
}

async fn write_reply<T: serde::Serialize>(
    stdout: &mut tokio::io::Stdout,
    reply: &CommandResult<T>,
) -> anyhow::Result<()> {
    let mut line = serde_json::to_vec(reply)?;
    line.push(b'\n');
    stdout.write_all(&line).await?;
    stdout.flush().await?;
    Ok(())
}
