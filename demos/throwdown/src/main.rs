//! Terminal front-end for the Rochambet client.
//!
//! Registers a player, then reads commands from stdin:
//!
//! ```text
//! r | p | s       throw rock / paper / scissors with the current wager
//! bet <amount>    change the wager for the next round
//! reconnect       redial after a lost connection
//! quit            close the connection and exit
//! ```
//!
//! Every new line the client appends to its message log is printed as it
//! appears, so a round plays out like:
//!
//! ```text
//! > r
//! You won 15 gold from bob! They smell what's cookin'.
//! gold: 115, bet: 10
//! ```

use rochambet::prelude::*;
use tokio::io::{AsyncBufReadExt, BufReader};

const DEFAULT_HTTP: &str = "http://localhost:8000";
const DEFAULT_WS: &str = "ws://localhost:8000/challenge";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "throwdown=info,rochambet=info".into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let username = args.next().unwrap_or_else(|| {
        eprintln!("usage: throwdown <username> [http-base] [ws-url]");
        std::process::exit(2);
    });
    let http_base = args.next().unwrap_or_else(|| DEFAULT_HTTP.to_string());
    let ws_url = args.next().unwrap_or_else(|| DEFAULT_WS.to_string());

    let mut client = ChallengeClient::new(
        HttpRegistrar::new(http_base),
        WebSocketConnector::new(ws_url),
    );

    let mut printed = 0;
    if let Err(e) = client.register(&username).await {
        drain_log(&client, &mut printed);
        eprintln!("registration failed: {e}");
        std::process::exit(1);
    }
    drain_log(&client, &mut printed);
    println!(
        "registered as {username} with {} gold — r/p/s to play, 'bet <n>', 'quit'",
        client.gold().unwrap_or(0)
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        match input {
            "" => continue,
            "quit" | "exit" => break,
            "reconnect" => {
                if let Err(e) = client.reconnect().await {
                    eprintln!("reconnect failed: {e}");
                }
            }
            "r" => run_round(&mut client, Throw::Rock, &mut printed).await,
            "p" => run_round(&mut client, Throw::Paper, &mut printed).await,
            "s" => run_round(&mut client, Throw::Scissors, &mut printed).await,
            other => {
                if let Some(raw) = other.strip_prefix("bet ") {
                    client.set_bet_input(raw);
                    drain_log(&client, &mut printed);
                } else {
                    println!("unknown command: {other}");
                }
            }
        }
        if let Some(session) = client.session() {
            println!("gold: {}, bet: {}", session.gold, session.pending_bet);
        }
    }

    client.teardown().await;
    Ok(())
}

async fn run_round(
    client: &mut ChallengeClient<HttpRegistrar, WebSocketConnector>,
    throw: Throw,
    printed: &mut usize,
) {
    if client.state() == RoundState::Disconnected {
        println!("not connected — try 'reconnect'");
        return;
    }
    println!("waiting for an opponent...");
    match client.play_round(throw).await {
        Ok(_) => drain_log(client, printed),
        Err(e) => {
            drain_log(client, printed);
            eprintln!("round failed: {e}");
        }
    }
}

/// Prints log lines appended since the last call.
fn drain_log(
    client: &ChallengeClient<HttpRegistrar, WebSocketConnector>,
    printed: &mut usize,
) {
    let entries = client.log().entries();
    let start = (*printed).min(entries.len());
    for line in &entries[start..] {
        println!("{line}");
    }
    *printed = entries.len();
}
