use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use deep_control::DeepControl;
use shared::{domain::Direction, protocol::ControlOutcome};
use storage::Storage;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

mod config;
mod render;

use config::{load_settings, normalize_database_url};
use render::render_stack;

#[derive(Parser, Debug)]
#[command(name = "deepctl", about = "Type a code through a stack of remote-controlled keypads")]
struct Cli {
    #[arg(long)]
    database_url: Option<String>,
    #[arg(long)]
    session: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every pad and the typed code.
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Press keys (U D L R A, ^ v < >) on a pad, the outermost one by default.
    Press {
        #[arg(long)]
        level: Option<usize>,
        keys: String,
    },
    /// Replace the session with an encoded stack such as `6UL;12`.
    Load { encoding: String },
    Encode,
    Reset,
    Sessions,
    Forget,
    /// Read key sequences from stdin, one line at a time.
    Interactive,
}

fn parse_keys(keys: &str) -> Result<Vec<Direction>> {
    keys.chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| match Direction::from_key(c) {
            Some(direction) => Ok(direction),
            None => bail!("unrecognized key '{c}'"),
        })
        .collect()
}

fn press_all(control: &mut DeepControl, level: Option<usize>, keys: &[Direction]) -> usize {
    let level = level.unwrap_or(control.stack().outermost());
    let mut emitted = 0;
    for &direction in keys {
        match control.control(level, direction) {
            ControlOutcome::Emitted { .. } => emitted += 1,
            ControlOutcome::Ignored => warn!(level, ?direction, "press had no effect"),
            ControlOutcome::Moved { .. } | ControlOutcome::Blocked { .. } => {}
        }
    }
    emitted
}

async fn interactive(control: &mut DeepControl, storage: &Storage, session: &str) -> Result<()> {
    println!("{}", render_stack(control.stack()));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == ":quit" || line == ":q" {
            break;
        }
        if line == ":reset" {
            control.reset();
        } else if let Some(encoding) = line.strip_prefix(":load ") {
            if let Err(err) = control.apply_encoding(encoding) {
                eprintln!("cannot load '{encoding}': {err}");
                continue;
            }
        } else {
            match parse_keys(line) {
                Ok(keys) => {
                    press_all(control, None, &keys);
                }
                Err(err) => {
                    eprintln!("{err}");
                    continue;
                }
            }
        }
        control.persist(storage, session).await?;
        println!("{}", render_stack(control.stack()));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = load_settings();
    if let Some(database_url) = cli.database_url {
        settings.database_url = database_url;
    }
    if let Some(session) = cli.session {
        settings.session = session;
    }

    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .with_writer(std::io::stderr)
        .init();

    let database_url = normalize_database_url(&settings.database_url);
    let storage = Storage::new(&database_url).await?;
    let session = settings.session.as_str();
    info!(%database_url, session, "opened pad store");

    let mut control = DeepControl::restore(&storage, session).await?;

    match cli.command {
        Command::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&control.snapshot())?);
            } else {
                print!("{}", render_stack(control.stack()));
            }
        }
        Command::Press { level, keys } => {
            let keys = parse_keys(&keys)?;
            let emitted = press_all(&mut control, level, &keys);
            let encoding = control.persist(&storage, session).await?;
            info!(presses = keys.len(), emitted, %encoding, "applied presses");
            print!("{}", render_stack(control.stack()));
        }
        Command::Load { encoding } => {
            control
                .apply_encoding(&encoding)
                .with_context(|| format!("cannot load '{encoding}'"))?;
            control.persist(&storage, session).await?;
            print!("{}", render_stack(control.stack()));
        }
        Command::Encode => {
            println!("{}", control.encoding()?);
        }
        Command::Reset => {
            control.reset();
            control.persist(&storage, session).await?;
            print!("{}", render_stack(control.stack()));
        }
        Command::Sessions => {
            for stored in storage.list_sessions().await? {
                println!(
                    "{}\t{}\t{}",
                    stored.name,
                    stored.encoding,
                    stored.updated_at.to_rfc3339()
                );
            }
        }
        Command::Forget => {
            if storage.delete_session(session).await? {
                println!("forgot session '{session}'");
            } else {
                println!("no saved session '{session}'");
            }
        }
        Command::Interactive => interactive(&mut control, &storage, session).await?,
    }

    Ok(())
}
