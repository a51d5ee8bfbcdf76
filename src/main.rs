use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use keypad_calc::calculator::{copy_to_clipboard, parse_keys};
use keypad_calc::keypad::{Emphasis, KEYS};
use keypad_calc::{Config, Event, Session, logging};

#[derive(Parser, Debug)]
#[command(name = "keypad-calc", version)]
#[command(about = "A keypad calculator with chained operations", long_about = None)]
struct Cli {
    /// Keys to press, e.g. `2 + 3 * 4 =`. Starts an interactive session when omitted.
    keys: Vec<String>,

    /// Path to the config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the full session state as JSON instead of the display
    #[arg(long)]
    json: bool,

    /// Copy the final display to the clipboard
    #[arg(long)]
    copy: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let mut session = Session::with_config(&config);

    if cli.keys.is_empty() {
        return interactive(&mut session, &config, cli.json);
    }

    let events = parse_keys(&cli.keys.join(" "))?;
    press(&mut session, &events, &config);

    print_state(&mut io::stdout().lock(), &session, cli.json, false)?;

    if cli.copy {
        copy_to_clipboard(session.display())?;
    }

    Ok(())
}

fn interactive(session: &mut Session, config: &Config, json: bool) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    print_state(&mut out, session, json, true)?;

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read input")?;

        match line.trim() {
            "" => continue,
            "quit" | "exit" => break,
            "copy" => {
                if let Err(e) = copy_to_clipboard(session.display()) {
                    tracing::warn!(error = %e, "Copy failed");
                    writeln!(out, "{}", e)?;
                }
                continue;
            }
            "keys" => {
                writeln!(out, "{}", key_legend())?;
                continue;
            }
            "state" => {
                print_state(&mut out, session, true, true)?;
                continue;
            }
            keys => match parse_keys(keys) {
                Ok(events) => press(session, &events, config),
                Err(e) => {
                    writeln!(out, "{}", e)?;
                    continue;
                }
            },
        }

        print_state(&mut out, session, json, true)?;
    }

    Ok(())
}

/// Feed events into the session, copying completed results when configured.
fn press(session: &mut Session, events: &[Event], config: &Config) {
    for event in events {
        session.dispatch(*event);

        if config.copy_on_equals
            && *event == Event::Equals
            && session.last_result().is_some()
            && let Err(e) = copy_to_clipboard(session.display())
        {
            tracing::warn!(error = %e, "Copy on equals failed");
        }
    }
}

fn print_state(out: &mut impl Write, session: &Session, json: bool, prompt: bool) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string(&session.snapshot())?)?;
    } else if prompt {
        writeln!(out, "= {}", session.display())?;
    } else {
        writeln!(out, "{}", session.display())?;
    }
    out.flush()?;
    Ok(())
}

/// All key labels, primary actions in brackets.
fn key_legend() -> String {
    KEYS.iter()
        .map(|key| match key.emphasis() {
            Emphasis::Primary => format!("[{}]", key.label()),
            Emphasis::Secondary => key.label().to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_after_keys() {
        let cli = Cli::try_parse_from(["keypad-calc", "2", "+", "3", "=", "--json"]).unwrap();
        assert_eq!(cli.keys, ["2", "+", "3", "="]);
        assert!(cli.json);
    }

    #[test]
    fn test_lone_minus_is_a_key() {
        let cli = Cli::try_parse_from(["keypad-calc", "--copy", "9", "-", "4", "="]).unwrap();
        assert_eq!(cli.keys, ["9", "-", "4", "="]);
        assert!(cli.copy);
    }

    #[test]
    fn test_key_legend_marks_primary_keys() {
        let legend = key_legend();
        assert!(legend.starts_with("sin cos tan log [AC] mod EXP"));
        assert!(legend.ends_with("0 . [=]"));
    }
}
