use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{info, warn};
use question::core::config::{CliOverrides, load_config, resolve};
use question::{Answer, Choice, Mask, PromptKind, Terminal};
use serde::Serialize;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

/// Exit status when the user cancels, as for a shell interrupted by Ctrl+C.
const EXIT_CANCELLED: u8 = 130;

#[derive(Parser)]
#[command(
    name = "question",
    about = "Ask an interactive question in the terminal and print the answer as JSON"
)]
struct Args {
    /// Prompt kind: list, checkbox, input, confirm or password
    kind: String,

    /// Question shown to the user
    label: String,

    /// Choices for list and checkbox prompts
    choices: Vec<String>,

    /// Default answer for input (text) and confirm (y/n) prompts
    #[arg(short, long)]
    default: Option<String>,

    /// Checkbox choice marked when the prompt opens (repeatable)
    #[arg(long, value_name = "CHOICE")]
    selected: Vec<String>,

    /// Checkbox dependency: marking CHOICE also marks DEP (repeatable)
    #[arg(long, value_name = "CHOICE=DEP")]
    require: Vec<String>,

    /// Password echo pattern, repeated per typed character
    #[arg(long, conflicts_with = "hidden")]
    mask: Option<String>,

    /// Echo nothing while typing a password
    #[arg(long)]
    hidden: bool,

    /// Maximum number of list rows shown at once
    #[arg(short, long)]
    window_size: Option<usize>,

    /// Scroll the list only when the cursor reaches the window edge
    #[arg(long)]
    no_offset_scroll: bool,

    /// Write a log to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("question: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let kind = PromptKind::parse(&args.kind)?;

    let cli = CliOverrides {
        window_size: args.window_size,
        offset_window_scroll: args.no_offset_scroll.then_some(false),
        log_file: args.log_file.clone(),
    };
    let config = resolve(&load_config()?, &cli)?;

    if let Some(path) = &config.log_file {
        let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
        let level = config.log_level.parse().unwrap_or(LevelFilter::Info);
        match File::create(path) {
            Ok(log_file) => {
                let _ = WriteLogger::init(level, log_config, log_file);
            }
            Err(e) => eprintln!("question: cannot open log file {}: {e}", path.display()),
        }
    }

    info!("question starting: {:?} {:?}", kind, args.label);

    // Stdout carries only the answer.
    let mut terminal = Terminal::stdio(&config).with_output(Box::new(io::stderr()));

    let cancelled = match kind {
        PromptKind::List => {
            let answer = terminal.list(&args.label, build_choices(&args)).await?;
            print_answer(&answer)?
        }
        PromptKind::Checkbox => {
            let answer = terminal.checkbox(&args.label, build_choices(&args)).await?;
            print_answer(&answer)?
        }
        PromptKind::Input => {
            let answer = terminal.input(&args.label, args.default.as_deref()).await?;
            print_answer(&answer)?
        }
        PromptKind::Confirm => {
            let default = args.default.as_deref().map(parse_yes_no).transpose()?;
            let answer = terminal.confirm(&args.label, default).await?;
            print_answer(&answer)?
        }
        PromptKind::Password => {
            let mask = match (&args.mask, args.hidden) {
                (_, true) => Mask::Hidden,
                (Some(pattern), false) => Mask::Pattern(pattern.clone()),
                (None, false) => Mask::default(),
            };
            let answer = terminal.password(&args.label, mask).await?;
            print_answer(&answer)?
        }
    };

    Ok(if cancelled {
        ExitCode::from(EXIT_CANCELLED)
    } else {
        ExitCode::SUCCESS
    })
}

/// Print the answer as one line of JSON. Returns whether it was a cancel.
fn print_answer<T: Serialize>(answer: &Answer<T>) -> serde_json::Result<bool> {
    println!("{}", serde_json::to_string(answer)?);
    Ok(answer.is_cancelled())
}

fn build_choices(args: &Args) -> Vec<Choice<String>> {
    let mut choices: Vec<Choice<String>> = args
        .choices
        .iter()
        .map(|label| Choice::labelled(label.as_str()).selected(args.selected.contains(label)))
        .collect();

    for rule in &args.require {
        let Some((choice, dependency)) = rule.split_once('=') else {
            warn!("Ignoring malformed --require {rule:?}, expected CHOICE=DEP");
            continue;
        };
        match choices.iter_mut().find(|c| c.label == choice.trim()) {
            Some(c) => c.requires.push(dependency.trim().into()),
            None => warn!("Ignoring --require for unknown choice {choice:?}"),
        }
    }
    choices
}

fn parse_yes_no(text: &str) -> Result<bool, String> {
    match text.trim().chars().next().map(|c| c.to_ascii_lowercase()) {
        Some('y') => Ok(true),
        Some('n') => Ok(false),
        _ => Err(format!("confirm default must start with y or n, got {text:?}")),
    }
}
