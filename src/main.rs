mod cli;
mod config;
mod dataset;
mod execution;
mod handlers;
mod llm;
mod printer;
mod role;
mod utils;

use anyhow::{bail, Result};
use config::Config;
use is_terminal::IsTerminal;
use std::io::{self, Read};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // Load config
    let cfg = Config::load();

    // Resolve model: CLI overrides config; fall back to gpt-4o
    let effective_model = args
        .model
        .clone()
        .or_else(|| cfg.get("DEFAULT_MODEL"))
        .unwrap_or_else(|| "gpt-4o".to_string());

    // stdin handling (pipe support: `cat question.txt | csvgpt data.csv`)
    let mut question_from_stdin = String::new();
    let stdin_is_tty = io::stdin().is_terminal();
    if !stdin_is_tty && !args.repl {
        io::stdin().read_to_string(&mut question_from_stdin)?;
    }

    // Resolve question: stdin + optional positional
    let arg_question = args.question.clone().unwrap_or_default();
    let stdin_question = question_from_stdin.trim();
    let question = if !stdin_question.is_empty() && !arg_question.is_empty() {
        format!("{}\n\n{}", stdin_question, arg_question)
    } else if !stdin_question.is_empty() {
        stdin_question.to_string()
    } else {
        arg_question
    };

    // Effective boolean switches with config defaults
    let interaction = if args.no_interaction {
        false
    } else if args.interaction {
        true
    } else {
        cfg.get_bool("ANALYSIS_INTERACTION")
    };
    let preview_rows = args.rows.unwrap_or_else(|| cfg.preview_rows());

    if args.repl {
        if !question.trim().is_empty() {
            bail!("--repl takes questions interactively, not as an argument");
        }
        return handlers::repl::run(
            &args.file,
            &effective_model,
            args.temperature,
            args.top_p,
            preview_rows,
        )
        .await;
    }

    if question.trim().is_empty() {
        bail!("Provide a question about the data, or use --repl");
    }

    handlers::analyze::run(
        &args.file,
        &question,
        &effective_model,
        args.temperature,
        args.top_p,
        args.code,
        interaction && stdin_is_tty,
        preview_rows,
    )
    .await
}
