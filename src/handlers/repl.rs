//! Interactive session: successive independent questions over one dataset.

use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;

use crate::{
    config::Config,
    dataset::Dataset,
    execution::python::ExecOptions,
    llm::LlmClient,
    printer::MarkdownPrinter,
};

use super::analyze::{generate_code, print_dataset_summary, render_outcome, section};

pub async fn run(
    csv_path: &Path,
    model: &str,
    temperature: f32,
    top_p: f32,
    preview_rows: usize,
) -> Result<()> {
    if !io::stdin().is_terminal() {
        anyhow::bail!("interactive mode requires a terminal");
    }

    let cfg = Config::load();
    let client = LlmClient::from_config(&cfg)?;
    let dataset = Dataset::load(csv_path)?;

    print_dataset_summary(&cfg, &dataset, preview_rows);
    println!("Ask questions about your CSV data. Empty line, 'exit' or 'quit' ends the session.\n");

    let preview = dataset.preview_text(preview_rows);
    let opts = ExecOptions {
        python_bin: cfg.python_bin(),
        preview_rows,
    };

    loop {
        print!(">>> ");
        io::stdout().flush().ok();
        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let question = line.trim();
        if question.is_empty() || question == "exit" || question == "quit" {
            break;
        }

        // Every failure stays scoped to its question; the loop continues.
        let code = match generate_code(
            &client,
            model,
            temperature,
            top_p,
            question,
            &preview,
            preview_rows,
        )
        .await
        {
            Ok(code) => code,
            Err(e) => {
                eprintln!("{}", format!("Code generation failed: {}", e).red());
                continue;
            }
        };

        section(&cfg, "AI-Generated Code");
        MarkdownPrinter::default().print_code(&code);

        match crate::execution::python::execute(&code, csv_path, &opts).await {
            Ok(outcome) => render_outcome(&cfg, &outcome),
            Err(e) => eprintln!("{}", format!("Execution failed: {}", e).red()),
        }
        println!();
    }

    Ok(())
}
