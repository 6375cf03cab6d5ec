//! One-shot analysis pipeline: preview, generate, execute, render.

use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::{
    config::Config,
    dataset::Dataset,
    execution::{python::ExecOptions, ExecutionOutcome},
    llm::{ChatMessage, ChatOptions, LlmClient, Role},
    printer::{self, MarkdownPrinter, TextPrinter},
    role::{analysis_role_text, build_analysis_prompt},
};

/// Ask the model for analysis code over the given preview.
pub(crate) async fn generate_code(
    client: &LlmClient,
    model: &str,
    temperature: f32,
    top_p: f32,
    question: &str,
    preview: &str,
    preview_rows: usize,
) -> Result<String> {
    let messages = vec![
        ChatMessage::new(Role::System, analysis_role_text()),
        ChatMessage::new(
            Role::User,
            build_analysis_prompt(question, preview, preview_rows),
        ),
    ];
    let opts = ChatOptions {
        model: model.to_string(),
        temperature,
        top_p,
        max_tokens: None,
    };
    client.complete(messages, opts).await
}

pub(crate) fn section(cfg: &Config, title: &str) {
    let printer = TextPrinter { color: cfg.get("DEFAULT_COLOR") };
    printer.print(title);
}

pub(crate) fn print_dataset_summary(cfg: &Config, dataset: &Dataset, preview_rows: usize) {
    println!(
        "Loaded {}: {} rows x {} columns",
        dataset.path.display(),
        dataset.row_count(),
        dataset.column_count()
    );
    section(cfg, "Preview");
    println!(
        "{}\n",
        printer::render_table(&dataset.columns, dataset.head(preview_rows))
    );
}

pub(crate) fn render_outcome(cfg: &Config, outcome: &ExecutionOutcome) {
    if !outcome.ok {
        let msg = outcome.error.as_deref().unwrap_or("unknown execution error");
        eprintln!("{}", format!("Error executing generated code:\n{}", msg).red());
        return;
    }
    if !outcome.stdout.is_empty() {
        section(cfg, "Text Output");
        println!("{}", outcome.stdout.trim_end());
    }
    if let Some(table) = &outcome.table {
        section(cfg, "Table Result");
        println!("{}", printer::render_table(&table.columns, &table.rows));
    }
    if let Some(chart) = &outcome.chart {
        section(cfg, "Chart Output");
        println!("saved to {}", chart.display());
    }
}

pub async fn run(
    csv_path: &Path,
    question: &str,
    model: &str,
    temperature: f32,
    top_p: f32,
    code_only: bool,
    interaction: bool,
    preview_rows: usize,
) -> Result<()> {
    let cfg = Config::load();
    let client = LlmClient::from_config(&cfg)?;

    let dataset = Dataset::load(csv_path)?;
    print_dataset_summary(&cfg, &dataset, preview_rows);

    let preview = dataset.preview_text(preview_rows);
    let mut question = question.to_string();
    let mut code =
        generate_code(&client, model, temperature, top_p, &question, &preview, preview_rows)
            .await?;

    section(&cfg, "AI-Generated Code");
    MarkdownPrinter::default().print_code(&code);

    if code_only {
        return Ok(());
    }

    if interaction {
        // Confirm loop until execute or abort
        loop {
            print!("[E]xecute, [R]egenerate, [A]bort: ");
            io::stdout().flush().ok();
            let mut choice = String::new();
            io::stdin().read_line(&mut choice)?;
            match choice.trim().to_lowercase().as_str() {
                "e" | "y" => break,
                "r" => {
                    print!("Refine with instructions: ");
                    io::stdout().flush().ok();
                    let mut add = String::new();
                    io::stdin().read_line(&mut add)?;
                    question = format!("{}\n\n{}", question, add.trim());
                    code = generate_code(
                        &client,
                        model,
                        temperature,
                        top_p,
                        &question,
                        &preview,
                        preview_rows,
                    )
                    .await?;
                    section(&cfg, "AI-Generated Code");
                    MarkdownPrinter::default().print_code(&code);
                }
                _ => return Ok(()), // Abort on anything else
            }
        }
    }

    let opts = ExecOptions {
        python_bin: cfg.python_bin(),
        preview_rows,
    };
    let outcome = crate::execution::python::execute(&code, csv_path, &opts).await?;
    render_outcome(&cfg, &outcome);

    Ok(())
}
