use std::path::PathBuf;

use clap::{ArgGroup, Parser};

#[derive(Parser, Debug, Clone)]
#[command(name = "csvgpt", about = "CSV data analysis chatbot", version)]
#[command(group(ArgGroup::new("mode").args(["code", "repl"]).multiple(false)))]
#[command(group(ArgGroup::new("interaction_switch").args(["interaction", "no_interaction"]).multiple(false)))]
pub struct Cli {
    /// CSV file to analyze.
    #[arg(value_name = "CSV")]
    pub file: PathBuf,

    /// Question about the data.
    #[arg(value_name = "QUESTION")]
    pub question: Option<String>,

    /// Large language model to use.
    #[arg(long)]
    pub model: Option<String>,

    /// Randomness of generated output.
    #[arg(long, default_value_t = 0.0, value_parser = clap::value_parser!(f32))]
    pub temperature: f32,

    /// Limits highest probable tokens (words).
    #[arg(long = "top-p", default_value_t = 1.0, value_parser = clap::value_parser!(f32))]
    pub top_p: f32,

    /// Print the generated code without executing it.
    #[arg(short = 'c', long)]
    pub code: bool,

    /// Start an interactive session over the file.
    #[arg(long)]
    pub repl: bool,

    /// Confirm generated code before executing.
    #[arg(long)]
    pub interaction: bool,
    /// Execute generated code immediately.
    #[arg(long = "no-interaction")]
    pub no_interaction: bool,

    /// Number of preview rows shown to the model and in table output.
    #[arg(long)]
    pub rows: Option<usize>,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
