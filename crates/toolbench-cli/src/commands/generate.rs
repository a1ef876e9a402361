//! Prompt suite generation command

use anyhow::Result;
use colored::*;
use toolbench_core::prompts::{ExpectedOutcome, PromptSet};

use crate::args::GenerateArgs;
use crate::console::CliConsole;
use crate::logging;

pub async fn execute(args: GenerateArgs) -> Result<()> {
    let config = super::load_config(&args.config_file, &args.suite)?;
    logging::init(&config.logging);

    let prompts = super::generate_suite(&config, args.suite.seed)?;
    let console = CliConsole::new(true);

    match &args.output {
        Some(path) => {
            prompts.save_to_file(path)?;
            console.success(&format!(
                "Wrote {} prompts to {}",
                prompts.len(),
                path.display()
            ));
        }
        None => print_suite(&prompts),
    }

    Ok(())
}

fn print_suite(prompts: &PromptSet) {
    println!("{:<5} {:<10} {}", "#".bold(), "Expected".bold(), "Sentence".bold());
    println!("{:-<70}", "");
    for record in prompts.iter() {
        let expected = match record.expected_outcome {
            ExpectedOutcome::Tool => record.expected_outcome.wire_name().cyan(),
            ExpectedOutcome::NoTool => record.expected_outcome.wire_name().normal(),
        };
        println!("{:<5} {:<10} {}", record.number(), expected, record.text);
    }

    let counts = prompts.count_by_outcome();
    println!(
        "\n{} prompts: {} tool, {} none",
        prompts.len(),
        counts.get(&ExpectedOutcome::Tool).copied().unwrap_or(0),
        counts.get(&ExpectedOutcome::NoTool).copied().unwrap_or(0)
    );
}
