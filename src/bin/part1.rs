use anyhow::{Context, Result};
use clap::Parser;
use scratchcards::CLIArgs;

fn main() -> Result<()> {
    let args = CLIArgs::parse();
    scratchcards::setup_logging(args.verbose);
    let cards = scratchcards::read_cards(&args.input_path).with_context(|| {
        format!(
            "Failed to read scratchcards from given file({}).",
            args.input_path.display()
        )
    })?;

    let points = scratchcards::total_points(&cards)
        .context("Failed to sum up points of scratchcards.")?;
    println!("The scratchcards are worth {} point(s) in total.", points);

    Ok(())
}
