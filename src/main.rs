use anyhow::{Context, Result};
use clap::Parser;
use log::info;
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
    info!(
        "Read {} card(s) from {}.",
        cards.len(),
        args.input_path.display()
    );

    let points = scratchcards::total_points(&cards)
        .context("Failed to sum up points of scratchcards.")?;
    let card_n = scratchcards::total_cards(&cards);
    println!("{}", points);
    println!("{}", card_n);

    Ok(())
}
