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

    println!(
        "After winning all copies, there are {} scratchcard(s) in total.",
        scratchcards::total_cards(&cards)
    );

    Ok(())
}
