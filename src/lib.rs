use std::{
    collections::{BTreeMap, HashSet},
    env, error,
    fmt::Display,
    fs::File,
    io::{BufRead, BufReader},
    ops::RangeInclusive,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug)]
pub enum Error {
    NoColon(String),
    NoVerticalBar(String),
    NoCardId(String),
    InvalidNumber(String),
    PointsOverflow(u32),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NoColon(s) => write!(
                f,
                "Invalid card text({}), expect a colon between label and numbers.",
                s
            ),
            Error::NoVerticalBar(s) => write!(
                f,
                "Invalid card numbers({}), expect a vertical bar between winning and owned numbers.",
                s
            ),
            Error::NoCardId(s) => write!(f, "Card label({}) doesn't contain an identifier.", s),
            Error::InvalidNumber(s) => write!(f, "Invalid number({}) on card.", s),
            Error::PointsOverflow(id) => {
                write!(f, "Points summed up to card {} don't fit in 64 bits.", id)
            }
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    #[arg(default_value = "input.txt")]
    pub input_path: PathBuf,
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn setup_logging(verbose: bool) {
    let mut log_builder = env_logger::builder();
    if verbose {
        log_builder.filter(None, log::LevelFilter::Debug);
    } else if env::var("RUST_LOG").is_err() {
        log_builder.filter(None, log::LevelFilter::Info);
    }
    log_builder.format_timestamp(None);
    log_builder.init();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    id: u32,
    winning_numbers: HashSet<u32>,
    owned_numbers: Vec<u32>,
}

impl Card {
    pub fn new<I: IntoIterator<Item = u32>>(
        id: u32,
        winning_numbers: I,
        owned_numbers: Vec<u32>,
    ) -> Self {
        Self {
            id,
            winning_numbers: winning_numbers.into_iter().collect(),
            owned_numbers,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn matches(&self) -> Vec<u32> {
        self.owned_numbers
            .iter()
            .filter(|n| self.winning_numbers.contains(*n))
            .copied()
            .collect()
    }

    pub fn points(&self) -> std::result::Result<u64, Error> {
        match self.matches().len() {
            0 => Ok(0),
            n => u32::try_from(n - 1)
                .ok()
                .and_then(|exp| 2u64.checked_pow(exp))
                .ok_or(Error::PointsOverflow(self.id)),
        }
    }

    // Ids past u32::MAX can't exist, so the range is clamped there.
    pub fn copies(&self) -> RangeInclusive<u32> {
        let match_n = u32::try_from(self.matches().len()).unwrap_or(u32::MAX);
        match self.id.checked_add(1) {
            Some(start) if match_n > 0 => start..=self.id.saturating_add(match_n),
            _ => RangeInclusive::new(1, 0),
        }
    }
}

impl TryFrom<&str> for Card {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        static CARD_ID_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

        let (label, numbers) = value
            .split_once(':')
            .ok_or(Error::NoColon(value.to_string()))?;
        let id = CARD_ID_PATTERN
            .find(label)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .ok_or(Error::NoCardId(label.to_string()))?;
        let (winning_text, owned_text) = numbers
            .split_once('|')
            .ok_or(Error::NoVerticalBar(numbers.to_string()))?;

        Ok(Card::new(
            id,
            parse_numbers(winning_text)?,
            parse_numbers(owned_text)?,
        ))
    }
}

impl FromStr for Card {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Card::try_from(s)
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn join(numbers: &[u32]) -> String {
            numbers
                .iter()
                .map(|n| n.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        }

        let mut winning = self.winning_numbers.iter().copied().collect::<Vec<_>>();
        winning.sort_unstable();
        write!(
            f,
            "Card {}: {} | {}",
            self.id,
            join(&winning),
            join(&self.owned_numbers)
        )
    }
}

fn parse_numbers(text: &str) -> std::result::Result<Vec<u32>, Error> {
    text.split_whitespace()
        .map(|s| {
            s.parse::<u32>()
                .map_err(|_| Error::InvalidNumber(s.to_string()))
        })
        .collect()
}

fn read_card(line: &str, line_ind: usize) -> Result<Card> {
    Card::try_from(line)
        .with_context(|| format!("Failed to read card from line {}.", line_ind + 1))
}

pub fn parse_cards(text: &str) -> Result<Vec<Card>> {
    text.lines()
        .enumerate()
        .map(|(ind, line)| read_card(line, ind))
        .collect()
}

pub fn read_cards<P: AsRef<Path>>(path: P) -> Result<Vec<Card>> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open given file({}).", path.as_ref().display()))?;
    let reader = BufReader::new(file);
    reader
        .lines()
        .enumerate()
        .map(|(ind, line)| {
            line.with_context(|| {
                format!(
                    "Failed to read line {} in given file({}).",
                    ind + 1,
                    path.as_ref().display()
                )
            })
            .and_then(|s| read_card(&s, ind))
        })
        .collect()
}

pub fn total_points(cards: &[Card]) -> std::result::Result<u64, Error> {
    let mut total = 0u64;
    for card in cards {
        let points = card.points()?;
        debug!("Card {} is worth {} point(s).", card.id(), points);
        total = total
            .checked_add(points)
            .ok_or(Error::PointsOverflow(card.id()))?;
    }
    info!("{} card(s) are worth {} point(s) in total.", cards.len(), total);

    Ok(total)
}

pub fn card_counts(cards: &[Card]) -> BTreeMap<u32, usize> {
    // A card's count must be final before it hands out copies.
    let mut ordered = cards.iter().collect::<Vec<_>>();
    ordered.sort_unstable_by_key(|card| card.id());
    let mut counts = ordered
        .iter()
        .map(|card| (card.id(), 1))
        .collect::<BTreeMap<_, _>>();
    for card in ordered {
        let count = counts.get(&card.id()).copied().unwrap_or(0);
        for target in card.copies() {
            match counts.get_mut(&target) {
                Some(target_count) => *target_count += count,
                None => warn!(
                    "Card {} wins a copy of card {}, which is past the end of the table.",
                    card.id(),
                    target
                ),
            }
        }
        debug!("Card {} has {} instance(s).", card.id(), count);
    }

    counts
}

pub fn total_cards(cards: &[Card]) -> usize {
    let total = card_counts(cards).values().sum::<usize>();
    info!("{} original card(s) end up as {} card(s).", cards.len(), total);

    total
}
