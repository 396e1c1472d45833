use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use lemmascan::config::{DEFAULT_CONTEXT, DEFAULT_MEANINGFUL_POS, DEFAULT_WINDOW};

/// Lemmascan - count reference expressions in a lemmatized corpus
#[derive(Parser)]
#[command(name = "lemmascan", version, about)]
pub struct Cli {
    /// Only log warnings and errors.
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Count wordlist expressions and extract concordances.
    Search(SearchCommand),
    /// Lemmatize wordlist files with TreeTagger.
    Lemmatize(LemmatizeCommand),
}

#[derive(Args)]
pub struct SearchCommand {
    /// Corpus files, directories or glob patterns (.conllu, .conll, .xml, optionally .gz).
    #[arg(required = true)]
    pub corpus: Vec<String>,

    /// Reference wordlist files, one expression per line.
    #[arg(long = "list", short = 'l', required = true)]
    pub lists: Vec<PathBuf>,

    /// Co-occurrence window radius for multi-word expressions.
    #[arg(long, short, env = "LEMMASCAN_WINDOW", default_value_t = DEFAULT_WINDOW)]
    pub window: usize,

    /// Concordance context radius, in tokens.
    #[arg(long, short = 'k', env = "LEMMASCAN_CONTEXT", default_value_t = DEFAULT_CONTEXT)]
    pub context: usize,

    /// Meaningful POS categories (repeatable).
    #[arg(
        long = "pos",
        value_name = "POS",
        default_values_t = DEFAULT_MEANINGFUL_POS.iter().map(|p| p.to_string())
    )]
    pub meaningful_pos: Vec<String>,

    /// Output directory.
    #[arg(long, short, env = "LEMMASCAN_OUTPUT", default_value = "results")]
    pub output: PathBuf,

    /// Write tab-separated tables instead of CSV.
    #[arg(long)]
    pub tsv: bool,
}

#[derive(Args)]
pub struct LemmatizeCommand {
    /// Wordlist files to lemmatize.
    #[arg(required = true)]
    pub wordlists: Vec<PathBuf>,

    /// Path to the tree-tagger executable.
    #[arg(long, env = "TREETAGGER_BIN")]
    pub tagger: PathBuf,

    /// TreeTagger parameter file (e.g. french.par).
    #[arg(long, env = "TREETAGGER_PARAMS")]
    pub params: PathBuf,

    /// Output directory for `<stem>_lemmatized.txt` files.
    #[arg(long, short, env = "LEMMASCAN_OUTPUT", default_value = ".")]
    pub output: PathBuf,
}
