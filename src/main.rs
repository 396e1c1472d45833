mod cli;
mod output;

use anyhow::{Context, Result, bail};
use clap::Parser;
use lemmascan::annotator::{TreeTagger, lemmatize_wordlist};
use lemmascan::export::{TableFormat, save_pos_lists, save_results, save_table};
use lemmascan::wordlist;
use lemmascan::{
    CorpusSources, CorpusStatistics, LemmaIndex, PosFilter, SearchConfig, search_with_index,
};
use log::info;

use crate::cli::{Cli, Command, LemmatizeCommand, SearchCommand};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    match cli.command {
        Command::Search(cmd) => run_search(cmd, cli.quiet),
        Command::Lemmatize(cmd) => run_lemmatize(cmd),
    }
}

fn run_search(cmd: SearchCommand, quiet: bool) -> Result<()> {
    let config = SearchConfig::default()
        .with_window(cmd.window)
        .with_context(cmd.context)
        .with_meaningful_pos(&cmd.meaningful_pos);
    let format = if cmd.tsv { TableFormat::Tsv } else { TableFormat::Csv };

    let sources = CorpusSources::resolve(&cmd.corpus).context("Invalid corpus pattern")?;
    if sources.is_empty() {
        bail!("No corpus documents found in {}", cmd.corpus.join(", "));
    }
    let report = sources.load();
    let corpus = report.corpus;

    let stats = CorpusStatistics::compute(&corpus);
    let filter = PosFilter::from_config(&config);
    if !quiet {
        output::print_corpus_summary(&corpus, &stats, &filter);
    }

    save_pos_lists(&cmd.output.join("pos_lists"), &stats)
        .context("Failed to write POS word lists")?;
    save_table(&cmd.output, "pos_summary", &stats.summary_rows(), format)
        .context("Failed to write POS summary")?;

    let lists = wordlist::load_all(&cmd.lists);
    let index = LemmaIndex::build(&corpus);
    let tables = search_with_index(&index, &lists, &config);

    if !quiet {
        output::print_counts(&tables);
    }

    let (counts, concordance) =
        save_results(&cmd.output, &tables, format).context("Failed to write result tables")?;
    info!(
        "Results saved to {} and {}",
        counts.display(),
        concordance.display()
    );
    Ok(())
}

fn run_lemmatize(cmd: LemmatizeCommand) -> Result<()> {
    let mut tagger = TreeTagger::new(&cmd.tagger, &cmd.params);

    for path in &cmd.wordlists {
        let output = lemmatize_wordlist(&mut tagger, path, &cmd.output)
            .with_context(|| format!("Failed to lemmatize {}", path.display()))?;
        println!("{} -> {}", path.display(), output.display());
    }
    Ok(())
}
