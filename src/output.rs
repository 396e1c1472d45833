use lemmascan::stats::{CorpusStatistics, PosFilter, SUMMARY_LEMMAS, format_frequencies};
use lemmascan::{Corpus, ResultTables};
use rustc_hash::FxHashSet;

/// Print the corpus overview: POS counts, per-POS breakdowns and the
/// meaningful-lemma totals.
pub fn print_corpus_summary(corpus: &Corpus, stats: &CorpusStatistics, filter: &PosFilter) {
    println!(
        "Corpus: {} tokens in {} documents",
        corpus.len(),
        corpus.document_count()
    );

    if stats.pos_counts().is_empty() {
        println!("No tokens found.");
        return;
    }

    println!("\nPOS counts:");
    let width = stats
        .pos_counts()
        .iter()
        .map(|(pos, _)| pos.len())
        .max()
        .unwrap_or(0);
    for (pos, count) in stats.pos_counts() {
        println!("  {pos:<width$}  {count}");
    }

    println!("\nPOS breakdown:");
    for breakdown in stats.breakdowns() {
        println!(
            "  {}: {} tokens, {} unique lemmas",
            breakdown.pos,
            breakdown.total_tokens,
            breakdown.unique_lemmas()
        );
        println!(
            "    top {SUMMARY_LEMMAS}:  {}",
            format_frequencies(breakdown.most_common(SUMMARY_LEMMAS))
        );
        println!(
            "    last {SUMMARY_LEMMAS}: {}",
            format_frequencies(breakdown.least_common(SUMMARY_LEMMAS))
        );
    }

    let meaningful = filter.classify(corpus);
    let unique: FxHashSet<&str> = meaningful.iter().copied().collect();
    println!(
        "\nMeaningful lemmas: {} tokens, {} unique",
        meaningful.len(),
        unique.len()
    );
}

/// Print the counts table grouped by list
pub fn print_counts(tables: &ResultTables) {
    if tables.counts().is_empty() {
        println!("\nNo expressions searched.");
        return;
    }

    let width = tables
        .counts()
        .iter()
        .map(|row| row.expression.chars().count())
        .max()
        .unwrap_or(0);

    let mut current: Option<&str> = None;
    for row in tables.counts() {
        if current != Some(row.list.as_str()) {
            println!("\n{}:", row.list);
            current = Some(row.list.as_str());
        }
        let pad = width - row.expression.chars().count();
        println!("  {}{}  {}", row.expression, " ".repeat(pad), row.count);
    }
    println!("\n{} concordance lines", tables.concordance().len());
}
