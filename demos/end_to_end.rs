//! Complete end-to-end example: CoNLL-U → wordlist search → tables
//!
//! This example demonstrates the full pipeline:
//! 1. Parse CoNLL-U text into a corpus
//! 2. Search a reference wordlist with single and multi-word expressions
//! 3. Display counts, concordance lines and POS statistics
//!
//! Run with: cargo run --example end_to_end

use lemmascan::conllu::read_tokens;
use lemmascan::stats::format_frequencies;
use lemmascan::{CorpusBuilder, CorpusStatistics, ReferenceList, SearchConfig, search_lists};

fn main() {
    println!("=== Lemmascan: End-to-End Example ===\n");

    // "Le jour se lève, puis tout à coup la nuit tombe."
    let conllu_text = "# text = Le jour se lève, puis tout à coup la nuit tombe.
1\tLe\tle\tDET\t_\t_\t2\tdet\t_\t_
2\tjour\tjour\tNOUN\t_\t_\t4\tnsubj\t_\t_
3\tse\tse\tPRON\t_\t_\t4\texpl\t_\t_
4\tlève\tlever\tVERB\t_\t_\t0\troot\t_\tSpaceAfter=No
5\t,\t,\tPUNCT\t_\t_\t4\tpunct\t_\t_
6\tpuis\tpuis\tADV\t_\t_\t13\tadvmod\t_\t_
7\ttout\ttout\tADV\t_\t_\t9\tadvmod\t_\t_
8\tà\tà\tADP\t_\t_\t9\tcase\t_\t_
9\tcoup\tcoup\tNOUN\t_\t_\t13\tobl\t_\t_
10\tla\tle\tDET\t_\t_\t11\tdet\t_\t_
11\tnuit\tnuit\tNOUN\t_\t_\t12\tnsubj\t_\t_
12\ttombe\ttomber\tVERB\t_\t_\t4\tconj\t_\tSpaceAfter=No
13\t.\t.\tPUNCT\t_\t_\t4\tpunct\t_\t_

";

    println!("🔧 Step 1: Parsing CoNLL-U...");
    let tokens = match read_tokens(conllu_text.as_bytes()) {
        Ok(tokens) => tokens,
        Err(e) => {
            eprintln!("❌ Parse error: {}", e);
            return;
        }
    };
    let mut builder = CorpusBuilder::new();
    builder.add_document(tokens);
    let corpus = builder.build();
    println!("✅ Corpus with {} tokens", corpus.len());
    println!("   Lemmas: {}\n", corpus.lemmas().collect::<Vec<_>>().join(" "));

    println!("🔍 Step 2: Searching wordlist...");
    let lists = vec![ReferenceList::from_lines(
        "temps",
        ["tout à coup", "jour", "nuit", "soudain", "le jour"],
    )];
    let config = SearchConfig::default().with_window(2).with_context(3);
    let tables = search_lists(&corpus, &lists, &config);

    println!("\n📊 Counts (window {}):", config.window);
    for row in tables.counts() {
        println!("   {:<12} {}", row.expression, row.count);
    }

    println!("\n📜 Concordance (context {}):", config.context);
    for line in tables.concordance() {
        println!(
            "   {:>20} [{}] {}",
            line.before, line.hit, line.after
        );
    }

    println!("\n🏷️  Step 3: POS statistics");
    let stats = CorpusStatistics::compute(&corpus);
    for breakdown in stats.breakdowns() {
        println!(
            "   {:<6} {:>2} tokens: {}",
            breakdown.pos,
            breakdown.total_tokens,
            format_frequencies(breakdown.most_common(5))
        );
    }

    println!("\n✨ Done");
}
