use divan::AllocProfiler;
use divan::{Bencher, black_box};
use lemmascan::conllu::read_tokens;
use lemmascan::{
    Corpus, LemmaIndex, OccurrenceCounter, ReferenceExpression, ReferenceList, SearchConfig, Token,
    search_with_index,
};

#[global_allocator]
static ALLOC: AllocProfiler = AllocProfiler::system();

const VOCABULARY: &[&str] = &[
    "le", "jour", "nuit", "tout", "à", "coup", "soudain", "puis", "tomber", "lever", "soir",
    "matin", "heure", "instant", "moment", "alors", "enfin", "de", "un", "et",
];

fn main() {
    divan::main();
}

/// Deterministic pseudo-random corpus over a small vocabulary
fn synthetic_corpus(len: usize) -> Corpus {
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;
    let tokens = (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let word = VOCABULARY[(state % VOCABULARY.len() as u64) as usize];
            Token::new(word, "NOM", word)
        })
        .collect();
    Corpus::from_tokens(tokens)
}

fn synthetic_conllu(sentences: usize) -> String {
    let mut text = String::new();
    for s in 0..sentences {
        for (i, word) in VOCABULARY.iter().cycle().skip(s % 7).take(12).enumerate() {
            text.push_str(&format!("{}\t{word}\t{word}\tNOUN\t_\t_\t0\tdep\t_\t_\n", i + 1));
        }
        text.push('\n');
    }
    text
}

#[divan::bench(sample_count = 10)]
fn build_index(bencher: Bencher) {
    let corpus = synthetic_corpus(200_000);
    bencher.bench_local(|| black_box(LemmaIndex::build(black_box(&corpus))));
}

#[divan::bench(sample_count = 20)]
fn count_single(bencher: Bencher) {
    let corpus = synthetic_corpus(200_000);
    let index = LemmaIndex::build(&corpus);
    let counter = OccurrenceCounter::new(&index, 3);
    let Some(expr) = ReferenceExpression::parse("soudain") else {
        return;
    };
    bencher.bench_local(|| black_box(counter.count(black_box(&expr))));
}

#[divan::bench(args = [1, 3, 10, 50], sample_count = 10)]
fn count_multi(bencher: Bencher, window: usize) {
    let corpus = synthetic_corpus(200_000);
    let index = LemmaIndex::build(&corpus);
    let counter = OccurrenceCounter::new(&index, window);
    let Some(expr) = ReferenceExpression::parse("tout à coup") else {
        return;
    };
    bencher.bench_local(|| black_box(counter.count(black_box(&expr))));
}

#[divan::bench(sample_count = 5)]
fn search_list(bencher: Bencher) {
    let corpus = synthetic_corpus(100_000);
    let index = LemmaIndex::build(&corpus);
    let lists = vec![ReferenceList::from_lines(
        "temps",
        ["jour", "nuit", "tout à coup", "le jour", "à ce moment", "soudain"],
    )];
    let config = SearchConfig::default();
    bencher.bench_local(|| black_box(search_with_index(&index, black_box(&lists), &config)));
}

#[divan::bench(sample_count = 10)]
fn parse_conllu(bencher: Bencher) {
    let text = synthetic_conllu(5_000);
    bencher.bench_local(|| black_box(read_tokens(black_box(text.as_bytes())).map(|t| t.len())));
}
