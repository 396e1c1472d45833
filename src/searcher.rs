//! End-to-end wordlist search combining index lookup, counting and
//! concordance extraction
//!
//! The pipeline:
//! 1. Build the lemma index once from the corpus
//! 2. For each list (in the order given), resolve single-word expressions,
//!    then multi-word expressions
//! 3. Record one count per expression and one concordance line per matched
//!    position, in ascending corpus order

use crate::concordance::ConcordanceBuilder;
use crate::config::SearchConfig;
use crate::corpus::Corpus;
use crate::counter::OccurrenceCounter;
use crate::index::LemmaIndex;
use crate::results::ResultTables;
use crate::wordlist::ReferenceList;
use log::{debug, info, warn};

/// Search every list against the corpus
pub fn search_lists(
    corpus: &Corpus,
    lists: &[ReferenceList],
    config: &SearchConfig,
) -> ResultTables {
    let index = LemmaIndex::build(corpus);
    search_with_index(&index, lists, config)
}

/// Search every list using an index that was already built
pub fn search_with_index(
    index: &LemmaIndex<'_>,
    lists: &[ReferenceList],
    config: &SearchConfig,
) -> ResultTables {
    let counter = OccurrenceCounter::new(index, config.window);
    let builder = ConcordanceBuilder::new(index.corpus(), config.context);
    let mut tables = ResultTables::new();

    for list in lists {
        info!(
            "Searching list {} ({} expressions, window {})",
            list.name(),
            list.len(),
            config.window
        );

        for expression in list.search_order() {
            let positions = counter.positions(expression);
            if !tables.record_count(list.name(), expression.text(), positions.len()) {
                warn!(
                    "List {} already has results for {:?}; skipping",
                    list.name(),
                    expression.text()
                );
                continue;
            }
            debug!("{} / {:?}: {} matches", list.name(), expression.text(), positions.len());

            for position in positions {
                tables.push_line(builder.build(list.name(), expression, position));
            }
        }
    }

    tables
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Token;
    use crate::stats::PosFilter;

    /// "Le jour se lève , puis tout à coup la nuit tombe ."
    fn create_test_corpus() -> Corpus {
        let tokens = [
            ("Le", "DET", "le"),
            ("jour", "NOM", "jour"),
            ("se", "PRO", "se"),
            ("lève", "VER", "lever"),
            (",", "PUN", ","),
            ("puis", "ADV", "puis"),
            ("tout", "ADV", "tout"),
            ("à", "PRP", "à"),
            ("coup", "NOM", "coup"),
            ("la", "DET", "le"),
            ("nuit", "NOM", "nuit"),
            ("tombe", "VER", "tomber"),
            (".", "SENT", "."),
        ];
        Corpus::from_tokens(
            tokens
                .iter()
                .map(|(s, p, l)| Token::new(s, p, l))
                .collect(),
        )
    }

    fn temps_list() -> ReferenceList {
        ReferenceList::from_lines("temps", ["tout à coup", "jour", "nuit", "soudain", "le jour"])
    }

    #[test]
    fn test_counts_in_search_order() {
        let corpus = create_test_corpus();
        let tables = search_lists(&corpus, &[temps_list()], &SearchConfig::default());

        let rows: Vec<_> = tables
            .counts()
            .iter()
            .map(|c| (c.expression.as_str(), c.count))
            .collect();
        // "le jour": "le" at 0 and 9, "jour" at 1, so anchors 0..=3
        assert_eq!(
            rows,
            vec![
                ("jour", 1),
                ("nuit", 1),
                ("soudain", 0),
                ("tout à coup", 5),
                ("le jour", 4),
            ]
        );
    }

    #[test]
    fn test_concordance_lines() {
        let corpus = create_test_corpus();
        let config = SearchConfig::default().with_context(2);
        let tables = search_lists(&corpus, &[temps_list()], &config);

        let jour: Vec<_> = tables.lines_for("temps", "jour").collect();
        assert_eq!(jour.len(), 1);
        assert_eq!(jour[0].before, "Le");
        assert_eq!(jour[0].hit, "jour");
        assert_eq!(jour[0].after, "se lève");

        // anchors 5..=9 for "tout à coup" with window 3
        let coup: Vec<_> = tables.lines_for("temps", "tout à coup").collect();
        assert_eq!(coup.len(), 5);
        assert_eq!(coup[0].before, "lève ,");
        assert_eq!(coup[0].hit, "puis tout à");
        assert_eq!(coup[0].after, "coup la");
        assert_eq!(coup[1].hit, "tout à coup");

        // single-word lines come first
        assert_eq!(tables.concordance()[0].expression, "jour");
        assert_eq!(tables.concordance()[1].expression, "nuit");
        assert_eq!(tables.concordance()[2].expression, "tout à coup");
    }

    #[test]
    fn test_lists_in_supplied_order() {
        let corpus = create_test_corpus();
        let lists = vec![
            ReferenceList::from_lines("z", ["nuit"]),
            ReferenceList::new("vide"),
            ReferenceList::from_lines("a", ["jour"]),
        ];
        let tables = search_lists(&corpus, &lists, &SearchConfig::default());

        let names: Vec<_> = tables.counts().iter().map(|c| c.list.as_str()).collect();
        assert_eq!(names, vec!["z", "a"]);
        let lines: Vec<_> = tables.concordance().iter().map(|l| l.list.as_str()).collect();
        assert_eq!(lines, vec!["z", "a"]);
    }

    #[test]
    fn test_empty_corpus() {
        let corpus = Corpus::from_tokens(vec![]);
        let tables = search_lists(&corpus, &[temps_list()], &SearchConfig::default());

        assert_eq!(tables.counts().len(), 5);
        assert!(tables.counts().iter().all(|c| c.count == 0));
        assert!(tables.concordance().is_empty());
    }

    #[test]
    fn test_deterministic() {
        let corpus = create_test_corpus();
        let lists = vec![temps_list(), ReferenceList::from_lines("b", ["le", "se lever"])];
        let config = SearchConfig::default();

        let first = search_lists(&corpus, &lists, &config);
        let second = search_lists(&corpus, &lists, &config);

        assert_eq!(first.counts(), second.counts());
        assert_eq!(first.concordance(), second.concordance());
    }

    #[test]
    fn test_pos_filter_has_no_effect() {
        let corpus = create_test_corpus();
        let lists = vec![temps_list()];

        let broad = SearchConfig::default();
        let narrow = SearchConfig::default().with_meaningful_pos(&["INT"]);
        assert_ne!(
            PosFilter::from_config(&broad).classify(&corpus).len(),
            PosFilter::from_config(&narrow).classify(&corpus).len()
        );

        let a = search_lists(&corpus, &lists, &broad);
        let b = search_lists(&corpus, &lists, &narrow);
        assert_eq!(a.counts(), b.counts());
        assert_eq!(a.concordance(), b.concordance());
    }
}
