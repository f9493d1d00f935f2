use std::collections::BTreeMap;

use proptest::prelude::*;

use crate::WordCountMap;

#[derive(Debug, Clone)]
enum Op {
    Increment(String),
    Decrement(String),
}

/// Small alphabet so that words collide and share prefixes often.
fn word_strategy() -> impl Strategy<Value = String> + Clone {
    "[abc]{1,6}"
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let word = word_strategy();
    let op = prop_oneof![
        60 => word.clone().prop_map(Op::Increment),
        40 => word.prop_map(Op::Decrement),
    ];
    prop::collection::vec(op, 0..=400)
}

/// Nodes a minimal tree needs: the root plus one per distinct prefix of a
/// stored word.
fn expected_node_count(model: &BTreeMap<String, usize>) -> usize {
    let mut prefixes = std::collections::BTreeSet::new();
    for word in model.keys() {
        for (idx, _) in word.char_indices().skip(1) {
            prefixes.insert(&word[..idx]);
        }
        prefixes.insert(word.as_str());
    }
    1 + prefixes.len()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_matches_btreemap_model(ops in ops_strategy()) {
        let mut map = WordCountMap::new();
        let mut model: BTreeMap<String, usize> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Increment(word) => {
                    map.increment_count(&word);
                    *model.entry(word).or_insert(0) += 1;
                }
                Op::Decrement(word) => {
                    map.decrement_count(&word);
                    if let Some(count) = model.get_mut(&word) {
                        *count -= 1;
                        if *count == 0 {
                            model.remove(&word);
                        }
                    }
                }
            }
            prop_assert_eq!(map.len(), model.len());
        }

        for (word, &count) in &model {
            prop_assert_eq!(map.get_count(word), Some(count));
            prop_assert!(map.contains(word));
        }
        prop_assert_eq!(map.node_count(), expected_node_count(&model));

        let exported: BTreeMap<String, usize> = map
            .word_counts_by_count()
            .into_iter()
            .map(|wc| (wc.word().to_string(), wc.count()))
            .collect();
        prop_assert_eq!(exported, model);
    }

    #[test]
    fn prop_export_sorted_descending(words in prop::collection::vec(word_strategy(), 0..200)) {
        let mut map = WordCountMap::new();
        for word in &words {
            map.increment_count(word);
        }
        let counts = map.word_counts_by_count();
        for pair in counts.windows(2) {
            prop_assert!(pair[0].count() >= pair[1].count());
        }
        prop_assert!(counts.iter().all(|wc| wc.count() >= 1));
    }

    #[test]
    fn prop_increment_round_trip(word in "[a-z0-9]{1,20}", times in 1usize..20) {
        let mut map = WordCountMap::new();
        for _ in 0..times {
            map.increment_count(&word);
        }
        prop_assert_eq!(map.get_count(&word), Some(times));
        prop_assert!(map.contains(&word));
    }

    #[test]
    fn prop_decrement_absent_word_is_noop(
        words in prop::collection::vec(word_strategy(), 0..50),
        absent in "[xyz]{1,4}",
    ) {
        let mut map = WordCountMap::new();
        for word in &words {
            map.increment_count(word);
        }
        let nodes = map.node_count();
        let before = map.word_counts_by_count();

        map.decrement_count(&absent);

        prop_assert_eq!(map.node_count(), nodes);
        prop_assert_eq!(map.word_counts_by_count(), before);
    }

    #[test]
    fn prop_full_decrement_leaves_only_root(words in prop::collection::vec(word_strategy(), 0..100)) {
        let mut map = WordCountMap::new();
        for word in &words {
            map.increment_count(word);
        }
        for word in &words {
            map.decrement_count(word);
        }
        prop_assert_eq!(map.node_count(), 1);
        prop_assert!(map.is_empty());
    }
}
