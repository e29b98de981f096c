use super::*;
use crate::test_utils::{leaf, pred};

fn sample() -> AnswerSet {
    // edge(a,b) edge(b,c) node(a) node(b) node(c)
    AnswerSet::new(vec![
        pred("edge", &["a", "b"]),
        pred("edge", &["b", "c"]),
        pred("node", &["a"]),
        pred("node", &["b"]),
        pred("node", &["c"]),
    ])
}

// ========== BASIC SHAPE ==========

#[test]
fn preserves_input_order() {
    let set = sample();
    let names: Vec<_> = set.iter().map(Predicate::name).collect();
    assert_eq!(names, vec!["edge", "edge", "node", "node", "node"]);
}

#[test]
fn len_and_is_empty() {
    assert_eq!(sample().len(), 5);
    assert!(!sample().is_empty());
    assert!(AnswerSet::default().is_empty());
}

#[test]
fn default_set_number_is_zero() {
    assert_eq!(sample().set_number(), 0);
    assert_eq!(
        AnswerSet::with_set_number(vec![leaf("a")], 3).set_number(),
        3
    );
}

#[test]
fn contains_is_structural() {
    let set = sample();
    assert!(set.contains(&pred("edge", &["a", "b"])));
    assert!(!set.contains(&pred("edge", &["b", "a"])));
    // Nested predicates are not top-level members.
    assert!(!set.contains(&leaf("a")));
}

#[test]
fn into_iterator_walks_predicates() {
    let set = sample();
    let mut count = 0;
    for p in &set {
        assert!(!p.name().is_empty());
        count += 1;
    }
    assert_eq!(count, 5);
}

#[test]
fn collects_from_iterator() {
    let set: AnswerSet = vec![leaf("x"), leaf("y")].into_iter().collect();
    assert_eq!(set.len(), 2);
}

// ========== EQUALITY ==========

#[test]
fn equality_ignores_set_number() {
    let a = AnswerSet::with_set_number(vec![leaf("p")], 1);
    let b = AnswerSet::with_set_number(vec![leaf("p")], 2);
    assert_eq!(a, b);
}

#[test]
fn equality_is_order_sensitive() {
    let a = AnswerSet::new(vec![leaf("p"), leaf("q")]);
    let b = AnswerSet::new(vec![leaf("q"), leaf("p")]);
    assert_ne!(a, b);
}

#[test]
fn equal_sets_hash_identically() {
    use std::collections::HashSet;
    let mut seen = HashSet::new();
    seen.insert(AnswerSet::with_set_number(vec![leaf("p")], 1));
    assert!(seen.contains(&AnswerSet::with_set_number(vec![leaf("p")], 9)));
}

// ========== EXACT LOOKUP ==========

#[test]
fn lookup_by_name_exact() {
    let set = sample();
    let edges = set.lookup("edge", false, false);
    assert_eq!(edges.len(), 2);
    assert_eq!(edges.predicates()[0], pred("edge", &["a", "b"]));
    assert_eq!(edges.predicates()[1], pred("edge", &["b", "c"]));
}

#[test]
fn lookup_preserves_relative_order_within_bucket() {
    let set = AnswerSet::new(vec![
        pred("p", &["1"]),
        leaf("q"),
        pred("p", &["2"]),
        pred("p", &["3"]),
    ]);
    let found = set.lookup("p", false, false);
    let args: Vec<_> = found.iter().map(|p| p[0].name().to_string()).collect();
    assert_eq!(args, vec!["1", "2", "3"]);
}

#[test]
fn lookup_missing_name_is_empty() {
    let found = sample().lookup("absent", false, false);
    assert!(found.is_empty());
}

#[test]
fn lookup_does_not_mutate_receiver() {
    let set = sample();
    let before = set.clone();
    let _ = set.lookup("edge", false, false);
    let _ = set.lookup("a", true, true);
    assert_eq!(set, before);
    assert_eq!(set.len(), 5);
}

#[test]
fn lookup_result_is_untagged() {
    let set = AnswerSet::with_set_number(vec![leaf("p")], 4);
    assert_eq!(set.lookup("p", false, false).set_number(), 0);
}

#[test]
fn exact_lookup_does_not_see_nested_names() {
    let set = sample();
    // "a" only occurs as an argument, never as a top-level name.
    assert!(set.lookup("a", false, false).is_empty());
}

// ========== NESTED LOOKUP ==========

#[test]
fn nested_lookup_reaches_arguments() {
    let set = sample();
    let with_a = set.lookup("a", true, false);
    assert_eq!(with_a.len(), 2);
    assert!(with_a.contains(&pred("edge", &["a", "b"])));
    assert!(with_a.contains(&pred("node", &["a"])));
}

#[test]
fn nested_lookup_includes_own_name() {
    let set = sample();
    assert_eq!(set.lookup("edge", true, false).len(), 2);
}

#[test]
fn nested_lookup_reaches_deep_arguments() {
    let deep = Predicate::new(
        "holds",
        vec![Predicate::new("at", vec![leaf("robot"), leaf("room1")])],
    );
    let set = AnswerSet::new(vec![deep.clone()]);
    assert_eq!(set.lookup("room1", true, false).predicates(), &[deep]);
}

// ========== FUZZY LOOKUP ==========

#[test]
fn fuzzy_matches_substrings_of_indexed_names() {
    let set = AnswerSet::new(vec![leaf("baz")]);
    for query in ["b", "ba", "az", "baz"] {
        assert_eq!(
            set.lookup(query, false, true).len(),
            1,
            "query {:?} should match 'baz'",
            query
        );
    }
    assert!(set.lookup("bz", false, true).is_empty());
}

#[test]
fn fuzzy_unions_all_matching_keys() {
    let set = AnswerSet::new(vec![
        leaf("b"),
        leaf("ba"),
        leaf("az"),
        leaf("baz"),
        leaf("bz"),
    ]);
    let found = set.lookup("a", false, true);
    let mut names: Vec<_> = found.iter().map(|p| p.name().to_string()).collect();
    names.sort();
    assert_eq!(names, vec!["az", "ba", "baz"]);
}

#[test]
fn fuzzy_nested_scans_names_not_rendered_text() {
    let set = AnswerSet::new(vec![pred("bar", &["foo"])]);
    // Individual names match...
    assert_eq!(set.lookup("ar", true, true).len(), 1);
    assert_eq!(set.lookup("oo", true, true).len(), 1);
    // ...but a span across name and punctuation never does.
    assert!(set.lookup("r(f", true, true).is_empty());
}

#[test]
fn fuzzy_repeats_predicate_per_matching_key() {
    // Both "bar" and "baz" contain "ba", and the predicate is indexed under
    // both, so it comes back once per key.
    let set = AnswerSet::new(vec![pred("bar", &["baz"])]);
    assert_eq!(set.lookup("ba", true, true).len(), 2);
}

#[test]
fn fuzzy_exact_index_ignores_nested_names() {
    let set = AnswerSet::new(vec![pred("bar", &["foo"])]);
    assert!(set.lookup("oo", false, true).is_empty());
}

// ========== RENDERING ==========

#[test]
fn renders_space_joined() {
    let set = AnswerSet::new(vec![pred("edge", &["a", "b"]), leaf("flag")]);
    assert_eq!(set.to_string(), "edge(a,b) flag");
}

#[test]
fn empty_set_renders_empty() {
    assert_eq!(AnswerSet::default().to_string(), "");
}

// ========== SERDE ==========

#[cfg(feature = "serde")]
#[test]
fn serde_round_trips_structure_and_tag() {
    let set = AnswerSet::with_set_number(vec![pred("edge", &["a", "b"]), leaf("flag")], 2);
    let json = serde_json::to_string(&set).unwrap();
    let back: AnswerSet = serde_json::from_str(&json).unwrap();
    assert_eq!(back, set);
    assert_eq!(back.set_number(), 2);
    // Indexes are rebuilt, not shipped.
    assert_eq!(back.lookup("a", true, false).len(), 1);
}
