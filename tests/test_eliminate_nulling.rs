use cfg_cnf::{Cfg, Naming};

mod support;

use support::{assert_rules, language};

#[test]
fn test_eliminate_nulling() {
    support::init_logger();
    let mut cfg = Cfg::new("S");
    let [start, a, b] = cfg.nonterminals(["S", "A", "B"]);
    let [x, y] = cfg.terminals(["x", "y"]);
    cfg.rule(start)
        .rhs([a, b])
        .rule(a)
        .rhs([x])
        .rhs([])
        .rule(b)
        .rhs([y])
        .rhs([]);

    let nullable = cfg.nullable_symbols();
    assert!(nullable[start] && nullable[a] && nullable[b]);
    assert!(!nullable[x]);

    let eliminated = cfg.eliminate_nulling_rules(&Naming::default());
    assert_rules(
        &eliminated,
        &["S → A B", "S → B", "S → A", "A → x", "B → y", "S' → S", "S' → ε"],
    );
    assert_eq!(eliminated.name_of(eliminated.start()), "S'");
    assert!(eliminated.is_nonterminal(start));
    assert_eq!(language(&cfg, 3), language(&eliminated, 3));
}

#[test]
fn test_only_epsilon_rules_are_dropped() {
    support::init_logger();
    let mut cfg = Cfg::new("S");
    let [start, x_sym] = cfg.nonterminals(["S", "X"]);
    let [a] = cfg.terminals(["a"]);
    cfg.rule(start).rhs([a, x_sym]).rule(x_sym).rhs([]);

    let eliminated = cfg.eliminate_nulling_rules(&Naming::default());
    assert_rules(&eliminated, &["S → a"]);
    assert_eq!(eliminated.start(), start);
    assert!(!eliminated.is_nonterminal(x_sym));
}

#[test]
fn test_duplicate_variants_collapse() {
    let mut cfg = Cfg::new("S");
    let [start, a] = cfg.nonterminals(["S", "A"]);
    let [x] = cfg.terminals(["x"]);
    cfg.rule(start)
        .rhs([a, x, a])
        .rule(a)
        .rhs([x])
        .rhs([]);

    let eliminated = cfg.eliminate_nulling_rules(&Naming::default());
    assert_rules(
        &eliminated,
        &["S → A x A", "S → x A", "S → A x", "S → x", "A → x"],
    );
    assert_eq!(language(&cfg, 3), language(&eliminated, 3));
}
