use cfg_cnf::{Cfg, Usefulness};

mod support;

use support::assert_rules;

#[test]
fn test_remove_unproductive_then_unreachable() {
    support::init_logger();
    let cfg = Cfg::load(
        "S ::= A B | C\n\
         A ::= a\n\
         B ::= b B\n\
         C ::= c | D\n\
         D ::= D d\n\
         E ::= e",
    )
    .unwrap();

    let usefulness = Usefulness::new(&cfg);
    let [a, b, d, e] = ["A", "B", "D", "E"].map(|name| cfg.sym(name).unwrap());
    assert!(usefulness.productivity(a));
    assert!(!usefulness.productivity(b));
    assert!(!usefulness.productivity(d));
    assert!(!usefulness.reachability(a));
    assert!(!usefulness.reachability(e));
    let useless: Vec<String> = usefulness
        .useless_rules()
        .map(|useless| {
            format!(
                "{} {} {}",
                useless.rule.named(cfg.sym_source()),
                useless.unproductive,
                useless.unreachable
            )
        })
        .collect();
    assert_eq!(
        useless,
        [
            "S → A B true false",
            "A → a false true",
            "B → b B true true",
            "C → D true false",
            "D → D d true true",
            "E → e false true",
        ]
    );

    let productive = cfg.remove_unproductive();
    assert_rules(&productive, &["S → C", "A → a", "C → c", "E → e"]);
    assert!(!productive.is_nonterminal(b));
    assert!(!productive.is_nonterminal(d));

    let reachable = productive.remove_unreachable();
    assert_rules(&reachable, &["S → C", "C → c"]);
    assert!(!reachable.is_nonterminal(a));
    assert!(!reachable.is_terminal(cfg.sym("e").unwrap()));
    assert!(Usefulness::new(&reachable).all_useful());
    assert_eq!(cfg.remove_useless().to_string(), reachable.to_string());
}

#[test]
fn test_start_stays_declared() {
    let cfg = Cfg::load("S ::= S a").unwrap();
    let productive = cfg.remove_unproductive();
    assert!(productive.is_empty());
    assert!(productive.is_nonterminal(productive.start()));
}

#[test]
fn test_reachable_symbols_follow_reachability_matrix() {
    let cfg = Cfg::load("S ::= A b\nA ::= a\nC ::= S").unwrap();
    let [s, a, c] = ["S", "A", "C"].map(|name| cfg.sym(name).unwrap());

    let reachability = cfg.reachability_matrix();
    assert!(reachability[(s, a)]);
    assert!(reachability[(c, a)]);
    assert!(!reachability[(s, c)]);

    let mut reachable: Vec<&str> = cfg.reachable_symbols().iter().map(|sym| cfg.name_of(sym)).collect();
    reachable.sort();
    assert_eq!(reachable, ["A", "S", "a", "b"]);
}
