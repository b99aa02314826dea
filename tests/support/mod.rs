#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};

use cfg_cnf::{Cfg, Symbol, Usefulness};

pub type Word = Vec<String>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn rule_strings(cfg: &Cfg) -> Vec<String> {
    cfg.named_rules().iter().map(ToString::to_string).collect()
}

pub fn assert_rules(cfg: &Cfg, expected: &[&str]) {
    assert_eq!(rule_strings(cfg), expected, "grammar:\n{}", cfg);
}

pub fn word(text: &str) -> Word {
    text.split_whitespace().map(str::to_string).collect()
}

/// Computes every terminal string of at most `max_len` symbols that the start
/// symbol derives, by a fixpoint over the rules.
pub fn language(cfg: &Cfg, max_len: usize) -> BTreeSet<Word> {
    let mut derived: BTreeMap<Symbol, BTreeSet<Vec<Symbol>>> = BTreeMap::new();
    for terminal in cfg.terminal_set().iter() {
        derived.insert(terminal, [vec![terminal]].into_iter().collect());
    }
    let mut changed = true;
    while changed {
        changed = false;
        for rule in cfg.rules() {
            let mut strings: BTreeSet<Vec<Symbol>> = [vec![]].into_iter().collect();
            for sym in rule.rhs.iter() {
                let empty = BTreeSet::new();
                let sym_strings = derived.get(sym).unwrap_or(&empty);
                let mut next = BTreeSet::new();
                for prefix in &strings {
                    for suffix in sym_strings {
                        if prefix.len() + suffix.len() <= max_len {
                            let mut string = prefix.clone();
                            string.extend(suffix.iter().copied());
                            next.insert(string);
                        }
                    }
                }
                strings = next;
            }
            let lhs_strings = derived.entry(rule.lhs).or_default();
            for string in strings {
                changed |= lhs_strings.insert(string);
            }
        }
    }
    derived
        .remove(&cfg.start())
        .unwrap_or_default()
        .into_iter()
        .map(|string| string.into_iter().map(|sym| cfg.name_of(sym).to_string()).collect())
        .collect()
}

/// Recognizes a word with a grammar in Chomsky Normal Form.
pub fn cyk(cfg: &Cfg, word: &[String]) -> bool {
    if word.is_empty() {
        return cfg
            .rules()
            .any(|rule| rule.lhs == cfg.start() && rule.rhs.is_empty());
    }
    let n = word.len();
    // table[i][len - 1] holds the nonterminals deriving word[i..i + len]
    let mut table: Vec<Vec<BTreeSet<Symbol>>> = vec![vec![BTreeSet::new(); n]; n];
    for (i, name) in word.iter().enumerate() {
        for rule in cfg.rules() {
            if let [sym] = rule.rhs[..] {
                if cfg.name_of(sym) == name.as_str() && cfg.is_terminal(sym) {
                    table[i][0].insert(rule.lhs);
                }
            }
        }
    }
    for len in 2..=n {
        for i in 0..=n - len {
            for split in 1..len {
                for rule in cfg.rules() {
                    if let [left, right] = rule.rhs[..] {
                        if table[i][split - 1].contains(&left)
                            && table[i + split][len - split - 1].contains(&right)
                        {
                            table[i][len - 1].insert(rule.lhs);
                        }
                    }
                }
            }
        }
    }
    table[0][n - 1].contains(&cfg.start())
}

/// Checks the shape of a grammar in Chomsky Normal Form, including the
/// absence of unit rules and of useless rules.
pub fn assert_cnf(cfg: &Cfg) {
    let start = cfg.start();
    let start_is_nullable = cfg
        .rules()
        .any(|rule| rule.lhs == start && rule.rhs.is_empty());
    for rule in cfg.rules() {
        let named = rule.named(cfg.sym_source());
        assert!(cfg.is_nonterminal(rule.lhs), "{}", named);
        match rule.rhs[..] {
            [] => assert_eq!(rule.lhs, start, "{}", named),
            [sym] => assert!(cfg.is_terminal(sym), "{}", named),
            [left, right] => {
                assert!(cfg.is_nonterminal(left) && cfg.is_nonterminal(right), "{}", named);
                if start_is_nullable {
                    assert!(left != start && right != start, "{}", named);
                }
            }
            _ => panic!("rule too long: {}", named),
        }
    }
    assert!(Usefulness::new(cfg).all_useful(), "grammar:\n{}", cfg);
}
