//! Analysis and removal of useless rules.
//!
//! A symbol is productive when it derives some string of terminals, and
//! reachable when it appears in some sentential form derived from the start
//! symbol. Useful rules are both reachable and productive.

use crate::cfg::{Cfg, CfgRule};
use crate::symbol::{Symbol, SymbolBitMatrix, SymbolBitSet};

/// Contains the information about usefulness of the grammar's rules.
pub struct Usefulness<'a> {
    grammar: &'a Cfg,
    productivity: SymbolBitSet,
    reachable_syms: SymbolBitSet,
}

/// A reference to a useless rule, together with the reason for its uselessness.
#[derive(Copy, Clone, Debug)]
pub struct UselessRule<'a> {
    /// The rule.
    pub rule: &'a CfgRule,
    /// Indicates whether the rule is unreachable.
    pub unreachable: bool,
    /// Indicates whether the rule is unproductive.
    pub unproductive: bool,
}

fn direct_derivation_matrix<'a>(
    num_syms: usize,
    rules: impl Iterator<Item = &'a CfgRule>,
) -> SymbolBitMatrix {
    let mut derivation = SymbolBitMatrix::new(num_syms);
    for rule in rules {
        for &sym in rule.rhs.iter() {
            derivation.set(rule.lhs, sym, true);
        }
    }
    derivation
}

fn reachable_from(start: Symbol, reachability: &SymbolBitMatrix) -> SymbolBitSet {
    let mut reachable_syms = reachability.row_set(start);
    reachable_syms.insert(start);
    reachable_syms
}

impl Cfg {
    /// Computes the direct derivation matrix. `(A, B)` is in the relation when
    /// `B` occurs on the RHS of a rule for `A`.
    pub fn direct_derivation_matrix(&self) -> SymbolBitMatrix {
        direct_derivation_matrix(self.num_syms(), self.rules())
    }

    /// Computes the reachability matrix, the transitive closure of direct
    /// derivation.
    pub fn reachability_matrix(&self) -> SymbolBitMatrix {
        let mut reachability = self.direct_derivation_matrix();
        reachability.transitive_closure();
        reachability
    }

    /// Returns the set of productive symbols, which includes all terminals.
    pub fn productive_symbols(&self) -> SymbolBitSet {
        self.derivable_symbols()
    }

    /// Returns the set of symbols reachable from the start symbol, including
    /// the start symbol.
    pub fn reachable_symbols(&self) -> SymbolBitSet {
        reachable_from(self.start(), &self.reachability_matrix())
    }

    /// Removes the rules that mention an unproductive symbol. Unproductive
    /// nonterminals are no longer declared, except for the start symbol.
    pub fn remove_unproductive(&self) -> Cfg {
        let productive = self.productive_symbols();
        let rules = self
            .rules()
            .filter(|rule| productive[rule.lhs] && rule.rhs.iter().all(|&sym| productive[sym]))
            .cloned()
            .collect();
        let mut result = self.with_rules(rules);
        result.nonterminal_set_mut().intersect(&productive);
        result.nonterminal_set_mut().insert(self.start());
        log::debug!(
            "productivity: {} rules left of {}",
            result.num_rules(),
            self.num_rules()
        );
        result
    }

    /// Removes the rules for symbols that are unreachable from the start
    /// symbol. Unreachable symbols are no longer declared.
    pub fn remove_unreachable(&self) -> Cfg {
        let reachable = self.reachable_symbols();
        let rules = self
            .rules()
            .filter(|rule| reachable[rule.lhs])
            .cloned()
            .collect();
        let mut result = self.with_rules(rules);
        result.nonterminal_set_mut().intersect(&reachable);
        result.terminal_set_mut().intersect(&reachable);
        log::debug!(
            "reachability: {} rules left of {}",
            result.num_rules(),
            self.num_rules()
        );
        result
    }

    /// Removes unproductive rules, then unreachable ones. The language
    /// represented by the grammar doesn't change.
    pub fn remove_useless(&self) -> Cfg {
        self.remove_unproductive().remove_unreachable()
    }
}

impl<'a> Usefulness<'a> {
    /// Analyzes usefulness of the grammar's rules. A rule is reachable when
    /// its LHS is reachable from the start symbol through productive rules.
    pub fn new(grammar: &'a Cfg) -> Self {
        let productivity = grammar.productive_symbols();
        let mut reachability = direct_derivation_matrix(
            grammar.num_syms(),
            grammar
                .rules()
                .filter(|rule| rule.rhs.iter().all(|&sym| productivity[sym])),
        );
        reachability.transitive_closure();
        let reachable_syms = reachable_from(grammar.start(), &reachability);
        Usefulness {
            grammar,
            productivity,
            reachable_syms,
        }
    }

    /// Checks whether a symbol is productive. Can be used to determine the precise reason
    /// of a rule's unproductiveness.
    pub fn productivity(&self, sym: Symbol) -> bool {
        self.productivity[sym]
    }

    /// Checks whether a symbol is reachable.
    pub fn reachability(&self, sym: Symbol) -> bool {
        self.reachable_syms[sym]
    }

    /// Checks whether all rules in the grammar are useful.
    pub fn all_useful(&self) -> bool {
        self.useless_rules().next().is_none()
    }

    /// Checks whether all rules in the grammar are productive.
    pub fn all_productive(&self) -> bool {
        self.useless_rules().all(|useless| !useless.unproductive)
    }

    /// Checks whether all rules in the grammar are reachable.
    pub fn all_reachable(&self) -> bool {
        self.useless_rules().all(|useless| !useless.unreachable)
    }

    fn rule_usefulness<'r>(&self, rule: &'r CfgRule) -> UselessRule<'r> {
        UselessRule {
            rule,
            unproductive: !rule.rhs.iter().all(|&sym| self.productivity[sym]),
            unreachable: !self.reachable_syms[rule.lhs],
        }
    }

    /// Returns an iterator over the grammar's useless rules.
    pub fn useless_rules(&self) -> impl Iterator<Item = UselessRule<'a>> + '_ {
        self.grammar
            .rules()
            .map(|rule| self.rule_usefulness(rule))
            .filter(|useless| useless.unreachable || useless.unproductive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reachable_only_through_unproductive_rule() {
        let mut cfg = Cfg::new("S");
        let [start, a, b] = cfg.nonterminals(["S", "A", "B"]);
        let [x] = cfg.terminals(["x"]);
        cfg.rule(start)
            .rhs([a, b])
            .rhs([x])
            .rule(a)
            .rhs([x])
            .rule(b)
            .rhs([b, x]);

        let usefulness = Usefulness::new(&cfg);
        assert!(usefulness.productivity(a));
        assert!(!usefulness.productivity(b));
        assert!(!usefulness.reachability(a));
        assert!(!usefulness.all_productive());
        assert!(!usefulness.all_reachable());
        assert_eq!(usefulness.useless_rules().count(), 3);

        let useful = cfg.remove_useless();
        assert_eq!(useful.to_string(), "S → x\n");
        assert!(Usefulness::new(&useful).all_useful());
        assert!(!useful.is_nonterminal(a));
        assert!(!useful.is_nonterminal(b));
    }
}
