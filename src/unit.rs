//! Elimination of unit rules, such as `A → B`.

use std::collections::BTreeSet;

use crate::cfg::{Cfg, CfgRule};
use crate::occurence_map::OccurenceMap;
use crate::symbol::SymbolBitMatrix;

impl Cfg {
    /// Checks whether the rule's RHS is a single nonterminal.
    pub fn is_unit_rule(&self, rule: &CfgRule) -> bool {
        matches!(&rule.rhs[..], &[sym] if self.is_nonterminal(sym))
    }

    /// Computes the unit derivation matrix. `(A, B)` is in the relation when
    /// `A` derives `B` through unit rules only. Every symbol derives itself.
    pub fn unit_derivation_matrix(&self) -> SymbolBitMatrix {
        let mut unit_derivation = SymbolBitMatrix::new(self.num_syms());
        for rule in self.rules().filter(|rule| self.is_unit_rule(rule)) {
            unit_derivation.set(rule.lhs, rule.rhs[0], true);
        }
        unit_derivation.transitive_closure();
        unit_derivation.reflexive_closure();
        unit_derivation
    }

    /// Replaces unit rules. For every nonterminal `A` and every `B` that `A`
    /// derives through unit rules, each rule `B → γ` that is not a unit rule
    /// yields `A → γ`. Epsilon rules are carried over the same way.
    pub fn eliminate_unit_rules(&self) -> Cfg {
        let unit_derivation = self.unit_derivation_matrix();
        let occurence_map = OccurenceMap::from_rules(self.rules());
        let all_rules: Vec<&CfgRule> = self.rules().collect();

        let mut seen = BTreeSet::new();
        let mut rules = vec![];
        for lhs in self.nonterminal_set().iter() {
            for derived in unit_derivation.iter_row_syms(lhs) {
                for &rule_id in occurence_map.get(derived).lhs() {
                    let rule = all_rules[rule_id];
                    if self.is_unit_rule(rule) {
                        continue;
                    }
                    let new_rule = CfgRule {
                        lhs,
                        rhs: rule.rhs.clone(),
                    };
                    if seen.insert(new_rule.clone()) {
                        rules.push(new_rule);
                    }
                }
            }
        }
        let result = self.with_rules(rules);
        log::debug!(
            "unit rules: {} rules left of {}",
            result.num_rules(),
            self.num_rules()
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_is_closed() {
        let mut cfg = Cfg::new("A");
        let [a, b, c] = cfg.nonterminals(["A", "B", "C"]);
        let [x] = cfg.terminals(["x"]);
        cfg.rule(a).rhs([b]).rule(b).rhs([c]).rule(c).rhs([x]);
        let matrix = cfg.unit_derivation_matrix();
        assert!(matrix[(a, c)] && matrix[(a, a)] && matrix[(b, c)]);
        assert!(!matrix[(c, a)]);
        assert!(!cfg.is_unit_rule(&CfgRule::new(c, [x])));
    }
}
