//! Grammar rules can be built with the builder pattern.

use std::convert::AsRef;

use crate::cfg::{Cfg, CfgRule};
use crate::symbol::Symbol;

/// The rule builder.
pub struct RuleBuilder<'a> {
    lhs: Symbol,
    grammar: &'a mut Cfg,
}

impl<'a> RuleBuilder<'a> {
    /// Creates a rule builder for rules with the given LHS.
    pub fn new(grammar: &'a mut Cfg, lhs: Symbol) -> Self {
        RuleBuilder { lhs, grammar }
    }

    /// Starts building a new rule with the given LHS.
    pub fn rule(mut self, lhs: Symbol) -> Self {
        self.lhs = lhs;
        self
    }

    /// Adds a rule alternative to the grammar. An empty `syms` adds an
    /// epsilon production.
    pub fn rhs<S>(self, syms: S) -> Self
    where
        S: AsRef<[Symbol]>,
    {
        self.grammar.add_rule(CfgRule::new(self.lhs, syms));
        self
    }
}
