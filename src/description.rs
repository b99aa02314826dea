//! Grammars described by symbol names.

use std::collections::BTreeSet;
use std::rc::Rc;

use crate::cfg::Cfg;
use crate::error::GrammarError;
use crate::symbol::{Symbol, SymbolSource};
use crate::EPSILON;

/// A grammar given by names: the start symbol, the declared nonterminals and
/// terminals, and an ordered list of rules.
///
/// Unlike [`Cfg`], a description owns plain strings, so it can be sent
/// across threads and turned into a grammar on each of them.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GrammarDescription {
    /// Name of the start symbol.
    pub start: String,
    /// Names allowed on the left-hand side.
    pub nonterminals: BTreeSet<String>,
    /// Names that derive only themselves.
    pub terminals: BTreeSet<String>,
    /// Rules in their original order.
    pub rules: Vec<RuleDescription>,
}

/// A rule given by names.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RuleDescription {
    /// Name of the left-hand side.
    pub lhs: String,
    /// Names on the right-hand side, separated by whitespace. A lone `ε`
    /// stands for the empty string.
    pub rhs: String,
}

impl GrammarDescription {
    /// Creates a description with the given start symbol and nothing else.
    pub fn new(start: impl Into<String>) -> Self {
        GrammarDescription {
            start: start.into(),
            ..Default::default()
        }
    }

    /// Declares nonterminals.
    pub fn nonterminals<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nonterminals.extend(names.into_iter().map(Into::into));
        self
    }

    /// Declares terminals.
    pub fn terminals<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.terminals.extend(names.into_iter().map(Into::into));
        self
    }

    /// Appends a rule.
    pub fn rule(mut self, lhs: impl Into<String>, rhs: impl Into<String>) -> Self {
        self.rules.push(RuleDescription {
            lhs: lhs.into(),
            rhs: rhs.into(),
        });
        self
    }

    /// Checks the declarations and rules, then builds a grammar with a symbol
    /// source of its own.
    ///
    /// Symbols are interned in a fixed order: the start symbol, the
    /// nonterminals by name, then the terminals by name.
    pub fn to_cfg(&self) -> Result<Cfg, GrammarError> {
        self.check_declarations()?;

        let sym_source = Rc::new(SymbolSource::new());
        let start = sym_source.intern(&self.start);
        let mut cfg = Cfg::with_sym_source(sym_source, start);
        for name in &self.nonterminals {
            cfg.nonterminal(name);
        }
        for name in &self.terminals {
            cfg.terminal(name);
        }
        for rule in &self.rules {
            let rhs = self.rule_rhs(rule)?;
            let rhs: Vec<Symbol> = rhs.into_iter().map(|name| cfg.sym_source().intern(name)).collect();
            let lhs = cfg.sym_source().intern(&rule.lhs);
            cfg.rule(lhs).rhs(rhs);
        }
        cfg.validate()?;
        log::debug!(
            "grammar for `{}`: {} nonterminals, {} terminals, {} rules",
            self.start,
            self.nonterminals.len(),
            self.terminals.len(),
            cfg.num_rules()
        );
        Ok(cfg)
    }

    fn check_declarations(&self) -> Result<(), GrammarError> {
        if self.nonterminals.contains(EPSILON) || self.terminals.contains(EPSILON) {
            return Err(GrammarError::ReservedEpsilon);
        }
        if let Some(name) = self.nonterminals.intersection(&self.terminals).next() {
            return Err(GrammarError::ConflictingDeclaration { name: name.clone() });
        }
        if !self.nonterminals.contains(&self.start) {
            return Err(GrammarError::UndeclaredStart {
                start: self.start.clone(),
            });
        }
        Ok(())
    }

    /// Splits the RHS into names. An empty result stands for `ε`.
    fn rule_rhs<'a>(&self, rule: &'a RuleDescription) -> Result<Vec<&'a str>, GrammarError> {
        let lhs = || rule.lhs.clone();
        if self.terminals.contains(&rule.lhs) {
            return Err(GrammarError::TerminalOnLhs { lhs: lhs() });
        }
        if !self.nonterminals.contains(&rule.lhs) {
            return Err(GrammarError::MalformedReference {
                lhs: lhs(),
                symbol: lhs(),
            });
        }
        let names: Vec<&str> = rule.rhs.split_whitespace().collect();
        match &names[..] {
            [] => Err(GrammarError::EmptyRhs { lhs: lhs() }),
            [name] if *name == EPSILON => Ok(vec![]),
            _ => {
                if names.contains(&EPSILON) {
                    return Err(GrammarError::MisplacedEpsilon { lhs: lhs() });
                }
                if let Some(name) = names
                    .iter()
                    .find(|name| !self.nonterminals.contains(**name) && !self.terminals.contains(**name))
                {
                    return Err(GrammarError::MalformedReference {
                        lhs: lhs(),
                        symbol: name.to_string(),
                    });
                }
                Ok(names)
            }
        }
    }
}
