//! Definitions of the grammar snapshot type and its rules.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use crate::error::GrammarError;
use crate::occurence_map::OccurenceMap;
use crate::rule_builder::RuleBuilder;
use crate::symbol::{Symbol, SymbolBitSet, SymbolSource};
use crate::EPSILON;

/// Context-free grammar type.
///
/// A `Cfg` is a snapshot: the start symbol, the sets of nonterminals and
/// terminals, and an ordered list of rules. Transformations take a snapshot by
/// reference and return a new one. Snapshots derived from one another share
/// their symbol source, so a name always maps to the same symbol.
#[derive(Clone, Debug)]
pub struct Cfg {
    /// The symbol source.
    sym_source: Rc<SymbolSource>,
    /// The start symbol.
    start: Symbol,
    /// Symbols allowed on the LHS.
    nonterminals: SymbolBitSet,
    /// Symbols that derive only themselves.
    terminals: SymbolBitSet,
    /// The array of rules.
    rules: Vec<CfgRule>,
}

/// Standard grammar rule representation.
///
/// A rule with an empty RHS is an epsilon production.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CfgRule {
    /// The rule's left-hand side symbol.
    pub lhs: Symbol,
    /// The rule's right-hand side symbols.
    pub rhs: Rc<[Symbol]>,
}

/// Grammar rule with symbol names in place of symbols.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NamedCfgRule {
    /// Name of the left-hand side symbol.
    pub lhs: String,
    /// Names of the right-hand side symbols. Empty for an epsilon production.
    pub rhs: Vec<String>,
}

impl Cfg {
    /// Creates an empty grammar with the given start symbol, declared as a nonterminal.
    pub fn new(start: &str) -> Self {
        let sym_source = Rc::new(SymbolSource::new());
        let start = sym_source.intern(start);
        let mut cfg = Cfg::with_sym_source(sym_source, start);
        cfg.nonterminals.insert(start);
        cfg
    }

    /// Creates an empty grammar with the given symbol source and start symbol.
    ///
    /// The start symbol is not declared. See [`fn validate`].
    ///
    /// [`fn validate`]: Self::validate
    pub fn with_sym_source(sym_source: Rc<SymbolSource>, start: Symbol) -> Self {
        Cfg {
            sym_source,
            start,
            nonterminals: SymbolBitSet::new(),
            terminals: SymbolBitSet::new(),
            rules: vec![],
        }
    }

    /// Creates a snapshot with the same symbols and the given rules.
    pub fn with_rules(&self, rules: Vec<CfgRule>) -> Self {
        Cfg {
            sym_source: Rc::clone(&self.sym_source),
            start: self.start,
            nonterminals: self.nonterminals.clone(),
            terminals: self.terminals.clone(),
            rules,
        }
    }

    /// Allows access to the symbol source through a reference.
    pub fn sym_source(&self) -> &SymbolSource {
        &self.sym_source
    }

    /// Returns the number of symbols in use.
    pub fn num_syms(&self) -> usize {
        self.sym_source.num_syms()
    }

    /// Returns the name of a symbol.
    pub fn name_of(&self, sym: Symbol) -> &str {
        self.sym_source.name_of(sym)
    }

    /// Looks up a declared symbol by name.
    pub fn sym(&self, name: &str) -> Option<Symbol> {
        self.sym_source
            .get(name)
            .filter(|&sym| self.is_terminal(sym) || self.is_nonterminal(sym))
    }

    /// Returns the start symbol.
    pub fn start(&self) -> Symbol {
        self.start
    }

    /// Assigns a new start symbol and declares it as a nonterminal.
    pub fn set_start(&mut self, start: Symbol) {
        self.start = start;
        self.nonterminals.insert(start);
    }

    /// Declares terminals, one per name.
    pub fn terminals<const N: usize>(&mut self, names: [&str; N]) -> [Symbol; N] {
        names.map(|name| self.terminal(name))
    }

    /// Declares nonterminals, one per name.
    pub fn nonterminals<const N: usize>(&mut self, names: [&str; N]) -> [Symbol; N] {
        names.map(|name| self.nonterminal(name))
    }

    /// Declares a terminal.
    pub fn terminal(&mut self, name: &str) -> Symbol {
        let sym = self.sym_source.intern(name);
        self.terminals.insert(sym);
        sym
    }

    /// Declares a nonterminal.
    pub fn nonterminal(&mut self, name: &str) -> Symbol {
        let sym = self.sym_source.intern(name);
        self.nonterminals.insert(sym);
        sym
    }

    /// Returns the set of terminals.
    pub fn terminal_set(&self) -> &SymbolBitSet {
        &self.terminals
    }

    /// Returns the set of nonterminals.
    pub fn nonterminal_set(&self) -> &SymbolBitSet {
        &self.nonterminals
    }

    /// Checks whether the symbol is a declared terminal.
    pub fn is_terminal(&self, sym: Symbol) -> bool {
        self.terminals.contains(sym)
    }

    /// Checks whether the symbol is a declared nonterminal.
    pub fn is_nonterminal(&self, sym: Symbol) -> bool {
        self.nonterminals.contains(sym)
    }

    pub(crate) fn nonterminal_set_mut(&mut self) -> &mut SymbolBitSet {
        &mut self.nonterminals
    }

    pub(crate) fn terminal_set_mut(&mut self) -> &mut SymbolBitSet {
        &mut self.terminals
    }

    /// Checks whether a name belongs to a symbol of this grammar.
    pub fn is_taken(&self, name: &str) -> bool {
        self.sym(name).is_some()
    }

    /// Returns a symbol whose name is not taken in this grammar. Starts with
    /// `name` and appends `suffix` until the name is free.
    ///
    /// The symbol is not declared.
    pub fn fresh_sym(&self, name: impl Into<String>, suffix: &str) -> Symbol {
        let suffix = if suffix.is_empty() { "'" } else { suffix };
        let mut name = name.into();
        while self.is_taken(&name) {
            name.push_str(suffix);
        }
        self.sym_source.intern(name)
    }

    /// Returns an iterator over the list of grammar rules.
    pub fn rules(&self) -> impl Iterator<Item = &CfgRule> {
        self.rules.iter()
    }

    /// Returns the number of rules.
    pub fn num_rules(&self) -> usize {
        self.rules.len()
    }

    /// Checks whether the grammar has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Starts building a new rule.
    pub fn rule(&mut self, lhs: Symbol) -> RuleBuilder<'_> {
        RuleBuilder::new(self, lhs)
    }

    /// Adds a rule to this grammar.
    pub fn add_rule(&mut self, rule: CfgRule) {
        self.rules.push(rule);
    }

    /// Sorts the rule array by the names of the LHS, then the names of the RHS.
    pub fn sort(&mut self) {
        let sym_source = &self.sym_source;
        self.rules
            .sort_by(|rule_a, rule_b| cmp_by_names(sym_source, rule_a, rule_b));
    }

    /// Removes consecutive duplicate rules.
    pub fn dedup(&mut self) {
        self.rules.dedup();
    }

    /// Checks the invariants of symbol declarations.
    ///
    /// Terminals and nonterminals must be disjoint, the start symbol must be a
    /// nonterminal, every LHS must be a nonterminal and every RHS symbol must
    /// be declared.
    pub fn validate(&self) -> Result<(), GrammarError> {
        if let Some(sym) = self.terminals.iter().find(|&sym| self.is_nonterminal(sym)) {
            return Err(GrammarError::ConflictingDeclaration {
                name: self.name_of(sym).to_string(),
            });
        }
        if self.sym(EPSILON).is_some() {
            return Err(GrammarError::ReservedEpsilon);
        }
        if !self.is_nonterminal(self.start) {
            return Err(GrammarError::UndeclaredStart {
                start: self.name_of(self.start).to_string(),
            });
        }
        for rule in self.rules() {
            if !self.is_nonterminal(rule.lhs) {
                let lhs = self.name_of(rule.lhs).to_string();
                return Err(if self.is_terminal(rule.lhs) {
                    GrammarError::TerminalOnLhs { lhs }
                } else {
                    GrammarError::MalformedReference {
                        symbol: lhs.clone(),
                        lhs,
                    }
                });
            }
            if let Some(&sym) = rule
                .rhs
                .iter()
                .find(|&&sym| !self.is_terminal(sym) && !self.is_nonterminal(sym))
            {
                return Err(GrammarError::MalformedReference {
                    lhs: self.name_of(rule.lhs).to_string(),
                    symbol: self.name_of(sym).to_string(),
                });
            }
        }
        Ok(())
    }

    /// If **all** symbols on the RHS have the property, the LHS has it too.
    /// Updates the given symbol set according to the above, and does it
    /// transitively.
    ///
    /// Only rules that mention a symbol which gained the property are
    /// examined again. Rules with an empty RHS are never examined, so their
    /// LHS must be part of the initial property when that is desired.
    pub fn rhs_closure_for_all(&self, property: &mut SymbolBitSet) {
        let mut work_stack: Vec<Symbol> = property.iter().collect();

        let occurence_map = OccurenceMap::from_rules(self.rules());

        while let Some(work_sym) = work_stack.pop() {
            for &rule_id in occurence_map.get(work_sym).rhs() {
                let rule = &self.rules[rule_id];
                if !property[rule.lhs] && rule.rhs.iter().all(|&sym| property[sym]) {
                    property.insert(rule.lhs);
                    work_stack.push(rule.lhs);
                }
            }
        }
    }

    /// Returns the set of symbols on the LHS of rules of the form `A ::= ε`.
    pub fn nulling_symbols(&self) -> SymbolBitSet {
        self.rules()
            .filter(|rule| rule.rhs.is_empty())
            .map(|rule| rule.lhs)
            .collect()
    }

    /// Returns the rules with symbol names.
    pub fn named_rules(&self) -> Vec<NamedCfgRule> {
        self.rules()
            .map(|rule| rule.named(&self.sym_source))
            .collect()
    }

    /// Formats the grammar to a `String`, one line per LHS, with
    /// alternatives separated by `|`. The output looks like this:
    ///
    /// ```text
    /// S → A B | a
    /// A → a
    /// ```
    ///
    /// Left-hand sides appear in the order of their first rule.
    pub fn stringify_grouped(&self) -> String {
        let occurence_map = OccurenceMap::from_rules(self.rules());
        let mut done = SymbolBitSet::new();
        let mut result = String::new();
        for rule in self.rules() {
            if done[rule.lhs] {
                continue;
            }
            done.insert(rule.lhs);
            let alternatives = occurence_map
                .get(rule.lhs)
                .lhs()
                .iter()
                .map(|&rule_id| self.rules[rule_id].named(&self.sym_source).rhs_to_string())
                .collect::<Vec<_>>();
            result.push_str(&format!(
                "{} → {}\n",
                self.name_of(rule.lhs),
                alternatives.join(" | ")
            ));
        }
        result
    }
}

/// Formats the grammar with one rule per line, such as `A → B C`.
impl fmt::Display for Cfg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in self.rules() {
            writeln!(f, "{}", rule.named(&self.sym_source))?;
        }
        Ok(())
    }
}

fn cmp_by_names(sym_source: &SymbolSource, rule_a: &CfgRule, rule_b: &CfgRule) -> Ordering {
    let names = |rule: &CfgRule| {
        rule.rhs
            .iter()
            .map(|&sym| sym_source.name_of(sym))
            .collect::<Vec<_>>()
    };
    sym_source
        .name_of(rule_a.lhs)
        .cmp(sym_source.name_of(rule_b.lhs))
        .then_with(|| names(rule_a).cmp(&names(rule_b)))
}

impl CfgRule {
    /// Creates a new rule.
    pub fn new(lhs: Symbol, rhs: impl AsRef<[Symbol]>) -> Self {
        CfgRule {
            lhs,
            rhs: rhs.as_ref().into(),
        }
    }

    /// Checks whether this is an epsilon production.
    pub fn is_nulling(&self) -> bool {
        self.rhs.is_empty()
    }

    /// Creates a named grammar rule with the symbols having names
    /// grabbed from the given symbol source.
    pub fn named(&self, sym_source: &SymbolSource) -> NamedCfgRule {
        NamedCfgRule {
            lhs: sym_source.name_of(self.lhs).to_string(),
            rhs: self
                .rhs
                .iter()
                .map(|&sym| sym_source.name_of(sym).to_string())
                .collect(),
        }
    }
}

impl NamedCfgRule {
    /// Creates a named rule. The RHS is split on whitespace, and `ε` stands for
    /// the empty RHS.
    pub fn new(lhs: &str, rhs: &str) -> Self {
        NamedCfgRule {
            lhs: lhs.to_string(),
            rhs: rhs
                .split_whitespace()
                .filter(|&name| name != EPSILON)
                .map(str::to_string)
                .collect(),
        }
    }

    fn rhs_to_string(&self) -> String {
        if self.rhs.is_empty() {
            EPSILON.to_string()
        } else {
            self.rhs.join(" ")
        }
    }
}

impl fmt::Display for NamedCfgRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.lhs, self.rhs_to_string())
    }
}
