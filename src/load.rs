//! Allows us to load context-free grammars from a BNF-like string.
//!
//! ```text
//! # comments run to the end of the line
//! S ::= a S b | ε ;
//! A -> B c
//!    | d
//! B → b
//! ```
//!
//! A rule ends at `;` or at the end of its line, unless the line ends with `|`
//! or the next line starts with `|`. Names on the left-hand side are
//! nonterminals and the first of them is the start symbol. Every other name is
//! a terminal.

use std::str::Chars;

use tiny_earley::{forest, grammar, Recognizer, Symbol};

use crate::cfg::Cfg;
use crate::description::{GrammarDescription, RuleDescription};
use crate::error::{Error, LoadError};
use crate::EPSILON;

const BNF_OPS: [&str; 3] = ["::=", "->", "→"];

/// A lexical token of the grammar text.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Token {
    /// A symbol name, including `ε`.
    Ident(String),
    /// One of `::=`, `->` and `→`.
    BnfOp,
    /// `;`
    Semicolon,
    /// `|`
    Pipe,
    /// A line break.
    Newline,
    /// Spaces and tabs.
    Whitespace,
    /// A comment from `#` to the end of the line.
    Comment,
    /// A control character.
    Error(char),
    /// End of input.
    Eof,
}

struct Lexer<'a> {
    chars: Chars<'a>,
    line_no: u32,
    col_no: u32,
}

impl<'a> Lexer<'a> {
    fn tokenize(bnf: &str) -> Vec<(Token, u32, u32)> {
        let mut lexer = Lexer {
            chars: bnf.chars(),
            line_no: 1,
            col_no: 1,
        };
        let mut result = vec![];
        let mut line_no = 1;
        let mut col_no = 1;
        while let Some(token) = lexer.eat_token() {
            result.push((token, line_no, col_no));
            line_no = lexer.line_no;
            col_no = lexer.col_no;
        }
        result.push((Token::Eof, line_no, col_no));
        result
    }

    fn eat_token(&mut self) -> Option<Token> {
        self.peek().map(|ch| self.eat(ch))
    }

    fn eat(&mut self, ch: char) -> Token {
        if let Some(op) = BNF_OPS.iter().find(|op| self.chars.as_str().starts_with(*op)) {
            for _ in op.chars() {
                self.advance();
            }
            return Token::BnfOp;
        }
        match ch {
            ';' => {
                self.advance();
                Token::Semicolon
            }
            '|' => {
                self.advance();
                Token::Pipe
            }
            '\n' => {
                self.advance();
                Token::Newline
            }
            '#' => {
                while self.peek().map_or(false, |ch| ch != '\n') {
                    self.advance();
                }
                Token::Comment
            }
            ch if ch.is_whitespace() => {
                self.advance();
                Token::Whitespace
            }
            ch if ch.is_control() => {
                self.advance();
                Token::Error(ch)
            }
            _ => {
                let substring = self.chars.as_str();
                while !self.at_delimiter() {
                    self.advance();
                }
                let len = substring.len() - self.chars.as_str().len();
                Token::Ident(substring[..len].to_string())
            }
        }
    }

    fn at_delimiter(&self) -> bool {
        match self.peek() {
            None => true,
            Some(ch) if ch.is_whitespace() || ch.is_control() => true,
            Some(';' | '|' | '#') => true,
            Some(_) => BNF_OPS.iter().any(|op| self.chars.as_str().starts_with(op)),
        }
    }

    fn advance(&mut self) {
        match self.chars.next() {
            Some('\n') => {
                self.line_no += 1;
                self.col_no = 1;
            }
            Some(_) => self.col_no += 1,
            None => {}
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }
}

#[derive(Clone, Debug)]
enum Value {
    Ident(String),
    Rules(Vec<RuleDescription>),
    Rhs(Vec<Vec<String>>),
    Alt(Vec<String>),
    None,
}

struct Evaluator {
    ident: Symbol,
    tokens: Vec<(Token, u32, u32)>,
}

impl forest::Eval for Evaluator {
    type Elem = Value;

    fn leaf(&self, terminal: Symbol, values: u32) -> Self::Elem {
        match self.tokens.get(values as usize) {
            Some((Token::Ident(name), _, _)) if terminal == self.ident => Value::Ident(name.clone()),
            _ => Value::None,
        }
    }

    fn product(&self, action_num: u32, args: Vec<Self::Elem>) -> Self::Elem {
        match (
            action_num,
            args.get(0).cloned().unwrap_or(Value::None),
            args.get(1).cloned().unwrap_or(Value::None),
            args.get(2).cloned().unwrap_or(Value::None),
        ) {
            // start ::= start rule;
            (2, Value::Rules(mut rules), Value::Rules(rule), _) => {
                rules.extend(rule);
                Value::Rules(rules)
            }
            // start ::= rule;
            (3, Value::Rules(rules), _, _) => Value::Rules(rules),
            // rule ::= ident bnf_op rhs terminator;
            (4, Value::Ident(lhs), _, Value::Rhs(rhs)) => Value::Rules(
                rhs.into_iter()
                    .map(|alt| RuleDescription {
                        lhs: lhs.clone(),
                        rhs: alt.join(" "),
                    })
                    .collect(),
            ),
            // rhs ::= rhs pipe alt;
            (5, Value::Rhs(mut rhs), _, Value::Alt(alt)) => {
                rhs.push(alt);
                Value::Rhs(rhs)
            }
            // rhs ::= alt;
            (6, Value::Alt(alt), _, _) => Value::Rhs(vec![alt]),
            // alt ::= alt ident;
            (7, Value::Alt(mut alt), Value::Ident(name), _) => {
                alt.push(name);
                Value::Alt(alt)
            }
            // alt ::= ident;
            (8, Value::Ident(name), _, _) => Value::Alt(vec![name]),
            _ => Value::None,
        }
    }
}

/// Checks whether the rule continues on a later line that starts with `|`.
fn continues_on_next_line(rest: &[(Token, u32, u32)]) -> bool {
    rest.iter()
        .find(|(token, _, _)| !matches!(token, Token::Newline | Token::Whitespace | Token::Comment))
        .map_or(false, |(token, _, _)| *token == Token::Pipe)
}

impl GrammarDescription {
    /// Parses a grammar from a BNF-like string.
    pub fn parse(bnf: &str) -> Result<Self, LoadError> {
        use tiny_earley::Grammar;
        let bnf_grammar = grammar! {
            S = [start, rule, rhs, alt, ident, bnf_op, pipe, terminator]
            R = {
                start ::= start rule; // 2
                start ::= rule; // 3
                rule ::= ident bnf_op rhs terminator; // 4
                rhs ::= rhs pipe alt; // 5
                rhs ::= alt; // 6
                alt ::= alt ident; // 7
                alt ::= ident; // 8
            }
        };
        #[allow(unused_variables)]
        let [start, rule, rhs, alt, ident, bnf_op, pipe, terminator] = bnf_grammar.symbols();
        let mut recognizer = Recognizer::new(&bnf_grammar);
        let tokens = Lexer::tokenize(bnf);
        let mut last_scanned: Option<Symbol> = None;
        for (i, (token, line, col)) in tokens.iter().enumerate() {
            let (line, col) = (*line, *col);
            let terminal = match token {
                Token::Whitespace | Token::Comment => continue,
                Token::Ident(_) => ident,
                Token::BnfOp => bnf_op,
                Token::Pipe => pipe,
                Token::Newline
                    if last_scanned == Some(pipe) || continues_on_next_line(&tokens[i + 1..]) =>
                {
                    continue
                }
                // Blank lines and repeated separators.
                Token::Newline | Token::Semicolon | Token::Eof
                    if last_scanned.map_or(true, |sym| sym == terminator) =>
                {
                    continue
                }
                Token::Newline | Token::Semicolon | Token::Eof => terminator,
                &Token::Error(ch) => {
                    return Err(LoadError {
                        reason: format!("unexpected character {:?}", ch),
                        line,
                        col,
                        token: Some(token.clone()),
                    })
                }
            };
            recognizer.scan(terminal, i as u32);
            if !recognizer.end_earleme() {
                return Err(LoadError {
                    reason: "parse failed".to_string(),
                    line,
                    col,
                    token: Some(token.clone()),
                });
            }
            last_scanned = Some(terminal);
        }
        let (line, col) = tokens.last().map_or((1, 1), |&(_, line, col)| (line, col));
        let finished_node = if let Some(node) = recognizer.finished_node {
            node
        } else {
            return Err(LoadError {
                reason: "expected at least one rule".to_string(),
                line,
                col,
                token: None,
            });
        };
        let result = recognizer
            .forest
            .evaluator(Evaluator { ident, tokens })
            .evaluate(finished_node);
        let rules = if let Value::Rules(rules) = result {
            rules
        } else {
            return Err(LoadError {
                reason: format!("evaluation failed: expected rules, got {:?}", result),
                line,
                col,
                token: None,
            });
        };

        let mut description = GrammarDescription {
            rules,
            ..GrammarDescription::default()
        };
        let start = match description.rules.first() {
            Some(rule) => rule.lhs.clone(),
            None => {
                return Err(LoadError {
                    reason: "expected at least one rule".to_string(),
                    line,
                    col,
                    token: None,
                })
            }
        };
        description.start = start;
        let nonterminals: Vec<String> = description.rules.iter().map(|rule| rule.lhs.clone()).collect();
        description.nonterminals.extend(nonterminals);
        let terminals: Vec<String> = description
            .rules
            .iter()
            .flat_map(|rule| rule.rhs.split_whitespace())
            .filter(|&name| name != EPSILON && !description.nonterminals.contains(name))
            .map(str::to_string)
            .collect();
        description.terminals.extend(terminals);
        log::trace!("loaded {} rules for `{}`", description.rules.len(), description.start);
        Ok(description)
    }
}

impl Cfg {
    /// Parses and builds a grammar from a BNF-like string.
    pub fn load(bnf: &str) -> Result<Cfg, Error> {
        Ok(GrammarDescription::parse(bnf)?.to_cfg()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GrammarError;

    #[test]
    fn parses_alternatives_and_comments() {
        let description = GrammarDescription::parse(
            "# balanced\nS ::= a S b | ε ;\nS -> T\n   | c\nT → t",
        )
        .unwrap();
        assert_eq!(description.start, "S");
        assert_eq!(description.nonterminals.iter().collect::<Vec<_>>(), ["S", "T"]);
        assert_eq!(description.terminals.iter().collect::<Vec<_>>(), ["a", "b", "c", "t"]);
        let rules: Vec<_> = description
            .rules
            .iter()
            .map(|rule| format!("{} {}", rule.lhs, rule.rhs))
            .collect();
        assert_eq!(rules, ["S a S b", "S ε", "S T", "S c", "T t"]);
    }

    #[test]
    fn reports_positions() {
        let err = GrammarDescription::parse("S a b").unwrap_err();
        assert_eq!((err.line, err.col), (1, 3));
        let err = GrammarDescription::parse("S ::= a | ;").unwrap_err();
        assert_eq!((err.line, err.col), (1, 11));
        assert_eq!(err.token, Some(Token::Semicolon));
        let err = GrammarDescription::parse("S ::= a \u{7}").unwrap_err();
        assert_eq!((err.line, err.col), (1, 9));
        assert_eq!(err.token, Some(Token::Error('\u{7}')));
        let err = GrammarDescription::parse("\n# nothing\n").unwrap_err();
        assert_eq!(err.reason, "expected at least one rule");
        assert_eq!(err.token, None);
    }

    #[test]
    fn joins_continuation_lines() {
        let description = GrammarDescription::parse("S ::= a |\n  b\n\n;; T ::= t\n  # c\n  | u").unwrap();
        let rules: Vec<_> = description
            .rules
            .iter()
            .map(|rule| format!("{} {}", rule.lhs, rule.rhs))
            .collect();
        assert_eq!(rules, ["S a", "S b", "T t", "T u"]);
    }

    #[test]
    fn load_checks_epsilon() {
        assert_eq!(
            Cfg::load("S ::= a ε").unwrap_err(),
            Error::Grammar(GrammarError::MisplacedEpsilon { lhs: "S".into() })
        );
    }
}
