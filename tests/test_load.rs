use cfg_cnf::{Cfg, Error, GrammarDescription, GrammarError, NamedCfgRule, Token};
use test_case::test_case;

mod support;

#[test]
fn test_load_and_print() {
    support::init_logger();
    let cfg = Cfg::load(
        "# arithmetic\n\
         Expr ::= Expr plus Term | Term ;\n\
         Term -> num\n\
              | lparen Expr rparen\n\
         Empty → ε",
    )
    .unwrap();

    assert_eq!(cfg.name_of(cfg.start()), "Expr");
    assert_eq!(cfg.num_rules(), 5);
    assert_eq!(
        cfg.to_string(),
        "Expr → Expr plus Term\n\
         Expr → Term\n\
         Term → num\n\
         Term → lparen Expr rparen\n\
         Empty → ε\n"
    );
    assert_eq!(
        cfg.stringify_grouped(),
        "Expr → Expr plus Term | Term\n\
         Term → num | lparen Expr rparen\n\
         Empty → ε\n"
    );
    assert_eq!(
        cfg.named_rules()[4],
        NamedCfgRule::new("Empty", "ε")
    );
    let num = cfg.sym("num").unwrap();
    assert!(cfg.is_terminal(num));
    assert!(cfg.is_nonterminal(cfg.sym("Empty").unwrap()));
}

#[test_case("S a b", 1, 3, Token::Ident("a".into()) ; "missing operator")]
#[test_case("S ::= a |", 1, 10, Token::Eof ; "empty alternative")]
#[test_case("S ::= a\n::= b", 2, 1, Token::BnfOp ; "missing left-hand side")]
#[test_case("S ::= a ::= b", 1, 9, Token::BnfOp ; "operator in right-hand side")]
#[test_case("S ::= a\n;| b", 2, 2, Token::Pipe ; "alternative after a finished rule")]
fn test_load_errors(bnf: &str, line: u32, col: u32, token: Token) {
    match Cfg::load(bnf) {
        Err(Error::Load(err)) => {
            assert_eq!((err.line, err.col), (line, col), "{}", err);
            assert_eq!(err.token, Some(token));
        }
        other => panic!("expected a load error, got {:?}", other),
    }
}

#[test]
fn test_load_error_display() {
    let err = GrammarDescription::parse("S ::= a ::= b").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Parse error at line 1 column 9: reason: parse failed token: Some(BnfOp)"
    );
}

#[test]
fn test_description_errors_are_reported() {
    let err = GrammarDescription::new("S")
        .nonterminals(["S"])
        .terminals(["a"])
        .rule("S", "a B")
        .to_cfg()
        .unwrap_err();
    assert_eq!(
        err,
        GrammarError::MalformedReference {
            lhs: "S".into(),
            symbol: "B".into()
        }
    );
    assert_eq!(err.to_string(), "rule for `S` refers to undeclared symbol `B`");

    let err = Error::from(err);
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_builder_grammar_is_validated() {
    let mut cfg = Cfg::new("S");
    let [a] = cfg.terminals(["a"]);
    cfg.rule(a).rhs([a]);
    assert_eq!(
        cfg.normalize().unwrap_err(),
        GrammarError::TerminalOnLhs { lhs: "a".into() }
    );

    let mut cfg = Cfg::new("S");
    let [start] = cfg.nonterminals(["S"]);
    let undeclared = cfg.sym_source().intern("U");
    cfg.rule(start).rhs([undeclared]);
    assert_eq!(
        cfg.normalize().unwrap_err(),
        GrammarError::MalformedReference {
            lhs: "S".into(),
            symbol: "U".into()
        }
    );
}
