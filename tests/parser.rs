mod parser_tests {
    use loxrs::ast_printer::AstPrinter;
    use loxrs::error::LoxError;
    use loxrs::parser::Parser;
    use loxrs::scanner::Scanner;
    use loxrs::token::Token;

    fn scan(source: &str) -> Vec<Token<'_>> {
        Scanner::new(source.as_bytes())
            .collect::<Result<Vec<_>, _>>()
            .expect("source should scan cleanly")
    }

    /// Parse a program and render each statement in prefix form.
    fn parse_to_prefix(source: &str) -> String {
        let tokens = scan(source);
        let statements = Parser::new(&tokens)
            .parse()
            .expect("source should parse cleanly");

        statements
            .iter()
            .map(AstPrinter::print_stmt)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Parse a program expected to fail; return its diagnostics.
    fn parse_errors(source: &str) -> Vec<LoxError> {
        let tokens = scan(source);

        Parser::new(&tokens)
            .parse()
            .err()
            .expect("source should fail to parse")
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(parse_to_prefix("1 + 2 * 3;"), "(expr (+ 1.0 (* 2.0 3.0)))");
    }

    #[test]
    fn subtraction_is_left_associative() {
        assert_eq!(parse_to_prefix("1 - 2 - 3;"), "(expr (- (- 1.0 2.0) 3.0))");
    }

    #[test]
    fn grouping_overrides_precedence() {
        assert_eq!(
            parse_to_prefix("(1 + 2) * 3;"),
            "(expr (* (group (+ 1.0 2.0)) 3.0))"
        );
    }

    #[test]
    fn unary_operators_nest() {
        assert_eq!(parse_to_prefix("!!true;"), "(expr (! (! true)))");
        assert_eq!(parse_to_prefix("--1;"), "(expr (- (- 1.0)))");
    }

    #[test]
    fn comparison_below_term() {
        assert_eq!(
            parse_to_prefix("1 + 2 < 3 + 4;"),
            "(expr (< (+ 1.0 2.0) (+ 3.0 4.0)))"
        );
    }

    #[test]
    fn equality_below_comparison() {
        assert_eq!(
            parse_to_prefix("1 < 2 == true;"),
            "(expr (== (< 1.0 2.0) true))"
        );
    }

    #[test]
    fn or_binds_looser_than_and() {
        assert_eq!(
            parse_to_prefix("a or b and c;"),
            "(expr (or a (and b c)))"
        );
    }

    #[test]
    fn assignment_is_right_associative() {
        assert_eq!(parse_to_prefix("a = b = 1;"), "(expr (= a (= b 1.0)))");
    }

    #[test]
    fn var_declaration_with_and_without_initializer() {
        assert_eq!(parse_to_prefix("var x = 5;"), "(var x 5.0)");
        assert_eq!(parse_to_prefix("var x;"), "(var x)");
    }

    #[test]
    fn else_binds_to_nearest_if() {
        assert_eq!(
            parse_to_prefix("if (a) if (b) c; else d;"),
            "(if a (if b (expr c) (expr d)))"
        );
    }

    #[test]
    fn while_statement() {
        assert_eq!(
            parse_to_prefix("while (a < 3) print a;"),
            "(while (< a 3.0) (print a))"
        );
    }

    #[test]
    fn for_desugars_to_block_and_while() {
        assert_eq!(
            parse_to_prefix("for (var i = 0; i < 3; i = i + 1) print i;"),
            "(block (var i 0.0) (while (< i 3.0) (block (print i) (expr (= i (+ i 1.0))))))"
        );
    }

    #[test]
    fn for_with_empty_clauses_is_a_bare_while_true() {
        assert_eq!(
            parse_to_prefix("for (;;) print 1;"),
            "(while true (print 1.0))"
        );
    }

    #[test]
    fn for_without_initializer_has_no_outer_block() {
        assert_eq!(
            parse_to_prefix("for (; i < 3;) print i;"),
            "(while (< i 3.0) (print i))"
        );
    }

    #[test]
    fn block_statement_owns_children() {
        assert_eq!(
            parse_to_prefix("{ var a = 1; print a; }"),
            "(block (var a 1.0) (print a))"
        );
    }

    #[test]
    fn invalid_assignment_target_keeps_left_expression() {
        let errors = parse_errors("a + b = c;");

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "[line 1] Error at '=': Invalid assignment target."
        );
    }

    #[test]
    fn recovery_surfaces_multiple_errors_in_one_run() {
        let errors = parse_errors("var 1;\nprint;\n");

        assert_eq!(errors.len(), 2);
        assert!(errors[0].to_string().contains("Expected variable name."));
        assert!(errors[1].to_string().contains("Expected expression."));
    }

    #[test]
    fn recovery_resumes_at_statement_keyword() {
        // The first statement is malformed mid-expression; the var
        // declaration after it must still parse (and it is the only
        // diagnostic-free one, so exactly one error surfaces).
        let errors = parse_errors("print 1 + ;\nvar x = 2;");

        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn error_at_end_of_file() {
        let errors = parse_errors("1 +");

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "[line 1] Error at end of file: Expected expression."
        );
    }

    #[test]
    fn missing_semicolon_is_anchored_on_the_next_token() {
        let errors = parse_errors("print 1\nvar x = 2;");

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "[line 2] Error at 'var': Expected ';' after value."
        );
    }
}
