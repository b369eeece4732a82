//! End-to-end tests driving the whole pipeline (scan → parse → interpret)
//! through `run::run` with an in-memory output sink.

mod language_tests {
    use loxrs::interpreter::Interpreter;
    use loxrs::run::{self, RunOutcome};

    /// Run `source` against a fresh interpreter; return captured `print`
    /// output and the outcome.
    fn run_capture(source: &str) -> (String, RunOutcome) {
        let mut out: Vec<u8> = Vec::new();
        let outcome = {
            let mut interpreter = Interpreter::new(&mut out);

            run::run(source.as_bytes(), &mut interpreter)
        };

        (String::from_utf8(out).expect("output is UTF-8"), outcome)
    }

    fn run_ok(source: &str) -> String {
        let (output, outcome) = run_capture(source);

        assert!(
            matches!(outcome, RunOutcome::Success),
            "expected success, got {:?}",
            outcome
        );

        output
    }

    fn runtime_error(source: &str) -> (String, String) {
        let (output, outcome) = run_capture(source);

        match outcome {
            RunOutcome::RuntimeError(e) => (output, e.to_string()),
            other => panic!("expected runtime error, got {:?}", other),
        }
    }

    // ── arithmetic & values ────────────────────────────────────────────

    #[test]
    fn precedence_and_associativity() {
        assert_eq!(run_ok("print 1 + 2 * 3;"), "7\n");
        assert_eq!(run_ok("print 10 - 2 - 3;"), "5\n");
        assert_eq!(run_ok("print (1 + 2) * 3;"), "9\n");
        assert_eq!(run_ok("print 2 * 3 + 4 / 2;"), "8\n");
    }

    #[test]
    fn numeric_print_formatting() {
        assert_eq!(run_ok("print 3.0;"), "3\n");
        assert_eq!(run_ok("print 3.5;"), "3.5\n");
        assert_eq!(run_ok("print 100;"), "100\n");
        assert_eq!(run_ok("print -0.25;"), "-0.25\n");
    }

    #[test]
    fn division_by_zero_is_ieee_not_an_error() {
        assert_eq!(run_ok("print 1 / 0;"), "inf\n");
        assert_eq!(run_ok("print -1 / 0;"), "-inf\n");
        assert_eq!(run_ok("print 0 / 0;"), "NaN\n");
    }

    #[test]
    fn string_concatenation() {
        assert_eq!(run_ok("print \"foo\" + \"bar\";"), "foobar\n");
    }

    #[test]
    fn mixed_plus_is_a_runtime_error() {
        let (output, message) = runtime_error("print \"n = \" + 1;");

        assert_eq!(output, "");
        assert_eq!(
            message,
            "[line 1] Error at '+': Operands must be two numbers or two strings."
        );
    }

    #[test]
    fn comparison_requires_numbers() {
        let (_, message) = runtime_error("print \"a\" < \"b\";");

        assert!(message.contains("Operands must be numbers."));
    }

    #[test]
    fn unary_operators() {
        assert_eq!(run_ok("print -(-3);"), "3\n");
        assert_eq!(run_ok("print !nil;"), "true\n");
        assert_eq!(run_ok("print !0;"), "false\n");

        let (_, message) = runtime_error("print -\"oops\";");
        assert_eq!(
            message,
            "[line 1] Error at '-': Operand must be a number."
        );
    }

    #[test]
    fn equality_is_structural_and_never_crosses_kinds() {
        assert_eq!(run_ok("print 1 == \"1\";"), "false\n");
        assert_eq!(run_ok("print nil == nil;"), "true\n");
        assert_eq!(run_ok("print nil == false;"), "false\n");
        assert_eq!(run_ok("print \"a\" != \"b\";"), "true\n");
        assert_eq!(run_ok("print 2 == 2.0;"), "true\n");
    }

    // ── truthiness & control flow ──────────────────────────────────────

    #[test]
    fn zero_and_empty_string_are_truthy() {
        assert_eq!(
            run_ok("if (0) print \"zero\"; if (\"\") print \"empty\"; if (nil) print \"nil\";"),
            "zero\nempty\n"
        );
    }

    #[test]
    fn if_without_else_skips_falsy_condition() {
        assert_eq!(run_ok("if (false) print \"then\";"), "");
        assert_eq!(
            run_ok("if (false) print \"then\"; else print \"else\";"),
            "else\n"
        );
    }

    #[test]
    fn while_loop_counts_down() {
        assert_eq!(
            run_ok("var n = 3; while (n > 0) { print n; n = n - 1; }"),
            "3\n2\n1\n"
        );
    }

    #[test]
    fn for_loop_prints_each_iteration() {
        assert_eq!(
            run_ok("for (var i = 0; i < 3; i = i + 1) print i;"),
            "0\n1\n2\n"
        );
    }

    #[test]
    fn for_loop_variable_is_scoped_to_the_loop() {
        let (output, message) =
            runtime_error("for (var i = 0; i < 3; i = i + 1) print i;\nprint i;");

        assert_eq!(output, "0\n1\n2\n");
        assert_eq!(
            message,
            "[line 2] Error at 'i': Undefined variable 'i'."
        );
    }

    #[test]
    fn logical_operators_short_circuit() {
        assert_eq!(
            run_ok("var a = 1; false and (a = 2); print a; true or (a = 3); print a;"),
            "1\n1\n"
        );
    }

    #[test]
    fn logical_operators_yield_the_operand_value() {
        assert_eq!(run_ok("print nil or \"hi\";"), "hi\n");
        assert_eq!(run_ok("print false and 1;"), "false\n");
        assert_eq!(run_ok("print 0 and 2;"), "2\n");
    }

    // ── variables & scoping ────────────────────────────────────────────

    #[test]
    fn uninitialized_variable_defaults_to_nil() {
        assert_eq!(run_ok("var a; print a;"), "nil\n");
    }

    #[test]
    fn redeclaration_in_the_same_scope_replaces_the_value() {
        assert_eq!(run_ok("var a = 1; var a = 2; print a;"), "2\n");
    }

    #[test]
    fn shadowing_does_not_touch_the_outer_binding() {
        assert_eq!(
            run_ok("var a = 1; { var a = 2; print a; } print a;"),
            "2\n1\n"
        );
    }

    #[test]
    fn assignment_in_a_block_mutates_the_enclosing_binding() {
        assert_eq!(run_ok("var a = 1; { a = 2; } print a;"), "2\n");
    }

    #[test]
    fn chained_assignment_yields_the_assigned_value() {
        assert_eq!(
            run_ok("var a = 0; var b = 0; a = b = 5; print a; print b;"),
            "5\n5\n"
        );
    }

    #[test]
    fn assignment_never_creates_a_binding() {
        let (output, message) = runtime_error("a = 1;");

        assert_eq!(output, "");
        assert_eq!(message, "[line 1] Error at 'a': Undefined variable 'a'.");
    }

    #[test]
    fn reading_an_undeclared_variable_is_a_runtime_error() {
        let (_, message) = runtime_error("print missing;");

        assert_eq!(
            message,
            "[line 1] Error at 'missing': Undefined variable 'missing'."
        );
    }

    // ── error-state semantics ──────────────────────────────────────────

    #[test]
    fn runtime_error_halts_remaining_statements() {
        let (output, _) = runtime_error("print 1; print missing; print 2;");

        assert_eq!(output, "1\n");
    }

    #[test]
    fn parse_errors_skip_evaluation_entirely() {
        let (output, outcome) = run_capture("print 1; var;");

        assert_eq!(output, "");
        match outcome {
            RunOutcome::StaticError(errors) => assert_eq!(errors.len(), 1),
            other => panic!("expected static error, got {:?}", other),
        }
    }

    #[test]
    fn lex_errors_also_skip_evaluation() {
        let (output, outcome) = run_capture("print 1;\n#");

        assert_eq!(output, "");
        assert!(matches!(outcome, RunOutcome::StaticError(_)));
    }

    #[test]
    fn two_malformed_statements_yield_two_diagnostics() {
        let (_, outcome) = run_capture("var 1;\nprint;\n");

        match outcome {
            RunOutcome::StaticError(errors) => assert_eq!(errors.len(), 2),
            other => panic!("expected static errors, got {:?}", other),
        }
    }

    #[test]
    fn block_scope_is_restored_after_a_runtime_error() {
        // Reuse one interpreter across two runs, prompt-style: the failed
        // block in the first run must not leak its frame into the second.
        let mut out: Vec<u8> = Vec::new();
        let mut interpreter = Interpreter::new(&mut out);

        let first = run::run(b"var a = 1; { var a = 2; print missing; }", &mut interpreter);
        assert!(matches!(first, RunOutcome::RuntimeError(_)));

        let second = run::run(b"print a;", &mut interpreter);
        assert!(matches!(second, RunOutcome::Success));

        drop(interpreter);
        assert_eq!(String::from_utf8(out).unwrap(), "1\n");
    }
}
