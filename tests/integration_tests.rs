// Front-end robustness tests
//
// Every case runs the scanner and the parser over a snippet and checks that
// it is accepted or rejected, and that nothing panics on the way.

use loxpp::{parse, scan, Stmt};

/// Test result for a single test case
#[derive(Debug)]
pub enum TestResult {
    Pass,
    Fail(String),
    Crash(String),
}

/// Individual test case
#[derive(Debug, Clone)]
pub struct TestCase {
    pub name: String,
    pub input: String,
    pub should_succeed: bool,
    pub expected_error_contains: Option<String>,
}

/// Test suite containing multiple test cases
#[derive(Debug)]
pub struct TestSuite {
    pub name: String,
    pub tests: Vec<TestCase>,
}

impl TestSuite {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tests: Vec::new(),
        }
    }

    pub fn add_test(&mut self, test: TestCase) {
        self.tests.push(test);
    }

    /// Run all tests in this suite
    pub fn run(&self) -> TestSuiteResults {
        let mut results = TestSuiteResults::new(&self.name);
        
        println!("Running test suite: {}", self.name);
        println!("{}", "=".repeat(50));

        for test in &self.tests {
            let result = run_single_test(test);
            results.add_result(&test.name, result);
        }

        results.print_summary();
        results
    }
}

/// Results for a test suite run
#[derive(Debug)]
pub struct TestSuiteResults {
    pub suite_name: String,
    pub results: Vec<(String, TestResult)>,
    pub passed: usize,
    pub failed: usize,
    pub crashed: usize,
}

impl TestSuiteResults {
    pub fn new(suite_name: &str) -> Self {
        Self {
            suite_name: suite_name.to_string(),
            results: Vec::new(),
            passed: 0,
            failed: 0,
            crashed: 0,
        }
    }

    pub fn add_result(&mut self, test_name: &str, result: TestResult) {
        match &result {
            TestResult::Pass => {
                self.passed += 1;
                println!("  ✓ {}", test_name);
            }
            TestResult::Fail(msg) => {
                self.failed += 1;
                println!("  ✗ {}: {}", test_name, msg);
            }
            TestResult::Crash(msg) => {
                self.crashed += 1;
                println!("  💥 {}: CRASHED - {}", test_name, msg);
            }
        }
        self.results.push((test_name.to_string(), result));
    }

    pub fn print_summary(&self) {
        println!();
        println!("Test Suite: {} - Summary", self.suite_name);
        println!("{}", "-".repeat(30));
        println!("Passed:  {}", self.passed);
        println!("Failed:  {}", self.failed);
        println!("Crashed: {}", self.crashed);
        println!("Total:   {}", self.results.len());
        
        if self.crashed > 0 {
            println!("\n⚠️  WARNING: {} tests caused crashes! The front end must never panic.", self.crashed);
        }
        
        if self.failed > 0 {
            println!("\n❌ {} tests had unexpected results.", self.failed);
        }
        
        if self.crashed == 0 && self.failed == 0 {
            println!("\n✅ All tests passed! The front end is robust.");
        }
        println!();
    }

    pub fn is_all_passed(&self) -> bool {
        self.crashed == 0 && self.failed == 0
    }
}

/// Run a single test case
fn run_single_test(test: &TestCase) -> TestResult {
    // Catch any panics to detect crashes
    let result = std::panic::catch_unwind(|| parse_input(&test.input));

    match result {
        Ok(parse_result) => match (parse_result, test.should_succeed) {
            (Ok(_), true) => TestResult::Pass,
            (Ok(_), false) => {
                TestResult::Fail("Expected parsing to fail, but it succeeded".to_string())
            }
            (Err(error), false) => {
                // Check if error contains expected text
                if let Some(expected) = &test.expected_error_contains {
                    if error.message.contains(expected) {
                        TestResult::Pass
                    } else {
                        TestResult::Fail(format!(
                            "Error message '{}' doesn't contain expected text '{}'",
                            error.message, expected
                        ))
                    }
                } else {
                    TestResult::Pass // Any error is acceptable
                }
            }
            (Err(error), true) => TestResult::Fail(format!(
                "Expected parsing to succeed, but got error: {}",
                error.message
            )),
        },
        Err(panic_info) => {
            let panic_msg = if let Some(s) = panic_info.downcast_ref::<String>() {
                s.clone()
            } else if let Some(s) = panic_info.downcast_ref::<&str>() {
                s.to_string()
            } else {
                "Unknown panic".to_string()
            };
            TestResult::Crash(panic_msg)
        }
    }
}

/// The first error met while scanning or parsing.
#[derive(Debug)]
struct FrontEndError {
    message: String,
}

/// Scan and parse input. Scan errors win over parse errors, as in the runner.
fn parse_input(input: &str) -> Result<Vec<Stmt>, FrontEndError> {
    let (tokens, scan_errors) = scan(input);
    if let Some(error) = scan_errors.first() {
        return Err(FrontEndError {
            message: error.to_string(),
        });
    }

    let parsed = parse(tokens);
    match parsed.errors.first() {
        Some(error) => Err(FrontEndError {
            message: error.to_string(),
        }),
        None => Ok(parsed.statements),
    }
}

/// Test case builder for convenience
impl TestCase {
    pub fn should_succeed(name: &str, input: &str) -> Self {
        Self {
            name: name.to_string(),
            input: input.to_string(),
            should_succeed: true,
            expected_error_contains: None,
        }
    }

    pub fn should_fail(name: &str, input: &str) -> Self {
        Self {
            name: name.to_string(),
            input: input.to_string(),
            should_succeed: false,
            expected_error_contains: None,
        }
    }

    pub fn should_fail_with_message(name: &str, input: &str, expected_msg: &str) -> Self {
        Self {
            name: name.to_string(),
            input: input.to_string(),
            should_succeed: false,
            expected_error_contains: Some(expected_msg.to_string()),
        }
    }
}

// ============================================================================
// Test Suite Creation Functions
// ============================================================================

fn create_malformed_expressions_tests() -> TestSuite {
    let mut suite = TestSuite::new("Malformed Expressions");

    // === PARENTHESES TESTS ===

    suite.add_test(TestCase::should_fail_with_message(
        "unmatched_opening_paren",
        "(1 + 2;",
        "Expected ')' after expression",
    ));

    suite.add_test(TestCase::should_fail_with_message(
        "unmatched_opening_paren_nested",
        "((1 + 2);",
        "Expected ')' after expression",
    ));

    suite.add_test(TestCase::should_fail_with_message(
        "unmatched_opening_paren_complex",
        "(1 + (2 * 3);",
        "Expected ')' after expression",
    ));

    suite.add_test(TestCase::should_fail_with_message(
        "unmatched_closing_paren",
        "1 + 2);",
        "Expected ';' after expression",
    ));

    suite.add_test(TestCase::should_fail_with_message(
        "empty_parentheses",
        "();",
        "Expected expression",
    ));

    suite.add_test(TestCase::should_fail_with_message(
        "empty_parentheses_in_expression",
        "1 + ();",
        "Expected expression",
    ));

    // === BRACE TESTS ===

    // Blocks are not part of the grammar
    suite.add_test(TestCase::should_fail_with_message(
        "brace_block",
        "{ x = 1; }",
        "Expected expression",
    ));

    suite
}

fn create_edge_case_tests() -> TestSuite {
    let mut suite = TestSuite::new("Edge Cases");

    // Empty input
    suite.add_test(TestCase::should_succeed("empty_input", ""));

    // Only whitespace
    suite.add_test(TestCase::should_succeed("only_whitespace", "   \n\t  "));

    // Only comments
    suite.add_test(TestCase::should_succeed(
        "only_comments",
        "// line\n/* block\n comment */",
    ));
    suite.add_test(TestCase::should_succeed(
        "unterminated_block_comment",
        "1; /* never closed",
    ));

    // EOF conditions
    suite.add_test(TestCase::should_fail("unexpected_eof_after_operator", "1 +"));
    suite.add_test(TestCase::should_fail("unexpected_eof_in_expression", "1 + ("));
    suite.add_test(TestCase::should_fail_with_message(
        "missing_semicolon_at_eof",
        "1 + 2",
        "Expected ';' after expression",
    ));

    // Very deeply nested expressions
    let deep_parens = "(".repeat(100) + "1" + &")".repeat(100) + ";";
    suite.add_test(TestCase::should_succeed("deeply_nested_parens", &deep_parens));
    let runaway_parens = "(\n".repeat(10_000) + "1" + &"\n)".repeat(10_000) + ";";
    suite.add_test(TestCase::should_fail_with_message(
        "runaway_nested_parens",
        &runaway_parens,
        "Expression nested too deeply",
    ));
    let runaway_negation = "!\n".repeat(50_000) + "true;";
    suite.add_test(TestCase::should_fail_with_message(
        "runaway_prefix_operators",
        &runaway_negation,
        "Expression nested too deeply",
    ));

    suite
}

fn create_operator_tests() -> TestSuite {
    let mut suite = TestSuite::new("Operator Tests");

    // Missing operands
    suite.add_test(TestCase::should_fail("missing_left_operand", "+ 1;"));
    suite.add_test(TestCase::should_fail_with_message(
        "missing_right_operand",
        "1 +;",
        "Expected expression after '+'",
    ));
    suite.add_test(TestCase::should_fail("missing_both_operands", "+;"));
    suite.add_test(TestCase::should_fail_with_message(
        "missing_right_comparison",
        "1 <;",
        "Expected expression after '<'",
    ));

    // Invalid operator combinations
    suite.add_test(TestCase::should_fail_with_message(
        "double_plus",
        "1 ++ 2;",
        "Expected expression after '+'",
    ));
    // Unary minus makes these valid
    suite.add_test(TestCase::should_succeed("double_minus", "1 -- 2;")); // 1 - (-2)
    suite.add_test(TestCase::should_succeed("mixed_operators", "1 +- 2;")); // 1 + (-2)

    // Comparison operators
    suite.add_test(TestCase::should_succeed("comparison_equal", "1 == 2;"));
    suite.add_test(TestCase::should_succeed("comparison_not_equal", "1 != 2;"));
    suite.add_test(TestCase::should_succeed("comparison_less", "1 < 2;"));
    suite.add_test(TestCase::should_succeed("comparison_greater", "1 > 2;"));
    suite.add_test(TestCase::should_succeed("comparison_less_equal", "1 <= 2;"));
    suite.add_test(TestCase::should_succeed("comparison_greater_equal", "1 >= 2;"));

    // Logical keywords are reserved but not operators
    suite.add_test(TestCase::should_fail("and_keyword", "true and false;"));

    suite
}

fn create_ternary_tests() -> TestSuite {
    let mut suite = TestSuite::new("Ternary Tests");

    suite.add_test(TestCase::should_succeed("simple_ternary", "1 ? 2 : 3;"));
    suite.add_test(TestCase::should_succeed("nested_ternary", "a ? b : c ? d : e;"));
    suite.add_test(TestCase::should_succeed("ternary_in_branch", "a ? b ? c : d : e;"));
    suite.add_test(TestCase::should_succeed("grouped_ternary", "(1 ? 2 : 3) + 4;"));
    suite.add_test(TestCase::should_fail_with_message(
        "missing_colon",
        "1 ? 2;",
        "Expected ':' to finish the ternary operator",
    ));
    suite.add_test(TestCase::should_fail("missing_condition", "? 1 : 2;"));
    suite.add_test(TestCase::should_fail("missing_else_branch", "1 ? 2 :;"));

    suite
}

fn create_statement_tests() -> TestSuite {
    let mut suite = TestSuite::new("Statement Tests");

    // Declarations
    suite.add_test(TestCase::should_succeed("bare_declaration", "var x;"));
    suite.add_test(TestCase::should_succeed("initialized_declaration", "var x = 1;"));
    suite.add_test(TestCase::should_fail_with_message(
        "declaration_without_name",
        "var = 1;",
        "Expected a variable name",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "declaration_with_number_name",
        "var 1 = 2;",
        "Expected a variable name",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "declaration_without_semicolon",
        "var x = 1",
        "Expected ';' after variable declaration",
    ));

    // Print
    suite.add_test(TestCase::should_succeed("print_value", "print 1;"));
    suite.add_test(TestCase::should_fail_with_message(
        "print_nothing",
        "print;",
        "Expected expression",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "print_without_semicolon",
        "print 1",
        "Expected ';' after value",
    ));

    // Control flow is not part of the grammar
    suite.add_test(TestCase::should_fail("if_statement", "if (true) x = 1;"));
    suite.add_test(TestCase::should_fail("while_statement", "while (true) x = 1;"));
    suite.add_test(TestCase::should_fail("function_declaration", "fun f() {}"));

    suite
}

fn create_literal_tests() -> TestSuite {
    let mut suite = TestSuite::new("Literal Tests");

    // Valid literals
    suite.add_test(TestCase::should_succeed("integer_literal", "42;"));
    suite.add_test(TestCase::should_succeed("double_literal", "3.14;"));
    suite.add_test(TestCase::should_succeed("string_literal", "\"hello\";"));
    suite.add_test(TestCase::should_succeed("multiline_string", "\"hello\nworld\";"));
    suite.add_test(TestCase::should_succeed("boolean_true", "true;"));
    suite.add_test(TestCase::should_succeed("boolean_false", "false;"));
    suite.add_test(TestCase::should_succeed("nil_literal", "nil;"));

    // Invalid number formats
    suite.add_test(TestCase::should_fail("multiple_dots", "3.14.159;"));
    suite.add_test(TestCase::should_fail("trailing_dot", "42.;"));
    suite.add_test(TestCase::should_fail("leading_dot", ".42;"));

    // Unterminated strings
    suite.add_test(TestCase::should_fail_with_message(
        "unterminated_string",
        "\"hello",
        "Unterminated string",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "unterminated_string_with_newline",
        "\"hello\nworld",
        "Unterminated string",
    ));

    // Characters outside the language
    suite.add_test(TestCase::should_fail_with_message(
        "unknown_character",
        "1 @ 2;",
        "Unknown token '@'",
    ));

    suite
}

fn create_assignment_tests() -> TestSuite {
    let mut suite = TestSuite::new("Assignment Tests");

    // Valid assignments
    suite.add_test(TestCase::should_succeed("simple_assignment", "x = 1;"));
    suite.add_test(TestCase::should_succeed("assignment_with_expression", "x = 1 + 2;"));
    suite.add_test(TestCase::should_succeed("chained_assignment", "a = b = 3;"));

    // Invalid assignments
    suite.add_test(TestCase::should_fail("missing_value", "x =;"));
    suite.add_test(TestCase::should_fail_with_message(
        "invalid_target",
        "1 = x;",
        "Invalid assignment target",
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "grouped_target",
        "(a) = 3;",
        "Invalid assignment target",
    ));

    suite
}

fn create_positive_tests() -> TestSuite {
    let mut suite = TestSuite::new("Positive Tests");

    // These tests verify that valid syntax still parses correctly
    suite.add_test(TestCase::should_succeed("simple_arithmetic", "1 + 2 * 3;"));
    suite.add_test(TestCase::should_succeed("parentheses", "(1 + 2) * 3;"));
    suite.add_test(TestCase::should_succeed("variable_assignment", "x = 42;"));
    suite.add_test(TestCase::should_succeed(
        "string_concatenation",
        "\"hello\" + \" world\";",
    ));
    suite.add_test(TestCase::should_succeed("negation", "!true == false;"));
    suite.add_test(TestCase::should_succeed("unary_minus_group", "-(1 - 2);"));
    suite.add_test(TestCase::should_succeed(
        "program",
        "var sum = 2 + 3; // five\nsum = sum * 2;\nprint sum > 9 ? \"big\" : \"small\";",
    ));

    suite
}

// ============================================================================
// Main Test Function
// ============================================================================

#[test]
fn comprehensive_parser_tests() {
    println!("🧪 Lox++ Front-End Robustness Test Suite");
    println!("=========================================\n");

    let mut all_passed = true;

    // Run each test suite
    let suites = vec![
        create_malformed_expressions_tests(),
        create_edge_case_tests(),
        create_operator_tests(),
        create_ternary_tests(),
        create_statement_tests(),
        create_literal_tests(),
        create_assignment_tests(),
        create_positive_tests(),
    ];

    for suite in suites {
        let results = suite.run();
        if !results.is_all_passed() {
            all_passed = false;
        }
    }

    if all_passed {
        println!("🎉 ALL TESTS PASSED! The front end handles all edge cases gracefully.");
    }
    assert!(all_passed, "some front-end cases failed, see output above");
}
