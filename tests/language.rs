use std::{fs, rc::Rc};

use desiscript::{
    Error, Session,
    error::RuntimeErrorKind,
    interpret,
    interpreter::{
        evaluator::core::{Interpreter, Limits},
        module::Modules,
        parse_source,
        value::core::Value,
    },
};
use indoc::indoc;
use pretty_assertions::assert_eq;

fn run(source: &str) -> Vec<String> {
    interpret(source).unwrap_or_else(|error| panic!("{source}\n{error}"))
}

fn runtime_error(source: &str) -> (RuntimeErrorKind, Vec<String>) {
    match interpret(source) {
        Err(Error::Runtime { error, output }) => (error.kind, output),
        other => panic!("expected a runtime error, got {other:?}"),
    }
}

fn error_message(source: &str) -> String {
    interpret(source).expect_err("program should fail").to_string()
}

#[test]
fn string_concatenation_with_numbers() {
    assert_eq!(run("rakho x = 10; chaap \"Value: \" + x;"), ["Value: 10"]);
}

#[test]
fn while_loop_sums() {
    assert_eq!(run("rakho sum=0; rakho i=0; jabtak (i<50){ sum=sum+i; i=i+1; } chaap sum;"),
               ["1225"]);
}

#[test]
fn recursive_factorial() {
    assert_eq!(run("kaam fact(n){ agar (n<=1){ wapas 1; } warna { wapas n*fact(n-1); } } chaap \
                    fact(5);"),
               ["120"]);
}

#[test]
fn out_of_range_read_is_undefined() {
    assert_eq!(run("rakho arr=[1,2,3]; chaap arr[5];"), ["undefined"]);
}

#[test]
fn division_by_zero_fails_without_output() {
    let (kind, output) = runtime_error("rakho x = 5/0;");

    assert_eq!(kind, RuntimeErrorKind::DivisionByZero);
    assert!(output.is_empty());
    assert_eq!(error_message("rakho x = 5/0;"),
               "RuntimeError: division by zero at line 1, column 12");
}

#[test]
fn modulo_by_zero_is_its_own_error() {
    assert_eq!(runtime_error("chaap 5 % 0").0, RuntimeErrorKind::ModuloByZero);
    assert_eq!(run("chaap 7 % 3\nchaap -7 % 3"), ["1", "-1"]);
}

#[test]
fn numbers_print_in_shortest_form() {
    assert_eq!(run(indoc! {"
                   chaap 10 / 4
                   chaap 0.1 + 0.2
                   chaap 3.0
                   chaap -0
                   chaap 2 * 1000000
               "}),
               ["2.5", "0.30000000000000004", "3", "0", "2000000"]);
}

#[test]
fn values_print_by_type() {
    assert_eq!(run(indoc! {r#"
                   kaam f() {}
                   chaap sahi
                   chaap galat
                   chaap khali
                   chaap [1, "two", [sahi, khali]]
                   chaap f
                   chaap f()
               "#}),
               ["true", "false", "null", "[1, \"two\", [true, null]]", "<function f>", "null"]);
}

#[test]
fn english_aliases_run_the_same_program() {
    let hindi = run(indoc! {"
        rakho n = 3
        jabtak (n > 0) { agar (n % 2 == 0 aur sahi) chaap n; warna chaap -n; n = n - 1 }
    "});
    let english = run(indoc! {"
        let n = 3
        while (n > 0) { if (n % 2 == 0 and true) print n; else print -n; n = n - 1 }
    "});

    assert_eq!(hindi, ["-3", "2", "-1"]);
    assert_eq!(english, hindi);
}

#[test]
fn block_variables_are_invisible_after_the_block() {
    let (kind, output) = runtime_error("{ rakho inner = 1; chaap inner; }\nchaap inner;");

    assert_eq!(kind, RuntimeErrorKind::UndefinedVariable("inner".into()));
    assert_eq!(output, ["1"]);
}

#[test]
fn closures_outlive_their_block() {
    let source = indoc! {"
        rakho get = khali
        {
            rakho hidden = 42
            kaam reveal() { wapas hidden }
            get = reveal
        }
        chaap get()
    "};

    assert_eq!(run(source), ["42"]);
}

#[test]
fn closures_share_and_update_captured_state() {
    let source = indoc! {"
        kaam counter() {
            rakho count = 0
            kaam next() {
                count = count + 1
                wapas count
            }
            wapas next
        }
        rakho a = counter()
        rakho b = counter()
        a()
        a()
        chaap a()
        chaap b()
    "};

    assert_eq!(run(source), ["3", "1"]);
}

#[test]
fn closures_see_the_declaring_scope_not_the_caller() {
    let source = indoc! {"
        rakho x = \"global\"
        kaam show() { chaap x }
        kaam caller() {
            rakho x = \"local\"
            show()
        }
        caller()
    "};

    assert_eq!(run(source), ["global"]);
}

#[test]
fn constant_keeps_its_value_after_failed_assignment() {
    let program = parse_source("pakka PI = 3.14159;\nPI = 1;").unwrap();
    let mut interpreter = Interpreter::new(Limits::default(), Rc::new(Modules::default()), None);

    let error = interpreter.interpret(&program).unwrap_err();

    assert_eq!(error.kind, RuntimeErrorKind::ConstantReassignment("PI".into()));
    assert_eq!(interpreter.global("PI"), Some(Value::Number(3.14159)));
}

#[test]
fn constants_cannot_be_redeclared_in_the_same_scope() {
    assert_eq!(runtime_error("pakka A = 1\nrakho A = 2").0,
               RuntimeErrorKind::ConstantReassignment("A".into()));
    assert_eq!(run("pakka A = 1\n{ pakka A = 2; chaap A; }\nchaap A"), ["2", "1"]);
}

#[test]
fn variables_may_be_redeclared() {
    assert_eq!(run("rakho a = 1\nrakho a = a + 1\nchaap a"), ["2"]);
}

#[test]
fn return_leaves_nested_blocks_and_loops() {
    let source = indoc! {"
        kaam find(items, wanted) {
            rakho i = 0
            jabtak (i < items.length) {
                agar (items[i] == wanted) {
                    { wapas i; }
                }
                i = i + 1
            }
            wapas -1
        }
        chaap find([4, 5, 6], 6)
        chaap find([4, 5, 6], 9)
    "};

    assert_eq!(run(source), ["2", "-1"]);
}

#[test]
fn missing_arguments_are_null_and_extra_ones_ignored() {
    assert_eq!(run("kaam f(a, b) { chaap a; chaap b; }\nf(1)\nf(1, 2, 3)"),
               ["1", "null", "1", "2"]);
}

#[test]
fn return_outside_a_function_fails() {
    assert_eq!(runtime_error("chaap 1\nwapas 2").0, RuntimeErrorKind::ReturnOutsideFunction);
}

#[test]
fn logical_operators_short_circuit_and_return_booleans() {
    let source = indoc! {r#"
        kaam loud() { chaap "called"; wapas sahi; }
        chaap galat aur loud()
        chaap sahi ya loud()
        chaap 0 ya "text"
        chaap 1 aur loud()
    "#};

    assert_eq!(run(source), ["false", "true", "true", "called", "true"]);
}

#[test]
fn truthiness() {
    let source = indoc! {r#"
        kaam check(v) { agar v { wapas "yes" } wapas "no" }
        chaap check(0) + check("") + check(khali) + check(galat)
        chaap check(1) + check("0") + check([]) + check(check)
    "#};

    assert_eq!(run(source), ["nononono", "yesyesyesyes"]);
}

#[test]
fn equality_is_strict() {
    let source = indoc! {r#"
        rakho a = [1]
        rakho b = a
        chaap 1 == "1"
        chaap khali == khali
        chaap a == b
        chaap a == [1]
        chaap "x" != "y"
    "#};

    assert_eq!(run(source), ["false", "true", "true", "false", "true"]);
}

#[test]
fn strings_compare_and_index() {
    let source = indoc! {r#"
        rakho s = "namaste"
        chaap s.length
        chaap s[0] + s[6]
        chaap s[10]
        chaap "apple" < "banana"
        chaap 2 >= 2
    "#};

    assert_eq!(run(source), ["7", "ne", "undefined", "true", "true"]);
}

#[test]
fn arrays_are_shared_and_grow_on_write() {
    let source = indoc! {"
        rakho a = [1]
        rakho alias = a
        alias[3] = 4
        chaap a
        chaap a.length
        rakho grid = [[1, 2], [3, 4]]
        grid[1][0] = 9
        chaap grid
    "};

    assert_eq!(run(source), ["[1, undefined, undefined, 4]", "4", "[[1, 2], [9, 4]]"]);
}

#[test]
fn arrays_print_cycles_safely() {
    assert_eq!(run("rakho a = [1]\na[1] = a\nchaap a"), ["[1, [...]]"]);
}

#[test]
fn invalid_array_writes_fail() {
    assert_eq!(runtime_error("rakho a = []\na[-1] = 1").0,
               RuntimeErrorKind::InvalidIndex("-1".into()));
    assert_eq!(runtime_error("rakho a = []\na[1.5] = 1").0,
               RuntimeErrorKind::InvalidIndex("1.5".into()));
}

#[test]
fn assignment_is_an_expression() {
    assert_eq!(run("rakho a = 1\nrakho b = a = 5\nchaap a + b"), ["10"]);
}

#[test]
fn invalid_targets_and_operands() {
    assert_eq!(error_message("1 = 2"),
               "RuntimeError: Invalid assignment target at line 1, column 3");
    assert_eq!(error_message("chaap 1 - \"a\""),
               "RuntimeError: Operands of '-' must be numbers, got number and string at line 1, \
                column 9");
    assert_eq!(error_message("chaap -\"a\""),
               "RuntimeError: Operand of '-' must be a number, got string at line 1, column 7");
    assert_eq!(runtime_error("chaap [1] < [2]").0,
               RuntimeErrorKind::InvalidOperands { operator: "<".into(),
                                                   left:     "array",
                                                   right:    "array", });
}

#[test]
fn undefined_names_and_uncallable_values() {
    assert_eq!(error_message("chaap 1;\nchaap y;"),
               "RuntimeError: 'y' is not defined at line 2, column 7");
    assert_eq!(runtime_error("rakho x = 1; x();").0, RuntimeErrorKind::NotCallable("1".into()));
    assert_eq!(runtime_error("\"abc\"()").0,
               RuntimeErrorKind::NotCallable("\"abc\"".into()));
    assert_eq!(runtime_error("y = 1").0, RuntimeErrorKind::UndefinedVariable("y".into()));
}

#[test]
fn member_access_on_null_fails() {
    assert_eq!(error_message("rakho x = khali\nchaap x.y"),
               "RuntimeError: Cannot read property 'y' of null at line 2, column 8");
    assert_eq!(runtime_error("rakho a = [1]\na[5].b = 1").0,
               RuntimeErrorKind::NullAccess { action: "set",
                                              name:   "b".into(),
                                              target: "undefined", });
}

#[test]
fn runaway_loops_stop_at_the_ceiling() {
    let (kind, output) = runtime_error("rakho i = 0\njabtak (sahi) { i = i + 1 }\nchaap i");

    assert_eq!(kind, RuntimeErrorKind::LoopLimit(1000));
    assert!(output.is_empty());
    assert_eq!(error_message("jabtak (sahi) {}"),
               "RuntimeError: possible infinite loop: exceeded 1000 iterations at line 1, column 1");
}

#[test]
fn loops_may_use_every_allowed_iteration() {
    assert_eq!(run("rakho i = 0\njabtak (i < 1000) { i = i + 1 }\nchaap i"), ["1000"]);
}

#[test]
fn the_loop_ceiling_applies_per_loop_statement() {
    let source = indoc! {"
        rakho outer = 0
        rakho total = 0
        jabtak (outer < 3) {
            rakho inner = 0
            jabtak (inner < 600) { inner = inner + 1; total = total + 1 }
            outer = outer + 1
        }
        chaap total
    "};

    assert_eq!(run(source), ["1800"]);
}

#[test]
fn runaway_recursion_stops_at_the_ceiling() {
    let (kind, _) = runtime_error("kaam f(n) { wapas f(n + 1) }\nf(0)");

    assert_eq!(kind, RuntimeErrorKind::RecursionLimit(100));
    assert_eq!(run("kaam d(n) { agar n == 0 { wapas 0 } wapas 1 + d(n - 1) }\nchaap d(99)"),
               ["99"]);
}

#[test]
fn recursion_below_the_ceiling_survives_nested_blocks() {
    let source = indoc! {"
        kaam g(n) {
            agar (n > 0) {
                jabtak (sahi) { wapas g(n - 1) + 1; }
            }
            wapas 0;
        }
        chaap g(99);
    "};

    assert_eq!(run(source), ["99"]);
    assert_eq!(run("kaam g(n){ agar (n>0) { wapas g(n-1)+1; } wapas 0; } chaap g(99);"),
               ["99"]);
}

#[test]
fn raised_call_ceiling_allows_deep_recursion() {
    let session = Session::new().max_call_depth(3000);
    let source = "kaam g(n) { agar (n > 0) { wapas g(n - 1) + 1 } wapas 0 }\nchaap g(2000)";

    assert_eq!(session.run(source).unwrap(), ["2000"]);
}

#[test]
fn deeply_nested_expressions_evaluate() {
    let source = format!("chaap {}1{};", "(".repeat(300), ")".repeat(300));
    let negations = format!("chaap {}5", "-".repeat(1000));

    assert_eq!(run(&source), ["1"]);
    assert_eq!(run(&negations), ["5"]);
}

#[test]
fn brackets_on_a_new_line_start_a_new_statement() {
    let source = indoc! {"
        rakho b = 1
        rakho a = b
        [1, 2].length
        kaam f() { wapas 7 }
        rakho g = f
        (f)()
        chaap a
        chaap g()
    "};

    assert_eq!(run(source), ["1", "7"]);
}

#[test]
fn session_limits_are_configurable() {
    let session = Session::new().max_loop_iterations(3).max_call_depth(5);

    let Err(Error::Runtime { error, output }) =
        session.run("rakho i = 0\njabtak (sahi) { chaap i; i = i + 1 }")
    else {
        panic!("loop should hit the ceiling");
    };
    assert_eq!(error.kind, RuntimeErrorKind::LoopLimit(3));
    assert_eq!(output, ["0", "1", "2"]);

    let Err(Error::Runtime { error, .. }) = session.run("kaam f() { wapas f() }\nf()") else {
        panic!("recursion should hit the ceiling");
    };
    assert_eq!(error.kind, RuntimeErrorKind::RecursionLimit(5));
}

#[test]
fn interpreter_state_recovers_after_an_error_inside_a_call() {
    let program = parse_source("rakho x = 1\nkaam f() { rakho x = 2; wapas 1 / 0 }\nf()").unwrap();
    let mut interpreter = Interpreter::new(Limits::default(), Rc::new(Modules::default()), None);

    assert!(interpreter.interpret(&program).is_err());

    let follow_up = parse_source("chaap x").unwrap();
    interpreter.interpret(&follow_up).unwrap();
    assert_eq!(interpreter.output(), ["1"]);
}

#[test]
fn compile_errors_prevent_any_output() {
    let error = interpret("chaap 1\nchaap (2").unwrap_err();

    assert!(matches!(error, Error::Compile(_)));
    assert!(error.output().is_empty());
}

#[test]
fn readme_examples_work() {
    let readme = fs::read_to_string("README.md").expect("README.md should be readable");
    let blocks = extract_desi_blocks(&readme);

    assert!(!blocks.is_empty(), "No desi examples found in README.md");
    for (i, code) in blocks.iter().enumerate() {
        if let Err(e) = interpret(code) {
            panic!("README example {} failed:\n{}\nError: {}", i + 1, code, e);
        }
    }
}

fn extract_desi_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```desi") {
            inside = true;
            buf.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(buf.clone());
            continue;
        }
        if inside {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}
