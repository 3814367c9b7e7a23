use desiscript::{
    ast::{
        Access, BinaryOperator, Export, Expr, LiteralValue, Program, Property, Span, Statement,
        UnaryOperator,
    },
    error::{CompileErrorKind, Diagnostics},
    interpreter::parse_source,
    util::position::Position,
};
use indoc::indoc;
use pretty_assertions::assert_eq;

fn parse(source: &str) -> Program {
    parse_source(source).unwrap_or_else(|diagnostics| panic!("{source}\n{diagnostics}"))
}

fn errors(source: &str) -> Diagnostics {
    parse_source(source).expect_err("source should not parse")
}

fn messages(source: &str) -> Vec<String> {
    errors(source).iter().map(ToString::to_string).collect()
}

fn number(n: f64) -> Expr {
    Expr::Literal { value: LiteralValue::Number(n),
                    span:  Span::default(), }
}

fn ident(name: &str) -> Expr {
    Expr::Identifier { name: name.to_string(),
                       span: Span::default(), }
}

fn binary(left: Expr, op: BinaryOperator, right: Expr) -> Expr {
    Expr::Binary { left: Box::new(left),
                   op,
                   right: Box::new(right),
                   span: Span::default() }
}

fn printed(source: &str) -> Expr {
    match parse(source).body.into_iter().next() {
        Some(Statement::Print { value, .. }) => value,
        other => panic!("expected a print statement, got {other:?}"),
    }
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_eq!(printed("chaap 1 + 2 * 3"),
               binary(number(1.0),
                      BinaryOperator::Add,
                      binary(number(2.0), BinaryOperator::Mul, number(3.0))));
}

#[test]
fn binary_operators_are_left_associative() {
    assert_eq!(printed("chaap 10 - 4 - 3"),
               binary(binary(number(10.0), BinaryOperator::Sub, number(4.0)),
                      BinaryOperator::Sub,
                      number(3.0)));
}

#[test]
fn logical_operators_have_the_lowest_binary_precedence() {
    assert_eq!(printed("chaap a ya b aur c == d"),
               binary(ident("a"),
                      BinaryOperator::Or,
                      binary(ident("b"),
                             BinaryOperator::And,
                             binary(ident("c"), BinaryOperator::Equal, ident("d")))));
}

#[test]
fn unary_operators_nest_to_the_right() {
    assert_eq!(printed("chaap nahi -x"),
               Expr::Unary { op:      UnaryOperator::Not,
                             operand: Box::new(Expr::Unary { op:      UnaryOperator::Negate,
                                                             operand: Box::new(ident("x")),
                                                             span:    Span::default(), }),
                             span:    Span::default(), });
}

#[test]
fn assignment_is_right_associative() {
    let Statement::Expression { expr, .. } = &parse("a = b = 3").body[0] else {
        panic!("expected an expression statement");
    };
    let Expr::Assign { target, value, .. } = expr else {
        panic!("expected an assignment");
    };

    assert_eq!(**target, ident("a"));
    assert!(matches!(**value, Expr::Assign { .. }));
}

#[test]
fn postfix_operators_chain() {
    let row = Expr::Member { object:   Box::new(ident("grid")),
                             property: Property::Computed(Box::new(number(0.0))),
                             span:     Span::default(), };
    let method = Expr::Member { object:   Box::new(row),
                                property: Property::Named("show".into()),
                                span:     Span::default(), };
    let call = Expr::Call { callee:    Box::new(method),
                            arguments: vec![number(1.0)],
                            span:      Span::default(), };

    assert_eq!(printed("chaap grid[0].show(1)"), call);
}

#[test]
fn keywords_are_allowed_as_property_names() {
    assert_eq!(printed("chaap printer.print"),
               Expr::Member { object:   Box::new(ident("printer")),
                              property: Property::Named("print".into()),
                              span:     Span::default(), });
}

#[test]
fn new_without_arguments_may_drop_the_parentheses() {
    assert_eq!(parse("rakho a = naya A"), parse("rakho a = naya A()"));
}

#[test]
fn conditions_parse_with_or_without_parentheses() {
    assert_eq!(parse("agar x > 1 { chaap x }"), parse("agar (x > 1) { chaap x; }"));
    assert_eq!(parse("jabtak i < 3 { i = i + 1 }"), parse("jabtak (i < 3) { i = i + 1; }"));
}

#[test]
fn else_if_chains_nest_in_the_else_branch() {
    let program = parse(indoc! {r#"
        agar (x < 0) { chaap "neg"; }
        warna agar (x == 0) { chaap "zero"; }
        warna { chaap "pos"; }
    "#});

    let Statement::If { else_branch: Some(else_branch), .. } = &program.body[0] else {
        panic!("expected an if with an else branch");
    };
    assert!(matches!(**else_branch, Statement::If { else_branch: Some(_), .. }));
}

#[test]
fn return_without_value() {
    let program = parse("kaam f() {\n  wapas\n}");
    let Statement::Function(decl) = &program.body[0] else {
        panic!("expected a function");
    };

    assert!(matches!(decl.body[0], Statement::Return { value: None, .. }));
}

#[test]
fn class_methods_carry_modifiers() {
    let program = parse(indoc! {"
        kaksha B virasat A {
            nirmaan(x) { upar(x); }
            niji secret() { wapas 1; }
            surakshit sthir helper() {}
            kaam plain() {}
            static() { wapas 2; }
        }
    "});
    let Statement::Class(class) = &program.body[0] else {
        panic!("expected a class");
    };
    let summary: Vec<_> = class.methods
                               .iter()
                               .map(|m| (m.name(), m.access, m.is_static, m.is_constructor))
                               .collect();

    assert_eq!(class.superclass.as_deref(), Some("A"));
    assert_eq!(summary,
               vec![("constructor", Access::Public, false, true),
                    ("secret", Access::Private, false, false),
                    ("helper", Access::Protected, true, false),
                    ("plain", Access::Public, false, false),
                    ("static", Access::Public, false, false)]);
}

#[test]
fn import_and_export_forms() {
    let program = parse(indoc! {r#"
        lao { PI, square } se "./math";
        bhejo pakka TAU = 2 * PI;
        bhejo { square };
    "#});

    assert!(matches!(&program.body[0],
                     Statement::Import { names, source, .. }
                     if names == &["PI", "square"] && source == "./math"));
    assert!(matches!(&program.body[1],
                     Statement::Export { export: Export::Declaration(_), .. }));
    assert!(matches!(&program.body[2],
                     Statement::Export { export: Export::Names(names), .. } if names == &["square"]));
}

#[test]
fn newline_ends_a_statement() {
    let program = parse("rakho x = 1\nchaap x\nx = x + 1");
    assert_eq!(program.body.len(), 3);
}

#[test]
fn statements_on_one_line_need_a_semicolon() {
    assert_eq!(messages("rakho x = 1 chaap x"),
               vec!["CompileError: Expected ';' after variable declaration, found 'chaap' at \
                     line 1, column 13"]);
}

#[test]
fn markers_wrap_the_program() {
    let program = parse("shuru\nrakho x = 1\nchaap x\nkhatam\n");

    assert!(program.markers);
    assert_eq!(program.body.len(), 2);
    assert!(!parse("chaap 1").markers);
}

#[test]
fn marker_errors_abort_the_parse() {
    let kinds = |source: &str| -> Vec<CompileErrorKind> {
        errors(source).iter().map(|error| error.kind.clone()).collect()
    };

    assert_eq!(kinds("shuru\nchaap 1\n"), vec![CompileErrorKind::MissingProgramEnd]);
    assert_eq!(kinds("chaap 1\nkhatam"), vec![CompileErrorKind::MissingProgramStart]);
    assert_eq!(kinds("shuru\nshuru\nkhatam"), vec![CompileErrorKind::DuplicateProgramStart]);
    assert_eq!(kinds("shuru\nkhatam\nchaap 1"),
               vec![CompileErrorKind::TrailingTokens("'chaap'".into())]);
}

#[test]
fn missing_end_marker_points_at_end_of_input() {
    let diagnostics = errors("shuru\nchaap 1\n");

    assert_eq!(diagnostics.first().and_then(|error| error.position),
               Some(Position::new(3, 1)));
}

#[test]
fn recovery_reports_every_broken_statement() {
    let source = indoc! {"
        rakho = 1;
        chaap 2;
        rakho y 3;
        chaap (4;
        chaap 5;
    "};

    assert_eq!(messages(source),
               vec!["CompileError: Expected variable name, found '=' at line 1, column 7",
                    "CompileError: Expected '=' after variable name, found '3' at line 3, column \
                     9",
                    "CompileError: Expected ')' after expression, found ';' at line 4, column 9"]);
}

#[test]
fn recovery_inside_blocks_keeps_parsing_the_block() {
    let source = indoc! {"
        kaam f() {
            rakho = 1;
            chaap 2;
            )
        }
        chaap 3;
    "};

    let diagnostics = errors(source);
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics.iter()
                          .map(|error| error.position.map(|p| p.line))
                          .collect::<Vec<_>>(),
               vec![Some(2), Some(4)]);
}

#[test]
fn import_and_export_only_at_top_level() {
    assert_eq!(messages("agar (sahi) {\n  lao { a } se \"m\";\n}")[0],
               "CompileError: 'lao' is only allowed at the top level at line 2, column 3");
    assert_eq!(errors("kaam f() { bhejo { f }; }").first().map(|e| e.kind.clone()),
               Some(CompileErrorKind::TopLevelOnly("bhejo".into())));
}

#[test]
fn unclosed_block_is_reported() {
    assert_eq!(messages("kaam f() {\n  chaap 1;\n"),
               vec!["CompileError: Expected '}' after function body, found end of input at line \
                     3, column 1"]);
}

#[test]
fn lexical_errors_come_through_parse_source() {
    assert_eq!(messages("chaap #"),
               vec!["CompileError: Unexpected character '#' at line 1, column 7"]);
}

#[test]
fn printed_programs_parse_back_to_the_same_tree() {
    let sources = [indoc! {r#"
                       shuru
                       rakho x = 10
                       pakka name = "Ra\"m\n"
                       chaap "Value: " + x
                       agar x > 5 aur nahi (x == 7) { chaap sahi } warna agar x < 0 chaap galat; warna { }
                       jabtak (x > 0) { x = x - 1; ; }
                       khatam
                   "#},
                   indoc! {"
                       kaam outer(a, b) {
                           rakho inner = [a, [b, khali], -a * (b + 1)]
                           kaam helper() { wapas }
                           wapas inner[1][0] % 2
                       }
                       chaap outer(1, 2).length
                   "},
                   indoc! {r#"
                       kaksha Animal {
                           nirmaan(name) { yeh.name = name; }
                           speak() { wapas yeh.name + " makes a sound"; }
                           niji sthir count() { wapas 0; }
                       }
                       kaksha Dog virasat Animal {
                           surakshit speak() { wapas upar.speak() + "!"; }
                       }
                       kaksha Empty {}
                       chaap naya Dog("Rex").speak()
                   "#},
                   indoc! {r#"
                       lao { a, b } se "./lib";
                       bhejo kaam f(x) { wapas x; }
                       bhejo { a };
                       bhejo kaksha K {}
                   "#}];

    for source in sources {
        let program = parse(source);
        let printed = program.to_string();
        let reparsed = parse(&printed);

        assert_eq!(reparsed, program, "round trip of:\n{printed}");
        assert_eq!(reparsed.to_string(), printed);
    }
}

#[test]
fn canonical_form_uses_hindi_keywords() {
    let program = parse(indoc! {r#"
        class A extends B {
            constructor(x) { super(x); }
            private static make() { return new A(1); }
        }
        let ok = true and not false
    "#});

    assert_eq!(program.to_string(),
               indoc! {"
                   kaksha A virasat B {
                       nirmaan(x) {
                           upar(x);
                       }
                       niji sthir make() {
                           wapas naya A(1);
                       }
                   }
                   rakho ok = sahi aur !galat;
               "});
}

#[test]
fn an_error_on_the_closing_brace_leaves_the_block_closed() {
    assert_eq!(messages("kaam f() { rakho x = }\nchaap 1;"),
               vec!["CompileError: Unexpected token '}' at line 1, column 22"]);
    assert_eq!(messages("agar sahi { rakho y = }\nchaap 2;\nrakho = 3;"),
               vec!["CompileError: Unexpected token '}' at line 1, column 23",
                    "CompileError: Expected variable name, found '=' at line 3, column 7"]);
}

#[test]
fn stray_closing_brace_at_top_level_is_skipped() {
    assert_eq!(messages("chaap 1;\n}\nchaap 2;").len(), 1);
}

#[test]
fn deeply_nested_parentheses_parse() {
    let depth = 2000;
    let program = parse(&format!("chaap {}1{};", "(".repeat(depth), ")".repeat(depth)));

    let mut expr = printed_expr(&program);
    let mut levels = 0;
    while let Expr::Grouping { expr: inner, .. } = expr {
        expr = &**inner;
        levels += 1;
    }
    assert_eq!(levels, depth);
    assert_eq!(*expr, number(1.0));
}

#[test]
fn deeply_nested_blocks_parse() {
    let depth = 1000;
    let program = parse(&format!("{}chaap 1{}", "{ ".repeat(depth), " }".repeat(depth)));

    assert_eq!(program.body.len(), 1);
}

#[test]
fn call_and_index_do_not_continue_on_the_next_line() {
    let program = parse("rakho a = b\n[1, 2].length\nf\n(g)\nobj\n  .method()");

    assert_eq!(program.body.len(), 5);
    assert!(matches!(&program.body[4],
                     Statement::Expression { expr: Expr::Call { .. }, .. }));
}

fn printed_expr(program: &Program) -> &Expr {
    match program.body.first() {
        Some(Statement::Print { value, .. }) => value,
        other => panic!("expected a print statement, got {other:?}"),
    }
}
