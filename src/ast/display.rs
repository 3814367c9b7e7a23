use std::fmt::{self, Display, Formatter, Write};

use super::{
    Access, ClassDecl, Export, Expr, FunctionDecl, LiteralValue, MethodDecl, Program, Property,
    Statement,
};
use crate::util::num::format_number;

const INDENT: &str = "    ";

/// Writes statements one per line at a given nesting depth.
///
/// The output uses the Hindi keyword spellings, terminates every simple
/// statement with `;` and parenthesizes `agar`/`jabtak` conditions, so
/// parsing it again yields an equal tree.
struct Printer<'a, 'b> {
    f:     &'a mut Formatter<'b>,
    depth: usize,
}

impl Printer<'_, '_> {
    fn indent(&mut self) -> fmt::Result {
        for _ in 0..self.depth {
            self.f.write_str(INDENT)?;
        }
        Ok(())
    }

    fn line(&mut self, statement: &Statement) -> fmt::Result {
        self.indent()?;
        self.statement(statement)?;
        self.f.write_char('\n')
    }

    fn body(&mut self, statements: &[Statement]) -> fmt::Result {
        if statements.is_empty() {
            return self.f.write_str("{}");
        }
        self.f.write_str("{\n")?;
        self.depth += 1;
        for statement in statements {
            self.line(statement)?;
        }
        self.depth -= 1;
        self.indent()?;
        self.f.write_char('}')
    }

    fn function(&mut self, decl: &FunctionDecl) -> fmt::Result {
        write!(self.f, "{}({}) ", decl.name, decl.parameters.join(", "))?;
        self.body(&decl.body)
    }

    fn method(&mut self, method: &MethodDecl) -> fmt::Result {
        match method.access {
            Access::Public => {},
            Access::Private => self.f.write_str("niji ")?,
            Access::Protected => self.f.write_str("surakshit ")?,
        }
        if method.is_static {
            self.f.write_str("sthir ")?;
        }
        if method.is_constructor {
            write!(self.f, "nirmaan({}) ", method.function.parameters.join(", "))?;
            return self.body(&method.function.body);
        }
        self.function(&method.function)
    }

    fn class(&mut self, decl: &ClassDecl) -> fmt::Result {
        write!(self.f, "kaksha {}", decl.name)?;
        if let Some(parent) = &decl.superclass {
            write!(self.f, " virasat {parent}")?;
        }
        if decl.methods.is_empty() {
            return self.f.write_str(" {}");
        }
        self.f.write_str(" {\n")?;
        self.depth += 1;
        for method in &decl.methods {
            self.indent()?;
            self.method(method)?;
            self.f.write_char('\n')?;
        }
        self.depth -= 1;
        self.indent()?;
        self.f.write_char('}')
    }

    fn statement(&mut self, statement: &Statement) -> fmt::Result {
        match statement {
            Statement::VariableDeclaration { name,
                                             constant,
                                             initializer,
                                             .. } => {
                let keyword = if *constant { "pakka" } else { "rakho" };
                write!(self.f, "{keyword} {name} = {initializer};")
            },
            Statement::Function(decl) => {
                self.f.write_str("kaam ")?;
                self.function(decl)
            },
            Statement::Class(decl) => self.class(decl),
            Statement::If { condition,
                            then_branch,
                            else_branch,
                            .. } => {
                write!(self.f, "agar ({condition}) ")?;
                self.statement(then_branch)?;
                if let Some(else_branch) = else_branch {
                    self.f.write_str(" warna ")?;
                    self.statement(else_branch)?;
                }
                Ok(())
            },
            Statement::While { condition, body, .. } => {
                write!(self.f, "jabtak ({condition}) ")?;
                self.statement(body)
            },
            Statement::Return { value: Some(value),
                                .. } => write!(self.f, "wapas {value};"),
            Statement::Return { value: None, .. } => self.f.write_str("wapas;"),
            Statement::Print { value, .. } => write!(self.f, "chaap {value};"),
            Statement::Block { statements, .. } => self.body(statements),
            Statement::Expression { expr, .. } => write!(self.f, "{expr};"),
            Statement::Empty { .. } => self.f.write_char(';'),
            Statement::Import { names, source, .. } => {
                write!(self.f, "lao {{ {} }} se {};", names.join(", "), quote(source))
            },
            Statement::Export { export: Export::Declaration(declaration),
                                .. } => {
                self.f.write_str("bhejo ")?;
                self.statement(declaration)
            },
            Statement::Export { export: Export::Names(names),
                                .. } => write!(self.f, "bhejo {{ {} }};", names.join(", ")),
        }
    }
}

/// Renders a string literal with its escapes re-applied.
fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn comma_separated(f: &mut Formatter<'_>, items: &[Expr]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl Display for LiteralValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::String(s) => f.write_str(&quote(s)),
            Self::Bool(true) => f.write_str("sahi"),
            Self::Bool(false) => f.write_str("galat"),
            Self::Null => f.write_str("khali"),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal { value, .. } => write!(f, "{value}"),
            Self::Identifier { name, .. } => f.write_str(name),
            Self::Unary { op, operand, .. } => write!(f, "{op}{operand}"),
            Self::Binary { left, op, right, .. } => write!(f, "{left} {op} {right}"),
            Self::Assign { target, value, .. } => write!(f, "{target} = {value}"),
            Self::Call { callee, arguments, .. } => {
                write!(f, "{callee}(")?;
                comma_separated(f, arguments)?;
                f.write_char(')')
            },
            Self::Member { object,
                           property: Property::Named(name),
                           .. } => write!(f, "{object}.{name}"),
            Self::Member { object,
                           property: Property::Computed(index),
                           .. } => write!(f, "{object}[{index}]"),
            Self::Array { elements, .. } => {
                f.write_char('[')?;
                comma_separated(f, elements)?;
                f.write_char(']')
            },
            Self::This { .. } => f.write_str("yeh"),
            Self::Super { .. } => f.write_str("upar"),
            Self::New { class, arguments, .. } => {
                write!(f, "naya {class}(")?;
                comma_separated(f, arguments)?;
                f.write_char(')')
            },
            Self::Grouping { expr, .. } => write!(f, "({expr})"),
        }
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Printer { f, depth: 0 }.statement(self)
    }
}

impl Display for Program {
    /// Prints the program in canonical form, one top-level statement per line.
    ///
    /// # Example
    /// ```
    /// use desiscript::interpreter::parse_source;
    ///
    /// let program = parse_source("rakho x=1\nagar x>0 { chaap \"hi\" }").unwrap();
    ///
    /// assert_eq!(program.to_string(),
    ///            "rakho x = 1;\nagar (x > 0) {\n    chaap \"hi\";\n}\n");
    /// ```
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut printer = Printer { f, depth: 0 };
        if self.markers {
            printer.f.write_str("shuru\n")?;
            printer.depth = 1;
        }
        for statement in &self.body {
            printer.line(statement)?;
        }
        if self.markers {
            printer.f.write_str("khatam\n")?;
        }
        Ok(())
    }
}
