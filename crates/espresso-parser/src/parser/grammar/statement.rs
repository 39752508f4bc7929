use crate::arena::NodeId;
use crate::parser::grammar::{declaration, expression, name, pattern, ty};
use crate::parser::{NodeKind, Parser};
use crate::Error;
use crate::TokenKind;
use crate::T;

/// See: JLS §14.2
pub(crate) fn block(p: &mut Parser) -> Result<NodeId, Error> {
    let node = p.start_node(NodeKind::Block);
    p.expect(T!['{'])?;
    while !p.at(T!['}']) && !p.at(TokenKind::Eof) {
        statement(p)?;
    }
    p.expect(T!['}'])?;
    p.finish_node(node);
    Ok(node)
}

/// See: JLS §14.5
pub(crate) fn statement(p: &mut Parser) -> Result<(), Error> {
    p.enter()?;
    let result = statement_inner(p);
    p.exit();
    result
}

fn statement_inner(p: &mut Parser) -> Result<(), Error> {
    match p.peek() {
        T!['{'] => {
            block(p)?;
            Ok(())
        }
        T![;] => {
            p.leaf(NodeKind::EmptyStatement)?;
            Ok(())
        }
        T![if] => if_statement(p),
        T![for] => for_statement(p),
        T![while] => while_statement(p),
        T![do] => do_statement(p),
        T![switch] => switch_statement(p),
        T![try] => try_statement(p),
        T![synchronized] if p.peek_n(1) == T!['('] => synchronized_statement(p),
        T![return] => {
            let node = p.start_node(NodeKind::ReturnStatement);
            p.bump()?;
            if can_start_expression(p.peek()) {
                expression::expression(p)?;
            }
            p.expect(T![;])?;
            p.finish_node(node);
            Ok(())
        }
        T![throw] => {
            let node = p.start_node(NodeKind::ThrowStatement);
            p.bump()?;
            expression::expression(p)?;
            p.expect(T![;])?;
            p.finish_node(node);
            Ok(())
        }
        T![yield] if yields_a_value(p) => {
            let node = p.start_node(NodeKind::YieldStatement);
            p.bump()?;
            expression::expression(p)?;
            p.expect(T![;])?;
            p.finish_node(node);
            Ok(())
        }
        T![break] => {
            let node = p.start_node(NodeKind::BreakStatement);
            p.bump()?;
            if p.at_identifier() {
                name::identifier(p)?;
            }
            p.expect(T![;])?;
            p.finish_node(node);
            Ok(())
        }
        T![continue] => {
            let node = p.start_node(NodeKind::ContinueStatement);
            p.bump()?;
            if p.at_identifier() {
                name::identifier(p)?;
            }
            p.expect(T![;])?;
            p.finish_node(node);
            Ok(())
        }
        T![assert] => {
            let node = p.start_node(NodeKind::AssertStatement);
            p.bump()?;
            expression::expression(p)?;
            if p.at(T![:]) {
                p.bump()?;
                expression::expression(p)?;
            }
            p.expect(T![;])?;
            p.finish_node(node);
            Ok(())
        }
        kind if Parser::is_identifier_like(kind) && p.peek_n(1) == T![:] => {
            let node = p.start_node(NodeKind::LabeledStatement);
            name::identifier(p)?;
            p.bump()?;
            statement(p)?;
            p.finish_node(node);
            Ok(())
        }
        _ => {
            if declaration::at_type_declaration(p) {
                // Local class, interface, enum or record.
                declaration::type_declaration(p)?;
                return Ok(());
            }
            expression_or_variable_declaration(p)
        }
    }
}

/// `yield` heads a yield statement unless it is being used as a plain
/// identifier: an assignment target, call, member access or postfix
/// increment of a variable named `yield`.
fn yields_a_value(p: &Parser) -> bool {
    let next = p.peek_n(1);
    if next.is_assignment_operator()
        || matches!(next, T![.] | T![::] | T!['('] | T!['['] | T![;] | T![++] | T![--])
    {
        return false;
    }
    can_start_expression(next)
}

fn can_start_expression(kind: TokenKind) -> bool {
    kind.is_literal()
        || kind.is_primitive_type()
        || Parser::is_identifier_like(kind)
        || matches!(
            kind,
            T!['('] | T![this]
                | T![super]
                | T![new]
                | T![switch]
                | T![void]
                | T![!]
                | T![~]
                | T![+]
                | T![-]
                | T![++]
                | T![--]
        )
}

fn if_statement(p: &mut Parser) -> Result<(), Error> {
    let node = p.start_node(NodeKind::IfStatement);
    p.expect(T![if])?;
    p.expect(T!['('])?;
    expression::expression(p)?;
    p.expect(T![')'])?;
    statement(p)?;
    if p.at(T![else]) {
        p.bump()?;
        statement(p)?;
    }
    p.finish_node(node);
    Ok(())
}

fn while_statement(p: &mut Parser) -> Result<(), Error> {
    let node = p.start_node(NodeKind::WhileStatement);
    p.expect(T![while])?;
    p.expect(T!['('])?;
    expression::expression(p)?;
    p.expect(T![')'])?;
    statement(p)?;
    p.finish_node(node);
    Ok(())
}

fn do_statement(p: &mut Parser) -> Result<(), Error> {
    let node = p.start_node(NodeKind::DoStatement);
    p.expect(T![do])?;
    statement(p)?;
    p.expect(T![while])?;
    p.expect(T!['('])?;
    expression::expression(p)?;
    p.expect(T![')'])?;
    p.expect(T![;])?;
    p.finish_node(node);
    Ok(())
}

/// See: JLS §14.14
///
/// Enhanced vs. classic `for` is decided by a bounded trial of
/// `[modifiers] Type Identifier :` after the opening paren; the trial is
/// rolled back either way and the winning form re-parses cleanly.
fn for_statement(p: &mut Parser) -> Result<(), Error> {
    let checkpoint = p.checkpoint();
    p.bump()?;
    p.expect(T!['('])?;
    let enhanced = (|| -> Result<bool, Error> {
        declaration::modifiers(p)?;
        ty::ty(p)?;
        if !p.at_identifier() {
            return Ok(false);
        }
        p.bump()?;
        while p.at(T!['[']) && p.peek_n(1) == T![']'] {
            p.bump()?;
            p.bump()?;
        }
        Ok(p.at(T![:]))
    })()
    .unwrap_or(false);
    p.rewind(checkpoint);

    if enhanced {
        enhanced_for_statement(p)
    } else {
        classic_for_statement(p)
    }
}

fn enhanced_for_statement(p: &mut Parser) -> Result<(), Error> {
    let node = p.start_node(NodeKind::EnhancedForStatement);
    p.expect(T![for])?;
    p.expect(T!['('])?;

    let variable = p.start_node(NodeKind::Parameter);
    declaration::modifiers(p)?;
    ty::ty(p)?;
    name::identifier(p)?;
    while p.at(T!['[']) && p.peek_n(1) == T![']'] {
        p.bump()?;
        p.bump()?;
    }
    p.finish_node(variable);

    p.expect(T![:])?;
    expression::expression(p)?;
    p.expect(T![')'])?;
    statement(p)?;
    p.finish_node(node);
    Ok(())
}

fn classic_for_statement(p: &mut Parser) -> Result<(), Error> {
    let node = p.start_node(NodeKind::ForStatement);
    p.expect(T![for])?;
    p.expect(T!['('])?;

    // Init: a local variable declaration or an expression list; either
    // way the first `;` is consumed here.
    if p.at(T![;]) {
        p.bump()?;
    } else {
        let checkpoint = p.checkpoint();
        if local_variable_declaration(p).is_err() {
            p.rewind(checkpoint);
            loop {
                expression::expression(p)?;
                if p.at(T![,]) {
                    p.bump()?;
                    continue;
                }
                break;
            }
            p.expect(T![;])?;
        }
    }

    if !p.at(T![;]) {
        expression::expression(p)?;
    }
    p.expect(T![;])?;

    if !p.at(T![')']) {
        loop {
            expression::expression(p)?;
            if p.at(T![,]) {
                p.bump()?;
                continue;
            }
            break;
        }
    }
    p.expect(T![')'])?;
    statement(p)?;
    p.finish_node(node);
    Ok(())
}

fn switch_statement(p: &mut Parser) -> Result<(), Error> {
    let node = p.start_node(NodeKind::SwitchStatement);
    p.expect(T![switch])?;
    p.expect(T!['('])?;
    expression::expression(p)?;
    p.expect(T![')'])?;
    switch_block(p)?;
    p.finish_node(node);
    Ok(())
}

/// See: JLS §14.11.1
///
/// The brace-enclosed case list, shared between switch statements and
/// switch expressions. Arrow and colon cases may mix arities but not
/// styles; style mixing is a semantic error left to later stages.
pub(crate) fn switch_block(p: &mut Parser) -> Result<(), Error> {
    p.expect(T!['{'])?;
    while !p.at(T!['}']) && !p.at(TokenKind::Eof) {
        switch_case(p)?;
    }
    p.expect(T!['}'])?;
    Ok(())
}

fn switch_case(p: &mut Parser) -> Result<(), Error> {
    let node = p.start_node(NodeKind::SwitchCase);
    match p.peek() {
        T![case] => {
            p.bump()?;
            case_labels(p)?;
        }
        T![default] => {
            p.leaf(NodeKind::DefaultLabel)?;
        }
        _ => return Err(p.err("expected 'case' or 'default'")),
    }

    if p.at(T![->]) {
        p.bump()?;
        match p.peek() {
            T!['{'] => {
                block(p)?;
            }
            T![throw] => {
                statement(p)?;
            }
            _ => {
                expression::expression(p)?;
                p.expect(T![;])?;
            }
        }
    } else {
        p.expect(T![:])?;
        while !matches!(p.peek(), T![case] | T![default] | T!['}'] | TokenKind::Eof) {
            statement(p)?;
        }
    }

    p.finish_node(node);
    Ok(())
}

fn case_labels(p: &mut Parser) -> Result<(), Error> {
    loop {
        case_label(p)?;
        if p.at(T![,]) {
            p.bump()?;
            continue;
        }
        break;
    }

    if p.at(T![when]) {
        let guard = p.start_node(NodeKind::Guard);
        p.bump()?;
        expression::expression(p)?;
        p.finish_node(guard);
    }
    Ok(())
}

/// A single case label: the `null` label, the `default` combinator, a
/// pattern, or a constant expression. Patterns are tried first and
/// rolled back when what follows shows the label was an expression
/// (e.g. `case Integer.MAX_VALUE:`).
fn case_label(p: &mut Parser) -> Result<(), Error> {
    match p.peek() {
        TokenKind::NullLiteral => {
            p.leaf(NodeKind::NullLabel)?;
        }
        T![default] => {
            p.leaf(NodeKind::DefaultLabel)?;
        }
        _ => {
            let checkpoint = p.checkpoint();
            let pattern_ok = pattern::pattern(p).is_ok()
                && matches!(p.peek(), T![,] | T![->] | T![:] | T![when]);
            if !pattern_ok {
                p.rewind(checkpoint);
                expression::conditional(p)?;
            }
        }
    }
    Ok(())
}

/// See: JLS §14.20
fn try_statement(p: &mut Parser) -> Result<(), Error> {
    let node = p.start_node(NodeKind::TryStatement);
    p.expect(T![try])?;
    if p.at(T!['(']) {
        resources(p)?;
    }
    block(p)?;
    while p.at(T![catch]) {
        catch_clause(p)?;
    }
    if p.at(T![finally]) {
        p.bump()?;
        block(p)?;
    }
    p.finish_node(node);
    Ok(())
}

fn resources(p: &mut Parser) -> Result<(), Error> {
    p.expect(T!['('])?;
    while !p.at(T![')']) && !p.at(TokenKind::Eof) {
        resource(p)?;
        if p.at(T![;]) {
            p.bump()?;
        } else {
            break;
        }
    }
    p.expect(T![')'])?;
    Ok(())
}

/// A resource: either a fresh declaration `Type name = expr` or a
/// reference to an effectively-final variable.
fn resource(p: &mut Parser) -> Result<(), Error> {
    let node = p.start_node(NodeKind::Resource);
    let checkpoint = p.checkpoint();
    let declared = (|| -> Result<(), Error> {
        declaration::modifiers(p)?;
        ty::ty(p)?;
        name::identifier(p)?;
        p.expect(T![=])?;
        expression::expression(p)?;
        Ok(())
    })();
    if declared.is_err() {
        p.rewind(checkpoint);
        expression::expression(p)?;
    }
    p.finish_node(node);
    Ok(())
}

fn catch_clause(p: &mut Parser) -> Result<(), Error> {
    let node = p.start_node(NodeKind::CatchClause);
    p.expect(T![catch])?;
    p.expect(T!['('])?;

    let formal = p.start_node(NodeKind::Parameter);
    declaration::modifiers(p)?;
    ty::catch_type(p)?;
    name::identifier(p)?;
    p.finish_node(formal);

    p.expect(T![')'])?;
    block(p)?;
    p.finish_node(node);
    Ok(())
}

fn synchronized_statement(p: &mut Parser) -> Result<(), Error> {
    let node = p.start_node(NodeKind::SynchronizedStatement);
    p.expect(T![synchronized])?;
    p.expect(T!['('])?;
    expression::expression(p)?;
    p.expect(T![')'])?;
    block(p)?;
    p.finish_node(node);
    Ok(())
}

/// See: JLS §14.4
pub(crate) fn local_variable_declaration(p: &mut Parser) -> Result<(), Error> {
    let node = p.start_node(NodeKind::LocalVariableDeclaration);
    declaration::modifiers(p)?;
    ty::ty(p)?;
    if !p.at_identifier() {
        return Err(p.err("expected a variable name"));
    }
    loop {
        declaration::variable_declarator(p)?;
        if p.at(T![,]) {
            p.bump()?;
            continue;
        }
        break;
    }
    p.expect(T![;])?;
    p.finish_node(node);
    Ok(())
}

/// Expression statement vs. local variable declaration, disambiguated
/// by a trial parse that backtracks on failure. Obvious declarations
/// (primitive type, `final`, annotation, `var name`) commit directly so
/// their errors point at the real problem.
fn expression_or_variable_declaration(p: &mut Parser) -> Result<(), Error> {
    let obvious = p.at(T![final])
        || p.at(T![@])
        || (p.peek().is_primitive_type() && Parser::is_identifier_like(p.peek_n(1)))
        || (p.at(T![var]) && Parser::is_identifier_like(p.peek_n(1)));
    if obvious {
        return local_variable_declaration(p);
    }

    let checkpoint = p.checkpoint();
    match local_variable_declaration(p) {
        Ok(()) => Ok(()),
        Err(_) => {
            p.rewind(checkpoint);
            expression_statement(p)
        }
    }
}

fn expression_statement(p: &mut Parser) -> Result<(), Error> {
    let node = p.start_node(NodeKind::ExpressionStatement);
    expression::expression(p)?;
    p.expect(T![;])?;
    p.finish_node(node);
    Ok(())
}

#[cfg(test)]
mod test {
    use crate::{NodeKind, ParseResult, Parser};

    fn parse(source: &str) -> crate::SyntaxTree {
        match Parser::new(source).parse() {
            ParseResult::Success(tree) => tree,
            ParseResult::Failure(failure) => panic!("{}", failure.format_message(None)),
        }
    }

    fn count(tree: &crate::SyntaxTree, kind: NodeKind) -> usize {
        tree.descendants(tree.root())
            .filter(|&id| tree.node(id).kind() == kind)
            .count()
    }

    fn body_tree(body: &str) -> crate::SyntaxTree {
        parse(&format!("class C {{ void m() {{ {body} }} }}"))
    }

    #[test]
    fn classic_and_enhanced_for() {
        let tree = body_tree("for (int i = 0; i < 10; i++) { } for (String s : names) { }");
        assert_eq!(count(&tree, NodeKind::ForStatement), 1);
        assert_eq!(count(&tree, NodeKind::EnhancedForStatement), 1);
    }

    #[test]
    fn for_with_expression_init_and_multiple_updates() {
        let tree = body_tree("for (i = 0, j = n; i < j; i++, j--) { }");
        assert_eq!(count(&tree, NodeKind::ForStatement), 1);
        assert_eq!(count(&tree, NodeKind::AssignmentExpression), 2);
    }

    #[test]
    fn bare_for_header() {
        let tree = body_tree("for (;;) { break; }");
        assert_eq!(count(&tree, NodeKind::ForStatement), 1);
        assert_eq!(count(&tree, NodeKind::BreakStatement), 1);
    }

    #[test]
    fn if_else_chain() {
        let tree = body_tree("if (a) x(); else if (b) y(); else z();");
        assert_eq!(count(&tree, NodeKind::IfStatement), 2);
    }

    #[test]
    fn while_and_do_while() {
        let tree = body_tree("while (running) { tick(); } do { tick(); } while (running);");
        assert_eq!(count(&tree, NodeKind::WhileStatement), 1);
        assert_eq!(count(&tree, NodeKind::DoStatement), 1);
    }

    #[test]
    fn try_with_resources_both_forms() {
        let tree = body_tree(
            "try (var in = open(); out) { io(); } catch (IOException | RuntimeException e) { } finally { done(); }",
        );
        assert_eq!(count(&tree, NodeKind::TryStatement), 1);
        assert_eq!(count(&tree, NodeKind::Resource), 2);
        assert_eq!(count(&tree, NodeKind::CatchClause), 1);
        assert_eq!(count(&tree, NodeKind::UnionType), 1);
    }

    #[test]
    fn labeled_break_and_continue() {
        let tree = body_tree("outer: for (;;) { for (;;) { if (a) break outer; continue outer; } }");
        assert_eq!(count(&tree, NodeKind::LabeledStatement), 1);
        assert_eq!(count(&tree, NodeKind::BreakStatement), 1);
        assert_eq!(count(&tree, NodeKind::ContinueStatement), 1);
    }

    #[test]
    fn assert_with_and_without_detail() {
        let tree = body_tree("assert x > 0; assert y != null : \"y required\";");
        assert_eq!(count(&tree, NodeKind::AssertStatement), 2);
    }

    #[test]
    fn synchronized_statement() {
        let tree = body_tree("synchronized (lock) { counter++; }");
        assert_eq!(count(&tree, NodeKind::SynchronizedStatement), 1);
    }

    #[test]
    fn switch_statement_with_colon_and_arrow_cases() {
        let arrow = body_tree("switch (x) { case 1 -> a(); case 2, 3 -> b(); default -> c(); }");
        assert_eq!(count(&arrow, NodeKind::SwitchStatement), 1);
        assert_eq!(count(&arrow, NodeKind::SwitchCase), 3);

        let colon = body_tree("switch (x) { case 1: a(); break; default: c(); }");
        assert_eq!(count(&colon, NodeKind::SwitchCase), 2);
    }

    #[test]
    fn switch_expression_with_guarded_pattern_and_null_default() {
        let tree = body_tree(
            "Object o = switch (v) { case Integer i when i > 0 -> i; case null, default -> 0; };",
        );
        assert_eq!(count(&tree, NodeKind::SwitchExpression), 1);
        assert_eq!(count(&tree, NodeKind::SwitchCase), 2);
        assert_eq!(count(&tree, NodeKind::TypePattern), 1);
        assert_eq!(count(&tree, NodeKind::Guard), 1);
        assert_eq!(count(&tree, NodeKind::NullLabel), 1);
        assert_eq!(count(&tree, NodeKind::DefaultLabel), 1);
    }

    #[test]
    fn switch_case_constant_qualified_name_is_expression_label() {
        let tree = body_tree("switch (x) { case Integer.MAX_VALUE: break; default: break; }");
        assert_eq!(count(&tree, NodeKind::TypePattern), 0);
        assert_eq!(count(&tree, NodeKind::FieldAccess), 1);
    }

    #[test]
    fn yield_statement_inside_switch_expression() {
        let tree = body_tree("int x = switch (k) { default -> { yield 42; } };");
        assert_eq!(count(&tree, NodeKind::YieldStatement), 1);
    }

    #[test]
    fn yield_as_plain_identifier_stays_an_expression() {
        let tree = body_tree("yield = 5; yield.close(); yield(1); yield++; yield--;");
        assert_eq!(count(&tree, NodeKind::YieldStatement), 0);
        assert_eq!(count(&tree, NodeKind::ExpressionStatement), 5);
        assert_eq!(count(&tree, NodeKind::PostfixExpression), 2);
    }

    #[test]
    fn local_type_declarations() {
        let tree = body_tree("class Local { } record Pair(int a, int b) { } interface I { }");
        assert_eq!(count(&tree, NodeKind::ClassDeclaration), 1 + 1);
        assert_eq!(count(&tree, NodeKind::RecordDeclaration), 1);
        assert_eq!(count(&tree, NodeKind::InterfaceDeclaration), 1);
    }

    #[test]
    fn declaration_vs_expression_disambiguation() {
        let tree = body_tree("a.b.C d = e; a.b.c(d);");
        assert_eq!(count(&tree, NodeKind::LocalVariableDeclaration), 1);
        assert_eq!(count(&tree, NodeKind::ExpressionStatement), 1);
        assert_eq!(count(&tree, NodeKind::MethodInvocation), 1);
    }

    #[test]
    fn generic_local_variable_vs_comparison() {
        let tree = body_tree("List<String> xs = make(); boolean b = a < c;");
        assert_eq!(count(&tree, NodeKind::LocalVariableDeclaration), 2);
        assert_eq!(count(&tree, NodeKind::ParameterizedType), 1);
        assert_eq!(count(&tree, NodeKind::BinaryExpression), 1);
    }

    #[test]
    fn multi_declarator_locals_with_dimensions() {
        let tree = body_tree("int x = 1, y[] = { 2 }, z;");
        assert_eq!(count(&tree, NodeKind::LocalVariableDeclaration), 1);
        assert_eq!(count(&tree, NodeKind::VariableDeclarator), 3);
        assert_eq!(count(&tree, NodeKind::ArrayInitializer), 1);
    }
}
