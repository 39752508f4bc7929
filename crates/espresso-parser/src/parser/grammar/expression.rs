use crate::arena::NodeId;
use crate::parser::grammar::{declaration, name, pattern, statement, ty};
use crate::parser::{NodeKind, Parser};
use crate::Error;
use crate::TokenKind;
use crate::T;

/// See: JLS §15.26
///
/// Expression entry point: assignment is the lowest-precedence,
/// right-associative level.
pub(crate) fn expression(p: &mut Parser) -> Result<NodeId, Error> {
    p.enter_expression()?;
    let result = assignment(p);
    p.exit();
    result
}

fn assignment(p: &mut Parser) -> Result<NodeId, Error> {
    let lhs = conditional(p)?;
    if p.peek().is_assignment_operator() {
        let node = p.wrap_node(NodeKind::AssignmentExpression, lhs);
        p.bump()?;
        expression(p)?;
        p.finish_node(node);
        return Ok(node);
    }
    Ok(lhs)
}

/// See: JLS §15.25
///
/// *ConditionalExpression*:
///     ConditionalOrExpression [ **?** Expression **:** ConditionalExpression ]
pub(crate) fn conditional(p: &mut Parser) -> Result<NodeId, Error> {
    let condition = logical_or(p)?;
    if p.at(T![?]) {
        let node = p.wrap_node(NodeKind::ConditionalExpression, condition);
        p.bump()?;
        expression(p)?;
        p.expect(T![:])?;
        conditional(p)?;
        p.finish_node(node);
        return Ok(node);
    }
    Ok(condition)
}

/// One left-associative binary precedence level: parse the next-higher
/// level, then fold operands into `BinaryExpression` nodes while an
/// operator from `ops` is current.
fn binary_level(
    p: &mut Parser,
    ops: &[TokenKind],
    next: fn(&mut Parser) -> Result<NodeId, Error>,
) -> Result<NodeId, Error> {
    let mut lhs = next(p)?;
    while ops.contains(&p.peek()) {
        let node = p.wrap_node(NodeKind::BinaryExpression, lhs);
        p.bump()?;
        next(p)?;
        p.finish_node(node);
        lhs = node;
    }
    Ok(lhs)
}

fn logical_or(p: &mut Parser) -> Result<NodeId, Error> {
    binary_level(p, &[T![||]], logical_and)
}

fn logical_and(p: &mut Parser) -> Result<NodeId, Error> {
    binary_level(p, &[T![&&]], bitwise_or)
}

fn bitwise_or(p: &mut Parser) -> Result<NodeId, Error> {
    binary_level(p, &[T![|]], bitwise_xor)
}

fn bitwise_xor(p: &mut Parser) -> Result<NodeId, Error> {
    binary_level(p, &[T![^]], bitwise_and)
}

fn bitwise_and(p: &mut Parser) -> Result<NodeId, Error> {
    binary_level(p, &[T![&]], equality)
}

fn equality(p: &mut Parser) -> Result<NodeId, Error> {
    binary_level(p, &[T![==], T![!=]], relational)
}

/// See: JLS §15.20
///
/// Comparisons plus `instanceof`, which may introduce a pattern.
fn relational(p: &mut Parser) -> Result<NodeId, Error> {
    let mut lhs = shift(p)?;
    loop {
        match p.peek() {
            T![<] | T![>] | T![<=] | T![>=] => {
                let node = p.wrap_node(NodeKind::BinaryExpression, lhs);
                p.bump()?;
                shift(p)?;
                p.finish_node(node);
                lhs = node;
            }
            T![instanceof] => {
                let node = p.wrap_node(NodeKind::InstanceofExpression, lhs);
                p.bump()?;
                if p.at(T![final]) {
                    pattern::pattern(p)?;
                } else {
                    let ty_node = ty::ty(p)?;
                    // A following binding name or component list turns
                    // the plain type into a pattern.
                    pattern::pattern_from_type(p, ty_node)?;
                }
                p.finish_node(node);
                lhs = node;
            }
            _ => break,
        }
    }
    Ok(lhs)
}

fn shift(p: &mut Parser) -> Result<NodeId, Error> {
    binary_level(p, &[T![<<], T![>>], T![>>>]], additive)
}

fn additive(p: &mut Parser) -> Result<NodeId, Error> {
    binary_level(p, &[T![+], T![-]], multiplicative)
}

fn multiplicative(p: &mut Parser) -> Result<NodeId, Error> {
    binary_level(p, &[T![*], T![/], T![%]], unary)
}

/// See: JLS §15.15
fn unary(p: &mut Parser) -> Result<NodeId, Error> {
    p.enter_expression()?;
    let result = unary_inner(p);
    p.exit();
    result
}

fn unary_inner(p: &mut Parser) -> Result<NodeId, Error> {
    match p.peek() {
        T![+] | T![-] | T![!] | T![~] | T![++] | T![--] => {
            let node = p.start_node(NodeKind::UnaryExpression);
            p.bump()?;
            unary(p)?;
            p.finish_node(node);
            Ok(node)
        }
        _ => postfix(p),
    }
}

/// See: JLS §15.14
///
/// Postfix chains: member access, invocation, array access, method
/// references, class literals, qualified `this`/`super`/`new`, and the
/// postfix `++`/`--`.
fn postfix(p: &mut Parser) -> Result<NodeId, Error> {
    let mut node = primary(p)?;
    loop {
        match p.peek() {
            T![.] => {
                node = postfix_dot(p, node)?;
            }
            T!['['] => {
                if p.peek_n(1) == T![']'] {
                    // `String[].class`
                    let wrapped = p.wrap_node(NodeKind::ClassLiteral, node);
                    while p.at(T!['[']) && p.peek_n(1) == T![']'] {
                        p.bump()?;
                        p.bump()?;
                    }
                    p.expect(T![.])?;
                    p.expect(T![class])?;
                    p.finish_node(wrapped);
                    node = wrapped;
                } else {
                    let wrapped = p.wrap_node(NodeKind::ArrayAccess, node);
                    p.bump()?;
                    expression(p)?;
                    p.expect(T![']'])?;
                    p.finish_node(wrapped);
                    node = wrapped;
                }
            }
            T![++] | T![--] => {
                let wrapped = p.wrap_node(NodeKind::PostfixExpression, node);
                p.bump()?;
                p.finish_node(wrapped);
                node = wrapped;
            }
            T![::] => {
                let wrapped = p.wrap_node(NodeKind::MethodReference, node);
                p.bump()?;
                if p.at(T![<]) {
                    ty::type_arguments(p)?;
                }
                if p.at(T![new]) {
                    p.bump()?;
                } else {
                    name::identifier(p)?;
                }
                p.finish_node(wrapped);
                node = wrapped;
            }
            _ => break,
        }
    }
    Ok(node)
}

fn postfix_dot(p: &mut Parser, node: NodeId) -> Result<NodeId, Error> {
    match p.peek_n(1) {
        T![class] => {
            let wrapped = p.wrap_node(NodeKind::ClassLiteral, node);
            p.bump()?;
            p.bump()?;
            p.finish_node(wrapped);
            Ok(wrapped)
        }
        T![this] => {
            let wrapped = p.wrap_node(NodeKind::ThisExpression, node);
            p.bump()?;
            p.bump()?;
            p.finish_node(wrapped);
            Ok(wrapped)
        }
        T![super] => {
            let wrapped = p.wrap_node(NodeKind::SuperExpression, node);
            p.bump()?;
            p.bump()?;
            p.finish_node(wrapped);
            Ok(wrapped)
        }
        T![new] => {
            // Qualified creation: `outer.new Inner()`.
            let wrapped = p.wrap_node(NodeKind::ObjectCreation, node);
            p.bump()?;
            p.bump()?;
            if p.at(T![<]) {
                ty::type_arguments(p)?;
            }
            ty::ty_no_dims(p)?;
            arguments(p)?;
            if p.at(T!['{']) {
                declaration::type_body(p, false)?;
            }
            p.finish_node(wrapped);
            Ok(wrapped)
        }
        T![<] => {
            // Explicit type arguments: `target.<T>method(args)`.
            let wrapped = p.wrap_node(NodeKind::MethodInvocation, node);
            p.bump()?;
            ty::type_arguments(p)?;
            name::identifier(p)?;
            arguments(p)?;
            p.finish_node(wrapped);
            Ok(wrapped)
        }
        kind if Parser::is_identifier_like(kind) => {
            if p.peek_n(2) == T!['('] {
                let wrapped = p.wrap_node(NodeKind::MethodInvocation, node);
                p.bump()?;
                name::identifier(p)?;
                arguments(p)?;
                p.finish_node(wrapped);
                Ok(wrapped)
            } else {
                let wrapped = p.wrap_node(NodeKind::FieldAccess, node);
                p.bump()?;
                name::identifier(p)?;
                p.finish_node(wrapped);
                Ok(wrapped)
            }
        }
        _ => {
            p.bump()?;
            Err(p.err("expected a member name"))
        }
    }
}

/// See: JLS §15.8
fn primary(p: &mut Parser) -> Result<NodeId, Error> {
    match p.peek() {
        TokenKind::IntLiteral => p.leaf(NodeKind::IntegerLiteral),
        TokenKind::LongLiteral => p.leaf(NodeKind::LongLiteral),
        TokenKind::FloatLiteral => p.leaf(NodeKind::FloatLiteral),
        TokenKind::DoubleLiteral => p.leaf(NodeKind::DoubleLiteral),
        TokenKind::CharLiteral => p.leaf(NodeKind::CharacterLiteral),
        TokenKind::StringLiteral => p.leaf(NodeKind::StringLiteral),
        TokenKind::TextBlock => p.leaf(NodeKind::TextBlockLiteral),
        TokenKind::TrueLiteral | TokenKind::FalseLiteral => p.leaf(NodeKind::BooleanLiteral),
        TokenKind::NullLiteral => p.leaf(NodeKind::NullLiteral),
        T!['('] => paren_cast_or_lambda(p),
        T![new] => new_expression(p),
        T![switch] => switch_expression(p),
        T![this] => {
            let node = p.leaf(NodeKind::ThisExpression)?;
            if p.at(T!['(']) {
                // Explicit constructor invocation `this(args)`.
                let wrapped = p.wrap_node(NodeKind::MethodInvocation, node);
                arguments(p)?;
                p.finish_node(wrapped);
                return Ok(wrapped);
            }
            Ok(node)
        }
        T![super] => {
            let node = p.leaf(NodeKind::SuperExpression)?;
            if p.at(T!['(']) {
                let wrapped = p.wrap_node(NodeKind::MethodInvocation, node);
                arguments(p)?;
                p.finish_node(wrapped);
                return Ok(wrapped);
            }
            Ok(node)
        }
        T![void] => {
            // `void.class`
            let node = p.start_node(NodeKind::ClassLiteral);
            p.bump()?;
            p.expect(T![.])?;
            p.expect(T![class])?;
            p.finish_node(node);
            Ok(node)
        }
        kind if kind.is_primitive_type() => {
            // `int.class`, `long[].class`
            let node = p.start_node(NodeKind::ClassLiteral);
            p.bump()?;
            while p.at(T!['[']) && p.peek_n(1) == T![']'] {
                p.bump()?;
                p.bump()?;
            }
            p.expect(T![.])?;
            p.expect(T![class])?;
            p.finish_node(node);
            Ok(node)
        }
        kind if Parser::is_identifier_like(kind) => {
            if p.peek_n(1) == T![->] {
                return single_parameter_lambda(p);
            }
            let node = p.leaf(NodeKind::Identifier)?;
            if p.at(T!['(']) {
                let wrapped = p.wrap_node(NodeKind::MethodInvocation, node);
                arguments(p)?;
                p.finish_node(wrapped);
                return Ok(wrapped);
            }
            Ok(node)
        }
        _ => Err(p.err("expected an expression")),
    }
}

/// See: JLS §15.16, §15.27
///
/// Disambiguate `(`-prefixed primaries, in order: empty parameter list
/// lambda; `) ->` scan lambda; trial cast; parenthesized expression.
fn paren_cast_or_lambda(p: &mut Parser) -> Result<NodeId, Error> {
    if p.peek_n(1) == T![')'] && p.peek_n(2) == T![->] {
        return parenthesized_lambda(p);
    }
    if lambda_ahead(p) {
        return parenthesized_lambda(p);
    }

    let checkpoint = p.checkpoint();
    match try_cast(p) {
        Ok(node) => return Ok(node),
        Err(_) => p.rewind(checkpoint),
    }

    let node = p.start_node(NodeKind::ParenthesizedExpression);
    p.bump()?;
    expression(p)?;
    p.expect(T![')'])?;
    p.finish_node(node);
    Ok(node)
}

/// Scan ahead for `) ->` with balanced parentheses, without consuming
/// anything. A `;` or end of input ends the scan — neither can occur
/// inside a lambda parameter list.
fn lambda_ahead(p: &Parser) -> bool {
    let mut depth = 0usize;
    let mut iter = p.lookahead();
    while let Some(kind) = iter.next() {
        match kind {
            T!['('] => depth += 1,
            T![')'] => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return iter.next() == Some(T![->]);
                }
            }
            T![;] | TokenKind::Eof => return false,
            _ => {}
        }
    }
    false
}

/// Attempt `( Type ) UnaryExpression`. Succeeds only when the token
/// after the closing paren can start the operand: the full unary set
/// for primitive casts, the not-plus-minus subset for reference and
/// intersection casts (JLS §15.16).
fn try_cast(p: &mut Parser) -> Result<NodeId, Error> {
    let node = p.start_node(NodeKind::CastExpression);
    p.expect(T!['('])?;
    let ty_node = ty::cast_type(p)?;
    p.expect(T![')'])?;

    let primitive_cast = p.node_kind(ty_node) == NodeKind::PrimitiveType;
    let operand_ok = match p.peek() {
        T![+] | T![-] | T![++] | T![--] => primitive_cast,
        kind => can_start_unary_not_plus_minus(kind),
    };
    if !operand_ok {
        return Err(p.err("cast operand cannot start here"));
    }

    unary(p)?;
    p.finish_node(node);
    Ok(node)
}

fn can_start_unary_not_plus_minus(kind: TokenKind) -> bool {
    kind == T![!]
        || kind == T![~]
        || kind == T!['(']
        || kind == T![this]
        || kind == T![super]
        || kind == T![new]
        || kind == T![switch]
        || kind == T![void]
        || kind.is_primitive_type()
        || kind.is_literal()
        || Parser::is_identifier_like(kind)
}

/// A lambda whose parameter list is parenthesized: `()`, `(a, b)`,
/// `(var x) ->`, `(Type t) ->`.
fn parenthesized_lambda(p: &mut Parser) -> Result<NodeId, Error> {
    let node = p.start_node(NodeKind::LambdaExpression);
    p.expect(T!['('])?;
    if !p.at(T![')']) {
        loop {
            lambda_parameter(p)?;
            if p.at(T![,]) {
                p.bump()?;
                continue;
            }
            break;
        }
    }
    p.expect(T![')'])?;
    p.expect(T![->])?;
    lambda_body(p)?;
    p.finish_node(node);
    Ok(node)
}

fn lambda_parameter(p: &mut Parser) -> Result<(), Error> {
    let node = p.start_node(NodeKind::Parameter);
    if p.at_identifier() && matches!(p.peek_n(1), T![,] | T![')']) {
        // Inferred parameter: bare name.
        name::identifier(p)?;
    } else {
        declaration::modifiers(p)?;
        ty::ty(p)?;
        if p.at(T![...]) {
            p.bump()?;
        }
        name::identifier(p)?;
    }
    p.finish_node(node);
    Ok(())
}

/// The body's end position determines the lambda node's length, whether
/// the body is a block or an expression.
fn lambda_body(p: &mut Parser) -> Result<(), Error> {
    if p.at(T!['{']) {
        statement::block(p)?;
        return Ok(());
    }
    expression(p)?;
    Ok(())
}

fn single_parameter_lambda(p: &mut Parser) -> Result<NodeId, Error> {
    let node = p.start_node(NodeKind::LambdaExpression);
    let parameter = p.start_node(NodeKind::Parameter);
    name::identifier(p)?;
    p.finish_node(parameter);
    p.expect(T![->])?;
    lambda_body(p)?;
    p.finish_node(node);
    Ok(node)
}

/// See: JLS §15.9, §15.10
///
/// `new` heads either an object creation or an array creation. The type
/// is parsed without consuming brackets, then a probe of the following
/// token decides which form this is.
fn new_expression(p: &mut Parser) -> Result<NodeId, Error> {
    let checkpoint = p.checkpoint();
    p.bump()?;
    if p.at(T![<]) {
        ty::type_arguments(p)?;
    }
    let is_array = ty::ty_no_dims(p).is_ok() && p.at(T!['[']);
    p.rewind(checkpoint);

    if is_array {
        array_creation(p)
    } else {
        object_creation(p)
    }
}

fn object_creation(p: &mut Parser) -> Result<NodeId, Error> {
    let node = p.start_node(NodeKind::ObjectCreation);
    p.expect(T![new])?;
    if p.at(T![<]) {
        ty::type_arguments(p)?;
    }
    ty::ty_no_dims(p)?;
    arguments(p)?;
    if p.at(T!['{']) {
        // Anonymous class body.
        declaration::type_body(p, false)?;
    }
    p.finish_node(node);
    Ok(node)
}

fn array_creation(p: &mut Parser) -> Result<NodeId, Error> {
    let node = p.start_node(NodeKind::ArrayCreation);
    p.expect(T![new])?;
    ty::ty_no_dims(p)?;
    while p.at(T!['[']) {
        p.bump()?;
        if !p.at(T![']']) {
            expression(p)?;
        }
        p.expect(T![']'])?;
    }
    if p.at(T!['{']) {
        array_initializer(p)?;
    }
    p.finish_node(node);
    Ok(node)
}

/// See: JLS §10.6
///
/// *ArrayInitializer*:
///     **{** [ VariableInitializer { **,** VariableInitializer } ] [ **,** ] **}**
pub(crate) fn array_initializer(p: &mut Parser) -> Result<NodeId, Error> {
    let node = p.start_node(NodeKind::ArrayInitializer);
    p.expect(T!['{'])?;
    while !p.at(T!['}']) && !p.at(TokenKind::Eof) {
        if p.at(T!['{']) {
            array_initializer(p)?;
        } else {
            expression(p)?;
        }
        if p.at(T![,]) {
            p.bump()?;
        } else {
            break;
        }
    }
    p.expect(T!['}'])?;
    p.finish_node(node);
    Ok(node)
}

/// A parenthesized, comma-separated argument list, attached to the
/// current open node.
pub(crate) fn arguments(p: &mut Parser) -> Result<(), Error> {
    p.expect(T!['('])?;
    if !p.at(T![')']) {
        loop {
            expression(p)?;
            if p.at(T![,]) {
                p.bump()?;
                continue;
            }
            break;
        }
    }
    p.expect(T![')'])?;
    Ok(())
}

/// See: JLS §15.28
pub(crate) fn switch_expression(p: &mut Parser) -> Result<NodeId, Error> {
    let node = p.start_node(NodeKind::SwitchExpression);
    p.expect(T![switch])?;
    p.expect(T!['('])?;
    expression(p)?;
    p.expect(T![')'])?;
    statement::switch_block(p)?;
    p.finish_node(node);
    Ok(node)
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

    fn statement_tree(body: &str) -> crate::SyntaxTree {
        parse(&format!("class C {{ void m() {{ {body} }} }}"))
    }

    #[test]
    fn precedence_nests_left_associatively() {
        let tree = statement_tree("int x = 1 + 2 * 3 - 4;");
        // (1 + (2 * 3)) - 4: three binary nodes.
        assert_eq!(count(&tree, NodeKind::BinaryExpression), 3);
    }

    #[test]
    fn primitive_cast_accepts_minus_operand() {
        let tree = statement_tree("int x = (int) -1;");
        assert_eq!(count(&tree, NodeKind::CastExpression), 1);
        assert_eq!(count(&tree, NodeKind::UnaryExpression), 1);
    }

    #[test]
    fn parenthesized_name_before_minus_is_subtraction() {
        let tree = statement_tree("int y = (a) - 1;");
        assert_eq!(count(&tree, NodeKind::CastExpression), 0);
        assert_eq!(count(&tree, NodeKind::BinaryExpression), 1);
        assert_eq!(count(&tree, NodeKind::ParenthesizedExpression), 1);
    }

    #[test]
    fn reference_cast_of_invocation() {
        let tree = statement_tree("String s = (String) map.get(key);");
        assert_eq!(count(&tree, NodeKind::CastExpression), 1);
        assert_eq!(count(&tree, NodeKind::MethodInvocation), 1);
    }

    #[test]
    fn intersection_cast() {
        let tree = statement_tree("Runnable r = (Runnable & java.io.Serializable) task;");
        assert_eq!(count(&tree, NodeKind::CastExpression), 1);
        assert_eq!(count(&tree, NodeKind::IntersectionType), 1);
    }

    #[test]
    fn lambdas_in_all_shapes() {
        let tree = statement_tree(
            "f(() -> 0); f(x -> x + 1); f((a, b) -> a * b); f((int v) -> { return v; });",
        );
        assert_eq!(count(&tree, NodeKind::LambdaExpression), 4);
    }

    #[test]
    fn cast_of_lambda_keeps_lambda_body() {
        let tree = statement_tree("Object f = (java.util.function.Function<Integer, Integer>) x -> x;");
        assert_eq!(count(&tree, NodeKind::CastExpression), 1);
        assert_eq!(count(&tree, NodeKind::LambdaExpression), 1);
    }

    #[test]
    fn method_references() {
        let tree = statement_tree("f(String::valueOf); f(list::add); f(ArrayList::new);");
        assert_eq!(count(&tree, NodeKind::MethodReference), 3);
    }

    #[test]
    fn class_literals() {
        let tree = statement_tree("f(String.class); f(int.class); f(long[].class); f(void.class);");
        assert_eq!(count(&tree, NodeKind::ClassLiteral), 4);
    }

    #[test]
    fn creations() {
        let tree = statement_tree(
            "var a = new java.util.ArrayList<String>(); var b = new int[4]; var c = new int[] { 1, 2 };",
        );
        assert_eq!(count(&tree, NodeKind::ObjectCreation), 1);
        assert_eq!(count(&tree, NodeKind::ArrayCreation), 2);
        assert_eq!(count(&tree, NodeKind::ArrayInitializer), 1);
    }

    #[test]
    fn anonymous_class_body() {
        let tree = statement_tree("Runnable r = new Runnable() { public void run() { } };");
        assert_eq!(count(&tree, NodeKind::ObjectCreation), 1);
        assert_eq!(count(&tree, NodeKind::MethodDeclaration), 2);
    }

    #[test]
    fn ternary_is_right_associative() {
        let tree = statement_tree("int x = a ? 1 : b ? 2 : 3;");
        assert_eq!(count(&tree, NodeKind::ConditionalExpression), 2);
    }

    #[test]
    fn assignment_chains() {
        let tree = statement_tree("a = b = c; x += 2; y >>>= 1;");
        assert_eq!(count(&tree, NodeKind::AssignmentExpression), 4);
    }

    #[test]
    fn array_access_and_postfix() {
        let tree = statement_tree("a[i] = a[i + 1]; i++; --j;");
        assert_eq!(count(&tree, NodeKind::ArrayAccess), 2);
        assert_eq!(count(&tree, NodeKind::PostfixExpression), 1);
        assert_eq!(count(&tree, NodeKind::UnaryExpression), 1);
    }

    #[test]
    fn qualified_this_and_super_calls() {
        let tree = parse(
            "class Outer { class Inner { Object o = Outer.this; } void m() { super.toString(); } }",
        );
        assert_eq!(count(&tree, NodeKind::ThisExpression), 1);
        assert_eq!(count(&tree, NodeKind::SuperExpression), 1);
    }

    #[test]
    fn text_block_literal_in_expression() {
        let tree = statement_tree("String s = \"\"\"\n    hello\n    \"\"\";");
        assert_eq!(count(&tree, NodeKind::TextBlockLiteral), 1);
    }

    #[test]
    fn shift_operators_are_expressions_not_generics() {
        let tree = statement_tree("int x = a >> 2; int y = b >>> 3; int z = c << 1;");
        assert_eq!(count(&tree, NodeKind::BinaryExpression), 3);
    }

    #[test]
    fn generic_method_invocation_with_explicit_type_arguments() {
        let tree = statement_tree("var v = java.util.Collections.<String>emptyList();");
        assert_eq!(count(&tree, NodeKind::MethodInvocation), 1);
    }
}
