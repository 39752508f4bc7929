use crate::arena::NodeId;
use crate::parser::grammar::{annotation, expression, name, statement, ty};
use crate::parser::{NodeKind, Parser};
use crate::Error;
use crate::TokenKind;
use crate::T;

/// Consume modifier keywords and annotations, in any order. Modifier
/// keywords produce no nodes (consumers recompute the set from the
/// declaration's span); annotations become children of the open node.
/// Stops in front of `@interface`.
pub(crate) fn modifiers(p: &mut Parser) -> Result<(), Error> {
    loop {
        match p.peek() {
            T![@] if p.peek_n(1) != T![interface] => {
                annotation::annotation(p)?;
            }
            kind if kind.is_modifier() => {
                p.bump()?;
            }
            _ => return Ok(()),
        }
    }
}

/// Whether a type declaration starts here, looking past modifiers,
/// annotations (argument lists skipped with depth counting) and
/// comments.
pub(crate) fn at_type_declaration(p: &Parser) -> bool {
    declaration_kind(p).is_some()
}

fn declaration_kind(p: &Parser) -> Option<NodeKind> {
    let mut iter = p.lookahead().peekable();
    loop {
        match iter.peek().copied() {
            Some(T![@]) => {
                iter.next();
                if iter.peek() == Some(&T![interface]) {
                    return Some(NodeKind::AnnotationTypeDeclaration);
                }
                // Skip the annotation's qualified name.
                match iter.next() {
                    Some(kind) if Parser::is_identifier_like(kind) => {}
                    _ => return None,
                }
                while iter.peek() == Some(&T![.]) {
                    iter.next();
                    match iter.next() {
                        Some(kind) if Parser::is_identifier_like(kind) => {}
                        _ => return None,
                    }
                }
                // Skip an argument list, tracking paren depth.
                if iter.peek() == Some(&T!['(']) {
                    let mut depth = 0usize;
                    loop {
                        match iter.next() {
                            Some(T!['(']) => depth += 1,
                            Some(T![')']) => {
                                depth -= 1;
                                if depth == 0 {
                                    break;
                                }
                            }
                            Some(TokenKind::Eof) | None => return None,
                            Some(_) => {}
                        }
                    }
                }
            }
            Some(kind) if kind.is_modifier() => {
                iter.next();
            }
            Some(T![class]) => return Some(NodeKind::ClassDeclaration),
            Some(T![interface]) => return Some(NodeKind::InterfaceDeclaration),
            Some(T![enum]) => return Some(NodeKind::EnumDeclaration),
            Some(T![record]) => {
                // `record` is contextual: only a declaration when a name
                // follows.
                iter.next();
                return match iter.peek() {
                    Some(&kind) if Parser::is_identifier_like(kind) => {
                        Some(NodeKind::RecordDeclaration)
                    }
                    _ => None,
                };
            }
            _ => return None,
        }
    }
}

/// See: JLS §8.1, §8.9, §9.1, §8.10, §9.6
///
/// Any of the five type declaration forms, annotations and modifiers
/// included in the node's span.
pub(crate) fn type_declaration(p: &mut Parser) -> Result<NodeId, Error> {
    let Some(kind) = declaration_kind(p) else {
        return Err(p.err("expected a type declaration"));
    };

    let node = p.start_node(kind);
    modifiers(p)?;
    match kind {
        NodeKind::ClassDeclaration => {
            p.expect(T![class])?;
            name::identifier(p)?;
            if p.at(T![<]) {
                ty::type_parameters(p)?;
            }
            if p.at(T![extends]) {
                p.bump()?;
                ty::ty(p)?;
            }
            if p.at(T![implements]) {
                p.bump()?;
                type_list(p)?;
            }
            if p.at(T![permits]) {
                p.bump()?;
                type_list(p)?;
            }
            type_body(p, false)?;
        }
        NodeKind::InterfaceDeclaration => {
            p.expect(T![interface])?;
            name::identifier(p)?;
            if p.at(T![<]) {
                ty::type_parameters(p)?;
            }
            if p.at(T![extends]) {
                p.bump()?;
                type_list(p)?;
            }
            if p.at(T![permits]) {
                p.bump()?;
                type_list(p)?;
            }
            type_body(p, false)?;
        }
        NodeKind::EnumDeclaration => {
            p.expect(T![enum])?;
            name::identifier(p)?;
            if p.at(T![implements]) {
                p.bump()?;
                type_list(p)?;
            }
            enum_body(p)?;
        }
        NodeKind::RecordDeclaration => {
            p.expect(T![record])?;
            name::identifier(p)?;
            if p.at(T![<]) {
                ty::type_parameters(p)?;
            }
            parameters(p, NodeKind::RecordComponent)?;
            if p.at(T![implements]) {
                p.bump()?;
                type_list(p)?;
            }
            type_body(p, false)?;
        }
        NodeKind::AnnotationTypeDeclaration => {
            p.expect(T![@])?;
            p.expect(T![interface])?;
            name::identifier(p)?;
            type_body(p, true)?;
        }
        _ => unreachable!("declaration_kind returned a non-declaration"),
    }
    p.finish_node(node);
    Ok(node)
}

fn type_list(p: &mut Parser) -> Result<(), Error> {
    loop {
        ty::ty(p)?;
        if p.at(T![,]) {
            p.bump()?;
            continue;
        }
        return Ok(());
    }
}

/// A brace-enclosed member list. `in_annotation` switches method-shaped
/// members to annotation type elements, which admit `default` values.
pub(crate) fn type_body(p: &mut Parser, in_annotation: bool) -> Result<(), Error> {
    p.expect(T!['{'])?;
    while !p.at(T!['}']) && !p.at(TokenKind::Eof) {
        member(p, in_annotation)?;
    }
    p.expect(T!['}'])?;
    Ok(())
}

/// See: JLS §8.1.6
pub(crate) fn member(p: &mut Parser, in_annotation: bool) -> Result<(), Error> {
    if p.at(T![;]) {
        p.leaf(NodeKind::EmptyStatement)?;
        return Ok(());
    }
    if at_type_declaration(p) {
        type_declaration(p)?;
        return Ok(());
    }
    if p.at(T!['{']) {
        let node = p.start_node(NodeKind::InitializerBlock);
        statement::block(p)?;
        p.finish_node(node);
        return Ok(());
    }
    if p.at(T![static]) && p.peek_n(1) == T!['{'] {
        let node = p.start_node(NodeKind::StaticInitializerBlock);
        p.bump()?;
        statement::block(p)?;
        p.finish_node(node);
        return Ok(());
    }
    member_declaration(p, in_annotation)
}

/// Decide what member form starts here by a rolled-back trial over
/// modifiers, type parameters and the leading type:
/// `Identifier (` is a constructor, `Identifier {` a compact
/// constructor, a type followed by `Identifier (` a method, anything
/// else a field.
fn classify_member(p: &mut Parser) -> Result<NodeKind, Error> {
    let checkpoint = p.checkpoint();
    let classified = (|| -> Result<NodeKind, Error> {
        modifiers(p)?;
        if p.at(T![<]) {
            ty::type_parameters(p)?;
        }
        if p.at_identifier() && p.peek_n(1) == T!['('] {
            return Ok(NodeKind::ConstructorDeclaration);
        }
        if p.at_identifier() && p.peek_n(1) == T!['{'] {
            return Ok(NodeKind::CompactConstructorDeclaration);
        }
        if p.at(T![void]) {
            return Ok(NodeKind::MethodDeclaration);
        }
        ty::ty(p)?;
        if p.at_identifier() && p.peek_n(1) == T!['('] {
            return Ok(NodeKind::MethodDeclaration);
        }
        Ok(NodeKind::FieldDeclaration)
    })();
    p.rewind(checkpoint);
    classified
}

fn member_declaration(p: &mut Parser, in_annotation: bool) -> Result<(), Error> {
    let mut kind = classify_member(p)?;
    if in_annotation && kind == NodeKind::MethodDeclaration {
        kind = NodeKind::AnnotationTypeElement;
    }

    let node = p.start_node(kind);
    modifiers(p)?;
    if p.at(T![<]) {
        ty::type_parameters(p)?;
    }

    match kind {
        NodeKind::ConstructorDeclaration => {
            name::identifier(p)?;
            parameters(p, NodeKind::Parameter)?;
            if p.at(T![throws]) {
                throws_clause(p)?;
            }
            statement::block(p)?;
        }
        NodeKind::CompactConstructorDeclaration => {
            name::identifier(p)?;
            statement::block(p)?;
        }
        NodeKind::MethodDeclaration | NodeKind::AnnotationTypeElement => {
            if p.at(T![void]) {
                p.leaf(NodeKind::PrimitiveType)?;
            } else {
                ty::ty(p)?;
            }
            name::identifier(p)?;
            parameters(p, NodeKind::Parameter)?;
            // C-style trailing dimensions on the method result.
            while p.at(T!['[']) && p.peek_n(1) == T![']'] {
                p.bump()?;
                p.bump()?;
            }
            if p.at(T![throws]) {
                throws_clause(p)?;
            }
            if p.at(T![default]) {
                p.bump()?;
                annotation::element_value(p)?;
            }
            if p.at(T!['{']) {
                statement::block(p)?;
            } else {
                p.expect(T![;])?;
            }
        }
        NodeKind::FieldDeclaration => {
            ty::ty(p)?;
            loop {
                variable_declarator(p)?;
                if p.at(T![,]) {
                    p.bump()?;
                    continue;
                }
                break;
            }
            p.expect(T![;])?;
        }
        _ => unreachable!("classify_member returned a non-member"),
    }

    p.finish_node(node);
    Ok(())
}

fn throws_clause(p: &mut Parser) -> Result<(), Error> {
    p.expect(T![throws])?;
    type_list(p)
}

/// A parenthesized declaration list: method/constructor parameters or
/// record components, per `kind`.
pub(crate) fn parameters(p: &mut Parser, kind: NodeKind) -> Result<(), Error> {
    p.expect(T!['('])?;
    if !p.at(T![')']) {
        loop {
            parameter(p, kind)?;
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

fn parameter(p: &mut Parser, kind: NodeKind) -> Result<(), Error> {
    let node = p.start_node(kind);
    modifiers(p)?;
    ty::ty(p)?;
    if p.at(T![...]) {
        p.bump()?;
    }
    if p.at(T![this]) {
        // Receiver parameter.
        p.bump()?;
    } else {
        name::identifier(p)?;
        while p.at(T!['[']) && p.peek_n(1) == T![']'] {
            p.bump()?;
            p.bump()?;
        }
    }
    p.finish_node(node);
    Ok(())
}

/// See: JLS §8.3
///
/// One declarator in a field or local declaration: name, optional
/// per-declarator dimensions, optional initializer.
pub(crate) fn variable_declarator(p: &mut Parser) -> Result<(), Error> {
    let node = p.start_node(NodeKind::VariableDeclarator);
    name::identifier(p)?;
    while p.at(T!['[']) && p.peek_n(1) == T![']'] {
        p.bump()?;
        p.bump()?;
    }
    if p.at(T![=]) {
        p.bump()?;
        if p.at(T!['{']) {
            expression::array_initializer(p)?;
        } else {
            expression::expression(p)?;
        }
    }
    p.finish_node(node);
    Ok(())
}

/// See: JLS §8.9.1
fn enum_body(p: &mut Parser) -> Result<(), Error> {
    p.expect(T!['{'])?;
    while p.at_identifier() || p.at(T![@]) {
        enum_constant(p)?;
        if p.at(T![,]) {
            p.bump()?;
        } else {
            break;
        }
    }
    if p.at(T![;]) {
        p.bump()?;
        while !p.at(T!['}']) && !p.at(TokenKind::Eof) {
            member(p, false)?;
        }
    }
    p.expect(T!['}'])?;
    Ok(())
}

fn enum_constant(p: &mut Parser) -> Result<(), Error> {
    let node = p.start_node(NodeKind::EnumConstant);
    while p.at(T![@]) {
        annotation::annotation(p)?;
    }
    name::identifier(p)?;
    if p.at(T!['(']) {
        expression::arguments(p)?;
    }
    if p.at(T!['{']) {
        type_body(p, false)?;
    }
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

    #[test]
    fn sealed_class_with_permits() {
        let tree = parse(
            "public sealed class Shape permits Circle, Square { } final class Circle extends Shape { } non-sealed class Square extends Shape { }",
        );
        assert_eq!(count(&tree, NodeKind::ClassDeclaration), 3);
    }

    #[test]
    fn interface_with_default_and_static_methods() {
        let tree = parse(
            "interface Greeter { String name(); default String greet() { return \"hi \" + name(); } static Greeter of() { return null; } }",
        );
        assert_eq!(count(&tree, NodeKind::InterfaceDeclaration), 1);
        assert_eq!(count(&tree, NodeKind::MethodDeclaration), 3);
    }

    #[test]
    fn enum_with_arguments_and_body() {
        let tree = parse(
            "enum Op { PLUS(\"+\") { int apply(int a, int b) { return a + b; } }, MINUS(\"-\"); final String symbol; Op(String symbol) { this.symbol = symbol; } }",
        );
        assert_eq!(count(&tree, NodeKind::EnumDeclaration), 1);
        assert_eq!(count(&tree, NodeKind::EnumConstant), 2);
        assert_eq!(count(&tree, NodeKind::ConstructorDeclaration), 1);
        assert_eq!(count(&tree, NodeKind::FieldDeclaration), 1);
    }

    #[test]
    fn record_with_compact_constructor() {
        let tree = parse(
            "record Range(int lo, int hi) { Range { if (lo > hi) throw new IllegalArgumentException(); } }",
        );
        assert_eq!(count(&tree, NodeKind::RecordDeclaration), 1);
        assert_eq!(count(&tree, NodeKind::RecordComponent), 2);
        assert_eq!(count(&tree, NodeKind::CompactConstructorDeclaration), 1);
    }

    #[test]
    fn annotation_type_with_defaults() {
        let tree = parse(
            "@interface Retry { int attempts() default 3; String[] on() default { }; }",
        );
        assert_eq!(count(&tree, NodeKind::AnnotationTypeDeclaration), 1);
        assert_eq!(count(&tree, NodeKind::AnnotationTypeElement), 2);
    }

    #[test]
    fn initializer_blocks() {
        let tree = parse("class C { static int n; static { n = 1; } int m; { m = 2; } }");
        assert_eq!(count(&tree, NodeKind::StaticInitializerBlock), 1);
        assert_eq!(count(&tree, NodeKind::InitializerBlock), 1);
    }

    #[test]
    fn generic_method_and_constructor() {
        let tree = parse(
            "class C { <T extends Comparable<T>> T max(T a, T b) { return a; } <T> C(T seed) { } }",
        );
        assert_eq!(count(&tree, NodeKind::MethodDeclaration), 1);
        assert_eq!(count(&tree, NodeKind::ConstructorDeclaration), 1);
        assert_eq!(count(&tree, NodeKind::TypeParameter), 2);
    }

    #[test]
    fn varargs_and_receiver_parameters() {
        let tree = parse("class C { void log(String fmt, Object... args) { } void m(C this) { } }");
        assert_eq!(count(&tree, NodeKind::Parameter), 3);
    }

    #[test]
    fn multi_declarator_field_with_dimensions() {
        let tree = parse("class C { int a = 1, b[] = { 1, 2 }, c; }");
        assert_eq!(count(&tree, NodeKind::FieldDeclaration), 1);
        assert_eq!(count(&tree, NodeKind::VariableDeclarator), 3);
    }

    #[test]
    fn nested_types() {
        let tree = parse("class Outer { static class Nested { } interface Inner { } enum E { A } }");
        assert_eq!(count(&tree, NodeKind::ClassDeclaration), 2);
        assert_eq!(count(&tree, NodeKind::InterfaceDeclaration), 1);
        assert_eq!(count(&tree, NodeKind::EnumDeclaration), 1);
    }

    #[test]
    fn throws_clause_with_multiple_types() {
        let tree = parse("class C { void m() throws java.io.IOException, RuntimeException { } }");
        assert_eq!(count(&tree, NodeKind::MethodDeclaration), 1);
    }
}
