use crate::arena::NodeId;
use crate::parser::grammar::{declaration, name, ty};
use crate::parser::{NodeKind, Parser};
use crate::Error;
use crate::T;

/// See: JLS §14.30, JEP 440, JEP 507
///
/// *Pattern*:
///     TypePattern | RecordPattern
///
/// A type pattern over a primitive type gets its own node kind so
/// consumers can tell `case int i` from `case Integer i` without
/// re-reading the type.
pub(crate) fn pattern(p: &mut Parser) -> Result<NodeId, Error> {
    if p.at(T![final]) || p.at(T![@]) {
        // Modifiers commit us to a type pattern.
        let node = p.start_node(NodeKind::TypePattern);
        declaration::modifiers(p)?;
        ty::ty(p)?;
        name::identifier(p)?;
        p.finish_node(node);
        return Ok(node);
    }

    let ty_node = ty::ty(p)?;
    match pattern_from_type(p, ty_node)? {
        Some(node) => Ok(node),
        None => Err(p.err("expected a pattern")),
    }
}

/// Continue a pattern whose type has already been parsed. Returns `None`
/// when neither a binding name nor a component list follows — the
/// caller decides whether a bare type is acceptable (it is for
/// `instanceof`, it is not for `case`).
pub(crate) fn pattern_from_type(
    p: &mut Parser,
    ty_node: NodeId,
) -> Result<Option<NodeId>, Error> {
    if p.at(T!['(']) {
        let node = p.wrap_node(NodeKind::RecordPattern, ty_node);
        p.bump()?;
        if !p.at(T![')']) {
            loop {
                pattern(p)?;
                if p.at(T![,]) {
                    p.bump()?;
                    continue;
                }
                break;
            }
        }
        p.expect(T![')'])?;
        p.finish_node(node);
        return Ok(Some(node));
    }

    if p.at_identifier() {
        let kind = if p.node_kind(ty_node) == NodeKind::PrimitiveType {
            NodeKind::PrimitivePattern
        } else {
            NodeKind::TypePattern
        };
        let node = p.wrap_node(kind, ty_node);
        name::identifier(p)?;
        p.finish_node(node);
        return Ok(Some(node));
    }

    Ok(None)
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
    fn instanceof_type_pattern() {
        let tree = parse("class C { boolean m(Object o) { return o instanceof String s; } }");
        assert_eq!(count(&tree, NodeKind::TypePattern), 1);
        assert_eq!(count(&tree, NodeKind::InstanceofExpression), 1);
    }

    #[test]
    fn instanceof_bare_type_is_not_a_pattern() {
        let tree = parse("class C { boolean m(Object o) { return o instanceof String; } }");
        assert_eq!(count(&tree, NodeKind::TypePattern), 0);
    }

    #[test]
    fn record_pattern_destructures_nested() {
        let tree = parse(
            "class C { void m(Object o) { if (o instanceof Line(Point(var x, var y), Point end)) { } } }",
        );
        assert_eq!(count(&tree, NodeKind::RecordPattern), 2);
        assert_eq!(count(&tree, NodeKind::TypePattern), 3);
    }

    #[test]
    fn primitive_pattern_gets_its_own_kind() {
        let tree = parse("class C { void m(Object o) { if (o instanceof int i) { } } }");
        assert_eq!(count(&tree, NodeKind::PrimitivePattern), 1);
        assert_eq!(count(&tree, NodeKind::TypePattern), 0);
    }

    #[test]
    fn final_modifier_on_pattern_variable() {
        let tree = parse("class C { void m(Object o) { if (o instanceof final String s) { } } }");
        assert_eq!(count(&tree, NodeKind::TypePattern), 1);
    }
}
