use crate::arena::NodeId;
use crate::parser::grammar::{annotation, name};
use crate::parser::{NodeKind, Parser};
use crate::Error;
use crate::T;

/// See: JLS §4.3
///
/// A type as written in source: primitive, `var`, or a class/interface
/// type with optional type arguments and qualifying segments, plus any
/// number of array dimensions.
pub(crate) fn ty(p: &mut Parser) -> Result<NodeId, Error> {
    p.enter()?;
    let result = ty_no_dims(p).and_then(|node| array_dims(p, node));
    p.exit();
    result
}

/// A type without consuming trailing `[` `]` pairs. `new` expressions
/// need this: brackets after the type belong to the creation, carrying
/// either dimension expressions or an initializer.
pub(crate) fn ty_no_dims(p: &mut Parser) -> Result<NodeId, Error> {
    // Type annotations in type position attach to the enclosing node.
    while p.at(T![@]) {
        annotation::annotation(p)?;
    }

    match p.peek() {
        kind if kind.is_primitive_type() => p.leaf(NodeKind::PrimitiveType),
        T![var] => p.leaf(NodeKind::VarType),
        kind if Parser::is_identifier_like(kind) => named_type(p),
        _ => Err(p.err("expected a type")),
    }
}

/// A class or interface type: `a.b.C`, `List<String>`,
/// `Outer<T>.Inner<U>`.
fn named_type(p: &mut Parser) -> Result<NodeId, Error> {
    let node = p.start_node(NodeKind::NamedType);
    p.expect_identifier()?;
    while p.at(T![.]) && Parser::is_identifier_like(p.peek_n(1)) {
        p.bump()?;
        p.expect_identifier()?;
    }
    p.finish_node(node);

    let mut current = node;
    if p.at(T![<]) {
        let wrapped = p.wrap_node(NodeKind::ParameterizedType, current);
        type_arguments(p)?;
        p.finish_node(wrapped);
        current = wrapped;

        // A parameterized type may be further qualified:
        // `Outer<T>.Inner<U>`.
        while p.at(T![.]) && Parser::is_identifier_like(p.peek_n(1)) {
            let qualified = p.wrap_node(NodeKind::NamedType, current);
            p.bump()?;
            p.expect_identifier()?;
            p.finish_node(qualified);
            current = qualified;

            if p.at(T![<]) {
                let parameterized = p.wrap_node(NodeKind::ParameterizedType, current);
                type_arguments(p)?;
                p.finish_node(parameterized);
                current = parameterized;
            }
        }
    }

    Ok(current)
}

/// See: JLS §4.5.1
///
/// *TypeArguments*:
///     **<** [ TypeArgument { **,** TypeArgument } ] **>**
///
/// The closing `>` goes through the pending-`>` machinery, so nested
/// generics ending in `>>` or `>>>` re-split correctly.
pub(crate) fn type_arguments(p: &mut Parser) -> Result<(), Error> {
    p.expect(T![<])?;

    // Diamond: `<>`.
    if p.at_generic_gt() {
        return p.expect_generic_gt();
    }

    loop {
        type_argument(p)?;
        if p.at(T![,]) {
            p.bump()?;
            continue;
        }
        return p.expect_generic_gt();
    }
}

fn type_argument(p: &mut Parser) -> Result<(), Error> {
    while p.at(T![@]) {
        annotation::annotation(p)?;
    }
    if p.at(T![?]) {
        return wildcard(p);
    }
    ty(p)?;
    Ok(())
}

/// See: JLS §4.5.1
///
/// *Wildcard*:
///     **?** [ ( **extends** | **super** ) ReferenceType ]
fn wildcard(p: &mut Parser) -> Result<(), Error> {
    let node = p.start_node(NodeKind::WildcardType);
    p.expect(T![?])?;
    if p.at(T![extends]) || p.at(T![super]) {
        p.bump()?;
        ty(p)?;
    }
    p.finish_node(node);
    Ok(())
}

/// Wrap `node` in one `ArrayType` per `[` `]` pair.
pub(crate) fn array_dims(p: &mut Parser, node: NodeId) -> Result<NodeId, Error> {
    let mut current = node;
    while p.at(T!['[']) && p.peek_n(1) == T![']'] {
        let wrapped = p.wrap_node(NodeKind::ArrayType, current);
        p.bump()?;
        p.bump()?;
        p.finish_node(wrapped);
        current = wrapped;
    }
    Ok(current)
}

/// The operand type of a cast, which may be an intersection:
/// `(Runnable & Serializable) r`.
pub(crate) fn cast_type(p: &mut Parser) -> Result<NodeId, Error> {
    let node = ty(p)?;
    if !p.at(T![&]) {
        return Ok(node);
    }

    let intersection = p.wrap_node(NodeKind::IntersectionType, node);
    while p.at(T![&]) {
        p.bump()?;
        ty(p)?;
    }
    p.finish_node(intersection);
    Ok(intersection)
}

/// The exception type of a catch formal, which may be a union:
/// `catch (IOException | SQLException e)`.
pub(crate) fn catch_type(p: &mut Parser) -> Result<NodeId, Error> {
    let node = ty(p)?;
    if !p.at(T![|]) {
        return Ok(node);
    }

    let union = p.wrap_node(NodeKind::UnionType, node);
    while p.at(T![|]) {
        p.bump()?;
        ty(p)?;
    }
    p.finish_node(union);
    Ok(union)
}

/// See: JLS §4.4
///
/// *TypeParameters*:
///     **<** TypeParameter { **,** TypeParameter } **>**
///
/// Bounds may be intersections: `<T extends A & B>`.
pub(crate) fn type_parameters(p: &mut Parser) -> Result<(), Error> {
    p.expect(T![<])?;
    loop {
        type_parameter(p)?;
        if p.at(T![,]) {
            p.bump()?;
            continue;
        }
        return p.expect_generic_gt();
    }
}

fn type_parameter(p: &mut Parser) -> Result<(), Error> {
    let node = p.start_node(NodeKind::TypeParameter);
    while p.at(T![@]) {
        annotation::annotation(p)?;
    }
    name::identifier(p)?;
    if p.at(T![extends]) {
        p.bump()?;
        ty(p)?;
        while p.at(T![&]) {
            p.bump()?;
            ty(p)?;
        }
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

    fn kinds_in(tree: &crate::SyntaxTree, kind: NodeKind) -> usize {
        tree.descendants(tree.root())
            .filter(|&id| tree.node(id).kind() == kind)
            .count()
    }

    #[test]
    fn nested_generics_resplit_composite_gt() {
        let tree = parse("class C { java.util.Map<String, java.util.List<Integer>> m; }");
        assert_eq!(kinds_in(&tree, NodeKind::ParameterizedType), 2);
    }

    #[test]
    fn hand_spaced_gt_produces_the_same_shape() {
        let spaced = parse("class C { Map<String, List<Integer> > m; }");
        let composite = parse("class C { Map<String, List<Integer>> m; }");
        assert_eq!(
            kinds_in(&spaced, NodeKind::ParameterizedType),
            kinds_in(&composite, NodeKind::ParameterizedType),
        );
        assert_eq!(
            kinds_in(&spaced, NodeKind::NamedType),
            kinds_in(&composite, NodeKind::NamedType),
        );
    }

    #[test]
    fn triple_nested_generics() {
        let tree = parse("class C { Map<K, Map<K, List<V>>> m; }");
        assert_eq!(kinds_in(&tree, NodeKind::ParameterizedType), 3);
    }

    #[test]
    fn wildcards_and_bounds() {
        let tree = parse("class C { List<? extends Number> a; List<? super Integer> b; List<?> c; }");
        assert_eq!(kinds_in(&tree, NodeKind::WildcardType), 3);
    }

    #[test]
    fn array_types_nest() {
        let tree = parse("class C { int[][] grid; String[] names; }");
        assert_eq!(kinds_in(&tree, NodeKind::ArrayType), 3);
    }

    #[test]
    fn type_parameters_with_intersection_bounds() {
        let tree = parse("class Box<T extends Comparable<T> & java.io.Serializable> { }");
        assert_eq!(kinds_in(&tree, NodeKind::TypeParameter), 1);
    }

    #[test]
    fn diamond_operator() {
        parse("class C { void m() { var list = new java.util.ArrayList<>(); } }");
    }
}
