use crate::arena::NodeId;
use crate::parser::grammar::{expression, name};
use crate::parser::{NodeKind, Parser};
use crate::Error;
use crate::T;

/// See: JLS §9.7
///
/// *Annotation*:
///     **@** TypeName [ **(** [ ElementValuePairList | ElementValue ] **)** ]
pub(crate) fn annotation(p: &mut Parser) -> Result<NodeId, Error> {
    let node = p.start_node(NodeKind::Annotation);
    p.expect(T![@])?;
    name::qualified_name(p)?;
    if p.at(T!['(']) {
        annotation_arguments(p)?;
    }
    p.finish_node(node);
    Ok(node)
}

fn annotation_arguments(p: &mut Parser) -> Result<(), Error> {
    p.expect(T!['('])?;
    if p.at(T![')']) {
        p.bump()?;
        return Ok(());
    }

    // `name = value` pairs, or a single value for the `value` element.
    // `=` is a single token, so one peek distinguishes `a = b` from the
    // expression `a == b`.
    if p.at_identifier() && p.peek_n(1) == T![=] {
        loop {
            element_value_pair(p)?;
            if p.at(T![,]) {
                p.bump()?;
                continue;
            }
            break;
        }
    } else {
        element_value(p)?;
    }

    p.expect(T![')'])?;
    Ok(())
}

fn element_value_pair(p: &mut Parser) -> Result<(), Error> {
    let node = p.start_node(NodeKind::AnnotationElement);
    name::identifier(p)?;
    p.expect(T![=])?;
    element_value(p)?;
    p.finish_node(node);
    Ok(())
}

/// See: JLS §9.7.1
///
/// *ElementValue*:
///     ConditionalExpression | ElementValueArrayInitializer | Annotation
pub(crate) fn element_value(p: &mut Parser) -> Result<(), Error> {
    match p.peek() {
        T![@] => {
            annotation(p)?;
        }
        T!['{'] => {
            element_value_array(p)?;
        }
        _ => {
            expression::conditional(p)?;
        }
    }
    Ok(())
}

fn element_value_array(p: &mut Parser) -> Result<(), Error> {
    let node = p.start_node(NodeKind::ArrayInitializer);
    p.expect(T!['{'])?;
    while !p.at(T!['}']) && !p.at(crate::TokenKind::Eof) {
        element_value(p)?;
        if p.at(T![,]) {
            p.bump()?;
        } else {
            break;
        }
    }
    p.expect(T!['}'])?;
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

    #[test]
    fn marker_annotation() {
        let tree = parse("@Deprecated class C { }");
        let class = tree.children(tree.root())[0];
        let annotation = tree.children(class)[0];
        assert_eq!(tree.node(annotation).kind(), NodeKind::Annotation);
        assert_eq!(tree.text(annotation), "@Deprecated");
    }

    #[test]
    fn single_element_annotation() {
        let tree = parse(r#"@SuppressWarnings("unchecked") class C { }"#);
        let class = tree.children(tree.root())[0];
        let annotation = tree.children(class)[0];
        assert_eq!(tree.text(annotation), r#"@SuppressWarnings("unchecked")"#);
    }

    #[test]
    fn normal_annotation_with_pairs_and_array() {
        let tree = parse(r#"@Target(value = {1, 2}, name = "x") class C { }"#);
        let class = tree.children(tree.root())[0];
        let annotation = tree.children(class)[0];
        assert_eq!(tree.node(annotation).kind(), NodeKind::Annotation);

        let elements: Vec<_> = tree
            .children(annotation)
            .iter()
            .filter(|&&id| tree.node(id).kind() == NodeKind::AnnotationElement)
            .collect();
        assert_eq!(elements.len(), 2);
    }

    #[test]
    fn nested_annotation_value() {
        parse("@Outer(@Inner) class C { }");
    }
}
