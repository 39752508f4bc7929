use crate::arena::NodeId;
use crate::parser::{NodeKind, Parser};
use crate::Error;
use crate::T;

/// See: JLS §3.8
///
/// A single identifier. Contextual keywords are accepted; the grammar
/// rules that give them special meaning check for them before coming
/// here.
pub(crate) fn identifier(p: &mut Parser) -> Result<NodeId, Error> {
    if !p.at_identifier() {
        return Err(p.err("expected an identifier"));
    }
    p.leaf(NodeKind::Identifier)
}

/// See: JLS §6.5
///
/// *QualifiedName*:
///     Identifier { **.** Identifier }
///
/// The node spans the whole dotted name; the segments are recomputed
/// from the text by consumers.
pub(crate) fn qualified_name(p: &mut Parser) -> Result<NodeId, Error> {
    if !p.at_identifier() {
        return Err(p.err("expected a name"));
    }

    let node = p.start_node(NodeKind::QualifiedName);
    p.expect_identifier()?;
    while p.at(T![.]) && Parser::is_identifier_like(p.peek_n(1)) {
        p.bump()?;
        p.expect_identifier()?;
    }
    p.finish_node(node);
    Ok(node)
}

#[cfg(test)]
mod test {
    use crate::{NodeKind, ParseResult, Parser};

    #[test]
    fn qualified_name_spans_all_segments() {
        let source = "package com.example.deep;";
        let ParseResult::Success(tree) = Parser::new(source).parse() else {
            panic!("expected success");
        };

        let package = tree.children(tree.root())[0];
        let name = *tree
            .children(package)
            .iter()
            .find(|&&id| tree.node(id).kind() == NodeKind::QualifiedName)
            .unwrap();
        assert_eq!(tree.text(name), "com.example.deep");
    }
}
