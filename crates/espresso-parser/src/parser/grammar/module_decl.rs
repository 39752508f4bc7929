use crate::arena::NodeId;
use crate::parser::grammar::{annotation, name, unit};
use crate::parser::{NodeKind, Parser};
use crate::Error;
use crate::TokenKind;
use crate::T;

/// See: JLS §7.7
///
/// A modular compilation unit. The module declaration itself is the
/// root node; leading imports and annotations become its children.
pub(crate) fn module_unit(p: &mut Parser) -> Result<NodeId, Error> {
    let root = p.start_root(NodeKind::ModuleDeclaration);

    while p.at(T![import]) {
        unit::import_declaration(p)?;
    }
    while p.at(T![@]) {
        annotation::annotation(p)?;
    }
    if p.at(T![open]) {
        p.bump()?;
    }
    p.expect(T![module])?;
    name::qualified_name(p)?;
    p.expect(T!['{'])?;
    while !p.at(T!['}']) && !p.at(TokenKind::Eof) {
        directive(p)?;
    }
    p.expect(T!['}'])?;

    p.finish_root(root);
    Ok(root)
}

/// See: JLS §7.7.1, §7.7.2
///
/// One of the five module directives. `transitive` doubles as a module
/// name (`requires transitive;` requires a module literally named
/// `transitive`), so the modifier only counts when more follows.
fn directive(p: &mut Parser) -> Result<(), Error> {
    match p.peek() {
        T![requires] => {
            let node = p.start_node(NodeKind::RequiresDirective);
            p.bump()?;
            if p.at(T![transitive]) && p.peek_n(1) != T![;] {
                p.bump()?;
            } else if p.at(T![static]) {
                p.bump()?;
            }
            name::qualified_name(p)?;
            p.expect(T![;])?;
            p.finish_node(node);
        }
        T![exports] => {
            let node = p.start_node(NodeKind::ExportsDirective);
            p.bump()?;
            name::qualified_name(p)?;
            if p.at(T![to]) {
                p.bump()?;
                qualified_name_list(p)?;
            }
            p.expect(T![;])?;
            p.finish_node(node);
        }
        T![opens] => {
            let node = p.start_node(NodeKind::OpensDirective);
            p.bump()?;
            name::qualified_name(p)?;
            if p.at(T![to]) {
                p.bump()?;
                qualified_name_list(p)?;
            }
            p.expect(T![;])?;
            p.finish_node(node);
        }
        T![uses] => {
            let node = p.start_node(NodeKind::UsesDirective);
            p.bump()?;
            name::qualified_name(p)?;
            p.expect(T![;])?;
            p.finish_node(node);
        }
        T![provides] => {
            let node = p.start_node(NodeKind::ProvidesDirective);
            p.bump()?;
            name::qualified_name(p)?;
            p.expect(T![with])?;
            qualified_name_list(p)?;
            p.expect(T![;])?;
            p.finish_node(node);
        }
        _ => return Err(p.err("expected a module directive")),
    }
    Ok(())
}

fn qualified_name_list(p: &mut Parser) -> Result<(), Error> {
    loop {
        name::qualified_name(p)?;
        if p.at(T![,]) {
            p.bump()?;
            continue;
        }
        return Ok(());
    }
}
