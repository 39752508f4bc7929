use crate::arena::NodeId;
use crate::parser::grammar::{annotation, declaration, module_decl, name};
use crate::parser::{NodeKind, Parser};
use crate::Error;
use crate::TokenKind;
use crate::T;

use std::iter::Peekable;

/// See: JLS §7.3
///
/// Dispatch between the three compilation unit forms: modular, ordinary
/// and implicitly declared class (JEP 512). The decision uses bounded
/// look-ahead only; nothing is consumed before the winning form starts.
pub(crate) fn parse_unit(p: &mut Parser) -> Result<NodeId, Error> {
    if at_module_unit(p) {
        return module_decl::module_unit(p);
    }
    ordinary_unit(p)
}

fn ordinary_unit(p: &mut Parser) -> Result<NodeId, Error> {
    let root = p.start_root(NodeKind::CompilationUnit);

    if at_package_declaration(p) {
        package_declaration(p)?;
    }
    while p.at(T![import]) {
        import_declaration(p)?;
    }

    while !p.at(TokenKind::Eof) {
        if p.at(T![;]) {
            p.leaf(NodeKind::EmptyStatement)?;
        } else if declaration::at_type_declaration(p) {
            declaration::type_declaration(p)?;
        } else {
            // No type declaration keyword but a member start: an
            // implicitly declared class. Members hang directly off the
            // synthetic compilation unit root.
            declaration::member(p, false)?;
        }
    }

    p.finish_root(root);
    Ok(root)
}

/// See: JLS §7.4.1
///
/// *PackageDeclaration*:
///     { Annotation } **package** QualifiedName **;**
fn package_declaration(p: &mut Parser) -> Result<(), Error> {
    let node = p.start_node(NodeKind::PackageDeclaration);
    while p.at(T![@]) {
        annotation::annotation(p)?;
    }
    p.expect(T![package])?;
    name::qualified_name(p)?;
    p.expect(T![;])?;
    p.finish_node(node);
    Ok(())
}

/// See: JLS §7.5, JEP 511
///
/// Single-type, on-demand, static and module import forms.
pub(crate) fn import_declaration(p: &mut Parser) -> Result<(), Error> {
    let kind = if p.peek_n(1) == T![static] {
        NodeKind::StaticImportDeclaration
    } else if p.peek_n(1) == T![module] && Parser::is_identifier_like(p.peek_n(2)) {
        // `import module M;` — but `import module.a.B;` is an ordinary
        // import from a package named `module`.
        NodeKind::ModuleImportDeclaration
    } else {
        NodeKind::ImportDeclaration
    };

    let node = p.start_node(kind);
    p.expect(T![import])?;
    match kind {
        NodeKind::StaticImportDeclaration => {
            p.bump()?;
        }
        NodeKind::ModuleImportDeclaration => {
            p.bump()?;
        }
        _ => {}
    }
    name::qualified_name(p)?;
    if p.at(T![.]) && p.peek_n(1) == T![*] {
        p.bump()?;
        p.bump()?;
    }
    p.expect(T![;])?;
    p.finish_node(node);
    Ok(())
}

fn at_package_declaration(p: &Parser) -> bool {
    let mut iter = p.lookahead().peekable();
    loop {
        match iter.peek().copied() {
            Some(T![@]) => {
                if !skip_annotation(&mut iter) {
                    return false;
                }
            }
            Some(T![package]) => return true,
            _ => return false,
        }
    }
}

/// Detect a modular compilation unit: optional imports and annotations,
/// then `[open] module Name… {`. A lone `module` used as an ordinary
/// identifier (say, a field of type `module` in an implicit class) does
/// not match because the header shape `module Name {` is verified.
fn at_module_unit(p: &Parser) -> bool {
    let mut iter = p.lookahead().peekable();
    loop {
        match iter.peek().copied() {
            Some(T![import]) => {
                for kind in iter.by_ref() {
                    if kind == T![;] || kind == TokenKind::Eof {
                        break;
                    }
                }
            }
            Some(T![@]) => {
                if !skip_annotation(&mut iter) {
                    return false;
                }
            }
            Some(T![open]) => {
                iter.next();
                return is_module_header(&mut iter);
            }
            Some(T![module]) => {
                return is_module_header(&mut iter);
            }
            _ => return false,
        }
    }
}

fn is_module_header(iter: &mut Peekable<impl Iterator<Item = TokenKind>>) -> bool {
    if iter.next() != Some(T![module]) {
        return false;
    }
    match iter.next() {
        Some(kind) if Parser::is_identifier_like(kind) => {}
        _ => return false,
    }
    loop {
        match iter.next() {
            Some(T![.]) => match iter.next() {
                Some(kind) if Parser::is_identifier_like(kind) => {}
                _ => return false,
            },
            Some(T!['{']) => return true,
            _ => return false,
        }
    }
}

/// Skip one `@Name(…)` annotation in a look-ahead stream. Returns false
/// when the shape is not an annotation (e.g. `@interface`).
fn skip_annotation(iter: &mut Peekable<impl Iterator<Item = TokenKind>>) -> bool {
    iter.next();
    match iter.next() {
        Some(kind) if Parser::is_identifier_like(kind) => {}
        _ => return false,
    }
    while iter.peek() == Some(&T![.]) {
        iter.next();
        match iter.next() {
            Some(kind) if Parser::is_identifier_like(kind) => {}
            _ => return false,
        }
    }
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
                Some(TokenKind::Eof) | None => return false,
                Some(_) => {}
            }
        }
    }
    true
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
    fn annotated_package_declaration_spans_from_the_annotation() {
        let tree = parse("@Deprecated\npackage a.b;\n");
        let root = tree.root();
        assert_eq!(tree.node(root).kind(), NodeKind::CompilationUnit);

        let children = tree.children(root);
        assert_eq!(children.len(), 1);
        let package = children[0];
        assert_eq!(tree.node(package).kind(), NodeKind::PackageDeclaration);
        assert_eq!(tree.node(package).start(), 0);
        assert_eq!(tree.text(package), "@Deprecated\npackage a.b;");

        let name = tree
            .children(package)
            .iter()
            .copied()
            .find(|&id| tree.node(id).kind() == NodeKind::QualifiedName)
            .unwrap();
        assert_eq!(tree.text(name), "a.b");
    }

    #[test]
    fn import_forms() {
        let tree = parse(
            "import java.util.List; import java.util.*; import static java.lang.Math.max; import module java.base; class C { }",
        );
        assert_eq!(count(&tree, NodeKind::ImportDeclaration), 2);
        assert_eq!(count(&tree, NodeKind::StaticImportDeclaration), 1);
        assert_eq!(count(&tree, NodeKind::ModuleImportDeclaration), 1);
    }

    #[test]
    fn import_from_a_package_named_module() {
        let tree = parse("import module.a.B; class C { }");
        assert_eq!(count(&tree, NodeKind::ImportDeclaration), 1);
        assert_eq!(count(&tree, NodeKind::ModuleImportDeclaration), 0);
    }

    #[test]
    fn implicit_class_members_hang_off_the_root() {
        let tree = parse("String greeting() { return \"hi\"; }\nvoid main() { }\n");
        let root = tree.root();
        assert_eq!(tree.node(root).kind(), NodeKind::CompilationUnit);
        let methods = tree
            .children(root)
            .iter()
            .filter(|&&id| tree.node(id).kind() == NodeKind::MethodDeclaration)
            .count();
        assert_eq!(methods, 2);
    }

    #[test]
    fn implicit_class_with_imports_and_fields() {
        let tree = parse("import java.util.List;\nint counter = 0;\nvoid main() { counter++; }\n");
        assert_eq!(count(&tree, NodeKind::ImportDeclaration), 1);
        assert_eq!(count(&tree, NodeKind::FieldDeclaration), 1);
        assert_eq!(count(&tree, NodeKind::MethodDeclaration), 1);
    }

    #[test]
    fn a_field_of_type_module_is_not_a_module_unit() {
        let tree = parse("module x;");
        assert_eq!(tree.node(tree.root()).kind(), NodeKind::CompilationUnit);
        assert_eq!(count(&tree, NodeKind::FieldDeclaration), 1);
    }

    #[test]
    fn several_top_level_types_with_stray_semicolons() {
        let tree = parse("class A { } ; interface B { } ; enum E { X }");
        assert_eq!(count(&tree, NodeKind::ClassDeclaration), 1);
        assert_eq!(count(&tree, NodeKind::InterfaceDeclaration), 1);
        assert_eq!(count(&tree, NodeKind::EnumDeclaration), 1);
    }
}
