//! End-to-end scenarios and the universal invariants every parse must
//! uphold: token coverage and monotonicity, node containment, child
//! ordering, parent-child consistency, result exclusivity.

use crate::{
    EditRange, Lexer, NodeKind, ParseResult, Parser, SyntaxTree, TokenKind,
};

use expect_test::expect;
use pretty_assertions::assert_eq;
use std::time::Duration;
use unindent::unindent;

fn parse(source: &str) -> SyntaxTree {
    match Parser::new(source).parse() {
        ParseResult::Success(tree) => tree,
        ParseResult::Failure(failure) => panic!("{}", failure.format_message(None)),
    }
}

fn fail(source: &str) -> crate::ParseFailure {
    match Parser::new(source).parse() {
        ParseResult::Success(_) => panic!("expected a failure"),
        ParseResult::Failure(failure) => failure,
    }
}

fn count(tree: &SyntaxTree, kind: NodeKind) -> usize {
    tree.descendants(tree.root())
        .filter(|&id| tree.node(id).kind() == kind)
        .count()
}

/// §8.1: token coverage, monotonicity and the EOF singleton.
fn check_token_invariants(source: &str) {
    let tokens = Lexer::new(source).lex().unwrap();
    assert!(!tokens.is_empty());

    for token in &tokens {
        assert_eq!(
            &source[token.index()..token.end()],
            token.data(),
            "token does not cover its span: {token:?}"
        );
    }
    for pair in tokens.windows(2) {
        assert!(
            pair[0].end() <= pair[1].index(),
            "tokens overlap or regress: {:?} then {:?}",
            pair[0],
            pair[1]
        );
    }

    let eof_count = tokens
        .iter()
        .filter(|token| token.kind() == TokenKind::Eof)
        .count();
    assert_eq!(eof_count, 1);
    let last = tokens.last().unwrap();
    assert_eq!(last.kind(), TokenKind::Eof);
    assert_eq!(last.index(), source.len());
    assert!(last.data().is_empty());
}

/// §8.1: containment, ordering and parent-child consistency over a
/// whole tree.
fn check_tree_invariants(tree: &SyntaxTree) {
    let root = tree.root();
    assert_eq!(tree.node(root).parent(), None);

    for id in tree.descendants(root) {
        let node = tree.node(id);
        assert!(node.end() <= tree.source().len());

        let mut previous_start = node.start();
        for &child in tree.children(id) {
            let child_node = tree.node(child);
            assert_eq!(child_node.parent(), Some(id), "parent link broken at {child}");
            assert!(
                node.start() <= child_node.start() && child_node.end() <= node.end(),
                "containment violated: {:?}@{}..{} outside {:?}@{}..{}",
                child_node.kind(),
                child_node.start(),
                child_node.end(),
                node.kind(),
                node.start(),
                node.end(),
            );
            assert!(
                child_node.start() >= previous_start,
                "children out of source order under {:?}",
                node.kind()
            );
            previous_start = child_node.start();
        }
    }
}

const KITCHEN_SINK: &str = r#"
package com.example.app;

import java.util.List;
import java.util.function.*;
import static java.util.Objects.requireNonNull;

/** Entry point. */
public sealed class App permits Cli {
    static final int LIMIT = 0x7FFF_FFFF;
    private List<Function<String, Integer>> handlers;

    // counts invocations
    int calls;

    <T extends Comparable<T>> T max(T a, T b) {
        return a.compareTo(b) > 0 ? a : b;
    }

    int run(Object arg) {
        var total = 0;
        for (int i = 0; i < LIMIT; i++) {
            total += switch (arg) {
                case Integer n when n > 0 -> n;
                case String s -> s.length();
                case int[] nums -> nums.length;
                case null, default -> 0;
            };
            if (total > 1_000) break;
        }
        try (var scope = open()) {
            handlers.forEach(h -> h.apply("x"));
        } catch (RuntimeException | Error e) {
            throw new IllegalStateException((String) null, e);
        } finally {
            calls++;
        }
        return (int) -total;
    }

    AutoCloseable open() {
        return () -> { };
    }
}

non-sealed class Cli extends App { }
"#;

#[test]
fn kitchen_sink_upholds_all_invariants() {
    check_token_invariants(KITCHEN_SINK);
    let tree = parse(KITCHEN_SINK);
    check_tree_invariants(&tree);
}

#[test]
fn keyword_round_trip() {
    let words = [
        "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class",
        "const", "continue", "default", "do", "double", "else", "enum", "extends", "final",
        "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
        "interface", "long", "native", "new", "package", "private", "protected", "public",
        "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this",
        "throw", "throws", "transient", "try", "void", "volatile", "while", "_", "var", "yield",
        "record", "module", "open", "to", "requires", "exports", "opens", "uses", "provides",
        "with", "transitive", "sealed", "permits", "when", "true", "false", "null",
    ];
    for word in words {
        let tokens = Lexer::new(word).lex().unwrap();
        assert_eq!(tokens.len(), 2, "{word}");
        assert_eq!(
            tokens[0].kind(),
            TokenKind::from_keyword(word).unwrap(),
            "{word}"
        );
    }
}

#[test]
fn comment_preservation() {
    let source = unindent(
        "
        // line
        /// markdown doc
        class C {
            /* block */
            int x; /** javadoc */
            int y;
        }
        ",
    );
    let comment_tokens: Vec<_> = Lexer::new(&source)
        .lex()
        .unwrap()
        .into_iter()
        .filter(|token| token.kind().is_comment())
        .map(|token| (token.index(), token.end()))
        .collect();
    assert_eq!(comment_tokens.len(), 4);

    let tree = parse(&source);
    let mut comment_nodes: Vec<_> = tree
        .descendants(tree.root())
        .filter(|&id| tree.node(id).kind().is_comment())
        .map(|id| (tree.node(id).start(), tree.node(id).end()))
        .collect();
    comment_nodes.sort_unstable();
    assert_eq!(comment_nodes, comment_tokens);

    let kinds: Vec<_> = tree
        .descendants(tree.root())
        .map(|id| tree.node(id).kind())
        .filter(|kind| kind.is_comment())
        .collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::LineComment,
            NodeKind::MarkdownComment,
            NodeKind::BlockComment,
            NodeKind::DocComment,
        ]
    );
}

#[test]
fn scenario_annotated_package_info() {
    let tree = parse("@Deprecated\npackage a.b;\n");
    let dump = expect![[r#"
        CompilationUnit@0..25
          PackageDeclaration@0..24
            Annotation@0..11
              QualifiedName@1..11
            QualifiedName@20..23
    "#]];
    dump.assert_eq(&format!("{tree:?}"));
}

#[test]
fn scenario_nested_generics_field() {
    let source = "class C { java.util.Map<String, java.util.List<Integer>> m; }";
    let tree = parse(source);
    check_tree_invariants(&tree);

    let field = tree
        .descendants(tree.root())
        .find(|&id| tree.node(id).kind() == NodeKind::FieldDeclaration)
        .unwrap();
    let parameterized: Vec<_> = tree
        .descendants(field)
        .filter(|&id| tree.node(id).kind() == NodeKind::ParameterizedType)
        .collect();
    assert_eq!(parameterized.len(), 2);
    // The inner parameterized type nests inside the outer one.
    assert!(tree
        .descendants(parameterized[0])
        .any(|id| id == parameterized[1]));
}

#[test]
fn scenario_cast_vs_parenthesized() {
    let source = "class C { void m() { int x = (int) -1; int y = (a) - 1; } }";
    let tree = parse(source);

    let declarators: Vec<_> = tree
        .descendants(tree.root())
        .filter(|&id| tree.node(id).kind() == NodeKind::VariableDeclarator)
        .collect();
    assert_eq!(declarators.len(), 2);

    let x_kinds: Vec<_> = tree
        .descendants(declarators[0])
        .map(|id| tree.node(id).kind())
        .collect();
    assert!(x_kinds.contains(&NodeKind::CastExpression));

    let y_kinds: Vec<_> = tree
        .descendants(declarators[1])
        .map(|id| tree.node(id).kind())
        .collect();
    assert!(y_kinds.contains(&NodeKind::BinaryExpression));
    assert!(!y_kinds.contains(&NodeKind::CastExpression));
}

#[test]
fn scenario_switch_expression_with_patterns() {
    let source =
        "class C { void m(Object v) { Object o = switch (v) { case Integer i when i > 0 -> i; case null, default -> 0; }; } }";
    let tree = parse(source);
    check_tree_invariants(&tree);

    let switch_expression = tree
        .descendants(tree.root())
        .find(|&id| tree.node(id).kind() == NodeKind::SwitchExpression)
        .unwrap();
    let cases: Vec<_> = tree
        .children(switch_expression)
        .iter()
        .copied()
        .filter(|&id| tree.node(id).kind() == NodeKind::SwitchCase)
        .collect();
    assert_eq!(cases.len(), 2);

    let first_kinds: Vec<_> = tree
        .descendants(cases[0])
        .map(|id| tree.node(id).kind())
        .collect();
    assert!(first_kinds.contains(&NodeKind::TypePattern));
    assert!(first_kinds.contains(&NodeKind::Guard));

    let second_kinds: Vec<_> = tree
        .children(cases[1])
        .iter()
        .map(|&id| tree.node(id).kind())
        .collect();
    assert!(second_kinds.contains(&NodeKind::NullLabel));
    assert!(second_kinds.contains(&NodeKind::DefaultLabel));
}

#[test]
fn scenario_module_file() {
    let source =
        "module a.b { requires java.base; exports a.b.c to x.y; uses a.b.S; provides a.b.S with a.b.Impl; }";
    let tree = parse(source);
    check_tree_invariants(&tree);

    assert_eq!(tree.node(tree.root()).kind(), NodeKind::ModuleDeclaration);
    let directives: Vec<_> = tree
        .children(tree.root())
        .iter()
        .map(|&id| tree.node(id).kind())
        .filter(|kind| kind.is_module_directive())
        .collect();
    assert_eq!(
        directives,
        vec![
            NodeKind::RequiresDirective,
            NodeKind::ExportsDirective,
            NodeKind::UsesDirective,
            NodeKind::ProvidesDirective,
        ]
    );
}

#[test]
fn scenario_missing_semicolon() {
    let source = "class C { void m() { return }";
    let failure = fail(source);
    let errors = failure.errors();
    assert_eq!(errors.len(), 1);

    let error = &errors[0];
    let brace_offset = source.rfind('}').unwrap();
    assert_eq!(error.offset, brace_offset);
    assert!(error.message.contains("';'"), "{}", error.message);
    assert_eq!(error.line, 1);
    assert_eq!(error.column as usize, brace_offset + 1);

    let rendered = failure.format_message(Some("C.java"));
    assert!(rendered.starts_with("C.java:1:"), "{rendered}");
}

#[test]
fn whitespace_only_inputs_are_rejected_as_empty() {
    for source in ["", " ", "\n", " \t\r\n "] {
        let failure = fail(source);
        assert_eq!(failure.errors().len(), 1);
        assert!(
            failure.errors()[0].message.contains("empty"),
            "{:?}",
            failure.errors()[0]
        );
    }
}

#[test]
fn source_size_boundary() {
    let source = "class C { }";
    assert!(Parser::new(source)
        .max_source_size(source.len())
        .parse()
        .is_success());

    let failure = match Parser::new(source).max_source_size(source.len() - 1).parse() {
        ParseResult::Failure(failure) => failure,
        ParseResult::Success(_) => panic!("expected failure"),
    };
    assert!(failure.errors()[0].message.contains("maximum"));
}

#[test]
fn recursion_depth_is_bounded() {
    let deep = format!("class C {{ int x = {}1{}; }}", "(".repeat(200), ")".repeat(200));
    assert!(Parser::new(&deep).parse().is_success());

    let failure = match Parser::new(&deep).recursion_limit(50).parse() {
        ParseResult::Failure(failure) => failure,
        ParseResult::Success(_) => panic!("expected failure"),
    };
    assert!(failure.errors()[0].message.contains("recursion limit"));
}

#[test]
fn zero_timeout_aborts_the_parse() {
    let failure = match Parser::new("class C { int x = 1 + 2; }")
        .timeout(Duration::ZERO)
        .parse()
    {
        ParseResult::Failure(failure) => failure,
        ParseResult::Success(_) => panic!("expected failure"),
    };
    assert!(failure.errors()[0].message.contains("deadline"));
}

#[test]
fn token_limit_propagates_as_a_failure() {
    let failure = match Parser::new("class C { int a; int b; }").token_limit(4).parse() {
        ParseResult::Failure(failure) => failure,
        ParseResult::Success(_) => panic!("expected failure"),
    };
    assert!(failure.errors()[0].message.contains("token limit"));
}

#[test]
fn stray_at_sign_produces_exactly_one_error() {
    let failure = fail("@");
    assert_eq!(failure.errors().len(), 1);
}

#[test]
fn unterminated_string_produces_exactly_one_error() {
    let failure = fail("class C { String s = \"oops; }");
    assert_eq!(failure.errors().len(), 1);
    assert!(failure.errors()[0].message.contains("unterminated string"));
}

#[test]
fn unclosed_text_block_produces_exactly_one_error() {
    let failure = fail("class C { String s = \"\"\"\n never closed; }");
    assert_eq!(failure.errors().len(), 1);
    assert!(failure.errors()[0].message.contains("unclosed text block"));
}

#[test]
fn invalid_utf8_is_rejected_before_lexing() {
    let result = crate::parse_bytes(&[0x63, 0x6C, 0xFF, 0xFE]);
    let ParseResult::Failure(failure) = result else {
        panic!("expected failure");
    };
    assert!(failure.errors()[0].message.contains("UTF-8"));
}

#[test]
fn reparse_applies_the_edit_and_recycles_the_arena() {
    let tree = parse("class A { int x; }");
    let edit = EditRange {
        start_offset: 6,
        old_length: 1,
        new_length: 7,
        new_text: "Renamed".to_string(),
    };
    let ParseResult::Success(reparsed) = tree.reparse(&edit) else {
        panic!("expected success");
    };
    assert_eq!(reparsed.source(), "class Renamed { int x; }");

    let class = reparsed
        .descendants(reparsed.root())
        .find(|&id| reparsed.node(id).kind() == NodeKind::ClassDeclaration)
        .unwrap();
    let name = reparsed
        .children(class)
        .iter()
        .copied()
        .find(|&id| reparsed.node(id).kind() == NodeKind::Identifier)
        .unwrap();
    assert_eq!(reparsed.text(name), "Renamed");
    check_tree_invariants(&reparsed);
}

#[test]
fn cloned_trees_share_the_same_nodes() {
    let tree = parse("class A { }");
    let clone = tree.clone();
    assert_eq!(tree.root(), clone.root());
    assert_eq!(tree.node_count(), clone.node_count());
}

#[test]
fn node_records_stay_within_sixteen_bytes() {
    // kind (1 byte, padded) + start (4) + length (4) + parent (4).
    assert!(std::mem::size_of::<NodeKind>() == 1);
}

#[test]
fn empty_module_declaration_has_a_correct_length() {
    let source = "module m { }";
    let tree = parse(source);
    let root = tree.node(tree.root());
    assert_eq!(root.kind(), NodeKind::ModuleDeclaration);
    assert_eq!(root.length(), source.len());
}
