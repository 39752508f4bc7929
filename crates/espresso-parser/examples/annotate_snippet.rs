//! This example outlines using espresso-parser with [annotate-snippets],
//! the error printing library used by the Rust compiler.
//!
//! This allows for a lot of control over how you would like your error
//! output to look before you print it.
//!
//! [annotate-snippets]: https://docs.rs/annotate-snippets/0.10.0/annotate_snippets/

use annotate_snippets::Annotation;
use annotate_snippets::AnnotationType;
use annotate_snippets::Renderer;
use annotate_snippets::Slice;
use annotate_snippets::Snippet;
use annotate_snippets::SourceAnnotation;
use espresso_parser::{ParseResult, Parser};

fn main() {
    let file_name = "Broken.java";
    let src = "\
class Broken {
    void run() {
        int x = 1 +
    }
}
";

    let failure = match Parser::new(src).parse() {
        ParseResult::Success(tree) => {
            println!("parsed cleanly:\n{tree:?}");
            return;
        }
        ParseResult::Failure(failure) => failure,
    };

    // Each error carries the two pieces of data you need for
    // diagnostics: a message and a byte offset, with line and column
    // already resolved.
    for err in failure.errors() {
        let end = (err.offset + 1).min(src.len());
        let snippet = Snippet {
            title: Some(Annotation {
                label: Some(err.message.as_str()),
                id: None,
                annotation_type: AnnotationType::Error,
            }),
            footer: vec![],
            slices: vec![Slice {
                source: src,
                line_start: 1,
                origin: Some(file_name),
                fold: false,
                annotations: vec![SourceAnnotation {
                    label: err.message.as_str(),
                    annotation_type: AnnotationType::Error,
                    range: (err.offset, end),
                }],
            }],
        };

        let renderer = Renderer::styled();
        println!("{}\n", renderer.render(snippet));
    }
}
