//! Parse a Java file given on the command line and dump its tree, one
//! node per line in `Kind@start..end` form.

use espresso_parser::{parse_path, ParseResult};
use std::path::PathBuf;

fn main() {
    let path = match std::env::args_os().nth(1) {
        Some(path) => PathBuf::from(path),
        None => {
            eprintln!("usage: tree <file.java>");
            std::process::exit(2);
        }
    };

    match parse_path(&path) {
        ParseResult::Success(tree) => {
            print!("{tree:?}");
            println!("{} nodes", tree.node_count());
        }
        ParseResult::Failure(failure) => {
            eprint!("{}", failure.format_message(path.to_str()));
            std::process::exit(1);
        }
    }
}
