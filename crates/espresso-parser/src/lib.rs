#![doc = include_str!("../README.md")]

mod arena;
mod error;
mod lexer;
mod limit;
mod line_index;
pub mod metrics;
mod parser;

#[cfg(test)]
mod tests;

pub use crate::arena::{Node, NodeArena, NodeId};
pub use crate::error::{Error, ErrorKind};
pub use crate::lexer::{Lexer, Token, TokenKind};
pub use crate::limit::LimitTracker;
pub use crate::line_index::{LineIndex, Position};
pub use crate::parser::{
    parse_bytes, parse_path, EditRange, LocatedError, NodeKind, ParseFailure, ParseResult, Parser,
    SyntaxTree,
};
