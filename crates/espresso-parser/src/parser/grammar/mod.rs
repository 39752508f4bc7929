//! The Java grammar, one module per area. Every production is a free
//! function taking the parser; composite productions open a node, parse
//! children and finalize the node's length on the way out. The first
//! error aborts the whole parse.

pub(crate) mod annotation;
pub(crate) mod declaration;
pub(crate) mod expression;
pub(crate) mod module_decl;
pub(crate) mod name;
pub(crate) mod pattern;
pub(crate) mod statement;
pub(crate) mod ty;
pub(crate) mod unit;
