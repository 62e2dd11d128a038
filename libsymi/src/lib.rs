//! libsymi is the engine behind symi, a rewriter for calculator notation.
//!
//! The engine takes an expression written in symi's infix notation, discovers every operator
//! application, function call, subscript, and list literal in it (the [catalog](parse_catalog)),
//! arranges the catalog into an operation [tree](build_tree) by span containment, and
//! [renders](render_tree) the tree back to text with minimal parenthesization. Structural edits
//! happen between the last two steps: [renaming](rename) operators and functions,
//! [flattening pipes](flatten_pipes), [wrapping leaves](apply_to_leaves). The
//! [translation layer](translate) composes those edits into the standard computer-algebra
//! syntax an external engine consumes; the algebra itself is out of symi's hands.
//!
//! Everything is a pure function of an immutable input string and the static operator table:
//! catalogs and trees are built fresh per call and discarded with it.

#![deny(warnings)]
#![deny(missing_docs)]

pub mod common;
pub mod diagnostics;

mod catalog;
pub use catalog::{normalize, parse_catalog, Catalog, Notation, OpSpec, Operand, Operation};
pub use catalog::Priority;

mod tree;
pub use tree::{build_tree, ExprTree};

mod render;
pub use render::{render_node, render_tree};

mod transform;
pub use transform::{
    apply_to_leaves, flatten_pipes, is_supported, rename, replace_variable, rewrite,
    root_operation, validate,
};

mod translate;
pub use translate::{translate, TranslationTable};

mod emit;
pub use emit::{Emit, EmitFormat};

mod utils;
