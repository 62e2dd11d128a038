//! Diagnostic errors produced by the tree builder.

use crate::diagnostics::{DiagnosticRecord, DiagnosticRegistry};

macro_rules! define_errors {
    ($($(#[doc = $doc:expr])+ $code:ident: $error:ident $gen_macro:tt)*) => {$(
        $(#[doc = $doc])+
        pub(crate) struct $error;

        impl DiagnosticRecord for $error {
            const CODE: &'static str = stringify!($code);
            const EXPLANATION: &'static str = concat!($($doc, "\n"),+);
        })*

        /// Diagnostic errors produced by the tree builder.
        pub(crate) struct TreeErrors;

        impl DiagnosticRegistry for TreeErrors {
            fn codes_with_explanations() -> Vec<(&'static str, &'static str)> {
                let mut vec = Vec::new();
                $(vec.push(($error::CODE, $error::EXPLANATION));)*
                vec
            }
        }

        $(
            macro_rules! $error $gen_macro
        )*
    };
}

define_errors! {
    ///A well-formed symi expression reduces to exactly one top-level operation, whose extent
    ///covers the whole input and which anchors the operation tree.
    ///
    ///This error fires when no such operation exists — the input is empty, or it consists of
    ///several expressions standing side by side with nothing connecting them:
    ///
    ///```text
    ///f(x) g(y)
    ///     ^^^^- not connected to f(x)
    ///```
    ///
    ///Join the pieces with an operator, or rewrite them as separate expressions.
    T0001: NoUniqueRoot {
        (empty $span:expr) => {{
            use crate::diagnostics::*;

            Diagnostic::span_err(
                $span,
                "Expression has no root operation",
                $crate::tree::errors::NoUniqueRoot::CODE,
                "nothing to build a tree from".to_string(),
            )
        }};
        (multiple $span:expr, $count:expr) => {{
            use crate::diagnostics::*;

            Diagnostic::span_err(
                $span,
                "Expression has no unique root operation",
                $crate::tree::errors::NoUniqueRoot::CODE,
                format!("found {} disjoint top-level operations", $count),
            )
            .with_note("operations must be connected by an operator or a function call")
        }};
    }

    ///Operation extents in a symi expression either nest or are disjoint. Two operations whose
    ///extents partially overlap cannot be arranged into a tree; such a catalog only arises from
    ///input the notation does not support.
    T0002: OverlappingOperations {
        ($span:expr) => {{
            use crate::diagnostics::*;

            Diagnostic::span_err(
                $span,
                "Operations overlap without nesting",
                $crate::tree::errors::OverlappingOperations::CODE,
                "this operation is claimed by two parents".to_string(),
            )
        }}
    }
}
