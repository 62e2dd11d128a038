//! Definitions of types used in the symi catalog.

use crate::catalog::operators::Priority;
use crate::common::Span;

/// How an [Operation] is spelled in notation text.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum Notation {
    /// `name(arg, ...)` — a function call.
    Call,
    /// `name[arg, ...]` — a subscript.
    Subscript,
    /// `[item, ...]` — a list literal.
    List,
    /// `OP operand` — a prefix unary operator.
    Prefix,
    /// `lhs OP rhs`, or a flattened commutative run — an infix operator.
    Infix,
    /// `operand OP` — a postfix unary operator.
    Postfix,
}

impl Notation {
    /// Whether the notation is function-like (calls and subscripts).
    pub fn is_function(&self) -> bool {
        matches!(self, Notation::Call | Notation::Subscript)
    }

    /// Whether the notation delimits itself, making parenthesization around it redundant.
    pub fn is_self_delimiting(&self) -> bool {
        matches!(self, Notation::Call | Notation::Subscript | Notation::List)
    }
}

/// One operand of an [Operation]: where it is, and what it says.
#[derive(PartialEq, Clone, Debug)]
pub struct Operand {
    /// The operand's location in the normalized source.
    pub span: Span,
    /// The operand's literal text.
    pub text: String,
}

/// Names an operator or function the way transforms address it.
///
/// Operator names use the catalog's spelling for ambiguous glyphs: a trailing `u` selects the
/// prefix-unary variant (`-u`, `@u`, `$u`) and a trailing `s` the postfix variant (`!s`, `'s`).
/// Subscripts are addressed as `name[]`, list literals as `[]`.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct OpSpec {
    /// The operator glyph or function name, in transform spelling.
    pub name: String,
    /// True for function-like operations (calls and subscripts).
    pub is_function: bool,
}

impl OpSpec {
    /// Names a function.
    pub fn function<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            is_function: true,
        }
    }

    /// Names a binary operator.
    pub fn operator<S: Into<String>>(glyph: S) -> Self {
        Self {
            name: glyph.into(),
            is_function: false,
        }
    }

    /// Names the prefix-unary variant of an operator.
    pub fn prefix<S: Into<String>>(glyph: S) -> Self {
        Self {
            name: format!("{}u", glyph.into()),
            is_function: false,
        }
    }

    /// Names the postfix-unary variant of an operator.
    pub fn postfix<S: Into<String>>(glyph: S) -> Self {
        Self {
            name: format!("{}s", glyph.into()),
            is_function: false,
        }
    }

    /// Names a subscript of `name`.
    pub fn subscript<S: Into<String>>(name: S) -> Self {
        Self {
            name: format!("{}[]", name.into()),
            is_function: true,
        }
    }

    /// Names list literals.
    pub fn list() -> Self {
        Self {
            name: "[]".into(),
            is_function: false,
        }
    }
}

/// A parsed operator application, function call, subscript, or list literal.
#[derive(Debug)]
pub struct Operation {
    /// The operator glyph or function name.
    pub symbol: String,
    /// How the operation is spelled.
    pub notation: Notation,
    /// The precedence bucket the operation belongs to.
    pub priority: Priority,
    /// The full extent of the operation in the normalized source, glyphs included.
    pub span: Span,
    /// The operation's operands, in notation order.
    pub operands: Vec<Operand>,
    /// Child operation handles, one per operand. `None` marks a leaf operand; the tree builder
    /// fills the rest.
    pub children: Vec<Option<usize>>,
}

impl Operation {
    pub(crate) fn new(
        symbol: String,
        notation: Notation,
        priority: Priority,
        span: Span,
        operands: Vec<Operand>,
    ) -> Self {
        let children = vec![None; operands.len()];
        Self {
            symbol,
            notation,
            priority,
            span,
            operands,
            children,
        }
    }

    /// Whether the operation is function-like (a call or a subscript).
    pub fn is_function(&self) -> bool {
        self.notation.is_function()
    }

    /// The operation's identity in transform spelling (see [OpSpec]).
    pub fn spec(&self) -> OpSpec {
        match self.notation {
            Notation::Call => OpSpec::function(self.symbol.clone()),
            Notation::Subscript => OpSpec::subscript(self.symbol.clone()),
            Notation::List => OpSpec::list(),
            Notation::Prefix => OpSpec::prefix(self.symbol.clone()),
            Notation::Infix => OpSpec::operator(self.symbol.clone()),
            Notation::Postfix => OpSpec::postfix(self.symbol.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_spelling() {
        let specs = [
            (OpSpec::function("cos"), ("cos", true)),
            (OpSpec::operator("**"), ("**", false)),
            (OpSpec::prefix("-"), ("-u", false)),
            (OpSpec::postfix("!"), ("!s", false)),
            (OpSpec::subscript("a"), ("a[]", true)),
            (OpSpec::list(), ("[]", false)),
        ];
        for (spec, (name, is_function)) in &specs {
            assert_eq!(spec.name, *name);
            assert_eq!(spec.is_function, *is_function);
        }
    }
}
