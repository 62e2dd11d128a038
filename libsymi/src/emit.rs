//! Emit strategies for symi catalogs and trees.

use crate::catalog::Catalog;
use crate::tree::ExprTree;
use crate::utils::indent;

/// The format in which a symi structure should be emitted.
#[derive(Copy, Clone)]
pub enum EmitFormat {
    /// Canonical, human-readable form.
    Pretty,
    /// Symi internal debug form.
    /// NB: this form is not stable, and no assumptions should be made about it.
    Debug,
}

/// Implements the emission of a type in an [EmitFormat][EmitFormat].
pub trait Emit {
    /// Emit `self` with the given [EmitFormat][EmitFormat].
    fn emit(&self, form: EmitFormat) -> String {
        match form {
            EmitFormat::Pretty => self.emit_pretty(),
            EmitFormat::Debug => self.emit_debug(),
        }
    }

    /// Emit `self` with the [pretty emit format][EmitFormat::Pretty]
    fn emit_pretty(&self) -> String;

    /// Emit `self` with the [debug emit format][EmitFormat::Debug]
    fn emit_debug(&self) -> String;
}

/// Implements `core::fmt::Display` for a type implementing `Emit`.
macro_rules! fmt_emit_impl {
    ($S:path) => {
        impl core::fmt::Display for $S {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.emit_pretty())
            }
        }
    };
}

fmt_emit_impl!(Catalog);
impl Emit for Catalog {
    fn emit_pretty(&self) -> String {
        self.source.clone()
    }

    fn emit_debug(&self) -> String {
        let mut out = String::new();
        for (index, op) in self.ops.iter().enumerate() {
            out.push_str(&format!(
                "#{} {:?} {:?} `{}` @ {}..{}\n",
                index, op.priority, op.notation, op.symbol, op.span.lo, op.span.hi
            ));
            for (slot, operand) in op.operands.iter().enumerate() {
                let child = match op.children[slot] {
                    Some(child) => format!("#{}", child),
                    None => "leaf".to_string(),
                };
                out.push_str(&indent(format!(r#""{}" -> {}"#, operand.text, child), 2));
                out.push('\n');
            }
        }
        out
    }
}

fmt_emit_impl!(ExprTree);
impl Emit for ExprTree {
    fn emit_pretty(&self) -> String {
        format!("#{}", self.root)
    }

    fn emit_debug(&self) -> String {
        let mut out = format!("root #{}\n", self.root);
        for (index, parent) in self.parents.iter().enumerate() {
            if let Some(parent) = parent {
                out.push_str(&indent(format!("#{} -> #{}", index, parent), 2));
                out.push('\n');
            }
        }
        out
    }
}
