//! Builds the operation tree over a catalog.
//!
//! Parent/child links are resolved purely by span containment: for each operand span, the child
//! is the longest catalog entry lying entirely inside it. The catalog's nest-or-disjoint span
//! invariant guarantees there are no ties.

#[macro_use]
pub(crate) mod errors;

use crate::catalog::Catalog;
use crate::diagnostics::Diagnostic;

/// An ownership forest over catalog entries, anchored at the unique root operation.
#[derive(Debug)]
pub struct ExprTree {
    /// Handle of the root operation.
    pub root: usize,
    /// Parent handle of each catalog entry; `None` for the root.
    pub parents: Vec<Option<usize>>,
}

/// Resolves parent/child links between the catalog's entries and returns the tree anchored at
/// the unique root.
///
/// Fails with [NoUniqueRoot](errors::NoUniqueRoot) when the catalog is empty or several disjoint
/// operations sit at the top level.
pub fn build_tree(catalog: &mut Catalog) -> Result<ExprTree, Diagnostic> {
    let input_span = (0, catalog.source.chars().count());
    if catalog.ops.is_empty() {
        return Err(NoUniqueRoot!(empty input_span));
    }

    let count = catalog.ops.len();
    let mut parents: Vec<Option<usize>> = vec![None; count];
    for index in 0..count {
        for slot in 0..catalog.ops[index].operands.len() {
            let operand_span = catalog.ops[index].operands[slot].span;
            // the longest entry contained in the operand span is the immediate child
            let mut child: Option<usize> = None;
            for (candidate, op) in catalog.ops.iter().enumerate() {
                if candidate == index || !operand_span.contains(op.span) {
                    continue;
                }
                match child {
                    Some(best) if catalog.ops[best].span.len() >= op.span.len() => {}
                    _ => child = Some(candidate),
                }
            }
            if let Some(child) = child {
                if parents[child].is_some() {
                    return Err(OverlappingOperations!(catalog.ops[child].span));
                }
                parents[child] = Some(index);
                catalog.ops[index].children[slot] = Some(child);
            }
        }
    }

    let mut roots = parents
        .iter()
        .enumerate()
        .filter(|(_, parent)| parent.is_none())
        .map(|(index, _)| index);
    match (roots.next(), roots.count()) {
        (Some(root), 0) => Ok(ExprTree { root, parents }),
        (_, rest) => Err(NoUniqueRoot!(multiple input_span, rest + 1)),
    }
}

#[cfg(test)]
mod tests {
    use super::build_tree;
    use crate::catalog::parse_catalog;

    fn root_symbol(input: &str) -> String {
        let mut catalog = parse_catalog(input).unwrap();
        let tree = build_tree(&mut catalog).unwrap();
        catalog.ops[tree.root].symbol.clone()
    }

    macro_rules! root_tests {
        ($($name:ident: $input:expr => $root:expr)*) => {$(
            #[test]
            fn $name() {
                assert_eq!(root_symbol($input), $root);
            }
        )*};
    }

    root_tests! {
        mul_binds_tighter:   "1+2*3"     => "+"
        parens_raise_sum:    "(1+2)*3"   => "*"
        pipe_binds_loosest:  "x+1|cos"   => "|"
        call_wraps_operand:  "cos(x+1)"  => "cos"
        postfix_spans_sum:   "x^2+1'"    => "'"
        sub_chain_is_root:   "a-b-c"     => "-"
        redundant_parens:    "(a+b)"     => "+"
    }

    #[test]
    fn children_link_by_containment() {
        let mut catalog = parse_catalog("1+2*3").unwrap();
        let tree = build_tree(&mut catalog).unwrap();
        let add = &catalog.ops[tree.root];
        assert_eq!(add.symbol, "+");
        assert_eq!(add.children[0], None);
        let mul = add.children[1].expect("2*3 nests in the right operand");
        assert_eq!(catalog.ops[mul].symbol, "*");
        assert_eq!(tree.parents[mul], Some(tree.root));
    }

    #[test]
    fn commutative_run_is_one_node() {
        let mut catalog = parse_catalog("a+b+c").unwrap();
        let tree = build_tree(&mut catalog).unwrap();
        assert_eq!(catalog.ops.len(), 1);
        assert_eq!(catalog.ops[tree.root].operands.len(), 3);
    }

    #[test]
    fn empty_catalog_has_no_root() {
        let mut catalog = parse_catalog("x").unwrap();
        let err = build_tree(&mut catalog).unwrap_err();
        assert_eq!(err.code, Some("T0001"));
    }

    #[test]
    fn disjoint_expressions_have_no_root() {
        let mut catalog = parse_catalog("f(x)g(y)").unwrap();
        let err = build_tree(&mut catalog).unwrap_err();
        assert_eq!(err.code, Some("T0001"));
    }
}
