//! Evaluation of a criterion tree against candidate items.
//!
//! Evaluation walks the tree recursively from the root's single child,
//! short-circuiting `And` on the first failing child and `Or` on the first
//! succeeding one. Arity violations are fatal, typed errors rather than
//! skipped nodes: a malformed tree means the construction path has a bug,
//! and silently evaluating around it would hide that.

use crate::criteria::node::CriterionKind;
use crate::criteria::tree::{CriterionTree, Payload};
use crate::criteria::CriterionNodeId;
use crate::{Error, Result};

/// Evaluates [`CriterionTree`]s over candidate item sets.
///
/// Stateless and side-effect free; the tree is never mutated by execution.
pub struct CriterionExecutor;

impl CriterionExecutor {
    /// Returns the subset of `items` for which the tree evaluates to `true`,
    /// in input order.
    ///
    /// # Errors
    ///
    /// [`Error::CriterionArity`] if the tree is malformed: an empty root,
    /// an `And`/`Or` with fewer than two children, or a `Not` without
    /// exactly one. The whole call fails on the first violation.
    pub fn execute<'a, I>(tree: &CriterionTree<I>, items: &'a [I]) -> Result<Vec<&'a I>> {
        let mut selected = Vec::new();
        for item in items {
            if Self::evaluate(tree, item)? {
                selected.push(item);
            }
        }

        Ok(selected)
    }

    /// Evaluates the tree against a single item.
    ///
    /// # Errors
    ///
    /// Same arity errors as [`execute`](Self::execute).
    pub fn evaluate<I>(tree: &CriterionTree<I>, item: &I) -> Result<bool> {
        let children = tree.children(tree.root());
        if children.len() != 1 {
            return Err(Error::CriterionArity {
                kind: CriterionKind::Root,
                children: children.len(),
            });
        }

        Self::evaluate_node(tree, children[0], item)
    }

    fn evaluate_node<I>(
        tree: &CriterionTree<I>,
        node: CriterionNodeId,
        item: &I,
    ) -> Result<bool> {
        let Some(payload) = tree.payload(node) else {
            // a stale handle inside a live tree cannot happen through the
            // public API; treat it as a root-level malformation
            return Err(Error::CriterionArity {
                kind: CriterionKind::Root,
                children: 0,
            });
        };
        let children = tree.children(node);

        match payload {
            Payload::Condition(criterion) => Ok(criterion.matches(item)),
            Payload::And => {
                if children.len() < 2 {
                    return Err(Error::CriterionArity {
                        kind: CriterionKind::And,
                        children: children.len(),
                    });
                }
                for &child in children {
                    if !Self::evaluate_node(tree, child, item)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Payload::Or => {
                if children.len() < 2 {
                    return Err(Error::CriterionArity {
                        kind: CriterionKind::Or,
                        children: children.len(),
                    });
                }
                for &child in children {
                    if Self::evaluate_node(tree, child, item)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Payload::Not => {
                if children.len() != 1 {
                    return Err(Error::CriterionArity {
                        kind: CriterionKind::Not,
                        children: children.len(),
                    });
                }
                Ok(!Self::evaluate_node(tree, children[0], item)?)
            }
            Payload::Root => Err(Error::CriterionArity {
                kind: CriterionKind::Root,
                children: children.len(),
            }),
        }
    }
}
