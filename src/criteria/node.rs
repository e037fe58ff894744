//! Node identifiers, node kinds, and the leaf predicate trait.
//!
//! The criterion tree stores its nodes in an arena and hands out
//! [`CriterionNodeId`] handles. The newtype prevents mixing tree handles
//! with other indices, and the parent back-reference inside the arena is a
//! plain id rather than an owning pointer: ownership flows strictly from
//! parent to children.

use std::fmt;

/// A strongly-typed handle to a node inside a [`CriterionTree`](crate::criteria::CriterionTree).
///
/// Handles are created by the tree's mutation API and stay valid until the
/// node's subtree is removed. A handle from one tree must not be used with
/// another; the tree detects stale handles and treats them as not-found.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CriterionNodeId(pub(crate) usize);

impl CriterionNodeId {
    /// Returns the raw arena index of this handle.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Debug for CriterionNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CriterionNodeId({})", self.0)
    }
}

/// The kind of a criterion tree node.
///
/// The tree's arity invariants are stated in terms of kinds: the root and
/// `Not` take exactly one child, `And`/`Or` at least two, and `Condition`
/// leaves take none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CriterionKind {
    /// The distinguished root; holds exactly one child once the tree is non-empty.
    Root,
    /// Conjunction of at least two children.
    And,
    /// Disjunction of at least two children.
    Or,
    /// Negation of exactly one child.
    Not,
    /// A leaf predicate supplied by the caller.
    Condition,
}

impl CriterionKind {
    /// Returns `true` for the boolean combinator kinds `And`, `Or` and `Not`.
    #[must_use]
    pub const fn is_operator(&self) -> bool {
        matches!(self, Self::And | Self::Or | Self::Not)
    }

    /// Returns `true` for `Condition` leaves.
    #[must_use]
    pub const fn is_condition(&self) -> bool {
        matches!(self, Self::Condition)
    }
}

impl fmt::Display for CriterionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CriterionKind::Root => write!(f, "root"),
            CriterionKind::And => write!(f, "and"),
            CriterionKind::Or => write!(f, "or"),
            CriterionKind::Not => write!(f, "not"),
            CriterionKind::Condition => write!(f, "condition"),
        }
    }
}

/// A boolean combinator that can be appended to or inserted into the tree.
///
/// This is [`CriterionKind`] minus the kinds the caller can never create
/// directly (the root exists from construction, conditions carry a
/// predicate and go through their own append call).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CriterionOperator {
    /// Conjunction.
    And,
    /// Disjunction.
    Or,
    /// Negation.
    Not,
}

impl CriterionOperator {
    /// Returns the node kind this operator creates.
    #[must_use]
    pub const fn kind(&self) -> CriterionKind {
        match self {
            CriterionOperator::And => CriterionKind::And,
            CriterionOperator::Or => CriterionKind::Or,
            CriterionOperator::Not => CriterionKind::Not,
        }
    }
}

/// A leaf selection predicate over items of type `I`.
///
/// Predicates are supplied by the consuming layer (for example "in-degree
/// equals N", "has color C", "text matches regex"); the tree only requires
/// the single `matches` capability and never looks inside.
///
/// Any `Fn(&I) -> bool` closure is a criterion:
///
/// ```rust
/// use diffscope::{Criterion, CriterionExecutor, CriterionTree};
///
/// let mut tree: CriterionTree<u64> = CriterionTree::new();
/// tree.append_condition(tree.root(), Box::new(|item: &u64| *item % 2 == 0))?;
///
/// let items = [1_u64, 2, 3, 4];
/// let selected = CriterionExecutor::execute(&tree, &items)?;
/// assert_eq!(selected, vec![&2, &4]);
/// # Ok::<(), diffscope::Error>(())
/// ```
pub trait Criterion<I> {
    /// Returns `true` if `item` satisfies this predicate.
    fn matches(&self, item: &I) -> bool;
}

impl<I, F> Criterion<I> for F
where
    F: Fn(&I) -> bool,
{
    fn matches(&self, item: &I) -> bool {
        self(item)
    }
}
