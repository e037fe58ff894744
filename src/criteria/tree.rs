//! The criterion expression tree and its structural edit operations.
//!
//! The tree is a strict ownership hierarchy: every node except the root has
//! exactly one parent, subtrees are never shared, and removal discards a
//! whole subtree. Nodes live in an arena indexed by
//! [`CriterionNodeId`]; the parent back-reference is an id used only for
//! traversal bookkeeping, never for ownership.
//!
//! Edits are all-or-nothing. An edit that would violate the arity rules is
//! rejected with a typed error and leaves the tree untouched; the paired
//! `can_*` predicates let a UI grey out illegal actions up front, but the
//! rules are enforced here regardless. Every successful edit returns a
//! [`CriterionEdit`] describing the structural change, which the caller can
//! forward to whatever listener mechanism the host application uses — the
//! tree itself knows nothing about listeners.

use crate::criteria::node::{Criterion, CriterionKind, CriterionNodeId, CriterionOperator};
use crate::{Error, Result};

/// What a node is: its kind plus, for leaves, the predicate.
pub(crate) enum Payload<I> {
    /// The distinguished root.
    Root,
    /// Conjunction.
    And,
    /// Disjunction.
    Or,
    /// Negation.
    Not,
    /// A leaf predicate.
    Condition(Box<dyn Criterion<I>>),
}

impl<I> Payload<I> {
    pub(crate) fn kind(&self) -> CriterionKind {
        match self {
            Payload::Root => CriterionKind::Root,
            Payload::And => CriterionKind::And,
            Payload::Or => CriterionKind::Or,
            Payload::Not => CriterionKind::Not,
            Payload::Condition(_) => CriterionKind::Condition,
        }
    }

    fn from_operator(operator: CriterionOperator) -> Self {
        match operator {
            CriterionOperator::And => Payload::And,
            CriterionOperator::Or => Payload::Or,
            CriterionOperator::Not => Payload::Not,
        }
    }
}

struct Node<I> {
    payload: Payload<I>,
    parent: Option<CriterionNodeId>,
    children: Vec<CriterionNodeId>,
}

/// A structural change produced by a successful tree edit.
///
/// Mutation methods return the edit they performed instead of calling out
/// to listeners; the surrounding UI propagates it however it likes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriterionEdit {
    /// A new node was appended as the last child of `parent`.
    Appended {
        /// The node that received the child.
        parent: CriterionNodeId,
        /// The newly created node.
        node: CriterionNodeId,
    },
    /// A new operator was spliced between `parent` and its former children.
    Inserted {
        /// The node whose children were re-parented.
        parent: CriterionNodeId,
        /// The newly created operator node.
        node: CriterionNodeId,
    },
    /// The subtree rooted at `node` was detached and discarded.
    SubtreeRemoved {
        /// The former parent of the removed subtree.
        parent: CriterionNodeId,
        /// The (now invalid) handle of the removed subtree's root.
        node: CriterionNodeId,
    },
    /// The root's single subtree was discarded; the tree is empty again.
    Cleared {
        /// The (now invalid) handle of the discarded subtree's root.
        node: CriterionNodeId,
    },
}

impl CriterionEdit {
    /// Returns the node the edit created or discarded.
    #[must_use]
    pub const fn node(&self) -> CriterionNodeId {
        match self {
            CriterionEdit::Appended { node, .. }
            | CriterionEdit::Inserted { node, .. }
            | CriterionEdit::SubtreeRemoved { node, .. }
            | CriterionEdit::Cleared { node } => *node,
        }
    }
}

/// A boolean selection-expression tree over items of type `I`.
///
/// Built interactively: the caller appends conditions and operators,
/// splices operators between a node and its children, and removes subtrees.
/// Evaluation is performed by
/// [`CriterionExecutor`](crate::criteria::CriterionExecutor) and never
/// mutates the tree.
///
/// # Examples
///
/// ```rust
/// use diffscope::{CriterionExecutor, CriterionOperator, CriterionTree};
///
/// // select items that are even and not divisible by ten
/// let mut tree: CriterionTree<u64> = CriterionTree::new();
/// let and = tree
///     .append_operator(tree.root(), CriterionOperator::And)?
///     .node();
/// tree.append_condition(and, Box::new(|item: &u64| item % 2 == 0))?;
/// let not = tree.append_operator(and, CriterionOperator::Not)?.node();
/// tree.append_condition(not, Box::new(|item: &u64| item % 10 == 0))?;
///
/// let items = [4_u64, 7, 10, 12];
/// let selected = CriterionExecutor::execute(&tree, &items)?;
/// assert_eq!(selected, vec![&4, &12]);
/// # Ok::<(), diffscope::Error>(())
/// ```
pub struct CriterionTree<I> {
    nodes: Vec<Option<Node<I>>>,
    free: Vec<usize>,
    root: CriterionNodeId,
}

impl<I> CriterionTree<I> {
    /// Creates a tree holding only the root node.
    #[must_use]
    pub fn new() -> Self {
        CriterionTree {
            nodes: vec![Some(Node {
                payload: Payload::Root,
                parent: None,
                children: Vec::new(),
            })],
            free: Vec::new(),
            root: CriterionNodeId(0),
        }
    }

    /// Returns the handle of the root node.
    #[must_use]
    pub const fn root(&self) -> CriterionNodeId {
        self.root
    }

    /// Returns the kind of `node`, or `None` for a stale handle.
    #[must_use]
    pub fn kind(&self, node: CriterionNodeId) -> Option<CriterionKind> {
        self.node(node).map(|n| n.payload.kind())
    }

    /// Returns the parent of `node`; `None` for the root or a stale handle.
    #[must_use]
    pub fn parent(&self, node: CriterionNodeId) -> Option<CriterionNodeId> {
        self.node(node).and_then(|n| n.parent)
    }

    /// Returns the children of `node`, empty for leaves and stale handles.
    #[must_use]
    pub fn children(&self, node: CriterionNodeId) -> &[CriterionNodeId] {
        self.node(node).map_or(&[], |n| n.children.as_slice())
    }

    /// Returns `true` if the root has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children(self.root).is_empty()
    }

    /// Returns the number of live nodes, the root included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_some()).count()
    }

    /// Returns `true` if a node of `kind` may be appended under `parent`.
    ///
    /// The root and `Not` accept a child only while they have none,
    /// `And`/`Or` always accept more, `Condition` leaves never do, and the
    /// root kind itself can never be appended.
    #[must_use]
    pub fn can_append(&self, parent: CriterionNodeId, kind: CriterionKind) -> bool {
        if kind == CriterionKind::Root {
            return false;
        }

        match self.node(parent) {
            Some(node) => match node.payload.kind() {
                CriterionKind::And | CriterionKind::Or => true,
                CriterionKind::Root | CriterionKind::Not => node.children.is_empty(),
                CriterionKind::Condition => false,
            },
            None => false,
        }
    }

    /// Appends a condition leaf under `parent`.
    ///
    /// # Errors
    ///
    /// [`Error::IllegalEdit`] if [`can_append`](Self::can_append) does not
    /// hold for `parent` and [`CriterionKind::Condition`].
    pub fn append_condition(
        &mut self,
        parent: CriterionNodeId,
        criterion: Box<dyn Criterion<I>>,
    ) -> Result<CriterionEdit> {
        self.append(parent, Payload::Condition(criterion))
    }

    /// Appends an operator node under `parent`.
    ///
    /// # Errors
    ///
    /// [`Error::IllegalEdit`] if [`can_append`](Self::can_append) does not
    /// hold for `parent` and the operator's kind.
    pub fn append_operator(
        &mut self,
        parent: CriterionNodeId,
        operator: CriterionOperator,
    ) -> Result<CriterionEdit> {
        self.append(parent, Payload::from_operator(operator))
    }

    /// Returns `true` if `operator` may be spliced between `parent` and its
    /// current children.
    ///
    /// The parent must already have at least one child. A `Not` insert
    /// additionally requires exactly one pre-existing child that is not
    /// itself a `Not`, so redundant double negations cannot be built.
    #[must_use]
    pub fn can_insert_between(
        &self,
        parent: CriterionNodeId,
        operator: CriterionOperator,
    ) -> bool {
        let Some(node) = self.node(parent) else {
            return false;
        };
        if node.children.is_empty() {
            return false;
        }

        match operator {
            CriterionOperator::And | CriterionOperator::Or => true,
            CriterionOperator::Not => {
                node.children.len() == 1
                    && self.kind(node.children[0]) != Some(CriterionKind::Not)
            }
        }
    }

    /// Splices a new operator node between `parent` and all of its current
    /// children, re-parenting every child under the new node.
    ///
    /// # Errors
    ///
    /// [`Error::IllegalEdit`] if
    /// [`can_insert_between`](Self::can_insert_between) does not hold.
    pub fn insert_between(
        &mut self,
        parent: CriterionNodeId,
        operator: CriterionOperator,
    ) -> Result<CriterionEdit> {
        if !self.can_insert_between(parent, operator) {
            return Err(Error::IllegalEdit(format!(
                "cannot insert {} between node {} and its children",
                operator.kind(),
                parent.index()
            )));
        }

        let children = match self.node_mut(parent) {
            Some(node) => std::mem::take(&mut node.children),
            None => return Err(Error::IllegalEdit("parent node does not exist".into())),
        };

        let inserted = self.alloc(Node {
            payload: Payload::from_operator(operator),
            parent: Some(parent),
            children,
        });

        let adopted: Vec<CriterionNodeId> = self
            .node(inserted)
            .map(|n| n.children.clone())
            .unwrap_or_default();
        for child in adopted {
            if let Some(node) = self.node_mut(child) {
                node.parent = Some(inserted);
            }
        }

        if let Some(node) = self.node_mut(parent) {
            node.children.push(inserted);
        }

        Ok(CriterionEdit::Inserted {
            parent,
            node: inserted,
        })
    }

    /// Detaches `node` from its parent and discards its entire subtree.
    ///
    /// # Errors
    ///
    /// [`Error::IllegalEdit`] for the root node or a stale handle.
    pub fn remove(&mut self, node: CriterionNodeId) -> Result<CriterionEdit> {
        if node == self.root {
            return Err(Error::IllegalEdit("the root node cannot be removed".into()));
        }
        let Some(parent) = self.node(node).and_then(|n| n.parent) else {
            return Err(Error::IllegalEdit(format!(
                "node {} does not exist",
                node.index()
            )));
        };

        if let Some(parent_node) = self.node_mut(parent) {
            parent_node.children.retain(|&child| child != node);
        }
        self.free_subtree(node);

        Ok(CriterionEdit::SubtreeRemoved { parent, node })
    }

    /// Discards the root's single subtree, emptying the tree.
    ///
    /// A no-op returning `None` unless the root has exactly one child.
    pub fn remove_all(&mut self) -> Option<CriterionEdit> {
        let children = self.children(self.root);
        if children.len() != 1 {
            return None;
        }
        let subtree = children[0];

        if let Some(root) = self.node_mut(self.root) {
            root.children.clear();
        }
        self.free_subtree(subtree);

        Some(CriterionEdit::Cleared { node: subtree })
    }

    pub(crate) fn payload(&self, node: CriterionNodeId) -> Option<&Payload<I>> {
        self.node(node).map(|n| &n.payload)
    }

    fn append(&mut self, parent: CriterionNodeId, payload: Payload<I>) -> Result<CriterionEdit> {
        let kind = payload.kind();
        if !self.can_append(parent, kind) {
            let parent_kind = self
                .kind(parent)
                .map_or_else(|| "a stale handle".to_string(), |k| format!("a {k} node"));
            return Err(Error::IllegalEdit(format!(
                "cannot append a {kind} node under {parent_kind}"
            )));
        }

        let node = self.alloc(Node {
            payload,
            parent: Some(parent),
            children: Vec::new(),
        });
        if let Some(parent_node) = self.node_mut(parent) {
            parent_node.children.push(node);
        }

        Ok(CriterionEdit::Appended { parent, node })
    }

    fn node(&self, id: CriterionNodeId) -> Option<&Node<I>> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: CriterionNodeId) -> Option<&mut Node<I>> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    fn alloc(&mut self, node: Node<I>) -> CriterionNodeId {
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = Some(node);
                CriterionNodeId(slot)
            }
            None => {
                self.nodes.push(Some(node));
                CriterionNodeId(self.nodes.len() - 1)
            }
        }
    }

    fn free_subtree(&mut self, root: CriterionNodeId) {
        let mut pending = vec![root];
        while let Some(id) = pending.pop() {
            if let Some(node) = self.nodes.get_mut(id.0).and_then(Option::take) {
                pending.extend(node.children);
                self.free.push(id.0);
            }
        }
    }
}

impl<I> Default for CriterionTree<I> {
    fn default() -> Self {
        Self::new()
    }
}
