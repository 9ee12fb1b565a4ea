// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Node abstraction shared by every balanced search tree

/// An owning child slot. A node is owned by exactly one slot at a time.
pub type Link<N> = Option<Box<N>>;

/// Capability set a concrete node type provides to [`AvlTree`](super::AvlTree).
///
/// Height is 1 for a leaf; an absent subtree has height 0. The tree is the
/// only writer of heights and child slots, implementors just store them.
pub trait Node: Sized {
    /// Payload ordered under a total order. Equal payloads are never stored twice.
    type Value: Ord;

    fn value(&self) -> &Self::Value;

    fn height(&self) -> usize;

    fn set_height(&mut self, height: usize);

    fn left(&self) -> &Link<Self>;

    fn right(&self) -> &Link<Self>;

    fn left_mut(&mut self) -> &mut Link<Self>;

    fn right_mut(&mut self) -> &mut Link<Self>;
}

/// Constructs fresh nodes from raw payload.
///
/// Lets callers plug specialised node types (such as automaton states) into
/// the generic tree. Any `Fn(Value) -> N` closure or function is a factory.
pub trait NodeFactory<N: Node> {
    fn new_node(&self, value: N::Value) -> N;
}

impl<N, F> NodeFactory<N> for F
where
    N: Node,
    F: Fn(N::Value) -> N,
{
    fn new_node(&self, value: N::Value) -> N {
        self(value)
    }
}

/// Read-only view handed to traversal visitors.
///
/// Exposes height and payload only, so a visitor cannot reach child slots.
pub struct NodeView<'a, N: Node> {
    node: &'a N,
}

impl<'a, N: Node> NodeView<'a, N> {
    pub(crate) fn new(node: &'a N) -> Self {
        Self { node }
    }

    pub fn height(&self) -> usize {
        self.node.height()
    }

    pub fn value(&self) -> &'a N::Value {
        self.node.value()
    }
}

/// Plain node carrying nothing but its payload.
#[derive(Debug, Clone)]
pub struct DefaultNode<T> {
    value: T,
    height: usize,
    left: Link<DefaultNode<T>>,
    right: Link<DefaultNode<T>>,
}

impl<T: Ord> DefaultNode<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            height: 1,
            left: None,
            right: None,
        }
    }
}

impl<T: Ord> Node for DefaultNode<T> {
    type Value = T;

    fn value(&self) -> &T {
        &self.value
    }

    fn height(&self) -> usize {
        self.height
    }

    fn set_height(&mut self, height: usize) {
        self.height = height;
    }

    fn left(&self) -> &Link<Self> {
        &self.left
    }

    fn right(&self) -> &Link<Self> {
        &self.right
    }

    fn left_mut(&mut self) -> &mut Link<Self> {
        &mut self.left
    }

    fn right_mut(&mut self) -> &mut Link<Self> {
        &mut self.right
    }
}

/// Height of an optional subtree (0 when absent).
pub fn link_height<N: Node>(link: &Link<N>) -> usize {
    link.as_ref().map_or(0, |node| node.height())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_node_is_leaf() {
        let node = DefaultNode::new(7);
        assert_eq!(*node.value(), 7);
        assert_eq!(node.height(), 1);
        assert!(node.left().is_none());
        assert!(node.right().is_none());
    }

    #[test]
    fn test_closure_factory() {
        let factory = |value: i32| DefaultNode::new(value * 2);
        let node: DefaultNode<i32> = factory.new_node(21);
        assert_eq!(*node.value(), 42);
    }

    #[test]
    fn test_link_height() {
        let empty: Link<DefaultNode<u8>> = None;
        assert_eq!(link_height(&empty), 0);

        let mut node = DefaultNode::new(1u8);
        node.set_height(3);
        assert_eq!(link_height(&Some(Box::new(node))), 3);
    }
}
