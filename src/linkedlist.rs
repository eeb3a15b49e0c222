use bumpalo::Bump;
use core::fmt;
use std::cell::Cell;
use tracing::debug;

use crate::error::{Error, Result};
use crate::mergesort;

/*
 * Ownership link to the next node. Nodes live in a `NodeArena` and are
 * handed around as exclusive references, so moving a link moves ownership
 * of the whole suffix behind it.
 */
pub type Link<'a, T> = Option<&'a mut Node<'a, T>>;

pub struct Node<'a, T> {
    pub next: Link<'a, T>,
    pub value: T,
}

impl<'a, T> Node<'a, T> {
    pub fn new(value: T) -> Self {
        Node { next: None, value }
    }
}

/*
 * Bump arena all nodes of a run are allocated from, so that they share
 * one lifetime. Values are never dropped by the arena, hence the `Copy`
 * bound on allocation.
 */
pub struct NodeArena {
    bump: Bump,
    nodes: Cell<usize>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::with_limit(None)
    }

    /*
     * Arena refusing to grow past `limit` bytes
     */
    pub fn with_limit(limit: Option<usize>) -> Self {
        let bump = Bump::new();
        bump.set_allocation_limit(limit);
        NodeArena {
            bump,
            nodes: Cell::new(0),
        }
    }

    pub fn alloc<'a, T: Copy>(&'a self, value: T) -> Result<&'a mut Node<'a, T>> {
        let nodes = self.nodes.get();
        let node = self
            .bump
            .try_alloc(Node::new(value))
            .map_err(|_| Error::OutOfMemory { nodes })?;
        self.nodes.set(nodes + 1);
        Ok(node)
    }

    /*
     * Number of nodes handed out since the last release
     */
    pub fn nodes(&self) -> usize {
        self.nodes.get()
    }

    /*
     * Release every node at once. Taking `&mut self` means no list can
     * still be borrowing from the arena. Returns the number of nodes freed.
     */
    pub fn release(&mut self) -> usize {
        let nodes = self.nodes();
        self.nodes.set(0);
        let bytes = self.bump.allocated_bytes();
        self.bump.reset();
        debug!(nodes, bytes, "node arena released");
        nodes
    }
}

impl Default for NodeArena {
    fn default() -> Self {
        Self::new()
    }
}

/*
 * A singly-linked list : its head link and the number of nodes reachable
 * from it.
 */
pub struct List<'a, T> {
    pub(crate) head: Link<'a, T>,
    pub(crate) len: usize,
}

impl<'a, T> List<'a, T> {
    pub fn new() -> Self {
        List { head: None, len: 0 }
    }

    /*
     * Build a list from fallible items, in order, appending each new node
     * at the tail. Stops at the first error.
     */
    pub fn try_build<I>(arena: &'a NodeArena, items: I) -> Result<Self>
    where
        T: Copy,
        I: IntoIterator<Item = Result<T>>,
    {
        let mut list = List::new();
        let mut tail = &mut list.head;
        let mut count = 0;
        for item in items {
            let node = arena.alloc(item?)?;
            tail = &mut tail.insert(node).next;
            count += 1;
        }
        list.len = count;
        debug!(nodes = count, "list built");
        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn iter(&self) -> Iter<'_, 'a, T> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    /*
     * Stable merge sort by relinking the existing nodes.
     * `is_le(a, b)` must answer "a sorts before or together with b".
     */
    pub fn sort_by<F>(self, mut is_le: F) -> Self
    where
        F: FnMut(&T, &T) -> bool,
    {
        let List { head, len } = self;
        List {
            head: head.map(|head| mergesort::sort(head, len, &mut is_le)),
            len,
        }
    }
}

impl<'a, T> Default for List<'a, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: fmt::Debug> fmt::Debug for List<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

pub struct Iter<'l, 'a, T> {
    next: Option<&'l Node<'a, T>>,
}

impl<'l, 'a, T> Iterator for Iter<'l, 'a, T> {
    type Item = &'l T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            &node.value
        })
    }
}
