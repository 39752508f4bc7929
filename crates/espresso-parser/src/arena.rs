//! Contiguous storage for syntax tree nodes.
//!
//! Every node is a fixed-size record split across parallel arrays and
//! addressed by a [`NodeId`]. Child relationships live out-of-band in a
//! flat child table, so the per-node record stays at 16 bytes no matter
//! how many children a node has.

use crate::parser::NodeKind;

/// Index of a node inside a [`NodeArena`].
///
/// Ids are only meaningful for the arena that produced them and are
/// handed out in allocation order, starting at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read view over one node's fixed fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    kind: NodeKind,
    start: u32,
    length: u32,
    parent: Option<NodeId>,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Byte offset of the first character covered by this node.
    pub fn start(&self) -> usize {
        self.start as usize
    }

    pub fn length(&self) -> usize {
        self.length as usize
    }

    /// Byte offset just past the last character covered by this node.
    pub fn end(&self) -> usize {
        (self.start + self.length) as usize
    }

    /// The owning node, or `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// Rollback point for speculative parsing. Created by [`NodeArena::mark`]
/// and applied with [`NodeArena::restore`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct ArenaMark {
    nodes: usize,
    children: usize,
    /// Child count of the innermost open parent when the mark was taken.
    /// Trial parses only ever attach to that parent, so restoring this
    /// single count undoes every attachment the trial made.
    parent: Option<(NodeId, u32)>,
}

/// A growable contiguous store of fixed-layout nodes.
///
/// Layout is a set of parallel arrays plus one flat `children_data`
/// vector. A parent's children occupy a contiguous run
/// `children_data[children_start..children_start + children_count]`.
/// When children of different parents interleave, the shorter run is
/// relocated to the tail of `children_data` before appending; the stale
/// run is left behind and reclaimed on `reset`.
#[derive(Debug, Default, Clone)]
pub struct NodeArena {
    kinds: Vec<NodeKind>,
    starts: Vec<u32>,
    lengths: Vec<u32>,
    parents: Vec<i32>,
    children_start: Vec<u32>,
    children_count: Vec<u32>,
    children_data: Vec<NodeId>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Append a node and record it as a child of `parent`. Returns the
    /// new node's id; ids increase monotonically from 0.
    pub fn allocate(
        &mut self,
        kind: NodeKind,
        start: usize,
        length: usize,
        parent: Option<NodeId>,
    ) -> NodeId {
        let id = NodeId(self.kinds.len() as u32);
        self.kinds.push(kind);
        self.starts.push(start as u32);
        self.lengths.push(length as u32);
        self.parents.push(parent.map_or(-1, |p| p.0 as i32));
        self.children_start.push(0);
        self.children_count.push(0);

        if let Some(parent) = parent {
            self.push_child(parent, id);
        }

        id
    }

    /// Revise a node's length once its end position is known. Parents
    /// are allocated with `length == 0` before their children and
    /// finalized on the way back up.
    pub fn update_length(&mut self, id: NodeId, new_length: usize) {
        self.lengths[id.index()] = new_length as u32;
    }

    pub fn node(&self, id: NodeId) -> Node {
        let i = id.index();
        let parent = self.parents[i];

        Node {
            kind: self.kinds[i],
            start: self.starts[i],
            length: self.lengths[i],
            parent: (parent >= 0).then(|| NodeId(parent as u32)),
        }
    }

    /// The node's children in insertion order, which is source order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        let i = id.index();
        let start = self.children_start[i] as usize;
        let count = self.children_count[i] as usize;

        &self.children_data[start..start + count]
    }

    /// Re-attach an already-allocated node under a new parent. Used when
    /// an infix construct wraps its first operand: the operand is parsed
    /// before the wrapping node exists.
    pub(crate) fn adopt(&mut self, parent: NodeId, child: NodeId) {
        self.parents[child.index()] = parent.0 as i32;
        self.push_child(parent, child);
    }

    /// Drop the most recently attached child of `parent` from its child
    /// list. The node itself stays allocated; callers re-attach it via
    /// [`NodeArena::adopt`].
    pub(crate) fn detach_last_child(&mut self, parent: NodeId) -> NodeId {
        let i = parent.index();
        let count = self.children_count[i];
        debug_assert!(count > 0, "detach_last_child on childless node {parent}");

        let slot = self.children_start[i] as usize + count as usize - 1;
        self.children_count[i] = count - 1;
        self.children_data[slot]
    }

    pub(crate) fn mark(&self, parent: Option<NodeId>) -> ArenaMark {
        ArenaMark {
            nodes: self.kinds.len(),
            children: self.children_data.len(),
            parent: parent.map(|p| (p, self.children_count[p.index()])),
        }
    }

    /// Roll back to `mark`, discarding every node allocated since.
    pub(crate) fn restore(&mut self, mark: ArenaMark) {
        self.kinds.truncate(mark.nodes);
        self.starts.truncate(mark.nodes);
        self.lengths.truncate(mark.nodes);
        self.parents.truncate(mark.nodes);
        self.children_start.truncate(mark.nodes);
        self.children_count.truncate(mark.nodes);
        self.children_data.truncate(mark.children);

        if let Some((parent, count)) = mark.parent {
            self.children_count[parent.index()] = count;
        }
    }

    /// Logically empty the arena without releasing capacity.
    pub fn reset(&mut self) {
        self.kinds.clear();
        self.starts.clear();
        self.lengths.clear();
        self.parents.clear();
        self.children_start.clear();
        self.children_count.clear();
        self.children_data.clear();
    }

    /// Approximate heap footprint of the node records, in bytes.
    pub fn byte_size(&self) -> usize {
        self.len() * 16 + self.children_data.len() * std::mem::size_of::<NodeId>()
    }

    fn push_child(&mut self, parent: NodeId, child: NodeId) {
        let i = parent.index();
        let count = self.children_count[i] as usize;

        if count == 0 {
            self.children_start[i] = self.children_data.len() as u32;
            self.children_data.push(child);
        } else {
            let start = self.children_start[i] as usize;
            let end = start + count;
            if end == self.children_data.len() {
                self.children_data.push(child);
            } else {
                // Another parent's children got appended in between;
                // relocate this parent's run to the tail and continue
                // there.
                self.children_start[i] = self.children_data.len() as u32;
                self.children_data.extend_from_within(start..end);
                self.children_data.push(child);
            }
        }

        self.children_count[i] = (count + 1) as u32;
    }
}
