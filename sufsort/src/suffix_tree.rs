// Copyright 2024 Logan Magee
//
// SPDX-License-Identifier: LicenseRef-Proprietary

use std::{collections::BTreeMap, ops::Range};

use tracing::debug;

use crate::{InvalidInput, SuffixArray, lcp, validate_suffix_array};

/// The identifier of a node within a [`SuffixTree`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct NodeId(u32);

/// An edge of a [`SuffixTree`], labeled by a range of the indexed data.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Edge {
    start: u32,
    len: u32,
    child: NodeId,
}

impl Edge {
    /// Returns the range of the indexed data that labels this edge.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start as usize..(self.start + self.len) as usize
    }

    /// Returns the number of bytes in this edge's label. This is never 0.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Returns the node this edge leads to.
    #[must_use]
    pub fn child(&self) -> NodeId {
        self.child
    }
}

/// A node of a [`SuffixTree`].
#[derive(Clone, Debug)]
pub struct Node {
    children: BTreeMap<u8, Edge>,
    suffix: Option<u32>,
    depth: u32,
    // Start of some suffix whose path runs through this node
    witness: u32,
}

impl Node {
    fn new(depth: u32, witness: u32, suffix: Option<u32>) -> Self {
        Self {
            children: BTreeMap::new(),
            suffix,
            depth,
            witness,
        }
    }

    /// Returns the number of bytes spelled by the path from the root to this node.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth as usize
    }

    /// Returns the start index of the suffix that ends exactly at this node, if any.
    #[must_use]
    pub fn suffix(&self) -> Option<u32> {
        self.suffix
    }

    /// Returns the outgoing edge whose label begins with `byte`.
    #[must_use]
    pub fn child(&self, byte: u8) -> Option<&Edge> {
        self.children.get(&byte)
    }

    /// Returns the outgoing edges in ascending order of their first label byte.
    pub fn children(&self) -> impl DoubleEndedIterator<Item = &Edge> {
        self.children.values()
    }

    /// Returns `true` if this node has no outgoing edges.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A path-compressed trie of every suffix of a byte string.
///
/// Edges are labeled with ranges of the indexed data rather than copies of it. Each of the `n`
/// suffixes ends at its own node, called its terminus, which is tagged with the suffix's start
/// index. Because no terminator is appended to the data, a suffix that is a prefix of another
/// suffix terminates at an internal node rather than a leaf.
///
/// Nodes live in an arena owned by the tree and are addressed by [`NodeId`].
pub struct SuffixTree<'a> {
    data: &'a [u8],
    nodes: Vec<Node>,
}

impl<'a> SuffixTree<'a> {
    const ROOT: NodeId = NodeId(0);

    /// Creates the suffix tree of the data sorted by `suffix_array`.
    ///
    /// The LCP array is computed from `suffix_array` first. If you already have one, see
    /// [`build_suffix_tree()`].
    ///
    /// This operation is *O*(*n*).
    ///
    /// # Examples
    ///
    /// ```
    /// use sufsort::{SuffixArray, SuffixTree};
    ///
    /// let sa = SuffixArray::new(b"banana");
    /// let tree = SuffixTree::new(&sa);
    ///
    /// assert_eq!(tree.find_suffix(b"nana"), Some(2));
    /// assert_eq!(tree.suffix_count(), 6);
    /// ```
    #[must_use]
    pub fn new(suffix_array: &SuffixArray<'a>) -> Self {
        let data = suffix_array.data();
        let lcp = suffix_array.lcp();

        match build(data, suffix_array.as_slice(), &lcp) {
            Ok(nodes) => Self { data, nodes },
            Err(rank) => panic!("duplicate suffix inserted at rank {rank}"),
        }
    }

    /// Returns the identifier of the root node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        Self::ROOT
    }

    /// Returns the node identified by `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` belongs to a different tree and is out of range for this one.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    /// Returns the total number of nodes, including the root.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of suffix termini, which equals the length of the indexed data.
    #[must_use]
    pub fn suffix_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.suffix.is_some()).count()
    }

    /// Returns the data spelled by `edge`.
    #[must_use]
    pub fn edge_label(&self, edge: &Edge) -> &'a [u8] {
        &self.data[edge.range()]
    }

    /// Returns the start index of `suffix` if it is a suffix of the indexed data.
    ///
    /// This walks the path spelled by `suffix` from the root and succeeds only if the path ends
    /// exactly at a suffix terminus. The empty string is not considered a suffix.
    #[must_use]
    pub fn find_suffix(&self, suffix: &[u8]) -> Option<u32> {
        match self.locus(suffix)? {
            Locus::Node(id) => self.node(id).suffix,
            Locus::Edge(_) => None,
        }
    }

    /// Returns `true` if and only if `pattern` is contained in the indexed data.
    ///
    /// This operation is *O*(*m*), where `m` is `pattern.len()`.
    #[must_use]
    pub fn contains(&self, pattern: &[u8]) -> bool {
        self.locus(pattern).is_some()
    }

    /// Returns the start index of every occurrence of `pattern`, in ascending order.
    ///
    /// An empty pattern has no occurrences.
    ///
    /// # Examples
    ///
    /// ```
    /// use sufsort::{SuffixArray, SuffixTree};
    ///
    /// let sa = SuffixArray::new(b"mississippi");
    /// let tree = SuffixTree::new(&sa);
    ///
    /// assert_eq!(tree.occurrences(b"issi"), [1, 4]);
    /// ```
    #[must_use]
    pub fn occurrences(&self, pattern: &[u8]) -> Vec<u32> {
        if pattern.is_empty() {
            return Vec::new();
        }
        let below = match self.locus(pattern) {
            Some(Locus::Node(id) | Locus::Edge(id)) => id,
            None => return Vec::new(),
        };

        // Every suffix terminating in the subtree starts with `pattern`
        let mut found = Vec::new();
        let mut pending = vec![below];
        while let Some(id) = pending.pop() {
            let node = self.node(id);
            found.extend(node.suffix);
            pending.extend(node.children().map(Edge::child));
        }
        found.sort_unstable();

        found
    }

    /// Walks the path spelled by `pattern` from the root.
    fn locus(&self, pattern: &[u8]) -> Option<Locus> {
        let mut id = Self::ROOT;
        let mut matched = 0;

        while matched < pattern.len() {
            let edge = self.node(id).child(pattern[matched])?;
            let label = self.edge_label(edge);
            let rest = &pattern[matched..];

            if rest.len() < label.len() {
                return label.starts_with(rest).then_some(Locus::Edge(edge.child));
            }
            if !rest.starts_with(label) {
                return None;
            }

            matched += label.len();
            id = edge.child;
        }

        Some(Locus::Node(id))
    }
}

/// Where a path from the root ends.
enum Locus {
    /// Exactly at a node
    Node(NodeId),
    /// Partway along the edge into a node
    Edge(NodeId),
}

/// Builds a suffix tree of `data` from its suffix array and LCP array.
///
/// Edge labels borrow from `data`; nothing is copied.
///
/// This operation is *O*(*n*).
///
/// # Errors
///
/// Returns an error if `suffix_array` is not a permutation of the indices of `data`, if `lcp` has
/// the wrong length or an entry longer than a suffix it compares, or if two suffixes are found to
/// share a first byte after the point at which `lcp` says they diverge. Other inconsistencies
/// between the arrays and `data` are not detected and produce an unspecified tree.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), sufsort::InvalidInput> {
/// let data = b"abab";
/// let suffix_array = sufsort::build_suffix_array(data);
/// let lcp = sufsort::build_lcp_array(data, &suffix_array)?;
/// let tree = sufsort::build_suffix_tree(data, &suffix_array, &lcp)?;
///
/// // "ab" is a prefix of "abab", so it ends at an internal node
/// let ab = tree.node(tree.root()).child(b'a').unwrap().child();
/// assert_eq!(tree.node(ab).suffix(), Some(2));
/// assert!(!tree.node(ab).is_leaf());
/// # Ok(())
/// # }
/// ```
pub fn build_suffix_tree<'a>(
    data: &'a [u8],
    suffix_array: &[u32],
    lcp: &[u32],
) -> Result<SuffixTree<'a>, InvalidInput> {
    validate_suffix_array(suffix_array, data.len())?;
    lcp::check_bounds(suffix_array, lcp, data.len())?;

    let nodes =
        build(data, suffix_array, lcp).map_err(|rank| InvalidInput::InconsistentLcp { rank })?;

    Ok(SuffixTree { data, nodes })
}

/// Inserts suffixes in rank order, returning the node arena.
///
/// `stack` always holds the path from the root to the most recently inserted terminus. Each new
/// suffix diverges from its predecessor at the depth given by the LCP array, so the stack is
/// unwound to that depth, the edge it stops inside is split if needed, and a new edge for the rest
/// of the suffix hangs off the resulting node.
///
/// On failure, returns the rank of the suffix that could not be inserted.
fn build(data: &[u8], suffix_array: &[u32], lcp: &[u32]) -> Result<Vec<Node>, usize> {
    let n = data.len();
    let mut nodes = Vec::with_capacity(2 * n + 1);
    nodes.push(Node::new(0, 0, None));
    let mut stack = vec![SuffixTree::ROOT];

    for (rank, &start) in suffix_array.iter().enumerate() {
        let target = if rank == 0 { 0 } else { lcp[rank - 1] };

        let mut popped = None;
        let mut parent = stack[stack.len() - 1];
        while nodes[parent.0 as usize].depth > target {
            popped = stack.pop();
            parent = stack[stack.len() - 1];
        }

        if nodes[parent.0 as usize].depth < target {
            // The suffix diverges partway along the edge just unwound
            let Some(child) = popped else {
                return Err(rank);
            };
            parent = split(&mut nodes, data, parent, child, target);
            stack.push(parent);
        }

        let suffix_len = (n - start as usize) as u32;
        // The terminator is unique, so every suffix must extend past its divergence point
        if target >= suffix_len {
            return Err(rank);
        }
        let key = data[(start + target) as usize];
        if nodes[parent.0 as usize].children.contains_key(&key) {
            return Err(rank);
        }

        let leaf = NodeId(nodes.len() as u32);
        nodes.push(Node::new(suffix_len, start, Some(start)));
        nodes[parent.0 as usize].children.insert(
            key,
            Edge {
                start: start + target,
                len: suffix_len - target,
                child: leaf,
            },
        );
        stack.push(leaf);
    }
    debug!(len = n, nodes = nodes.len(), "built suffix tree");

    Ok(nodes)
}

/// Splits the edge from `parent` to `child` at `depth`, returning the new middle node.
fn split(
    nodes: &mut Vec<Node>,
    data: &[u8],
    parent: NodeId,
    child: NodeId,
    depth: u32,
) -> NodeId {
    let parent_depth = nodes[parent.0 as usize].depth;
    let witness = nodes[child.0 as usize].witness;
    let key = data[(witness + parent_depth) as usize];
    let edge = nodes[parent.0 as usize].children[&key];
    let head = depth - parent_depth;

    let middle = NodeId(nodes.len() as u32);
    let mut node = Node::new(depth, witness, None);
    node.children.insert(
        data[(edge.start + head) as usize],
        Edge {
            start: edge.start + head,
            len: edge.len - head,
            child,
        },
    );
    nodes.push(node);

    nodes[parent.0 as usize].children.insert(
        key,
        Edge {
            start: edge.start,
            len: head,
            child: middle,
        },
    );

    middle
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::{build_lcp_array, build_suffix_array};

    fn internal_nodes_branch(tree: &SuffixTree) -> bool {
        // Path compression leaves no pass-through nodes except suffix termini
        (0..tree.node_count()).all(|i| {
            let node = tree.node(NodeId(i as u32));
            node.suffix().is_some() || i == 0 || node.children().count() >= 2
        })
    }

    #[test]
    fn empty() {
        let sa = SuffixArray::new(b"");
        let tree = SuffixTree::new(&sa);

        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.suffix_count(), 0);
        assert!(tree.node(tree.root()).is_leaf());
        assert!(tree.occurrences(b"a").is_empty());
    }

    #[test]
    fn banana() {
        let sa = SuffixArray::new(b"banana");
        let tree = SuffixTree::new(&sa);

        let root = tree.node(tree.root());
        let labels: Vec<&[u8]> = root.children().map(|edge| tree.edge_label(edge)).collect();
        assert_eq!(labels, [&b"a"[..], b"banana", b"na"]);

        assert_eq!(tree.suffix_count(), 6);
        // Each suffix that prefixes another hangs the longer one off its own terminus, so the
        // root and six termini are the only nodes
        assert_eq!(tree.node_count(), 7);
        assert!(internal_nodes_branch(&tree));
    }

    #[test]
    fn every_suffix_reaches_its_terminus() {
        let data = b"panamabananas";
        let sa = SuffixArray::new(data);
        let tree = SuffixTree::new(&sa);

        for start in 0..data.len() {
            assert_eq!(tree.find_suffix(&data[start..]), Some(start as u32));
        }
        assert_eq!(tree.suffix_count(), data.len());
    }

    #[test]
    fn prefix_suffixes_end_at_internal_nodes() {
        let data = b"aaa";
        let sa = SuffixArray::new(data);
        let tree = SuffixTree::new(&sa);

        // A single chain a -> a -> a, each node a terminus
        assert_eq!(tree.node_count(), 4);
        assert_eq!(tree.find_suffix(b"a"), Some(2));
        assert_eq!(tree.find_suffix(b"aa"), Some(1));
        assert_eq!(tree.find_suffix(b"aaa"), Some(0));
    }

    #[test]
    fn splits_edges_where_suffixes_diverge() {
        let sa = SuffixArray::new(b"mississippi");
        let tree = SuffixTree::new(&sa);

        // "issippi" and "ississippi" share "issi" but no suffix ends there
        let i = tree.node(tree.root()).child(b'i').unwrap();
        let ssi = tree.node(i.child()).child(b's').unwrap();
        assert_eq!(tree.edge_label(ssi), b"ssi");

        let branch = tree.node(ssi.child());
        assert_eq!(branch.depth(), 4);
        assert_eq!(branch.suffix(), None);
        assert_eq!(branch.children().count(), 2);
    }

    #[test]
    fn non_suffixes_are_not_found() {
        let sa = SuffixArray::new(b"mississippi");
        let tree = SuffixTree::new(&sa);

        assert_eq!(tree.find_suffix(b"issi"), None);
        assert_eq!(tree.find_suffix(b"ss"), None);
        assert_eq!(tree.find_suffix(b""), None);
        assert_eq!(tree.find_suffix(b"xippi"), None);
    }

    #[test]
    fn contains_and_occurrences() {
        let sa = SuffixArray::new(b"mississippi");
        let tree = SuffixTree::new(&sa);

        assert!(tree.contains(b"sip"));
        assert!(!tree.contains(b"spi"));
        assert_eq!(tree.occurrences(b"ssi"), [2, 5]);
        assert_eq!(tree.occurrences(b"i"), [1, 4, 7, 10]);
        assert!(tree.occurrences(b"x").is_empty());
        assert!(tree.occurrences(b"").is_empty());
    }

    #[test]
    fn build_suffix_tree_rejects_bad_lcp_length() {
        let data = b"abc";
        let suffix_array = build_suffix_array(data);

        assert!(matches!(
            build_suffix_tree(data, &suffix_array, &[0]),
            Err(InvalidInput::LengthMismatch { .. }),
        ));
    }

    #[test]
    fn build_suffix_tree_rejects_understated_lcp() {
        let data = b"aab";
        let suffix_array = build_suffix_array(data);

        // "aab" and "ab" share an "a" that this LCP array denies
        assert_eq!(
            build_suffix_tree(data, &suffix_array, &[0, 0]).err(),
            Some(InvalidInput::InconsistentLcp { rank: 1 }),
        );
    }

    #[test]
    fn qc_every_suffix_reaches_its_terminus() {
        fn prop(data: Vec<u8>) -> bool {
            let sa = SuffixArray::new(&data);
            let tree = SuffixTree::new(&sa);

            tree.suffix_count() == data.len()
                && (0..data.len()).all(|i| tree.find_suffix(&data[i..]) == Some(i as u32))
                && internal_nodes_branch(&tree)
        }
        quickcheck(prop as fn(Vec<u8>) -> bool);
    }

    #[test]
    fn qc_small_alphabet_matches_free_function() {
        fn prop(data: Vec<bool>) -> bool {
            let data: Vec<u8> = data.into_iter().map(u8::from).collect();
            let suffix_array = build_suffix_array(&data);
            let Ok(lcp) = build_lcp_array(&data, &suffix_array) else {
                return false;
            };
            let Ok(tree) = build_suffix_tree(&data, &suffix_array, &lcp) else {
                return false;
            };

            tree.node_count() <= 2 * data.len() + 1
                && (0..data.len()).all(|i| tree.find_suffix(&data[i..]) == Some(i as u32))
        }
        quickcheck(prop as fn(Vec<bool>) -> bool);
    }
}
