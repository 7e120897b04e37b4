//! Builds parent/child category trees from the flat records the API returns.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::domain::category::{CategoryRecord, CategoryType};

/// Flattening stops descending below this depth.
pub const MAX_DEPTH: usize = 64;

/// A category together with its resolved children.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CategoryType,
    pub parent_id: Option<String>,
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    fn from_record(record: &CategoryRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            kind: record.kind,
            parent_id: record.parent_id.clone(),
            children: Vec::new(),
        }
    }

    /// Number of nodes below this one.
    pub fn descendant_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&CategoryNode> = self.children.iter().collect();
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }

    /// Depth-first lookup of a node by id within this subtree.
    pub fn find(&self, id: &str) -> Option<&CategoryNode> {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.id == id {
                return Some(node);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A node visited during pre-order flattening, with its depth (roots are 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatNode<'a> {
    pub node: &'a CategoryNode,
    pub depth: usize,
}

pub struct HierarchyBuilder;

impl HierarchyBuilder {
    /// Builds the forest of `kind` categories.
    ///
    /// Records keep their input order both among roots and among siblings. A
    /// record becomes a root when its parent reference is absent, is the
    /// `"none"` token, points at itself, or names an id that is not among the
    /// records of this type. Parent links that would close a cycle are
    /// dropped: the earliest record of each cycle becomes a root, so every
    /// record of the type appears exactly once.
    pub fn build(records: &[CategoryRecord], kind: CategoryType) -> Vec<CategoryNode> {
        let filtered: Vec<&CategoryRecord> = records
            .iter()
            .filter(|record| record.kind == kind)
            .collect();

        let mut index: HashMap<&str, usize> = HashMap::with_capacity(filtered.len());
        for (position, record) in filtered.iter().enumerate() {
            index.entry(record.id.as_str()).or_insert(position);
        }

        let mut parents: Vec<Option<usize>> = filtered
            .iter()
            .enumerate()
            .map(|(position, record)| {
                record
                    .parent_ref()
                    .and_then(|parent| index.get(parent).copied())
                    .filter(|parent| *parent != position)
            })
            .collect();

        for promoted in break_cycles(&mut parents) {
            tracing::warn!(
                category_id = %filtered[promoted].id,
                parent_id = ?filtered[promoted].parent_id,
                "category parent chain forms a cycle; treating it as a root"
            );
        }

        let mut children: Vec<Vec<usize>> = vec![Vec::new(); filtered.len()];
        let mut roots = Vec::new();
        for (position, parent) in parents.iter().enumerate() {
            match parent {
                Some(parent) => children[*parent].push(position),
                None => roots.push(position),
            }
        }

        let mut built: Vec<Option<CategoryNode>> = vec![None; filtered.len()];
        for position in post_order(&roots, &children) {
            let mut node = CategoryNode::from_record(filtered[position]);
            node.children = children[position]
                .iter()
                .filter_map(|child| built[*child].take())
                .collect();
            built[position] = Some(node);
        }

        let forest: Vec<CategoryNode> = roots
            .iter()
            .filter_map(|root| built[*root].take())
            .collect();
        tracing::debug!(
            kind = %kind,
            records = filtered.len(),
            roots = forest.len(),
            "built category hierarchy"
        );
        forest
    }

    /// Pre-order `(node, depth)` listing of a forest.
    ///
    /// Ids already emitted are skipped together with their subtrees, and
    /// nothing deeper than [`MAX_DEPTH`] is visited, so hand-assembled trees
    /// that repeat a node inside its own descendants still terminate.
    pub fn flatten(forest: &[CategoryNode]) -> Vec<FlatNode<'_>> {
        let mut flat = Vec::new();
        let mut visited: HashSet<&str> = HashSet::new();
        let mut stack: Vec<FlatNode<'_>> = forest
            .iter()
            .rev()
            .map(|node| FlatNode { node, depth: 0 })
            .collect();

        while let Some(entry) = stack.pop() {
            if !visited.insert(entry.node.id.as_str()) {
                tracing::warn!(category_id = %entry.node.id, "skipping repeated category node");
                continue;
            }
            flat.push(entry);
            if entry.depth + 1 >= MAX_DEPTH {
                if !entry.node.children.is_empty() {
                    tracing::warn!(
                        category_id = %entry.node.id,
                        "category tree exceeds maximum depth; truncating"
                    );
                }
                continue;
            }
            stack.extend(entry.node.children.iter().rev().map(|child| FlatNode {
                node: child,
                depth: entry.depth + 1,
            }));
        }
        flat
    }

    /// Display labels for a hierarchical select, indented by depth.
    pub fn indented_labels(forest: &[CategoryNode], indent: &str) -> Vec<(String, String)> {
        Self::flatten(forest)
            .into_iter()
            .map(|entry| {
                (
                    entry.node.id.clone(),
                    format!("{}{}", indent.repeat(entry.depth), entry.node.name),
                )
            })
            .collect()
    }

    /// Counts every node reachable through [`HierarchyBuilder::flatten`].
    pub fn node_count(forest: &[CategoryNode]) -> usize {
        Self::flatten(forest).len()
    }
}

/// Cuts parent links so that `parents` describes a forest.
///
/// Walks each unresolved chain once. When a walk returns to a record already
/// on the current path, the cycle member with the lowest input position loses
/// its parent link. Returns the records that were cut, in input order.
fn break_cycles(parents: &mut [Option<usize>]) -> Vec<usize> {
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Mark {
        Unvisited,
        OnPath,
        Done,
    }

    let mut marks = vec![Mark::Unvisited; parents.len()];
    let mut promoted = Vec::new();
    let mut path = Vec::new();

    for start in 0..parents.len() {
        if marks[start] != Mark::Unvisited {
            continue;
        }
        path.clear();
        let mut current = start;
        loop {
            match marks[current] {
                Mark::Done => break,
                Mark::OnPath => {
                    let entry = path
                        .iter()
                        .position(|position| *position == current)
                        .unwrap_or(0);
                    let cut = path[entry..]
                        .iter()
                        .copied()
                        .min()
                        .unwrap_or(current);
                    parents[cut] = None;
                    promoted.push(cut);
                    break;
                }
                Mark::Unvisited => {
                    marks[current] = Mark::OnPath;
                    path.push(current);
                    match parents[current] {
                        Some(parent) => current = parent,
                        None => break,
                    }
                }
            }
        }
        for position in &path {
            marks[*position] = Mark::Done;
        }
    }

    promoted.sort_unstable();
    promoted
}

/// Children-before-parents ordering of every node reachable from `roots`.
fn post_order(roots: &[usize], children: &[Vec<usize>]) -> Vec<usize> {
    let mut order = Vec::with_capacity(children.len());
    let mut stack: Vec<(usize, bool)> = roots.iter().rev().map(|root| (*root, false)).collect();
    while let Some((position, expanded)) = stack.pop() {
        if expanded {
            order.push(position);
            continue;
        }
        stack.push((position, true));
        stack.extend(children[position].iter().rev().map(|child| (*child, false)));
    }
    order
}
