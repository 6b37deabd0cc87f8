use crate::memory::node::{Node, NodeID, ROOT_ID};
use crate::metadata::Mode;
use crate::path::{Anchor, CleanPath, SEPARATOR};
use std::collections::HashMap;
use std::path::PathBuf;

/// Result of resolving a cleaned path against the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// Directory that holds (or would hold) the target. `None` when the path
    /// names the root or the working directory itself.
    pub parent: Option<NodeID>,
    pub target: Option<NodeID>,
    /// Final segment; empty when `parent` is `None`.
    pub base: String,
}

/// An intermediate segment is missing or names a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentMissing;

/// Arena of nodes making up one in-memory filesystem.
#[derive(Debug)]
pub struct Tree {
    nodes: HashMap<NodeID, Node>,
    next_id: usize,
    wd: NodeID,
}

impl Tree {
    pub fn new(root_mode: Mode) -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(ROOT_ID, Node::directory(SEPARATOR.to_string(), root_mode, None));
        Self {
            nodes,
            next_id: 1,
            wd: ROOT_ID,
        }
    }

    pub fn get(&self, id: NodeID) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeID) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn working_dir(&self) -> NodeID {
        self.wd
    }

    pub fn set_working_dir(&mut self, id: NodeID) {
        self.wd = id;
    }

    fn anchor_id(&self, anchor: Anchor) -> Option<NodeID> {
        match anchor {
            Anchor::Root => Some(ROOT_ID),
            // The working directory may have been removed since chdir.
            Anchor::WorkingDir => self.nodes.contains_key(&self.wd).then_some(self.wd),
        }
    }

    /// Walk `segments` down from `start`, requiring a directory at each step.
    fn descend(&self, start: NodeID, segments: &[String]) -> Option<NodeID> {
        let mut current = start;
        for seg in segments {
            let child = *self.get(current)?.children()?.get(seg)?;
            if !self.get(child)?.is_dir() {
                return None;
            }
            current = child;
        }
        Some(current)
    }

    /// Find the parent directory and (if present) the target of `path`.
    /// Never modifies the tree.
    pub fn resolve(&self, path: &CleanPath) -> Result<Resolved, ParentMissing> {
        let start = self.anchor_id(path.anchor()).ok_or(ParentMissing)?;

        let Some((dir, base)) = path.split_last() else {
            return Ok(Resolved {
                parent: None,
                target: Some(start),
                base: String::new(),
            });
        };

        let parent = self.descend(start, dir).ok_or(ParentMissing)?;
        let target = self
            .get(parent)
            .and_then(Node::children)
            .and_then(|children| children.get(base))
            .copied();

        Ok(Resolved {
            parent: Some(parent),
            target,
            base: base.to_string(),
        })
    }

    /// Insert `node` under `parent` as `name`. The caller has checked that
    /// `parent` is a directory without that name.
    pub fn insert(&mut self, parent: NodeID, name: String, mut node: Node) -> NodeID {
        let id = NodeID::new(self.next_id);
        self.next_id += 1;
        node.parent = Some(parent);
        if let Some(children) = self.get_mut(parent).and_then(Node::children_mut) {
            children.insert(name, id);
        }
        self.nodes.insert(id, node);
        id
    }

    /// Unlink `name` from `parent` and return the detached node's id. The
    /// detached subtree stays in the arena until `purge` or `attach`.
    pub fn detach(&mut self, parent: NodeID, name: &str) -> Option<NodeID> {
        self.get_mut(parent)
            .and_then(Node::children_mut)
            .and_then(|children| children.remove(name))
    }

    /// Link a detached node under `parent` as `name`.
    pub fn attach(&mut self, parent: NodeID, name: String, id: NodeID) {
        if let Some(node) = self.get_mut(id) {
            node.name.clone_from(&name);
            node.parent = Some(parent);
            node.touch();
        }
        if let Some(children) = self.get_mut(parent).and_then(Node::children_mut) {
            children.insert(name, id);
        }
    }

    /// Drop a detached node and everything below it. Returns how many nodes
    /// were freed.
    pub fn purge(&mut self, id: NodeID) -> usize {
        let mut pending = vec![id];
        let mut freed = 0;
        while let Some(next) = pending.pop() {
            if let Some(node) = self.nodes.remove(&next) {
                freed += 1;
                if let Some(children) = node.children() {
                    pending.extend(children.values().copied());
                }
            }
        }
        freed
    }

    /// True if `ancestor` is `id` or lies on its parent chain.
    pub fn is_ancestor(&self, ancestor: NodeID, id: NodeID) -> bool {
        let mut current = Some(id);
        while let Some(cur) = current {
            if cur == ancestor {
                return true;
            }
            current = self.get(cur).and_then(|n| n.parent);
        }
        false
    }

    /// Absolute path of a node, rebuilt through the parent back-references.
    pub fn abs_path(&self, id: NodeID) -> PathBuf {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(cur) = current {
            let Some(node) = self.get(cur) else { break };
            if node.parent.is_some() {
                names.push(node.name.as_str());
            }
            current = node.parent;
        }
        let mut path = PathBuf::from(SEPARATOR.to_string());
        path.extend(names.iter().rev());
        path
    }
}
