use crate::memory::buffer::Buffer;
use crate::metadata::{FileInfo, Mode};
use crate::EntryType;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;

pub const ROOT_ID: NodeID = NodeID(0);

/// Unique identifier for a node in the tree arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeID(usize);

impl NodeID {
    pub fn new(id: usize) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for NodeID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}

/// Directory children or file content.
#[derive(Debug)]
pub enum NodeKind {
    /// Children by name. The BTreeMap keeps them in byte-wise name order.
    Directory(BTreeMap<String, NodeID>),
    File(Arc<Buffer>),
}

#[derive(Debug)]
pub struct Node {
    pub name: String,
    pub mode: Mode,
    pub modified: DateTime<Utc>,
    /// Back-reference for path reconstruction only. Ownership runs through
    /// the parent's child map.
    pub parent: Option<NodeID>,
    pub kind: NodeKind,
}

impl Node {
    pub fn directory<S: Into<String>>(name: S, mode: Mode, parent: Option<NodeID>) -> Self {
        Self {
            name: name.into(),
            mode,
            modified: Utc::now(),
            parent,
            kind: NodeKind::Directory(BTreeMap::new()),
        }
    }

    pub fn file<S: Into<String>>(
        name: S,
        mode: Mode,
        parent: NodeID,
        min_increment: usize,
    ) -> Self {
        Self {
            name: name.into(),
            mode,
            modified: Utc::now(),
            parent: Some(parent),
            kind: NodeKind::File(Arc::new(Buffer::new(min_increment))),
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.kind, NodeKind::Directory(_))
    }

    pub fn children(&self) -> Option<&BTreeMap<String, NodeID>> {
        match &self.kind {
            NodeKind::Directory(children) => Some(children),
            NodeKind::File(_) => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut BTreeMap<String, NodeID>> {
        match &mut self.kind {
            NodeKind::Directory(children) => Some(children),
            NodeKind::File(_) => None,
        }
    }

    pub fn buffer(&self) -> Option<&Arc<Buffer>> {
        match &self.kind {
            NodeKind::File(buffer) => Some(buffer),
            NodeKind::Directory(_) => None,
        }
    }

    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    pub fn info(&self) -> FileInfo {
        let (entry_type, size) = match &self.kind {
            NodeKind::Directory(_) => (EntryType::Directory, 0),
            NodeKind::File(buffer) => (EntryType::File, buffer.len()),
        };
        FileInfo {
            name: self.name.clone(),
            size,
            mode: self.mode,
            entry_type,
            modified: self.modified,
        }
    }
}
