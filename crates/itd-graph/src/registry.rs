//! Upstream → downstream dependency edges between metadata ids
//!
//! Ids are interned to stable node indices; an interned id is never
//! forgotten, so indices stay valid for the life of the registry. Edges are
//! only removed by explicit deregistration.

use crate::error::{GraphError, Result};
use crate::listener::NotificationListener;
use indexmap::IndexSet;
use itd_model::MetadataId;
use parking_lot::RwLock;
use petgraph::algo::{has_path_connecting, is_cyclic_directed, toposort};
use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;
use std::sync::Arc;
use tracing::{debug, warn};

type Node = u32;

#[derive(Debug, Default)]
struct Edges {
    ids: IndexSet<MetadataId>,
    graph: DiGraphMap<Node, ()>,
}

impl Edges {
    fn node(&self, id: &MetadataId) -> Option<Node> {
        self.ids
            .get_index_of(id)
            .and_then(|i| Node::try_from(i).ok())
            .filter(|n| self.graph.contains_node(*n))
    }

    fn intern(&mut self, id: &MetadataId) -> Node {
        let (index, _) = self.ids.insert_full(id.clone());
        // saturates past u32::MAX interned ids
        let node = Node::try_from(index).unwrap_or(Node::MAX);
        self.graph.add_node(node);
        node
    }

    fn id(&self, node: Node) -> Option<&MetadataId> {
        self.ids.get_index(node as usize)
    }

    fn neighbours(&self, id: &MetadataId, direction: Direction) -> Vec<MetadataId> {
        let Some(node) = self.node(id) else {
            return Vec::new();
        };
        self.graph
            .neighbors_directed(node, direction)
            .filter_map(|n| self.id(n).cloned())
            .collect()
    }
}

/// Dependency edges plus notification listeners
#[derive(Default)]
pub struct DependencyRegistry {
    edges: RwLock<Edges>,
    listeners: RwLock<Vec<Arc<dyn NotificationListener>>>,
}

impl std::fmt::Debug for DependencyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependencyRegistry")
            .field("edges", &self.edge_count())
            .field("listeners", &self.listeners.read().len())
            .finish()
    }
}

impl DependencyRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `downstream` must be recomputed when `upstream` changes
    ///
    /// # Errors
    /// Returns [`GraphError::SelfLoop`] for `upstream == downstream` and
    /// [`GraphError::CycleDetected`] if the edge would close a cycle; the
    /// registry is unchanged in both cases
    pub fn register_dependency(&self, upstream: &MetadataId, downstream: &MetadataId) -> Result<()> {
        if upstream == downstream {
            return Err(GraphError::SelfLoop(upstream.to_string()));
        }

        let mut edges = self.edges.write();
        let from = edges.intern(upstream);
        let to = edges.intern(downstream);
        if edges.graph.contains_edge(from, to) {
            return Ok(());
        }
        edges.graph.add_edge(from, to, ());

        if is_cyclic_directed(&edges.graph) {
            edges.graph.remove_edge(from, to);
            warn!(%upstream, %downstream, "rejected cyclic dependency");
            return Err(GraphError::cycle(upstream, downstream));
        }

        debug!(%upstream, %downstream, "registered dependency");
        Ok(())
    }

    /// Whether registering `upstream → downstream` would succeed
    #[must_use]
    pub fn is_valid_dependency(&self, upstream: &MetadataId, downstream: &MetadataId) -> bool {
        if upstream == downstream {
            return false;
        }
        let edges = self.edges.read();
        match (edges.node(upstream), edges.node(downstream)) {
            (Some(from), Some(to)) => !has_path_connecting(&edges.graph, to, from, None),
            _ => true,
        }
    }

    /// Remove one edge; returns whether it existed
    pub fn deregister_dependency(&self, upstream: &MetadataId, downstream: &MetadataId) -> bool {
        let mut edges = self.edges.write();
        match (edges.node(upstream), edges.node(downstream)) {
            (Some(from), Some(to)) => edges.graph.remove_edge(from, to).is_some(),
            _ => false,
        }
    }

    /// Remove every edge into `downstream`; returns how many were removed
    pub fn deregister_upstream_of(&self, downstream: &MetadataId) -> usize {
        let mut edges = self.edges.write();
        let Some(to) = edges.node(downstream) else {
            return 0;
        };
        let sources: Vec<Node> = edges
            .graph
            .neighbors_directed(to, Direction::Incoming)
            .collect();
        for from in &sources {
            edges.graph.remove_edge(*from, to);
        }
        sources.len()
    }

    /// Ids that depend on `upstream`, in registration order
    #[must_use]
    pub fn downstream(&self, upstream: &MetadataId) -> Vec<MetadataId> {
        self.edges.read().neighbours(upstream, Direction::Outgoing)
    }

    /// Ids `downstream` depends on, in registration order
    #[must_use]
    pub fn upstream(&self, downstream: &MetadataId) -> Vec<MetadataId> {
        self.edges.read().neighbours(downstream, Direction::Incoming)
    }

    #[must_use]
    pub fn contains_dependency(&self, upstream: &MetadataId, downstream: &MetadataId) -> bool {
        let edges = self.edges.read();
        match (edges.node(upstream), edges.node(downstream)) {
            (Some(from), Some(to)) => edges.graph.contains_edge(from, to),
            _ => false,
        }
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.read().graph.edge_count()
    }

    /// Every registered id, upstream before downstream
    ///
    /// # Errors
    /// Returns [`GraphError::CycleDetected`] if the edges are cyclic, which
    /// registration never allows
    pub fn topological_order(&self) -> Result<Vec<MetadataId>> {
        let edges = self.edges.read();
        let order = toposort(&edges.graph, None).map_err(|cycle| {
            let id = edges
                .id(cycle.node_id())
                .map(ToString::to_string)
                .unwrap_or_default();
            GraphError::CycleDetected {
                upstream: id.clone(),
                downstream: id,
            }
        })?;
        Ok(order.into_iter().filter_map(|n| edges.id(n).cloned()).collect())
    }

    pub fn add_listener(&self, listener: Arc<dyn NotificationListener>) {
        self.listeners.write().push(listener);
    }

    /// Remove a listener by identity; returns whether it was registered
    pub fn remove_listener(&self, listener: &Arc<dyn NotificationListener>) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|l| !Arc::ptr_eq(l, listener));
        before != listeners.len()
    }

    /// Deliver a handled notification to every listener
    pub fn notify_listeners(&self, upstream: &MetadataId, downstream: &MetadataId) {
        // snapshot so listeners may register or remove listeners themselves
        let listeners: Vec<Arc<dyn NotificationListener>> = self.listeners.read().clone();
        for listener in listeners {
            listener.notify(upstream, downstream);
        }
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }
}
