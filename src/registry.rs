//! Shared in-memory store of the current node set.
//!
//! The registry holds one immutable `Generation` behind an atomic pointer.
//! Readers load the pointer once per call and scan that snapshot, so a
//! concurrent `replace` is observed either entirely or not at all. Writers
//! build a fresh generation and swap it in; nothing is mutated in place.
//!
//! A registry is constructed once by the host and passed by reference to
//! whatever needs it (request handlers, the CLI, tests). There is no global.

use crate::node::{Node, NodeSummary};
use arc_swap::ArcSwapOption;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, warn};

/// One immutable snapshot of the full node set.
#[derive(Debug)]
pub struct Generation {
    number: u64,
    nodes: Arc<[Node]>,
}

impl Generation {
    /// Monotonic counter; the first installed generation is 1.
    pub fn number(&self) -> u64 {
        self.number
    }

    /// Nodes in storage order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First node in storage order whose id equals `id`.
    pub fn find(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id.as_str() == id)
    }

    /// Every node offering `capability`, in storage order.
    pub fn offering<'a>(&'a self, capability: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.nodes.iter().filter(move |node| node.offers(capability))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistryState {
    Uninitialized,
    Ready,
}

#[derive(Default)]
pub struct NodeRegistry {
    current: ArcSwapOption<Generation>,
    initialized: OnceLock<()>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a registry that is already `Ready` with `nodes`.
    pub fn with_nodes(nodes: Vec<Node>) -> Self {
        let registry = Self::new();
        registry.initialize(nodes);
        registry
    }

    pub fn state(&self) -> RegistryState {
        if self.current.load().is_some() {
            RegistryState::Ready
        } else {
            RegistryState::Uninitialized
        }
    }

    /// Transition to `Ready` with `nodes`.
    ///
    /// The first call installs the node set under a once-guard, so callers
    /// racing on first use see exactly one initialization (and one log line).
    /// Later calls behave like `replace`. An empty set is accepted and leaves
    /// the registry `Ready` with zero nodes.
    pub fn initialize(&self, nodes: Vec<Node>) -> u64 {
        let mut pending = Some(nodes);
        let mut installed = None;
        self.initialized.get_or_init(|| {
            let nodes = pending.take().unwrap_or_default();
            let count = nodes.len();
            let number = self.install(nodes);
            if count == 0 {
                warn!(generation = number, "node registry initialised with no nodes");
            } else {
                info!(generation = number, nodes = count, "node registry initialised");
            }
            installed = Some(number);
        });

        match (installed, pending) {
            (Some(number), _) => number,
            (None, Some(nodes)) => {
                debug!("node registry already initialised; replacing node set");
                self.replace(nodes)
            }
            (None, None) => self.current_generation().unwrap_or_default(),
        }
    }

    /// Swap in a new node set unconditionally; returns its generation number.
    pub fn replace(&self, nodes: Vec<Node>) -> u64 {
        let count = nodes.len();
        let number = self.install(nodes);
        info!(generation = number, nodes = count, "node registry replaced");
        number
    }

    fn install(&self, nodes: Vec<Node>) -> u64 {
        let nodes: Arc<[Node]> = nodes.into();
        let mut number = 0;
        self.current.rcu(|previous| {
            number = previous.as_ref().map_or(0, |generation| generation.number) + 1;
            Some(Arc::new(Generation {
                number,
                nodes: Arc::clone(&nodes),
            }))
        });
        number
    }

    /// The current generation, or `None` before the first install.
    pub fn snapshot(&self) -> Option<Arc<Generation>> {
        self.current.load_full()
    }

    pub fn current_generation(&self) -> Option<u64> {
        self.current.load().as_deref().map(|generation| generation.number)
    }

    /// All nodes of the current generation, in storage order.
    pub fn nodes(&self) -> Vec<Node> {
        self.snapshot()
            .map(|generation| generation.nodes().to_vec())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.current.load().as_deref().map_or(0, Generation::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First node whose id equals `id`, or `None`.
    pub fn lookup_by_id(&self, id: &str) -> Option<Node> {
        let generation = self.current.load();
        generation.as_deref()?.find(id).cloned()
    }

    /// All nodes offering `capability` (exact, case-sensitive, trimmed types).
    ///
    /// A miss is an empty vector, never an error.
    pub fn lookup_by_capability(&self, capability: &str) -> Vec<Node> {
        let generation = self.current.load();
        match generation.as_deref() {
            Some(generation) => generation.offering(capability).cloned().collect(),
            None => Vec::new(),
        }
    }

    /// Endpoint and capability list of the node with `id`, or `None`.
    pub fn summary_by_id(&self, id: &str) -> Option<NodeSummary> {
        let generation = self.current.load();
        generation.as_deref()?.find(id).map(Node::summary)
    }
}
