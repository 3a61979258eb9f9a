use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};
use std::fmt;

use log::debug;

use crate::graph::{LocationGraph, NodeId, Weight};

/// Shortest distance in meters, or the "infinite" sentinel.
///
/// `Unreachable` orders after every finite distance.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Distance {
    Meters(u64),
    Unreachable,
}

impl Distance {
    pub fn meters(self) -> Option<u64> {
        match self {
            Distance::Meters(m) => Some(m),
            Distance::Unreachable => None,
        }
    }

    pub fn is_reachable(self) -> bool {
        matches!(self, Distance::Meters(_))
    }

    fn from_raw(raw: u64) -> Self {
        if raw == UNREACHED {
            Distance::Unreachable
        } else {
            Distance::Meters(raw)
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Meters(m) => write!(f, "{}", m),
            Distance::Unreachable => f.write_str("inf"),
        }
    }
}

const UNREACHED: u64 = u64::MAX;

#[derive(Copy, Clone, PartialEq, Eq)]
struct State {
    cost: u64,
    node_id: NodeId,
}

// Min-heap by cost
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // reverse ordering for min-heap
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| self.node_id.cmp(&other.node_id))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra from `start` to all nodes. Returns distances (meters), `UNREACHED` when unreachable.
fn dijkstra_all(adj: &[Vec<(NodeId, Weight)>], start: NodeId) -> Vec<u64> {
    let mut dist = vec![UNREACHED; adj.len()];
    let mut heap = BinaryHeap::new();

    dist[start] = 0;
    heap.push(State { cost: 0, node_id: start });

    while let Some(State { cost, node_id }) = heap.pop() {
        if cost > dist[node_id] {
            continue;
        }
        for &(next, w) in &adj[node_id] {
            let next_cost = cost.saturating_add(u64::from(w));
            if next_cost < dist[next] {
                dist[next] = next_cost;
                heap.push(State { cost: next_cost, node_id: next });
            }
        }
    }
    dist
}

/// Result of a single-source query: one entry per known location, plus the
/// source itself when it was never added to the graph.
#[derive(Debug, Clone)]
pub struct Distances<'g> {
    graph: &'g LocationGraph,
    source: String,
    source_known: bool,
    dist: Vec<u64>,
}

impl<'g> Distances<'g> {
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Distance to `location`, or `None` when it is not an entry of this result.
    pub fn get(&self, location: &str) -> Option<Distance> {
        match self.graph.id(location) {
            Some(id) => Some(Distance::from_raw(self.dist[id])),
            None if location == self.source => Some(Distance::Meters(0)),
            None => None,
        }
    }

    /// Entries sorted by location name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Distance)> + '_ {
        let mut entries: Vec<(&str, Distance)> = self
            .dist
            .iter()
            .enumerate()
            .map(|(id, &d)| (self.graph.name(id), Distance::from_raw(d)))
            .collect();
        if !self.source_known {
            entries.push((self.source.as_str(), Distance::Meters(0)));
        }
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries.into_iter()
    }

    pub fn len(&self) -> usize {
        self.dist.len() + usize::from(!self.source_known)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of entries with a finite distance, the source included.
    pub fn reachable(&self) -> usize {
        self.iter().filter(|(_, d)| d.is_reachable()).count()
    }

    pub fn to_map(&self) -> BTreeMap<String, Distance> {
        self.iter().map(|(name, d)| (name.to_owned(), d)).collect()
    }
}

impl LocationGraph {
    /// Shortest distance from `source` to every known location.
    ///
    /// An unknown `source` is answered with `{source: 0}` and every known
    /// location unreachable; no neighbors are explored.
    pub fn shortest_distances(&self, source: &str) -> Distances<'_> {
        let (dist, source_known) = match self.id(source) {
            Some(start) => (dijkstra_all(self.adjacency(), start), true),
            None => (vec![UNREACHED; self.node_count()], false),
        };
        let distances = Distances {
            graph: self,
            source: source.to_owned(),
            source_known,
            dist,
        };
        debug!(
            "shortest_distances from {:?}: {} of {} entries reachable",
            source,
            distances.reachable(),
            distances.len()
        );
        distances
    }
}
