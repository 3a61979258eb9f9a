//! Nearest pump station / substation queries.
//!
//! The reference network does not tag facility nodes, so the default query
//! treats every location other than the customer's own as a candidate
//! facility. [`LocationGraph::nearest_facility`] narrows the candidates to
//! an explicit set when one is available.

use fnv::FnvHashSet;
use log::debug;

use crate::dijkstra::Distances;
use crate::graph::LocationGraph;

/// The closest candidate location and its distance from the source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Nearest {
    pub location: String,
    pub meters: u64,
}

/// Minimum finite entry among those accepted by `candidate`. Ties go to the
/// smallest location name.
fn closest(distances: &Distances<'_>, candidate: impl Fn(&str) -> bool) -> Option<Nearest> {
    distances
        .iter()
        .filter(|&(name, _)| candidate(name))
        .filter_map(|(name, d)| d.meters().map(|m| (m, name)))
        .min()
        .map(|(meters, name)| Nearest {
            location: name.to_owned(),
            meters,
        })
}

impl LocationGraph {
    /// Nearest reachable location whose name differs from `source`.
    ///
    /// `None` when nothing else is reachable: a single-node graph, an
    /// isolated source and an unknown source all answer the same way.
    pub fn nearest_other_node(&self, source: &str) -> Option<Nearest> {
        let distances = self.shortest_distances(source);
        let nearest = closest(&distances, |name| name != source);
        debug!("nearest_other_node from {:?}: {:?}", source, nearest);
        nearest
    }

    /// Distance in meters to the nearest pump station or substation, or
    /// `None` when no path exists from `source`.
    pub fn distance_to_nearest_facility(&self, source: &str) -> Option<u64> {
        self.nearest_other_node(source).map(|n| n.meters)
    }

    /// Nearest reachable location contained in `facilities`.
    ///
    /// A source that is itself a facility answers with distance 0. Facility
    /// names the graph does not know are never reachable and are skipped.
    pub fn nearest_facility(&self, source: &str, facilities: &FnvHashSet<String>) -> Option<Nearest> {
        let distances = self.shortest_distances(source);
        let nearest = closest(&distances, |name| facilities.contains(name));
        debug!(
            "nearest_facility from {:?} among {} facilities: {:?}",
            source,
            facilities.len(),
            nearest
        );
        nearest
    }
}
