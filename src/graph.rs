use fnv::FnvHashMap;
use hashbrown::HashMap;

pub type NodeId = usize;

/// Edge length in meters.
pub type Weight = u32;

/// Weighted undirected graph of named locations.
///
/// Location names are case-sensitive and taken as given: `"Udyambag"` and
/// `"Udayambag"` are two different nodes. Names are interned to dense
/// indices so the shortest-path search works on plain vectors.
#[derive(Debug, Clone, Default)]
pub struct LocationGraph {
    index: FnvHashMap<String, NodeId>,
    names: Vec<String>,
    adj: Vec<Vec<(NodeId, Weight)>>,
    edges: usize,
}

impl LocationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an undirected edge between `u` and `v`.
    ///
    /// Both endpoints become known nodes. Self-loops and parallel edges are
    /// stored as given; relaxation keeps the cheapest.
    pub fn add_edge(&mut self, u: &str, v: &str, weight: Weight) {
        let u = self.intern(u);
        let v = self.intern(v);
        self.adj[u].push((v, weight));
        self.adj[v].push((u, weight));
        self.edges += 1;
    }

    fn intern(&mut self, name: &str) -> NodeId {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = self.names.len();
        self.names.push(name.to_owned());
        self.index.insert(name.to_owned(), id);
        self.adj.push(Vec::new());
        id
    }

    pub(crate) fn id(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    pub(crate) fn name(&self, id: NodeId) -> &str {
        &self.names[id]
    }

    pub(crate) fn adjacency(&self) -> &[Vec<(NodeId, Weight)>] {
        &self.adj
    }

    pub fn contains(&self, location: &str) -> bool {
        self.index.contains_key(location)
    }

    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    /// Number of `add_edge` calls, counting duplicates and self-loops.
    pub fn edge_count(&self) -> usize {
        self.edges
    }

    /// Number of stored directed arcs (two per edge).
    pub fn arc_count(&self) -> usize {
        self.adj.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Known locations in insertion order.
    pub fn locations(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }

    /// Neighbors of `location` with edge weights; empty for unknown names.
    pub fn neighbors<'a>(&'a self, location: &str) -> impl Iterator<Item = (&'a str, Weight)> + 'a {
        let arcs: &'a [(NodeId, Weight)] = match self.id(location) {
            Some(id) => &self.adj[id],
            None => &[],
        };
        arcs.iter().map(move |&(v, w)| (self.name(v), w))
    }

    /// Pairs of distinct names that only differ by case or whitespace.
    ///
    /// Nothing is merged; the pairs are reported so bad input data can be
    /// fixed at the source. Spelling variants are not detected.
    pub fn suspect_duplicates(&self) -> Vec<(String, String)> {
        let mut groups: HashMap<String, Vec<&str>> = HashMap::new();
        for name in &self.names {
            let key = name
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase();
            groups.entry(key).or_default().push(name);
        }

        let mut pairs = Vec::new();
        for mut names in groups.into_values().filter(|g| g.len() > 1) {
            names.sort_unstable();
            for (i, a) in names.iter().enumerate() {
                for b in &names[i + 1..] {
                    pairs.push((a.to_string(), b.to_string()));
                }
            }
        }
        pairs.sort();
        pairs
    }
}

impl<S: AsRef<str>> Extend<(S, S, Weight)> for LocationGraph {
    fn extend<I: IntoIterator<Item = (S, S, Weight)>>(&mut self, iter: I) {
        for (u, v, w) in iter {
            self.add_edge(u.as_ref(), v.as_ref(), w);
        }
    }
}

impl<S: AsRef<str>> FromIterator<(S, S, Weight)> for LocationGraph {
    fn from_iter<I: IntoIterator<Item = (S, S, Weight)>>(iter: I) -> Self {
        let mut graph = LocationGraph::new();
        graph.extend(iter);
        graph
    }
}
