//! CSV loading for edge lists and facility lists.
//!
//! Edge lists carry a `from,to,meters` header and one undirected edge per
//! row. Facility lists carry a single `location` column.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use fnv::FnvHashSet;
use log::{info, warn};
use serde::Deserialize;

use crate::error::{RouteError, RouteResult};
use crate::graph::{LocationGraph, Weight};

#[derive(Clone, Copy, Debug, Default)]
pub struct LoadOptions {
    /// Strip surrounding whitespace from every field. Off by default, so
    /// names are taken exactly as written.
    pub trim: bool,
}

#[derive(Debug, Deserialize)]
struct EdgeRecord {
    from: String,
    to: String,
    meters: i64,
}

#[derive(Debug, Deserialize)]
struct FacilityRecord {
    location: String,
}

fn reader<R: Read>(rdr: R, opts: LoadOptions) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .trim(if opts.trim { Trim::All } else { Trim::None })
        .from_reader(rdr)
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map_or(0, |p| p.line())
}

fn check_weight(line: u64, edge: &EdgeRecord) -> RouteResult<Weight> {
    if edge.meters < 0 {
        return Err(RouteError::NegativeWeight {
            line,
            from: edge.from.clone(),
            to: edge.to.clone(),
            meters: edge.meters,
        });
    }
    Weight::try_from(edge.meters).map_err(|_| RouteError::WeightOverflow {
        line,
        meters: edge.meters,
    })
}

/// Build a graph from CSV edge rows read from `rdr`.
pub fn read_edges<R: Read>(rdr: R, opts: LoadOptions) -> RouteResult<LocationGraph> {
    let mut rdr = reader(rdr, opts);
    let headers = rdr.headers()?.clone();
    let mut graph = LocationGraph::new();
    let mut record = StringRecord::new();

    while rdr.read_record(&mut record)? {
        let line = line_of(&record);
        let edge: EdgeRecord = record.deserialize(Some(&headers))?;
        if edge.from.is_empty() || edge.to.is_empty() {
            return Err(RouteError::EmptyLocation { line });
        }
        let weight = check_weight(line, &edge)?;
        graph.add_edge(&edge.from, &edge.to, weight);
    }

    info!(
        "Loaded {} edges over {} locations",
        graph.edge_count(),
        graph.node_count()
    );
    for (a, b) in graph.suspect_duplicates() {
        warn!("Locations {:?} and {:?} differ only by case or spacing", a, b);
    }
    Ok(graph)
}

pub fn load_edges(path: impl AsRef<Path>, opts: LoadOptions) -> RouteResult<LocationGraph> {
    read_edges(File::open(path)?, opts)
}

/// Read a set of facility location names from CSV rows.
pub fn read_facilities<R: Read>(rdr: R, opts: LoadOptions) -> RouteResult<FnvHashSet<String>> {
    let mut rdr = reader(rdr, opts);
    let headers = rdr.headers()?.clone();
    let mut facilities = FnvHashSet::default();
    let mut record = StringRecord::new();

    while rdr.read_record(&mut record)? {
        let line = line_of(&record);
        let facility: FacilityRecord = record.deserialize(Some(&headers))?;
        if facility.location.is_empty() {
            return Err(RouteError::EmptyLocation { line });
        }
        facilities.insert(facility.location);
    }

    info!("Loaded {} facilities", facilities.len());
    Ok(facilities)
}

pub fn load_facilities(path: impl AsRef<Path>, opts: LoadOptions) -> RouteResult<FnvHashSet<String>> {
    read_facilities(File::open(path)?, opts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Distance;
    use std::io::Write;

    fn edges(text: &str) -> RouteResult<LocationGraph> {
        read_edges(text.as_bytes(), LoadOptions::default())
    }

    #[test]
    fn reads_edge_rows() {
        let g = edges("from,to,meters\nA,B,500\nA,C,700\n").unwrap();
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.distance_to_nearest_facility("A"), Some(500));
    }

    #[test]
    fn header_only_is_an_empty_graph() {
        assert!(edges("from,to,meters\n").unwrap().is_empty());
    }

    #[test]
    fn columns_are_matched_by_header() {
        let g = edges("meters,to,from\n300,B,A\n").unwrap();
        assert_eq!(g.neighbors("A").collect::<Vec<_>>(), vec![("B", 300)]);
    }

    #[test]
    fn names_are_exact_by_default() {
        let g = edges("from,to,meters\nA , B,5\n").unwrap();
        assert!(g.contains("A "));
        assert!(g.contains(" B"));
        assert!(!g.contains("A"));
    }

    #[test]
    fn trim_option_strips_whitespace() {
        let g = read_edges("from,to,meters\n A , B , 5 \n".as_bytes(), LoadOptions { trim: true }).unwrap();
        assert!(g.contains("A"));
        assert!(g.contains("B"));
    }

    #[test]
    fn quoted_names_with_commas() {
        let g = edges("from,to,meters\n\"Govt. Hospital, East\",Court Compound,200\n").unwrap();
        assert!(g.contains("Govt. Hospital, East"));
    }

    #[test]
    fn negative_weight_is_rejected() {
        let err = edges("from,to,meters\nA,B,5\nA,C,-1\n").unwrap_err();
        assert!(
            matches!(err, RouteError::NegativeWeight { line: 3, meters: -1, .. }),
            "{:?}",
            err
        );
    }

    #[test]
    fn oversized_weight_is_rejected() {
        let err = edges("from,to,meters\nA,B,5000000000\n").unwrap_err();
        assert!(matches!(err, RouteError::WeightOverflow { line: 2, .. }), "{:?}", err);
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = edges("from,to,meters\nA,,5\n").unwrap_err();
        assert!(matches!(err, RouteError::EmptyLocation { line: 2 }), "{:?}", err);
    }

    #[test]
    fn non_integer_weight_is_a_csv_error() {
        let err = edges("from,to,meters\nA,B,12.5\n").unwrap_err();
        assert!(matches!(err, RouteError::Csv(_)), "{:?}", err);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let err = load_edges(dir.path().join("missing.csv"), LoadOptions::default()).unwrap_err();
        assert!(matches!(err, RouteError::Io(_)), "{:?}", err);
    }

    #[test]
    fn loads_edges_and_facilities_from_files() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let edge_path = dir.path().join("edges.csv");
        let facility_path = dir.path().join("facilities.csv");
        let mut f = File::create(&edge_path).unwrap();
        writeln!(f, "from,to,meters\nHome,Shop,100\nShop,Pump,400\nHome,Depot,900").unwrap();
        let mut f = File::create(&facility_path).unwrap();
        writeln!(f, "location\nPump\nDepot").unwrap();

        let g = load_edges(&edge_path, LoadOptions::default()).unwrap();
        let facilities = load_facilities(&facility_path, LoadOptions::default()).unwrap();
        assert_eq!(facilities.len(), 2);
        assert_eq!(g.nearest_facility("Home", &facilities).map(|n| n.meters), Some(500));
        assert_eq!(g.distance_to_nearest_facility("Home"), Some(100));
    }

    #[test]
    fn empty_facility_name_is_rejected() {
        let err = read_facilities("location\nPump\n\"\"\n".as_bytes(), LoadOptions::default()).unwrap_err();
        assert!(matches!(err, RouteError::EmptyLocation { line: 3 }), "{:?}", err);
    }

    #[test]
    fn reference_network() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/belagavi.csv");
        let g = load_edges(path, LoadOptions::default()).unwrap();

        assert_eq!(g.distance_to_nearest_facility("Shaniwar Khoot"), Some(500));
        assert_eq!(g.distance_to_nearest_facility("Govt. Hospital"), Some(200));
        assert_eq!(g.distance_to_nearest_facility("Belgaum Fort"), None);

        // Tilakwadi -> Shahapur -> Udayambag -> Majagaon
        let d = g.shortest_distances("Tilakwadi");
        assert_eq!(d.get("Majagaon"), Some(Distance::Meters(1000 + 900 + 1400)));
        // Listed twice, at 1300 and at 1000.
        assert_eq!(d.get("Deshmukh Road"), Some(Distance::Meters(1000)));
        // "Udyambag" and "Udayambag" are separate nodes with no edge between them.
        assert_eq!(d.get("Udyambag"), Some(Distance::Unreachable));

        assert!(g
            .suspect_duplicates()
            .contains(&("Mahantesh Nagar".to_string(), "Mahantesh nagar".to_string())));
    }
}
