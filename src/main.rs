use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use csv::Writer;
use log::info;

use station_route::{load_edges, load_facilities, LoadOptions};

#[derive(Parser, Debug)]
#[command(name = "station-route")]
#[command(about = "Build a location graph from a CSV edge list (from,to,meters) and find the distance from a location to the nearest pump station or substation.", long_about = None)]
struct Cli {
    /// Path to the edge list .csv file
    #[arg(short, long)]
    edges: PathBuf,

    /// Customer location to search from
    #[arg(short, long)]
    from: String,

    /// Optional .csv file with a `location` column naming the facilities.
    /// If omitted, every other location counts as a facility.
    #[arg(long)]
    facilities: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = FacilityKind::PumpStation)]
    kind: FacilityKind,

    /// Strip surrounding whitespace from location names
    #[arg(long, default_value_t = false)]
    trim: bool,

    /// Output CSV (location, distance_m). If omitted, prints a summary to stdout.
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Include unreachable locations in output with infinite distance
    #[arg(long, default_value_t = false)]
    include_unreachable: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum FacilityKind {
    PumpStation,
    Substation,
}

impl FacilityKind {
    fn label(self) -> &'static str {
        match self {
            FacilityKind::PumpStation => "pump station",
            FacilityKind::Substation => "substation",
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let opts = LoadOptions { trim: cli.trim };
    let graph = load_edges(&cli.edges, opts)
        .with_context(|| format!("loading edges from {}", cli.edges.display()))?;
    let source = if cli.trim { cli.from.trim() } else { cli.from.as_str() };

    if !graph.contains(source) {
        info!("{:?} is not a known location", source);
    }

    println!(
        "Calculating shortest distance from your location to the nearest {}...",
        cli.kind.label()
    );
    let nearest = match &cli.facilities {
        Some(path) => {
            let facilities = load_facilities(path, opts)
                .with_context(|| format!("loading facilities from {}", path.display()))?;
            graph.nearest_facility(source, &facilities)
        }
        None => graph.nearest_other_node(source),
    };
    match nearest {
        Some(n) => {
            info!("Nearest {} is {:?}", cli.kind.label(), n.location);
            println!(
                "The shortest distance to the nearest {} is: {} meters.",
                cli.kind.label(),
                n.meters
            );
        }
        None => println!(
            "No {} found or no path exists from your location.",
            cli.kind.label()
        ),
    }

    let dist = graph.shortest_distances(source);
    if let Some(out_path) = cli.out {
        let mut wtr = Writer::from_path(&out_path)
            .with_context(|| format!("creating CSV {}", out_path.display()))?;
        wtr.write_record(["location", "distance_m"])?;
        let mut rows: Vec<_> = dist
            .iter()
            .filter(|(_, d)| d.is_reachable() || cli.include_unreachable)
            .collect();
        rows.sort_by_key(|&(name, d)| (d, name));
        for (name, d) in &rows {
            wtr.write_record([name.to_string(), d.to_string()])?;
        }
        wtr.flush()?;
        println!("Wrote distances for {} locations to {}", rows.len(), out_path.display());
    } else {
        println!("Locations: {}", graph.node_count());
        println!("Reachable from {:?}: {}", source, dist.reachable());
        if let Some(maxd) = dist.iter().filter_map(|(_, d)| d.meters()).max() {
            println!("Max finite distance (m): {}", maxd);
        }
    }

    Ok(())
}
