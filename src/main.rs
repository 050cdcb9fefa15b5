// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use serde_json::json;

use walkshed::osm::{OsmSource, Profile};
use walkshed::{Coordinate, HullStrategy, Options};

#[derive(Debug, thiserror::Error)]
#[error("{0}: {1}")]
struct SourceLoadError(PathBuf, #[source] walkshed::osm::Error);

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum HullArg {
    Convex,
    Concave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ProfileArg {
    Foot,
    Bicycle,
    Car,
}

impl ProfileArg {
    fn profile(self) -> &'static Profile<'static> {
        match self {
            Self::Foot => &walkshed::osm::FOOT_PROFILE,
            Self::Bicycle => &walkshed::osm::BICYCLE_PROFILE,
            Self::Car => &walkshed::osm::CAR_PROFILE,
        }
    }
}

/// Prints the area reachable from a point over the road network as GeoJSON.
#[derive(Parser)]
#[command(allow_negative_numbers = true)]
struct Cli {
    /// The path to the OSM file (.osm, .osm.gz or .osm.bz2)
    osm_file: PathBuf,

    /// Latitude of the origin
    lat: f64,

    /// Longitude of the origin
    lon: f64,

    /// Maximum travel distance, in meters
    #[arg(short, long, default_value_t = walkshed::DEFAULT_BUDGET)]
    budget: f64,

    /// How to turn reached points into a polygon
    #[arg(long, value_enum, default_value_t = HullArg::Convex)]
    hull: HullArg,

    /// Maximum distance between vertices of a concave hull, in meters
    #[arg(long, default_value_t = walkshed::DEFAULT_ALPHA)]
    alpha: f64,

    /// Points sampled on every hull edge when smoothing
    #[arg(long, default_value_t = walkshed::DEFAULT_SMOOTHING_SAMPLES)]
    samples: usize,

    /// Output the raw hull, without smoothing
    #[arg(long)]
    no_smooth: bool,

    /// Which ways are considered traversable
    #[arg(short, long, value_enum, default_value_t = ProfileArg::Foot)]
    profile: ProfileArg,

    /// Also output the crow-flies circle with the radius of the budget
    #[arg(long)]
    circle: bool,

    /// Omit the reached road pieces from the output
    #[arg(long)]
    no_roads: bool,

    /// Increase logging verbosity (may be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> Options {
        Options {
            budget: self.budget,
            hull: match self.hull {
                HullArg::Convex => HullStrategy::Convex,
                HullArg::Concave => HullStrategy::Concave { alpha: self.alpha },
            },
            smooth: if self.no_smooth {
                None
            } else {
                Some(self.samples)
            },
        }
    }
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let source = load_source(&cli.osm_file, cli.profile.profile())?;
    let origin = Coordinate::new(cli.lat, cli.lon);
    let isochrone = walkshed::isochrone_from_source(&source, origin, &cli.options())?;

    let mut collection = isochrone.to_geojson();
    if cli.no_roads {
        collection
            .features
            .retain(|f| f.property("kind").and_then(|k| k.as_str()) != Some("interior_edges"));
    }

    if cli.circle {
        collection.features.push(walkshed::polygon_feature(
            &walkshed::circle_polygon(origin, cli.budget, 64),
            json!({"kind": "circle", "radius": cli.budget}),
        ));
    }

    println!("{}", serde_json::to_string_pretty(&collection)?);
    Ok(())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    colog::default_builder().filter_level(level).init();
}

fn load_source<P: AsRef<Path>>(path: P, profile: &Profile) -> Result<OsmSource, SourceLoadError> {
    match OsmSource::from_file(path.as_ref(), profile) {
        Ok(source) => Ok(source),
        Err(e) => Err(SourceLoadError(PathBuf::from(path.as_ref()), e)),
    }
}
