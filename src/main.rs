use std::error::Error;
use std::path::{Path, PathBuf};

use campusroute::{BuildingFloor, Buildings, CostFunction, Graph, Location};
use clap::Parser;

#[derive(Debug, thiserror::Error)]
#[error("{0}: {1}")]
struct GraphLoadError(PathBuf, #[source] campusroute::features::Error);

#[derive(Debug, thiserror::Error)]
enum EndpointError {
    #[error("unknown building floor: {0}")]
    Unknown(BuildingFloor),

    #[error("no pathways on {0}")]
    Unreachable(BuildingFloor),
}

#[derive(Debug, thiserror::Error)]
#[error("no route from {0} to {1}")]
struct NoRouteError(BuildingFloor, BuildingFloor);

#[derive(Parser)]
struct Cli {
    /// The path to the GeoJSON file with campus pathways
    paths_file: PathBuf,

    /// Start building floor, as CODE|FLOOR
    start: BuildingFloor,

    /// End building floor, as CODE|FLOOR
    end: BuildingFloor,

    /// Additional GeoJSON file with building reference points
    #[arg(long)]
    buildings: Option<PathBuf>,

    /// What to optimize: distance, time or indoors
    #[arg(long, default_value_t = CostFunction::Distance)]
    cost: CostFunction,

    /// Print the route as a GeoJSON FeatureCollection instead of directions
    #[arg(long)]
    geojson: bool,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    colog::init();
    let cli = Cli::parse();

    let (g, buildings) = load_campus(&cli.paths_file, cli.buildings.as_deref())?;

    let start = find_endpoint(&g, &buildings, &cli.start)?;
    let end = find_endpoint(&g, &buildings, &cli.end)?;
    log::info!("searching for {} from {} to {}", cli.cost, start, end);

    let route = campusroute::find_route(&g, &start, &end, cli.cost)
        .ok_or_else(|| NoRouteError(cli.start.clone(), cli.end.clone()))?;

    if cli.geojson {
        println!("{}", serde_json::to_string_pretty(&route.to_geojson())?);
    } else {
        println!("{}", route.summary());
        for (idx, step) in route.steps().iter().enumerate() {
            println!("{:>3}. {}", idx + 1, step);
        }
    }

    Ok(())
}

/// Loads the pathway graph and the building catalog. Only building features
/// are taken from the optional buildings file; its pathways are discarded.
fn load_campus(
    paths_file: &Path,
    buildings_file: Option<&Path>,
) -> Result<(Graph, Buildings), GraphLoadError> {
    let mut g = Graph::default();
    let mut buildings = Buildings::default();
    load_features(&mut g, &mut buildings, paths_file)?;

    if let Some(path) = buildings_file {
        let mut scratch = Graph::default();
        load_features(&mut scratch, &mut buildings, path)?;
    }

    Ok((g, buildings))
}

fn load_features<P: AsRef<Path>>(
    g: &mut Graph,
    buildings: &mut Buildings,
    path: P,
) -> Result<(), GraphLoadError> {
    let options = campusroute::features::Options::default();
    match campusroute::features::add_features_from_file(g, buildings, &options, path.as_ref()) {
        Ok(()) => Ok(()),
        Err(e) => Err(GraphLoadError(PathBuf::from(path.as_ref()), e)),
    }
}

fn find_endpoint(
    g: &Graph,
    buildings: &Buildings,
    building_floor: &BuildingFloor,
) -> Result<Location, EndpointError> {
    let location = buildings
        .location(building_floor)
        .ok_or_else(|| EndpointError::Unknown(building_floor.clone()))?;

    if g.contains(&location) {
        return Ok(location);
    }

    let nearest = g
        .find_nearest_location(location.coordinate, building_floor)
        .ok_or_else(|| EndpointError::Unreachable(building_floor.clone()))?;
    log::warn!("{location} is not on any pathway - using {nearest} instead");
    Ok(nearest.clone())
}
