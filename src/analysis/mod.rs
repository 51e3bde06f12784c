/// Aggregation stage of the seismic analysis pipeline.
///
/// Turns a filtered event sequence into the plain, serializable summary
/// structures every presentation page consumes. Rendering (maps, charts,
/// tables) happens elsewhere with zero knowledge of how these were
/// computed.
///
/// Submodules:
/// - `aggregate` — summary statistics, histograms, temporal series,
///   country rankings.

pub mod aggregate;
