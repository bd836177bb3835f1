/// Dense position sets for reachability bookkeeping
pub mod bitset;
/// Cooperative cancellation with optional deadlines
pub mod cancellation;
/// Layout and level generation pipeline
pub mod generator;
/// Wall and mine placement preserving connectivity
pub mod obstacles;
/// Parallel hint search
pub mod pathfinder;
/// Reachability over whole slides
pub mod reachability;
/// Single-slide movement primitive
pub mod slide;
/// Trap-region analysis of candidate levels
pub mod solvability;
/// Stop-cell pattern search
pub mod stops;
