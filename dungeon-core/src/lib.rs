mod algos;
mod constants;
mod error;
mod grid;
mod types;

use tracing::{Level, span};

pub use algos::{DungeonBuilder, DungeonBuilderConfig, RandomSource, seeded_rng};
pub use constants::{
    MAX_LEAF_SIZE, MIN_LEAF_SIZE, MIN_MAP_DIMENSION, ROOM_MAX_SIZE, ROOM_MIN_SIZE,
};
pub use error::ConfigurationError;
pub use grid::Grid;
pub use types::{Corridor, CorridorBend, Dungeon, Point, Rect, Tile};

/// Fails before drawing any randomness when the map is too small.
pub fn generate(
    width: u32,
    height: u32,
    rng: &mut impl RandomSource,
) -> Result<Grid, ConfigurationError> {
    let span = span!(Level::DEBUG, "generate");
    let _guard = span.enter();

    let builder = DungeonBuilder::new(width, height)?;

    Ok(builder.build(rng).into_grid())
}
