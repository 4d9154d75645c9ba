pub const MIN_MAP_DIMENSION: u32 = 15;

pub const MIN_LEAF_SIZE: u32 = 8;
pub const MAX_LEAF_SIZE: u32 = 25;

pub const ROOM_MIN_SIZE: u32 = 7;
pub const ROOM_MAX_SIZE: u32 = 24;

// A room needs at least one floor cell strictly inside its walls.
pub(crate) const ROOM_MIN_SIZE_FLOOR: u32 = 3;

// Chance of splitting a leaf that is already below MAX_LEAF_SIZE
// on both axes.
pub(crate) const EXTRA_SPLIT_CHANCE: f64 = 0.2;
pub(crate) const HORIZONTAL_SPLIT_PROB: f64 = 0.5;
pub(crate) const HORIZONTAL_FIRST_CORRIDOR_PROB: f64 = 0.5;

// Aspect ratio at which the split axis stops being random.
pub(crate) const SPLIT_RATIO_CUTOFF: f32 = 1.25;

pub(crate) const FLOOR_GLYPH: char = '.';
pub(crate) const WALL_GLYPH: char = '#';
