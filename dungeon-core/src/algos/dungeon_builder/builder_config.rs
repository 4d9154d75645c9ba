use crate::{
    constants::{
        EXTRA_SPLIT_CHANCE, HORIZONTAL_FIRST_CORRIDOR_PROB, HORIZONTAL_SPLIT_PROB, MAX_LEAF_SIZE,
        MIN_LEAF_SIZE, MIN_MAP_DIMENSION, ROOM_MAX_SIZE, ROOM_MIN_SIZE, ROOM_MIN_SIZE_FLOOR,
    },
    error::ConfigurationError,
};

#[cfg_attr(feature = "cli", derive(clap::Args))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DungeonBuilderConfig {
    // Leaves are never split into parts thinner than this.
    #[cfg_attr(feature = "cli", arg(long, default_value_t = MIN_LEAF_SIZE))]
    pub min_leaf_size: u32,
    // Leaves wider or taller than this are always split when possible.
    #[cfg_attr(feature = "cli", arg(long, default_value_t = MAX_LEAF_SIZE))]
    pub max_leaf_size: u32,
    #[cfg_attr(feature = "cli", arg(long, default_value_t = ROOM_MIN_SIZE))]
    pub room_min_size: u32,
    #[cfg_attr(feature = "cli", arg(long, default_value_t = ROOM_MAX_SIZE))]
    pub room_max_size: u32,
    // The probability of splitting a leaf that is already small enough.
    #[cfg_attr(feature = "cli", arg(long, default_value_t = EXTRA_SPLIT_CHANCE))]
    pub extra_split_chance: f64,
    // The random probability of performing a horizontal split, used when
    // the aspect ratio does not force an axis.
    #[cfg_attr(feature = "cli", arg(long, default_value_t = HORIZONTAL_SPLIT_PROB))]
    pub horizontal_split_prob: f64,
    // The probability of carving the horizontal leg of a corridor first.
    #[cfg_attr(feature = "cli", arg(long, default_value_t = HORIZONTAL_FIRST_CORRIDOR_PROB))]
    pub horizontal_first_corridor_prob: f64,
}

impl Default for DungeonBuilderConfig {
    fn default() -> Self {
        DungeonBuilderConfig {
            min_leaf_size: MIN_LEAF_SIZE,
            max_leaf_size: MAX_LEAF_SIZE,
            room_min_size: ROOM_MIN_SIZE,
            room_max_size: ROOM_MAX_SIZE,
            extra_split_chance: EXTRA_SPLIT_CHANCE,
            horizontal_split_prob: HORIZONTAL_SPLIT_PROB,
            horizontal_first_corridor_prob: HORIZONTAL_FIRST_CORRIDOR_PROB,
        }
    }
}

impl DungeonBuilderConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.min_leaf_size == 0 || self.max_leaf_size < self.min_leaf_size {
            return Err(ConfigurationError::InvalidLeafSizes {
                min: self.min_leaf_size,
                max: self.max_leaf_size,
            });
        }

        // Every leaf is at least this wide: either a split product or an
        // unsplit map.
        let leaf_min = self.min_leaf_size.min(MIN_MAP_DIMENSION);

        if self.room_min_size < ROOM_MIN_SIZE_FLOOR
            || self.room_max_size < self.room_min_size
            || self.room_min_size >= leaf_min
        {
            return Err(ConfigurationError::InvalidRoomSizes {
                min: self.room_min_size,
                max: self.room_max_size,
                leaf_min,
            });
        }

        for (name, value) in [
            ("extra_split_chance", self.extra_split_chance),
            ("horizontal_split_prob", self.horizontal_split_prob),
            (
                "horizontal_first_corridor_prob",
                self.horizontal_first_corridor_prob,
            ),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigurationError::InvalidProbability { name, value });
            }
        }

        Ok(())
    }
}
