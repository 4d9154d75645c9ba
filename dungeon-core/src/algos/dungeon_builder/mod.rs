use crate::{
    algos::RandomSource,
    constants::MIN_MAP_DIMENSION,
    error::ConfigurationError,
    grid::Grid,
    types::{Dungeon, MapSize, Rect, Tile},
};

use tracing::{Level, event, span};

mod bsp;
mod builder_config;

use bsp::{PartitionNode, TreeFeatures};
pub use builder_config::DungeonBuilderConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DungeonBuilder {
    size: MapSize,
    config: DungeonBuilderConfig,
}

impl DungeonBuilder {
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigurationError> {
        let size = MapSize::new(width, height, MIN_MAP_DIMENSION)?;

        Ok(DungeonBuilder {
            size,
            config: DungeonBuilderConfig::default(),
        })
    }

    pub fn with_config(self, config: DungeonBuilderConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;

        Ok(DungeonBuilder { config, ..self })
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    pub fn config(&self) -> &DungeonBuilderConfig {
        &self.config
    }

    pub fn build(&self, rng: &mut impl RandomSource) -> Dungeon {
        let span = span!(Level::DEBUG, "build_dungeon");
        let _guard = span.enter();

        let build_start = std::time::Instant::now();

        let mut grid = Grid::filled(self.size.width, self.size.height, Tile::Wall);

        let (tree, features) = self.partition(rng);

        let partition_time = std::time::Instant::now();
        event!(
            Level::DEBUG,
            "Partitioned [{}x{}] into [{}] leaves (depth {}) in {:.2}ms",
            self.size.width,
            self.size.height,
            tree.leaf_count(),
            tree.depth(),
            partition_time.duration_since(build_start).as_millis()
        );

        // The tree is not needed once rooms and corridors are known
        drop(tree);

        Self::carve(&mut grid, &features);

        event!(
            Level::DEBUG,
            "Carved [{}] rooms and [{}] corridors, [{}] floor tiles in {:.2}ms",
            features.rooms.len(),
            features.corridors.len(),
            grid.floor_count(),
            partition_time.elapsed().as_millis()
        );

        Dungeon {
            grid,
            rooms: features.rooms,
            corridors: features.corridors,
        }
    }

    fn partition(&self, rng: &mut impl RandomSource) -> (PartitionNode, TreeFeatures) {
        let mut root = self.grow_tree(rng);
        let features = root.create_rooms(&self.config, rng);

        (root, features)
    }

    fn grow_tree(&self, rng: &mut impl RandomSource) -> PartitionNode {
        let mut root = PartitionNode::new(Rect::new(0, 0, self.size.width, self.size.height));

        let mut pass = 0;
        loop {
            pass += 1;
            let splits = root.grow(&self.config, rng);

            event!(Level::TRACE, "Growth pass [{}] split [{}] leaves", pass, splits);

            if splits == 0 {
                break;
            }
        }

        root
    }

    fn carve(grid: &mut Grid, features: &TreeFeatures) {
        for room in features.rooms.iter() {
            if let Some(interior) = room.interior() {
                grid.fill_rect(&interior, Tile::Floor);
            }
        }

        for corridor in features.corridors.iter() {
            for segment in corridor.segments() {
                grid.fill_rect(&segment, Tile::Floor);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        algos::seeded_rng,
        types::{Corridor, CorridorBend, Point},
    };

    fn partition(width: u32, height: u32, seed: u64) -> (PartitionNode, TreeFeatures) {
        let builder = DungeonBuilder::new(width, height).unwrap();
        builder.partition(&mut seeded_rng(seed))
    }

    #[test]
    fn test_new_rejects_small_maps() {
        assert_eq!(
            DungeonBuilder::new(14, 40),
            Err(ConfigurationError::MapTooSmall {
                width: 14,
                height: 40,
                min: 15
            })
        );
        assert!(DungeonBuilder::new(40, 3).is_err());
        assert!(DungeonBuilder::new(15, 15).is_ok());
    }

    #[test]
    fn test_with_config_validates() {
        let builder = DungeonBuilder::new(40, 40).unwrap();
        let config = DungeonBuilderConfig {
            room_max_size: 3,
            ..Default::default()
        };

        assert!(builder.with_config(config).is_err());
    }

    #[test]
    fn test_nodes_have_zero_or_two_children() {
        for seed in 0..16 {
            let (tree, _) = partition(60, 45, seed);

            for node in tree.nodes() {
                match node.children() {
                    Some((left, right)) => {
                        assert!(node.room.is_none());
                        assert!(!left.bounds.intersects(&right.bounds));
                        assert_eq!(left.bounds.area() + right.bounds.area(), node.bounds.area());
                        assert!(node.bounds.contains_rect(&left.bounds));
                        assert!(node.bounds.contains_rect(&right.bounds));
                    }
                    None => assert!(node.room.is_some()),
                }
            }
        }
    }

    #[test]
    fn test_rooms_keep_a_margin_inside_their_leaf() {
        for seed in 0..16 {
            let (tree, _) = partition(80, 50, seed);

            for node in tree.nodes().into_iter().filter(|node| node.is_leaf()) {
                let room = node.room.unwrap();
                let bounds = node.bounds;

                assert!(bounds.contains_rect(&room));
                assert!(room.x2() < bounds.x2());
                assert!(room.y2() < bounds.y2());

                let interior = room.interior().unwrap();
                assert!(interior.x > bounds.x);
                assert!(interior.y > bounds.y);
                assert!(interior.x2() < bounds.x2());
                assert!(interior.y2() < bounds.y2());
            }
        }
    }

    #[test]
    fn test_every_internal_node_gets_one_corridor() {
        let (tree, features) = partition(64, 48, 9);

        assert_eq!(features.rooms.len(), tree.leaf_count());
        assert_eq!(features.corridors.len(), tree.leaf_count() - 1);
    }

    #[test]
    fn test_unsplittable_map_has_single_room() {
        // 15 - 8 = 7 leaves no valid split offset on either axis
        let (tree, features) = partition(15, 15, 1);

        assert!(tree.is_leaf());
        assert_eq!(features.rooms.len(), 1);
        assert!(features.corridors.is_empty());
    }

    #[test]
    fn test_carve_rooms_and_corridors() {
        let mut grid = Grid::filled(20, 20, Tile::Wall);
        let left = Rect::new(1, 1, 5, 5);
        let right = Rect::new(12, 10, 5, 5);
        let features = TreeFeatures {
            rooms: vec![left, right],
            corridors: vec![Corridor::between(
                &left,
                &right,
                CorridorBend::VerticalFirst,
            )],
        };

        DungeonBuilder::carve(&mut grid, &features);

        // Room edges stay walls
        assert_eq!(grid.get(1, 1), Some(Tile::Wall));
        assert_eq!(grid.get(5, 2), Some(Tile::Wall));
        assert_eq!(grid.get(2, 2), Some(Tile::Floor));
        assert_eq!(grid.get(4, 4), Some(Tile::Floor));

        // Down from (3, 3) to row 12, then across to column 14
        assert_eq!(grid.tile(Point::new(3, 8)), Some(Tile::Floor));
        assert_eq!(grid.tile(Point::new(9, 12)), Some(Tile::Floor));
        assert_eq!(grid.tile(Point::new(9, 8)), Some(Tile::Wall));

        assert!(grid.is_connected());
    }

    #[test]
    fn test_build_is_deterministic() {
        let builder = DungeonBuilder::new(50, 35).unwrap();

        let first = builder.build(&mut seeded_rng(1234));
        let second = builder.build(&mut seeded_rng(1234));

        assert_eq!(first, second);
    }
}
