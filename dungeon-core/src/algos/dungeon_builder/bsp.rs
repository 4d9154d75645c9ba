use super::DungeonBuilderConfig;
use crate::{
    algos::RandomSource,
    constants::SPLIT_RATIO_CUTOFF,
    types::{Corridor, CorridorBend, Rect, SplitAxis},
};

use tracing::event;

/// A node of the partition tree.
///
/// Children are stored as a pair, so a node always has either zero or two of
/// them. Only leaves ever receive a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PartitionNode {
    pub bounds: Rect,
    pub children: Option<Box<(PartitionNode, PartitionNode)>>,
    pub room: Option<Rect>,
}

/// Rooms and corridors collected by a post-order walk of the tree, in the
/// order they have to be carved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TreeFeatures {
    pub rooms: Vec<Rect>,
    pub corridors: Vec<Corridor>,
}

impl PartitionNode {
    pub fn new(bounds: Rect) -> Self {
        PartitionNode {
            bounds,
            children: None,
            room: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn children(&self) -> Option<(&PartitionNode, &PartitionNode)> {
        self.children.as_deref().map(|(left, right)| (left, right))
    }

    pub fn try_split(
        &mut self,
        config: &DungeonBuilderConfig,
        rng: &mut impl RandomSource,
    ) -> bool {
        if !self.is_leaf() {
            return false;
        }

        let axis = Self::split_axis(self.bounds, config.horizontal_split_prob, rng);
        let span = match axis {
            SplitAxis::Horizontal => self.bounds.height,
            SplitAxis::Vertical => self.bounds.width,
        };

        let max = span.saturating_sub(config.min_leaf_size);
        if max <= config.min_leaf_size {
            return false;
        }

        let offset = rng.uniform_int(config.min_leaf_size, max);

        let Some((first, second)) = self.bounds.try_split_at(axis, offset) else {
            return false;
        };

        self.children = Some(Box::new((
            PartitionNode::new(first),
            PartitionNode::new(second),
        )));

        true
    }

    fn split_axis(
        bounds: Rect,
        horizontal_split_prob: f64,
        rng: &mut impl RandomSource,
    ) -> SplitAxis {
        let random_axis = if rng.uniform_bool(horizontal_split_prob) {
            SplitAxis::Horizontal
        } else {
            SplitAxis::Vertical
        };

        let width = bounds.width as f32;
        let height = bounds.height as f32;

        if bounds.width > bounds.height && width / height <= SPLIT_RATIO_CUTOFF {
            SplitAxis::Vertical
        } else if bounds.height > bounds.width && height / width >= SPLIT_RATIO_CUTOFF {
            SplitAxis::Horizontal
        } else {
            random_axis
        }
    }

    /// One growth pass over the subtree. Every leaf that is too big, or that
    /// wins the extra split roll, tries to split. Children created during the
    /// pass are visited in the same pass. Returns the number of splits.
    pub fn grow(&mut self, config: &DungeonBuilderConfig, rng: &mut impl RandomSource) -> usize {
        let mut splits = 0;

        if self.is_leaf() {
            let oversized = self.bounds.width > config.max_leaf_size
                || self.bounds.height > config.max_leaf_size;

            if (oversized || rng.uniform_bool(config.extra_split_chance))
                && self.try_split(config, rng)
            {
                splits += 1;
            }
        }

        if let Some(children) = self.children.as_deref_mut() {
            splits += children.0.grow(config, rng);
            splits += children.1.grow(config, rng);
        }

        splits
    }

    /// Assigns a room to every leaf of the subtree and links sibling subtrees
    /// with corridors, walking the tree post-order.
    pub fn create_rooms(
        &mut self,
        config: &DungeonBuilderConfig,
        rng: &mut impl RandomSource,
    ) -> TreeFeatures {
        let mut features = TreeFeatures::default();
        self.collect_rooms(config, rng, &mut features);
        features
    }

    fn collect_rooms(
        &mut self,
        config: &DungeonBuilderConfig,
        rng: &mut impl RandomSource,
        features: &mut TreeFeatures,
    ) {
        match self.children.as_deref_mut() {
            Some((left, right)) => {
                left.collect_rooms(config, rng, features);
                right.collect_rooms(config, rng, features);

                let left_room = left.representative_room(rng);
                let right_room = right.representative_room(rng);

                match (left_room, right_room) {
                    (Some(left_room), Some(right_room)) => {
                        let bend = if rng.uniform_bool(config.horizontal_first_corridor_prob) {
                            CorridorBend::HorizontalFirst
                        } else {
                            CorridorBend::VerticalFirst
                        };

                        features
                            .corridors
                            .push(Corridor::between(&left_room, &right_room, bend));
                    }
                    _ => {
                        event!(
                            tracing::Level::WARN,
                            "No corridor for {}: a subtree has no room",
                            self.bounds
                        );
                    }
                }
            }
            None => {
                let room = self.assign_room(config, rng);
                features.rooms.push(room);
            }
        }
    }

    fn assign_room(&mut self, config: &DungeonBuilderConfig, rng: &mut impl RandomSource) -> Rect {
        let Rect {
            x,
            y,
            width,
            height,
        } = self.bounds;

        let room_width = rng.uniform_int(
            config.room_min_size,
            config.room_max_size.min(width - 1),
        );
        let room_height = rng.uniform_int(
            config.room_min_size,
            config.room_max_size.min(height - 1),
        );
        let room_x = rng.uniform_int(x, x + (width - 1) - room_width);
        let room_y = rng.uniform_int(y, y + (height - 1) - room_height);

        let room = Rect::new(room_x, room_y, room_width, room_height);
        self.room = Some(room);

        room
    }

    /// A room of the subtree to use as a corridor endpoint. A leaf answers
    /// with its own room. Otherwise, when both children have one, the side
    /// is picked with a fair coin, and when only one side has one, that side
    /// is used.
    pub fn representative_room(&self, rng: &mut impl RandomSource) -> Option<Rect> {
        if let Some(room) = self.room {
            return Some(room);
        }

        let (left, right) = self.children()?;

        match (left.representative_room(rng), right.representative_room(rng)) {
            (Some(left_room), Some(right_room)) => {
                if rng.uniform_bool(0.5) {
                    Some(left_room)
                } else {
                    Some(right_room)
                }
            }
            (left_room, right_room) => left_room.or(right_room),
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self.children() {
            Some((left, right)) => left.leaf_count() + right.leaf_count(),
            None => 1,
        }
    }

    pub fn depth(&self) -> usize {
        match self.children() {
            Some((left, right)) => 1 + left.depth().max(right.depth()),
            None => 0,
        }
    }

    #[cfg(test)]
    pub fn nodes(&self) -> Vec<&PartitionNode> {
        let mut nodes = vec![];
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            nodes.push(node);

            if let Some((left, right)) = node.children() {
                stack.push(right);
                stack.push(left);
            }
        }

        nodes
    }
}
