use crate::{
    constants::{FLOOR_GLYPH, WALL_GLYPH},
    error::ConfigurationError,
    grid::Grid,
};

use std::fmt::{Display, Formatter};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub const fn new(x: u32, y: u32) -> Self {
        Point { x, y }
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum SplitAxis {
    // Divides along the height: the children are stacked on top of each other.
    Horizontal,
    // Divides along the width: the children sit side by side.
    Vertical,
}

impl Display for SplitAxis {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SplitAxis::Horizontal => write!(f, "Horizontal"),
            SplitAxis::Vertical => write!(f, "Vertical"),
        }
    }
}

/// Axis-aligned bounds. `x` and `y` are the top-left cell, the far edges
/// (`x2`, `y2`) are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Display for Rect {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({},{}):[{}x{}]",
            self.x, self.y, self.width, self.height
        )
    }
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn x2(&self) -> u32 {
        self.x + self.width
    }

    pub const fn y2(&self) -> u32 {
        self.y + self.height
    }

    pub const fn area(&self) -> u32 {
        self.width * self.height
    }

    pub const fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2,
            y: self.y + self.height / 2,
        }
    }

    /// The cells strictly inside the rectangle on all four sides, or `None`
    /// when the rectangle is too thin to have any.
    pub fn interior(&self) -> Option<Rect> {
        if self.width < 3 || self.height < 3 {
            return None;
        }

        Some(Rect::new(
            self.x + 1,
            self.y + 1,
            self.width - 2,
            self.height - 2,
        ))
    }

    pub fn contains_point(&self, point: Point) -> bool {
        (self.x..self.x2()).contains(&point.x) && (self.y..self.y2()).contains(&point.y)
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.x2() <= self.x2()
            && other.y2() <= self.y2()
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x2() && other.x < self.x2() && self.y < other.y2() && other.y < self.y2()
    }

    pub(crate) fn try_split_at(self, axis: SplitAxis, at: u32) -> Option<(Rect, Rect)> {
        match axis {
            SplitAxis::Horizontal => {
                if at == 0 || at >= self.height {
                    return None;
                }

                let up = Rect::new(self.x, self.y, self.width, at);
                let down = Rect::new(self.x, self.y + at, self.width, self.height - at);

                Some((up, down))
            }
            SplitAxis::Vertical => {
                if at == 0 || at >= self.width {
                    return None;
                }

                let left = Rect::new(self.x, self.y, at, self.height);
                let right = Rect::new(self.x + at, self.y, self.width - at, self.height);

                Some((left, right))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Tile {
    Floor,
    #[default]
    Wall,
}

impl Tile {
    // Numeric layout used by the level loaders: 0 for floor, 1 for wall.
    pub const fn code(&self) -> u8 {
        match self {
            Tile::Floor => 0,
            Tile::Wall => 1,
        }
    }

    pub const fn glyph(&self) -> char {
        match self {
            Tile::Floor => FLOOR_GLYPH,
            Tile::Wall => WALL_GLYPH,
        }
    }

    pub const fn is_floor(&self) -> bool {
        matches!(self, Tile::Floor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CorridorBend {
    HorizontalFirst,
    VerticalFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Corridor {
    pub from: Point,
    pub to: Point,
    pub bend: CorridorBend,
}

impl Corridor {
    pub fn between(from: &Rect, to: &Rect, bend: CorridorBend) -> Self {
        Corridor {
            from: from.center(),
            to: to.center(),
            bend,
        }
    }

    pub fn segments(&self) -> [Rect; 2] {
        let (from, to) = (self.from, self.to);

        match self.bend {
            CorridorBend::HorizontalFirst => [
                Self::horizontal_segment(from.x, to.x, from.y),
                Self::vertical_segment(from.y, to.y, to.x),
            ],
            CorridorBend::VerticalFirst => [
                Self::vertical_segment(from.y, to.y, from.x),
                Self::horizontal_segment(from.x, to.x, to.y),
            ],
        }
    }

    fn horizontal_segment(x1: u32, x2: u32, y: u32) -> Rect {
        Rect::new(x1.min(x2), y, x1.abs_diff(x2) + 1, 1)
    }

    fn vertical_segment(y1: u32, y2: u32, x: u32) -> Rect {
        Rect::new(x, y1.min(y2), 1, y1.abs_diff(y2) + 1)
    }
}

impl Display for Corridor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} [{:?}]", self.from, self.to, self.bend)
    }
}

/// A generated level: the carved grid plus the rooms and corridors that
/// were carved into it, in carving order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dungeon {
    pub grid: Grid,
    pub rooms: Vec<Rect>,
    pub corridors: Vec<Corridor>,
}

impl Dungeon {
    pub fn into_grid(self) -> Grid {
        self.grid
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct MapSize {
    pub width: u32,
    pub height: u32,
}

impl MapSize {
    pub fn new(width: u32, height: u32, min: u32) -> Result<Self, ConfigurationError> {
        if width < min || height < min {
            return Err(ConfigurationError::MapTooSmall { width, height, min });
        }

        Ok(MapSize { width, height })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_center_uses_integer_division() {
        let rect = Rect::new(3, 4, 7, 8);

        assert_eq!(rect.center(), Point::new(6, 8));
    }

    #[test]
    fn test_try_split_horizontal() {
        let rect = Rect::new(0, 3, 4, 5);

        let (up, down) = rect.try_split_at(SplitAxis::Horizontal, 3).unwrap();

        assert_eq!(up, Rect::new(0, 3, 4, 3));
        assert_eq!(down, Rect::new(0, 6, 4, 2));
    }

    #[test]
    fn test_try_split_vertical() {
        let rect = Rect::new(4, 13, 17, 9);

        let (left, right) = rect.try_split_at(SplitAxis::Vertical, 5).unwrap();

        assert_eq!(left, Rect::new(4, 13, 5, 9));
        assert_eq!(right, Rect::new(9, 13, 12, 9));
    }

    #[test]
    fn test_try_split_fails_with_invalid_index() {
        let rect = Rect::new(1, 3, 6, 6);

        assert!(rect.try_split_at(SplitAxis::Horizontal, 0).is_none());
        assert!(rect.try_split_at(SplitAxis::Horizontal, 6).is_none());
        assert!(rect.try_split_at(SplitAxis::Vertical, 0).is_none());
        assert!(rect.try_split_at(SplitAxis::Vertical, 9).is_none());
    }

    #[test]
    fn test_interior() {
        assert_eq!(Rect::new(2, 2, 7, 5).interior(), Some(Rect::new(3, 3, 5, 3)));
        assert_eq!(Rect::new(2, 2, 2, 5).interior(), None);
    }

    #[test]
    fn test_intersects_and_contains() {
        let outer = Rect::new(0, 0, 10, 10);
        let inner = Rect::new(2, 2, 3, 3);
        let touching = Rect::new(10, 0, 4, 4);

        assert!(outer.contains_rect(&inner));
        assert!(!inner.contains_rect(&outer));
        assert!(outer.intersects(&inner));
        assert!(!outer.intersects(&touching));
        assert!(outer.contains_point(Point::new(9, 9)));
        assert!(!outer.contains_point(Point::new(10, 9)));
    }

    #[test]
    fn test_corridor_segments_horizontal_first() {
        let corridor = Corridor {
            from: Point::new(8, 2),
            to: Point::new(3, 6),
            bend: CorridorBend::HorizontalFirst,
        };

        let [first, second] = corridor.segments();

        assert_eq!(first, Rect::new(3, 2, 6, 1));
        assert_eq!(second, Rect::new(3, 2, 1, 5));
    }

    #[test]
    fn test_corridor_segments_vertical_first() {
        let corridor = Corridor {
            from: Point::new(8, 2),
            to: Point::new(3, 6),
            bend: CorridorBend::VerticalFirst,
        };

        let [first, second] = corridor.segments();

        assert_eq!(first, Rect::new(8, 2, 1, 5));
        assert_eq!(second, Rect::new(3, 6, 6, 1));
    }

    #[test]
    fn test_map_size_rejects_small_dimensions() {
        assert!(MapSize::new(14, 40, 15).is_err());
        assert!(MapSize::new(40, 14, 15).is_err());
        assert!(MapSize::new(15, 15, 15).is_ok());
    }
}
