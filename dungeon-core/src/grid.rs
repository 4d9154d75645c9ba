use crate::types::{Point, Rect, Tile};

use std::{
    collections::VecDeque,
    fmt::{Display, Formatter},
};

use serde::Serialize;

/// Dense row-major tile array. Its dimensions are fixed at allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl Grid {
    pub(crate) fn filled(width: u32, height: u32, tile: Tile) -> Self {
        Grid {
            width,
            height,
            tiles: vec![tile; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn get(&self, col: u32, row: u32) -> Option<Tile> {
        self.index_of(col, row).map(|idx| self.tiles[idx])
    }

    pub fn tile(&self, point: Point) -> Option<Tile> {
        self.get(point.x, point.y)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.width as usize)
    }

    pub fn floor_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_floor()).count()
    }

    /// Tile codes indexed as `[col][row]`, 0 for floor and 1 for wall.
    pub fn to_codes(&self) -> Vec<Vec<u8>> {
        (0..self.width)
            .map(|col| {
                (0..self.height)
                    .map(|row| self.tiles[self.flat_index(col, row)].code())
                    .collect()
            })
            .collect()
    }

    pub fn floor_regions(&self) -> usize {
        let mut visited = vec![false; self.tiles.len()];
        let mut queue = VecDeque::new();
        let mut regions = 0;

        for start in 0..self.tiles.len() {
            if visited[start] || !self.tiles[start].is_floor() {
                continue;
            }

            regions += 1;
            visited[start] = true;
            queue.push_back(start);

            while let Some(idx) = queue.pop_front() {
                let col = (idx % self.width as usize) as u32;
                let row = (idx / self.width as usize) as u32;

                for (n_col, n_row) in self.neighbours_of(col, row) {
                    let n_idx = self.flat_index(n_col, n_row);

                    if !visited[n_idx] && self.tiles[n_idx].is_floor() {
                        visited[n_idx] = true;
                        queue.push_back(n_idx);
                    }
                }
            }
        }

        regions
    }

    pub fn is_connected(&self) -> bool {
        self.floor_regions() <= 1
    }

    pub(crate) fn fill_rect(&mut self, rect: &Rect, tile: Tile) {
        let x2 = rect.x2().min(self.width);
        let y2 = rect.y2().min(self.height);

        for row in rect.y..y2 {
            for col in rect.x..x2 {
                let idx = self.flat_index(col, row);
                self.tiles[idx] = tile;
            }
        }
    }

    fn neighbours_of(&self, col: u32, row: u32) -> impl Iterator<Item = (u32, u32)> + '_ {
        let candidates = [
            (col.checked_sub(1), Some(row)),
            (col.checked_add(1), Some(row)),
            (Some(col), row.checked_sub(1)),
            (Some(col), row.checked_add(1)),
        ];

        candidates.into_iter().filter_map(|(c, r)| match (c, r) {
            (Some(c), Some(r)) if c < self.width && r < self.height => Some((c, r)),
            _ => None,
        })
    }

    fn index_of(&self, col: u32, row: u32) -> Option<usize> {
        if col < self.width && row < self.height {
            Some(self.flat_index(col, row))
        } else {
            None
        }
    }

    fn flat_index(&self, col: u32, row: u32) -> usize {
        row as usize * self.width as usize + col as usize
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            let line = row.iter().map(Tile::glyph).collect::<String>();
            writeln!(f, "{}", line)?;
        }

        Ok(())
    }
}
