use serde::{Deserialize, Serialize};

use lightcycle_core::{Direction, GridCoordinate, GridDimensions, PlayerId};

/// A start cell with starting heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub start: GridCoordinate,
    pub heading: Direction,
}

/// Default spawn for a seat: both cycles on the middle row, inset a tenth of the
/// arena width from their own side wall and facing each other.
pub fn default_spawn(grid: GridDimensions, player: PlayerId) -> SpawnPoint {
    let width = grid.width as i32;
    let inset = width / 10;
    let row = grid.height as i32 / 2;

    match player {
        PlayerId::One => SpawnPoint {
            start: GridCoordinate::new(inset, row),
            heading: Direction::Right,
        },
        PlayerId::Two => SpawnPoint {
            start: GridCoordinate::new(width - 1 - inset, row),
            heading: Direction::Left,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_arena_matches_classic_layout() {
        let grid = GridDimensions::new(100, 60);
        let p1 = default_spawn(grid, PlayerId::One);
        let p2 = default_spawn(grid, PlayerId::Two);
        assert_eq!(p1.start, GridCoordinate::new(10, 30));
        assert_eq!(p1.heading, Direction::Right);
        assert_eq!(p2.start, GridCoordinate::new(89, 30));
        assert_eq!(p2.heading, Direction::Left);
    }

    #[test]
    fn spawns_within_arena_bounds() {
        for (w, h) in [(2, 1), (10, 10), (33, 7), (100, 60), (640, 480)] {
            let grid = GridDimensions::new(w, h);
            for player in PlayerId::ALL {
                let spawn = default_spawn(grid, player);
                assert!(
                    grid.contains(spawn.start),
                    "{player} spawn {:?} outside {w}x{h}",
                    spawn.start
                );
            }
        }
    }

    #[test]
    fn spawns_face_each_other() {
        let grid = GridDimensions::new(40, 20);
        let p1 = default_spawn(grid, PlayerId::One);
        let p2 = default_spawn(grid, PlayerId::Two);
        let (dx1, _) = p1.heading.delta();
        let (dx2, _) = p2.heading.delta();
        assert!(dx1 * (p2.start.col - p1.start.col) > 0);
        assert!(dx2 * (p1.start.col - p2.start.col) > 0);
    }
}
