use glam::IVec3;

/// One of the 6 face-adjacent neighbor directions in a 3D grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    Down = 0,
    Up = 1,
    North = 2,
    South = 3,
    East = 4,
    West = 5,
}

/// All 6 face directions.
pub const FACE_DIRECTIONS: [Direction; 6] = [
    Direction::West,
    Direction::East,
    Direction::Down,
    Direction::Up,
    Direction::North,
    Direction::South,
];

/// One direction per axis, each pointing toward +x, +y or +z.
/// Scanning only these visits every unordered neighbor pair exactly once.
pub const POSITIVE_DIRECTIONS: [Direction; 3] = [Direction::East, Direction::Up, Direction::South];

impl Direction {
    /// Offset vector for this direction. Y-up convention: Down = (0,-1,0).
    pub fn offset(self) -> IVec3 {
        match self {
            Direction::Down => IVec3::new(0, -1, 0),
            Direction::Up => IVec3::new(0, 1, 0),
            Direction::North => IVec3::new(0, 0, -1),
            Direction::South => IVec3::new(0, 0, 1),
            Direction::East => IVec3::new(1, 0, 0),
            Direction::West => IVec3::new(-1, 0, 0),
        }
    }

    /// The direction pointing the other way along the same axis.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Coordinate one step from `coord` in this direction.
    pub fn step(self, coord: IVec3) -> IVec3 {
        coord + self.offset()
    }
}
