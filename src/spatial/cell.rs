//! Cell kinds and their persisted codes

/// Content of a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellType {
    /// Empty floor, the ball slides over it
    #[default]
    Clear,
    /// A gem that was just collected and awaits the ball settle acknowledgement
    Waiting,
    /// Blocks the ball before it is entered
    Wall,
    /// Halts the ball on the cell
    Stop,
    /// Collectable gem, the ball slides over it
    Gem,
    /// Halts the ball on the cell and destroys it
    Mine,
    /// A mine that already went off
    Exploded,
}

impl CellType {
    /// Every cell kind in code order
    pub const ALL: [Self; 7] = [
        Self::Clear,
        Self::Waiting,
        Self::Wall,
        Self::Stop,
        Self::Gem,
        Self::Mine,
        Self::Exploded,
    ];

    /// Numeric code used in level files
    pub const fn code(self) -> i8 {
        match self {
            Self::Clear => 0,
            Self::Waiting => 1,
            Self::Wall => 2,
            Self::Stop => 3,
            Self::Gem => 4,
            Self::Mine => 5,
            Self::Exploded => 6,
        }
    }

    /// Cell kind for a level file code
    pub const fn from_code(code: i8) -> Option<Self> {
        match code {
            0 => Some(Self::Clear),
            1 => Some(Self::Waiting),
            2 => Some(Self::Wall),
            3 => Some(Self::Stop),
            4 => Some(Self::Gem),
            5 => Some(Self::Mine),
            6 => Some(Self::Exploded),
            _ => None,
        }
    }

    /// Single character used by the text rendering of a grid
    pub const fn symbol(self) -> char {
        match self {
            Self::Clear => '.',
            Self::Waiting => ',',
            Self::Wall => '#',
            Self::Stop => 'o',
            Self::Gem => '*',
            Self::Mine => 'x',
            Self::Exploded => 'X',
        }
    }

    /// Cell kind for a text rendering character
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(Self::Clear),
            ',' => Some(Self::Waiting),
            '#' => Some(Self::Wall),
            'o' => Some(Self::Stop),
            '*' => Some(Self::Gem),
            'x' => Some(Self::Mine),
            'X' => Some(Self::Exploded),
            _ => None,
        }
    }

    /// Walls and live mines break the neighbour graph used for connectivity
    pub const fn is_obstacle(self) -> bool {
        matches!(self, Self::Wall | Self::Mine)
    }
}
