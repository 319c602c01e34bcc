use std::fmt;

use serde::{Deserialize, Serialize};

/// Side length of the square grid, walls included.
pub const GRID_SIZE: usize = 12;
/// Smallest column/row a player may stand on.
pub const INTERIOR_MIN: i32 = 1;
/// Largest column/row a player may stand on.
pub const INTERIOR_MAX: i32 = GRID_SIZE as i32 - 2;

pub const MAX_HEALTH: i32 = 10;
pub const STARTING_STEPS: u32 = 100;
pub const STARTING_LEVEL: u8 = 1;
pub const FINAL_LEVEL: u8 = 2;
pub const DIFFICULTY_STEP: u32 = 2;

/// Where the player is placed whenever a level is generated.
pub const PLAYER_START: Pos = Pos { y: INTERIOR_MAX, x: 1 };
/// Decorative entry marker below the start tile, level 1 only.
pub const ENTRY_TILE: Pos = Pos { y: INTERIOR_MAX + 1, x: 1 };

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Pos { y: self.y + dy, x: self.x + dx }
    }

    pub fn is_interior(self) -> bool {
        (INTERIOR_MIN..=INTERIOR_MAX).contains(&self.x)
            && (INTERIOR_MIN..=INTERIOR_MAX).contains(&self.y)
    }

    pub fn is_perimeter(self) -> bool {
        let edge = GRID_SIZE as i32 - 1;
        self.x == 0 || self.y == 0 || self.x == edge || self.y == edge
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Column/row delta; rows grow downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'U' => Some(Direction::Up),
            'D' => Some(Direction::Down),
            'L' => Some(Direction::Left),
            'R' => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Closed set of things a grid position can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Wall,
    Entry,
    Ladder,
    Trap,
    Gold,
    MeleeMonster,
    RangedMonster,
    HealthPotion,
    Empty,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunStatus {
    Ongoing,
    Won,
    Lost,
}

impl RunStatus {
    pub fn is_terminal(self) -> bool {
        self != RunStatus::Ongoing
    }
}

/// One line of turn narration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEvent {
    GameStarted { difficulty: u32 },
    LevelGenerated { level: u8 },
    Moved { direction: Direction },
    BumpedWall,
    RunAlreadyOver,
    GoldPickedUp { amount: u32 },
    TrapTriggered { damage: i32 },
    PotionDrunk { restored: i32 },
    MonsterDefeated { kind: CellKind, wounded: bool },
    RangedHit { damage: i32 },
    RangedMiss,
    LevelAdvanced { level: u8 },
    Victory,
    FinalScore { score: u32 },
    Defeat,
    GameSaved,
    SaveFailed { reason: String },
    GameLoaded,
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GameStarted { difficulty } => write!(f, "Game started! Difficulty: {difficulty}"),
            Self::LevelGenerated { level } => write!(f, "Generated Level {level}"),
            Self::Moved { direction } => write!(f, "You moved {}", direction.as_str()),
            Self::BumpedWall => write!(f, "You tried to move but hit a wall"),
            Self::RunAlreadyOver => write!(f, "The run is over"),
            Self::GoldPickedUp { amount } => write!(f, "You picked up {amount} gold!"),
            Self::TrapTriggered { damage } => {
                write!(f, "You fell into a trap! Lost {damage} HP")
            }
            Self::PotionDrunk { restored } => {
                write!(f, "You drank a health potion! Restored {restored} HP")
            }
            Self::MonsterDefeated { kind, wounded: true } => {
                write!(f, "You were defeated by a {}!", kind.label())
            }
            Self::MonsterDefeated { kind, wounded: false } => {
                write!(f, "You defeated a {}!", kind.label())
            }
            Self::RangedHit { damage } => {
                write!(f, "A ranged monster attacked! You lost {damage} HP")
            }
            Self::RangedMiss => write!(f, "A ranged monster attacked, but missed!"),
            Self::LevelAdvanced { level } => {
                write!(f, "Advanced to Level {level}! Difficulty increased")
            }
            Self::Victory => write!(f, "CONGRATULATIONS! You escaped the dungeon!"),
            Self::FinalScore { score } => write!(f, "Final score: {score}"),
            Self::Defeat => write!(f, "GAME OVER! Score: -1"),
            Self::GameSaved => write!(f, "Game saved successfully"),
            Self::SaveFailed { reason } => write!(f, "Save failed: {reason}"),
            Self::GameLoaded => write!(f, "Game loaded successfully"),
        }
    }
}
