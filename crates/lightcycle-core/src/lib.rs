pub mod events;
pub mod grid;
pub mod player;

pub use events::{Outcome, RoundEvent, RoundState, ScoreSnapshot};
pub use grid::{Axis, Direction, GridCoordinate, GridDimensions};
pub use player::{PlayerColor, PlayerId};
