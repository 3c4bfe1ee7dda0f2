use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(tag = "state")]
pub enum Cell {
    #[serde(rename = "hidden")]
    Hidden,
    #[serde(rename = "questioned")]
    Questioned,
    #[serde(rename = "flagged")]
    Flagged,
    #[serde(rename = "revealed")]
    Revealed { adjacent: u8 },
    #[serde(rename = "mine")]
    Mine,
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pos {
    pub row: usize,
    pub column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BoardParams {
    pub width: usize,
    pub height: usize,
    pub mines: usize,
}

impl Default for BoardParams {
    fn default() -> Self {
        Self {
            width: 9,
            height: 9,
            mines: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Ongoing,
    Won,
    Lost,
    Resigned,
}

impl GameStatus {
    pub fn is_finished(self) -> bool {
        !matches!(self, Self::Ongoing)
    }
}

/// Full snapshot of a game as sent over the wire.
///
/// `field` holds one vector per row, so a cell is addressed as
/// `field[row][column]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GameView {
    pub id: Uuid,
    pub status: GameStatus,
    pub board: BoardParams,
    pub field: Vec<Vec<Cell>>,
}

impl GameView {
    pub fn cell(&self, pos: Pos) -> Option<Cell> {
        self.field.get(pos.row)?.get(pos.column).copied()
    }

    /// Number of cells currently carrying a flag.
    pub fn flagged(&self) -> usize {
        self.field
            .iter()
            .flatten()
            .filter(|cell| matches!(cell, Cell::Flagged))
            .count()
    }
}
