//! Game engine.
//!
//! Turn sequencing, placement legality and k-in-a-row judgement on a
//! four-dimensional board.
//!
//! # Win detection
//!
//! After every placement the engine walks the 80 non-zero direction vectors
//! with components in {-1, 0, 1}. Each vector is walked on its own from the
//! new stone; a direction and its negation are never combined. A win is only
//! seen when `k_count - 1` matching stones line up on one side of the new
//! stone, so filling the gap in the middle of a run does not win.

use serde::{Deserialize, Serialize};

use super::board::{shape_cells, Board, BoardShape, Direction, Position, Stone, DIMENSIONS};
use super::player::{Player, PLAYER_COUNT};

/// Default run length needed to win.
pub const DEFAULT_K_COUNT: usize = 4;

/// Default board extent.
pub const DEFAULT_BOARD_SHAPE: BoardShape = [4, 4, 4, 4];

/// Largest board a game may use, in cells.
pub const MAX_BOARD_CELLS: usize = 1 << 16;

/// Number of search directions (3^4 - 1).
pub const DIRECTION_COUNT: usize = 80;

/// Search directions in evaluation order: components drawn from `[0, 1, -1]`,
/// x outermost and w innermost, zero vector skipped. The first winning
/// direction in this order is the one reported.
pub const DIRECTIONS: [Direction; DIRECTION_COUNT] = build_directions();

const fn build_directions() -> [Direction; DIRECTION_COUNT] {
    const VALUES: [isize; 3] = [0, 1, -1];
    let mut out = [[0; DIMENSIONS]; DIRECTION_COUNT];
    let mut i = 1;
    while i <= DIRECTION_COUNT {
        out[i - 1] = [
            VALUES[i / 27],
            VALUES[(i / 9) % 3],
            VALUES[(i / 3) % 3],
            VALUES[i % 3],
        ];
        i += 1;
    }
    out
}

/// Game configuration, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Run length required to win
    pub k_count: usize,

    /// Board extent per dimension
    pub board_shape: BoardShape,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            k_count: DEFAULT_K_COUNT,
            board_shape: DEFAULT_BOARD_SHAPE,
        }
    }
}

impl GameConfig {
    /// Create a validated configuration.
    pub fn new(k_count: usize, board_shape: BoardShape) -> Result<Self, ConfigError> {
        let config = Self {
            k_count,
            board_shape,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_shape.contains(&0) {
            return Err(ConfigError::EmptyDimension);
        }
        match shape_cells(&self.board_shape) {
            Some(cells) if cells <= MAX_BOARD_CELLS => {}
            _ => {
                return Err(ConfigError::BoardTooLarge {
                    board_shape: self.board_shape,
                    max: MAX_BOARD_CELLS,
                })
            }
        }
        if self.k_count == 0 {
            return Err(ConfigError::ZeroRunLength);
        }
        let smallest = self.board_shape.iter().copied().min().unwrap_or(0);
        if self.k_count > smallest {
            return Err(ConfigError::RunLongerThanBoard {
                k_count: self.k_count,
                smallest,
            });
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyDimension,
    ZeroRunLength,
    RunLongerThanBoard { k_count: usize, smallest: usize },
    BoardTooLarge { board_shape: BoardShape, max: usize },
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDimension => write!(f, "Board dimensions must be positive"),
            Self::ZeroRunLength => write!(f, "Run length must be positive"),
            Self::RunLongerThanBoard { k_count, smallest } => write!(
                f,
                "Run length {} exceeds smallest board dimension {}",
                k_count, smallest
            ),
            Self::BoardTooLarge { board_shape, max } => write!(
                f,
                "Board {:?} has more than {} cells",
                board_shape, max
            ),
            Self::Parse(e) => write!(f, "Invalid configuration: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Coarse game state derived from the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won,
    Draw,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Won => "won",
            Self::Draw => "draw",
        }
    }

    /// Check if game is terminal (cannot change).
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// Outcome of the game so far.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GameResult {
    pub finished: bool,
    pub winner: Option<Player>,
    /// The winning run, starting with the stone that completed it
    pub stones: Option<Vec<Stone>>,
}

impl GameResult {
    pub fn in_progress() -> Self {
        Self::default()
    }

    pub fn won(winner: Player, stones: Vec<Stone>) -> Self {
        Self {
            finished: true,
            winner: Some(winner),
            stones: Some(stones),
        }
    }

    pub fn draw() -> Self {
        Self {
            finished: true,
            winner: None,
            stones: None,
        }
    }

    pub fn status(&self) -> GameStatus {
        match (self.finished, &self.winner) {
            (false, _) => GameStatus::InProgress,
            (true, Some(_)) => GameStatus::Won,
            (true, None) => GameStatus::Draw,
        }
    }

    /// Positions of the winning run, if any.
    pub fn winning_positions(&self) -> Vec<Position> {
        self.stones
            .iter()
            .flatten()
            .map(|s| s.position)
            .collect()
    }
}

/// Rejected placements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// Coordinate outside the board shape
    BoardRange,
    /// Target cell already holds a stone
    PositionOverlap,
    /// The game already has a terminal result
    FinishedGame,
}

impl GameError {
    /// Error name reported to clients.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BoardRange => "BoardRangeError",
            Self::PositionOverlap => "PositionOverlapError",
            Self::FinishedGame => "FinishedGameError",
        }
    }
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BoardRange => write!(f, "Position is outside the board"),
            Self::PositionOverlap => write!(f, "Position is already occupied"),
            Self::FinishedGame => write!(f, "Game has already finished"),
        }
    }
}

impl std::error::Error for GameError {}

/// Full client-facing view of a game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub result: GameResult,
    pub config: GameConfig,
    pub players: [Player; PLAYER_COUNT],
    pub current_player: Player,
    pub board: Board,
}

/// A single match between two players.
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    board: Board,
    players: [Player; PLAYER_COUNT],
    /// Index of the player to move
    current: u8,
    result: GameResult,

    /// Successful placements so far
    pub turns: u32,

    pub created_at: chrono::DateTime<chrono::Utc>,

    /// When the result became terminal
    pub ended_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl Game {
    /// Create a game with an empty board. Player 1 moves first.
    pub fn new(config: GameConfig) -> Self {
        Self {
            board: Board::new(config.board_shape),
            config,
            players: Player::pair(),
            current: 0,
            result: GameResult::in_progress(),
            turns: 0,
            created_at: chrono::Utc::now(),
            ended_at: None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player; PLAYER_COUNT] {
        &self.players
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current as usize]
    }

    pub fn result(&self) -> &GameResult {
        &self.result
    }

    pub fn status(&self) -> GameStatus {
        self.result.status()
    }

    pub fn is_finished(&self) -> bool {
        self.status().is_terminal()
    }

    /// Play the current player's stone at `position` and judge the outcome.
    ///
    /// The turn passes to the opponent unless the game just ended.
    pub fn play_turn(&mut self, position: Position) -> Result<GameResult, GameError> {
        let player = self.current_player().clone();
        let stone = self.place_stone(&player, position)?;
        let result = self.judge(&player, &stone);

        if !result.finished {
            self.current = player.other_index();
        }
        Ok(result)
    }

    /// Put a stone for `player` on the board.
    pub fn place_stone(&mut self, player: &Player, position: Position) -> Result<Stone, GameError> {
        if self.result.finished {
            return Err(GameError::FinishedGame);
        }
        let stone = self.board.place(Stone::new(player.clone(), position))?.clone();
        self.turns += 1;
        Ok(stone)
    }

    /// Decide whether placing `stone` ended the game.
    pub fn judge(&mut self, player: &Player, stone: &Stone) -> GameResult {
        if let Some(stones) = self.winning_run(stone) {
            self.finish(GameResult::won(player.clone(), stones));
        } else if self.board.is_full() {
            self.finish(GameResult::draw());
        }
        self.result.clone()
    }

    fn finish(&mut self, result: GameResult) {
        self.result = result;
        self.ended_at = Some(chrono::Utc::now());
    }

    /// First direction along which `stone` starts a run of `k_count`.
    fn winning_run(&self, stone: &Stone) -> Option<Vec<Stone>> {
        let k = self.config.k_count;
        let direction = DIRECTIONS
            .into_iter()
            .find(|d| self.run_length(stone, *d) == k)?;

        let mut stones = vec![stone.clone()];
        stones.extend(
            (1..k)
                .filter_map(|m| stone.position.step(direction, m))
                .filter_map(|p| self.board.get(&p))
                .cloned(),
        );
        Some(stones)
    }

    /// Matching stones from `stone` along one direction, itself included,
    /// capped at `k_count`.
    fn run_length(&self, stone: &Stone, direction: Direction) -> usize {
        let mut count = 1;
        for m in 1..self.config.k_count {
            let owned = stone
                .position
                .step(direction, m)
                .and_then(|p| self.board.get(&p))
                .is_some_and(|s| s.is_owned_by(&stone.player));
            if !owned {
                break;
            }
            count += 1;
        }
        count
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            result: self.result.clone(),
            config: self.config,
            players: self.players.clone(),
            current_player: self.current_player().clone(),
            board: self.board.clone(),
        }
    }

    /// Convert full game state to JSON snapshot.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "status": self.status().as_str(),
            "result": self.result,
            "config": self.config,
            "players": self.players,
            "current_player": self.current_player(),
            "board": self.board,
            "turns": self.turns,
            "created_at": self.created_at,
            "ended_at": self.ended_at
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pos(x: usize, y: usize, z: usize, w: usize) -> Position {
        Position::new(x, y, z, w)
    }

    /// Play moves alternately, asserting none of them ends the game.
    fn play_all(game: &mut Game, moves: &[Position]) {
        for m in moves {
            let result = game.play_turn(*m).unwrap();
            assert!(!result.finished, "game ended early at {}", m);
        }
    }

    #[test]
    fn test_direction_table() {
        assert_eq!(DIRECTIONS.len(), 80);
        assert!(!DIRECTIONS.contains(&[0, 0, 0, 0]));
        assert_eq!(DIRECTIONS[0], [0, 0, 0, 1]);
        assert_eq!(DIRECTIONS[1], [0, 0, 0, -1]);
        assert_eq!(DIRECTIONS[2], [0, 0, 1, 0]);
        assert_eq!(DIRECTIONS[25], [0, -1, -1, -1]);
        assert_eq!(DIRECTIONS[26], [1, 0, 0, 0]);
        assert_eq!(DIRECTIONS[79], [-1, -1, -1, -1]);

        // Every direction appears once, and so does its negation
        for d in DIRECTIONS {
            let neg = d.map(|c| -c);
            assert_eq!(DIRECTIONS.iter().filter(|x| **x == d).count(), 1);
            assert!(DIRECTIONS.contains(&neg));
        }
    }

    #[test]
    fn test_config_validation() {
        assert_eq!(GameConfig::default(), GameConfig::new(4, [4, 4, 4, 4]).unwrap());
        assert_eq!(GameConfig::new(0, [4, 4, 4, 4]), Err(ConfigError::ZeroRunLength));
        assert_eq!(GameConfig::new(2, [4, 0, 4, 4]), Err(ConfigError::EmptyDimension));
        assert_eq!(
            GameConfig::new(4, [5, 5, 3, 5]),
            Err(ConfigError::RunLongerThanBoard {
                k_count: 4,
                smallest: 3
            })
        );

        assert!(GameConfig::new(4, [16, 16, 16, 16]).is_ok());
        assert_eq!(
            GameConfig::new(4, [17, 16, 16, 16]),
            Err(ConfigError::BoardTooLarge {
                board_shape: [17, 16, 16, 16],
                max: MAX_BOARD_CELLS
            })
        );
        // The cell count overflows usize
        assert_eq!(
            GameConfig::new(4, [65536; 4]),
            Err(ConfigError::BoardTooLarge {
                board_shape: [65536; 4],
                max: MAX_BOARD_CELLS
            })
        );
    }

    #[test]
    fn test_config_from_json() {
        let config =
            GameConfig::from_json(r#"{"k_count": 3, "board_shape": [3, 4, 5, 6]}"#).unwrap();
        assert_eq!(config, GameConfig::new(3, [3, 4, 5, 6]).unwrap());

        assert!(matches!(
            GameConfig::from_json(r#"{"k_count": 3}"#),
            Err(ConfigError::Parse(_))
        ));
        assert_eq!(
            GameConfig::from_json(r#"{"k_count": 9, "board_shape": [3, 4, 5, 6]}"#),
            Err(ConfigError::RunLongerThanBoard {
                k_count: 9,
                smallest: 3
            })
        );
    }

    #[test]
    fn test_game_new() {
        let game = Game::default();
        assert_eq!(game.current_player().index, 0);
        assert_eq!(game.result(), &GameResult::in_progress());
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.board().empty_count(), 256);
        assert_eq!(game.turns, 0);
        assert!(game.ended_at.is_none());
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut game = Game::default();
        let outside = [
            pos(4, 0, 0, 0),
            pos(0, 4, 0, 0),
            pos(0, 0, 4, 0),
            pos(0, 0, 0, 4),
            pos(9, 9, 9, 9),
        ];
        for p in outside {
            assert_eq!(game.play_turn(p), Err(GameError::BoardRange));
        }
        assert!(game.board().has_no_stones());
        assert_eq!(game.current_player().index, 0);
        assert_eq!(game.turns, 0);
    }

    #[test]
    fn test_overlap_rejected() {
        let mut game = Game::default();
        game.play_turn(pos(1, 1, 1, 1)).unwrap();

        assert_eq!(game.play_turn(pos(1, 1, 1, 1)), Err(GameError::PositionOverlap));
        // Rejection does not consume the turn
        assert_eq!(game.current_player().index, 1);
        assert_eq!(
            game.board().get(&pos(1, 1, 1, 1)).map(|s| s.player.index),
            Some(0)
        );
    }

    #[test]
    fn test_turns_alternate() {
        let mut game = Game::default();
        let moves = [
            pos(0, 0, 0, 0),
            pos(3, 3, 3, 3),
            pos(0, 1, 2, 3),
            pos(2, 0, 1, 3),
            pos(1, 3, 0, 2),
        ];
        for (i, m) in moves.iter().enumerate() {
            assert_eq!(game.current_player().index as usize, i % 2);
            game.play_turn(*m).unwrap();
        }
        assert_eq!(game.current_player().index, 1);
        assert_eq!(game.turns, 5);
    }

    #[test]
    fn test_straight_line_wins() {
        let mut game = Game::default();
        play_all(
            &mut game,
            &[
                pos(0, 0, 0, 0),
                pos(0, 3, 3, 3),
                pos(1, 0, 0, 0),
                pos(0, 3, 3, 2),
                pos(2, 0, 0, 0),
                pos(1, 3, 1, 3),
            ],
        );

        let result = game.play_turn(pos(3, 0, 0, 0)).unwrap();

        assert!(result.finished);
        assert_eq!(result.winner, Some(Player::new(0, "Player 1")));
        assert_eq!(
            result.winning_positions(),
            vec![pos(3, 0, 0, 0), pos(2, 0, 0, 0), pos(1, 0, 0, 0), pos(0, 0, 0, 0)]
        );
        assert_eq!(game.status(), GameStatus::Won);
        // Winner keeps the move
        assert_eq!(game.current_player().index, 0);
        assert!(game.ended_at.is_some());
    }

    #[test]
    fn test_hyperdiagonal_wins() {
        let mut game = Game::default();
        play_all(
            &mut game,
            &[
                pos(0, 3, 0, 0),
                pos(0, 0, 0, 0),
                pos(3, 3, 3, 0),
                pos(1, 1, 1, 1),
                pos(3, 0, 3, 0),
                pos(2, 2, 2, 2),
                pos(0, 0, 3, 3),
            ],
        );

        let result = game.play_turn(pos(3, 3, 3, 3)).unwrap();

        assert_eq!(result.winner.as_ref().map(|p| p.index), Some(1));
        assert_eq!(
            result.winning_positions(),
            vec![pos(3, 3, 3, 3), pos(2, 2, 2, 2), pos(1, 1, 1, 1), pos(0, 0, 0, 0)]
        );
    }

    #[test]
    fn test_filling_interior_gap_does_not_win() {
        let mut game = Game::default();
        play_all(
            &mut game,
            &[
                pos(0, 0, 0, 0),
                pos(3, 3, 3, 3),
                pos(1, 0, 0, 0),
                pos(3, 3, 3, 1),
                pos(3, 0, 0, 0),
                pos(3, 3, 1, 3),
            ],
        );

        // Completes 0..=3 along x, but only two stones sit on the left side
        let result = game.play_turn(pos(2, 0, 0, 0)).unwrap();

        assert!(!result.finished);
        assert_eq!(result, GameResult::in_progress());
        assert_eq!(game.current_player().index, 1);
    }

    #[test]
    fn test_interior_stone_wins_when_one_side_is_long_enough() {
        let config = GameConfig::new(3, [5, 5, 5, 5]).unwrap();
        let mut game = Game::new(config);
        play_all(
            &mut game,
            &[
                pos(0, 0, 0, 0),
                pos(4, 4, 4, 4),
                pos(2, 0, 0, 0),
                pos(4, 4, 4, 2),
                pos(3, 0, 0, 0),
                pos(4, 2, 4, 4),
            ],
        );

        let result = game.play_turn(pos(1, 0, 0, 0)).unwrap();

        assert_eq!(result.winner.as_ref().map(|p| p.index), Some(0));
        assert_eq!(
            result.winning_positions(),
            vec![pos(1, 0, 0, 0), pos(2, 0, 0, 0), pos(3, 0, 0, 0)]
        );
    }

    #[test]
    fn test_first_direction_wins_tie() {
        let config = GameConfig::new(2, [3, 3, 3, 3]).unwrap();
        let mut game = Game::new(config);
        let p1 = game.players()[0].clone();

        // Both an x-run and a w-run end at the origin; w is walked first
        game.place_stone(&p1, pos(1, 0, 0, 0)).unwrap();
        game.place_stone(&p1, pos(0, 0, 0, 1)).unwrap();

        let result = game.play_turn(pos(0, 0, 0, 0)).unwrap();

        assert_eq!(
            result.winning_positions(),
            vec![pos(0, 0, 0, 0), pos(0, 0, 0, 1)]
        );
    }

    #[test]
    fn test_finished_game_rejects_everything() {
        let config = GameConfig::new(1, [2, 2, 2, 2]).unwrap();
        let mut game = Game::new(config);

        let result = game.play_turn(pos(0, 0, 0, 0)).unwrap();
        assert!(result.finished);
        let before = game.board().clone();

        for p in [pos(0, 0, 0, 0), pos(1, 1, 1, 1), pos(5, 0, 0, 0)] {
            assert_eq!(game.play_turn(p), Err(GameError::FinishedGame));
        }
        let p2 = game.players()[1].clone();
        assert_eq!(
            game.place_stone(&p2, pos(1, 0, 0, 0)),
            Err(GameError::FinishedGame)
        );

        assert_eq!(game.board(), &before);
        assert_eq!(game.result(), &result);
        assert_eq!(game.turns, 1);
    }

    #[test]
    fn test_draw_on_last_cell() {
        let config = GameConfig::new(2, [2, 2, 2, 2]).unwrap();
        let mut game = Game::new(config);
        let p2 = game.players()[1].clone();
        let last = pos(1, 1, 1, 1);

        // Every cell but the last goes to Player 2 without judging
        for i in 0..15 {
            let p = pos(i >> 3 & 1, i >> 2 & 1, i >> 1 & 1, i & 1);
            game.place_stone(&p2, p).unwrap();
        }
        assert!(!game.is_finished());
        assert_eq!(game.board().empty_count(), 1);

        // Player 1's only stone has no partner
        let result = game.play_turn(last).unwrap();

        assert_eq!(result, GameResult::draw());
        assert_eq!(game.status(), GameStatus::Draw);
        assert_eq!(game.current_player().index, 0);
        assert_eq!(game.play_turn(last), Err(GameError::FinishedGame));
    }

    #[test]
    fn test_full_board_draws_exactly_on_last_turn() {
        let config = GameConfig::new(3, [3, 3, 3, 3]).unwrap();
        let mut game = Game::new(config);

        // A run's middle cell has more coordinates equal to 1 than its ends,
        // so filling in that order leaves every stone without two partners
        // beyond it.
        let mut cells: Vec<Position> = (0..81)
            .map(|i| pos(i / 27, i / 9 % 3, i / 3 % 3, i % 3))
            .collect();
        cells.sort_by_key(|p| p.coords().iter().filter(|c| **c == 1).count());

        let (last, rest) = cells.split_last().unwrap();
        for (i, p) in rest.iter().enumerate() {
            assert_eq!(game.current_player().index as usize, i % 2);
            let result = game.play_turn(*p).unwrap();
            assert_eq!(result, GameResult::in_progress(), "game ended early at {}", p);
        }
        assert_eq!(game.board().empty_count(), 1);
        assert_eq!(game.current_player().index, 0);

        assert_eq!(game.play_turn(*last), Ok(GameResult::draw()));
        assert_eq!(game.status(), GameStatus::Draw);
        assert_eq!(game.current_player().index, 0);
        assert_eq!(game.turns, 81);
        assert!(game.ended_at.is_some());
    }

    #[test]
    fn test_turns_alternate_until_win() {
        let mut game = Game::default();
        // Player 1 fills x = 0 row by row, Player 2 fills x = 2
        let moves: Vec<Position> = (0..16)
            .flat_map(|i| [pos(0, i / 4, i % 4, 0), pos(2, i / 4, i % 4, 0)])
            .collect();

        let mut played = 0;
        for (i, m) in moves.iter().enumerate() {
            let mover = game.current_player().index;
            assert_eq!(mover as usize, i % 2);
            let result = game.play_turn(*m).unwrap();
            played += 1;
            if result.finished {
                assert_eq!(result.winner.map(|p| p.index), Some(mover));
                assert_eq!(game.current_player().index, mover);
                break;
            }
            assert_eq!(game.current_player().index, 1 - mover);
        }
        assert!(game.is_finished());
        assert_eq!(game.turns, played);
        assert_eq!(game.play_turn(pos(3, 3, 3, 3)), Err(GameError::FinishedGame));
    }

    #[test]
    fn test_game_error_kinds() {
        assert_eq!(GameError::BoardRange.kind(), "BoardRangeError");
        assert_eq!(GameError::PositionOverlap.kind(), "PositionOverlapError");
        assert_eq!(GameError::FinishedGame.kind(), "FinishedGameError");
    }

    #[test]
    fn test_snapshot_json() {
        let mut game = Game::default();
        game.play_turn(pos(0, 0, 0, 0)).unwrap();

        let json = serde_json::to_value(game.snapshot()).unwrap();
        assert_eq!(
            json["result"],
            serde_json::json!({"finished": false, "winner": null, "stones": null})
        );
        assert_eq!(
            json["config"],
            serde_json::json!({"k_count": 4, "board_shape": [4, 4, 4, 4]})
        );
        assert_eq!(json["current_player"]["name"], "Player 2");
        assert_eq!(json["board"][0][0][0][0]["player"]["index"], 0);
        assert_eq!(json["board"][0][0][0][1], serde_json::Value::Null);

        let full = game.to_json();
        assert_eq!(full["status"], "in_progress");
        assert_eq!(full["turns"], 1);
    }
}
