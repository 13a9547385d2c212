use log::{debug, info};

use super::board::{Board, Cell, Line, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use super::{Player, PlayerProfile};
use crate::config::GameConfig;
use crate::error::{BoardError, ConfigError, MoveError};

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

/// Result of a drop request that was not rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The column has no empty cell. Nothing changed.
    Full,
    /// The piece landed and it is now this player's turn.
    Continue(Player),
    /// The piece completed a line for this player.
    Win(Player),
    /// The piece filled the last empty cell without completing a line.
    Draw,
}

/// A single game of Connect Four.
///
/// Owns the board, the two players, whose turn it is and whether the game is
/// over. Every mutation goes through [`GameEngine::attempt_drop`]; a game that
/// has reached a [`GameOutcome`] rejects further moves until
/// [`GameEngine::restart`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEngine {
    board: Board,
    players: [PlayerProfile; 2],
    current_player: Player,
    outcome: Option<GameOutcome>,
    last_move: Option<(usize, usize)>,
}

impl GameEngine {
    /// Start a game on the default 7x6 board. Player one moves first.
    pub fn new(first: PlayerProfile, second: PlayerProfile) -> Result<Self, BoardError> {
        Self::with_size(first, second, DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }

    /// Start a game on a `width` x `height` board. The two profiles must
    /// differ.
    pub fn with_size(
        first: PlayerProfile,
        second: PlayerProfile,
        width: usize,
        height: usize,
    ) -> Result<Self, BoardError> {
        if first == second {
            return Err(BoardError::DuplicatePlayers(first.color));
        }
        Ok(Self::from_board(first, second, Board::new(width, height)?))
    }

    /// Start a game described by a validated configuration section.
    pub fn from_config(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let engine = Self::with_size(
            PlayerProfile::new(config.first_player.as_str()),
            PlayerProfile::new(config.second_player.as_str()),
            config.width,
            config.height,
        )?;
        Ok(engine)
    }

    fn from_board(first: PlayerProfile, second: PlayerProfile, board: Board) -> Self {
        debug!(
            "new {}x{} game: {} vs {}",
            board.width(),
            board.height(),
            first,
            second
        );
        GameEngine {
            board,
            players: [first, second],
            current_player: Player::One,
            outcome: None,
            last_move: None,
        }
    }

    /// Throw away the current game and start a fresh one with the same
    /// players and board size.
    pub fn restart(&mut self) {
        let [first, second] = self.players.clone();
        let board = self.board.cleared();
        *self = Self::from_board(first, second, board);
    }

    /// Drop the current player's piece into `column`.
    ///
    /// Rejected requests (bad column, finished game) and [`DropOutcome::Full`]
    /// leave the game untouched.
    pub fn attempt_drop(&mut self, column: usize) -> Result<DropOutcome, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        let width = self.board.width();
        if column >= width {
            return Err(MoveError::InvalidColumn { column, width });
        }

        let player = self.current_player;
        let Some(row) = self.board.drop_piece(column, player) else {
            debug!("column {column} is full");
            return Ok(DropOutcome::Full);
        };
        self.last_move = Some((row, column));
        debug!(
            "{} ({}) dropped into column {column}, landed on row {row}",
            player.name(),
            self.profile(player)
        );

        if self.board.has_win(player) {
            self.outcome = Some(GameOutcome::Winner(player));
            info!("{} ({}) won", player.name(), self.profile(player));
            return Ok(DropOutcome::Win(player));
        }

        if self.board.is_full() {
            self.outcome = Some(GameOutcome::Draw);
            info!("game ended in a draw");
            return Ok(DropOutcome::Draw);
        }

        self.current_player = player.other();
        Ok(DropOutcome::Continue(self.current_player))
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn width(&self) -> usize {
        self.board.width()
    }

    pub fn height(&self) -> usize {
        self.board.height()
    }

    /// Contents of `(row, col)`, `None` if out of bounds. Row 0 is the top.
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.board.get(row, col)
    }

    /// Player whose turn it is. After a win this is the winner.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn profile(&self, player: Player) -> &PlayerProfile {
        &self.players[player.index()]
    }

    pub fn players(&self) -> &[PlayerProfile; 2] {
        &self.players
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Where the most recent piece landed, as `(row, col)`
    pub fn last_move(&self) -> Option<(usize, usize)> {
        self.last_move
    }

    /// The winner's line of four, once the game has been won
    pub fn winning_line(&self) -> Option<Line> {
        match self.outcome {
            Some(GameOutcome::Winner(player)) => self.board.winning_line(player),
            _ => None,
        }
    }

    /// Columns that still accept a piece. Empty once the game is over.
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.is_over() {
            return Vec::new();
        }
        (0..self.board.width())
            .filter(|&col| !self.board.is_column_full(col))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Full 7x6 game with alternating turns and no four-in-a-row.
    const DRAW_SEQUENCE: [usize; 42] = [
        4, 3, 6, 0, 1, 4, 5, 5, 1, 1, 5, 0, 1, 6, 0, 1, 5, 5, 1, 0, 4, 6, 3, 2, 6, 6, 0, 4, 6,
        5, 2, 0, 4, 2, 4, 2, 2, 2, 3, 3, 3, 3,
    ];

    fn new_game() -> GameEngine {
        GameEngine::new(PlayerProfile::new("red"), PlayerProfile::new("blue")).unwrap()
    }

    /// Place a piece for `player` regardless of whose turn it is.
    fn force_drop(engine: &mut GameEngine, column: usize, player: Player) -> DropOutcome {
        engine.current_player = player;
        engine.attempt_drop(column).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let engine = new_game();
        assert_eq!(engine.current_player(), Player::One);
        assert!(!engine.is_over());
        assert_eq!(engine.outcome(), None);
        assert_eq!(engine.last_move(), None);
        assert_eq!(engine.width(), 7);
        assert_eq!(engine.height(), 6);
        assert_eq!(engine.legal_columns(), vec![0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(engine.profile(Player::One).color, "red");
        assert_eq!(engine.profile(Player::Two).color, "blue");
    }

    #[test]
    fn test_apply_move() {
        let mut engine = new_game();
        let outcome = engine.attempt_drop(3).unwrap();

        assert_eq!(outcome, DropOutcome::Continue(Player::Two));
        assert_eq!(engine.current_player(), Player::Two);
        assert_eq!(engine.cell(5, 3), Some(Cell::Occupied(Player::One)));
        assert_eq!(engine.last_move(), Some((5, 3)));
    }

    #[test]
    fn test_continue_alternates_players() {
        let mut engine = new_game();
        let mut expected = Player::One;
        for &col in &DRAW_SEQUENCE[..41] {
            assert_eq!(engine.current_player(), expected);
            let outcome = engine.attempt_drop(col).unwrap();
            expected = expected.other();
            assert_eq!(outcome, DropOutcome::Continue(expected));
        }
        assert!(!engine.is_over());
    }

    #[test]
    fn test_full_column_is_noop() {
        let mut engine = new_game();
        for _ in 0..6 {
            engine.attempt_drop(0).unwrap();
        }
        let before = engine.clone();

        assert_eq!(engine.attempt_drop(0), Ok(DropOutcome::Full));
        assert_eq!(engine, before);
        assert!(!engine.legal_columns().contains(&0));
    }

    #[test]
    fn test_invalid_column_is_rejected() {
        let mut engine = new_game();
        let before = engine.clone();
        assert_eq!(
            engine.attempt_drop(7),
            Err(MoveError::InvalidColumn { column: 7, width: 7 })
        );
        assert_eq!(engine, before);
    }

    #[test]
    fn test_vertical_win() {
        let mut engine = new_game();
        for _ in 0..3 {
            assert!(matches!(
                force_drop(&mut engine, 3, Player::One),
                DropOutcome::Continue(_)
            ));
        }
        assert_eq!(
            force_drop(&mut engine, 3, Player::One),
            DropOutcome::Win(Player::One)
        );
        assert!(engine.is_over());
        assert_eq!(engine.outcome(), Some(GameOutcome::Winner(Player::One)));
        // Winner stays the current player
        assert_eq!(engine.current_player(), Player::One);
        assert_eq!(
            engine.winning_line(),
            Some([(2, 3), (3, 3), (4, 3), (5, 3)])
        );
    }

    #[test]
    fn test_horizontal_win() {
        let mut engine = new_game();

        // Red wins along the bottom row, Blue stacks on top
        for col in 0..4 {
            let outcome = engine.attempt_drop(col).unwrap(); // Red
            if col < 3 {
                assert_eq!(outcome, DropOutcome::Continue(Player::Two));
                engine.attempt_drop(col).unwrap(); // Blue (different row)
            } else {
                assert_eq!(outcome, DropOutcome::Win(Player::One));
            }
        }

        assert_eq!(engine.outcome(), Some(GameOutcome::Winner(Player::One)));
        assert_eq!(
            engine.winning_line(),
            Some([(5, 0), (5, 1), (5, 2), (5, 3)])
        );
    }

    #[test]
    fn test_horizontal_win_out_of_order() {
        let mut engine = new_game();
        for col in [2, 0, 1] {
            force_drop(&mut engine, col, Player::One);
        }
        assert_eq!(
            force_drop(&mut engine, 3, Player::One),
            DropOutcome::Win(Player::One)
        );
    }

    #[test]
    fn test_diagonal_down_right_win() {
        let mut engine = new_game();
        // Line (2,0),(3,1),(4,2),(5,3)
        force_drop(&mut engine, 3, Player::One);
        force_drop(&mut engine, 2, Player::Two);
        force_drop(&mut engine, 2, Player::One);
        for _ in 0..2 {
            force_drop(&mut engine, 1, Player::Two);
        }
        force_drop(&mut engine, 1, Player::One);
        for _ in 0..3 {
            force_drop(&mut engine, 0, Player::Two);
        }
        assert_eq!(
            force_drop(&mut engine, 0, Player::One),
            DropOutcome::Win(Player::One)
        );
        assert_eq!(
            engine.winning_line(),
            Some([(2, 0), (3, 1), (4, 2), (5, 3)])
        );
    }

    #[test]
    fn test_diagonal_down_left_win() {
        let mut engine = new_game();
        // Line (2,6),(3,5),(4,4),(5,3), completed at the bottom instead of
        // the top
        for _ in 0..3 {
            force_drop(&mut engine, 6, Player::Two);
        }
        force_drop(&mut engine, 6, Player::One);
        for _ in 0..2 {
            force_drop(&mut engine, 5, Player::Two);
        }
        force_drop(&mut engine, 5, Player::One);
        force_drop(&mut engine, 4, Player::Two);
        force_drop(&mut engine, 4, Player::One);
        assert_eq!(
            force_drop(&mut engine, 3, Player::One),
            DropOutcome::Win(Player::One)
        );
        assert_eq!(
            engine.winning_line(),
            Some([(2, 6), (3, 5), (4, 4), (5, 3)])
        );
    }

    #[test]
    fn test_draw() {
        let mut engine = new_game();
        let (last, rest) = DRAW_SEQUENCE.split_last().unwrap();
        for &col in rest {
            assert!(matches!(
                engine.attempt_drop(col),
                Ok(DropOutcome::Continue(_))
            ));
        }

        assert_eq!(engine.attempt_drop(*last), Ok(DropOutcome::Draw));
        assert!(engine.board().is_full());
        assert_eq!(engine.outcome(), Some(GameOutcome::Draw));
        assert_eq!(engine.winning_line(), None);
        assert!(engine.legal_columns().is_empty());
    }

    #[test]
    fn test_win_on_last_cell_is_not_draw() {
        let mut engine = GameEngine::with_size(
            PlayerProfile::new("red"),
            PlayerProfile::new("blue"),
            4,
            1,
        )
        .unwrap();
        for col in 0..3 {
            force_drop(&mut engine, col, Player::Two);
        }
        assert_eq!(
            force_drop(&mut engine, 3, Player::Two),
            DropOutcome::Win(Player::Two)
        );
        assert!(engine.board().is_full());
    }

    #[test]
    fn test_moves_after_game_over_are_rejected() {
        let mut engine = new_game();
        for _ in 0..4 {
            force_drop(&mut engine, 0, Player::Two);
        }
        assert!(engine.is_over());
        let before = engine.clone();

        assert_eq!(engine.attempt_drop(1), Err(MoveError::GameOver));
        assert_eq!(engine.attempt_drop(99), Err(MoveError::GameOver));
        assert_eq!(engine, before);
    }

    #[test]
    fn test_queries_are_idempotent() {
        let mut engine = new_game();
        engine.attempt_drop(2).unwrap();
        let before = engine.clone();
        for _ in 0..5 {
            assert!(!engine.is_over());
            assert_eq!(engine.current_player(), Player::Two);
        }
        assert_eq!(engine, before);
    }

    #[test]
    fn test_small_board_fills_to_draw() {
        let mut engine = GameEngine::with_size(
            PlayerProfile::new("red"),
            PlayerProfile::new("blue"),
            3,
            3,
        )
        .unwrap();
        let mut outcomes = Vec::new();
        for col in 0..3 {
            for _ in 0..3 {
                outcomes.push(engine.attempt_drop(col).unwrap());
            }
        }
        assert_eq!(outcomes.last(), Some(&DropOutcome::Draw));
        assert!(outcomes[..8]
            .iter()
            .all(|o| matches!(o, DropOutcome::Continue(_))));
    }

    #[test]
    fn test_with_size_rejects_empty_board() {
        let err = GameEngine::with_size(
            PlayerProfile::new("red"),
            PlayerProfile::new("blue"),
            0,
            6,
        )
        .unwrap_err();
        assert_eq!(err, BoardError::InvalidDimensions { width: 0, height: 6 });
    }

    #[test]
    fn test_with_size_rejects_oversized_board() {
        let err = GameEngine::with_size(
            PlayerProfile::new("red"),
            PlayerProfile::new("blue"),
            usize::MAX,
            2,
        )
        .unwrap_err();
        assert_eq!(
            err,
            BoardError::InvalidDimensions {
                width: usize::MAX,
                height: 2
            }
        );
        assert!(GameEngine::with_size(
            PlayerProfile::new("red"),
            PlayerProfile::new("blue"),
            7,
            1_000_000,
        )
        .is_err());
    }

    #[test]
    fn test_rejects_duplicate_players() {
        let err = GameEngine::with_size(
            PlayerProfile::new("red"),
            PlayerProfile::new("red"),
            7,
            6,
        )
        .unwrap_err();
        assert_eq!(err, BoardError::DuplicatePlayers("red".to_string()));
        assert!(GameEngine::new(PlayerProfile::new("blue"), PlayerProfile::new("blue")).is_err());
    }

    #[test]
    fn test_from_config() {
        let config = GameConfig {
            width: 5,
            height: 4,
            first_player: "green".into(),
            second_player: "purple".into(),
        };
        let engine = GameEngine::from_config(&config).unwrap();
        assert_eq!(engine.width(), 5);
        assert_eq!(engine.height(), 4);
        assert_eq!(engine.profile(Player::Two).color, "purple");
    }

    #[test]
    fn test_from_config_rejects_invalid_values() {
        let config = GameConfig {
            width: 100,
            ..GameConfig::default()
        };
        assert!(matches!(
            GameEngine::from_config(&config),
            Err(ConfigError::Validation(_))
        ));

        let config = GameConfig {
            second_player: "red".into(),
            ..GameConfig::default()
        };
        assert!(GameEngine::from_config(&config).is_err());
    }

    #[test]
    fn test_restart() {
        let mut engine = GameEngine::with_size(
            PlayerProfile::new("red"),
            PlayerProfile::new("blue"),
            5,
            5,
        )
        .unwrap();
        for _ in 0..4 {
            force_drop(&mut engine, 1, Player::Two);
        }
        assert!(engine.is_over());

        engine.restart();
        assert!(!engine.is_over());
        assert_eq!(engine.current_player(), Player::One);
        assert_eq!(engine.width(), 5);
        assert_eq!(engine.height(), 5);
        assert_eq!(engine.cell(4, 1), Some(Cell::Empty));
        assert_eq!(engine.board(), &Board::new(5, 5).unwrap());
        assert_eq!(engine.last_move(), None);
        assert_eq!(engine.profile(Player::One).color, "red");
    }

    #[test]
    fn test_independent_games() {
        let mut a = new_game();
        let b = new_game();
        a.attempt_drop(0).unwrap();
        assert_eq!(b.cell(5, 0), Some(Cell::Empty));
        assert_eq!(b.current_player(), Player::One);
    }
}
