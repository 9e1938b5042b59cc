use engine::{Game, GameError};

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// 3x3 Tic-Tac-Toe, the canonical fixture for scenario tests. Cells are
/// indexed 0..9 row-major; player 1 is X and moves first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TicTacToe {
    cells: [Option<usize>; 9],
    player_to_move: usize,
}

impl TicTacToe {
    pub fn new() -> Self {
        TicTacToe {
            cells: [None; 9],
            player_to_move: 1,
        }
    }

    /// Builds a midgame position by replaying `moves` from an empty board.
    pub fn from_moves(moves: &[usize]) -> Self {
        let mut game = Self::new();
        for &cell in moves {
            game.play_action(&cell, false)
                .expect("fixture moves are legal");
        }

        game
    }

    fn line_winner(&self) -> Option<usize> {
        LINES.iter().find_map(|line| {
            let first = self.cells[line[0]]?;
            line.iter()
                .all(|&cell| self.cells[cell] == Some(first))
                .then_some(first)
        })
    }

    fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }
}

impl Game for TicTacToe {
    type Action = usize;

    fn valid_actions(&self) -> Vec<usize> {
        if self.is_game_over() {
            return Vec::new();
        }

        (0..9).filter(|&cell| self.cells[cell].is_none()).collect()
    }

    fn play_action(&mut self, action: &usize, _auto_play: bool) -> Result<(), GameError> {
        let cell = *action;
        if cell >= 9 || self.cells[cell].is_some() || self.is_game_over() {
            return Err(GameError::InvalidAction(format!("cell {}", cell)));
        }

        self.cells[cell] = Some(self.player_to_move);
        self.player_to_move = 3 - self.player_to_move;

        Ok(())
    }

    fn is_game_over(&self) -> bool {
        self.line_winner().is_some() || self.is_full()
    }

    fn winner(&self) -> Option<usize> {
        self.line_winner()
    }

    fn current_player(&self) -> usize {
        self.player_to_move
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_board_has_nine_actions() {
        let game = TicTacToe::new();

        assert_eq!(game.valid_actions(), (0..9).collect::<Vec<_>>());
        assert_eq!(game.current_player(), 1);
        assert!(!game.is_game_over());
    }

    #[test]
    fn test_row_win_is_detected() {
        let game = TicTacToe::from_moves(&[0, 3, 1, 4, 2]);

        assert!(game.is_game_over());
        assert_eq!(game.winner(), Some(1));
        assert!(game.valid_actions().is_empty());
    }

    #[test]
    fn test_full_board_without_line_is_a_draw() {
        // X O X / X O O / O X X
        let game = TicTacToe::from_moves(&[0, 1, 2, 4, 3, 5, 7, 6, 8]);

        assert!(game.is_game_over());
        assert_eq!(game.winner(), None);
    }

    #[test]
    fn test_occupied_cell_is_rejected() {
        let mut game = TicTacToe::from_moves(&[4]);

        assert!(matches!(
            game.play_action(&4, false),
            Err(GameError::InvalidAction(_))
        ));
    }

    #[test]
    fn test_clone_is_independent() {
        let game = TicTacToe::new();
        let mut clone = game.clone();

        clone.play_action(&4, false).unwrap();

        assert_eq!(game, TicTacToe::new());
        assert_ne!(clone, game);
    }
}
