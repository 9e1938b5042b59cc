use engine::{Game, GameError};

/// Two players pull a shared counter toward their own goal: player 1 wins
/// when it reaches 100, player 2 when it reaches 0. Exists to exercise the
/// search engine with a game whose value gradient is obvious.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CountingGame {
    pub count: usize,
    pub p1_turn: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CountingAction {
    Increment,
    Decrement,
    Stay,
}

impl CountingGame {
    pub fn new() -> Self {
        Self::from_count(50, true)
    }

    pub fn from_count(count: usize, p1_turn: bool) -> Self {
        CountingGame { count, p1_turn }
    }
}

impl Game for CountingGame {
    type Action = CountingAction;

    fn valid_actions(&self) -> Vec<CountingAction> {
        if self.is_game_over() {
            return Vec::new();
        }

        vec![
            CountingAction::Increment,
            CountingAction::Decrement,
            CountingAction::Stay,
        ]
    }

    fn play_action(&mut self, action: &CountingAction, _auto_play: bool) -> Result<(), GameError> {
        if self.is_game_over() {
            return Err(GameError::InvalidAction(format!("{:?}", action)));
        }

        match action {
            CountingAction::Increment => self.count += 1,
            CountingAction::Decrement => self.count -= 1,
            CountingAction::Stay => {}
        }
        self.p1_turn = !self.p1_turn;

        Ok(())
    }

    fn is_game_over(&self) -> bool {
        self.count == 0 || self.count == 100
    }

    fn winner(&self) -> Option<usize> {
        match self.count {
            100 => Some(1),
            0 => Some(2),
            _ => None,
        }
    }

    fn current_player(&self) -> usize {
        if self.p1_turn {
            1
        } else {
            2
        }
    }
}
