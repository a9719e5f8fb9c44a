use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::game::{GameSession, Move, Outcome, Side};

/// Trait that all bots must implement
pub trait Bot: Send {
    /// Get the name of the bot
    fn name(&self) -> &str;

    /// Get the next move for the current game state
    fn choose_move(&mut self, session: &GameSession) -> Option<Move>;

    /// Notified when the game starts
    fn game_start(&mut self, _side: Side) {}

    /// Notified when a move is made (by either player)
    fn notify_move(&mut self, _mv: Move) {}

    /// Notified when the game ends
    fn game_end(&mut self) {}
}

/// Plays a uniformly random legal move
pub struct RandomBot {
    name: String,
    rng: StdRng,
}

impl RandomBot {
    pub fn new(name: String) -> Self {
        RandomBot {
            name,
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded constructor for reproducible games
    pub fn with_seed(name: String, seed: u64) -> Self {
        RandomBot {
            name,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Bot for RandomBot {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&mut self, session: &GameSession) -> Option<Move> {
        session.legal_moves().choose(&mut self.rng).copied()
    }
}

/// One-ply greedy bot that races its king toward the finish rank
pub struct GreedyBot {
    name: String,
}

impl GreedyBot {
    pub fn new(name: String) -> Self {
        GreedyBot { name }
    }

    fn evaluate_move(&self, session: &GameSession, mv: Move) -> i32 {
        let side = session.current_side();
        let mut scratch = session.clone();
        if scratch.attempt_move(mv.from, mv.to).is_err() {
            return i32::MIN;
        }

        match scratch.outcome() {
            Outcome::WhiteWins => {
                return if side == Side::White { 1000 } else { -1000 };
            }
            Outcome::BlackWins => {
                return if side == Side::Black { 1000 } else { -1000 };
            }
            Outcome::Draw => return 0,
            Outcome::InProgress => {}
        }

        // Race progress: how far along is our king compared to theirs
        let own_rank = scratch.king_square(side).rank as i32;
        let their_rank = scratch.king_square(side.opponent()).rank as i32;
        own_rank * 2 - their_rank
    }
}

impl Bot for GreedyBot {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&mut self, session: &GameSession) -> Option<Move> {
        let moves = session.legal_moves();
        if moves.is_empty() {
            return None;
        }

        moves
            .into_iter()
            .max_by_key(|&mv| self.evaluate_move(session, mv))
    }
}
