use crate::bot::Bot;
use crate::game::{GameSession, Outcome, Side};

pub struct MatchConfig {
    pub max_moves: usize,
    pub verbose: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            max_moves: 200,
            verbose: false,
        }
    }
}

pub enum MatchResult {
    WhiteWins { winner_name: String, moves: usize },
    BlackWins { winner_name: String, moves: usize },
    Draw { moves: usize },
    IllegalMove { violator: String, winner: String },
    NoMove { stalled: String, moves: usize },
}

impl MatchResult {
    pub fn winner(&self) -> Option<&str> {
        match self {
            MatchResult::WhiteWins { winner_name, .. } => Some(winner_name),
            MatchResult::BlackWins { winner_name, .. } => Some(winner_name),
            MatchResult::IllegalMove { winner, .. } => Some(winner),
            MatchResult::Draw { .. } | MatchResult::NoMove { .. } => None,
        }
    }
}

pub struct Match {
    config: MatchConfig,
    session: GameSession,
    white_bot: Box<dyn Bot>,
    black_bot: Box<dyn Bot>,
}

impl Match {
    pub fn new(white_bot: Box<dyn Bot>, black_bot: Box<dyn Bot>, config: MatchConfig) -> Self {
        Match {
            config,
            session: GameSession::new(),
            white_bot,
            black_bot,
        }
    }

    pub fn play(&mut self) -> MatchResult {
        // Notify bots that the game is starting
        self.white_bot.game_start(Side::White);
        self.black_bot.game_start(Side::Black);

        if self.config.verbose {
            println!("Match starting:");
            println!("  White: {}", self.white_bot.name());
            println!("  Black: {}", self.black_bot.name());
            println!("\nInitial board:");
            println!("{}", self.session.render());
        }

        while !self.session.is_game_over() && self.session.move_count() < self.config.max_moves {
            if let Some(result) = self.play_one_move() {
                return result;
            }
        }

        // Game ended normally (or hit the move cap)
        self.white_bot.game_end();
        self.black_bot.game_end();

        let moves = self.session.move_count();

        match self.session.outcome() {
            Outcome::WhiteWins => {
                if self.config.verbose {
                    println!("\n{} wins as White!", self.white_bot.name());
                }
                MatchResult::WhiteWins {
                    winner_name: self.white_bot.name().to_string(),
                    moves,
                }
            }
            Outcome::BlackWins => {
                if self.config.verbose {
                    println!("\n{} wins as Black!", self.black_bot.name());
                }
                MatchResult::BlackWins {
                    winner_name: self.black_bot.name().to_string(),
                    moves,
                }
            }
            Outcome::Draw => {
                if self.config.verbose {
                    println!("\nBoth kings reached the finish rank - draw!");
                }
                MatchResult::Draw { moves }
            }
            Outcome::InProgress => {
                // Move cap reached
                if self.config.verbose {
                    println!("\nMax moves ({}) reached - draw!", self.config.max_moves);
                }
                MatchResult::Draw { moves }
            }
        }
    }

    fn play_one_move(&mut self) -> Option<MatchResult> {
        let side = self.session.current_side();
        let bot = match side {
            Side::White => &mut self.white_bot,
            Side::Black => &mut self.black_bot,
        };

        if self.config.verbose {
            println!(
                "\nMove {}: {} ({}) to play",
                self.session.move_count() + 1,
                bot.name(),
                side
            );
        }

        let bot_name = bot.name().to_string();
        let mv = match bot.choose_move(&self.session) {
            Some(mv) => mv,
            None => {
                // No legal moves or the bot gave up
                if self.config.verbose {
                    println!("{} returned no move", bot_name);
                }
                return Some(MatchResult::NoMove {
                    stalled: bot_name,
                    moves: self.session.move_count(),
                });
            }
        };

        if self.config.verbose {
            println!("{} plays: {}", bot_name, mv);
        }

        if let Err(e) = self.session.attempt_move(mv.from, mv.to) {
            let winner = match side {
                Side::White => self.black_bot.name().to_string(),
                Side::Black => self.white_bot.name().to_string(),
            };

            if self.config.verbose {
                println!("ILLEGAL MOVE: {} - {}", bot_name, e);
            }

            return Some(MatchResult::IllegalMove {
                violator: bot_name,
                winner,
            });
        }

        // Notify both bots of the committed move
        self.white_bot.notify_move(mv);
        self.black_bot.notify_move(mv);

        if self.config.verbose {
            println!("{}", self.session.render());
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::{GreedyBot, RandomBot};

    #[test]
    fn move_cap_produces_a_draw() {
        // Random kings cannot cross the board in five plies
        let config = MatchConfig {
            max_moves: 5,
            verbose: false,
        };
        let white = Box::new(RandomBot::with_seed("white".to_string(), 1));
        let black = Box::new(RandomBot::with_seed("black".to_string(), 2));

        let mut game = Match::new(white, black, config);
        match game.play() {
            MatchResult::Draw { moves } => assert_eq!(moves, 5),
            _ => panic!("expected a draw at the move cap"),
        }
    }

    #[test]
    fn bots_never_forfeit_by_illegal_move() {
        let config = MatchConfig {
            max_moves: 60,
            verbose: false,
        };
        let white = Box::new(RandomBot::with_seed("white".to_string(), 3));
        let black = Box::new(GreedyBot::new("black".to_string()));

        let mut game = Match::new(white, black, config);
        let result = game.play();
        assert!(!matches!(result, MatchResult::IllegalMove { .. }));
    }

    #[test]
    fn winner_accessor() {
        let result = MatchResult::BlackWins {
            winner_name: "gb".to_string(),
            moves: 40,
        };
        assert_eq!(result.winner(), Some("gb"));
        assert_eq!(MatchResult::Draw { moves: 10 }.winner(), None);
    }
}
