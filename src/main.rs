use kingrace_arena::*;
use std::io::{BufRead, Write};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("play") => {
            let human = match args.get(2).map(String::as_str) {
                Some("black") => Side::Black,
                _ => Side::White,
            };
            play_interactive(human);
        }
        _ => run_demo_match(),
    }
}

fn run_demo_match() {
    println!("King Race Arena - Bot Match");
    println!("========================================\n");

    let white = Box::new(RandomBot::new("RandomBot".to_string()));
    let black = Box::new(GreedyBot::new("GreedyBot".to_string()));

    let config = MatchConfig {
        max_moves: 150,
        verbose: true,
    };

    let mut match_game = Match::new(white, black, config);
    let result = match_game.play();

    println!("\n========================================");
    println!("Match Result:");
    match result {
        MatchResult::WhiteWins { winner_name, moves } => {
            println!("  {} wins as White in {} moves!", winner_name, moves);
        }
        MatchResult::BlackWins { winner_name, moves } => {
            println!("  {} wins as Black in {} moves!", winner_name, moves);
        }
        MatchResult::Draw { moves } => {
            println!("  Draw after {} moves", moves);
        }
        MatchResult::IllegalMove { violator, winner } => {
            println!("  {} wins by illegal move (opponent: {})", winner, violator);
        }
        MatchResult::NoMove { stalled, moves } => {
            println!("  {} had no move after {} moves", stalled, moves);
        }
    }
    println!("========================================");
}

fn play_interactive(human: Side) {
    println!("King Race Arena - you play {}", human);
    println!("First king to reach rank 8 wins; enter moves like: c2 c3\n");

    let mut session = GameSession::new();
    let mut bot = GreedyBot::new("GreedyBot".to_string());
    let stdin = std::io::stdin();

    println!("{}", session.render());

    while !session.is_game_over() {
        if session.current_side() == human {
            if session.legal_moves().is_empty() {
                println!("No legal moves available - game drawn");
                return;
            }
            print!("{} to move> ", human);
            let _ = std::io::stdout().flush();

            let mut line = String::new();
            match stdin.lock().read_line(&mut line) {
                Ok(0) | Err(_) => {
                    println!("\nGame abandoned");
                    return;
                }
                Ok(_) => {}
            }

            let Some((from, to)) = parse_move(line.trim()) else {
                println!("Enter two squares, e.g.: c2 c3");
                continue;
            };

            if let Err(e) = session.attempt_move(from, to) {
                println!("Rejected: {}", e);
                continue;
            }
        } else {
            match bot.choose_move(&session) {
                Some(mv) => {
                    // The bot only proposes moves it has already validated
                    if session.attempt_move(mv.from, mv.to).is_err() {
                        println!("{} forfeits on an illegal move", bot.name());
                        return;
                    }
                    println!("{} plays: {}", bot.name(), mv);
                }
                None => {
                    println!("{} has no move - game drawn", bot.name());
                    return;
                }
            }
        }

        println!("{}", session.render());
    }

    match session.outcome() {
        Outcome::WhiteWins => println!("White wins the race!"),
        Outcome::BlackWins => println!("Black wins the race!"),
        Outcome::Draw => println!("Both kings made it - draw!"),
        Outcome::InProgress => {}
    }
}

fn parse_move(line: &str) -> Option<(Square, Square)> {
    let mut parts = line.split_whitespace();
    let from = parts.next()?.parse().ok()?;
    let to = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((from, to))
}
