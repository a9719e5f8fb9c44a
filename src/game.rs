use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::piece::{Piece, PieceKind};

/// Board size constant
pub const BOARD_SIZE: usize = 8;
/// Rank a king must reach to finish the race
pub const FINISH_RANK: usize = BOARD_SIZE - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn opponent(&self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}

/// Zero-based (file, rank) coordinates; "a1" is (0, 0), "h8" is (7, 7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Square {
    pub file: usize,
    pub rank: usize,
}

impl Square {
    pub fn new(file: usize, rank: usize) -> Self {
        Square { file, rank }
    }

    pub fn in_bounds(&self) -> bool {
        self.file < BOARD_SIZE && self.rank < BOARD_SIZE
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.in_bounds() {
            write!(f, "{}{}", (b'a' + self.file as u8) as char, self.rank + 1)
        } else {
            write!(f, "({}, {})", self.file, self.rank)
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("not a board square: {0:?}")]
pub struct ParseSquareError(String);

impl FromStr for Square {
    type Err = ParseSquareError;

    /// Parses the two-character human form, a file letter 'a'-'h' followed
    /// by a rank digit '1'-'8'.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(ParseSquareError(s.to_string()));
        }
        let square = Square::new(
            (bytes[0].wrapping_sub(b'a')) as usize,
            (bytes[1].wrapping_sub(b'1')) as usize,
        );
        if square.in_bounds() {
            Ok(square)
        } else {
            Err(ParseSquareError(s.to_string()))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid position: {0}")]
pub struct PositionError(String);

#[derive(Debug, Error)]
pub enum MoveError {
    #[error("invalid move: {0}")]
    InvalidMove(String),
    #[error("game already over")]
    GameOver,
    #[error("not your turn")]
    NotYourTurn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    WhiteWins,
    BlackWins,
    Draw,
}

/// 8x8 grid of optional occupants. The grid is a plain value, so a
/// snapshot is a full deep copy with no state shared with the live board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn empty() -> Self {
        Board {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    pub fn get(&self, square: Square) -> Option<Piece> {
        if square.in_bounds() {
            self.cells[square.rank][square.file]
        } else {
            None
        }
    }

    pub fn place(&mut self, square: Square, piece: Piece) {
        self.cells[square.rank][square.file] = Some(piece);
    }

    pub fn clear(&mut self, square: Square) {
        self.cells[square.rank][square.file] = None;
    }

    pub fn snapshot(&self) -> Board {
        *self
    }

    pub fn restore(&mut self, snapshot: Board) {
        *self = snapshot;
    }
}

/// A single game of the race variant: both kings start on rank 0 and the
/// first to reach rank 7 wins, with check rules still enforced along the way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    board: Board,
    turn: Side,
    white_king: Square,
    black_king: Square,
    move_count: usize,
}

impl GameSession {
    /// Create a session with the fixed starting layout. White occupies the
    /// a-c files of ranks 1-2, Black mirrors it on the f-h files.
    pub fn new() -> Self {
        let mut board = Board::empty();

        let layout = [
            (PieceKind::King, Side::White, (0, 0)),
            (PieceKind::Rook, Side::White, (0, 1)),
            (PieceKind::Bishop, Side::White, (1, 0)),
            (PieceKind::Bishop, Side::White, (1, 1)),
            (PieceKind::Knight, Side::White, (2, 0)),
            (PieceKind::Knight, Side::White, (2, 1)),
            (PieceKind::King, Side::Black, (7, 0)),
            (PieceKind::Rook, Side::Black, (7, 1)),
            (PieceKind::Bishop, Side::Black, (6, 0)),
            (PieceKind::Bishop, Side::Black, (6, 1)),
            (PieceKind::Knight, Side::Black, (5, 0)),
            (PieceKind::Knight, Side::Black, (5, 1)),
        ];

        for &(kind, side, (file, rank)) in &layout {
            board.place(Square::new(file, rank), Piece::new(kind, side));
        }

        GameSession {
            board,
            turn: Side::White,
            white_king: Square::new(0, 0),
            black_king: Square::new(7, 0),
            move_count: 0,
        }
    }

    /// Build a session from an arbitrary position, locating the kings on
    /// the way. Each side must have exactly one king on the board.
    pub fn from_board(board: Board, turn: Side) -> Result<Self, PositionError> {
        let mut white_king = None;
        let mut black_king = None;

        for rank in 0..BOARD_SIZE {
            for file in 0..BOARD_SIZE {
                let square = Square::new(file, rank);
                let Some(piece) = board.get(square) else {
                    continue;
                };
                if piece.kind != PieceKind::King {
                    continue;
                }
                let slot = match piece.side {
                    Side::White => &mut white_king,
                    Side::Black => &mut black_king,
                };
                if slot.replace(square).is_some() {
                    return Err(PositionError(format!(
                        "{} has more than one king",
                        piece.side
                    )));
                }
            }
        }

        let (Some(white_king), Some(black_king)) = (white_king, black_king) else {
            return Err(PositionError("each side needs a king".to_string()));
        };

        Ok(GameSession {
            board,
            turn,
            white_king,
            black_king,
            move_count: 0,
        })
    }

    /// Read-only view of the board for rendering.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_side(&self) -> Side {
        self.turn
    }

    pub fn move_count(&self) -> usize {
        self.move_count
    }

    pub fn king_square(&self, side: Side) -> Square {
        match side {
            Side::White => self.white_king,
            Side::Black => self.black_king,
        }
    }

    fn set_king_square(&mut self, side: Side, square: Square) {
        match side {
            Side::White => self.white_king = square,
            Side::Black => self.black_king = square,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome() != Outcome::InProgress
    }

    /// Race outcome, derived from the kings' squares and the side to move.
    ///
    /// White moves first, so a White arrival leaves Black one reply to force
    /// the tie; the win only stands once the turn has come back to White.
    /// A Black arrival needs no waiting ply, White already had its chance.
    pub fn outcome(&self) -> Outcome {
        let white_finished = self.white_king.rank == FINISH_RANK;
        let black_finished = self.black_king.rank == FINISH_RANK;

        match (white_finished, black_finished) {
            (true, true) => Outcome::Draw,
            (false, true) => Outcome::BlackWins,
            (true, false) => {
                if self.turn == Side::Black {
                    Outcome::InProgress
                } else {
                    Outcome::WhiteWins
                }
            }
            (false, false) => Outcome::InProgress,
        }
    }

    /// Validate and execute a move. Either the move fully commits and the
    /// turn advances, or the session is left exactly as it was.
    pub fn attempt_move(&mut self, from: Square, to: Square) -> Result<(), MoveError> {
        if self.is_game_over() {
            return Err(MoveError::GameOver);
        }
        if !from.in_bounds() || !to.in_bounds() {
            return Err(MoveError::InvalidMove(format!(
                "square off the board: {} -> {}",
                from, to
            )));
        }
        if from == to {
            return Err(MoveError::InvalidMove(format!(
                "{} is both origin and destination",
                from
            )));
        }

        let piece = match self.board.get(from) {
            Some(piece) => piece,
            None => return Err(MoveError::InvalidMove(format!("no piece on {}", from))),
        };
        if piece.side != self.turn {
            return Err(MoveError::NotYourTurn);
        }
        if let Some(target) = self.board.get(to) {
            if target.side == piece.side {
                return Err(MoveError::InvalidMove(format!("own piece on {}", to)));
            }
        }
        if !piece.is_move_eligible(from, to, &self.board) {
            return Err(MoveError::InvalidMove(format!(
                "{} cannot move {} -> {}",
                piece, from, to
            )));
        }

        // Provisional apply; the snapshot is reinstated if the move turns
        // out to leave a king attacked
        let snapshot = self.board.snapshot();
        let prior_king = self.king_square(piece.side);

        self.board.clear(from);
        self.board.place(to, piece);
        if piece.kind == PieceKind::King {
            self.set_king_square(piece.side, to);
        }

        // Variant rule: a move may not leave EITHER king attacked
        if self.king_in_check(Side::White) || self.king_in_check(Side::Black) {
            self.board.restore(snapshot);
            if piece.kind == PieceKind::King {
                self.set_king_square(piece.side, prior_king);
            }
            return Err(MoveError::InvalidMove(format!(
                "{} -> {} leaves a king in check",
                from, to
            )));
        }

        self.turn = self.turn.opponent();
        self.move_count += 1;
        Ok(())
    }

    /// True if any opposing piece's movement geometry reaches this side's
    /// king. Kings themselves count as attackers.
    pub fn king_in_check(&self, side: Side) -> bool {
        let king = self.king_square(side);

        for rank in 0..BOARD_SIZE {
            for file in 0..BOARD_SIZE {
                let square = Square::new(file, rank);
                if let Some(piece) = self.board.get(square) {
                    if piece.side != side && piece.is_move_eligible(square, king, &self.board) {
                        return true;
                    }
                }
            }
        }

        false
    }

    /// Every move `attempt_move` would accept for the side to move.
    /// Geometric candidates are confirmed against a scratch copy of the
    /// session, so check safety is included.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        if self.is_game_over() {
            return moves;
        }

        for from_rank in 0..BOARD_SIZE {
            for from_file in 0..BOARD_SIZE {
                let from = Square::new(from_file, from_rank);
                let piece = match self.board.get(from) {
                    Some(piece) if piece.side == self.turn => piece,
                    _ => continue,
                };

                for to_rank in 0..BOARD_SIZE {
                    for to_file in 0..BOARD_SIZE {
                        let to = Square::new(to_file, to_rank);
                        if !piece.is_move_eligible(from, to, &self.board) {
                            continue;
                        }
                        let mut scratch = self.clone();
                        if scratch.attempt_move(from, to).is_ok() {
                            moves.push(Move::new(from, to));
                        }
                    }
                }
            }
        }

        moves
    }

    /// ASCII rendering with rank 8 (the finish rank) at the top.
    pub fn render(&self) -> String {
        let mut out = String::new();

        for rank in (0..BOARD_SIZE).rev() {
            out.push_str(&format!("{} ", rank + 1));
            for file in 0..BOARD_SIZE {
                match self.board.get(Square::new(file, rank)) {
                    Some(piece) => out.push_str(&format!(" {} ", piece.glyph())),
                    None => out.push_str(" . "),
                }
            }
            out.push('\n');
        }
        out.push_str("   a  b  c  d  e  f  g  h\n");

        out
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
