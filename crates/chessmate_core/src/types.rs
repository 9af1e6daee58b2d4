use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}
impl Color {
    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
    pub fn idx(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }
    /// +1 for White, -1 for Black. Scores are White-relative.
    pub fn sign(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

impl From<chess::Color> for Color {
    fn from(c: chess::Color) -> Self {
        match c {
            chess::Color::White => Color::White,
            chess::Color::Black => Color::Black,
        }
    }
}

impl From<Color> for chess::Color {
    fn from(c: Color) -> Self {
        match c {
            Color::White => chess::Color::White,
            Color::Black => chess::Color::Black,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    pub fn idx(self) -> usize {
        self as usize
    }

    /// Relative material scale: pawn 1, minors 3, rook 5, queen 9, king 100.
    pub fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 100,
        }
    }

    /// SAN letter; pawns have none.
    pub fn san_letter(self) -> Option<char> {
        match self {
            PieceKind::Pawn => None,
            PieceKind::Knight => Some('N'),
            PieceKind::Bishop => Some('B'),
            PieceKind::Rook => Some('R'),
            PieceKind::Queen => Some('Q'),
            PieceKind::King => Some('K'),
        }
    }
}

impl From<chess::Piece> for PieceKind {
    fn from(p: chess::Piece) -> Self {
        match p {
            chess::Piece::Pawn => PieceKind::Pawn,
            chess::Piece::Knight => PieceKind::Knight,
            chess::Piece::Bishop => PieceKind::Bishop,
            chess::Piece::Rook => PieceKind::Rook,
            chess::Piece::Queen => PieceKind::Queen,
            chess::Piece::King => PieceKind::King,
        }
    }
}

impl From<PieceKind> for chess::Piece {
    fn from(k: PieceKind) -> Self {
        match k {
            PieceKind::Pawn => chess::Piece::Pawn,
            PieceKind::Knight => chess::Piece::Knight,
            PieceKind::Bishop => chess::Piece::Bishop,
            PieceKind::Rook => chess::Piece::Rook,
            PieceKind::Queen => chess::Piece::Queen,
            PieceKind::King => chess::Piece::King,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

/// Board square, 0..63 with a1 = 0 and h8 = 63.
pub type Square = u8;

/// Bit set of move properties reported by the rules oracle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MoveFlags(u8);

impl MoveFlags {
    pub const CAPTURE: MoveFlags = MoveFlags(1 << 0);
    pub const CASTLE_KINGSIDE: MoveFlags = MoveFlags(1 << 1);
    pub const CASTLE_QUEENSIDE: MoveFlags = MoveFlags(1 << 2);
    pub const EN_PASSANT: MoveFlags = MoveFlags(1 << 3);
    pub const CHECK: MoveFlags = MoveFlags(1 << 4);
    pub const PROMOTION: MoveFlags = MoveFlags(1 << 5);

    pub fn empty() -> Self {
        MoveFlags(0)
    }

    pub fn contains(self, other: MoveFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn intersects(self, other: MoveFlags) -> bool {
        self.0 & other.0 != 0
    }

    pub fn insert(&mut self, other: MoveFlags) {
        self.0 |= other.0;
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

impl std::ops::BitOr for MoveFlags {
    type Output = MoveFlags;

    fn bitor(self, rhs: MoveFlags) -> MoveFlags {
        MoveFlags(self.0 | rhs.0)
    }
}

/// A legal move as described by the rules oracle.
///
/// Only [`crate::Position`] builds these; everything downstream treats them
/// as immutable values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: PieceKind,
    pub captured: Option<PieceKind>,
    pub promotion: Option<PieceKind>,
    pub flags: MoveFlags,
}

impl Move {
    pub fn is_capture(&self) -> bool {
        self.flags.contains(MoveFlags::CAPTURE)
    }
    pub fn is_check(&self) -> bool {
        self.flags.contains(MoveFlags::CHECK)
    }
    pub fn is_castle(&self) -> bool {
        self.flags
            .intersects(MoveFlags::CASTLE_KINGSIDE | MoveFlags::CASTLE_QUEENSIDE)
    }
    pub fn is_en_passant(&self) -> bool {
        self.flags.contains(MoveFlags::EN_PASSANT)
    }
    pub fn is_promotion(&self) -> bool {
        self.flags.contains(MoveFlags::PROMOTION)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::notation::move_to_uci(self))
    }
}

// Helpers
pub fn file_of(sq: Square) -> i8 {
    (sq % 8) as i8
}
pub fn rank_of(sq: Square) -> i8 {
    (sq / 8) as i8
}
pub fn sq(file: i8, rank: i8) -> Option<Square> {
    if (0..8).contains(&file) && (0..8).contains(&rank) {
        Some((rank as u8) * 8 + (file as u8))
    } else {
        None
    }
}

pub fn sq_to_coord(sq: Square) -> String {
    let f = (b'a' + (sq % 8)) as char;
    let r = (b'1' + (sq / 8)) as char;
    format!("{f}{r}")
}

pub fn coord_to_sq(c: &str) -> Option<Square> {
    let b = c.as_bytes();
    if b.len() != 2 {
        return None;
    }
    let f = b[0];
    let r = b[1];
    if !(b'a'..=b'h').contains(&f) || !(b'1'..=b'8').contains(&r) {
        return None;
    }
    let file = f - b'a';
    let rank = r - b'1';
    Some(rank * 8 + file)
}

pub(crate) fn to_chess_square(sq: Square) -> chess::Square {
    chess::ALL_SQUARES[(sq & 63) as usize]
}

pub(crate) fn from_chess_square(sq: chess::Square) -> Square {
    sq.to_index() as Square
}
