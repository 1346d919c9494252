//! Grid tokens and their packed one-byte descriptor
//!
//! Descriptor layout (puzzle file):
//! ```text
//! 7    | 6   | 5   | 4 3 | 2 1 0
//! MOVE | ROT | REQ | DIR | TYPE
//! ```

use serde::{Deserialize, Serialize};

use super::direction::Direction;

/// Token types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TokenKind {
    #[default]
    None,
    Block,
    Checkpoint,
    Laser,
    Mirror,
    Splitter,
    Target,
}

impl TokenKind {
    /// 3-bit type code. `None` for the unused code 7.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(TokenKind::None),
            1 => Some(TokenKind::Block),
            2 => Some(TokenKind::Checkpoint),
            3 => Some(TokenKind::Laser),
            4 => Some(TokenKind::Mirror),
            5 => Some(TokenKind::Splitter),
            6 => Some(TokenKind::Target),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            TokenKind::None => 0,
            TokenKind::Block => 1,
            TokenKind::Checkpoint => 2,
            TokenKind::Laser => 3,
            TokenKind::Mirror => 4,
            TokenKind::Splitter => 5,
            TokenKind::Target => 6,
        }
    }

    /// Tokens the beam must touch for the "use every token" rule
    pub fn must_be_hit(self) -> bool {
        !matches!(self, TokenKind::None | TokenKind::Block | TokenKind::Laser)
    }
}

/// A single grid cell's content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Orientation (ignored for None/Block)
    pub dir: Direction,
    pub can_move: bool,
    pub can_rotate: bool,
    /// Target only: counts toward the mandatory quota
    pub req_target: bool,
    /// Struck by the beam during the latest evaluation
    #[serde(skip)]
    pub hit: bool,
}

impl Token {
    pub const EMPTY: Token = Token {
        kind: TokenKind::None,
        dir: Direction::North,
        can_move: false,
        can_rotate: false,
        req_target: false,
        hit: false,
    };

    /// A fixed token of the given kind
    pub fn new(kind: TokenKind, dir: Direction) -> Self {
        Self {
            kind,
            dir,
            ..Self::EMPTY
        }
    }

    pub fn movable(mut self) -> Self {
        self.can_move = true;
        self
    }

    pub fn rotatable(mut self) -> Self {
        self.can_rotate = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.req_target = true;
        self
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.kind == TokenKind::None
    }

    /// Unpack a descriptor byte. `None` if the type code is unknown.
    pub fn decode(data: u8) -> Option<Self> {
        let kind = TokenKind::from_code(data & 0x07)?;
        Some(Self {
            kind,
            dir: Direction::from_bits(data >> 3),
            req_target: data & 0x20 != 0,
            can_rotate: data & 0x40 != 0,
            can_move: data & 0x80 != 0,
            hit: false,
        })
    }

    /// Pack into a descriptor byte (the `hit` mark is not stored)
    pub fn encode(&self) -> u8 {
        let mut data = self.kind.code() | (self.dir.bits() << 3);
        if self.req_target {
            data |= 0x20;
        }
        if self.can_rotate {
            data |= 0x40;
        }
        if self.can_move {
            data |= 0x80;
        }
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_decode_fields() {
        // MOVE | ROT | REQ | DIR=West(3) | TYPE=Target(6)
        let token = Token::decode(0b1111_1110).unwrap();
        assert_eq!(token.kind, TokenKind::Target);
        assert_eq!(token.dir, Direction::West);
        assert!(token.req_target);
        assert!(token.can_rotate);
        assert!(token.can_move);
        assert!(!token.hit);

        // Laser facing East, fixed
        let laser = Token::decode(0b0000_1011).unwrap();
        assert_eq!(laser.kind, TokenKind::Laser);
        assert_eq!(laser.dir, Direction::East);
        assert!(!laser.can_move && !laser.can_rotate && !laser.req_target);
    }

    #[test]
    fn test_decode_rejects_unknown_type() {
        assert!(Token::decode(0x07).is_none());
        assert!(Token::decode(0xFF).is_none());
    }

    #[test]
    fn test_must_be_hit() {
        assert!(!TokenKind::None.must_be_hit());
        assert!(!TokenKind::Block.must_be_hit());
        assert!(!TokenKind::Laser.must_be_hit());
        assert!(TokenKind::Checkpoint.must_be_hit());
        assert!(TokenKind::Mirror.must_be_hit());
        assert!(TokenKind::Splitter.must_be_hit());
        assert!(TokenKind::Target.must_be_hit());
    }

    proptest! {
        #[test]
        fn prop_descriptor_codec(data in any::<u8>()) {
            prop_assume!(data & 0x07 != 0x07);
            let token = Token::decode(data).unwrap();
            prop_assert_eq!(token.encode(), data);
        }
    }
}
