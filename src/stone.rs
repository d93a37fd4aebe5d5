use serde_repr::{Deserialize_repr, Serialize_repr};
use std::fmt;

/// Stone color, encoded as +1 / -1 to match the board's raw cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(i8)]
pub enum Stone {
    Black = 1,
    White = -1,
}

impl Stone {
    /// Decode a raw cell value. Any positive value reads as Black, any
    /// negative as White, zero as no stone.
    pub fn from_int(v: i8) -> Option<Self> {
        match v.signum() {
            1 => Some(Stone::Black),
            -1 => Some(Stone::White),
            _ => None,
        }
    }

    pub fn to_int(self) -> i8 {
        self as i8
    }

    pub fn opp(self) -> Self {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
        }
    }

    pub fn letter(self) -> &'static str {
        match self {
            Stone::Black => "B",
            Stone::White => "W",
        }
    }
}

impl fmt::Display for Stone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stone::Black => write!(f, "Black"),
            Stone::White => write!(f, "White"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_int_normalizes() {
        assert_eq!(Stone::from_int(1), Some(Stone::Black));
        assert_eq!(Stone::from_int(7), Some(Stone::Black));
        assert_eq!(Stone::from_int(-1), Some(Stone::White));
        assert_eq!(Stone::from_int(-42), Some(Stone::White));
        assert_eq!(Stone::from_int(0), None);
    }

    #[test]
    fn round_trips_through_int() {
        assert_eq!(Stone::from_int(Stone::Black.to_int()), Some(Stone::Black));
        assert_eq!(Stone::from_int(Stone::White.to_int()), Some(Stone::White));
    }

    #[test]
    fn opponent() {
        assert_eq!(Stone::Black.opp(), Stone::White);
        assert_eq!(Stone::White.opp(), Stone::Black);
    }

    #[test]
    fn letters_and_display() {
        assert_eq!(Stone::Black.letter(), "B");
        assert_eq!(Stone::White.letter(), "W");
        assert_eq!(Stone::Black.to_string(), "Black");
        assert_eq!(Stone::White.to_string(), "White");
    }

    #[test]
    fn serializes_as_int() {
        assert_eq!(serde_json::to_value(Stone::Black).unwrap(), 1);
        assert_eq!(serde_json::to_value(Stone::White).unwrap(), -1);
        let s: Stone = serde_json::from_value(serde_json::json!(-1)).unwrap();
        assert_eq!(s, Stone::White);
    }
}
