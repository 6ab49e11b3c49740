use std::fmt;

/// Asset key for a cosmetic image: a face capture, the default body or a food icon.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SkinId(String);

impl SkinId {
    pub fn new(id: String) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SkinId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SkinId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<SkinId> for String {
    fn from(id: SkinId) -> Self {
        id.0
    }
}

impl fmt::Display for SkinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Player slot. Ordering matters: collision checks run Player1 first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SnakeId {
    Player1,
    Player2,
}

impl fmt::Display for SnakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnakeId::Player1 => write!(f, "Player 1"),
            SnakeId::Player2 => write!(f, "Player 2"),
        }
    }
}
