use serde::{Deserialize, Serialize};

/// Common N-key layouts.
///
/// Convenience only: the difficulty core is generic over the raw column
/// count, so arbitrary layouts work without a `KeyMode` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyMode {
    Key4,
    Key5,
    Key6,
    Key7,
    Key8,
    Key9,
    Key10,
}

impl KeyMode {
    /// Total number of columns
    pub fn column_count(self) -> usize {
        match self {
            Self::Key4 => 4,
            Self::Key5 => 5,
            Self::Key6 => 6,
            Self::Key7 => 7,
            Self::Key8 => 8,
            Self::Key9 => 9,
            Self::Key10 => 10,
        }
    }

    /// Column index splitting the playfield into two hands
    pub fn hand_split(self) -> usize {
        self.column_count() / 2
    }

    /// Detect the key mode for a plain column count, if one exists
    pub fn from_column_count(column_count: usize) -> Option<Self> {
        match column_count {
            4 => Some(Self::Key4),
            5 => Some(Self::Key5),
            6 => Some(Self::Key6),
            7 => Some(Self::Key7),
            8 => Some(Self::Key8),
            9 => Some(Self::Key9),
            10 => Some(Self::Key10),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_counts() {
        assert_eq!(KeyMode::Key4.column_count(), 4);
        assert_eq!(KeyMode::Key7.column_count(), 7);
        assert_eq!(KeyMode::Key10.column_count(), 10);
    }

    #[test]
    fn test_hand_split() {
        assert_eq!(KeyMode::Key4.hand_split(), 2);
        assert_eq!(KeyMode::Key7.hand_split(), 3);
        assert_eq!(KeyMode::Key10.hand_split(), 5);
    }

    #[test]
    fn test_from_column_count() {
        assert_eq!(KeyMode::from_column_count(7), Some(KeyMode::Key7));
        assert_eq!(KeyMode::from_column_count(3), None);
        assert_eq!(KeyMode::from_column_count(11), None);
    }
}
