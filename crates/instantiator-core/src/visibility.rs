//! Visibility modifiers for constructors.

use std::fmt;

/// Visibility modifier for a constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl Visibility {
    const fn rank(self) -> u8 {
        match self {
            Visibility::Private => 0,
            Visibility::Protected => 1,
            Visibility::Public => 2,
        }
    }

    /// Whether this visibility is at least as open as `min`.
    pub const fn is_at_least(self, min: Visibility) -> bool {
        self.rank() >= min.rank()
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Protected => write!(f, "protected"),
            Visibility::Private => write!(f, "private"),
        }
    }
}
