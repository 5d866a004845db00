//! Java modifier bitmask

use std::fmt::{self, Display, Formatter};
use std::ops::{BitOr, BitOrAssign};

/// Set of Java modifiers
///
/// Rendered in canonical order: `public protected private abstract static
/// final transient volatile synchronized native`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifier(u16);

impl Modifier {
    pub const NONE: Self = Self(0);
    pub const PUBLIC: Self = Self(1);
    pub const PROTECTED: Self = Self(1 << 1);
    pub const PRIVATE: Self = Self(1 << 2);
    pub const ABSTRACT: Self = Self(1 << 3);
    pub const STATIC: Self = Self(1 << 4);
    pub const FINAL: Self = Self(1 << 5);
    pub const TRANSIENT: Self = Self(1 << 6);
    pub const VOLATILE: Self = Self(1 << 7);
    pub const SYNCHRONIZED: Self = Self(1 << 8);
    pub const NATIVE: Self = Self(1 << 9);

    const ORDER: [(Self, &'static str); 10] = [
        (Self::PUBLIC, "public"),
        (Self::PROTECTED, "protected"),
        (Self::PRIVATE, "private"),
        (Self::ABSTRACT, "abstract"),
        (Self::STATIC, "static"),
        (Self::FINAL, "final"),
        (Self::TRANSIENT, "transient"),
        (Self::VOLATILE, "volatile"),
        (Self::SYNCHRONIZED, "synchronized"),
        (Self::NATIVE, "native"),
    ];

    #[inline]
    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    #[must_use]
    pub const fn is_public(self) -> bool {
        self.contains(Self::PUBLIC)
    }

    #[inline]
    #[must_use]
    pub const fn is_private(self) -> bool {
        self.contains(Self::PRIVATE)
    }

    #[inline]
    #[must_use]
    pub const fn is_static(self) -> bool {
        self.contains(Self::STATIC)
    }

    #[inline]
    #[must_use]
    pub const fn is_transient(self) -> bool {
        self.contains(Self::TRANSIENT)
    }

    #[inline]
    #[must_use]
    pub const fn is_abstract(self) -> bool {
        self.contains(Self::ABSTRACT)
    }

    /// Same set without `other`
    #[inline]
    #[must_use]
    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Modifier {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Modifier {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl Display for Modifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (flag, keyword) in Self::ORDER {
            if self.contains(flag) {
                if !first {
                    f.write_str(" ")?;
                }
                f.write_str(keyword)?;
                first = false;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_in_canonical_order() {
        let m = Modifier::FINAL | Modifier::STATIC | Modifier::PRIVATE;
        assert_eq!(m.to_string(), "private static final");
    }

    #[test]
    fn none_renders_empty() {
        assert_eq!(Modifier::NONE.to_string(), "");
        assert!(Modifier::NONE.is_empty());
    }

    #[test]
    fn without_clears_flag() {
        let m = (Modifier::PUBLIC | Modifier::ABSTRACT).without(Modifier::ABSTRACT);
        assert_eq!(m, Modifier::PUBLIC);
        assert!(!m.is_abstract());
    }
}
