//! Declaration visibility.

use std::fmt;

/// Exposure level of a declaration.
///
/// Ordered from most to least exposed, so a threshold check is a plain
/// comparison: a declaration is exported when `vis <= min_vis`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Visibility {
    /// Inside a `BEGIN_PUBLISH` / `END_PUBLISH` block (or `__published:`).
    Published,
    /// Plain `public:`.
    #[default]
    Public,
    /// `protected:`.
    Protected,
    /// `private:`.
    Private,
    /// Not yet known (e.g. a forward declaration).
    Unknown,
}

impl Visibility {
    /// The C++ keyword for this level.
    pub const fn keyword(self) -> &'static str {
        match self {
            Visibility::Published => "__published",
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
            Visibility::Unknown => "",
        }
    }

    /// Whether a declaration at this level passes the given threshold.
    #[inline]
    pub fn meets(self, threshold: Visibility) -> bool {
        self <= threshold
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn published_is_most_exposed() {
        assert!(Visibility::Published < Visibility::Public);
        assert!(Visibility::Public < Visibility::Protected);
        assert!(Visibility::Protected < Visibility::Private);
        assert!(Visibility::Private < Visibility::Unknown);
    }

    #[test]
    fn threshold_check() {
        assert!(Visibility::Published.meets(Visibility::Published));
        assert!(!Visibility::Public.meets(Visibility::Published));
        assert!(Visibility::Public.meets(Visibility::Public));
        assert!(!Visibility::Protected.meets(Visibility::Public));
    }
}
