//! Strongly-typed universe identifier.

use std::fmt;

/// Identifies a logical control group of channels (e.g. one DMX512 line).
///
/// Universe ids are assigned by the controlling installation; Lume treats
/// them as opaque and never interprets the value.
///
/// # Examples
///
/// ```
/// use lume_core::UniverseId;
///
/// let u = UniverseId(7);
/// assert_eq!(u.to_string(), "7");
/// assert_eq!(UniverseId::from(7), u);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UniverseId(pub u32);

impl fmt::Display for UniverseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for UniverseId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
