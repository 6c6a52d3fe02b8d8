use std::fmt;

/// Numeric identifier shared by every offer of one product group.
///
/// Always in `1..=2147483646` when derived from digits, or a small
/// per-cycle counter value otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupId(u32);

impl GroupId {
    pub fn new(value: u32) -> Option<Self> {
        (value > 0).then_some(Self(value))
    }

    /// Wrap `value`, mapping 0 to 1.
    pub fn at_least_one(value: u32) -> Self {
        Self(value.max(1))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_not_a_group_id() {
        assert!(GroupId::new(0).is_none());
        assert_eq!(GroupId::new(7).map(GroupId::get), Some(7));
        assert_eq!(GroupId::at_least_one(0).get(), 1);
    }

    #[test]
    fn displays_as_plain_integer() {
        let id = GroupId::new(2147483646).unwrap();
        assert_eq!(id.to_string(), "2147483646");
    }
}
