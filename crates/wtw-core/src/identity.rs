use std::collections::HashMap;

use crate::{
    domain::{ChatId, OwnerId},
    errors::Error,
    Result,
};

/// Static chat -> owner remapping that lets several chats share one list.
///
/// Unknown chats own their own list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OwnerMap {
    table: HashMap<i64, i64>,
}

impl OwnerMap {
    pub fn new(pairs: impl IntoIterator<Item = (i64, i64)>) -> Self {
        Self {
            table: pairs.into_iter().collect(),
        }
    }

    /// Parse `raw:owner` pairs separated by commas, e.g. `"1:1,2:1"`.
    pub fn parse(spec: &str) -> Result<Self> {
        let mut table = HashMap::new();
        for pair in spec.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let Some((raw, owner)) = pair.split_once(':') else {
                return Err(Error::Config(format!(
                    "owner map entry '{pair}' must look like raw_id:owner_id"
                )));
            };
            let raw = parse_id(raw, pair)?;
            let owner = parse_id(owner, pair)?;
            if let Some(prev) = table.insert(raw, owner) {
                if prev != owner {
                    return Err(Error::Config(format!(
                        "owner map maps {raw} to both {prev} and {owner}"
                    )));
                }
            }
        }
        Ok(Self { table })
    }

    pub fn resolve(&self, chat_id: ChatId) -> OwnerId {
        OwnerId(self.table.get(&chat_id.0).copied().unwrap_or(chat_id.0))
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

fn parse_id(s: &str, pair: &str) -> Result<i64> {
    s.trim()
        .parse::<i64>()
        .map_err(|_| Error::Config(format!("owner map entry '{pair}' has a non-numeric id")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_chats_resolve_to_their_owner() {
        let map = OwnerMap::new([(613544049, 613544049), (7465672598, 613544049)]);
        assert_eq!(map.resolve(ChatId(7465672598)), OwnerId(613544049));
        assert_eq!(map.resolve(ChatId(613544049)), OwnerId(613544049));
        // Stable across calls.
        assert_eq!(map.resolve(ChatId(7465672598)), OwnerId(613544049));
    }

    #[test]
    fn unknown_chats_own_themselves() {
        let map = OwnerMap::new([(1, 2)]);
        assert_eq!(map.resolve(ChatId(42)), OwnerId(42));
        assert_eq!(OwnerMap::default().resolve(ChatId(-100)), OwnerId(-100));
    }

    #[test]
    fn parses_pairs_with_whitespace_and_trailing_comma() {
        let map = OwnerMap::parse(" 10:1 , 11 : 1,").unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.resolve(ChatId(11)), OwnerId(1));
    }

    #[test]
    fn empty_spec_is_empty_map() {
        assert!(OwnerMap::parse("").unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_entries() {
        assert!(matches!(OwnerMap::parse("10"), Err(Error::Config(_))));
        assert!(matches!(OwnerMap::parse("a:1"), Err(Error::Config(_))));
        assert!(matches!(OwnerMap::parse("1:2,1:3"), Err(Error::Config(_))));
    }

    #[test]
    fn repeated_identical_entries_are_fine() {
        let map = OwnerMap::parse("1:2,1:2").unwrap();
        assert_eq!(map.resolve(ChatId(1)), OwnerId(2));
    }
}
