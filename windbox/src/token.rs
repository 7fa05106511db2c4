//! Group-scoping tokens and item identifiers.

use chrono::Utc;

const TOKEN_PREFIX: &str = "windbox";

/// Opaque, practically unique token scoping one group's item ids.
///
/// Built from a random component and the current time in milliseconds.
/// Collisions are astronomically unlikely but not impossible; this is not a
/// security token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupToken(String);

impl GroupToken {
    pub fn generate() -> Self {
        let random: u32 = rand::random();
        let millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        Self(format!("{TOKEN_PREFIX}-{random:08x}{}", to_base36(millis)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Identifier of the `item`-th item (1-based) of the `group`-th group (1-based).
    pub fn item_id(&self, group: usize, item: usize) -> String {
        format!("{}-item-{group}-{item}", self.0)
    }
}

impl std::fmt::Display for GroupToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_700_000_000_000), "loyw3v28");
    }

    #[test]
    fn test_tokens_differ() {
        let a = GroupToken::generate();
        let b = GroupToken::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("windbox-"));
    }

    #[test]
    fn test_item_id_format() {
        let token = GroupToken("windbox-abc".to_string());
        assert_eq!(token.item_id(2, 3), "windbox-abc-item-2-3");
    }
}
