use std::fmt;
use std::str::FromStr;

use gallery_blob::category_prefix;
use gallery_core::SessionId;

use crate::MediaError;

/// Which cached ordering a listing request reads.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PartitionKey {
    /// One ordering shared by every client.
    Static,
    /// A private ordering per session.
    Session(SessionId),
}

impl PartitionKey {
    /// `media:listing:{prefix}:{static|session-<id>}`
    ///
    /// Keyed by the listed prefix, so the whole bucket (`""`) can't share
    /// an entry with any category (always `.../`). The partition part
    /// never contains `:`, which keeps the key unambiguous.
    pub fn cache_key(&self, category: &str) -> String {
        format!("media:listing:{}:{self}", category_prefix(category))
    }
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartitionKey::Static => f.write_str("static"),
            PartitionKey::Session(id) => write!(f, "session-{id}"),
        }
    }
}

/// Deployment-wide partitioning policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PartitionMode {
    #[default]
    Static,
    Session,
}

impl PartitionMode {
    /// Session mode honours a session id when present; everything else
    /// reads the shared ordering.
    pub fn partition_for(&self, session: Option<&SessionId>) -> PartitionKey {
        match (self, session) {
            (PartitionMode::Session, Some(id)) => PartitionKey::Session(id.clone()),
            _ => PartitionKey::Static,
        }
    }
}

impl FromStr for PartitionMode {
    type Err = MediaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(PartitionMode::Static),
            "session" => Ok(PartitionMode::Session),
            _ => Err(MediaError::InvalidPartitionMode(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_keys() {
        let session = SessionId::parse("abc-123").unwrap();
        assert_eq!(PartitionKey::Static.cache_key("bom-dia"), "media:listing:bom-dia/:static");
        assert_eq!(
            PartitionKey::Session(session).cache_key(""),
            "media:listing::session-abc-123"
        );
    }

    #[test]
    fn whole_bucket_never_shares_a_key_with_a_category() {
        let all = PartitionKey::Static.cache_key("");
        for category in ["*", "/", ":", "*/", "static"] {
            let key = PartitionKey::Static.cache_key(category);
            if category_prefix(category).is_empty() {
                assert_eq!(key, all, "{category:?} lists the whole bucket");
            } else {
                assert_ne!(key, all, "{category:?}");
            }
        }
        assert_eq!(
            PartitionKey::Static.cache_key("/bom-dia/"),
            PartitionKey::Static.cache_key("bom-dia")
        );
    }

    #[test]
    fn modes() {
        let session = SessionId::parse("s1").unwrap();
        assert_eq!("SESSION".parse::<PartitionMode>().unwrap(), PartitionMode::Session);
        assert!("random".parse::<PartitionMode>().is_err());

        assert_eq!(
            PartitionMode::Static.partition_for(Some(&session)),
            PartitionKey::Static
        );
        assert_eq!(
            PartitionMode::Session.partition_for(Some(&session)),
            PartitionKey::Session(session)
        );
        assert_eq!(PartitionMode::Session.partition_for(None), PartitionKey::Static);
    }
}
