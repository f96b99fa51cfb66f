use teloxide::types::ChatId;

/// The key of the admin registry: the id of the private chat the command came from.
#[derive(
    Copy, Clone,
    Debug, derive_more::Display,
    PartialEq, Eq, Hash, PartialOrd, Ord,
    derive_more::From, derive_more::FromStr,
    sqlx::Type
)]
#[sqlx(transparent)]
pub struct AdminId(i64);

impl From<ChatId> for AdminId {
    fn from(chat_id: ChatId) -> Self {
        Self(chat_id.0)
    }
}

#[cfg(test)]
mod test {
    use super::AdminId;

    #[test]
    fn parse() {
        assert_eq!("42".parse::<AdminId>().ok(), Some(AdminId::from(42)));
        assert_eq!("-1001234".parse::<AdminId>().ok(), Some(AdminId::from(-1001234)));
        assert!("".parse::<AdminId>().is_err());
        assert!("42abc".parse::<AdminId>().is_err());
        assert!("@someone".parse::<AdminId>().is_err());
    }
}
