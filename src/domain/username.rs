use derive_more::{Constructor, From};

const NO_USERNAME: &str = "—";

#[derive(Debug, Clone, Constructor, From, Eq, PartialEq)]
pub struct Username(String);

impl Username {
    pub fn value_ref(&self) -> &str {
        &self.0
    }

    /// `@username` if the sender has one, a dash otherwise.
    pub fn mention_or_dash(maybe_username: Option<&Username>) -> String {
        maybe_username
            .map(|username| format!("@{}", username.value_ref()))
            .unwrap_or_else(|| NO_USERNAME.to_owned())
    }
}

#[cfg(test)]
mod test {
    use super::Username;

    #[test]
    fn mention() {
        let username = Username::new("club_fan".to_owned());
        assert_eq!(Username::mention_or_dash(Some(&username)), "@club_fan");
        assert_eq!(Username::mention_or_dash(None), "—");
    }
}
