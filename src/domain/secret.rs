use std::convert::Infallible;
use std::fmt::{Debug, Formatter};
use std::str::FromStr;
use sha2::{Digest, Sha256};

/// The code that turns on the admin mode. Only its digest is kept in memory.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminSecret {
    digest: Vec<u8>,
}

impl AdminSecret {
    pub fn new(secret: &str) -> Self {
        Self { digest: Self::hash(secret) }
    }

    /// Compares digests, never the raw strings.
    pub fn matches(&self, code: &str) -> bool {
        Self::hash(code) == self.digest
    }

    fn hash(value: &str) -> Vec<u8> {
        Sha256::digest(value.as_bytes()).to_vec()
    }
}

impl FromStr for AdminSecret {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl Debug for AdminSecret {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("AdminSecret(***)")
    }
}
