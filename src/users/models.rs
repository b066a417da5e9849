use serde::Deserialize;

/// One user as returned by the collection endpoint. Fields beyond these
/// three are ignored on decode.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Record {
    pub id: u64,
    pub username: String,
    pub email: String,
}

impl Record {
    #[cfg(test)]
    pub fn new(id: u64, username: &str, email: &str) -> Self {
        Self {
            id,
            username: username.to_string(),
            email: email.to_string(),
        }
    }

    /// Case-insensitive substring match on username or email. `needle` must
    /// already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.username.to_lowercase().contains(needle) || self.email.to_lowercase().contains(needle)
    }
}
