use serde::Deserialize;

/// Read-only projection of the authenticated user's profile.
///
/// Fetched on demand via `get_object("me", "name,id")`; never cached.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_deserialize() {
        let profile: Profile =
            serde_json::from_str(r#"{"name":"Jane Doe","id":"1234567890"}"#).unwrap();
        assert_eq!(profile.name, "Jane Doe");
        assert_eq!(profile.id, "1234567890");
    }
}
