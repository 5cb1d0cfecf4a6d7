use serde::{Deserialize, Serialize};

/// A character known to the session, shown as a tile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub character_id: i64,
    pub character_name: String,
    pub corporation_id: i64,
}

/// Read-only catalog of known characters and their corporation affiliation.
pub trait IdentityRegistry {
    fn find_character(&self, character_id: i64) -> Option<Identity>;

    fn find_characters_by_corporation(&self, corporation_id: i64) -> Vec<Identity>;

    fn characters(&self) -> Vec<Identity>;
}

/// Registry over a fixed set of identities, e.g. those loaded with the page.
#[derive(Clone, Debug, Default)]
pub struct StaticIdentityRegistry {
    identities: Vec<Identity>,
}

impl StaticIdentityRegistry {
    pub fn new(identities: Vec<Identity>) -> Self {
        Self { identities }
    }
}

impl IdentityRegistry for StaticIdentityRegistry {
    fn find_character(&self, character_id: i64) -> Option<Identity> {
        self.identities
            .iter()
            .find(|identity| identity.character_id == character_id)
            .cloned()
    }

    fn find_characters_by_corporation(&self, corporation_id: i64) -> Vec<Identity> {
        self.identities
            .iter()
            .filter(|identity| identity.corporation_id == corporation_id)
            .cloned()
            .collect()
    }

    fn characters(&self) -> Vec<Identity> {
        self.identities.clone()
    }
}
