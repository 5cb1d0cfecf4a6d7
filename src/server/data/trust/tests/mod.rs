use trustlist_test_utils::prelude::*;

use super::{
    character::{NewTrustedCharacter, TrustedCharacterRepository},
    corporation::{NewTrustedCorporation, TrustedCorporationRepository},
};


fn new_character(character_id: i64) -> NewTrustedCharacter {
    NewTrustedCharacter {
        character_id,
        character_name: format!("Character {}", character_id),
        corporation_id: 98000001,
        corporation_name: "Corporation 98000001".to_string(),
        added_by: "Operator".to_string(),
    }
}

fn new_corporation(corporation_id: i64, alliance_id: Option<i64>) -> NewTrustedCorporation {
    NewTrustedCorporation {
        corporation_id,
        corporation_name: format!("Corporation {}", corporation_id),
        alliance_id,
        alliance_name: alliance_id.map(|id| format!("Alliance {}", id)),
        added_by: "Operator".to_string(),
    }
}
