use chrono::{DateTime, Utc};
use eve_esi::model::{alliance::Alliance, character::Character, corporation::Corporation};
use serde_json::{json, Value};

/// Alliance named "Autumn." with the given faction.
pub fn mock_alliance(faction_id: Option<i64>) -> Alliance {
    Alliance {
        creator_corporation_id: 98784257,
        creator_id: 2114794365,
        faction_id,
        date_founded: DateTime::parse_from_rfc3339("2024-09-25T06:25:58Z")
            .unwrap()
            .with_timezone(&Utc),
        executor_corporation_id: Some(98787881),
        name: "Autumn.".to_string(),
        ticker: "AUTMN".to_string(),
    }
}

/// Corporation named "The Order of Autumn" with the given affiliations.
pub fn mock_corporation(alliance_id: Option<i64>, faction_id: Option<i64>) -> Corporation {
    Corporation {
        alliance_id,
        ceo_id: 2114794365,
        creator_id: 2114794365,
        date_founded: Some(
            DateTime::parse_from_rfc3339("2024-10-07T21:43:09Z")
                .unwrap()
                .with_timezone(&Utc),
        ),
        description: None,
        home_station_id: Some(60003760),
        member_count: 21,
        name: "The Order of Autumn".to_string(),
        shares: Some(1000),
        tax_rate: 0.0,
        ticker: "F4LL.".to_string(),
        url: Some("https://autumn-order.com".to_string()),
        war_eligible: Some(true),
        faction_id,
    }
}

/// Character named "Hyziri" belonging to the given corporation.
pub fn mock_character(corporation_id: i64, alliance_id: Option<i64>) -> Character {
    Character {
        alliance_id,
        birthday: DateTime::parse_from_rfc3339("2018-12-20T16:11:54Z")
            .unwrap()
            .with_timezone(&Utc),
        bloodline_id: 7,
        corporation_id,
        description: Some("description".to_string()),
        faction_id: None,
        gender: "male".to_string(),
        name: "Hyziri".to_string(),
        race_id: 8,
        security_status: Some(-0.100373643),
        title: Some("Title".to_string()),
    }
}

/// Body of a `POST /universe/ids/` response.
///
/// # Arguments
/// - `characters` - `(id, name)` pairs returned under `characters`
/// - `corporations` - `(id, name)` pairs returned under `corporations`
pub fn mock_universe_ids(characters: &[(i64, &str)], corporations: &[(i64, &str)]) -> Value {
    fn entries(pairs: &[(i64, &str)]) -> Vec<Value> {
        pairs
            .iter()
            .map(|(id, name)| json!({ "id": id, "name": name }))
            .collect()
    }

    let mut body = serde_json::Map::new();
    if !characters.is_empty() {
        body.insert("characters".to_string(), Value::Array(entries(characters)));
    }
    if !corporations.is_empty() {
        body.insert(
            "corporations".to_string(),
            Value::Array(entries(corporations)),
        );
    }

    Value::Object(body)
}
