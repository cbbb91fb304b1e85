/*
 * Responsibility
 * - Actors の request/response DTO
 * - validate() で必須項目・値域をチェック (失敗は 422)
 */
use serde::{Deserialize, Serialize};

use crate::repos::actor_repo::{ActorRow, Gender};

// Fields are optional so that a missing field is a validation error (422)
// with a readable message instead of a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct CreateActorRequest {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct NewActor {
    pub name: String,
    pub age: i32,
    pub gender: Gender,
}

impl CreateActorRequest {
    pub fn validate(self) -> Result<NewActor, &'static str> {
        let name = self.name.ok_or("name is required")?;
        if name.trim().is_empty() {
            return Err("name is required");
        }
        let age = self.age.ok_or("age is required")?;
        if age < 0 {
            return Err("age must be >= 0");
        }
        let gender = self.gender.ok_or("gender is required")?;

        Ok(NewActor {
            name: name.trim().to_string(),
            age,
            gender,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateActorRequest {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
}

impl UpdateActorRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(name) = &self.name
            && name.trim().is_empty()
        {
            return Err("name cannot be empty");
        }
        if let Some(age) = self.age
            && age < 0
        {
            return Err("age must be >= 0");
        }

        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct ActorResponse {
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub gender: Gender,
}

impl From<ActorRow> for ActorResponse {
    fn from(row: ActorRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            age: row.age,
            gender: row.gender,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ActorListResponse {
    pub success: bool,
    pub actors: Vec<ActorResponse>,
}

#[derive(Debug, Serialize)]
pub struct ActorDetailResponse {
    pub success: bool,
    pub actor: ActorResponse,
}

#[derive(Debug, Serialize)]
pub struct ActorCreatedResponse {
    pub success: bool,
    pub created: ActorResponse,
}

#[derive(Debug, Serialize)]
pub struct ActorUpdatedResponse {
    pub success: bool,
    pub updated: ActorResponse,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn create(body: serde_json::Value) -> Result<NewActor, &'static str> {
        serde_json::from_value::<CreateActorRequest>(body)
            .unwrap()
            .validate()
    }

    #[test]
    fn complete_body_validates() {
        let actor = create(json!({"name": " Tom Hanks ", "age": 67, "gender": "Male"})).unwrap();
        assert_eq!(
            actor,
            NewActor {
                name: "Tom Hanks".to_string(),
                age: 67,
                gender: Gender::Male,
            }
        );
    }

    #[test]
    fn each_missing_field_is_reported() {
        assert_eq!(
            create(json!({"age": 40, "gender": "Female"})),
            Err("name is required")
        );
        assert_eq!(
            create(json!({"name": "  ", "age": 40, "gender": "Female"})),
            Err("name is required")
        );
        assert_eq!(
            create(json!({"name": "Meryl", "gender": "Female"})),
            Err("age is required")
        );
        assert_eq!(
            create(json!({"name": "Meryl", "age": 40})),
            Err("gender is required")
        );
    }

    #[test]
    fn negative_age_is_rejected() {
        assert_eq!(
            create(json!({"name": "Meryl", "age": -1, "gender": "Female"})),
            Err("age must be >= 0")
        );
    }

    #[test]
    fn unknown_gender_does_not_deserialize() {
        assert!(
            serde_json::from_value::<CreateActorRequest>(json!({
                "name": "Meryl", "age": 40, "gender": "female"
            }))
            .is_err()
        );
    }

    #[test]
    fn partial_update_checks_only_present_fields() {
        let ok: UpdateActorRequest = serde_json::from_value(json!({"age": 41})).unwrap();
        assert_eq!(ok.validate(), Ok(()));

        let empty: UpdateActorRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty.validate(), Ok(()));

        let blank: UpdateActorRequest = serde_json::from_value(json!({"name": ""})).unwrap();
        assert_eq!(blank.validate(), Err("name cannot be empty"));
    }
}
