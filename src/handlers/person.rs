// src/handlers/person.rs

use chrono::Utc;
use money_api_types::PersonResponse;
use uuid::Uuid;

use crate::dto::requests::CreatePersonRequest;
use crate::response::AppResponse;
use crate::validation::ValidJson;

/// POST /people
/// Crée une personne ; un corps illisible ou invalide est rejeté en 400 par `ValidJson`
pub async fn create_person(
    ValidJson(payload): ValidJson<CreatePersonRequest>,
) -> AppResponse<PersonResponse> {
    let person = PersonResponse {
        id: Uuid::new_v4(),
        name: payload.name,
        email: payload.email,
        age: payload.age,
        address: payload.address.map(Into::into),
        active: true,
        created_at: Utc::now(),
    };

    tracing::info!(person_id = %person.id, "Person created");
    AppResponse::created(person)
}
