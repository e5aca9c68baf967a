use std::sync::Arc;

use axum::{
    extract::{Path, RawQuery, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use url::form_urlencoded;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Person {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreatePerson {
    pub first_name: String,
    pub last_name: String,
}

/// Missing key: leave alone. `null`: clear. Value: replace.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EditPerson {
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub first_name: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub last_name: Option<Option<String>>,
}

/// Filters from the query string. OR within a field, AND across fields.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PersonFilter {
    pub first_name: Vec<String>,
    pub last_name: Vec<String>,
    pub id: Vec<Uuid>,
}

impl PersonFilter {
    pub fn parse(query: &str) -> Result<Self, String> {
        let mut filter = PersonFilter::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "FirstName" => filter.first_name.push(value.into_owned()),
                "LastName" => filter.last_name.push(value.into_owned()),
                "Id" => {
                    let id = value
                        .parse()
                        .map_err(|_| format!("invalid Id filter: {value}"))?;
                    filter.id.push(id);
                }
                other => return Err(format!("unknown filter: {other}")),
            }
        }
        Ok(filter)
    }

    pub fn matches(&self, person: &Person) -> bool {
        fn any<T: PartialEq>(values: &[T], actual: &T) -> bool {
            values.is_empty() || values.contains(actual)
        }
        any(&self.first_name, &person.first_name)
            && any(&self.last_name, &person.last_name)
            && any(&self.id, &person.id)
    }
}

pub type Db = Arc<RwLock<Vec<Person>>>;

type ApiError = (StatusCode, String);

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    let people = Router::new()
        .route("/people", get(list_people).post(create_person))
        .route(
            "/people/{id}",
            get(get_person).patch(edit_person).delete(delete_person),
        )
        .with_state(db);
    Router::new()
        .nest("/api", people)
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn required_name(field: &str, value: String) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("{field} must not be empty"),
        ));
    }
    Ok(trimmed.to_string())
}

fn patched_name(field: &str, value: Option<Option<String>>) -> Result<Option<String>, ApiError> {
    match value {
        None => Ok(None),
        Some(None) => Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("{field} cannot be cleared"),
        )),
        Some(Some(name)) => required_name(field, name).map(Some),
    }
}

async fn list_people(
    State(db): State<Db>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<Person>>, ApiError> {
    let filter = PersonFilter::parse(query.as_deref().unwrap_or(""))
        .map_err(|msg| (StatusCode::BAD_REQUEST, msg))?;
    let people = db.read().await;
    Ok(Json(
        people.iter().filter(|p| filter.matches(p)).cloned().collect(),
    ))
}

async fn create_person(
    State(db): State<Db>,
    Json(input): Json<CreatePerson>,
) -> Result<(StatusCode, Json<Person>), ApiError> {
    let person = Person {
        id: Uuid::new_v4(),
        first_name: required_name("FirstName", input.first_name)?,
        last_name: required_name("LastName", input.last_name)?,
    };
    db.write().await.push(person.clone());
    tracing::info!(id = %person.id, "created person");
    Ok((StatusCode::CREATED, Json(person)))
}

async fn get_person(State(db): State<Db>, Path(id): Path<Uuid>) -> Result<Json<Person>, StatusCode> {
    let people = db.read().await;
    people
        .iter()
        .find(|p| p.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn edit_person(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<EditPerson>,
) -> Result<Json<Person>, ApiError> {
    let mut people = db.write().await;
    let person = people
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or((StatusCode::NOT_FOUND, String::new()))?;
    // Validate everything before touching the stored record.
    let first_name = patched_name("FirstName", input.first_name)?;
    let last_name = patched_name("LastName", input.last_name)?;
    if let Some(first_name) = first_name {
        person.first_name = first_name;
    }
    if let Some(last_name) = last_name {
        person.last_name = last_name;
    }
    Ok(Json(person.clone()))
}

async fn delete_person(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let mut people = db.write().await;
    let index = people
        .iter()
        .position(|p| p.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    people.remove(index);
    Ok(StatusCode::NO_CONTENT)
}
