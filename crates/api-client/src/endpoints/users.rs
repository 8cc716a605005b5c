//! User registration and profile endpoints

use crate::client::RecyclingClient;
use crate::endpoints::DiscardRecord;
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Users API interface
#[derive(Clone)]
pub struct UsersApi {
    client: RecyclingClient,
}

impl UsersApi {
    pub(crate) fn new(client: RecyclingClient) -> Self {
        Self { client }
    }

    /// Register a new user
    pub async fn create(&self, user: &NewUser) -> ApiResult<CreatedUser> {
        let created: CreatedUser = self.client.post("users", user).await?;
        info!(user_id = created.user_id, "User registered");
        Ok(created)
    }

    /// Fetch a user profile, including accumulated points
    ///
    /// A missing user yields `ApiError::ApiResponse` with status 404.
    pub async fn get(&self, user_id: u64) -> ApiResult<User> {
        self.client.get(&format!("users/{user_id}")).await
    }

    /// Discards logged by one user
    pub async fn discards(&self, user_id: u64) -> ApiResult<Vec<DiscardRecord>> {
        self.client.get(&format!("users/{user_id}/discards")).await
    }
}

/// Registration form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    /// Display name (required)
    pub name: String,
    /// Age in years
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Neighborhood
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
    /// City
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl NewUser {
    /// Create a registration with just a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age: None,
            neighborhood: None,
            city: None,
        }
    }

    /// Set the age
    #[must_use]
    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    /// Set the neighborhood
    #[must_use]
    pub fn with_neighborhood(mut self, neighborhood: impl Into<String>) -> Self {
        self.neighborhood = Some(neighborhood.into());
        self
    }

    /// Set the city
    #[must_use]
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }
}

/// Response to a registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedUser {
    /// Confirmation message
    pub message: String,
    /// Identifier assigned by the backend
    pub user_id: u64,
}

/// User profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Identifier
    pub id: u64,
    /// Display name
    pub name: String,
    /// Age in years
    pub age: Option<u32>,
    /// Neighborhood
    pub neighborhood: Option<String>,
    /// City
    pub city: Option<String>,
    /// Points earned from logged discards
    #[serde(default)]
    pub points: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ApiError, ClientConfig};
    use recycling_core::retry::RetryConfig;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> RecyclingClient {
        RecyclingClient::with_config(
            ClientConfig::default()
                .with_base_url(server.uri())
                .with_retry(RetryConfig::no_retry()),
        )
        .unwrap()
    }

    #[test]
    fn test_new_user_omits_missing_fields() {
        let body = serde_json::to_value(NewUser::new("Ana")).unwrap();
        assert_eq!(body, json!({"name": "Ana"}));

        let full = NewUser::new("Ana")
            .with_age(31)
            .with_neighborhood("Pinheiros")
            .with_city("São Paulo");
        let body = serde_json::to_value(full).unwrap();
        assert_eq!(body["age"], 31);
        assert_eq!(body["city"], "São Paulo");
    }

    #[tokio::test]
    async fn test_create_user() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users"))
            .and(body_json(json!({"name": "Ana", "city": "São Paulo"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "message": "User created successfully",
                "user_id": 7
            })))
            .expect(1)
            .mount(&server)
            .await;

        let created = client_for(&server)
            .users()
            .create(&NewUser::new("Ana").with_city("São Paulo"))
            .await
            .unwrap();
        assert_eq!(created.user_id, 7);
    }

    #[tokio::test]
    async fn test_get_user() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 7,
                "name": "Ana",
                "age": null,
                "neighborhood": "Pinheiros",
                "city": "São Paulo",
                "points": 30
            })))
            .mount(&server)
            .await;

        let user = client_for(&server).users().get(7).await.unwrap();
        assert_eq!(user.name, "Ana");
        assert_eq!(user.age, None);
        assert_eq!(user.points, 30);
    }

    #[tokio::test]
    async fn test_get_missing_user() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/99"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"message": "User not found"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).users().get(99).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(err, ApiError::ApiResponse { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_user_discards() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/7/discards"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": 1,
                "material_type": "glass",
                "quantity": "3 bottles",
                "location_manual": null,
                "location_gps_lat": null,
                "location_gps_lon": null,
                "timestamp": "2024-05-02T10:15:00"
            }])))
            .mount(&server)
            .await;

        let discards = client_for(&server).users().discards(7).await.unwrap();
        assert_eq!(discards.len(), 1);
        assert_eq!(discards[0].user_id, None);
        assert_eq!(discards[0].quantity.as_deref(), Some("3 bottles"));
    }
}
