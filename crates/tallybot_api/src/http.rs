//! HTTP implementation of the client boundary.
//!
//! Talks JSON to a deployed ledger service, authenticating once at
//! connection time with the application credentials.

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::schemas::{Consumable, Transaction, User};

/// Client for a ledger service reachable over HTTP.
pub struct HttpApiClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl HttpApiClient {
    /// Connects and authenticates against the service.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] when the service is unreachable or rejects
    /// the application credentials.
    pub async fn connect(
        base_url: impl Into<String>,
        app_name: &str,
        app_password: &str,
    ) -> Result<Self, ApiError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http = reqwest::Client::new();

        let response = http
            .post(format!("{base_url}/v1/login"))
            .json(&json!({ "name": app_name, "password": app_password }))
            .send()
            .await
            .map_err(connection_error)?;
        let login: LoginResponse = decode(response).await?;

        tracing::debug!(base_url, "authenticated against ledger service");
        Ok(Self {
            http,
            base_url,
            token: login.token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(connection_error)?;
        decode(response).await
    }

    async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let response = self
            .http
            .get(self.url(path))
            .query(query)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(connection_error)?;
        decode(response).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, ApiError> {
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(connection_error)?;
        decode(response).await
    }
}

fn connection_error(err: reqwest::Error) -> ApiError {
    ApiError::Connection(err.to_string())
}

/// Decodes a response, mapping user-level refusals and service failures.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if status.is_success() {
        return response.json().await.map_err(|err| ApiError::Service {
            status: status.as_u16(),
            message: format!("undecodable response body: {err}"),
        });
    }

    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => "unexpected response".to_string(),
    };
    match status.as_u16() {
        400 | 404 | 409 => Err(ApiError::User(message)),
        code => Err(ApiError::Service {
            status: code,
            message,
        }),
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn get_user_by_alias(&self, alias: &str) -> Result<User, ApiError> {
        self.get_with_query("/v1/users/find", &[("alias", alias)])
            .await
    }

    async fn get_user_by_id(&self, id: u64) -> Result<User, ApiError> {
        self.get(&format!("/v1/users/{id}")).await
    }

    async fn get_users(&self) -> Result<Vec<User>, ApiError> {
        self.get("/v1/users").await
    }

    async fn get_community_user(&self) -> Result<User, ApiError> {
        self.get("/v1/community").await
    }

    async fn get_consumables(&self) -> Result<Vec<Consumable>, ApiError> {
        self.get("/v1/consumables").await
    }

    async fn get_transactions_of_user(&self, user: &User) -> Result<Vec<Transaction>, ApiError> {
        self.get(&format!("/v1/transactions?user={}", user.id)).await
    }

    async fn create_user(&self, alias: &str, name: Option<&str>) -> Result<User, ApiError> {
        self.post("/v1/users", &json!({ "alias": alias, "name": name }))
            .await
    }

    async fn make_transaction(
        &self,
        sender: &User,
        receiver: &User,
        amount: i64,
        reason: &str,
    ) -> Result<Transaction, ApiError> {
        self.post(
            "/v1/transactions",
            &json!({
                "sender": sender.id,
                "receiver": receiver.id,
                "amount": amount,
                "reason": reason,
            }),
        )
        .await
    }

    async fn consume(
        &self,
        consumable: &Consumable,
        number: u32,
        consumer: &User,
    ) -> Result<Transaction, ApiError> {
        self.post(
            "/v1/consume",
            &json!({
                "consumable": consumable.id,
                "number": number,
                "consumer": consumer.id,
            }),
        )
        .await
    }
}
