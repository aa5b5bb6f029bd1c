//! HTTP client for the panel backend.
//!
//! One `ApiClient` per session. It owns the bearer token and remembers
//! the username so destructive flows can re-verify the password against
//! the login endpoint without asking the caller to carry credentials
//! around.

use reqwest::{Client, StatusCode, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use finboard_core::access::UserRecord;
use finboard_core::confirm::INCORRECT_PASSWORD_MESSAGE;
use finboard_core::permission::{PermissionAggregator, PermissionItem};
use finboard_shared::auth::{LoginRequest, LoginResponse, SessionUser};
use finboard_shared::config::ClientConfig;
use finboard_shared::error::{AppError, AppResult, GENERIC_MESSAGE};
use finboard_shared::types::{ExpenseId, InventoryItemId, NotificationId, RevenueId, UserId};

use crate::api::{CredentialProbe, DirectoryApi, NotificationsApi};
use crate::dto::{
    CreateExpenseRequest, CreateInventoryItemRequest, CreateRevenueRequest, CreateUserRequest,
    ExpenseDto, InventoryItemDto, NotificationDto, PasswordConfirmation, PermissionEntryDto,
    RejectRequest, RevenueDto, UpdateExpenseRequest, UpdateInventoryItemRequest,
    UpdateRevenueRequest, UpdateUserRequest, UserDto, parse_permission_entries,
};

/// Error envelope the backend sends on non-success responses.
#[derive(serde::Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Default)]
struct Session {
    token: Option<String>,
    username: Option<String>,
}

/// The reqwest-backed backend client.
///
/// Methods take `&self`; session state lives behind an async lock so
/// the client can be shared across pages and background tasks.
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: RwLock<Session>,
}

impl ApiClient {
    /// Builds a client from configuration.
    pub fn new(config: &ClientConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.api.timeout_secs))
            .build()
            .map_err(|err| AppError::Internal(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            session: RwLock::new(Session::default()),
        })
    }

    /// The configured base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether a login has stored a bearer token.
    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.token.is_some()
    }

    /// Signs in and stores the session token and username.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<SessionUser> {
        let body = LoginRequest::new(username, password);
        let response: LoginResponse = self.post("/auth/login-json", &body).await?;

        let mut session = self.session.write().await;
        session.token = Some(response.access_token);
        session.username = Some(response.user.username.clone());
        Ok(response.user)
    }

    /// Forgets the session token and username.
    ///
    /// The backend keeps no server-side session to tear down.
    pub async fn logout(&self) {
        let mut session = self.session.write().await;
        session.token = None;
        session.username = None;
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Creates a user (`POST /users`).
    pub async fn create_user(&self, request: &CreateUserRequest) -> AppResult<UserRecord> {
        let dto: UserDto = self.post("/users", request).await?;
        Ok(dto.into_record())
    }

    /// Updates a user (`PATCH /users/{id}`).
    pub async fn update_user(
        &self,
        id: UserId,
        request: &UpdateUserRequest,
    ) -> AppResult<UserRecord> {
        request.validate()?;
        let dto: UserDto = self
            .patch(&format!("/users/{}", id.into_inner()), request)
            .await?;
        Ok(dto.into_record())
    }

    /// Re-activates a user (`PATCH /users/{id}/activate`).
    pub async fn activate_user(&self, id: UserId) -> AppResult<UserRecord> {
        let dto: UserDto = self
            .patch_empty(&format!("/users/{}/activate", id.into_inner()))
            .await?;
        Ok(dto.into_record())
    }

    /// Deactivates a user (`PATCH /users/{id}/deactivate`).
    ///
    /// Destructive: the backend re-verifies the confirmation password.
    pub async fn deactivate_user(&self, id: UserId, password: &str) -> AppResult<UserRecord> {
        let body = PasswordConfirmation::new(password);
        let dto: UserDto = self
            .patch(&format!("/users/{}/deactivate", id.into_inner()), &body)
            .await?;
        Ok(dto.into_record())
    }

    /// Deletes a user (`DELETE /users/{id}`).
    ///
    /// Destructive: the backend re-verifies the confirmation password.
    pub async fn delete_user(&self, id: UserId, password: &str) -> AppResult<()> {
        let body = PasswordConfirmation::new(password);
        self.delete_with_body(&format!("/users/{}", id.into_inner()), &body)
            .await
    }

    /// Fetches a user's per-resource grants (`GET /users/{id}/permissions`).
    ///
    /// Entries naming resources this client does not know are dropped.
    pub async fn user_permissions(&self, id: UserId) -> AppResult<Vec<PermissionItem>> {
        let entries: Vec<PermissionEntryDto> = self
            .get(&format!("/users/{}/permissions", id.into_inner()))
            .await?;
        Ok(parse_permission_entries(entries))
    }

    /// Replaces a user's grants (`PUT /users/{id}/permissions`).
    ///
    /// The list is canonicalized before it leaves the client: all-false
    /// entries are pruned and duplicates are merged, so the backend
    /// always stores one sparse entry per resource.
    pub async fn update_user_permissions(
        &self,
        id: UserId,
        items: &[PermissionItem],
    ) -> AppResult<()> {
        let pruned = PermissionAggregator::prune_empty(items);
        let entries: Vec<PermissionEntryDto> = PermissionAggregator::merge_by_resource(&pruned)
            .into_iter()
            .map(PermissionEntryDto::from_item)
            .collect();
        self.put_unit(&format!("/users/{}/permissions", id.into_inner()), &entries)
            .await
    }

    // ========================================================================
    // Expenses
    // ========================================================================

    /// Lists expenses visible to the session (`GET /expenses`).
    pub async fn list_expenses(&self) -> AppResult<Vec<ExpenseDto>> {
        self.get("/expenses").await
    }

    /// Records an expense (`POST /expenses`).
    pub async fn create_expense(&self, request: &CreateExpenseRequest) -> AppResult<ExpenseDto> {
        self.post("/expenses", request).await
    }

    /// Updates an expense (`PATCH /expenses/{id}`).
    pub async fn update_expense(
        &self,
        id: ExpenseId,
        request: &UpdateExpenseRequest,
    ) -> AppResult<ExpenseDto> {
        request.validate()?;
        self.patch(&format!("/expenses/{}", id.into_inner()), request)
            .await
    }

    /// Approves a pending expense (`PATCH /expenses/{id}/approve`).
    pub async fn approve_expense(&self, id: ExpenseId) -> AppResult<ExpenseDto> {
        self.patch_empty(&format!("/expenses/{}/approve", id.into_inner()))
            .await
    }

    /// Rejects a pending expense (`PATCH /expenses/{id}/reject`).
    ///
    /// Destructive: the body carries the confirmation password and a
    /// non-blank reason.
    pub async fn reject_expense(
        &self,
        id: ExpenseId,
        request: &RejectRequest,
    ) -> AppResult<ExpenseDto> {
        self.patch(&format!("/expenses/{}/reject", id.into_inner()), request)
            .await
    }

    /// Deletes an expense (`DELETE /expenses/{id}`).
    ///
    /// Destructive: the backend re-verifies the confirmation password.
    pub async fn delete_expense(&self, id: ExpenseId, password: &str) -> AppResult<()> {
        let body = PasswordConfirmation::new(password);
        self.delete_with_body(&format!("/expenses/{}", id.into_inner()), &body)
            .await
    }

    // ========================================================================
    // Revenue
    // ========================================================================

    /// Lists revenue entries visible to the session (`GET /revenue`).
    pub async fn list_revenue(&self) -> AppResult<Vec<RevenueDto>> {
        self.get("/revenue").await
    }

    /// Records a revenue entry (`POST /revenue`).
    pub async fn create_revenue(&self, request: &CreateRevenueRequest) -> AppResult<RevenueDto> {
        self.post("/revenue", request).await
    }

    /// Updates a revenue entry (`PATCH /revenue/{id}`).
    pub async fn update_revenue(
        &self,
        id: RevenueId,
        request: &UpdateRevenueRequest,
    ) -> AppResult<RevenueDto> {
        request.validate()?;
        self.patch(&format!("/revenue/{}", id.into_inner()), request)
            .await
    }

    /// Deletes a revenue entry (`DELETE /revenue/{id}`).
    ///
    /// Destructive: the backend re-verifies the confirmation password.
    pub async fn delete_revenue(&self, id: RevenueId, password: &str) -> AppResult<()> {
        let body = PasswordConfirmation::new(password);
        self.delete_with_body(&format!("/revenue/{}", id.into_inner()), &body)
            .await
    }

    // ========================================================================
    // Inventory
    // ========================================================================

    /// Lists inventory items visible to the session (`GET /inventory-items`).
    pub async fn list_inventory_items(&self) -> AppResult<Vec<InventoryItemDto>> {
        self.get("/inventory-items").await
    }

    /// Adds an inventory item (`POST /inventory-items`).
    pub async fn create_inventory_item(
        &self,
        request: &CreateInventoryItemRequest,
    ) -> AppResult<InventoryItemDto> {
        self.post("/inventory-items", request).await
    }

    /// Updates an inventory item (`PATCH /inventory-items/{id}`).
    pub async fn update_inventory_item(
        &self,
        id: InventoryItemId,
        request: &UpdateInventoryItemRequest,
    ) -> AppResult<InventoryItemDto> {
        request.validate()?;
        self.patch(&format!("/inventory-items/{}", id.into_inner()), request)
            .await
    }

    /// Deletes an inventory item (`DELETE /inventory-items/{id}`).
    ///
    /// Destructive: the backend re-verifies the confirmation password.
    pub async fn delete_inventory_item(
        &self,
        id: InventoryItemId,
        password: &str,
    ) -> AppResult<()> {
        let body = PasswordConfirmation::new(password);
        self.delete_with_body(&format!("/inventory-items/{}", id.into_inner()), &body)
            .await
    }

    // ========================================================================
    // Request plumbing
    // ========================================================================

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn auth_header(&self) -> Option<String> {
        let session = self.session.read().await;
        session.token.as_ref().map(|token| format!("Bearer {token}"))
    }

    /// Attaches auth, sends, and turns non-success statuses into errors.
    async fn send(&self, request: reqwest::RequestBuilder) -> AppResult<reqwest::Response> {
        let request = match self.auth_header().await {
            Some(auth) => request.header(header::AUTHORIZATION, auth),
            None => request,
        };
        let response = request
            .send()
            .await
            .map_err(|err| AppError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_error(status, &body));
        }
        Ok(response)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let response = self.send(self.client.get(self.url(path))).await?;
        read_json(response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        let response = self.send(self.client.post(self.url(path)).json(body)).await?;
        read_json(response).await
    }

    async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        let response = self.send(self.client.patch(self.url(path)).json(body)).await?;
        read_json(response).await
    }

    async fn patch_empty<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let response = self.send(self.client.patch(self.url(path))).await?;
        read_json(response).await
    }

    async fn patch_unit(&self, path: &str) -> AppResult<()> {
        self.send(self.client.patch(self.url(path))).await?;
        Ok(())
    }

    async fn put_unit<B: Serialize + Sync>(&self, path: &str, body: &B) -> AppResult<()> {
        self.send(self.client.put(self.url(path)).json(body)).await?;
        Ok(())
    }

    async fn delete_unit(&self, path: &str) -> AppResult<()> {
        self.send(self.client.delete(self.url(path))).await?;
        Ok(())
    }

    async fn delete_with_body<B: Serialize + Sync>(&self, path: &str, body: &B) -> AppResult<()> {
        self.send(self.client.delete(self.url(path)).json(body)).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl DirectoryApi for ApiClient {
    async fn list_users(&self) -> AppResult<Vec<UserRecord>> {
        let dtos: Vec<UserDto> = self.get("/users").await?;
        Ok(dtos.into_iter().map(UserDto::into_record).collect())
    }

    async fn get_user(&self, id: UserId) -> AppResult<UserRecord> {
        let dto: UserDto = self.get(&format!("/users/{}", id.into_inner())).await?;
        Ok(dto.into_record())
    }

    async fn subordinates(&self, id: UserId) -> AppResult<Vec<UserRecord>> {
        let dtos: Vec<UserDto> = self
            .get(&format!("/users/{}/subordinates", id.into_inner()))
            .await?;
        Ok(dtos.into_iter().map(UserDto::into_record).collect())
    }
}

#[async_trait::async_trait]
impl CredentialProbe for ApiClient {
    /// Replays the session username with the supplied password.
    ///
    /// Deliberately does not inspect the failure: a timeout, a 401, and
    /// a 500 all read as "did not verify". The stored session token is
    /// left untouched either way.
    async fn verify_password(&self, password: &str) -> AppResult<()> {
        let username = self.session.read().await.username.clone();
        let Some(username) = username else {
            return Err(AppError::Unauthorized("No active session".to_string()));
        };

        let body = LoginRequest::new(username, password);
        let probe: AppResult<LoginResponse> = self.post("/auth/login-json", &body).await;
        match probe {
            Ok(_) => Ok(()),
            Err(_) => Err(AppError::Unauthorized(INCORRECT_PASSWORD_MESSAGE.to_string())),
        }
    }
}

#[async_trait::async_trait]
impl NotificationsApi for ApiClient {
    async fn list_notifications(&self) -> AppResult<Vec<NotificationDto>> {
        self.get("/notifications").await
    }

    async fn mark_read(&self, id: NotificationId) -> AppResult<()> {
        self.patch_unit(&format!("/notifications/{}/read", id.into_inner()))
            .await
    }

    async fn delete_notification(&self, id: NotificationId) -> AppResult<()> {
        self.delete_unit(&format!("/notifications/{}", id.into_inner()))
            .await
    }
}

/// Maps a non-success response to an `AppError`.
///
/// The envelope wins when it parses and carries a message; an
/// unparseable body falls back to the generic message so status
/// classification still applies.
fn classify_error(status: StatusCode, body: &str) -> AppError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => {
            let message = envelope.message.or(envelope.error).unwrap_or_default();
            AppError::from_status(status.as_u16(), message)
        }
        Err(_) => AppError::from_status(status.as_u16(), GENERIC_MESSAGE),
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> AppResult<T> {
    response
        .json()
        .await
        .map_err(|err| AppError::Internal(format!("Malformed response body: {err}")))
}
