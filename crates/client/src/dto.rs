//! Wire types for the panel backend and their domain conversions.
//!
//! DTOs mirror what the backend actually sends, raw strings included.
//! Conversion into domain types happens exactly once, at this boundary:
//! roles and resources are parsed here, and anything unrecognized is
//! handled here instead of leaking upward.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use finboard_core::access::{OwnedRecord, Role, UserRecord};
use finboard_core::permission::{ActionSet, PermissionItem, Resource};
use finboard_shared::error::{AppError, AppResult};
use finboard_shared::types::{ExpenseId, InventoryItemId, NotificationId, RevenueId, UserId};

fn default_true() -> bool {
    true
}

/// User as returned by `GET /users`, `GET /users/{id}`, and
/// `GET /users/{id}/subordinates`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserDto {
    /// User id.
    pub id: UserId,
    /// Display name.
    pub full_name: String,
    /// Email address.
    pub email: String,
    /// Account username.
    pub username: String,
    /// Phone number, if set.
    #[serde(default)]
    pub phone: Option<String>,
    /// Role name exactly as the backend spelled it.
    pub role: String,
    /// Whether the account is active.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Department, if set.
    #[serde(default)]
    pub department: Option<String>,
    /// The user's manager, if any.
    #[serde(default)]
    pub manager_id: Option<UserId>,
}

impl UserDto {
    /// Converts into the domain record.
    ///
    /// The role string is parsed once here; an unrecognized role
    /// becomes `None` (most restrictive) while the raw spelling is
    /// kept for display.
    #[must_use]
    pub fn into_record(self) -> UserRecord {
        UserRecord {
            id: self.id,
            full_name: self.full_name,
            email: self.email,
            username: self.username,
            phone: self.phone,
            role: Role::parse(&self.role),
            raw_role: self.role,
            is_active: self.is_active,
            department: self.department,
            manager_id: self.manager_id,
        }
    }
}

/// Expense row as returned by `GET /expenses`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpenseDto {
    /// Expense id.
    pub id: ExpenseId,
    /// What the money was spent on.
    pub description: String,
    /// Amount spent.
    pub amount: Decimal,
    /// Expense category, if set.
    #[serde(default)]
    pub category: Option<String>,
    /// Approval status: `pending`, `approved`, or `rejected`.
    pub status: String,
    /// The user who recorded the expense.
    #[serde(default)]
    pub created_by: Option<UserId>,
    /// When the expense was recorded.
    pub created_at: DateTime<Utc>,
}

impl OwnedRecord for ExpenseDto {
    fn owner_id(&self) -> Option<UserId> {
        self.created_by
    }
}

/// Revenue row as returned by `GET /revenue`.
#[derive(Debug, Clone, Deserialize)]
pub struct RevenueDto {
    /// Revenue id.
    pub id: RevenueId,
    /// Where the money came from.
    pub source: String,
    /// Amount received.
    pub amount: Decimal,
    /// The user who recorded the revenue.
    #[serde(default)]
    pub created_by: Option<UserId>,
    /// When the revenue was recorded.
    pub created_at: DateTime<Utc>,
}

impl OwnedRecord for RevenueDto {
    fn owner_id(&self) -> Option<UserId> {
        self.created_by
    }
}

/// Inventory item as returned by `GET /inventory-items`.
#[derive(Debug, Clone, Deserialize)]
pub struct InventoryItemDto {
    /// Item id.
    pub id: InventoryItemId,
    /// Item name.
    pub name: String,
    /// Units on hand.
    pub quantity: i64,
    /// Price per unit.
    pub unit_price: Decimal,
    /// The user who manages the item.
    #[serde(default)]
    pub created_by: Option<UserId>,
    /// When the item was added.
    pub created_at: DateTime<Utc>,
}

impl OwnedRecord for InventoryItemDto {
    fn owner_id(&self) -> Option<UserId> {
        self.created_by
    }
}

/// Notification as returned by `GET /notifications`.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationDto {
    /// Notification id.
    pub id: NotificationId,
    /// Short headline.
    pub title: String,
    /// Full message body.
    pub body: String,
    /// The user whose action produced the notification.
    #[serde(default)]
    pub created_by: Option<UserId>,
    /// When the notification was produced.
    pub created_at: DateTime<Utc>,
    /// Whether the session user has read it.
    #[serde(default)]
    pub is_read: bool,
}

impl OwnedRecord for NotificationDto {
    fn owner_id(&self) -> Option<UserId> {
        self.created_by
    }
}

/// One per-resource grant entry on the wire.
///
/// The resource arrives as a raw string so newer backends can add
/// resources without breaking older clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionEntryDto {
    /// Resource name.
    pub resource: String,
    /// Granted actions; absent flags mean `false`.
    #[serde(default)]
    pub actions: ActionSet,
}

impl PermissionEntryDto {
    /// Converts to a domain item.
    ///
    /// Entries naming a resource this client does not know are dropped
    /// with a debug trace, never an error.
    #[must_use]
    pub fn into_item(self) -> Option<PermissionItem> {
        match Resource::parse(&self.resource) {
            Some(resource) => Some(PermissionItem::new(resource, self.actions)),
            None => {
                debug!(resource = %self.resource, "dropping permission entry for unknown resource");
                None
            }
        }
    }

    /// Builds a wire entry from a domain item.
    #[must_use]
    pub fn from_item(item: PermissionItem) -> Self {
        Self {
            resource: item.resource.as_str().to_string(),
            actions: item.actions,
        }
    }
}

/// Converts wire entries to domain items, dropping unknown resources.
#[must_use]
pub fn parse_permission_entries(entries: Vec<PermissionEntryDto>) -> Vec<PermissionItem> {
    entries
        .into_iter()
        .filter_map(PermissionEntryDto::into_item)
        .collect()
}

/// Body for destructive calls that require password re-confirmation.
///
/// The server verifies this token independently of the client-side
/// probe.
#[derive(Debug, Clone, Serialize)]
pub struct PasswordConfirmation {
    /// The actor's account password.
    pub password: String,
}

impl PasswordConfirmation {
    /// Wraps a confirmed password.
    #[must_use]
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }
}

/// Body for `PATCH /expenses/{id}/reject`.
#[derive(Debug, Clone, Serialize)]
pub struct RejectRequest {
    /// The actor's account password.
    pub password: String,
    /// Reason shown to the expense owner.
    pub reason: String,
}

impl RejectRequest {
    /// Builds a reject body.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if the reason is blank.
    pub fn new(password: impl Into<String>, reason: impl Into<String>) -> AppResult<Self> {
        let reason = reason.into();
        if reason.trim().is_empty() {
            return Err(AppError::Validation(
                "Rejection reason is required".to_string(),
            ));
        }
        Ok(Self {
            password: password.into(),
            reason,
        })
    }
}

/// Body for `POST /users`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateUserRequest {
    /// Account username.
    pub username: String,
    /// Display name.
    pub full_name: String,
    /// Email address.
    pub email: String,
    /// Initial account password.
    pub password: String,
    /// Role name.
    pub role: String,
    /// The new user's manager.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<UserId>,
    /// Department.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl CreateUserRequest {
    /// Builds a create-user body.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` when a required field is blank or
    /// the email has no `@`.
    pub fn new(
        username: impl Into<String>,
        full_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        role: impl Into<String>,
    ) -> AppResult<Self> {
        let username = username.into();
        let full_name = full_name.into();
        let email = email.into();
        let password = password.into();

        ensure_not_blank("Username", &username)?;
        ensure_not_blank("Full name", &full_name)?;
        ensure_not_blank("Email", &email)?;
        ensure_not_blank("Password", &password)?;
        if !email.contains('@') {
            return Err(AppError::Validation(
                "Email address is not valid".to_string(),
            ));
        }

        Ok(Self {
            username,
            full_name,
            email,
            password,
            role: role.into(),
            manager_id: None,
            department: None,
            phone: None,
        })
    }

    /// Sets the manager.
    #[must_use]
    pub fn with_manager(mut self, manager_id: UserId) -> Self {
        self.manager_id = Some(manager_id);
        self
    }

    /// Sets the department.
    #[must_use]
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Sets the phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

/// Body for `PATCH /users/{id}`. Only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateUserRequest {
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// New email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// New department.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// New role name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// New manager.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<UserId>,
}

impl UpdateUserRequest {
    /// Validates the set fields.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` when a set field is blank or the
    /// email has no `@`.
    pub fn validate(&self) -> AppResult<()> {
        ensure_option_not_blank("Full name", self.full_name.as_deref())?;
        ensure_option_not_blank("Email", self.email.as_deref())?;
        if self.email.as_deref().is_some_and(|e| !e.contains('@')) {
            return Err(AppError::Validation(
                "Email address is not valid".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.department.is_none()
            && self.role.is_none()
            && self.manager_id.is_none()
    }
}

/// Body for `POST /expenses`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateExpenseRequest {
    /// What the money was spent on.
    pub description: String,
    /// Amount spent.
    pub amount: Decimal,
    /// Expense category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl CreateExpenseRequest {
    /// Builds a create-expense body.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` when the description is blank or
    /// the amount is not positive.
    pub fn new(description: impl Into<String>, amount: Decimal) -> AppResult<Self> {
        let description = description.into();
        ensure_not_blank("Description", &description)?;
        ensure_positive("Amount", amount)?;
        Ok(Self {
            description,
            amount,
            category: None,
        })
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Body for `PATCH /expenses/{id}`. Only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateExpenseRequest {
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    /// New category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl UpdateExpenseRequest {
    /// Validates the set fields.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` when the description is blank or
    /// the amount is not positive.
    pub fn validate(&self) -> AppResult<()> {
        ensure_option_not_blank("Description", self.description.as_deref())?;
        if let Some(amount) = self.amount {
            ensure_positive("Amount", amount)?;
        }
        Ok(())
    }
}

/// Body for `POST /revenue`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateRevenueRequest {
    /// Where the money came from.
    pub source: String,
    /// Amount received.
    pub amount: Decimal,
}

impl CreateRevenueRequest {
    /// Builds a create-revenue body.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` when the source is blank or the
    /// amount is not positive.
    pub fn new(source: impl Into<String>, amount: Decimal) -> AppResult<Self> {
        let source = source.into();
        ensure_not_blank("Source", &source)?;
        ensure_positive("Amount", amount)?;
        Ok(Self { source, amount })
    }
}

/// Body for `PATCH /revenue/{id}`. Only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateRevenueRequest {
    /// New source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// New amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
}

impl UpdateRevenueRequest {
    /// Validates the set fields.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` when the source is blank or the
    /// amount is not positive.
    pub fn validate(&self) -> AppResult<()> {
        ensure_option_not_blank("Source", self.source.as_deref())?;
        if let Some(amount) = self.amount {
            ensure_positive("Amount", amount)?;
        }
        Ok(())
    }
}

/// Body for `POST /inventory-items`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateInventoryItemRequest {
    /// Item name.
    pub name: String,
    /// Units on hand.
    pub quantity: i64,
    /// Price per unit.
    pub unit_price: Decimal,
}

impl CreateInventoryItemRequest {
    /// Builds a create-item body.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` when the name is blank, the
    /// quantity is negative, or the price is not positive.
    pub fn new(name: impl Into<String>, quantity: i64, unit_price: Decimal) -> AppResult<Self> {
        let name = name.into();
        ensure_not_blank("Name", &name)?;
        if quantity < 0 {
            return Err(AppError::Validation(
                "Quantity cannot be negative".to_string(),
            ));
        }
        ensure_positive("Unit price", unit_price)?;
        Ok(Self {
            name,
            quantity,
            unit_price,
        })
    }
}

/// Body for `PATCH /inventory-items/{id}`. Only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateInventoryItemRequest {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New unit count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    /// New price per unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Decimal>,
}

impl UpdateInventoryItemRequest {
    /// Validates the set fields.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` when the name is blank, the
    /// quantity is negative, or the price is not positive.
    pub fn validate(&self) -> AppResult<()> {
        ensure_option_not_blank("Name", self.name.as_deref())?;
        if self.quantity.is_some_and(|q| q < 0) {
            return Err(AppError::Validation(
                "Quantity cannot be negative".to_string(),
            ));
        }
        if let Some(price) = self.unit_price {
            ensure_positive("Unit price", price)?;
        }
        Ok(())
    }
}

fn ensure_not_blank(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(())
}

fn ensure_option_not_blank(field: &str, value: Option<&str>) -> AppResult<()> {
    match value {
        Some(v) => ensure_not_blank(field, v),
        None => Ok(()),
    }
}

fn ensure_positive(field: &str, amount: Decimal) -> AppResult<()> {
    if amount <= Decimal::ZERO {
        return Err(AppError::Validation(format!("{field} must be positive")));
    }
    Ok(())
}
