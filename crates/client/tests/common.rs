use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;

use finboard_client::api::{CredentialProbe, DirectoryApi, NotificationsApi};
use finboard_client::dto::NotificationDto;
use finboard_core::access::{Role, UserRecord};
use finboard_shared::error::{AppError, AppResult};
use finboard_shared::types::{NotificationId, UserId};

#[allow(dead_code)]
pub const STUB_PASSWORD: &str = "hunter2";

/// In-memory backend implementing every client port.
///
/// Directory data is fixed at construction; notifications and the
/// failure switch can change mid-test.
#[allow(dead_code)]
pub struct StubBackend {
    users: Vec<UserRecord>,
    notifications: Mutex<Vec<NotificationDto>>,
    fail_directory: AtomicBool,
    pub verify_attempts: AtomicUsize,
    pub deleted_users: Mutex<Vec<UserId>>,
}

#[allow(dead_code)]
impl StubBackend {
    pub fn new(users: Vec<UserRecord>) -> Self {
        Self {
            users,
            notifications: Mutex::new(Vec::new()),
            fail_directory: AtomicBool::new(false),
            verify_attempts: AtomicUsize::new(0),
            deleted_users: Mutex::new(Vec::new()),
        }
    }

    /// Makes every directory call fail until switched back.
    pub fn set_directory_failure(&self, fail: bool) {
        self.fail_directory.store(fail, Ordering::SeqCst);
    }

    pub fn push_notification(&self, dto: NotificationDto) {
        self.notifications.lock().unwrap().push(dto);
    }

    pub fn set_read(&self, id: NotificationId) {
        let mut notifications = self.notifications.lock().unwrap();
        if let Some(dto) = notifications.iter_mut().find(|dto| dto.id == id) {
            dto.is_read = true;
        }
    }

    /// The destructive endpoint behind the confirm flow: checks the
    /// confirmation token like the real backend and records the call.
    pub async fn delete_user(&self, id: UserId, password: &str) -> AppResult<()> {
        if password != STUB_PASSWORD {
            return Err(AppError::Unauthorized("Invalid confirmation".into()));
        }
        self.deleted_users.lock().unwrap().push(id);
        Ok(())
    }

    fn directory_guard(&self) -> AppResult<()> {
        if self.fail_directory.load(Ordering::SeqCst) {
            return Err(AppError::Network("stub backend offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl DirectoryApi for StubBackend {
    async fn list_users(&self) -> AppResult<Vec<UserRecord>> {
        self.directory_guard()?;
        Ok(self.users.clone())
    }

    async fn get_user(&self, id: UserId) -> AppResult<UserRecord> {
        self.directory_guard()?;
        self.users
            .iter()
            .find(|user| user.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("No user {}", id.into_inner())))
    }

    async fn subordinates(&self, id: UserId) -> AppResult<Vec<UserRecord>> {
        self.directory_guard()?;
        Ok(self
            .users
            .iter()
            .filter(|user| user.manager_id == Some(id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl CredentialProbe for StubBackend {
    async fn verify_password(&self, password: &str) -> AppResult<()> {
        self.verify_attempts.fetch_add(1, Ordering::SeqCst);
        if password == STUB_PASSWORD {
            Ok(())
        } else {
            Err(AppError::Unauthorized("Incorrect password".into()))
        }
    }
}

#[async_trait]
impl NotificationsApi for StubBackend {
    async fn list_notifications(&self) -> AppResult<Vec<NotificationDto>> {
        Ok(self.notifications.lock().unwrap().clone())
    }

    async fn mark_read(&self, id: NotificationId) -> AppResult<()> {
        self.set_read(id);
        Ok(())
    }

    async fn delete_notification(&self, id: NotificationId) -> AppResult<()> {
        self.notifications.lock().unwrap().retain(|dto| dto.id != id);
        Ok(())
    }
}

/// A user with a fixed display name, for assertions.
#[allow(dead_code)]
pub fn named_user(id: i64, name: &str, role: Role, manager: Option<i64>) -> UserRecord {
    UserRecord {
        id: UserId::from_raw(id),
        full_name: name.to_string(),
        email: format!("user{id}@example.com"),
        username: format!("user{id}"),
        phone: None,
        role: Some(role),
        raw_role: role.as_str().to_string(),
        is_active: true,
        department: None,
        manager_id: manager.map(UserId::from_raw),
    }
}

/// A filler user with generated name and email.
#[allow(dead_code)]
pub fn fake_user(id: i64, role: Role, manager: Option<i64>) -> UserRecord {
    UserRecord {
        id: UserId::from_raw(id),
        full_name: Name().fake(),
        email: SafeEmail().fake(),
        username: format!("user{id}"),
        phone: None,
        role: Some(role),
        raw_role: role.as_str().to_string(),
        is_active: true,
        department: None,
        manager_id: manager.map(UserId::from_raw),
    }
}

/// The demo org used across the suite.
///
/// admin 1; finance_manager 10 managing accountant 11, employee 12,
/// and manager 13; 13 in turn manages employees 14 and 15.
#[allow(dead_code)]
pub fn demo_org() -> Vec<UserRecord> {
    vec![
        named_user(1, "Astrid Berg", Role::Admin, None),
        named_user(10, "Omar Haddad", Role::FinanceManager, Some(1)),
        named_user(11, "Priya Nair", Role::Accountant, Some(10)),
        named_user(12, "Jonas Weber", Role::Employee, Some(10)),
        named_user(13, "Sofia Rossi", Role::Manager, Some(10)),
        fake_user(14, Role::Employee, Some(13)),
        fake_user(15, Role::Employee, Some(13)),
    ]
}

/// A notification authored by the given user.
#[allow(dead_code)]
pub fn notification(id: i64, title: &str, created_by: Option<i64>) -> NotificationDto {
    NotificationDto {
        id: NotificationId::from_raw(id),
        title: title.to_string(),
        body: format!("{title} body"),
        created_by: created_by.map(UserId::from_raw),
        created_at: Utc::now(),
        is_read: false,
    }
}
