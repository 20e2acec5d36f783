//! User workflow: uniqueness and format checks, then persist.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use shared::validation::is_valid_email;

use super::diagnostics::OperationLog;
use super::outcome::Outcome;
use super::store::{StoreError, UserStore};
use crate::models::{CreateUserRequest, User, UserRecord};

const CREATE_USER: &str = "create_user";
const UPDATE_USER: &str = "update_user";

/// Typed failures of `create_user` and `update_user`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserFailure {
    InvalidEmail,
    EmailConflict,
    NotFound,
}

impl UserFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserFailure::InvalidEmail => "INVALID_EMAIL",
            UserFailure::EmailConflict => "EMAIL_CONFLICT",
            UserFailure::NotFound => "NOT_FOUND",
        }
    }
}

impl fmt::Display for UserFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed failure of `list_users`: an empty store is reported, not returned
/// as an empty list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListUsersFailure {
    UsersNotFound,
}

impl fmt::Display for ListUsersFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListUsersFailure::UsersNotFound => f.write_str("USERS_NOT_FOUND"),
        }
    }
}

pub struct UserWorkflow {
    users: Arc<dyn UserStore>,
    log: Arc<dyn OperationLog>,
}

impl UserWorkflow {
    pub fn new(users: Arc<dyn UserStore>, log: Arc<dyn OperationLog>) -> Self {
        Self { users, log }
    }

    pub async fn list_users(&self) -> Result<Outcome<Vec<User>, ListUsersFailure>, StoreError> {
        let users = self.users.find_all().await?;
        if users.is_empty() {
            return Ok(Outcome::Failure(ListUsersFailure::UsersNotFound));
        }
        Ok(Outcome::Success(users))
    }

    /// Checks, in order: email uniqueness, then email format.
    pub async fn create_user(
        &self,
        request: CreateUserRequest,
    ) -> Result<Outcome<User, UserFailure>, StoreError> {
        if let Some(failure) = self.check_email(&request.email).await? {
            return Ok(self.reject(CREATE_USER, failure));
        }

        let user = self.save(CREATE_USER, request.into()).await?;
        self.log.succeeded(CREATE_USER, user.id);
        Ok(Outcome::Success(user))
    }

    /// Checks, in order: existence, email uniqueness, email format. The
    /// uniqueness check does not exempt the user's own current email.
    pub async fn update_user(
        &self,
        id: i64,
        request: CreateUserRequest,
    ) -> Result<Outcome<User, UserFailure>, StoreError> {
        let Some(existing) = self.users.find_by_id(id).await? else {
            return Ok(self.reject(UPDATE_USER, UserFailure::NotFound));
        };

        if let Some(failure) = self.check_email(&request.email).await? {
            return Ok(self.reject(UPDATE_USER, failure));
        }

        let record = UserRecord::from(existing).replace_with(request);
        let user = self.save(UPDATE_USER, record).await?;
        self.log.succeeded(UPDATE_USER, user.id);
        Ok(Outcome::Success(user))
    }

    async fn check_email(&self, email: &str) -> Result<Option<UserFailure>, StoreError> {
        if self.users.exists_by_email(email).await? {
            return Ok(Some(UserFailure::EmailConflict));
        }
        if !is_valid_email(email) {
            return Ok(Some(UserFailure::InvalidEmail));
        }
        Ok(None)
    }

    fn reject<T>(&self, operation: &'static str, failure: UserFailure) -> Outcome<T, UserFailure> {
        self.log.rejected(operation, &failure);
        Outcome::Failure(failure)
    }

    async fn save(&self, operation: &'static str, record: UserRecord) -> Result<User, StoreError> {
        match self.users.save(record.clone()).await {
            Ok(user) => Ok(user),
            Err(err) => {
                self.log.failed(operation, &record, &err);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::{FirstName, LastName};
    use fake::Fake;

    use super::*;
    use crate::services::diagnostics::testing::{LoggedEvent, RecordingOperationLog};
    use crate::services::store::MockUserStore;

    fn stub_request(email: &str) -> CreateUserRequest {
        CreateUserRequest {
            name: FirstName().fake(),
            last_name: LastName().fake(),
            email: email.to_string(),
            password: "StrongPassword123".to_string(),
        }
    }

    fn stub_user(id: i64) -> User {
        User {
            id,
            name: FirstName().fake(),
            last_name: LastName().fake(),
            email: SafeEmail().fake(),
            password: "stored_hash".to_string(),
        }
    }

    fn persisted(id: i64, record: UserRecord) -> User {
        User {
            id: record.id.unwrap_or(id),
            name: record.name,
            last_name: record.last_name,
            email: record.email,
            password: record.password,
        }
    }

    fn workflow(store: MockUserStore) -> (UserWorkflow, Arc<RecordingOperationLog>) {
        let log = Arc::new(RecordingOperationLog::default());
        (UserWorkflow::new(Arc::new(store), log.clone()), log)
    }

    #[tokio::test]
    async fn test_list_users_returns_users() {
        let mut store = MockUserStore::new();
        store
            .expect_find_all()
            .returning(|| Ok(vec![stub_user(1), stub_user(2)]));
        let (workflow, _) = workflow(store);

        let users = workflow.list_users().await.unwrap().success().unwrap();
        assert_eq!(users.len(), 2);
    }

    #[tokio::test]
    async fn test_list_users_empty_is_failure() {
        let mut store = MockUserStore::new();
        store.expect_find_all().returning(|| Ok(vec![]));
        let (workflow, _) = workflow(store);

        let outcome = workflow.list_users().await.unwrap();
        assert_eq!(outcome, Outcome::Failure(ListUsersFailure::UsersNotFound));
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let mut store = MockUserStore::new();
        store.expect_exists_by_email().returning(|_| Ok(false));
        store
            .expect_save()
            .times(1)
            .withf(|record| record.id.is_none())
            .returning(|record| Ok(persisted(42, record)));
        let (workflow, log) = workflow(store);

        let user = workflow
            .create_user(stub_request("peter.parker@example.com"))
            .await
            .unwrap()
            .success()
            .unwrap();

        assert_eq!(user.id, 42);
        assert_eq!(user.email, "peter.parker@example.com");
        assert_eq!(log.events(), vec![LoggedEvent::Succeeded("create_user", 42)]);
    }

    #[tokio::test]
    async fn test_create_user_email_conflict_does_not_write() {
        let mut store = MockUserStore::new();
        store
            .expect_exists_by_email()
            .withf(|email| email == "peter.parker@example.com")
            .returning(|_| Ok(true));
        store.expect_save().never();
        let (workflow, log) = workflow(store);

        let outcome = workflow
            .create_user(stub_request("peter.parker@example.com"))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Failure(UserFailure::EmailConflict));
        assert_eq!(
            log.events(),
            vec![LoggedEvent::Rejected("create_user", "EMAIL_CONFLICT".to_string())]
        );
    }

    #[tokio::test]
    async fn test_create_user_invalid_email() {
        for email in ["not-an-email", "", "@example", "   "] {
            let mut store = MockUserStore::new();
            store.expect_exists_by_email().returning(|_| Ok(false));
            store.expect_save().never();
            let (workflow, _) = workflow(store);

            let outcome = workflow.create_user(stub_request(email)).await.unwrap();
            assert_eq!(
                outcome,
                Outcome::Failure(UserFailure::InvalidEmail),
                "email {:?} should be rejected",
                email
            );
        }
    }

    #[tokio::test]
    async fn test_create_user_conflict_checked_before_format() {
        let mut store = MockUserStore::new();
        store.expect_exists_by_email().returning(|_| Ok(true));
        let (workflow, _) = workflow(store);

        let outcome = workflow.create_user(stub_request("not-an-email")).await.unwrap();
        assert_eq!(outcome, Outcome::Failure(UserFailure::EmailConflict));
    }

    #[tokio::test]
    async fn test_create_user_storage_error_is_logged_and_propagated() {
        let mut store = MockUserStore::new();
        store.expect_exists_by_email().returning(|_| Ok(false));
        store
            .expect_save()
            .returning(|_| Err(StoreError::Unavailable("connection refused".to_string())));
        let (workflow, log) = workflow(store);

        let result = workflow
            .create_user(stub_request("peter.parker@example.com"))
            .await;

        assert!(matches!(result, Err(StoreError::Unavailable(_))));
        let events = log.events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            LoggedEvent::Failed(operation, record) => {
                assert_eq!(*operation, "create_user");
                assert!(record.contains("peter.parker@example.com"));
                assert!(!record.contains("StrongPassword123"));
            }
            other => panic!("Expected a failure event, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_user_not_found_regardless_of_request() {
        for email in ["peter.parker@example.com", "not-an-email"] {
            let mut store = MockUserStore::new();
            store.expect_find_by_id().returning(|_| Ok(None));
            store.expect_exists_by_email().never();
            store.expect_save().never();
            let (workflow, _) = workflow(store);

            let outcome = workflow.update_user(99, stub_request(email)).await.unwrap();
            assert_eq!(outcome, Outcome::Failure(UserFailure::NotFound));
        }
    }

    #[tokio::test]
    async fn test_update_user_replaces_fields_and_keeps_password() {
        let mut store = MockUserStore::new();
        store
            .expect_find_by_id()
            .withf(|id| *id == 7)
            .returning(|id| Ok(Some(stub_user(id))));
        store.expect_exists_by_email().returning(|_| Ok(false));
        store
            .expect_save()
            .times(1)
            .withf(|record| record.id == Some(7) && record.password == "stored_hash")
            .returning(|record| Ok(persisted(0, record)));
        let (workflow, log) = workflow(store);

        let mut request = stub_request("new.address@example.com");
        request.name = "Changed".to_string();
        request.password = "ignored-on-update".to_string();

        let user = workflow
            .update_user(7, request)
            .await
            .unwrap()
            .success()
            .unwrap();

        assert_eq!(user.id, 7);
        assert_eq!(user.name, "Changed");
        assert_eq!(user.email, "new.address@example.com");
        assert_eq!(user.password, "stored_hash");
        assert_eq!(log.events(), vec![LoggedEvent::Succeeded("update_user", 7)]);
    }

    #[tokio::test]
    async fn test_update_user_own_email_conflicts() {
        let existing = stub_user(7);
        let email = existing.email.clone();

        let mut store = MockUserStore::new();
        store
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        store.expect_exists_by_email().returning(|_| Ok(true));
        store.expect_save().never();
        let (workflow, _) = workflow(store);

        let outcome = workflow.update_user(7, stub_request(&email)).await.unwrap();
        assert_eq!(outcome, Outcome::Failure(UserFailure::EmailConflict));
    }

    #[tokio::test]
    async fn test_update_user_invalid_email() {
        let mut store = MockUserStore::new();
        store
            .expect_find_by_id()
            .returning(|id| Ok(Some(stub_user(id))));
        store.expect_exists_by_email().returning(|_| Ok(false));
        store.expect_save().never();
        let (workflow, _) = workflow(store);

        let outcome = workflow
            .update_user(7, stub_request("@example"))
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::Failure(UserFailure::InvalidEmail));
    }

    #[tokio::test]
    async fn test_update_user_storage_error_is_propagated() {
        let mut store = MockUserStore::new();
        store
            .expect_find_by_id()
            .returning(|id| Ok(Some(stub_user(id))));
        store.expect_exists_by_email().returning(|_| Ok(false));
        store
            .expect_save()
            .returning(|_| Err(StoreError::UniqueViolation("users_email_key".to_string())));
        let (workflow, log) = workflow(store);

        let result = workflow
            .update_user(7, stub_request("peter.parker@example.com"))
            .await;

        assert!(matches!(result, Err(StoreError::UniqueViolation(_))));
        assert!(matches!(
            log.events().as_slice(),
            [LoggedEvent::Failed("update_user", _)]
        ));
    }

    #[test]
    fn test_failure_display_and_serialization() {
        assert_eq!(UserFailure::InvalidEmail.to_string(), "INVALID_EMAIL");
        assert_eq!(
            serde_json::to_string(&UserFailure::EmailConflict).unwrap(),
            "\"EMAIL_CONFLICT\""
        );
        assert_eq!(ListUsersFailure::UsersNotFound.to_string(), "USERS_NOT_FOUND");
    }
}
