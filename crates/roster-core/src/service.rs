//! Account service orchestration.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::TRACING_TARGET_SERVICE;
use crate::account::{Account, AccountChanges, AccountUpdate, NewAccount, PublicAccount};
use crate::authz::{AuthProvider, authorize_admin, authorize_self};
use crate::error::{Error, Field, FieldErrors, Result};
use crate::health::StoreHealth;
use crate::normalize::{normalize_email, normalize_title_case};
use crate::security::{PasswordHasher, PasswordPolicy, TokenIssuer, TokenPair};
use crate::store::AccountStore;
use crate::validate::{
    ADDRESS_MAX_LENGTH, EMAIL_MAX_LENGTH, NAME_MAX_LENGTH, PASSWORD_MAX_LENGTH, validate_email,
    validate_length, validate_name, validate_phone,
};

/// Token type reported alongside issued tokens.
pub const TOKEN_TYPE: &str = "Bearer";

/// Confirmation returned after an account is deactivated.
pub const DEACTIVATED_MESSAGE: &str = "The account was deactivated successfully";

/// Result of a successful login or token refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "user")]
    pub account: PublicAccount,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

impl Session {
    fn new(account: &Account, tokens: TokenPair) -> Self {
        Self {
            account: account.to_public(),
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: TOKEN_TYPE.to_owned(),
        }
    }
}

/// Whether an update replaces the whole record or only supplied fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    Full,
    Partial,
}

/// Orchestrates account registration, retrieval, updates, deactivation and
/// login on top of the injected collaborators.
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn AccountStore>,
    hasher: Arc<dyn PasswordHasher>,
    policy: Arc<dyn PasswordPolicy>,
    tokens: Arc<dyn TokenIssuer>,
}

impl fmt::Debug for AccountService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountService").finish_non_exhaustive()
    }
}

impl AccountService {
    /// Creates a new service from its collaborators.
    pub fn new(
        store: Arc<dyn AccountStore>,
        hasher: Arc<dyn PasswordHasher>,
        policy: Arc<dyn PasswordPolicy>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            store,
            hasher,
            policy,
            tokens,
        }
    }

    /// Registers a new, non-administrative account.
    ///
    /// Accepts a partially filled [`AccountUpdate`] so that absent fields are
    /// reported as required alongside every other violation.
    pub async fn register(&self, input: impl Into<AccountUpdate>) -> Result<PublicAccount> {
        let account = self.create(input.into(), false).await?;

        tracing::info!(
            target: TRACING_TARGET_SERVICE,
            account_id = %account.id,
            "account registered"
        );

        Ok(account.into())
    }

    /// Creates an account with the admin and superuser flags set.
    ///
    /// Applies every field rule except the password strength policy.
    pub async fn create_superuser(&self, input: impl Into<AccountUpdate>) -> Result<PublicAccount> {
        let account = self.create(input.into(), true).await?;

        tracing::info!(
            target: TRACING_TARGET_SERVICE,
            account_id = %account.id,
            "superuser created"
        );

        Ok(account.into())
    }

    /// Lists every active account. Administrators only.
    pub async fn list<A: AuthProvider>(&self, requester: Option<&A>) -> Result<Vec<PublicAccount>> {
        authorize_admin(requester)?;

        let accounts = self.store.find_all_active().await?;
        Ok(accounts.into_iter().map(PublicAccount::from).collect())
    }

    /// Returns one active account to its owner or an administrator.
    pub async fn get<A: AuthProvider>(
        &self,
        requester: Option<&A>,
        account_id: Uuid,
    ) -> Result<PublicAccount> {
        authorize_self(requester, account_id)?;

        let account = self.find_active(account_id).await?;
        Ok(account.into())
    }

    /// Updates an active account on behalf of its owner or an administrator.
    pub async fn update<A: AuthProvider>(
        &self,
        requester: Option<&A>,
        account_id: Uuid,
        input: AccountUpdate,
        mode: UpdateMode,
    ) -> Result<PublicAccount> {
        authorize_self(requester, account_id)?;

        let current = self.find_active(account_id).await?;
        let changes = self.prepare(input, mode, Some(&current), true).await?;
        if changes.is_empty() {
            return Ok(current.into());
        }

        let account = self.store.update(account_id, changes).await?;

        tracing::info!(
            target: TRACING_TARGET_SERVICE,
            account_id = %account_id,
            mode = ?mode,
            "account updated"
        );

        Ok(account.into())
    }

    /// Soft-deletes an account. Administrators only.
    pub async fn deactivate<A: AuthProvider>(
        &self,
        requester: Option<&A>,
        account_id: Uuid,
    ) -> Result<&'static str> {
        authorize_admin(requester)?;

        self.store
            .update(account_id, AccountChanges::deactivate())
            .await?;

        tracing::info!(
            target: TRACING_TARGET_SERVICE,
            account_id = %account_id,
            "account deactivated"
        );

        Ok(DEACTIVATED_MESSAGE)
    }

    /// Verifies credentials and issues a session.
    ///
    /// Unknown emails, inactive accounts and wrong passwords all fail with the
    /// same [`Error::Authentication`].
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let account = self
            .store
            .find_by_email(email.trim())
            .await?
            .filter(|a| a.is_active);

        let Some(account) = account else {
            self.hasher.verify_dummy(password);
            tracing::warn!(
                target: TRACING_TARGET_SERVICE,
                "login failed: unknown account"
            );
            return Err(Error::Authentication);
        };

        if !self.hasher.verify(password, &account.password_hash)? {
            tracing::warn!(
                target: TRACING_TARGET_SERVICE,
                account_id = %account.id,
                "login failed: password mismatch"
            );
            return Err(Error::Authentication);
        }

        let tokens = self.tokens.issue(&account)?;

        tracing::info!(
            target: TRACING_TARGET_SERVICE,
            account_id = %account.id,
            "login succeeded"
        );

        Ok(Session::new(&account, tokens))
    }

    /// Issues a fresh session for an account that still exists and is active.
    pub async fn reissue(&self, account_id: Uuid) -> Result<Session> {
        let account = self
            .find_active(account_id)
            .await
            .map_err(|error| match error {
                Error::NotFound { .. } => Error::Authentication,
                other => other,
            })?;

        let tokens = self.tokens.issue(&account)?;
        Ok(Session::new(&account, tokens))
    }

    /// Returns an active account. Used to resolve token subjects.
    pub async fn find_active(&self, account_id: Uuid) -> Result<Account> {
        self.store
            .find_by_id(account_id)
            .await?
            .filter(|a| a.is_active)
            .ok_or(Error::NotFound { id: account_id })
    }

    /// Reports the health of the underlying store.
    pub async fn health(&self) -> StoreHealth {
        self.store.health().await
    }

    async fn create(&self, input: AccountUpdate, superuser: bool) -> Result<Account> {
        let changes = self
            .prepare(input, UpdateMode::Full, None, !superuser)
            .await?;

        let AccountChanges {
            first_name: Some(first_name),
            last_name: Some(last_name),
            email: Some(email),
            country: Some(country),
            city: Some(city),
            address: Some(address),
            mobile_phone: Some(mobile_phone),
            username: Some(username),
            password_hash: Some(password_hash),
            ..
        } = changes
        else {
            return Err(Error::internal("account", "incomplete registration"));
        };

        let account = NewAccount {
            first_name,
            last_name,
            email,
            country,
            city,
            address,
            mobile_phone,
            username,
            password_hash,
            is_admin: superuser,
            is_superuser: superuser,
        };

        self.store.insert(account).await
    }

    /// Validates and normalizes `input` into a patch.
    ///
    /// Every violated field is collected before failing. Uniqueness is checked
    /// against every account other than `current`.
    async fn prepare(
        &self,
        input: AccountUpdate,
        mode: UpdateMode,
        current: Option<&Account>,
        enforce_policy: bool,
    ) -> Result<AccountChanges> {
        let mut errors = FieldErrors::new();
        let mut changes = AccountChanges::default();

        let mut required = |field: Field, value: Option<String>| match (value, mode) {
            (Some(value), _) => Some(value),
            (None, UpdateMode::Partial) => None,
            (None, UpdateMode::Full) => {
                errors.push(field, "this field is required");
                None
            }
        };

        let first_name = required(Field::FirstName, input.first_name);
        let last_name = required(Field::LastName, input.last_name);
        let email = required(Field::Email, input.email);
        let country = required(Field::Country, input.country);
        let city = required(Field::City, input.city);
        let address = required(Field::Address, input.address);
        let mobile_phone = required(Field::MobilePhone, input.mobile_phone);
        let password = required(Field::Password, input.password);

        changes.first_name = name_field(&mut errors, Field::FirstName, first_name);
        changes.last_name = name_field(&mut errors, Field::LastName, last_name);
        changes.country = name_field(&mut errors, Field::Country, country);
        changes.city = name_field(&mut errors, Field::City, city);
        changes.username = changes.first_name.clone();

        if let Some(address) = address {
            match validate_length(&address, ADDRESS_MAX_LENGTH) {
                Ok(()) => changes.address = Some(address.trim().to_owned()),
                Err(e) => errors.push(Field::Address, e),
            }
        }

        if let Some(email) = email {
            let email = normalize_email(&email);
            match validate_length(&email, EMAIL_MAX_LENGTH).and_then(|()| validate_email(&email)) {
                Ok(()) => changes.email = Some(email),
                Err(e) => errors.push(Field::Email, e),
            }
        }

        if let Some(phone) = mobile_phone {
            match validate_phone(&phone) {
                Ok(()) => changes.mobile_phone = Some(phone),
                Err(e) => errors.push(Field::MobilePhone, e),
            }
        }

        let exclude = current.map(|a| a.id);
        let mut duplicates = Vec::new();

        if let Some(email) = &changes.email
            && self.store.email_in_use(email, exclude).await?
        {
            errors.push(Field::Email, "an account with this email already exists");
            duplicates.push(Field::Email);
        }

        if let Some(phone) = &changes.mobile_phone
            && self.store.mobile_phone_in_use(phone, exclude).await?
        {
            errors.push(
                Field::MobilePhone,
                "an account with this mobile phone already exists",
            );
            duplicates.push(Field::MobilePhone);
        }

        let password = password.and_then(|password| {
            if let Err(e) = validate_length(&password, PASSWORD_MAX_LENGTH) {
                errors.push(Field::Password, e);
                return None;
            }

            if enforce_policy {
                let inputs = policy_inputs(&changes, current);
                if let Err(e) = self.policy.check(&password, &inputs) {
                    errors.push(Field::Password, e.message);
                    return None;
                }
            }

            Some(password)
        });

        if let [field] = duplicates.as_slice()
            && errors.len() == 1
        {
            return Err(Error::Duplicate { field: *field });
        }

        errors.into_result()?;

        if let Some(password) = password {
            changes.password_hash = Some(self.hasher.hash(&password)?);
        }

        Ok(changes)
    }
}

fn name_field(errors: &mut FieldErrors, field: Field, value: Option<String>) -> Option<String> {
    let value = value?;
    let normalized = validate_length(&value, NAME_MAX_LENGTH)
        .and_then(|()| validate_name(&value))
        .and_then(|()| normalize_title_case(&value));

    match normalized {
        Ok(value) => Some(value),
        Err(e) => {
            errors.push(field, e);
            None
        }
    }
}

fn policy_inputs<'a>(changes: &'a AccountChanges, current: Option<&'a Account>) -> Vec<&'a str> {
    let pick = |new: &'a Option<String>, old: Option<&'a String>| {
        new.as_deref().or(old.map(String::as_str))
    };

    [
        pick(&changes.email, current.map(|a| &a.email)),
        pick(&changes.first_name, current.map(|a| &a.first_name)),
        pick(&changes.last_name, current.map(|a| &a.last_name)),
    ]
    .into_iter()
    .flatten()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::RegisterAccount;
    use crate::authz::Requester;
    use crate::error::AuthorizationReason;
    use crate::security::WeakPassword;
    use crate::store::MemoryStore;

    struct PlainHasher;

    impl PasswordHasher for PlainHasher {
        fn hash(&self, password: &str) -> Result<String> {
            Ok(format!("hashed:{password}"))
        }

        fn verify(&self, password: &str, hash: &str) -> Result<bool> {
            Ok(hash == format!("hashed:{password}"))
        }
    }

    struct MinLength;

    impl PasswordPolicy for MinLength {
        fn check(&self, password: &str, user_inputs: &[&str]) -> Result<(), WeakPassword> {
            if password.len() < 8 {
                return Err(WeakPassword::new("password is too short"));
            }
            if user_inputs.iter().any(|i| password.contains(*i)) {
                return Err(WeakPassword::new("password is too similar to the account"));
            }
            Ok(())
        }
    }

    struct CountingTokens;

    impl TokenIssuer for CountingTokens {
        fn issue(&self, account: &Account) -> Result<TokenPair> {
            Ok(TokenPair {
                access_token: format!("access:{}", account.id),
                refresh_token: format!("refresh:{}", account.id),
            })
        }
    }

    fn service() -> (AccountService, MemoryStore) {
        let store = MemoryStore::new();
        let service = AccountService::new(
            Arc::new(store.clone()),
            Arc::new(PlainHasher),
            Arc::new(MinLength),
            Arc::new(CountingTokens),
        );
        (service, store)
    }

    fn john() -> RegisterAccount {
        RegisterAccount {
            first_name: "jOHN".into(),
            last_name: "dOE".into(),
            email: "johndoe@EXAMPLE.com".into(),
            country: "usa".into(),
            city: "new york".into(),
            address: "123 Main St".into(),
            mobile_phone: "+1 123456789".into(),
            password: "StrongPassword123".into(),
        }
    }

    fn jane() -> RegisterAccount {
        RegisterAccount {
            first_name: "Jane".into(),
            email: "jane@example.com".into(),
            mobile_phone: "+1 987654321".into(),
            ..john()
        }
    }

    fn reason(error: Error) -> Option<AuthorizationReason> {
        match error {
            Error::Authorization { reason } => Some(reason),
            _ => None,
        }
    }

    #[tokio::test]
    async fn register_normalizes_and_hides_password() -> anyhow::Result<()> {
        let (service, store) = service();
        let account = service.register(john()).await?;

        assert_eq!(account.first_name, "John");
        assert_eq!(account.last_name, "Doe");
        assert_eq!(account.country, "Usa");
        assert_eq!(account.city, "New York");
        assert_eq!(account.email, "johndoe@example.com");
        assert!(!account.is_admin_user);

        let stored = store
            .find_by_id(account.id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("missing"))?;
        assert_eq!(stored.username, "John");
        assert_eq!(stored.password_hash, "hashed:StrongPassword123");
        assert!(stored.is_active);
        assert!(!stored.is_superuser);

        let json = serde_json::to_value(&account)?;
        assert!(json.get("password").is_none());
        Ok(())
    }

    #[tokio::test]
    async fn register_collects_every_violation() -> anyhow::Result<()> {
        let (service, store) = service();
        let input = RegisterAccount {
            first_name: "J0hn".into(),
            city: "".into(),
            mobile_phone: "123".into(),
            password: "short".into(),
            ..john()
        };

        let Err(Error::Validation(errors)) = service.register(input).await else {
            anyhow::bail!("expected validation error");
        };

        for field in [Field::FirstName, Field::City, Field::MobilePhone, Field::Password] {
            assert!(errors.contains(field), "{field} missing");
        }
        assert!(!errors.contains(Field::Email));
        assert!(store.is_empty().await);
        Ok(())
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email_ignoring_case() -> anyhow::Result<()> {
        let (service, store) = service();
        service.register(john()).await?;

        let input = RegisterAccount {
            email: "JohnDoe@example.com".into(),
            mobile_phone: "+1 555555555".into(),
            ..john()
        };
        let result = service.register(input).await;
        assert!(matches!(result, Err(Error::Duplicate { field: Field::Email })));
        assert_eq!(store.len().await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn register_reports_duplicates_with_other_errors() -> anyhow::Result<()> {
        let (service, _) = service();
        service.register(john()).await?;

        let input = RegisterAccount {
            first_name: "J0hn".into(),
            ..john()
        };
        let Err(Error::Validation(errors)) = service.register(input).await else {
            anyhow::bail!("expected validation error");
        };
        assert!(errors.contains(Field::FirstName));
        assert!(errors.contains(Field::Email));
        assert!(errors.contains(Field::MobilePhone));
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_registration_admits_one() -> anyhow::Result<()> {
        let (service, store) = service();
        let tasks: Vec<_> = (0..4)
            .map(|i| {
                let service = service.clone();
                tokio::spawn(async move {
                    let input = RegisterAccount {
                        mobile_phone: format!("+1 12345678{i}"),
                        ..john()
                    };
                    service.register(input).await
                })
            })
            .collect();

        let mut succeeded = 0;
        for task in tasks {
            match task.await? {
                Ok(_) => succeeded += 1,
                Err(Error::Duplicate { field }) => assert_eq!(field, Field::Email),
                Err(other) => return Err(other.into()),
            }
        }

        assert_eq!(succeeded, 1);
        assert_eq!(store.len().await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn get_enforces_owner_or_admin() -> anyhow::Result<()> {
        let (service, _) = service();
        let john = service.register(john()).await?;
        let jane = service.register(jane()).await?;

        let owner = Requester::new(john.id, false);
        assert_eq!(service.get(Some(&owner), john.id).await?, john);

        let error = service.get(Some(&owner), jane.id).await.unwrap_err();
        assert_eq!(reason(error), Some(AuthorizationReason::Forbidden));

        let error = service.get::<Requester>(None, john.id).await.unwrap_err();
        assert_eq!(reason(error), Some(AuthorizationReason::Unauthenticated));

        let admin = Requester::new(Uuid::now_v7(), true);
        assert_eq!(service.get(Some(&admin), jane.id).await?, jane);
        Ok(())
    }

    #[tokio::test]
    async fn list_is_admin_only() -> anyhow::Result<()> {
        let (service, _) = service();
        let john = service.register(john()).await?;
        let jane = service.register(jane()).await?;

        let owner = Requester::new(john.id, false);
        let error = service.list(Some(&owner)).await.unwrap_err();
        assert_eq!(reason(error), Some(AuthorizationReason::Forbidden));

        let admin = Requester::new(Uuid::now_v7(), true);
        let accounts = service.list(Some(&admin)).await?;
        assert_eq!(accounts, vec![john, jane]);
        Ok(())
    }

    #[tokio::test]
    async fn partial_update_changes_supplied_fields() -> anyhow::Result<()> {
        let (service, store) = service();
        let john = service.register(john()).await?;
        let owner = Requester::new(john.id, false);

        let update = AccountUpdate {
            first_name: Some("jonathan".into()),
            password: Some("AnotherSecret99".into()),
            ..Default::default()
        };
        let updated = service
            .update(Some(&owner), john.id, update, UpdateMode::Partial)
            .await?;

        assert_eq!(updated.first_name, "Jonathan");
        assert_eq!(updated.city, john.city);

        let stored = store
            .find_by_id(john.id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("missing"))?;
        assert_eq!(stored.username, "Jonathan");
        assert_eq!(stored.password_hash, "hashed:AnotherSecret99");
        Ok(())
    }

    #[tokio::test]
    async fn full_update_requires_every_field() -> anyhow::Result<()> {
        let (service, _) = service();
        let john = service.register(john()).await?;
        let owner = Requester::new(john.id, false);

        let update = AccountUpdate {
            city: Some("Boston".into()),
            ..Default::default()
        };
        let Err(Error::Validation(errors)) = service
            .update(Some(&owner), john.id, update, UpdateMode::Full)
            .await
        else {
            anyhow::bail!("expected validation error");
        };
        assert_eq!(errors.len(), 7);
        assert!(!errors.contains(Field::City));

        let update = AccountUpdate {
            city: Some("boston".into()),
            ..AccountUpdate::from(self::john())
        };
        let updated = service
            .update(Some(&owner), john.id, update, UpdateMode::Full)
            .await?;
        assert_eq!(updated.city, "Boston");
        Ok(())
    }

    #[tokio::test]
    async fn update_checks_uniqueness_against_others() -> anyhow::Result<()> {
        let (service, _) = service();
        let john = service.register(john()).await?;
        let jane = service.register(jane()).await?;
        let owner = Requester::new(john.id, false);

        let update = AccountUpdate {
            mobile_phone: Some(jane.mobile_phone.clone()),
            ..Default::default()
        };
        let result = service
            .update(Some(&owner), john.id, update, UpdateMode::Partial)
            .await;
        assert!(matches!(
            result,
            Err(Error::Duplicate {
                field: Field::MobilePhone
            })
        ));

        let update = AccountUpdate {
            email: Some(john.email.clone()),
            ..Default::default()
        };
        let result = service
            .update(Some(&owner), john.id, update, UpdateMode::Partial)
            .await;
        assert!(result.is_ok());
        Ok(())
    }

    #[tokio::test]
    async fn deactivate_hides_account() -> anyhow::Result<()> {
        let (service, store) = service();
        let john = service.register(john()).await?;
        let owner = Requester::new(john.id, false);
        let admin = Requester::new(Uuid::now_v7(), true);

        let error = service.deactivate(Some(&owner), john.id).await.unwrap_err();
        assert_eq!(reason(error), Some(AuthorizationReason::Forbidden));

        let message = service.deactivate(Some(&admin), john.id).await?;
        assert_eq!(message, DEACTIVATED_MESSAGE);

        let result = service.get(Some(&admin), john.id).await;
        assert!(matches!(result, Err(Error::NotFound { id }) if id == john.id));

        let stored = store
            .find_by_id(john.id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("missing"))?;
        assert!(!stored.is_active);

        assert!(service.list(Some(&admin)).await?.is_empty());

        let result = service.login("johndoe@example.com", "StrongPassword123").await;
        assert!(matches!(result, Err(Error::Authentication)));

        let result = service.deactivate(Some(&admin), john.id).await;
        assert!(matches!(result, Err(Error::NotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn login_issues_tokens() -> anyhow::Result<()> {
        let (service, _) = service();
        let john = service.register(john()).await?;

        let session = service.login("JohnDoe@Example.com", "StrongPassword123").await?;
        assert_eq!(session.account, john);
        assert_eq!(session.token_type, "Bearer");
        assert_eq!(session.access_token, format!("access:{}", john.id));

        let json = serde_json::to_value(&session)?;
        assert_eq!(json["user"]["is_admin_user"], false);
        Ok(())
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() -> anyhow::Result<()> {
        let (service, _) = service();
        service.register(john()).await?;

        let wrong_password = service.login("johndoe@example.com", "nope").await;
        let unknown_email = service.login("nobody@example.com", "StrongPassword123").await;

        let (Err(a), Err(b)) = (wrong_password, unknown_email) else {
            anyhow::bail!("expected both logins to fail");
        };
        assert!(matches!(a, Error::Authentication));
        assert!(matches!(b, Error::Authentication));
        assert_eq!(a.to_string(), b.to_string());
        Ok(())
    }

    #[tokio::test]
    async fn superuser_is_admin_and_skips_policy() -> anyhow::Result<()> {
        let (service, store) = service();
        let input = RegisterAccount {
            password: "admin".into(),
            ..john()
        };
        let account = service.create_superuser(input).await?;
        assert!(account.is_admin_user);

        let stored = store
            .find_by_id(account.id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("missing"))?;
        assert!(stored.is_superuser);
        Ok(())
    }

    #[tokio::test]
    async fn reissue_requires_active_account() -> anyhow::Result<()> {
        let (service, _) = service();
        let john = service.register(john()).await?;

        let session = service.reissue(john.id).await?;
        assert_eq!(session.refresh_token, format!("refresh:{}", john.id));

        let result = service.reissue(Uuid::now_v7()).await;
        assert!(matches!(result, Err(Error::Authentication)));
        Ok(())
    }
}
