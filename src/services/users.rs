//! User account service
//!
//! Registration, authentication and profile flows. User-ID uniqueness is the
//! aggregate's invariant; email uniqueness is enforced here, case
//! insensitively, on registration and on every email change.

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{ChangePassword, CreateUser, LoginRequest, Role, UpdateProfile, User, UserProfile},
    services::SharedLibrary,
};

#[derive(Clone)]
pub struct UsersService {
    library: SharedLibrary,
}

impl UsersService {
    pub fn new(library: SharedLibrary) -> Self {
        Self { library }
    }

    /// Register a new account. The role is fixed at construction and
    /// defaults to MEMBER.
    pub async fn register(&self, req: CreateUser) -> AppResult<UserProfile> {
        req.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let role = req.role.unwrap_or(Role::Member);
        let user = User::new(req.user_id, req.name, req.email, req.password, role)?;

        let mut library = self.library.write().await;
        if library.find_user_by_email(user.email()).is_some() {
            return Err(AppError::UserAlreadyExists(format!(
                "Email {} is already registered",
                user.email()
            )));
        }
        let profile = user.profile();
        library.register_user(user)?;

        tracing::info!(user_id = %profile.user_id, role = %profile.role, "User registered");
        Ok(profile)
    }

    /// Authentication check by email and password. No token or session is
    /// issued here.
    pub async fn authenticate(&self, req: LoginRequest) -> AppResult<UserProfile> {
        if req.email.trim().is_empty() || req.password.trim().is_empty() {
            return Err(AppError::Validation(
                "Email and password are required".to_string(),
            ));
        }

        let library = self.library.read().await;
        let user = library
            .find_user_by_email(&req.email)
            .ok_or_else(|| AppError::UserNotFound("No account for this email".to_string()))?;
        user.login(&req.password)?;
        Ok(user.profile())
    }

    pub async fn get_profile(&self, user_id: &str) -> AppResult<UserProfile> {
        let library = self.library.read().await;
        Ok(library.get_user(user_id)?.profile())
    }

    pub async fn user_count(&self) -> usize {
        self.library.read().await.user_count()
    }

    /// Patch name and/or email. An email change re-validates uniqueness
    /// against every other account.
    pub async fn update_profile(
        &self,
        user_id: &str,
        req: UpdateProfile,
    ) -> AppResult<UserProfile> {
        req.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let mut library = self.library.write().await;
        if let Some(ref email) = req.email {
            if let Some(other) = library.find_user_by_email(email) {
                if other.user_id() != user_id {
                    return Err(AppError::UserAlreadyExists(format!(
                        "Email {} is already registered",
                        email
                    )));
                }
            }
        }

        let user = library.get_user_mut(user_id)?;
        if let Some(name) = req.name.filter(|n| !n.trim().is_empty()) {
            user.set_name(name);
        }
        if let Some(email) = req.email {
            user.set_email(email);
        }
        Ok(user.profile())
    }

    pub async fn change_password(&self, user_id: &str, req: ChangePassword) -> AppResult<()> {
        req.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let mut library = self.library.write().await;
        library.get_user_mut(user_id)?.change_password(req.new_password);

        tracing::info!(user_id = %user_id, "Password changed");
        Ok(())
    }

    pub async fn delete_user(&self, user_id: &str) -> AppResult<()> {
        let mut library = self.library.write().await;
        library.remove_user(user_id)?;

        tracing::info!(user_id = %user_id, "User removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::Library;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    fn service() -> UsersService {
        UsersService::new(Arc::new(RwLock::new(Library::new())))
    }

    fn register_req(user_id: &str, email: &str) -> CreateUser {
        CreateUser {
            user_id: user_id.to_string(),
            name: "Zakaria Charouite".to_string(),
            email: email.to_string(),
            password: "zack123".to_string(),
            role: None,
        }
    }

    #[tokio::test]
    async fn register_then_authenticate() {
        let svc = service();
        let profile = svc.register(register_req("MB01", "zakaria@libria.com")).await.unwrap();
        assert_eq!(profile.role, Role::Member);

        let authed = svc
            .authenticate(LoginRequest {
                email: "zakaria@libria.com".to_string(),
                password: "zack123".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(authed.user_id, "MB01");
    }

    #[tokio::test]
    async fn duplicate_user_id_is_rejected() {
        let svc = service();
        svc.register(register_req("MB01", "a@libria.com")).await.unwrap();

        let err = svc
            .register(register_req("MB01", "b@libria.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UserAlreadyExists(_)));
        assert_eq!(svc.user_count().await, 1);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_case_insensitively() {
        let svc = service();
        svc.register(register_req("MB01", "a@libria.com")).await.unwrap();

        let err = svc
            .register(register_req("MB02", "A@LIBRIA.COM"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UserAlreadyExists(_)));
    }

    #[tokio::test]
    async fn authenticate_rejects_wrong_password() {
        let svc = service();
        svc.register(register_req("MB01", "a@libria.com")).await.unwrap();

        let err = svc
            .authenticate(LoginRequest {
                email: "a@libria.com".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Authentication(_)));
    }

    #[tokio::test]
    async fn authenticate_unknown_email_is_not_found() {
        let svc = service();
        let err = svc
            .authenticate(LoginRequest {
                email: "ghost@libria.com".to_string(),
                password: "pw1234".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UserNotFound(_)));
    }

    #[tokio::test]
    async fn profile_update_checks_email_uniqueness_on_change() {
        let svc = service();
        svc.register(register_req("MB01", "a@libria.com")).await.unwrap();
        svc.register(register_req("MB02", "b@libria.com")).await.unwrap();

        let err = svc
            .update_profile(
                "MB02",
                UpdateProfile {
                    email: Some("A@libria.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UserAlreadyExists(_)));

        // Re-submitting one's own email is not a conflict.
        let profile = svc
            .update_profile(
                "MB01",
                UpdateProfile {
                    name: Some("Renamed".to_string()),
                    email: Some("a@libria.com".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(profile.name, "Renamed");
    }

    #[tokio::test]
    async fn change_password_takes_effect() {
        let svc = service();
        svc.register(register_req("MB01", "a@libria.com")).await.unwrap();

        svc.change_password(
            "MB01",
            ChangePassword {
                new_password: "fresh-secret".to_string(),
            },
        )
        .await
        .unwrap();

        let err = svc
            .authenticate(LoginRequest {
                email: "a@libria.com".to_string(),
                password: "zack123".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Authentication(_)));

        assert!(svc
            .authenticate(LoginRequest {
                email: "a@libria.com".to_string(),
                password: "fresh-secret".to_string(),
            })
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn delete_user_removes_the_account() {
        let svc = service();
        svc.register(register_req("MB01", "a@libria.com")).await.unwrap();
        svc.delete_user("MB01").await.unwrap();

        let err = svc.get_profile("MB01").await.unwrap_err();
        assert!(matches!(err, AppError::UserNotFound(_)));
    }
}
