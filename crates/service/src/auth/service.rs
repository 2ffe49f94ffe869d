use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use tracing::{debug, info, instrument, warn};

use super::domain::{AuthSession, Claims, LoginInput};
use super::errors::AuthError;
use crate::employee::{Employee, EmployeeRepository};
use crate::password;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>, token_ttl_hours: i64) -> Self {
        Self { jwt_secret: jwt_secret.into(), token_ttl: Duration::hours(token_ttl_hours) }
    }
}

/// Auth business service independent of web framework
pub struct AuthService<R: EmployeeRepository + ?Sized> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

impl<R: EmployeeRepository + ?Sized> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self { Self { repo, cfg } }

    /// Authenticate by email and password and issue a bearer token.
    ///
    /// Unknown email and wrong password both yield [`AuthError::Unauthorized`].
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        if input.email.trim().is_empty() || input.password.is_empty() {
            return Err(AuthError::Validation("email and password are required".into()));
        }
        let Some(creds) = self.repo.get_credentials(input.email.trim()).await? else {
            debug!("login for unknown email");
            return Err(AuthError::Unauthorized);
        };
        if !password::verify_password(&input.password, &creds.password_hash)? {
            warn!(employee_id = %creds.employee.id, "login_failed");
            return Err(AuthError::Unauthorized);
        }

        let (token, claims) = self.issue_token(&creds.employee)?;
        info!(employee_id = %creds.employee.id, role = %creds.employee.role, "login_succeeded");
        let expires_at = chrono::DateTime::from_timestamp(claims.exp, 0).unwrap_or_else(Utc::now);
        Ok(AuthSession { token, expires_at, employee: creds.employee })
    }

    /// Sign an HS256 token for `employee`.
    pub fn issue_token(&self, employee: &Employee) -> Result<(String, Claims), AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: employee.id,
            email: employee.email.clone(),
            role: employee.role,
            iat: now.timestamp(),
            exp: (now + self.cfg.token_ttl).timestamp(),
        };
        let token = encode(&JwtHeader::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(self.cfg.jwt_secret.as_bytes()))
            .map_err(|e| AuthError::TokenError(e.to_string()))?;
        Ok((token, claims))
    }

    /// Check signature and expiry and return the claims.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let key = DecodingKey::from_secret(self.cfg.jwt_secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        decode::<Claims>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(err = %e, "token rejected");
                AuthError::Unauthorized
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employee::repository::mock::MockEmployeeRepository;
    use crate::employee::{EmployeeService, NewEmployee};
    use crate::test_support::profile;
    use models::Role;

    fn setup(secret: &str, ttl_hours: i64) -> (AuthService<MockEmployeeRepository>, EmployeeService<MockEmployeeRepository>) {
        let repo = Arc::new(MockEmployeeRepository::default());
        (AuthService::new(repo.clone(), AuthConfig::new(secret, ttl_hours)), EmployeeService::new(repo))
    }

    #[tokio::test]
    async fn login_issues_verifiable_token() {
        let (auth, employees) = setup("secret", 1);
        let boss = employees
            .bootstrap_director(NewEmployee { profile: profile("boss", Role::Director), password: "Passw0rd!".into() })
            .await
            .unwrap()
            .unwrap();

        let session = auth
            .login(LoginInput { email: boss.email.to_uppercase(), password: "Passw0rd!".into() })
            .await
            .unwrap();
        assert_eq!(session.employee.id, boss.id);
        assert!(session.expires_at > Utc::now());

        let claims = auth.verify_token(&session.token).unwrap();
        assert_eq!(claims.actor().id, boss.id);
        assert_eq!(claims.role, Role::Director);

        let err = auth.login(LoginInput { email: boss.email.clone(), password: "wrong-pass".into() }).await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));
        let err = auth.login(LoginInput { email: "nobody@example.com".into(), password: "Passw0rd!".into() }).await.unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));
    }

    #[test]
    fn foreign_and_expired_tokens_rejected() {
        let (auth, _) = setup("secret", 1);
        let (other, _) = setup("another-secret", 1);
        let (expired, _) = setup("secret", -2);
        let e = crate::test_support::seed(&MockEmployeeRepository::default(), "x", Role::Leader, None);

        let (token, _) = other.issue_token(&e).unwrap();
        assert!(matches!(auth.verify_token(&token), Err(AuthError::Unauthorized)));
        let (token, _) = expired.issue_token(&e).unwrap();
        assert!(matches!(auth.verify_token(&token), Err(AuthError::Unauthorized)));
        assert!(auth.verify_token("not.a.jwt").is_err());
        let (token, claims) = auth.issue_token(&e).unwrap();
        assert_eq!(auth.verify_token(&token).unwrap(), claims);
    }

    #[tokio::test]
    async fn blank_login_is_validation_error() {
        let (auth, _) = setup("secret", 1);
        let err = auth.login(LoginInput { email: " ".into(), password: "".into() }).await.unwrap_err();
        assert_eq!(err.code(), 1001);
    }
}
