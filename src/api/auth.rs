use super::client::ApiClient;
use super::error::{ApiError, ApiResult};
use crate::schemas::{
    AuthApiResponse, LoginCredentials, MessageResponse, SignupCredentials, Workspace,
};
use serde::Deserialize;
use serde_json::json;

const AUTH_BASE: &str = "/auth";
const MIN_PASSWORD_LEN: usize = 8;
const MAX_NAME_LEN: usize = 100;

pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

#[derive(Deserialize)]
struct WorkspacesBody {
    #[serde(default)]
    workspaces: Option<Vec<Workspace>>,
}

impl<'a> AuthApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn login(&self, credentials: &LoginCredentials) -> ApiResult<AuthApiResponse> {
        validate_email(&credentials.email)?;
        if credentials.password.is_empty() {
            return Err(ApiError::validation("password", "Password required"));
        }
        self.client
            .post(&format!("{AUTH_BASE}/login"), Some(credentials))
    }

    pub fn signup(&self, credentials: &SignupCredentials) -> ApiResult<AuthApiResponse> {
        validate_email(&credentials.email)?;
        validate_password(&credentials.password)?;
        validate_workspace_name(&credentials.workspace)?;
        if credentials
            .name
            .as_deref()
            .is_some_and(|name| name.chars().count() > MAX_NAME_LEN)
        {
            return Err(ApiError::validation("name", "Name too long"));
        }
        self.client
            .post(&format!("{AUTH_BASE}/signup"), Some(credentials))
    }

    /// Server-side logout. Callers clear the local session regardless of
    /// the outcome.
    pub fn logout(&self) -> ApiResult<()> {
        let _: serde_json::Value = self
            .client
            .post::<(), _>(&format!("{AUTH_BASE}/logout"), None)?;
        Ok(())
    }

    pub fn forgot_password(&self, email: &str) -> ApiResult<String> {
        validate_email(email)?;
        let res: MessageResponse = self.client.post(
            &format!("{AUTH_BASE}/forgot-password"),
            Some(&json!({ "email": email })),
        )?;
        Ok(res.message)
    }

    /// Sets a new password with the token from a reset link.
    pub fn reset_password(&self, token: &str, password: &str) -> ApiResult<String> {
        if token.trim().is_empty() {
            return Err(ApiError::validation(
                "token",
                "Reset link is invalid or expired",
            ));
        }
        validate_password(password)?;
        let res: MessageResponse = self.client.post(
            &format!("{AUTH_BASE}/reset-password"),
            Some(&json!({ "token": token, "password": password })),
        )?;
        Ok(res.message)
    }

    pub fn resend_verification(&self, email: &str) -> ApiResult<String> {
        validate_email(email)?;
        let res: MessageResponse = self.client.post(
            &format!("{AUTH_BASE}/resend-verification"),
            Some(&json!({ "email": email })),
        )?;
        Ok(res.message)
    }

    pub fn workspaces(&self) -> ApiResult<Vec<Workspace>> {
        let body: WorkspacesBody = self.client.get(&format!("{AUTH_BASE}/workspaces"), &[])?;
        Ok(body.workspaces.unwrap_or_default())
    }
}

pub fn validate_email(email: &str) -> ApiResult<()> {
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ApiError::validation("email", "Invalid email"))
    }
}

/// At least 8 characters with one letter and one digit.
pub fn validate_password(password: &str) -> ApiResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::validation("password", "At least 8 characters"));
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(ApiError::validation("password", "At least one letter"));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(ApiError::validation("password", "At least one number"));
    }
    Ok(())
}

pub fn validate_workspace_name(name: &str) -> ApiResult<()> {
    let len = name.trim().chars().count();
    if len == 0 {
        Err(ApiError::validation("workspace", "Workspace name required"))
    } else if len > MAX_NAME_LEN {
        Err(ApiError::validation("workspace", "Workspace name too long"))
    } else {
        Ok(())
    }
}

/// Label and score (0-4) describing how strong a password looks.
pub fn password_strength(password: &str) -> (&'static str, u8) {
    if password.is_empty() {
        return ("", 0);
    }
    let len = password.chars().count();
    let mut score = 0u8;
    if len >= 8 {
        score += 1;
    }
    if len >= 12 {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
    {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 1;
    }
    if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        score += 1;
    }
    let score = score.min(4);
    let label = ["", "Weak", "Fair", "Good", "Strong"][score as usize];
    (label, score)
}
