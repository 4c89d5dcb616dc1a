use serde::{Deserialize, Serialize};

/// Request body for user registration. Missing fields default to empty
/// strings and are rejected by validation rather than by the JSON layer.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Response returned after successful registration.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
}

/// Response returned after successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_response_shape() {
        let json = serde_json::to_string(&RegisterResponse { success: true }).unwrap();
        assert_eq!(json, r#"{"success":true}"#);
    }

    #[test]
    fn login_response_shape() {
        let json = serde_json::to_string(&LoginResponse {
            token: "abc".into(),
        })
        .unwrap();
        assert_eq!(json, r#"{"token":"abc"}"#);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let req: RegisterRequest = serde_json::from_str("{}").unwrap();
        assert!(req.email.is_empty());
        assert!(req.password.is_empty());
    }
}
