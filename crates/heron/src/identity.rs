use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalized user record consumed by the dashboard shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub image_url: String,
}

/// Normalize a sign-in callback into a user record.
///
/// The identity provider has shipped three response shapes over time: a JWT
/// `credential`, a `profileObj` record, and a flat profile record. All three
/// are accepted; anything else normalizes to nothing.
pub fn normalize_login(response: &Value) -> Option<UserProfile> {
    if let Some(credential) = response.get("credential").and_then(Value::as_str) {
        return decode_credential(credential);
    }
    if let Some(profile) = response.get("profileObj") {
        return profile_from_fields(profile);
    }
    if response.get("name").is_some() {
        return profile_from_fields(response);
    }

    tracing::warn!("unexpected sign-in response shape");
    None
}

/// Pull the profile claims out of the JWT payload segment. The signature is
/// not checked here; the token was already accepted by the provider widget.
fn decode_credential(credential: &str) -> Option<UserProfile> {
    let payload = credential.split('.').nth(1)?;
    let raw = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let claims: Value = serde_json::from_slice(&raw).ok()?;

    Some(UserProfile {
        name: claims.get("name")?.as_str()?.to_string(),
        email: claims.get("email")?.as_str()?.to_string(),
        image_url: claims.get("picture")?.as_str()?.to_string(),
    })
}

fn profile_from_fields(value: &Value) -> Option<UserProfile> {
    Some(UserProfile {
        name: value.get("name")?.as_str()?.to_string(),
        email: value.get("email")?.as_str()?.to_string(),
        image_url: value.get("imageUrl")?.as_str()?.to_string(),
    })
}
