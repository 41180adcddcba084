use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Name of the session cookie carried by the browser
pub const TOKEN_COOKIE: &str = "token";

/// Fixed token lifetime; there is no server-side revocation, a token stays
/// cryptographically valid until this window closes
const TOKEN_LIFETIME_HOURS: i64 = 2;

// JWT claims embedded in the session cookie
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub iat: usize, // issued at
    pub exp: usize, // expiration
}

fn get_jwt_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|_| "default-secret-change-me".to_string())
}

fn is_production() -> bool {
    std::env::var("APP_ENV")
        .map(|v| v == "production")
        .unwrap_or(false)
}

/// Signs a session token embedding the caller's identity
pub fn generate_token(email: &str, name: Option<String>) -> Result<String, String> {
    let now = Utc::now();
    let iat = now.timestamp() as usize;
    let exp = (now + Duration::hours(TOKEN_LIFETIME_HOURS)).timestamp() as usize;

    let claims = Claims {
        email: email.to_string(),
        name,
        iat,
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(get_jwt_secret().as_ref()),
    )
    .map_err(|e| format!("Failed to generate token: {}", e))
}

/// Verifies signature and expiry, returning the embedded identity
pub fn verify_token(token: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(get_jwt_secret().as_ref()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| format!("Invalid token: {}", e))
}

/// Session cookie for a freshly issued token. Cross-site attributes are
/// toggled by APP_ENV: the hosted frontend needs SameSite=None + Secure,
/// local development wants Strict over plain HTTP.
pub fn session_cookie(token: String) -> Cookie<'static> {
    build_cookie(token, is_production())
}

/// Immediately-expiring variant used by logout
pub fn expired_session_cookie() -> Cookie<'static> {
    let mut cookie = build_cookie(String::new(), is_production());
    cookie.set_max_age(CookieDuration::ZERO);
    cookie
}

fn build_cookie(value: String, production: bool) -> Cookie<'static> {
    let (same_site, secure) = if production {
        (SameSite::None, true)
    } else {
        (SameSite::Strict, false)
    };

    Cookie::build(TOKEN_COOKIE, value)
        .path("/")
        .http_only(true)
        .same_site(same_site)
        .secure(secure)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trip_preserves_identity() {
        let token = generate_token("alice@example.com", Some("Alice".to_string())).unwrap();
        let claims = verify_token(&token).unwrap();
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.name.as_deref(), Some("Alice"));
        assert!(claims.exp > claims.iat);
        assert_eq!(
            claims.exp - claims.iat,
            (TOKEN_LIFETIME_HOURS * 3600) as usize
        );
    }

    #[test]
    fn tampered_token_is_rejected() {
        let token = generate_token("alice@example.com", None).unwrap();
        let mut tampered = token;
        tampered.push('x');
        assert!(verify_token(&tampered).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        // Sign a token whose exp is well past the default validation leeway
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            email: "alice@example.com".to_string(),
            name: None,
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(get_jwt_secret().as_ref()),
        )
        .unwrap();
        assert!(verify_token(&token).is_err());
    }

    #[test]
    fn development_cookie_is_strict_and_insecure() {
        let cookie = build_cookie("abc".to_string(), false);
        assert_eq!(cookie.name(), TOKEN_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.secure(), Some(false));
    }

    #[test]
    fn production_cookie_allows_cross_site() {
        let cookie = build_cookie("abc".to_string(), true);
        assert_eq!(cookie.same_site(), Some(SameSite::None));
        assert_eq!(cookie.secure(), Some(true));
    }

    #[test]
    fn logout_cookie_expires_immediately() {
        let cookie = expired_session_cookie();
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(CookieDuration::ZERO));
    }
}
