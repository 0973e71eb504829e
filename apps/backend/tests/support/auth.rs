use std::time::{Duration, SystemTime};

use actix_web::http::header::{HeaderName, HeaderValue, AUTHORIZATION};
use games_backend::auth::jwt::mint_access_token;
use games_backend::state::security_config::SecurityConfig;

pub const TEST_SECRET: &[u8] = b"integration-test-secret-0123456789abcdef";

pub fn security() -> SecurityConfig {
    SecurityConfig::new(TEST_SECRET)
}

pub fn token_for(sub: &str) -> String {
    mint_access_token(
        sub,
        &format!("{sub}@example.test"),
        SystemTime::now(),
        &security(),
    )
    .expect("mint test token")
}

pub fn expired_token_for(sub: &str) -> String {
    let security = security();
    let issued =
        SystemTime::now() - Duration::from_secs(security.token_ttl_secs as u64 + 60);
    mint_access_token(sub, &format!("{sub}@example.test"), issued, &security)
        .expect("mint expired test token")
}

/// `Authorization: Bearer <token>` for `sub`.
pub fn bearer(sub: &str) -> (HeaderName, HeaderValue) {
    let value = format!("Bearer {}", token_for(sub));
    (
        AUTHORIZATION,
        HeaderValue::from_str(&value).expect("valid header value"),
    )
}
