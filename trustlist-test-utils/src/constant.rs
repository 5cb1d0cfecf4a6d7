//! Placeholder ESI client configuration used by every test context. None of these are real
//! credentials.

pub static TEST_USER_AGENT: &str = "trustlist-test/1.0 (contact@example.com)";

pub static TEST_ESI_CLIENT_ID: &str = "esi_client_id";

pub static TEST_ESI_CLIENT_SECRET: &str = "esi_client_secret";

pub static TEST_CALLBACK_URL: &str = "http://localhost:8080/auth/callback";
