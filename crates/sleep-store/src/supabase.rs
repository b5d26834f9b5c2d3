//! Blocking client for a Supabase project: auth admin API and PostgREST.

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use serde_json::json;
use sleep_model::SleepRecord;
use tracing::{debug, info};

use crate::error::{Result, StoreError};
use crate::model::{RecordStore, User, UserId, UserStore};

/// User agent string for store requests.
const USER_AGENT_VALUE: &str = concat!("sleep-diary/", env!("CARGO_PKG_VERSION"));

/// Users requested per page when listing.
pub const USERS_PER_PAGE: usize = 50;

/// Auth error codes meaning the email is already registered.
const EXISTING_USER_CODES: [&str; 2] = ["email_exists", "user_already_exists"];

#[derive(Debug, Deserialize)]
struct UserPage {
    #[serde(default)]
    users: Vec<User>,
}

#[derive(Debug, Default, Deserialize)]
struct AuthErrorBody {
    #[serde(default)]
    error_code: Option<String>,
}

/// Client for the auth admin and REST endpoints of one project.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    client: Client,
    base_url: String,
}

impl SupabaseClient {
    /// Creates a client authenticating with the project's service key.
    pub fn new(base_url: impl Into<String>, service_key: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert("apikey", header_value(service_key)?);
        headers.insert(AUTHORIZATION, header_value(&format!("Bearer {service_key}"))?);

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| StoreError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/admin/{path}", self.base_url)
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    fn users_page_url(&self, page: usize) -> String {
        format!(
            "{}?page={page}&per_page={USERS_PER_PAGE}",
            self.auth_url("users")
        )
    }

    fn upsert_url(&self, table: &str, conflict_keys: &[&str]) -> String {
        format!(
            "{}?on_conflict={}",
            self.rest_url(table),
            conflict_keys.join(",")
        )
    }

    fn list_page(&self, page: usize) -> Result<Vec<User>> {
        let response = send(self.client.get(self.users_page_url(page)))?;
        let page: UserPage = decode(check(response)?)?;
        Ok(page.users)
    }
}

fn header_value(text: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(text)
        .map_err(|_| StoreError::Client("service key is not a valid header value".to_string()))
}

fn send(request: reqwest::blocking::RequestBuilder) -> Result<Response> {
    request
        .send()
        .map_err(|e| StoreError::Network(e.to_string()))
}

/// Turn a non-success response into [`StoreError::Http`].
fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(StoreError::Http {
        status: status.as_u16(),
        body,
    })
}

fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
    response
        .json()
        .map_err(|e| StoreError::Decode(e.to_string()))
}

/// Whether an auth error response reports an existing user.
fn is_existing_user(status: StatusCode, body: &str) -> bool {
    if status != StatusCode::UNPROCESSABLE_ENTITY {
        return false;
    }
    serde_json::from_str::<AuthErrorBody>(body)
        .unwrap_or_default()
        .error_code
        .is_some_and(|code| EXISTING_USER_CODES.contains(&code.as_str()))
}

/// Request 1-based pages until one comes back shorter than `per_page`.
fn collect_pages<T>(
    per_page: usize,
    mut fetch: impl FnMut(usize) -> Result<Vec<T>>,
) -> Result<(Vec<T>, usize)> {
    let mut items = Vec::new();
    let mut page = 1;
    loop {
        let batch = fetch(page)?;
        let short = batch.len() < per_page;
        items.extend(batch);
        if short {
            return Ok((items, page));
        }
        page += 1;
    }
}

/// Parse the total from a `Content-Range` header such as `0-24/312` or `*/0`.
fn content_range_total(header: &str) -> Option<usize> {
    header.rsplit_once('/')?.1.trim().parse().ok()
}

impl UserStore for SupabaseClient {
    fn create_user(&self, email: &str, password: &str) -> Result<User> {
        debug!("creating user");
        let response = send(self.client.post(self.auth_url("users")).json(&json!({
            "email": email,
            "password": password,
            "email_confirm": true,
        })))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            if is_existing_user(status, &body) {
                return Err(StoreError::Conflict {
                    email: email.to_string(),
                });
            }
            return Err(StoreError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let user: User = decode(response)?;
        info!(user_id = %user.id, "user created");
        Ok(user)
    }

    fn list_users(&self) -> Result<Vec<User>> {
        let (users, pages) = collect_pages(USERS_PER_PAGE, |page| self.list_page(page))?;
        debug!(users = users.len(), pages, "users listed");
        Ok(users)
    }

    fn update_user_email(&self, id: &UserId, email: &str) -> Result<User> {
        let url = self.auth_url(&format!("users/{id}"));
        let response = send(self.client.put(&url).json(&json!({
            "email": email,
            "email_confirm": true,
        })))?;
        let user: User = decode(check(response)?)?;
        info!(user_id = %user.id, "user email updated");
        Ok(user)
    }
}

impl RecordStore for SupabaseClient {
    fn upsert(
        &self,
        table: &str,
        records: &[SleepRecord],
        conflict_keys: &[&str],
    ) -> Result<usize> {
        let response = send(
            self.client
                .post(self.upsert_url(table, conflict_keys))
                .header("Prefer", "resolution=merge-duplicates,return=minimal")
                .json(records),
        )?;
        check(response)?;
        debug!(table, records = records.len(), "records upserted");
        Ok(records.len())
    }

    fn count_for_user(&self, table: &str, user_id: &UserId) -> Result<usize> {
        let url = format!(
            "{}?select=user_id&user_id=eq.{user_id}&limit=1",
            self.rest_url(table)
        );
        let response = check(send(
            self.client.get(&url).header("Prefer", "count=exact"),
        )?)?;

        response
            .headers()
            .get("content-range")
            .and_then(|value| value.to_str().ok())
            .and_then(content_range_total)
            .ok_or_else(|| StoreError::Decode("missing or malformed Content-Range".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = SupabaseClient::new("https://project.supabase.co/", "service-key").unwrap();
        assert_eq!(
            client.auth_url("users"),
            "https://project.supabase.co/auth/v1/admin/users"
        );
        assert_eq!(
            client.rest_url("sleep_records"),
            "https://project.supabase.co/rest/v1/sleep_records"
        );
    }

    #[test]
    fn request_urls_carry_paging_and_conflict_keys() {
        let client = SupabaseClient::new("https://project.supabase.co", "service-key").unwrap();
        assert_eq!(
            client.users_page_url(3),
            "https://project.supabase.co/auth/v1/admin/users?page=3&per_page=50"
        );
        assert_eq!(
            client.upsert_url("sleep_records", &["user_id", "date"]),
            "https://project.supabase.co/rest/v1/sleep_records?on_conflict=user_id,date"
        );
    }

    #[test]
    fn paging_stops_at_first_short_page() {
        let mut requested = Vec::new();
        let (items, pages) = collect_pages(2, |page| {
            requested.push(page);
            Ok(match page {
                1 | 2 => vec![page * 10, page * 10 + 1],
                3 => vec![30],
                _ => vec![99],
            })
        })
        .unwrap();

        assert_eq!(items, vec![10, 11, 20, 21, 30]);
        assert_eq!(pages, 3);
        assert_eq!(requested, vec![1, 2, 3]);
    }

    #[test]
    fn paging_ends_on_empty_page_and_propagates_errors() {
        let (items, pages) = collect_pages(2, |page| {
            Ok(if page == 1 { vec![1, 2] } else { Vec::new() })
        })
        .unwrap();
        assert_eq!((items, pages), (vec![1, 2], 2));

        let failed = collect_pages::<u8>(2, |_| Err(StoreError::Network("down".to_string())));
        assert!(matches!(failed, Err(StoreError::Network(_))));
    }

    #[test]
    fn invalid_key_is_rejected() {
        assert!(matches!(
            SupabaseClient::new("https://x", "bad\nkey"),
            Err(StoreError::Client(_))
        ));
    }

    #[test]
    fn existing_user_is_detected_by_code() {
        let body = r#"{"code":422,"error_code":"email_exists","msg":"A user with this email address has already been registered"}"#;
        assert!(is_existing_user(StatusCode::UNPROCESSABLE_ENTITY, body));
        assert!(!is_existing_user(StatusCode::BAD_REQUEST, body));

        let weak_password = r#"{"code":422,"error_code":"weak_password","msg":"already registered"}"#;
        assert!(!is_existing_user(StatusCode::UNPROCESSABLE_ENTITY, weak_password));
        assert!(!is_existing_user(StatusCode::UNPROCESSABLE_ENTITY, "not json"));
    }

    #[test]
    fn content_range_totals() {
        assert_eq!(content_range_total("0-0/312"), Some(312));
        assert_eq!(content_range_total("*/0"), Some(0));
        assert_eq!(content_range_total("0-0/*"), None);
        assert_eq!(content_range_total("garbage"), None);
    }
}
