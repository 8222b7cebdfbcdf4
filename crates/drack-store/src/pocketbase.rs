//! PocketBase-backed record store.

use crate::error::{StoreError, StoreResult};
use crate::inventory::{decode_inventory, encode_inventory};
use crate::model::{BalanceUpdate, UserBalance};
use crate::traits::RecordStore;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use drack_common::UserId;
use drack_config::RecordStoreConfig;
use reqwest::{header::AUTHORIZATION, Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Page size used when walking the whole collection.
const FULL_LIST_PAGE_SIZE: usize = 200;

/// Largest page PocketBase serves.
const MAX_PAGE_SIZE: usize = 500;

#[derive(Debug, Deserialize)]
struct AuthResponse {
    token: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordList {
    page: usize,
    total_pages: usize,
    #[serde(default)]
    items: Vec<BalanceRecord>,
}

/// A balance row as PocketBase returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BalanceRecord {
    id: String,
    user_id: String,
    #[serde(default)]
    coins: i64,
    #[serde(default)]
    gems: i64,
    #[serde(default)]
    last_daily: Option<i64>,
    #[serde(default)]
    last_weekly: Option<i64>,
    #[serde(default)]
    last_work: Option<i64>,
    #[serde(default)]
    inventory: Value,
}

/// Timestamps are stored as epoch milliseconds, 0 meaning never.
fn from_millis(millis: Option<i64>) -> Option<DateTime<Utc>> {
    millis
        .filter(|&ms| ms > 0)
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
}

impl BalanceRecord {
    fn into_balance(self) -> StoreResult<UserBalance> {
        let user_id = self.user_id.parse::<UserId>().map_err(|e| StoreError::Decode {
            record: self.id.clone(),
            reason: format!("userId '{}': {e}", self.user_id),
        })?;

        Ok(UserBalance {
            user_id,
            coins: self.coins,
            gems: self.gems,
            last_daily: from_millis(self.last_daily),
            last_weekly: from_millis(self.last_weekly),
            last_work: from_millis(self.last_work),
            inventory: decode_inventory(&self.inventory),
        })
    }
}

/// Body of a PATCH request for a partial update.
fn update_body(update: &BalanceUpdate) -> Value {
    let mut body = Map::new();
    if let Some(coins) = update.coins {
        body.insert("coins".into(), json!(coins));
    }
    if let Some(gems) = update.gems {
        body.insert("gems".into(), json!(gems));
    }
    if let Some(at) = update.last_daily {
        body.insert("lastDaily".into(), json!(at.timestamp_millis()));
    }
    if let Some(at) = update.last_weekly {
        body.insert("lastWeekly".into(), json!(at.timestamp_millis()));
    }
    if let Some(at) = update.last_work {
        body.insert("lastWork".into(), json!(at.timestamp_millis()));
    }
    if let Some(inventory) = &update.inventory {
        body.insert("inventory".into(), json!(encode_inventory(inventory)));
    }
    Value::Object(body)
}

/// Body of a POST request creating an empty record.
fn create_body(user: UserId) -> Value {
    json!({
        "userId": user.to_string(),
        "coins": 0,
        "gems": 0,
        "lastDaily": 0,
        "lastWeekly": 0,
        "lastWork": 0,
        "inventory": "[]",
    })
}

/// PocketBase filter selecting one user's record.
fn user_filter(user: UserId) -> String {
    let value = user.to_string().replace('\\', "\\\\").replace('"', "\\\"");
    format!("userId = \"{value}\"")
}

/// Decodes a list page, dropping rows that cannot be read.
fn decode_rows(items: Vec<BalanceRecord>) -> Vec<UserBalance> {
    items
        .into_iter()
        .filter_map(|record| match record.into_balance() {
            Ok(balance) => Some(balance),
            Err(e) => {
                warn!("Skipping record: {}", e);
                None
            }
        })
        .collect()
}

/// Record store speaking the PocketBase REST API as a superuser.
pub struct PocketBaseStore {
    client: Client,
    base_url: String,
    collection: String,
    admin_email: String,
    admin_password: String,
    token: RwLock<Option<String>>,
}

impl std::fmt::Debug for PocketBaseStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PocketBaseStore")
            .field("base_url", &self.base_url)
            .field("collection", &self.collection)
            .finish_non_exhaustive()
    }
}

impl PocketBaseStore {
    /// Creates a client without contacting the server.
    pub fn new(config: &RecordStoreConfig) -> StoreResult<Self> {
        let base = Url::parse(&config.url)?;
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            base_url: base.as_str().trim_end_matches('/').to_string(),
            collection: config.collection.clone(),
            admin_email: config.admin_email.clone(),
            admin_password: config.admin_password.clone(),
            token: RwLock::new(None),
        })
    }

    /// Creates a client and authenticates.
    pub async fn connect(config: &RecordStoreConfig) -> StoreResult<Self> {
        let store = Self::new(config)?;
        store.authenticate().await?;
        info!(url = %store.base_url, collection = %store.collection, "Connected to PocketBase");
        Ok(store)
    }

    /// Collection this store reads and writes.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    fn records_url(&self) -> String {
        format!("{}/api/collections/{}/records", self.base_url, self.collection)
    }

    fn record_url(&self, record_id: &str) -> String {
        format!("{}/{record_id}", self.records_url())
    }

    /// Obtains a fresh superuser token.
    pub async fn authenticate(&self) -> StoreResult<()> {
        let url = format!(
            "{}/api/collections/_superusers/auth-with-password",
            self.base_url
        );
        let response = self
            .client
            .post(url)
            .json(&json!({
                "identity": self.admin_email,
                "password": self.admin_password,
            }))
            .send()
            .await?;

        let response = match Self::check(response).await {
            Ok(response) => response,
            Err(StoreError::Status { status, message }) => {
                return Err(StoreError::Auth(format!("{status}: {message}")));
            }
            Err(e) => return Err(e),
        };
        let auth: AuthResponse = response.json().await?;
        *self.token.write().await = Some(auth.token);
        debug!("Authenticated with PocketBase");
        Ok(())
    }

    async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token.read().await.as_deref() {
            Some(token) => request.header(AUTHORIZATION, token),
            None => request,
        }
    }

    /// Turns a non-success response into [`StoreError::Status`].
    async fn check(response: Response) -> StoreResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.message)
            .ok()
            .filter(|message| !message.is_empty())
            .unwrap_or(text);
        Err(StoreError::Status {
            status: status.as_u16(),
            message,
        })
    }

    /// Sends an authorized request, re-authenticating once on 401.
    async fn send<F>(&self, build: F) -> StoreResult<Response>
    where
        F: Fn(&Client) -> RequestBuilder + Send + Sync,
    {
        let response = self.authorize(build(&self.client)).await.send().await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Self::check(response).await;
        }

        warn!("PocketBase token rejected, re-authenticating");
        self.authenticate().await?;
        let response = self.authorize(build(&self.client)).await.send().await?;
        Self::check(response).await
    }

    async fn list(&self, query: &[(&str, String)]) -> StoreResult<RecordList> {
        let url = self.records_url();
        let response = self.send(|client| client.get(&url).query(query)).await?;
        Ok(response.json().await?)
    }

    async fn find_record(&self, user: UserId) -> StoreResult<Option<BalanceRecord>> {
        let list = self
            .list(&[
                ("page", "1".to_string()),
                ("perPage", "1".to_string()),
                ("filter", user_filter(user)),
            ])
            .await?;
        Ok(list.items.into_iter().next())
    }

    async fn create_record(&self, user: UserId) -> StoreResult<BalanceRecord> {
        let url = self.records_url();
        let body = create_body(user);
        let response = self.send(|client| client.post(&url).json(&body)).await?;
        debug!(user = %user, "Created balance record");
        Ok(response.json().await?)
    }

    async fn find_or_create(&self, user: UserId) -> StoreResult<BalanceRecord> {
        match self.find_record(user).await? {
            Some(record) => Ok(record),
            None => self.create_record(user).await,
        }
    }
}

#[async_trait]
impl RecordStore for PocketBaseStore {
    #[instrument(skip(self), fields(user = %user))]
    async fn get_balance(&self, user: UserId) -> StoreResult<UserBalance> {
        self.find_or_create(user).await?.into_balance()
    }

    #[instrument(skip(self, update), fields(user = %user))]
    async fn update_balance(&self, user: UserId, update: BalanceUpdate) -> StoreResult<UserBalance> {
        let record = self.find_or_create(user).await?;
        if update.is_empty() {
            return record.into_balance();
        }

        let url = self.record_url(&record.id);
        let body = update_body(&update);
        let response = self.send(|client| client.patch(&url).json(&body)).await?;
        let updated: BalanceRecord = response.json().await?;
        updated.into_balance()
    }

    async fn get_top_users(&self, limit: usize) -> StoreResult<Vec<UserBalance>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let list = self
            .list(&[
                ("page", "1".to_string()),
                ("perPage", limit.min(MAX_PAGE_SIZE).to_string()),
                ("sort", "-coins".to_string()),
            ])
            .await?;
        Ok(decode_rows(list.items))
    }

    async fn get_all_balances(&self) -> StoreResult<Vec<UserBalance>> {
        let mut balances = Vec::new();
        let mut page = 1;

        loop {
            let list = self
                .list(&[
                    ("page", page.to_string()),
                    ("perPage", FULL_LIST_PAGE_SIZE.to_string()),
                    ("sort", "-coins".to_string()),
                ])
                .await?;
            let last = list.page >= list.total_pages || list.items.is_empty();
            balances.extend(decode_rows(list.items));
            if last {
                break;
            }
            page += 1;
        }

        Ok(balances)
    }

    async fn health_check(&self) -> bool {
        let url = format!("{}/api/health", self.base_url);
        match self.client.get(url).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                warn!(status = %response.status(), "PocketBase health check failed");
                false
            }
            Err(e) => {
                warn!("PocketBase health check failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InventoryItem, ItemType};

    fn config(url: &str) -> RecordStoreConfig {
        RecordStoreConfig {
            url: url.to_string(),
            admin_email: "admin@example.com".to_string(),
            admin_password: "secret".to_string(),
            collection: "dk_user_balances".to_string(),
            timeout_seconds: 5,
        }
    }

    #[test]
    fn test_record_decoding() {
        let record: BalanceRecord = serde_json::from_value(json!({
            "id": "abc123",
            "userId": "987654321098765432",
            "coins": 250,
            "gems": 7,
            "lastDaily": 1_704_196_800_000_i64,
            "lastWeekly": 0,
            "inventory": "[{\"id\":\"sword\",\"name\":\"Sword\",\"quantity\":1,\"type\":\"weapon\"}]",
        }))
        .unwrap();

        let balance = record.into_balance().unwrap();
        assert_eq!(balance.user_id, UserId(987_654_321_098_765_432));
        assert_eq!(balance.coins, 250);
        assert_eq!(balance.last_daily.unwrap().timestamp_millis(), 1_704_196_800_000);
        assert!(balance.last_weekly.is_none());
        assert!(balance.last_work.is_none());
        assert_eq!(balance.inventory, vec![InventoryItem::new("sword", "Sword", 1, ItemType::Weapon)]);
    }

    #[test]
    fn test_record_with_bad_user_id_is_rejected() {
        let record: BalanceRecord =
            serde_json::from_value(json!({"id": "r1", "userId": "nobody"})).unwrap();
        let err = record.into_balance().unwrap_err();
        assert!(matches!(err, StoreError::Decode { ref record, .. } if record == "r1"));
    }

    #[test]
    fn test_update_body_only_carries_set_fields() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let body = update_body(&BalanceUpdate::default().coins(150).last_work(at));
        assert_eq!(body, json!({"coins": 150, "lastWork": 1_700_000_000_000_i64}));

        let body = update_body(&BalanceUpdate::default().inventory(Vec::new()));
        assert_eq!(body, json!({"inventory": "[]"}));
    }

    #[test]
    fn test_create_body_is_empty_record() {
        let body = create_body(UserId(42));
        assert_eq!(body["userId"], "42");
        assert_eq!(body["coins"], 0);
        assert_eq!(body["inventory"], "[]");
    }

    #[test]
    fn test_user_filter() {
        assert_eq!(user_filter(UserId(42)), r#"userId = "42""#);
    }

    #[test]
    fn test_urls() {
        let store = PocketBaseStore::new(&config("http://localhost:8090/")).unwrap();
        assert_eq!(
            store.records_url(),
            "http://localhost:8090/api/collections/dk_user_balances/records"
        );
        assert_eq!(
            store.record_url("abc"),
            "http://localhost:8090/api/collections/dk_user_balances/records/abc"
        );
        assert_eq!(store.collection(), "dk_user_balances");
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        assert!(matches!(
            PocketBaseStore::new(&config("not a url")),
            Err(StoreError::Url(_))
        ));
    }
}
