use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use futures::FutureExt;
use serde::Serialize;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Row;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// A stored contact-form submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    pub ip_address: String,
    pub user_agent: String,
}

/// Row data for a new submission; the store assigns id and timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub ip_address: String,
    pub user_agent: String,
}

/// Insert-only message storage used by the contact endpoint
pub trait MessageStore: Send + Sync {
    fn insert(&self, message: NewContactMessage) -> BoxFuture<'_, Result<ContactMessage>>;

    /// Cheap reachability check for the health endpoint
    fn ping(&self) -> BoxFuture<'_, Result<()>> {
        async { Ok(()) }.boxed()
    }
}

// ==================== PostgreSQL ====================

#[derive(Clone)]
pub struct PgMessageStore {
    pool: PgPool,
}

impl PgMessageStore {
    /// Connect and make sure the messages table exists
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await
            .context("Failed to connect to database")?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS contact_messages (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                phone TEXT,
                subject TEXT,
                message TEXT NOT NULL,
                read BOOLEAN NOT NULL DEFAULT FALSE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                ip_address TEXT NOT NULL,
                user_agent TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await
        .context("Failed to create contact_messages table")?;

        Ok(Self { pool })
    }
}

impl MessageStore for PgMessageStore {
    fn insert(&self, message: NewContactMessage) -> BoxFuture<'_, Result<ContactMessage>> {
        async move {
            let row = sqlx::query(
                "INSERT INTO contact_messages
                    (name, email, phone, subject, message, read, ip_address, user_agent)
                 VALUES ($1, $2, $3, $4, $5, FALSE, $6, $7)
                 RETURNING id, created_at",
            )
            .bind(&message.name)
            .bind(&message.email)
            .bind(&message.phone)
            .bind(&message.subject)
            .bind(&message.message)
            .bind(&message.ip_address)
            .bind(&message.user_agent)
            .fetch_one(&self.pool)
            .await
            .context("Failed to insert contact message")?;

            let id: i64 = row.try_get("id")?;
            let created_at: DateTime<Utc> = row.try_get("created_at")?;

            Ok(stored(id, created_at, message))
        }
        .boxed()
    }

    fn ping(&self) -> BoxFuture<'_, Result<()>> {
        async move {
            sqlx::query("SELECT 1")
                .execute(&self.pool)
                .await
                .context("Database ping failed")?;
            Ok(())
        }
        .boxed()
    }
}

// ==================== In-memory ====================

/// Process-local store for tests and local development
#[derive(Default)]
pub struct MemoryMessageStore {
    messages: Mutex<Vec<ContactMessage>>,
    next_id: AtomicI64,
    fail: AtomicBool,
}

impl MemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose inserts and pings always fail
    pub fn failing() -> Self {
        let store = Self::default();
        store.fail.store(true, Ordering::SeqCst);
        store
    }

    pub fn messages(&self) -> Vec<ContactMessage> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }
}

impl MessageStore for MemoryMessageStore {
    fn insert(&self, message: NewContactMessage) -> BoxFuture<'_, Result<ContactMessage>> {
        async move {
            if self.fail.load(Ordering::SeqCst) {
                anyhow::bail!("relation \"contact_messages\" does not exist");
            }

            let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            let row = stored(id, Utc::now(), message);

            self.messages
                .lock()
                .map_err(|_| anyhow::anyhow!("message store lock poisoned"))?
                .push(row.clone());
            Ok(row)
        }
        .boxed()
    }

    fn ping(&self) -> BoxFuture<'_, Result<()>> {
        async move {
            if self.fail.load(Ordering::SeqCst) {
                anyhow::bail!("message store unavailable");
            }
            Ok(())
        }
        .boxed()
    }
}

fn stored(id: i64, created_at: DateTime<Utc>, message: NewContactMessage) -> ContactMessage {
    ContactMessage {
        id,
        name: message.name,
        email: message.email,
        phone: message.phone,
        subject: message.subject,
        message: message.message,
        read: false,
        created_at,
        ip_address: message.ip_address,
        user_agent: message.user_agent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    fn new_message(name: &str) -> NewContactMessage {
        NewContactMessage {
            name: name.to_string(),
            email: "guest@example.com".to_string(),
            phone: None,
            subject: Some("Dinner".to_string()),
            message: "Are you open on Sundays?".to_string(),
            ip_address: "203.0.113.9".to_string(),
            user_agent: "test-agent".to_string(),
        }
    }

    // ==================== MemoryMessageStore Tests ====================

    #[tokio::test]
    async fn test_memory_store_assigns_ids_and_defaults() {
        let store = MemoryMessageStore::new();

        let first = assert_ok!(store.insert(new_message("Ana")).await);
        let second = assert_ok!(store.insert(new_message("Rui")).await);

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(!first.read);
        assert_eq!(first.ip_address, "203.0.113.9");
        assert_eq!(store.messages().len(), 2);
    }

    #[tokio::test]
    async fn test_memory_store_failure() {
        let store = MemoryMessageStore::failing();
        assert_err!(store.insert(new_message("Ana")).await);
        assert!(store.messages().is_empty());
    }

    #[tokio::test]
    async fn test_memory_store_ping() {
        assert_ok!(MemoryMessageStore::new().ping().await);
        assert_err!(MemoryMessageStore::failing().ping().await);
    }

    #[tokio::test]
    async fn test_store_as_trait_object() {
        let store: Box<dyn MessageStore> = Box::new(MemoryMessageStore::new());
        let row = store.insert(new_message("Ana")).await.unwrap();
        assert_eq!(row.name, "Ana");
    }

    #[test]
    fn test_contact_message_serialization() {
        let row = stored(5, Utc::now(), new_message("Ana"));
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["id"], 5);
        assert_eq!(json["read"], false);
        assert!(json["phone"].is_null());
    }

    // ==================== PgMessageStore Tests ====================

    /// Needs a running PostgreSQL: TEST_DATABASE_URL=postgres://... cargo test -- --ignored
    #[tokio::test]
    #[ignore]
    async fn test_pg_store_insert() {
        let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL not set");
        let store = PgMessageStore::new(&url).await.expect("connect");
        store.ping().await.expect("ping");

        let row = store.insert(new_message("Ana")).await.expect("insert");
        assert!(row.id > 0);
        assert!(!row.read);
        assert_eq!(row.user_agent, "test-agent");
    }
}
