//! Redis-backed cart storage
//!
//! Carts are the short-lived shopping baskets students fill at the
//! terminal before the office prints them. They expire on their own and
//! are deliberately kept out of the relational schema; shared state stays
//! in redis, not in this process.

use crate::config::RedisConfig;
use crate::errors::{AppError, Result};
use chrono::{DateTime, Utc};
use redis::{aio::MultiplexedConnection, AsyncCommands, Client};
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::debug;
use uuid::Uuid;

/// A shopping cart of documents to print
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    pub id: Uuid,
    pub name: String,
    pub document_ids: Vec<i32>,
    pub created_at: DateTime<Utc>,
}

/// Redis cart store
pub struct CartStore {
    client: Client,
    connection: OnceCell<MultiplexedConnection>,
    key_prefix: String,
    ttl_secs: u64,
}

impl CartStore {
    /// Create a new cart store. The connection is established lazily on
    /// first use.
    pub fn new(config: &RedisConfig) -> Result<Self> {
        let client = Client::open(config.url.as_str()).map_err(|e| AppError::CartStore {
            message: format!("Failed to create Redis client: {}", e),
        })?;

        Ok(Self {
            client,
            connection: OnceCell::new(),
            key_prefix: config.key_prefix.clone(),
            ttl_secs: config.cart_ttl_secs,
        })
    }

    async fn conn(&self) -> Result<MultiplexedConnection> {
        let conn = self
            .connection
            .get_or_try_init(|| async {
                self.client
                    .get_multiplexed_async_connection()
                    .await
                    .map_err(|e| AppError::CartStore {
                        message: format!("Failed to connect to Redis: {}", e),
                    })
            })
            .await?;

        Ok(conn.clone())
    }

    /// Build a prefixed cart key
    fn key(&self, id: Uuid) -> String {
        keys::cart(&self.key_prefix, id)
    }

    /// Create a cart with the configured TTL
    pub async fn create_cart(&self, name: String, document_ids: Vec<i32>) -> Result<Cart> {
        let cart = Cart {
            id: Uuid::new_v4(),
            name,
            document_ids,
            created_at: Utc::now(),
        };

        self.store(&cart).await?;
        debug!(cart_id = %cart.id, "Cart created");

        Ok(cart)
    }

    /// Fetch a cart by ID
    pub async fn get_cart(&self, id: Uuid) -> Result<Option<Cart>> {
        let mut conn = self.conn().await?;

        let value: Option<String> = conn.get(self.key(id)).await?;

        match value {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Replace a cart's contents, refreshing its TTL
    pub async fn update_cart(
        &self,
        id: Uuid,
        name: String,
        document_ids: Vec<i32>,
    ) -> Result<Cart> {
        let existing = self
            .get_cart(id)
            .await?
            .ok_or_else(|| AppError::CartNotFound { id: id.to_string() })?;

        let cart = Cart {
            id,
            name,
            document_ids,
            created_at: existing.created_at,
        };

        self.store(&cart).await?;
        debug!(cart_id = %id, "Cart updated");

        Ok(cart)
    }

    /// Delete a cart
    pub async fn delete_cart(&self, id: Uuid) -> Result<bool> {
        let mut conn = self.conn().await?;

        let deleted: i32 = conn.del(self.key(id)).await?;
        debug!(cart_id = %id, deleted = deleted > 0, "Cart delete");

        Ok(deleted > 0)
    }

    /// List all live carts
    pub async fn list_carts(&self) -> Result<Vec<Cart>> {
        let mut conn = self.conn().await?;

        let pattern = format!("{}:cart:*", self.key_prefix);
        let cart_keys: Vec<String> = conn.keys(pattern).await?;

        if cart_keys.is_empty() {
            return Ok(Vec::new());
        }

        let values: Vec<Option<String>> = conn.mget(&cart_keys).await?;

        let mut carts = Vec::with_capacity(values.len());
        for json in values.into_iter().flatten() {
            carts.push(serde_json::from_str(&json)?);
        }

        Ok(carts)
    }

    async fn store(&self, cart: &Cart) -> Result<()> {
        let json = serde_json::to_string(cart)?;
        let mut conn = self.conn().await?;

        conn.set_ex::<_, _, ()>(self.key(cart.id), &json, self.ttl_secs)
            .await?;
        Ok(())
    }

    /// Ping Redis to check connectivity
    pub async fn ping(&self) -> Result<()> {
        let mut conn = self.conn().await?;
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map_err(|e| AppError::CartStore {
                message: format!("Redis ping failed: {}", e),
            })?;
        Ok(())
    }
}

/// Cache key builder helpers
pub mod keys {
    use uuid::Uuid;

    /// Build a cart key
    pub fn cart(prefix: &str, id: Uuid) -> String {
        format!("{}:cart:{}", prefix, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_builder() {
        let id = Uuid::new_v4();
        let key = keys::cart("folio", id);
        assert!(key.starts_with("folio:cart:"));
        assert!(key.ends_with(&id.to_string()));
    }

    #[test]
    fn test_cart_roundtrips_through_json() {
        let cart = Cart {
            id: Uuid::new_v4(),
            name: "Klausurvorbereitung".to_string(),
            document_ids: vec![3, 17, 17],
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&cart).unwrap();
        let parsed: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, cart.id);
        assert_eq!(parsed.document_ids, vec![3, 17, 17]);
    }

    #[test]
    fn test_store_construction_does_not_connect() {
        // Construction only parses the URL; the connection is lazy.
        let config = RedisConfig {
            url: "redis://localhost:1".to_string(),
            key_prefix: "folio".to_string(),
            cart_ttl_secs: 60,
        };
        assert!(CartStore::new(&config).is_ok());
    }
}
