//! PostgreSQL repository implementation.
//!
//! Runtime-checked sqlx queries over a shared pool. Reads on soft-deletable
//! tables filter `deleted_utc IS NULL`; the store/category and order/item
//! writes run in a transaction so partial rows never commit.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use service_core::error::AppError;
use sqlx::postgres::PgPool;
use uuid::Uuid;

use crate::models::{Category, Order, OrderProduct, Payment, PaymentStatus, Product, Store, User};

use super::repository::DeliveryRepository;

/// PostgreSQL database wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Health check - ping the database.
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Database health check failed: {}", e);
                AppError::DatabaseError(anyhow::anyhow!("Database health check failed: {}", e))
            })?;
        Ok(())
    }
}

fn db_err(e: sqlx::Error) -> AppError {
    AppError::DatabaseError(anyhow::anyhow!(e))
}

#[async_trait]
impl DeliveryRepository for Database {
    async fn find_user(&self, username: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)
    }

    async fn insert_user(&self, user: &User) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO users (username, email, password_hash, role_code, created_utc)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.role_code)
        .bind(user.created_utc)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn find_store(&self, store_id: Uuid) -> Result<Option<Store>, AppError> {
        sqlx::query_as::<_, Store>(
            "SELECT * FROM stores WHERE store_id = $1 AND deleted_utc IS NULL",
        )
        .bind(store_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)
    }

    async fn list_stores(&self) -> Result<Vec<Store>, AppError> {
        sqlx::query_as::<_, Store>(
            "SELECT * FROM stores WHERE deleted_utc IS NULL ORDER BY created_utc",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)
    }

    async fn stores_of_owner(&self, username: &str) -> Result<Vec<Store>, AppError> {
        sqlx::query_as::<_, Store>(
            r#"
            SELECT * FROM stores
            WHERE owner_username = $1 AND deleted_utc IS NULL
            ORDER BY created_utc
            "#,
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)
    }

    async fn insert_store(&self, store: &Store, categories: &[String]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        sqlx::query(
            r#"
            INSERT INTO stores (store_id, owner_username, name, phone, created_utc)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(store.store_id)
        .bind(&store.owner_username)
        .bind(&store.name)
        .bind(&store.phone)
        .bind(store.created_utc)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        for name in categories {
            let category = match sqlx::query_as::<_, Category>(
                "SELECT * FROM categories WHERE name = $1",
            )
            .bind(name)
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_err)?
            {
                Some(existing) => existing,
                None => {
                    let category = Category::new(name.clone());
                    sqlx::query("INSERT INTO categories (category_id, name) VALUES ($1, $2)")
                        .bind(category.category_id)
                        .bind(&category.name)
                        .execute(&mut *tx)
                        .await
                        .map_err(db_err)?;
                    category
                }
            };

            sqlx::query(
                "INSERT INTO store_categories (store_id, category_id) VALUES ($1, $2)",
            )
            .bind(store.store_id)
            .bind(category.category_id)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        }

        tx.commit().await.map_err(db_err)
    }

    async fn update_store(
        &self,
        store_id: Uuid,
        name: &str,
        phone: &str,
    ) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE stores SET name = $1, phone = $2 WHERE store_id = $3 AND deleted_utc IS NULL",
        )
        .bind(name)
        .bind(phone)
        .bind(store_id)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn soft_delete_store(
        &self,
        store_id: Uuid,
        deleted_by: &str,
        deleted_utc: DateTime<Utc>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE stores SET deleted_utc = $1, deleted_by = $2
            WHERE store_id = $3 AND deleted_utc IS NULL
            "#,
        )
        .bind(deleted_utc)
        .bind(deleted_by)
        .bind(store_id)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn categories_of_store(&self, store_id: Uuid) -> Result<Vec<String>, AppError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT c.name FROM categories c
            JOIN store_categories sc ON sc.category_id = c.category_id
            WHERE sc.store_id = $1
            ORDER BY c.name
            "#,
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    async fn find_product(&self, product_id: Uuid) -> Result<Option<Product>, AppError> {
        sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE product_id = $1 AND deleted_utc IS NULL",
        )
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)
    }

    async fn products_of_store(&self, store_id: Uuid) -> Result<Vec<Product>, AppError> {
        sqlx::query_as::<_, Product>(
            r#"
            SELECT * FROM products
            WHERE store_id = $1 AND deleted_utc IS NULL
            ORDER BY created_utc
            "#,
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)
    }

    async fn store_id_of_product(&self, product_id: Uuid) -> Result<Option<Uuid>, AppError> {
        let row: Option<(Uuid,)> = sqlx::query_as(
            "SELECT store_id FROM products WHERE product_id = $1 AND deleted_utc IS NULL",
        )
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.map(|(store_id,)| store_id))
    }

    async fn insert_product(&self, product: &Product) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO products (product_id, store_id, name, price, description, created_utc)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(product.product_id)
        .bind(product.store_id)
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.description)
        .bind(product.created_utc)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn update_product(
        &self,
        product_id: Uuid,
        name: &str,
        price: i64,
        description: Option<&str>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE products SET name = $1, price = $2, description = $3
            WHERE product_id = $4 AND deleted_utc IS NULL
            "#,
        )
        .bind(name)
        .bind(price)
        .bind(description)
        .bind(product_id)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn soft_delete_product(
        &self,
        product_id: Uuid,
        deleted_by: &str,
        deleted_utc: DateTime<Utc>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE products SET deleted_utc = $1, deleted_by = $2
            WHERE product_id = $3 AND deleted_utc IS NULL
            "#,
        )
        .bind(deleted_utc)
        .bind(deleted_by)
        .bind(product_id)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn insert_order(&self, order: &Order, items: &[OrderProduct]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        sqlx::query(
            r#"
            INSERT INTO orders
                (order_id, username, final_pay, discount_rate, discount_amount, created_utc)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(order.order_id)
        .bind(&order.username)
        .bind(order.final_pay)
        .bind(order.discount_rate)
        .bind(order.discount_amount)
        .bind(order.created_utc)
        .execute(&mut *tx)
        .await
        .map_err(db_err)?;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO order_products (order_id, product_id, quantity, unit_price)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(item.order_id)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(item.unit_price)
            .execute(&mut *tx)
            .await
            .map_err(db_err)?;
        }

        tx.commit().await.map_err(db_err)
    }

    async fn find_order(&self, order_id: Uuid) -> Result<Option<Order>, AppError> {
        sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE order_id = $1")
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)
    }

    async fn order_items(&self, order_id: Uuid) -> Result<Vec<OrderProduct>, AppError> {
        sqlx::query_as::<_, OrderProduct>(
            "SELECT * FROM order_products WHERE order_id = $1",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)
    }

    async fn insert_payment(&self, payment: &Payment) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO payments
                (tid, order_id, username, status_code, amount, created_utc, approved_utc, aid)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(&payment.tid)
        .bind(payment.order_id)
        .bind(&payment.username)
        .bind(&payment.status_code)
        .bind(payment.amount)
        .bind(payment.created_utc)
        .bind(payment.approved_utc)
        .bind(&payment.aid)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn find_payment(&self, tid: &str) -> Result<Option<Payment>, AppError> {
        sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE tid = $1")
            .bind(tid)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)
    }

    async fn find_payment_by_order(&self, order_id: Uuid) -> Result<Option<Payment>, AppError> {
        sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE order_id = $1")
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)
    }

    async fn approve_payment(
        &self,
        tid: &str,
        aid: &str,
        approved_utc: DateTime<Utc>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE payments SET status_code = $1, aid = $2, approved_utc = $3
            WHERE tid = $4
            "#,
        )
        .bind(PaymentStatus::Approved.as_str())
        .bind(aid)
        .bind(approved_utc)
        .bind(tid)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }
}
