use super::SqliteStore;
use super::mapper::map_item_row;
use super::queries::{
    CLEAR_INVENTARIO, COUNT_ITEMS, SEARCH_INVENTARIO, SELECT_ALL_ITEMS,
    SELECT_ITEMS_BY_CATEGORIA, SELECT_ITEM_BY_ID, UPSERT_ITEM,
};
use crate::application::ports::InventarioRepository;
use crate::domain::entities::InventarioItem;
use crate::shared::error::AppError;
use async_trait::async_trait;

#[async_trait]
impl InventarioRepository for SqliteStore {
    async fn get_item(&self, id: i64) -> Result<Option<InventarioItem>, AppError> {
        let row = sqlx::query(SELECT_ITEM_BY_ID)
            .bind(id)
            .fetch_optional(self.pool.get_pool())
            .await?;

        match row {
            Some(row) => Ok(Some(map_item_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn get_all_items(&self) -> Result<Vec<InventarioItem>, AppError> {
        let rows = sqlx::query(SELECT_ALL_ITEMS)
            .fetch_all(self.pool.get_pool())
            .await?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(map_item_row(&row)?);
        }

        Ok(items)
    }

    async fn get_items_by_categoria(
        &self,
        categoria_id: i64,
    ) -> Result<Vec<InventarioItem>, AppError> {
        let rows = sqlx::query(SELECT_ITEMS_BY_CATEGORIA)
            .bind(categoria_id)
            .fetch_all(self.pool.get_pool())
            .await?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(map_item_row(&row)?);
        }

        Ok(items)
    }

    async fn search_inventario(&self, query: &str) -> Result<Vec<InventarioItem>, AppError> {
        let pattern = format!("%{}%", query);
        let rows = sqlx::query(SEARCH_INVENTARIO)
            .bind(&pattern)
            .fetch_all(self.pool.get_pool())
            .await?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(map_item_row(&row)?);
        }

        Ok(items)
    }

    async fn put_items_many(&self, items: &[InventarioItem]) -> Result<(), AppError> {
        let mut tx = self.pool.get_pool().begin().await?;

        for item in items {
            sqlx::query(UPSERT_ITEM)
                .bind(item.id)
                .bind(&item.codigo)
                .bind(item.categoria_id)
                .bind(&item.nombre)
                .bind(item.updated_at.timestamp_millis())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn replace_inventario(&self, items: &[InventarioItem]) -> Result<(), AppError> {
        let mut tx = self.pool.get_pool().begin().await?;

        sqlx::query(CLEAR_INVENTARIO).execute(&mut *tx).await?;
        for item in items {
            sqlx::query(UPSERT_ITEM)
                .bind(item.id)
                .bind(&item.codigo)
                .bind(item.categoria_id)
                .bind(&item.nombre)
                .bind(item.updated_at.timestamp_millis())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn count_items(&self) -> Result<u64, AppError> {
        let count: i64 = sqlx::query_scalar(COUNT_ITEMS)
            .fetch_one(self.pool.get_pool())
            .await?;

        Ok(count.max(0) as u64)
    }

    async fn clear_inventario(&self) -> Result<(), AppError> {
        sqlx::query(CLEAR_INVENTARIO)
            .execute(self.pool.get_pool())
            .await?;

        Ok(())
    }
}
