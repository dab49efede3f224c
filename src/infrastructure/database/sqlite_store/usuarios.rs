use super::SqliteStore;
use super::mapper::map_usuario_row;
use super::queries::{
    CLEAR_USUARIOS, COUNT_USUARIOS, DELETE_USUARIO, SELECT_ALL_USUARIOS, SELECT_USUARIO_BY_ID,
    UPSERT_USUARIO,
};
use crate::application::ports::UsuarioRepository;
use crate::domain::entities::Usuario;
use crate::shared::error::AppError;
use async_trait::async_trait;

#[async_trait]
impl UsuarioRepository for SqliteStore {
    async fn get_usuario(&self, id: i64) -> Result<Option<Usuario>, AppError> {
        let row = sqlx::query(SELECT_USUARIO_BY_ID)
            .bind(id)
            .fetch_optional(self.pool.get_pool())
            .await?;

        match row {
            Some(row) => Ok(Some(map_usuario_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn get_all_usuarios(&self) -> Result<Vec<Usuario>, AppError> {
        let rows = sqlx::query(SELECT_ALL_USUARIOS)
            .fetch_all(self.pool.get_pool())
            .await?;

        let mut usuarios = Vec::with_capacity(rows.len());
        for row in rows {
            usuarios.push(map_usuario_row(&row)?);
        }

        Ok(usuarios)
    }

    async fn put_usuario(&self, usuario: &Usuario) -> Result<(), AppError> {
        sqlx::query(UPSERT_USUARIO)
            .bind(usuario.id)
            .bind(&usuario.nombre)
            .bind(usuario.email.as_deref())
            .bind(usuario.rol.as_deref())
            .bind(usuario.updated_at.timestamp_millis())
            .execute(self.pool.get_pool())
            .await?;

        Ok(())
    }

    async fn put_usuarios_many(&self, usuarios: &[Usuario]) -> Result<(), AppError> {
        let mut tx = self.pool.get_pool().begin().await?;

        for usuario in usuarios {
            sqlx::query(UPSERT_USUARIO)
                .bind(usuario.id)
                .bind(&usuario.nombre)
                .bind(usuario.email.as_deref())
                .bind(usuario.rol.as_deref())
                .bind(usuario.updated_at.timestamp_millis())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn delete_usuario(&self, id: i64) -> Result<(), AppError> {
        sqlx::query(DELETE_USUARIO)
            .bind(id)
            .execute(self.pool.get_pool())
            .await?;

        Ok(())
    }

    async fn count_usuarios(&self) -> Result<u64, AppError> {
        let count: i64 = sqlx::query_scalar(COUNT_USUARIOS)
            .fetch_one(self.pool.get_pool())
            .await?;

        Ok(count.max(0) as u64)
    }

    async fn clear_usuarios(&self) -> Result<(), AppError> {
        sqlx::query(CLEAR_USUARIOS)
            .execute(self.pool.get_pool())
            .await?;

        Ok(())
    }
}
