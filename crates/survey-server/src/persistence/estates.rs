//! Estate and tree persistence operations.

use chrono::Utc;
use sqlx::{Sqlite, SqlitePool};
use survey_core::{Plot, TreeRecord};

use super::{Database, Estate, EstateStore, StoreError, SurveyInput};

/// SQLite-backed [`EstateStore`].
#[derive(Clone)]
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn pool(&self) -> &SqlitePool {
        self.db.pool()
    }
}

impl EstateStore for SqliteStore {
    async fn create_estate(&self, plot: Plot) -> Result<Estate, StoreError> {
        let estate = Estate::new(plot);
        sqlx::query("INSERT INTO estates (id, width, length, created_at) VALUES (?1, ?2, ?3, ?4)")
            .bind(&estate.id)
            .bind(i64::from(estate.width))
            .bind(i64::from(estate.length))
            .bind(estate.created_at.to_rfc3339())
            .execute(self.pool())
            .await?;
        Ok(estate)
    }

    async fn add_tree(&self, estate_id: &str, tree: TreeRecord) -> Result<String, StoreError> {
        let tree_id = uuid::Uuid::new_v4().to_string();
        let result = sqlx::query(
            r#"
            INSERT INTO trees (id, estate_id, x, y, height, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&tree_id)
        .bind(estate_id)
        .bind(i64::from(tree.x))
        .bind(i64::from(tree.y))
        .bind(i64::from(tree.height))
        .bind(Utc::now().to_rfc3339())
        .execute(self.pool())
        .await;

        match result {
            Ok(_) => Ok(tree_id),
            Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
                Err(StoreError::DuplicateTree {
                    x: tree.x,
                    y: tree.y,
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn plot_dimensions(&self, estate_id: &str) -> Result<Plot, StoreError> {
        let mut conn = self.pool().acquire().await?;
        fetch_plot(&mut conn, estate_id).await
    }

    async fn list_trees(&self, estate_id: &str) -> Result<Vec<TreeRecord>, StoreError> {
        let mut conn = self.pool().acquire().await?;
        let plot = fetch_plot(&mut conn, estate_id).await?;
        fetch_trees(&mut conn, estate_id, &plot).await
    }

    async fn load_survey_input(&self, estate_id: &str) -> Result<SurveyInput, StoreError> {
        let mut tx = self.pool().begin().await?;
        let plot = fetch_plot(&mut tx, estate_id).await?;
        let trees = fetch_trees(&mut tx, estate_id, &plot).await?;
        tx.commit().await?;
        Ok(SurveyInput { plot, trees })
    }
}

async fn fetch_plot(
    conn: &mut sqlx::SqliteConnection,
    estate_id: &str,
) -> Result<Plot, StoreError> {
    let row = sqlx::query_as::<Sqlite, (i64, i64)>(
        "SELECT width, length FROM estates WHERE id = ?1",
    )
    .bind(estate_id)
    .fetch_optional(&mut *conn)
    .await?;

    let (width, length) = row.ok_or_else(|| StoreError::EstateNotFound(estate_id.to_string()))?;
    Ok(Plot::new(width, length)?)
}

/// Tree rows are re-validated against the plot; a row that fails is
/// reported as [`StoreError::InvalidRecord`].
async fn fetch_trees(
    conn: &mut sqlx::SqliteConnection,
    estate_id: &str,
    plot: &Plot,
) -> Result<Vec<TreeRecord>, StoreError> {
    let rows = sqlx::query_as::<_, TreeRow>(
        "SELECT x, y, height FROM trees WHERE estate_id = ?1 ORDER BY y, x",
    )
    .bind(estate_id)
    .fetch_all(&mut *conn)
    .await?;

    rows.into_iter()
        .map(|row| {
            TreeRecord::placed_in(plot, row.x, row.y, row.height).map_err(StoreError::from)
        })
        .collect()
}

// Internal row type for SQLx
#[derive(sqlx::FromRow)]
struct TreeRow {
    x: i64,
    y: i64,
    height: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::init_database;

    async fn store() -> SqliteStore {
        let path = std::env::temp_dir().join(format!("survey-store-{}.db", uuid::Uuid::new_v4()));
        let db = init_database(&path.to_string_lossy(), 2).await.unwrap();
        SqliteStore::new(db)
    }

    #[tokio::test]
    async fn test_estate_round_trip() {
        let store = store().await;
        let estate = store.create_estate(Plot::new(3, 7).unwrap()).await.unwrap();

        let plot = store.plot_dimensions(&estate.id).await.unwrap();
        assert_eq!(plot, Plot { width: 3, length: 7 });
    }

    #[tokio::test]
    async fn test_missing_estate() {
        let store = store().await;
        assert!(matches!(
            store.plot_dimensions("nope").await,
            Err(StoreError::EstateNotFound(id)) if id == "nope"
        ));
        assert!(matches!(
            store.load_survey_input("nope").await,
            Err(StoreError::EstateNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_trees_and_duplicates() {
        let store = store().await;
        let estate = store.create_estate(Plot::new(2, 2).unwrap()).await.unwrap();

        store.add_tree(&estate.id, TreeRecord::new(2, 1, 5)).await.unwrap();
        store.add_tree(&estate.id, TreeRecord::new(1, 2, 9)).await.unwrap();
        assert!(matches!(
            store.add_tree(&estate.id, TreeRecord::new(2, 1, 7)).await,
            Err(StoreError::DuplicateTree { x: 2, y: 1 })
        ));

        let trees = store.list_trees(&estate.id).await.unwrap();
        assert_eq!(
            trees,
            vec![TreeRecord::new(2, 1, 5), TreeRecord::new(1, 2, 9)]
        );

        let input = store.load_survey_input(&estate.id).await.unwrap();
        assert_eq!(input.plot, Plot { width: 2, length: 2 });
        assert_eq!(input.trees.len(), 2);
    }

    #[tokio::test]
    async fn test_corrupt_tree_row_is_invalid_record() {
        let store = store().await;
        let estate = store.create_estate(Plot::new(2, 2).unwrap()).await.unwrap();

        let corrupt: [(i64, i64, i64); 4] = [(-1, 1, 5), (1, 3, 5), (1, 1, 0), (2, 2, 4_294_967_296)];
        for (x, y, height) in corrupt {
            sqlx::query(
                "INSERT INTO trees (id, estate_id, x, y, height, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )
            .bind(uuid::Uuid::new_v4().to_string())
            .bind(&estate.id)
            .bind(x)
            .bind(y)
            .bind(height)
            .bind(Utc::now().to_rfc3339())
            .execute(store.pool())
            .await
            .unwrap();

            assert!(matches!(
                store.load_survey_input(&estate.id).await,
                Err(StoreError::InvalidRecord(_))
            ));
            assert!(matches!(
                store.list_trees(&estate.id).await,
                Err(StoreError::InvalidRecord(_))
            ));

            sqlx::query("DELETE FROM trees WHERE estate_id = ?1")
                .bind(&estate.id)
                .execute(store.pool())
                .await
                .unwrap();
        }
    }
}
