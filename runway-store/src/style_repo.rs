use async_trait::async_trait;
use runway_core::repository::StyleConfigRepository;
use runway_core::style::{BoardingStylePayload, BOARDING_STYLE_CATEGORY};
use runway_core::StyleConfigSummary;
use std::error::Error;
use tracing::warn;

pub struct PostgresStyleConfigRepository {
    pub pool: sqlx::PgPool,
}

impl PostgresStyleConfigRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct StyleConfigRow {
    id: i64,
    name: String,
    description: Option<String>,
    data: String,
}

impl From<StyleConfigRow> for StyleConfigSummary {
    fn from(row: StyleConfigRow) -> Self {
        let draw_function = match BoardingStylePayload::from_json(&row.data) {
            Ok(payload) => payload.renderer_name().map(str::to_string),
            Err(e) => {
                warn!(config_id = row.id, error = %e, "Unreadable boarding style config");
                None
            }
        };

        StyleConfigSummary {
            id: row.id,
            name: row.name,
            description: row.description,
            draw_function,
        }
    }
}

#[async_trait]
impl StyleConfigRepository for PostgresStyleConfigRepository {
    async fn find_boarding_style(
        &self,
        id: i64,
    ) -> Result<Option<String>, Box<dyn Error + Send + Sync>> {
        let data = sqlx::query_scalar::<_, String>(
            r#"
            SELECT data
            FROM flight_configs
            WHERE id = $1 AND type = $2 AND is_active = 1
            "#,
        )
        .bind(id)
        .bind(BOARDING_STYLE_CATEGORY)
        .fetch_optional(&self.pool)
        .await?;

        Ok(data)
    }

    async fn list_boarding_styles(
        &self,
    ) -> Result<Vec<StyleConfigSummary>, Box<dyn Error + Send + Sync>> {
        let rows = sqlx::query_as::<_, StyleConfigRow>(
            r#"
            SELECT id::BIGINT AS id, name, description, data
            FROM flight_configs
            WHERE type = $1 AND is_active = 1
            ORDER BY name
            "#,
        )
        .bind(BOARDING_STYLE_CATEGORY)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(StyleConfigSummary::from).collect())
    }
}
