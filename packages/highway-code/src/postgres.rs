use async_trait::async_trait;
use sqlx::PgPool;

use crate::config::HighwayCodeConfig;
use crate::error::Result;
use crate::models::{Rule, Section};
use crate::store::HighwayCodeStore;

const RULE_COLUMNS: &str = "hcno, hcrule, hctitle, imagetitle1, imagetitle2, imagefooter1, pubsec";

/// [`HighwayCodeStore`] over a PostgreSQL pool.
///
/// Table names are taken from [`HighwayCodeConfig`], whose builder only
/// accepts plain identifiers, so interpolating them into queries is safe.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
    rules_table: String,
    section_table: String,
}

impl PgStore {
    pub fn new(pool: PgPool, config: &HighwayCodeConfig) -> Self {
        Self {
            pool,
            rules_table: config.rules_table().to_string(),
            section_table: config.section_table().to_string(),
        }
    }
}

#[async_trait]
impl HighwayCodeStore for PgStore {
    #[tracing::instrument(skip(self), level = "debug")]
    async fn rule(&self, hcno: i32) -> Result<Option<Rule>> {
        let sql = format!(
            "SELECT {RULE_COLUMNS} FROM {} WHERE hcno = $1",
            self.rules_table
        );
        let rule = sqlx::query_as::<_, Rule>(&sql)
            .bind(hcno)
            .fetch_optional(&self.pool)
            .await?;

        Ok(rule)
    }

    #[tracing::instrument(skip(self), level = "debug")]
    async fn rules(&self, hcnos: &[i32]) -> Result<Vec<Rule>> {
        let sql = format!(
            "SELECT {RULE_COLUMNS} FROM {} WHERE hcno = ANY($1) ORDER BY hcno ASC",
            self.rules_table
        );
        let rules = sqlx::query_as::<_, Rule>(&sql)
            .bind(hcnos)
            .fetch_all(&self.pool)
            .await?;

        Ok(rules)
    }

    #[tracing::instrument(skip(self), level = "debug")]
    async fn rules_in_pubsec(&self, pubsec: i32) -> Result<Vec<Rule>> {
        let sql = format!(
            "SELECT {RULE_COLUMNS} FROM {} WHERE pubsec = $1 ORDER BY hcno ASC",
            self.rules_table
        );
        let rules = sqlx::query_as::<_, Rule>(&sql)
            .bind(pubsec)
            .fetch_all(&self.pool)
            .await?;

        Ok(rules)
    }

    #[tracing::instrument(skip(self), level = "debug")]
    async fn section_title(&self, sec_no: i32) -> Result<Option<String>> {
        let sql = format!(
            "SELECT title FROM {} WHERE sec_no = $1",
            self.section_table
        );
        let title = sqlx::query_scalar::<_, String>(&sql)
            .bind(sec_no)
            .fetch_optional(&self.pool)
            .await?;

        Ok(title)
    }

    #[tracing::instrument(skip(self), level = "debug")]
    async fn section_exists_before(&self, sec_no: i32) -> Result<bool> {
        let sql = format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE sec_no < $1)",
            self.section_table
        );
        let exists = sqlx::query_scalar::<_, bool>(&sql)
            .bind(sec_no)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    #[tracing::instrument(skip(self), level = "debug")]
    async fn section_exists_after(&self, sec_no: i32) -> Result<bool> {
        let sql = format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE sec_no > $1)",
            self.section_table
        );
        let exists = sqlx::query_scalar::<_, bool>(&sql)
            .bind(sec_no)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    #[tracing::instrument(skip(self), level = "debug")]
    async fn sections(&self) -> Result<Vec<Section>> {
        let sql = format!(
            "SELECT sec_no, title FROM {} ORDER BY sec_no ASC",
            self.section_table
        );
        let sections = sqlx::query_as::<_, Section>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(sections)
    }
}
