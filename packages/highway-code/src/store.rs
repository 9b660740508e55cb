use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Rule, Section};

/// Read access to the rule and section records.
///
/// Rules come back without derived image or audio data; enrichment is the
/// assembler's job.
#[async_trait]
pub trait HighwayCodeStore: Send + Sync {
    async fn rule(&self, hcno: i32) -> Result<Option<Rule>>;

    /// Rules whose number is in `hcnos`, ascending by number.
    async fn rules(&self, hcnos: &[i32]) -> Result<Vec<Rule>>;

    /// Rules stored under a publication section, ascending by number.
    async fn rules_in_pubsec(&self, pubsec: i32) -> Result<Vec<Rule>>;

    async fn section_title(&self, sec_no: i32) -> Result<Option<String>>;

    /// Whether any section has a number strictly below `sec_no`.
    async fn section_exists_before(&self, sec_no: i32) -> Result<bool>;

    /// Whether any section has a number strictly above `sec_no`.
    async fn section_exists_after(&self, sec_no: i32) -> Result<bool>;

    /// All sections, ascending by number.
    async fn sections(&self) -> Result<Vec<Section>>;
}
