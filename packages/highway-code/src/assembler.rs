//! Section assembly.
//!
//! [`SectionAssembler`] combines section metadata, the section's rules and the
//! neighbouring-section probes into one [`SectionView`]. Each rule is enriched
//! with its header image (when the file exists) and its audio sources (when
//! audio is enabled).

use crate::audio::{self, AudioSources};
use crate::config::HighwayCodeConfig;
use crate::error::Result;
use crate::images::{self, FsImageProbe, ImageProbe};
use crate::models::{parse_rule_number, ImageMetadata, Rule, Section, SectionNumber, SectionView};
use crate::store::HighwayCodeStore;

pub struct SectionAssembler<S, P = FsImageProbe> {
    store: S,
    probe: P,
    config: HighwayCodeConfig,
}

impl<S: HighwayCodeStore> SectionAssembler<S> {
    pub fn new(store: S, config: HighwayCodeConfig) -> Self {
        Self::with_probe(store, config, FsImageProbe)
    }
}

impl<S: HighwayCodeStore, P: ImageProbe> SectionAssembler<S, P> {
    pub fn with_probe(store: S, config: HighwayCodeConfig, probe: P) -> Self {
        Self {
            store,
            probe,
            config,
        }
    }

    /// Look up one rule by its number.
    ///
    /// Input that is not a positive integer can never match a rule and yields
    /// `Ok(None)` without a store round trip.
    #[tracing::instrument(skip(self))]
    pub async fn get_rule(&self, hcno: &str) -> Result<Option<Rule>> {
        let Some(hcno) = parse_rule_number(hcno) else {
            tracing::debug!("not a rule number");
            return Ok(None);
        };

        match self.store.rule(hcno).await? {
            Some(rule) => Ok(Some(self.enrich(rule)?)),
            None => Ok(None),
        }
    }

    /// Look up several rules. The result is ascending by rule number whatever
    /// the input order; unknown numbers are left out.
    #[tracing::instrument(skip(self))]
    pub async fn get_rules(&self, hcnos: &[i32]) -> Result<Vec<Rule>> {
        if hcnos.is_empty() {
            return Ok(Vec::new());
        }

        let mut rules = self.store.rules(hcnos).await?;
        rules.sort_by_key(|rule| rule.hcno);
        rules.dedup_by_key(|rule| rule.hcno);
        rules.into_iter().map(|rule| self.enrich(rule)).collect()
    }

    pub async fn section_name(&self, section: SectionNumber) -> Result<Option<String>> {
        self.store.section_title(section.value()).await
    }

    pub async fn is_first_section(&self, section: SectionNumber) -> Result<bool> {
        Ok(!self.store.section_exists_before(section.value()).await?)
    }

    pub async fn is_last_section(&self, section: SectionNumber) -> Result<bool> {
        Ok(!self.store.section_exists_after(section.value()).await?)
    }

    /// Rules of a section, enriched and ascending by rule number.
    #[tracing::instrument(skip(self), fields(pubsec = section.pubsec()))]
    pub async fn section_rules(&self, section: SectionNumber) -> Result<Vec<Rule>> {
        let mut rules = self.store.rules_in_pubsec(section.pubsec()).await?;
        rules.sort_by_key(|rule| rule.hcno);
        rules.into_iter().map(|rule| self.enrich(rule)).collect()
    }

    /// Assemble the view of one section.
    ///
    /// Returns `Err(InvalidSection)` when `section` is not a section number and
    /// `Ok(None)` when no section with that number exists.
    #[tracing::instrument(skip(self))]
    pub async fn build_section(&self, section: &str) -> Result<Option<SectionView>> {
        let section: SectionNumber = section.parse()?;

        let Some(title) = self.section_name(section).await? else {
            tracing::debug!(%section, "section not found");
            return Ok(None);
        };

        let rules = self.section_rules(section).await?;
        let is_first = self.is_first_section(section).await?;
        let is_last = self.is_last_section(section).await?;

        tracing::debug!(%section, rules = rules.len(), is_first, is_last, "section assembled");
        Ok(Some(SectionView {
            title,
            rules,
            is_first,
            is_last,
        }))
    }

    pub async fn list_sections(&self) -> Result<Vec<Section>> {
        self.store.sections().await
    }

    /// Metadata for an image in the configured image folder, `Ok(None)` when
    /// the file does not exist.
    pub fn build_image(&self, filename: &str) -> Result<Option<ImageMetadata>> {
        images::resolve_image(&self.probe, &self.config, filename)
    }

    /// Audio sources for a rule, `None` when audio is disabled.
    pub fn audio(&self, hcno: i32) -> Option<AudioSources> {
        audio::synthesize(self.config.audio_enabled(), self.config.audio_path(), hcno)
    }

    /// Attach image and audio data. An illustration that cannot be read is
    /// logged and left out so the rest of the rule still renders.
    fn enrich(&self, mut rule: Rule) -> Result<Rule> {
        let image = match rule.header_image_name() {
            Some(name) => self.build_image(name).unwrap_or_else(|e| {
                tracing::warn!(
                    hcno = rule.hcno,
                    image = name,
                    error = %e,
                    "skipping unreadable image"
                );
                None
            }),
            None => None,
        };
        rule.image = image;
        rule.audio = self.audio(rule.hcno);
        Ok(rule)
    }
}
