use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::audio::AudioSources;
use crate::error::HighwayCodeError;

/// Offset between a section's display number and the `pubsec` value its rules
/// are stored under.
pub const PUBSEC_OFFSET: i32 = 1;

/// A validated section number (`sec_no`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SectionNumber(i32);

impl SectionNumber {
    /// Largest section number whose `pubsec` still fits in an `i32`.
    pub const MAX: i32 = i32::MAX - PUBSEC_OFFSET;

    pub fn new(value: i32) -> Option<Self> {
        (0..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn value(self) -> i32 {
        self.0
    }

    /// Publication section the rules of this section are stored under.
    ///
    /// Stored rule sections run one ahead of the display numbering: the rules
    /// of section 1 carry `pubsec = 2`.
    pub fn pubsec(self) -> i32 {
        self.0 + PUBSEC_OFFSET
    }
}

impl FromStr for SectionNumber {
    type Err = HighwayCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i32>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| HighwayCodeError::InvalidSection(s.to_string()))
    }
}

impl fmt::Display for SectionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parse a rule number (`hcno`). Only positive integers are rule numbers.
pub fn parse_rule_number(s: &str) -> Option<i32> {
    s.trim().parse::<i32>().ok().filter(|n| *n > 0)
}

/// One numbered Highway Code rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Rule {
    pub hcno: i32,
    #[sqlx(rename = "hcrule")]
    pub text: String,
    #[sqlx(rename = "hctitle")]
    pub title: Option<String>,
    #[sqlx(rename = "imagetitle1")]
    pub header_image: Option<String>,
    #[sqlx(rename = "imagetitle2")]
    pub second_image: Option<String>,
    #[sqlx(rename = "imagefooter1")]
    pub footer_image: Option<String>,
    pub pubsec: i32,
    #[sqlx(skip)]
    pub image: Option<ImageMetadata>,
    #[sqlx(skip)]
    pub audio: Option<AudioSources>,
}

impl Rule {
    pub fn new(hcno: i32, pubsec: i32, text: impl Into<String>) -> Self {
        Self {
            hcno,
            text: text.into(),
            title: None,
            header_image: None,
            second_image: None,
            footer_image: None,
            pubsec,
            image: None,
            audio: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_header_image(mut self, image: impl Into<String>) -> Self {
        self.header_image = Some(image.into());
        self
    }

    /// Header image file name, if the rule references one.
    pub fn header_image_name(&self) -> Option<&str> {
        self.header_image.as_deref().filter(|name| !name.is_empty())
    }
}

/// A named group of consecutively numbered rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Section {
    pub sec_no: i32,
    pub title: String,
}

impl Section {
    pub fn new(sec_no: i32, title: impl Into<String>) -> Self {
        Self {
            sec_no,
            title: title.into(),
        }
    }
}

/// Pixel size and URL path of a rule illustration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMetadata {
    pub path: String,
    pub width: u32,
    pub height: u32,
}

/// Everything a page needs to render one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionView {
    pub title: String,
    pub rules: Vec<Rule>,
    pub is_first: bool,
    pub is_last: bool,
}
