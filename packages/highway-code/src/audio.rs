//! Audio narration sources for rules.
//!
//! Every rule has an MP3 and an OGG recording named after its rule number.
//! The files are not checked for existence.

use serde::{Deserialize, Serialize};

/// The two recordings of one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioSources {
    pub hcno: i32,
    pub mp3: String,
    pub ogg: String,
}

impl AudioSources {
    /// Build the sources for `hcno` below `audio_path`, which must end in a
    /// separator when non-empty.
    pub fn for_rule(audio_path: &str, hcno: i32) -> Self {
        Self {
            hcno,
            mp3: format!("{audio_path}mp3/hc{hcno}.mp3"),
            ogg: format!("{audio_path}ogg/hc{hcno}.ogg"),
        }
    }

    /// Render the HTML5 player fragment pages embed under each rule.
    pub fn to_html(&self) -> String {
        format!(
            r#"<div class="sound" id="audioanswerhc{n}"><audio id="audiohc{n}" preload="auto"><source src="{mp3}" type="audio/mpeg"><source src="{ogg}" type="audio/ogg"></audio></div>"#,
            n = self.hcno,
            mp3 = self.mp3,
            ogg = self.ogg,
        )
    }
}

/// Audio for `hcno`, or `None` when audio is disabled.
pub fn synthesize(enabled: bool, audio_path: &str, hcno: i32) -> Option<AudioSources> {
    enabled.then(|| AudioSources::for_rule(audio_path, hcno))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_returns_none() {
        for hcno in [1, 17, 307] {
            assert_eq!(synthesize(false, "/audio/", hcno), None);
        }
    }

    #[test]
    fn test_sources_embed_rule_number() {
        let audio = synthesize(true, "/audio/", 42).unwrap();
        assert_eq!(audio.hcno, 42);
        assert_eq!(audio.mp3, "/audio/mp3/hc42.mp3");
        assert_eq!(audio.ogg, "/audio/ogg/hc42.ogg");
    }

    #[test]
    fn test_html_markup() {
        let html = AudioSources::for_rule("/audio/", 7).to_html();
        assert_eq!(
            html,
            r#"<div class="sound" id="audioanswerhc7"><audio id="audiohc7" preload="auto"><source src="/audio/mp3/hc7.mp3" type="audio/mpeg"><source src="/audio/ogg/hc7.ogg" type="audio/ogg"></audio></div>"#
        );
    }
}
