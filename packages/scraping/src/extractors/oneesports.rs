//! Extractor for the OneEsports MLBB tier list.
//!
//! Everything lives on one article page: heroes are grouped under tier
//! sections, with optional patch notes per hero card. There is no
//! per-hero detail fetch.

use async_trait::async_trait;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{info, warn};

use super::Extractor;
use crate::fetch::PageFetcher;
use crate::types::{HeroRecord, PatchNote, Tier};

pub const SOURCE: &str = "oneesports";

const DEFAULT_BASE_URL: &str = "https://oneesports.gg";
// Editorial URL; updated when the site rotates its evergreen article.
const TIER_LIST_PATH: &str = "/mobile-legends/mlbb-tier-list-best-heroes";

pub struct OneEsportsExtractor {
    fetcher: PageFetcher,
    base_url: String,
}

impl OneEsportsExtractor {
    pub fn new(fetcher: PageFetcher) -> Self {
        Self {
            fetcher,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point at a different host (tests, mirrors).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl Extractor for OneEsportsExtractor {
    fn source(&self) -> &str {
        SOURCE
    }

    async fn extract(&self) -> Vec<HeroRecord> {
        let url = format!("{}{}", self.base_url, TIER_LIST_PATH);
        let html = match self.fetcher.get_text(&url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(source = SOURCE, error = %e, "tier list fetch failed");
                return Vec::new();
            }
        };

        let records = parse_tier_list(&html);
        info!(source = SOURCE, count = records.len(), "heroes found on tier list");
        records
    }
}

fn parse_tier_list(html: &str) -> Vec<HeroRecord> {
    let document = Html::parse_document(html);
    let section_sel = Selector::parse(".tier-list-section").unwrap();
    let header_sel = Selector::parse("h2, h3").unwrap();
    let card_sel = Selector::parse(".hero-card").unwrap();
    let name_sel = Selector::parse(".hero-name").unwrap();
    let role_sel = Selector::parse(".hero-role").unwrap();
    let note_sel = Selector::parse(".patch-note").unwrap();

    let mut records = Vec::new();

    for section in document.select(&section_sel) {
        let tier = section
            .select(&header_sel)
            .next()
            .map(|h| parse_header_tier(&element_text(&h)))
            .unwrap_or(Tier::Unknown);

        for card in section.select(&card_sel) {
            let name = card
                .select(&name_sel)
                .next()
                .map(|e| element_text(&e))
                .unwrap_or_default();
            if name.is_empty() {
                continue;
            }

            let role = card
                .select(&role_sel)
                .next()
                .map(|e| split_roles(&element_text(&e)))
                .unwrap_or_default();

            let notes: Vec<String> = card
                .select(&note_sel)
                .map(|e| element_text(&e))
                .filter(|t| !t.is_empty())
                .collect();

            records.push(HeroRecord {
                name,
                role,
                tier,
                patch_changes: group_patch_notes(notes),
                // Tier-list cards carry no counters, builds, or emblems.
                ..HeroRecord::default()
            });
        }
    }

    records
}

/// Headers read "Tier S" or "S Tier", sometimes with extra prose.
fn parse_header_tier(text: &str) -> Tier {
    let tier_re = Regex::new(r"(?i)Tier\s*([SABCDF][+-]?)|([SABCDF][+-]?)\s*Tier").unwrap();
    match tier_re.captures(text) {
        Some(caps) => {
            let label = caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str());
            label.map(Tier::parse).unwrap_or(Tier::Unknown)
        }
        None => Tier::Unknown,
    }
}

/// Group free-form patch note lines by the version number they lead
/// with; lines without one are filed under "current".
fn group_patch_notes(notes: Vec<String>) -> Vec<PatchNote> {
    let version_re = Regex::new(r"^(\d+\.\d+(?:\.\d+)?[a-z]?)\b").unwrap();
    let mut grouped: Vec<PatchNote> = Vec::new();

    for note in notes {
        let (version, change) = match version_re.captures(&note) {
            Some(caps) => {
                let version = caps[1].to_string();
                let change = note[caps.get(0).unwrap().end()..]
                    .trim_start_matches([':', '-', ' '])
                    .to_string();
                (version, change)
            }
            None => ("current".to_string(), note.clone()),
        };
        let change = if change.is_empty() { note } else { change };

        match grouped.iter_mut().find(|p| p.version == version) {
            Some(entry) => entry.changes.push(change),
            None => grouped.push(PatchNote {
                version,
                changes: vec![change],
            }),
        }
    }

    grouped
}

fn split_roles(text: &str) -> Vec<String> {
    text.split('/')
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .collect()
}

fn element_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Grade;

    const TIER_LIST_HTML: &str = r#"
        <div class="tier-list-section">
          <h2>Tier S</h2>
          <div class="hero-card">
            <span class="hero-name">Chou</span>
            <span class="hero-role">Fighter</span>
            <div class="patch-note">1.8.42: Skill 2 cooldown reduced</div>
            <div class="patch-note">1.8.42 Base HP increased</div>
            <div class="patch-note">Still a top ban pick</div>
          </div>
        </div>
        <div class="tier-list-section">
          <h3>A Tier</h3>
          <div class="hero-card">
            <span class="hero-name">Kagura</span>
            <span class="hero-role">Mage/Support</span>
          </div>
        </div>
        <div class="tier-list-section">
          <h2>Honourable mentions</h2>
          <div class="hero-card"><span class="hero-name">Layla</span></div>
        </div>"#;

    #[test]
    fn sections_map_heroes_to_tiers() {
        let records = parse_tier_list(TIER_LIST_HTML);
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].name, "Chou");
        assert_eq!(records[0].tier, Tier::Known(Grade::S, None));
        assert_eq!(records[0].role, vec!["Fighter"]);

        assert_eq!(records[1].name, "Kagura");
        assert_eq!(records[1].tier, Tier::Known(Grade::A, None));
        assert_eq!(records[1].role, vec!["Mage", "Support"]);

        // Non-tier section headers degrade to Unknown, hero still kept.
        assert_eq!(records[2].tier, Tier::Unknown);
    }

    #[test]
    fn patch_notes_group_by_version() {
        let records = parse_tier_list(TIER_LIST_HTML);
        let patches = &records[0].patch_changes;
        assert_eq!(patches.len(), 2);

        assert_eq!(patches[0].version, "1.8.42");
        assert_eq!(
            patches[0].changes,
            vec!["Skill 2 cooldown reduced", "Base HP increased"]
        );
        assert_eq!(patches[1].version, "current");
        assert_eq!(patches[1].changes, vec!["Still a top ban pick"]);
    }

    #[test]
    fn header_tier_accepts_both_orders() {
        assert_eq!(parse_header_tier("Tier S"), Tier::Known(Grade::S, None));
        assert_eq!(parse_header_tier("S Tier"), Tier::Known(Grade::S, None));
        assert_eq!(
            parse_header_tier("The B+ Tier picks"),
            Tier::parse("B+")
        );
        assert_eq!(parse_header_tier("Conclusion"), Tier::Unknown);
    }

    #[test]
    fn tier_list_without_sections_is_empty() {
        assert!(parse_tier_list("<html><body><p>404</p></body></html>").is_empty());
    }
}
