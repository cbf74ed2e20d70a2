//! Extractor for mlbbhero.com.
//!
//! The site uses a stable card-based layout, so this extractor is
//! selector-driven end to end: hero cards on the listing, dedicated
//! tier/build/emblem/counter sections on detail pages.

use async_trait::async_trait;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{info, warn};

use super::{map_batched, Extractor};
use crate::fetch::PageFetcher;
use crate::types::{Build, Emblem, HeroRecord, HeroStub, Tier};

pub const SOURCE: &str = "mlbbhero";

const DEFAULT_BASE_URL: &str = "https://www.mlbbhero.com";
const LISTING_PATH: &str = "/heroes";

const DETAIL_BATCH_WIDTH: usize = 5;
const DETAIL_BATCH_PAUSE: Duration = Duration::from_secs(1);

pub struct MlbbHeroExtractor {
    fetcher: PageFetcher,
    base_url: String,
}

impl MlbbHeroExtractor {
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

    async fn hero_list(&self) -> Vec<HeroStub> {
        let url = format!("{}{}", self.base_url, LISTING_PATH);
        match self.fetcher.get_text(&url).await {
            Ok(html) => parse_hero_cards(&html),
            Err(e) => {
                warn!(source = SOURCE, error = %e, "listing fetch failed");
                Vec::new()
            }
        }
    }

    async fn hero_details(&self, stub: HeroStub) -> HeroRecord {
        let url = format!("{}{}", self.base_url, stub.link);
        match self.fetcher.get_text(&url).await {
            Ok(html) => parse_hero_details(&html, stub),
            Err(e) => {
                warn!(source = SOURCE, hero = %stub.name, error = %e,
                      "detail fetch failed, keeping stub data");
                stub.into_record()
            }
        }
    }
}

#[async_trait]
impl Extractor for MlbbHeroExtractor {
    fn source(&self) -> &str {
        SOURCE
    }

    async fn extract(&self) -> Vec<HeroRecord> {
        let stubs = self.hero_list().await;
        if stubs.is_empty() {
            warn!(source = SOURCE, "no heroes found, skipping detail scraping");
            return Vec::new();
        }
        info!(source = SOURCE, count = stubs.len(), "heroes found on listing");

        map_batched(stubs, DETAIL_BATCH_WIDTH, DETAIL_BATCH_PAUSE, |stub| {
            self.hero_details(stub)
        })
        .await
    }
}

fn parse_hero_cards(html: &str) -> Vec<HeroStub> {
    let document = Html::parse_document(html);
    let card_sel = Selector::parse(".hero-card").unwrap();
    let name_sel = Selector::parse(".hero-name").unwrap();
    let role_sel = Selector::parse(".hero-role").unwrap();

    let mut stubs = Vec::new();

    for card in document.select(&card_sel) {
        let name = card
            .select(&name_sel)
            .next()
            .map(|e| element_text(&e))
            .unwrap_or_default();
        let Some(link) = card.value().attr("href") else {
            continue;
        };
        if name.is_empty() {
            continue;
        }

        let role = card
            .select(&role_sel)
            .next()
            .map(|e| split_roles(&element_text(&e)))
            .unwrap_or_default();

        stubs.push(HeroStub::new(name, link).with_role(role));
    }

    stubs
}

fn parse_hero_details(html: &str, stub: HeroStub) -> HeroRecord {
    let document = Html::parse_document(html);

    let tier = parse_tier(&document);
    let builds = parse_builds(&document);
    let emblems = parse_emblems(&document);
    let counters = parse_counters(&document);

    HeroRecord {
        name: stub.name,
        role: stub.role,
        tier,
        counters,
        builds,
        emblems,
        // Patch history lives on the tier-list sources, not here.
        ..HeroRecord::default()
    }
}

fn parse_tier(document: &Html) -> Tier {
    let tier_sel = Selector::parse(".hero-tier").unwrap();
    let tier_re = Regex::new(r"(?i)Tier\s*:\s*([SABCDF][+-]?)").unwrap();

    for element in document.select(&tier_sel) {
        if let Some(caps) = tier_re.captures(&element_text(&element)) {
            return Tier::parse(&caps[1]);
        }
    }
    Tier::Unknown
}

fn parse_builds(document: &Html) -> Vec<Build> {
    let section_sel = Selector::parse(".build-section").unwrap();
    let title_sel = Selector::parse(".build-title").unwrap();
    let item_sel = Selector::parse(".item-name").unwrap();

    let mut builds = Vec::new();

    for section in document.select(&section_sel) {
        let items: Vec<String> = section
            .select(&item_sel)
            .map(|e| element_text(&e))
            .filter(|t| !t.is_empty())
            .collect();
        if items.is_empty() {
            continue;
        }

        let name = section
            .select(&title_sel)
            .next()
            .map(|e| element_text(&e))
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| format!("Build {}", builds.len() + 1));

        builds.push(Build { name, items });
    }

    builds
}

fn parse_emblems(document: &Html) -> Vec<Emblem> {
    let section_sel = Selector::parse(".emblem-section").unwrap();
    let name_sel = Selector::parse(".emblem-name").unwrap();
    let talent_sel = Selector::parse(".talent").unwrap();

    let mut emblems = Vec::new();

    for section in document.select(&section_sel) {
        let Some(name) = section
            .select(&name_sel)
            .next()
            .map(|e| element_text(&e))
            .filter(|t| !t.is_empty())
        else {
            continue;
        };

        let talents = section
            .select(&talent_sel)
            .map(|e| element_text(&e))
            .filter(|t| !t.is_empty())
            .collect();

        emblems.push(Emblem { name, talents });
    }

    emblems
}

fn parse_counters(document: &Html) -> Vec<String> {
    let counter_sel = Selector::parse(".counter-hero").unwrap();
    let name_sel = Selector::parse(".counter-name").unwrap();

    document
        .select(&counter_sel)
        .filter_map(|e| e.select(&name_sel).next())
        .map(|e| element_text(&e))
        .filter(|t| !t.is_empty())
        .collect()
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
