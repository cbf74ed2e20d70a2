//! Extractor for the Mobile Legends Fandom wiki.
//!
//! The wiki has no stable markup contract, so listing extraction tries
//! the hero table first and falls back to harvesting wiki links, and
//! detail extraction scans section headers rather than fixed selectors.

use async_trait::async_trait;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{info, warn};

use super::{map_batched, Extractor};
use crate::fetch::PageFetcher;
use crate::types::{Build, HeroRecord, HeroStub, Tier};

pub const SOURCE: &str = "fandom";

const DEFAULT_BASE_URL: &str = "https://mobile-legends.fandom.com";
const LISTING_PATH: &str = "/wiki/List_of_heroes";

// Reduced fan-out; the wiki rate-limits aggressively.
const DETAIL_BATCH_WIDTH: usize = 3;
const DETAIL_BATCH_PAUSE: Duration = Duration::from_secs(3);

/// Known hero roster, used to recover names from free-form counter and
/// matchup text where the wiki gives prose instead of structured data.
pub(crate) const KNOWN_HEROES: &[&str] = &[
    "Aldous", "Alice", "Alpha", "Alucard", "Angela", "Argus", "Atlas", "Aulus", "Aurora",
    "Badang", "Balmond", "Bane", "Barats", "Baxia", "Beatrix", "Belerick", "Benedetta", "Brody",
    "Bruno", "Carmilla", "Cecilion", "Chang'e", "Chou", "Claude", "Clint", "Cyclops", "Diggie",
    "Dyrroth", "Esmeralda", "Estes", "Eudora", "Fanny", "Faramis", "Franco", "Fredrinn", "Freya",
    "Gatotkaca", "Gloo", "Gord", "Granger", "Grock", "Guinevere", "Gusion", "Hanabi", "Hanzo",
    "Harith", "Harley", "Hayabusa", "Helcurt", "Hilda", "Hylos", "Irithel", "Jawhead", "Johnson",
    "Julian", "Kadita", "Kagura", "Kaja", "Karrie", "Khaleed", "Khufra", "Kimmy", "Lancelot",
    "Lapu-Lapu", "Layla", "Leomord", "Lesley", "Ling", "Lolita", "Lunox", "Luo Yi", "Lylia",
    "Martis", "Masha", "Mathilda", "Melissa", "Minotaur", "Minsitthar", "Miya", "Moskov", "Nana",
    "Natalia", "Natan", "Odette", "Paquito", "Pharsa", "Phoveus", "Popol and Kupa", "Rafaela",
    "Roger", "Ruby", "Saber", "Selena", "Silvanna", "Sun", "Terizla", "Thamuz", "Tigreal",
    "Uranus", "Vale", "Valentina", "Valir", "Vexana", "Wanwan", "X.Borg", "Xavier",
    "Yi Sun-shin", "Yin", "Yu Zhong", "Yve", "Zhask", "Zilong",
];

pub struct FandomExtractor {
    fetcher: PageFetcher,
    base_url: String,
}

impl FandomExtractor {
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
        let html = match self.fetcher.get_text(&url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(source = SOURCE, error = %e, "listing fetch failed");
                return Vec::new();
            }
        };

        let stubs = parse_hero_table(&html);
        if !stubs.is_empty() {
            return stubs;
        }

        // Alternate DOM strategy: the hero table moves around between
        // wiki redesigns, but /wiki/ links to hero pages survive.
        info!(source = SOURCE, "hero table empty, harvesting wiki links");
        parse_hero_links(&html)
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
impl Extractor for FandomExtractor {
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

/// Primary listing strategy: the big article table with one hero per
/// row (name + link in column 1, roles in column 2).
fn parse_hero_table(html: &str) -> Vec<HeroStub> {
    let document = Html::parse_document(html);
    let table_sel = Selector::parse(".article-table").unwrap();
    let row_sel = Selector::parse("tr").unwrap();
    let cell_sel = Selector::parse("td").unwrap();
    let link_sel = Selector::parse("a").unwrap();

    let mut stubs = Vec::new();

    for table in document.select(&table_sel) {
        let rows: Vec<_> = table.select(&row_sel).collect();
        // Short tables are nav boxes, not the hero list.
        if rows.len() <= 5 {
            continue;
        }

        for row in rows.iter().skip(1) {
            let cells: Vec<_> = row.select(&cell_sel).collect();
            if cells.len() < 3 {
                continue;
            }

            let Some(link) = cells[1].select(&link_sel).next() else {
                continue;
            };
            let name = element_text(&link);
            let Some(href) = link.value().attr("href") else {
                continue;
            };

            let role_text = element_text(&cells[2]);
            let role = if role_text.is_empty() {
                vec!["Unknown".to_string()]
            } else {
                split_roles(&role_text)
            };

            if !name.is_empty() {
                stubs.push(HeroStub::new(name, href).with_role(role));
            }
        }
    }

    stubs
}

/// Alternate listing strategy: any parser-output link that plausibly
/// points at a hero page. Roles are unavailable here.
fn parse_hero_links(html: &str) -> Vec<HeroStub> {
    let document = Html::parse_document(html);
    let link_sel = Selector::parse(".mw-parser-output a").unwrap();

    let mut stubs: Vec<HeroStub> = Vec::new();

    for link in document.select(&link_sel) {
        let name = element_text(&link);
        let Some(href) = link.value().attr("href") else {
            continue;
        };

        if !href.contains("/wiki/")
            || href.contains("Category:")
            || href.contains("File:")
            || href.contains("Template:")
        {
            continue;
        }
        // Hero names are short; long link text is navigation or prose.
        if name.is_empty() || name.len() >= 15 {
            continue;
        }
        if stubs
            .iter()
            .any(|s| s.name.eq_ignore_ascii_case(&name))
        {
            continue;
        }

        stubs.push(HeroStub::new(name, href).with_role(vec!["Unknown".to_string()]));
    }

    stubs
}

/// Extract tier, counters, and builds from a hero's wiki page by
/// scanning section headers, since the wiki has no fixed layout.
fn parse_hero_details(html: &str, stub: HeroStub) -> HeroRecord {
    let document = Html::parse_document(html);
    let header_sel = Selector::parse(".mw-parser-output h2, .mw-parser-output h3, .mw-parser-output h4")
        .unwrap();
    let li_sel = Selector::parse("li").unwrap();

    let mut counters: Vec<String> = Vec::new();
    let mut builds: Vec<Build> = Vec::new();

    for header in document.select(&header_sel) {
        let header_text = element_text(&header).to_lowercase();

        if header_text.contains("counter")
            || header_text.contains("weakness")
            || header_text.contains("countered by")
        {
            let mut section_text = String::new();
            for element in section_elements(&header) {
                match element.value().name() {
                    "ul" | "ol" => {
                        for item in element.select(&li_sel) {
                            for name in extract_hero_names(&element_text(&item)) {
                                if !counters.contains(&name) {
                                    counters.push(name);
                                }
                            }
                        }
                    }
                    "p" => {
                        section_text.push(' ');
                        section_text.push_str(&element_text(&element));
                    }
                    _ => {}
                }
            }
            if counters.is_empty() && !section_text.is_empty() {
                for name in extract_hero_names(&section_text) {
                    if !counters.contains(&name) {
                        counters.push(name);
                    }
                }
            }
        } else if header_text.contains("build")
            || header_text.contains("item")
            || header_text.contains("equipment")
        {
            let mut items: Vec<String> = Vec::new();
            for element in section_elements(&header) {
                if matches!(element.value().name(), "ul" | "ol") {
                    for item in element.select(&li_sel) {
                        let text = element_text(&item);
                        if !text.is_empty() {
                            items.push(text);
                        }
                    }
                }
            }
            if !items.is_empty() {
                let name = clean_section_title(&element_text(&header));
                builds.push(Build {
                    name: if name.is_empty() {
                        format!("Build {}", builds.len() + 1)
                    } else {
                        name
                    },
                    items,
                });
            }
        }
    }

    let tier = parse_page_tier(&document);

    HeroRecord {
        name: stub.name,
        role: stub.role,
        tier,
        counters,
        builds,
        // Emblems and patch notes are not published on the wiki.
        ..HeroRecord::default()
    }
}

/// Sibling elements of a section header up to the next header.
fn section_elements<'a>(header: &ElementRef<'a>) -> Vec<ElementRef<'a>> {
    let mut elements = Vec::new();
    for sibling in header.next_siblings() {
        if let Some(element) = ElementRef::wrap(sibling) {
            if matches!(element.value().name(), "h2" | "h3" | "h4") {
                break;
            }
            elements.push(element);
        }
    }
    elements
}

fn parse_page_tier(document: &Html) -> Tier {
    let text: String = document.root_element().text().collect::<Vec<_>>().join(" ");
    let tier_re = Regex::new(r"(?i)Tier\s*:?\s*([SABCDF][+-]?)").unwrap();
    tier_re
        .captures(&text)
        .map(|caps| Tier::parse(&caps[1]))
        .unwrap_or(Tier::Unknown)
}

/// Pull hero names out of free-form text: roster matches first, then a
/// capitalized-word heuristic when the roster finds nothing.
pub(crate) fn extract_hero_names(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut names: Vec<String> = KNOWN_HEROES
        .iter()
        .filter(|hero| lower.contains(&hero.to_lowercase()))
        .map(|hero| hero.to_string())
        .collect();

    if names.is_empty() {
        const STOPWORDS: &[&str] = &["The", "And", "With", "For", "Against", "Hero", "Item"];
        for word in text.split_whitespace() {
            let word = word.trim_matches(|c: char| c.is_ascii_punctuation());
            if word.len() > 2
                && word.len() < 15
                && word.chars().next().is_some_and(|c| c.is_uppercase())
                && !STOPWORDS.contains(&word)
                && !names.iter().any(|n| n == word)
            {
                names.push(word.to_string());
            }
        }
    }

    names
}

fn clean_section_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string()
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
