//! Cross-source record merging.
//!
//! Pure, synchronous reduction over fully-collected extractor output.
//! Records are grouped case-insensitively by name; field-level
//! reconciliation runs in extractor order, so the rules here decide
//! which source wins each field.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use tracing::{info, warn};

use crate::types::{CanonicalHero, HeroRecord};

/// Merge per-source record lists into one canonical record per hero.
///
/// Reconciliation rules, applied to every record after the first for a
/// given key:
/// - `role`, `counters`: insertion-order set union; nothing is removed.
/// - `tier`: replaced only while the existing value is `Unknown`, so
///   the first source with a known tier wins.
/// - `builds`, `emblems`, `patch_changes`: concatenation, verbatim.
///
/// Records with an empty name are skipped and counted. An entirely
/// empty input produces an empty (still valid) canonical list.
pub fn merge_records(
    per_source: Vec<(String, Vec<HeroRecord>)>,
    merged_at: DateTime<Utc>,
) -> Vec<CanonicalHero> {
    let mut merged: IndexMap<String, CanonicalHero> = IndexMap::new();
    let mut total_in = 0usize;
    let mut skipped = 0usize;

    for (source, records) in per_source {
        for record in records {
            total_in += 1;

            if record.name.trim().is_empty() {
                skipped += 1;
                continue;
            }

            let key = record.name.to_lowercase();
            match merged.get_mut(&key) {
                None => {
                    merged.insert(key, seed_canonical(&source, record, merged_at));
                }
                Some(existing) => reconcile(existing, &source, record),
            }
        }
    }

    if skipped > 0 {
        warn!(skipped, "dropped records with missing names during merge");
    }
    if total_in == 0 {
        warn!("merge received no records from any source");
    }
    info!(
        input = total_in,
        canonical = merged.len(),
        "merged source records"
    );

    merged.into_values().collect()
}

fn seed_canonical(source: &str, record: HeroRecord, merged_at: DateTime<Utc>) -> CanonicalHero {
    CanonicalHero {
        name: record.name,
        role: dedupe(record.role),
        tier: record.tier,
        counters: dedupe(record.counters),
        builds: record.builds,
        emblems: record.emblems,
        patch_changes: record.patch_changes,
        sources: vec![source.to_string()],
        last_updated: merged_at,
    }
}

fn reconcile(existing: &mut CanonicalHero, source: &str, incoming: HeroRecord) {
    union_into(&mut existing.role, incoming.role);

    // Known tiers are sticky: only the Unknown sentinel gets replaced,
    // never a real grade. First-known-wins across source order.
    if !existing.tier.is_known() && incoming.tier.is_known() {
        existing.tier = incoming.tier;
    }

    union_into(&mut existing.counters, incoming.counters);

    existing.builds.extend(incoming.builds);
    existing.emblems.extend(incoming.emblems);
    existing.patch_changes.extend(incoming.patch_changes);

    if !existing.sources.iter().any(|s| s == source) {
        existing.sources.push(source.to_string());
    }
}

fn dedupe(values: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(values.len());
    union_into(&mut out, values);
    out
}

fn union_into(existing: &mut Vec<String>, incoming: Vec<String>) {
    for value in incoming {
        if !existing.contains(&value) {
            existing.push(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Build, Tier};

    fn hero(name: &str) -> HeroRecord {
        HeroRecord::new(name)
    }

    fn sourced(source: &str, records: Vec<HeroRecord>) -> (String, Vec<HeroRecord>) {
        (source.to_string(), records)
    }

    #[test]
    fn same_name_different_case_merges_to_one_record() {
        let a = HeroRecord {
            role: vec!["Fighter".into()],
            tier: Tier::parse("S"),
            counters: vec!["Franco".into()],
            ..hero("Chou")
        };
        let b = HeroRecord {
            role: vec!["Assassin".into()],
            tier: Tier::Unknown,
            counters: vec!["Khufra".into()],
            builds: vec![Build {
                name: "B1".into(),
                items: vec!["Item1".into()],
            }],
            ..hero("chou")
        };

        let merged = merge_records(
            vec![sourced("fandom", vec![a]), sourced("mlbbhero", vec![b])],
            Utc::now(),
        );

        assert_eq!(merged.len(), 1);
        let chou = &merged[0];
        // Display name comes from the first record seen.
        assert_eq!(chou.name, "Chou");
        assert_eq!(chou.role, vec!["Fighter", "Assassin"]);
        assert_eq!(chou.tier, Tier::parse("S"));
        assert_eq!(chou.counters, vec!["Franco", "Khufra"]);
        assert_eq!(chou.builds.len(), 1);
        assert_eq!(chou.builds[0].name, "B1");
        assert_eq!(chou.sources, vec!["fandom", "mlbbhero"]);
    }

    #[test]
    fn first_known_tier_wins_over_later_known_tier() {
        let merged = merge_records(
            vec![
                sourced("a", vec![HeroRecord { tier: Tier::parse("S"), ..hero("Chou") }]),
                sourced("b", vec![HeroRecord { tier: Tier::parse("A"), ..hero("Chou") }]),
            ],
            Utc::now(),
        );
        assert_eq!(merged[0].tier, Tier::parse("S"));
    }

    #[test]
    fn unknown_tier_is_replaced_by_later_known_tier() {
        let merged = merge_records(
            vec![
                sourced("a", vec![HeroRecord { tier: Tier::Unknown, ..hero("Chou") }]),
                sourced("b", vec![HeroRecord { tier: Tier::parse("A"), ..hero("Chou") }]),
            ],
            Utc::now(),
        );
        assert_eq!(merged[0].tier, Tier::parse("A"));
    }

    #[test]
    fn known_tier_is_never_downgraded_to_unknown() {
        let merged = merge_records(
            vec![
                sourced("a", vec![HeroRecord { tier: Tier::parse("B+"), ..hero("Chou") }]),
                sourced("b", vec![HeroRecord { tier: Tier::Unknown, ..hero("Chou") }]),
            ],
            Utc::now(),
        );
        assert_eq!(merged[0].tier, Tier::parse("B+"));
    }

    #[test]
    fn list_fields_concatenate_without_dedup() {
        let build = Build {
            name: "Standard".into(),
            items: vec!["Boots".into()],
        };
        let record = || HeroRecord {
            builds: vec![build.clone(), build.clone()],
            ..hero("Chou")
        };

        let merged = merge_records(
            vec![
                sourced("a", vec![record()]),
                sourced("b", vec![record()]),
                sourced("c", vec![record()]),
            ],
            Utc::now(),
        );

        // 3 sources x 2 builds each, kept verbatim.
        assert_eq!(merged[0].builds.len(), 6);
    }

    #[test]
    fn roles_and_counters_are_deduplicated_sets() {
        let a = HeroRecord {
            role: vec!["Tank".into(), "Tank".into()],
            counters: vec!["Chou".into()],
            ..hero("Franco")
        };
        let b = HeroRecord {
            role: vec!["Tank".into(), "Support".into()],
            counters: vec!["Chou".into(), "Wanwan".into()],
            ..hero("Franco")
        };

        let merged = merge_records(
            vec![sourced("a", vec![a]), sourced("b", vec![b])],
            Utc::now(),
        );

        assert_eq!(merged[0].role, vec!["Tank", "Support"]);
        assert_eq!(merged[0].counters, vec!["Chou", "Wanwan"]);
    }

    #[test]
    fn empty_names_are_skipped_without_crashing() {
        let merged = merge_records(
            vec![sourced(
                "a",
                vec![hero(""), hero("   "), hero("Chou")],
            )],
            Utc::now(),
        );
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].name, "Chou");
    }

    #[test]
    fn empty_input_yields_empty_canonical_list() {
        assert!(merge_records(Vec::new(), Utc::now()).is_empty());
        assert!(merge_records(vec![sourced("a", Vec::new())], Utc::now()).is_empty());
    }

    #[test]
    fn output_preserves_first_appearance_order() {
        let merged = merge_records(
            vec![
                sourced("a", vec![hero("Chou"), hero("Franco")]),
                sourced("b", vec![hero("Layla"), hero("chou")]),
            ],
            Utc::now(),
        );
        let names: Vec<_> = merged.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Chou", "Franco", "Layla"]);
    }

    #[test]
    fn merge_timestamp_is_applied_to_every_record() {
        let at = Utc::now();
        let merged = merge_records(vec![sourced("a", vec![hero("Chou"), hero("Miya")])], at);
        assert!(merged.iter().all(|h| h.last_updated == at));
    }
}
