use std::sync::Arc;

use pretty_assertions::assert_eq;

use urg_core::clock::SteppingClock;
use urg_core::domain::{Guide, GuidePatch, IncidentType, NewGuide, NewIncident};
use urg_core::kv::{KvStore, MemoryStore, UnavailableStore};
use urg_core::repo::Record;
use urg_core::Store;

fn store_with(mem: &Arc<MemoryStore>) -> Store {
    Store::with_clock(Arc::clone(mem), SteppingClock::new(1_767_225_600_000, 1_000))
}

fn guide(title: &str, category: &str) -> NewGuide {
    NewGuide {
        title: title.to_string(),
        body: format!("{title} body"),
        category: category.to_string(),
    }
}

#[test]
fn created_record_reads_back_identically() {
    let mem = Arc::new(MemoryStore::new());
    let store = store_with(&mem);

    let created = store.guides().create(guide("Inondation", "INONDATION")).unwrap();
    assert!(created.id.starts_with("guide_1767225600000_"));
    assert_eq!(created.created_at, "2026-01-01T00:00:00.000Z");

    let fetched = store.guides().get_by_id(&created.id).unwrap();
    assert_eq!(fetched, Some(created));
}

#[test]
fn incident_coordinates_read_back_bit_for_bit() {
    let mem = Arc::new(MemoryStore::new());
    let store = store_with(&mem);
    let incidents = store.incidents();

    // Known values that a fast, non-exact float parser reads back 1 ULP off, then a
    // deterministic xorshift sweep over [-90, 90).
    let mut coordinates = vec![(-50.242286024228996, -20.499818049982494)];
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    for _ in 0..500 {
        let mut next = || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 11) as f64 / (1u64 << 53) as f64 * 180.0 - 90.0
        };
        coordinates.push((next(), next()));
    }

    for (latitude, longitude) in coordinates {
        let created = incidents
            .create(NewIncident {
                incident_type: IncidentType::CivilProblem,
                subtype: "NID_DE_POULE".to_string(),
                latitude,
                longitude,
                address: None,
                description: "nid de poule".to_string(),
                victim_count: None,
                danger_level: None,
                reporter_id: None,
                attachments: None,
                region: None,
            })
            .unwrap();
        let fetched = incidents.get_by_id(&created.id).unwrap().expect("stored");
        assert_eq!(fetched.latitude.to_bits(), latitude.to_bits());
        assert_eq!(fetched.longitude.to_bits(), longitude.to_bits());
        assert_eq!(fetched, created);
    }
}

#[test]
fn list_preserves_creation_order_across_updates_and_deletes() {
    let mem = Arc::new(MemoryStore::new());
    let store = store_with(&mem);
    let guides = store.guides();

    let a = guides.create(guide("A", "X")).unwrap();
    let b = guides.create(guide("B", "X")).unwrap();
    let c = guides.create(guide("C", "Y")).unwrap();

    guides
        .update(
            &a.id,
            GuidePatch {
                title: Some("A2".to_string()),
                ..GuidePatch::default()
            },
        )
        .unwrap();
    assert!(guides.delete(&b.id).unwrap());

    let titles: Vec<String> = guides.list_all().unwrap().into_iter().map(|g| g.title).collect();
    assert_eq!(titles, vec!["A2".to_string(), "C".to_string()]);
    assert_eq!(guides.get_by_category("Y").unwrap(), vec![c]);
}

#[test]
fn delete_reports_whether_a_record_was_removed() {
    let mem = Arc::new(MemoryStore::new());
    let store = store_with(&mem);
    let guides = store.guides();
    let g = guides.create(guide("A", "X")).unwrap();
    guides.create(guide("B", "X")).unwrap();

    assert!(!guides.delete("guide_0_missing").unwrap());
    assert_eq!(guides.list_all().unwrap().len(), 2);

    assert!(guides.delete(&g.id).unwrap());
    assert_eq!(guides.list_all().unwrap().len(), 1);
    assert_eq!(guides.get_by_id(&g.id).unwrap(), None);
}

#[test]
fn update_on_missing_id_writes_nothing() {
    let mem = Arc::new(MemoryStore::new());
    let store = store_with(&mem);
    store.guides().create(guide("A", "X")).unwrap();

    let before = mem.get(Guide::COLLECTION_KEY).unwrap();
    let writes_before = mem.write_count();

    let res = store
        .guides()
        .update(
            "guide_0_missing",
            GuidePatch {
                title: Some("nope".to_string()),
                ..GuidePatch::default()
            },
        )
        .unwrap();

    assert_eq!(res, None);
    assert_eq!(mem.write_count(), writes_before);
    assert_eq!(mem.get(Guide::COLLECTION_KEY).unwrap(), before);
}

#[test]
fn generic_filter_scans_the_collection() {
    let mem = Arc::new(MemoryStore::new());
    let store = store_with(&mem);
    store.guides().create(guide("Feu", "INCENDIE")).unwrap();
    store.guides().create(guide("Feu de forêt", "INCENDIE")).unwrap();
    store.guides().create(guide("Séisme", "SEISME")).unwrap();

    let hits = store
        .collection::<Guide>()
        .filter_by(|g| g.title.starts_with("Feu"))
        .unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(store.collection::<Guide>().count().unwrap(), 3);
}

#[test]
fn unavailable_storage_reads_empty_and_never_fails() {
    let store = Store::new(UnavailableStore);

    let created = store.guides().create(guide("A", "X")).unwrap();
    assert!(created.id.starts_with("guide_"));
    assert!(store.guides().list_all().unwrap().is_empty());
    assert_eq!(store.guides().get_by_id(&created.id).unwrap(), None);
    assert!(!store.guides().delete(&created.id).unwrap());
    assert_eq!(store.incidents().list_all().unwrap(), vec![]);
}

#[test]
fn corrupt_collection_reads_empty_but_refuses_writes() {
    let mem = Arc::new(MemoryStore::new());
    mem.set(Guide::COLLECTION_KEY, "{not json").unwrap();
    let store = store_with(&mem);

    assert!(store.guides().list_all().unwrap().is_empty());

    let err = store.guides().create(guide("A", "X")).unwrap_err();
    assert_eq!(err.code, "STORE_COLLECTION_CORRUPT");
    assert_eq!(
        mem.get(Guide::COLLECTION_KEY).unwrap().as_deref(),
        Some("{not json")
    );
}

#[test]
fn collections_are_stored_under_independent_keys() {
    let mem = Arc::new(MemoryStore::new());
    let store = store_with(&mem);
    store.guides().create(guide("A", "X")).unwrap();

    let raw = mem.get("urgences_guides").unwrap().expect("guides key");
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed[0]["titre"], "A");
    assert_eq!(parsed[0]["categorie"], "X");
    assert_eq!(mem.get("urgences_incidents").unwrap(), None);
}
