use std::sync::Arc;

use pretty_assertions::assert_eq;

use urg_core::domain::{
    AdminRole, Guide, GuidePatch, NewRegionalAdmin, Permissions, RegionalAdminPatch,
};
use urg_core::kv::{KvStore, MemoryStore};
use urg_core::repo::Record;
use urg_core::seed::{reference_guides, seed_reference_guides};
use urg_core::Store;

fn admin(name: &str, region: &str, active: bool) -> NewRegionalAdmin {
    NewRegionalAdmin {
        full_name: name.to_string(),
        email: format!("{}@example.org", name.to_lowercase().replace(' ', ".")),
        phone: "+212600000000".to_string(),
        region: region.to_string(),
        permissions: Permissions {
            read: true,
            edit: true,
            delete: false,
        },
        notifications_enabled: true,
        active,
    }
}

#[test]
fn region_lookup_excludes_inactive_admins() {
    let store = Store::new(MemoryStore::new());
    let admins = store.regional_admins();
    let a = admins.create(admin("Karim Alaoui", "Oriental", true)).unwrap();
    admins.create(admin("Nadia Bennani", "Oriental", false)).unwrap();
    admins.create(admin("Omar Tazi", "Souss-Massa", true)).unwrap();

    assert_eq!(a.role, AdminRole::RegionalAdmin);
    assert!(a.id.starts_with("admin_"));
    assert_eq!(admins.get_by_region("Oriental").unwrap(), vec![a.clone()]);

    admins
        .update(
            &a.id,
            RegionalAdminPatch {
                active: Some(false),
                ..RegionalAdminPatch::default()
            },
        )
        .unwrap()
        .unwrap();
    assert!(admins.get_by_region("Oriental").unwrap().is_empty());
    assert_eq!(admins.list_all().unwrap().len(), 3);
}

#[test]
fn admin_delete_and_lookup() {
    let store = Store::new(MemoryStore::new());
    let admins = store.regional_admins();
    let a = admins.create(admin("Karim Alaoui", "Oriental", true)).unwrap();

    assert_eq!(admins.get_by_id(&a.id).unwrap(), Some(a.clone()));
    assert!(admins.delete(&a.id).unwrap());
    assert_eq!(admins.get_by_id(&a.id).unwrap(), None);
}

#[test]
fn seeding_populates_one_guide_per_category() {
    let store = Store::new(MemoryStore::new());
    let summary = seed_reference_guides(&store).unwrap();
    assert_eq!(summary.inserted, reference_guides().len());
    assert!(!summary.skipped);

    let guides = store.guides();
    for category in ["INCENDIE", "SEISME", "PREMIERS_SECOURS"] {
        assert_eq!(guides.get_by_category(category).unwrap().len(), 1, "{category}");
    }
}

#[test]
fn seeding_twice_equals_seeding_once() {
    let mem = Arc::new(MemoryStore::new());
    let store = Store::new(Arc::clone(&mem));

    seed_reference_guides(&store).unwrap();
    let once = store.guides().list_all().unwrap();

    let second = seed_reference_guides(&store).unwrap();
    assert!(second.skipped);
    assert_eq!(second.inserted, 0);
    assert_eq!(store.guides().list_all().unwrap(), once);
}

#[test]
fn seeding_skips_when_any_guide_exists() {
    let store = Store::new(MemoryStore::new());
    let guides = store.guides();
    let seeded = seed_reference_guides(&store).unwrap();
    assert_eq!(seeded.inserted, 3);

    // Removing the reference guides but keeping a custom one must not re-seed.
    let custom = guides
        .create(urg_core::domain::NewGuide {
            title: "Vague de chaleur".to_string(),
            body: "Hydratez-vous".to_string(),
            category: "CANICULE".to_string(),
        })
        .unwrap();
    for g in guides.list_all().unwrap() {
        if g.id != custom.id {
            assert!(guides.delete(&g.id).unwrap());
        }
    }
    assert!(seed_reference_guides(&store).unwrap().skipped);
    assert_eq!(guides.list_all().unwrap(), vec![custom.clone()]);

    let renamed = guides
        .update(
            &custom.id,
            GuidePatch {
                category: Some("CHALEUR".to_string()),
                ..GuidePatch::default()
            },
        )
        .unwrap()
        .unwrap();
    assert_eq!(renamed.category, "CHALEUR");
    assert_eq!(renamed.title, custom.title);
}

#[test]
fn seeding_leaves_an_unreadable_guide_collection_alone() {
    let mem = Arc::new(MemoryStore::new());
    mem.set(Guide::COLLECTION_KEY, "{oops").unwrap();
    let store = Store::new(Arc::clone(&mem));

    let summary = seed_reference_guides(&store).unwrap();
    assert_eq!(summary.inserted, 0);
    assert!(summary.skipped);
    assert_eq!(
        mem.get(Guide::COLLECTION_KEY).unwrap().as_deref(),
        Some("{oops")
    );
    assert_eq!(store.guides().is_empty().unwrap_err().code, "STORE_COLLECTION_CORRUPT");

    // Other collections stay fully usable.
    assert!(store.incidents().list_all().unwrap().is_empty());
}
