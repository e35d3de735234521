//! Property tests for the lore-core store.

use std::fs;
use std::path::Path;

use lore_core::slug::{resolve_dir_path, resolve_entry_path};
use lore_core::{
    Entry, FsStore, LoreError, LoreStore, LorebookMeta, StoreConfig, find_matching_entries,
    list_location_entries,
};
use tempfile::TempDir;

fn store() -> (TempDir, FsStore) {
    let tmp = TempDir::new().unwrap();
    let store = FsStore::new(StoreConfig::new(
        tmp.path().join("user"),
        tmp.path().join("presets"),
    ));
    (tmp, store)
}

/// Ship a preset lorebook with one entry.
fn ship_preset(root: &Path, slug: &str) {
    let dir = root.join("presets").join(slug);
    fs::create_dir_all(dir.join("characters")).unwrap();
    fs::write(dir.join("_meta.json"), r#"{"name":"The Tavern"}"#).unwrap();
    fs::write(
        dir.join("characters/gabrielle.json"),
        r#"{"name":"Gabrielle","keywords":["gabrielle"],"priority":5}"#,
    )
    .unwrap();
}

fn paths(matches: &[lore_core::MatchedEntry]) -> Vec<&str> {
    matches.iter().map(|m| m.path.as_str()).collect()
}

#[tokio::test]
async fn save_then_load_is_deep_equal() {
    let (_tmp, store) = store();
    store.create("quest", "Quest", false).await.unwrap();
    let entry = Entry::new("Sage")
        .with_content("Keeper of the old roads.\nSpeaks in riddles.")
        .with_keyword("sage")
        .with_keyword("hermit")
        .with_regex(r"old\s+man")
        .with_priority(-3)
        .with_enabled(false);

    store.save("quest", "characters/sage", &entry).await.unwrap();
    assert_eq!(
        store.load("quest", "/characters/sage/").await.unwrap(),
        Some(entry)
    );
}

#[tokio::test]
async fn deleting_last_entry_prunes_empty_ancestors() {
    let (tmp, store) = store();
    store.create("quest", "Quest", false).await.unwrap();
    let book = tmp.path().join("user/quest");

    store.save("quest", "a/b/c/leaf", &Entry::new("Leaf")).await.unwrap();
    assert!(store.delete("quest", "a/b/c/leaf").await.unwrap());
    assert!(!book.join("a").exists());
    assert!(book.join("_meta.json").exists());

    store.save("quest", "a/b/c/leaf", &Entry::new("Leaf")).await.unwrap();
    store.save("quest", "a/other", &Entry::new("Other")).await.unwrap();
    store.delete("quest", "a/b/c/leaf").await.unwrap();
    assert!(!book.join("a/b").exists());
    assert!(book.join("a/other.json").exists());
}

#[test]
fn traversal_is_rejected_for_every_root() {
    for slug in ["quest", "tavern", "a", "deep-world_2"] {
        let root = Path::new("/srv/lore").join(slug);
        assert!(matches!(
            resolve_entry_path(&root, "../../etc/passwd"),
            Err(LoreError::PathTraversal(_))
        ));
        assert!(matches!(
            resolve_dir_path(&root, "../../../tmp"),
            Err(LoreError::PathTraversal(_))
        ));
    }
}

#[tokio::test]
async fn traversal_is_rejected_through_the_store() {
    let (_tmp, store) = store();
    store.create("quest", "Quest", false).await.unwrap();
    assert!(matches!(
        store.save("quest", "../escape", &Entry::new("x")).await,
        Err(LoreError::PathTraversal(_))
    ));
    assert!(matches!(
        store.create_folder("quest", "../../outside").await,
        Err(LoreError::PathTraversal(_))
    ));
}

#[tokio::test]
async fn matching_ranks_by_priority_and_skips_disabled() {
    let (_tmp, store) = store();
    store.create("inn", "Inn", false).await.unwrap();
    let records = [
        ("places/tavern", Entry::new("Tavern").with_keyword("tavern").with_priority(10)),
        (
            "people/gabrielle",
            Entry::new("Gabrielle").with_keyword("gabrielle").with_priority(5),
        ),
        (
            "people/dark-knight",
            Entry::new("Dark Knight").with_regex(r"dark\s*knight").with_priority(15),
        ),
        (
            "people/disabled",
            Entry::new("Ghost")
                .with_keyword("tavern")
                .with_priority(100)
                .with_enabled(false),
        ),
    ];
    for (path, entry) in &records {
        store.save("inn", path, entry).await.unwrap();
    }

    let hits = find_matching_entries(&store, "inn", "I enter the tavern and see Gabrielle")
        .await
        .unwrap();
    assert_eq!(paths(&hits), vec!["places/tavern", "people/gabrielle"]);

    let hits = find_matching_entries(&store, "inn", "darkknight approaches")
        .await
        .unwrap();
    assert_eq!(paths(&hits), vec!["people/dark-knight"]);

    let hits = find_matching_entries(&store, "inn", "tavern darkknight gabrielle")
        .await
        .unwrap();
    assert!(!paths(&hits).contains(&"people/disabled"));
}

#[tokio::test]
async fn invalid_pattern_never_raises() {
    let (_tmp, store) = store();
    store.create("inn", "Inn", false).await.unwrap();
    let entry = Entry::new("Bard").with_regex("[invalid").with_keyword("bard");
    store.save("inn", "people/bard", &entry).await.unwrap();

    let hits = find_matching_entries(&store, "inn", "a bard sings").await.unwrap();
    assert_eq!(paths(&hits), vec!["people/bard"]);
    let hits = find_matching_entries(&store, "inn", "[invalid").await.unwrap();
    assert!(hits.is_empty());
}

#[tokio::test]
async fn presets_are_immutable_until_shadowed() {
    let (tmp, store) = store();
    ship_preset(tmp.path(), "tavern");
    let entry = Entry::new("Barkeep");
    let meta = LorebookMeta::new("Renamed");

    let immutable = |r: Result<(), LoreError>| matches!(r, Err(LoreError::PresetImmutable(_)));
    assert!(immutable(store.save("tavern", "people/barkeep", &entry).await));
    assert!(immutable(store.delete("tavern", "characters/gabrielle").await.map(drop)));
    assert!(immutable(store.create_folder("tavern", "rooms").await));
    assert!(immutable(store.delete_folder("tavern", "characters").await.map(drop)));
    assert!(immutable(store.delete_lorebook("tavern").await.map(drop)));
    assert!(immutable(store.save_meta("tavern", &meta).await));

    // Reads still work.
    assert!(store.load("tavern", "characters/gabrielle").await.unwrap().is_some());
    assert!(!tmp.path().join("user/tavern").exists());

    store.copy("tavern", "tavern", "My Tavern").await.unwrap();
    store.save("tavern", "people/barkeep", &entry).await.unwrap();
    assert!(store.delete("tavern", "characters/gabrielle").await.unwrap());
    store.create_folder("tavern", "rooms").await.unwrap();
    assert!(store.delete_folder("tavern", "rooms").await.unwrap());
    store.save_meta("tavern", &meta).await.unwrap();
    assert!(store.delete_lorebook("tavern").await.unwrap());

    let preset_file = tmp.path().join("presets/tavern/characters/gabrielle.json");
    assert!(preset_file.exists());
}

#[tokio::test]
async fn user_copy_shadows_preset_until_deleted() {
    let (tmp, store) = store();
    ship_preset(tmp.path(), "tavern");
    store.create("tavern", "Fresh Tavern", false).await.unwrap();

    assert!(store.load("tavern", "characters/gabrielle").await.unwrap().is_none());
    assert!(store.scan_tree("tavern").await.unwrap().is_empty());
    assert_eq!(
        store.load_meta("tavern").await.unwrap().unwrap().name,
        "Fresh Tavern"
    );
    let listed = store.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert!(!listed[0].read_only);

    store.delete_lorebook("tavern").await.unwrap();
    assert!(store.load("tavern", "characters/gabrielle").await.unwrap().is_some());
    assert!(store.list().await.unwrap()[0].read_only);
}

#[tokio::test]
async fn lorebooks_are_scoped() {
    let (_tmp, store) = store();
    store.create("a", "A", false).await.unwrap();
    store.create("b", "B", false).await.unwrap();
    let entry = Entry::new("Secret").with_keyword("secret");
    store.save("a", "locations/vault", &entry).await.unwrap();

    assert!(store.load("b", "locations/vault").await.unwrap().is_none());
    assert!(store.load_all("b").await.unwrap().is_empty());
    assert!(store.scan_tree("b").await.unwrap().is_empty());
    assert!(find_matching_entries(&store, "b", "secret").await.unwrap().is_empty());
    assert!(list_location_entries(&store, "b").await.unwrap().is_empty());
}

#[tokio::test]
async fn copies_do_not_share_content() {
    let (_tmp, store) = store();
    store.create("src", "Source", false).await.unwrap();
    store.save("src", "items/lamp", &Entry::new("Lamp")).await.unwrap();
    store.copy("src", "dst", "Destination").await.unwrap().unwrap();

    store.save("src", "items/lamp", &Entry::new("Broken Lamp")).await.unwrap();
    assert_eq!(store.load("dst", "items/lamp").await.unwrap().unwrap().name, "Lamp");

    store.delete("dst", "items/lamp").await.unwrap();
    assert!(store.load("src", "items/lamp").await.unwrap().is_some());
}

#[tokio::test]
async fn quest_end_to_end() {
    let (_tmp, store) = store();
    store.create("quest", "Quest", false).await.unwrap();
    store
        .save(
            "quest",
            "characters/sage",
            &Entry::new("Sage").with_keyword("sage").with_priority(10),
        )
        .await
        .unwrap();
    store
        .save(
            "quest",
            "locations/square",
            &Entry::new("Square").with_keyword("square").with_priority(5),
        )
        .await
        .unwrap();

    let locations = list_location_entries(&store, "quest").await.unwrap();
    assert_eq!(paths(&locations), vec!["locations/square"]);

    let hits = find_matching_entries(&store, "quest", "I see the sage in the square")
        .await
        .unwrap();
    assert_eq!(paths(&hits), vec!["characters/sage", "locations/square"]);
    assert_eq!(hits[0].entry.priority, 10);
    assert_eq!(hits[1].entry.priority, 5);
}

#[tokio::test]
async fn store_works_behind_a_trait_object() {
    let (_tmp, store) = store();
    let dynamic: &dyn LoreStore = &store;
    dynamic.create("quest", "Quest", false).await.unwrap();
    dynamic
        .save("quest", "locations/well", &Entry::new("Well").with_keyword("well"))
        .await
        .unwrap();
    let hits = find_matching_entries(dynamic, "quest", "by the well").await.unwrap();
    assert_eq!(hits.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn overlapping_saves_to_one_path_all_succeed() {
    let (tmp, store) = store();
    store.create("quest", "Quest", false).await.unwrap();

    for round in 0..20 {
        let writers: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    let entry = Entry::new(format!("Sage {round}-{i}")).with_keyword("sage");
                    store.save("quest", "characters/sage", &entry).await
                })
            })
            .collect();
        for writer in writers {
            writer.await.unwrap().unwrap();
        }

        let stored = store.load("quest", "characters/sage").await.unwrap().unwrap();
        assert!(stored.name.starts_with(&format!("Sage {round}-")));
    }

    let leftovers: Vec<_> = fs::read_dir(tmp.path().join("user/quest/characters"))
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(leftovers, vec!["sage.json"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_sibling_deletes_clean_up_shared_parent() {
    let (tmp, store) = store();
    store.create("quest", "Quest", false).await.unwrap();
    store.save("quest", "goals/side/find-ring", &Entry::new("Ring")).await.unwrap();
    store.save("quest", "goals/side/find-cup", &Entry::new("Cup")).await.unwrap();

    let first = {
        let store = store.clone();
        tokio::spawn(async move { store.delete("quest", "goals/side/find-ring").await })
    };
    let second = {
        let store = store.clone();
        tokio::spawn(async move { store.delete("quest", "goals/side/find-cup").await })
    };
    assert!(first.await.unwrap().unwrap());
    assert!(second.await.unwrap().unwrap());

    let book = tmp.path().join("user/quest");
    assert!(!book.join("goals").exists());
    assert!(book.join("_meta.json").exists());
}
