//! Content loading from a data directory.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tabletop::content::{
    Catalog, Coord, ContentLoader, LoadPolicy, LoaderConfig, MONSTER_KEYS,
};
use tabletop::core::{GameConfig, GameRng};
use tabletop::error::{ConfigError, LoadError};
use tabletop::game::Game;
use tabletop::games::monastery::MonasteryRules;

const TILES: &str = r#"[
    { "name": "1A", "grid": [["plain", "plain"], ["water", null]] },
    { "name": "2B", "grid": [["plain"]] }
]"#;

const BOARDS: &str = r#"[
    { "name": "First Blood", "nodes": ["1A", "2B"], "edges": [["1A", "2B"]] }
]"#;

const HEROES: &str = r#"[
    { "id": "Avric Albright", "archetype": "Healer", "health": 12 },
    { "id": "Ashrian", "archetype": "Healer", "health": 10 },
    { "id": "Grisban the Thirsty", "archetype": "Warrior", "health": 14 }
]"#;

const MONSTERS: &str = r#"[
    { "id": "Goblin Archer", "traits": ["cave"],
      "act1": [{ "health": 2 }, { "health": 5 }],
      "act2": [{ "health": 4 }, { "health": 7 }] }
]"#;

const MAIN_QUESTS: &str = r#"[
    { "id": "First Blood", "boards": ["A", "B"], "starting-locations": [[[0, 0]], [[1, 1]]],
      "monsters": [["goblin archer", "A"]] }
]"#;

const KNIGHT: &str = r#"[
    { "name": "Knight", "cards": [{ "name": "Oath of Honor" }, { "name": "Shield Slam" }] }
]"#;

fn write(dir: &Path, name: &str, text: &str) {
    fs::write(dir.join(name), text).unwrap();
}

fn data_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "tiles.json", TILES);
    write(dir.path(), "boards.json", BOARDS);
    write(dir.path(), "heroes.json", HEROES);
    write(dir.path(), "monsters.json", MONSTERS);
    write(dir.path(), "mainQuests.json", MAIN_QUESTS);
    fs::create_dir(dir.path().join("classes")).unwrap();
    write(&dir.path().join("classes"), "knight.json", KNIGHT);
    dir
}

fn load(dir: &Path, policy: LoadPolicy) -> Result<(Catalog, tabletop::content::LoadReport), LoadError> {
    let config = LoaderConfig::new(dir).with_policy(policy);
    ContentLoader::new(config).unwrap().load()
}

#[test]
fn test_full_load() {
    let dir = data_dir();
    let (catalog, report) = load(dir.path(), LoadPolicy::FailFast).unwrap();

    assert!(report.is_clean());
    assert_eq!(report.files_loaded, 6);
    assert_eq!(report.records_loaded, 9);

    assert_eq!(catalog.find_grid_board("1a").map(|b| b.width()), Some(2));
    assert!(catalog.find_graph_board("FIRST BLOOD").is_some());
    assert!(catalog.find_token("grisban the thirsty").is_some());
    assert_eq!(catalog.find_heroes("healer").len(), 2);
    assert_eq!(catalog.find_deck("knight").map(|d| d.len()), Some(2));
}

#[test]
fn test_quest_defaults_and_locations() {
    let dir = data_dir();
    let (catalog, _) = load(dir.path(), LoadPolicy::FailFast).unwrap();
    let quest = catalog.find_quest("first blood").unwrap();

    assert_eq!(quest.act, 1);
    assert_eq!(quest.boards, vec!["A".to_string(), "B".to_string()]);
    assert_eq!(quest.starting_locations_on("A"), &[Coord::new(0, 0)]);
    assert_eq!(quest.starting_locations_on("B"), &[Coord::new(1, 1)]);
    assert_eq!(quest.monsters[0].as_slice(), ["goblin archer", "A"]);
}

#[test]
fn test_monster_keys() {
    let dir = data_dir();
    let (catalog, _) = load(dir.path(), LoadPolicy::FailFast).unwrap();
    let archer = catalog.find_monster("goblin archer").unwrap();

    let keys: Vec<_> = archer.keys().collect();
    assert_eq!(keys, MONSTER_KEYS.to_vec());
    assert_eq!(archer.master(2).map(|t| t.properties.get_int("health", 0)), Some(7));
}

#[test]
fn test_lookup_miss_is_none() {
    let dir = data_dir();
    let (catalog, _) = load(dir.path(), LoadPolicy::FailFast).unwrap();

    assert!(catalog.find_quest("The Shadow Rune").is_none());
    assert!(catalog.find_side_quest("First Blood").is_none());
    assert!(catalog.find_monster("Ettin").is_none());
    assert!(catalog.find_heroes("Mage").is_empty());
}

#[test]
fn test_copies_do_not_touch_catalog() {
    let dir = data_dir();
    let (catalog, _) = load(dir.path(), LoadPolicy::FailFast).unwrap();

    let mut deck = catalog.find_deck("Knight").unwrap();
    deck.shuffle(&mut GameRng::new(3));
    deck.draw();
    let mut quest = catalog.find_quest("First Blood").unwrap();
    quest.boards.clear();

    assert_eq!(catalog.find_deck("Knight").map(|d| d.len()), Some(2));
    assert_eq!(catalog.find_quest("First Blood").map(|q| q.boards.len()), Some(2));
}

#[test]
fn test_missing_required_file() {
    let dir = data_dir();
    fs::remove_file(dir.path().join("monsters.json")).unwrap();

    let result = load(dir.path(), LoadPolicy::SkipInvalid);
    assert!(matches!(result, Err(LoadError::MissingDataFile(path)) if path.ends_with("monsters.json")));
}

#[test]
fn test_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");

    let result = ContentLoader::new(LoaderConfig::new(&missing));
    assert_eq!(result.unwrap_err(), ConfigError::MissingDataFile(missing));
}

#[test]
fn test_skip_invalid_keeps_going() {
    let dir = data_dir();
    write(
        dir.path(),
        "mainQuests.json",
        r#"[{ "id": "Good" }, { "id": "Bad", "boards": ["A"], "starting-locations": [[[0, 0]], [[1, 1]]] }]"#,
    );
    write(dir.path(), "sideQuests.json", "{ broken");

    let (catalog, report) = load(dir.path(), LoadPolicy::SkipInvalid).unwrap();

    assert!(catalog.find_quest("Good").is_some());
    assert!(catalog.find_quest("Bad").is_none());
    assert_eq!(report.failures.len(), 2);
    assert!(report
        .failures
        .iter()
        .any(|e| matches!(e, LoadError::InvalidRecord { index: 1, .. })));
    assert!(report.failures.iter().any(|e| matches!(e, LoadError::Json { .. })));
}

#[test]
fn test_fail_fast_stops() {
    let dir = data_dir();
    write(dir.path(), "heroes.json", r#"[{ "health": 3 }]"#);

    let result = load(dir.path(), LoadPolicy::FailFast);
    assert!(matches!(result, Err(LoadError::InvalidRecord { index: 0, .. })));
}

#[test]
fn test_catalog_shared_between_games() {
    let dir = data_dir();
    let (catalog, _) = load(dir.path(), LoadPolicy::FailFast).unwrap();
    let catalog = Arc::new(catalog);

    let a = Game::new(GameConfig::new(2), MonasteryRules::new())
        .unwrap()
        .with_catalog(Arc::clone(&catalog));
    let b = a.copy();

    assert_eq!(Arc::strong_count(&catalog), 3);
    assert!(b.catalog().and_then(|c| c.find_deck("knight")).is_some());
}

#[test]
fn test_null_and_nested_fields_load() {
    let dir = data_dir();
    write(
        dir.path(),
        "heroes.json",
        r#"[{ "id": "Avric", "archetype": "Healer", "portrait": null,
              "attack": { "dice": ["blue"] } }]"#,
    );

    let (catalog, report) = load(dir.path(), LoadPolicy::FailFast).unwrap();

    assert!(report.is_clean());
    let avric = catalog.find_token("avric").unwrap();
    assert!(avric.properties.get("portrait").is_some_and(|v| v.is_null()));
    assert!(avric.properties.get("attack").and_then(|v| v.as_json()).is_some());
    assert_eq!(catalog.find_heroes("healer").len(), 1);
}
