//! Integration tests for catalog loading and translation
//!
//! These tests build real catalog directories on disk and exercise the
//! public API end to end: load, lookup, multi-file merging and global reloads.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

use po_translator::error::CatalogError;
use po_translator::i18n::{normalize, CatalogSource, Language, Translator, TranslatorRegistry};

// ==================== Test Helpers ====================

/// Write a catalog file into a directory
fn write_catalog(dir: &Path, file: &str, content: &str) {
    std::fs::write(dir.join(file), content).expect("Failed to write catalog");
}

/// Build a single-entry catalog
fn entry(original: &str, translated: &str) -> String {
    format!("msgid \"{}\"\nmsgstr \"{}\"\n\n", original, translated)
}

/// A catalog header block as written by gettext tools
const HEADER: &str = r#"# Statsy translations
msgid ""
msgstr ""
"Project-Id-Version: statsy\n"
"Content-Type: text/plain; charset=UTF-8\n"

"#;

// ==================== Lookup Tests ====================

#[test]
fn test_round_trip_and_missing_language() {
    let dir = TempDir::new().unwrap();
    write_catalog(dir.path(), "es.po", &entry("Hello", "Hola"));

    let registry = TranslatorRegistry::new();
    let translator = Translator::open("utils", CatalogSource::new(dir.path()), &registry).unwrap();

    assert_eq!(translator.lookup("Hello", "es"), "Hola");
    assert_eq!(translator.lookup("Hello", "fr"), "Hello");
}

#[test]
fn test_multiline_original_matches_single_line_query() {
    let dir = TempDir::new().unwrap();
    write_catalog(
        dir.path(),
        "fr.po",
        "msgid \"\"\n\"Hello \"\n\"world\"\nmsgstr \"Bonjour\"\n",
    );

    let registry = TranslatorRegistry::new();
    let translator = Translator::open("utils", CatalogSource::new(dir.path()), &registry).unwrap();

    assert_eq!(translator.lookup("Hello world", "fr"), "Bonjour");
}

#[test]
fn test_spanish_and_default_catalogs() {
    let dir = TempDir::new().unwrap();
    write_catalog(
        dir.path(),
        "es.po",
        &format!("{}{}", HEADER, entry("Current Status", "Estado actual")),
    );
    write_catalog(
        dir.path(),
        "messages.pot",
        &format!("{}{}", HEADER, entry("Current Status", "Status")),
    );

    let registry = TranslatorRegistry::new();
    let translator = Translator::open("utils", CatalogSource::new(dir.path()), &registry).unwrap();

    assert_eq!(translator.lookup("Current Status", "es"), "Estado actual");
    assert_eq!(translator.lookup("Current Status", "en"), "Current Status");
    assert_eq!(translator.lookup("Current Status", "messages"), "Status");
    assert_eq!(
        translator.languages(),
        vec![Language::new("es"), Language::new("messages")]
    );
    assert_eq!(translator.default_language(), Some(Language::new("messages")));
}

#[test]
fn test_header_never_becomes_an_entry() {
    let dir = TempDir::new().unwrap();
    write_catalog(dir.path(), "es.po", HEADER);

    let registry = TranslatorRegistry::new();
    let translator = Translator::open("utils", CatalogSource::new(dir.path()), &registry).unwrap();

    assert!(!translator.has_language("es"));
    assert_eq!(translator.lookup("", "es"), "");
}

#[test]
fn test_escapes_and_apostrophes_in_catalog() {
    let dir = TempDir::new().unwrap();
    write_catalog(
        dir.path(),
        "es.po",
        concat!(
            "msgid \"**Invite link:** \\n<{}>\"\n",
            "msgstr \"**Enlace de invitacion:** \\n<{}>\"\n\n",
            "msgid \"Supercell\u{2019}s Fan Content Policy\"\n",
            "msgstr \"Politica de contenido de Supercell\"\n",
        ),
    );

    let registry = TranslatorRegistry::new();
    let translator = Translator::open("utils", CatalogSource::new(dir.path()), &registry).unwrap();

    assert_eq!(
        translator.lookup("**Invite link:** \n<{}>", "es"),
        "**Enlace de invitacion:** <{}>"
    );
    assert_eq!(
        translator.lookup("Supercell's Fan Content Policy", "es"),
        "Politica de contenido de Supercell"
    );
}

#[test]
fn test_translators_are_independent() {
    let utils_dir = TempDir::new().unwrap();
    let coc_dir = TempDir::new().unwrap();
    write_catalog(utils_dir.path(), "es.po", &entry("Trophies", "Trofeos (utils)"));
    write_catalog(coc_dir.path(), "es.po", &entry("Trophies", "Trofeos"));

    let registry = TranslatorRegistry::new();
    let utils =
        Translator::open("utils", CatalogSource::new(utils_dir.path()), &registry).unwrap();
    let coc =
        Translator::open("clash_of_clans", CatalogSource::new(coc_dir.path()), &registry).unwrap();

    assert_eq!(utils.translate("Trophies", "es"), "Trofeos (utils)");
    assert_eq!(coc.translate("Trophies", "es"), "Trofeos");
}

// ==================== Merge Tests ====================

#[test]
fn test_later_file_for_same_language_wins() {
    let dir = TempDir::new().unwrap();
    write_catalog(dir.path(), "es.po", &entry("Hello", "Hola"));
    write_catalog(dir.path(), "messages.po", &entry("Hello", "Hi (po)"));
    write_catalog(dir.path(), "messages.pot", &entry("Hello", "Hi (pot)"));

    let registry = TranslatorRegistry::new();
    let translator = Translator::open("utils", CatalogSource::new(dir.path()), &registry).unwrap();

    assert_eq!(translator.lookup("Hello", "messages"), "Hi (pot)");
    assert_eq!(translator.lookup("Hello", "es"), "Hola");
}

#[test]
fn test_duplicate_key_in_one_file_last_definition_wins() {
    let dir = TempDir::new().unwrap();
    write_catalog(
        dir.path(),
        "es.po",
        &format!("{}{}", entry("Hello", "Hola"), entry("Hello", "Buenas")),
    );

    let registry = TranslatorRegistry::new();
    let translator = Translator::open("utils", CatalogSource::new(dir.path()), &registry).unwrap();

    assert_eq!(translator.lookup("Hello", "es"), "Buenas");
}

#[test]
fn test_keys_that_normalize_alike_merge() {
    let dir = TempDir::new().unwrap();
    write_catalog(
        dir.path(),
        "es.po",
        &format!("{}{}", entry("Hello  world", "Hola"), entry("Hello world", "Hola mundo")),
    );

    let registry = TranslatorRegistry::new();
    let translator = Translator::open("utils", CatalogSource::new(dir.path()), &registry).unwrap();

    assert_eq!(translator.lookup("Hello world", "es"), "Hola mundo");
}

// ==================== Error Tests ====================

#[test]
fn test_missing_directory_is_surfaced() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("does-not-exist");

    let registry = TranslatorRegistry::new();
    let result = Translator::open("utils", CatalogSource::new(&missing), &registry);

    match result {
        Err(CatalogError::Unavailable { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected Unavailable, got {:?}", other.map(|t| t.name().to_string())),
    }
    // the failed translator was dropped by the caller, so nothing live remains
    assert_eq!(registry.len(), 0);
}

#[test]
fn test_empty_directory_is_not_an_error() {
    let dir = TempDir::new().unwrap();

    let registry = TranslatorRegistry::new();
    let translator = Translator::open("utils", CatalogSource::new(dir.path()), &registry).unwrap();

    assert!(translator.languages().is_empty());
    assert_eq!(translator.lookup("Hello", "es"), "Hello");
}

#[test]
fn test_initial_failure_recovers_on_reload() {
    let dir = TempDir::new().unwrap();
    let later = dir.path().join("later");

    let registry = TranslatorRegistry::new();
    let translator = Translator::new("utils", CatalogSource::new(&later), &registry);
    assert!(translator.load().is_err());

    std::fs::create_dir(&later).unwrap();
    write_catalog(&later, "es.po", &entry("Hello", "Hola"));

    let report = registry.reload_all();
    assert!(report.is_complete());
    assert_eq!(translator.lookup("Hello", "es"), "Hola");
}

// ==================== Reload Tests ====================

#[test]
fn test_reload_all_refreshes_every_translator() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    write_catalog(first.path(), "es.po", &entry("Hello", "Hola"));
    write_catalog(second.path(), "es.po", &entry("Goodbye", "Adios"));

    let registry = TranslatorRegistry::new();
    let a = Translator::open("a", CatalogSource::new(first.path()), &registry).unwrap();
    let b = Translator::open("b", CatalogSource::new(second.path()), &registry).unwrap();

    write_catalog(first.path(), "es.po", &entry("Hello", "Buenas"));
    write_catalog(second.path(), "es.po", &entry("Goodbye", "Chao"));

    let report = registry.reload_all();
    assert_eq!(report.reloaded.len(), 2);
    assert_eq!(a.lookup("Hello", "es"), "Buenas");
    assert_eq!(b.lookup("Goodbye", "es"), "Chao");
}

#[test]
fn test_concurrent_lookups_see_whole_snapshots() {
    let old_dir = TempDir::new().unwrap();
    let new_dir = TempDir::new().unwrap();
    write_catalog(old_dir.path(), "es.po", &entry("Hello", "Hola (old)"));
    write_catalog(old_dir.path(), "fr.po", &entry("Hello", "Bonjour (old)"));
    write_catalog(new_dir.path(), "es.po", &entry("Hello", "Hola (new)"));
    write_catalog(new_dir.path(), "fr.po", &entry("Hello", "Bonjour (new)"));

    let registry = TranslatorRegistry::new();
    let translator =
        Translator::open("utils", CatalogSource::new(old_dir.path()), &registry).unwrap();
    let old_source = CatalogSource::new(old_dir.path());
    let new_source = CatalogSource::new(new_dir.path());
    let done = Arc::new(AtomicBool::new(false));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let translator = Arc::clone(&translator);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let key = normalize("Hello", true);
                let mut observed = 0;
                while !done.load(Ordering::Relaxed) || observed == 0 {
                    let snapshot = translator.snapshot();
                    let es = snapshot.get("es", &key).expect("es is always loaded");
                    let fr = snapshot.get("fr", &key).expect("fr is always loaded");
                    assert_eq!(
                        es.ends_with("(old)"),
                        fr.ends_with("(old)"),
                        "mixed snapshot: {} / {}",
                        es,
                        fr
                    );
                    observed += 1;
                }
                observed
            })
        })
        .collect();

    for round in 0..50 {
        let source = if round % 2 == 0 { &new_source } else { &old_source };
        translator.load_from(source).unwrap();
    }
    done.store(true, Ordering::Relaxed);

    for reader in readers {
        assert!(reader.join().expect("reader panicked") > 0);
    }
}

#[test]
fn test_lookups_during_reload_all_never_miss() {
    let dir = TempDir::new().unwrap();
    let publish = |generation: &str| {
        for (language, word) in [("es", "Hola"), ("fr", "Bonjour")] {
            // rename so a reload never reads a half-written file
            let staged = dir.path().join(format!("{language}.staged"));
            std::fs::write(&staged, entry("Hello", &format!("{word} ({generation})"))).unwrap();
            std::fs::rename(&staged, dir.path().join(format!("{language}.po"))).unwrap();
        }
    };
    publish("old");

    let registry = TranslatorRegistry::new();
    let translator = Translator::open("utils", CatalogSource::new(dir.path()), &registry).unwrap();
    let done = Arc::new(AtomicBool::new(false));

    let readers: Vec<_> = ["es", "fr"]
        .into_iter()
        .map(|language| {
            let translator = Arc::clone(&translator);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut observed = 0;
                while !done.load(Ordering::Relaxed) || observed == 0 {
                    let translated = translator.translate("Hello", language);
                    assert!(
                        translated.ends_with("(old)") || translated.ends_with("(new)"),
                        "lookup missed during reload: {}",
                        translated
                    );
                    let snapshot = translator.snapshot();
                    let key = normalize("Hello", true);
                    let es = snapshot.get("es", &key).expect("es is always loaded");
                    let fr = snapshot.get("fr", &key).expect("fr is always loaded");
                    assert_eq!(es.ends_with("(old)"), fr.ends_with("(old)"));
                    observed += 1;
                }
                observed
            })
        })
        .collect();

    for round in 0..30 {
        publish(if round % 2 == 0 { "new" } else { "old" });
        let report = registry.reload_all();
        assert!(report.is_complete());
    }
    done.store(true, Ordering::Relaxed);

    for reader in readers {
        assert!(reader.join().expect("reader panicked") > 0);
    }
    assert_eq!(translator.lookup("Hello", "es"), "Hola (old)");
}
