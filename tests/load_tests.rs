//! Integration tests for [`LocaleInit::load`].

use anyhow::{Context, Result, ensure};
use indexmap::IndexMap;
use locale_init::{LocaleInit, LocaleRegistry, MemoryRegistry, StaticFramework};
use rstest::rstest;
use test_support::{Project, code, codes};

fn isolated() -> LocaleInit {
    let mut init = LocaleInit::new();
    init.ignore_settings_file();
    init.ignore_bundled_settings();
    init
}

#[test]
fn empty_load_yields_rescue_locale() -> Result<()> {
    let mut init = isolated();
    let mut registry = MemoryRegistry::new();
    let state = init.load(&mut registry).clone();
    let expected = IndexMap::from([(code("en"), "English".to_owned())]);
    ensure!(state.available == expected, "got {:?}", state.available);
    ensure!(state.default_locale == code("en"), "default locale");
    ensure!(state.default_name == "English", "default name");
    ensure!(registry.default_locale() == Some(&code("en")), "registry default");
    ensure!(registry.locale() == Some(&code("en")), "registry locale");
    ensure!(init.is_initialized(), "context initialized after load");
    Ok(())
}

#[test]
fn missing_settings_file_falls_back_to_bundled_defaults() -> Result<()> {
    let project = Project::new()?;
    let mut init = LocaleInit::builder().root_path(project.root()).build();
    let state = init.load(&mut MemoryRegistry::new());
    let available: Vec<&str> = state.available.keys().map(|code| code.as_str()).collect();
    ensure!(available == ["en"], "bundled available: {available:?}");
    ensure!(state.default_name == "English", "bundled default name");
    ensure!(codes(&state.rtl) == ["ar", "he", "fa", "ur"], "bundled rtl");
    Ok(())
}

#[test]
fn file_default_sets_default_locale_and_name() -> Result<()> {
    let project = Project::new()?;
    project.write_settings("available:\n  en: English\n  pl: Polski\ndefault: pl\n")?;
    let mut init = LocaleInit::builder().root_path(project.root()).build();
    let mut registry = MemoryRegistry::new();
    let state = init.load(&mut registry);
    ensure!(state.default_locale == code("pl"), "got {}", state.default_locale);
    ensure!(state.default_name == "Polski", "got {}", state.default_name);
    ensure!(state.locale == code("pl"), "active locale follows default");
    ensure!(codes(registry.available_locales()) == ["en", "pl"], "registry available");
    Ok(())
}

#[test]
fn load_is_idempotent() -> Result<()> {
    let project = Project::new()?;
    project.write_settings("available: [en, pl, de]\nfallbacks:\n  pl: [fr]\n")?;
    project.write("locales/en.yml", "en: {}\n")?;
    let mut init = LocaleInit::builder()
        .root_path(project.root())
        .load_path("locales/*.yml")
        .build();
    init.available_locale([("pl", "Polski")]);
    let mut registry = MemoryRegistry::new();
    let first = init.load(&mut registry).clone();
    let snapshot = registry.clone();
    let second = init.load(&mut registry).clone();
    ensure!(first == second, "derived state changed between loads");
    ensure!(registry == snapshot, "registry accumulated entries");
    ensure!(registry.load_path().len() == 1, "load path deduplicated");
    Ok(())
}

#[test]
fn changing_config_file_invalidates_caches() -> Result<()> {
    let project = Project::new()?;
    let first = project.write("first.yml", "available:\n  en: English\nnames:\n  xx: Old\n")?;
    let second = project.write(
        "second.yml",
        "available:\n  de: Deutsch\ndefault: de\nnames:\n  xx: New\n",
    )?;
    let mut init = LocaleInit::builder().config_file(first).build();
    let mut registry = MemoryRegistry::new();
    init.load(&mut registry);
    ensure!(init.resolve_code("xx").as_deref() == Some("Old"), "first names");

    init.set_config_file(second);
    ensure!(
        init.settings().default_locale() == Some(&code("de")),
        "settings reflect the new file"
    );
    ensure!(init.resolve_code("xx").as_deref() == Some("New"), "resolver rebuilt");
    let state = init.load(&mut registry);
    ensure!(state.default_locale == code("de"), "reloaded default");
    Ok(())
}

#[test]
fn environment_section_overrides_settings() -> Result<()> {
    let project = Project::new()?;
    project.write_settings(
        "available: [en, pl]\ndefault: en\nproduction:\n  available: [en, pl]\n  default: pl\n",
    )?;
    let mut init = LocaleInit::builder()
        .root_path(project.root())
        .environment("production")
        .build();
    let state = init.load(&mut MemoryRegistry::new());
    ensure!(state.default_locale == code("pl"), "production default");

    init.set_environment("staging");
    let fallback = init.load(&mut MemoryRegistry::new());
    ensure!(fallback.default_locale == code("en"), "missing section keeps top level");
    Ok(())
}

#[test]
fn framework_values_fill_lower_precedence() -> Result<()> {
    let framework = StaticFramework::new("static")
        .with_default_locale(code("de"))
        .with_available_locales([code("de"), code("fr")])
        .with_environment("test");
    let mut init = LocaleInit::builder().framework(Box::new(framework)).build();
    init.ignore_settings_file();
    let state = init.load(&mut MemoryRegistry::new());
    ensure!(state.default_locale == code("de"), "framework default");
    ensure!(state.default_name == "Deutsch", "name filled by resolver");
    ensure!(state.available.get("fr").map(String::as_str) == Some("Français"), "fr name");
    ensure!(init.environment().as_deref() == Some("test"), "framework environment");
    Ok(())
}

#[test]
fn block_default_wins_over_every_source() -> Result<()> {
    let project = Project::new()?;
    project.write_settings("available:\n  en: English\n  pl: Polski\ndefault: pl\n")?;
    let framework = StaticFramework::new("static").with_default_locale(code("fr"));
    let mut init = LocaleInit::builder()
        .framework(Box::new(framework))
        .root_path(project.root())
        .build();
    init.configure(|block| block.set_default_locale(code("en"), None));
    let state = init.load(&mut MemoryRegistry::new());
    ensure!(state.default_locale == code("en"), "block default");
    ensure!(state.default_name == "English", "name from merged mapping");
    let info = init.settings_info();
    ensure!(
        info == "static configuration, locale.yml, configuration block",
        "got {info}"
    );
    Ok(())
}

#[test]
fn load_path_patterns_are_expanded_into_registry() -> Result<()> {
    let project = Project::new()?;
    project.write("config/locales/en.yml", "en: {}\n")?;
    project.write("config/locales/pl.yml", "pl: {}\n")?;
    project.write("config/locales/readme.txt", "notes\n")?;
    let framework = StaticFramework::new("static")
        .with_root_path(project.root())
        .with_load_path("config/locales/*.yml");
    let mut init = LocaleInit::builder().framework(Box::new(framework)).build();
    init.ignore_settings_file();
    let mut registry = MemoryRegistry::new();
    init.load(&mut registry);
    let names: Vec<&str> = registry
        .load_path()
        .iter()
        .filter_map(|path| path.file_name())
        .collect();
    ensure!(names == ["en.yml", "pl.yml"], "got {names:?}");
    Ok(())
}

#[test]
fn reset_reverts_to_unloaded_state() -> Result<()> {
    let mut init = isolated();
    init.available_locale(["pl"]);
    init.load(&mut MemoryRegistry::new());
    init.reset();
    ensure!(!init.is_initialized(), "reset clears initialization");
    ensure!(init.loaded().is_none(), "reset drops loaded state");
    ensure!(init.configured_locales().is_empty(), "reset clears block");
    ensure!(!init.ignores_settings_file(), "reset clears flags");
    Ok(())
}

#[rstest]
#[case::available("pl", "pl")]
#[case::unavailable("ja", "en")]
fn active_locale_requires_availability(
    #[case] requested: &str,
    #[case] expected: &str,
) -> Result<()> {
    let mut init = isolated();
    init.available_locale([("en", "English"), ("pl", "Polski")]);
    init.set_locale(code(requested));
    let state = init.load(&mut MemoryRegistry::new());
    ensure!(state.locale == code(expected), "got {}", state.locale);
    Ok(())
}

#[derive(Debug, Default)]
struct CountingRegistry {
    writes: usize,
}

impl LocaleRegistry for CountingRegistry {
    fn set_default_locale(&mut self, _code: &locale_init::LocaleCode) {
        self.writes += 1;
    }

    fn set_locale(&mut self, _code: &locale_init::LocaleCode) {
        self.writes += 1;
    }

    fn set_available_locales(&mut self, _codes: &[locale_init::LocaleCode]) {
        self.writes += 1;
    }

    fn set_fallbacks(&mut self, _fallbacks: &locale_init::FallbackMap) {
        self.writes += 1;
    }

    fn append_load_path(&mut self, _path: &camino::Utf8Path) {
        self.writes += 1;
    }
}

#[test]
fn custom_registries_receive_every_setting() -> Result<()> {
    let mut init = isolated();
    let mut registry = CountingRegistry::default();
    init.load(&mut registry);
    ensure!(registry.writes == 4, "expected four writes, got {}", registry.writes);
    let json = serde_json::to_value(init.loaded().context("loaded state")?)?;
    ensure!(json["default_locale"] == "en", "serialized state: {json}");
    Ok(())
}
