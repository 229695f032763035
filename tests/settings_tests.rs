//! Integration tests for settings sources and their ignore flags.

use anyhow::{Result, bail, ensure};
use locale_init::settings::{FileOrigin, SettingsAggregator, read_settings};
use locale_init::{LocaleInit, MemoryRegistry, StaticFramework};
use test_support::{Project, code, codes, display_error_chain};

const SETTINGS: &str =
    "available:\n  en: English\n  pl: Polski\n  de: Deutsch\ndefault: pl\nrtl: [he]\n";

#[test]
fn ignoring_settings_file_removes_file_values() -> Result<()> {
    let project = Project::new()?;
    project.write_settings(SETTINGS)?;

    let mut with_file = LocaleInit::builder().root_path(project.root()).build();
    with_file.ignore_bundled_settings();
    let loaded = with_file.load(&mut MemoryRegistry::new()).clone();

    let mut without_file = LocaleInit::builder().root_path(project.root()).build();
    without_file.ignore_bundled_settings();
    without_file.ignore_settings_file();
    let ignored = without_file.load(&mut MemoryRegistry::new()).clone();

    ensure!(loaded.default_locale == code("pl"), "file default used");
    ensure!(loaded.available.len() == 3, "file locales used");
    ensure!(ignored.default_locale == code("en"), "rescue default used");
    ensure!(!ignored.available.contains_key("pl"), "file locales absent");
    ensure!(ignored.rtl.is_empty(), "file rtl absent");
    ensure!(without_file.settings().is_empty(), "settings source empty");
    Ok(())
}

#[test]
fn ignore_flags_have_three_forms() -> Result<()> {
    let mut init = LocaleInit::new();
    ensure!(!init.ignores_framework_settings(), "flag starts unset");
    init.ignore_framework_settings();
    ensure!(init.ignores_framework_settings(), "assert form sets flag");
    init.set_ignore_framework_settings(false);
    ensure!(!init.ignores_framework_settings(), "setter clears flag");
    Ok(())
}

#[test]
fn ignoring_framework_settings_hides_framework_values() -> Result<()> {
    let framework = StaticFramework::new("static")
        .with_default_locale(code("de"))
        .with_available_locales([code("de")]);
    let mut init = LocaleInit::builder().framework(Box::new(framework)).build();
    init.ignore_settings_file();
    ensure!(!init.settings_framework().is_empty(), "framework visible");
    init.ignore_framework_settings();
    ensure!(init.settings_framework().is_empty(), "framework hidden");
    let state = init.load(&mut MemoryRegistry::new());
    ensure!(state.default_locale == code("en"), "got {}", state.default_locale);
    ensure!(init.settings_info() == "defaults", "got {}", init.settings_info());
    Ok(())
}

#[test]
fn bundled_copy_skips_bundled_resolver_layer() -> Result<()> {
    let project = Project::new()?;
    let bundled = project.write(
        "bundled.yml",
        "names:\n  pl: Bundled Polish\n  de: Bundled German\n",
    )?;
    project.write_settings("locale_init_bundled: true\nnames:\n  pl: Polski\n")?;
    let init = LocaleInit::builder()
        .root_path(project.root())
        .bundled_settings_file(bundled)
        .build();
    ensure!(init.settings().is_bundled_copy(), "marker detected");
    ensure!(init.resolve_code("pl").as_deref() == Some("Polski"), "file name");
    ensure!(init.resolve_code("de").as_deref() == Some("de"), "bundled layer skipped");
    Ok(())
}

#[test]
fn user_owned_file_keeps_bundled_resolver_layer() -> Result<()> {
    let project = Project::new()?;
    let bundled = project.write("bundled.yml", "names:\n  de: Bundled German\n")?;
    project.write_settings("names:\n  pl: Polski\n")?;
    let init = LocaleInit::builder()
        .root_path(project.root())
        .bundled_settings_file(bundled)
        .build();
    ensure!(
        init.resolve_code("de").as_deref() == Some("Bundled German"),
        "bundled layer kept"
    );
    Ok(())
}

#[test]
fn malformed_settings_degrade_to_empty_source() -> Result<()> {
    let project = Project::new()?;
    project.write_settings("available: [en, pl\n")?;
    let mut init = LocaleInit::builder().root_path(project.root()).build();
    init.ignore_bundled_settings();
    let state = init.load(&mut MemoryRegistry::new());
    ensure!(state.default_locale == code("en"), "rescue default");
    ensure!(init.sources().settings_origin() == FileOrigin::File, "file origin");
    ensure!(init.settings().is_empty(), "unparsable file is empty");
    Ok(())
}

#[test]
fn norwegian_settings_file_keeps_every_key() -> Result<()> {
    let project = Project::new()?;
    project.write_settings("available: [en, no]\ndefault: no\nnames:\n  xx: 2024\n")?;
    let mut init = LocaleInit::builder().root_path(project.root()).build();
    init.ignore_bundled_settings();
    let state = init.load(&mut MemoryRegistry::new());
    ensure!(state.default_locale == code("no"), "got {}", state.default_locale);
    ensure!(state.locale == code("no"), "active locale follows default");
    let available: Vec<&str> = state.available.keys().map(|code| code.as_str()).collect();
    ensure!(available == ["en", "no"], "got {available:?}");
    ensure!(init.resolve_code("xx").as_deref() == Some("2024"), "numeric name read as text");
    Ok(())
}

#[test]
fn read_errors_name_the_settings_file() -> Result<()> {
    let project = Project::new()?;
    let path = project.write_settings("available: [en, pl\n")?;
    let Err(err) = read_settings(&path) else {
        bail!("expected a parse failure for {path}");
    };
    let chain = display_error_chain(&err);
    ensure!(
        chain.starts_with(&format!("failed to parse settings from {path}: ")),
        "got {chain}"
    );
    Ok(())
}

#[test]
fn config_file_defaults_under_root_path() -> Result<()> {
    let mut aggregator = SettingsAggregator::default();
    ensure!(aggregator.config_file().is_none(), "no root, no config file");
    aggregator.set_root_path(Some("/srv/app".into()));
    ensure!(
        aggregator.config_file().as_deref().map(|path| path.as_str())
            == Some("/srv/app/locale.yml"),
        "derived config file"
    );
    aggregator.set_config_file(Some("/etc/locale.yml".into()));
    ensure!(
        aggregator.config_file().as_deref().map(|path| path.as_str()) == Some("/etc/locale.yml"),
        "explicit config file"
    );
    Ok(())
}

#[test]
fn rtl_lists_merge_block_then_file() -> Result<()> {
    let project = Project::new()?;
    project.write_settings(SETTINGS)?;
    let mut init = LocaleInit::builder().root_path(project.root()).build();
    init.add_rtl_locales(["ar", "he"]);
    let state = init.load(&mut MemoryRegistry::new());
    ensure!(codes(&state.rtl) == ["ar", "he"], "got {:?}", codes(&state.rtl));
    Ok(())
}
