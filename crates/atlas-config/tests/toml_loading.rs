//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var and cwd manipulation.

use atlas_config::AtlasConfig;
use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;

#[test]
fn loads_paths_and_corpus_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[paths]
lore_dir = "../wiki/sections"
data_dir = "out"

[corpus]
source_files = ["Ve.md", "Upoceax.md"]
"#,
        )?;

        let config: AtlasConfig = Figment::from(Serialized::defaults(AtlasConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.paths.lore_dir, "../wiki/sections");
        assert_eq!(config.paths.data_dir, "out");
        assert_eq!(config.corpus.source_files, vec!["Ve.md", "Upoceax.md"]);
        // Untouched keys keep their defaults.
        assert!(config.corpus.skip_headers.iter().any(|h| h == "geography"));
        Ok(())
    });
}

#[test]
fn loads_resolver_policy_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[resolver]
ancestry_depth = 5
min_name_len = 3
skip_names = ["the", "old"]
"#,
        )?;

        let config: AtlasConfig = Figment::from(Serialized::defaults(AtlasConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.resolver.ancestry_depth, 5);
        assert_eq!(config.resolver.min_name_len, 3);
        assert_eq!(config.resolver.snippet_radius, 50);
        assert_eq!(config.resolver.skip_names, vec!["the", "old"]);
        Ok(())
    });
}

#[test]
fn project_config_is_picked_up_from_atlas_dir() {
    Jail::expect_with(|jail| {
        jail.create_dir(".atlas")?;
        jail.create_file(
            ".atlas/config.toml",
            r#"
[paths]
data_dir = "curation"
"#,
        )?;

        let config = AtlasConfig::load_from(jail.directory()).expect("config loads");
        assert_eq!(config.paths.data_dir, "curation");
        assert_eq!(config.paths.lore_dir, "lore");
        Ok(())
    });
}

#[test]
fn invalid_project_config_is_rejected() {
    Jail::expect_with(|jail| {
        jail.create_dir(".atlas")?;
        jail.create_file(
            ".atlas/config.toml",
            r#"
[resolver]
ancestry_depth = 0
"#,
        )?;

        let err = AtlasConfig::load_from(jail.directory()).expect_err("should reject");
        assert!(err.to_string().contains("resolver.ancestry_depth"));
        Ok(())
    });
}
