//! Tests for layered settings loading

use std::path::PathBuf;

use orgtree::config::Settings;

#[test]
fn given_env_override_when_loading_then_data_file_is_set() {
    std::env::set_var("ORGTREE_DATA_FILE", "/tmp/env-org.txt");

    let settings = Settings::load().unwrap();

    assert_eq!(settings.data_file, Some(PathBuf::from("/tmp/env-org.txt")));
    std::env::remove_var("ORGTREE_DATA_FILE");
}

#[test]
fn given_env_bool_when_loading_then_autosave_parses() {
    std::env::set_var("ORGTREE_AUTOSAVE", "true");

    let settings = Settings::load().unwrap();

    assert!(settings.autosave);
    std::env::remove_var("ORGTREE_AUTOSAVE");
}
