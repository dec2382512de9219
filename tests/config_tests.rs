// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for configuration module

use realyou::Config;
use realyou::config::AppTheme;

#[test]
fn test_config_default() {
    // Test that default config can be created
    let config = Config::default();

    assert_eq!(
        config.app_theme,
        AppTheme::System,
        "App theme should follow the system by default"
    );
}

#[test]
fn test_config_roundtrip_equality() {
    // Two defaults must compare equal so config watching can detect changes
    assert_eq!(Config::default(), Config::default());

    let dark = Config {
        app_theme: AppTheme::Dark,
    };
    assert_ne!(Config::default(), dark);
}
