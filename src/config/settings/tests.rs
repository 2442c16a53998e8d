use super::*;

#[test]
fn test_defaults() {
    let config = PluginConfig::default();
    assert_eq!(config.driver_basename, "nvidia-driver");
    assert_eq!(config.kmod_prefix, "kmod-nvidia");
    assert_eq!(config.kernel_name, "kernel");
    assert_eq!(config.kernel_core_name, "kernel-core");
    assert_eq!(config.naming, KmodNaming::Stream);
    assert_eq!(config.log_tag, "NVIDIA");
}

#[test]
fn test_driver_pattern_matches_streams_only() {
    let config = PluginConfig::default();
    assert!(config.is_driver("nvidia-driver-latest"));
    assert!(config.is_driver("nvidia-driver-branch-460"));
    assert!(!config.is_driver("nvidia-driver"));
    assert!(!config.is_driver("nvidia-driver-libs"));
    assert!(!config.is_driver("nvidia-driver-branch-46"));
    assert!(!config.is_driver("nvidia-driver-latest-dkms"));
}

#[test]
fn test_kmod_detection_skips_dkms() {
    let config = PluginConfig::default();
    assert!(config.is_kmod("kmod-nvidia-latest"));
    assert!(config.is_kmod("kmod-nvidia-460.32.03-4.18.0-240"));
    assert!(!config.is_kmod("kmod-nvidia-latest-dkms"));
    assert!(!config.is_kmod("nvidia-kmod-common"));
    assert!(config.is_dkms("kmod-nvidia-latest-dkms"));
}

#[test]
fn test_kdl_overrides_defaults() {
    let config = PluginConfig::from_kdl_str(
        r#"
        // versioned builds, single driver package
        driver "nvidia-driver"
        driver-pattern "^nvidia-driver$"
        naming "versioned"
        tag "NV"
        "#,
    )
    .unwrap();

    assert_eq!(config.naming, KmodNaming::Versioned);
    assert!(config.is_driver("nvidia-driver"));
    assert!(!config.is_driver("nvidia-driver-latest"));
    assert_eq!(config.log_tag, "NV");
    assert_eq!(config.kmod_prefix, "kmod-nvidia");
}

#[test]
fn test_kdl_unknown_key_is_rejected() {
    let err = PluginConfig::from_kdl_str(r#"colour "always""#).unwrap_err();
    assert!(err.to_string().contains("Unknown setting: 'colour'"));
}

#[test]
fn test_kdl_invalid_values_are_rejected() {
    assert!(matches!(
        PluginConfig::from_kdl_str(r#"naming "weird""#),
        Err(KmodError::ConfigError(_))
    ));
    assert!(matches!(
        PluginConfig::from_kdl_str(r#"driver-pattern "[unclosed""#),
        Err(KmodError::InvalidRegex(_))
    ));
    assert!(matches!(
        PluginConfig::from_kdl_str(r#"kmod-prefix "  ""#),
        Err(KmodError::ConfigError(_))
    ));
    assert!(matches!(
        PluginConfig::from_kdl_str("kernel"),
        Err(KmodError::ConfigError(_))
    ));
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kmodguard.kdl");
    fs::write(&path, "kernel \"kernel-lt\"\nkernel-core \"kernel-lt-core\"\n").unwrap();

    let config = PluginConfig::load(Some(&path)).unwrap();
    assert!(config.is_kernel("kernel-lt"));
    assert_eq!(config.kernel_core_name, "kernel-lt-core");
}

#[test]
fn test_load_missing_explicit_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = PluginConfig::load(Some(&dir.path().join("absent.kdl"))).unwrap_err();
    assert!(matches!(err, KmodError::IoError { .. }));
}
