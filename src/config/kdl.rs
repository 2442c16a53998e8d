use crate::error::{KmodError, Result};
use kdl::{KdlDocument, KdlNode};

const VALID_KEYS: &[&str] = &[
    "driver",
    "driver-pattern",
    "kmod-prefix",
    "kernel",
    "kernel-core",
    "dkms-marker",
    "naming",
    "tag",
];

/// Settings as written in the file, before validation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSettings {
    pub driver: Option<String>,
    pub driver_pattern: Option<String>,
    pub kmod_prefix: Option<String>,
    pub kernel: Option<String>,
    pub kernel_core: Option<String>,
    pub dkms_marker: Option<String>,
    pub naming: Option<String>,
    pub tag: Option<String>,
}

pub fn parse_settings(content: &str) -> Result<RawSettings> {
    let doc: KdlDocument = content.parse().map_err(|e: kdl::KdlError| {
        let err_msg = e.to_string();
        let hint = if err_msg.contains("unexpected end of file") {
            "\nHint: You might be missing a closing quote or brace."
        } else if err_msg.contains("expected") {
            "\nHint: Each setting is a single line: key \"value\""
        } else {
            ""
        };

        KmodError::ConfigError(format!("KDL parsing error: {}{}", err_msg, hint))
    })?;

    let mut raw = RawSettings::default();

    for node in doc.nodes() {
        let key = node.name().value();
        let value = first_string(node)?;

        let slot = match key {
            "driver" => &mut raw.driver,
            "driver-pattern" => &mut raw.driver_pattern,
            "kmod-prefix" => &mut raw.kmod_prefix,
            "kernel" => &mut raw.kernel,
            "kernel-core" => &mut raw.kernel_core,
            "dkms-marker" => &mut raw.dkms_marker,
            "naming" => &mut raw.naming,
            "tag" => &mut raw.tag,
            other => {
                return Err(KmodError::ConfigError(format!(
                    "Unknown setting: '{}'. Valid settings: {}",
                    other,
                    VALID_KEYS.join(", ")
                )));
            }
        };
        *slot = Some(value);
    }

    Ok(raw)
}

fn first_string(node: &KdlNode) -> Result<String> {
    node.entries()
        .first()
        .and_then(|entry| entry.value().as_string())
        .map(str::to_string)
        .ok_or_else(|| {
            KmodError::ConfigError(format!(
                "Setting '{}' needs a string value, e.g. {} \"...\"",
                node.name().value(),
                node.name().value()
            ))
        })
}
