//! Config parsing and profile/preset resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;

pub use model::{SCHEMA_CONFIG_V1, SarifmatchConfigV1};
pub use presets::PROFILES;
pub use resolve::{Overrides, ResolvedConfig};

/// Parse `sarifmatch.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<SarifmatchConfigV1> {
    let cfg: SarifmatchConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective settings (preset + config keys + CLI overrides).
pub fn resolve_config(
    cfg: SarifmatchConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
