//! Developer tasks (schema generation, fixture conformance, explain coverage).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use sarifmatch_test_util::normalize_nondeterministic;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the project root (parent of xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .or_else(|_| std::env::current_dir())
        .unwrap_or_else(|_| PathBuf::from("."));

    // If we're in the xtask directory, go up one level
    if manifest_dir.ends_with("xtask") {
        manifest_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(manifest_dir)
    } else {
        manifest_dir
    }
}

fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

fn receipt_fixtures_dir() -> PathBuf {
    project_root().join("tests").join("fixtures").join("receipts")
}

/// Schema definition with its target filename.
struct SchemaEntry {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_receipt_schema() -> schemars::Schema {
    schema_for!(sarifmatch_types::MatchReceipt)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(sarifmatch_settings::SarifmatchConfigV1)
}

fn schema_entries() -> Vec<SchemaEntry> {
    vec![
        SchemaEntry {
            filename: "sarifmatch.receipt.v1.json",
            generate: generate_receipt_schema,
        },
        SchemaEntry {
            filename: "sarifmatch.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

/// Emit schemas to the schemas/ directory.
fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for entry in schema_entries() {
        let json = serialize_schema(&(entry.generate)())?;
        let path = dir.join(entry.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Validate that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for entry in schema_entries() {
        let path = dir.join(entry.filename);
        if !path.exists() {
            missing.push(entry.filename);
            continue;
        }

        let expected = serialize_schema(&(entry.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(entry.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }

    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {}", name);
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {}", name);
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Validate receipt fixtures against the receipt schema");
    eprintln!("  explain-coverage  Validate all check IDs and codes have explanations");
}

/// Dotted lowercase namespace (`region.bounds`) or snake_case token (`line_out_of_range`).
fn is_valid_token(s: &str, allow_dots: bool) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || (allow_dots && c == '.'))
}

/// Check that a path is clean: no absolute paths, no `../`, forward slashes only.
fn is_clean_path(path: &str) -> bool {
    !(path.starts_with('/')
        || path.starts_with('\\')
        || path.contains("..")
        || path.contains('\\')
        // Reject Windows-style drive letters like C:
        || (path.len() >= 2 && path.as_bytes()[1] == b':'))
}

/// Per-receipt checks beyond the schema: id/code tokens, path hygiene,
/// fingerprint shape, counts that agree with the arrays, and normalized
/// nondeterministic fields.
fn receipt_hygiene(filename: &str, value: &serde_json::Value) -> Vec<String> {
    let mut errors = Vec::new();
    let findings = value
        .get("findings")
        .and_then(|v| v.as_array())
        .map(Vec::as_slice)
        .unwrap_or_default();

    for (i, finding) in findings.iter().enumerate() {
        let check_id = finding.get("check_id").and_then(|v| v.as_str()).unwrap_or_default();
        if !is_valid_token(check_id, true) {
            errors.push(format!("{filename}: findings[{i}].check_id {check_id:?} is not a token"));
        }
        let code = finding.get("code").and_then(|v| v.as_str()).unwrap_or_default();
        if !is_valid_token(code, false) {
            errors.push(format!("{filename}: findings[{i}].code {code:?} is not a token"));
        }
        if let Some(path) = finding.pointer("/location/path").and_then(|v| v.as_str())
            && !is_clean_path(path)
        {
            errors.push(format!("{filename}: findings[{i}].location.path {path:?} is not clean"));
        }
        if let Some(fp) = finding.get("fingerprint").and_then(|v| v.as_str())
            && (fp.len() != 64 || !fp.chars().all(|c| c.is_ascii_hexdigit()))
        {
            errors.push(format!("{filename}: findings[{i}].fingerprint is not a sha256 hex digest"));
        }
    }

    let snippets = value
        .get("snippets")
        .and_then(|v| v.as_array())
        .map(Vec::len)
        .unwrap_or_default();
    let count = |key: &str| value.pointer(&format!("/data/{key}")).and_then(|v| v.as_u64());
    if count("findings_emitted") != Some(findings.len() as u64) {
        errors.push(format!("{filename}: data.findings_emitted disagrees with findings[]"));
    }
    if count("snippets_resolved") != Some(snippets as u64) {
        errors.push(format!("{filename}: data.snippets_resolved disagrees with snippets[]"));
    }

    let verdict = value.get("verdict").and_then(|v| v.as_str());
    let expected_verdict = if findings.is_empty() { "match" } else { "mismatch" };
    if verdict != Some(expected_verdict) {
        errors.push(format!("{filename}: verdict {verdict:?} disagrees with findings[]"));
    }

    if normalize_nondeterministic(value.clone()) != *value {
        errors.push(format!(
            "{filename}: nondeterministic fields are not normalized (placeholders expected)"
        ));
    }

    errors
}

/// Validate receipt fixtures against the generated receipt schema.
fn conform() -> anyhow::Result<()> {
    let schema_value = serde_json::to_value(generate_receipt_schema())
        .context("Failed to convert receipt schema to JSON")?;
    let compiled = jsonschema::validator_for(&schema_value)
        .map_err(|e| anyhow::anyhow!("Failed to compile schema: {}", e))?;
    println!("✓ sarifmatch.receipt.v1 schema compiles");

    let fixtures_dir = receipt_fixtures_dir();
    if !fixtures_dir.exists() {
        bail!("receipt fixtures not found at {}", fixtures_dir.display());
    }

    let mut fixture_count = 0;
    let mut errors = Vec::new();

    let mut paths: Vec<PathBuf> = fs::read_dir(&fixtures_dir)
        .context("Failed to read receipt fixtures")?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<_, _>>()?;
    paths.sort();

    for path in paths {
        if path.extension().is_none_or(|ext| ext != "json") {
            continue;
        }

        let filename = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let content =
            fs::read_to_string(&path).with_context(|| format!("Failed to read {}", filename))?;
        let value: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {} as JSON", filename))?;

        for err in compiled.iter_errors(&value) {
            errors.push(format!("{}: schema validation: {}", filename, err));
        }
        errors.extend(receipt_hygiene(&filename, &value));

        fixture_count += 1;
        println!("  ✓ {}", filename);
    }

    if fixture_count == 0 {
        bail!("no receipt fixtures found in {}", fixtures_dir.display());
    }

    if !errors.is_empty() {
        eprintln!("\nConformance errors:");
        for err in &errors {
            eprintln!("  - {}", err);
        }
        bail!("Conformance validation failed with {} errors", errors.len());
    }

    println!("\n✓ {} receipt fixtures conform", fixture_count);
    Ok(())
}

/// Validate that all check IDs and codes have explanations.
fn explain_coverage() -> anyhow::Result<()> {
    use sarifmatch_types::explain::{all_check_ids, all_codes, lookup_explanation};

    let check_ids = all_check_ids();
    let codes = all_codes();
    let mut errors = Vec::new();

    for (kind, identifier) in check_ids
        .iter()
        .map(|id| ("Check ID", id))
        .chain(codes.iter().map(|code| ("Code", code)))
    {
        match lookup_explanation(identifier) {
            Some(exp) => {
                for (field, text) in [
                    ("title", exp.title),
                    ("description", exp.description),
                    ("remediation", exp.remediation),
                ] {
                    if text.is_empty() {
                        errors.push(format!("{kind} '{identifier}' has empty {field}"));
                    }
                }
            }
            None => errors.push(format!("{kind} '{identifier}' has no explanation")),
        }
    }

    for code in codes {
        if sarifmatch_types::ids::check_for_code(code).is_none() {
            errors.push(format!("Code '{code}' is not grouped under any check"));
        }
    }
    for check in check_ids {
        if sarifmatch_types::ids::codes_for_check(check).is_empty() {
            errors.push(format!("Check ID '{check}' raises no codes"));
        }
    }

    if errors.is_empty() {
        println!("✓ {} check IDs have explanations", check_ids.len());
        println!("✓ {} codes have explanations", codes.len());
        println!("\n✓ All explain coverage checks passed!");
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {}", error);
        }
        bail!(
            "Explain coverage validation failed with {} errors",
            errors.len()
        )
    }
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            println!("{}", sarifmatch_types::SCHEMA_RECEIPT_V1);
            println!("{}", sarifmatch_settings::SCHEMA_CONFIG_V1);
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
