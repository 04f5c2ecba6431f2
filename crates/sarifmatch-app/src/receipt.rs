use anyhow::Context;
use sarifmatch_render::{
    RenderableData, RenderableFinding, RenderableLocation, RenderableReport, RenderableSnippet,
    RenderableVerdict,
};
use crate::failure::fingerprint;
use sarifmatch_types::{
    Finding, MatchData, MatchReceipt, RunMeta, SCHEMA_RECEIPT_V1, SnippetRecord, ToolMeta,
    Verdict, ids,
};
use time::OffsetDateTime;

pub fn parse_receipt_json(text: &str) -> anyhow::Result<MatchReceipt> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse receipt json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    if schema != SCHEMA_RECEIPT_V1 {
        anyhow::bail!("unknown receipt schema: {schema:?} (expected {SCHEMA_RECEIPT_V1})");
    }

    serde_json::from_value(value).context("parse sarifmatch receipt")
}

/// Receipt written when the tool itself failed before reaching a verdict.
pub fn runtime_error_receipt(message: &str) -> MatchReceipt {
    let now = OffsetDateTime::now_utc();
    MatchReceipt {
        schema: SCHEMA_RECEIPT_V1.to_string(),
        tool: ToolMeta {
            name: "sarifmatch".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        run: RunMeta {
            started_at: now,
            ended_at: Some(now),
            duration_ms: Some(0),
            project_dir: None,
            git: None,
        },
        verdict: Verdict::Mismatch,
        findings: vec![Finding {
            check_id: ids::CHECK_TOOL_RUNTIME.to_string(),
            code: ids::CODE_RUNTIME_ERROR.to_string(),
            message: message.to_string(),
            location: None,
            fingerprint: Some(fingerprint(
                ids::CHECK_TOOL_RUNTIME,
                ids::CODE_RUNTIME_ERROR,
                None,
                None,
            )),
            data: serde_json::Value::Null,
        }],
        snippets: Vec::new(),
        data: MatchData {
            findings_total: 1,
            findings_emitted: 1,
            ..MatchData::default()
        },
    }
}

pub fn serialize_receipt(receipt: &MatchReceipt) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(receipt).context("serialize receipt")
}

pub fn to_renderable(receipt: &MatchReceipt) -> RenderableReport {
    RenderableReport {
        verdict: match receipt.verdict {
            Verdict::Match => RenderableVerdict::Match,
            Verdict::Mismatch => RenderableVerdict::Mismatch,
        },
        findings: receipt.findings.iter().map(renderable_finding).collect(),
        snippets: receipt.snippets.iter().map(renderable_snippet).collect(),
        data: RenderableData {
            locations_total: receipt.data.locations_total,
            snippets_resolved: receipt.data.snippets_resolved,
            findings_emitted: receipt.data.findings_emitted,
            findings_total: receipt.data.findings_total,
            truncated_reason: receipt.data.truncated_reason.clone(),
        },
    }
}

fn renderable_finding(f: &Finding) -> RenderableFinding {
    RenderableFinding {
        check_id: f.check_id.clone(),
        code: f.code.clone(),
        message: f.message.clone(),
        location: f.location.as_ref().map(|loc| RenderableLocation {
            path: loc.path.as_str().to_string(),
            line: loc.line,
            col: loc.col,
        }),
    }
}

fn renderable_snippet(s: &SnippetRecord) -> RenderableSnippet {
    RenderableSnippet {
        path: s.path.as_str().to_string(),
        start_line: s.start_line,
        end_line: s.end_line,
        start_column: s.start_column,
        end_column: s.end_column,
        text: s.text.clone(),
    }
}
