//! CLI entry point for sarifmatch.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `sarifmatch-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand};
use sarifmatch_app::{
    ExplainOutput, LocalInput, VerifyInput, VerifyOutput, parse_receipt_json, render_annotations,
    render_markdown, render_snippet_lines, run_explain, run_local, run_verify, runtime_error_receipt,
    serialize_receipt, to_renderable, verdict_exit_code,
};
use sarifmatch_settings::Overrides;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "sarifmatch",
    version,
    about = "Check whether a SARIF report matches a repository and commit"
)]
struct Cli {
    /// Path to sarifmatch config TOML (missing file means defaults).
    #[arg(long, global = true, default_value = "sarifmatch.toml")]
    config: Utf8PathBuf,

    /// Override profile (default|audit|fast).
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Override the directory remote repositories are cloned into.
    #[arg(long, global = true)]
    projects_dir: Option<Utf8PathBuf>,

    /// Resolve locations in parallel.
    #[arg(long, global = true)]
    parallel: bool,

    /// Keep going after the first bad location and report every failure.
    #[arg(long, global = true)]
    collect_all: bool,

    /// Override maximum findings written to the receipt.
    #[arg(long, global = true)]
    max_findings: Option<u32>,

    /// Print every resolved snippet and the failure detail.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Where to write the JSON receipt.
    #[arg(long)]
    report_out: Option<Utf8PathBuf>,

    /// Write a Markdown summary.
    #[arg(long)]
    write_markdown: bool,

    /// Where to write the Markdown summary (if enabled).
    #[arg(long, default_value = "artifacts/sarifmatch/comment.md")]
    markdown_out: Utf8PathBuf,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Clone a repository, check out a commit and check the report against it.
    Verify {
        /// Repository URL (https on an allowed host).
        repo_url: String,
        /// Commit hash the report was produced for.
        commit_hash: String,
        /// Path to the SARIF report.
        report_path: Utf8PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Check the report against a tree that is already checked out.
    Local {
        /// Root of the checked-out project.
        #[arg(long)]
        project_dir: Utf8PathBuf,
        /// Path to the SARIF report.
        report_path: Utf8PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Render markdown from an existing JSON receipt.
    Md {
        /// Path to the JSON receipt.
        #[arg(long, default_value = "artifacts/sarifmatch/receipt.json")]
        receipt: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON receipt.
    Annotations {
        /// Path to the JSON receipt.
        #[arg(long, default_value = "artifacts/sarifmatch/receipt.json")]
        receipt: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Explain a check_id or code with remediation guidance.
    Explain {
        /// The check_id (e.g., "span.content") or code (e.g., "leading_whitespace") to explain.
        identifier: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match &cli.cmd {
        Commands::Verify {
            repo_url,
            commit_hash,
            report_path,
            output,
        } => cmd_correlate(&cli, output, |config_text, overrides| {
            run_verify(VerifyInput {
                repo_url,
                commit: commit_hash,
                report_path,
                config_text,
                overrides,
            })
        }),
        Commands::Local {
            project_dir,
            report_path,
            output,
        } => cmd_correlate(&cli, output, |config_text, overrides| {
            run_local(LocalInput {
                project_dir,
                report_path,
                config_text,
                overrides,
            })
        }),
        Commands::Md { receipt, output } => cmd_md(receipt, output.as_deref()),
        Commands::Annotations { receipt, max } => cmd_annotations(receipt, *max),
        Commands::Explain { identifier } => cmd_explain(identifier),
    }
}

fn init_logging(debug: bool) {
    let filter = if debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn overrides(cli: &Cli) -> Overrides {
    Overrides {
        profile: cli.profile.clone(),
        projects_dir: cli.projects_dir.as_ref().map(|d| d.to_string()),
        execution: cli.parallel.then(|| "parallel".to_string()),
        failure_mode: cli.collect_all.then(|| "collect_all".to_string()),
        max_findings: cli.max_findings,
    }
}

fn cmd_correlate(
    cli: &Cli,
    output: &OutputArgs,
    run: impl FnOnce(&str, Overrides) -> anyhow::Result<VerifyOutput>,
) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        // Load config if present; missing file is allowed (defaults apply).
        let cfg_text = std::fs::read_to_string(&cli.config).unwrap_or_default();
        if cfg_text.is_empty() {
            debug!(config = %cli.config, "no config file; using defaults");
        }

        let outcome = run(&cfg_text, overrides(cli))?;

        if let Some(report_out) = &output.report_out {
            let data = serialize_receipt(&outcome.receipt)?;
            write_file(report_out, &data).context("write receipt json")?;
        }
        if output.write_markdown {
            let md = render_markdown(&to_renderable(&outcome.receipt));
            write_file(&output.markdown_out, md.as_bytes()).context("write markdown")?;
        }

        if cli.debug {
            for line in render_snippet_lines(&to_renderable(&outcome.receipt)) {
                println!("{line}");
            }
            for failure in &outcome.failures {
                eprintln!("{failure}");
            }
        }

        let verdict = outcome.verdict();
        println!("{}", verdict.is_match());
        Ok(verdict_exit_code(verdict))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            if let Some(report_out) = &output.report_out {
                let receipt = runtime_error_receipt(&format!("{err:#}"));
                if let Ok(data) = serialize_receipt(&receipt) {
                    let _ = write_file(report_out, &data);
                }
            }
            eprintln!("sarifmatch error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn write_file(path: &Utf8Path, data: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, data).with_context(|| format!("write file: {}", path))?;
    Ok(())
}

fn read_receipt(path: &Utf8Path) -> anyhow::Result<sarifmatch_types::MatchReceipt> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read receipt: {}", path))?;
    parse_receipt_json(&text)
}

fn cmd_md(receipt_path: &Utf8Path, output: Option<&Utf8Path>) -> anyhow::Result<()> {
    let receipt = read_receipt(receipt_path)?;
    let md = render_markdown(&to_renderable(&receipt));

    if let Some(out_path) = output {
        write_file(out_path, md.as_bytes()).context("write markdown output")?;
    } else {
        print!("{}", md);
    }

    Ok(())
}

fn cmd_annotations(receipt_path: &Utf8Path, max: usize) -> anyhow::Result<()> {
    let receipt = read_receipt(receipt_path)?;
    for annotation in render_annotations(&to_renderable(&receipt), max) {
        println!("{}", annotation);
    }
    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", sarifmatch_app::format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_check_ids,
            available_codes,
        } => {
            eprint!(
                "{}",
                sarifmatch_app::format_not_found(&identifier, available_check_ids, available_codes)
            );
            std::process::exit(1);
        }
    }
}
