//! Explain registry for checks and codes.
//!
//! Maps check IDs and codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a check or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the check/code.
    pub title: &'static str,
    /// What the check does and why it exists.
    pub description: &'static str,
    /// How to fix a mismatch.
    pub remediation: &'static str,
    /// Before/after examples.
    pub examples: ExamplePair,
}

/// Before and after examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Input that would produce a finding.
    pub before: &'static str,
    /// Input that passes.
    pub after: &'static str,
}

/// Look up an explanation by check_id or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        // Check IDs
        ids::CHECK_INPUT_ARGUMENTS => Some(explain_input_arguments()),
        ids::CHECK_REPO_CHECKOUT => Some(explain_repo_checkout()),
        ids::CHECK_REPORT_STRUCTURE => Some(explain_report_structure()),
        ids::CHECK_REGION_BOUNDS => Some(explain_region_bounds()),
        ids::CHECK_SPAN_CONTENT => Some(explain_span_content()),
        ids::CHECK_SOURCE_FILES => Some(explain_source_files()),
        ids::CHECK_TOOL_RUNTIME => Some(explain_tool_runtime()),

        // Codes
        ids::CODE_REPORT_NOT_FOUND => Some(explain_report_not_found()),
        ids::CODE_UNSUPPORTED_REPO_URL => Some(explain_unsupported_repo_url()),
        ids::CODE_PROJECT_DIR_NOT_FOUND => Some(explain_project_dir_not_found()),
        ids::CODE_CLONE_FAILED => Some(explain_clone_failed()),
        ids::CODE_CHECKOUT_FAILED => Some(explain_checkout_failed()),
        ids::CODE_UNREADABLE_REPORT => Some(explain_unreadable_report()),
        ids::CODE_MALFORMED_REPORT => Some(explain_malformed_report()),
        ids::CODE_LINE_OUT_OF_RANGE => Some(explain_line_out_of_range()),
        ids::CODE_COLUMN_OUT_OF_RANGE => Some(explain_column_out_of_range()),
        ids::CODE_LEADING_WHITESPACE => Some(explain_leading_whitespace()),
        ids::CODE_FILE_UNREADABLE => Some(explain_file_unreadable()),
        ids::CODE_RUNTIME_ERROR => Some(explain_runtime_error()),

        _ => None,
    }
}

/// List all known check IDs.
pub fn all_check_ids() -> &'static [&'static str] {
    &[
        ids::CHECK_INPUT_ARGUMENTS,
        ids::CHECK_REPO_CHECKOUT,
        ids::CHECK_REPORT_STRUCTURE,
        ids::CHECK_REGION_BOUNDS,
        ids::CHECK_SPAN_CONTENT,
        ids::CHECK_SOURCE_FILES,
        ids::CHECK_TOOL_RUNTIME,
    ]
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_REPORT_NOT_FOUND,
        ids::CODE_UNSUPPORTED_REPO_URL,
        ids::CODE_PROJECT_DIR_NOT_FOUND,
        ids::CODE_CLONE_FAILED,
        ids::CODE_CHECKOUT_FAILED,
        ids::CODE_UNREADABLE_REPORT,
        ids::CODE_MALFORMED_REPORT,
        ids::CODE_LINE_OUT_OF_RANGE,
        ids::CODE_COLUMN_OUT_OF_RANGE,
        ids::CODE_LEADING_WHITESPACE,
        ids::CODE_FILE_UNREADABLE,
        ids::CODE_RUNTIME_ERROR,
    ]
}

// --- Check-level explanations ---

fn explain_input_arguments() -> Explanation {
    Explanation {
        title: "Input Arguments",
        description: "\
Validates the command line before any work is done: the report file must exist
and the repository URL must be an https URL on an allowed host.",
        remediation: "\
Pass an existing SARIF file and a repository URL such as
`https://github.com/<owner>/<repo>`. Additional hosts can be allowed with
`allowed_hosts` in sarifmatch.toml.",
        examples: ExamplePair {
            before: "sarifmatch verify http://example.com/repo abc123 missing.json",
            after: "sarifmatch verify https://github.com/example/repo abc123 report.sarif",
        },
    }
}

fn explain_repo_checkout() -> Explanation {
    Explanation {
        title: "Repository Checkout",
        description: "\
Clones the repository into the projects directory (unless a clone already
exists there) and checks out the requested commit. A report can only be
correlated against the exact revision it claims to describe.",
        remediation: "\
Check that the repository is reachable with the local git credentials and that
the commit hash exists in it. Delete a stale clone under the projects directory
if it belongs to a different remote.",
        examples: ExamplePair {
            before: "sarifmatch verify https://github.com/example/repo not-a-commit report.sarif",
            after: "sarifmatch verify https://github.com/example/repo 4f2c9e1 report.sarif",
        },
    }
}

fn explain_report_structure() -> Explanation {
    Explanation {
        title: "Report Structure",
        description: "\
The report must be JSON in the SARIF shape: `runs[].results[]`, each result with
`locations[].physicalLocation` (artifact URI + region) and optional
`codeFlows[].threadFlows[].locations[].location`. Missing `runs`, `codeFlows`,
`threadFlows` or thread-flow `locations` are treated as empty; a run without
`results` or a location without `physicalLocation` is malformed.",
        remediation: "\
Regenerate the report with the analyzer's SARIF output option and make sure the
file was not truncated or edited by hand.",
        examples: ExamplePair {
            before: r#"{"runs": [{"tool": {}}]}"#,
            after: r#"{"runs": [{"tool": {}, "results": []}]}"#,
        },
    }
}

fn explain_region_bounds() -> Explanation {
    Explanation {
        title: "Region Bounds",
        description: "\
Every region must fit inside the referenced file: its end line must exist and
its end column must not exceed the length of that line (line terminator
included). A region outside the file means the report was produced against a
different revision of that file.",
        remediation: "\
Verify the commit hash. If the report was produced from a working tree with
local modifications, regenerate it from a clean checkout of the commit.",
        examples: ExamplePair {
            before: r#""region": {"startLine": 1000, "endLine": 1000, "startColumn": 1, "endColumn": 5}"#,
            after: r#""region": {"startLine": 13, "endLine": 13, "startColumn": 17, "endColumn": 35}"#,
        },
    }
}

fn explain_span_content() -> Explanation {
    Explanation {
        title: "Span Content",
        description: "\
A span reported by static analysis starts on a code token, never in the middle
of whitespace. A resolved snippet that begins with whitespace indicates the
coordinates were computed against a different file layout.",
        remediation: "\
Regenerate the report against the checked-out commit, or check that the file
was not reformatted (indentation changes shift every column).",
        examples: ExamplePair {
            before: "src/A.java::13::13 3->35 =  public void contextInitialized(",
            after: "src/A.java::13::13 16->35 = contextInitialized(",
        },
    }
}

fn explain_source_files() -> Explanation {
    Explanation {
        title: "Source Files",
        description: "\
Each artifact URI in the report is resolved relative to the project root and
read as UTF-8 text. A file that is missing or not valid UTF-8 cannot have been
the analyzed file.",
        remediation: "\
Check that the URIs in the report are relative to the repository root and that
the commit contains the referenced files.",
        examples: ExamplePair {
            before: r#""artifactLocation": {"uri": "/home/ci/build/src/A.java"}"#,
            after: r#""artifactLocation": {"uri": "src/A.java"}"#,
        },
    }
}

fn explain_tool_runtime() -> Explanation {
    Explanation {
        title: "Tool Runtime",
        description: "\
sarifmatch itself failed for a reason unrelated to the report or the tree.",
        remediation: "\
Re-run with --debug (or RUST_LOG=debug) to see the full error chain.",
        examples: ExamplePair {
            before: "sarifmatch local --project-dir . report.sarif --report-out /readonly/out.json",
            after: "sarifmatch local --project-dir . report.sarif --report-out out/receipt.json",
        },
    }
}

// --- Code-level explanations ---

fn explain_report_not_found() -> Explanation {
    Explanation {
        title: "Report Not Found",
        description: "The report path given on the command line is not a file.",
        remediation: "Pass the path of an existing SARIF file.",
        examples: ExamplePair {
            before: "sarifmatch local --project-dir . does-not-exist.json",
            after: "sarifmatch local --project-dir . report.sarif",
        },
    }
}

fn explain_unsupported_repo_url() -> Explanation {
    Explanation {
        title: "Unsupported Repository URL",
        description: "\
The repository URL is not an https URL on one of the allowed hosts
(default: github.com).",
        remediation: "\
Use the https clone URL of the repository, or add its host to `allowed_hosts`.",
        examples: ExamplePair {
            before: "http://example.com/repo",
            after: "https://github.com/example/repo",
        },
    }
}

fn explain_project_dir_not_found() -> Explanation {
    Explanation {
        title: "Project Directory Not Found",
        description: "\
The `--project-dir` given to `sarifmatch local` is not a directory, so no
location in the report can resolve against it.",
        remediation: "Point `--project-dir` at the root of the checked-out source tree.",
        examples: ExamplePair {
            before: "sarifmatch local --project-dir nowhere report.sarif",
            after: "sarifmatch local --project-dir projects/example/repo report.sarif",
        },
    }
}

fn explain_clone_failed() -> Explanation {
    Explanation {
        title: "Clone Failed",
        description: "`git clone` exited with an error or could not be started.",
        remediation: "\
Check network access, credentials and that `git` is on PATH.",
        examples: ExamplePair {
            before: "https://github.com/example/does-not-exist",
            after: "https://github.com/example/repo",
        },
    }
}

fn explain_checkout_failed() -> Explanation {
    Explanation {
        title: "Checkout Failed",
        description: "`git checkout <commit>` failed in the project directory.",
        remediation: "\
Check that the commit hash exists in the repository and that the project
directory is a git clone.",
        examples: ExamplePair {
            before: "commit: invalid_commit_hash",
            after: "commit: 4f2c9e1",
        },
    }
}

fn explain_unreadable_report() -> Explanation {
    Explanation {
        title: "Unreadable Report",
        description: "The report file could not be read or is not valid JSON.",
        remediation: "Regenerate the report; check it was fully written.",
        examples: ExamplePair {
            before: r#"{"runs": ["#,
            after: r#"{"runs": []}"#,
        },
    }
}

fn explain_malformed_report() -> Explanation {
    Explanation {
        title: "Malformed Report",
        description: "\
The report is JSON but lacks a required key (`results` on a run,
`physicalLocation` on a location, a complete region) or carries a region that
cannot denote text (zero coordinates, start line after end line).",
        remediation: "Regenerate the report with a SARIF 2.1.0 compliant analyzer.",
        examples: ExamplePair {
            before: r#""region": {"startLine": 15, "endLine": 13, "startColumn": 1, "endColumn": 2}"#,
            after: r#""region": {"startLine": 13, "endLine": 15, "startColumn": 1, "endColumn": 2}"#,
        },
    }
}

fn explain_line_out_of_range() -> Explanation {
    Explanation {
        title: "Line Out Of Range",
        description: "A region's end line is past the last line of the file.",
        remediation: "Verify the commit hash; the file is shorter at this revision.",
        examples: ExamplePair {
            before: r#""region": {"startLine": 1000, "endLine": 1000, ...}"#,
            after: r#""region": {"startLine": 13, "endLine": 13, ...}"#,
        },
    }
}

fn explain_column_out_of_range() -> Explanation {
    Explanation {
        title: "Column Out Of Range",
        description: "\
A region's end column is past the end of its last line. Columns are 1-indexed
and count the line terminator.",
        remediation: "Verify the commit hash; the line is shorter at this revision.",
        examples: ExamplePair {
            before: r#""region": {"startLine": 13, "endLine": 13, "startColumn": 1000, "endColumn": 1100}"#,
            after: r#""region": {"startLine": 13, "endLine": 13, "startColumn": 17, "endColumn": 35}"#,
        },
    }
}

fn explain_leading_whitespace() -> Explanation {
    Explanation {
        title: "Leading Whitespace",
        description: "The resolved snippet begins with a whitespace character.",
        remediation: "\
The columns were computed against a different layout of this file; verify the
commit hash and regenerate the report from a clean checkout.",
        examples: ExamplePair {
            before: "src/LoginHttpServlet.java::93::93 25->55 =  ServletUtil.establishSession(",
            after: "src/LoginHttpServlet.java::93::93 26->55 = ServletUtil.establishSession(",
        },
    }
}

fn explain_file_unreadable() -> Explanation {
    Explanation {
        title: "File Unreadable",
        description: "A file referenced by the report is missing or is not UTF-8 text.",
        remediation: "Check the artifact URI and that the commit contains the file.",
        examples: ExamplePair {
            before: r#""uri": "src/Removed.java""#,
            after: r#""uri": "src/Present.java""#,
        },
    }
}

fn explain_runtime_error() -> Explanation {
    Explanation {
        title: "Runtime Error",
        description: "An unexpected tool failure (for example an unwritable output path).",
        remediation: "Re-run with --debug to see the full error chain.",
        examples: ExamplePair {
            before: "--report-out /readonly/receipt.json",
            after: "--report-out artifacts/sarifmatch/receipt.json",
        },
    }
}
