//! Prompt construction for the README and the documentation index.

use std::fmt::Write as _;

use super::{DeployInputs, ProjectFiles};

/// Characters of each file shown in the documentation index prompt.
pub const EXCERPT_CHARS: usize = 500;

const NO_CHANGES: &str = "No changes detected in this update.\n";

/// Prompt for the full README: overview, per-file summaries, a version
/// control summary and usage notes.
#[must_use]
pub fn full_readme(inputs: &DeployInputs) -> String {
    let mut prompt = format!(
        "You are an expert technical writer and software architect.\n\
         Generate a concise, beautifully formatted Markdown README for the Google Apps Script \
         project named \"{}\".\n\
         The README should include:\n\n\
         1. An overview and purpose of the project.\n\
         2. A list of each file with a brief summary of its functionality.\n\
         3. A \"Version Control Summary\" section that explains the changes in the latest update \
         (based on the provided git diff). If no changes occurred, state that clearly.\n\
         4. Usage instructions, dependency notes, and maintenance recommendations.\n\n\
         Below are the details of the project files:\n",
        inputs.project_name
    );

    for (name, content) in inputs.files.iter() {
        let _ = write!(
            prompt,
            "\n### {name}\n```javascript\n{content}\n```\n\
             Summary for {name}: Briefly describe what this file does.\n"
        );
    }

    prompt.push_str("\n---\n## Version Control Summary\n");
    push_diff(&mut prompt, inputs, "provide a concise summary of the changes");
    prompt.push_str("\nNow generate the complete README.md content in Markdown.");
    prompt
}

/// Prompt for the brief README used when nothing meaningful changed.
#[must_use]
pub fn brief_readme(inputs: &DeployInputs) -> String {
    let mut prompt = format!(
        "You are an expert technical writer.\n\
         Generate a short Markdown README for the Google Apps Script project named \"{}\".\n\
         The README should include:\n\n\
         1. One paragraph describing the purpose of the project.\n\
         2. A bulleted list of the project files.\n\
         3. A short note stating that this update contains no meaningful code changes.\n\n\
         Project files:\n",
        inputs.project_name
    );
    push_file_list(&mut prompt, &inputs.files);
    prompt.push_str("\nNow generate the README.md content in Markdown.");
    prompt
}

/// Prompt for `docs/index.md`, built from truncated excerpts of each file.
#[must_use]
pub fn docs_index(inputs: &DeployInputs) -> String {
    let mut prompt = format!(
        "You are an expert technical writer and software architect.\n\
         Generate detailed Markdown documentation for the Google Apps Script project named \
         \"{}\". This document is the documentation index and complements the README.\n\
         Include the following sections:\n\n\
         1. Overview: what the project does and who it is for.\n\
         2. Architecture: how the files fit together and how data flows between them.\n\
         3. File Reference: a summary of each file based on the excerpts below.\n\
         4. Setup: how to install, configure and deploy the project.\n\
         5. Recent Changes: a summary of the latest update based on the git diff.\n\
         6. Examples: typical usage scenarios with short code snippets.\n\
         7. Future Work: known limitations and suggested improvements.\n\n\
         File excerpts (truncated to {EXCERPT_CHARS} characters):\n",
        inputs.project_name
    );

    for (name, content) in inputs.files.iter() {
        let _ = write!(prompt, "\n### {name}\n```javascript\n{}\n```\n", excerpt(content, EXCERPT_CHARS));
    }

    prompt.push_str("\n---\n## Recent Changes\n");
    push_diff(&mut prompt, inputs, "summarize what changed and why it matters");
    prompt.push_str("\nNow generate the complete docs/index.md content in Markdown.");
    prompt
}

/// First `limit` characters of `content`, with `...` appended when cut.
#[must_use]
pub fn excerpt(content: &str, limit: usize) -> String {
    match content.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}

fn push_diff(prompt: &mut String, inputs: &DeployInputs, ask: &str) {
    if inputs.has_changes() {
        let _ = write!(prompt, "Based on the following git diff, {ask}:\n\n```\n{}\n```\n", inputs.diff);
    } else {
        prompt.push_str(NO_CHANGES);
    }
}

fn push_file_list(prompt: &mut String, files: &ProjectFiles) {
    if files.is_empty() {
        prompt.push_str("- (no source files found)\n");
    }
    for name in files.names() {
        let _ = writeln!(prompt, "- {name}");
    }
}
