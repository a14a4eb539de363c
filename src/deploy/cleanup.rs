//! Post-processing of generated markdown.

/// Opening fence some models wrap their whole answer in.
const FENCE_MARKER: &str = "```markdown";
/// Placeholder some models leave for the Apps Script project id.
const PLACEHOLDER_MARKER: &str = "{apps script ID";

/// Removes lines that start (after trimming) with a markdown code-fence
/// opener and lines that contain the script-id placeholder. Other lines are
/// kept in order and rejoined with `\n`.
#[must_use]
pub fn clean_generated(content: &str) -> String {
    content
        .split('\n')
        .filter(|line| !line.trim().starts_with(FENCE_MARKER) && !line.contains(PLACEHOLDER_MARKER))
        .collect::<Vec<_>>()
        .join("\n")
}
