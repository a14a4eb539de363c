//! The deployment run: gather, plan, generate, persist, publish.

use std::path::Path;

use tracing::info;

use super::{
    clean_generated, gather_inputs, plan, prompt, DeployInputs, DeployOutcome, Plan,
    COMMIT_MESSAGE, DOCS_INDEX_PATH, README_PATH,
};
use crate::context::ServiceContext;
use crate::error::{RepodocError, Result};
use crate::ports::CompletionRequest;

/// Token budget for README drafts.
pub const README_MAX_TOKENS: u32 = 1500;
/// Token budget for the documentation index.
pub const DOCS_MAX_TOKENS: u32 = 2500;
/// Sampling temperature for every generation call.
pub const TEMPERATURE: f32 = 0.3;

/// Per-run options.
#[derive(Debug, Clone)]
pub struct DeployOptions {
    /// Name the project is introduced by in prompts.
    pub project_name: String,
    /// Chat model used for generation.
    pub model: String,
    /// Refresh a brief README even when nothing changed.
    pub force: bool,
}

/// Cleaned documents ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocs {
    /// Contents of `README.md`.
    pub readme: String,
    /// Contents of `docs/index.md`, present on the full plan only.
    pub index: Option<String>,
}

/// Runs one deployment against the project at `root`.
///
/// # Errors
///
/// Fails on unreadable project files, a failed generation call, a failed
/// write or a failed `git add`/`commit`/`push`. Nothing is rolled back.
pub async fn deploy(
    ctx: &ServiceContext,
    root: &Path,
    options: &DeployOptions,
) -> Result<DeployOutcome> {
    let inputs = gather_inputs(ctx, root, &options.project_name)?;

    let plan = plan(inputs.state, &inputs.diff, options.force);
    info!(?plan, state = ?inputs.state, files = inputs.files.len(), "deployment planned");
    if plan == Plan::Skip {
        return Ok(DeployOutcome::NoChanges);
    }

    let docs = generate(ctx, &inputs, plan, &options.model).await?;
    persist(ctx, root, &docs)?;
    publish(ctx)?;

    Ok(DeployOutcome::Published { plan, wrote_docs: docs.index.is_some() })
}

/// Generates every document the plan calls for, README first.
///
/// # Errors
///
/// Returns [`RepodocError::Generation`] on the first failed call.
pub async fn generate(
    ctx: &ServiceContext,
    inputs: &DeployInputs,
    plan: Plan,
    model: &str,
) -> Result<GeneratedDocs> {
    match plan {
        Plan::Skip => Err(RepodocError::Generation("nothing to generate for a skipped run".into())),
        Plan::Brief => {
            info!("generating brief README");
            let readme = complete(ctx, model, prompt::brief_readme(inputs), README_MAX_TOKENS).await?;
            Ok(GeneratedDocs { readme, index: None })
        }
        Plan::Full => {
            info!("generating README");
            let readme = complete(ctx, model, prompt::full_readme(inputs), README_MAX_TOKENS).await?;
            info!("generating documentation index");
            let index = complete(ctx, model, prompt::docs_index(inputs), DOCS_MAX_TOKENS).await?;
            Ok(GeneratedDocs { readme, index: Some(index) })
        }
    }
}

async fn complete(ctx: &ServiceContext, model: &str, prompt: String, max_tokens: u32) -> Result<String> {
    let request =
        CompletionRequest { model: model.to_string(), prompt, max_tokens, temperature: TEMPERATURE };
    let response = ctx
        .llm
        .complete(&request)
        .await
        .map_err(|e| RepodocError::Generation(e.to_string()))?;
    info!(
        prompt_tokens = response.prompt_tokens,
        completion_tokens = response.completion_tokens,
        "generation finished"
    );
    Ok(clean_generated(&response.text))
}

/// Writes `README.md` and, when present, `docs/index.md`.
///
/// # Errors
///
/// Returns [`RepodocError::Io`] if a write fails.
pub fn persist(ctx: &ServiceContext, root: &Path, docs: &GeneratedDocs) -> Result<()> {
    write(ctx, &root.join(README_PATH), &docs.readme)?;
    info!("updated README.md written");

    if let Some(index) = &docs.index {
        write(ctx, &root.join(DOCS_INDEX_PATH), index)?;
        info!("documentation index written to {DOCS_INDEX_PATH}");
    }
    Ok(())
}

fn write(ctx: &ServiceContext, path: &Path, contents: &str) -> Result<()> {
    ctx.fs
        .write(path, contents)
        .map_err(|e| RepodocError::Io(format!("failed to write {}: {e}", path.display())))
}

/// Stages, commits and pushes, stopping at the first failure.
///
/// # Errors
///
/// Returns [`RepodocError::GitCommand`] naming the failed step.
pub fn publish(ctx: &ServiceContext) -> Result<()> {
    let git_err = |e: crate::ports::PortError| RepodocError::GitCommand(e.to_string());
    ctx.git.stage_all().map_err(git_err)?;
    ctx.git.commit(COMMIT_MESSAGE).map_err(git_err)?;
    ctx.git.push().map_err(git_err)?;
    info!("changes pushed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::adapters::live::LiveFileSystem;
    use crate::adapters::recording::RecordingGitRepo;
    use crate::adapters::replaying::test_support::replayer;
    use crate::adapters::replaying::{ReplayingGitRepo, ReplayingLlmClient};
    use crate::cassette::config::CassetteConfig;
    use crate::cassette::recorder::CassetteRecorder;
    use crate::deploy::RepoState;
    use serde_json::json;

    type Calls<'a> = &'a [(&'a str, &'a str, serde_json::Value)];

    fn completion(text: &str) -> serde_json::Value {
        json!({"ok": {"text": text, "prompt_tokens": 100, "completion_tokens": 50}})
    }

    fn project_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("a.gs"), "function a() {}").unwrap();
        std::fs::write(dir.join("b.html"), "<p>hi</p>").unwrap();
        dir
    }

    /// Live filesystem on a temp dir, replayed git and LLM; git calls are
    /// also recorded so their order can be checked.
    fn context(git: Calls<'_>, llm: Calls<'_>) -> (ServiceContext, Arc<Mutex<CassetteRecorder>>) {
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new("/unused", "git", "none")));
        let mut ctx = ServiceContext::replaying_from(&CassetteConfig::default()).unwrap();
        ctx.fs = Box::new(LiveFileSystem);
        ctx.git = Box::new(RecordingGitRepo::new(
            Box::new(ReplayingGitRepo::new(replayer(git))),
            Arc::clone(&recorder),
        ));
        ctx.llm = Box::new(ReplayingLlmClient::new(replayer(llm)));
        (ctx, recorder)
    }

    fn git_methods(recorder: &Arc<Mutex<CassetteRecorder>>) -> Vec<String> {
        recorder.lock().unwrap().interactions().iter().map(|i| i.method.clone()).collect()
    }

    fn options(force: bool) -> DeployOptions {
        DeployOptions { project_name: "invoice-tool".into(), model: "gpt-3.5-turbo".into(), force }
    }

    #[tokio::test]
    async fn clean_repository_is_a_no_op() {
        let dir = project_dir("repodoc_pipeline_noop");
        let (ctx, recorder) = context(
            &[("git", "diff", json!({"ok": ""})), ("git", "current_commit", json!({"ok": "abc"}))],
            &[],
        );

        let outcome = deploy(&ctx, &dir, &options(false)).await.unwrap();

        assert_eq!(outcome, DeployOutcome::NoChanges);
        assert_eq!(git_methods(&recorder), vec!["diff", "current_commit"]);
        assert!(!dir.join("README.md").exists());
        assert!(!dir.join("docs").exists());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn empty_repository_gets_readme_and_docs_then_publishes_in_order() {
        let dir = project_dir("repodoc_pipeline_empty_repo");
        let (ctx, recorder) = context(
            &[
                ("git", "diff", json!({"err": "git diff HEAD failed: bad revision 'HEAD'"})),
                ("git", "current_commit", json!({"err": "git rev-parse HEAD failed"})),
                ("git", "stage_all", json!({"ok": null})),
                ("git", "commit", json!({"ok": null})),
                ("git", "push", json!({"ok": null})),
            ],
            &[
                ("llm", "complete", completion("```markdown\n# invoice-tool\nID: {apps script ID}\nReadme body")),
                ("llm", "complete", completion("# Documentation\n\n## Architecture")),
            ],
        );

        let outcome = deploy(&ctx, &dir, &options(false)).await.unwrap();

        assert_eq!(outcome, DeployOutcome::Published { plan: Plan::Full, wrote_docs: true });
        let readme = std::fs::read_to_string(dir.join("README.md")).unwrap();
        assert_eq!(readme, "# invoice-tool\nReadme body");
        let index = std::fs::read_to_string(dir.join("docs/index.md")).unwrap();
        assert_eq!(index, "# Documentation\n\n## Architecture");
        assert_eq!(
            git_methods(&recorder),
            vec!["diff", "current_commit", "stage_all", "commit", "push"]
        );
        let commit = recorder.lock().unwrap().interactions()[3].input.clone();
        assert_eq!(commit["message"], json!(COMMIT_MESSAGE));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn changes_take_the_full_branch() {
        let dir = project_dir("repodoc_pipeline_changes");
        let (ctx, _recorder) = context(
            &[
                ("git", "diff", json!({"ok": "diff --git a/a.gs b/a.gs\n+function b() {}"})),
                ("git", "current_commit", json!({"ok": "abc"})),
                ("git", "stage_all", json!({"ok": null})),
                ("git", "commit", json!({"ok": null})),
                ("git", "push", json!({"ok": null})),
            ],
            &[("llm", "complete", completion("# Readme")), ("llm", "complete", completion("# Docs"))],
        );

        let outcome = deploy(&ctx, &dir, &options(false)).await.unwrap();
        assert_eq!(outcome, DeployOutcome::Published { plan: Plan::Full, wrote_docs: true });
        assert!(dir.join("docs/index.md").exists());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn forced_clean_run_writes_brief_readme_only() {
        let dir = project_dir("repodoc_pipeline_forced");
        let (ctx, _recorder) = context(
            &[
                ("git", "diff", json!({"ok": ""})),
                ("git", "current_commit", json!({"ok": "abc"})),
                ("git", "stage_all", json!({"ok": null})),
                ("git", "commit", json!({"ok": null})),
                ("git", "push", json!({"ok": null})),
            ],
            &[("llm", "complete", completion("# invoice-tool\nNo meaningful changes."))],
        );

        let outcome = deploy(&ctx, &dir, &options(true)).await.unwrap();
        assert_eq!(outcome, DeployOutcome::Published { plan: Plan::Brief, wrote_docs: false });
        assert!(dir.join("README.md").exists());
        assert!(!dir.join("docs").exists());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn generation_failure_writes_nothing_and_skips_git() {
        let dir = project_dir("repodoc_pipeline_llm_failure");
        let (ctx, recorder) = context(
            &[("git", "diff", json!({"ok": "+x"})), ("git", "current_commit", json!({"ok": "abc"}))],
            &[
                ("llm", "complete", completion("# Readme")),
                ("llm", "complete", json!({"err": "chat completion API error (500): overloaded"})),
            ],
        );

        let err = deploy(&ctx, &dir, &options(false)).await.unwrap_err();
        assert!(matches!(err, RepodocError::Generation(ref m) if m.contains("overloaded")));
        assert!(!dir.join("README.md").exists());
        assert_eq!(git_methods(&recorder), vec!["diff", "current_commit"]);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn failed_commit_stops_before_push() {
        let dir = project_dir("repodoc_pipeline_commit_failure");
        let (ctx, recorder) = context(
            &[
                ("git", "diff", json!({"ok": "+x"})),
                ("git", "current_commit", json!({"ok": "abc"})),
                ("git", "stage_all", json!({"ok": null})),
                ("git", "commit", json!({"err": "git commit -m failed: nothing to commit"})),
            ],
            &[("llm", "complete", completion("# Readme")), ("llm", "complete", completion("# Docs"))],
        );

        let err = deploy(&ctx, &dir, &options(false)).await.unwrap_err();
        assert!(matches!(err, RepodocError::GitCommand(ref m) if m.contains("nothing to commit")));
        assert_eq!(git_methods(&recorder), vec!["diff", "current_commit", "stage_all", "commit"]);
        // Files stay written; there is no rollback.
        assert!(dir.join("README.md").exists());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn skip_plan_has_nothing_to_generate() {
        let (ctx, _recorder) = context(&[], &[]);
        let inputs = DeployInputs {
            project_name: "p".into(),
            files: crate::deploy::ProjectFiles::default(),
            diff: String::new(),
            state: RepoState::NonEmpty,
        };
        assert!(generate(&ctx, &inputs, Plan::Skip, "m").await.is_err());
    }
}
