//! Staged, journaled commit of a generation plan.
//!
//! ```text
//! output_root/
//! ├── .plugforge-staging-<uuid>/
//! │   ├── 0.staged        rendered files, written flat
//! │   ├── 1.staged
//! │   └── 1.backup        previous destination (force only)
//! ├── manifest.yaml       ← renamed from 0.staged at commit
//! └── provider/x.py       ← renamed from 1.staged at commit
//! ```
//!
//! Every mutation is pushed onto a journal before the next one starts.
//! Rollback replays the journal backwards, so the tree ends up exactly as
//! it was before the call.
//!
//! The last commit rename is the point of no return. Removing the staging
//! dir afterwards is best effort: a failure there leaves the dir (and any
//! backups in it) behind and is reported, but never rolls the new files
//! back, since a partial `remove_dir_all` may already have deleted the
//! backups rollback would need.

use std::path::{Path, PathBuf};

use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::{
    application::{ApplicationError, error::RollbackFailure, ports::Filesystem},
    domain::GenerationPlan,
    error::{PlugforgeError, PlugforgeResult},
};

pub(crate) const STAGING_PREFIX: &str = ".plugforge-staging-";

#[derive(Debug)]
enum Step {
    CreatedDir(PathBuf),
    StagingDir(PathBuf),
    BackedUp { original: PathBuf, backup: PathBuf },
    Committed(PathBuf),
}

/// Outcome of a successful commit, paths relative to the output root.
#[derive(Debug, Default)]
pub(crate) struct Committed {
    pub files: Vec<PathBuf>,
    pub overwritten: Vec<PathBuf>,
    /// Staging dir that could not be removed after the commit.
    pub staging_leftover: Option<PathBuf>,
}

pub(crate) struct Transaction<'a> {
    fs: &'a dyn Filesystem,
    root: &'a Path,
    force: bool,
    journal: Vec<Step>,
}

impl<'a> Transaction<'a> {
    pub fn new(fs: &'a dyn Filesystem, root: &'a Path, force: bool) -> Self {
        Self {
            fs,
            root,
            force,
            journal: Vec::new(),
        }
    }

    /// Fail with `FileExists` on the first planned destination that may not
    /// be replaced. Touches nothing.
    pub fn check_conflicts(&self, plan: &GenerationPlan) -> PlugforgeResult<()> {
        for file in plan.files() {
            let dest = self.root.join(file.path.as_path());
            if self.fs.is_dir(&dest) || (!self.force && self.fs.exists(&dest)) {
                return Err(ApplicationError::FileExists { path: dest }.into());
            }
        }
        Ok(())
    }

    /// Stage and commit every file. On failure the journal is rolled back
    /// before returning.
    pub fn run(mut self, plan: &GenerationPlan) -> PlugforgeResult<Committed> {
        match self.apply(plan) {
            Ok(done) => Ok(done),
            Err(cause) => {
                warn!(error = %cause, steps = self.journal.len(), "Commit failed, rolling back");
                let failures = self.rollback();
                if failures.is_empty() {
                    Err(cause)
                } else {
                    error!(count = failures.len(), "Rollback incomplete");
                    Err(ApplicationError::RollbackFailed {
                        cause: Box::new(cause),
                        failures,
                    }
                    .into())
                }
            }
        }
    }

    fn apply(&mut self, plan: &GenerationPlan) -> PlugforgeResult<Committed> {
        self.ensure_dir(self.root)?;

        let staging = self.root.join(format!("{STAGING_PREFIX}{}", Uuid::new_v4()));
        self.fs.create_dir(&staging)?;
        self.journal.push(Step::StagingDir(staging.clone()));

        for (index, file) in plan.files().iter().enumerate() {
            let staged = staging.join(format!("{index}.staged"));
            self.fs.write_file(&staged, &file.content)?;
            debug!(path = %file.path, bytes = file.size(), "Staged");
        }

        let mut done = Committed::default();
        for (index, file) in plan.files().iter().enumerate() {
            let dest = self.root.join(file.path.as_path());
            if let Some(parent) = dest.parent() {
                self.ensure_dir(parent)?;
            }

            if self.fs.exists(&dest) {
                let backup = staging.join(format!("{index}.backup"));
                self.fs.rename(&dest, &backup)?;
                self.journal.push(Step::BackedUp {
                    original: dest.clone(),
                    backup,
                });
                done.overwritten.push(file.path.as_path().to_path_buf());
            }

            self.fs.rename(&staging.join(format!("{index}.staged")), &dest)?;
            self.journal.push(Step::Committed(dest));
            debug!(path = %file.path, "Committed");
            done.files.push(file.path.as_path().to_path_buf());
        }

        if let Err(e) = self.fs.remove_dir_all(&staging) {
            warn!(path = %staging.display(), error = %e, "Staging dir left behind");
            done.staging_leftover = Some(staging);
        }
        Ok(done)
    }

    /// Create `dir` and any missing ancestors, journaling each one.
    fn ensure_dir(&mut self, dir: &Path) -> PlugforgeResult<()> {
        let mut missing: Vec<&Path> = dir
            .ancestors()
            .filter(|p| !p.as_os_str().is_empty())
            .take_while(|p| !self.fs.exists(p))
            .collect();
        missing.reverse();

        for path in missing {
            self.fs.create_dir(path)?;
            self.journal.push(Step::CreatedDir(path.to_path_buf()));
        }
        Ok(())
    }

    fn rollback(&mut self) -> Vec<RollbackFailure> {
        let mut failures = Vec::new();

        while let Some(step) = self.journal.pop() {
            let (path, result) = match &step {
                Step::Committed(path) => (path.clone(), self.fs.remove_file(path)),
                Step::BackedUp { original, backup } => {
                    (original.clone(), self.fs.rename(backup, original))
                }
                Step::StagingDir(path) => (path.clone(), self.fs.remove_dir_all(path)),
                Step::CreatedDir(path) => (path.clone(), self.fs.remove_dir(path)),
            };
            if let Err(e) = result {
                error!(path = %path.display(), error = %e, "Rollback step failed");
                failures.push(RollbackFailure {
                    path,
                    reason: rollback_reason(&e),
                });
            }
        }

        failures
    }
}

fn rollback_reason(err: &PlugforgeError) -> String {
    match err {
        PlugforgeError::Application(ApplicationError::Io { reason, .. }) => reason.clone(),
        other => other.to_string(),
    }
}
