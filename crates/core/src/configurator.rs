use std::fs;
use std::path::{Path, PathBuf};

use crate::Error;

/// Team ID committed to the project file by local development builds.
const CHECKED_IN_TEAM_ID: &str = "2KQDYWP72S";

/// Identity assignment that pins builds to a local development certificate.
const MACOS_IDENTITY_LINE: &str = r#""CODE_SIGN_IDENTITY[sdk=macosx*]" = "Apple Development";"#;

/// Settings keys surfaced in the before/after diagnostics.
const SIGNING_MARKERS: [&str; 3] = ["CODE_SIGN_STYLE", "DEVELOPMENT_TEAM", "CODE_SIGN_IDENTITY"];

/// What a run did to the project file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// CI signing settings were written to the project file.
    Modified,
    /// Already in the desired state, nothing written.
    Unchanged,
}

/// Rewrites a pbxproj so CI builds sign manually with the injected team.
///
/// The project file is snapshotted next to itself before any mutation and
/// the snapshot is copied back if anything after it fails. The snapshot is
/// left on disk either way.
pub struct SigningConfigurator {
    project_file: PathBuf,
    backup_file: PathBuf,
    team_id: Option<String>,
}

impl SigningConfigurator {
    pub fn new<P: AsRef<Path>>(project_file: P, team_id: Option<String>) -> Self {
        let project_file = project_file.as_ref().to_path_buf();
        let backup_file = project_file.with_extension("pbxproj.backup");

        Self {
            project_file,
            backup_file,
            team_id,
        }
    }

    pub fn backup_file(&self) -> &Path {
        &self.backup_file
    }

    /// Checks preconditions, then applies the rewrite under a
    /// restore-from-backup scope.
    pub fn run(&self) -> Result<Outcome, Error> {
        if !self.project_file.exists() {
            let err = Error::ProjectFileMissing(self.project_file.clone());
            log::error!("❌ {err}");
            return Err(err);
        }

        let team_id = match self.team_id.as_deref() {
            Some(id) if !id.is_empty() => id,
            _ => {
                let err = Error::TeamIdMissing;
                log::error!("❌ {err}");
                return Err(err);
            }
        };

        log::info!("⚙️ Configuring Xcode project for CI signing...");
        log::info!("Team ID: {team_id}");

        match self.modify_project(team_id) {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                log::error!("❌ Error modifying project file: {err}");
                self.restore_backup();
                Err(err)
            }
        }
    }

    // Everything from the backup onward runs under the restore scope in
    // `run`; any error here triggers the copy-back.
    fn modify_project(&self, team_id: &str) -> Result<Outcome, Error> {
        log::info!("💾 Creating backup...");
        fs::copy(&self.project_file, &self.backup_file)?;

        let content = fs::read_to_string(&self.project_file)?;

        log::info!("📋 Original settings:");
        if let Some(line) = first_signing_line(&content) {
            log::info!("  {line}");
        }

        let updated = apply_substitutions(&content, team_id);

        let outcome = if updated == content {
            log::warn!("⚠️  No changes made - original settings may already be correct");
            Outcome::Unchanged
        } else {
            fs::write(&self.project_file, &updated)?;
            log::info!("✅ Project file modified successfully");
            Outcome::Modified
        };

        log::info!("📝 Updated settings:");
        for line in signing_lines(&updated) {
            log::info!("  {line}");
        }

        Ok(outcome)
    }

    // Best effort; the caller reports the mutation error either way.
    fn restore_backup(&self) {
        if !self.backup_file.exists() {
            return;
        }

        log::info!("🔄 Restoring backup...");
        match fs::copy(&self.backup_file, &self.project_file) {
            Ok(_) => log::warn!("⚠️  Restored backup - will use original settings"),
            Err(err) => log::error!("❌ Failed to restore backup: {err}"),
        }
    }
}

fn apply_substitutions(content: &str, team_id: &str) -> String {
    content
        .replace(
            &format!("DEVELOPMENT_TEAM = {CHECKED_IN_TEAM_ID};"),
            &format!("DEVELOPMENT_TEAM = {team_id};"),
        )
        .replace("CODE_SIGN_STYLE = Automatic;", "CODE_SIGN_STYLE = Manual;")
        .replace(MACOS_IDENTITY_LINE, "")
}

/// First line mentioning a signing setting, trimmed. The pre-mutation
/// diagnostic shows only this line; the post-mutation scan shows them all.
fn first_signing_line(content: &str) -> Option<&str> {
    content
        .lines()
        .find(|line| SIGNING_MARKERS.iter().any(|marker| line.contains(marker)))
        .map(str::trim)
}

fn signing_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .lines()
        .filter(|line| SIGNING_MARKERS.iter().any(|marker| line.contains(marker)))
        .map(str::trim)
        .filter(|line| !line.is_empty())
}
