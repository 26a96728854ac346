use crate::profile::{Profile, SCHEMA_VERSION};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const PROFILE_FILE: &str = "profile.json";

fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("USERPROFILE").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn profile_dir() -> PathBuf {
    home_dir().join(".octochat")
}

fn read_profile_file(path: &Path) -> Result<Profile, String> {
    let data = fs::read(path).map_err(|err| format!("failed to read {}: {err}", path.display()))?;
    let profile: Profile = serde_json::from_slice(&data)
        .map_err(|err| format!("failed to parse {}: {err}", path.display()))?;
    if profile.schema_version != SCHEMA_VERSION {
        return Err(format!(
            "unknown schema_version in {}: {}",
            path.display(),
            profile.schema_version
        ));
    }
    Ok(profile)
}

/// Loads the persisted profile, falling back to defaults with a warning when
/// the file is unreadable. A missing file is a normal first launch.
pub fn load() -> (Profile, Option<String>) {
    load_from(&profile_dir())
}

fn load_from(dir: &Path) -> (Profile, Option<String>) {
    let path = dir.join(PROFILE_FILE);
    if !path.exists() {
        return (Profile::default(), None);
    }
    match read_profile_file(&path) {
        Ok(profile) => (profile, None),
        Err(warning) => (Profile::default(), Some(warning)),
    }
}

pub fn save(profile: &Profile) -> io::Result<()> {
    save_in(&profile_dir(), profile)
}

fn save_in(dir: &Path, profile: &Profile) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    let final_path = dir.join(PROFILE_FILE);
    let tmp_path = dir.join(format!("{PROFILE_FILE}.tmp"));
    let bytes = serde_json::to_vec_pretty(profile)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err.to_string()))?;

    fs::write(&tmp_path, bytes)?;
    match fs::rename(&tmp_path, &final_path) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            // Windows refuses to rename over an existing file.
            if final_path.exists() {
                fs::remove_file(&final_path)?;
                fs::rename(&tmp_path, &final_path)?;
                Ok(())
            } else {
                Err(rename_err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{load_from, save_in};
    use crate::profile::Profile;
    use crate::theme::ThemeName;
    use std::fs;

    #[test]
    fn token_and_theme_round_trip_through_disk() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut profile = Profile::default();
        profile.token = Some("jwt-abc".to_string());
        profile.theme = ThemeName::Neon;

        save_in(dir.path(), &profile).expect("profile should save");
        let (loaded, warning) = load_from(dir.path());

        assert!(warning.is_none());
        assert_eq!(loaded.token.as_deref(), Some("jwt-abc"));
        assert_eq!(loaded.theme, ThemeName::Neon);
        assert!(loaded.is_authenticated());
    }

    #[test]
    fn missing_file_yields_defaults_without_warning() {
        let dir = tempfile::tempdir().expect("temp dir");
        let (profile, warning) = load_from(dir.path());
        assert!(warning.is_none());
        assert!(profile.token.is_none());
        assert_eq!(profile.theme, ThemeName::Light);
    }

    #[test]
    fn malformed_file_degrades_to_defaults_with_warning() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join("profile.json"), b"{not json").expect("fixture writes");

        let (profile, warning) = load_from(dir.path());
        assert!(warning.expect("warning expected").contains("failed to parse"));
        assert!(!profile.is_authenticated());
    }

    #[test]
    fn unknown_theme_name_costs_only_the_theme() {
        let dir = tempfile::tempdir().expect("temp dir");
        let data = r#"{"schema_version": 1, "token": "jwt-abc", "theme": "sparkle"}"#;
        fs::write(dir.path().join("profile.json"), data).expect("fixture writes");

        let (profile, warning) = load_from(dir.path());
        assert!(warning.is_none());
        assert_eq!(profile.token.as_deref(), Some("jwt-abc"));
        assert_eq!(profile.theme, ThemeName::Dark);
    }

    #[test]
    fn unknown_schema_version_is_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let data = r#"{"schema_version": 99, "token": "t", "theme": "dark"}"#;
        fs::write(dir.path().join("profile.json"), data).expect("fixture writes");

        let (profile, warning) = load_from(dir.path());
        assert!(warning
            .expect("warning expected")
            .contains("unknown schema_version"));
        assert!(profile.token.is_none());
    }
}
