use git_version::git_version;

const COMMIT: &str = git_version!(
    args = ["--abbrev=10", "--always", "--dirty=-modified"],
    fallback = "unknown"
);

/// One-line description of the running build, e.g.
/// `atequip 0.1.0 (release v0.1.0, commit 1a2b3c4d5e)`.
pub fn version_banner() -> String {
    let latest = option_env!("LATEST_TAG").unwrap_or("");
    let ahead = option_env!("COMMITS_AHEAD").unwrap_or("");
    let channel = match option_env!("RELEASE_VERSION") {
        Some(tag) if !tag.is_empty() => format!("release {tag}"),
        _ if !latest.is_empty() && !ahead.is_empty() => format!("dev, {ahead} past {latest}"),
        _ if !latest.is_empty() => format!("dev, past {latest}"),
        _ => "dev".to_string(),
    };
    let profile = if cfg!(debug_assertions) { "debug" } else { "optimized" };

    format!(
        "{} {} ({channel}, commit {COMMIT}, {profile})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_names_package_and_commit() {
        let banner = version_banner();
        assert!(banner.starts_with("atequip "));
        assert!(banner.contains(COMMIT));
        assert!(banner.contains("debug") || banner.contains("optimized"));
    }
}
