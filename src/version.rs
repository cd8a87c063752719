//! Build version reported by `lustred`, `lustre` and `/health`.

/// Package version from Cargo.toml.
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Git branch at build time, or "unknown" outside a checkout.
pub const GIT_BRANCH: &str = match option_env!("VERGEN_GIT_BRANCH") {
    Some(branch) => branch,
    None => "unknown",
};

/// Git commit SHA at build time, or "unknown" outside a checkout.
pub const GIT_SHA: &str = match option_env!("VERGEN_GIT_SHA") {
    Some(sha) => sha,
    None => "unknown",
};

/// Whether the working tree had uncommitted changes at build time.
pub fn git_dirty() -> bool {
    option_env!("VERGEN_GIT_DIRTY") == Some("true")
}

/// First seven characters of [`GIT_SHA`].
pub fn short_sha() -> &'static str {
    GIT_SHA.get(..7).unwrap_or(GIT_SHA)
}

/// `{version}+{branch}.{sha}`, with `.dirty` appended for dirty trees.
///
/// e.g. `0.1.0+main.abc1234`
pub fn version_string() -> String {
    let dirty_suffix = if git_dirty() { ".dirty" } else { "" };
    format!("{PKG_VERSION}+{GIT_BRANCH}.{}{dirty_suffix}", short_sha())
}
