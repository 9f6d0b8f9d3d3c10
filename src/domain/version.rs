use semver::Version;

/// Parse a module set version (e.g. "v1.2.3-rc.1+meta") as a semantic version.
///
/// A single leading 'v' is stripped before parsing, so the prefix is optional:
/// "1.2.3" parses the same as "v1.2.3". Go tooling (`golang.org/x/mod/semver`)
/// requires the prefix and rejects the bare form. Returns `None` if the rest is
/// not valid semver.
pub fn parse_version(version: &str) -> Option<Version> {
    let clean = version.strip_prefix('v').unwrap_or(version);
    Version::parse(clean).ok()
}

/// Whether the string is a valid semantic version
pub fn is_valid_version(version: &str) -> bool {
    parse_version(version).is_some()
}

/// Whether the version denotes a stable release: valid semver with major >= 1.
///
/// Pre-release and build metadata do not affect the result. Unparsable input is
/// never stable. Because the 'v' prefix is optional, "2.0.0" is stable here even
/// though Go's `semver.Major` would reject it.
pub fn is_stable_version(version: &str) -> bool {
    parse_version(version).map_or(false, |v| v.major >= 1)
}
