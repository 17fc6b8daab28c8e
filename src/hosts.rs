// Host list loading. One host per line, whitespace trimmed, order kept.
// Blank lines are kept as empty entries; callers decide how to report them.

use std::io::ErrorKind;
use std::path::Path;

use crate::error::HostsError;

/// Read the host file at `path`.
pub fn load_hosts(path: &Path) -> Result<Vec<String>, HostsError> {
    let text = std::fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => HostsError::NotFound(path.to_path_buf()),
        _ => HostsError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;
    Ok(parse_hosts(&text))
}

/// Split text into trimmed lines. A final newline does not add an entry,
/// but empty lines in between (or trailing whitespace-only lines) do.
pub fn parse_hosts(text: &str) -> Vec<String> {
    text.lines().map(|line| line.trim().to_string()).collect()
}

/// Number of empty entries in a loaded host list.
pub fn count_blank(hosts: &[String]) -> usize {
    hosts.iter().filter(|h| h.is_empty()).count()
}
