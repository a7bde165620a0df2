//! Child logger resolution
//!
//! Child loggers are only handed out for names inside the library's own
//! namespace, so every logger the library creates sits under the root
//! logger and is covered by its default handler and suppression scopes.

use super::Registry;
use crate::core::{Logger, LoggerError, Result, NAME_SEPARATOR};

/// Name accepted for code running as the program entry point
pub const ENTRY_POINT_NAME: &str = "__main__";

const PATH_SEPARATOR: &str = "::";

/// Dotted path of `name` relative to `namespace`, or `None` if `name` lies
/// outside it.
///
/// `name` is either `<namespace>.<rest>`, `<namespace>::<rest>` (as produced
/// by `module_path!()`), or [`ENTRY_POINT_NAME`]. `::` separators in `rest`
/// are normalized to `.`.
pub fn child_suffix(namespace: &str, name: &str) -> Option<String> {
    if name == ENTRY_POINT_NAME {
        return Some(ENTRY_POINT_NAME.to_string());
    }

    let rest = name.strip_prefix(namespace)?;
    let rest = rest
        .strip_prefix(PATH_SEPARATOR)
        .or_else(|| rest.strip_prefix(NAME_SEPARATOR))?;

    let segments: Vec<&str> = rest
        .split(PATH_SEPARATOR)
        .flat_map(|part| part.split(NAME_SEPARATOR))
        .filter(|segment| !segment.is_empty())
        .collect();

    if segments.is_empty() {
        None
    } else {
        let separator = NAME_SEPARATOR.to_string();
        Some(segments.join(separator.as_str()))
    }
}

impl Registry {
    /// Logger for `name` beneath the root logger.
    ///
    /// The propagation flag is set on every call, so the last call wins.
    ///
    /// # Errors
    ///
    /// [`LoggerError::InvalidNamespace`] if `name` is outside the library
    /// namespace and is not [`ENTRY_POINT_NAME`].
    pub fn get_child_logger(&self, name: &str, propagate: bool) -> Result<Logger> {
        let root = self.get_root_logger();
        let suffix = child_suffix(self.namespace(), name)
            .ok_or_else(|| LoggerError::invalid_namespace(name, self.namespace()))?;

        let child = root.get_child(&suffix);
        child.set_propagate(propagate);
        Ok(child)
    }
}
