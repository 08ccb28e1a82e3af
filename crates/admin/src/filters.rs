//! Custom Askama template filters.

use std::fmt::Display;

/// Last path segment of a URL, for showing which file is in use.
///
/// Usage in templates: `{{ url|file_name }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn file_name(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let url = value.to_string();
    let path = url.split(['?', '#']).next().unwrap_or_default();
    Ok(path
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or(path)
        .to_owned())
}
