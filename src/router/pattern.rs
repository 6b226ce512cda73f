use crate::error::PatternError;
use crate::http::Params;

use std::fmt;

use matchit::Node;

/// A compiled route pattern.
///
/// Patterns are absolute paths made of literal segments, `:name` segments
/// that bind exactly one path segment, and an optional trailing `*name`
/// segment that binds the rest of the path.
pub struct Pattern {
    raw: String,
    node: Node<()>,
    // `raw` without its trailing slash, used for prefix matching
    trimmed: Option<Node<()>>,
}

impl Pattern {
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        if !raw.starts_with('/') {
            return Err(PatternError::Relative(raw.to_owned()));
        }

        let node = compile(raw, raw)?;

        let trimmed = match raw.strip_suffix('/') {
            Some(trimmed) if !trimmed.is_empty() => Some(compile(raw, trimmed)?),
            _ => None,
        };

        Ok(Pattern {
            raw: raw.to_owned(),
            node,
            trimmed,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Match the whole path against this pattern.
    pub fn at(&self, path: &str) -> Option<Params> {
        lookup(&self.node, path)
    }

    /// Match the path, or any ancestor of it, against this pattern.
    ///
    /// `/x` matches `/x`, `/x/` and `/x/y`, but not `/xy`. The longest
    /// matching ancestor wins. A trailing slash on the pattern is ignored,
    /// so `/x/` matches the same paths as `/x`.
    pub fn prefix(&self, path: &str) -> Option<Params> {
        let node = self.trimmed.as_ref().unwrap_or(&self.node);
        ancestors(path).find_map(|candidate| lookup(node, candidate))
    }
}

fn compile(raw: &str, route: &str) -> Result<Node<()>, PatternError> {
    let mut node = Node::default();
    node.insert(route, ()).map_err(|err| PatternError::Invalid {
        pattern: raw.to_owned(),
        reason: err.to_string(),
    })?;

    Ok(node)
}

fn lookup(node: &Node<()>, path: &str) -> Option<Params> {
    let matched = node.at(path).ok()?;

    Some(
        matched
            .params
            .iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect(),
    )
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.raw).finish()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// The path itself followed by each ancestor, ending at `/`.
fn ancestors(path: &str) -> impl Iterator<Item = &str> {
    let mut next = Some(path);

    std::iter::from_fn(move || {
        let current = next?;

        next = if current.len() > 1 && current.ends_with('/') {
            Some(&current[..current.len() - 1])
        } else {
            match current.rfind('/') {
                Some(0) if current.len() > 1 => Some("/"),
                Some(0) | None => None,
                Some(i) => Some(&current[..i]),
            }
        };

        Some(current)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ancestors_of_paths() {
        assert_eq!(ancestors("/a/b/c").collect::<Vec<_>>(), ["/a/b/c", "/a/b", "/a", "/"]);
        assert_eq!(ancestors("/x/").collect::<Vec<_>>(), ["/x/", "/x", "/"]);
        assert_eq!(ancestors("/").collect::<Vec<_>>(), ["/"]);
    }

    #[test]
    fn literal() {
        let pattern = Pattern::parse("/users/list").unwrap();
        assert_eq!(pattern.at("/users/list"), Some(Params::new()));
        assert_eq!(pattern.at("/users"), None);
        assert_eq!(pattern.at("/users/list/more"), None);
        assert_eq!(pattern.at("/Users/List"), None);
    }

    #[test]
    fn named_params() {
        let pattern = Pattern::parse("/users/:id/posts/:post").unwrap();
        let params = pattern.at("/users/7/posts/hello").unwrap();

        assert_eq!(params.get("id"), Some("7"));
        assert_eq!(params.get("post"), Some("hello"));
        assert_eq!(pattern.at("/users/7/posts"), None);
        assert_eq!(pattern.at("/users/7/8/posts/hello"), None);
    }

    #[test]
    fn catch_all() {
        let pattern = Pattern::parse("/static/*file").unwrap();
        let params = pattern.at("/static/css/site.css").unwrap();
        let file = params.get("file").unwrap();
        assert!(file.ends_with("css/site.css"));
    }

    #[test]
    fn prefix() {
        let pattern = Pattern::parse("/x").unwrap();
        assert!(pattern.prefix("/x").is_some());
        assert!(pattern.prefix("/x/").is_some());
        assert!(pattern.prefix("/x/y/z").is_some());
        assert!(pattern.prefix("/xy").is_none());
        assert!(pattern.prefix("/").is_none());
    }

    #[test]
    fn prefix_ignores_trailing_slash() {
        let pattern = Pattern::parse("/api/").unwrap();
        assert!(pattern.prefix("/api").is_some());
        assert!(pattern.prefix("/api/").is_some());
        assert!(pattern.prefix("/api/users").is_some());
        assert!(pattern.prefix("/apix").is_none());

        assert!(pattern.at("/api/").is_some());
        assert!(pattern.at("/api/users").is_none());
    }

    #[test]
    fn prefix_binds_params() {
        let pattern = Pattern::parse("/accounts/:account").unwrap();
        let params = pattern.prefix("/accounts/42/settings").unwrap();
        assert_eq!(params.get("account"), Some("42"));
    }

    #[test]
    fn root_prefix_matches_everything() {
        let pattern = Pattern::parse("/").unwrap();
        assert!(pattern.prefix("/").is_some());
        assert!(pattern.prefix("/anything/at/all").is_some());
        assert!(pattern.at("/anything").is_none());
    }

    #[test]
    fn relative_patterns_are_rejected() {
        assert!(matches!(
            Pattern::parse("users"),
            Err(PatternError::Relative(_))
        ));
    }
}
