use std::collections::HashMap;

use mime::Mime;

/// Maps file extensions to content types.
///
/// Built once before serving begins and shared read-only by the router and
/// every response it creates. Lookups consult explicit overrides first and
/// then the `mime_guess` table.
#[derive(Clone, Debug, Default)]
pub struct ContentTypes {
    overrides: HashMap<String, Mime>,
}

impl ContentTypes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a content type for an extension, overriding the default table.
    ///
    /// Extensions are matched case-insensitively and without a leading dot.
    pub fn with(mut self, extension: &str, mime: Mime) -> Self {
        self.overrides.insert(normalize(extension), mime);
        self
    }

    /// Look up the content type for an extension.
    pub fn for_extension(&self, extension: &str) -> Option<Mime> {
        let extension = normalize(extension);

        if let Some(mime) = self.overrides.get(&extension) {
            return Some(mime.clone());
        }

        mime_guess::from_ext(&extension).first()
    }

    /// Look up the content type for a file name.
    ///
    /// The extension is whatever follows the last `.` of the final path
    /// element. A file name without a dot is looked up as a whole.
    pub fn for_file_name(&self, file_name: &str) -> Option<Mime> {
        let last = file_name.rsplit('/').next().unwrap_or(file_name);

        match last.rsplit_once('.') {
            Some((_, extension)) => self.for_extension(extension),
            None => self.for_extension(last),
        }
    }
}

fn normalize(extension: &str) -> String {
    extension.trim_start_matches('.').to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table() {
        let types = ContentTypes::new();
        assert_eq!(types.for_extension("html"), Some(mime::TEXT_HTML));
        assert_eq!(types.for_extension(".JSON"), Some(mime::APPLICATION_JSON));
        assert_eq!(types.for_extension("definitely-not-a-type"), None);
    }

    #[test]
    fn overrides_win() {
        let types = ContentTypes::new().with("html", mime::TEXT_PLAIN);
        assert_eq!(types.for_extension("html"), Some(mime::TEXT_PLAIN));
    }

    #[test]
    fn file_names() {
        let types = ContentTypes::new();
        assert_eq!(types.for_file_name("static/site.v2/index.html"), Some(mime::TEXT_HTML));
        assert_eq!(types.for_file_name("/srv/css"), Some(mime::TEXT_CSS));
    }
}
