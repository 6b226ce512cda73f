use std::collections::hash_map::{self, HashMap};
use std::{fmt, iter, mem};

/// A multimap of HTTP headers.
///
/// Names are compared case-sensitively, exactly as they were inserted.
/// Use [`get_ignore_case`](Headers::get_ignore_case) where a header
/// may arrive in any casing.
#[derive(Clone, Default)]
pub struct Headers {
    map: HashMap<String, HeaderValue>,
}

impl Headers {
    pub fn new() -> Headers {
        Headers {
            map: HashMap::with_capacity(16),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the first value of the header.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_all(name).next()
    }

    /// Returns the first value of the first header whose name matches
    /// `name` ignoring ASCII case.
    pub fn get_ignore_case(&self, name: &str) -> Option<&str> {
        self.get(name).or_else(|| {
            self.map
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .and_then(|(_, value)| value.iter().next())
        })
    }

    /// Returns every value of the header.
    pub fn get_all(&self, name: &str) -> Values<'_> {
        self.map
            .get(name)
            .map(|values| values.iter())
            .unwrap_or(Values {
                kind: ValuesKind::None,
            })
    }

    /// Set a header, replacing any previous values.
    ///
    /// Returns `true` if the header was already present.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        self.map
            .insert(name.into(), HeaderValue::One(value.into()))
            .is_some()
    }

    /// Set a multi-valued header, replacing any previous values.
    ///
    /// An empty list removes the header.
    pub fn insert_many<I>(&mut self, name: impl Into<String>, values: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let name = name.into();
        let mut values: Vec<String> = values.into_iter().map(Into::into).collect();

        let value = match values.len() {
            0 => return self.map.remove(&name).is_some(),
            1 => HeaderValue::One(values.remove(0)),
            _ => HeaderValue::Many(values),
        };

        self.map.insert(name, value).is_some()
    }

    /// Add a value to a header, keeping any previous values.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let value = value.into();

        match self.map.entry(name.into()) {
            hash_map::Entry::Occupied(mut entry) => match entry.get_mut() {
                HeaderValue::One(old) => {
                    let old = mem::take(old);
                    entry.insert(HeaderValue::Many(vec![old, value]));
                }
                HeaderValue::Many(values) => {
                    values.push(value);
                }
            },
            hash_map::Entry::Vacant(entry) => {
                entry.insert(HeaderValue::One(value));
            }
        }
    }

    /// Remove a header, returning its values.
    pub fn remove(&mut self, name: &str) -> Vec<String> {
        match self.map.remove(name) {
            Some(HeaderValue::One(value)) => vec![value],
            Some(HeaderValue::Many(values)) => values,
            None => Vec::new(),
        }
    }

    /// Iterate over every name/value pair. Multi-valued headers
    /// yield one pair per value.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map
            .iter()
            .flat_map(|(name, values)| values.iter().map(move |value| (name.as_str(), value)))
    }
}

impl fmt::Debug for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.map)
    }
}

impl From<&::http::HeaderMap> for Headers {
    fn from(map: &::http::HeaderMap) -> Self {
        let mut headers = Headers::new();

        for (name, value) in map {
            headers.append(
                name.as_str(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            );
        }

        headers
    }
}

#[derive(Clone)]
enum HeaderValue {
    One(String),
    Many(Vec<String>),
}

impl HeaderValue {
    fn iter(&self) -> Values<'_> {
        let kind = match self {
            HeaderValue::One(value) => ValuesKind::One(iter::once(value)),
            HeaderValue::Many(values) => ValuesKind::Many(values.iter()),
        };

        Values { kind }
    }
}

impl fmt::Debug for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Iterator over the values of a header.
pub struct Values<'a> {
    kind: ValuesKind<'a>,
}

enum ValuesKind<'a> {
    None,
    One(iter::Once<&'a String>),
    Many(std::slice::Iter<'a, String>),
}

impl<'a> Iterator for Values<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        match self.kind {
            ValuesKind::None => None,
            ValuesKind::One(ref mut o) => o.next(),
            ValuesKind::Many(ref mut m) => m.next(),
        }
        .map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers() {
        let mut headers = Headers::new();
        assert!(headers.is_empty());

        headers.insert("A", "A");
        headers.insert_many("B", ["A", "B"]);
        headers.append("C", "A");
        headers.append("C", "B");
        headers.append("C", "C");

        assert_eq!(headers.len(), 3);
        assert_eq!(headers.get("C"), Some("A"));
        assert!(headers.get_all("B").eq(["A", "B"]));
        assert!(headers.get_all("C").eq(["A", "B", "C"]));
        assert_eq!(headers.iter().count(), 6);

        assert_eq!(headers.remove("C"), vec!["A", "B", "C"]);
        assert_eq!(headers.get_all("C").count(), 0);
        assert!(headers.remove("C").is_empty());

        assert!(headers.insert("A", "B"));
        assert!(headers.get_all("A").eq(["B"]));
    }

    #[test]
    fn case_sensitive() {
        let mut headers = Headers::new();
        headers.insert("Content-Type", "text/plain");

        assert!(headers.contains("Content-Type"));
        assert!(!headers.contains("content-type"));
        assert_eq!(headers.get("content-type"), None);
        assert_eq!(headers.get_ignore_case("content-type"), Some("text/plain"));
    }

    #[test]
    fn empty_insert_many_removes() {
        let mut headers = Headers::new();
        headers.insert("A", "A");
        assert!(headers.insert_many("A", Vec::<String>::new()));
        assert!(!headers.contains("A"));
    }

    #[test]
    fn from_http() {
        let mut map = ::http::HeaderMap::new();
        map.append("x-one", "1".parse().unwrap());
        map.append("x-one", "2".parse().unwrap());

        let headers = Headers::from(&map);
        assert!(headers.get_all("x-one").eq(["1", "2"]));
    }
}
