//! Minimal HTTP message objects consumed by the opening handshake.
//!
//! The session only needs a headers abstraction plus the response status
//! line; parsing and serialization of the HTTP messages themselves belong
//! to the embedding server or client.

/// An individual header line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    /// The header name, as given.
    pub name: String,
    /// The header value.
    pub value: String,
}

impl Header {
    /// Create a new header with the given name and value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An ordered collection of headers with case-insensitive name lookup.
///
/// A header name may appear on multiple lines; [`Headers::value`] returns
/// the first, [`Headers::multi_values`] all of them in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Headers(Vec<Header>);

impl Headers {
    /// Create an empty collection of headers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of header lines in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if at least one header with the given name exists.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.0.iter().any(|h| h.name.eq_ignore_ascii_case(name))
    }

    /// Get the value of the first header with the given name.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    /// Get the values of every header line with the given name, in order.
    #[must_use]
    pub fn multi_values(&self, name: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
            .collect()
    }

    /// Get the comma-separated tokens of every header line with the given
    /// name, trimmed and lowercased.
    ///
    /// `Connection: keep-alive, Upgrade` yields `["keep-alive", "upgrade"]`.
    #[must_use]
    pub fn tokens(&self, name: &str) -> Vec<String> {
        self.multi_values(name)
            .iter()
            .flat_map(|v| v.split(','))
            .map(|t| t.trim().to_ascii_lowercase())
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Remove every header line with the given name and set a single value.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.remove(name);
        self.0.push(Header::new(name, value));
    }

    /// Remove every header line with the given name and set one line per
    /// given value.
    pub fn set_multi<I, S>(&mut self, name: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.remove(name);
        for value in values {
            self.0.push(Header::new(name, value));
        }
    }

    /// Add a header line without disturbing existing lines of the same name.
    pub fn append(&mut self, name: &str, value: impl Into<String>) {
        self.0.push(Header::new(name, value));
    }

    /// Remove every header line with the given name.
    pub fn remove(&mut self, name: &str) {
        self.0.retain(|h| !h.name.eq_ignore_ascii_case(name));
    }

    /// Return an iterator over the header lines in order.
    pub fn iter(&self) -> impl Iterator<Item = &Header> {
        self.0.iter()
    }
}

/// An HTTP request, as seen by the opening handshake.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
    /// The request method. The upgrade handshake requires `GET`.
    pub method: String,
    /// The request target (path and query).
    pub target: String,
    /// The request headers.
    pub headers: Headers,
}

impl Default for Request {
    fn default() -> Self {
        Self {
            method: "GET".into(),
            target: "/".into(),
            headers: Headers::new(),
        }
    }
}

impl Request {
    /// Create a GET request for the given target with empty headers.
    #[must_use]
    pub fn get(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Self::default()
        }
    }
}

/// An HTTP response, as seen by the opening handshake.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Response {
    /// The numeric status code.
    pub status_code: u16,
    /// The reason phrase.
    pub status: String,
    /// The response headers.
    pub headers: Headers,
}
