use serde::Serialize;

/// The envelope wrapping every list returned by the service.
///
/// Both the order of the results and their count are decided by the
/// service.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
#[cfg_attr(
    feature = "deserialize",
    serde(bound(deserialize = "T: serde::Deserialize<'de>"))
)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults<T> {
    /// Total number of results matching the query.
    ///
    /// With paged queries, this value may exceed the length of
    /// [`Self::results`].
    #[serde(default)]
    #[cfg_attr(feature = "deserialize", serde(deserialize_with = "crate::null_as_default"))]
    pub num_results: u64,
    /// Results contained in the current page.
    #[serde(default = "Vec::new")]
    #[cfg_attr(feature = "deserialize", serde(deserialize_with = "crate::null_as_default"))]
    pub results: Vec<T>,
}

impl<T> SearchResults<T> {
    /// Returns the number of results contained in the current page.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Checks whether the current page is empty.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Returns an iterator over the results of the current page.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.results.iter()
    }
}

impl<T> IntoIterator for SearchResults<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a SearchResults<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

/// The envelope returned by the service when a request fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "deserialize", derive(serde::Deserialize))]
#[serde(default)]
pub struct ErrorResponse {
    /// Error description.
    #[cfg_attr(feature = "deserialize", serde(deserialize_with = "crate::null_as_default"))]
    pub message: String,
    /// Short error name, such as the reason phrase of the HTTP status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Path of the failed request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ErrorResponse {
    /// Creates an [`ErrorResponse`] with the given description.
    #[must_use]
    #[inline]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: None,
            path: None,
        }
    }
}
