//! Drive search types.

use serde::{Deserialize, Deserializer};

use crate::{Result, SearchError};

/// MIME type Drive uses for folders.
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// Default number of entries requested per search.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Fields selector sent with every list call.
pub const LIST_FIELDS: &str = "files(id, name, mimeType, size)";

/// Ordering sent with every list call.
pub const LIST_ORDER_BY: &str = "modifiedTime desc";

/// A name search restricted to one or more folders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Fragment matched against file names.
    pub name_fragment: String,
    /// Folders the search is restricted to. Never empty.
    scope_ids: Vec<String>,
}

impl SearchRequest {
    /// Create a new search request.
    ///
    /// Fails when `scope_ids` is empty.
    pub fn new(name_fragment: impl Into<String>, scope_ids: Vec<String>) -> Result<Self> {
        if scope_ids.is_empty() {
            return Err(SearchError::Validation(
                "a search needs at least one scope id".to_string(),
            ));
        }
        Ok(Self {
            name_fragment: name_fragment.into(),
            scope_ids,
        })
    }

    /// Folders the search is restricted to.
    pub fn scope_ids(&self) -> &[String] {
        &self.scope_ids
    }

    /// The scope as seen by the query builder.
    pub fn scope(&self) -> Scope<'_> {
        Scope::from_non_empty(&self.scope_ids)
    }
}

/// Folders a query is restricted to. Always names at least one folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope<'a>(ScopeIds<'a>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScopeIds<'a> {
    Single(&'a str),
    Multiple(&'a [String]),
}

impl<'a> Scope<'a> {
    /// Restrict a query to one folder.
    pub fn single(id: &'a str) -> Self {
        Scope(ScopeIds::Single(id))
    }

    /// Restrict a query to any of several folders.
    ///
    /// Fails when `ids` is empty.
    pub fn multiple(ids: &'a [String]) -> Result<Self> {
        if ids.is_empty() {
            return Err(SearchError::Validation(
                "a search needs at least one scope id".to_string(),
            ));
        }
        Ok(Self::from_non_empty(ids))
    }

    fn from_non_empty(ids: &'a [String]) -> Self {
        match ids {
            [single] => Scope(ScopeIds::Single(single)),
            ids => Scope(ScopeIds::Multiple(ids)),
        }
    }

    pub(crate) fn ids(&self) -> ScopeIds<'a> {
        self.0
    }
}

/// A file or folder record returned by Drive.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub id: String,
    pub name: String,
    pub mime_type: String,
    /// Size in bytes. Absent for folders and Google-native documents.
    #[serde(default, deserialize_with = "deserialize_size")]
    pub size: Option<u64>,
}

impl FileEntry {
    /// Create a new entry.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            mime_type: mime_type.into(),
            size: None,
        }
    }

    /// Set the size.
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Check if this entry is a folder.
    pub fn is_folder(&self) -> bool {
        self.mime_type == FOLDER_MIME_TYPE
    }
}

/// An entry with its derived viewer URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedEntry {
    pub entry: FileEntry,
    pub url: String,
}

/// Body of a `files.list` response.
#[derive(Debug, Default, Deserialize)]
pub struct FileList {
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

/// Drive encodes int64 fields as JSON strings.
fn deserialize_size<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawSize {
        Number(u64),
        Text(String),
    }

    match Option::<RawSize>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawSize::Number(n)) => Ok(Some(n)),
        Some(RawSize::Text(s)) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
