//! Drive search module for gdsearch.
//!
//! This module provides the name search over a Drive folder tree:
//! - Filter construction in the Drive query language
//! - The `files.list` call and the token providers it needs
//! - Viewer links and the rendered HTML message

pub mod auth;
pub mod client;
pub mod links;
pub mod message;
pub mod query;
pub mod search;
pub mod types;

pub use auth::{RefreshTokenProvider, StaticTokenProvider, TokenProvider};
pub use client::DriveClient;
pub use links::{annotate, get_file_link};
pub use message::{format_size, generate_files_list_message, NO_FILES_MESSAGE};
pub use query::{build_search_query, name_variants, resolve_scope_ids, LIST_ALL};
pub use search::DriveSearch;
pub use types::{
    AnnotatedEntry, FileEntry, FileList, Scope, SearchRequest, DEFAULT_PAGE_SIZE,
    FOLDER_MIME_TYPE,
};
