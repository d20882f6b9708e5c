//! gdsearch - Google Drive name search
//!
//! Searches the configured Drive folders for files whose name contains a
//! fragment and renders the matches as an HTML message for chat frontends.

pub mod config;
pub mod drive;
pub mod error;
pub mod logging;

pub use config::{AuthConfig, Config, DriveConfig, LoggingConfig};
pub use drive::{
    annotate, build_search_query, format_size, generate_files_list_message, get_file_link,
    resolve_scope_ids, AnnotatedEntry, DriveClient, DriveSearch, FileEntry, RefreshTokenProvider,
    Scope, SearchRequest, StaticTokenProvider, TokenProvider, FOLDER_MIME_TYPE,
    NO_FILES_MESSAGE,
};
pub use error::{Result, SearchError};
