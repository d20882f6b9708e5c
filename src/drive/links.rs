//! Viewer links for Drive entries.

use super::types::{AnnotatedEntry, FileEntry};

const FOLDER_URL: &str = "https://drive.google.com/drive/folders/";
const DOWNLOAD_URL: &str = "https://drive.google.com/uc?id=";

/// Link that opens a folder or downloads a file.
pub fn get_file_link(id: &str, is_folder: bool) -> String {
    if is_folder {
        format!("{FOLDER_URL}{id}")
    } else {
        format!("{DOWNLOAD_URL}{id}&export=download")
    }
}

/// Attach a viewer URL to every entry, keeping their order.
pub fn annotate(entries: Vec<FileEntry>) -> Vec<AnnotatedEntry> {
    entries
        .into_iter()
        .map(|entry| {
            let url = get_file_link(&entry.id, entry.is_folder());
            AnnotatedEntry { entry, url }
        })
        .collect()
}
