//! Filter expressions for the Drive `files.list` call.
//!
//! Drive only does substring matching on names, so a fragment with spaces is
//! expanded into the delimiter variants people commonly use in file names.

use crate::config::DriveConfig;

use super::types::{Scope, ScopeIds};

/// Fragment that lists everything in the parent folder.
pub const LIST_ALL: &str = "*";

/// Pick the folders a search for `name_fragment` covers.
///
/// Extra folders are only searched for real fragments. The configuration is
/// read, never modified, so repeated calls yield the same ids.
pub fn resolve_scope_ids(name_fragment: &str, config: &DriveConfig) -> Vec<String> {
    if name_fragment != LIST_ALL && !config.other_dir_ids.is_empty() {
        let mut ids = config.other_dir_ids.clone();
        ids.push(config.parent_dir_id.clone());
        ids
    } else {
        vec![config.parent_dir_id.clone()]
    }
}

/// Build the `q` parameter for a name search.
///
/// Produces `(<scope>) and (<name>) and trashed = false`; the name clause is
/// dropped for [`LIST_ALL`].
pub fn build_search_query(name_fragment: &str, scope: Scope<'_>) -> String {
    let scope_clause = match scope.ids() {
        ScopeIds::Single(id) => parent_clause(id),
        ScopeIds::Multiple(ids) => ids
            .iter()
            .map(|id| parent_clause(id))
            .collect::<Vec<_>>()
            .join(" or "),
    };

    if name_fragment == LIST_ALL {
        return format!("({scope_clause}) and trashed = false");
    }

    format!(
        "({scope_clause}) and ({}) and trashed = false",
        name_clause(name_fragment)
    )
}

fn parent_clause(id: &str) -> String {
    format!("'{}' in parents", escape_literal(id))
}

fn contains_clause(value: &str) -> String {
    format!("name contains '{}'", escape_literal(value))
}

fn name_clause(name_fragment: &str) -> String {
    if !name_fragment.contains(' ') {
        return contains_clause(name_fragment);
    }

    name_variants(name_fragment)
        .iter()
        .map(|v| contains_clause(v))
        .collect::<Vec<_>>()
        .join(" or ")
}

/// The fragment followed by its cumulative delimiter rewrites:
/// spaces to dots, dots to hyphens, hyphens to underscores.
pub fn name_variants(name_fragment: &str) -> [String; 4] {
    let dotted = name_fragment.replace(' ', ".");
    let hyphenated = dotted.replace('.', "-");
    let underscored = hyphenated.replace('-', "_");
    [name_fragment.to_string(), dotted, hyphenated, underscored]
}

/// Escape a string literal for the Drive query language.
fn escape_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_single_word_single_scope() {
        let q = build_search_query("ubuntu", Scope::single("root"));
        assert_eq!(
            q,
            "('root' in parents) and (name contains 'ubuntu') and trashed = false"
        );
        assert_eq!(q.matches("contains").count(), 1);
    }

    #[test]
    fn test_multiple_scopes_are_or_combined() {
        let scope = ids(&["a", "b", "root"]);
        let q = build_search_query("iso", Scope::multiple(&scope).unwrap());
        assert_eq!(
            q,
            "('a' in parents or 'b' in parents or 'root' in parents) \
             and (name contains 'iso') and trashed = false"
        );
    }

    #[test]
    fn test_spaced_fragment_expands_to_four_variants() {
        let q = build_search_query("my show s01", Scope::single("root"));
        assert_eq!(
            q,
            "('root' in parents) and (name contains 'my show s01' \
             or name contains 'my.show.s01' \
             or name contains 'my-show-s01' \
             or name contains 'my_show_s01') and trashed = false"
        );
        assert_eq!(q.matches("contains").count(), 4);
    }

    #[test]
    fn test_variants_are_cumulative() {
        // Pre-existing dots and hyphens get rewritten too.
        let variants = name_variants("a.b c-d");
        assert_eq!(variants[0], "a.b c-d");
        assert_eq!(variants[1], "a.b.c-d");
        assert_eq!(variants[2], "a-b-c-d");
        assert_eq!(variants[3], "a_b_c_d");
    }

    #[test]
    fn test_no_space_keeps_delimiters() {
        let q = build_search_query("a.b-c", Scope::single("root"));
        assert!(q.contains("(name contains 'a.b-c')"));
        assert_eq!(q.matches("contains").count(), 1);
    }

    #[test]
    fn test_list_all_omits_name_clause() {
        let q = build_search_query(LIST_ALL, Scope::single("root"));
        assert_eq!(q, "('root' in parents) and trashed = false");
    }

    #[test]
    fn test_quotes_are_escaped() {
        let q = build_search_query("it's", Scope::single("root"));
        assert!(q.contains(r"name contains 'it\'s'"));

        let q = build_search_query(r"a\b", Scope::single("root"));
        assert!(q.contains(r"name contains 'a\\b'"));
    }

    #[test]
    fn test_resolve_scope_parent_only() {
        let config = DriveConfig {
            parent_dir_id: "root".to_string(),
            ..DriveConfig::default()
        };
        assert_eq!(resolve_scope_ids("movie", &config), ids(&["root"]));
    }

    #[test]
    fn test_resolve_scope_with_other_dirs() {
        let config = DriveConfig {
            parent_dir_id: "root".to_string(),
            other_dir_ids: ids(&["a", "b"]),
            ..DriveConfig::default()
        };
        assert_eq!(resolve_scope_ids("movie", &config), ids(&["a", "b", "root"]));
        assert_eq!(resolve_scope_ids(LIST_ALL, &config), ids(&["root"]));
    }

    #[test]
    fn test_resolve_scope_is_repeatable() {
        let config = DriveConfig {
            parent_dir_id: "root".to_string(),
            other_dir_ids: ids(&["a"]),
            ..DriveConfig::default()
        };

        let first = resolve_scope_ids("x", &config);
        let second = resolve_scope_ids("x", &config);
        assert_eq!(first, second);
        assert_eq!(config.other_dir_ids, ids(&["a"]));
    }
}
