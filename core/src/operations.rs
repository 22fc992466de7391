//! Sub-resource path segments for operations that are not keyed by identifier.
//!
//! Identifier-keyed operations (`get_by_id`, `delete_by_id`, `update_by_id`,
//! `edit_by_id`) splice the identifier into the path and have no segment here.

pub const COUNT: &str = "count";
pub const COUNT_ALL: &str = "count-all";
pub const GET_ONE: &str = "get-one";
pub const GET_MANY: &str = "get-many";
pub const GET_PAGE: &str = "get-page";
pub const DELETE: &str = "delete";
pub const DELETE_MANY: &str = "delete-many";
pub const SAVE: &str = "save";
pub const SAVE_MANY: &str = "save-many";
pub const UPDATE: &str = "update";
pub const UPDATE_MANY: &str = "update-many";
pub const EDIT: &str = "edit";
pub const EDIT_MANY: &str = "edit-many";

/// Every registered segment, in table order.
pub const ALL: [&str; 13] = [
    COUNT,
    COUNT_ALL,
    GET_ONE,
    GET_MANY,
    GET_PAGE,
    DELETE,
    DELETE_MANY,
    SAVE,
    SAVE_MANY,
    UPDATE,
    UPDATE_MANY,
    EDIT,
    EDIT_MANY,
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn segments_are_unique() {
        let unique: HashSet<_> = ALL.iter().collect();
        assert_eq!(unique.len(), ALL.len());
    }

    #[test]
    fn segments_are_path_safe() {
        for segment in ALL {
            assert!(segment.chars().all(|c| c.is_ascii_lowercase() || c == '-'), "{segment}");
        }
    }
}
