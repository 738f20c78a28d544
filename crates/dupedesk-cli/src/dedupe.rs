//! Duplicate grouping
//!
//! The one-line transform between the fetch pipeline and the report:
//! group fetched users by display name, keep names shared by more than
//! one record.

use std::collections::BTreeMap;

use dupedesk_client::User;

/// Users sharing one display name.
#[derive(Debug, Clone)]
pub struct DuplicateGroup {
    /// The shared display name
    pub name: String,
    /// Members in fetch arrival order (always more than one)
    pub members: Vec<User>,
}

/// Group `users` by exact name and keep the groups with more than one
/// member, ordered by name. Members keep their arrival order.
pub fn duplicates_by_name(users: &[User]) -> Vec<DuplicateGroup> {
    let mut by_name: BTreeMap<&str, Vec<&User>> = BTreeMap::new();
    for user in users {
        by_name.entry(user.name.as_str()).or_default().push(user);
    }

    by_name
        .into_iter()
        .filter(|(_, members)| members.len() > 1)
        .map(|(name, members)| DuplicateGroup {
            name: name.to_string(),
            members: members.into_iter().cloned().collect(),
        })
        .collect()
}

/// Total number of user records across all groups
pub fn member_count(groups: &[DuplicateGroup]) -> usize {
    groups.iter().map(|g| g.members.len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, name: &str) -> User {
        serde_json::from_value(serde_json::json!({ "id": id, "name": name })).unwrap()
    }

    #[test]
    fn test_groups_names_shared_by_more_than_one() {
        let users = vec![user(1, "Ann"), user(2, "Ann"), user(3, "Bo")];
        let groups = duplicates_by_name(&users);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "Ann");
        let ids: Vec<i64> = groups[0].members.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_groups_ordered_by_name() {
        let users = vec![
            user(1, "Zoe"),
            user(2, "Ann"),
            user(3, "Zoe"),
            user(4, "Ann"),
        ];
        let groups = duplicates_by_name(&users);

        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Ann", "Zoe"]);
        assert_eq!(member_count(&groups), 4);
    }

    #[test]
    fn test_name_matching_is_exact() {
        let users = vec![user(1, "Ann"), user(2, "ann")];
        assert!(duplicates_by_name(&users).is_empty());
    }

    #[test]
    fn test_no_duplicates() {
        let users = vec![user(1, "Ann"), user(2, "Bo")];
        assert!(duplicates_by_name(&users).is_empty());
    }
}
