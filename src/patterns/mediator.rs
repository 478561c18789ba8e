//! Mediator exercise
//!
//! Users and groups know nothing about each other. Every operation that
//! touches both goes through `UserGroupMediator`, which validates names
//! against both collections before acting.

use thiserror::Error;

use crate::core::config::ExerciseConfig;
use crate::core::error::ExerciseError;
use crate::core::transcript::Transcript;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediatorError {
    #[error("User '{0}' does not exist")]
    UnknownUser(String),

    #[error("Group '{0}' does not exist")]
    UnknownGroup(String),
}

/// A group holds user names in insertion order
#[derive(Debug, Clone)]
pub struct Group {
    name: String,
    users: Vec<String>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            users: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn users(&self) -> &[String] {
        &self.users
    }

    pub fn contains_user(&self, name: &str) -> bool {
        self.users.iter().any(|u| u == name)
    }

    pub fn add_user(&mut self, name: &str) {
        if !self.contains_user(name) {
            self.users.push(name.to_string());
        }
    }

    pub fn remove_user(&mut self, name: &str) {
        self.users.retain(|u| u != name);
    }
}

#[derive(Debug, Default)]
pub struct UserList {
    users: Vec<String>,
}

impl UserList {
    pub fn contains(&self, name: &str) -> bool {
        self.users.iter().any(|u| u == name)
    }

    pub fn add(&mut self, name: &str) {
        if !self.contains(name) {
            self.users.push(name.to_string());
        }
    }

    pub fn remove(&mut self, name: &str) {
        self.users.retain(|u| u != name);
    }

    /// All user names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names = self.users.clone();
        names.sort();
        names
    }
}

#[derive(Debug, Default)]
pub struct GroupList {
    groups: Vec<Group>,
}

impl GroupList {
    pub fn find(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name() == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Group> {
        self.groups.iter_mut().find(|g| g.name() == name)
    }

    pub fn add(&mut self, name: &str) {
        if self.find(name).is_none() {
            self.groups.push(Group::new(name));
        }
    }

    /// All group names, sorted ignoring case
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.groups.iter().map(|g| g.name.clone()).collect();
        names.sort_by_key(|name| name.to_lowercase());
        names
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut Group> {
        self.groups.iter_mut()
    }
}

/// The only place that sees both users and groups
#[derive(Debug, Default)]
pub struct UserGroupMediator {
    users: UserList,
    groups: GroupList,
}

impl UserGroupMediator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&mut self, name: &str) {
        self.users.add(name);
    }

    /// Remove a user, taking it out of every group first
    pub fn remove_user(&mut self, name: &str) -> Result<(), MediatorError> {
        self.remove_user_from_all_groups(name)?;
        self.users.remove(name);
        Ok(())
    }

    pub fn add_group(&mut self, name: &str) {
        self.groups.add(name);
    }

    fn check_user(&self, user: &str) -> Result<(), MediatorError> {
        if self.users.contains(user) {
            Ok(())
        } else {
            Err(MediatorError::UnknownUser(user.to_string()))
        }
    }

    fn group(&self, group: &str) -> Result<&Group, MediatorError> {
        self.groups
            .find(group)
            .ok_or_else(|| MediatorError::UnknownGroup(group.to_string()))
    }

    fn group_mut(&mut self, group: &str) -> Result<&mut Group, MediatorError> {
        self.groups
            .find_mut(group)
            .ok_or_else(|| MediatorError::UnknownGroup(group.to_string()))
    }

    pub fn add_user_to_group(&mut self, user: &str, group: &str) -> Result<(), MediatorError> {
        self.check_user(user)?;
        self.group_mut(group)?.add_user(user);
        Ok(())
    }

    pub fn remove_user_from_group(&mut self, user: &str, group: &str) -> Result<(), MediatorError> {
        self.check_user(user)?;
        self.group_mut(group)?.remove_user(user);
        Ok(())
    }

    pub fn remove_user_from_all_groups(&mut self, user: &str) -> Result<(), MediatorError> {
        self.check_user(user)?;
        for group in self.groups.iter_mut() {
            group.remove_user(user);
        }
        Ok(())
    }

    pub fn is_user_in_group(&self, user: &str, group: &str) -> Result<bool, MediatorError> {
        self.check_user(user)?;
        Ok(self.group(group)?.contains_user(user))
    }

    /// Names of the groups containing `user`, in sorted group order
    pub fn groups_with_user(&self, user: &str) -> Result<Vec<String>, MediatorError> {
        self.check_user(user)?;
        Ok(self
            .groups
            .names()
            .into_iter()
            .filter(|name| {
                self.groups
                    .find(name)
                    .is_some_and(|group| group.contains_user(user))
            })
            .collect())
    }

    pub fn users_in_group(&self, group: &str) -> Result<Vec<String>, MediatorError> {
        Ok(self.group(group)?.users().to_vec())
    }

    pub fn all_groups(&self) -> Vec<String> {
        self.groups.names()
    }

    pub fn all_users(&self) -> Vec<String> {
        self.users.names()
    }
}

fn setup() -> Result<UserGroupMediator, MediatorError> {
    let mut mediator = UserGroupMediator::new();
    for user in ["Stephen", "Gladys", "Marvin", "Arthur"] {
        mediator.add_user(user);
    }
    for group in ["admins", "Users", "Power Users"] {
        mediator.add_group(group);
    }
    let memberships = [
        ("Marvin", "admins"),
        ("Arthur", "admins"),
        ("Stephen", "Users"),
        ("Gladys", "Users"),
        ("Arthur", "Power Users"),
        ("Marvin", "Power Users"),
    ];
    for (user, group) in memberships {
        mediator.add_user_to_group(user, group)?;
    }
    Ok(mediator)
}

pub fn run(_config: &ExerciseConfig, out: &mut Transcript) -> Result<(), ExerciseError> {
    let mut mediator = setup()?;

    out.line("  Operation 1: Show all groups");
    out.line(format!("    All groups: {}", mediator.all_groups().join(", ")));

    out.line("  Operation 2: Show all users");
    out.line(format!("    All users : {}", mediator.all_users().join(", ")));

    out.line("  Operation 3: Determine if a user is a member of a specific group.");
    let (user, group) = ("Arthur", "admins");
    let answer = if mediator.is_user_in_group(user, group)? {
        "Yes"
    } else {
        "No"
    };
    out.line(format!(
        "    Is user '{}' in the '{}' group?  {}",
        user, group, answer
    ));

    out.line("  Operation 4: Show all users in a specific group.");
    let group = "Users";
    out.line(format!(
        "    All users in '{}' group: {}",
        group,
        mediator.users_in_group(group)?.join(", ")
    ));

    out.line("  Operation 5: Show all groups containing a specific user.");
    let user = "Marvin";
    out.line(format!(
        "    All groups with user '{}': {}",
        user,
        mediator.groups_with_user(user)?.join(", ")
    ));

    out.line("  Operation 6: Remove a user from a group.");
    let (user, group) = ("Marvin", "Power Users");
    mediator.remove_user_from_group(user, group)?;
    out.line(format!("    Removed user '{}' from group '{}'", user, group));
    out.line(format!(
        "      All groups with user '{}': {}",
        user,
        mediator.groups_with_user(user)?.join(", ")
    ));

    out.line("  Operation 7: Add a user to a group.");
    let group = "Users";
    out.line(format!("    Adding user '{}' to group '{}'.", user, group));
    mediator.add_user_to_group(user, group)?;
    out.line(format!(
        "      All groups with user '{}': {}",
        user,
        mediator.groups_with_user(user)?.join(", ")
    ));

    out.line("  Operation 8: Remove a user from all groups.");
    let user = "Arthur";
    out.line(format!("    Removing user '{}' from all groups.", user));
    out.line(format!(
        "      Start: all groups with user '{}': {}",
        user,
        mediator.groups_with_user(user)?.join(", ")
    ));
    out.line("      Removing...");
    mediator.remove_user_from_all_groups(user)?;
    out.line(format!(
        "      End: all groups with user '{}': {}",
        user,
        mediator.groups_with_user(user)?.join(", ")
    ));

    out.line("  Operation 9: Remove a user (also removes the user from all groups).");
    let user = "Marvin";
    out.line(format!("    Removing user '{}'.", user));
    mediator.remove_user(user)?;
    out.line(format!("      All users : {}", mediator.all_users().join(", ")));
    for group in mediator.all_groups() {
        out.line(format!(
            "      Users in group '{}': {}",
            group,
            mediator.users_in_group(&group)?.join(", ")
        ));
    }
    Ok(())
}
