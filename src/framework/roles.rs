//! Role assignment.
//!
//! A role is the integer a rendering layer uses to address one field of a row. Two roles are
//! reserved: [`Role::OBJECT`] returns the record itself and [`Role::DISPLAY`] aliases the
//! configured display field. Field `i` of a record's table gets role `Role::FIRST_FIELD + i`.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use tracing::warn;

use crate::framework::record::FieldDescriptor;

/// Field names the rendering layer reserves for its own use.
pub const RESERVED_NAMES: &[&str] = &["id", "index", "class", "model", "modelData"];

/// Integer identifier for one readable column of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Role(pub u32);

impl Role {
    pub const OBJECT: Role = Role(0);
    pub const DISPLAY: Role = Role(1);
    pub const FIRST_FIELD: u32 = 2;

    pub const OBJECT_NAME: &'static str = "object";
    pub const DISPLAY_NAME: &'static str = "display";

    fn for_field(index: usize) -> Role {
        let offset = u32::try_from(index).unwrap_or(u32::MAX - Role::FIRST_FIELD);
        Role(Role::FIRST_FIELD + offset)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A field that could not be given a role. The field is left out of the role mapping.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoleConfigError {
    #[error("can't have {name:?} as a role name in ObjectListModel<{record}>: reserved")]
    Reserved { record: &'static str, name: &'static str },
    #[error("can't have {name:?} as a role name in ObjectListModel<{record}>: already registered")]
    Duplicate { record: &'static str, name: &'static str },
}

/// The role mapping of one list, computed once from the record's field table.
#[derive(Debug, Clone)]
pub struct RoleTable {
    names: BTreeMap<Role, &'static str>,
    /// Field table index for every field role.
    field_index: BTreeMap<Role, usize>,
    display_field: Option<usize>,
    uid_field: Option<usize>,
    errors: Vec<RoleConfigError>,
}

impl RoleTable {
    pub fn build<T>(
        record: &'static str,
        fields: &[FieldDescriptor<T>],
        display_field: Option<&str>,
        uid_field: Option<&str>,
    ) -> Self {
        let mut names = BTreeMap::new();
        let mut field_index = BTreeMap::new();
        let mut errors = Vec::new();
        let mut seen: HashSet<&'static str> = HashSet::new();

        names.insert(Role::OBJECT, Role::OBJECT_NAME);
        seen.insert(Role::OBJECT_NAME);
        if display_field.is_some() {
            names.insert(Role::DISPLAY, Role::DISPLAY_NAME);
            seen.insert(Role::DISPLAY_NAME);
        }

        for (index, field) in fields.iter().enumerate() {
            let name = field.name();
            let error = if RESERVED_NAMES.contains(&name) {
                Some(RoleConfigError::Reserved { record, name })
            } else if !seen.insert(name) {
                Some(RoleConfigError::Duplicate { record, name })
            } else {
                None
            };
            match error {
                Some(e) => {
                    warn!(record, field = name, error = %e, "Field skipped");
                    errors.push(e);
                }
                None => {
                    let role = Role::for_field(index);
                    names.insert(role, name);
                    field_index.insert(role, index);
                }
            }
        }

        let lookup = |wanted: Option<&str>| {
            wanted.and_then(|w| {
                field_index
                    .values()
                    .copied()
                    .find(|&i| fields[i].name() == w)
            })
        };
        let display = lookup(display_field);
        let uid = lookup(uid_field);
        if let (Some(name), None) = (display_field, display) {
            warn!(record, field = name, "Display field is not a registered field");
        }
        if let (Some(name), None) = (uid_field, uid) {
            warn!(record, field = name, "Uid field is not a registered field");
        }

        Self {
            names,
            field_index,
            display_field: display,
            uid_field: uid,
            errors,
        }
    }

    pub fn names(&self) -> &BTreeMap<Role, &'static str> {
        &self.names
    }

    pub fn name(&self, role: Role) -> Option<&'static str> {
        self.names.get(&role).copied()
    }

    pub fn role_for_name(&self, name: &str) -> Option<Role> {
        self.names
            .iter()
            .find(|(_, n)| **n == name)
            .map(|(role, _)| *role)
    }

    /// Field table index behind `role`. The display role resolves to the display field.
    pub fn field_index(&self, role: Role) -> Option<usize> {
        if role == Role::DISPLAY {
            self.display_field
        } else {
            self.field_index.get(&role).copied()
        }
    }

    pub fn role_of_field(&self, index: usize) -> Option<Role> {
        self.field_index
            .iter()
            .find(|(_, i)| **i == index)
            .map(|(role, _)| *role)
    }

    /// `(role, field index)` for every registered field.
    pub fn fields(&self) -> impl Iterator<Item = (Role, usize)> + '_ {
        self.field_index.iter().map(|(role, index)| (*role, *index))
    }

    pub fn display_field(&self) -> Option<usize> {
        self.display_field
    }

    pub fn uid_field(&self) -> Option<usize> {
        self.uid_field
    }

    pub fn errors(&self) -> &[RoleConfigError] {
        &self.errors
    }
}
