//! # ObjectListModel
//!
//! The generic observable list. It holds `Rc<T>` records in order, exposes their fields by
//! [`Role`], keeps an optional uid index on one field, and reports every change as a
//! [`ModelEvent`].
//!
//! ## Notification contract
//!
//! Each logical operation updates the internal state completely, releases every internal
//! borrow, and only then emits its events. Observers are therefore free to read the list or
//! even mutate it from inside a callback.
//!
//! | Operation | Events |
//! |---|---|
//! | insert (one or many) | `RowsInserted(a..b)`, then `CountChanged(n)` |
//! | remove | `RowsRemoved(i..i+1)`, then `CountChanged(n)` |
//! | move | `RowsRemoved(from..from+1)`, then `RowsInserted(to..to+1)` |
//! | clear | `RowsRemoved(0..n)`, then `CountChanged(0)` |
//! | field write on a record | `DataChanged { row, roles }` |
//!
//! Invalid input (out-of-range index, unknown uid, unknown role, empty batch) is a silent
//! no-op. Nothing here returns an error.
//!
//! ## Ownership
//! Inserting an `Unowned` record makes this list its owner. On removal the list destroys the
//! records it owns (running [`Record::on_destroy`]) and leaves the others alive.

use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::ops::Range;
use std::rc::Rc;

use tracing::debug;

use crate::framework::record::{destroy_record, FieldDescriptor, ListId, Record};
use crate::framework::roles::{Role, RoleConfigError, RoleTable};
use crate::framework::signal::{Signal, Subscription};
use crate::framework::value::FieldValue;

/// A change reported by a list to its observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelEvent {
    /// Rows `range` now hold newly inserted records.
    RowsInserted(Range<usize>),
    /// The records previously at `range` are gone.
    RowsRemoved(Range<usize>),
    /// Fields of one row changed in place.
    DataChanged { row: usize, roles: Vec<Role> },
    /// The row count changed to the given value.
    CountChanged(usize),
}

/// Construction options for an [`ObjectListModel`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Field aliased by [`Role::DISPLAY`].
    pub display_field: Option<String>,
    /// Field whose value keys the uid index.
    pub uid_field: Option<String>,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display(mut self, field: impl Into<String>) -> Self {
        self.display_field = Some(field.into());
        self
    }

    pub fn uid(mut self, field: impl Into<String>) -> Self {
        self.uid_field = Some(field.into());
        self
    }
}

struct Entry<T> {
    record: Rc<T>,
    /// Key under which `record` is currently indexed, if any.
    uid_key: Option<String>,
    _connections: Vec<Subscription>,
}

struct ListState<T> {
    entries: Vec<Entry<T>>,
    count: usize,
    uid_index: HashMap<String, Rc<T>>,
}

impl<T> ListState<T> {
    fn update_count(&mut self) -> Option<usize> {
        if self.count == self.entries.len() {
            None
        } else {
            self.count = self.entries.len();
            Some(self.count)
        }
    }

    fn index_uid(&mut self, entry: &Entry<T>) {
        if let Some(key) = &entry.uid_key {
            self.uid_index.insert(key.clone(), Rc::clone(&entry.record));
        }
    }

    /// Drops `key` if it points at `record`, then hands it to another entry still carrying it.
    fn unindex_uid(&mut self, record: &Rc<T>, key: Option<&String>) {
        let Some(key) = key else {
            return;
        };
        if !self.uid_index.get(key).is_some_and(|r| Rc::ptr_eq(r, record)) {
            return;
        }
        self.uid_index.remove(key);
        if let Some(other) = self.entries.iter().find(|e| e.uid_key.as_ref() == Some(key)) {
            self.uid_index.insert(key.clone(), Rc::clone(&other.record));
        }
    }

    fn position(&self, record: &Rc<T>) -> Option<usize> {
        self.entries.iter().position(|e| Rc::ptr_eq(&e.record, record))
    }
}

struct ListShared<T: Record> {
    id: ListId,
    fields: Vec<FieldDescriptor<T>>,
    roles: RoleTable,
    state: std::cell::RefCell<ListState<T>>,
    events: Signal<ModelEvent>,
}

impl<T: Record> ListShared<T> {
    fn uid_of(&self, record: &T) -> Option<String> {
        let index = self.roles.uid_field()?;
        let key = self.fields[index].read(record).to_key();
        (!key.is_empty()).then_some(key)
    }

    /// Claims ownership if possible and connects every notifying field back to this list.
    fn reference(self: &Rc<Self>, record: Rc<T>) -> Entry<T> {
        record.core().claim(self.id);
        let mut connections = Vec::new();
        for (role, index) in self.roles.fields() {
            let field = &self.fields[index];
            if !field.notifies() {
                continue;
            }
            let list = Rc::downgrade(self);
            let weak_record = Rc::downgrade(&record);
            connections.push(record.core().connect(field.name(), move || {
                if let (Some(list), Some(record)) = (list.upgrade(), weak_record.upgrade()) {
                    list.on_item_property_changed(&record, role);
                }
            }));
        }
        Entry {
            uid_key: self.uid_of(&record),
            record,
            _connections: connections,
        }
    }

    /// Disconnects `entry` and destroys its record if this list owns it.
    fn dereference(&self, entry: Entry<T>) {
        let Entry {
            record,
            _connections,
            ..
        } = entry;
        drop(_connections);
        if record.core().is_owned_by(self.id) {
            debug!(record = T::TYPE_NAME, list = %self.id, "Destroying owned record");
            destroy_record(&*record);
        }
    }

    fn on_item_property_changed(&self, record: &Rc<T>, role: Role) {
        let Some(field) = self.roles.field_index(role) else {
            return;
        };
        let is_uid = self.roles.uid_field() == Some(field);
        let new_key = if is_uid { self.uid_of(record) } else { None };

        let row = {
            let mut guard = self.state.borrow_mut();
            let state = &mut *guard;
            let row = state.position(record);
            if is_uid && row.is_some() {
                for pos in 0..state.entries.len() {
                    if !Rc::ptr_eq(&state.entries[pos].record, record) {
                        continue;
                    }
                    let old_key = state.entries[pos].uid_key.take();
                    state.unindex_uid(record, old_key.as_ref());
                    state.entries[pos].uid_key = new_key.clone();
                }
                if let Some(key) = &new_key {
                    state.uid_index.insert(key.clone(), Rc::clone(record));
                }
            }
            row
        };

        if let Some(row) = row {
            let mut roles = vec![role];
            if self.roles.display_field() == Some(field) {
                roles.push(Role::DISPLAY);
            }
            debug!(record = T::TYPE_NAME, list = %self.id, row, ?roles, "Data changed");
            self.events.emit(&ModelEvent::DataChanged { row, roles });
        }
    }
}

impl<T: Record> Drop for ListShared<T> {
    fn drop(&mut self) {
        let entries = std::mem::take(&mut self.state.get_mut().entries);
        for entry in entries {
            self.dereference(entry);
        }
    }
}

/// Observable ordered list of `Rc<T>` records.
///
/// Cloning produces another handle to the same list.
pub struct ObjectListModel<T: Record> {
    shared: Rc<ListShared<T>>,
}

impl<T: Record> Clone for ObjectListModel<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<T: Record> Default for ObjectListModel<T> {
    fn default() -> Self {
        Self::new(ListOptions::default())
    }
}

impl<T: Record> fmt::Debug for ObjectListModel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectListModel")
            .field("record", &T::TYPE_NAME)
            .field("id", &self.shared.id)
            .field("count", &self.count())
            .finish()
    }
}

impl<T: Record> ObjectListModel<T> {
    pub fn new(options: ListOptions) -> Self {
        let fields = T::fields();
        let roles = RoleTable::build(
            T::TYPE_NAME,
            &fields,
            options.display_field.as_deref(),
            options.uid_field.as_deref(),
        );
        let id = ListId::next();
        debug!(record = T::TYPE_NAME, list = %id, roles = roles.names().len(), "List created");
        Self {
            shared: Rc::new(ListShared {
                id,
                fields,
                roles,
                state: std::cell::RefCell::new(ListState {
                    entries: Vec::new(),
                    count: 0,
                    uid_index: HashMap::new(),
                }),
                events: Signal::new(),
            }),
        }
    }

    /// Shorthand for a list whose display and uid roles use the given fields.
    pub fn with_fields(display_field: Option<&str>, uid_field: Option<&str>) -> Self {
        Self::new(ListOptions {
            display_field: display_field.map(str::to_owned),
            uid_field: uid_field.map(str::to_owned),
        })
    }

    pub fn id(&self) -> ListId {
        self.shared.id
    }

    /// Registers an observer for every [`ModelEvent`] this list emits.
    #[must_use = "dropping the Subscription disconnects the observer immediately"]
    pub fn subscribe(&self, observer: impl Fn(&ModelEvent) + 'static) -> Subscription {
        self.shared.events.subscribe(observer)
    }

    /// Fields that were refused a role when the list was built.
    pub fn config_errors(&self) -> &[RoleConfigError] {
        self.shared.roles.errors()
    }

    // --- Reads ---

    pub fn count(&self) -> usize {
        self.shared.state.borrow().count
    }

    pub fn size(&self) -> usize {
        self.count()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.state.borrow().entries.is_empty()
    }

    pub fn at(&self, index: usize) -> Option<Rc<T>> {
        self.shared
            .state
            .borrow()
            .entries
            .get(index)
            .map(|e| Rc::clone(&e.record))
    }

    pub fn first(&self) -> Option<Rc<T>> {
        self.at(0)
    }

    pub fn last(&self) -> Option<Rc<T>> {
        let state = self.shared.state.borrow();
        state.entries.last().map(|e| Rc::clone(&e.record))
    }

    /// The records in row order.
    pub fn to_vec(&self) -> Vec<Rc<T>> {
        self.shared
            .state
            .borrow()
            .entries
            .iter()
            .map(|e| Rc::clone(&e.record))
            .collect()
    }

    /// Iterates a snapshot of the records, so the list may be mutated meanwhile.
    pub fn iter(&self) -> std::vec::IntoIter<Rc<T>> {
        self.to_vec().into_iter()
    }

    pub fn contains(&self, record: &Rc<T>) -> bool {
        self.index_of(record).is_some()
    }

    pub fn index_of(&self, record: &Rc<T>) -> Option<usize> {
        self.shared.state.borrow().position(record)
    }

    pub fn get_by_uid(&self, uid: &str) -> Option<Rc<T>> {
        self.shared.roles.uid_field()?;
        self.shared.state.borrow().uid_index.get(uid).cloned()
    }

    pub fn index_of_uid(&self, uid: &str) -> Option<usize> {
        self.get_by_uid(uid).and_then(|r| self.index_of(&r))
    }

    pub fn role_for_name(&self, name: &str) -> Option<Role> {
        self.shared.roles.role_for_name(name)
    }

    pub fn role_names(&self) -> BTreeMap<Role, &'static str> {
        self.shared.roles.names().clone()
    }

    /// Reads one field of one row. [`Role::OBJECT`] yields the record itself.
    pub fn data(&self, index: usize, role: Role) -> FieldValue {
        let Some(record) = self.at(index) else {
            return FieldValue::Null;
        };
        if role == Role::OBJECT {
            let object: Rc<dyn Any> = record;
            return FieldValue::Object(object);
        }
        match self.shared.roles.field_index(role) {
            Some(field) => self.shared.fields[field].read(&record),
            None => FieldValue::Null,
        }
    }

    pub fn data_by_name(&self, index: usize, name: &str) -> FieldValue {
        self.role_for_name(name)
            .map_or(FieldValue::Null, |role| self.data(index, role))
    }

    /// Writes one field of one row through its setter.
    ///
    /// Returns `false` for the object role, unknown roles, non-writable fields, rows out of
    /// range, values of the wrong shape, and values equal to the current one. A successful
    /// write is reported through the regular `DataChanged` path.
    pub fn set_data(&self, index: usize, role: Role, value: FieldValue) -> bool {
        if role == Role::OBJECT {
            return false;
        }
        let (Some(record), Some(field)) = (self.at(index), self.shared.roles.field_index(role))
        else {
            return false;
        };
        self.shared.fields[field].write(&record, value)
    }

    // --- Writes ---

    pub fn append(&self, record: Rc<T>) {
        let end = self.count();
        self.insert_many(end, [record]);
    }

    pub fn prepend(&self, record: Rc<T>) {
        self.insert_many(0, [record]);
    }

    /// Inserts at `index`, clamped to `[0, count]`.
    pub fn insert(&self, index: usize, record: Rc<T>) {
        self.insert_many(index, [record]);
    }

    pub fn append_many(&self, records: impl IntoIterator<Item = Rc<T>>) {
        let end = self.count();
        self.insert_many(end, records);
    }

    pub fn prepend_many(&self, records: impl IntoIterator<Item = Rc<T>>) {
        self.insert_many(0, records);
    }

    /// Inserts a batch at `index` (clamped), reported as one contiguous `RowsInserted`.
    pub fn insert_many(&self, index: usize, records: impl IntoIterator<Item = Rc<T>>) {
        let entries: Vec<Entry<T>> = records
            .into_iter()
            .map(|r| self.shared.reference(r))
            .collect();
        if entries.is_empty() {
            return;
        }

        let (range, count) = {
            let mut state = self.shared.state.borrow_mut();
            let at = index.min(state.entries.len());
            let len = entries.len();
            for entry in &entries {
                state.index_uid(entry);
            }
            state.entries.splice(at..at, entries);
            (at..at + len, state.update_count())
        };

        debug!(record = T::TYPE_NAME, list = %self.shared.id, ?range, "Rows inserted");
        self.shared.events.emit(&ModelEvent::RowsInserted(range));
        if let Some(count) = count {
            self.shared.events.emit(&ModelEvent::CountChanged(count));
        }
    }

    pub fn remove(&self, record: &Rc<T>) {
        if let Some(index) = self.index_of(record) {
            self.remove_at(index);
        }
    }

    pub fn remove_at(&self, index: usize) {
        let (entry, count) = {
            let mut state = self.shared.state.borrow_mut();
            if index >= state.entries.len() {
                return;
            }
            let entry = state.entries.remove(index);
            state.unindex_uid(&entry.record, entry.uid_key.as_ref());
            (entry, state.update_count())
        };

        debug!(record = T::TYPE_NAME, list = %self.shared.id, row = index, "Row removed");
        self.shared
            .events
            .emit(&ModelEvent::RowsRemoved(index..index + 1));
        self.shared.dereference(entry);
        if let Some(count) = count {
            self.shared.events.emit(&ModelEvent::CountChanged(count));
        }
    }

    /// Moves the row at `from` to `to`. Reported as a removal followed by an insertion.
    pub fn move_row(&self, from: usize, to: usize) {
        if from == to {
            return;
        }
        {
            let mut state = self.shared.state.borrow_mut();
            let len = state.entries.len();
            if from >= len || to >= len {
                return;
            }
            let entry = state.entries.remove(from);
            state.entries.insert(to, entry);
        }

        debug!(record = T::TYPE_NAME, list = %self.shared.id, from, to, "Row moved");
        self.shared
            .events
            .emit(&ModelEvent::RowsRemoved(from..from + 1));
        self.shared.events.emit(&ModelEvent::RowsInserted(to..to + 1));
    }

    /// Removes every row, destroying the records this list owns.
    pub fn clear(&self) {
        let (entries, count) = {
            let mut state = self.shared.state.borrow_mut();
            if state.entries.is_empty() {
                return;
            }
            let entries = std::mem::take(&mut state.entries);
            state.uid_index.clear();
            (entries, state.update_count())
        };

        let removed = 0..entries.len();
        debug!(record = T::TYPE_NAME, list = %self.shared.id, ?removed, "Cleared");
        self.shared.events.emit(&ModelEvent::RowsRemoved(removed));
        for entry in entries {
            self.shared.dereference(entry);
        }
        if let Some(count) = count {
            self.shared.events.emit(&ModelEvent::CountChanged(count));
        }
    }
}

impl<T: Record> IntoIterator for &ObjectListModel<T> {
    type Item = Rc<T>;
    type IntoIter = std::vec::IntoIter<Rc<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
