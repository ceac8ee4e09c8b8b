//! # ListModel
//!
//! The type-erased view of an [`ObjectListModel`]. A rendering layer works with
//! `Rc<dyn ListModel>` and never learns the record type: it reads the row count, reads and
//! writes fields by [`Role`], subscribes to [`ModelEvent`]s, and forwards UI-triggered
//! mutations with plain row numbers and `Rc<dyn Any>` objects.
//!
//! Rows are `isize` here because they come straight from the UI; negative rows are simply
//! out of range. Objects are `Option`s because the UI may hand over nothing at all, or an
//! object of the wrong record type. Both cases are no-ops.

use std::any::Any;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::framework::list::{ModelEvent, ObjectListModel};
use crate::framework::record::Record;
use crate::framework::roles::Role;
use crate::framework::signal::Subscription;
use crate::framework::value::FieldValue;

/// Uniform, object-safe access to any `ObjectListModel<T>`.
pub trait ListModel {
    /// Type name of the records held by this list.
    fn record_type(&self) -> &'static str;

    fn row_count(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    fn role_names(&self) -> BTreeMap<Role, &'static str>;

    fn role_for_name(&self, name: &str) -> Option<Role>;

    fn data(&self, row: isize, role: Role) -> FieldValue;

    fn set_data(&self, row: isize, role: Role, value: FieldValue) -> bool;

    fn subscribe(&self, observer: Box<dyn Fn(&ModelEvent)>) -> Subscription;

    fn object_at(&self, row: isize) -> Option<Rc<dyn Any>>;

    fn first_object(&self) -> Option<Rc<dyn Any>> {
        self.object_at(0)
    }

    fn last_object(&self) -> Option<Rc<dyn Any>> {
        let last = isize::try_from(self.row_count()).ok()? - 1;
        self.object_at(last)
    }

    fn object_by_uid(&self, uid: &str) -> Option<Rc<dyn Any>>;

    fn contains_object(&self, object: Option<&Rc<dyn Any>>) -> bool {
        self.index_of_object(object).is_some()
    }

    fn index_of_object(&self, object: Option<&Rc<dyn Any>>) -> Option<usize>;

    fn append_object(&self, object: Option<Rc<dyn Any>>);

    fn prepend_object(&self, object: Option<Rc<dyn Any>>);

    fn insert_object(&self, row: isize, object: Option<Rc<dyn Any>>);

    fn remove_object(&self, object: Option<Rc<dyn Any>>);

    fn remove_row(&self, row: isize);

    fn move_row(&self, from: isize, to: isize);

    fn clear(&self);

    /// The object of every row, in order.
    fn snapshot(&self) -> Vec<FieldValue>;
}

fn row_index(row: isize) -> Option<usize> {
    usize::try_from(row).ok()
}

fn downcast<T: Record>(object: Option<Rc<dyn Any>>) -> Option<Rc<T>> {
    object?.downcast::<T>().ok()
}

impl<T: Record> ObjectListModel<T> {
    /// A type-erased handle to this list.
    pub fn as_model(&self) -> Rc<dyn ListModel> {
        Rc::new(self.clone())
    }
}

impl<T: Record> ListModel for ObjectListModel<T> {
    fn record_type(&self) -> &'static str {
        T::TYPE_NAME
    }

    fn row_count(&self) -> usize {
        self.count()
    }

    fn role_names(&self) -> BTreeMap<Role, &'static str> {
        ObjectListModel::role_names(self)
    }

    fn role_for_name(&self, name: &str) -> Option<Role> {
        ObjectListModel::role_for_name(self, name)
    }

    fn data(&self, row: isize, role: Role) -> FieldValue {
        row_index(row).map_or(FieldValue::Null, |row| ObjectListModel::data(self, row, role))
    }

    fn set_data(&self, row: isize, role: Role, value: FieldValue) -> bool {
        row_index(row).is_some_and(|row| ObjectListModel::set_data(self, row, role, value))
    }

    fn subscribe(&self, observer: Box<dyn Fn(&ModelEvent)>) -> Subscription {
        ObjectListModel::subscribe(self, move |event| observer(event))
    }

    fn object_at(&self, row: isize) -> Option<Rc<dyn Any>> {
        let record: Rc<dyn Any> = self.at(row_index(row)?)?;
        Some(record)
    }

    fn object_by_uid(&self, uid: &str) -> Option<Rc<dyn Any>> {
        let record: Rc<dyn Any> = self.get_by_uid(uid)?;
        Some(record)
    }

    fn index_of_object(&self, object: Option<&Rc<dyn Any>>) -> Option<usize> {
        let record = downcast::<T>(object.cloned())?;
        self.index_of(&record)
    }

    fn append_object(&self, object: Option<Rc<dyn Any>>) {
        if let Some(record) = downcast::<T>(object) {
            self.append(record);
        }
    }

    fn prepend_object(&self, object: Option<Rc<dyn Any>>) {
        if let Some(record) = downcast::<T>(object) {
            self.prepend(record);
        }
    }

    fn insert_object(&self, row: isize, object: Option<Rc<dyn Any>>) {
        if let Some(record) = downcast::<T>(object) {
            self.insert(row_index(row).unwrap_or(0), record);
        }
    }

    fn remove_object(&self, object: Option<Rc<dyn Any>>) {
        if let Some(record) = downcast::<T>(object) {
            self.remove(&record);
        }
    }

    fn remove_row(&self, row: isize) {
        if let Some(row) = row_index(row) {
            self.remove_at(row);
        }
    }

    fn move_row(&self, from: isize, to: isize) {
        if let (Some(from), Some(to)) = (row_index(from), row_index(to)) {
            ObjectListModel::move_row(self, from, to);
        }
    }

    fn clear(&self) {
        ObjectListModel::clear(self);
    }

    fn snapshot(&self) -> Vec<FieldValue> {
        self.iter()
            .map(|record| {
                let object: Rc<dyn Any> = record;
                FieldValue::Object(object)
            })
            .collect()
    }
}
