//! # Record Trait
//!
//! The `Record` trait is the contract a type must satisfy to be stored in an
//! [`ObjectListModel`](crate::framework::ObjectListModel). It replaces runtime introspection
//! with an explicit table of [`FieldDescriptor`]s, built once per list.
//!
//! # Anatomy of a record
//!
//! ```rust
//! use object_list_model::framework::{FieldDescriptor, Property, Record, RecordCore};
//! use object_list_model::{field_table, writable_property};
//! use std::rc::Rc;
//!
//! struct Tag {
//!     core: RecordCore,
//!     label: Property<String>,
//! }
//!
//! impl Tag {
//!     fn new(label: &str) -> Rc<Self> {
//!         Rc::new(Self { core: RecordCore::new(), label: Property::new(label.to_owned()) })
//!     }
//!
//!     writable_property!(label: String);
//! }
//!
//! impl Record for Tag {
//!     const TYPE_NAME: &'static str = "Tag";
//!
//!     fn fields() -> Vec<FieldDescriptor<Self>> {
//!         field_table!(Tag { writable label: String })
//!     }
//!
//!     fn core(&self) -> &RecordCore {
//!         &self.core
//!     }
//! }
//!
//! let tag = Tag::new("a");
//! assert!(tag.set_label("b"));
//! assert!(!tag.set_label("b")); // unchanged, no notification
//! ```
//!
//! # Ownership
//! Every record carries an [`Ownership`] tag in its [`RecordCore`]. A list claims an
//! `Unowned` record when it is inserted and destroys it when it is removed; anything
//! else is left alone.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::framework::signal::{Signal, Subscription};
use crate::framework::value::FieldValue;

/// Trait that any record type must implement to be held by an `ObjectListModel`.
pub trait Record: Sized + 'static {
    /// Short type name used in log fields and configuration errors.
    const TYPE_NAME: &'static str;

    /// The ordered field table for this type. Called once per list construction.
    fn fields() -> Vec<FieldDescriptor<Self>>;

    /// Shared bookkeeping: ownership tag, liveness and field change signals.
    fn core(&self) -> &RecordCore;

    /// Called when the owning list destroys this record, before it is marked dead.
    ///
    /// Records that own nested lists clear them here.
    fn on_destroy(&self) {}
}

/// Identity of a list, used as the ownership tag of the records it owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListId(u64);

impl ListId {
    pub(crate) fn next() -> Self {
        static NEXT_LIST_ID: AtomicU64 = AtomicU64::new(1);
        ListId(NEXT_LIST_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "list_{}", self.0)
    }
}

/// Who is responsible for destroying a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ownership {
    /// Nobody yet. The next list it is inserted into takes ownership.
    #[default]
    Unowned,
    /// Owned by code outside any list; lists never destroy it.
    External,
    /// Owned by the list with this id.
    List(ListId),
}

/// Bookkeeping embedded in every record.
pub struct RecordCore {
    ownership: Cell<Ownership>,
    alive: Cell<bool>,
    signals: RefCell<HashMap<&'static str, Signal<()>>>,
}

impl Default for RecordCore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RecordCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordCore")
            .field("ownership", &self.ownership.get())
            .field("alive", &self.alive.get())
            .finish_non_exhaustive()
    }
}

impl RecordCore {
    pub fn new() -> Self {
        Self {
            ownership: Cell::new(Ownership::Unowned),
            alive: Cell::new(true),
            signals: RefCell::new(HashMap::new()),
        }
    }

    pub fn ownership(&self) -> Ownership {
        self.ownership.get()
    }

    /// `false` once the owning list has destroyed this record.
    pub fn is_alive(&self) -> bool {
        self.alive.get()
    }

    /// Marks the record as owned outside any list, so no list will destroy it.
    pub fn set_external_owner(&self) {
        self.ownership.set(Ownership::External);
    }

    /// Connects `callback` to the change notification of `field`.
    #[must_use = "dropping the Subscription disconnects the callback immediately"]
    pub fn connect(&self, field: &'static str, callback: impl Fn() + 'static) -> Subscription {
        let signal = self.signals.borrow_mut().entry(field).or_default().clone();
        signal.subscribe(move |_| callback())
    }

    /// Announces that `field` changed. Called by generated setters.
    pub fn notify(&self, field: &'static str) {
        let signal = self.signals.borrow().get(field).cloned();
        if let Some(signal) = signal {
            signal.emit(&());
        }
    }

    /// Number of live connections on `field`.
    pub fn connection_count(&self, field: &str) -> usize {
        self.signals
            .borrow()
            .get(field)
            .map_or(0, Signal::subscriber_count)
    }

    /// Takes ownership for `list` if nobody owns the record yet.
    pub(crate) fn claim(&self, list: ListId) -> bool {
        if self.ownership.get() == Ownership::Unowned {
            self.ownership.set(Ownership::List(list));
            true
        } else {
            false
        }
    }

    pub(crate) fn is_owned_by(&self, list: ListId) -> bool {
        self.ownership.get() == Ownership::List(list)
    }

    fn mark_destroyed(&self) {
        self.alive.set(false);
        self.ownership.set(Ownership::Unowned);
        let signals: Vec<Signal<()>> = self.signals.borrow_mut().drain().map(|(_, s)| s).collect();
        for signal in signals {
            signal.disconnect_all();
        }
    }
}

/// Runs the destroy hook of `record` and marks it dead.
pub(crate) fn destroy_record<T: Record>(record: &T) {
    if record.core().is_alive() {
        record.on_destroy();
        record.core().mark_destroyed();
    }
}

/// Interior-mutable storage for one record field.
#[derive(Default)]
pub struct Property<V> {
    value: RefCell<V>,
}

impl<V: fmt::Debug> fmt::Debug for Property<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.value.borrow(), f)
    }
}

impl<V: Clone + PartialEq> Property<V> {
    pub fn new(value: V) -> Self {
        Self {
            value: RefCell::new(value),
        }
    }

    pub fn get(&self) -> V {
        self.value.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&V) -> R) -> R {
        f(&self.value.borrow())
    }

    /// Stores `value`; returns `true` if it differs from the previous one.
    pub fn replace(&self, value: V) -> bool {
        let mut current = self.value.borrow_mut();
        if *current == value {
            false
        } else {
            *current = value;
            true
        }
    }
}

/// How a field can be accessed from the role interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Readable and writable by role; notifies on change.
    Writable,
    /// Readable by role, written only from Rust; notifies on change.
    ReadOnly,
    /// Readable by role, never changes, no notification.
    Constant,
}

/// One entry in a record type's field table.
pub struct FieldDescriptor<T> {
    name: &'static str,
    kind: FieldKind,
    getter: fn(&T) -> FieldValue,
    setter: Option<fn(&T, FieldValue) -> bool>,
}

impl<T> Clone for FieldDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            kind: self.kind,
            getter: self.getter,
            setter: self.setter,
        }
    }
}

impl<T> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

impl<T> FieldDescriptor<T> {
    pub fn writable(
        name: &'static str,
        getter: fn(&T) -> FieldValue,
        setter: fn(&T, FieldValue) -> bool,
    ) -> Self {
        Self {
            name,
            kind: FieldKind::Writable,
            getter,
            setter: Some(setter),
        }
    }

    pub fn read_only(name: &'static str, getter: fn(&T) -> FieldValue) -> Self {
        Self {
            name,
            kind: FieldKind::ReadOnly,
            getter,
            setter: None,
        }
    }

    pub fn constant(name: &'static str, getter: fn(&T) -> FieldValue) -> Self {
        Self {
            name,
            kind: FieldKind::Constant,
            getter,
            setter: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn notifies(&self) -> bool {
        self.kind != FieldKind::Constant
    }

    pub fn read(&self, record: &T) -> FieldValue {
        (self.getter)(record)
    }

    /// Writes through the setter. `false` for fields without one, values of the wrong
    /// shape, or values equal to the current one.
    pub fn write(&self, record: &T, value: FieldValue) -> bool {
        self.setter.is_some_and(|set| set(record, value))
    }
}

/// Generates `get_<field>` and `set_<field>` for a [`Property`] field.
///
/// The setter returns `true` and notifies the record's change signal only when the value
/// actually changed. The signal is keyed by the field name, or by the role name given
/// after `as`:
///
/// ```rust,ignore
/// writable_property!(main_id as "mainID": i64);
/// ```
#[macro_export]
macro_rules! writable_property {
    (@impl $field:ident, $name:expr, $ty:ty) => {
        $crate::paste::paste! {
            pub fn [<get_ $field>](&self) -> $ty {
                self.$field.get()
            }

            pub fn [<set_ $field>](&self, value: impl Into<$ty>) -> bool {
                let changed = self.$field.replace(value.into());
                if changed {
                    $crate::framework::Record::core(self).notify($name);
                }
                changed
            }
        }
    };
    ($field:ident as $name:literal : $ty:ty) => {
        $crate::writable_property!(@impl $field, $name, $ty);
    };
    ($field:ident : $ty:ty) => {
        $crate::writable_property!(@impl $field, stringify!($field), $ty);
    };
}

/// Generates `get_<field>` and `update_<field>`. The field is exposed read-only by role.
#[macro_export]
macro_rules! read_only_property {
    (@impl $field:ident, $name:expr, $ty:ty) => {
        $crate::paste::paste! {
            pub fn [<get_ $field>](&self) -> $ty {
                self.$field.get()
            }

            pub fn [<update_ $field>](&self, value: impl Into<$ty>) -> bool {
                let changed = self.$field.replace(value.into());
                if changed {
                    $crate::framework::Record::core(self).notify($name);
                }
                changed
            }
        }
    };
    ($field:ident as $name:literal : $ty:ty) => {
        $crate::read_only_property!(@impl $field, $name, $ty);
    };
    ($field:ident : $ty:ty) => {
        $crate::read_only_property!(@impl $field, stringify!($field), $ty);
    };
}

/// Generates `get_<field>` only.
#[macro_export]
macro_rules! constant_property {
    ($field:ident : $ty:ty) => {
        $crate::paste::paste! {
            pub fn [<get_ $field>](&self) -> $ty {
                self.$field.get()
            }
        }
    };
}

/// Builds a `Vec<FieldDescriptor<_>>` from accessors generated by the property macros.
///
/// A field renamed with `as` in its property macro must carry the same name here.
///
/// ```rust,ignore
/// field_table!(Item { writable subid: i64, writable subname: String })
/// field_table!(Page { writable main_id as "mainID": i64, writable name: String })
/// ```
#[macro_export]
macro_rules! field_table {
    (@name $field:ident []) => {
        stringify!($field)
    };
    (@name $field:ident [$name:literal]) => {
        $name
    };
    (@entry $record:ty, writable, $field:ident, $name:tt, $ty:ty) => {
        $crate::paste::paste! {
            $crate::framework::FieldDescriptor::writable(
                $crate::field_table!(@name $field $name),
                |r: &$record| $crate::framework::FieldValue::from(r.[<get_ $field>]()),
                |r: &$record, v: $crate::framework::FieldValue| {
                    <$ty as $crate::framework::FromFieldValue>::from_field_value(v)
                        .is_some_and(|x| r.[<set_ $field>](x))
                },
            )
        }
    };
    (@entry $record:ty, read_only, $field:ident, $name:tt, $ty:ty) => {
        $crate::paste::paste! {
            $crate::framework::FieldDescriptor::read_only(
                $crate::field_table!(@name $field $name),
                |r: &$record| $crate::framework::FieldValue::from(r.[<get_ $field>]()),
            )
        }
    };
    (@entry $record:ty, constant, $field:ident, $name:tt, $ty:ty) => {
        $crate::paste::paste! {
            $crate::framework::FieldDescriptor::constant(
                $crate::field_table!(@name $field $name),
                |r: &$record| $crate::framework::FieldValue::from(r.[<get_ $field>]()),
            )
        }
    };
    ($record:ty { $( $kind:ident $field:ident $(as $name:literal)? : $ty:ty ),* $(,)? }) => {
        vec![ $( $crate::field_table!(@entry $record, $kind, $field, [$($name)?], $ty) ),* ]
    };
}
