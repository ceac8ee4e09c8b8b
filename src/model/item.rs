use serde::{Deserialize, Serialize};
use std::rc::Rc;

use crate::framework::{FieldDescriptor, ListOptions, Property, Record, RecordCore};
use crate::{field_table, writable_property};

/// One entry of a page's sub-list.
///
/// # Record
/// `subname` is both the display field and the uid field of the owning
/// [`Page`](crate::model::Page)'s item list.
#[derive(Debug)]
pub struct Item {
    core: RecordCore,
    subid: Property<i64>,
    subname: Property<String>,
}

/// Serializable copy of an [`Item`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    pub subid: i64,
    pub subname: String,
}

impl Item {
    /// Creates a new, unowned Item.
    pub fn new(subid: i64, subname: impl Into<String>) -> Rc<Self> {
        Rc::new(Self {
            core: RecordCore::new(),
            subid: Property::new(subid),
            subname: Property::new(subname.into()),
        })
    }

    writable_property!(subid: i64);
    writable_property!(subname: String);

    /// List options used for a page's item list.
    pub fn list_options() -> ListOptions {
        ListOptions::new().display("subname").uid("subname")
    }

    pub fn snapshot(&self) -> ItemSnapshot {
        ItemSnapshot {
            subid: self.get_subid(),
            subname: self.get_subname(),
        }
    }
}

impl Record for Item {
    const TYPE_NAME: &'static str = "Item";

    fn fields() -> Vec<FieldDescriptor<Self>> {
        field_table!(Item {
            writable subid: i64,
            writable subname: String,
        })
    }

    fn core(&self) -> &RecordCore {
        &self.core
    }
}
