use serde::{Deserialize, Serialize};
use std::rc::Rc;

use crate::framework::{
    FieldDescriptor, FieldValue, ListModel, ListOptions, ObjectListModel, Property, Record,
    RecordCore,
};
use crate::model::item::{Item, ItemSnapshot};
use crate::{field_table, writable_property};

/// A page shown in the top-level list, owning a sub-list of [`Item`]s.
///
/// # Record
/// See [`impl Record for Page`](#impl-Record-for-Page) for the field table:
/// - `mainID` (the `main_id` property), `no`, `name`, `remark`: writable, notifying
/// - `submodel`: constant, the item list as a [`ListModel`]
///
/// Destroying a page clears its item list, which destroys the items it owns.
#[derive(Debug)]
pub struct Page {
    core: RecordCore,
    main_id: Property<i64>,
    no: Property<i64>,
    name: Property<String>,
    remark: Property<String>,
    items: ObjectListModel<Item>,
}

/// Serializable copy of a [`Page`] and its items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub main_id: i64,
    pub no: i64,
    pub name: String,
    pub remark: String,
    pub items: Vec<ItemSnapshot>,
}

impl Page {
    /// Creates a new, unowned Page with an empty item list.
    ///
    /// # Arguments
    /// * `main_id` - Business key used by the controller to find the page
    /// * `no` - Ordinal number shown to the user
    /// * `name` - Display name, also the uid of the page in its list
    /// * `remark` - Free text
    pub fn new(
        main_id: i64,
        no: i64,
        name: impl Into<String>,
        remark: impl Into<String>,
    ) -> Rc<Self> {
        Rc::new(Self {
            core: RecordCore::new(),
            main_id: Property::new(main_id),
            no: Property::new(no),
            name: Property::new(name.into()),
            remark: Property::new(remark.into()),
            items: ObjectListModel::new(Item::list_options()),
        })
    }

    writable_property!(main_id as "mainID": i64);
    writable_property!(no: i64);
    writable_property!(name: String);
    writable_property!(remark: String);

    /// List options used for the top-level page list.
    pub fn list_options() -> ListOptions {
        ListOptions::new().display("name").uid("name")
    }

    pub fn items(&self) -> &ObjectListModel<Item> {
        &self.items
    }

    /// The item list, type-erased for the rendering layer.
    pub fn get_submodel(&self) -> Rc<dyn ListModel> {
        self.items.as_model()
    }

    pub fn add_item(&self, item: Rc<Item>) {
        self.items.append(item);
    }

    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            main_id: self.get_main_id(),
            no: self.get_no(),
            name: self.get_name(),
            remark: self.get_remark(),
            items: self.items.iter().map(|item| item.snapshot()).collect(),
        }
    }
}

impl Record for Page {
    const TYPE_NAME: &'static str = "Page";

    fn fields() -> Vec<FieldDescriptor<Self>> {
        let mut fields = field_table!(Page {
            writable main_id as "mainID": i64,
            writable no: i64,
            writable name: String,
            writable remark: String,
        });
        fields.push(FieldDescriptor::constant("submodel", |page: &Page| {
            FieldValue::Model(page.get_submodel())
        }));
        fields
    }

    fn core(&self) -> &RecordCore {
        &self.core
    }

    fn on_destroy(&self) {
        self.items.clear();
    }
}
