use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use object_list_model::framework::{
    EventRecorder, FieldDescriptor, FieldValue, ListOptions, ModelEvent, ObjectListModel,
    Ownership, Property, Record, RecordCore, Role, RoleConfigError,
};
use object_list_model::model::{Item, Page};
use object_list_model::{constant_property, field_table, read_only_property, writable_property};

/// A record declared outside the crate, exercising every field kind.
#[derive(Debug)]
struct Contact {
    core: RecordCore,
    name: Property<String>,
    index: Property<i64>,
    visits: Property<i64>,
    source: Property<String>,
    destroyed: Rc<RefCell<Vec<String>>>,
}

impl Contact {
    fn new(name: &str, destroyed: &Rc<RefCell<Vec<String>>>) -> Rc<Self> {
        Rc::new(Self {
            core: RecordCore::new(),
            name: Property::new(name.to_owned()),
            index: Property::new(0),
            visits: Property::new(0),
            source: Property::new("import".to_owned()),
            destroyed: Rc::clone(destroyed),
        })
    }

    writable_property!(name: String);
    writable_property!(index: i64);
    read_only_property!(visits: i64);
    constant_property!(source: String);
}

impl Record for Contact {
    const TYPE_NAME: &'static str = "Contact";

    fn fields() -> Vec<FieldDescriptor<Self>> {
        field_table!(Contact {
            writable name: String,
            writable index: i64,
            read_only visits: i64,
            constant source: String,
        })
    }

    fn core(&self) -> &RecordCore {
        &self.core
    }

    fn on_destroy(&self) {
        self.destroyed.borrow_mut().push(self.get_name());
    }
}

fn contacts() -> ObjectListModel<Contact> {
    ObjectListModel::new(ListOptions::new().display("name").uid("name"))
}

fn names(list: &ObjectListModel<Contact>) -> Vec<String> {
    list.iter().map(|c| c.get_name()).collect()
}

#[test]
fn reserved_field_is_skipped_and_leaves_a_gap() {
    let list = contacts();
    let roles = list.role_names();

    assert_eq!(list.role_for_name("name"), Some(Role(2)));
    assert_eq!(list.role_for_name("index"), None);
    assert_eq!(list.role_for_name("visits"), Some(Role(4)));
    assert_eq!(list.role_for_name("source"), Some(Role(5)));
    assert!(!roles.values().any(|name| *name == "index"));
    assert_eq!(
        list.config_errors(),
        &[RoleConfigError::Reserved {
            record: "Contact",
            name: "index",
        }]
    );
}

#[test]
fn only_writable_fields_accept_set_data() {
    let log = Rc::default();
    let list = contacts();
    list.append(Contact::new("ann", &log));
    let visits = list.role_for_name("visits").unwrap();
    let source = list.role_for_name("source").unwrap();

    assert!(!list.set_data(0, visits, FieldValue::from(3)));
    assert!(!list.set_data(0, source, FieldValue::from("manual")));
    assert!(list.set_data(0, Role::DISPLAY, FieldValue::from("anna")));
    assert_eq!(list.data(0, Role::DISPLAY), FieldValue::from("anna"));
}

#[test]
fn read_only_change_is_still_reported() {
    let log = Rc::default();
    let list = contacts();
    let ann = Contact::new("ann", &log);
    list.append(Rc::clone(&ann));
    let recorder = EventRecorder::attach(&list);

    assert!(ann.update_visits(1));
    let visits = list.role_for_name("visits").unwrap();
    assert_eq!(
        recorder.take(),
        vec![ModelEvent::DataChanged { row: 0, roles: vec![visits] }]
    );
    assert_eq!(list.data(0, visits), FieldValue::from(1));
}

#[test]
fn inserts_clamp_and_report_one_batch() {
    let log = Rc::default();
    let list = contacts();
    list.append(Contact::new("b", &log));
    let recorder = EventRecorder::attach(&list);

    list.insert_many(
        99,
        [Contact::new("c", &log), Contact::new("d", &log)],
    );
    list.prepend(Contact::new("a", &log));
    list.insert_many(1, Vec::new());

    assert_eq!(names(&list), ["a", "b", "c", "d"]);
    assert_eq!(
        recorder.take(),
        vec![
            ModelEvent::RowsInserted(1..3),
            ModelEvent::CountChanged(3),
            ModelEvent::RowsInserted(0..1),
            ModelEvent::CountChanged(4),
        ]
    );
}

#[test]
fn owned_records_are_destroyed_and_foreign_ones_survive() {
    let log: Rc<RefCell<Vec<String>>> = Rc::default();
    let first = contacts();
    let second = contacts();
    let shared = Contact::new("shared", &log);
    let pinned = Contact::new("pinned", &log);
    pinned.core().set_external_owner();

    first.append(Rc::clone(&shared));
    second.append(Rc::clone(&shared));
    second.append(Rc::clone(&pinned));
    assert_eq!(shared.core().ownership(), Ownership::List(first.id()));

    second.clear();
    assert!(shared.core().is_alive());
    assert!(pinned.core().is_alive());
    assert!(log.borrow().is_empty());

    first.remove(&shared);
    assert!(!shared.core().is_alive());
    assert_eq!(*log.borrow(), ["shared"]);
}

#[test]
fn destroyed_record_stops_notifying() {
    let log = Rc::default();
    let list = contacts();
    let ann = Contact::new("ann", &log);
    list.append(Rc::clone(&ann));
    list.remove_at(0);

    let recorder = EventRecorder::attach(&list);
    assert!(ann.set_name("gone"));
    assert!(recorder.is_empty());
    assert_eq!(ann.core().connection_count("name"), 0);
}

#[test]
fn uid_index_follows_renames() {
    let log = Rc::default();
    let list = contacts();
    let ann = Contact::new("ann", &log);
    list.append(Rc::clone(&ann));
    list.append(Contact::new("bob", &log));

    ann.set_name("anna");

    assert!(list.get_by_uid("ann").is_none());
    assert!(Rc::ptr_eq(&list.get_by_uid("anna").unwrap(), &ann));
    assert_eq!(list.index_of_uid("bob"), Some(1));

    list.remove(&ann);
    assert!(list.get_by_uid("anna").is_none());
}

#[test]
fn observers_see_settled_state_and_may_mutate() {
    let log: Rc<RefCell<Vec<String>>> = Rc::default();
    let list = contacts();
    let seen: Rc<RefCell<Vec<(ModelEvent, usize)>>> = Rc::default();

    let handle = list.clone();
    let sink = Rc::clone(&seen);
    let spawn_log = Rc::clone(&log);
    let _observer = list.subscribe(move |event| {
        sink.borrow_mut().push((event.clone(), handle.count()));
        if let ModelEvent::DataChanged { row, .. } = event {
            if handle.data(*row, Role::DISPLAY) == FieldValue::from("trigger") {
                handle.append(Contact::new("spawned", &spawn_log));
            }
        }
    });

    let ann = Contact::new("ann", &log);
    list.append(Rc::clone(&ann));
    ann.set_name("trigger");

    assert_eq!(names(&list), ["trigger", "spawned"]);
    let seen = seen.borrow();
    assert_eq!(seen[0], (ModelEvent::RowsInserted(0..1), 1));
    assert_eq!(seen[1], (ModelEvent::CountChanged(1), 1));
    assert!(matches!(seen[2], (ModelEvent::DataChanged { row: 0, .. }, 1)));
    assert_eq!(seen[3], (ModelEvent::RowsInserted(1..2), 2));
}

#[test]
fn erased_view_ignores_bad_input() {
    let log = Rc::default();
    let list = contacts();
    list.append(Contact::new("ann", &log));
    let model = list.as_model();
    let recorder = EventRecorder::attach(&*model);

    let foreign: Rc<dyn Any> = Rc::new("not a contact");
    model.append_object(None);
    model.append_object(Some(Rc::clone(&foreign)));
    model.remove_row(-1);
    model.move_row(-1, 0);
    assert_eq!(model.data(-1, Role::DISPLAY), FieldValue::Null);
    assert_eq!(model.data(0, Role(42)), FieldValue::Null);
    assert!(!model.contains_object(Some(&foreign)));
    assert!(recorder.is_empty());

    let bob: Rc<dyn Any> = Contact::new("bob", &log);
    model.insert_object(-5, Some(Rc::clone(&bob)));
    assert_eq!(model.index_of_object(Some(&bob)), Some(0));
    assert_eq!(model.row_count(), 2);
}

#[test]
fn nested_lists_are_reachable_through_the_submodel_role() {
    let pages: ObjectListModel<Page> = ObjectListModel::new(Page::list_options());
    let page = Page::new(0, 1, "Page 1", "Remark text.");
    pages.append(Rc::clone(&page));
    page.add_item(Item::new(1, "SubName 0"));

    let submodel = pages.data_by_name(0, "submodel");
    let items = submodel.as_model().unwrap();
    let recorder = EventRecorder::attach(&**items);

    page.add_item(Item::new(2, "SubName 1"));
    assert_eq!(items.row_count(), 2);
    assert!(items.object_by_uid("SubName 1").is_some());
    assert_eq!(
        recorder.take(),
        vec![ModelEvent::RowsInserted(1..2), ModelEvent::CountChanged(2)]
    );
}

#[test]
fn dropping_the_last_handle_destroys_owned_records() {
    let log: Rc<RefCell<Vec<String>>> = Rc::default();
    let ann = Contact::new("ann", &log);
    {
        let list = contacts();
        list.append(Rc::clone(&ann));
    }
    assert!(!ann.core().is_alive());
    assert_eq!(*log.borrow(), ["ann"]);
}

#[test]
fn page_is_found_by_name_and_returned_by_the_object_role() {
    let pages: ObjectListModel<Page> = ObjectListModel::with_fields(None, Some("name"));
    let page = Page::new(0, 1, "Page 1", "");
    pages.append(Rc::clone(&page));

    assert_eq!(pages.count(), 1);
    assert!(Rc::ptr_eq(&pages.get_by_uid("Page 1").unwrap(), &page));
    let object = pages.data(0, Role::OBJECT).object_as::<Page>().unwrap();
    assert!(Rc::ptr_eq(&object, &page));
}

#[test]
fn out_of_range_reads_are_absent() {
    let log = Rc::default();
    let list = contacts();
    assert!(list.at(0).is_none());
    assert!(list.first().is_none());

    list.append(Contact::new("ann", &log));
    assert!(list.at(list.count()).is_none());
    assert!(list.as_model().object_at(-1).is_none());
    assert!(Rc::ptr_eq(&list.first().unwrap(), &list.last().unwrap()));
}
