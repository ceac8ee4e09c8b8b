use std::rc::Rc;

use tracing::{debug, info, instrument};

use crate::framework::ObjectListModel;
use crate::lifecycle::config::DemoConfig;
use crate::model::{Item, Page, PageSnapshot};

/// The demo's business logic: a fixed sequence of list calls per UI button.
///
/// `PageController` owns the top-level page list and the page counter. The counter seeds
/// `main_id` and `no` of every new page and goes back to zero when all pages are cleared.
///
/// # Example
///
/// ```rust
/// use object_list_model::lifecycle::{DemoConfig, PageController};
///
/// let mut controller = PageController::new(DemoConfig::default());
/// let page = controller.add_page();
/// assert_eq!(page.get_name(), "Page 1");
///
/// controller.add_list_item(page.get_main_id());
/// assert_eq!(page.items().count(), 1);
///
/// controller.clear_all_pages();
/// assert_eq!(controller.counter(), 0);
/// ```
#[derive(Debug)]
pub struct PageController {
    pages: ObjectListModel<Page>,
    counter: i64,
    config: DemoConfig,
}

impl PageController {
    pub fn new(config: DemoConfig) -> Self {
        Self {
            pages: ObjectListModel::new(Page::list_options()),
            counter: 0,
            config,
        }
    }

    pub fn pages(&self) -> &ObjectListModel<Page> {
        &self.pages
    }

    pub fn counter(&self) -> i64 {
        self.counter
    }

    pub fn config(&self) -> &DemoConfig {
        &self.config
    }

    /// Creates the next page from the counter and appends it.
    #[instrument(skip(self), fields(counter = self.counter))]
    pub fn add_page(&mut self) -> Rc<Page> {
        let page = Page::new(
            self.counter,
            self.counter + 1,
            format!("{} {}", self.config.page_prefix, self.counter + 1),
            self.config.remark.clone(),
        );
        self.pages.append(Rc::clone(&page));
        self.counter += 1;
        info!(main_id = page.get_main_id(), size = self.pages.count(), "Page added");
        page
    }

    /// Removes every page (and with them, every item) and resets the counter.
    #[instrument(skip(self))]
    pub fn clear_all_pages(&mut self) {
        self.pages.clear();
        self.counter = 0;
        info!("All pages cleared");
    }

    /// Clears the items of every page with `main_id`. Returns the number of pages touched.
    #[instrument(skip(self))]
    pub fn clear_list_items(&self, main_id: i64) -> usize {
        let mut touched = 0;
        for page in self.pages_with_id(main_id) {
            page.items().clear();
            touched += 1;
        }
        info!(touched, "Items cleared");
        touched
    }

    /// Appends one item to every page with `main_id`. Returns the number of pages touched.
    #[instrument(skip(self))]
    pub fn add_list_item(&self, main_id: i64) -> usize {
        let mut touched = 0;
        for page in self.pages_with_id(main_id) {
            let count = page.items().count();
            let subid = i64::try_from(count).map_or(i64::MAX, |c| c + 1);
            page.add_item(Item::new(
                subid,
                format!("{} {}", self.config.item_prefix, count),
            ));
            debug!(subid, "Item added");
            touched += 1;
        }
        info!(touched, "Items added");
        touched
    }

    /// Renames the second item in place on every page with `main_id` that holds at least
    /// three items. Returns the number of items renamed.
    #[instrument(skip(self))]
    pub fn update_list_item(&self, main_id: i64) -> usize {
        let mut updated = 0;
        for page in self.pages_with_id(main_id) {
            if page.items().count() < 3 {
                continue;
            }
            if let Some(item) = page.items().at(1) {
                if item.set_subname(self.config.update_text.clone()) {
                    updated += 1;
                }
            }
        }
        info!(updated, "Items updated");
        updated
    }

    pub fn snapshot(&self) -> Vec<PageSnapshot> {
        self.pages.iter().map(|page| page.snapshot()).collect()
    }

    fn pages_with_id(&self, main_id: i64) -> impl Iterator<Item = Rc<Page>> {
        self.pages
            .iter()
            .filter(move |page| page.get_main_id() == main_id)
    }
}
