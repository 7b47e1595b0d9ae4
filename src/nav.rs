use uuid::Uuid;

use crate::models::Trek;

/// The pages the app can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Admin,
    Categories,
    Category,
    TrekDetails,
    Enquiries,
}

impl Default for Page {
    fn default() -> Self {
        Page::Home
    }
}

/// What actually gets rendered after gating and context checks.
#[derive(Debug, PartialEq)]
pub enum View<'a> {
    Home,
    Admin,
    Categories,
    Enquiries,
    Category { category_id: Uuid },
    TrekDetails { trek: &'a Trek },
}

/// Current page plus the selection context some pages need.
///
/// Selections are remembered across detail views so backing out of a
/// trek returns to the category it was opened from. Nothing here is
/// persisted; every start is a fresh `Home`.
#[derive(Debug, Default)]
pub struct Navigator {
    page: Page,
    selected_trek: Option<Trek>,
    selected_category: Option<Uuid>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn selected_trek(&self) -> Option<&Trek> {
        self.selected_trek.as_ref()
    }

    pub fn selected_category(&self) -> Option<Uuid> {
        self.selected_category
    }

    /// Flip between the storefront and the admin dashboard. Only those
    /// two pages carry the toggle, so anywhere else it is a no-op.
    pub fn toggle_admin(&mut self) {
        self.page = match self.page {
            Page::Home => Page::Admin,
            Page::Admin => Page::Home,
            other => other,
        };
    }

    pub fn open_category(&mut self, category_id: Uuid) {
        self.selected_category = Some(category_id);
        self.page = Page::Category;
    }

    pub fn view_trek(&mut self, trek: Trek) {
        self.selected_trek = Some(trek);
        self.page = Page::TrekDetails;
    }

    pub fn open_categories(&mut self) {
        self.page = Page::Categories;
    }

    pub fn open_enquiries(&mut self) {
        self.page = Page::Enquiries;
    }

    /// Jump straight home. Selections are left alone; only `back`
    /// clears them.
    pub fn go_home(&mut self) {
        self.page = Page::Home;
    }

    /// Set the page directly, without supplying context.
    pub fn go_to(&mut self, page: Page) {
        self.page = page;
    }

    /// One step up the page hierarchy.
    pub fn back(&mut self) {
        self.page = match self.page {
            Page::TrekDetails => {
                self.selected_trek = None;
                if self.selected_category.is_some() {
                    Page::Category
                } else {
                    Page::Home
                }
            }
            Page::Category => {
                self.selected_category = None;
                Page::Home
            }
            Page::Categories | Page::Enquiries => Page::Admin,
            Page::Home | Page::Admin => self.page,
        };
    }

    /// Resolve the current page to a renderable view.
    ///
    /// Admin-only pages silently render as `Home` for non-admins, and a
    /// context page whose selection is missing falls back to `Home` too.
    /// The stored page is not rewritten by either fallback.
    pub fn resolve(&self, is_admin: bool) -> View<'_> {
        match self.page {
            Page::Admin if is_admin => View::Admin,
            Page::Categories if is_admin => View::Categories,
            Page::Enquiries if is_admin => View::Enquiries,
            Page::Category => match self.selected_category {
                Some(category_id) => View::Category { category_id },
                None => View::Home,
            },
            Page::TrekDetails => match &self.selected_trek {
                Some(trek) => View::TrekDetails { trek },
                None => View::Home,
            },
            _ => View::Home,
        }
    }
}
