//! List endpoints used by the console and hub screens.
//!
//! Each entry pairs a backend path with the page shape it returns. Bare
//! array endpoints resume from a field of the last item, matching the
//! backend's `pagination_key` for that collection.

use crate::pagination::PageShape;
use crate::session::portal::{EMPLOYER_PREFIX, HUB_PREFIX};

use models::employer::{CostCenter, Location, OrgUser};
use models::hub::{Achievement, HubApplication, HubUserShort, MyCandidacy, Post};

use const_format::concatcp;

pub const COST_CENTERS: &str = concatcp!(EMPLOYER_PREFIX, "get-cost-centers");
pub const LOCATIONS: &str = concatcp!(EMPLOYER_PREFIX, "get-locations");
pub const ORG_USERS: &str = concatcp!(EMPLOYER_PREFIX, "filter-org-users");
pub const MY_APPLICATIONS: &str = concatcp!(HUB_PREFIX, "my-applications");
pub const MY_CANDIDACIES: &str = concatcp!(HUB_PREFIX, "get-my-candidacies");
pub const HOME_TIMELINE: &str = concatcp!(HUB_PREFIX, "get-my-home-timeline");
pub const ACHIEVEMENTS: &str = concatcp!(HUB_PREFIX, "list-achievements");
pub const COLLEAGUE_APPROVALS: &str = concatcp!(HUB_PREFIX, "my-colleague-approvals");

const PAGINATION_KEY_FIELD: &str = "pagination_key";

/// A paginated list endpoint and how to decode its pages.
pub struct ListEndpoint<T> {
    path: &'static str,
    shape: PageShape<T>,
}

impl<T> Clone for ListEndpoint<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ListEndpoint<T> {}

impl<T> std::fmt::Debug for ListEndpoint<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListEndpoint")
            .field("path", &self.path)
            .field("shape", &self.shape)
            .finish()
    }
}

impl<T> ListEndpoint<T> {
    pub const fn new(path: &'static str, shape: PageShape<T>) -> Self {
        Self { path, shape }
    }

    /// Object response with the items under `items_field` and a `pagination_key`.
    pub const fn envelope(path: &'static str, items_field: &'static str) -> Self {
        Self::new(
            path,
            PageShape::Envelope {
                items_field,
                key_field: PAGINATION_KEY_FIELD,
            },
        )
    }

    /// Bare array response keyed by a field of the last item.
    pub const fn keyed_array(path: &'static str, key_of: fn(&T) -> String) -> Self {
        Self::new(path, PageShape::KeyedArray { key_of })
    }

    pub fn path(&self) -> &'static str {
        self.path
    }

    pub fn shape(&self) -> &PageShape<T> {
        &self.shape
    }
}

// ============================================
// EMPLOYER CONSOLE
// ============================================

pub fn cost_centers() -> ListEndpoint<CostCenter> {
    ListEndpoint::keyed_array(COST_CENTERS, |cost_center: &CostCenter| {
        cost_center.name.clone()
    })
}

pub fn locations() -> ListEndpoint<Location> {
    ListEndpoint::keyed_array(LOCATIONS, |location: &Location| location.title.clone())
}

pub fn org_users() -> ListEndpoint<OrgUser> {
    ListEndpoint::keyed_array(ORG_USERS, |user: &OrgUser| user.email.clone())
}

// ============================================
// HUB
// ============================================

pub fn my_applications() -> ListEndpoint<HubApplication> {
    ListEndpoint::keyed_array(MY_APPLICATIONS, |application: &HubApplication| {
        application.application_id.clone()
    })
}

pub fn my_candidacies() -> ListEndpoint<MyCandidacy> {
    ListEndpoint::keyed_array(MY_CANDIDACIES, |candidacy: &MyCandidacy| {
        candidacy.candidacy_id.clone()
    })
}

pub fn home_timeline() -> ListEndpoint<Post> {
    ListEndpoint::envelope(HOME_TIMELINE, "posts")
}

pub fn achievements() -> ListEndpoint<Achievement> {
    ListEndpoint::keyed_array(ACHIEVEMENTS, |achievement: &Achievement| {
        achievement.id.clone()
    })
}

pub fn colleague_approvals() -> ListEndpoint<HubUserShort> {
    ListEndpoint::envelope(COLLEAGUE_APPROVALS, "approvals")
}
