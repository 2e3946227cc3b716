//! Generic CRUD over a [`Resource`].
//!
//! A resource declares its table, labels, deletion policy, list filters and
//! writable columns; this module supplies the service, the handlers and the
//! routes:
//!
//! | Route | Handler | Outcome |
//! |---|---|---|
//! | `GET {list}` | [`controller::list`] | `{plural: [...], pluralCount: n}` |
//! | `GET {item}/{id}` | [`controller::get_one`] | the row, or "<Label> Does Not Exist." |
//! | `POST {item}` | [`controller::save`] | `{id}`, "<Label> Saved." |
//! | `DELETE {item}/{id}` | [`controller::delete`] | the removed row |
//!
//! ```ignore
//! let router = CrudRoutes::<Courses>::new("/courses", "/course").into_router();
//! ```

pub mod controller;
pub mod params;
pub mod resource;
pub mod router;
pub mod service;

pub use params::{ListParams, Listing, SavedId};
pub use resource::{Access, DeletionPolicy, NoInput, Resource};
pub use router::{CrudRoutes, Ops};
pub use service::CrudService;
