use std::marker::PhantomData;

use axum::Router;
use axum::routing::{self, MethodRouter};

use crate::crud::controller;
use crate::crud::resource::Resource;
use crate::state::AppState;

/// Which of the four CRUD operations a portal exposes for a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ops {
    pub list: bool,
    pub get: bool,
    pub save: bool,
    pub delete: bool,
}

impl Ops {
    pub const ALL: Ops = Ops {
        list: true,
        get: true,
        save: true,
        delete: true,
    };
    pub const READ: Ops = Ops {
        list: true,
        get: true,
        save: false,
        delete: false,
    };
    pub const READ_SAVE: Ops = Ops {
        list: true,
        get: true,
        save: true,
        delete: false,
    };
    pub const LIST: Ops = Ops {
        list: true,
        get: false,
        save: false,
        delete: false,
    };
}

/// Mounts a resource at `GET {list}`, `POST {item}`, `GET {item}/{id}` and
/// `DELETE {item}/{id}`. The two paths may be identical.
pub struct CrudRoutes<R> {
    list_path: &'static str,
    item_path: &'static str,
    ops: Ops,
    _resource: PhantomData<R>,
}

impl<R: Resource> CrudRoutes<R> {
    pub fn new(list_path: &'static str, item_path: &'static str) -> Self {
        Self {
            list_path,
            item_path,
            ops: Ops::ALL,
            _resource: PhantomData,
        }
    }

    pub fn ops(mut self, ops: Ops) -> Self {
        self.ops = ops;
        self
    }

    pub fn into_router(self) -> Router<AppState> {
        let mut collection: Option<MethodRouter<AppState>> = None;
        let mut item: Option<MethodRouter<AppState>> = None;
        let mut member: Option<MethodRouter<AppState>> = None;

        if self.ops.list {
            collection = Some(routing::get(controller::list::<R>));
        }
        if self.ops.save {
            let target = if self.list_path == self.item_path {
                &mut collection
            } else {
                &mut item
            };
            *target = Some(match target.take() {
                Some(methods) => methods.post(controller::save::<R>),
                None => routing::post(controller::save::<R>),
            });
        }
        if self.ops.get {
            member = Some(routing::get(controller::get_one::<R>));
        }
        if self.ops.delete {
            member = Some(match member {
                Some(methods) => methods.delete(controller::delete::<R>),
                None => routing::delete(controller::delete::<R>),
            });
        }

        let mut router = Router::new();
        if let Some(methods) = collection {
            router = router.route(self.list_path, methods);
        }
        if let Some(methods) = item {
            router = router.route(self.item_path, methods);
        }
        if let Some(methods) = member {
            router = router.route(&format!("{}/{{id}}", self.item_path), methods);
        }
        router
    }
}
