//! Maps method + path to a [`Route`].
//!
//! Ids in the path are the stable per-session ids of lists and todos. A
//! segment that is not a number never matches, so `/lists/abc` is a plain 404.

use tally_core::EntityId;

use crate::http::Method;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Root,
    Stylesheet,
    Lists,
    NewList,
    CreateList,
    ShowList { list: EntityId },
    EditList { list: EntityId },
    UpdateList { list: EntityId },
    DeleteList { list: EntityId },
    CreateTodo { list: EntityId },
    DeleteTodo { list: EntityId, todo: EntityId },
    ToggleTodo { list: EntityId, todo: EntityId },
    CompleteAll { list: EntityId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMatch {
    Found(Route),
    /// The path exists but not for this method; carries the `Allow` value.
    MethodNotAllowed(&'static str),
    NotFound,
}

/// Per-path handlers for reads (GET/HEAD) and writes (POST).
struct Resource {
    read: Option<Route>,
    write: Option<Route>,
}

impl Resource {
    const fn read(route: Route) -> Self {
        Self {
            read: Some(route),
            write: None,
        }
    }

    const fn write(route: Route) -> Self {
        Self {
            read: None,
            write: Some(route),
        }
    }

    const fn both(read: Route, write: Route) -> Self {
        Self {
            read: Some(read),
            write: Some(write),
        }
    }

    const fn allow(&self) -> &'static str {
        match (self.read.is_some(), self.write.is_some()) {
            (true, true) => "GET, HEAD, POST",
            (true, false) => "GET, HEAD",
            _ => "POST",
        }
    }

    fn select(self, method: &Method) -> RouteMatch {
        let chosen = if method.is_read() {
            self.read
        } else if *method == Method::Post {
            self.write
        } else {
            None
        };
        chosen.map_or_else(|| RouteMatch::MethodNotAllowed(self.allow()), RouteMatch::Found)
    }
}

fn id(segment: &str) -> Option<EntityId> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

fn resource(segments: &[&str]) -> Option<Resource> {
    let resource = match segments {
        [] => Resource::read(Route::Root),
        ["stylesheets", "application.css"] => Resource::read(Route::Stylesheet),
        ["lists"] => Resource::both(Route::Lists, Route::CreateList),
        ["lists", "new"] => Resource::read(Route::NewList),
        ["lists", list] => {
            let list = id(list)?;
            Resource::both(Route::ShowList { list }, Route::UpdateList { list })
        }
        ["lists", list, "edit"] => Resource::read(Route::EditList { list: id(list)? }),
        ["lists", list, "delete"] => Resource::write(Route::DeleteList { list: id(list)? }),
        ["lists", list, "todos"] => Resource::write(Route::CreateTodo { list: id(list)? }),
        ["lists", list, "complete_all"] => {
            Resource::write(Route::CompleteAll { list: id(list)? })
        }
        ["lists", list, "todos", todo] => Resource::write(Route::ToggleTodo {
            list: id(list)?,
            todo: id(todo)?,
        }),
        ["lists", list, "todos", todo, "delete"] => Resource::write(Route::DeleteTodo {
            list: id(list)?,
            todo: id(todo)?,
        }),
        _ => return None,
    };
    Some(resource)
}

/// Resolve a request line. A single trailing slash is tolerated.
#[must_use]
pub fn resolve(method: &Method, path: &str) -> RouteMatch {
    let trimmed = path.strip_suffix('/').unwrap_or(path);
    let Some(rest) = trimmed.strip_prefix('/').or(trimmed.is_empty().then_some("")) else {
        return RouteMatch::NotFound;
    };
    let segments: Vec<&str> = if rest.is_empty() {
        Vec::new()
    } else {
        rest.split('/').collect()
    };

    resource(&segments).map_or(RouteMatch::NotFound, |resource| resource.select(method))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("GET", "/", Route::Root)]
    #[case("GET", "/lists", Route::Lists)]
    #[case("GET", "/lists/", Route::Lists)]
    #[case("POST", "/lists", Route::CreateList)]
    #[case("GET", "/lists/new", Route::NewList)]
    #[case("GET", "/lists/3", Route::ShowList { list: 3 })]
    #[case("HEAD", "/lists/3", Route::ShowList { list: 3 })]
    #[case("POST", "/lists/3", Route::UpdateList { list: 3 })]
    #[case("GET", "/lists/3/edit", Route::EditList { list: 3 })]
    #[case("POST", "/lists/3/delete", Route::DeleteList { list: 3 })]
    #[case("POST", "/lists/3/todos", Route::CreateTodo { list: 3 })]
    #[case("POST", "/lists/3/todos/9", Route::ToggleTodo { list: 3, todo: 9 })]
    #[case("POST", "/lists/3/todos/9/delete", Route::DeleteTodo { list: 3, todo: 9 })]
    #[case("POST", "/lists/3/complete_all", Route::CompleteAll { list: 3 })]
    #[case("GET", "/stylesheets/application.css", Route::Stylesheet)]
    fn resolves_known_routes(#[case] method: &str, #[case] path: &str, #[case] route: Route) {
        assert_eq!(resolve(&Method::parse(method), path), RouteMatch::Found(route));
    }

    #[rstest]
    #[case("/lists/abc")]
    #[case("/lists/-1")]
    #[case("/lists/+1")]
    #[case("/lists/1/todos/x/delete")]
    #[case("/lists/99999999999999999999999")]
    #[case("/nope")]
    #[case("/lists/1/extra/segments/here/now")]
    #[case("lists")]
    fn unknown_paths_are_not_found(#[case] path: &str) {
        assert_eq!(resolve(&Method::Get, path), RouteMatch::NotFound);
        assert_eq!(resolve(&Method::Post, path), RouteMatch::NotFound);
    }

    #[test]
    fn wrong_method_reports_allow() {
        assert_eq!(
            resolve(&Method::Get, "/lists/1/delete"),
            RouteMatch::MethodNotAllowed("POST")
        );
        assert_eq!(
            resolve(&Method::Post, "/lists/new"),
            RouteMatch::MethodNotAllowed("GET, HEAD")
        );
        assert_eq!(
            resolve(&Method::parse("DELETE"), "/lists/1"),
            RouteMatch::MethodNotAllowed("GET, HEAD, POST")
        );
    }
}
