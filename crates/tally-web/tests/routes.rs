//! End-to-end behaviour of every route, driven through `App::handle`.

mod support;

use pretty_assertions::assert_eq;
use support::{Client, location};
use tally_web::Request;

// ---------------------------------------------------------------------------
// Index and navigation
// ---------------------------------------------------------------------------

#[test]
fn root_redirects_to_lists() {
    let mut client = Client::new();
    let response = client.get("/");

    assert_eq!(response.status, 303);
    assert_eq!(location(&response), "/lists");
    assert!(response.header("Set-Cookie").is_none());
    assert_eq!(client.sessions(), 0);
}

#[test]
fn first_page_starts_session() {
    let mut client = Client::new();
    let response = client.get("/lists");

    let cookie = response.header("Set-Cookie").expect("cookie set");
    assert!(cookie.starts_with("sid="));
    assert!(cookie.contains("HttpOnly"));
    assert_eq!(client.sessions(), 1);
}

#[test]
fn cookie_is_only_sent_once() {
    let mut client = Client::new();
    client.get("/lists");
    let second = client.get("/lists");
    assert!(second.header("Set-Cookie").is_none());
}

#[test]
fn empty_index() {
    let mut client = Client::new();
    let response = client.get("/lists");

    assert_eq!(response.status, 200);
    assert_eq!(
        response.header("Content-Type"),
        Some("text/html; charset=utf-8")
    );
    assert!(response.body_text().contains("You don't have any todo lists."));
}

#[test]
fn new_list_form() {
    let mut client = Client::new();
    let response = client.get("/lists/new");

    assert_eq!(response.status, 200);
    assert!(response.body_text().contains("name=\"list_name\""));
}

#[test]
fn stylesheet_is_served() {
    let mut client = Client::new();
    let response = client.get("/stylesheets/application.css");

    assert_eq!(response.status, 200);
    assert_eq!(response.header("Content-Type"), Some("text/css; charset=utf-8"));
    assert!(response.body_text().contains(".flash"));
    assert!(response.header("Set-Cookie").is_none());
    assert_eq!(client.sessions(), 0);
}

// ---------------------------------------------------------------------------
// Lists
// ---------------------------------------------------------------------------

#[test]
fn create_list_redirects_and_flashes_once() {
    let mut client = Client::new();
    let response = client.post("/lists", "list_name=++Groceries++");

    assert_eq!(response.status, 303);
    assert_eq!(location(&response), "/lists");

    let index = client.get("/lists").body_text().into_owned();
    assert!(index.contains("The list has been created."));
    assert!(index.contains("<h3>Groceries</h3>"));
    assert!(index.contains("0 / 0"));

    let again = client.get("/lists").body_text().into_owned();
    assert!(!again.contains("The list has been created."));
}

#[test]
fn invalid_list_name_rerenders_form() {
    let mut client = Client::new();
    let response = client.post("/lists", "list_name=+++");

    assert_eq!(response.status, 422);
    let body = response.body_text();
    assert!(body.contains("List name must be between 1 and 100 characters."));
    assert!(body.contains("name=\"list_name\""));
    assert!(client.state().lists.is_empty());
    assert!(client.state().error.is_none(), "error flash consumed by render");
}

#[test]
fn too_long_list_name_is_echoed_back() {
    let mut client = Client::new();
    let long = "x".repeat(101);
    let response = client.post("/lists", &format!("list_name={long}"));

    assert_eq!(response.status, 422);
    assert!(response.body_text().contains(&format!("value=\"{long}\"")));
}

#[test]
fn duplicate_list_name_is_rejected() {
    let mut client = Client::new();
    client.create_list("Groceries");
    let response = client.post("/lists", "list_name=Groceries");

    assert_eq!(response.status, 422);
    assert!(response.body_text().contains("List name must be unique."));
    assert_eq!(client.state().lists.len(), 1);
}

#[test]
fn show_list() {
    let mut client = Client::new();
    let id = client.create_list("Groceries");
    client.add_todo(id, "Milk");

    let response = client.get(&format!("/lists/{id}"));
    assert_eq!(response.status, 200);
    let body = response.body_text();
    assert!(body.contains("<h2>Groceries</h2>"));
    assert!(body.contains("<h3>Milk</h3>"));
    assert!(body.contains("1 / 1"));
}

#[test]
fn unknown_list_redirects_with_error() {
    let mut client = Client::new();
    let response = client.get("/lists/42");

    assert_eq!(response.status, 303);
    assert_eq!(location(&response), "/lists");
    let index = client.get("/lists").body_text().into_owned();
    assert!(index.contains("The specified list was not found."));
}

#[test]
fn edit_form_is_prefilled() {
    let mut client = Client::new();
    let id = client.create_list("Groceries");

    let response = client.get(&format!("/lists/{id}/edit"));
    assert_eq!(response.status, 200);
    assert!(response.body_text().contains("value=\"Groceries\""));
}

#[test]
fn rename_list() {
    let mut client = Client::new();
    let id = client.create_list("Groceries");

    let response = client.post(&format!("/lists/{id}"), "list_name=Food");
    assert_eq!(response.status, 303);
    assert_eq!(location(&response), format!("/lists/{id}"));

    let page = client.get(&format!("/lists/{id}")).body_text().into_owned();
    assert!(page.contains("The list has been updated."));
    assert!(page.contains("<h2>Food</h2>"));
}

#[test]
fn rename_to_taken_name_rerenders_edit_form() {
    let mut client = Client::new();
    let id = client.create_list("Groceries");
    client.create_list("Chores");

    let response = client.post(&format!("/lists/{id}"), "list_name=Chores");
    assert_eq!(response.status, 422);
    let body = response.body_text();
    assert!(body.contains("List name must be unique."));
    assert!(body.contains("value=\"Chores\""));
    assert_eq!(client.state().list(id).unwrap().name, "Groceries");
}

#[test]
fn rename_unknown_list_redirects() {
    let mut client = Client::new();
    let response = client.post("/lists/7", "list_name=Anything");

    assert_eq!(response.status, 303);
    assert_eq!(location(&response), "/lists");
    assert_eq!(
        client.state().error.as_deref(),
        Some("The specified list was not found.")
    );
}

#[test]
fn delete_list_keeps_other_addresses() {
    let mut client = Client::new();
    let first = client.create_list("A");
    let second = client.create_list("B");

    let response = client.post(&format!("/lists/{first}/delete"), "");
    assert_eq!(response.status, 303);
    assert_eq!(location(&response), "/lists");
    assert!(
        client
            .get("/lists")
            .body_text()
            .contains("The list &#x27;A&#x27; has been deleted.")
    );

    let page = client.get(&format!("/lists/{second}"));
    assert_eq!(page.status, 200);
    assert!(page.body_text().contains("<h2>B</h2>"));
}

#[test]
fn xhr_delete_list_answers_with_target() {
    let mut client = Client::new();
    let id = client.create_list("A");

    let response = client.xhr_post(&format!("/lists/{id}/delete"));
    assert_eq!(response.status, 200);
    assert_eq!(response.body_text(), "/lists");
    assert!(client.state().lists.is_empty());
    assert_eq!(
        client.state().success.as_deref(),
        Some("The list 'A' has been deleted.")
    );
}

#[test]
fn index_lists_complete_lists_last() {
    let mut client = Client::new();
    let done = client.create_list("Finished");
    let todo = client.add_todo(done, "x");
    client.post(&format!("/lists/{done}/todos/{todo}"), "completed=true");
    client.create_list("Pending");

    let body = client.get("/lists").body_text().into_owned();
    let pending = body.find("Pending").expect("pending listed");
    let finished = body.find("Finished").expect("finished listed");
    assert!(pending < finished);
    assert!(body.contains("class=\"complete\""));
}

// ---------------------------------------------------------------------------
// Todos
// ---------------------------------------------------------------------------

#[test]
fn add_todo() {
    let mut client = Client::new();
    let list = client.create_list("Groceries");

    let response = client.post(&format!("/lists/{list}/todos"), "todo=Milk");
    assert_eq!(response.status, 303);
    assert_eq!(location(&response), format!("/lists/{list}"));

    let state = client.state();
    let stored = state.list(list).unwrap();
    assert_eq!(stored.total_items(), 1);
    assert!(!stored.todos[0].completed);
    assert_eq!(state.success.as_deref(), Some("The todo has been added."));
}

#[test]
fn invalid_todo_rerenders_list_page() {
    let mut client = Client::new();
    let list = client.create_list("Groceries");

    let response = client.post(&format!("/lists/{list}/todos"), "todo=");
    assert_eq!(response.status, 422);
    let body = response.body_text();
    assert!(body.contains("Todo must be between 1 and 100 characters."));
    assert!(body.contains("<h2>Groceries</h2>"));
    assert_eq!(client.state().list(list).unwrap().total_items(), 0);
}

#[test]
fn add_todo_to_unknown_list_redirects() {
    let mut client = Client::new();
    let response = client.post("/lists/3/todos", "todo=Milk");

    assert_eq!(response.status, 303);
    assert_eq!(location(&response), "/lists");
}

#[test]
fn toggle_todo() {
    let mut client = Client::new();
    let list = client.create_list("Groceries");
    let todo = client.add_todo(list, "Milk");

    let response = client.post(&format!("/lists/{list}/todos/{todo}"), "completed=true");
    assert_eq!(response.status, 303);
    assert_eq!(location(&response), format!("/lists/{list}"));
    assert!(client.state().list(list).unwrap().todos[0].completed);

    client.post(&format!("/lists/{list}/todos/{todo}"), "completed=yes");
    assert!(!client.state().list(list).unwrap().todos[0].completed);
    assert_eq!(
        client.state().success.as_deref(),
        Some("The todo has been updated.")
    );
}

#[test]
fn toggle_unknown_todo_redirects_to_list() {
    let mut client = Client::new();
    let list = client.create_list("Groceries");

    let response = client.post(&format!("/lists/{list}/todos/99"), "completed=true");
    assert_eq!(response.status, 303);
    assert_eq!(location(&response), format!("/lists/{list}"));
    assert_eq!(
        client.state().error.as_deref(),
        Some("The specified todo was not found.")
    );
}

#[test]
fn delete_todo() {
    let mut client = Client::new();
    let list = client.create_list("Groceries");
    let milk = client.add_todo(list, "Milk");
    let eggs = client.add_todo(list, "Eggs");

    let response = client.post(&format!("/lists/{list}/todos/{milk}/delete"), "");
    assert_eq!(response.status, 303);

    let state = client.state();
    let todos = &state.list(list).unwrap().todos;
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].id, eggs);
    assert_eq!(state.success.as_deref(), Some("The todo has been deleted."));
}

#[test]
fn xhr_delete_todo_is_no_content() {
    let mut client = Client::new();
    let list = client.create_list("Groceries");
    let milk = client.add_todo(list, "Milk");

    let response = client.xhr_post(&format!("/lists/{list}/todos/{milk}/delete"));
    assert_eq!(response.status, 204);
    assert!(response.body.is_empty());
    assert_eq!(client.state().list(list).unwrap().total_items(), 0);
}

#[test]
fn complete_all() {
    let mut client = Client::new();
    let list = client.create_list("Groceries");
    client.add_todo(list, "Milk");
    client.add_todo(list, "Eggs");

    let response = client.post(&format!("/lists/{list}/complete_all"), "");
    assert_eq!(response.status, 303);
    assert_eq!(location(&response), format!("/lists/{list}"));

    let state = client.state();
    assert!(state.list(list).unwrap().is_complete());
    assert_eq!(state.success.as_deref(), Some("All todos have been completed."));
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn groceries_scenario() {
    let mut client = Client::new();
    let list = client.create_list("Groceries");
    let milk = client.add_todo(list, "Milk");
    let eggs = client.add_todo(list, "Eggs");

    client.post(&format!("/lists/{list}/todos/{milk}"), "completed=true");
    let state = client.state();
    let snapshot = state.list(list).unwrap();
    assert_eq!(snapshot.items_remaining(), 1);
    assert!(!snapshot.is_complete());

    client.post(&format!("/lists/{list}/todos/{eggs}"), "completed=true");
    assert!(client.state().list(list).unwrap().is_complete());

    let page = client.get(&format!("/lists/{list}")).body_text().into_owned();
    assert!(page.contains("<section id=\"todos\" class=\"complete\">"));
}

#[test]
fn sessions_are_isolated_between_clients() {
    let app = support::app(16 * 1024);
    let mut alice = Client::with_app(std::sync::Arc::clone(&app));
    let mut bob = Client::with_app(app);

    alice.create_list("Groceries");
    bob.get("/lists");

    assert_eq!(alice.state().lists.len(), 1);
    assert!(bob.state().lists.is_empty());
    assert_eq!(bob.post("/lists", "list_name=Groceries").status, 303);
}

// ---------------------------------------------------------------------------
// Protocol edges
// ---------------------------------------------------------------------------

#[test]
fn unknown_route_is_404_page() {
    let mut client = Client::new();
    let response = client.get("/lists/abc");

    assert_eq!(response.status, 404);
    assert!(response.body_text().contains("Page not found"));
    assert!(response.header("Set-Cookie").is_none());
    assert_eq!(client.sessions(), 0);
}

#[test]
fn unknown_route_leaves_pending_flash() {
    let mut client = Client::new();
    client.post("/lists", "list_name=Groceries");

    assert_eq!(client.get("/nope").status, 404);
    assert!(
        client
            .get("/lists")
            .body_text()
            .contains("The list has been created.")
    );
}

#[test]
fn wrong_method_is_405() {
    let mut client = Client::new();
    let response = client.get("/lists/1/delete");

    assert_eq!(response.status, 405);
    assert_eq!(response.header("Allow"), Some("POST"));
}

#[test]
fn oversized_body_is_413() {
    let mut client = Client::with_app(support::app(16));
    let response = client.post("/lists", &format!("list_name={}", "x".repeat(32)));

    assert_eq!(response.status, 413);
}

#[test]
fn head_has_no_body() {
    let mut client = Client::new();
    let response = client.send(Request::new(tally_web::Method::Head, "/lists"));

    assert_eq!(response.status, 200);
    assert!(response.body.is_empty());
}

#[test]
fn head_does_not_consume_flash() {
    let mut client = Client::new();
    client.post("/lists", "list_name=Groceries");

    let head = client.send(Request::new(tally_web::Method::Head, "/lists"));
    assert_eq!(head.status, 200);
    assert!(head.body.is_empty());
    assert_eq!(
        client.state().success.as_deref(),
        Some("The list has been created.")
    );

    let page = client.get("/lists").body_text().into_owned();
    assert!(page.contains("The list has been created."));
    assert!(client.state().success.is_none());
}

#[test]
fn stale_cookie_gets_a_new_session() {
    let mut client = Client::new();
    let stale = format!("sid={}", "0".repeat(64));
    let response = client.send(Request::get("/lists").with_header("Cookie", &stale));

    assert_eq!(response.status, 200);
    let cookie = response.header("Set-Cookie").expect("fresh cookie");
    assert!(!cookie.contains(&"0".repeat(64)));
}
