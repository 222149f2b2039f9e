//! Given steps for session validation BDD scenarios.

use super::world::{SessionWorld, message, minutes_ago};
use rstest_bdd_macros::given;
use serde_json::json;

#[given(r#"a session where tool call "{id}" to "{name}" is answered"#)]
fn answered_tool_call(world: &mut SessionWorld, id: String, name: String) {
    world.messages = vec![
        message(
            "m-1",
            "assistant",
            &minutes_ago(10),
            json!([{ "type": "tool_use", "id": id, "name": name, "input": {} }]),
        ),
        message(
            "m-2",
            "user",
            &minutes_ago(9),
            json!([{ "type": "tool_result", "tool_use_id": id, "content": "done" }]),
        ),
    ];
}

#[given(r#"a session where an assistant message answers tool call "{id}" to "{name}""#)]
fn tool_result_in_assistant_message(world: &mut SessionWorld, id: String, name: String) {
    world.messages = vec![
        message(
            "m-1",
            "assistant",
            &minutes_ago(10),
            json!([{ "type": "tool_use", "id": id, "name": name, "input": {} }]),
        ),
        message(
            "m-2",
            "assistant",
            &minutes_ago(9),
            json!([{ "type": "tool_result", "tool_use_id": id, "content": "done" }]),
        ),
    ];
}

#[given(r#"a session with a tool result for unknown tool call "{id}""#)]
fn orphan_tool_result(world: &mut SessionWorld, id: String) {
    world.messages = vec![message(
        "m-1",
        "user",
        &minutes_ago(5),
        json!([{ "type": "tool_result", "tool_use_id": id, "content": "done" }]),
    )];
}

#[given(r#"a session where {count:usize} messages share the uuid "{uuid}""#)]
fn shared_uuid(world: &mut SessionWorld, count: usize, uuid: String) {
    world.messages = (0..count)
        .map(|_| message(&uuid, "user", &minutes_ago(5), json!("hello")))
        .collect();
}

#[given("a session whose second message is stamped before the first")]
fn out_of_order(world: &mut SessionWorld) {
    world.messages = vec![
        message("m-1", "user", &minutes_ago(5), json!("first")),
        message("m-2", "assistant", &minutes_ago(6), json!("second")),
    ];
}

#[given("a session with one message stamped {years:i64} years ago")]
fn decade_old(world: &mut SessionWorld, years: i64) {
    let minutes = years * 365 * 24 * 60;
    world.messages = vec![message("m-1", "user", &minutes_ago(minutes), json!("old"))];
}

#[given("an empty session")]
fn empty_session(world: &mut SessionWorld) {
    world.messages.clear();
}
