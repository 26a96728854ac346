//! Turns the polymorphic `result` payload of `/github-action` into a
//! display string. Total: every shape has a branch or falls through to a
//! pretty-printed dump, and nothing here can panic on caller input.

use serde_json::{Map, Value};

const NOT_FOUND: &str = "I couldn't find any information. Please try again.";

pub fn format_result(data: &Value) -> String {
    if data.is_null() {
        return NOT_FOUND.to_string();
    }
    if let Some(items) = data.as_array() {
        return format_items(items);
    }
    if let Some(object) = data.as_object() {
        if let Some(text) = format_object(object) {
            return text;
        }
    }
    serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string())
}

/// String values render bare; everything else falls back to its JSON form.
fn display(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn field(value: &Value, name: &str) -> String {
    value.get(name).map(display).unwrap_or_default()
}

fn format_items(items: &[Value]) -> String {
    if items.is_empty() {
        return "No items found.".to_string();
    }
    let plural = if items.len() > 1 { "s" } else { "" };
    let mut out = format!("I found {} item{plural}:\n", items.len());
    for (index, item) in items.iter().enumerate() {
        let position = index + 1;
        match (item.get("title").map(display), item.get("number")) {
            (Some(title), Some(number)) => {
                out.push_str(&format!("{position}. {title} (PR #{})\n", display(number)));
            }
            _ => out.push_str(&format!("{position}. {}\n", display(item))),
        }
    }
    out
}

// Recognized keys are probed in a fixed order; the first hit decides the
// rendering and later keys on the same object are ignored.
fn format_object(object: &Map<String, Value>) -> Option<String> {
    if let Some(snapshot) = object.get("snapshot") {
        return Some(format!(
            "Here's the snapshot of the pull request:\n{}",
            display(snapshot)
        ));
    }
    if let Some(url) = object.get("pr_url") {
        return Some(format!(
            "I've created a pull request for you! You can view it here: {}",
            display(url)
        ));
    }
    if let (Some(pr1_diff), Some(pr2_diff)) = (object.get("pr1_diff"), object.get("pr2_diff")) {
        return Some(format!(
            "Here's the comparison between the two pull requests:\n- PR1 Diff: {}\n- PR2 Diff: {}",
            display(pr1_diff),
            display(pr2_diff)
        ));
    }
    if let (Some(title), Some(body)) = (object.get("title"), object.get("body")) {
        return Some(format!(
            "Here are the details of the pull request:\n- Title: {}\n- Body: {}\n- State: {}\n- Created by: {}",
            display(title),
            display(body),
            object.get("state").map(display).unwrap_or_default(),
            object.get("user").map(display).unwrap_or_default(),
        ));
    }
    if let Some(review) = object.get("review") {
        return Some(format_review(review));
    }
    if let Some(bdd_tests) = object.get("bdd_tests") {
        return Some(format_bdd_tests(bdd_tests));
    }
    None
}

fn format_review(review: &Value) -> String {
    let issues = review
        .get("issues")
        .and_then(Value::as_array)
        .map(|issues| issues.as_slice())
        .unwrap_or(&[]);
    if issues.is_empty() {
        return "No issues found in the code review.".to_string();
    }
    let mut out = String::from("Here's the code review:\n");
    for (index, issue) in issues.iter().enumerate() {
        out.push_str(&format!(
            "{}. In file \"{}\" at line {}:\n   {}\n",
            index + 1,
            field(issue, "file"),
            field(issue, "line_number"),
            field(issue, "comment"),
        ));
    }
    out
}

// Two shapes arrive under `bdd_tests`: a direct `test_cases` list for a
// single PR, or a map from filename to either `test_cases` or a per-file
// `error`. Per-file errors are reported inline and rendering continues.
// Files render in payload order (serde_json's preserve_order feature).
fn format_bdd_tests(bdd_tests: &Value) -> String {
    let mut out = String::from("Here are the BDD test cases:\n");
    if let Some(cases) = bdd_tests.get("test_cases").and_then(Value::as_array) {
        out.push_str(&render_test_cases(cases));
        return out;
    }
    if let Some(per_file) = bdd_tests.as_object() {
        for (file, tests) in per_file {
            if let Some(error) = tests.get("error").and_then(Value::as_str) {
                out.push_str(&format!("Error in {file}: {error}\n"));
            } else if let Some(cases) = tests.get("test_cases").and_then(Value::as_array) {
                out.push_str(&format!("For file \"{file}\":\n"));
                out.push_str(&render_test_cases(cases));
            }
        }
    }
    out
}

fn render_test_cases(cases: &[Value]) -> String {
    cases
        .iter()
        .enumerate()
        .map(|(index, case)| format_test_case(case, index))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_test_case(case: &Value, index: usize) -> String {
    format!(
        "Test Case {}:\n  Feature: {}\n  Given: {}\n  When: {}\n  Then: {}\n  Scenario: {}\n",
        index + 1,
        field(case, "feature"),
        field(case, "given"),
        field(case, "when"),
        field(case, "then"),
        field(case, "scenario"),
    )
}
