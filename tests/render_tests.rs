// ABOUTME: Integration tests for the render session and the built-in helpers
// ABOUTME: Hydrates pages end to end and checks the helper output landing in containers

use std::collections::HashMap;

use inlay::parser::{Manifest, Page};
use inlay::render::{RenderSession, SessionStatus};

mod common;
use common::TestPageBuilder;

fn hydrate(builder: &TestPageBuilder, manifest_yaml: &str) -> String {
    let mut page = Page::parse(&builder.generate_html()).unwrap();
    let manifest = Manifest::from_yaml(manifest_yaml).unwrap();
    let mut session = RenderSession::new().unwrap();

    let result = session.run(&mut page, &manifest, &HashMap::new()).unwrap();
    assert_eq!(
        result.status,
        SessionStatus::Success,
        "bindings: {:?}",
        result.bindings
    );

    page.into_html()
}

#[test]
fn test_expression_rendering_into_container() {
    let builder = TestPageBuilder::new("expressions")
        .with_container("occupation-out")
        .with_template("demo", "My name is, {{name}} and I am a, {{occupation}}");

    let html = hydrate(
        &builder,
        "bindings:\n  - template: demo\n    target: occupation-out\n    data:\n      name: adrian\n      occupation: super hero\n",
    );

    assert!(html.contains(
        r#"<div id="occupation-out">My name is, adrian and I am a, super hero</div>"#
    ));
    // The template block itself is untouched
    assert!(html.contains("{{occupation}}"));
}

#[test]
fn test_html_in_data_is_escaped_unless_triple_stached() {
    let builder = TestPageBuilder::new("escaping")
        .with_container("out")
        .with_template("currencies", "{{country}} uses {{currency}} or {{{currency}}}");

    let html = hydrate(
        &builder,
        "bindings:\n  - template: currencies\n    target: out\n    data:\n      country: America\n      currency: \"<i>Dollars</i>\"\n",
    );

    assert!(html.contains("America uses &lt;i&gt;Dollars&lt;/i&gt; or <i>Dollars</i>"));
}

#[test]
fn test_study_status_helper_end_to_end() {
    let builder = TestPageBuilder::new("students")
        .with_container("students-out")
        .with_template(
            "students",
            "{{#each students}}{{name}} {{study_status passing_year}};{{/each}}",
        );

    let html = hydrate(
        &builder,
        r#"
bindings:
  - template: students
    target: students-out
    data:
      students:
        - name: joe
          passing_year: 2024
        - name: jess
          passing_year: 2025
"#,
    );

    assert!(html.contains("joe passed;"));
    assert!(html.contains("jess failed;"));
}

#[test]
fn test_membership_helper_end_to_end() {
    let builder = TestPageBuilder::new("members")
        .with_container("members-out")
        .with_template(
            "members",
            "{{#each members}}{{member}}: {{membership age}}\n{{/each}}",
        );

    let html = hydrate(
        &builder,
        r#"
bindings:
  - template: members
    target: members-out
    data:
      members:
        - member: waly
          age: 34
        - member: tommy
          age: 35
        - member: billy
          age: 36
"#,
    );

    assert!(html.contains("waly: membership denied"));
    assert!(html.contains("tommy: membership Granted"));
    assert!(html.contains("billy: membership pending"));
}

#[test]
fn test_student_status_block_rewrites_passing_year() {
    let builder = TestPageBuilder::new("report")
        .with_container("report-out")
        .with_template(
            "report",
            "{{#student_status students}}{{name}}={{passing_year}};{{/student_status}}",
        );

    let html = hydrate(
        &builder,
        r#"
bindings:
  - template: report
    target: report-out
    data:
      students:
        - name: jim
          passing_year: 2013
        - name: mike
          passing_year: 2016
"#,
    );

    assert!(html.contains("jim=passed;"));
    assert!(html.contains("mike=not passed;"));
}

#[test]
fn test_athlete_size_block_verdicts() {
    let builder = TestPageBuilder::new("athletes")
        .with_container("athletes-out")
        .with_template(
            "athletes",
            "{{#athlete_size athletes}}{{athlete}}: {{height}}\n{{/athlete_size}}",
        );

    let html = hydrate(
        &builder,
        r#"
bindings:
  - template: athletes
    target: athletes-out
    data:
      athletes:
        - athlete: Bo Jackson
          height: 6.5
        - athlete: Daryl Strawberry
          height: 6.2
"#,
    );

    assert!(html.contains("Bo Jackson: Athlete must hit the gym first."));
    assert!(html.contains("Daryl Strawberry: Athlete is tall enough."));
}

#[test]
fn test_lucky_draw_block_classifies_every_record() {
    let builder = TestPageBuilder::new("raffle")
        .with_container("raffle-out")
        .with_template(
            "raffle",
            "{{#lucky_draw stuff}}[{{weight}}:{{size}}]{{/lucky_draw}}",
        );

    let html = hydrate(
        &builder,
        r#"
bindings:
  - template: raffle
    target: raffle-out
    data:
      stuff:
        - weight: 200
          size: 50
        - weight: 520
          size: 60
"#,
    );

    // Draw outcomes vary, but every record is stamped with one of the
    // classification lines (or the fallthrough) and rendered exactly once
    assert_eq!(html.matches("[200:").count(), 1);
    assert_eq!(html.matches("[520:").count(), 1);
    for weight in ["200", "520"] {
        let start = html.find(&format!("[{}:", weight)).unwrap();
        let end = html[start..].find(']').unwrap() + start;
        let verdict = &html[start + weight.len() + 2..end];
        assert!(
            verdict.starts_with("random 1: ")
                || verdict.starts_with("random 2: ")
                || verdict.starts_with("random 3: ")
                || verdict == "nope!",
            "unexpected verdict: {}",
            verdict
        );
    }
}

#[test]
fn test_partials_render_with_binding_data() {
    let builder = TestPageBuilder::new("partials")
        .with_container("dir-out")
        .with_container("dragons-out")
        .with_template("directory", "{{> dir_entry}}")
        .with_template("dragon-roster", "{{> dragon}}");

    let html = hydrate(
        &builder,
        r#"
partials:
  dir_entry: "{{domain}} is {{status}} for {{website}}"
  dragon: "{{breed}} is {{color}} with {{element}} powers"

variables:
  website: riotmind.nyc
  element: fire

bindings:
  - template: directory
    target: dir-out
    data:
      domain: .org
      status: active

  - template: dragon-roster
    target: dragons-out
    data:
      breed: Razorback
      color: green
"#,
    );

    assert!(html.contains(".org is active for riotmind.nyc"));
    assert!(html.contains("Razorback is green with fire powers"));
}

#[test]
fn test_variable_layering_overrides_win() {
    let builder = TestPageBuilder::new("vars")
        .with_container("out")
        .with_template("t", "{{site}} / {{owner}}");

    let mut page = Page::parse(&builder.generate_html()).unwrap();
    let manifest = Manifest::from_yaml(
        r#"
variables:
  site: manifest-site
  owner: manifest-owner

bindings:
  - template: t
    target: out
    data:
      site: data-site
"#,
    )
    .unwrap();

    let mut overrides = HashMap::new();
    overrides.insert("owner".to_string(), "cli-owner".to_string());

    let mut session = RenderSession::new().unwrap();
    session.run(&mut page, &manifest, &overrides).unwrap();

    // Manifest variables shadow binding data, CLI overrides shadow both
    let html = page.into_html();
    assert!(html.contains("manifest-site / cli-owner"));
}

#[test]
fn test_two_bindings_same_container_accumulate() {
    let builder = TestPageBuilder::new("accumulate")
        .with_container("out")
        .with_template("a", "first ")
        .with_template("b", "second");

    let html = hydrate(
        &builder,
        "bindings:\n  - template: a\n    target: out\n  - template: b\n    target: out\n",
    );

    assert!(html.contains(r#"<div id="out">first second</div>"#));
}

#[test]
fn test_session_report_round_trips_as_json() {
    let builder = TestPageBuilder::new("report")
        .with_container("out")
        .with_template("t", "{{x}}");

    let mut page = Page::parse(&builder.generate_html()).unwrap();
    let manifest = Manifest::from_yaml(
        "bindings:\n  - template: t\n    target: out\n    data:\n      x: hi\n",
    )
    .unwrap();

    let mut session = RenderSession::new().unwrap();
    let result = session.run(&mut page, &manifest, &HashMap::new()).unwrap();

    let json = serde_json::to_string_pretty(&result).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed["status"], "success");
    assert_eq!(parsed["summary"]["total_bindings"], 1);
    assert!(parsed["run_id"].as_str().is_some());
}
