use coverletter_core::templates::{Values, extract_variables, fill, substitute};
use rstest::rstest;

fn values_for(vars: &[String], f: impl Fn(&str) -> String) -> Values {
    vars.iter().map(|v| (v.clone(), f(v))).collect()
}

#[rstest]
#[case("no placeholders here", &[])]
#[case("${a} and ${b} and ${a}", &["a", "b"])]
#[case("Dear ${hiring_manager},\n\nI am applying to ${company}.", &["hiring_manager", "company"])]
#[case("${x}${y}${x}${z}", &["x", "y", "z"])]
#[case("trailing ${open", &[])]
#[case("${}", &[""])]
fn extracts_distinct_names_in_order(#[case] template: &str, #[case] expected: &[&str]) {
    assert_eq!(extract_variables(template), expected);
}

#[rstest]
#[case("Hello ${name}", "Hello World")]
#[case("${name}", "World")]
#[case("${name}, ${name}!", "World, World!")]
fn substitutes_name(#[case] template: &str, #[case] expected: &str) {
    let mut values = Values::new();
    values.insert("name".into(), "World".into());
    assert_eq!(substitute(template, &values), expected);
}

#[rstest]
#[case("Dear ${who},\nThanks for ${what}.\n-- ${who}")]
#[case("${a}${b}${a}")]
#[case("$${price} and {braces} and ${}")]
#[case("mixed ${ spaced } and ${ünï}")]
fn filling_every_variable_removes_all_markers(#[case] template: &str) {
    let vars = extract_variables(template);
    let values = values_for(&vars, |v| format!("<{}>", v.len()));
    let out = substitute(template, &values);

    for v in &vars {
        let marker = format!("${{{v}}}");
        assert!(!out.contains(&marker), "{marker} still present in {out:?}");
    }
}

#[test]
fn text_outside_markers_is_preserved() {
    let template = "Intro $ { } $5\n${a}\tmiddle ${b} end";
    let vars = extract_variables(template);
    let values = values_for(&vars, |_| String::new());
    assert_eq!(substitute(template, &values), "Intro $ { } $5\n\tmiddle  end");
}

#[test]
fn stored_template_is_not_mutated() {
    let template = String::from("Hi ${n}");
    let mut values = Values::new();
    values.insert("n".into(), "there".into());

    let doc = fill(&template, &values);
    assert_eq!(doc.as_str(), "Hi there");
    assert_eq!(template, "Hi ${n}");
}

#[test]
fn order_of_values_does_not_matter() {
    let template = "${first} ${second}";
    let mut forward = Values::new();
    forward.insert("first".into(), "${second}".into());
    forward.insert("second".into(), "2".into());

    assert_eq!(substitute(template, &forward), "${second} 2");
}
