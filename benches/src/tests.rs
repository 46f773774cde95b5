use crate::context;
use crate::{Engine, Handlebars, Whisker};

fn render<E: Engine>(source: &str) -> String {
    let mut engine = E::new();
    engine.add_template("bench", source);
    engine.render("bench", &context::fixed())
}

#[track_caller]
fn assert_rendered(result: &str) {
    assert!(result.contains("<title>My awesome webpage!</title>"), "{result}");
    assert!(result.contains("<td>Nancy Wheeler</td><td>17</td>"), "{result}");
    assert!(result.contains("<td>Steve Harrington</td><td>18</td>"), "{result}");
    assert!(!result.contains("Billy Hargrove"), "{result}");
}

#[test]
fn handlebars() {
    assert_rendered(&render::<Handlebars>(include_str!("../benchdata/handlebars.html")));
}

#[test]
fn whisker() {
    let result = render::<Whisker>(include_str!("../benchdata/whisker.mustache"));
    assert_rendered(&result);
    assert_eq!(result, include_str!("../benchdata/whisker.golden.html"));
}
