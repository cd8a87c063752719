//! The HTML form served at `/`.

use std::fmt::Write;
use std::sync::OnceLock;

use crate::CategoryField;
use crate::types::form::{
    FIELD_CARAT, FIELD_CLARITY, FIELD_COLOR, FIELD_CUT, FIELD_DEPTH, FIELD_TABLE, FIELD_X,
    FIELD_Y, FIELD_Z,
};

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Diamond Price Prediction</title>
</head>
<body>
<h1>Diamond Price Prediction</h1>
<form action="/predict" method="post">
"#;

const TAIL: &str = r#"<button type="submit">Predict</button>
</form>
</body>
</html>
"#;

/// Rendered once; the category tables never change.
pub(crate) fn index() -> &'static str {
    static PAGE: OnceLock<String> = OnceLock::new();
    PAGE.get_or_init(render)
}

fn render() -> String {
    let mut html = String::from(HEAD);
    number_input(&mut html, FIELD_CARAT);
    select(&mut html, FIELD_CUT, CategoryField::Cut);
    select(&mut html, FIELD_COLOR, CategoryField::Color);
    select(&mut html, FIELD_CLARITY, CategoryField::Clarity);
    for name in [FIELD_DEPTH, FIELD_TABLE, FIELD_X, FIELD_Y, FIELD_Z] {
        number_input(&mut html, name);
    }
    html.push_str(TAIL);
    html
}

fn number_input(html: &mut String, name: &str) {
    let _ = writeln!(
        html,
        r#"<p><label>{name} <input type="number" step="any" name="{name}" required></label></p>"#
    );
}

fn select(html: &mut String, name: &str, field: CategoryField) {
    let _ = writeln!(html, r#"<p><label>{name} <select name="{name}">"#);
    for label in field.mapping().labels() {
        let _ = writeln!(html, r#"<option value="{label}">{label}</option>"#);
    }
    html.push_str("</select></label></p>\n");
}
