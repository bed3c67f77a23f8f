pub const ORIGIN: &str = "http://localhost:3000";

/// A small page with one direct field marker, one overlay container, and an
/// unmarked footer.
pub fn page_fixture() -> &'static str {
    return r#"
{
  "id": "body",
  "tag": "body",
  "children": [
    {
      "id": "hero",
      "tag": "section",
      "attributes": [["class", "hero"], ["data-tina-field-overlay", "blocks.0"]],
      "children": [
        {
          "id": "title",
          "tag": "h1",
          "attributes": [["data-tina-field", "blocks.0.title"]],
          "children": [
            { "id": "title-em", "tag": "em" }
          ]
        },
        { "id": "hero-image", "tag": "img", "attributes": [["src", "/hero.png"]] }
      ]
    },
    {
      "id": "empty",
      "tag": "p",
      "attributes": [["data-tina-field", ""]]
    },
    { "id": "footer", "tag": "footer", "attributes": [["class", "footer"]] }
  ]
}
"#
    .trim();
}

/// Same layout with every field marker stripped.
pub fn unmarked_page_fixture() -> &'static str {
    return r#"
{
  "id": "body",
  "tag": "body",
  "children": [
    { "id": "title", "tag": "h1" },
    { "id": "footer", "tag": "footer", "attributes": [["class", "footer"]] }
  ]
}
"#
    .trim();
}
