//! HTML fragments for the three display regions.
//!
//! Every piece of text coming from a remote service is escaped before it is
//! interpolated. Triggers carry the recipe name in `data-name` so an action
//! always maps back to the entry it was rendered for.

use crate::favorites::FavoriteEntry;
use crate::ingredients::extract_ingredients;
use crate::model::Recipe;
use html_escape::{encode_double_quoted_attribute, encode_text};
use pulldown_cmark::{html, Options, Parser};

/// A single-paragraph status message
pub fn message_html(message: &str) -> String {
    format!("<p>{}</p>", encode_text(message))
}

/// Escape `text` and turn each `\n` or `\r\n` into `<br>`
pub fn line_breaks_html(text: &str) -> String {
    text.split('\n')
        .map(|line| encode_text(line.strip_suffix('\r').unwrap_or(line)).into_owned())
        .collect::<Vec<_>>()
        .join("<br>")
}

/// Recipe card: title, image, ingredients, instructions and save trigger
pub fn recipe_html(recipe: &Recipe) -> String {
    let name_text = encode_text(&recipe.name);
    let name_attr = encode_double_quoted_attribute(&recipe.name);
    let thumbnail = recipe.thumbnail.as_deref().unwrap_or_default();

    let ingredients: String = extract_ingredients(recipe)
        .iter()
        .map(|line| format!("<li>{}</li>", encode_text(line)))
        .collect();
    let instructions = line_breaks_html(recipe.instructions.as_deref().unwrap_or_default());

    format!(
        r#"<div class="recipe-title-row">
  <h2>{name_text}</h2>
</div>
<img src="{src}" alt="{name_attr}" />
<h3>Ingredients:</h3>
<ul>{ingredients}</ul>
<h3>Instructions:</h3>
<p>{instructions}</p>
<button id="save-recipe-btn" class="main-btn" data-action="save" data-name="{name_attr}">Save Recipe</button>"#,
        src = encode_double_quoted_attribute(thumbnail),
    )
}

/// Favorites list with a select link and a delete button per entry
pub fn favorites_html(entries: &[FavoriteEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            let attr = encode_double_quoted_attribute(&entry.name);
            format!(
                r#"<li>
  <span class="saved-recipe-link" data-action="select" data-name="{attr}">{text}</span>
  <button class="delete-btn" data-action="delete" data-name="{attr}">Delete</button>
</li>"#,
                text = encode_text(&entry.name),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Remix output as markdown-rendered HTML, or as plain text with line breaks
pub fn remix_html(text: &str, markdown: bool) -> String {
    if markdown {
        markdown_html(text)
    } else {
        format!("<p>{}</p>", line_breaks_html(text))
    }
}

fn markdown_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    // Raw HTML in generated text is shown as text, not injected
    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        pulldown_cmark::Event::Html(raw) | pulldown_cmark::Event::InlineHtml(raw) => {
            pulldown_cmark::Event::Text(raw)
        }
        other => other,
    });
    let mut output = String::new();
    html::push_html(&mut output, parser);
    output
}
