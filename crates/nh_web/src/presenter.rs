//! Server-side rendering of the single news page.

use std::fmt::Write;
use nh_core::{ArticleDigest, Category, Language, NewsDigest};

pub const MISSING_SELECTION: &str = "Please select a news category and language.";
pub const NO_ARTICLES: &str = "No news articles found for this category. Please try another category.";
pub const TECHNICAL_DIFFICULTIES: &str =
    "We are experiencing technical difficulties. Please try again later or choose a different category.";

const STYLE: &str = r#"
body { margin: 0; padding: 20px; font-family: Arial, sans-serif; background: #eef1f5; }
#container { max-width: 1200px; margin: 0 auto; padding: 20px; background: rgba(255, 255, 255, 0.9);
  border-radius: 12px; box-shadow: 0 6px 20px rgba(0, 0, 0, 0.3); display: flex; flex-wrap: wrap; gap: 20px; }
.center-header { width: 100%; text-align: center; font-size: 2em; font-weight: bold; color: #333; padding: 10px 0; }
.description { width: 100%; text-align: center; color: #555; }
.controls { flex: 1; min-width: 220px; }
.controls label { display: block; margin: 10px 0 4px; font-weight: bold; }
.controls select { width: 100%; padding: 6px; }
.blue-button { margin-top: 16px; background-color: #007bff; color: white; border: none; padding: 10px 20px;
  font-size: 1em; border-radius: 5px; cursor: pointer; }
.blue-button:hover { background-color: #0056b3; }
#output-container { flex: 2; min-width: 320px; max-height: 600px; overflow-y: auto; padding: 10px; border-radius: 8px; }
.article-card { border: 1px solid #ddd; padding: 20px; margin-bottom: 20px; border-radius: 12px; background: #f9f9f9;
  box-shadow: 0 4px 16px rgba(0, 0, 0, 0.1); overflow: hidden; }
.article-card h3 { margin-top: 0; font-size: 20px; word-break: break-word; }
.article-card h3 a { text-decoration: none; color: #007bff; }
.article-card p { margin: 5px 0; color: #555; line-height: 1.6; }
.article-image { max-width: 100%; height: auto; margin-top: 10px; border-radius: 8px; border: 1px solid #ddd; }
.message { color: #333; font-weight: bold; }
"#;

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Only http(s) links are rendered.
fn web_link(raw: &str) -> Option<&str> {
    url::Url::parse(raw)
        .ok()
        .filter(|u| matches!(u.scheme(), "http" | "https"))
        .map(|_| raw)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn render_card(item: &ArticleDigest) -> String {
    let article = &item.article;
    let image = article
        .image_url
        .as_deref()
        .and_then(web_link)
        .map(|src| format!(r#"<img src="{}" alt="Article image" class="article-image">"#, escape_html(src)))
        .unwrap_or_default();

    format!(
        r#"<div class="article-card">
  <h3><a href="{url}" target="_blank" rel="noopener">{title}</a></h3>
  <p><strong>Media:</strong> {source}</p>
  <p><strong>Overview:</strong> {summary}</p>
  {image}
</div>
"#,
        url = escape_html(web_link(&article.url).unwrap_or("#")),
        title = escape_html(&item.title),
        source = escape_html(&article.source),
        summary = escape_html(&item.summary),
        image = image,
    )
}

pub fn render_message(message: &str) -> String {
    format!(r#"<p class="message">{}</p>"#, escape_html(message))
}

pub fn render_digest(digest: &NewsDigest) -> String {
    if digest.articles.is_empty() {
        return render_message(NO_ARTICLES);
    }
    digest.articles.iter().map(render_card).collect()
}

/// Full page. `output` is already-rendered HTML for the output pane.
pub fn render_page(category: Option<Category>, language: Language, output: Option<&str>) -> String {
    let mut category_options = String::from(r#"<option value="">Pick a News Category</option>"#);
    for c in Category::ALL {
        let selected = if Some(c) == category { " selected" } else { "" };
        let _ = write!(category_options, r#"<option value="{}"{}>{}</option>"#, c.as_str(), selected, capitalize(c.as_str()));
    }

    let mut language_options = String::new();
    for l in Language::ALL {
        let selected = if l == language { " selected" } else { "" };
        let _ = write!(language_options, r#"<option value="{}"{}>{}</option>"#, l.code(), selected, l.name());
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>AI News Hub</title>
<style>{style}</style>
</head>
<body>
<div id="container">
  <div class="center-header">AI News Hub</div>
  <p class="description">Get summarized news headlines across various categories in different languages.</p>
  <form class="controls" method="get" action="/">
    <label for="category">Pick a News Category</label>
    <select id="category" name="category">{categories}</select>
    <label for="language">Choose a Language</label>
    <select id="language" name="language">{languages}</select>
    <button type="submit" class="blue-button">Show Me the News</button>
  </form>
  <div id="output-container">{output}</div>
</div>
</body>
</html>
"#,
        style = STYLE,
        categories = category_options,
        languages = language_options,
        output = output.unwrap_or_default(),
    )
}
