//! JSON-LD metadata parsing.
//!
//! Extracts Schema.org data embedded in `<script type="application/ld+json">`:
//! article headline, description, publication date, author and the full
//! `articleBody` many news CMSs publish alongside the rendered page.

use dom_query::{Document, Selection};
use serde_json::{Map, Value};

use crate::dom;
use crate::metadata::meta_tags::{parse_meta_date, validate_metadata_name};
use crate::result::ArticleMetadata;
use crate::Options;

/// Schema object found in a JSON-LD script, with its relevance.
#[derive(Debug, Clone)]
struct SchemaData {
    data: Map<String, Value>,
    importance: i32,
}

/// Fill missing metadata fields from JSON-LD article schemas.
#[must_use]
pub fn extract_json_ld(doc: &Document, original: ArticleMetadata, _opts: &Options) -> ArticleMetadata {
    let mut result = original;
    let (persons, articles) = decode_json_ld(doc);

    for article in &articles {
        if result.title.is_none() {
            result.title = get_single_string_value(&article.data, "headline")
                .or_else(|| get_single_string_value(&article.data, "name"));
        }
        if result.description.is_none() {
            result.description = get_single_string_value(&article.data, "description");
        }
        if result.published_date.is_none() {
            result.published_date = get_single_string_value(&article.data, "datePublished")
                .and_then(|d| parse_meta_date(&d));
        }
        if result.author.is_none() {
            result.author = article.data.get("author").and_then(author_names);
        }
    }

    if result.author.is_none() {
        result.author = persons.iter().find_map(|p| get_schema_name(&p.data));
    }

    result
}

/// Full article text published as `articleBody`, if any.
///
/// Must be read before document cleaning removes `<script>` elements.
#[must_use]
pub fn extract_article_body(doc: &Document) -> Option<String> {
    let (_, articles) = decode_json_ld(doc);
    articles
        .iter()
        .filter_map(|a| get_single_string_value(&a.data, "articleBody"))
        .max_by_key(String::len)
}

/// Parse all JSON-LD scripts into person and article schemas, most
/// important first.
fn decode_json_ld(doc: &Document) -> (Vec<SchemaData>, Vec<SchemaData>) {
    let mut persons = Vec::new();
    let mut articles = Vec::new();

    for script in doc.select(r#"script[type="application/ld+json"]"#).nodes() {
        let script_sel = Selection::from(*script);
        let json_text = dom::text_content(&script_sel);
        let json_text = json_text.trim();
        if json_text.is_empty() {
            continue;
        }

        let Ok(data) = serde_json::from_str::<Value>(json_text) else {
            continue;
        };
        process_schema_value(&data, 0, &mut persons, &mut articles);
    }

    persons.sort_by(|a, b| b.importance.cmp(&a.importance));
    articles.sort_by(|a, b| b.importance.cmp(&a.importance));
    (persons, articles)
}

/// Walk a JSON value, collecting typed schema objects (including `@graph`).
fn process_schema_value(
    value: &Value,
    depth: i32,
    persons: &mut Vec<SchemaData>,
    articles: &mut Vec<SchemaData>,
) {
    match value {
        Value::Object(map) => {
            let types = get_schema_types(map);
            if !types.is_empty() {
                let schema = SchemaData {
                    data: map.clone(),
                    importance: calculate_importance(&types, depth),
                };
                if is_article_type(&types) {
                    articles.push(schema);
                } else if is_person_type(&types) {
                    persons.push(schema);
                }
            }
            for val in map.values() {
                process_schema_value(val, depth + 1, persons, articles);
            }
        }
        Value::Array(arr) => {
            for item in arr {
                process_schema_value(item, depth, persons, articles);
            }
        }
        _ => {}
    }
}

/// Lowercase `@type` values of a schema object.
fn get_schema_types(obj: &Map<String, Value>) -> Vec<String> {
    match obj.get("@type") {
        Some(Value::String(s)) => vec![s.to_lowercase()],
        Some(Value::Array(arr)) => arr
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_lowercase)
            .collect(),
        _ => Vec::new(),
    }
}

/// Name of a person schema: `name`, or `givenName familyName`.
fn get_schema_name(data: &Map<String, Value>) -> Option<String> {
    if let Some(name) = get_single_string_value(data, "name") {
        return Some(name);
    }

    let given = data.get("givenName").and_then(Value::as_str).unwrap_or("").trim();
    let family = data.get("familyName").and_then(Value::as_str).unwrap_or("").trim();
    let full_name = format!("{given} {family}").trim().to_string();
    (!full_name.is_empty()).then_some(full_name)
}

/// Author names from an `author` value: a string, a person object or a
/// list of either. Multiple authors are joined with `"; "`.
fn author_names(value: &Value) -> Option<String> {
    let names: Vec<String> = match value {
        Value::String(s) => vec![s.trim().to_string()],
        Value::Object(obj) => get_schema_name(obj).into_iter().collect(),
        Value::Array(arr) => arr
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Object(obj) => get_schema_name(obj),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };

    let names: Vec<String> = names
        .into_iter()
        .filter(|n| validate_metadata_name(n))
        .collect();
    (!names.is_empty()).then(|| names.join("; "))
}

/// Single trimmed string value of a property (first element of an array).
fn get_single_string_value(data: &Map<String, Value>, key: &str) -> Option<String> {
    let s = match data.get(key)? {
        Value::String(s) => s.as_str(),
        Value::Array(arr) => arr.first().and_then(Value::as_str)?,
        _ => return None,
    };
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn is_person_type(types: &[String]) -> bool {
    types.iter().any(|t| matches!(t.as_str(), "person" | "author"))
}

fn is_article_type(types: &[String]) -> bool {
    types.iter().any(|t| {
        matches!(
            t.as_str(),
            "article" | "newsarticle" | "reportagenewsarticle" | "analysisnewsarticle"
                | "opinionnewsarticle" | "blogposting" | "report" | "liveblogposting"
                | "techarticle" | "scholarlyarticle"
        )
    })
}

fn calculate_importance(types: &[String], depth: i32) -> i32 {
    let base = if types.iter().any(|t| t.contains("newsarticle")) {
        120
    } else if is_article_type(types) {
        100
    } else {
        50
    };
    base - depth * 10
}
