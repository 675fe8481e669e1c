use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

/// Query parameters sent to the `SearchSymbols` endpoint.
///
/// Only `search_terms` ever varies. The remaining fields are pinned to the
/// service defaults: every field, server ordering, first page, default format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    #[serde(rename = "searchTerms")]
    pub search_terms: String,
    #[serde(rename = "searchField")]
    pub search_field: String,
    #[serde(rename = "sortType")]
    pub sort_type: String,
    pub page: u32,
    pub format: String,
}

impl SearchRequest {
    pub fn new(term: Option<&str>) -> Self {
        let search_terms = term
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or_default()
            .to_string();
        Self {
            search_terms,
            search_field: String::new(),
            sort_type: String::new(),
            page: 1,
            format: String::new(),
        }
    }
}

/// Parsed reply of the symbol catalog.
///
/// `symbols` only holds the first page, so its length is unrelated to
/// `hit_count`. Consumers must bound by both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymbolSearchResponse {
    #[serde(rename = "hitscount")]
    pub hit_count: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub symbols: Vec<Symbol>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "searchterms", default, skip_serializing_if = "Option::is_none")]
    pub search_terms: Option<String>,
    #[serde(rename = "searchfield", default, skip_serializing_if = "Option::is_none")]
    pub search_field: Option<String>,
    #[serde(rename = "numpages", default, skip_serializing_if = "Option::is_none")]
    pub num_pages: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(rename = "currentpage", default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<i64>,
}

/// One catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Symbol {
    pub id: i64,
    pub name: String,
    /// URL of the small PNG rendering of the symbol.
    #[serde(rename = "url", default, deserialize_with = "null_as_default")]
    pub icon_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(rename = "contributorname", default, deserialize_with = "null_as_default")]
    pub contributor_name: String,
    #[serde(
        rename = "contributororganization",
        default,
        deserialize_with = "null_as_default"
    )]
    pub contributor_organization: String,

    // Not used for rendering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub rating: Option<String>,
    #[serde(
        rename = "uploadtime",
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub upload_time: Option<String>,
    #[serde(rename = "contributoremail", default, skip_serializing_if = "Option::is_none")]
    pub contributor_email: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The service is loose about scalar types for `rating` and `uploadtime`.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ScalarVisitor;

    impl<'de> Visitor<'de> for ScalarVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(formatter, "a string, a number or null")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(ScalarVisitor)
}
