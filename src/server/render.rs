use catalog_schema::{Entry, KNOWN_TYPES, TypeOption, display_label, display_rank};
use serde::Serialize;
use tera::{Context, Tera};

use crate::db::Column;
use crate::error::CatalogError;
use crate::server::flash::Flash;

const INDEX_TEMPLATE: &str = "index.html";

/// Server-side HTML rendering with the templates compiled into the binary.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    pub fn new() -> Result<Self, CatalogError> {
        let mut tera = Tera::default();
        tera.add_raw_template(
            INDEX_TEMPLATE,
            include_str!("../../templates/index.html.tera"),
        )?;
        Ok(Self { tera })
    }

    pub fn render_index(&self, view: &IndexView) -> Result<String, CatalogError> {
        let context = Context::from_serialize(view)?;
        Ok(self.tera.render(INDEX_TEMPLATE, &context)?)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RowView {
    pub id: i64,
    pub type_code: String,
    pub type_label: String,
    pub name: String,
    pub description: String,
    pub url: String,
}

impl From<Entry> for RowView {
    fn from(entry: Entry) -> Self {
        Self {
            id: entry.id,
            type_label: display_label(&entry.type_code).to_string(),
            type_code: entry.type_code,
            name: entry.name,
            description: entry.description,
            url: entry.url,
        }
    }
}

/// Everything the list page template reads.
#[derive(Debug, Clone, Serialize)]
pub struct IndexView {
    pub columns: Vec<&'static str>,
    pub editable_columns: Vec<&'static str>,
    pub rows: Vec<RowView>,
    pub page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub pages: Vec<u32>,
    pub search: String,
    pub type_filter: String,
    /// `&search=..&type=..`, already URL-encoded, appended to pagination links.
    pub query_suffix: String,
    /// Types present in the table, for the filter dropdown.
    pub filter_types: Vec<TypeOption>,
    /// Known types plus any unknown codes present, for the add/edit forms.
    pub form_types: Vec<TypeOption>,
    pub flashes: Vec<Flash>,
}

pub struct IndexParts {
    pub rows: Vec<Entry>,
    pub page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub search: String,
    pub type_filter: String,
    pub present_types: Vec<String>,
    pub flashes: Vec<Flash>,
}

impl From<IndexParts> for IndexView {
    fn from(parts: IndexParts) -> Self {
        let query_suffix = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("search", &parts.search)
            .append_pair("type", &parts.type_filter)
            .finish();

        let mut form_codes: Vec<String> = KNOWN_TYPES
            .iter()
            .map(|(code, _)| (*code).to_string())
            .collect();
        form_codes.extend(
            parts
                .present_types
                .iter()
                .filter(|code| display_rank(code) == usize::MAX)
                .cloned(),
        );

        Self {
            columns: Column::ALL.iter().map(|c| c.as_str()).collect(),
            editable_columns: Column::EDITABLE.iter().map(|c| c.as_str()).collect(),
            rows: parts.rows.into_iter().map(RowView::from).collect(),
            page: parts.page,
            total_pages: parts.total_pages,
            total_items: parts.total_items,
            pages: (1..=parts.total_pages).collect(),
            search: parts.search,
            type_filter: parts.type_filter,
            query_suffix: format!("&{query_suffix}"),
            filter_types: parts.present_types.into_iter().map(TypeOption::new).collect(),
            form_types: form_codes.into_iter().map(TypeOption::new).collect(),
            flashes: parts.flashes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(rows: Vec<Entry>, present_types: Vec<&str>) -> IndexParts {
        IndexParts {
            rows,
            page: 1,
            total_pages: 2,
            total_items: 16,
            search: "a&b c".to_string(),
            type_filter: "1".to_string(),
            present_types: present_types.into_iter().map(str::to_string).collect(),
            flashes: vec![Flash::success("Record 3 added")],
        }
    }

    #[test]
    fn query_suffix_is_url_encoded() {
        let view = IndexView::from(parts(Vec::new(), vec!["1"]));
        assert_eq!(view.query_suffix, "&search=a%26b+c&type=1");
        assert_eq!(view.pages, vec![1, 2]);
    }

    #[test]
    fn form_types_include_unknown_codes_present_in_table() {
        let view = IndexView::from(parts(Vec::new(), vec!["2", "legacy"]));
        let codes: Vec<&str> = view.form_types.iter().map(|t| t.code.as_str()).collect();
        assert_eq!(codes, vec!["1", "2", "3", "4", "5", "6", "legacy"]);
        assert_eq!(view.filter_types.len(), 2);
        assert_eq!(view.filter_types[1].label, "legacy");
    }

    #[test]
    fn index_renders_rows_labels_and_flashes() {
        let renderer = Renderer::new().expect("template compiles");
        let entry = Entry {
            id: 42,
            type_code: "4".to_string(),
            name: "<Model Hub>".to_string(),
            description: "weights".to_string(),
            url: "https://example.com/hub".to_string(),
        };
        let html = renderer
            .render_index(&IndexView::from(parts(vec![entry], vec!["4"])))
            .expect("render");

        assert!(html.contains(r#"data-id="42""#));
        assert!(html.contains("&lt;Model Hub&gt;"));
        assert!(html.contains("Record 3 added"));
        assert!(html.contains("alert-success"));
        assert!(html.contains(r#"<td class="type-column">AI</td>"#));
    }
}
