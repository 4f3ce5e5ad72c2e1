//! In-memory full-text index over product text fields using Tantivy.
//!
//! This is the "primary index" the hybrid search rides on: a BM25-ranked
//! keyword index over name, description, brand and tags. Terms are split on
//! non-alphanumerics and lowercased, with no stemming.

use tantivy::collector::{Count, TopDocs};
use tantivy::query::{BooleanQuery, Occur, Query, TermQuery};
use tantivy::schema::{Field, IndexRecordOption, Schema, Value as _, STORED, STRING, TEXT};
use tantivy::tokenizer::TokenStream;
use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument, Term};
use tracing::{debug, info};

use super::record::Product;
use super::store::StoreError;

/// Schema field names
const FIELD_ID: &str = "id";
const FIELD_NAME: &str = "name";
const FIELD_DESCRIPTION: &str = "description";
const FIELD_BRAND: &str = "brand";
const FIELD_TAGS: &str = "tags";

/// Writer heap budget. The index is built once, single-threaded.
const WRITER_HEAP_BYTES: usize = 50_000_000;

#[derive(Clone)]
struct TextFields {
    id: Field,
    name: Field,
    description: Field,
    brand: Field,
    tags: Field,
}

impl TextFields {
    fn build() -> (Schema, Self) {
        let mut schema_builder = Schema::builder();

        let id = schema_builder.add_text_field(FIELD_ID, STRING | STORED);
        let name = schema_builder.add_text_field(FIELD_NAME, TEXT);
        let description = schema_builder.add_text_field(FIELD_DESCRIPTION, TEXT);
        let brand = schema_builder.add_text_field(FIELD_BRAND, TEXT);
        let tags = schema_builder.add_text_field(FIELD_TAGS, TEXT);

        (
            schema_builder.build(),
            Self {
                id,
                name,
                description,
                brand,
                tags,
            },
        )
    }
}

/// Read-only text index built from a product snapshot.
pub struct TextIndex {
    index: Index,
    reader: IndexReader,
    fields: TextFields,
}

impl TextIndex {
    /// Build an index over the given products.
    pub fn build(products: &[Product]) -> Result<Self, StoreError> {
        let (schema, fields) = TextFields::build();
        let index = Index::create_in_ram(schema);

        let mut writer: IndexWriter = index.writer_with_num_threads(1, WRITER_HEAP_BYTES)?;
        for product in products {
            writer.add_document(Self::to_document(&fields, product))?;
        }
        writer.commit()?;

        let reader: IndexReader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()?;
        reader.reload()?;

        info!(documents = products.len(), "Text index built");

        Ok(Self {
            index,
            reader,
            fields,
        })
    }

    fn to_document(fields: &TextFields, product: &Product) -> TantivyDocument {
        let mut document = TantivyDocument::default();
        document.add_text(fields.id, &product.id);
        document.add_text(fields.name, &product.name);
        if let Some(ref description) = product.description {
            document.add_text(fields.description, description);
        }
        if let Some(ref brand) = product.brand {
            document.add_text(fields.brand, brand);
        }
        for tag in &product.tags {
            document.add_text(fields.tags, tag);
        }
        document
    }

    fn text_fields(&self) -> [Field; 4] {
        [
            self.fields.name,
            self.fields.description,
            self.fields.brand,
            self.fields.tags,
        ]
    }

    /// OR of every distinct token of `text` over every text field.
    ///
    /// User text is tokenized with the fields' own analyzer and never goes
    /// through the query grammar, so words like `AND` or `NOT` and stray
    /// punctuation are plain input.
    fn build_query(&self, text: &str) -> Result<BooleanQuery, StoreError> {
        let mut analyzer = self.index.tokenizer_for_field(self.fields.name)?;
        let mut tokens: Vec<String> = Vec::new();
        let mut stream = analyzer.token_stream(text);
        while stream.advance() {
            let token = &stream.token().text;
            if !tokens.contains(token) {
                tokens.push(token.clone());
            }
        }

        let mut clauses: Vec<(Occur, Box<dyn Query>)> = Vec::new();
        for token in &tokens {
            for field in self.text_fields() {
                let term = Term::from_field_text(field, token);
                clauses.push((
                    Occur::Should,
                    Box::new(TermQuery::new(term, IndexRecordOption::WithFreqs)),
                ));
            }
        }

        Ok(BooleanQuery::new(clauses))
    }

    /// Every document matching `text`, as `(product_id, bm25_score)` pairs
    /// sorted by score descending.
    pub fn search(&self, text: &str) -> Result<Vec<(String, f32)>, StoreError> {
        let searcher = self.reader.searcher();
        let query = self.build_query(text)?;

        // TopDocs rejects a zero limit
        let limit = (searcher.num_docs() as usize).max(1);
        let top_docs = searcher.search(&query, &TopDocs::with_limit(limit))?;

        let mut hits = Vec::with_capacity(top_docs.len());
        for (score, doc_address) in top_docs {
            let document: TantivyDocument = searcher.doc(doc_address)?;
            if let Some(id) = document.get_first(self.fields.id).and_then(|v| v.as_str()) {
                hits.push((id.to_string(), score));
            }
        }

        debug!(query = text, hits = hits.len(), "Text index search completed");
        Ok(hits)
    }

    /// Number of documents matching `text`.
    pub fn count(&self, text: &str) -> Result<usize, StoreError> {
        let searcher = self.reader.searcher();
        let query = self.build_query(text)?;
        Ok(searcher.search(&query, &Count)?)
    }

    pub fn num_docs(&self) -> u64 {
        self.reader.searcher().num_docs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("iPhone 15 Pro", 999.0)
                .with_id("phone")
                .with_brand("Apple")
                .with_description("Latest iPhone with advanced camera system")
                .with_tags(["smartphone", "apple", "iphone", "phone"]),
            Product::new("Yoga Mat", 35.0)
                .with_id("mat")
                .with_description("Non-slip exercise mat")
                .with_tags(["yoga", "mat", "exercise", "non-slip"]),
        ]
    }

    #[test]
    fn test_build_and_search() {
        let index = TextIndex::build(&catalog()).unwrap();
        assert_eq!(index.num_docs(), 2);

        let hits = index.search("iphone").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, "phone");
        assert!(hits[0].1 > 0.0);
    }

    #[test]
    fn test_search_is_case_insensitive_and_covers_tags() {
        let index = TextIndex::build(&catalog()).unwrap();

        let hits = index.search("EXERCISE").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, "mat");
    }

    #[test]
    fn test_terms_are_or_ed() {
        let index = TextIndex::build(&catalog()).unwrap();
        assert_eq!(index.count("apple yoga").unwrap(), 2);
    }

    #[test]
    fn test_query_syntax_is_escaped() {
        let index = TextIndex::build(&catalog()).unwrap();
        let hits = index.search("iphone (pro").unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_operator_words_are_plain_terms() {
        let index = TextIndex::build(&catalog()).unwrap();

        assert!(index.search("OR").unwrap().is_empty());
        assert!(index.search("IN").unwrap().is_empty());
        assert_eq!(index.count("NOT").unwrap(), 0);

        let hits = index.search("yoga AND").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, "mat");
        assert_eq!(index.count("iphone OR").unwrap(), 1);
    }

    #[test]
    fn test_punctuation_only_matches_nothing() {
        let index = TextIndex::build(&catalog()).unwrap();
        assert!(index.search("!!! ::").unwrap().is_empty());
    }

    #[test]
    fn test_empty_index() {
        let index = TextIndex::build(&[]).unwrap();
        assert!(index.search("anything").unwrap().is_empty());
        assert_eq!(index.count("anything").unwrap(), 0);
    }
}
