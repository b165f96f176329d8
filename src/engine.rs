//! The query engine: template cache in front of the rewrite and render
//! pipeline, plus the backend execution seam.

use std::str::FromStr;

use serde::de::DeserializeOwned;

use crate::ast::Statement;
use crate::cache::TemplateCache;
use crate::config::EngineConfig;
use crate::error::{DynqError, DynqResult};
use crate::materialize::{materialize, Cardinality, QueryOutput};
use crate::params::Params;
use crate::rewrite::rewrite_statement;
use crate::transpiler::{ToMongo, ToSql};

pub use crate::materialize::Row;

/// Where rewritten statements are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Relational,
    DocumentStore,
}

impl FromStr for Backend {
    type Err = DynqError;

    fn from_str(s: &str) -> DynqResult<Self> {
        match s {
            "relational" => Ok(Backend::Relational),
            "document-store" => Ok(Backend::DocumentStore),
            other => Err(DynqError::UnsupportedBackend(other.to_string())),
        }
    }
}

/// Executes a rendered statement against a concrete store.
///
/// The engine stays backend-agnostic; implementations wrap a database
/// connection, an HTTP client, or a fixture in tests.
pub trait Executor {
    fn execute(&self, statement: &str, cardinality: Cardinality) -> DynqResult<Vec<Row>>;
}

pub struct QueryEngine {
    backend: Backend,
    cache: TemplateCache,
}

impl QueryEngine {
    pub fn new(backend: Backend) -> Self {
        Self::with_config(backend, &EngineConfig::default())
    }

    pub fn with_config(backend: Backend, config: &EngineConfig) -> Self {
        let cache = TemplateCache::new(config.cache.max_entries)
            .with_eviction_logging(config.cache.log_evictions);
        Self { backend, cache }
    }

    /// Build the engine entirely from configuration, including the backend.
    pub fn from_config(config: &EngineConfig) -> DynqResult<Self> {
        let backend = config.backend.parse()?;
        Ok(Self::with_config(backend, config))
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn cache(&self) -> &TemplateCache {
        &self.cache
    }

    /// Parse (or fetch from cache) and rewrite a template for one invocation.
    ///
    /// The cached template is never mutated; each invocation rewrites a deep
    /// copy, so concurrent calls with different parameters cannot observe
    /// each other.
    pub fn rewrite(&self, template: &str, params: &Params) -> DynqResult<Statement> {
        let key = normalize_template(template);
        let parsed = match self.cache.get(&key) {
            Some(hit) => hit,
            None => {
                let statement = crate::parser::parse(&key)?;
                self.cache.put(key, statement)
            }
        };
        rewrite_statement(Statement::clone(&parsed), params)
    }

    /// Render a rewritten statement for this engine's backend.
    pub fn render(&self, statement: &Statement) -> DynqResult<String> {
        match self.backend {
            Backend::Relational => Ok(statement.to_sql()),
            Backend::DocumentStore => statement.to_mongo(),
        }
    }

    /// Full pipeline: rewrite, render, execute, and map rows into `T`.
    pub fn fetch<T, E>(
        &self,
        executor: &E,
        template: &str,
        params: &Params,
        cardinality: Cardinality,
    ) -> DynqResult<QueryOutput<T>>
    where
        T: DeserializeOwned,
        E: Executor + ?Sized,
    {
        let statement = self.rewrite(template, params)?;
        let rendered = self.render(&statement)?;
        log::debug!("executing [{}]", rendered);
        let rows = executor.execute(&rendered, cardinality)?;
        materialize(rows, cardinality)
    }
}

/// Cache key for a template: trimmed, inner whitespace collapsed to single
/// spaces. Two spellings of the same template share one cache entry.
pub fn normalize_template(template: &str) -> String {
    template.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transpiler::ToSql;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use std::sync::Arc;

    #[derive(Debug, Deserialize, PartialEq)]
    struct User {
        id: i64,
        name: String,
    }

    /// Fixture executor: records the rendered statement, returns canned rows.
    struct Fixture {
        rows: Vec<Row>,
        seen: std::sync::Mutex<Vec<String>>,
    }

    impl Fixture {
        fn returning(rows: Vec<Row>) -> Self {
            Self {
                rows,
                seen: std::sync::Mutex::new(Vec::new()),
            }
        }
    }

    impl Executor for Fixture {
        fn execute(&self, statement: &str, _cardinality: Cardinality) -> DynqResult<Vec<Row>> {
            self.seen.lock().unwrap().push(statement.to_string());
            Ok(self.rows.clone())
        }
    }

    fn user_row(id: i64, name: &str) -> Row {
        let mut row = Row::new();
        row.insert("id".to_string(), serde_json::json!(id));
        row.insert("name".to_string(), serde_json::json!(name));
        row
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(
            normalize_template("  SELECT *\n  FROM\tusers  "),
            "SELECT * FROM users"
        );
    }

    #[test]
    fn test_equivalent_spellings_share_one_cache_entry() {
        let engine = QueryEngine::new(Backend::Relational);
        let params = Params::new().bind("id", 1);
        engine
            .rewrite("SELECT * FROM users WHERE id = :id", &params)
            .unwrap();
        engine
            .rewrite("SELECT *\n   FROM users\n   WHERE id = :id", &params)
            .unwrap();
        assert_eq!(engine.cache().len(), 1);
    }

    #[test]
    fn test_cached_template_is_not_mutated_by_rewrites() {
        let engine = QueryEngine::new(Backend::Relational);
        let template = "SELECT * FROM users WHERE id = :id AND name = :name";

        let first = engine
            .rewrite(template, &Params::new().bind("id", 1))
            .unwrap();
        assert_eq!(first.to_sql(), "SELECT * FROM users WHERE id = 1");

        // second invocation still sees both placeholders
        let second = engine
            .rewrite(template, &Params::new().bind("name", "ann"))
            .unwrap();
        assert_eq!(second.to_sql(), "SELECT * FROM users WHERE name = 'ann'");
    }

    #[test]
    fn test_concurrent_invocations_stay_isolated() {
        let engine = Arc::new(QueryEngine::new(Backend::Relational));
        let template = "SELECT * FROM users WHERE id = :id";

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let engine = Arc::clone(&engine);
                std::thread::spawn(move || {
                    let params = Params::new().bind("id", i);
                    engine.rewrite(template, &params).unwrap().to_sql()
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(
                handle.join().unwrap(),
                format!("SELECT * FROM users WHERE id = {}", i)
            );
        }
        assert_eq!(engine.cache().len(), 1);
    }

    #[test]
    fn test_backend_parses_from_name() {
        assert_eq!("relational".parse::<Backend>().unwrap(), Backend::Relational);
        assert_eq!(
            "document-store".parse::<Backend>().unwrap(),
            Backend::DocumentStore
        );
        let err = "graph".parse::<Backend>().unwrap_err();
        assert!(matches!(err, DynqError::UnsupportedBackend(name) if name == "graph"));
    }

    #[test]
    fn test_render_follows_the_backend() {
        let params = Params::new().bind("id", 5);
        let relational = QueryEngine::new(Backend::Relational);
        let statement = relational
            .rewrite("SELECT * FROM users WHERE id = :id", &params)
            .unwrap();
        assert_eq!(
            relational.render(&statement).unwrap(),
            "SELECT * FROM users WHERE id = 5"
        );

        let documents = QueryEngine::new(Backend::DocumentStore);
        assert_eq!(
            documents.render(&statement).unwrap(),
            "db.users.find({ \"id\": 5 }, {})"
        );
    }

    #[test]
    fn test_fetch_single_with_no_rows_is_none() {
        let engine = QueryEngine::new(Backend::Relational);
        let fixture = Fixture::returning(Vec::new());
        let output: QueryOutput<User> = engine
            .fetch(
                &fixture,
                "SELECT * FROM users WHERE id = :id",
                &Params::new().bind("id", 404),
                Cardinality::Single,
            )
            .unwrap();
        assert_eq!(output, QueryOutput::Single(None));
    }

    #[test]
    fn test_fetch_collection_maps_rows_in_order() {
        let engine = QueryEngine::new(Backend::Relational);
        let fixture = Fixture::returning(vec![user_row(1, "ann"), user_row(2, "bob")]);
        let output: QueryOutput<User> = engine
            .fetch(
                &fixture,
                "SELECT * FROM users WHERE age > :min",
                &Params::new(),
                Cardinality::Collection,
            )
            .unwrap();
        assert_eq!(
            output.into_vec(),
            vec![
                User {
                    id: 1,
                    name: "ann".to_string()
                },
                User {
                    id: 2,
                    name: "bob".to_string()
                },
            ]
        );
        // the pruned filter never reached the backend
        assert_eq!(
            fixture.seen.lock().unwrap().as_slice(),
            ["SELECT * FROM users"]
        );
    }

    #[test]
    fn test_from_config() {
        let config = EngineConfig::from_toml_str("backend = \"document-store\"").unwrap();
        let engine = QueryEngine::from_config(&config).unwrap();
        assert_eq!(engine.backend(), Backend::DocumentStore);

        let bad = EngineConfig::from_toml_str("backend = \"graph\"").unwrap();
        assert!(QueryEngine::from_config(&bad).is_err());
    }
}
