//! The table registry: discovery, loading, caching and lookup.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;
use std::sync::Arc;

use super::binding::{BindingKind, DerivedBinding, TableBinding, TypedBinding, typed_from_record};
use super::events::{Listener, RegistryEvent};
use super::export::{ExportFormat, write_table};
use super::table::{LoadReport, LoadedTable, TableInfo};
use crate::codegen::{HEADER_BLOCK_ROWS, SchemaGenerator, normalize_table_name};
use crate::coerce::Value;
use crate::config::RegistryConfig;
use crate::error::{ConfigError, Result};
use crate::input::{CsvParser, FileProvider, ParsedDocument, ParserConfig, SourceMetadata, content_hash};
use crate::mapping::{ConfigRecord, Record, RecordCollection, TypeDescriptor};
use crate::schema::TableSchema;
use crate::tables::{EnemyConfig, ItemConfig, LevelConfig, WeaponConfig};

/// Per-table outcome of a bulk operation.
pub type TableResults = BTreeMap<String, Result<LoadReport>>;

/// Loads configuration tables through a [`FileProvider`] and serves lookups.
///
/// Loading and reloading take `&mut self`; lookups take `&self`. Each cached
/// table is an immutable [`LoadedTable`] behind an `Arc`, and a reload swaps
/// the whole entry, so collections handed out earlier stay complete and
/// unchanged.
///
/// # Example
///
/// ```
/// use gamecfg::{ConfigRegistry, MemoryProvider};
/// use gamecfg::tables::EnemyConfig;
///
/// let provider = MemoryProvider::new().with_resource(
///     "Configs/EnemyConfig",
///     "ID,Name,Health\nid,name,health\nint,string,int\n1,Zombie,100\n",
/// );
/// let mut registry = ConfigRegistry::new(provider);
/// registry.load_table("EnemyConfig")?;
///
/// let zombie = registry.get_typed::<EnemyConfig>("EnemyConfig", 1).unwrap();
/// assert_eq!(zombie.health, 100);
/// # Ok::<(), gamecfg::ConfigError>(())
/// ```
pub struct ConfigRegistry {
    provider: Arc<dyn FileProvider>,
    config: RegistryConfig,
    generator: SchemaGenerator,
    builtin: HashMap<String, Arc<dyn TableBinding>>,
    registered: HashMap<String, Arc<dyn TableBinding>>,
    cache: HashMap<String, Arc<LoadedTable>>,
    listeners: Vec<Listener>,
}

impl ConfigRegistry {
    /// Create a registry over a provider with default settings.
    pub fn new(provider: impl FileProvider + 'static) -> Self {
        Self::from_shared(Arc::new(provider))
    }

    /// Create a registry over a provider that is shared with the host.
    pub fn from_shared(provider: Arc<dyn FileProvider>) -> Self {
        let mut builtin: HashMap<String, Arc<dyn TableBinding>> = HashMap::new();
        builtin.insert(EnemyConfig::TABLE.to_string(), Arc::new(TypedBinding::<EnemyConfig>::new()));
        builtin.insert(WeaponConfig::TABLE.to_string(), Arc::new(TypedBinding::<WeaponConfig>::new()));
        builtin.insert(ItemConfig::TABLE.to_string(), Arc::new(TypedBinding::<ItemConfig>::new()));
        builtin.insert(LevelConfig::TABLE.to_string(), Arc::new(TypedBinding::<LevelConfig>::new()));

        Self {
            provider,
            config: RegistryConfig::default(),
            generator: SchemaGenerator::new(),
            builtin,
            registered: HashMap::new(),
            cache: HashMap::new(),
            listeners: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: RegistryConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a generator with a custom enum catalog for derived schemas.
    pub fn with_generator(mut self, generator: SchemaGenerator) -> Self {
        self.generator = generator;
        self
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn generator(&self) -> &SchemaGenerator {
        &self.generator
    }

    /// Bind a record type to its table.
    ///
    /// The type is keyed by its normalized table name, so a resource named
    /// `bossConfig` resolves to a type whose `TABLE` is `BossConfig`.
    pub fn register<T: ConfigRecord>(&mut self) -> &mut Self {
        let key = normalize_table_name(T::TABLE, &self.config.suffix);
        tracing::debug!(table = %key, "registered record type");
        self.registered.insert(key, Arc::new(TypedBinding::<T>::new()));
        self
    }

    /// Add a load listener.
    pub fn subscribe(&mut self, listener: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Names of discoverable tables in the configured folder.
    ///
    /// A resource qualifies when its name ends with the configured suffix
    /// and does not contain the sample marker.
    pub fn discover_tables(&self) -> Result<BTreeSet<String>> {
        let resources = self.provider.list_resources(&self.config.folder)?;
        Ok(resources
            .into_iter()
            .map(|r| r.name)
            .filter(|name| self.config.is_table_name(name))
            .collect())
    }

    /// Load a table into the cache, replacing any previous version.
    ///
    /// On failure the cache is left untouched and a `LoadFailed` event is
    /// emitted.
    pub fn load_table(&mut self, name: &str) -> Result<LoadReport> {
        match self.build_table(name) {
            Ok(mut table) => {
                let replaced = self.cache.contains_key(name);
                table.report.replaced = replaced;
                let report = table.report.clone();

                self.cache.insert(name.to_string(), Arc::new(table));
                tracing::info!(
                    table = name,
                    rows = report.rows,
                    notes = report.notes.len(),
                    replaced,
                    "loaded table"
                );
                self.emit(&RegistryEvent::Loaded {
                    table: name.to_string(),
                    rows: report.rows,
                    replaced,
                });
                Ok(report)
            }
            Err(err) => {
                tracing::warn!(table = name, error = %err, "failed to load table");
                self.emit(&RegistryEvent::LoadFailed {
                    table: name.to_string(),
                    kind: err.kind().to_string(),
                    error: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Reload a table from its source and swap the cache entry.
    pub fn reload_table(&mut self, name: &str) -> Result<LoadReport> {
        self.load_table(name)
    }

    /// Discover and load every table. Failures are reported per table.
    pub fn load_all(&mut self) -> Result<TableResults> {
        let names = self.discover_tables()?;
        Ok(names
            .into_iter()
            .map(|name| {
                let result = self.load_table(&name);
                (name, result)
            })
            .collect())
    }

    /// Load discoverable tables that are not cached yet.
    pub fn load_new_tables(&mut self) -> Result<TableResults> {
        let names: Vec<String> = self
            .discover_tables()?
            .into_iter()
            .filter(|name| !self.cache.contains_key(name))
            .collect();
        Ok(names
            .into_iter()
            .map(|name| {
                tracing::info!(table = %name, "new table discovered");
                let result = self.load_table(&name);
                (name, result)
            })
            .collect())
    }

    /// Reload every cached table whose source content changed.
    ///
    /// Sources are compared by content hash. Tables whose source has
    /// disappeared keep their cached version.
    pub fn poll_changes(&mut self) -> TableResults {
        let mut changed: Vec<String> = self
            .cache
            .values()
            .filter(|table| match self.provider.read_resource(&table.source.path) {
                Some(content) => content_hash(&content) != table.source.hash,
                None => {
                    tracing::warn!(table = %table.name, path = %table.source.path, "source disappeared");
                    false
                }
            })
            .map(|table| table.name.clone())
            .collect();
        changed.sort();

        changed
            .into_iter()
            .map(|name| {
                tracing::info!(table = %name, "source changed, reloading");
                let result = self.reload_table(&name);
                (name, result)
            })
            .collect()
    }

    /// First record whose identifying field equals `id`.
    pub fn get(&self, table: &str, id: impl Into<Value>) -> Option<Record> {
        let (loaded, index) = self.find(table, &id.into())?;
        loaded.records.get(index).cloned()
    }

    /// All records of a table; empty when the table is not loaded.
    pub fn get_all(&self, table: &str) -> Arc<RecordCollection> {
        self.cache
            .get(table)
            .map(|t| Arc::clone(&t.records))
            .unwrap_or_default()
    }

    /// All records of a table as `T`.
    ///
    /// Tables bound to `T` return their cached vector. Other tables are
    /// converted on each call by matching field names; fields of `T` absent
    /// from the table keep their default. `None` when the table is not loaded
    /// or shares no field with `T`.
    pub fn get_all_typed<T: ConfigRecord>(&self, table: &str) -> Option<Arc<Vec<T>>> {
        let loaded = self.cache.get(table)?;
        loaded.typed::<T>().or_else(|| {
            let descriptor = T::descriptor();
            if !shares_fields(&loaded.schema, &descriptor) {
                return None;
            }
            Some(Arc::new(
                loaded
                    .records
                    .iter()
                    .map(|r| typed_from_record(r, &descriptor))
                    .collect(),
            ))
        })
    }

    /// First record whose identifying field equals `id`, as `T`.
    ///
    /// Conversion follows [`get_all_typed`](Self::get_all_typed).
    pub fn get_typed<T: ConfigRecord>(&self, table: &str, id: impl Into<Value>) -> Option<T> {
        let (loaded, index) = self.find(table, &id.into())?;
        if let Some(typed) = loaded.typed::<T>() {
            return typed.get(index).cloned();
        }

        let descriptor = T::descriptor();
        if !shares_fields(&loaded.schema, &descriptor) {
            return None;
        }
        loaded
            .records
            .get(index)
            .map(|r| typed_from_record(r, &descriptor))
    }

    /// Cached table entry.
    pub fn table(&self, name: &str) -> Option<Arc<LoadedTable>> {
        self.cache.get(name).cloned()
    }

    pub fn table_info(&self, name: &str) -> Option<TableInfo> {
        self.cache.get(name).map(|t| t.info())
    }

    /// Record count per loaded table.
    pub fn stats(&self) -> BTreeMap<String, usize> {
        self.cache
            .iter()
            .map(|(name, table)| (name.clone(), table.row_count()))
            .collect()
    }

    /// Names of loaded tables, sorted.
    pub fn loaded_tables(&self) -> Vec<String> {
        let mut names: Vec<String> = self.cache.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.cache.contains_key(name)
    }

    /// Drop every cached table.
    pub fn clear(&mut self) {
        tracing::debug!(tables = self.cache.len(), "clearing cache");
        self.cache.clear();
    }

    /// Write a loaded table to `destination`.
    pub fn export_table(&self, table: &str, destination: impl AsRef<Path>, format: ExportFormat) -> Result<()> {
        let loaded = self
            .cache
            .get(table)
            .ok_or_else(|| ConfigError::UnknownTable(table.to_string()))?;
        write_table(loaded, destination.as_ref(), format)
    }

    /// Derive a table's schema from its header block without loading it.
    pub fn derive_schema(&self, name: &str) -> Result<TableSchema> {
        let path = self.config.resource_path(name);
        let content = self
            .provider
            .read_resource(&path)
            .ok_or(ConfigError::ResourceNotFound(path))?;
        let doc = self.parser(HEADER_BLOCK_ROWS).parse_document(&content);
        self.derive_from(name, &doc)
    }

    /// Generated Rust definition for one table.
    pub fn preview(&self, name: &str) -> Result<String> {
        let schema = self.derive_schema(name)?;
        Ok(self.generator.render_definition(&schema))
    }

    /// Generated Rust definitions for every discoverable table.
    pub fn generate_all(&self) -> Result<BTreeMap<String, Result<String>>> {
        Ok(self
            .discover_tables()?
            .into_iter()
            .map(|name| {
                let code = self.preview(&name);
                (name, code)
            })
            .collect())
    }

    fn find(&self, table: &str, id: &Value) -> Option<(&Arc<LoadedTable>, usize)> {
        let loaded = self.cache.get(table)?;
        let id_field = loaded.schema.resolve_id_field(&self.config.id_field)?;
        let index = loaded
            .records
            .iter()
            .position(|r| r.get(id_field).is_some_and(|v| v.matches_id(id)))?;
        Some((loaded, index))
    }

    fn emit(&self, event: &RegistryEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }

    fn parser(&self, header_rows: usize) -> CsvParser {
        CsvParser::with_config(ParserConfig {
            header_rows,
            ..ParserConfig::default()
        })
    }

    fn derive_from(&self, name: &str, doc: &ParsedDocument) -> Result<TableSchema> {
        let schema = self.generator.derive_schema(name, &doc.header_rows)?;
        if schema.get_field(&self.config.id_field).is_some() {
            let id_field = self.config.id_field.clone();
            return Ok(schema.with_id_field(id_field));
        }
        Ok(schema)
    }

    fn resolve_binding(&self, name: &str, doc: &ParsedDocument) -> Result<(Arc<dyn TableBinding>, BindingKind)> {
        if let Some(binding) = self.builtin.get(name) {
            return Ok((Arc::clone(binding), BindingKind::Builtin));
        }

        let normalized = normalize_table_name(name, &self.config.suffix);
        if let Some(binding) = self.registered.get(&normalized) {
            return Ok((Arc::clone(binding), BindingKind::Registered));
        }
        if let Some(binding) = self.builtin.get(&normalized) {
            return Ok((Arc::clone(binding), BindingKind::Builtin));
        }

        if self.config.derive_unknown_schemas && doc.header_rows.len() >= HEADER_BLOCK_ROWS {
            let schema = self.derive_from(name, doc)?;
            return Ok((Arc::new(DerivedBinding::new(schema)), BindingKind::Derived));
        }

        Err(ConfigError::UnknownTable(name.to_string()))
    }

    fn build_table(&self, name: &str) -> Result<LoadedTable> {
        let path = self.config.resource_path(name);
        let content = self
            .provider
            .read_resource(&path)
            .ok_or_else(|| ConfigError::ResourceNotFound(path.clone()))?;

        let doc = self.parser(self.config.header_rows).parse_document(&content);
        let (binding, kind) = self.resolve_binding(name, &doc)?;
        let schema = binding.schema().clone();

        if doc.malformed {
            tracing::warn!(
                table = name,
                expected = self.config.header_rows + 1,
                found = doc.header_rows.len(),
                "malformed document, caching empty table"
            );
        }

        let bound = binding.bind(&doc);
        let report = LoadReport {
            table: name.to_string(),
            rows: bound.records.len(),
            binding: kind,
            notes: bound.notes,
            malformed: doc.malformed,
            unterminated_quotes: doc.unterminated_quotes,
            fallback_fields: schema.fallback_fields().map(|f| f.field_name.clone()).collect(),
            unmatched_columns: bound.unmatched_columns,
            replaced: false,
        };
        let source = SourceMetadata::new(path, &content, bound.records.len(), schema.field_count());

        Ok(LoadedTable::new(
            name.to_string(),
            schema,
            bound.records,
            bound.typed,
            source,
            report,
        ))
    }
}

fn shares_fields<T>(schema: &TableSchema, descriptor: &TypeDescriptor<T>) -> bool {
    descriptor
        .fields()
        .iter()
        .any(|f| schema.get_field(&f.field_name).is_some())
}

impl std::fmt::Debug for ConfigRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigRegistry")
            .field("config", &self.config)
            .field("loaded", &self.loaded_tables())
            .field("registered", &self.registered.keys().collect::<Vec<_>>())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
