//! Field descriptors binding schema columns to record setters.

use std::fmt;
use std::sync::Arc;

use super::record::Record;
use crate::coerce::{FromValue, Value};
use crate::schema::{FieldSchema, TableSchema};

type Setter<T> = Arc<dyn Fn(&mut T, Value) + Send + Sync>;
type Constructor<T> = Arc<dyn Fn() -> T + Send + Sync>;

/// A record type that can be materialized from a configuration table.
pub trait ConfigRecord: Default + Clone + Send + Sync + 'static {
    /// Table name the type is bound to (e.g. `EnemyConfig`).
    const TABLE: &'static str;

    /// Field list and setters for this type.
    fn descriptor() -> TypeDescriptor<Self>;
}

/// Schema of a record type plus one setter per field.
///
/// Setter `i` assigns the value of schema field `i`.
pub struct TypeDescriptor<T> {
    schema: TableSchema,
    setters: Vec<Setter<T>>,
    new_record: Constructor<T>,
}

impl<T> Clone for TypeDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            schema: self.schema.clone(),
            setters: self.setters.clone(),
            new_record: Arc::clone(&self.new_record),
        }
    }
}

impl<T> fmt::Debug for TypeDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

impl<T: Default + 'static> TypeDescriptor<T> {
    /// Start describing a record type for the named table.
    pub fn builder(table: impl Into<String>) -> DescriptorBuilder<T> {
        DescriptorBuilder {
            schema: TableSchema::new(table),
            setters: Vec::new(),
            new_record: Arc::new(T::default),
        }
    }
}

impl<T> TypeDescriptor<T> {
    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.schema.fields
    }

    /// A fresh record with every field at its initial value.
    pub fn new_record(&self) -> T {
        (self.new_record)()
    }

    /// Assign the value of field `index`. Out-of-range indices are ignored.
    pub fn set(&self, record: &mut T, index: usize, value: Value) {
        if let Some(setter) = self.setters.get(index) {
            setter(record, value);
        }
    }
}

impl TableSchema {
    /// Descriptor producing dynamic [`Record`]s for this schema.
    ///
    /// New records are pre-filled with each field's zero value so every
    /// record carries one value per field in schema order.
    pub fn record_descriptor(&self) -> TypeDescriptor<Record> {
        let template: Record = self
            .fields
            .iter()
            .map(|f| (f.field_name.clone(), Value::zero(&f.declared_type)))
            .collect();

        let setters = self
            .fields
            .iter()
            .map(|f| {
                let name = f.field_name.clone();
                Arc::new(move |record: &mut Record, value: Value| record.set(name.as_str(), value))
                    as Setter<Record>
            })
            .collect();

        TypeDescriptor {
            schema: self.clone(),
            setters,
            new_record: Arc::new(move || template.clone()),
        }
    }
}

/// Builder for [`TypeDescriptor`].
pub struct DescriptorBuilder<T> {
    schema: TableSchema,
    setters: Vec<Setter<T>>,
    new_record: Constructor<T>,
}

impl<T: 'static> DescriptorBuilder<T> {
    /// Declare a field. Its column type comes from `V`.
    ///
    /// A second field with the same name is ignored.
    pub fn field<V, F>(mut self, name: &str, display_name: &str, set: F) -> Self
    where
        V: FromValue + 'static,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        let field = FieldSchema::new(self.setters.len(), name, V::declared_type())
            .with_display_name(display_name);

        match self.schema.push_field(field) {
            Ok(()) => self
                .setters
                .push(Arc::new(move |record: &mut T, value: Value| set(record, V::from_value(value)))),
            Err(e) => tracing::warn!(table = %self.schema.name, "{e}, ignoring"),
        }
        self
    }

    /// Field used for id lookups.
    pub fn id_field(mut self, name: &str) -> Self {
        self.schema.id_field = Some(name.to_string());
        self
    }

    pub fn build(self) -> TypeDescriptor<T> {
        TypeDescriptor {
            schema: self.schema,
            setters: self.setters,
            new_record: self.new_record,
        }
    }
}
