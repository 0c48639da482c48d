//! Schema model types.
//!
//! These types describe a schema after ingestion: named record types with
//! ordered, numbered fields, possibly nested inside one another. They are
//! produced by an ingestion collaborator (see the `protomap-descriptor`
//! crate) and are only ever read by the mapping engine.
//!
//! # Nesting
//!
//! A [`RecordType`] owns its nested declarations. The enclosing scope of a
//! record type is therefore implied by where it sits in the tree; the engine
//! records the back-reference separately when it builds its scope tree.
//!
//! # Example
//!
//! ```
//! use protomap_core::schema::{Field, Multiplicity, RecordType, ScalarKind, Schema};
//!
//! let address = RecordType::new("Address")
//!     .with_field(Field::scalar("city", 1, Multiplicity::Optional, ScalarKind::String));
//! let person = RecordType::new("Person")
//!     .with_field(Field::scalar("id", 1, Multiplicity::Required, ScalarKind::Int32))
//!     .with_field(Field::message("home", 2, Multiplicity::Optional, "Address"));
//!
//! let schema = Schema::new("person.proto").with_record(address).with_record(person);
//! assert_eq!(schema.records().len(), 2);
//! ```

use std::fmt;

/// A complete schema: the top-level record types of one schema file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    name: String,
    records: Vec<RecordType>,
}

impl Schema {
    /// Create an empty schema named after its source file.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: Vec::new(),
        }
    }

    /// Append a top-level record type.
    pub fn with_record(mut self, record: RecordType) -> Self {
        self.records.push(record);
        self
    }

    /// Append a top-level record type in place.
    pub fn push_record(&mut self, record: RecordType) {
        self.records.push(record);
    }

    /// The schema name, usually the source file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Top-level record types in declaration order.
    pub fn records(&self) -> &[RecordType] {
        &self.records
    }
}

/// A named record type (a protobuf message) with its fields and nested types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordType {
    name: String,
    fields: Vec<Field>,
    nested: Vec<RecordType>,
}

impl RecordType {
    /// Create a record type without fields or nested declarations.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            nested: Vec::new(),
        }
    }

    /// Append a field, keeping declaration order.
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Append a nested record type declaration.
    pub fn with_nested(mut self, record: RecordType) -> Self {
        self.nested.push(record);
        self
    }

    /// Append a field in place.
    pub fn push_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Append a nested record type in place.
    pub fn push_nested(&mut self, record: RecordType) {
        self.nested.push(record);
    }

    /// The local (unqualified) name, unique among its siblings.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Record types declared inside this one, in declaration order.
    pub fn nested(&self) -> &[RecordType] {
        &self.nested
    }
}

/// A named, numbered member of a [`RecordType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    number: i32,
    multiplicity: Multiplicity,
    value: ValueKind,
}

impl Field {
    /// Create a field from all of its parts.
    pub fn new(
        name: impl Into<String>,
        number: i32,
        multiplicity: Multiplicity,
        value: ValueKind,
    ) -> Self {
        Self {
            name: name.into(),
            number,
            multiplicity,
            value,
        }
    }

    /// Create a scalar-valued field.
    pub fn scalar(
        name: impl Into<String>,
        number: i32,
        multiplicity: Multiplicity,
        kind: ScalarKind,
    ) -> Self {
        Self::new(name, number, multiplicity, ValueKind::Scalar(kind))
    }

    /// Create a field referencing another record type by unqualified name.
    pub fn message(
        name: impl Into<String>,
        number: i32,
        multiplicity: Multiplicity,
        referenced_type: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            number,
            multiplicity,
            ValueKind::Message {
                referenced_type: referenced_type.into(),
            },
        )
    }

    /// Create an enumeration-valued field.
    pub fn enumeration(
        name: impl Into<String>,
        number: i32,
        multiplicity: Multiplicity,
        values: Vec<EnumValue>,
    ) -> Self {
        Self::new(name, number, multiplicity, ValueKind::Enum { values })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The schema-assigned tag number.
    pub fn number(&self) -> i32 {
        self.number
    }

    pub fn multiplicity(&self) -> Multiplicity {
        self.multiplicity
    }

    pub fn value(&self) -> &ValueKind {
        &self.value
    }

    /// The unqualified name of the referenced record type, for message fields.
    pub fn referenced_type(&self) -> Option<&str> {
        match &self.value {
            ValueKind::Message { referenced_type } => Some(referenced_type),
            ValueKind::Scalar(_) | ValueKind::Enum { .. } => None,
        }
    }
}

/// How many values a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Multiplicity {
    /// Exactly one value.
    Required,
    /// Zero or one value.
    Optional,
    /// Zero or more values.
    Repeated,
}

impl Multiplicity {
    /// The bracketed cardinality marker shown in a rendered row.
    ///
    /// ```
    /// use protomap_core::schema::Multiplicity;
    ///
    /// assert_eq!(Multiplicity::Required.marker(), "[1..1]");
    /// assert_eq!(Multiplicity::Repeated.marker(), "[0..n]");
    /// ```
    pub fn marker(self) -> &'static str {
        match self {
            Multiplicity::Required => "[1..1]",
            Multiplicity::Optional => "[0..1]",
            Multiplicity::Repeated => "[0..n]",
        }
    }

    /// The spelled-out multiplicity, used as a tooltip.
    pub fn as_str(self) -> &'static str {
        match self {
            Multiplicity::Required => "required",
            Multiplicity::Optional => "optional",
            Multiplicity::Repeated => "repeated",
        }
    }
}

impl fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a field holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueKind {
    /// A scalar value.
    Scalar(ScalarKind),
    /// A reference to another record type by its unqualified name.
    Message { referenced_type: String },
    /// An enumeration with its values in declaration order.
    Enum { values: Vec<EnumValue> },
}

impl ValueKind {
    /// The short type tag shown between angle brackets in a rendered row.
    pub fn type_tag(&self) -> &'static str {
        match self {
            ValueKind::Scalar(kind) => kind.as_str(),
            ValueKind::Message { .. } => "message",
            ValueKind::Enum { .. } => "enum",
        }
    }
}

/// Scalar value kinds, named after the protobuf wire types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Double,
    Float,
    Int64,
    Uint64,
    Int32,
    Fixed64,
    Fixed32,
    Bool,
    String,
    Bytes,
    Uint32,
    Sfixed32,
    Sfixed64,
    Sint32,
    Sint64,
    /// Legacy proto2 group. Shown by its tag only; groups never produce edges.
    Group,
}

impl ScalarKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarKind::Double => "double",
            ScalarKind::Float => "float",
            ScalarKind::Int64 => "int64",
            ScalarKind::Uint64 => "uint64",
            ScalarKind::Int32 => "int32",
            ScalarKind::Fixed64 => "fixed64",
            ScalarKind::Fixed32 => "fixed32",
            ScalarKind::Bool => "bool",
            ScalarKind::String => "string",
            ScalarKind::Bytes => "bytes",
            ScalarKind::Uint32 => "uint32",
            ScalarKind::Sfixed32 => "sfixed32",
            ScalarKind::Sfixed64 => "sfixed64",
            ScalarKind::Sint32 => "sint32",
            ScalarKind::Sint64 => "sint64",
            ScalarKind::Group => "group",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One `(number, name)` pair of an enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    number: i32,
    name: String,
}

impl EnumValue {
    pub fn new(number: i32, name: impl Into<String>) -> Self {
        Self {
            number,
            name: name.into(),
        }
    }

    pub fn number(&self) -> i32 {
        self.number
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
