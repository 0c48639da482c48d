//! Conversion from protobuf descriptors to the schema model.

use std::collections::HashMap;

use log::{debug, warn};
use prost_types::{
    DescriptorProto, EnumDescriptorProto, FieldDescriptorProto, FileDescriptorProto,
    FileDescriptorSet,
    field_descriptor_proto::{Label, Type},
};

use protomap_core::{
    diagnostic::{Diagnostic, DiagnosticCollector, ErrorCode, Location},
    identifier::QualifiedId,
    schema::{EnumValue, Field, Multiplicity, RecordType, ScalarKind, Schema, ValueKind},
};

/// Every enum of a descriptor set, keyed by its fully qualified name
/// (`.package.Outer.Enum`), which is how field `type_name`s refer to them.
pub(crate) struct EnumIndex<'a> {
    enums: HashMap<String, &'a EnumDescriptorProto>,
}

impl<'a> EnumIndex<'a> {
    pub(crate) fn new(set: &'a FileDescriptorSet) -> Self {
        let mut enums = HashMap::new();
        for file in &set.file {
            let prefix = if file.package().is_empty() {
                String::new()
            } else {
                format!(".{}", file.package())
            };
            for enum_type in &file.enum_type {
                enums.insert(format!("{prefix}.{}", enum_type.name()), enum_type);
            }
            for message in &file.message_type {
                Self::collect_nested(&mut enums, &prefix, message);
            }
        }
        Self { enums }
    }

    fn collect_nested(
        enums: &mut HashMap<String, &'a EnumDescriptorProto>,
        prefix: &str,
        message: &'a DescriptorProto,
    ) {
        let scope = format!("{prefix}.{}", message.name());
        for enum_type in &message.enum_type {
            enums.insert(format!("{scope}.{}", enum_type.name()), enum_type);
        }
        for nested in &message.nested_type {
            Self::collect_nested(enums, &scope, nested);
        }
    }

    fn get(&self, type_name: &str) -> Option<&'a EnumDescriptorProto> {
        self.enums.get(type_name).copied()
    }
}

/// Convert one file descriptor into a schema.
///
/// A record type with a malformed field is left out together with its nested
/// declarations; its siblings are converted normally.
pub(crate) fn convert_file(
    file: &FileDescriptorProto,
    enums: &EnumIndex<'_>,
) -> (Schema, Vec<Diagnostic>) {
    let mut collector = DiagnosticCollector::new();
    let mut schema = Schema::new(file.name());

    for message in &file.message_type {
        let path = QualifiedId::root(message.name());
        if let Some(record) = convert_record(message, &path, enums, &mut collector) {
            schema.push_record(record);
        }
    }

    (schema, collector.into_diagnostics())
}

fn convert_record(
    message: &DescriptorProto,
    path: &QualifiedId,
    enums: &EnumIndex<'_>,
    collector: &mut DiagnosticCollector,
) -> Option<RecordType> {
    let mut record = RecordType::new(message.name());

    for field in &message.field {
        match convert_field(field, path, enums) {
            Ok(field) => record.push_field(field),
            Err(diagnostic) => {
                warn!(
                    record = path.as_str(),
                    field = field.name();
                    "Abandoning malformed record type"
                );
                collector.emit(diagnostic);
                return None;
            }
        }
    }

    for nested in &message.nested_type {
        let nested_path = path.nested(nested.name());
        if let Some(nested) = convert_record(nested, &nested_path, enums, collector) {
            record.push_nested(nested);
        }
    }

    debug!(record = path.as_str(), fields = record.fields().len(); "Converted record type");
    Some(record)
}

fn convert_field(
    field: &FieldDescriptorProto,
    path: &QualifiedId,
    enums: &EnumIndex<'_>,
) -> Result<Field, Diagnostic> {
    let name = field.name();
    let malformed = |message: String| {
        Diagnostic::error(message)
            .with_code(ErrorCode::E101)
            .with_location(Location::field(path.as_str(), name))
    };

    let multiplicity = match field.label.map(Label::try_from) {
        Some(Ok(Label::Required)) => Multiplicity::Required,
        Some(Ok(Label::Optional)) => Multiplicity::Optional,
        Some(Ok(Label::Repeated)) => Multiplicity::Repeated,
        Some(Err(_)) | None => {
            return Err(malformed(format!(
                "field `{name}` has an unrecognized multiplicity"
            )));
        }
    };

    let value = match field.r#type.map(Type::try_from) {
        Some(Ok(Type::Message)) => {
            let referenced_type = local_name(field.type_name());
            if referenced_type.is_empty() {
                return Err(malformed(format!(
                    "message field `{name}` does not name its type"
                )));
            }
            ValueKind::Message {
                referenced_type: referenced_type.to_string(),
            }
        }
        Some(Ok(Type::Enum)) => {
            let Some(enum_type) = enums.get(field.type_name()) else {
                return Err(malformed(format!(
                    "enum type `{}` of field `{name}` is not part of the descriptor set",
                    field.type_name()
                ))
                .with_help("compile the schema together with the files it imports"));
            };
            let values = enum_type
                .value
                .iter()
                .map(|value| EnumValue::new(value.number(), value.name()))
                .collect();
            ValueKind::Enum { values }
        }
        Some(Ok(kind)) => match scalar_kind(kind) {
            Some(kind) => ValueKind::Scalar(kind),
            None => {
                return Err(malformed(format!(
                    "field `{name}` has an unrecognized value kind"
                )));
            }
        },
        Some(Err(_)) | None => {
            return Err(malformed(format!(
                "field `{name}` has an unrecognized value kind"
            )));
        }
    };

    Ok(Field::new(name, field.number(), multiplicity, value))
}

/// Map a descriptor type to a scalar kind; `None` for message and enum types.
fn scalar_kind(kind: Type) -> Option<ScalarKind> {
    let kind = match kind {
        Type::Double => ScalarKind::Double,
        Type::Float => ScalarKind::Float,
        Type::Int64 => ScalarKind::Int64,
        Type::Uint64 => ScalarKind::Uint64,
        Type::Int32 => ScalarKind::Int32,
        Type::Fixed64 => ScalarKind::Fixed64,
        Type::Fixed32 => ScalarKind::Fixed32,
        Type::Bool => ScalarKind::Bool,
        Type::String => ScalarKind::String,
        Type::Group => ScalarKind::Group,
        Type::Message | Type::Enum => return None,
        Type::Bytes => ScalarKind::Bytes,
        Type::Uint32 => ScalarKind::Uint32,
        Type::Sfixed32 => ScalarKind::Sfixed32,
        Type::Sfixed64 => ScalarKind::Sfixed64,
        Type::Sint32 => ScalarKind::Sint32,
        Type::Sint64 => ScalarKind::Sint64,
    };
    Some(kind)
}

/// The last segment of a (possibly fully qualified) type name.
fn local_name(type_name: &str) -> &str {
    type_name.rsplit('.').next().unwrap_or_default()
}
