use crate::config::{PrimitiveTable, RenderConfig};
use crate::graphql::schema::{Documentation, Field, FieldType, FieldTypeDefinition};

/// The rendered primitive for `field`'s declared type, if the type is in the
/// table. Absence is an expected outcome, not an error.
pub fn primitive_type<'a>(field: &Field, primitives: &'a PrimitiveTable) -> Option<&'a str> {
    primitives.lookup(field.type_description.concrete_name())
}

/// Whether the generated type name for `field` must be qualified with the
/// enclosing scope. Only generated object types need this, and only when
/// namespaces are flattened; enums, unions, and scalars keep their own names.
pub fn should_have_prefix(
    field: &Field,
    config: &RenderConfig,
    primitives: &PrimitiveTable,
) -> bool {
    let type_description = &field.type_description;
    let non_prefixable =
        type_description.is_enum() || type_description.is_union() || type_description.is_scalar();
    config.no_namespaces && primitive_type(field, primitives).is_none() && !non_prefixable
}

/// Picks the base type name for one selected field and hands it to
/// `format_field_type` for nullability and list wrapping.
pub fn converted_field_type<F>(
    convert: F,
    field: &Field,
    prefix: &str,
    config: &RenderConfig,
    primitives: &PrimitiveTable,
) -> String
where
    F: Fn(&str) -> String,
{
    let primitive = primitive_type(field, primitives);
    let base_name = if should_have_prefix(field, config, primitives) {
        let mut base_name = convert(prefix);
        if config.no_namespaces {
            base_name.push_str(field.type_description.concrete_name());
        }
        base_name
    } else if let Some(primitive) = primitive {
        primitive.to_string()
    } else {
        convert(field.type_description.concrete_name())
    };
    format_field_type(&field.type_description, &base_name)
}

/// Applies list and nullability syntax around an already chosen base name.
pub fn format_field_type(field_type: &FieldType, base_name: &str) -> String {
    let output = match &field_type.definition {
        FieldTypeDefinition::List(inner) => {
            format!("({})[]", format_field_type(inner, base_name))
        }
        _ => base_name.to_string(),
    };
    if field_type.nullable {
        return format!("{output} | null");
    }
    output
}

pub fn compile_documentation(docs: &Documentation, tab_width: usize) -> String {
    match docs {
        Some(docs) => {
            let tab = " ".repeat(tab_width);
            let processed_desc = docs
                .lines()
                .map(|line| line.trim())
                .filter(|line| !line.is_empty())
                .collect::<Vec<&str>>()
                .join(&format!("\n {tab}* "))
                .replace("*/", "");
            format!("/**\n {tab}* {processed_desc}\n {tab}*/\n{tab}")
        }
        None => String::from(""),
    }
}
