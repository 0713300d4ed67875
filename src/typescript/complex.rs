use super::field::{compile_documentation, converted_field_type};
use super::fragment::fragment_union;
use super::{CompileContext, Error, Result};
use crate::graphql::document::{ParsedSelectionSet, SelectionDescriptor};
use crate::graphql::schema::{FieldTypeDefinition, Schema, TypeDefinition};
use graphql_parser::Pos;
use std::collections::HashMap;

/// Generated declarations for one compiled document, in insertion order.
/// Re-inserting a name keeps the first declaration, so repeated selections of
/// the same type collapse into one.
pub struct DeclSink {
    names: Vec<String>,
    declarations: HashMap<String, String>,
}

impl DeclSink {
    pub fn new() -> Self {
        DeclSink {
            names: Vec::new(),
            declarations: HashMap::new(),
        }
    }

    pub fn insert(&mut self, name: String, rhs: String) {
        if !self.declarations.contains_key(&name) {
            self.names.push(name.clone());
            self.declarations.insert(name, rhs);
        }
    }

    pub fn render(&self) -> String {
        self.names
            .iter()
            .map(|name| format!("export type {} = {};", name, self.declarations[name]))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

fn concrete_object_names<'a>(schema: &'a Schema, type_name: &'a str) -> Option<Vec<&'a str>> {
    match &schema.get_type_for_name(type_name)?.definition {
        TypeDefinition::Object(_) => Some(vec![type_name]),
        TypeDefinition::Interface(interface_type) => Some(
            interface_type
                .possible_types
                .iter()
                .map(String::as_str)
                .collect(),
        ),
        TypeDefinition::Union(union_type) => Some(
            union_type
                .possible_types
                .iter()
                .map(String::as_str)
                .collect(),
        ),
        _ => None,
    }
}

/// Whether a fragment on `spread_type_name` can ever match a value of
/// `parent_type_name`: some concrete object type must satisfy both. `None`
/// when either side is not a spreadable type; the scope walk reports those
/// separately.
fn spread_can_match<'a>(
    schema: &'a Schema,
    parent_type_name: &'a str,
    spread_type_name: &'a str,
) -> Option<bool> {
    let parent_names = concrete_object_names(schema, parent_type_name)?;
    let spread_names = concrete_object_names(schema, spread_type_name)?;
    Some(spread_names.iter().any(|name| parent_names.contains(name)))
}

/// Compiles one selection scope into its right-hand-side type expression,
/// pushing declarations for nested object types and inline fragments into
/// `decls`. Children land before their parents in the output.
pub fn compile_scope(
    ctx: &mut CompileContext,
    selection_set: &ParsedSelectionSet,
    scope_type_name: &str,
    scope_position: Pos,
    local_name: &str,
    prefix: &str,
    decls: &mut DeclSink,
) -> Result<String> {
    let convert = ctx.convert;
    let settings = ctx.settings;
    let catalog = ctx.catalog;

    let scope_type = ctx
        .schema
        .get_type_for_name(scope_type_name)
        .ok_or_else(|| Error::MissingType(scope_type_name.to_string()))?;
    let fields_lookup = match &scope_type.definition {
        TypeDefinition::Object(object_type) => Some(&object_type.fields),
        TypeDefinition::Interface(interface_type) => Some(&interface_type.fields),
        TypeDefinition::Union(_) => None,
        _ => {
            return Err(Error::SelectionSetOnWrongType(
                scope_type_name.to_string(),
                scope_position,
            ))
        }
    };

    let descriptor = SelectionDescriptor::split(selection_set, local_name)?;

    let mut prop_lines = Vec::with_capacity(descriptor.fields.len());
    let mut seen_props: Vec<&str> = Vec::new();
    for selection_field in &descriptor.fields {
        let prop_key = selection_field
            .alias
            .as_ref()
            .unwrap_or(&selection_field.name);
        if seen_props.contains(&prop_key.as_str()) {
            continue;
        }
        seen_props.push(prop_key);

        if selection_field.name == "__typename" {
            prop_lines.push(format!("  {prop_key}: string;"));
            continue;
        }
        let lookup = fields_lookup.ok_or_else(|| Error::UnknownField {
            parent_type_name: scope_type_name.to_string(),
            field_name: selection_field.name.clone(),
            position: selection_field.position,
            possible_field_names: vec!["__typename".to_string()],
        })?;
        let schema_field = lookup.get(&selection_field.name).ok_or_else(|| {
            Error::UnknownField {
                parent_type_name: scope_type_name.to_string(),
                field_name: selection_field.name.clone(),
                position: selection_field.position,
                possible_field_names: lookup.keys().cloned().collect(),
            }
        })?;

        let type_description = &schema_field.type_description;
        let concrete_type_name = type_description.concrete_name().to_string();
        if matches!(
            type_description.concrete().definition,
            FieldTypeDefinition::InputObject(_)
        ) {
            return Err(Error::InputObjectInOutput {
                type_name: concrete_type_name,
                position: selection_field.position,
            });
        }
        let has_sub_selections = !selection_field.selection_set.items.is_empty();
        match (has_sub_selections, type_description.is_complex()) {
            (false, true) => {
                return Err(Error::MissingSelectionSetOnType(
                    concrete_type_name,
                    selection_field.position,
                ))
            }
            (true, false) => {
                return Err(Error::SelectionSetOnWrongType(
                    concrete_type_name,
                    selection_field.position,
                ))
            }
            (true, true) => {
                let nested_local = convert(&concrete_type_name);
                let rhs = compile_scope(
                    ctx,
                    &selection_field.selection_set,
                    &concrete_type_name,
                    selection_field.position,
                    &nested_local,
                    prefix,
                    decls,
                )?;
                let decl_name = if settings.render.no_namespaces {
                    format!("{}{}", convert(prefix), concrete_type_name)
                } else {
                    nested_local
                };
                decls.insert(decl_name, rhs);
            }
            (false, false) => {}
        }

        let doc_comment = compile_documentation(&schema_field.documentation, 2);
        let compiled_value = converted_field_type(
            convert,
            schema_field,
            prefix,
            &settings.render,
            &settings.primitives,
        );
        prop_lines.push(format!("  {doc_comment}{prop_key}: {compiled_value};"));
    }

    for inline in &descriptor.inline_fragments {
        if let Some(false) = spread_can_match(ctx.schema, scope_type_name, &inline.on_type) {
            return Err(Error::UnrelatedFragmentSpread {
                spread_type_name: inline.on_type.clone(),
                parent_type_name: scope_type_name.to_string(),
                position: inline.position,
            });
        }
        let rhs = compile_scope(
            ctx,
            inline.selection_set,
            &inline.on_type,
            inline.position,
            &inline.name,
            prefix,
            decls,
        )?;
        let decl_name = if settings.render.no_namespaces {
            format!("{}{}", convert(prefix), inline.name)
        } else {
            inline.name.clone()
        };
        decls.insert(decl_name, rhs);
    }

    let union_suffix = fragment_union(convert, &descriptor, prefix, catalog, &settings.render)?;
    for spread in &descriptor.fragment_spreads {
        if let Some(definition) = catalog.get(&spread.fragment_name) {
            if let Some(false) = spread_can_match(ctx.schema, scope_type_name, &definition.on_type)
            {
                return Err(Error::UnrelatedFragmentSpread {
                    spread_type_name: definition.on_type.clone(),
                    parent_type_name: scope_type_name.to_string(),
                    position: spread.position,
                });
            }
        }
        ctx.record_fragment_use(&spread.fragment_name);
    }

    if descriptor.has_fields() {
        Ok(format!("{{\n{}\n}}{union_suffix}", prop_lines.join("\n")))
    } else if descriptor.has_fragments() {
        Ok(union_suffix)
    } else {
        Ok(String::from("{}"))
    }
}
