use super::expr::TypeExpr;
use super::{Error, Result};
use crate::config::RenderConfig;
use crate::graphql::document::{FragmentCatalog, FragmentUsage, SelectionDescriptor};

/// Canonical reference name for a fragment usage.
///
/// Spreads always reference the `Fragment` member of the named fragment's
/// generated family, dot-qualified unless namespaces are flattened. Inline
/// fragments carry their own per-operation name and only pick up the
/// converted prefix when flattening.
pub fn name_fragment<F>(
    convert: F,
    prefix: &str,
    usage: &FragmentUsage,
    no_namespaces: bool,
) -> String
where
    F: Fn(&str) -> String,
{
    match usage {
        FragmentUsage::Spread(spread) => {
            let separator = if no_namespaces { "" } else { "." };
            format!("{}{}Fragment", convert(&spread.fragment_name), separator)
        }
        FragmentUsage::Inline(inline) => {
            if no_namespaces {
                format!("{}{}", convert(prefix), inline.name)
            } else {
                inline.name.clone()
            }
        }
    }
}

/// Builds the fragment-union suffix for one selection scope: names grouped by
/// the concrete type they apply to (inline fragments first, then spreads,
/// each in declaration order), `&`-joined within a group, `|`-joined across
/// groups, and composed with the scope's own fields via a leading `" & "`.
///
/// An unresolvable spread is a contract violation and fails loudly; silently
/// dropping it would generate a too-narrow type.
pub fn fragment_union<F>(
    convert: F,
    descriptor: &SelectionDescriptor,
    prefix: &str,
    catalog: &FragmentCatalog,
    config: &RenderConfig,
) -> Result<String>
where
    F: Fn(&str) -> String + Copy,
{
    let mut groups: Vec<(String, Vec<String>)> = Vec::new();
    let mut push_name = |on_type: &str, name: String| {
        match groups.iter_mut().find(|(group_type, _)| group_type == on_type) {
            Some((_, names)) => names.push(name),
            None => groups.push((on_type.to_string(), vec![name])),
        }
    };

    for inline in &descriptor.inline_fragments {
        let name = name_fragment(
            convert,
            prefix,
            &FragmentUsage::Inline(inline),
            config.no_namespaces,
        );
        push_name(&inline.on_type, name);
    }
    for spread in &descriptor.fragment_spreads {
        let definition = catalog.get(&spread.fragment_name).ok_or_else(|| {
            Error::UnknownFragment(
                spread.fragment_name.clone(),
                spread.position,
                catalog.known_names(),
            )
        })?;
        let name = name_fragment(
            convert,
            prefix,
            &FragmentUsage::Spread(spread),
            config.no_namespaces,
        );
        push_name(&definition.on_type, name);
    }

    if groups.is_empty() {
        return Ok(String::new());
    }

    let group_count = groups.len();
    let union = TypeExpr::Union(
        groups
            .into_iter()
            .map(|(_, names)| {
                TypeExpr::Intersection(names.into_iter().map(TypeExpr::Name).collect())
            })
            .collect(),
    );
    let rendered = union.render();
    let merged = if group_count > 1 {
        format!("({rendered})")
    } else {
        rendered
    };
    if descriptor.has_fields() {
        Ok(format!(" & {merged}"))
    } else {
        Ok(merged)
    }
}
