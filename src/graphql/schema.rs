//! Loading and modeling of introspection JSON.
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;

#[derive(Debug)]
pub enum Error {
    MissingTypeOfForList,
    MissingTypeOfForNonNull,
    MissingNameForField,
    UnknownTypeKind { name: String, kind: String },
    JsonParseError(serde_json::Error),
}

pub type Documentation = Option<String>;

#[derive(Debug, Clone)]
pub enum ScalarType {
    Custom(String),
    Boolean,
    String,
    Float,
    Int,
    ID,
}

impl From<&str> for ScalarType {
    fn from(name: &str) -> Self {
        match name {
            "Boolean" => ScalarType::Boolean,
            "String" => ScalarType::String,
            "Float" => ScalarType::Float,
            "Int" => ScalarType::Int,
            "ID" => ScalarType::ID,
            _ => ScalarType::Custom(name.to_string()),
        }
    }
}

impl ScalarType {
    pub fn name(&self) -> &str {
        match self {
            ScalarType::Boolean => "Boolean",
            ScalarType::String => "String",
            ScalarType::Float => "Float",
            ScalarType::Int => "Int",
            ScalarType::ID => "ID",
            ScalarType::Custom(name) => name,
        }
    }
}

#[derive(Debug)]
pub enum FieldTypeDefinition {
    List(Box<FieldType>),
    Object(String),
    Interface(String),
    Union(String),
    Enum(String),
    Scalar(ScalarType),
    InputObject(String),
}

#[derive(Debug)]
pub struct FieldType {
    pub nullable: bool,
    pub definition: FieldTypeDefinition,
}

impl FieldType {
    /// The innermost, non-list type description.
    pub fn concrete(&self) -> &FieldType {
        match &self.definition {
            FieldTypeDefinition::List(inner) => inner.concrete(),
            _ => self,
        }
    }

    /// Declared name of the innermost type.
    pub fn concrete_name(&self) -> &str {
        match &self.concrete().definition {
            FieldTypeDefinition::Object(name)
            | FieldTypeDefinition::Interface(name)
            | FieldTypeDefinition::Union(name)
            | FieldTypeDefinition::Enum(name)
            | FieldTypeDefinition::InputObject(name) => name,
            FieldTypeDefinition::Scalar(scalar) => scalar.name(),
            FieldTypeDefinition::List(_) => unreachable!("concrete() unwraps lists"),
        }
    }

    /// Whether selecting this field requires a sub selection set.
    pub fn is_complex(&self) -> bool {
        matches!(
            self.concrete().definition,
            FieldTypeDefinition::Object(_)
                | FieldTypeDefinition::Interface(_)
                | FieldTypeDefinition::Union(_)
                | FieldTypeDefinition::InputObject(_)
        )
    }

    pub fn is_enum(&self) -> bool {
        matches!(self.concrete().definition, FieldTypeDefinition::Enum(_))
    }

    pub fn is_union(&self) -> bool {
        matches!(self.concrete().definition, FieldTypeDefinition::Union(_))
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self.concrete().definition, FieldTypeDefinition::Scalar(_))
    }
}

impl TryFrom<FieldSubtypeJson> for FieldType {
    type Error = Error;
    fn try_from(json: FieldSubtypeJson) -> Result<Self, Error> {
        let mut nullable = true;
        let mut iter = json;
        loop {
            let definition = match iter.kind.as_ref() {
                "NON_NULL" => {
                    nullable = false;
                    iter = *iter.of_type.ok_or(Error::MissingTypeOfForNonNull)?;
                    continue;
                }
                "LIST" => {
                    let inner = *iter.of_type.ok_or(Error::MissingTypeOfForList)?;
                    FieldTypeDefinition::List(Box::new(inner.try_into()?))
                }
                kind => {
                    let name = iter.name.ok_or(Error::MissingNameForField)?;
                    match kind {
                        "OBJECT" => FieldTypeDefinition::Object(name),
                        "INTERFACE" => FieldTypeDefinition::Interface(name),
                        "UNION" => FieldTypeDefinition::Union(name),
                        "ENUM" => FieldTypeDefinition::Enum(name),
                        "SCALAR" => FieldTypeDefinition::Scalar(ScalarType::from(name.as_ref())),
                        "INPUT_OBJECT" => FieldTypeDefinition::InputObject(name),
                        other => {
                            return Err(Error::UnknownTypeKind {
                                name,
                                kind: other.to_string(),
                            })
                        }
                    }
                }
            };
            return Ok(FieldType {
                nullable,
                definition,
            });
        }
    }
}

#[derive(Debug)]
pub struct Field {
    pub name: String,
    pub documentation: Documentation,
    pub type_description: FieldType,
}

impl TryFrom<FieldJson> for Field {
    type Error = Error;
    fn try_from(json: FieldJson) -> Result<Self, Error> {
        Ok(Field {
            name: json.name,
            documentation: json.description.map(|docs| {
                docs.lines()
                    .map(|line| line.trim())
                    .filter(|line| !line.is_empty())
                    .collect::<Vec<_>>()
                    .join("\n")
            }),
            type_description: json.type_description.try_into()?,
        })
    }
}

pub type FieldsLookup = HashMap<String, Field>;

#[derive(Debug)]
pub struct ObjectType {
    pub fields: FieldsLookup,
}

#[derive(Debug)]
pub struct InterfaceType {
    pub fields: FieldsLookup,
    pub possible_types: Vec<String>,
}

#[derive(Debug)]
pub struct UnionType {
    pub possible_types: Vec<String>,
}

#[derive(Debug)]
pub enum TypeDefinition {
    Object(ObjectType),
    Interface(InterfaceType),
    Union(UnionType),
    Enum,
    Scalar(String),
    InputObject(String),
}

#[derive(Debug)]
pub struct Type {
    pub name: String,
    pub definition: TypeDefinition,
}

fn fields_lookup_from_json(fields_json: Option<Vec<FieldJson>>) -> Result<FieldsLookup, Error> {
    let fields_json = fields_json.unwrap_or_default();
    let mut fields = HashMap::with_capacity(fields_json.len());
    for field_json in fields_json {
        let field: Field = field_json.try_into()?;
        fields.insert(field.name.clone(), field);
    }
    Ok(fields)
}

fn possible_type_names(possible: Option<Vec<NamedJson>>) -> Vec<String> {
    possible
        .unwrap_or_default()
        .into_iter()
        .map(|named| named.name)
        .collect()
}

impl TryFrom<TypeJson> for Type {
    type Error = Error;
    fn try_from(json: TypeJson) -> Result<Self, Error> {
        let definition = match json.kind.as_ref() {
            "OBJECT" => TypeDefinition::Object(ObjectType {
                fields: fields_lookup_from_json(json.fields)?,
            }),
            "INTERFACE" => TypeDefinition::Interface(InterfaceType {
                fields: fields_lookup_from_json(json.fields)?,
                possible_types: possible_type_names(json.possible_types),
            }),
            "UNION" => TypeDefinition::Union(UnionType {
                possible_types: possible_type_names(json.possible_types),
            }),
            "ENUM" => TypeDefinition::Enum,
            "SCALAR" => TypeDefinition::Scalar(json.name.clone()),
            "INPUT_OBJECT" => TypeDefinition::InputObject(json.name.clone()),
            _ => {
                return Err(Error::UnknownTypeKind {
                    name: json.name,
                    kind: json.kind,
                })
            }
        };
        Ok(Type {
            name: json.name,
            definition,
        })
    }
}

#[derive(Deserialize)]
struct FieldSubtypeJson {
    kind: String,
    name: Option<String>,
    #[serde(rename(deserialize = "ofType"))]
    of_type: Option<Box<FieldSubtypeJson>>,
}

#[derive(Deserialize)]
struct FieldJson {
    name: String,
    description: Option<String>,
    #[serde(rename(deserialize = "type"))]
    type_description: FieldSubtypeJson,
}

#[derive(Deserialize)]
struct NamedJson {
    name: String,
}

#[derive(Deserialize)]
struct TypeJson {
    kind: String,
    name: String,
    fields: Option<Vec<FieldJson>>,
    #[serde(rename(deserialize = "possibleTypes"))]
    possible_types: Option<Vec<NamedJson>>,
}

#[derive(Deserialize)]
struct SchemaJson {
    types: Vec<TypeJson>,
}

#[derive(Deserialize)]
struct DataJson {
    #[serde(rename(deserialize = "__schema"))]
    schema: SchemaJson,
}

#[derive(Deserialize)]
struct RawSchemaJson {
    data: DataJson,
}

#[derive(Debug)]
pub struct Schema {
    types: HashMap<String, Type>,
}

impl Schema {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        let parsed: RawSchemaJson =
            serde_json::from_reader(reader).map_err(Error::JsonParseError)?;
        let parsed_types = parsed.data.schema.types;
        let mut types = HashMap::with_capacity(parsed_types.len());
        for type_json in parsed_types {
            let processed: Type = type_json.try_into()?;
            types.insert(processed.name.clone(), processed);
        }
        Ok(Schema { types })
    }

    pub fn get_type_for_name(&self, name: &str) -> Option<&Type> {
        self.types.get(name)
    }
}
