//! Structural description of a type declaration.
//!
//! Source readers build these; the kernel only looks at the shape and the
//! decorations and never at the underlying syntax tree.

/// Unqualified name of the embedded type that marks an API type.
pub const API_TYPE_MARKER: &str = "TypeMeta";

/// One struct field. Embedded fields have no names.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Field {
    pub names: Vec<String>,
    pub type_expr: String,
}

impl Field {
    pub fn embedded(type_expr: impl Into<String>) -> Self {
        Self {
            names: Vec::new(),
            type_expr: type_expr.into(),
        }
    }

    pub fn named(name: impl Into<String>, type_expr: impl Into<String>) -> Self {
        Self {
            names: vec![name.into()],
            type_expr: type_expr.into(),
        }
    }

    pub fn is_embedded(&self) -> bool {
        self.names.is_empty()
    }

    /// Type name with any package qualifier removed (`metav1.TypeMeta` →
    /// `TypeMeta`).
    pub fn unqualified_type(&self) -> &str {
        self.type_expr
            .rsplit_once('.')
            .map_or(self.type_expr.as_str(), |(_, name)| name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeShape {
    Struct { fields: Vec<Field> },
    /// Any non-struct type: named basic types, aliases, interfaces, ...
    Other,
}

/// A single-spec type declaration and the comment lines preceding it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Declaration {
    pub name: String,
    pub shape: TypeShape,
    pub decorations: Vec<String>,
}

impl Declaration {
    pub fn fields(&self) -> &[Field] {
        match &self.shape {
            TypeShape::Struct { fields } => fields,
            TypeShape::Other => &[],
        }
    }
}

/// True when `declaration` is a struct embedding the `TypeMeta` marker.
///
/// Only direct embedding counts: `*metav1.TypeMeta` or a named `TypeMeta`
/// field does not make a type an API type.
pub fn is_api_type(declaration: &Declaration) -> bool {
    declaration
        .fields()
        .iter()
        .any(|field| {
            field.is_embedded()
                && !field.type_expr.starts_with('*')
                && field.unqualified_type() == API_TYPE_MARKER
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declaration(shape: TypeShape) -> Declaration {
        Declaration {
            name: "Foo".to_string(),
            shape,
            decorations: Vec::new(),
        }
    }

    #[test]
    fn embedded_type_meta_is_api_type() {
        let decl = declaration(TypeShape::Struct {
            fields: vec![
                Field::embedded("metav1.TypeMeta"),
                Field::embedded("metav1.ObjectMeta"),
                Field::named("Spec", "FooSpec"),
            ],
        });
        assert!(is_api_type(&decl));
    }

    #[test]
    fn unqualified_type_meta_is_api_type() {
        let decl = declaration(TypeShape::Struct {
            fields: vec![Field::embedded("TypeMeta")],
        });
        assert!(is_api_type(&decl));
    }

    #[test]
    fn named_or_pointer_type_meta_is_not() {
        let decl = declaration(TypeShape::Struct {
            fields: vec![
                Field::named("Meta", "metav1.TypeMeta"),
                Field::embedded("*metav1.TypeMeta"),
                Field::embedded("metav1.TypeMetaList"),
            ],
        });
        assert!(!is_api_type(&decl));
    }

    #[test]
    fn non_struct_is_not() {
        assert!(!is_api_type(&declaration(TypeShape::Other)));
    }
}
