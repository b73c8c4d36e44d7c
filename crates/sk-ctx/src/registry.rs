use rustc_hash::{FxHashMap, FxHashSet};
use sk_ast::{EnumDeclaration, FunctionParameter, TypeName};

/// A recorded function or initializer signature, keyed by name and
/// enclosing type for later lookup by the call-argument matcher and by
/// passes that need to know how a call should be re-labeled.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionTranslation {
    pub source_name: String,
    pub type_name: Option<TypeName>,
    pub prefix: String,
    pub parameters: Vec<FunctionParameter>,
}

/// The mutable state of the transpilation context. Wrapped in a single
/// mutex in [`crate::Context`] rather than one mutex per field: first-round
/// record calls touch several of these together (e.g. function recording
/// reads the enum-kind sets while writing function translations), so one
/// lock avoids a lock-ordering hazard between fields.
#[derive(Debug, Default)]
pub struct Registry {
    pub protocols: FxHashSet<String>,
    pub enum_class_names: FxHashSet<String>,
    pub sealed_class_names: FxHashSet<String>,
    pub inheritances: FxHashMap<String, Vec<String>>,
    pub enum_declarations: FxHashMap<String, EnumDeclaration>,
    pub function_translations: Vec<FunctionTranslation>,
    pub pure_functions: FxHashSet<String>,
    pub templates: crate::templates::TemplateRegistry,
}

impl Registry {
    pub fn get_function_translation(
        &self,
        name: &str,
        type_name: Option<&str>,
    ) -> Option<&FunctionTranslation> {
        self.function_translations.iter().rev().find(|ft| {
            ft.source_name == name && ft.type_name.as_deref() == type_name
        })
    }
}
