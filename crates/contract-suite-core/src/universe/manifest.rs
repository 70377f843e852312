// crates/contract-suite-core/src/universe/manifest.rs
// ============================================================================
// Module: Type Manifests
// Description: TOML records describing types without linking their code.
// Purpose: Let tooling analyse contract coverage from metadata alone.
// Dependencies: crate::model, serde, toml
// ============================================================================

//! ## Overview
//! A `.ctype` manifest is a TOML document describing one type. Manifest
//! descriptors carry no constructor or method bodies, so they can be
//! scanned, filtered, registered and reported on, but not executed.
//!
//! ```toml
//! name = "org.example.ShapeTest"
//! kind = "class"
//! markers = [{ type = "contract", target = "org.example.Shape" }]
//!
//! [[methods]]
//! name = "set_producer"
//! parameters = 1
//! markers = [{ type = "inject" }]
//! ```

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::model::ContractExclude;
use crate::model::ContractImpl;
use crate::model::Marker;
use crate::model::MethodDescriptor;
use crate::model::ReturnKind;
use crate::model::TypeDescriptor;
use crate::model::TypeKind;
use crate::model::TypeName;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// File extension of type manifests.
pub const MANIFEST_EXTENSION: &str = "ctype";

/// Maximum manifest size in bytes.
pub const MAX_MANIFEST_BYTES: usize = 256 * 1024;

// ============================================================================
// SECTION: Manifest Records
// ============================================================================

/// One type described in TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeManifest {
    /// Fully-qualified name.
    pub name: TypeName,
    /// Type kind.
    #[serde(default = "default_kind")]
    pub kind: TypeKind,
    /// Whether a class is abstract.
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    /// Whether the type is public.
    #[serde(default = "default_true")]
    pub public: bool,
    /// Direct superclass.
    #[serde(default)]
    pub superclass: Option<TypeName>,
    /// Directly implemented or extended interfaces.
    #[serde(default)]
    pub interfaces: Vec<TypeName>,
    /// Nested types.
    #[serde(default)]
    pub nested: Vec<TypeName>,
    /// Type markers.
    #[serde(default)]
    pub markers: Vec<MarkerManifest>,
    /// Declared methods.
    #[serde(default)]
    pub methods: Vec<MethodManifest>,
}

/// One declared method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodManifest {
    /// Method name.
    pub name: String,
    /// Return shape.
    #[serde(default)]
    pub returns: ReturnKind,
    /// Parameter count.
    #[serde(default)]
    pub parameters: usize,
    /// Whether the method is public.
    #[serde(default = "default_true")]
    pub public: bool,
    /// Whether the method is abstract.
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    /// Method markers.
    #[serde(default)]
    pub markers: Vec<MarkerManifest>,
}

/// Marker as written in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MarkerManifest {
    /// Contract test for `target`.
    Contract {
        /// Interface under test.
        target: TypeName,
    },
    /// Composed suite declaration.
    ContractImpl {
        /// Class under test.
        class_under_test: TypeName,
        /// Skipped interfaces.
        #[serde(default)]
        skip: Vec<TypeName>,
        /// Ignored contract test classes.
        #[serde(default)]
        ignore: Vec<TypeName>,
    },
    /// Method exclusion.
    ContractExclude {
        /// Contract test class.
        test: TypeName,
        /// Excluded methods.
        methods: Vec<String>,
    },
    /// Composed suite.
    ContractSuite,
    /// Disabled element.
    Ignore,
    /// Interface exempt from requiring a contract test.
    NoContractTest,
    /// Injection accessor or mutator.
    Inject,
    /// Dynamic base producer accessor.
    DynamicInject,
    /// Test method.
    Test,
    /// Before hook.
    Before,
    /// After hook.
    After,
    /// Any other annotation.
    Custom {
        /// Annotation type name.
        name: TypeName,
    },
}

/// Default kind for manifests that omit it.
const fn default_kind() -> TypeKind {
    TypeKind::Class
}

/// Serde default helper returning `true`.
const fn default_true() -> bool {
    true
}

// ============================================================================
// SECTION: Conversion
// ============================================================================

impl TypeManifest {
    /// Parses a manifest document.
    ///
    /// # Errors
    ///
    /// Returns a message when the document is oversized, not TOML, or does
    /// not match the manifest schema.
    pub fn parse(text: &str) -> Result<Self, String> {
        if text.len() > MAX_MANIFEST_BYTES {
            return Err(format!(
                "manifest exceeds size limit: {} bytes (max {MAX_MANIFEST_BYTES})",
                text.len()
            ));
        }
        let manifest: Self = toml::from_str(text).map_err(|err| err.to_string())?;
        if !TypeName::is_valid(manifest.name.as_str()) {
            return Err(format!("invalid type name `{}`", manifest.name));
        }
        Ok(manifest)
    }

    /// Converts the manifest into a metadata-only descriptor.
    #[must_use]
    pub fn into_descriptor(self) -> TypeDescriptor {
        let mut builder = match self.kind {
            TypeKind::Class => TypeDescriptor::class(self.name),
            TypeKind::Interface => TypeDescriptor::interface(self.name),
            TypeKind::Annotation => TypeDescriptor::annotation(self.name),
        }
        .set_abstract(self.is_abstract)
        .set_public(self.public);
        if let Some(superclass) = self.superclass {
            builder = builder.extends(superclass);
        }
        for interface in self.interfaces {
            builder = builder.implements(interface);
        }
        for nested in self.nested {
            builder = builder.nested(nested);
        }
        for marker in self.markers {
            builder = builder.marker(marker.into());
        }
        for method in self.methods {
            builder = builder.method(method.into());
        }
        builder.build()
    }
}

impl From<MethodManifest> for MethodDescriptor {
    fn from(manifest: MethodManifest) -> Self {
        let mut method = Self::new(manifest.name, manifest.returns, manifest.parameters);
        if !manifest.public {
            method = method.non_public();
        }
        if manifest.is_abstract {
            method = method.abstract_method();
        }
        manifest.markers.into_iter().fold(method, |method, marker| method.marker(marker.into()))
    }
}

impl From<MarkerManifest> for Marker {
    fn from(manifest: MarkerManifest) -> Self {
        match manifest {
            MarkerManifest::Contract {
                target,
            } => Self::Contract(target),
            MarkerManifest::ContractImpl {
                class_under_test,
                skip,
                ignore,
            } => Self::ContractImpl(ContractImpl {
                class_under_test,
                skip,
                ignore,
            }),
            MarkerManifest::ContractExclude {
                test,
                methods,
            } => Self::ContractExclude(ContractExclude {
                test,
                methods,
            }),
            MarkerManifest::ContractSuite => Self::ContractSuite,
            MarkerManifest::Ignore => Self::Ignore,
            MarkerManifest::NoContractTest => Self::NoContractTest,
            MarkerManifest::Inject => Self::Inject,
            MarkerManifest::DynamicInject => Self::DynamicInject,
            MarkerManifest::Test => Self::Test,
            MarkerManifest::Before => Self::Before,
            MarkerManifest::After => Self::After,
            MarkerManifest::Custom {
                name,
            } => Self::Custom(name),
        }
    }
}
