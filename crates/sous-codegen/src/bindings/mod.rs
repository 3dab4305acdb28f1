//! Built-in language bindings.
//!
//! Each binding is a unit struct with a static instance that the
//! [`BindingSet`](crate::registry::BindingSet) hands out by name.

// Java
#[cfg(feature = "java")]
pub mod java;

#[cfg(feature = "java")]
pub use java::{JAVA_BINDING, JavaBinding};

// Kotlin
#[cfg(feature = "kotlin")]
pub mod kotlin;

#[cfg(feature = "kotlin")]
pub use kotlin::{KOTLIN_BINDING, KotlinBinding};

// TypeScript
#[cfg(feature = "typescript")]
pub mod typescript;

#[cfg(feature = "typescript")]
pub use typescript::{TYPESCRIPT_BINDING, TypeScriptBinding};

// Python
#[cfg(feature = "python")]
pub mod python;

#[cfg(feature = "python")]
pub use python::{PYTHON_BINDING, PythonBinding};
