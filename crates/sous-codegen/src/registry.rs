//! Named collections of bindings.

use crate::binding::Binding;

/// An ordered set of bindings, looked up by [`Binding::name`].
///
/// Sets are plain values: build one with [`BindingSet::builtin`] and extend it
/// with [`BindingSet::with`]. Nothing is registered globally.
#[derive(Clone, Default)]
pub struct BindingSet {
    bindings: Vec<&'static dyn Binding>,
}

impl BindingSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every binding compiled into this crate, in a stable order.
    pub fn builtin() -> Self {
        #[allow(unused_mut)]
        let mut set = Self::new();

        #[cfg(feature = "java")]
        {
            set = set.with(&crate::bindings::JAVA_BINDING);
        }

        #[cfg(feature = "kotlin")]
        {
            set = set.with(&crate::bindings::KOTLIN_BINDING);
        }

        #[cfg(feature = "typescript")]
        {
            set = set.with(&crate::bindings::TYPESCRIPT_BINDING);
        }

        #[cfg(feature = "python")]
        {
            set = set.with(&crate::bindings::PYTHON_BINDING);
        }

        set
    }

    /// Add a binding. A binding with the same name replaces the earlier one
    /// in place.
    pub fn with(mut self, binding: &'static dyn Binding) -> Self {
        match self
            .bindings
            .iter_mut()
            .find(|b| b.name() == binding.name())
        {
            Some(slot) => *slot = binding,
            None => self.bindings.push(binding),
        }
        self
    }

    /// Get a binding by name.
    pub fn get(&self, name: &str) -> Option<&'static dyn Binding> {
        self.bindings.iter().find(|b| b.name() == name).copied()
    }

    /// All bindings for a target language.
    pub fn for_language(&self, language: &str) -> Vec<&'static dyn Binding> {
        self.bindings
            .iter()
            .filter(|b| b.language() == language)
            .copied()
            .collect()
    }

    /// Resolve a list of names, failing on the first one that is unknown.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<&'static dyn Binding>, String> {
        names
            .iter()
            .map(|n| self.get(n.as_ref()).ok_or_else(|| n.as_ref().to_string()))
            .collect()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.bindings.iter().map(|b| b.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static dyn Binding> + '_ {
        self.bindings.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl std::fmt::Debug for BindingSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(all(
        feature = "java",
        feature = "kotlin",
        feature = "typescript",
        feature = "python"
    ))]
    fn test_builtin_order() {
        let set = BindingSet::builtin();
        assert_eq!(set.names(), ["java", "kotlin", "typescript", "python"]);
        assert_eq!(set.for_language("kotlin").len(), 1);
    }

    #[test]
    fn test_select() {
        let set = BindingSet::builtin();
        let Some(first) = set.names().first().copied() else {
            return;
        };
        assert_eq!(set.select(&[first]).unwrap().len(), 1);
        assert!(matches!(set.select(&[first, "cobol"]), Err(n) if n == "cobol"));
        assert!(set.get("cobol").is_none());
    }

    #[test]
    #[cfg(feature = "java")]
    fn test_with_replaces_by_name() {
        let set = BindingSet::new()
            .with(&crate::bindings::JAVA_BINDING)
            .with(&crate::bindings::JAVA_BINDING);
        assert_eq!(set.len(), 1);
    }
}
