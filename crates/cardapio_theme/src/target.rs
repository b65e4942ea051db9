//! Where injected theme CSS ends up
//!
//! The registry never touches a document directly; it writes through a
//! [`ThemeTarget`]. The browser uses `DomTarget` (feature `web`), tests and
//! server code use [`MemoryTarget`], server-side rendering uses [`NoopTarget`].

use indexmap::IndexMap;

use crate::error::TargetError;

/// A place that holds one style element per id
pub trait ThemeTarget {
    /// Whether there is a document to write into
    fn is_available(&self) -> bool;

    /// Create the element, or replace its text content in place
    ///
    /// Must either fully succeed or leave the previous content untouched.
    fn upsert_style(&mut self, element_id: &str, css: &str) -> Result<(), TargetError>;

    /// Detach the element; removing a missing element is not an error
    fn remove_style(&mut self, element_id: &str) -> Result<(), TargetError>;
}

/// In-memory document head
#[derive(Clone, Debug, Default)]
pub struct MemoryTarget {
    elements: IndexMap<String, String>,
    writes: usize,
    fail_writes: bool,
}

impl MemoryTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text content of a style element
    pub fn style(&self, element_id: &str) -> Option<&str> {
        self.elements.get(element_id).map(String::as_str)
    }

    /// Number of style elements currently present
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Element ids in insertion order
    pub fn element_ids(&self) -> impl Iterator<Item = &str> {
        self.elements.keys().map(String::as_str)
    }

    /// Successful writes so far
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Make every following write fail
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }
}

impl ThemeTarget for MemoryTarget {
    fn is_available(&self) -> bool {
        true
    }

    fn upsert_style(&mut self, element_id: &str, css: &str) -> Result<(), TargetError> {
        if self.fail_writes {
            return Err(TargetError::Write {
                element_id: element_id.to_string(),
                reason: "write rejected".into(),
            });
        }
        match self.elements.get_mut(element_id) {
            Some(existing) => {
                existing.clear();
                existing.push_str(css);
            }
            None => {
                self.elements.insert(element_id.to_string(), css.to_string());
            }
        }
        self.writes += 1;
        Ok(())
    }

    fn remove_style(&mut self, element_id: &str) -> Result<(), TargetError> {
        self.elements.shift_remove(element_id);
        Ok(())
    }
}

/// Target with no document, e.g. during server-side rendering
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopTarget;

impl ThemeTarget for NoopTarget {
    fn is_available(&self) -> bool {
        false
    }

    fn upsert_style(&mut self, _element_id: &str, _css: &str) -> Result<(), TargetError> {
        Err(TargetError::Unavailable("no document".into()))
    }

    fn remove_style(&mut self, _element_id: &str) -> Result<(), TargetError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_replaces_in_place() {
        let mut target = MemoryTarget::new();
        target.upsert_style("tenant-theme-a", ":root {}").unwrap();
        target.upsert_style("tenant-theme-b", ":root {}").unwrap();
        target.upsert_style("tenant-theme-a", ":root { --x: #fff; }").unwrap();

        assert_eq!(target.len(), 2);
        assert_eq!(target.style("tenant-theme-a"), Some(":root { --x: #fff; }"));
        assert_eq!(
            target.element_ids().collect::<Vec<_>>(),
            ["tenant-theme-a", "tenant-theme-b"]
        );
        assert_eq!(target.writes(), 3);
    }

    #[test]
    fn test_failed_write_keeps_previous_content() {
        let mut target = MemoryTarget::new();
        target.upsert_style("tenant-theme-a", "old").unwrap();
        target.fail_writes(true);
        assert!(target.upsert_style("tenant-theme-a", "new").is_err());
        assert_eq!(target.style("tenant-theme-a"), Some("old"));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut target = MemoryTarget::new();
        target.upsert_style("tenant-theme-a", "css").unwrap();
        target.remove_style("tenant-theme-a").unwrap();
        target.remove_style("tenant-theme-a").unwrap();
        assert!(target.is_empty());
    }

    #[test]
    fn test_noop_is_unavailable() {
        let mut target = NoopTarget;
        assert!(!target.is_available());
        assert!(matches!(
            target.upsert_style("tenant-theme-a", "css"),
            Err(TargetError::Unavailable(_))
        ));
    }
}
