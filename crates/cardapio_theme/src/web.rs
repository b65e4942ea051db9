//! Browser `<style>` element target

use web_sys::Document;

use crate::error::TargetError;
use crate::target::ThemeTarget;

/// Writes tenant styles into the current document's `<head>`
#[derive(Clone, Debug)]
pub struct DomTarget {
    document: Option<Document>,
}

impl DomTarget {
    /// Bind to `window.document`, if there is one
    pub fn new() -> Self {
        Self {
            document: web_sys::window().and_then(|window| window.document()),
        }
    }

    fn document(&self) -> Result<&Document, TargetError> {
        self.document
            .as_ref()
            .ok_or_else(|| TargetError::Unavailable("no window.document".into()))
    }
}

impl Default for DomTarget {
    fn default() -> Self {
        Self::new()
    }
}

fn write_error(element_id: &str, err: wasm_bindgen::JsValue) -> TargetError {
    TargetError::Write {
        element_id: element_id.to_string(),
        reason: format!("{err:?}"),
    }
}

impl ThemeTarget for DomTarget {
    fn is_available(&self) -> bool {
        self.document.is_some()
    }

    fn upsert_style(&mut self, element_id: &str, css: &str) -> Result<(), TargetError> {
        let document = self.document()?;

        // Replace text in place so the old rules stay live until the new ones land
        if let Some(existing) = document.get_element_by_id(element_id) {
            existing.set_text_content(Some(css));
            return Ok(());
        }

        let head = document
            .head()
            .ok_or_else(|| TargetError::Unavailable("document has no <head>".into()))?;
        let style = document
            .create_element("style")
            .map_err(|e| write_error(element_id, e))?;
        style.set_id(element_id);
        style.set_text_content(Some(css));
        head.append_child(&style)
            .map_err(|e| write_error(element_id, e))?;
        Ok(())
    }

    fn remove_style(&mut self, element_id: &str) -> Result<(), TargetError> {
        if let Some(existing) = self.document()?.get_element_by_id(element_id) {
            existing.remove();
        }
        Ok(())
    }
}
