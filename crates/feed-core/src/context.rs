use std::collections::HashMap;

/// State scoped to a single compile cycle.
///
/// Create a fresh context per compile; nothing here survives between cycles.
#[derive(Debug, Default)]
pub struct CompileContext {
    undigited_codes: HashMap<String, u32>,
}

impl CompileContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter value for a product code without digits, assigned in first-seen order from 1.
    pub fn counter_for(&mut self, product_code: &str) -> u32 {
        if let Some(value) = self.undigited_codes.get(product_code) {
            return *value;
        }
        let next = self.undigited_codes.len() as u32 + 1;
        self.undigited_codes.insert(product_code.to_string(), next);
        next
    }
}
