//! Circular dependency detection.
//!
//! The container resolves through `&mut self`, so the in-flight chain lives on
//! the container itself rather than in thread-local state, and a detected
//! cycle is reported as an ordinary error instead of unwinding.

use crate::error::{DiError, DiResult};
use crate::key::BindingKey;

/// Bindings currently being resolved, outermost first.
#[derive(Debug)]
pub(crate) struct ResolutionStack {
    stack: Vec<BindingKey>,
    max_depth: usize,
    detect_cycles: bool,
}

impl ResolutionStack {
    pub(crate) fn new(max_depth: usize, detect_cycles: bool) -> Self {
        Self {
            stack: Vec::new(),
            max_depth,
            detect_cycles,
        }
    }

    /// Pushes `key`, failing if it is already in flight or the chain is too deep.
    ///
    /// Every successful `enter` must be paired with [`leave`](Self::leave).
    pub(crate) fn enter(&mut self, key: &BindingKey) -> DiResult<()> {
        // Circular detection BEFORE pushing the new key
        if self.detect_cycles && self.stack.contains(key) {
            let mut path: Vec<String> = self.stack.iter().map(BindingKey::to_string).collect();
            path.push(key.to_string());
            return Err(DiError::Circular(path));
        }

        if self.stack.len() >= self.max_depth {
            return Err(DiError::DepthExceeded(self.stack.len()));
        }

        self.stack.push(key.clone());
        Ok(())
    }

    pub(crate) fn leave(&mut self, key: &BindingKey) {
        let last = self.stack.pop();
        debug_assert_eq!(last.as_ref(), Some(key));
    }

    #[cfg(test)]
    pub(crate) fn depth(&self) -> usize {
        self.stack.len()
    }
}
