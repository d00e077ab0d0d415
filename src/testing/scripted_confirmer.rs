use std::cell::RefCell;

use crate::domain::AppError;
use crate::ports::{ConfirmationRequest, VoteConfirmer};

/// Confirmer that answers with a fixed decision and remembers what it was asked.
pub struct ScriptedConfirmer {
    answer: bool,
    pub requests: RefCell<Vec<ConfirmationRequest>>,
}

impl ScriptedConfirmer {
    pub fn accepting() -> Self {
        Self { answer: true, requests: RefCell::new(Vec::new()) }
    }

    pub fn declining() -> Self {
        Self { answer: false, requests: RefCell::new(Vec::new()) }
    }

    pub fn times_asked(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl VoteConfirmer for ScriptedConfirmer {
    fn confirm(&self, request: &ConfirmationRequest) -> Result<bool, AppError> {
        self.requests.borrow_mut().push(request.clone());
        Ok(self.answer)
    }
}
