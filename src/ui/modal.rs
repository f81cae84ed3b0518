use super::view::{Element, Node};
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct Modal {
    pub id: Uuid,
    pub content: Node,
    pub class_name: Option<String>,
}

/// Open modals, most recent last. `close(None)` closes the most recent.
#[derive(Default)]
pub struct ModalStack {
    open: Mutex<Vec<Modal>>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self::default()
    }

    fn modals(&self) -> MutexGuard<'_, Vec<Modal>> {
        self.open.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn create(&self, content: impl Into<Node>, class_name: Option<&str>) -> Uuid {
        let modal = Modal {
            id: Uuid::new_v4(),
            content: content.into(),
            class_name: class_name.map(str::to_string),
        };
        let id = modal.id;
        self.modals().push(modal);
        id
    }

    pub fn close(&self, id: Option<Uuid>) -> bool {
        let mut open = self.modals();
        match id {
            Some(id) => match open.iter().position(|m| m.id == id) {
                Some(index) => {
                    open.remove(index);
                    true
                }
                None => false,
            },
            None => open.pop().is_some(),
        }
    }

    pub fn active(&self) -> Option<Modal> {
        self.modals().last().cloned()
    }

    pub fn is_open(&self) -> bool {
        !self.modals().is_empty()
    }

    pub fn render(&self) -> Vec<Node> {
        self.modals()
            .iter()
            .map(|modal| {
                let mut panel = Element::new("div")
                    .class("modal-content bg-white rounded-2xl max-w-4xl w-full mx-4 max-h-[90vh] overflow-y-auto");
                if let Some(extra) = &modal.class_name {
                    panel = panel.class(extra);
                }
                Element::new("div")
                    .class("modal fixed inset-0 bg-black bg-opacity-50 flex items-center justify-center z-50")
                    .attr("data-id", modal.id.to_string())
                    .child(panel.child(modal.content.clone()))
                    .into()
            })
            .collect()
    }
}
