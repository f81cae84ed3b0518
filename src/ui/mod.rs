pub mod modal;
pub mod notifications;
pub mod results;
pub mod view;

pub use modal::{Modal, ModalStack};
pub use notifications::{Notification, NotificationCenter, Severity};
pub use results::ResultsView;
pub use view::{Element, Node};
