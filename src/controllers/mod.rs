pub mod drawer;
pub mod list_view;

pub use drawer::{CloseReason, Drawer, PanelMode, PanelState, SubmitTicket};
pub use list_view::{ListView, Row};
