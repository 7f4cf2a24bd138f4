mod action_list;
mod status_bar;

pub use action_list::draw_action_list;
pub use status_bar::{draw_footer, draw_status_bar};
