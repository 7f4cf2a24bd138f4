mod app;
mod click_regions;
mod draw;
mod widgets;

pub use app::{App, IDLE_FOOTER, StatusTone};
pub use click_regions::ClickRegions;
pub use draw::draw;
