pub use self::{course_view::CourseView, status_panel::StatusPanel};

mod course_view;
mod status_panel;
