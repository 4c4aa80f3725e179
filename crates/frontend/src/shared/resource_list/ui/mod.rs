pub mod binding;
pub mod form;
pub mod list_page;
pub mod wizard;

pub use binding::ListBinding;
pub use list_page::resource_list_page;
pub use wizard::step_gated_page;
