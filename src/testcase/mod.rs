pub mod model;
pub mod normalize;
pub mod extract;
pub mod loader;
pub mod export_xlsx;
pub mod export_docx;
pub mod export_pdf;
pub mod export_all;
