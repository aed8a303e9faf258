pub mod table_render_context;

pub use table_render_context::TableRenderContext;
