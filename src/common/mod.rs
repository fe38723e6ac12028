pub mod response;

pub use response::RenderedResponse;
