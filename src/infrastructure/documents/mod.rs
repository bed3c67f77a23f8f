mod virtual_document;

pub use virtual_document::*;
