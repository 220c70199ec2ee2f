pub(crate) mod document;
pub(crate) mod lenient;
pub(crate) mod model;
pub(crate) mod page;
