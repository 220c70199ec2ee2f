pub(crate) mod composite;
pub(crate) mod painter;
pub(crate) mod plan;
pub(crate) mod surface;
