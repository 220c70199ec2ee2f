pub(crate) mod audios;
pub(crate) mod context;
pub(crate) mod cover;
pub(crate) mod directory;
pub(crate) mod dispatch;
pub(crate) mod feed;
pub(crate) mod graduation;
pub(crate) mod media;
pub(crate) mod pagination;
pub(crate) mod profile;
pub(crate) mod subject;
pub(crate) mod text;
pub(crate) mod wish;
