pub(crate) mod manifest;
pub(crate) mod sprite_session;
