pub(crate) mod dispatch;
pub(crate) mod script;
pub(crate) mod sprite_engine;
