pub(crate) mod journal;
pub(crate) mod movement;
