pub(crate) mod actions;
pub(crate) mod data;
pub(crate) mod render;
pub(crate) mod states;
