pub(crate) mod common;
mod fixes;
mod routing;
