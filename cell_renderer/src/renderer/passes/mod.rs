//! Frame pipeline stages, in execution order.

pub(crate) mod shadow;
pub(crate) mod geometry;
pub(crate) mod lighting;
pub(crate) mod forward;
pub(crate) mod post_process;
pub(crate) mod final_blit;
